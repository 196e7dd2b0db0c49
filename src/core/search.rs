use crate::domain::model::Organization;

pub const DEFAULT_LOCATION: &str = "Location not available";

/// 不分大小寫的子字串搜尋，涵蓋所有文字欄位；空白查詢回傳全部
pub fn filter_organizations<'a>(
    organizations: &'a [Organization],
    query: &str,
) -> Vec<&'a Organization> {
    if query.trim().is_empty() {
        return organizations.iter().collect();
    }

    let needle = query.to_lowercase();
    organizations
        .iter()
        .filter(|org| {
            org.text_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn results_summary(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{} organization{} found", count, suffix)
}

/// 以組織名稱作為弱參照鍵
pub fn find_by_name<'a>(organizations: &'a [Organization], name: &str) -> Option<&'a Organization> {
    organizations
        .iter()
        .find(|org| org.organization_name == name)
}

pub fn card_address(org: &Organization) -> String {
    [&org.city, &org.state_province, &org.country]
        .into_iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn popup_location(org: &Organization) -> String {
    let parts: Vec<&str> = [
        &org.headquarters_address,
        &org.city,
        &org.state_province,
        &org.country,
    ]
    .into_iter()
    .map(String::as_str)
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        DEFAULT_LOCATION.to_string()
    } else {
        parts.join(", ")
    }
}
