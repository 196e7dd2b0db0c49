use crate::domain::model::{CsvRow, Organization};

pub const LATITUDE_MIN: f64 = -90.0;
pub const LATITUDE_MAX: f64 = 90.0;
pub const LONGITUDE_MIN: f64 = -180.0;
pub const LONGITUDE_MAX: f64 = 180.0;

pub const ORGANIZATION_NAME_HEADERS: &[&str] = &["Organization Name", "organizationName", "name"];
pub const MISSION_HEADERS: &[&str] = &["Mission", "mission", "description"];
pub const WEBSITE_HEADERS: &[&str] = &["Website", "website"];
pub const CONTACT_EMAIL_HEADERS: &[&str] = &["Contact Email", "contactEmail", "email"];
pub const HEADQUARTERS_ADDRESS_HEADERS: &[&str] =
    &["Headquarters Address", "headquartersAddress", "address"];
pub const STREET_HEADERS: &[&str] = &["Street", "street"];
pub const CITY_HEADERS: &[&str] = &["City", "city"];
pub const STATE_PROVINCE_HEADERS: &[&str] =
    &["State/Province", "State Province", "stateProvince", "state"];
pub const COUNTRY_HEADERS: &[&str] = &["Country", "country"];
pub const ZIP_POSTAL_CODE_HEADERS: &[&str] =
    &["Zip/Postal Code", "ZipPostal Code", "zipPostalCode", "zip"];
pub const SITE_LATITUDE_HEADERS: &[&str] = &["Site Latitude", "siteLatitude", "latitude"];
pub const SITE_LONGITUDE_HEADERS: &[&str] = &["Site Longitude", "siteLongitude", "longitude"];

/// 依優先順序取第一個存在的表頭；表頭存在但值為空時仍採用該值
pub fn resolve_field<'a>(row: &'a CsvRow, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|alias| row.get(alias))
}

fn resolve_text(row: &CsvRow, aliases: &[&str]) -> String {
    resolve_field(row, aliases).unwrap_or_default().to_string()
}

/// 寬鬆解析數值：去除外層引號後取最長的合法浮點數前綴，無法解析時為 0
pub fn parse_numeric_value(value: Option<&str>) -> f64 {
    let cleaned = clean_value(value.unwrap_or_default());
    numeric_prefix(cleaned)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn clean_value(value: &str) -> &str {
    let trimmed = value.trim();
    let trimmed = trimmed
        .strip_prefix(['"', '\''])
        .unwrap_or(trimmed);
    trimmed.strip_suffix(['"', '\'']).unwrap_or(trimmed).trim()
}

// [+-]digits[.digits][(e|E)[+-]digits]
fn numeric_prefix(value: &str) -> Option<&str> {
    let bytes = value.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&value[..end])
}

/// 0 代表「未提供位置」，與 NaN、超出範圍一樣視為無效
pub fn validate_coordinates(latitude: f64, longitude: f64) -> bool {
    !latitude.is_nan()
        && !longitude.is_nan()
        && latitude != 0.0
        && longitude != 0.0
        && (LATITUDE_MIN..=LATITUDE_MAX).contains(&latitude)
        && (LONGITUDE_MIN..=LONGITUDE_MAX).contains(&longitude)
}

/// 轉換單列；座標或名稱無效時回傳 None
pub fn transform_row(row: &CsvRow) -> Option<Organization> {
    let site_latitude = parse_numeric_value(resolve_field(row, SITE_LATITUDE_HEADERS));
    let site_longitude = parse_numeric_value(resolve_field(row, SITE_LONGITUDE_HEADERS));

    if !validate_coordinates(site_latitude, site_longitude) {
        return None;
    }

    let organization_name = resolve_text(row, ORGANIZATION_NAME_HEADERS);
    if organization_name.trim().is_empty() {
        return None;
    }

    Some(Organization {
        organization_name,
        mission: resolve_text(row, MISSION_HEADERS),
        website: resolve_text(row, WEBSITE_HEADERS),
        contact_email: resolve_text(row, CONTACT_EMAIL_HEADERS),
        headquarters_address: resolve_text(row, HEADQUARTERS_ADDRESS_HEADERS),
        street: resolve_text(row, STREET_HEADERS),
        city: resolve_text(row, CITY_HEADERS),
        state_province: resolve_text(row, STATE_PROVINCE_HEADERS),
        country: resolve_text(row, COUNTRY_HEADERS),
        zip_postal_code: resolve_text(row, ZIP_POSTAL_CODE_HEADERS),
        site_latitude,
        site_longitude,
    })
}

/// 保留輸入順序，無效列直接略過不計為錯誤
pub fn transform_rows(rows: &[CsvRow]) -> Vec<Organization> {
    rows.iter().filter_map(transform_row).collect()
}
