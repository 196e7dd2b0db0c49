use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 海洋研究組織，CSV 轉換後的最終紀錄
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub organization_name: String,
    pub mission: String,
    pub website: String,
    pub contact_email: String,
    pub headquarters_address: String,
    pub street: String,
    pub city: String,
    pub state_province: String,
    pub country: String,
    pub zip_postal_code: String,
    pub site_latitude: f64,
    pub site_longitude: f64,
}

impl Organization {
    /// 用於搜尋的字串欄位（不含座標）
    pub fn text_fields(&self) -> [&str; 10] {
        [
            self.organization_name.as_str(),
            self.mission.as_str(),
            self.website.as_str(),
            self.contact_email.as_str(),
            self.headquarters_address.as_str(),
            self.street.as_str(),
            self.city.as_str(),
            self.state_province.as_str(),
            self.country.as_str(),
            self.zip_postal_code.as_str(),
        ]
    }
}

/// 單行 CSV：表頭名稱 -> 儲存格文字，保留欄位順序
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CsvRow {
    cells: Vec<(String, String)>,
}

impl CsvRow {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Duplicate headers resolve to the last occurrence.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .rev()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// 一次載入週期的結果快照，重新載入時整批替換
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub organizations: Vec<Organization>,
    pub rows_parsed: usize,
    pub rows_rejected: usize,
    pub bounds: Option<MapBounds>,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Csv,
    #[default]
    Table,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Table => "txt",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_row_lookup_prefers_last_duplicate() {
        let row = CsvRow::new(vec![
            ("name".to_string(), "First".to_string()),
            ("city".to_string(), "Lisbon".to_string()),
            ("name".to_string(), "Second".to_string()),
        ]);

        assert_eq!(row.get("name"), Some("Second"));
        assert_eq!(row.get("city"), Some("Lisbon"));
        assert_eq!(row.get("country"), None);
        assert_eq!(row.headers().collect::<Vec<_>>(), vec!["name", "city", "name"]);
    }

    #[test]
    fn test_organization_serializes_camel_case() {
        let org = Organization {
            organization_name: "Deep Sea Alliance".to_string(),
            site_latitude: 10.5,
            site_longitude: -50.2,
            ..Default::default()
        };

        let json = serde_json::to_value(&org).unwrap();
        assert_eq!(json["organizationName"], "Deep Sea Alliance");
        assert_eq!(json["siteLatitude"], 10.5);
        assert_eq!(json["zipPostalCode"], "");
    }
}
