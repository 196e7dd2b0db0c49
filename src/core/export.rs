use crate::core::geo::format_coordinates;
use crate::core::search::{popup_location, results_summary};
use crate::domain::model::{Organization, OutputFormat};
use crate::utils::error::{DirectoryError, Result};

/// 匯出 CSV 時使用的表頭，與試算表匯出的命名一致
pub const EXPORT_HEADERS: [&str; 12] = [
    "Organization Name",
    "Mission",
    "Website",
    "Contact Email",
    "Headquarters Address",
    "Street",
    "City",
    "State/Province",
    "Country",
    "Zip/Postal Code",
    "Site Latitude",
    "Site Longitude",
];

pub fn render(organizations: &[&Organization], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(organizations)?),
        OutputFormat::Csv => render_csv(organizations),
        OutputFormat::Table => Ok(render_table(organizations)),
    }
}

fn render_csv(organizations: &[&Organization]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for org in organizations {
        let latitude = org.site_latitude.to_string();
        let longitude = org.site_longitude.to_string();
        let mut record = org.text_fields().to_vec();
        record.push(&latitude);
        record.push(&longitude);
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| {
        DirectoryError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string()))
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render_table(organizations: &[&Organization]) -> String {
    let mut out = String::new();

    for org in organizations {
        out.push_str(&format!("🌊 {}\n", org.organization_name));
        if !org.mission.is_empty() {
            out.push_str(&format!("   {}\n", org.mission));
        }
        out.push_str(&format!("   📍 {}\n", popup_location(org)));
        out.push_str(&format!(
            "   🧭 {}\n",
            format_coordinates(org.site_latitude, org.site_longitude)
        ));
        if !org.website.is_empty() {
            out.push_str(&format!("   🔗 {}\n", org.website));
        }
        if !org.contact_email.is_empty() {
            out.push_str(&format!("   ✉️  {}\n", org.contact_email));
        }
        out.push('\n');
    }

    out.push_str(&results_summary(organizations.len()));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::parse_csv;
    use crate::core::transformer::transform_rows;

    fn sample() -> Organization {
        Organization {
            organization_name: "Ocean Corp, Inc.".to_string(),
            mission: "Study \"deep\" currents\nand tides".to_string(),
            website: "https://oceancorp.example".to_string(),
            city: "Halifax".to_string(),
            country: "Canada".to_string(),
            site_latitude: 44.65,
            site_longitude: -63.57,
            ..Default::default()
        }
    }

    #[test]
    fn test_csv_export_round_trips_through_tokenizer() {
        let org = sample();
        let csv = render(&[&org], OutputFormat::Csv).unwrap();

        let reparsed = transform_rows(&parse_csv(&csv));
        assert_eq!(reparsed, vec![org]);
    }

    #[test]
    fn test_json_export_uses_camel_case() {
        let org = sample();
        let json = render(&[&org], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["organizationName"], "Ocean Corp, Inc.");
        assert_eq!(value[0]["siteLongitude"], -63.57);
    }

    #[test]
    fn test_table_lists_location_and_summary() {
        let org = sample();
        let table = render(&[&org], OutputFormat::Table).unwrap();

        assert!(table.contains("Ocean Corp, Inc."));
        assert!(table.contains("Halifax, Canada"));
        assert!(table.contains("44.6500°N, 63.5700°W"));
        assert!(table.ends_with("1 organization found\n"));
    }
}
