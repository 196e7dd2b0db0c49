//! 不依賴任何 CSV 函式庫的 RFC 4180 風格切分器。
//!
//! 引號內的 `""` 一律還原成單一 `"`，表頭與資料列使用同一套規則。
//! 任何字串輸入都不會失敗，只會略過空白行。

use crate::domain::model::CsvRow;

const QUOTE: char = '"';
const DELIMITER: char = ',';
const BOM: char = '\u{feff}';

/// 依行結尾切分成原始列文字；引號內的換行屬於欄位內容。
/// 全空白的列會被丟棄。
pub fn split_rows(text: &str) -> Vec<String> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                // escaped quote, stays inside the quoted field
                current.push(QUOTE);
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => {
                in_quotes = !in_quotes;
                current.push(QUOTE);
            }
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                push_row(&mut rows, &mut current);
            }
            _ => current.push(ch),
        }
    }
    push_row(&mut rows, &mut current);

    rows
}

fn push_row(rows: &mut Vec<String>, current: &mut String) {
    let row = std::mem::take(current);
    if !row.trim().is_empty() {
        rows.push(row);
    }
}

/// 切分單列欄位：引號外的逗號結束欄位，引號本身不會出現在結果中。
pub fn split_fields(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = row.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// 將整份 CSV 轉成列對應；第一個非空白列為表頭。
///
/// 欄位不足的列以空字串補齊，多出的欄位忽略，列不會因欄位數不符被拒絕。
/// 少於兩個非空白列時回傳空集合。
pub fn parse_csv(text: &str) -> Vec<CsvRow> {
    let rows = split_rows(text);
    if rows.len() < 2 {
        return Vec::new();
    }

    let headers = split_fields(&rows[0]);

    rows[1..]
        .iter()
        .map(|row| {
            let mut values = split_fields(row).into_iter();
            let cells = headers
                .iter()
                .map(|header| (header.clone(), values.next().unwrap_or_default()))
                .collect();
            CsvRow::new(cells)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_comma_stays_in_one_field() {
        let fields = split_fields(r#""Ocean Corp, Inc.",Marine research,12.5"#);
        assert_eq!(fields, vec!["Ocean Corp, Inc.", "Marine research", "12.5"]);
    }

    #[test]
    fn test_escaped_quotes_collapse() {
        let fields = split_fields(r#""The ""Blue"" Project",x"#);
        assert_eq!(fields, vec![r#"The "Blue" Project"#, "x"]);
    }

    #[test]
    fn test_escaped_quote_does_not_toggle_row_state() {
        let rows = split_rows("a,b\n\"say \"\"hi\"\"\nthere\",2\nc,d");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], "\"say \"\"hi\"\"\nthere\",2");
    }

    #[test]
    fn test_embedded_newline_is_one_row() {
        let csv = "Organization Name,Mission\n\"Reef Watch\",\"Line one\nLine two\"\n";
        let rows = parse_csv(csv);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Mission"), Some("Line one\nLine two"));
    }

    #[test]
    fn test_crlf_and_lone_cr_terminators() {
        let rows = split_rows("h1,h2\r\na,b\rc,d\n");
        assert_eq!(rows, vec!["h1,h2", "a,b", "c,d"]);
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let rows = split_rows("h1,h2\n\n   \n\t\na,b\n\n");
        assert_eq!(rows, vec!["h1,h2", "a,b"]);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let fields = split_fields(r#"  Kelp Trust ,  "  Restore forests  " ,"#);
        assert_eq!(fields, vec!["Kelp Trust", "Restore forests", ""]);
    }

    #[test]
    fn test_header_quotes_use_same_policy() {
        let rows = parse_csv("\"Organization Name\",\"Site \"\"Lat\"\"\"\nAcme,1\n");
        let headers: Vec<&str> = rows[0].headers().collect();
        assert_eq!(headers, vec!["Organization Name", r#"Site "Lat""#]);
    }

    #[test]
    fn test_ragged_row_defaults_to_empty() {
        let rows = parse_csv("a,b,c\n1\n1,2,3,4\n");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("a"), Some("1"));
        assert_eq!(rows[0].get("b"), Some(""));
        assert_eq!(rows[0].get("c"), Some(""));
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[1].get("c"), Some("3"));
    }

    #[test]
    fn test_fewer_than_two_lines_is_empty() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("Organization Name,Mission\n").is_empty());
        assert!(parse_csv("\n\n  \nOrganization Name\n\n").is_empty());
    }

    #[test]
    fn test_bom_is_stripped_from_first_header() {
        let rows = parse_csv("\u{feff}name,city\nAcme,Oslo\n");
        assert_eq!(rows[0].get("name"), Some("Acme"));
    }

    #[test]
    fn test_unterminated_quote_never_panics() {
        let rows = parse_csv("name,city\n\"Acme,Oslo\nNext,Row\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some("Acme,Oslo\nNext,Row"));
        assert_eq!(rows[0].get("city"), Some(""));
    }
}
