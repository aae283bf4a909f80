use crate::core::{CvRecord, FlatRecord, CSV_COLUMNS};
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;

/// Delimiter used to flatten list fields into one cell.
pub const LIST_DELIMITER: &str = ";";

/// Flattens a record into column cells.
///
/// List fields are joined with [`LIST_DELIMITER`] as is: an element that
/// already contains the delimiter cannot be told apart after re-splitting.
/// An absent summary leaves its column out of the mapping.
pub fn flatten(record: &CvRecord) -> FlatRecord {
    let mut fields = HashMap::new();
    fields.insert("name".to_string(), record.name.clone());
    fields.insert("email".to_string(), record.email.clone());
    fields.insert("phone".to_string(), record.phone.clone());
    if let Some(summary) = &record.summary {
        fields.insert("summary".to_string(), summary.clone());
    }
    fields.insert("skills".to_string(), join_list("skills", &record.skills));
    fields.insert(
        "experiences".to_string(),
        join_list("experiences", &record.experiences),
    );

    FlatRecord { fields }
}

fn join_list(field: &str, items: &[String]) -> String {
    if items.iter().any(|item| item.contains(LIST_DELIMITER)) {
        tracing::warn!(
            "'{}' has an element containing '{}', the column will not split back cleanly",
            field,
            LIST_DELIMITER
        );
    }
    items.join(LIST_DELIMITER)
}

/// Renders the header row and a single data row.
pub fn render_csv(record: &FlatRecord) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(CSV_COLUMNS)?;
    writer.write_record(CSV_COLUMNS.iter().map(|column| record.get(column)))?;

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jean_dupont() -> CvRecord {
        CvRecord {
            name: "Jean Dupont".to_string(),
            email: "jean@example.com".to_string(),
            phone: "0601020304".to_string(),
            summary: Some("Développeur passionné".to_string()),
            skills: vec!["Python".to_string(), "Go".to_string()],
            experiences: vec!["Stage chez ACME (2023)".to_string()],
        }
    }

    fn read_rows(data: &[u8]) -> Vec<csv::StringRecord> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(data)
            .records()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_render_scenario_row() {
        let data = render_csv(&flatten(&jean_dupont())).unwrap();
        let text = String::from_utf8(data).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "name,email,phone,summary,skills,experiences");
        assert_eq!(
            lines[1],
            "Jean Dupont,jean@example.com,0601020304,Développeur passionné,Python;Go,Stage chez ACME (2023)"
        );
        assert!(text.ends_with("\r\n"));
    }

    #[test]
    fn test_absent_summary_is_empty_cell() {
        let mut record = jean_dupont();
        record.summary = None;

        let flat = flatten(&record);
        assert!(!flat.fields.contains_key("summary"));

        let rows = read_rows(&render_csv(&flat).unwrap());
        assert_eq!(&rows[1][3], "");
        let text = String::from_utf8(render_csv(&flat).unwrap()).unwrap();
        assert!(!text.contains("None"));
        assert!(!text.contains("null"));
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let mut flat = FlatRecord::default();
        flat.fields.insert("email".to_string(), "a@b.c".to_string());

        let rows = read_rows(&render_csv(&flat).unwrap());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].iter().collect::<Vec<_>>(), vec!["", "a@b.c", "", "", "", ""]);
    }

    #[test]
    fn test_header_is_stable_for_any_content() {
        let record = CvRecord {
            name: "name,email".to_string(),
            email: String::new(),
            phone: "\"quoted\"".to_string(),
            summary: Some("line one\nline two".to_string()),
            skills: vec![],
            experiences: vec!["Lead dev\n- shipped v2".to_string()],
        };

        let data = render_csv(&flatten(&record)).unwrap();
        let text = String::from_utf8(data.clone()).unwrap();
        assert!(text.starts_with("name,email,phone,summary,skills,experiences\r\n"));

        let rows = read_rows(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "name,email");
        assert_eq!(&rows[1][2], "\"quoted\"");
        assert_eq!(&rows[1][3], "line one\nline two");
        assert_eq!(&rows[1][5], "Lead dev\n- shipped v2");
    }

    #[test]
    fn test_lists_split_back_on_delimiter() {
        let record = CvRecord {
            skills: vec!["Rust".into(), "SQL".into(), "Docker".into()],
            experiences: vec!["Backend @ X (2021-2024)".into(), "Intern @ Y".into()],
            ..jean_dupont()
        };

        let rows = read_rows(&render_csv(&flatten(&record)).unwrap());
        let skills: Vec<String> = rows[1][4].split(LIST_DELIMITER).map(String::from).collect();
        let experiences: Vec<String> =
            rows[1][5].split(LIST_DELIMITER).map(String::from).collect();

        assert_eq!(skills, record.skills);
        assert_eq!(experiences, record.experiences);
    }

    #[test]
    fn test_delimiter_inside_element_is_not_escaped() {
        let record = CvRecord {
            skills: vec!["C;C++".into(), "Go".into()],
            ..jean_dupont()
        };

        let flat = flatten(&record);
        assert_eq!(flat.get("skills"), "C;C++;Go");
    }
}
