use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// CSV column order, also used as the schema property order.
pub const CSV_COLUMNS: [&str; 6] = ["name", "email", "phone", "summary", "skills", "experiences"];

/// Structured first page of a résumé, as returned by the structuring service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Short self-presentation phrase.
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experiences: Vec<String>,
}

/// Column name to cell value. Absent keys are written as empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRecord {
    pub fields: HashMap<String, String>,
}

impl FlatRecord {
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}
