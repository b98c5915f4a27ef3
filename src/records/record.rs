use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const UNKNOWN_YEAR: &str = "Unknown";

const UNTITLED: &str = "Untitled";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PublicationRecord {
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() { UNTITLED } else { title }
    }

    pub fn known_year(&self) -> Option<&str> {
        self.year
            .as_deref()
            .map(str::trim)
            .filter(|year| !year.is_empty() && *year != UNKNOWN_YEAR)
    }

    pub fn numeric_year(&self) -> Option<i32> {
        let year = self.known_year()?;
        let digits_end = year
            .char_indices()
            .find(|(_, ch)| !ch.is_ascii_digit())
            .map(|(index, _)| index)
            .unwrap_or(year.len());
        year[..digits_end].parse().ok()
    }

    pub fn has_section(&self, key: &str) -> bool {
        self.sections
            .as_ref()
            .is_some_and(|sections| sections.contains_key(key))
    }

    pub fn section_values(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|sections| sections.values().map(String::as_str))
    }
}
