use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::records::PublicationRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearRange {
    #[default]
    Any,
    /// Inclusive on both ends.
    Between { start: i32, end: i32 },
    /// Strictly earlier than the year.
    Before(i32),
}

impl YearRange {
    pub fn is_any(self) -> bool {
        self == Self::Any
    }

    pub fn contains(self, year: i32) -> bool {
        match self {
            Self::Any => true,
            Self::Between { start, end } => (start..=end).contains(&year),
            Self::Before(bound) => year < bound,
        }
    }
}

impl FromStr for YearRange {
    type Err = FilterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(Self::Any);
        }

        let invalid = || FilterError::InvalidYearRange(token.to_owned());

        if let Some(bound) = token.strip_prefix("before-") {
            return bound.trim().parse().map(Self::Before).map_err(|_| invalid());
        }

        let (start, end) = token.split_once('-').ok_or_else(invalid)?;
        let start = start.trim().parse::<i32>().map_err(|_| invalid())?;
        let end = end.trim().parse::<i32>().map_err(|_| invalid())?;
        if start > end {
            return Err(invalid());
        }

        Ok(Self::Between { start, end })
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => Ok(()),
            Self::Between { start, end } => write!(f, "{start}-{end}"),
            Self::Before(bound) => write!(f, "before-{bound}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ascending => "Oldest first",
            Self::Descending => "Newest first",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub keyword: String,
    pub author: String,
    pub topic: Option<String>,
    pub year_range: YearRange,
    pub sort_order: Option<SortOrder>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.keyword.trim().is_empty()
            && self.author.trim().is_empty()
            && self.topic.is_none()
            && self.year_range.is_any()
            && self.sort_order.is_none()
    }

    fn matches(&self, record: &PublicationRecord, keyword: &str, author: &str) -> bool {
        if let Some(topic) = &self.topic
            && !record.has_section(topic)
        {
            return false;
        }

        if !keyword.is_empty() && !haystack(record).contains(keyword) {
            return false;
        }

        if !author.is_empty()
            && !record
                .author
                .as_deref()
                .is_some_and(|value| value.to_lowercase().contains(author))
        {
            return false;
        }

        if !self.year_range.is_any()
            && !record
                .numeric_year()
                .is_some_and(|year| self.year_range.contains(year))
        {
            return false;
        }

        true
    }
}

fn haystack(record: &PublicationRecord) -> String {
    let mut parts = vec![record.title.as_str()];
    parts.extend(record.summary.as_deref());
    parts.extend(record.keywords.as_deref());
    parts.extend(record.section_values());
    parts.join(" ").to_lowercase()
}

pub fn filter_indices(records: &[PublicationRecord], criteria: &FilterCriteria) -> Vec<usize> {
    let keyword = criteria.keyword.trim().to_lowercase();
    let author = criteria.author.trim().to_lowercase();

    let mut indices = records
        .iter()
        .enumerate()
        .filter(|(_, record)| criteria.matches(record, &keyword, &author))
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    if let Some(order) = criteria.sort_order {
        indices.sort_by(|&a, &b| compare_years(&records[a], &records[b], order));
    }

    indices
}

pub fn filter<'a>(
    records: &'a [PublicationRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a PublicationRecord> {
    filter_indices(records, criteria)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}

/// Orders by numeric year; records without one go last in either direction.
fn compare_years(a: &PublicationRecord, b: &PublicationRecord, order: SortOrder) -> Ordering {
    match (a.numeric_year(), b.numeric_year()) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(&b),
            SortOrder::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
