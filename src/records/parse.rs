use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::record::PublicationRecord;

const MAX_SLUG_CHARS: usize = 60;

pub fn parse_records(raw: &str) -> Result<Vec<PublicationRecord>, serde_json::Error> {
    let parsed: Value = serde_json::from_str(raw)?;
    let Value::Array(items) = parsed else {
        warn!("record payload is not a JSON array; treating it as empty");
        return Ok(Vec::new());
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            debug!(index, "skipping non-object record entry");
            continue;
        };
        records.push(normalize_record(object));
    }

    assign_ids(&mut records);
    Ok(records)
}

fn normalize_record(object: &Map<String, Value>) -> PublicationRecord {
    let fields = object
        .iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), value))
        .collect::<HashMap<_, _>>();
    let field = |names: &[&str]| names.iter().find_map(|name| fields.get(*name).copied());
    let text = |names: &[&str]| field(names).and_then(value_text);

    let year = text(&["year"]).or_else(|| {
        text(&["date", "published"])
            .as_deref()
            .and_then(leading_year)
            .map(str::to_owned)
    });

    PublicationRecord {
        id: text(&["id"]).unwrap_or_default(),
        title: text(&["title"]).unwrap_or_default(),
        author: text(&["author", "authors"]),
        year,
        keywords: text(&["keywords"]),
        summary: text(&["summary"]),
        sections: field(&["sections"]).and_then(sections),
        url: text(&["url", "link"]),
    }
}

fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_owned(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(value_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => return None,
    };

    if text.is_empty() { None } else { Some(text) }
}

fn sections(value: &Value) -> Option<BTreeMap<String, String>> {
    let object = value.as_object()?;
    let sections = object
        .iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect::<BTreeMap<_, _>>();

    if sections.is_empty() {
        None
    } else {
        Some(sections)
    }
}

fn leading_year(value: &str) -> Option<&str> {
    let bytes = value.as_bytes();
    (0..bytes.len().saturating_sub(3))
        .find(|&start| bytes[start..start + 4].iter().all(u8::is_ascii_digit))
        .map(|start| &value[start..start + 4])
}

fn assign_ids(records: &mut [PublicationRecord]) {
    let mut taken = HashSet::with_capacity(records.len());

    for (index, record) in records.iter_mut().enumerate() {
        let base = if record.id.is_empty() {
            let slug = slugify(&record.title);
            if slug.is_empty() {
                format!("record-{index}")
            } else {
                slug
            }
        } else {
            record.id.clone()
        };

        let mut candidate = base.clone();
        let mut suffix = 2usize;
        while taken.contains(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }

        taken.insert(candidate.clone());
        record.id = candidate;
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    let truncated = slug.chars().take(MAX_SLUG_CHARS).collect::<String>();
    truncated.trim_end_matches('-').to_owned()
}
