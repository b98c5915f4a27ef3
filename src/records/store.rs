use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use super::parse::parse_records;
use super::record::PublicationRecord;
use super::source::DataSource;
use crate::error::LoadError;

#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    records: Arc<[PublicationRecord]>,
}

impl RecordStore {
    pub fn load(source: &DataSource) -> Result<Self, LoadError> {
        info!(%source, "loading publication records");
        let raw = source.fetch()?;
        let store = Self::from_json_str(&raw)?;
        info!(%source, count = store.len(), "loaded publication records");
        Ok(store)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, LoadError> {
        Ok(Self::from_records(parse_records(raw)?))
    }

    pub fn from_records(records: Vec<PublicationRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[PublicationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PublicationRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    pub fn topics(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|record| record.sections.as_ref())
            .flat_map(|sections| sections.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
