use std::num::NonZeroUsize;

use crate::records::DataSource;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    pub source: DataSource,
    pub summarize_url: Option<String>,
    pub page_size: NonZeroUsize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Bundled,
            summarize_url: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DashboardConfig {
    pub fn resolve(
        data: Option<&str>,
        summarize_url: Option<String>,
        page_size: NonZeroUsize,
    ) -> Self {
        let source = data.map_or(DataSource::Bundled, DataSource::parse);
        let summarize_url = summarize_url.or_else(|| source.summarize_endpoint());
        Self {
            source,
            summarize_url,
            page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn defaults_to_bundled_records() {
        let config = DashboardConfig::resolve(None, None, DEFAULT_PAGE_SIZE);
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn data_url_implies_summary_endpoint() {
        let config =
            DashboardConfig::resolve(Some("http://localhost:5000/data"), None, DEFAULT_PAGE_SIZE);
        assert_eq!(config.summarize_url.as_deref(), Some("http://localhost:5000/summarize"));
    }

    #[test]
    fn explicit_summary_endpoint_wins() {
        let config = DashboardConfig::resolve(
            Some("records.json"),
            Some("http://summaries.local/summarize".to_owned()),
            DEFAULT_PAGE_SIZE,
        );
        assert_eq!(config.source, DataSource::File(PathBuf::from("records.json")));
        assert_eq!(config.summarize_url.as_deref(), Some("http://summaries.local/summarize"));
    }
}
