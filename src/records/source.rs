use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::LoadError;

const BUNDLED_DATASET: &str = include_str!("../../data/publications.json");
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
    Url(String),
}

impl DataSource {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_owned())
        } else {
            Self::File(PathBuf::from(value))
        }
    }

    pub fn summarize_endpoint(&self) -> Option<String> {
        let Self::Url(url) = self else {
            return None;
        };
        url.strip_suffix("/data")
            .map(|origin| format!("{origin}/summarize"))
    }

    pub(super) fn fetch(&self) -> Result<String, LoadError> {
        match self {
            Self::Bundled => Ok(BUNDLED_DATASET.to_owned()),
            Self::File(path) => std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            }),
            Self::Url(url) => {
                let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
                let response = client.get(url).send()?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.text()?)
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => f.write_str("bundled dataset"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}
