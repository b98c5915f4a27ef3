use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SummaryError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct SummaryRequest<'a> {
    title: &'a str,
}

#[derive(Deserialize)]
struct SummaryResponse {
    summary: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SummaryClient {
    endpoint: String,
    client: Client,
}

impl SummaryClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SummaryError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn summarize(&self, title: &str) -> Result<String, SummaryError> {
        debug!(endpoint = %self.endpoint, title, "requesting summary");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SummaryRequest { title })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummaryError::Status(status.as_u16()));
        }

        parse_summary(response.json::<SummaryResponse>()?)
    }
}

fn parse_summary(response: SummaryResponse) -> Result<String, SummaryError> {
    response
        .summary
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
        .ok_or(SummaryError::MissingSummary)
}
