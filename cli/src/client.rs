//! HTTP participant source backed by `reqwest`.

use async_trait::async_trait;
use participant_login::{FetchError, PARTICIPANTS_PATH, ParticipantBatch, ParticipantClient, parse_participants};
use reqwest::Url;

use crate::error::CliError;

/// Parse the server base URL. A missing trailing slash is added so relative
/// paths resolve below the given path instead of replacing its last segment.
///
/// # Errors
///
/// Returns [`CliError::InvalidBaseUrl`] for unparsable or non-hierarchical URLs.
pub fn parse_base_url(raw: &str) -> Result<Url, CliError> {
    let mut url = Url::parse(raw).map_err(|e| CliError::InvalidBaseUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(CliError::InvalidBaseUrl(raw.to_owned()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

pub struct HttpParticipantClient {
    http: reqwest::Client,
    url: Url,
}

impl HttpParticipantClient {
    /// # Errors
    ///
    /// Returns [`CliError::InvalidBaseUrl`] if the listing path cannot be
    /// joined onto `base`.
    pub fn new(base: &Url) -> Result<Self, CliError> {
        let url = base
            .join(PARTICIPANTS_PATH)
            .map_err(|e| CliError::InvalidBaseUrl(format!("{base}: {e}")))?;
        Ok(Self { http: reqwest::Client::new(), url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait(?Send)]
impl ParticipantClient for HttpParticipantClient {
    async fn fetch_participants(&self) -> Result<ParticipantBatch, FetchError> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body });
        }

        parse_participants(&body)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
