use std::path::PathBuf;

use participant_login::{FetchError, LoginError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    /// Shown as the raw server response, like the login page does.
    #[error("{}", .0.display_body())]
    Fetch(#[from] FetchError),
    #[error("login failed: {0}")]
    Login(#[from] LoginError),
    #[error("unknown participant id `{0}`")]
    UnknownParticipant(String),
    #[error("selection store {}: {source}", .path.display())]
    Store { path: PathBuf, source: std::io::Error },
    #[error("selection store {} is not a JSON object of strings: {source}", .path.display())]
    StoreFormat { path: PathBuf, source: serde_json::Error },
    #[error("no participant stored in {}", .0.display())]
    NoIdentity(PathBuf),
}
