use participant_login::Navigator;
use reqwest::Url;

/// Resolves navigation targets against the server base URL. The terminal
/// cannot open the page, so the resolved location is kept for printing.
#[derive(Debug)]
pub struct UrlNavigator {
    base: Url,
    location: Option<Url>,
}

impl UrlNavigator {
    pub fn new(base: Url) -> Self {
        Self { base, location: None }
    }

    pub fn location(&self) -> Option<&Url> {
        self.location.as_ref()
    }
}

impl Navigator for UrlNavigator {
    fn navigate(&mut self, path: &str) {
        match self.base.join(path) {
            Ok(url) => {
                tracing::debug!(%url, "navigating");
                self.location = Some(url);
            }
            Err(e) => tracing::warn!(error = %e, path, "cannot resolve navigation target"),
        }
    }
}
