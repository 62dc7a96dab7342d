use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use quiz_core::model::{BankConfig, Question};

use super::{QuestionSource, decode_bank};
use crate::error::SourceError;

/// Fetches banks over HTTP, resolving each bank's location against a base URL.
#[derive(Clone, Debug)]
pub struct HttpQuestionSource {
    client: Client,
    base_url: Url,
}

impl HttpQuestionSource {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        // Without the trailing slash `join` would replace the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// # Errors
    ///
    /// Returns `SourceError::InvalidLocation` when the location cannot be joined.
    pub fn resolve(&self, location: &str) -> Result<Url, SourceError> {
        self.base_url
            .join(location)
            .map_err(|_| SourceError::InvalidLocation {
                location: location.to_owned(),
            })
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch(&self, bank: &BankConfig) -> Result<Vec<Question>, SourceError> {
        let url = self.resolve(&bank.source)?;
        debug!(bank = %bank.id, %url, "fetching question bank");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        decode_bank(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_to_base_directory() {
        let source = HttpQuestionSource::new(Url::parse("http://localhost:8080/banks").unwrap());
        assert_eq!(source.base_url().as_str(), "http://localhost:8080/banks/");
        assert_eq!(
            source.resolve("wbt.json").unwrap().as_str(),
            "http://localhost:8080/banks/wbt.json"
        );
        assert_eq!(
            source.resolve("/root.json").unwrap().as_str(),
            "http://localhost:8080/root.json"
        );
    }
}
