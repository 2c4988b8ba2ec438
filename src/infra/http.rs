//! Shared JSON GET plumbing for the catalog and pricing clients.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::util::version::user_agent;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("remote returned {status}: {url}")]
    Remote { status: u16, url: String },
}

/// One remote base URL plus the query pairs appended to every request.
#[derive(Clone, Debug)]
pub struct JsonEndpoint {
    http: Client,
    base_url: Url,
    fixed_query: Vec<(&'static str, &'static str)>,
}

impl JsonEndpoint {
    pub fn new(base: &str) -> Result<Self, LookupError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(user_agent()).build()?;
        Ok(Self {
            http,
            base_url,
            fixed_query: Vec::new(),
        })
    }

    pub fn with_fixed_query(mut self, pairs: &[(&'static str, &'static str)]) -> Self {
        self.fixed_query.extend_from_slice(pairs);
        self
    }

    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, LookupError> {
        let mut url = if path.is_empty() {
            self.base_url.clone()
        } else {
            self.base_url.join(path)?
        };
        let fixed = self
            .fixed_query
            .iter()
            .filter(|(key, _)| !query.iter().any(|(k, _)| k == key))
            .map(|(key, value)| (*key, value.to_string()));
        let pairs: Vec<(&str, String)> = query.iter().cloned().chain(fixed).collect();
        // Touching `query_pairs_mut` with nothing to add leaves a bare `?`.
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    pub async fn fetch_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, LookupError> {
        let url = self.url(path, query)?;
        log::debug!("[http] GET {url}");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Remote {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn fetch<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, LookupError>
    where
        T: DeserializeOwned,
    {
        let value = self.fetch_json(path, query).await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_fixed_query_after_request_params() {
        let endpoint = JsonEndpoint::new("https://esi.example/latest/")
            .unwrap()
            .with_fixed_query(&[("datasource", "tranquility"), ("language", "en")]);
        let url = endpoint.url("universe/types/645/", &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://esi.example/latest/universe/types/645/?datasource=tranquility&language=en"
        );
    }

    #[test]
    fn request_params_override_fixed_ones() {
        let endpoint = JsonEndpoint::new("https://esi.example/latest/")
            .unwrap()
            .with_fixed_query(&[("language", "en")]);
        let url = endpoint
            .url("search/", &[("language", "en-us".to_string())])
            .unwrap();
        assert_eq!(url.query(), Some("language=en-us"));
    }

    #[test]
    fn empty_path_targets_the_base() {
        let endpoint = JsonEndpoint::new("https://api.example/v1/industry/cost").unwrap();
        let url = endpoint.url("", &[("runs", "2".to_string())]).unwrap();
        assert_eq!(url.as_str(), "https://api.example/v1/industry/cost?runs=2");
    }

    #[test]
    fn remote_failure_names_status_and_url() {
        let err = LookupError::Remote {
            status: 404,
            url: "https://esi.example/x".into(),
        };
        assert_eq!(err.to_string(), "remote returned 404: https://esi.example/x");
    }
}
