//! HTTP client for the rehearsal-room search backend.
//!
//! Wraps `reqwest` with the backend's two endpoints, `all-studios` and
//! `search`. Every call is a single best-effort request: no retry, no cache,
//! and no request timeout beyond what the transport imposes.

use reqwest::{Client, Url};

use jamtogether_core::{Filter, SearchOutcome, Studio};

use crate::error::ClientError;
use crate::normalize::normalize_room;
use crate::types::{AllStudiosResponse, RoomAvailabilityRaw, SearchResponse};

/// The backend sits behind a localtunnel endpoint, which serves an HTML
/// interstitial unless this header is present.
const TUNNEL_BYPASS_HEADER: &str = "Bypass-Tunnel-Reminder";

/// Client for the search backend.
///
/// Use [`JamClient::new`] with the configured backend URL; in tests point it
/// at a wiremock server.
pub struct JamClient {
    client: Client,
    base_url: Url,
}

impl JamClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder().user_agent(user_agent).build()?;

        // Normalise: a trailing slash makes `Url::join` append to the path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Fetches the studio listing used for browse-mode markers.
    ///
    /// Entries that do not match the [`Studio`] shape are logged and skipped.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the envelope is not valid JSON of the
    ///   expected shape.
    pub async fn all_studios(&self) -> Result<Vec<Studio>, ClientError> {
        let url = self.endpoint("all-studios")?;
        let body = self.request_json(&url).await?;

        let envelope: AllStudiosResponse =
            serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
                context: "all-studios".to_string(),
                source: e,
            })?;

        let total = envelope.studios.len();
        let studios: Vec<Studio> = envelope
            .studios
            .into_iter()
            .filter_map(|v| match serde_json::from_value::<Studio>(v) {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed studio entry");
                    None
                }
            })
            .collect();

        tracing::debug!(total, kept = studios.len(), "loaded studio listing");
        Ok(studios)
    }

    /// Runs one search and returns the raw result entries.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] if no studio is selected; nothing is sent.
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body is not `{ "results": [...] }`.
    pub async fn search_raw(&self, filter: &Filter) -> Result<Vec<RoomAvailabilityRaw>, ClientError> {
        filter.validate()?;

        let url = self.search_url(filter)?;
        tracing::debug!(
            date = %filter.date,
            start = filter.start_hour,
            end = filter.end_hour,
            min_hours = filter.min_hours,
            studios = filter.selection.len(),
            "issuing availability search"
        );
        let body = self.request_json(&url).await?;

        let envelope: SearchResponse =
            serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
                context: format!("search(date={})", filter.date),
                source: e,
            })?;
        Ok(envelope.results)
    }

    /// Runs one search and classifies the response into a [`SearchOutcome`].
    ///
    /// # Errors
    ///
    /// Same as [`JamClient::search_raw`].
    pub async fn search(&self, filter: &Filter) -> Result<SearchOutcome, ClientError> {
        let raw = self.search_raw(filter).await?;
        let outcome = SearchOutcome::classify(raw.into_iter().map(normalize_room).collect());

        tracing::info!(
            valid = outcome.rooms().len(),
            unresolved = outcome.unresolved().len(),
            "search completed"
        );
        Ok(outcome)
    }

    /// Builds the `search` URL: scalar filter fields, then one `studios`
    /// pair per selected studio.
    fn search_url(&self, filter: &Filter) -> Result<Url, ClientError> {
        let mut url = self.endpoint("search")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("date", &filter.date.format("%Y-%m-%d").to_string());
            pairs.append_pair("start_time", &filter.start_hour.to_string());
            pairs.append_pair("end_time", &filter.end_hour.to_string());
            pairs.append_pair("min_hours", &filter.min_hours.to_string());
            for studio in filter.selection.iter() {
                pairs.append_pair("studios", studio);
            }
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure or a non-2xx status.
    /// Returns [`ClientError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .get(url.clone())
            .header(TUNNEL_BYPASS_HEADER, "true")
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
