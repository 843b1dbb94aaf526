//! Google Analytics Data API backend.
//!
//! Implements [`ReportingBackend`] over the v1beta REST surface. One client
//! serves one GA4 property; credentials come from a service-account key
//! file and are exchanged for bearer tokens in [`auth`].

pub mod auth;
pub mod wire;

use anyhow::{Context, Result};
use tracing::debug;

use pulseboard_core::report::{ReportQuery, ReportRow, ReportingBackend};

use crate::auth::{ServiceAccountKey, TokenProvider};
use crate::wire::{RunReportRequest, RunReportResponse, WireRow};

const DATA_API_BASE: &str = "https://analyticsdata.googleapis.com/v1beta";

/// Data API client for one GA4 property.
pub struct DataApiClient {
    http: reqwest::Client,
    auth: TokenProvider,
    property_id: String,
    base_url: String,
}

impl DataApiClient {
    /// Build a client from a service-account key file.
    ///
    /// `timeout` bounds every outbound request; there is no additional
    /// timeout layer above this client.
    pub fn from_key_file(
        path: &str,
        property_id: &str,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let key = ServiceAccountKey::from_file(path)?;
        Self::new(key, property_id, timeout)
    }

    pub fn new(
        key: ServiceAccountKey,
        property_id: &str,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            auth: TokenProvider::new(key, http.clone()),
            http,
            property_id: property_id.to_string(),
            base_url: DATA_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API host (tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn post_report(&self, method: &str, query: &ReportQuery) -> Result<Vec<ReportRow>> {
        let token = self.auth.access_token().await?;
        let url = format!(
            "{}/properties/{}:{}",
            self.base_url, self.property_id, method
        );
        let body = RunReportRequest::from_query(query);
        debug!(method, property_id = %self.property_id, "dispatching report query");

        let response: RunReportResponse = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("{method} request"))?
            .error_for_status()
            .with_context(|| format!("{method} rejected"))?
            .json()
            .await
            .with_context(|| format!("parse {method} response"))?;

        Ok(response.rows.into_iter().map(WireRow::into_row).collect())
    }
}

#[async_trait::async_trait]
impl ReportingBackend for DataApiClient {
    async fn run_report(&self, query: &ReportQuery) -> Result<Vec<ReportRow>> {
        self.post_report("runReport", query).await
    }

    async fn run_realtime_report(&self, query: &ReportQuery) -> Result<Vec<ReportRow>> {
        self.post_report("runRealtimeReport", query).await
    }
}
