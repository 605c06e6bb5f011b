// src/backend/mod.rs
//! Upstream adapter seam: one capability, two backend strategies.
//!
//! `newsdata` speaks to a REST news API with literal sub-resources;
//! `serp` speaks to a search-engine upstream and normalizes its result
//! shapes. Which one runs is a configuration choice made once at startup;
//! handlers only ever see the [`NewsBackend`] trait.

mod newsdata;
mod serp;

pub use newsdata::NewsdataBackend;
pub use serp::{QaPair, SerpBackend};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::config::{BackendKind, Settings};
use crate::envelope::Envelope;
use crate::error::FetchError;
use crate::query::{HeadlineQuery, NewsQuery, TopicQuery};

/// Hard ceiling for the upstream health probe.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The adapter surface handlers talk to. Every operation performs at most
/// one outbound call and always terminates in an [`Envelope`]; errors never
/// escape to the caller.
#[async_trait]
pub trait NewsBackend: Send + Sync {
    async fn fetch_news(&self, req: &NewsQuery) -> Envelope;

    async fn fetch_headlines(&self, req: &HeadlineQuery) -> Envelope;

    /// Topic search folds the topic into the free-text query and rides the
    /// news path. The topic term is forwarded once, never duplicated.
    async fn search_by_topic(&self, req: &TopicQuery) -> Envelope {
        self.fetch_news(&req.clone().into_news_query()).await
    }

    /// Lightweight liveness probe against the upstream (5 s ceiling).
    /// Reports reachability only; upstream body content is not propagated.
    async fn health_check(&self) -> Envelope;

    fn name(&self) -> &'static str;
}

pub type DynNewsBackend = Arc<dyn NewsBackend>;

/// Construct the configured backend once at startup. Handlers receive the
/// result through axum state; there are no global instances.
pub fn build_backend(settings: &Settings) -> DynNewsBackend {
    let timeout = Duration::from_secs(settings.request_timeout_secs);
    match settings.backend {
        BackendKind::Newsdata => Arc::new(NewsdataBackend::new(
            settings.newsdata_api_url.clone(),
            settings.newsdata_api_key.clone(),
            timeout,
        )),
        BackendKind::Serp => Arc::new(SerpBackend::new(
            settings.serpapi_api_url.clone(),
            settings.serpapi_api_key.clone(),
            timeout,
        )),
    }
}

pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("news-gateway/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(timeout)
        .build()
        .expect("reqwest client")
}

/// Issue the request and classify the outcome. 2xx yields the parsed JSON
/// body; anything else maps onto the three-way [`FetchError`] split.
pub(crate) async fn send_for_json(req: reqwest::RequestBuilder) -> Result<Value, FetchError> {
    let resp = req.send().await.map_err(FetchError::from_send)?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(FetchError::UpstreamStatus {
            status: status.as_u16(),
            body,
        });
    }
    resp.json().await.map_err(FetchError::from_body)
}

pub(crate) fn failure(op: &'static str, backend: &'static str, err: FetchError) -> Envelope {
    warn!(target: "backend", backend, op, error = %err, details = %err.details(), "upstream call failed");
    Envelope::from_fetch_error(&err)
}

/// Trimmed view of an optional filter; blank counts as absent.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
