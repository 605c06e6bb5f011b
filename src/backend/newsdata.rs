//! REST news API strategy: literal `/news`, `/headlines` and `/health`
//! sub-resources, bearer auth, pass-through payloads.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{failure, http_client, non_blank, send_for_json, NewsBackend, HEALTH_TIMEOUT};
use crate::envelope::Envelope;
use crate::error::FetchError;
use crate::query::{HeadlineQuery, NewsQuery};

pub struct NewsdataBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NewsdataBackend {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Self {
        Self {
            http: http_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let mut rb = self.http.get(format!("{}{}", self.base_url, path));
        if !self.api_key.is_empty() {
            rb = rb.bearer_auth(&self.api_key);
        }
        rb
    }
}

/// Outbound parameters for `/news`. Blank or absent filters are omitted
/// entirely; the upstream rejects or misinterprets empty-string filters.
fn news_params(req: &NewsQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(5);
    if let Some(q) = non_blank(&req.query) {
        params.push(("q", q.to_string()));
    }
    if let Some(c) = non_blank(&req.category) {
        params.push(("category", c.to_string()));
    }
    if let Some(c) = non_blank(&req.country) {
        params.push(("country", c.to_string()));
    }
    let language = req.language.trim();
    if !language.is_empty() {
        params.push(("language", language.to_string()));
    }
    params.push(("limit", req.limit.to_string()));
    params
}

fn headline_params(req: &HeadlineQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(3);
    if let Some(c) = non_blank(&req.category) {
        params.push(("category", c.to_string()));
    }
    let country = req.country.trim();
    if !country.is_empty() {
        params.push(("country", country.to_string()));
    }
    params.push(("limit", req.limit.to_string()));
    params
}

#[async_trait]
impl NewsBackend for NewsdataBackend {
    async fn fetch_news(&self, req: &NewsQuery) -> Envelope {
        let params = news_params(req);
        debug!(target: "backend", params = ?params, "newsdata: fetching news");
        match send_for_json(self.get("/news").query(&params)).await {
            Ok(data) => Envelope::success(data),
            Err(err) => failure("fetch_news", self.name(), err),
        }
    }

    async fn fetch_headlines(&self, req: &HeadlineQuery) -> Envelope {
        let params = headline_params(req);
        debug!(target: "backend", params = ?params, "newsdata: fetching headlines");
        match send_for_json(self.get("/headlines").query(&params)).await {
            Ok(data) => Envelope::success(data),
            Err(err) => failure("fetch_headlines", self.name(), err),
        }
    }

    async fn health_check(&self) -> Envelope {
        // Any response at all counts as liveness; status and body are not
        // inspected.
        match self.get("/health").timeout(HEALTH_TIMEOUT).send().await {
            Ok(_) => Envelope::success(json!({ "status": "healthy" })),
            Err(err) => failure("health_check", self.name(), FetchError::from_send(err)),
        }
    }

    fn name(&self) -> &'static str {
        "newsdata"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;

    fn params_keys(params: &[(&'static str, String)]) -> Vec<&'static str> {
        params.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn absent_filters_never_reach_the_wire() {
        let req = query::news_query(None, None, None, None, None);
        let params = news_params(&req);
        assert_eq!(params_keys(&params), vec!["language", "limit"]);
    }

    #[test]
    fn blank_filters_are_omitted_even_unscrubbed() {
        // Hand-built request bypassing the normalizer; the adapter holds the
        // omission invariant on its own.
        let req = NewsQuery {
            query: Some("  ".to_string()),
            category: Some(String::new()),
            country: Some("us".to_string()),
            language: "en".to_string(),
            limit: 10,
        };
        let params = news_params(&req);
        assert_eq!(params_keys(&params), vec!["country", "language", "limit"]);
    }

    #[test]
    fn present_filters_all_appear() {
        let req = query::news_query(
            Some("fed rates".to_string()),
            Some("business".to_string()),
            Some("us".to_string()),
            Some("en".to_string()),
            Some(25),
        );
        let params = news_params(&req);
        assert_eq!(
            params,
            vec![
                ("q", "fed rates".to_string()),
                ("category", "business".to_string()),
                ("country", "us".to_string()),
                ("language", "en".to_string()),
                ("limit", "25".to_string()),
            ]
        );
    }

    #[test]
    fn headline_params_default_country_and_limit() {
        let req = query::headline_query(None, None, None);
        let params = headline_params(&req);
        assert_eq!(
            params,
            vec![("country", "us".to_string()), ("limit", "10".to_string())]
        );
    }

    #[test]
    fn topic_search_builds_the_same_params_as_plain_news() {
        let topic = query::topic_query("climate", Some("us".to_string()), None, None).unwrap();
        let plain = query::news_query(
            Some("climate".to_string()),
            None,
            Some("us".to_string()),
            None,
            None,
        );
        assert_eq!(news_params(&topic.into_news_query()), news_params(&plain));
    }
}
