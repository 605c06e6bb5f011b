//! Search-engine strategy: one generic search endpoint, no news-specific
//! sub-resources. Headlines are emulated with a synthesized query (degraded
//! mode), and upstream result shapes are normalized into `{question,
//! snippet}` pairs plus a composite human-readable text.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{failure, http_client, non_blank, send_for_json, NewsBackend, HEALTH_TIMEOUT};
use crate::envelope::Envelope;
use crate::error::FetchError;
use crate::query::{HeadlineQuery, NewsQuery};

pub struct SerpBackend {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// One normalized search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QaPair {
    pub question: String,
    pub snippet: String,
}

// ------------------------------------------------------------
// Result-shape normalization
// ------------------------------------------------------------

type Extractor = fn(&Value, usize) -> Option<Vec<QaPair>>;

/// Known upstream result shapes, tried in priority order; the first
/// extractor yielding a non-empty list wins. New shapes go here, call sites
/// stay untouched.
const EXTRACTORS: &[(&str, Extractor)] = &[
    ("related_questions", extract_related_questions),
    ("organic_results", extract_organic_results),
    ("top_level_list", extract_top_level_list),
];

pub(crate) fn extract_results(data: &Value, limit: usize) -> Vec<QaPair> {
    for &(shape, extract) in EXTRACTORS {
        if let Some(results) = extract(data, limit).filter(|r| !r.is_empty()) {
            debug!(target: "backend", shape, count = results.len(), "serp: matched result shape");
            return results;
        }
    }
    // No known shape matched: an empty result list, not an error.
    Vec::new()
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn pair_from(value: &Value) -> QaPair {
    QaPair {
        question: str_field(value, "question"),
        snippet: str_field(value, "snippet"),
    }
}

fn extract_related_questions(data: &Value, limit: usize) -> Option<Vec<QaPair>> {
    let items = data.get("related_questions")?.as_array()?;
    Some(items.iter().take(limit).map(pair_from).collect())
}

fn extract_organic_results(data: &Value, limit: usize) -> Option<Vec<QaPair>> {
    let items = data.get("organic_results")?.as_array()?;
    Some(
        items
            .iter()
            .take(limit)
            .map(|item| QaPair {
                question: str_field(item, "title"),
                snippet: str_field(item, "snippet"),
            })
            .collect(),
    )
}

fn extract_top_level_list(data: &Value, limit: usize) -> Option<Vec<QaPair>> {
    let items = data.as_array()?;
    Some(items.iter().take(limit).map(pair_from).collect())
}

// ------------------------------------------------------------
// Composite text
// ------------------------------------------------------------

pub(crate) const NO_RESULTS: &str = "No results found for your query.";
pub(crate) const NO_RELEVANT_RESULTS: &str =
    "No relevant information found in the search results.";
const SECTION_DIVIDER: &str = "\n---\n\n";

/// Concatenate the pairs into a single numbered text, prefixed with a count
/// summary. Pairs keep their input order.
pub(crate) fn combine_results(results: &[QaPair]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut sections = Vec::with_capacity(results.len());
    for (idx, pair) in results.iter().enumerate() {
        if pair.question.is_empty() && pair.snippet.is_empty() {
            continue;
        }
        let mut section = format!("**Result {}:**\n", idx + 1);
        if !pair.question.is_empty() {
            section.push_str(&format!("Question: {}\n", pair.question));
        }
        if !pair.snippet.is_empty() {
            section.push_str(&format!("Answer: {}\n", pair.snippet));
        }
        sections.push(section);
    }

    if sections.is_empty() {
        return NO_RELEVANT_RESULTS.to_string();
    }

    format!(
        "**Comprehensive Search Results ({} results found)**\n\n{}",
        results.len(),
        sections.join(SECTION_DIVIDER)
    )
}

// ------------------------------------------------------------
// Query synthesis
// ------------------------------------------------------------

/// Merge the free text and filters into one search string. Each term appears
/// at most once; blank filters contribute nothing.
fn search_text(req: &NewsQuery) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(q) = non_blank(&req.query) {
        parts.push(q);
    }
    if let Some(c) = non_blank(&req.category) {
        parts.push(c);
    }
    if let Some(c) = non_blank(&req.country) {
        parts.push(c);
    }
    parts.join(" ")
}

/// The upstream has no headlines endpoint; emulate one with a best-effort
/// search query.
fn headline_text(req: &HeadlineQuery) -> String {
    let mut text = match non_blank(&req.category) {
        Some(category) => format!("latest {category} news"),
        None => "latest news".to_string(),
    };
    let country = req.country.trim();
    if !country.is_empty() {
        text.push(' ');
        text.push_str(country);
    }
    text
}

impl SerpBackend {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Self {
        Self {
            http: http_client(timeout),
            api_url,
            api_key,
        }
    }

    async fn search(
        &self,
        text: &str,
        limit: u32,
        timeout: Option<Duration>,
    ) -> Result<Value, FetchError> {
        let mut params = Vec::with_capacity(3);
        if !text.is_empty() {
            params.push(("q", text.to_string()));
        }
        params.push(("num", limit.to_string()));
        if !self.api_key.is_empty() {
            params.push(("api_key", self.api_key.clone()));
        }
        let mut rb = self.http.get(&self.api_url).query(&params);
        if let Some(t) = timeout {
            rb = rb.timeout(t);
        }
        send_for_json(rb).await
    }

    /// Wrap a raw upstream payload: normalized pairs, composite text, and
    /// the untouched original side by side.
    fn search_envelope(&self, text: &str, data: Value, limit: u32) -> Envelope {
        let results = extract_results(&data, limit as usize);
        let combined = combine_results(&results);
        Envelope::success(json!({
            "query": text,
            "results_count": results.len(),
            "comprehensive_response": combined,
            "raw_results": results,
            "full_data": data,
        }))
    }
}

#[async_trait]
impl NewsBackend for SerpBackend {
    async fn fetch_news(&self, req: &NewsQuery) -> Envelope {
        let text = search_text(req);
        debug!(target: "backend", query = %text, limit = req.limit, "serp: searching");
        match self.search(&text, req.limit, None).await {
            Ok(data) => self.search_envelope(&text, data, req.limit),
            Err(err) => failure("fetch_news", self.name(), err),
        }
    }

    async fn fetch_headlines(&self, req: &HeadlineQuery) -> Envelope {
        let text = headline_text(req);
        debug!(target: "backend", query = %text, limit = req.limit, "serp: headlines via search");
        match self.search(&text, req.limit, None).await {
            Ok(data) => self.search_envelope(&text, data, req.limit),
            Err(err) => failure("fetch_headlines", self.name(), err),
        }
    }

    async fn health_check(&self) -> Envelope {
        match self.search("test", 1, Some(HEALTH_TIMEOUT)).await {
            Ok(_) => Envelope::success(json!({ "status": "healthy" })),
            Err(err) => failure("health_check", self.name(), err),
        }
    }

    fn name(&self) -> &'static str {
        "serp"
    }
}
