/// Web search
///
/// `DuckDuckGo` scrapes the HTML endpoint; `WebSearchAdapter` turns raw
/// results into a single answer with sources.

use crate::core::Response;
use crate::error::{JarvisError, Result};
use crate::web::format::{self, QueryShape};
use crate::web::sanitize::{contains_non_english, english_sentences, sanitize_text};
use async_trait::async_trait;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Results requested per query
pub const DEFAULT_MAX_RESULTS: usize = 3;

const ASK_MORE_SPECIFICALLY: &str =
    "I found some results, but nothing I could summarize clearly. Could you ask more specifically?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Anything that can answer a text query with ranked results
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;
}

/// DuckDuckGo HTML endpoint (no API key)
pub struct DuckDuckGo {
    client: reqwest::Client,
    base_url: String,
    region: String,
}

impl DuckDuckGo {
    pub fn new(base_url: impl Into<String>, region: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            region: region.into(),
        })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGo {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        debug!(query, region = %self.region, "duckduckgo request");

        let html = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("kl", self.region.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_results(&html, max_results)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| JarvisError::Search(format!("invalid selector {}: {:?}", css, e)))
}

/// Pull `{title, url, snippet}` out of a DuckDuckGo results page.
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let result_selector = selector(".result")?;
    let title_selector = selector(".result__a")?;
    let snippet_selector = selector(".result__snippet")?;

    let mut results = Vec::new();
    for element in document.select(&result_selector) {
        if results.len() >= max_results {
            break;
        }

        let Some(link) = element.select(&title_selector).next() else {
            continue;
        };
        let title = link.text().collect::<String>().trim().to_string();
        let url = link.value().attr("href").map(resolve_href).unwrap_or_default();
        let snippet = element
            .select(&snippet_selector)
            .next()
            .map(|e| e.text().collect::<String>())
            .unwrap_or_default()
            .trim()
            .to_string();

        if !title.is_empty() && !url.is_empty() {
            results.push(SearchResult { title, url, snippet });
        }
    }

    Ok(results)
}

/// Result links are redirects (`//duckduckgo.com/l/?uddg=<target>`); unwrap them.
fn resolve_href(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{}", href)
    } else {
        href.to_string()
    };

    match Url::parse(&absolute) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, target)| target.into_owned())
            .unwrap_or(absolute),
        Err(_) => absolute,
    }
}

/// Response plus the results it was built from
#[derive(Debug, Clone)]
pub struct SearchAnswer {
    pub response: Response,
    /// English results behind the answer; empty unless it succeeded with sources
    pub results: Vec<SearchResult>,
}

impl SearchAnswer {
    fn without_results(response: Response) -> Self {
        Self {
            response,
            results: Vec::new(),
        }
    }
}

pub struct WebSearchAdapter {
    provider: Arc<dyn SearchProvider>,
    language_hint: Option<String>,
    max_results: usize,
}

impl WebSearchAdapter {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            language_hint: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Appended to the first attempt of every query
    pub fn with_language_hint(mut self, hint: Option<String>) -> Self {
        self.language_hint = hint.filter(|h| !h.trim().is_empty());
        self
    }

    /// Search and summarize.
    ///
    /// Zero results triggers exactly one retry with the bare query. Provider
    /// failures become an `error` response with a stable message.
    pub async fn search(&self, query: &str) -> SearchAnswer {
        let query = query.trim();
        if query.is_empty() {
            return SearchAnswer::without_results(Response::error("What should I search for?"));
        }

        let first = match &self.language_hint {
            Some(hint) => format!("{} {}", query, hint),
            None => query.to_string(),
        };

        let mut results = match self.provider.search(&first, self.max_results).await {
            Ok(results) => results,
            Err(e) => return Self::failed(&e),
        };

        if results.is_empty() {
            info!(query, "no results, retrying with plain query");
            results = match self.provider.search(query, self.max_results).await {
                Ok(results) => results,
                Err(e) => return Self::failed(&e),
            };
        }

        if results.is_empty() {
            return SearchAnswer::without_results(Response::error(format!(
                "I couldn't find any results for '{}'.",
                query
            )));
        }

        self.summarize(query, results)
    }

    fn summarize(&self, query: &str, results: Vec<SearchResult>) -> SearchAnswer {
        let shape = QueryShape::classify(query);
        let total = results.len();

        let (english, foreign): (Vec<_>, Vec<_>) = results
            .into_iter()
            .partition(|r| !contains_non_english(&format!("{} {}", r.title, r.snippet)));
        debug!(total, english = english.len(), ?shape, "filtered results");

        if english.is_empty() {
            let sentences: Vec<String> = foreign
                .iter()
                .flat_map(|r| english_sentences(&r.snippet))
                .collect();

            if sentences.is_empty() {
                return SearchAnswer::without_results(Response::success(ASK_MORE_SPECIFICALLY));
            }
            return SearchAnswer::without_results(Response::success(format::compose(
                shape, &sentences,
            )));
        }

        let snippets: Vec<String> = english.iter().map(|r| sanitize_text(&r.snippet)).collect();
        let message = format::compose(shape, &snippets);
        if message.is_empty() {
            return SearchAnswer::without_results(Response::success(ASK_MORE_SPECIFICALLY));
        }

        let sources = format::sources(&english);
        SearchAnswer {
            response: Response::success(message).with_sources(sources),
            results: english,
        }
    }

    fn failed(error: &JarvisError) -> SearchAnswer {
        warn!(error = %error, "web search failed");
        SearchAnswer::without_results(Response::error(error.user_message()))
    }
}
