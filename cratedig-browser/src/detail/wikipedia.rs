//! Wikipedia API client
//!
//! Implements [`SummarySource`] over the MediaWiki action API:
//! - search: `action=query&list=search&srlimit=1`
//! - render: `action=parse&prop=text&formatversion=2`

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::SummarySource;

const USER_AGENT: &str = concat!(
    "cratedig/",
    env!("CARGO_PKG_VERSION"),
    " (record catalog browser)"
);
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Wikipedia client errors
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// `action=query&list=search` response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

/// `action=parse` response (formatversion=2: `text` is a plain string)
#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    parse: Option<ParsedPage>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    text: String,
}

/// In-band API error (`{"error": {"code": ..., "info": ...}}`)
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

/// Wikipedia API client
pub struct WikipediaClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl WikipediaClient {
    /// `api_url` is the full `api.php` endpoint, e.g. `https://en.wikipedia.org/w/api.php`
    pub fn new(api_url: impl Into<String>) -> Result<Self, WikiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| WikiError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_url: api_url.into(),
        })
    }

    /// Best-matching page title for `text`
    pub async fn search_title(&self, text: &str) -> Result<Option<String>, WikiError> {
        let body = self
            .get(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", text),
                ("srlimit", "1"),
                ("format", "json"),
            ])
            .await?;
        parse_search(&body)
    }

    /// Rendered body HTML for `page_title`
    pub async fn page_html(&self, page_title: &str) -> Result<String, WikiError> {
        let body = self
            .get(&[
                ("action", "parse"),
                ("page", page_title),
                ("prop", "text"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .await?;
        parse_render(&body)
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<String, WikiError> {
        tracing::debug!(url = %self.api_url, ?params, "Querying Wikipedia API");

        let response = self
            .http_client
            .get(&self.api_url)
            .query(params)
            .send()
            .await
            .map_err(|e| WikiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(WikiError::ApiError(status.as_u16(), error_text));
        }

        response
            .text()
            .await
            .map_err(|e| WikiError::NetworkError(e.to_string()))
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, WikiError> {
    serde_json::from_str(body).map_err(|e| WikiError::ParseError(e.to_string()))
}

fn api_error(error: ApiErrorBody) -> WikiError {
    WikiError::ParseError(format!("{}: {}", error.code, error.info))
}

fn parse_search(body: &str) -> Result<Option<String>, WikiError> {
    let response: SearchResponse = decode(body)?;
    if let Some(error) = response.error {
        return Err(api_error(error));
    }
    let query = response
        .query
        .ok_or_else(|| WikiError::ParseError("missing `query` field".to_string()))?;
    Ok(query.search.into_iter().next().map(|hit| hit.title))
}

fn parse_render(body: &str) -> Result<String, WikiError> {
    let response: ParseResponse = decode(body)?;
    if let Some(error) = response.error {
        return Err(api_error(error));
    }
    response
        .parse
        .map(|page| page.text)
        .ok_or_else(|| WikiError::ParseError("missing `parse` field".to_string()))
}

#[async_trait]
impl SummarySource for WikipediaClient {
    async fn search(&self, text: &str) -> anyhow::Result<Option<String>> {
        Ok(self.search_title(text).await?)
    }

    async fn render(&self, page_title: &str) -> anyhow::Result<String> {
        Ok(self.page_html(page_title).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_hit() {
        let body = r#"{"batchcomplete":"","query":{"searchinfo":{"totalhits":12},
            "search":[{"ns":0,"title":"A Night at the Opera (Queen album)","pageid":1}]}}"#;
        assert_eq!(
            parse_search(body).unwrap().as_deref(),
            Some("A Night at the Opera (Queen album)")
        );
    }

    #[test]
    fn test_parse_search_no_hit() {
        let body = r#"{"batchcomplete":"","query":{"searchinfo":{"totalhits":0},"search":[]}}"#;
        assert_eq!(parse_search(body).unwrap(), None);
    }

    #[test]
    fn test_parse_search_missing_query() {
        assert!(matches!(parse_search("{}"), Err(WikiError::ParseError(_))));
        assert!(matches!(parse_search("<html>"), Err(WikiError::ParseError(_))));
    }

    #[test]
    fn test_parse_render() {
        let body = r#"{"parse":{"title":"X","pageid":1,"text":"<div class=\"mw-parser-output\"><p>Hi</p></div>"}}"#;
        assert_eq!(
            parse_render(body).unwrap(),
            r#"<div class="mw-parser-output"><p>Hi</p></div>"#
        );
    }

    #[test]
    fn test_parse_render_api_error() {
        let body = r#"{"error":{"code":"missingtitle","info":"The page you specified doesn't exist."}}"#;
        let err = parse_render(body).unwrap_err();
        assert!(err.to_string().contains("missingtitle"));
    }
}
