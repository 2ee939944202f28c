// src/infrastructure/search/elasticsearch.rs
use super::query::{bool_json, index_mappings, search_body};
use crate::domain::article::{
    ArticleId, ArticleSearchIndex, SearchDocument, SearchHit, SearchRequest, SearchResults,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::{collections::BTreeMap, fmt, time::Duration};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ElasticsearchSettings {
    pub base_url: String,
    pub index: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for ElasticsearchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElasticsearchSettings")
            .field("base_url", &self.base_url)
            .field("index", &self.index)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Article index backed by the Elasticsearch REST API.
#[derive(Clone)]
pub struct ElasticsearchArticleIndex {
    base_url: String,
    index: String,
    credentials: Option<(String, Option<String>)>,
    http_client: reqwest::Client,
}

impl fmt::Debug for ElasticsearchArticleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElasticsearchArticleIndex")
            .field("base_url", &self.base_url)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

fn index_error(context: &str, err: impl fmt::Display) -> DomainError {
    DomainError::SearchIndex(format!("{context}: {err}"))
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    total: Option<TotalHits>,
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct TotalHits {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(rename = "_source")]
    source: Value,
    #[serde(rename = "_score")]
    score: Option<f64>,
    #[serde(default)]
    highlight: BTreeMap<String, Vec<String>>,
}

fn into_results(response: SearchResponse) -> SearchResults {
    let total = response.hits.total.map_or(0, |t| t.value);
    let hits = response
        .hits
        .hits
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<SearchDocument>(raw.source) {
            Ok(document) => Some(SearchHit {
                document,
                score: raw.score,
                highlights: raw.highlight,
            }),
            Err(err) => {
                warn!(doc_id = %raw.id, error = %err, "skipping undecodable search hit");
                None
            }
        })
        .collect();
    SearchResults { hits, total }
}

impl ElasticsearchArticleIndex {
    pub fn new(settings: ElasticsearchSettings) -> DomainResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| index_error("failed to build search client", e))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            index: settings.index,
            credentials: settings.username.map(|u| (u, settings.password)),
            http_client,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            self.index,
            path.trim_start_matches('/')
        );
        let builder = self.http_client.request(method, url);
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, password.as_deref()),
            None => builder,
        }
    }

    async fn send(&self, context: &str, builder: RequestBuilder) -> DomainResult<Response> {
        builder
            .send()
            .await
            .map_err(|e| index_error(context, e))
    }

    async fn ensure_success(context: &str, response: Response) -> DomainResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(index_error(context, format!("status {status}: {body}")))
    }

    /// Creates the index with explicit mappings when it does not exist yet.
    pub async fn ensure_index(&self) -> DomainResult<()> {
        let response = self
            .send("index lookup failed", self.request(Method::HEAD, ""))
            .await?;
        if response.status().is_success() {
            return Ok(());
        }

        let response = self
            .send(
                "index creation failed",
                self.request(Method::PUT, "").json(&index_mappings()),
            )
            .await?;
        // Another replica may have created it concurrently.
        if response.status() == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            if body.contains("resource_already_exists_exception") {
                return Ok(());
            }
            return Err(index_error("index creation failed", body));
        }
        Self::ensure_success("index creation failed", response).await?;
        debug!(index = %self.index, "search index created");
        Ok(())
    }
}

#[async_trait]
impl ArticleSearchIndex for ElasticsearchArticleIndex {
    async fn upsert(&self, document: &SearchDocument) -> DomainResult<()> {
        let builder = self
            .request(Method::PUT, &format!("_doc/{}?refresh=wait_for", document.id))
            .json(document);
        let response = self.send("document upsert failed", builder).await?;
        Self::ensure_success("document upsert failed", response).await?;
        debug!(article_id = document.id, "search document upserted");
        Ok(())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let response = self
            .send(
                "document delete failed",
                self.request(Method::DELETE, &format!("_doc/{id}?refresh=wait_for")),
            )
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::ensure_success("document delete failed", response).await?;
        Ok(())
    }

    async fn delete_many(&self, ids: &[ArticleId]) -> DomainResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let raw_ids: Vec<i64> = ids.iter().copied().map(i64::from).collect();
        let body = json!({ "query": { "terms": { "id": raw_ids } } });
        let response = self
            .send(
                "bulk delete failed",
                self.request(Method::POST, "_delete_by_query?refresh=true")
                    .json(&body),
            )
            .await?;
        Self::ensure_success("bulk delete failed", response).await?;
        Ok(())
    }

    async fn search(&self, request: &SearchRequest) -> DomainResult<SearchResults> {
        debug!(query = %bool_json(&request.query), "searching articles");
        let response = self
            .send(
                "search failed",
                self.request(Method::POST, "_search")
                    .json(&search_body(request)),
            )
            .await?;
        let response = Self::ensure_success("search failed", response).await?;
        let parsed = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| index_error("malformed search response", e))?;
        Ok(into_results(parsed))
    }
}
