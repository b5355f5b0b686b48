use crate::adapters::ensure_success;
use crate::domain::model::{SearchHit, SearchResults};
use crate::domain::ports::SearchProvider;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_SERPER_URL: &str = "https://google.serper.dev/search";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SearchHit>,
    answer_box: Option<AnswerBox>,
    knowledge_graph: Option<KnowledgeGraph>,
}

#[derive(Debug, Deserialize)]
struct AnswerBox {
    title: Option<String>,
    answer: Option<String>,
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeGraph {
    title: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    description: Option<String>,
}

impl AnswerBox {
    fn summary(&self) -> Option<String> {
        let text = self.answer.as_ref().or(self.snippet.as_ref())?;
        match &self.title {
            Some(title) => Some(format!("{}: {}", title, text)),
            None => Some(text.clone()),
        }
    }
}

impl KnowledgeGraph {
    fn summary(&self) -> Option<String> {
        let title = self.title.as_ref()?;
        let mut s = title.clone();
        if let Some(kind) = &self.kind {
            s.push_str(&format!(" ({})", kind));
        }
        if let Some(description) = &self.description {
            s.push_str(&format!(": {}", description));
        }
        Some(s)
    }
}

/// Serper (Google SERP) 搜尋客戶端
pub struct SerperClient {
    client: Client,
    endpoint: String,
    api_key: String,
    max_results: usize,
}

impl SerperClient {
    pub fn new(client: Client, endpoint: String, api_key: String, max_results: usize) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            max_results,
        }
    }
}

#[async_trait]
impl SearchProvider for SerperClient {
    async fn search(&self, query: &str) -> Result<SearchResults> {
        tracing::debug!("Making Serper request to: {}", self.endpoint);

        let body = serde_json::json!({
            "q": query,
            "num": self.max_results,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let response = ensure_success("Serper", response).await?;
        let parsed: SerperResponse = serde_json::from_slice(&response.bytes().await?)?;

        let mut hits = parsed.organic;
        hits.truncate(self.max_results);
        tracing::debug!("Serper returned {} organic results", hits.len());

        Ok(SearchResults {
            hits,
            answer_box: parsed.answer_box.as_ref().and_then(AnswerBox::summary),
            knowledge_graph: parsed.knowledge_graph.as_ref().and_then(KnowledgeGraph::summary),
        })
    }
}
