use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub result: String,
    pub status: String,
}

impl SearchResponse {
    pub fn success(result: String) -> Self {
        Self {
            result,
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// 單次請求帶入的供應商金鑰，只活在該請求的生命週期內
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderKeys {
    pub serper: String,
    pub openrouter: String,
}

impl std::fmt::Debug for ProviderKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderKeys")
            .field("serper", &"***")
            .field("openrouter", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub answer_box: Option<String>,
    pub knowledge_graph: Option<String>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.answer_box.is_none() && self.knowledge_graph.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_keys_debug_is_redacted() {
        let keys = ProviderKeys {
            serper: "serper-secret".to_string(),
            openrouter: "sk-or-secret".to_string(),
        };
        let printed = format!("{:?}", keys);
        assert!(!printed.contains("serper-secret"));
        assert!(!printed.contains("sk-or-secret"));
    }

    #[test]
    fn test_success_envelope() {
        let body = serde_json::to_value(SearchResponse::success("answer".to_string())).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"result": "answer", "status": "success"})
        );
    }
}
