use crate::domain::model::{ChatMessage, ProviderKeys, SearchResults};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn service_secret(&self) -> &str;
    fn serper_url(&self) -> &str;
    fn openrouter_url(&self) -> &str;
    fn model(&self) -> &str;
    fn max_results(&self) -> usize;
    fn snippet_max_chars(&self) -> usize;
    fn temperature(&self) -> f32;
    fn request_timeout_seconds(&self) -> u64;
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResults>;
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

#[async_trait]
pub trait SearchAgent: Send + Sync {
    async fn ask(&self, query: &str) -> Result<String>;
}

/// 依照單次請求的金鑰建立 agent，金鑰以參數傳遞而非環境變數
pub trait AgentFactory: Send + Sync {
    fn build(&self, keys: &ProviderKeys) -> Result<Box<dyn SearchAgent>>;
}
