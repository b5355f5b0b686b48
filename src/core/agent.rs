use crate::adapters::{OpenRouterClient, SerperClient};
use crate::core::context::{format_sources, user_prompt, SYSTEM_PROMPT};
use crate::core::{AgentFactory, ConfigProvider, LanguageModel, SearchAgent, SearchProvider};
use crate::domain::model::{ChatMessage, ProviderKeys};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 搜尋後回答：先查 Serper，再把來源交給模型
pub struct DeepSearchAgent<S: SearchProvider, L: LanguageModel> {
    search: S,
    model: L,
    snippet_max_chars: usize,
}

impl<S: SearchProvider, L: LanguageModel> DeepSearchAgent<S, L> {
    pub fn new(search: S, model: L, snippet_max_chars: usize) -> Self {
        Self {
            search,
            model,
            snippet_max_chars,
        }
    }
}

#[async_trait]
impl<S: SearchProvider, L: LanguageModel> SearchAgent for DeepSearchAgent<S, L> {
    async fn ask(&self, query: &str) -> Result<String> {
        let results = self.search.search(query).await?;
        if results.is_empty() {
            tracing::warn!("Search returned no results, asking the model without sources");
        } else {
            tracing::debug!("Search returned {} hits", results.hits.len());
        }

        let sources = format_sources(&results, self.snippet_max_chars);
        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_prompt(query, &sources)),
        ];

        let answer = self.model.complete(&messages).await?;
        tracing::debug!("Model answered with {} chars", answer.chars().count());
        Ok(answer)
    }
}

/// 與供應商無關的設定，不含任何金鑰
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub serper_url: String,
    pub openrouter_url: String,
    pub model: String,
    pub max_results: usize,
    pub snippet_max_chars: usize,
    pub temperature: f32,
    pub request_timeout_seconds: u64,
}

impl AgentSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            serper_url: config.serper_url().to_string(),
            openrouter_url: config.openrouter_url().to_string(),
            model: config.model().to_string(),
            max_results: config.max_results(),
            snippet_max_chars: config.snippet_max_chars(),
            temperature: config.temperature(),
            request_timeout_seconds: config.request_timeout_seconds(),
        }
    }
}

/// 每個請求建立一個綁定該請求金鑰的 agent；共用的只有連線池
pub struct HttpAgentFactory {
    client: Client,
    settings: AgentSettings,
}

impl HttpAgentFactory {
    pub fn new(settings: AgentSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }
}

impl AgentFactory for HttpAgentFactory {
    fn build(&self, keys: &ProviderKeys) -> Result<Box<dyn SearchAgent>> {
        let search = SerperClient::new(
            self.client.clone(),
            self.settings.serper_url.clone(),
            keys.serper.clone(),
            self.settings.max_results,
        );
        let model = OpenRouterClient::new(
            self.client.clone(),
            self.settings.openrouter_url.clone(),
            keys.openrouter.clone(),
            self.settings.model.clone(),
        )
        .with_temperature(self.settings.temperature);

        Ok(Box::new(DeepSearchAgent::new(
            search,
            model,
            self.settings.snippet_max_chars,
        )))
    }
}
