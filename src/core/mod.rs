pub mod agent;
pub mod context;

pub use crate::domain::model::{ProviderKeys, SearchRequest, SearchResponse};
pub use crate::domain::ports::{
    AgentFactory, ConfigProvider, LanguageModel, SearchAgent, SearchProvider,
};
pub use crate::utils::error::Result;
