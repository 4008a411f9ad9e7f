use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

use crate::llm::{GeminiClient, GenerationResult};

/// `Err` is reserved for unexpected faults; service failures arrive as
/// `GenerationResult::Failure`.
pub trait GenerationGateway: Send + Sync {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        credentials: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationResult>> + Send + 'a>>;
}

impl GenerationGateway for GeminiClient {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        credentials: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationResult>> + Send + 'a>> {
        Box::pin(async move { Ok(GeminiClient::generate(self, prompt, credentials).await) })
    }
}
