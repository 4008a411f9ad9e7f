mod api_error;
mod gemini;
mod result;

pub use gemini::GeminiClient;
pub use result::{ErrorKind, Failure, GenerationResult};
