pub mod answer;
pub mod provider;
pub mod providers;

pub use answer::AnswerGenerator;
pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::gemini::GeminiProvider;
