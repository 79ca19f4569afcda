//! Language-model provider adapters.

mod grok_provider;
mod mock_provider;

pub use grok_provider::{GrokConfig, GrokProvider};
pub use mock_provider::MockAiProvider;
