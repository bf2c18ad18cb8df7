pub mod prompt;
pub mod providers;

pub use providers::{
    create_provider, AiProvider, DeepSeekProvider, DefaultProviderFactory, OpenAiProvider,
    ProviderFactory, ProviderKeys,
};
