use std::sync::Arc;

use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sage_bot=info,sage_discord=info,sage_agent=info".into()),
        )
        .init();

    // load config: explicit path via SAGE_CONFIG env > ~/.sage/sage.toml
    let config_path = std::env::var("SAGE_CONFIG").ok();
    let config = sage_core::SageConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        sage_core::SageConfig::default()
    });

    let Some(discord_config) = config.discord.clone() else {
        anyhow::bail!("no Discord bot token configured — set discord.bot_token in sage.toml");
    };

    let provider = build_provider(&config);
    let generator = Arc::new(sage_agent::Generator::new(
        provider,
        config.agent.model.clone(),
    ));

    info!(model = %config.agent.model, "Sage bot starting");

    let adapter = sage_discord::DiscordAdapter::new(&discord_config, generator);
    adapter.run().await;

    Ok(())
}

/// Build the LLM provider from config.
///
/// Priority order:
///   1. providers.openai
///   2. providers.anthropic
///   3. Env vars (OPENAI_API_KEY, ANTHROPIC_API_KEY)
fn build_provider(config: &sage_core::SageConfig) -> Box<dyn sage_agent::provider::LlmProvider> {
    if let Some(ref openai) = config.providers.openai {
        info!("LLM provider: OpenAI ({})", openai.base_url);
        return Box::new(sage_agent::openai::OpenAiProvider::new(
            openai.api_key.clone(),
            Some(openai.base_url.clone()),
        ));
    }

    if let Some(ref anthropic) = config.providers.anthropic {
        info!("LLM provider: Anthropic ({})", anthropic.base_url);
        return Box::new(sage_agent::anthropic::AnthropicProvider::new(
            anthropic.api_key.clone(),
            Some(anthropic.base_url.clone()),
        ));
    }

    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        info!("LLM provider: OpenAI (from env)");
        return Box::new(sage_agent::openai::OpenAiProvider::new(key, None));
    }

    if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
        info!("LLM provider: Anthropic (from env)");
        return Box::new(sage_agent::anthropic::AnthropicProvider::new(key, None));
    }

    tracing::warn!("No LLM provider configured — commands will return errors");
    Box::new(NullProvider)
}

/// Placeholder provider when no API key is available.
struct NullProvider;

#[async_trait::async_trait]
impl sage_agent::provider::LlmProvider for NullProvider {
    fn name(&self) -> &str {
        "null"
    }

    async fn send(
        &self,
        _req: &sage_agent::provider::ChatRequest,
    ) -> Result<sage_agent::provider::ChatResponse, sage_agent::provider::ProviderError> {
        Err(sage_agent::provider::ProviderError::Unavailable(
            "no LLM provider configured — set providers.openai.api_key in sage.toml".into(),
        ))
    }
}
