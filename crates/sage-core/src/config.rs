use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Top-level config (sage.toml + SAGE_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SageConfig {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub discord: Option<DiscordConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProvidersConfig {
    pub openai: Option<OpenAiProviderConfig>,
    pub anthropic: Option<AnthropicConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiProviderConfig {
    pub api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    pub api_key: String,
    #[serde(default = "default_anthropic_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub bot_token: String,
    /// Prefix for legacy text commands (e.g. `!ask`).
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Register and answer slash commands. Defaults to true.
    #[serde(default = "bool_true")]
    pub slash_commands: bool,
    /// Presence status: online / idle / dnd / invisible.
    #[serde(default = "default_status")]
    pub status: String,
    /// Optional activity shown under the bot's name.
    pub activity_name: Option<String>,
    /// Activity kind: playing / listening / watching / competing / custom.
    pub activity_type: Option<String>,
}

fn bool_true() -> bool {
    true
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_openai_base_url() -> String {
    "https://api.openai.com".to_string()
}
fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".to_string()
}
fn default_prefix() -> String {
    "!".to_string()
}
fn default_status() -> String {
    "online".to_string()
}

impl SageConfig {
    /// Load config from a TOML file with SAGE_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.sage/sage.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: SageConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("SAGE_").split("_"))
            .extract()
            .map_err(|e| crate::error::SageError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.sage/sage.toml", home)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_model_and_no_discord() {
        let config = SageConfig::default();
        assert_eq!(config.agent.model, "gpt-4o-mini");
        assert!(config.discord.is_none());
    }

    #[test]
    fn discord_config_fills_defaults() {
        let discord: DiscordConfig = serde_json::from_value(serde_json::json!({
            "bot_token": "token"
        }))
        .unwrap();
        assert_eq!(discord.prefix, "!");
        assert!(discord.slash_commands);
        assert_eq!(discord.status, "online");
        assert!(discord.activity_name.is_none());
    }
}
