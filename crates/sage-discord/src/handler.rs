use std::sync::Arc;
use std::time::Instant;

use serenity::all::ActivityData;
use serenity::async_trait;
use serenity::builder::{CreateMessage, EditMessage};
use serenity::model::application::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::user::OnlineStatus;
use serenity::prelude::{Context, EventHandler};
use tracing::{debug, info, warn};

use sage_agent::Generator;
use sage_core::config::DiscordConfig;

use crate::command::{parse_legacy, validation_message, LegacyCommand};
use crate::pipeline;
use crate::surface::{ChannelSurface, ReplySurface};

/// Serenity event handler wired to the generation pipeline.
pub struct SageHandler {
    pub generator: Arc<Generator>,
    pub config: DiscordConfig,
}

#[async_trait]
impl EventHandler for SageHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        // Config-driven presence.
        let status = parse_online_status(&self.config.status);
        let activity = build_activity(&self.config);
        ctx.set_presence(activity, status);

        info!(name = %ready.user.name, "Discord bot connected");

        // Register slash commands if enabled.
        if self.config.slash_commands {
            crate::commands::register_commands(&ctx).await;
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Automated authors (ourselves included) never produce a request.
        if msg.author.bot {
            return;
        }

        let Some(command) = parse_legacy(&msg.content, &self.config.prefix) else {
            return;
        };

        match command {
            LegacyCommand::Ping => handle_ping(&ctx, &msg).await,
            LegacyCommand::Help => handle_help(&ctx, &msg).await,
            LegacyCommand::Generate { category, payload } => {
                let mut surface =
                    ChannelSurface::new(Arc::clone(&ctx.http), msg.channel_id, msg.id);

                if payload.is_empty() {
                    if let Err(e) = surface.send_first(validation_message(category)).await {
                        warn!(error = %e, "validation reply failed");
                    }
                    return;
                }

                let outcome =
                    pipeline::run(self.generator.as_ref(), category, &payload, surface).await;
                debug!(category = ?category, ?outcome, "text command handled");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if !self.config.slash_commands {
            return;
        }
        if let Interaction::Command(command) = interaction {
            if command.user.bot {
                return;
            }
            crate::commands::handle_interaction(self.generator.as_ref(), &ctx, &command).await;
        }
    }
}

/// `!ping` — reply, then edit in the measured REST round-trip.
async fn handle_ping(ctx: &Context, msg: &Message) {
    let started = Instant::now();
    let reply = CreateMessage::new().content("Pong!").reference_message(msg);

    match msg.channel_id.send_message(&ctx.http, reply).await {
        Ok(mut pong) => {
            let latency = started.elapsed().as_millis();
            let edit = EditMessage::new().content(format!("Pong! {latency}ms"));
            if let Err(e) = pong.edit(&ctx.http, edit).await {
                warn!(error = %e, "ping edit failed");
            }
        }
        Err(e) => warn!(error = %e, "ping reply failed"),
    }
}

/// `!help` — static capability listing, outside the generative pipeline.
async fn handle_help(ctx: &Context, msg: &Message) {
    let reply = CreateMessage::new()
        .embed(crate::help::help_embed())
        .reference_message(msg);
    if let Err(e) = msg.channel_id.send_message(&ctx.http, reply).await {
        warn!(error = %e, "help reply failed");
    }
}

/// Parse a config status string into serenity's `OnlineStatus`.
fn parse_online_status(s: &str) -> OnlineStatus {
    match s.to_lowercase().as_str() {
        "idle" => OnlineStatus::Idle,
        "dnd" | "do_not_disturb" => OnlineStatus::DoNotDisturb,
        "invisible" => OnlineStatus::Invisible,
        _ => OnlineStatus::Online,
    }
}

/// Build an `ActivityData` from the Discord config.
fn build_activity(config: &DiscordConfig) -> Option<ActivityData> {
    let name = config.activity_name.as_deref()?;
    let kind = config.activity_type.as_deref().unwrap_or("playing");
    Some(match kind.to_lowercase().as_str() {
        "listening" => ActivityData::listening(name),
        "watching" => ActivityData::watching(name),
        "competing" => ActivityData::competing(name),
        "custom" => ActivityData::custom(name),
        _ => ActivityData::playing(name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_map_to_online_status() {
        assert_eq!(parse_online_status("idle"), OnlineStatus::Idle);
        assert_eq!(parse_online_status("dnd"), OnlineStatus::DoNotDisturb);
        assert_eq!(parse_online_status("invisible"), OnlineStatus::Invisible);
        assert_eq!(parse_online_status("online"), OnlineStatus::Online);
        assert_eq!(parse_online_status("garbage"), OnlineStatus::Online);
    }

    #[test]
    fn activity_requires_a_name() {
        let config = DiscordConfig {
            bot_token: "t".into(),
            prefix: "!".into(),
            slash_commands: true,
            status: "online".into(),
            activity_name: None,
            activity_type: Some("watching".into()),
        };
        assert!(build_activity(&config).is_none());
    }
}
