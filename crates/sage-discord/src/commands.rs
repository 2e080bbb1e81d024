//! Discord slash commands — `/ask`, `/chat`, `/math`, `/code`, `/gaming`.
//!
//! Registration happens in `ready()` when `config.slash_commands` is true.
//! Interactions are dispatched from `interaction_create` in the event handler.

use std::sync::Arc;

use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::prelude::Context;
use tracing::{debug, info, warn};

use sage_agent::{Category, Generator};

use crate::command::validation_message;
use crate::pipeline;
use crate::surface::InteractionSurface;

/// Register global slash commands. Call from `ready()`.
pub async fn register_commands(ctx: &Context) {
    let commands = vec![
        CreateCommand::new("ask")
            .description("Ask the AI anything - math, coding, gaming, or general questions")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "question",
                    "Your question for the AI",
                )
                .required(true),
            ),
        CreateCommand::new("chat")
            .description("Chat with the AI about any topic")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "Message to send to the AI",
                )
                .required(true),
            ),
        CreateCommand::new("math")
            .description("Ask a math question")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "problem", "Your math problem")
                    .required(true),
            ),
        CreateCommand::new("code")
            .description("Ask a coding/programming question")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "question",
                    "Your coding question",
                )
                .required(true),
            ),
        CreateCommand::new("gaming")
            .description("Ask about video games, strategies, or gaming knowledge")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "question",
                    "Your gaming question",
                )
                .required(true),
            ),
    ];

    match serenity::model::application::Command::set_global_commands(&ctx.http, commands).await {
        Ok(cmds) => info!(count = cmds.len(), "registered global slash commands"),
        Err(e) => warn!(error = %e, "failed to register global slash commands"),
    }
}

/// Map a slash command name to its category and string option name.
/// Unknown names produce no request.
pub fn recognize(name: &str) -> Option<(Category, &'static str)> {
    match name {
        "ask" => Some((Category::General, "question")),
        "chat" => Some((Category::General, "message")),
        "math" => Some((Category::Math, "problem")),
        "code" => Some((Category::Code, "question")),
        "gaming" => Some((Category::Gaming, "question")),
        _ => None,
    }
}

/// Handle one slash command interaction through the full pipeline.
pub async fn handle_interaction(generator: &Generator, ctx: &Context, command: &CommandInteraction) {
    let Some((category, option)) = recognize(command.data.name.as_str()) else {
        return;
    };

    let payload = command
        .data
        .options
        .iter()
        .find(|o| o.name == option)
        .and_then(|o| o.value.as_str())
        .unwrap_or("")
        .trim()
        .to_string();

    // Validation happens before deferral so the reply can stay ephemeral.
    if payload.is_empty() {
        respond_ephemeral(ctx, command, validation_message(category)).await;
        return;
    }

    // Defer right away — generation can easily outlive the immediate-reply
    // window, and edit/follow-up are only valid on a deferred interaction.
    let surface = match InteractionSurface::defer(Arc::clone(&ctx.http), command.clone()).await {
        Ok(surface) => surface,
        Err(e) => {
            warn!(command = %command.data.name, error = %e, "defer failed");
            return;
        }
    };

    let outcome = pipeline::run(generator, category, &payload, surface).await;
    debug!(command = %command.data.name, ?outcome, "slash command handled");
}

/// Send an ephemeral response to a slash command (only visible to the invoker).
async fn respond_ephemeral(ctx: &Context, command: &CommandInteraction, content: &str) {
    let _ = command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await;
}
