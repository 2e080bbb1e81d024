//! Reply surfaces — how text goes back for one originating event.
//!
//! Legacy text commands reply directly into the channel; slash commands must
//! be deferred and then answered by editing the deferred response plus
//! follow-ups. The delivery engine depends only on the [`ReplySurface`]
//! trait, never on which channel produced the event.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, EditInteractionResponse,
};
use serenity::http::Http;
use serenity::model::application::CommandInteraction;
use serenity::model::id::{ChannelId, MessageId};

/// Maximum characters per fragment for channel (legacy text) replies.
/// Discord's limit is 2000; 1900 leaves headroom.
pub const CHANNEL_FRAGMENT_MAX: usize = 1900;

/// Maximum characters per fragment for slash-command responses.
pub const INTERACTION_FRAGMENT_MAX: usize = 900;

/// Capability to send an ordered sequence of reply fragments for one event.
#[async_trait]
pub trait ReplySurface: Send {
    /// Upper bound on a single fragment for this surface.
    fn max_fragment_len(&self) -> usize;

    /// Fire-and-forget progress signal. Failures are swallowed; a surface
    /// whose protocol already shows progress (deferred interactions) does
    /// nothing here.
    async fn show_typing(&self) {}

    /// Send the first fragment.
    async fn send_first(&mut self, text: &str) -> Result<(), serenity::Error>;

    /// Send a fragment after the first.
    async fn send_followup(&mut self, text: &str) -> Result<(), serenity::Error>;
}

/// Surface for legacy text commands: every fragment is a reply referencing
/// the originating message.
pub struct ChannelSurface {
    http: Arc<Http>,
    channel_id: ChannelId,
    reply_to: MessageId,
}

impl ChannelSurface {
    pub fn new(http: Arc<Http>, channel_id: ChannelId, reply_to: MessageId) -> Self {
        Self {
            http,
            channel_id,
            reply_to,
        }
    }

    async fn reply(&self, text: &str) -> Result<(), serenity::Error> {
        let message = CreateMessage::new()
            .content(text)
            .reference_message((self.channel_id, self.reply_to));
        self.channel_id.send_message(&self.http, message).await?;
        Ok(())
    }
}

#[async_trait]
impl ReplySurface for ChannelSurface {
    fn max_fragment_len(&self) -> usize {
        CHANNEL_FRAGMENT_MAX
    }

    async fn show_typing(&self) {
        let _ = self.channel_id.broadcast_typing(&self.http).await;
    }

    async fn send_first(&mut self, text: &str) -> Result<(), serenity::Error> {
        self.reply(text).await
    }

    async fn send_followup(&mut self, text: &str) -> Result<(), serenity::Error> {
        self.reply(text).await
    }
}

/// Surface for slash commands. Only [`InteractionSurface::defer`] can build
/// one, so every instance is already deferred — replying without deferral,
/// or deferring twice, is unrepresentable.
pub struct InteractionSurface {
    http: Arc<Http>,
    interaction: CommandInteraction,
}

impl InteractionSurface {
    /// Defer the interaction (shows "thinking…") and wrap it as a surface.
    ///
    /// Deferral happens before generation starts so a slow model can't run
    /// out the protocol's immediate-reply window.
    pub async fn defer(
        http: Arc<Http>,
        interaction: CommandInteraction,
    ) -> Result<Self, serenity::Error> {
        interaction
            .create_response(
                &http,
                CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
            )
            .await?;
        Ok(Self { http, interaction })
    }
}

#[async_trait]
impl ReplySurface for InteractionSurface {
    fn max_fragment_len(&self) -> usize {
        INTERACTION_FRAGMENT_MAX
    }

    async fn send_first(&mut self, text: &str) -> Result<(), serenity::Error> {
        self.interaction
            .edit_response(&self.http, EditInteractionResponse::new().content(text))
            .await?;
        Ok(())
    }

    async fn send_followup(&mut self, text: &str) -> Result<(), serenity::Error> {
        self.interaction
            .create_followup(
                &self.http,
                CreateInteractionResponseFollowup::new().content(text),
            )
            .await?;
        Ok(())
    }
}
