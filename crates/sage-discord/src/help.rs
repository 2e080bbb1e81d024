//! Static `!help` capability listing.

use serenity::builder::CreateEmbed;

const EMBED_COLOUR: u32 = 0x0099ff;

/// Build the help embed listing every command on both channels.
pub fn help_embed() -> CreateEmbed {
    CreateEmbed::new()
        .colour(EMBED_COLOUR)
        .title("AI Bot Commands")
        .field("!ask <question>", "Ask the AI anything", false)
        .field("!math <problem>", "Solve a math problem", false)
        .field("!code <question>", "Ask a coding question", false)
        .field("!game <question>", "Ask about video games", false)
        .field("!ping", "Check bot latency", false)
        .field("!help", "Show this message", false)
        .field("/ask <question>", "Slash command version", false)
        .field("/math <problem>", "Math slash command", false)
        .field("/code <question>", "Code slash command", false)
        .field("/gaming <question>", "Gaming slash command", false)
}
