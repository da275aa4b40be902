//! The `obf` slash command: obfuscate or minify source code.

use crate::dispatch::{Dispatcher, ObfInput, ObfReply, RemoteFile};
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateAttachment, CreateCommand,
    CreateCommandOption, EditInteractionResponse, ResolvedOption, ResolvedValue,
};
use tracing::error;

/// Build the command definition registered with the platform.
pub fn register() -> CreateCommand {
    CreateCommand::new("obf")
        .description("Obfuscate or minify source code (JS, HTML, CSS, JSON)")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "code",
                "Paste the code here (optional if uploading a file)",
            )
            .required(false),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Attachment,
                "file",
                "Upload a code file (.js, .json, .html, .css)",
            )
            .required(false),
        )
}

/// Execute one invocation: defer an ephemeral reply, run the dispatcher,
/// then edit the deferred reply with the outcome.
pub async fn run(ctx: &Context, command: &CommandInteraction, dispatcher: &Dispatcher) {
    if let Err(e) = command.defer_ephemeral(&ctx.http).await {
        error!(error = %e, "failed to defer obf reply");
        return;
    }

    let input = resolve_input(&command.data.options());
    let edit = match dispatcher.handle(input).await {
        Ok(ObfReply::Inline { content }) => EditInteractionResponse::new()
            .content(format!("✅ Processed code:\n{content}")),
        Ok(ObfReply::Attachment { filename, bytes }) => EditInteractionResponse::new()
            .content("✅ Done.")
            .new_attachment(CreateAttachment::bytes(bytes, filename)),
        Err(e) => EditInteractionResponse::new().content(format!("❌ {e}")),
    };

    if let Err(e) = command.edit_response(&ctx.http, edit).await {
        error!(error = %e, "failed to edit obf reply");
    }
}

fn resolve_input(options: &[ResolvedOption<'_>]) -> ObfInput {
    let mut input = ObfInput::default();
    for option in options {
        match (option.name, &option.value) {
            ("code", ResolvedValue::String(s)) => input.code = Some((*s).to_string()),
            ("file", ResolvedValue::Attachment(attachment)) => {
                input.file = Some(RemoteFile {
                    name: attachment.filename.clone(),
                    url: attachment.url.clone(),
                });
            }
            _ => {}
        }
    }
    input
}
