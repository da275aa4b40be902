//! Slash command definitions and registration.

pub mod obf;

use serenity::all::{Command, Context, GuildId, Ready};
use tracing::{error, info};

/// Register the slash commands with Discord, either guild-scoped (instant
/// propagation) or globally.
pub async fn register_commands(ctx: &Context, ready: &Ready, guild_id: Option<u64>) {
    let commands = vec![obf::register()];

    if let Some(gid) = guild_id {
        match GuildId::new(gid).set_commands(&ctx.http, commands).await {
            Ok(cmds) => info!(count = cmds.len(), "registered guild commands"),
            Err(e) => error!(error = %e, "failed to register guild commands"),
        }
    } else {
        match Command::set_global_commands(&ctx.http, commands).await {
            Ok(cmds) => info!(count = cmds.len(), "registered global commands"),
            Err(e) => error!(error = %e, "failed to register global commands"),
        }
    }

    info!("{} is connected", ready.user.name);
}
