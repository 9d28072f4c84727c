// File: src/api.rs
// Purpose: The seam between the adapter and a concrete bot client

use anyhow::Result;
use async_trait::async_trait;

use tropka::RouteSpec;

/// The two trigger registrations bot platforms distinguish from raw update
/// events: slash commands and free-text matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Command,
    Hears,
}

/// One entry of a published command list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCommand {
    /// Command name without the leading slash, e.g. `start`.
    pub command: String,
    /// Human-readable description shown in the client's command menu.
    pub description: String,
}

/// Who a published command list is visible to. Commands are grouped by
/// audience and published once per group.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct CommandAudience {
    /// Scope selector such as `all_private_chats` or `chat:@name`; `None`
    /// means the platform default.
    pub scope: Option<String>,
    /// Two-letter language code the list applies to.
    pub language_code: Option<String>,
}

/// What the adapter needs from a bot client.
///
/// Implement this for your bot framework's client type (or a thin wrapper
/// around it) to make it a registration target:
///
/// - [`on_trigger`](BotApi::on_trigger) attaches a handler to a command or
///   hears matcher; the route is the trigger text or pattern.
/// - [`on_event`](BotApi::on_event) attaches one handler to one or more raw
///   update events.
/// - [`publish_commands`](BotApi::publish_commands) uploads one audience's
///   command list after all files were processed.
#[async_trait]
pub trait BotApi {
    /// The handler type route files export for this bot.
    type Handler;

    fn on_trigger(
        &mut self,
        kind: TriggerKind,
        route: &RouteSpec,
        handler: Self::Handler,
    ) -> Result<()>;

    fn on_event(&mut self, events: &[String], handler: Self::Handler) -> Result<()>;

    async fn publish_commands(
        &mut self,
        audience: &CommandAudience,
        commands: &[BotCommand],
    ) -> Result<()>;
}
