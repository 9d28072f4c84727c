//! Bot adapter for tropka. Lets you define chat-bot commands and event
//! handlers in route files.
//!
//! The file name's method suffix selects the registration kind: `command` and
//! `hears` are triggers carrying a route, anything else is a raw update
//! event. Commands derived from nested directories collapse to their last
//! path segment, since chat platforms have no subcommand routing:
//!
//! ```text
//! routes/start.command.rs        -> /start
//! routes/menu/open.command.rs    -> /open
//! routes/notify.message.rs       -> "message" update handler
//! ```
//!
//! Command files export a `description` (and optionally `scope` and
//! `language_code`) beside their handler; after every file is processed the
//! adapter groups registered commands by audience and publishes one command
//! list per group through [`BotApi::publish_commands`]. Bind your bot client
//! by implementing [`BotApi`] for it.

mod api;
mod assert;
mod ready;

pub use api::{BotApi, BotCommand, CommandAudience, TriggerKind};
pub use assert::{EVENTS, TRIGGERS};

use anyhow::{bail, Result};
use async_trait::async_trait;

use tropka::{Adapter, EndpointInfo, MethodSpec, ParsedRoute, RouteSpec, RouteStructure};

use crate::assert::{
    assert_command_description, assert_command_scope, assert_language_code, assert_method,
};
use crate::ready::group_commands;

/// Adapter configuration.
#[derive(Debug, Clone)]
pub struct BotOptions {
    /// Publish the aggregated command lists once all routes are registered.
    pub publish_commands: bool,
}

impl Default for BotOptions {
    fn default() -> Self {
        Self {
            publish_commands: true,
        }
    }
}

/// Factory for the bot adapter, passed to
/// [`create_router`](tropka::create_router).
pub fn adapter<B: BotApi>(options: BotOptions) -> impl FnOnce(B) -> Result<BotAdapter<B>> {
    |bot| Ok(BotAdapter { bot, options })
}

/// Registers parsed routes on a [`BotApi`] client.
pub struct BotAdapter<B> {
    bot: B,
    options: BotOptions,
}

#[async_trait]
impl<B> Adapter for BotAdapter<B>
where
    B: BotApi + Send + Sync,
    B::Handler: Send,
{
    type Handler = B::Handler;

    async fn route(&self, mut structure: RouteStructure) -> Result<RouteStructure> {
        assert_method(&structure.method)?;

        // Platforms have no subcommand support; the last path segment is the
        // command.
        if structure.method == "command" {
            let command = structure.endpoint.rsplit('/').next().unwrap_or_default();
            structure.endpoint = format!("/{command}");
        }

        Ok(structure)
    }

    async fn register(&mut self, route: ParsedRoute<B::Handler>) -> Result<()> {
        let method = route.method.clone();
        for name in method.names() {
            assert_method(name)?;
        }

        match method {
            MethodSpec::Single(name) if TRIGGERS.contains(&name.as_str()) => {
                if name == "command" && self.options.publish_commands {
                    assert_command_description(&route.data)?;
                    assert_command_scope(&route.data)?;
                    assert_language_code(&route.data)?;
                }

                let kind = if name == "command" {
                    TriggerKind::Command
                } else {
                    TriggerKind::Hears
                };
                // The client expects trigger text without the leading slash.
                let target = match route.route {
                    RouteSpec::Path(path) => {
                        RouteSpec::Path(path.strip_prefix('/').unwrap_or(&path).to_string())
                    }
                    pattern => pattern,
                };

                self.bot.on_trigger(kind, &target, route.handler)
            }
            MethodSpec::Single(name) => self.bot.on_event(&[name], route.handler),
            MethodSpec::Multi(names) => {
                if names.iter().any(|name| TRIGGERS.contains(&name.as_str())) {
                    bail!("Exported method lists may only contain update events");
                }
                self.bot.on_event(&names, route.handler)
            }
        }
    }

    async fn ready(&mut self, report: &[EndpointInfo]) -> Result<()> {
        if !self.options.publish_commands {
            return Ok(());
        }

        for (audience, commands) in group_commands(report) {
            self.bot.publish_commands(&audience, &commands).await?;
        }

        Ok(())
    }
}
