//! End-to-end: build a bot's handler table from a fixture directory.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use tropka::{
    create_router, defined, ExportRecord, ExportValue, RouteSpec, StaticLoader,
};
use tropka_bot::{adapter, BotApi, BotCommand, BotOptions, CommandAudience, TriggerKind};

type Handler = &'static str;

#[derive(Clone, Default)]
struct MockBot {
    triggers: Arc<Mutex<Vec<(TriggerKind, String)>>>,
    events: Arc<Mutex<Vec<Vec<String>>>>,
    published: Arc<Mutex<Vec<(CommandAudience, Vec<BotCommand>)>>>,
}

#[async_trait]
impl BotApi for MockBot {
    type Handler = Handler;

    fn on_trigger(
        &mut self,
        kind: TriggerKind,
        route: &RouteSpec,
        _handler: Handler,
    ) -> Result<()> {
        self.triggers.lock().unwrap().push((kind, route.to_string()));
        Ok(())
    }

    fn on_event(&mut self, events: &[String], _handler: Handler) -> Result<()> {
        self.events.lock().unwrap().push(events.to_vec());
        Ok(())
    }

    async fn publish_commands(
        &mut self,
        audience: &CommandAudience,
        commands: &[BotCommand],
    ) -> Result<()> {
        self.published
            .lock()
            .unwrap()
            .push((audience.clone(), commands.to_vec()));
        Ok(())
    }
}

fn fixture(files: &[&str]) -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let routes = dir.path().join("routes");
    fs::create_dir_all(&routes).unwrap();

    for file in files {
        let path = routes.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    (dir, routes.display().to_string())
}

/// A command route file: handler plus a description metadata export.
fn command_module(handler: Handler, description: &str) -> ExportValue<Handler> {
    ExportValue::Record(
        ExportRecord::new()
            .with("default", ExportValue::Handler(handler))
            .with(
                "description",
                ExportValue::Text(description.to_string()),
            ),
    )
}

#[tokio::test]
async fn registers_commands_events_and_publishes_the_command_list() {
    let (_dir, routes) = fixture(&[
        "start.command.rs",
        "menu/open.command.rs",
        "notify.message.rs",
        "!echo.hears.rs",
    ]);
    let root = PathBuf::from(&routes);

    let echo_pattern = regex::Regex::new("echo *(.+)?").unwrap();
    let loader: StaticLoader<Handler> = StaticLoader::new()
        .with_module(root.join("start.command.rs"), command_module("start", "start the bot"))
        .with_module(root.join("menu/open.command.rs"), command_module("open", "open the menu"))
        .with_module(
            root.join("notify.message.rs"),
            ExportValue::handler_module("notify"),
        )
        .with_module(
            root.join("!echo.hears.rs"),
            defined("echo").route(echo_pattern).into_module(),
        );

    let bot = MockBot::default();
    let report = create_router(
        bot.clone(),
        &loader,
        adapter(BotOptions::default()),
        routes.as_str(),
    )
    .await;

    assert_eq!(report.len(), 4);
    assert!(report.iter().all(|endpoint| endpoint.is_registered()));

    let triggers = bot.triggers.lock().unwrap().clone();
    // Nested command collapsed to its last segment; hears kept its pattern.
    assert!(triggers.contains(&(TriggerKind::Command, "start".to_string())));
    assert!(triggers.contains(&(TriggerKind::Command, "open".to_string())));
    assert!(triggers.contains(&(TriggerKind::Hears, "echo *(.+)?".to_string())));

    let events = bot.events.lock().unwrap().clone();
    assert_eq!(events, vec![vec!["message".to_string()]]);

    let published = bot.published.lock().unwrap().clone();
    assert_eq!(published.len(), 1);
    let (audience, commands) = &published[0];
    assert_eq!(audience, &CommandAudience::default());
    let mut names: Vec<_> = commands.iter().map(|command| command.command.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["open", "start"]);
}

#[tokio::test]
async fn a_command_without_a_description_fails_but_the_rest_register() {
    let (_dir, routes) = fixture(&["bad.command.rs", "start.command.rs"]);
    let root = PathBuf::from(&routes);

    let loader: StaticLoader<Handler> = StaticLoader::new()
        .with_module(root.join("bad.command.rs"), ExportValue::handler_module("bad"))
        .with_module(root.join("start.command.rs"), command_module("start", "start the bot"));

    let bot = MockBot::default();
    let report = create_router(
        bot.clone(),
        &loader,
        adapter(BotOptions::default()),
        routes.as_str(),
    )
    .await;

    assert_eq!(report.len(), 2);
    assert!(!report[0].is_registered());
    assert!(report[1].is_registered());

    let published = bot.published.lock().unwrap().clone();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].1.len(), 1);
    assert_eq!(published[0].1[0].command, "start");
}
