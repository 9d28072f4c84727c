// File: src/assert.rs
// Purpose: Method vocabulary and command metadata validation

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use tropka::RouteMeta;

/// Trigger methods that carry a route (command name or hears matcher).
pub const TRIGGERS: [&str; 2] = ["command", "hears"];

/// Raw update events a handler can be attached to.
pub const EVENTS: [&str; 23] = [
    "message",
    "edited_message",
    "channel_post",
    "edited_channel_post",
    "business_connection",
    "business_message",
    "edited_business_message",
    "deleted_business_messages",
    "message_reaction",
    "message_reaction_count",
    "inline_query",
    "chosen_inline_result",
    "callback_query",
    "shipping_query",
    "pre_checkout_query",
    "poll",
    "poll_answer",
    "my_chat_member",
    "chat_member",
    "chat_join_request",
    "chat_boost",
    "removed_chat_boost",
    "purchased_paid_media",
];

static CHAT_SCOPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^chat:(@[^:]+|\d+)$").expect("hardcoded pattern"));
static CHAT_ADMINISTRATORS_SCOPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^chat_administrators:(@[^:]+|\d+)$").expect("hardcoded pattern"));
static CHAT_MEMBER_SCOPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^chat_member:(@[^:]+|\d+):(\d+)$").expect("hardcoded pattern"));

pub(crate) fn assert_method(method: &str) -> Result<()> {
    if !TRIGGERS.contains(&method) && !EVENTS.contains(&method) {
        bail!(
            "Event must be one of:\n{}, {}\nReceived: {method}",
            TRIGGERS.join(", "),
            EVENTS.join(", ")
        );
    }
    Ok(())
}

/// Commands published to the client's menu need a description.
pub(crate) fn assert_command_description(data: &RouteMeta) -> Result<()> {
    match data.get("description").map(|value| value.as_str()) {
        Some(Some(description)) if !description.is_empty() => Ok(()),
        Some(_) => bail!("Command description must be a non-empty string"),
        None => bail!("Command description is required"),
    }
}

/// A command scope is either one of the fixed selectors or a chat-targeted
/// selector like `chat:@name` or `chat_member:12345:67`.
pub(crate) fn assert_command_scope(data: &RouteMeta) -> Result<()> {
    let Some(scope) = data.get("scope") else {
        return Ok(());
    };

    let Some(scope) = scope.as_str() else {
        bail!("Command scope must be a string");
    };

    if [
        "default",
        "all_private_chats",
        "all_group_chats",
        "all_chat_administrators",
    ]
    .contains(&scope)
    {
        return Ok(());
    }

    if [&CHAT_SCOPE, &CHAT_ADMINISTRATORS_SCOPE, &CHAT_MEMBER_SCOPE]
        .iter()
        .any(|pattern| pattern.is_match(scope))
    {
        return Ok(());
    }

    bail!("Invalid command scope: {scope}");
}

pub(crate) fn assert_language_code(data: &RouteMeta) -> Result<()> {
    let Some(language) = data.get("language_code") else {
        return Ok(());
    };

    match language.as_str() {
        Some(code) if code.len() == 2 && code.chars().all(|c| c.is_ascii_lowercase()) => Ok(()),
        _ => bail!("Language code must be a two-letter lowercase code"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(entries: &[(&str, serde_json::Value)]) -> RouteMeta {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn validates_the_method_vocabulary() {
        assert!(assert_method("command").is_ok());
        assert!(assert_method("hears").is_ok());
        assert!(assert_method("callback_query").is_ok());
        assert!(assert_method("get").is_err());
    }

    #[test]
    fn requires_a_command_description() {
        assert!(assert_command_description(&meta(&[])).is_err());
        assert!(assert_command_description(&meta(&[("description", json!(3))])).is_err());
        assert!(assert_command_description(&meta(&[("description", json!(""))])).is_err());
        assert!(assert_command_description(&meta(&[("description", json!("start the bot"))])).is_ok());
    }

    #[test]
    fn validates_command_scopes() {
        assert!(assert_command_scope(&meta(&[])).is_ok());
        assert!(assert_command_scope(&meta(&[("scope", json!("default"))])).is_ok());
        assert!(assert_command_scope(&meta(&[("scope", json!("all_private_chats"))])).is_ok());
        assert!(assert_command_scope(&meta(&[("scope", json!("chat:@fruits"))])).is_ok());
        assert!(assert_command_scope(&meta(&[("scope", json!("chat:12345"))])).is_ok());
        assert!(assert_command_scope(&meta(&[("scope", json!("chat_member:@fruits:42"))])).is_ok());

        assert!(assert_command_scope(&meta(&[("scope", json!("everyone"))])).is_err());
        assert!(assert_command_scope(&meta(&[("scope", json!("chat:"))])).is_err());
        assert!(assert_command_scope(&meta(&[("scope", json!(7))])).is_err());
    }

    #[test]
    fn validates_language_codes() {
        assert!(assert_language_code(&meta(&[])).is_ok());
        assert!(assert_language_code(&meta(&[("language_code", json!("en"))])).is_ok());
        assert!(assert_language_code(&meta(&[("language_code", json!("eng"))])).is_err());
        assert!(assert_language_code(&meta(&[("language_code", json!("EN"))])).is_err());
        assert!(assert_language_code(&meta(&[("language_code", json!(5))])).is_err());
    }
}
