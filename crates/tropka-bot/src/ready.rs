// File: src/ready.rs
// Purpose: Groups registered commands into per-audience command lists

use std::collections::BTreeMap;

use tropka::{EndpointInfo, RouteSpec};

use crate::api::{BotCommand, CommandAudience};

/// Collects every registered `command` endpoint from a build report and
/// groups it by audience. Each group becomes one
/// [`publish_commands`](crate::BotApi::publish_commands) call.
pub(crate) fn group_commands(
    report: &[EndpointInfo],
) -> BTreeMap<CommandAudience, Vec<BotCommand>> {
    let mut groups: BTreeMap<CommandAudience, Vec<BotCommand>> = BTreeMap::new();

    for endpoint in report {
        let EndpointInfo::Registered {
            endpoint: route,
            method,
            data,
            ..
        } = endpoint
        else {
            continue;
        };

        if method.as_single() != Some("command") {
            continue;
        }

        let RouteSpec::Path(path) = route else {
            continue;
        };

        // Descriptions were validated at registration time.
        let Some(description) = data.get("description").and_then(|value| value.as_str()) else {
            continue;
        };

        let audience = CommandAudience {
            scope: data
                .get("scope")
                .and_then(|value| value.as_str())
                .map(str::to_string),
            language_code: data
                .get("language_code")
                .and_then(|value| value.as_str())
                .map(str::to_string),
        };

        groups.entry(audience).or_default().push(BotCommand {
            command: path.strip_prefix('/').unwrap_or(path).to_string(),
            description: description.to_string(),
        });
    }

    groups
}
