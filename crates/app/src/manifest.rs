//! Slack app manifest generation.
//!
//! Describes the app to Slack: its name, bot scopes, the slash command that
//! starts the workflow and the interactivity endpoint.
//!
//! See: <https://api.slack.com/reference/manifests>

use serde::Serialize;
use url::Url;

use crate::routes::slack::{COMMANDS_PATH, INTERACTIONS_PATH};
use crate::workflow::definition::{SUBMIT_REQUEST_TRIGGER, TriggerKind};

/// App name shown in Slack.
pub const APP_NAME: &str = "editable-request";

/// App description shown in Slack.
pub const APP_DESCRIPTION: &str = "Request workflow that enables submitters to delete";

/// Bot token scopes.
///
/// See: <https://api.slack.com/scopes>
pub const BOT_SCOPES: &[&str] = &[
    "commands",
    "chat:write",
    "chat:write.public",
    "channels:join",
    "channels:history",
];

/// Slack app manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppManifest {
    pub display_information: DisplayInformation,
    pub features: Features,
    pub oauth_config: OauthConfig,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayInformation {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Features {
    pub bot_user: BotUser,
    pub slash_commands: Vec<SlashCommandManifest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotUser {
    pub display_name: String,
    pub always_online: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlashCommandManifest {
    pub command: String,
    pub url: String,
    pub description: String,
    pub should_escape: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OauthConfig {
    pub scopes: Scopes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scopes {
    pub bot: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub interactivity: Interactivity,
    pub org_deploy_enabled: bool,
    pub socket_mode_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interactivity {
    pub is_enabled: bool,
    pub request_url: String,
}

/// Build the manifest for an app served at `base_url`.
///
/// # Errors
///
/// Returns an error if the endpoint URLs cannot be joined onto `base_url`.
pub fn build_manifest(base_url: &Url) -> Result<AppManifest, url::ParseError> {
    let commands_url = endpoint_url(base_url, COMMANDS_PATH)?;
    let interactions_url = endpoint_url(base_url, INTERACTIONS_PATH)?;

    let slash_commands = match SUBMIT_REQUEST_TRIGGER.kind {
        TriggerKind::SlashCommand { command } => vec![SlashCommandManifest {
            command: command.to_string(),
            url: commands_url.to_string(),
            description: SUBMIT_REQUEST_TRIGGER.description.to_string(),
            should_escape: false,
        }],
    };

    Ok(AppManifest {
        display_information: DisplayInformation {
            name: APP_NAME.to_string(),
            description: APP_DESCRIPTION.to_string(),
        },
        features: Features {
            bot_user: BotUser {
                display_name: APP_NAME.to_string(),
                always_online: false,
            },
            slash_commands,
        },
        oauth_config: OauthConfig {
            scopes: Scopes {
                bot: BOT_SCOPES.iter().map(ToString::to_string).collect(),
            },
        },
        settings: Settings {
            interactivity: Interactivity {
                is_enabled: true,
                request_url: interactions_url.to_string(),
            },
            org_deploy_enabled: false,
            socket_mode_enabled: false,
        },
    })
}

/// Resolve a route path under `base_url`, keeping any path prefix.
fn endpoint_url(base_url: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    base.join(path.trim_start_matches('/'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn manifest() -> AppManifest {
        build_manifest(&Url::parse("https://requests.example.com").unwrap()).unwrap()
    }

    #[test]
    fn test_manifest_endpoints() {
        let manifest = manifest();
        assert_eq!(
            manifest.settings.interactivity.request_url,
            "https://requests.example.com/slack/interactions"
        );

        let command = manifest.features.slash_commands.first().unwrap();
        assert_eq!(command.command, "/request");
        assert_eq!(command.url, "https://requests.example.com/slack/commands");
    }

    #[test]
    fn test_manifest_keeps_base_path_prefix() {
        for base in ["https://host.example.com/editable/", "https://host.example.com/editable"] {
            let manifest = build_manifest(&Url::parse(base).unwrap()).unwrap();
            assert_eq!(
                manifest.settings.interactivity.request_url,
                "https://host.example.com/editable/slack/interactions"
            );
            assert_eq!(
                manifest.features.slash_commands.first().unwrap().url,
                "https://host.example.com/editable/slack/commands"
            );
        }
    }

    #[test]
    fn test_manifest_scopes_cover_workflow_calls() {
        let scopes = manifest().oauth_config.scopes.bot;
        for scope in ["chat:write", "channels:join", "channels:history", "commands"] {
            assert!(scopes.iter().any(|s| s == scope), "missing scope {scope}");
        }
    }

    #[test]
    fn test_manifest_serializes_to_json() {
        let value = serde_json::to_value(manifest()).unwrap();
        assert_eq!(value["display_information"]["name"], "editable-request");
        assert_eq!(value["settings"]["interactivity"]["is_enabled"], true);
    }
}
