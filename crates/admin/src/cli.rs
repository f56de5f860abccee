//! Command-line surface for the role board.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use mallhub_auth::{PermissionCatalog, RoleStatus};
use mallhub_client::config::ENV_TOKEN;
use mallhub_client::{ApiClient, ClientConfig, RoleStore};
use mallhub_core::{PermissionId, RoleId};

use crate::board::RoleBoard;
use crate::editor::{RoleEditor, SubmitOutcome};
use crate::render;

#[derive(Debug, Parser)]
#[command(name = "mallhub-admin")]
#[command(about = "Manage dashboard roles and their permissions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the dashboard API
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token (defaults to MALLHUB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..=120))]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Exchange email and password for an API token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MALLHUB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List the permission catalog
    Permissions,
    /// List roles
    Roles {
        /// Case-insensitive name filter
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show one role with its permission matrix
    Show { id: RoleId },
    /// Create a role
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "ACTIVE")]
        status: RoleStatus,
        /// Grant every permission of a module (repeatable)
        #[arg(long = "module")]
        modules: Vec<String>,
        /// Grant a single permission id (repeatable)
        #[arg(long = "permission")]
        permissions: Vec<PermissionId>,
    },
    /// Edit an existing role
    Update {
        id: RoleId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        status: Option<RoleStatus>,
        #[arg(long = "grant-module")]
        grant_modules: Vec<String>,
        #[arg(long = "revoke-module")]
        revoke_modules: Vec<String>,
        #[arg(long = "grant")]
        grant: Vec<PermissionId>,
        #[arg(long = "revoke")]
        revoke: Vec<PermissionId>,
    },
    /// Delete a role
    Delete { id: RoleId },
    /// Attach permissions to a role
    Assign {
        id: RoleId,
        #[arg(long = "permission", required = true)]
        permissions: Vec<PermissionId>,
    },
}

impl Cli {
    /// Environment config with command-line flags layered on top.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.api_url {
            config.base_url = url.clone();
        }
        if let Some(token) = &self.token {
            config = config.with_token(token.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn finish(outcome: SubmitOutcome) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Saved(role) => {
            println!("Saved role #{} {}", role.id, role.name);
            Ok(())
        }
        SubmitOutcome::Invalid(message) | SubmitOutcome::Conflict(message) => bail!(message),
        SubmitOutcome::Busy => bail!("a save for this role is already in progress"),
    }
}

fn fill_editor(
    editor: &mut RoleEditor,
    catalog: &PermissionCatalog,
    grant_modules: &[String],
    revoke_modules: &[String],
    grant: &[PermissionId],
    revoke: &[PermissionId],
) {
    for module in grant_modules {
        if catalog.module(module).is_none() {
            tracing::warn!(%module, "unknown module; nothing granted");
        }
        editor.toggle_module(catalog, module, true);
    }
    for module in revoke_modules {
        editor.toggle_module(catalog, module, false);
    }
    for &id in grant {
        editor.toggle_permission(id, true);
    }
    for &id in revoke {
        editor.toggle_permission(id, false);
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.client_config();
    let client = ApiClient::new(&config).context("failed to build API client")?;
    tracing::debug!(base_url = %client.base_url(), "client ready");

    let mut board = RoleBoard::new(Arc::new(client));

    match cli.command {
        Command::Login { email, password } => {
            let session = board.store().login(&email, &password).await?;
            println!("Logged in as {} ({})", session.user.email, session.user.role);
            println!("{}={}", ENV_TOKEN, session.credential.token());
        }
        Command::Permissions => {
            board.refresh_permissions().await?;
            println!("{}", render::render_catalog(board.catalog()));
        }
        Command::Roles { search } => {
            board.load().await?;
            board.set_search(search.unwrap_or_default());
            println!("{}", render::render_role_table(board.filtered_roles(), board.catalog()));
        }
        Command::Show { id } => {
            board.refresh_permissions().await?;
            let role = board.view_role(id).await?.clone();
            println!("{}", render::render_role(&role, board.catalog()));
        }
        Command::Create {
            name,
            status,
            modules,
            permissions,
        } => {
            board.refresh_permissions().await?;
            let catalog = board.catalog().clone();
            let editor = board.open_create();
            editor.set_name(name);
            editor.set_status(status);
            fill_editor(editor, &catalog, &modules, &[], &permissions, &[]);
            finish(board.submit().await?)?;
        }
        Command::Update {
            id,
            name,
            status,
            grant_modules,
            revoke_modules,
            grant,
            revoke,
        } => {
            board.refresh_permissions().await?;
            let catalog = board.catalog().clone();
            let editor = board.open_edit(id).await?;
            if let Some(name) = name {
                editor.set_name(name);
            }
            if let Some(status) = status {
                editor.set_status(status);
            }
            fill_editor(editor, &catalog, &grant_modules, &revoke_modules, &grant, &revoke);
            finish(board.submit().await?)?;
        }
        Command::Delete { id } => {
            board.delete_role(id).await?;
            println!("Deleted role #{id}");
        }
        Command::Assign { id, permissions } => {
            board.assign_permissions(id, &permissions).await?;
            let role = board.store().get_role(id).await?;
            println!("Role #{} now has {} permission(s)", id, role.permission_ids().len());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_modules_and_ids() {
        let cli = Cli::try_parse_from([
            "mallhub-admin",
            "create",
            "--name",
            "Leasing",
            "--module",
            "tenant",
            "--permission",
            "1",
            "--permission",
            "2",
        ])
        .unwrap();

        match cli.command {
            Command::Create {
                name,
                status,
                modules,
                permissions,
            } => {
                assert_eq!(name, "Leasing");
                assert_eq!(status, RoleStatus::Active);
                assert_eq!(modules, vec!["tenant".to_string()]);
                assert_eq!(permissions, vec![PermissionId::new(1), PermissionId::new(2)]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_update_toggles() {
        let cli = Cli::try_parse_from([
            "mallhub-admin",
            "update",
            "7",
            "--status",
            "inactive",
            "--revoke-module",
            "mall",
            "--grant",
            "5",
        ])
        .unwrap();

        match cli.command {
            Command::Update {
                id,
                status,
                revoke_modules,
                grant,
                ..
            } => {
                assert_eq!(id, RoleId::new(7));
                assert_eq!(status, Some(RoleStatus::Inactive));
                assert_eq!(revoke_modules, vec!["mall".to_string()]);
                assert_eq!(grant, vec![PermissionId::new(5)]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_ids_and_out_of_range_timeout() {
        assert!(Cli::try_parse_from(["mallhub-admin", "show", "abc"]).is_err());
        assert!(Cli::try_parse_from(["mallhub-admin", "roles", "--timeout-secs", "0"]).is_err());
        assert!(Cli::try_parse_from(["mallhub-admin", "assign", "3"]).is_err());
    }

    #[test]
    fn flags_override_environment_config() {
        let cli = Cli::try_parse_from([
            "mallhub-admin",
            "permissions",
            "--api-url",
            "http://mall.test/api",
            "--token",
            "tok",
            "--timeout-secs",
            "30",
        ])
        .unwrap();

        let config = cli.client_config();
        assert_eq!(config.base_url, "http://mall.test/api");
        assert_eq!(config.token.as_deref(), Some("tok"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
