use std::collections::HashMap;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use worklogz_core::services::{AccessSyncService, LocalCache, MenuService, RoutePermissionService, SyncOutcome};
use worklogz_core::{AccessPaths, MenuItem, RouteMethod, RouteRule, Scope};
use worklogz_infrastructure::{BackendClient, FileKeyValueStore};
use worklogz_shared::config::ClientConfig;
use worklogz_shared::telemetry::LogOutput;
use worklogz_shared::utils::split_user_ids;

#[derive(Parser, Debug)]
#[command(
    name = "worklogz-cli",
    version,
    about = "Worklogz - sidebar access and route permission client"
)]
struct Cli {
    /// Backend base URL (overrides backend.base_url)
    #[arg(long)]
    backend: Option<String>,

    /// Local cache file (overrides cache.path)
    #[arg(long)]
    cache: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sidebar access per user and scope
    #[command(subcommand)]
    Access(AccessCommand),

    /// Route permissions per user
    #[command(subcommand)]
    Routes(RoutesCommand),

    /// Sidebar menu per scope
    #[command(subcommand)]
    Menu(MenuCommand),
}

#[derive(Args, Debug)]
struct PathsArgs {
    /// Allowed paths, comma separated. Empty means the scope's empty-list rule
    #[arg(long, value_delimiter = ',', conflicts_with = "unrestricted")]
    paths: Vec<String>,

    /// Store `null`: no restriction
    #[arg(long)]
    unrestricted: bool,
}

impl PathsArgs {
    fn into_paths(self) -> AccessPaths {
        if self.unrestricted {
            None
        } else {
            Some(self.paths)
        }
    }
}

#[derive(Subcommand, Debug)]
enum AccessCommand {
    Get {
        #[arg(long)]
        user: String,
        #[arg(long, value_parser = parse_scope)]
        scope: Scope,
    },
    Set {
        #[arg(long)]
        user: String,
        #[arg(long, value_parser = parse_scope)]
        scope: Scope,
        #[command(flatten)]
        paths: PathsArgs,
    },
    BulkGet {
        /// Comma separated user ids
        #[arg(long)]
        users: String,
        #[arg(long, value_parser = parse_scope)]
        scope: Scope,
    },
    BulkSet {
        /// Comma separated user ids
        #[arg(long)]
        users: String,
        #[arg(long, value_parser = parse_scope)]
        scope: Scope,
        #[command(flatten)]
        paths: PathsArgs,
    },
}

#[derive(Subcommand, Debug)]
enum RoutesCommand {
    Get {
        #[arg(long)]
        user: String,
    },
    /// Replace a user's rules, e.g. `--rule /users/:id=GET,POST --rule /reports`
    Set {
        #[arg(long)]
        user: String,
        #[arg(long = "rule", value_parser = parse_rule)]
        rules: Vec<RouteRule>,
    },
    BulkGet {
        #[arg(long)]
        users: String,
    },
    /// Exit status 1 when the request is denied
    Check {
        #[arg(long)]
        user: String,
        #[arg(long)]
        path: String,
        #[arg(long, default_value = "GET", value_parser = parse_method)]
        method: RouteMethod,
    },
}

#[derive(Subcommand, Debug)]
enum MenuCommand {
    Show {
        #[arg(long, value_parser = parse_scope)]
        scope: Scope,
    },
    /// The menu as the user would see it
    Visible {
        #[arg(long)]
        user: String,
        #[arg(long, value_parser = parse_scope)]
        scope: Scope,
    },
}

fn parse_scope(s: &str) -> Result<Scope, String> {
    s.parse().map_err(|e: worklogz_core::DomainError| e.to_string())
}

fn parse_method(s: &str) -> Result<RouteMethod, String> {
    s.parse().map_err(|e: worklogz_core::DomainError| e.to_string())
}

/// `PATH[=METHOD,...]`, `!PATH...` for a deny rule. No methods means ALL.
fn parse_rule(s: &str) -> Result<RouteRule, String> {
    let (denied, s) = match s.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let rule = match s.split_once('=') {
        Some((path, methods)) => {
            let methods = methods
                .split(',')
                .filter(|m| !m.trim().is_empty())
                .map(parse_method)
                .collect::<Result<Vec<_>, _>>()?;
            if methods.is_empty() {
                return Err(format!("rule {} has no methods", s));
            }
            RouteRule::new(path, methods)
        }
        None => RouteRule::allow_all(s),
    };

    if !rule.path.starts_with('/') {
        return Err(format!("rule path must start with '/': {}", rule.path));
    }

    Ok(if denied { rule.denied() } else { rule })
}

struct Clients {
    access: Arc<AccessSyncService>,
    routes: RoutePermissionService,
    menu: MenuService,
}

fn connect(config: &ClientConfig) -> Result<Clients> {
    let store = Arc::new(FileKeyValueStore::open(&config.cache.path)?);
    info!("Backend {} (cache {})", config.backend.base_url, store.path().display());

    let cache = Arc::new(LocalCache::new(store));
    let backend = Arc::new(BackendClient::from_settings(&config.backend)?);
    let timeout = Duration::from_millis(config.backend.request_timeout_ms);

    let access = Arc::new(AccessSyncService::new(backend.clone(), cache.clone(), timeout));
    let routes = RoutePermissionService::new(backend.clone(), cache.clone(), timeout);
    let menu = MenuService::new(backend, cache, access.clone(), timeout);

    Ok(Clients { access, routes, menu })
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(outcome: SyncOutcome) {
    match outcome {
        SyncOutcome::Synced => println!("saved"),
        SyncOutcome::LocalOnly => println!("saved locally, backend unavailable"),
    }
}

fn print_menu(menu: &MenuService, items: &[MenuItem]) {
    for item in items {
        let path = item.path.as_deref().unwrap_or("");
        match menu.icon(item) {
            Some(icon) => println!("{} {} ({})", item.label, path, icon.name),
            None => println!("{} {}", item.label, path),
        }
        for sub in &item.sub_items {
            if sub.is_section {
                println!("    # {}", sub.label);
            } else {
                println!("    {} {}", sub.label, sub.path.as_deref().unwrap_or(""));
            }
        }
    }
}

async fn run(cli: Cli, clients: Clients) -> Result<ExitCode> {
    match cli.command {
        Command::Access(command) => match command {
            AccessCommand::Get { user, scope } => {
                print_json(&clients.access.get(&user, scope).await)?;
            }
            AccessCommand::Set { user, scope, paths } => {
                report(clients.access.set(&user, scope, paths.into_paths()).await);
            }
            AccessCommand::BulkGet { users, scope } => {
                let users = split_user_ids(&users);
                print_json(&clients.access.bulk_get(&users, scope).await)?;
            }
            AccessCommand::BulkSet { users, scope, paths } => {
                let users = split_user_ids(&users);
                if users.is_empty() {
                    bail!("--users must name at least one user");
                }
                report(clients.access.bulk_set(&users, scope, paths.into_paths()).await);
            }
        },
        Command::Routes(command) => match command {
            RoutesCommand::Get { user } => {
                print_json(&clients.routes.get(&user).await)?;
            }
            RoutesCommand::Set { user, rules } => {
                report(clients.routes.set(&user, rules).await);
            }
            RoutesCommand::BulkGet { users } => {
                let users = split_user_ids(&users);
                let map: HashMap<_, _> = clients.routes.bulk_get(&users).await;
                print_json(&map)?;
            }
            RoutesCommand::Check { user, path, method } => {
                if clients.routes.check(&user, &path, method).await {
                    println!("allowed");
                } else {
                    println!("denied");
                    return Ok(ExitCode::FAILURE);
                }
            }
        },
        Command::Menu(command) => match command {
            MenuCommand::Show { scope } => {
                let items = clients.menu.load(scope).await;
                print_menu(&clients.menu, &items);
            }
            MenuCommand::Visible { user, scope } => {
                let items = clients.menu.visible_menu(&user, scope).await;
                print_menu(&clients.menu, &items);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = ClientConfig::load()?;
    if let Some(backend) = cli.backend.clone() {
        config.backend.base_url = backend;
    }
    if let Some(cache) = cli.cache.clone() {
        config.cache.path = cache;
    }

    // stdout carries command output only
    let _log_guard = worklogz_shared::telemetry::init_telemetry(&config.log, LogOutput::Stderr)?;

    let clients = connect(&config)?;
    run(cli, clients).await
}
