//! Command dispatch: one handler per subcommand

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::render::{render_rows, render_users, RenderOptions};
use crate::application::services::{BrowseResult, BrowseService, DatasetService};
use crate::cli::args::{Cli, Commands, ConfigCommands, ViewArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::ViewState;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None => Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e).into()),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => {
            let cwd = current_dir()?;
            let container = load_container(&cwd)?;
            cmd_config(&container, command, &cwd)
        }
        Some(Commands::View(args)) => {
            let container = load_container(&current_dir()?)?;
            let service = container.browse_service(cli.data_file.as_deref())?;
            cmd_view(&container.settings, &service, args)
        }
        Some(Commands::Countries) => cmd_list(browse_service(cli)?.countries()),
        Some(Commands::Genres) => cmd_list(browse_service(cli)?.genres()),
        Some(Commands::Info) => cmd_info(&browse_service(cli)?),
    }
}

fn current_dir() -> CliResult<PathBuf> {
    std::env::current_dir().map_err(|e| InfraError::io("current directory", e).into())
}

/// Settings are read relative to the working directory (local `.watchtree.toml`).
fn load_container(cwd: &Path) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(Settings::load(Some(cwd))?))
}

fn browse_service(cli: &Cli) -> CliResult<BrowseService> {
    let container = load_container(&current_dir()?)?;
    Ok(container.browse_service(cli.data_file.as_deref())?)
}

/// Fold config presets and command-line toggles into a view state.
///
/// Presets are toggled on first, then each command-line value toggles, so
/// repeating a preset on the command line switches it off.
pub fn build_view_state(settings: &Settings, args: &ViewArgs) -> ViewState {
    let mut state = ViewState::new();
    state.set_group_by(args.group_by.map(Into::into).unwrap_or(settings.group_by));
    state.set_search_term(args.search.as_str());

    for country in settings.filters.countries.iter().chain(&args.countries) {
        state.toggle_country(country);
    }
    for genre in settings.filters.genres.iter().chain(&args.genres) {
        state.toggle_genre(genre);
    }
    for key in &args.expand {
        state.toggle_expanded(key);
    }
    state
}

#[instrument(skip(settings, service))]
fn cmd_view(settings: &Settings, service: &BrowseService, args: &ViewArgs) -> CliResult<()> {
    let mut state = build_view_state(settings, args);
    let result = service.view(&state);
    if result.is_empty() && !state.is_searching() {
        output::warning("no rows match the current filters");
    }

    if args.expand_all || settings.display.expand_all {
        state.expanded_items = BrowseService::expandable_keys(&result);
    }
    debug!("cmd_view: {} expanded keys", state.expanded_items.len());

    let options = RenderOptions {
        show_watch_history: settings.display.show_watch_history && !args.no_history,
    };

    match &result {
        BrowseResult::Grouped(rows) => {
            output::info(&render_rows(rows, state.group_by, &state.expanded_items, options));
        }
        BrowseResult::Search(users) => {
            output::header(&format!(
                "{} users matching \"{}\"",
                users.len(),
                state.search_term
            ));
            output::info(&render_users(users, &state.expanded_items, options));
        }
    }
    Ok(())
}

fn cmd_list(names: Vec<String>) -> CliResult<()> {
    if names.is_empty() {
        output::warning("dataset is empty");
    }
    output::names(&names);
    Ok(())
}

#[instrument(skip(service))]
fn cmd_info(service: &BrowseService) -> CliResult<()> {
    let summary = DatasetService::summary(service.dataset());
    output::header("Dataset");
    output::field("countries", 11, &summary.countries);
    output::field("genres", 11, &summary.genres);
    output::field("users", 11, &summary.users);
    output::field("watch items", 11, &summary.watch_items);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    cwd: &Path,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(cwd)
            };
            if container.fs.exists(&path) {
                return Err(InfraError::ConfigExists(path).into());
            }
            container
                .fs
                .ensure_parent(&path)
                .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
            container
                .fs
                .write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::field("global", 6, &path.display()),
                None => output::field("global", 6, &"<unavailable>"),
            }
            output::field("local", 6, &local_config_path(cwd).display());
            Ok(())
        }
    }
}
