//! Command dispatch and per-command handlers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::input;
use crate::application::materialize::{MaterializeOptions, Materializer, OnExists};
use crate::application::{ApplicationError, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render;
use crate::config::{self, Settings};
use crate::domain::parse_tree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Create {
            file,
            dest,
            dry_run,
            overwrite,
            collapse_root,
        }) => create(
            file.as_deref(),
            dest.as_deref(),
            *dry_run,
            *overwrite,
            *collapse_root,
        ),
        Some(Commands::Parse { file, json }) => parse(file.as_deref(), *json),
        Some(Commands::Config { command }) => config_command(command),
        Some(Commands::Completion { shell }) => {
            completions(*shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    }
}

#[instrument(level = "debug")]
fn create(
    file: Option<&Path>,
    dest: Option<&str>,
    dry_run: bool,
    overwrite: bool,
    collapse_root: bool,
) -> CliResult<()> {
    let text = input::capture(file)?;
    let nodes = parse_tree(&text);
    if nodes.is_empty() {
        return Err(CliError::EmptyInput);
    }

    let settings = Settings::load(Some(Path::new(".")))?;
    let dest = resolve_dest(dest, &settings)?;
    let options = MaterializeOptions {
        dry_run,
        on_exists: if overwrite {
            OnExists::Overwrite
        } else {
            settings.on_exists
        },
        collapse_root: collapse_root || settings.collapse_root,
    };
    debug!(dest = %dest.display(), ?options, "materializing");

    if dry_run {
        output::header("Would create:");
        print!(
            "{}",
            render::render_forest(&dest.display().to_string(), &nodes)
        );
    }

    let report = Materializer::new(&dest, options).materialize(&nodes)?;

    for name in &report.unsafe_paths {
        output::warning(&format!("skipped unsafe path: {}", name));
    }
    for path in &report.skipped {
        output::detail(&format!("exists, skipped: {}", path.display()));
    }

    let summary = format!(
        "{} director{}, {} file{} in {}",
        report.dirs_created,
        if report.dirs_created == 1 { "y" } else { "ies" },
        report.files_created,
        if report.files_created == 1 { "" } else { "s" },
        dest.display()
    );
    if dry_run {
        output::action("dry-run", &summary);
    } else {
        output::success(&summary);
    }
    Ok(())
}

#[instrument(level = "debug")]
fn parse(file: Option<&Path>, json: bool) -> CliResult<()> {
    let text = input::capture(file)?;
    let nodes = parse_tree(&text);
    if nodes.is_empty() {
        return Err(CliError::EmptyInput);
    }

    if json {
        let rendered =
            serde_json::to_string_pretty(&nodes).map_err(|e| ApplicationError::OperationFailed {
                context: "serialize tree".to_string(),
                source: Box::new(e),
            })?;
        output::info(&rendered);
    } else {
        print!("{}", render::render_forest(".", &nodes));
    }
    Ok(())
}

fn config_command(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(Path::new(".")))?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                config::global_config_path().ok_or_else(|| {
                    CliError::InvalidArgs("cannot determine config directory".to_string())
                })?
            } else {
                config::local_config_path(Path::new("."))
            };
            if path.exists() {
                return Err(CliError::InvalidArgs(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_path_context("create config dir", parent)?;
                }
            }
            fs::write(&path, Settings::template()).with_path_context("write config", &path)?;
            output::action("created", &path.display());
            Ok(())
        }
        ConfigCommands::Path => {
            if let Some(global) = config::global_config_path() {
                output::detail(&format!("global: {}{}", global.display(), marker(&global)));
            }
            let local = config::local_config_path(Path::new("."));
            output::detail(&format!("local:  {}{}", local.display(), marker(&local)));
            Ok(())
        }
    }
}

fn completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Flag wins over config; both go through shell expansion so `~` and
/// `$VAR` work in either place.
fn resolve_dest(flag: Option<&str>, settings: &Settings) -> CliResult<PathBuf> {
    let raw = flag
        .map(str::to_string)
        .unwrap_or_else(|| settings.dest.to_string_lossy().into_owned());
    let expanded = shellexpand::full(&raw)
        .map_err(|e| CliError::InvalidArgs(format!("destination {raw:?}: {e}")))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

fn marker(path: &Path) -> &'static str {
    if path.exists() {
        ""
    } else {
        " (not found)"
    }
}
