//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{NotesService, ParsedDocument};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{normalize_punctuation, Summary};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Input path meaning "read stdin".
const STDIN: &str = "-";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?,
    };

    match &cli.command {
        Commands::Parse {
            input,
            output,
            compact,
            placeholder,
            no_trailing_gloss,
            strict,
        } => {
            let mut settings = Settings::load(Some(&project_dir))?;
            if let Some(placeholder) = placeholder {
                settings.parser.definition_placeholder = placeholder.clone();
            }
            if *no_trailing_gloss {
                settings.parser.trailing_gloss = false;
            }
            if *compact {
                settings.output.pretty = false;
            }
            parse(settings, input, output.as_deref(), *strict)
        }
        Commands::Stats { input } => stats(Settings::load(Some(&project_dir))?, input),
        Commands::Normalize { input } => normalize(Settings::load(Some(&project_dir))?, input),
        Commands::Config { command } => config(command, &project_dir),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "etymon", &mut io::stdout());
            Ok(())
        }
    }
}

fn read_stdin() -> CliResult<String> {
    io::read_to_string(io::stdin()).map_err(|e| InfraError::io("read stdin", e).into())
}

fn load_documents(notes: &NotesService, input: &Path) -> CliResult<Vec<ParsedDocument>> {
    if input == Path::new(STDIN) {
        let text = read_stdin()?;
        return Ok(vec![notes.parse_text(STDIN, &text)]);
    }
    Ok(notes.parse_path(input)?)
}

#[instrument(skip(settings))]
fn parse(settings: Settings, input: &Path, output: Option<&Path>, strict: bool) -> CliResult<()> {
    let container = ServiceContainer::new(settings);
    let notes = &container.notes;

    let categories = ParsedDocument::flatten(load_documents(notes, input)?);
    let summary = notes.summarize(&categories);
    debug!("parse: {}", summary);

    if summary.is_empty() {
        if strict {
            return Err(CliError::NothingParsed(input.display().to_string()));
        }
        output::warning(&format!("no categories parsed from {}", input.display()));
    }

    let target: PathBuf = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| container.settings.output.path.clone());
    let pretty = container.settings.output.pretty;

    if target == Path::new(STDIN) {
        output::info(&notes.to_json(&categories, pretty)?);
    } else {
        notes.export_json(&categories, &target, pretty)?;
        output::success(&format!("{} → {}", summary, target.display()));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn stats(settings: Settings, input: &Path) -> CliResult<()> {
    let container = ServiceContainer::new(settings);
    let notes = &container.notes;

    let documents = load_documents(notes, input)?;
    let mut total = Summary::default();
    for document in &documents {
        let summary = notes.summarize(&document.categories);
        output::header(&document.source.display());
        output::detail(&summary);
        if !document.categories.is_empty() {
            output::detail(&document.categories.iter().map(|c| &c.name).join(", "));
        }
        total = total + summary;
    }
    if documents.len() > 1 {
        output::action("total", &total);
    }
    Ok(())
}

fn normalize(settings: Settings, input: &Path) -> CliResult<()> {
    if input == Path::new(STDIN) {
        print!("{}", normalize_punctuation(&read_stdin()?));
        return Ok(());
    }

    let container = ServiceContainer::new(settings);
    if container.fs.is_dir(input) {
        return Err(CliError::Usage(format!(
            "normalize expects a file, got directory {}",
            input.display()
        )));
    }
    print!("{}", container.notes.normalize_file(input)?);
    Ok(())
}

fn config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let describe = |path: &Path| {
                let state = if path.exists() { "exists" } else { "not found" };
                format!("{} ({})", path.display(), state)
            };
            match global_config_path() {
                Some(path) => output::action("global", &describe(&path)),
                None => output::action("global", "unavailable"),
            }
            output::action("local", &describe(&local_config_path(project_dir)));
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
