use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cli::{Cli, Command, ExportArgs, GenerateArgs, RenderArgs, ShowArgs};
use crate::history::{FileKeyValueStore, HistoryStore};
use crate::llm::{ErrorKind, GeminiClient};
use crate::session::{GenerateOutcome, SessionController};
use crate::{clipboard, credentials, output, paths, render};

const STDIN_MARKER: &str = "-";
const INTERRUPTED_EXIT: u8 = 130;

pub async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Render(args) => render_file(args),
        Command::Generate(args) => {
            let mut controller = open_session(cli.timeout_secs)?;
            generate(&mut controller, args).await
        }
        Command::History => {
            let controller = open_session(cli.timeout_secs)?;
            output::print_history(controller.history());
            Ok(ExitCode::SUCCESS)
        }
        Command::Show(args) => show(&mut open_session(cli.timeout_secs)?, args),
        Command::Export(args) => export(&mut open_session(cli.timeout_secs)?, args),
        Command::Clear => clear(&mut open_session(cli.timeout_secs)?),
    }
}

fn open_session(timeout_secs: u64) -> Result<SessionController> {
    paths::ensure_dirs()?;
    let client = GeminiClient::new(Duration::from_secs(timeout_secs))?;
    debug!(model = client.model_name(), store = %paths::store_dir().display(), "starting session");
    let history = HistoryStore::open(Box::new(FileKeyValueStore::new(paths::store_dir())));
    Ok(SessionController::new(Box::new(client), history))
}

async fn generate(controller: &mut SessionController, args: GenerateArgs) -> Result<ExitCode> {
    if args.before.as_os_str() == STDIN_MARKER && args.after.as_os_str() == STDIN_MARKER {
        return Err(anyhow!("only one of --before and --after can read from stdin"));
    }
    let before_code = read_source(&args.before)?;
    let after_code = read_source(&args.after)?;
    let filename = args
        .filename
        .clone()
        .unwrap_or_else(|| args.after.display().to_string());
    let api_key = credentials::resolve(args.key.as_deref()).unwrap_or_default();

    let cancel = CancellationToken::new();
    let interrupt = cancel_on_interrupt(cancel.clone());
    eprintln!("Generating change notes for {filename}...");
    let outcome = controller
        .generate(&api_key, &filename, &before_code, &after_code, &cancel)
        .await;
    interrupt.abort();

    let code = match outcome {
        GenerateOutcome::Succeeded { .. } => {
            let notes = controller.state().change_notes.clone();
            output::print_notes(&notes);
            if args.copy
                && let Err(err) = clipboard::copy_notes(&notes)
            {
                warn!(error = %err, "failed to copy notes");
                eprintln!("warning: failed to copy notes: {err}");
            }
            if let Some(path) = args.html.as_deref() {
                fs::write(path, controller.rendered_notes().to_html())
                    .with_context(|| format!("failed to write HTML: {}", path.display()))?;
            }
            if let Some(dir) = args.export.as_deref()
                && let Some(path) = controller.export_current(dir)?
            {
                eprintln!("Exported to {}", path.display());
            }
            ExitCode::SUCCESS
        }
        GenerateOutcome::Failed(failure) if failure.kind == ErrorKind::Cancelled => {
            ExitCode::from(INTERRUPTED_EXIT)
        }
        GenerateOutcome::Failed(failure) => {
            let notes = &controller.state().change_notes;
            if !notes.is_empty() {
                output::print_notes(notes);
            }
            output::print_failure(&failure);
            ExitCode::FAILURE
        }
    };
    controller.acknowledge();
    Ok(code)
}

fn show(controller: &mut SessionController, args: ShowArgs) -> Result<ExitCode> {
    if !controller.select_history(&args.id) {
        eprintln!("error: history entry '{}' not found", args.id);
        return Ok(ExitCode::FAILURE);
    }
    if args.html {
        println!("{}", controller.rendered_notes().to_html());
    } else {
        output::print_notes(&controller.state().change_notes);
    }
    Ok(ExitCode::SUCCESS)
}

fn export(controller: &mut SessionController, args: ExportArgs) -> Result<ExitCode> {
    let id = match args.id {
        Some(id) => id,
        None => match controller.history().first() {
            Some(entry) => entry.id.clone(),
            None => {
                eprintln!("No history yet.");
                return Ok(ExitCode::FAILURE);
            }
        },
    };
    if !controller.select_history(&id) {
        eprintln!("error: history entry '{}' not found", id);
        return Ok(ExitCode::FAILURE);
    }
    match controller.export_current(&args.dir)? {
        Some(path) => {
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("error: history entry '{}' has no notes to export", id);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn clear(controller: &mut SessionController) -> Result<ExitCode> {
    if controller.clear_history() {
        println!("History cleared.");
        return Ok(ExitCode::SUCCESS);
    }
    if let Some(message) = controller.state().error_message() {
        eprintln!("error: {message}");
    }
    Ok(ExitCode::FAILURE)
}

fn render_file(args: RenderArgs) -> Result<ExitCode> {
    let markdown = read_source(&args.path)?;
    println!("{}", render::render(&markdown).to_html());
    Ok(ExitCode::SUCCESS)
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN_MARKER {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .with_context(|| "failed to read stdin")?;
        return Ok(content);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn cancel_on_interrupt(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[tokio::test]
    async fn render_runs_without_opening_a_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "## Summary\n* done").unwrap();
        let cli = Cli::parse_from(["change-notes", "render", path.to_str().unwrap()]);

        let code = run(cli).await.unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[tokio::test]
    async fn render_reports_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "change-notes",
            "render",
            dir.path().join("missing.md").to_str().unwrap(),
        ]);

        let err = run(cli).await.unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
