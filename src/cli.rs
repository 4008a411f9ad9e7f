use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "change-notes",
    version,
    about = "LLM-powered change notes for before/after code"
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Timeout for the generation request, in seconds
    #[arg(long = "timeout-secs", default_value_t = 120, global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate change notes for a file
    Generate(GenerateArgs),
    /// List previous generations, most recent first
    History,
    /// Print the notes of a history entry
    Show(ShowArgs),
    /// Write a history entry's notes to a markdown file
    Export(ExportArgs),
    /// Delete all history entries
    Clear,
    /// Render a markdown file to HTML
    Render(RenderArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// File with the code before the change ("-" reads stdin)
    #[arg(short = 'b', long = "before")]
    pub before: PathBuf,

    /// File with the code after the change ("-" reads stdin)
    #[arg(short = 'a', long = "after")]
    pub after: PathBuf,

    /// Name shown to the model (defaults to the --after path)
    #[arg(short = 'f', long = "filename")]
    pub filename: Option<String>,

    /// Gemini API key (overrides GEMINI_API_KEY / GOOGLE_API_KEY)
    #[arg(short = 'k', long = "key")]
    pub key: Option<String>,

    /// Copy generated notes to clipboard
    #[arg(short = 'c', long = "copy")]
    pub copy: bool,

    /// Also write the rendered HTML to this path
    #[arg(long = "html")]
    pub html: Option<PathBuf>,

    /// Also export the notes as markdown into this directory
    #[arg(long = "export")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// History entry id
    pub id: String,

    /// Print rendered HTML instead of markdown
    #[arg(long = "html")]
    pub html: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// History entry id (defaults to the most recent entry)
    pub id: Option<String>,

    /// Output directory
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Markdown file ("-" reads stdin)
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verifies_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_arguments() {
        let cli = Cli::parse_from([
            "change-notes",
            "generate",
            "--before",
            "old.ts",
            "--after",
            "new.ts",
            "--copy",
        ]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate command");
        };
        assert_eq!(args.before, PathBuf::from("old.ts"));
        assert_eq!(args.filename, None);
        assert!(args.copy);
        assert_eq!(cli.timeout_secs, 120);
    }
}
