mod config;
mod export_cmd;
mod list_cmd;
mod scope;

use clap::{ArgAction, Parser, ValueEnum};
use shiplog_core::config::ExportFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shiplog",
    about = "Export Claude Code sessions as self-contained HTML",
    disable_version_flag = true
)]
struct Cli {
    /// Session title, ID prefix, or project substring to export
    query: Option<String>,

    /// Show all sessions (ignore project context)
    #[arg(short = 'a', long)]
    all: bool,

    /// Output file path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Export by session UUID
    #[arg(long)]
    session_id: Option<String>,

    /// List sessions
    #[arg(short = 'l', long)]
    list: bool,

    /// Export format (defaults to the configured one, else html)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Show version
    #[arg(short = 'v', long, action = ArgAction::SetTrue)]
    version: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Html,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Html => ExportFormat::Html,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if cli.version {
        println!("shiplog {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = config::load_settings()?;
    let scope = scope::Scope::resolve(&settings, cli.all || settings.all_projects);

    println!("  Scanning sessions ({})...", scope.label);
    let sessions = scope.find_sessions(&settings.projects_dir)?;

    let query = [cli.session_id.as_deref(), cli.query.as_deref()]
        .into_iter()
        .flatten()
        .find(|q| !q.is_empty())
        .map(str::to_string);
    match query {
        Some(query) if !cli.list => {
            let format = cli.format.map(ExportFormat::from).unwrap_or(settings.format);
            let options = export_cmd::ExportOptions {
                query,
                output: cli.output,
                format,
            };
            export_cmd::run_export(&settings, &scope, sessions, &options)
        }
        _ => {
            list_cmd::run_list(&sessions, &scope);
            Ok(())
        }
    }
}
