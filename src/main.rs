use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tokio::sync::Mutex;
use trackmerge::{cli, config, error, types::PkceToken, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Add linked tracks to a playlist
    Import(ImportOptions),

    /// Rank chat members by the links they shared
    Contributions(ContributionsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ImportOptions {
    #[command(subcommand)]
    pub command: ImportSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ImportSubcommand {
    /// Import tracks linked anywhere in a text file
    File(ImportFileOpts),

    /// Import tracks linked in a chat history (JSON or text export)
    Messages(ImportMessagesOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct ImportFileOpts {
    /// Text file to scan, defaults to DATA_FILE
    pub path: Option<PathBuf>,

    /// Target playlist id or link, defaults to SPOTIFY_PLAYLIST_ID
    #[clap(long, value_parser = utils::parse_playlist_ref)]
    pub playlist: Option<String>,

    /// Only show what would be added
    #[clap(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportMessagesOpts {
    /// Chat history to scan
    pub path: PathBuf,

    /// Target playlist id or link, defaults to SPOTIFY_PLAYLIST_ID
    #[clap(long, value_parser = utils::parse_playlist_ref)]
    pub playlist: Option<String>,

    /// Only scan messages containing this text (case-insensitive)
    #[clap(long)]
    pub search: Option<String>,

    /// Maximum number of messages to scan
    #[clap(long)]
    pub limit: Option<usize>,

    /// Only show what would be added
    #[clap(long)]
    pub dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ContributionsOptions {
    /// Chat history: JSON export or `[timestamp] author: message` lines
    pub path: PathBuf,

    /// Directory for the generated reports
    #[clap(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Number of contributors shown in the summary table
    #[clap(long, default_value_t = 10)]
    pub top: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Import(opt) => match opt.command {
            ImportSubcommand::File(o) => cli::import_file(o.path, o.playlist, o.dry_run).await,
            ImportSubcommand::Messages(o) => {
                cli::import_messages(o.path, o.playlist, o.search, o.limit, o.dry_run).await
            }
        },
        Command::Contributions(opt) => cli::contributions(opt.path, opt.output_dir, opt.top).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
