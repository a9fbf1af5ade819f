use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use kiroku_api::{EntryUpdate, UpdateStatus};

#[derive(Debug, Parser)]
#[command(name = "kiroku", version, about = "MyAnimeList XML API client")]
pub struct Cli {
    /// Account name; falls back to `account.username` in the config file.
    #[arg(long, short, global = true)]
    pub username: Option<String>,

    #[arg(long, env = "MAL_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Read this config file instead of the default location.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Api(ApiCommand),
    /// Inspect or create the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Commands that talk to the service.
#[derive(Debug, Subcommand)]
pub enum ApiCommand {
    /// Check the credentials and print the account.
    Verify,
    /// Search anime by title.
    Search { query: String },
    /// Print the account's full anime list.
    List,
    /// Add an anime to the list.
    Add {
        id: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Update an anime already on the list.
    Update {
        id: u64,
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Remove an anime from the list.
    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    Path,
    Init,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PayloadArgs {
    #[arg(long, default_value_t = 0)]
    pub episode: u32,
    /// Numeric code (1, 2, 3, 4, 6) or keyword (watching, completed, ...).
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub score: u32,
    #[arg(long, default_value_t = 0)]
    pub storage_type: i32,
    #[arg(long, default_value_t = 0.0)]
    pub storage_value: f64,
    #[arg(long, default_value_t = 0)]
    pub times_rewatched: u32,
    #[arg(long, default_value_t = 0)]
    pub rewatch_value: i32,
    /// YYYY-MM-DD
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub finish: Option<NaiveDate>,
    #[arg(long, default_value_t = 0)]
    pub priority: i32,
    #[arg(long)]
    pub enable_discussion: bool,
    #[arg(long)]
    pub enable_rewatching: bool,
    #[arg(long, default_value = "")]
    pub comments: String,
    #[arg(long, default_value = "")]
    pub fansub_group: String,
    /// Repeat for several tags.
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

impl PayloadArgs {
    pub fn into_update(self) -> EntryUpdate {
        let status = match self.status {
            Some(s) => match s.parse::<i32>() {
                Ok(code) => UpdateStatus::Code(code),
                Err(_) => UpdateStatus::Name(s),
            },
            None => UpdateStatus::default(),
        };
        EntryUpdate {
            episode: self.episode,
            status,
            score: self.score,
            storage_type: self.storage_type,
            storage_value: self.storage_value,
            times_rewatched: self.times_rewatched,
            rewatch_value: self.rewatch_value,
            start_date: self.start,
            finish_date: self.finish,
            priority: self.priority,
            enable_discussion: self.enable_discussion,
            enable_rewatching: self.enable_rewatching,
            comments: self.comments,
            fansub_group: self.fansub_group,
            tags: self.tags,
        }
    }
}
