use crate::prelude::{eprintln, *};
use clap::Parser;

mod cache;
mod error;
mod get;
mod list;
mod prelude;
mod search;
mod service;
mod stats;
mod transport;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse, filter and summarize the Rick and Morty character directory"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the character API
    #[clap(
        long,
        env = "CATALOG_API_BASE",
        global = true,
        default_value = transport::DEFAULT_API_BASE
    )]
    api_base: String,

    /// HTTP request timeout in seconds
    #[clap(long, env = "CATALOG_TIMEOUT", global = true, default_value = "10")]
    timeout: u64,

    /// Whether to display additional information.
    #[clap(long, env = "CATALOG_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List one page of characters with optional filters and sorting
    List(crate::list::ListOptions),

    /// Show a single character card
    Get(crate::get::GetOptions),

    /// Search characters by name
    Search(crate::search::SearchOptions),

    /// Summary statistics over one or more pages
    Stats(crate::stats::StatsOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    if app.global.verbose {
        eprintln!("Character API Base: {}", app.global.api_base);
    }

    match app.command {
        SubCommands::List(options) => crate::list::run(options, app.global).await,
        SubCommands::Get(options) => crate::get::run(options, app.global).await,
        SubCommands::Search(options) => crate::search::run(options, app.global).await,
        SubCommands::Stats(options) => crate::stats::run(options, app.global).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_parses_global_flags_after_subcommand() {
        let app = App::try_parse_from(["catalog", "stats", "--pages", "2", "--verbose"]).unwrap();

        assert!(app.global.verbose);
        match app.command {
            SubCommands::Stats(options) => assert_eq!(options.pages, 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
