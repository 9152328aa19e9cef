use crate::cache::CharacterCache;
use crate::prelude::{println, *};
use crate::service::CatalogService;
use crate::transport::HttpTransport;
use catalog_core::model::Character;
use colored::Colorize;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SearchOptions {
    /// Name, or part of a name, to look for
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Searching for {:?}...", options.query);
    }

    let transport = HttpTransport::from_global(&global).wrap_err("Failed to build HTTP client")?;
    let mut cache = CharacterCache::new();
    let mut service = CatalogService::new(transport, &mut cache);

    let characters = service.search(&options.query).await;

    if options.json {
        let json = serde_json::to_string_pretty(&characters)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_search_text(&options.query, &characters));
    }

    Ok(())
}

fn format_search_text(query: &str, characters: &[Character]) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "\n{}\n\n",
        format!("Search {:?}: {} found", query, characters.len())
            .bright_cyan()
            .bold()
    ));

    if characters.is_empty() {
        result.push_str(&format!("{}\n", "No characters matched.".yellow()));
    }

    for character in characters {
        result.push_str(&format!(
            "  {} {}\n",
            format!("[{}]", character.id).yellow().bold(),
            character
        ));
    }

    result.push('\n');
    result
}
