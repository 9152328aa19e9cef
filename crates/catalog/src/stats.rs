use crate::cache::CharacterCache;
use crate::prelude::{println, *};
use crate::service::CatalogService;
use crate::transport::HttpTransport;
use catalog_core::stats::CatalogStatistics;
use colored::Colorize;
use std::collections::BTreeMap;

/// Species rows shown in the text report
const TOP_SPECIES: usize = 5;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct StatsOptions {
    /// Number of pages to aggregate, starting from the first
    #[arg(short, long, env = "CATALOG_STATS_PAGES", default_value = "1")]
    pub pages: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: StatsOptions, global: crate::Global) -> Result<()> {
    if options.pages == 0 {
        return Err(eyre!("--pages must be at least 1"));
    }

    if global.verbose {
        println!("Aggregating {} page(s)...", options.pages);
    }

    let transport = HttpTransport::from_global(&global).wrap_err("Failed to build HTTP client")?;
    let mut cache = CharacterCache::new();
    let mut service = CatalogService::new(transport, &mut cache);

    let characters = service.get_pages(options.pages).await;
    info!("Fetched {} characters", characters.len());

    let stats = service.statistics(Some(characters.as_slice())).await;

    if options.json {
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_stats_text(&stats));
    }

    if cache.is_empty() {
        warn!("No characters were fetched");
    } else {
        debug!("Cache holds {} characters", cache.len());
    }

    Ok(())
}

/// Distribution entries, largest first, ties by label
fn ranked(distribution: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = distribution
        .iter()
        .map(|(label, count)| (label.as_str(), *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

fn push_section(result: &mut String, title: &str, rows: &[(&str, usize)]) {
    result.push_str(&format!("\n{}:\n", title.bright_white().bold()));
    for (label, count) in rows {
        result.push_str(&format!(
            "  {}: {}\n",
            label.green(),
            count.to_string().bright_yellow()
        ));
    }
}

fn format_stats_text(stats: &CatalogStatistics) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(50).bright_cyan()));
    result.push_str(&format!("{}\n", "CATALOG STATISTICS".bright_cyan().bold()));
    result.push_str(&format!("{}\n", "=".repeat(50).bright_cyan()));
    result.push_str(&format!(
        "{}: {}\n",
        "Total".bright_white().bold(),
        stats.total_characters.to_string().bright_cyan()
    ));

    push_section(&mut result, "Status", &ranked(&stats.status_distribution));

    let species = ranked(&stats.species_distribution);
    push_section(
        &mut result,
        "Top Species",
        &species[..species.len().min(TOP_SPECIES)],
    );

    push_section(&mut result, "Gender", &ranked(&stats.gender_distribution));

    result.push_str(&format!(
        "\n{}: {:.2}\n",
        "Avg Episodes".bright_white().bold(),
        stats.avg_episodes
    ));

    result.push_str(&format!("\n{}:\n", "Most Appearing".bright_white().bold()));
    for (name, episodes) in &stats.top_characters {
        result.push_str(&format!(
            "  {}: {} eps\n",
            name.bright_white(),
            episodes.to_string().bright_magenta()
        ));
    }

    result.push_str(&format!("{}\n", "=".repeat(50).bright_cyan()));
    result
}
