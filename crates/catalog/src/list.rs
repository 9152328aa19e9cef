use crate::cache::CharacterCache;
use crate::prelude::{println, *};
use crate::service::CatalogService;
use crate::transport::HttpTransport;
use catalog_core::filter::FilterCriteria;
use catalog_core::model::{Character, Gender, Species, Status};
use catalog_core::page::PageInfo;
use catalog_core::sort::{sort_characters, SortCriteria, SortField, SortOrder};
use colored::Colorize;
use prettytable::{Cell, Row};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone, Default)]
pub struct ListOptions {
    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: u64,

    /// Case-insensitive name substring
    #[arg(long)]
    pub name: Option<String>,

    /// Status: alive, dead, unknown
    #[arg(long)]
    pub status: Option<String>,

    /// Species: human, alien, humanoid, robot, animal, unknown
    #[arg(long)]
    pub species: Option<String>,

    /// Gender: male, female, genderless, unknown
    #[arg(long)]
    pub gender: Option<String>,

    /// Minimum number of episodes (inclusive)
    #[arg(long)]
    pub min_episodes: Option<usize>,

    /// Maximum number of episodes (inclusive)
    #[arg(long)]
    pub max_episodes: Option<usize>,

    /// Sort field: id, name, status, episodes
    #[arg(short, long, default_value = "id")]
    pub sort: String,

    /// Sort order: asc, desc
    #[arg(short, long, default_value = "asc")]
    pub order: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Page of characters as printed by `catalog list`
#[derive(Debug, serde::Serialize, Clone)]
pub struct ListOutput {
    pub page_info: PageInfo,
    pub sort: SortCriteria,
    pub characters: Vec<Character>,
}

/// Coerce a label, warning when it silently became `unknown`
fn coerce_label<T>(
    field: &str,
    value: Option<&str>,
    from_label: fn(&str) -> T,
    unknown: T,
) -> Option<T>
where
    T: PartialEq + Copy,
{
    let value = value?;
    let coerced = from_label(value);
    if coerced == unknown && !value.trim().eq_ignore_ascii_case("unknown") {
        warn!("Unrecognized {field} {value:?}, filtering on unknown");
    }
    Some(coerced)
}

impl ListOptions {
    pub fn filter_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            name: self.name.clone(),
            status: coerce_label(
                "status",
                self.status.as_deref(),
                Status::from_label,
                Status::Unknown,
            ),
            species: coerce_label(
                "species",
                self.species.as_deref(),
                Species::from_label,
                Species::Unknown,
            ),
            gender: coerce_label(
                "gender",
                self.gender.as_deref(),
                Gender::from_label,
                Gender::Unknown,
            ),
            min_episodes: self.min_episodes,
            max_episodes: self.max_episodes,
        }
    }

    pub fn sort_criteria(&self) -> SortCriteria {
        SortCriteria::new(SortField::from_key(&self.sort), SortOrder::from_key(&self.order))
    }
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching page {}...", options.page);
    }

    let output = list_characters_data(&options, &global).await?;

    if options.json {
        println!("{}", format_list_json(&output)?);
    } else {
        print!("{}", format_list_text(&output));
    }

    Ok(())
}

/// Fetch, filter and sort one page of characters
pub async fn list_characters_data(
    options: &ListOptions,
    global: &crate::Global,
) -> Result<ListOutput> {
    let transport = HttpTransport::from_global(global).wrap_err("Failed to build HTTP client")?;
    let mut cache = CharacterCache::new();
    let mut service = CatalogService::new(transport, &mut cache);

    let filters = options.filter_criteria();
    let filters = (!filters.is_empty()).then_some(filters);

    let page = service.get_page(options.page, filters.as_ref()).await;
    let sort = options.sort_criteria();

    Ok(ListOutput {
        characters: sort_characters(&page.characters, &sort),
        page_info: page.page_info,
        sort,
    })
}

fn format_list_json(output: &ListOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Plain rows for the character table
pub fn character_table(characters: &[Character]) -> prettytable::Table {
    let mut table = new_table();
    table.set_titles(Row::new(
        ["ID", "NAME", "STATUS", "SPECIES", "GENDER", "EPISODES", "LOCATION"]
            .iter()
            .map(|title| Cell::new(title))
            .collect(),
    ));

    for character in characters {
        table.add_row(Row::new(vec![
            Cell::new(&character.id.to_string()),
            Cell::new(&character.name),
            Cell::new(&format!("{} {}", character.status.emoji(), character.status)),
            Cell::new(&character.display_species()),
            Cell::new(character.gender.as_str()),
            Cell::new(&character.episode_count().to_string()),
            Cell::new(&character.location.name),
        ]));
    }

    table
}

fn format_list_text(output: &ListOutput) -> String {
    let info = &output.page_info;
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "CHARACTERS (Page {} of {}, {} total)",
            info.current, info.total, info.count
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.characters.is_empty() {
        result.push_str(&format!("\n{}\n", "No characters on this page.".yellow()));
    } else {
        result.push('\n');
        result.push_str(&character_table(&output.characters).to_string());
    }

    result.push_str(&format!("\n{}:\n", "To navigate".bright_white().bold()));
    if info.has_next {
        result.push_str(&format!(
            "  {}: {}\n",
            "Next page".green(),
            format!("catalog list --page {}", info.current + 1).cyan()
        ));
    }
    if info.has_prev {
        result.push_str(&format!(
            "  {}: {}\n",
            "Previous page".green(),
            format!("catalog list --page {}", info.current.saturating_sub(1)).cyan()
        ));
    }
    if let Some(first) = output.characters.first() {
        result.push_str(&format!(
            "  {}: {}\n",
            "Details".green(),
            format!("catalog get {}", first.id).cyan()
        ));
    }

    result.push('\n');
    result
}
