use crate::cache::CharacterCache;
use crate::prelude::{println, *};
use crate::service::CatalogService;
use crate::transport::HttpTransport;
use catalog_core::model::Character;
use catalog_core::present::CharacterCard;
use catalog_core::validate::{validate_character, ValidationResult};
use colored::Colorize;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct GetOptions {
    /// Character ID
    #[clap(env = "CATALOG_CHARACTER")]
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize, Clone)]
pub struct GetOutput {
    pub character: Character,
    pub card: CharacterCard,
    pub validation: ValidationResult,
}

impl GetOutput {
    pub fn new(character: Character) -> Self {
        Self {
            card: CharacterCard::from_character(&character),
            validation: validate_character(&character),
            character,
        }
    }
}

pub async fn run(options: GetOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching character {}...", options.id);
    }

    let transport = HttpTransport::from_global(&global).wrap_err("Failed to build HTTP client")?;
    let mut cache = CharacterCache::new();
    let mut service = CatalogService::new(transport, &mut cache);

    let character = service
        .get_by_id(options.id)
        .await
        .ok_or_else(|| eyre!("Character {} not found", options.id))?;

    let output = GetOutput::new(character);

    if options.json {
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{}", json);
    } else {
        print!("{}", format_card_text(&output));
    }

    Ok(())
}

fn format_card_text(output: &GetOutput) -> String {
    let card = &output.card;
    let character = &output.character;
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{} {}\n",
        card.status_emoji,
        format!("{} (#{})", card.name, card.id).bright_cyan().bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&format!(
        "  {}: {} ({})\n",
        "Status".green(),
        card.status_text.bright_white(),
        card.status_color.bright_black()
    ));
    result.push_str(&format!(
        "  {}: {}\n",
        "Species".green(),
        card.species_text.bright_white()
    ));
    result.push_str(&format!(
        "  {}: {}\n",
        "Gender".green(),
        character.gender.as_str().bright_white()
    ));
    result.push_str(&format!(
        "  {}: {}\n",
        "Origin".green(),
        character.origin.name.bright_white()
    ));
    result.push_str(&format!("  {}\n", card.location_text));
    result.push_str(&format!("  {}\n", card.episodes_text));

    if !card.image_url.is_empty() {
        result.push_str(&format!(
            "  {}: {}\n",
            "Image".green(),
            card.image_url.cyan().underline()
        ));
    }
    if let Some(created) = character.created {
        result.push_str(&format!(
            "  {}: {}\n",
            "Created".green(),
            created.format("%Y-%m-%d %H:%M:%S %:z").to_string().bright_black()
        ));
    }

    if output.validation.is_valid {
        result.push_str(&format!("\n  {}\n", "✓ Valid".green()));
    } else {
        result.push_str(&format!("\n  {}\n", "✗ Invalid".red().bold()));
        for error in &output.validation.errors {
            result.push_str(&format!("    - {}: {}\n", error.field.yellow(), error.message));
        }
    }

    result.push('\n');
    result
}
