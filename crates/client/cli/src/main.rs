//! Terminal host for the grimm rule engine.
//!
//! Each invocation loads one character sheet, runs one rule action through
//! the runtime, prints the card, and writes the committed sheet back along
//! with the last attack and defend inputs.
mod config;
mod console;
mod dirs;
mod input;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::CliConfig;
use console::ConsoleSink;
use grimm_content::{
    CharacterLoader, ConfigLoader, InputMemoryLoader, SAMPLE_CHARACTER, TablesLoader,
};
use grimm_core::{
    AbilityKind, ArmorTierTable, Character, Food, ItemId, ItemType, RestLength, RulesConfig,
    modifiers,
};
use grimm_runtime::{InMemoryCharacterRepo, JsonRenderer, RulesRuntime, RuntimeConfig};
use input::ArgsInput;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Rule engine for Vast Grimm characters
#[derive(Parser)]
#[command(name = "grimm")]
#[command(about = "Roll Vast Grimm actions for a character sheet", long_about = None)]
#[command(version)]
struct Cli {
    /// Print cards as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the sample character to the character file
    Init {
        /// Overwrite an existing sheet
        #[arg(long)]
        force: bool,
    },

    /// Show the sheet with derived figures
    Show,

    /// Test an ability
    Test { ability: AbilityKind },

    /// Attack with a weapon
    Attack {
        /// Weapon id (default: first equipped weapon)
        #[arg(long)]
        item: Option<u32>,
        /// Attack DR
        #[arg(long)]
        dr: Option<i32>,
        /// Target armor formula
        #[arg(long)]
        armor: Option<String>,
    },

    /// Defend against an incoming attack
    Defend {
        /// Defend DR before armor and encumbrance
        #[arg(long)]
        dr: Option<i32>,
        /// Incoming attack formula
        #[arg(long)]
        incoming: Option<String>,
    },

    /// Check morale
    Morale,

    /// Check an encounter's reaction
    Reaction,

    /// Spend a neuromancy point on a tribute
    Tribute,

    /// Roll a skill card
    Skill { item: u32 },

    /// Roll the class favor die
    Omens,

    /// Roll neuromancy points for the day
    Points,

    /// Rest
    Rest {
        length: RestLength,
        #[arg(long, default_value = "eat")]
        food: Food,
        #[arg(long)]
        infected: bool,
    },

    /// Roll for improvement
    Improve,

    /// Roll on the broken table
    Broken,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = CliConfig::from_env();
    let _guard = setup_logging(&config.log_dir())?;

    run(cli, &config).await
}

async fn run(cli: Cli, config: &CliConfig) -> Result<()> {
    let character_file = config.character_file();

    if let Command::Init { force } = cli.command {
        return init(&character_file, force);
    }

    let rules = match &config.rules_file {
        Some(path) => ConfigLoader::load(path)?,
        None => RulesConfig::default(),
    };
    let tables = match &config.tables_file {
        Some(path) => TablesLoader::load(path)?,
        None => ArmorTierTable::default(),
    };
    let character = CharacterLoader::load(&character_file)
        .context("No character sheet; run `grimm init` or set GRIMM_CHARACTER_FILE")?;

    if let Command::Show = cli.command {
        show(&character, &rules);
        return Ok(());
    }

    let input = match &cli.command {
        Command::Attack { dr, armor, .. } => ArgsInput {
            attack_dr: *dr,
            target_armor: armor.clone(),
            ..ArgsInput::default()
        },
        Command::Defend { dr, incoming } => ArgsInput {
            defend_dr: *dr,
            incoming_attack: incoming.clone(),
            ..ArgsInput::default()
        },
        _ => ArgsInput::default(),
    };

    let repo = Arc::new(InMemoryCharacterRepo::with_characters([character.clone()]));
    let mut builder = RulesRuntime::builder()
        .config(RuntimeConfig {
            seed: config.seed,
            display_delay_ms: config.display_delay_ms,
            ..RuntimeConfig::default()
        })
        .rules(rules)
        .tables(tables)
        .repository(repo.clone())
        .sink(Arc::new(ConsoleSink))
        .input(input);
    if cli.json {
        builder = builder.renderer(JsonRenderer { pretty: true });
    }
    let runtime = builder.build();

    let id = character.id;
    let memory_file = config.input_memory_file(id);
    let remembered = InputMemoryLoader::load(&memory_file)?;
    let mut memory = remembered.clone();
    let report = match cli.command {
        Command::Test { ability } => runtime.test_ability(id, ability).await,
        Command::Attack { item, .. } => {
            let item = item
                .map(ItemId)
                .or_else(|| character.first_equipped(ItemType::Weapon).map(|item| item.id));
            runtime.attack(id, item, &mut memory).await
        }
        Command::Defend { .. } => runtime.defend(id, &mut memory).await,
        Command::Morale => runtime.check_morale(id).await,
        Command::Reaction => runtime.check_reaction(id).await,
        Command::Tribute => runtime.activate_tribute(id).await,
        Command::Skill { item } => runtime.use_skill(id, ItemId(item)).await,
        Command::Omens => runtime.roll_omens(id).await,
        Command::Points => runtime.roll_neuromancy_points_per_day(id).await,
        Command::Rest {
            length,
            food,
            infected,
        } => runtime.rest(id, length, food, infected).await,
        Command::Improve => runtime.improve(id).await,
        Command::Broken => runtime.roll_broken(id).await,
        Command::Init { .. } | Command::Show => return Ok(()),
    }?;

    if report.is_none() {
        eprintln!("cancelled");
        return Ok(());
    }

    if memory != remembered {
        InputMemoryLoader::save(&memory_file, &memory)?;
        tracing::debug!("Saved inputs to {}", memory_file.display());
    }

    if let Some(updated) = repo.get(id)?
        && updated != character
    {
        CharacterLoader::save(&character_file, &updated)?;
        tracing::info!("Saved {}", character_file.display());
    }
    Ok(())
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists; pass --force to overwrite", path.display());
    }
    let character = CharacterLoader::parse(SAMPLE_CHARACTER)?;
    CharacterLoader::save(path, &character)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn show(character: &Character, rules: &RulesConfig) {
    println!("{} {}", character.name, character.id);
    for kind in AbilityKind::ALL {
        println!("  {:<10} {:+}", kind.to_string(), character.ability(kind));
    }
    println!("  HP {}/{}", character.hp.value, character.hp.max);
    println!(
        "  Neuromancy points {}/{}",
        character.neuromancy_points.value, character.neuromancy_points.max
    );
    println!("  Favors {}/{}", character.favors.value, character.favors.max);
    println!(
        "  Carrying {}/{} (max {}){}",
        modifiers::carrying_weight(character),
        modifiers::normal_capacity(character, rules),
        modifiers::max_capacity(character, rules),
        if modifiers::is_encumbered(character, rules) {
            ", encumbered"
        } else {
            ""
        }
    );
    println!(
        "  Containers {}/{}",
        modifiers::container_space(character),
        modifiers::container_capacity(character)
    );
    for item in &character.items {
        let marker = if item.equipped { "*" } else { " " };
        println!("  {marker} {:>3} {} ({})", item.id.0, item.name, item.item_type);
    }
}

/// Setup logging to both stderr and a file in `log_dir`
fn setup_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "grimm.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Log file: {}/grimm.log", log_dir.display());
    Ok(guard)
}
