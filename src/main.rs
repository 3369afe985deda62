//! Enemy Forge - command line gateway
//!
//! Resolves enemies against an in-memory store seeded from TOML and prints
//! the result as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use enemy_forge::backward::BackwardQuery;
use enemy_forge::core::error::Result;
use enemy_forge::core::types::{Difficulty, PlayerClass, Region, TimeOfDay, WeaponType, Weather};
use enemy_forge::core::EngineConfig;
use enemy_forge::data::BootstrapLoader;
use enemy_forge::entity::{GameContext, Player};
use enemy_forge::store::InMemoryEnemyStore;
use enemy_forge::EnemyDirector;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "enemy-forge")]
#[command(about = "Pick or synthesize an enemy for a play context")]
struct Cli {
    /// Seed roster (TOML); the built-in roster is used when omitted
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    /// Engine configuration (TOML); defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an enemy through the forward phases
    Forward(ContextArgs),
    /// Resolve a named enemy, or AUTO_COUNTER / AUTO_BOSS / AUTO_ELITE
    Backward {
        #[arg(long)]
        target: String,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// List stored enemies
    List {
        #[arg(long)]
        region: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ContextArgs {
    #[arg(long, default_value = "castle")]
    region: String,

    #[arg(long, default_value = "medium")]
    difficulty: String,

    #[arg(long, default_value = "clear")]
    weather: String,

    #[arg(long, default_value = "day")]
    time: String,

    /// Player level; no player is present when omitted
    #[arg(long)]
    level: Option<u32>,

    #[arg(long, default_value = "BALANCED")]
    class: String,

    #[arg(long, default_value = "sword")]
    weapon: String,
}

impl ContextArgs {
    fn to_context(&self) -> GameContext {
        let player = self.level.map(|level| {
            Player::new(
                "player",
                level,
                PlayerClass::parse(&self.class),
                WeaponType::parse(&self.weapon),
            )
        });
        GameContext::new(
            Region::parse(&self.region),
            Difficulty::parse(&self.difficulty),
            Weather::parse(&self.weather),
            TimeOfDay::parse(&self.time),
            player,
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BackwardOutput<'a> {
    query: &'a BackwardQuery,
    enemy: enemy_forge::entity::Enemy,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("enemy_forge=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let roster = match &cli.seed {
        Some(path) => BootstrapLoader::load_file(path)?,
        None => BootstrapLoader::default_roster()?,
    };

    let store = InMemoryEnemyStore::new();
    BootstrapLoader::seed(&store, roster)?;
    let director = EnemyDirector::new(config, Arc::new(store));

    let output = match &cli.command {
        Command::Forward(args) => {
            let enemy = director.generate_forward(&args.to_context());
            serde_json::to_string_pretty(&enemy)?
        }
        Command::Backward { target, context } => {
            let mut query = BackwardQuery::new(target.clone(), context.to_context());
            let enemy = director.resolve_backward(&mut query);
            serde_json::to_string_pretty(&BackwardOutput { query: &query, enemy })?
        }
        Command::List { region } => {
            let enemies = match region {
                Some(region) => director.list_region(Region::parse(region))?,
                None => director.list_enemies()?,
            };
            serde_json::to_string_pretty(&enemies)?
        }
    };

    println!("{}", output);
    Ok(())
}
