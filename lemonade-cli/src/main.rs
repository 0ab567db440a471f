mod autoplay;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::{stdin, stdout};
use std::path::{Path, PathBuf};

use autoplay::{AutoplayIo, BuyingStrategy};
use console::ConsoleIo;
use lemonade_game::{GameConfig, GameSession, StandIo, format_money};

#[derive(Debug, Parser)]
#[command(name = "lemonade", version)]
#[command(about = "Run a lemonade stand for a week: buy supplies, watch the weather, sell cups")]
struct Args {
    /// Seed for weather, prices, and customers (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding days, money, recipe, or price bands
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let a built-in buyer answer every prompt
    #[arg(long)]
    autoplay: bool,

    /// Buying strategy used by --autoplay
    #[arg(long, value_enum, default_value_t = BuyingStrategy::Balanced)]
    strategy: BuyingStrategy,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("starting run with seed {seed}");

    announce_banner(&config, seed);

    let session = GameSession::new(config.clone(), seed).context("invalid game configuration")?;
    let mut io: Box<dyn StandIo> = if args.autoplay {
        println!("🤖 Autoplay: {} strategy", args.strategy);
        Box::new(AutoplayIo::new(
            stdout(),
            args.strategy.create_policy(seed),
            config.starting_cash,
            config.recipe,
        ))
    } else {
        Box::new(ConsoleIo::new(stdin().lock(), stdout()))
    };

    let summary = session
        .run(io.as_mut())
        .context("the game ended before the last day")?;
    log::info!(
        "final cash {:.2}, profit {:.2}",
        summary.final_cash,
        summary.profit()
    );
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    GameConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}

fn announce_banner(config: &GameConfig, seed: u64) {
    println!("{}", "🍋 Lemonade Stand".bright_yellow().bold());
    println!("{}", "==================".yellow());
    println!(
        "You have {} days and {} to make your fortune. Each cup sells for {}.",
        config.days,
        format_money(config.starting_cash),
        format_money(config.price_per_cup)
    );
    println!(
        "Recipe per cup: {} lemon(s), {} cup(s) of sugar, {} ice cubes.",
        config.recipe.lemons, config.recipe.sugar, config.recipe.ice
    );
    println!("Seed: {seed}");
}
