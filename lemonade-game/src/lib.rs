//! Lemonade Stand Game Engine
//!
//! Platform-agnostic simulation for the lemonade stand game: a week of buying
//! supplies at fluctuating prices and selling lemonade to weather-driven
//! crowds. This crate never touches a console; all player interaction goes
//! through the [`StandIo`] trait.

pub mod config;
pub mod constants;
pub mod day;
pub mod demand;
pub mod io;
pub mod market;
pub mod numbers;
pub mod rng;
pub mod session;
pub mod state;
pub mod weather;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use day::{
    Conditions, DayPhase, DayReport, SalesTally, collect_purchases, generate_conditions,
    purchase_prompt, purchase_quantity, run_day, simulate_sales,
};
pub use demand::{customer_range, potential_customers};
pub use io::{
    GameEvent, INVALID_QUANTITY_MESSAGE, InputError, ScriptedIo, StandIo, StandStatus,
    parse_quantity,
};
pub use market::{DailyPrices, PriceBand, PriceBands, generate_daily_prices};
pub use numbers::format_money;
pub use rng::{CountingRng, RandomSource, RngBundle, RngError, ScriptedSource};
pub use session::{GameSession, GameSummary, SessionError};
pub use state::{Inventory, PurchaseReceipt, Recipe, Sale, Stand, StandError, Supply};
pub use weather::{Weather, classify_weather, generate_weather};
