//! Player-facing boundary: quantity prompts in, game events out.
use std::collections::VecDeque;
use std::fmt;

use thiserror::Error;

use crate::day::DayReport;
use crate::market::DailyPrices;
use crate::numbers::format_money;
use crate::session::GameSummary;
use crate::state::{Inventory, PurchaseReceipt, StandError};
use crate::weather::Weather;

/// Shown when a quantity answer is not a whole number of zero or more.
pub const INVALID_QUANTITY_MESSAGE: &str = "Please enter a whole number of zero or more.";

/// Failure of the input collaborator itself. Invalid answers are never
/// reported this way; implementors re-prompt instead.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input closed before the game finished")]
    Closed,
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Collaborator that answers purchase prompts and receives game events.
pub trait StandIo {
    /// Ask for a non-negative whole number, re-prompting until one is given.
    ///
    /// # Errors
    ///
    /// Returns an error only when the input source itself fails.
    fn prompt_quantity(&mut self, prompt: &str) -> Result<u32, InputError>;

    /// Present an event to the player.
    fn notify(&mut self, event: &GameEvent);
}

/// Parse a quantity answer. Accepts only non-negative base-10 integers,
/// ignoring surrounding whitespace.
#[must_use]
pub fn parse_quantity(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Cash and stock at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandStatus {
    pub cash: f64,
    pub inventory: Inventory,
}

impl fmt::Display for StandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cash: {}", format_money(self.cash))?;
        writeln!(f, "Cups: {}", self.inventory.cups)?;
        writeln!(f, "Lemons: {}", self.inventory.lemons)?;
        writeln!(f, "Sugar: {} cups", self.inventory.sugar)?;
        write!(f, "Ice: {} cubes", self.inventory.ice)
    }
}

/// Everything the engine tells the player.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    DayStarted { day: u32, days: u32 },
    Forecast(Weather),
    PricesPosted(DailyPrices),
    Purchased(PurchaseReceipt),
    PurchaseDenied(StandError),
    Status(StandStatus),
    SoldOut { sold: u32 },
    DayClosed(DayReport),
    GameOver(GameSummary),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DayStarted { day, days } => write!(f, "=== Day {day} of {days} ==="),
            Self::Forecast(weather) => write!(f, "Today's weather: {weather}"),
            Self::PricesPosted(prices) => {
                writeln!(f, "Today's prices:")?;
                writeln!(f, "  Cups: {} each", format_money(prices.cups))?;
                writeln!(f, "  Lemons: {} each", format_money(prices.lemons))?;
                writeln!(f, "  Sugar: {} per cup", format_money(prices.sugar))?;
                write!(
                    f,
                    "  Ice: {} per 100 cubes",
                    format_money(prices.ice_per_hundred)
                )
            }
            Self::Purchased(receipt) => write!(
                f,
                "Bought {} {} for {}.",
                receipt.quantity,
                receipt.supply,
                format_money(receipt.charged)
            ),
            Self::PurchaseDenied(err) => write!(f, "Purchase skipped: {err}."),
            Self::Status(status) => write!(f, "{status}"),
            Self::SoldOut { sold } => {
                write!(f, "You ran out of supplies after selling {sold} cups!")
            }
            Self::DayClosed(report) => write!(
                f,
                "You sold {} cups of lemonade to {} potential customers for {}.",
                report.cups_sold,
                report.customers,
                format_money(report.revenue)
            ),
            Self::GameOver(summary) => write!(
                f,
                "Game over after {} days! You finished with {} (started with {}).",
                summary.days,
                format_money(summary.final_cash),
                format_money(summary.starting_cash)
            ),
        }
    }
}

/// Replays canned answers and records every event. Handy for embedding the
/// engine without a console.
#[derive(Debug, Default)]
pub struct ScriptedIo {
    answers: VecDeque<u32>,
    prompts: Vec<String>,
    events: Vec<GameEvent>,
}

impl ScriptedIo {
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = u32>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Answers not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl StandIo for ScriptedIo {
    fn prompt_quantity(&mut self, prompt: &str) -> Result<u32, InputError> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or(InputError::Closed)
    }

    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
