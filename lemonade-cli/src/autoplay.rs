use std::collections::VecDeque;
use std::fmt;
use std::io::Write;

use clap::ValueEnum;
use lemonade_game::constants::ICE_BAG_SIZE;
use lemonade_game::numbers::floor_f64_to_u32;
use lemonade_game::{
    DailyPrices, GameEvent, InputError, Recipe, StandIo, Supply, Weather, customer_range,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::console::ConsoleView;

/// Policy interface for unattended play.
pub trait BuyingPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// How many cups to stock for a day with `weather`.
    fn target_cups(&mut self, weather: Weather) -> u32;
}

/// Built-in buying strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum BuyingStrategy {
    /// Stock for the slowest day the forecast allows
    Cautious,
    /// Stock for an average day
    Balanced,
    /// Stock for a random crowd size within the forecast
    Gambler,
}

impl BuyingStrategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cautious => "Cautious",
            Self::Balanced => "Balanced",
            Self::Gambler => "Gambler",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn BuyingPolicy> {
        match self {
            Self::Cautious => Box::new(CautiousPolicy),
            Self::Balanced => Box::new(BalancedPolicy),
            Self::Gambler => Box::new(GamblerPolicy::new(seed)),
        }
    }
}

impl fmt::Display for BuyingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct CautiousPolicy;
struct BalancedPolicy;

struct GamblerPolicy {
    rng: ChaCha20Rng,
}

impl GamblerPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl BuyingPolicy for CautiousPolicy {
    fn name(&self) -> &'static str {
        "Cautious"
    }

    fn target_cups(&mut self, weather: Weather) -> u32 {
        *customer_range(weather).start()
    }
}

impl BuyingPolicy for BalancedPolicy {
    fn name(&self) -> &'static str {
        "Balanced"
    }

    fn target_cups(&mut self, weather: Weather) -> u32 {
        let range = customer_range(weather);
        range.start() + (range.end() - range.start()) / 2
    }
}

impl BuyingPolicy for GamblerPolicy {
    fn name(&self) -> &'static str {
        "Gambler"
    }

    fn target_cups(&mut self, weather: Weather) -> u32 {
        self.rng.gen_range(customer_range(weather))
    }
}

/// Stock the bot believes the stand holds, rebuilt from events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Ledger {
    cash: f64,
    cups: u32,
    lemons: u32,
    sugar: u32,
    ice: u32,
}

fn per_cup_cost(prices: &DailyPrices, recipe: &Recipe) -> f64 {
    prices.cups
        + prices.lemons * f64::from(recipe.lemons)
        + prices.sugar * f64::from(recipe.sugar)
        + prices.ice_unit_price() * f64::from(recipe.ice)
}

/// Answers for the four purchase prompts, in prompt order. Never plans to
/// spend more than the ledger's cash; one bag of ice is held back to cover
/// rounding ice up to whole bags.
fn plan_purchases(
    target: u32,
    ledger: &Ledger,
    prices: &DailyPrices,
    recipe: &Recipe,
) -> [u32; 4] {
    let unit = per_cup_cost(prices, recipe);
    let budget = (ledger.cash - prices.ice_per_hundred).max(0.0);
    let affordable = if unit > 0.0 {
        (budget / unit).floor().min(f64::from(target))
    } else {
        f64::from(target)
    };
    let cups = floor_f64_to_u32(affordable);

    let need = |per_cup: u32, have: u32| cups.saturating_mul(per_cup).saturating_sub(have);
    let ice_cubes = need(recipe.ice, ledger.ice);
    [
        need(1, ledger.cups),
        need(recipe.lemons, ledger.lemons),
        need(recipe.sugar, ledger.sugar),
        ice_cubes.div_ceil(ICE_BAG_SIZE),
    ]
}

/// Plays unattended: answers prompts from a [`BuyingPolicy`] and prints the
/// game as it goes.
pub struct AutoplayIo<W: Write> {
    view: ConsoleView<W>,
    policy: Box<dyn BuyingPolicy>,
    recipe: Recipe,
    ledger: Ledger,
    weather: Option<Weather>,
    prices: Option<DailyPrices>,
    answers: VecDeque<u32>,
}

impl<W: Write> AutoplayIo<W> {
    pub fn new(
        out: W,
        policy: Box<dyn BuyingPolicy>,
        starting_cash: f64,
        recipe: Recipe,
    ) -> Self {
        Self {
            view: ConsoleView::new(out),
            policy,
            recipe,
            ledger: Ledger {
                cash: starting_cash,
                ..Ledger::default()
            },
            weather: None,
            prices: None,
            answers: VecDeque::new(),
        }
    }

    fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Forecast(weather) => self.weather = Some(*weather),
            GameEvent::PricesPosted(prices) => {
                self.prices = Some(*prices);
                self.answers.clear();
            }
            GameEvent::Purchased(receipt) => {
                self.ledger.cash = receipt.cash_after;
                let slot = match receipt.supply {
                    Supply::Cups => &mut self.ledger.cups,
                    Supply::Lemons => &mut self.ledger.lemons,
                    Supply::Sugar => &mut self.ledger.sugar,
                    Supply::Ice => &mut self.ledger.ice,
                };
                *slot = slot.saturating_add(receipt.quantity);
            }
            GameEvent::Status(status) => {
                self.ledger = Ledger {
                    cash: status.cash,
                    cups: status.inventory.cups,
                    lemons: status.inventory.lemons,
                    sugar: status.inventory.sugar,
                    ice: status.inventory.ice,
                };
            }
            _ => {}
        }
    }

    fn refill_answers(&mut self) {
        let (Some(weather), Some(prices)) = (self.weather, self.prices) else {
            self.answers.extend([0; 4]);
            return;
        };
        let target = self.policy.target_cups(weather);
        let plan = plan_purchases(target, &self.ledger, &prices, &self.recipe);
        log::debug!(
            "{} policy targets {target} cups on a {weather:?} day: {plan:?}",
            self.policy.name()
        );
        self.answers.extend(plan);
    }
}

impl<W: Write> StandIo for AutoplayIo<W> {
    fn prompt_quantity(&mut self, prompt: &str) -> Result<u32, InputError> {
        if self.answers.is_empty() {
            self.refill_answers();
        }
        let answer = self.answers.pop_front().unwrap_or(0);
        self.view.write_line(&format!("{prompt} {answer}"))?;
        Ok(answer)
    }

    fn notify(&mut self, event: &GameEvent) {
        self.observe(event);
        self.view.render(event);
    }
}

#[cfg(test)]
impl<W: Write> AutoplayIo<W> {
    fn into_output(self) -> W {
        self.view.into_inner()
    }
}
