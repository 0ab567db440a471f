//! One business day: conditions, shopping, inventory report, sales, results.
use serde::{Deserialize, Serialize};

use crate::constants::ICE_BAG_SIZE;
use crate::demand::potential_customers;
use crate::io::{GameEvent, InputError, StandIo, StandStatus};
use crate::market::{DailyPrices, PriceBands, generate_daily_prices};
use crate::rng::RngBundle;
use crate::state::{Sale, Stand, StandError, Supply};
use crate::weather::{Weather, generate_weather};

/// Phases of a day, always visited in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPhase {
    GenerateConditions,
    CollectPurchases,
    ReportInventory,
    SimulateSales,
    ReportResults,
}

impl DayPhase {
    pub const SEQUENCE: [Self; 5] = [
        Self::GenerateConditions,
        Self::CollectPurchases,
        Self::ReportInventory,
        Self::SimulateSales,
        Self::ReportResults,
    ];

    /// The phase that follows this one; `None` once results are reported.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::GenerateConditions => Some(Self::CollectPurchases),
            Self::CollectPurchases => Some(Self::ReportInventory),
            Self::ReportInventory => Some(Self::SimulateSales),
            Self::SimulateSales => Some(Self::ReportResults),
            Self::ReportResults => None,
        }
    }
}

/// Weather and prices drawn at the start of a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub weather: Weather,
    pub prices: DailyPrices,
}

/// Result of the customer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesTally {
    pub sold: u32,
    /// Stock ran out before the customers did.
    pub stocked_out: bool,
}

/// Summary of a finished day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: u32,
    pub weather: Weather,
    pub prices: DailyPrices,
    pub customers: u32,
    pub cups_sold: u32,
    pub revenue: f64,
    pub stocked_out: bool,
    pub cash_after: f64,
}

/// Prompt text for a supply. Ice is asked for in bags of 100 cubes.
#[must_use]
pub fn purchase_prompt(supply: Supply, prices: &DailyPrices) -> String {
    match supply {
        Supply::Ice => format!(
            "How many hundreds of ice cubes would you like to buy? (${:.2} per 100)",
            prices.ice_per_hundred
        ),
        other => format!(
            "How many {other} would you like to buy? (${:.2} each)",
            prices.unit_price(other)
        ),
    }
}

/// Convert a prompt answer into units for [`Stand::purchase`]. `None` when
/// the ice cube count does not fit in a `u32`.
#[must_use]
pub const fn purchase_quantity(supply: Supply, answer: u32) -> Option<u32> {
    match supply {
        Supply::Ice => answer.checked_mul(ICE_BAG_SIZE),
        _ => Some(answer),
    }
}

/// Draw today's weather and prices.
pub fn generate_conditions(bands: &PriceBands, rngs: &mut RngBundle) -> Conditions {
    let weather = generate_weather(rngs.weather());
    let prices = generate_daily_prices(bands, rngs.market());
    Conditions { weather, prices }
}

/// Ask for each supply in order and attempt the purchase. A denied purchase
/// is reported and skipped; the remaining prompts still run.
///
/// # Errors
///
/// Returns an error only if the input collaborator fails.
pub fn collect_purchases<Io>(
    stand: &mut Stand,
    prices: &DailyPrices,
    io: &mut Io,
) -> Result<(), InputError>
where
    Io: StandIo + ?Sized,
{
    for supply in Supply::ALL {
        let answer = io.prompt_quantity(&purchase_prompt(supply, prices))?;
        let attempt = match purchase_quantity(supply, answer) {
            Some(quantity) => stand.purchase(supply, quantity, prices.unit_price(supply)),
            None => Err(StandError::StockLimit {
                supply,
                held: stand.inventory().get(supply),
                requested: u64::from(answer) * u64::from(ICE_BAG_SIZE),
            }),
        };
        match attempt {
            Ok(receipt) => {
                log::debug!(
                    "bought {} {supply} for {:.4}, cash now {:.4}",
                    receipt.quantity,
                    receipt.charged,
                    receipt.cash_after
                );
                io.notify(&GameEvent::Purchased(receipt));
            }
            Err(err) => {
                log::warn!("purchase denied: {err}");
                io.notify(&GameEvent::PurchaseDenied(err));
            }
        }
    }
    Ok(())
}

/// Serve up to `customers` sale attempts, stopping at the first stock-out.
pub fn simulate_sales(stand: &mut Stand, customers: u32) -> SalesTally {
    let mut sold = 0;
    for _ in 0..customers {
        match stand.sell_one_cup() {
            Sale::Sold => sold += 1,
            Sale::OutOfStock => {
                return SalesTally {
                    sold,
                    stocked_out: true,
                };
            }
        }
    }
    SalesTally {
        sold,
        stocked_out: false,
    }
}

fn status(stand: &Stand) -> GameEvent {
    GameEvent::Status(StandStatus {
        cash: stand.cash(),
        inventory: *stand.inventory(),
    })
}

/// Run one full day against `stand`.
///
/// # Errors
///
/// Returns an error only if the input collaborator fails mid-day.
pub fn run_day<Io>(
    day: u32,
    days: u32,
    stand: &mut Stand,
    bands: &PriceBands,
    rngs: &mut RngBundle,
    io: &mut Io,
) -> Result<DayReport, InputError>
where
    Io: StandIo + ?Sized,
{
    let mut phase = DayPhase::GenerateConditions;
    let mut enter = |next: DayPhase| {
        log::trace!("day {day}: {phase:?} -> {next:?}");
        debug_assert_eq!(phase.next(), Some(next));
        phase = next;
    };

    io.notify(&GameEvent::DayStarted { day, days });
    let Conditions { weather, prices } = generate_conditions(bands, rngs);
    io.notify(&GameEvent::Forecast(weather));
    io.notify(&GameEvent::PricesPosted(prices));

    enter(DayPhase::CollectPurchases);
    collect_purchases(stand, &prices, io)?;

    enter(DayPhase::ReportInventory);
    io.notify(&status(stand));

    enter(DayPhase::SimulateSales);
    let customers = potential_customers(weather, rngs.demand());
    let cash_before = stand.cash();
    let tally = simulate_sales(stand, customers);
    if tally.stocked_out {
        io.notify(&GameEvent::SoldOut { sold: tally.sold });
    }

    enter(DayPhase::ReportResults);
    let report = DayReport {
        day,
        weather,
        prices,
        customers,
        cups_sold: tally.sold,
        revenue: stand.cash() - cash_before,
        stocked_out: tally.stocked_out,
        cash_after: stand.cash(),
    };
    log::info!(
        "day {day}: {weather:?}, sold {}/{customers}, cash {:.2}",
        report.cups_sold,
        report.cash_after
    );
    io.notify(&GameEvent::DayClosed(report));
    io.notify(&status(stand));
    Ok(report)
}
