//! Stand state: inventory, recipe, cash, and the two operations that mutate them.
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{ICE_PER_CUP, LEMONS_PER_CUP, PRICE_PER_CUP, STARTING_CASH, SUGAR_PER_CUP};
use crate::numbers::money_for;

/// Supplies the stand can buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Supply {
    Cups,
    Lemons,
    Sugar,
    Ice,
}

impl Supply {
    /// Purchase order used by the daily shopping phase.
    pub const ALL: [Self; 4] = [Self::Cups, Self::Lemons, Self::Sugar, Self::Ice];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cups => "cups",
            Self::Lemons => "lemons",
            Self::Sugar => "cups of sugar",
            Self::Ice => "ice cubes",
        }
    }
}

impl fmt::Display for Supply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stock on hand. Sugar is counted in cups, ice in cubes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub cups: u32,
    pub lemons: u32,
    pub sugar: u32,
    pub ice: u32,
}

impl Inventory {
    #[must_use]
    pub const fn get(&self, supply: Supply) -> u32 {
        match supply {
            Supply::Cups => self.cups,
            Supply::Lemons => self.lemons,
            Supply::Sugar => self.sugar,
            Supply::Ice => self.ice,
        }
    }

    const fn slot_mut(&mut self, supply: Supply) -> &mut u32 {
        match supply {
            Supply::Cups => &mut self.cups,
            Supply::Lemons => &mut self.lemons,
            Supply::Sugar => &mut self.sugar,
            Supply::Ice => &mut self.ice,
        }
    }

    /// Whether one cup of lemonade can be made with `recipe`.
    #[must_use]
    pub const fn covers(&self, recipe: &Recipe) -> bool {
        self.cups >= 1
            && self.lemons >= recipe.lemons
            && self.sugar >= recipe.sugar
            && self.ice >= recipe.ice
    }
}

/// Ingredients consumed by one cup of lemonade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub lemons: u32,
    /// Cups of sugar.
    pub sugar: u32,
    /// Ice cubes.
    pub ice: u32,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            lemons: LEMONS_PER_CUP,
            sugar: SUGAR_PER_CUP,
            ice: ICE_PER_CUP,
        }
    }
}

/// Errors raised by stand operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StandError {
    #[error("not enough cash for {supply}: costs ${cost:.2}, only ${available:.2} on hand")]
    InsufficientFunds {
        supply: Supply,
        cost: f64,
        available: f64,
    },
    #[error("unit price for {supply} must be a non-negative number (got {price})")]
    InvalidPrice { supply: Supply, price: f64 },
    #[error("cannot stock {requested} more {supply} on top of {held}")]
    StockLimit {
        supply: Supply,
        held: u32,
        requested: u64,
    },
}

/// Confirmation of a completed purchase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurchaseReceipt {
    pub supply: Supply,
    pub quantity: u32,
    pub unit_price: f64,
    /// Always `quantity * unit_price`.
    pub charged: f64,
    pub cash_after: f64,
}

/// Outcome of a single sale attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Sale {
    Sold,
    OutOfStock,
}

/// The lemonade stand. Cash moves only through [`Stand::purchase`] and
/// [`Stand::sell_one_cup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stand {
    inventory: Inventory,
    recipe: Recipe,
    cash: f64,
    price_per_cup: f64,
}

impl Default for Stand {
    fn default() -> Self {
        Self::new(STARTING_CASH, PRICE_PER_CUP, Recipe::default())
    }
}

impl Stand {
    /// Open a stand with no stock.
    #[must_use]
    pub fn new(starting_cash: f64, price_per_cup: f64, recipe: Recipe) -> Self {
        Self {
            inventory: Inventory::default(),
            recipe,
            cash: starting_cash.max(0.0),
            price_per_cup: price_per_cup.max(0.0),
        }
    }

    #[must_use]
    pub const fn cash(&self) -> f64 {
        self.cash
    }

    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    #[must_use]
    pub const fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    #[must_use]
    pub const fn price_per_cup(&self) -> f64 {
        self.price_per_cup
    }

    /// Cups the current stock can produce.
    #[must_use]
    pub fn cups_possible(&self) -> u32 {
        let per = |have: u32, need: u32| have.checked_div(need).unwrap_or(u32::MAX);
        self.inventory
            .cups
            .min(per(self.inventory.lemons, self.recipe.lemons))
            .min(per(self.inventory.sugar, self.recipe.sugar))
            .min(per(self.inventory.ice, self.recipe.ice))
    }

    /// Buy `quantity` units of `supply` at `unit_price` each.
    ///
    /// A zero quantity always succeeds without changing anything.
    ///
    /// # Errors
    ///
    /// Returns [`StandError::InsufficientFunds`] when the total exceeds cash on
    /// hand, [`StandError::InvalidPrice`] for a negative or non-finite price, or
    /// [`StandError::StockLimit`] when the new count would not fit in a `u32`.
    /// The stand is unchanged on error.
    pub fn purchase(
        &mut self,
        supply: Supply,
        quantity: u32,
        unit_price: f64,
    ) -> Result<PurchaseReceipt, StandError> {
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(StandError::InvalidPrice {
                supply,
                price: unit_price,
            });
        }
        let charged = money_for(quantity, unit_price);
        if charged > self.cash {
            return Err(StandError::InsufficientFunds {
                supply,
                cost: charged,
                available: self.cash,
            });
        }
        let held = self.inventory.get(supply);
        let Some(stocked) = held.checked_add(quantity) else {
            return Err(StandError::StockLimit {
                supply,
                held,
                requested: u64::from(quantity),
            });
        };
        *self.inventory.slot_mut(supply) = stocked;
        self.cash -= charged;
        Ok(PurchaseReceipt {
            supply,
            quantity,
            unit_price,
            charged,
            cash_after: self.cash,
        })
    }

    /// Make and sell one cup of lemonade if the stock allows it.
    pub fn sell_one_cup(&mut self) -> Sale {
        if !self.inventory.covers(&self.recipe) {
            return Sale::OutOfStock;
        }
        self.inventory.cups -= 1;
        self.inventory.lemons -= self.recipe.lemons;
        self.inventory.sugar -= self.recipe.sugar;
        self.inventory.ice -= self.recipe.ice;
        self.cash += self.price_per_cup;
        Sale::Sold
    }
}
