//! Daily supply prices.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CUP_PRICE_MAX, CUP_PRICE_MIN, ICE_BAG_SIZE, ICE_PRICE_MAX, ICE_PRICE_MIN, LEMON_PRICE_MAX,
    LEMON_PRICE_MIN, SUGAR_PRICE_MAX, SUGAR_PRICE_MIN,
};
use crate::rng::RandomSource;
use crate::state::Supply;

/// Half-open price range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub min: f64,
    pub max: f64,
}

impl PriceBand {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a unit draw onto the band. The result stays below `max` even when
    /// the fused multiply-add rounds up for draws close to 1.
    #[must_use]
    pub fn sample(&self, unit: f64) -> f64 {
        let price = (self.max - self.min).mul_add(unit, self.min);
        if price < self.max {
            price
        } else {
            self.max.next_down()
        }
    }

    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        (self.min..self.max).contains(&price)
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}, {:.2})", self.min, self.max)
    }
}

/// Price bands for each supply. Ice is priced per bag of 100 cubes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBands {
    #[serde(default = "PriceBands::default_cups")]
    pub cups: PriceBand,
    #[serde(default = "PriceBands::default_lemons")]
    pub lemons: PriceBand,
    #[serde(default = "PriceBands::default_sugar")]
    pub sugar: PriceBand,
    #[serde(default = "PriceBands::default_ice")]
    pub ice_per_hundred: PriceBand,
}

impl PriceBands {
    const fn default_cups() -> PriceBand {
        PriceBand::new(CUP_PRICE_MIN, CUP_PRICE_MAX)
    }

    const fn default_lemons() -> PriceBand {
        PriceBand::new(LEMON_PRICE_MIN, LEMON_PRICE_MAX)
    }

    const fn default_sugar() -> PriceBand {
        PriceBand::new(SUGAR_PRICE_MIN, SUGAR_PRICE_MAX)
    }

    const fn default_ice() -> PriceBand {
        PriceBand::new(ICE_PRICE_MIN, ICE_PRICE_MAX)
    }

    #[must_use]
    pub const fn band(&self, supply: Supply) -> &PriceBand {
        match supply {
            Supply::Cups => &self.cups,
            Supply::Lemons => &self.lemons,
            Supply::Sugar => &self.sugar,
            Supply::Ice => &self.ice_per_hundred,
        }
    }
}

impl Default for PriceBands {
    fn default() -> Self {
        Self {
            cups: Self::default_cups(),
            lemons: Self::default_lemons(),
            sugar: Self::default_sugar(),
            ice_per_hundred: Self::default_ice(),
        }
    }
}

/// Today's supply prices. Generated each morning and thrown away after
/// shopping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPrices {
    pub cups: f64,
    pub lemons: f64,
    pub sugar: f64,
    /// Price of one bag of 100 ice cubes.
    pub ice_per_hundred: f64,
}

impl DailyPrices {
    /// Price of a single ice cube.
    #[must_use]
    pub fn ice_unit_price(&self) -> f64 {
        self.ice_per_hundred / f64::from(ICE_BAG_SIZE)
    }

    /// Price of a single unit of `supply`, as charged by a purchase.
    #[must_use]
    pub fn unit_price(&self, supply: Supply) -> f64 {
        match supply {
            Supply::Cups => self.cups,
            Supply::Lemons => self.lemons,
            Supply::Sugar => self.sugar,
            Supply::Ice => self.ice_unit_price(),
        }
    }
}

/// Draw today's prices: cups, lemons, sugar, then ice.
pub fn generate_daily_prices<R>(bands: &PriceBands, rng: &mut R) -> DailyPrices
where
    R: RandomSource + ?Sized,
{
    let cups = bands.cups.sample(rng.next_unit());
    let lemons = bands.lemons.sample(rng.next_unit());
    let sugar = bands.sugar.sample(rng.next_unit());
    let ice_per_hundred = bands.ice_per_hundred.sample(rng.next_unit());
    log::debug!(
        "prices drawn: cups {cups:.4}, lemons {lemons:.4}, sugar {sugar:.4}, ice/100 {ice_per_hundred:.4}"
    );
    DailyPrices {
        cups,
        lemons,
        sugar,
        ice_per_hundred,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBundle, ScriptedSource};

    #[test]
    fn prices_follow_draw_order() {
        let mut rng = ScriptedSource::new(vec![0.0, 0.5, 0.2, 0.5]).unwrap();
        let prices = generate_daily_prices(&PriceBands::default(), &mut rng);
        assert!((prices.cups - 0.05).abs() < 1e-12);
        assert!((prices.lemons - 0.25).abs() < 1e-12);
        assert!((prices.sugar - 0.11).abs() < 1e-12);
        assert!((prices.ice_per_hundred - 0.015).abs() < 1e-12);
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    fn seeded_prices_stay_in_bands() {
        let bands = PriceBands::default();
        let mut bundle = RngBundle::from_user_seed(99);
        for _ in 0..500 {
            let prices = generate_daily_prices(&bands, bundle.market());
            for supply in [Supply::Cups, Supply::Lemons, Supply::Sugar] {
                assert!(bands.band(supply).contains(prices.unit_price(supply)));
            }
            assert!(bands.ice_per_hundred.contains(prices.ice_per_hundred));
        }
    }

    #[test]
    fn top_of_band_is_excluded() {
        let bands = PriceBands::default();
        for supply in Supply::ALL {
            let band = bands.band(supply);
            for unit in [1.0_f64.next_down(), 1.0] {
                let price = band.sample(unit);
                assert!(band.contains(price), "{supply}: {price} outside {band}");
            }
        }
        let narrow = PriceBand::new(0.1, 0.1_f64.next_up());
        assert!((narrow.sample(0.999_999) - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn ice_is_priced_per_cube() {
        let prices = DailyPrices {
            cups: 0.06,
            lemons: 0.25,
            sugar: 0.12,
            ice_per_hundred: 0.015,
        };
        assert!((prices.unit_price(Supply::Ice) - 0.00015).abs() < 1e-15);
        let bag_cost = f64::from(3 * ICE_BAG_SIZE) * prices.ice_unit_price();
        assert!((bag_cost - 0.045).abs() < 1e-12);
    }
}
