//! Run-level configuration.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{PRICE_PER_CUP, SIMULATION_DAYS, STARTING_CASH};
use crate::market::{PriceBand, PriceBands};
use crate::state::{Recipe, Stand, Supply};

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("a run needs at least one day")]
    NoDays,
    #[error("{field} must be a finite, non-negative amount (got {value})")]
    Money { field: &'static str, value: f64 },
    #[error("recipe must use at least one ingredient")]
    EmptyRecipe,
    #[error("price band for {supply} is invalid: {band}")]
    Band { supply: Supply, band: PriceBand },
}

/// Tunable parameters of a run. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub days: u32,
    pub starting_cash: f64,
    pub price_per_cup: f64,
    pub recipe: Recipe,
    pub price_bands: PriceBands,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            days: SIMULATION_DAYS,
            starting_cash: STARTING_CASH,
            price_per_cup: PRICE_PER_CUP,
            recipe: Recipe::default(),
            price_bands: PriceBands::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or validation fails.
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::NoDays);
        }
        for (field, value) in [
            ("starting_cash", self.starting_cash),
            ("price_per_cup", self.price_per_cup),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Money { field, value });
            }
        }
        let recipe = &self.recipe;
        if recipe.lemons == 0 && recipe.sugar == 0 && recipe.ice == 0 {
            return Err(ConfigError::EmptyRecipe);
        }
        for supply in Supply::ALL {
            let band = *self.price_bands.band(supply);
            let valid = band.min.is_finite() && band.max.is_finite();
            if !valid || band.min < 0.0 || band.min >= band.max {
                return Err(ConfigError::Band { supply, band });
            }
        }
        Ok(())
    }

    /// A fresh, empty stand for this configuration.
    #[must_use]
    pub fn open_stand(&self) -> Stand {
        Stand::new(self.starting_cash, self.price_per_cup, self.recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants_and_validate() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.days, 7);
        assert!((cfg.starting_cash - 50.0).abs() < f64::EPSILON);
        assert!((cfg.price_per_cup - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.recipe, Recipe { lemons: 1, sugar: 1, ice: 4 });
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GameConfig::from_json(r#"{ "days": 3, "recipe": { "lemons": 2, "sugar": 1, "ice": 6 } }"#)
            .unwrap();
        assert_eq!(cfg.days, 3);
        assert_eq!(cfg.recipe.lemons, 2);
        assert_eq!(cfg.price_bands, PriceBands::default());

        let cfg = GameConfig::from_json(r#"{ "price_bands": { "cups": { "min": 0.01, "max": 0.02 } } }"#)
            .unwrap();
        assert!((cfg.price_bands.cups.max - 0.02).abs() < f64::EPSILON);
        assert_eq!(cfg.price_bands.lemons, PriceBands::default().lemons);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert_eq!(GameConfig::from_json(r#"{ "days": 0 }"#), Err(ConfigError::NoDays));
        assert!(matches!(
            GameConfig::from_json(r#"{ "starting_cash": -1.0 }"#),
            Err(ConfigError::Money { field: "starting_cash", .. })
        ));
        assert_eq!(
            GameConfig::from_json(r#"{ "recipe": { "lemons": 0, "sugar": 0, "ice": 0 } }"#),
            Err(ConfigError::EmptyRecipe)
        );
        assert!(matches!(
            GameConfig::from_json(r#"{ "price_bands": { "sugar": { "min": 0.2, "max": 0.1 } } }"#),
            Err(ConfigError::Band { supply: Supply::Sugar, .. })
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn open_stand_uses_config_values() {
        let cfg = GameConfig {
            starting_cash: 12.5,
            ..GameConfig::default()
        };
        let stand = cfg.open_stand();
        assert!((stand.cash() - 12.5).abs() < f64::EPSILON);
        assert_eq!(stand.inventory().cups, 0);
    }
}
