//! Centralized balance constants for the lemonade stand simulation.
//!
//! These values define the default economy. `GameConfig` may override the
//! run-level ones (days, money, recipe, price bands); the weather thresholds
//! and demand ranges are fixed.

// Run defaults -------------------------------------------------------------
pub const SIMULATION_DAYS: u32 = 7;
pub const STARTING_CASH: f64 = 50.00;
pub const PRICE_PER_CUP: f64 = 0.50;

// Recipe (per cup of lemonade) ---------------------------------------------
pub const LEMONS_PER_CUP: u32 = 1;
pub const SUGAR_PER_CUP: u32 = 1;
pub const ICE_PER_CUP: u32 = 4;

// Supply price bands, [min, max) ------------------------------------------
pub const CUP_PRICE_MIN: f64 = 0.05;
pub const CUP_PRICE_MAX: f64 = 0.07;
pub const LEMON_PRICE_MIN: f64 = 0.20;
pub const LEMON_PRICE_MAX: f64 = 0.30;
pub const SUGAR_PRICE_MIN: f64 = 0.10;
pub const SUGAR_PRICE_MAX: f64 = 0.15;
/// Ice is priced per bag of [`ICE_BAG_SIZE`] cubes.
pub const ICE_PRICE_MIN: f64 = 0.01;
pub const ICE_PRICE_MAX: f64 = 0.02;
pub const ICE_BAG_SIZE: u32 = 100;

// Weather thresholds -------------------------------------------------------
pub const CLOUDY_BELOW: f64 = 0.33;
pub const SUNNY_BELOW: f64 = 0.66;

// Demand (base customers, random spread) -----------------------------------
pub const CLOUDY_BASE_CUSTOMERS: u32 = 20;
pub const CLOUDY_CUSTOMER_SPREAD: u32 = 10;
pub const SUNNY_BASE_CUSTOMERS: u32 = 40;
pub const SUNNY_CUSTOMER_SPREAD: u32 = 20;
pub const HOT_BASE_CUSTOMERS: u32 = 60;
pub const HOT_CUSTOMER_SPREAD: u32 = 40;

// RNG stream domain tags ---------------------------------------------------
pub(crate) const RNG_DOMAIN_MARKET: &[u8] = b"market";
pub(crate) const RNG_DOMAIN_WEATHER: &[u8] = b"weather";
pub(crate) const RNG_DOMAIN_DEMAND: &[u8] = b"demand";
