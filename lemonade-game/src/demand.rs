//! Potential customers per day, driven by the weather.
use std::ops::RangeInclusive;

use crate::constants::{
    CLOUDY_BASE_CUSTOMERS, CLOUDY_CUSTOMER_SPREAD, HOT_BASE_CUSTOMERS, HOT_CUSTOMER_SPREAD,
    SUNNY_BASE_CUSTOMERS, SUNNY_CUSTOMER_SPREAD,
};
use crate::rng::RandomSource;
use crate::weather::Weather;

const fn base_and_spread(weather: Weather) -> (u32, u32) {
    match weather {
        Weather::Cloudy => (CLOUDY_BASE_CUSTOMERS, CLOUDY_CUSTOMER_SPREAD),
        Weather::Sunny => (SUNNY_BASE_CUSTOMERS, SUNNY_CUSTOMER_SPREAD),
        Weather::Hot => (HOT_BASE_CUSTOMERS, HOT_CUSTOMER_SPREAD),
    }
}

/// Every count [`potential_customers`] can return for `weather`.
#[must_use]
pub const fn customer_range(weather: Weather) -> RangeInclusive<u32> {
    let (base, spread) = base_and_spread(weather);
    base..=base + spread - 1
}

/// Maximum sale attempts for the day. Not every customer buys.
pub fn potential_customers<R>(weather: Weather, rng: &mut R) -> u32
where
    R: RandomSource + ?Sized,
{
    let (base, spread) = base_and_spread(weather);
    let customers = base + rng.next_below(spread);
    log::debug!("{weather:?} brings {customers} potential customers");
    customers
}
