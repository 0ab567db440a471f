//! Random sources for the daily market, weather, and demand draws.
//!
//! Every random draw in the engine goes through [`RandomSource`], so tests can
//! swap the seeded streams for a [`ScriptedSource`].

use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use sha2::Sha256;
use thiserror::Error;

use crate::constants::{RNG_DOMAIN_DEMAND, RNG_DOMAIN_MARKET, RNG_DOMAIN_WEATHER};
use crate::numbers::floor_f64_to_u32;

/// Uniform random values in `[0, 1)`.
pub trait RandomSource {
    /// Draw a uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Draw a uniform integer in `[0, bound)`. A zero bound always yields 0.
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        floor_f64_to_u32(self.next_unit() * f64::from(bound)).min(bound - 1)
    }
}

/// Errors raised when building a scripted source.
#[derive(Debug, Error, PartialEq)]
pub enum RngError {
    #[error("scripted value {value} at index {index} is outside [0, 1)")]
    OutOfRange { index: usize, value: f64 },
    #[error("scripted source needs at least one value")]
    Empty,
}

/// Deterministic bundle of RNG streams segregated by simulation domain.
#[derive(Debug, Clone)]
pub struct RngBundle {
    market: CountingRng<SmallRng>,
    weather: CountingRng<SmallRng>,
    demand: CountingRng<SmallRng>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            market: CountingRng::new(derive_stream_seed(seed, RNG_DOMAIN_MARKET)),
            weather: CountingRng::new(derive_stream_seed(seed, RNG_DOMAIN_WEATHER)),
            demand: CountingRng::new(derive_stream_seed(seed, RNG_DOMAIN_DEMAND)),
        }
    }

    /// Access the supply price stream.
    pub const fn market(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.market
    }

    /// Access the weather stream.
    pub const fn weather(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.weather
    }

    /// Access the customer count stream.
    pub const fn demand(&mut self) -> &mut CountingRng<SmallRng> {
        &mut self.demand
    }

    /// Total draws across every stream.
    #[must_use]
    pub const fn total_draws(&self) -> u64 {
        self.market
            .draws()
            .saturating_add(self.weather.draws())
            .saturating_add(self.demand.draws())
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

impl<R: RngCore> RandomSource for CountingRng<R> {
    fn next_unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// Replays a fixed list of unit values, cycling when exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Build a source from values that must all lie in `[0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or a value is out of range.
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self, RngError> {
        let values = values.into();
        if values.is_empty() {
            return Err(RngError::Empty);
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..1.0).contains(*v))
        {
            return Err(RngError::OutOfRange { index, value });
        }
        Ok(Self { values, cursor: 0 })
    }

    /// Always yields the same value.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is outside `[0, 1)`.
    pub fn constant(value: f64) -> Result<Self, RngError> {
        Self::new(vec![value])
    }

    /// Values consumed so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.saturating_add(1);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_streams_are_seed_stable() {
        let mut one = RngBundle::from_user_seed(42);
        let mut two = RngBundle::from_user_seed(42);
        for _ in 0..16 {
            assert_eq!(one.market().next_unit(), two.market().next_unit());
            assert_eq!(one.weather().next_unit(), two.weather().next_unit());
            assert_eq!(one.demand().next_unit(), two.demand().next_unit());
        }
        assert_eq!(one.total_draws(), 48);
    }

    #[test]
    fn domains_produce_distinct_streams() {
        let mut bundle = RngBundle::from_user_seed(7);
        let market: Vec<u64> = (0..4).map(|_| bundle.market().next_u64()).collect();
        let weather: Vec<u64> = (0..4).map(|_| bundle.weather().next_u64()).collect();
        assert_ne!(market, weather);
    }

    #[test]
    fn unit_draws_stay_in_range() {
        let mut bundle = RngBundle::from_user_seed(0xC0FFEE);
        for _ in 0..1_000 {
            let r = bundle.demand().next_unit();
            assert!((0.0..1.0).contains(&r));
            assert!(bundle.demand().next_below(10) < 10);
        }
    }

    #[test]
    fn scripted_source_cycles_and_validates() {
        let mut scripted = ScriptedSource::new(vec![0.1, 0.5, 0.99]).unwrap();
        assert!((scripted.next_unit() - 0.1).abs() < f64::EPSILON);
        assert!((scripted.next_unit() - 0.5).abs() < f64::EPSILON);
        assert_eq!(scripted.next_below(10), 9);
        assert!((scripted.next_unit() - 0.1).abs() < f64::EPSILON);
        assert_eq!(scripted.consumed(), 4);

        assert_eq!(
            ScriptedSource::new(vec![0.2, 1.0]),
            Err(RngError::OutOfRange {
                index: 1,
                value: 1.0
            })
        );
        assert_eq!(ScriptedSource::new(Vec::new()), Err(RngError::Empty));
    }

    #[test]
    fn next_below_handles_zero_bound() {
        let mut scripted = ScriptedSource::constant(0.75).unwrap();
        assert_eq!(scripted.next_below(0), 0);
        assert_eq!(scripted.next_below(4), 3);
    }
}
