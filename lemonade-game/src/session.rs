use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::day::{DayReport, run_day};
use crate::io::{GameEvent, InputError, StandIo};
use crate::rng::RngBundle;
use crate::state::Stand;

/// Errors raised while driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the season is over after {days} days")]
    Finished { days: u32 },
    #[error(transparent)]
    Input(#[from] InputError),
}

/// Final tally printed once the last day closes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub days: u32,
    pub starting_cash: f64,
    pub final_cash: f64,
    pub cups_sold: u32,
}

impl GameSummary {
    #[must_use]
    pub fn profit(&self) -> f64 {
        self.final_cash - self.starting_cash
    }
}

/// A single run: one stand, one seed, a fixed number of days.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    stand: Stand,
    rngs: RngBundle,
    seed: u64,
    history: Vec<DayReport>,
}

impl GameSession {
    /// Open a session for `config`, seeding every random stream from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let stand = config.open_stand();
        Ok(Self {
            stand,
            rngs: RngBundle::from_user_seed(seed),
            seed,
            history: Vec::new(),
            config,
        })
    }

    /// The day about to be played, in `1..=days`; `None` once the season is over.
    #[must_use]
    pub fn current_day(&self) -> Option<u32> {
        let played = self.days_played();
        (played < self.config.days).then_some(played + 1)
    }

    #[must_use]
    pub fn days_played(&self) -> u32 {
        u32::try_from(self.history.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current_day().is_none()
    }

    #[must_use]
    pub const fn stand(&self) -> &Stand {
        &self.stand
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn history(&self) -> &[DayReport] {
        &self.history
    }

    /// Play the next day.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Finished`] once every day has been played, or
    /// the input collaborator's failure.
    pub fn play_day<Io>(&mut self, io: &mut Io) -> Result<DayReport, SessionError>
    where
        Io: StandIo + ?Sized,
    {
        let Some(day) = self.current_day() else {
            return Err(SessionError::Finished {
                days: self.config.days,
            });
        };
        let report = run_day(
            day,
            self.config.days,
            &mut self.stand,
            &self.config.price_bands,
            &mut self.rngs,
            io,
        )?;
        self.history.push(report);
        Ok(report)
    }

    /// Tally of the days played so far.
    #[must_use]
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            days: self.days_played(),
            starting_cash: self.config.starting_cash,
            final_cash: self.stand.cash(),
            cups_sold: self.history.iter().map(|report| report.cups_sold).sum(),
        }
    }

    /// Play every remaining day, then announce the final summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the input collaborator fails.
    pub fn run<Io>(mut self, io: &mut Io) -> Result<GameSummary, SessionError>
    where
        Io: StandIo + ?Sized,
    {
        log::info!(
            "opening stand for {} days with seed {}",
            self.config.days,
            self.seed
        );
        while !self.is_finished() {
            self.play_day(io)?;
        }
        let summary = self.summary();
        log::info!(
            "season over: {:.2} -> {:.2} ({} cups)",
            summary.starting_cash,
            summary.final_cash,
            summary.cups_sold
        );
        io.notify(&GameEvent::GameOver(summary));
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ScriptedIo;

    fn answers(days: u32) -> Vec<u32> {
        (0..days).flat_map(|_| [2, 2, 2, 1]).collect()
    }

    #[test]
    fn session_counts_days_and_refuses_extra() {
        let config = GameConfig {
            days: 2,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config, 5).unwrap();
        let mut io = ScriptedIo::new(answers(3));
        assert_eq!(session.current_day(), Some(1));
        session.play_day(&mut io).unwrap();
        assert_eq!(session.current_day(), Some(2));
        session.play_day(&mut io).unwrap();
        assert!(session.is_finished());
        assert!(matches!(
            session.play_day(&mut io),
            Err(SessionError::Finished { days: 2 })
        ));
        assert_eq!(session.days_played(), 2);
        assert_eq!(io.remaining(), 4);
    }

    #[test]
    fn run_plays_every_day_then_reports() {
        let session = GameSession::new(GameConfig::default(), 77).unwrap();
        let mut io = ScriptedIo::new(answers(7));
        let summary = session.run(&mut io).unwrap();
        assert_eq!(summary.days, 7);
        assert_eq!(summary.cups_sold, 14);
        assert!(matches!(io.events().last(), Some(GameEvent::GameOver(_))));
        let day_starts = io
            .events()
            .iter()
            .filter(|event| matches!(event, GameEvent::DayStarted { .. }))
            .count();
        assert_eq!(day_starts, 7);
    }

    #[test]
    fn closed_input_surfaces_as_error() {
        let session = GameSession::new(GameConfig::default(), 1).unwrap();
        let mut io = ScriptedIo::new([1, 1]);
        assert!(matches!(
            session.run(&mut io),
            Err(SessionError::Input(InputError::Closed))
        ));
    }

    #[test]
    fn long_season_opens_without_reserving_history() {
        let config = GameConfig::from_json(r#"{ "days": 4000000000 }"#).unwrap();
        let mut session = GameSession::new(config, 1).unwrap();
        assert_eq!(session.current_day(), Some(1));
        assert!(session.history().is_empty());

        let mut io = ScriptedIo::new([0, 0, 0, 0]);
        session.play_day(&mut io).unwrap();
        assert_eq!(session.current_day(), Some(2));
        assert!(!session.is_finished());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            days: 0,
            ..GameConfig::default()
        };
        assert_eq!(GameSession::new(config, 1).unwrap_err(), ConfigError::NoDays);
    }
}
