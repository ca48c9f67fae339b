//! Win-statistics counter
//!
//! One counter per kind, persisted to LocalStorage so the readout survives
//! reloads. A failed write is reported to the caller and never stops the
//! battle loop. Updates take `&mut self`: one writer at a time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::Kind;

/// Accumulated battle outcomes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WinStats {
    pub rocks: u64,
    pub papers: u64,
    pub scissors: u64,
    /// Unix timestamp (ms) of the last recorded win
    #[serde(default)]
    pub updated_at: f64,
}

/// A statistics write that could not be persisted
#[derive(Debug)]
pub enum StatsError {
    /// LocalStorage is unavailable (blocked or not a browser context)
    Unavailable,
    Serialize(serde_json::Error),
    Write(String),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::Unavailable => write!(f, "statistics storage unavailable"),
            StatsError::Serialize(e) => write!(f, "statistics serialization failed: {e}"),
            StatsError::Write(e) => write!(f, "statistics write failed: {e}"),
        }
    }
}

impl std::error::Error for StatsError {}

impl WinStats {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rps_arena_win_stats";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: Kind) -> u64 {
        match kind {
            Kind::Rock => self.rocks,
            Kind::Paper => self.papers,
            Kind::Scissors => self.scissors,
        }
    }

    pub fn total(&self) -> u64 {
        self.rocks + self.papers + self.scissors
    }

    /// Increment the winner's counter and persist. The counter is bumped
    /// even when the write fails; the error is the caller's to report.
    pub fn record_win(&mut self, kind: Kind, timestamp: f64) -> Result<(), StatsError> {
        match kind {
            Kind::Rock => self.rocks += 1,
            Kind::Paper => self.papers += 1,
            Kind::Scissors => self.scissors += 1,
        }
        self.updated_at = timestamp;
        self.save()
    }

    /// Share of battles won by `kind`, as a percentage (0 with no battles)
    pub fn share(&self, kind: Kind) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(kind) as f64 * 100.0 / total as f64
        }
    }

    /// Load statistics from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(stats) = serde_json::from_str::<WinStats>(&json) {
                    log::info!("Loaded win statistics ({} battles)", stats.total());
                    return stats;
                }
            }
        }

        log::info!("No win statistics found, starting fresh");
        Self::new()
    }

    /// Save statistics to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), StatsError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StatsError::Unavailable)?;

        let json = serde_json::to_string(self).map_err(StatsError::Serialize)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| StatsError::Write(format!("{e:?}")))?;
        log::info!("Win statistics saved ({} battles)", self.total());
        Ok(())
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), StatsError> {
        Ok(())
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_win_counts() {
        let mut stats = WinStats::new();
        stats.record_win(Kind::Rock, 1.0).unwrap();
        stats.record_win(Kind::Rock, 2.0).unwrap();
        stats.record_win(Kind::Scissors, 3.0).unwrap();

        assert_eq!(stats.count(Kind::Rock), 2);
        assert_eq!(stats.count(Kind::Paper), 0);
        assert_eq!(stats.count(Kind::Scissors), 1);
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.updated_at, 3.0);
    }

    #[test]
    fn test_share_percentages() {
        let mut stats = WinStats::new();
        assert_eq!(stats.share(Kind::Rock), 0.0);

        stats.record_win(Kind::Rock, 1.0).unwrap();
        stats.record_win(Kind::Rock, 2.0).unwrap();
        stats.record_win(Kind::Paper, 3.0).unwrap();
        stats.record_win(Kind::Scissors, 4.0).unwrap();

        assert_eq!(stats.share(Kind::Rock), 50.0);
        assert_eq!(stats.share(Kind::Paper), 25.0);
        assert_eq!(stats.share(Kind::Scissors), 25.0);
    }

    #[test]
    fn test_round_trips_as_json() {
        let mut stats = WinStats::new();
        stats.record_win(Kind::Paper, 7.0).unwrap();

        let json = serde_json::to_string(&stats).unwrap();
        let back: WinStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.papers, 1);
        assert_eq!(back.total(), 1);
    }
}
