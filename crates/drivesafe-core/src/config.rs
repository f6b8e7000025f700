//! DriveSafe configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveSafeConfig {
    /// Risk aggregation settings
    pub risk: RiskSettings,
    /// Scoring service settings
    pub scoring: ScoringSettings,
}

impl Default for DriveSafeConfig {
    fn default() -> Self {
        Self {
            risk: RiskSettings::default(),
            scoring: ScoringSettings::default(),
        }
    }
}

impl DriveSafeConfig {
    /// Load configuration from environment and .env files
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(val) = std::env::var("DRIVESAFE_RISK_WINDOW") {
            if let Ok(v) = val.parse() {
                cfg.risk.window = v;
            }
        }
        if let Ok(val) = std::env::var("DRIVESAFE_REWARD_WINDOW") {
            if let Ok(v) = val.parse() {
                cfg.risk.reward_window = v;
            }
        }
        if let Ok(val) = std::env::var("DRIVESAFE_SCORING_TIMEOUT_MS") {
            if let Ok(v) = val.parse() {
                cfg.scoring.timeout_ms = v;
            }
        }
        if let Ok(endpoint) = std::env::var("DRIVESAFE_SCORING_ENDPOINT") {
            cfg.scoring.endpoint = Some(endpoint);
        }

        Ok(cfg)
    }
}

/// Risk aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSettings {
    /// How many recent trips feed the rolling risk index (N)
    pub window: usize,
    /// How many recent trips feed the reward-point total
    pub reward_window: usize,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            window: crate::DEFAULT_RISK_WINDOW,
            reward_window: crate::DEFAULT_REWARD_WINDOW,
        }
    }
}

/// Scoring service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    /// Hard deadline for one scoring call (milliseconds)
    pub timeout_ms: u64,
    /// Scoring service endpoint, consumed by the transport adapter that
    /// hosts the core (optional)
    pub endpoint: Option<String>,
}

impl ScoringSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            timeout_ms: crate::DEFAULT_SCORING_TIMEOUT_MS,
            endpoint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = DriveSafeConfig::default();
        assert_eq!(cfg.risk.window, 10);
        assert_eq!(cfg.scoring.timeout(), Duration::from_millis(5000));
    }
}
