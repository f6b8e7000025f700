//! # DriveSafe Core
//!
//! The telemetry-to-premium pipeline: live samples are buffered into
//! sessions, finalized sessions become scored trips, recent trips roll
//! into a distance-weighted risk index, and the risk index drives premium
//! recalculation through banded risk categories.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     DriveSafeService                        │
//! │                                                             │
//! │  samples ──► SessionBuffer ──► finalize ──► ScoringClient   │
//! │                                   │              │          │
//! │                                   ▼              ▼          │
//! │                             TripSummary ◄── drive score     │
//! │                                   │         + reward tier   │
//! │                                   ▼                         │
//! │              recent trips ──► risk index ──► risk category  │
//! │                                                  │          │
//! │                                                  ▼          │
//! │                     Policy + PremiumRecord ◄── premium      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage, scoring, and notification are collaborators behind
//! [`TelemetryStore`], [`ScoringClient`], and [`Notifier`].

pub mod config;
pub mod notify;
pub mod premium;
pub mod risk;
pub mod scoring;
pub mod service;
pub mod session;
pub mod storage;

// Re-export core surface
pub use config::{DriveSafeConfig, RiskSettings, ScoringSettings};
pub use notify::{InMemoryNotifier, Notifier};
pub use premium::{quote, PremiumQuote, PREMIUM_VALIDITY_MONTHS};
pub use risk::{default_bands, resolve_category, validate_bands, weighted_risk_index};
pub use scoring::{reward_points, score_with_timeout, ScoringClient, TripStats};
pub use service::{DriveSafeService, PremiumStatement, TripReport};
pub use session::{FinalizedSession, SessionBuffer};
pub use storage::{InMemoryStore, TelemetryStore};

/// Default number of recent trips in the risk aggregation window
pub const DEFAULT_RISK_WINDOW: usize = 10;

/// Default number of recent trips in the reward-point total
pub const DEFAULT_REWARD_WINDOW: usize = 10;

/// Default scoring service deadline (milliseconds)
pub const DEFAULT_SCORING_TIMEOUT_MS: u64 = 5000;
