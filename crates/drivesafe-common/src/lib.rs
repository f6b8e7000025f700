//! # DriveSafe Common
//!
//! Shared domain types and the unified error type for the DriveSafe
//! telemetry-to-premium pipeline.
//!
//! ## Key Concepts
//!
//! - **TelemetrySample**: one moment of vehicle state (fixed-field record)
//! - **TripSummary**: durable record of one completed, scored trip
//! - **RiskIndex**: rolling distance-weighted aggregate of drive scores
//! - **RiskCategory**: named score band with a premium multiplier
//! - **Policy / PremiumRecord**: the priced insurance entities

pub mod error;
pub mod types;

pub use error::{DriveSafeError, Result};
pub use types::{
    Notification, Policy, PolicyStatus, PremiumRecord, RiskCategory, RiskIndex, TelemetrySample,
    TripSummary, Vehicle, MAX_SCORE, MIN_SCORE,
};
