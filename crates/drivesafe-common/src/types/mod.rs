//! Domain types shared across the DriveSafe workspace

pub mod notification;
pub mod policy;
pub mod risk;
pub mod sample;
pub mod trip;

pub use notification::Notification;
pub use policy::{Policy, PolicyStatus, PremiumRecord, Vehicle};
pub use risk::{RiskCategory, RiskIndex, MAX_SCORE, MIN_SCORE};
pub use sample::TelemetrySample;
pub use trip::TripSummary;
