//! Error types for the DriveSafe pipeline
//!
//! Provides a unified error type covering every failure the core surfaces:
//! lookup misses, empty-data conditions, band misconfiguration, scoring
//! outages, and update conflicts. Nothing is swallowed in-core; retry
//! policy belongs to the caller.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using DriveSafeError
pub type Result<T> = std::result::Result<T, DriveSafeError>;

/// Unified error type for DriveSafe operations
#[derive(Debug, Error)]
pub enum DriveSafeError {
    // Session errors
    #[error("no telemetry recorded for session: {0}")]
    NoDataForSession(String),

    // Lookup misses
    #[error("vehicle not found: {0}")]
    VehicleNotFound(Uuid),

    #[error("no vehicle registered for user: {0}")]
    VehicleNotFoundForUser(Uuid),

    #[error("policy not found: {0}")]
    PolicyNotFound(Uuid),

    #[error("no policy found for user: {0}")]
    PolicyNotFoundForUser(Uuid),

    // Empty-data conditions
    #[error("no trip summaries available for vehicle {vehicle_id}")]
    InsufficientHistory { vehicle_id: Uuid },

    #[error("no risk index computed yet for user: {user_id}")]
    NoRiskIndex { user_id: Uuid },

    // Band configuration
    #[error("no risk category covers score {score}")]
    NoCategoryForScore { score: f32 },

    #[error("risk band configuration error: {0}")]
    BandConfiguration(String),

    // Upstream scoring service
    #[error("scoring service unavailable: {0}")]
    ScoringUnavailable(String),

    // Concurrency
    #[error("concurrent update conflict: {0}")]
    Conflict(String),

    // Storage collaborator
    #[error("storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    // Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl DriveSafeError {
    /// Whether this error is a lookup miss rather than a processing failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DriveSafeError::NoDataForSession(_)
                | DriveSafeError::VehicleNotFound(_)
                | DriveSafeError::VehicleNotFoundForUser(_)
                | DriveSafeError::PolicyNotFound(_)
                | DriveSafeError::PolicyNotFoundForUser(_)
                | DriveSafeError::NoCategoryForScore { .. }
        )
    }
}

// Implement From for common external error types
impl From<serde_json::Error> for DriveSafeError {
    fn from(err: serde_json::Error) -> Self {
        DriveSafeError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for DriveSafeError {
    fn from(err: anyhow::Error) -> Self {
        DriveSafeError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DriveSafeError::NoDataForSession("session-42".to_string());
        assert!(err.to_string().contains("session-42"));
    }

    #[test]
    fn test_not_found_classification() {
        let user_id = Uuid::new_v4();
        assert!(DriveSafeError::PolicyNotFound(user_id).is_not_found());
        assert!(!DriveSafeError::ScoringUnavailable("timeout".into()).is_not_found());
    }
}
