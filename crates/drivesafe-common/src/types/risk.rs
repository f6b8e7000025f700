//! Risk index and risk category reference data
//!
//! The risk index ("DRISC score") is the rolling, distance-weighted
//! aggregate of recent drive scores used to price insurance. Risk
//! categories are static bands over the index with premium multipliers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest valid drive score / risk index value
pub const MIN_SCORE: f32 = 0.0;

/// Highest valid drive score / risk index value
pub const MAX_SCORE: f32 = 100.0;

/// A rolling risk score for a user, computed from recent trip summaries.
///
/// Each computation produces a new record; history is retained and the
/// latest entry supersedes earlier ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskIndex {
    /// Unique record ID
    pub id: Uuid,
    /// User the index belongs to
    pub user_id: Uuid,
    /// Distance-weighted mean of recent drive scores
    pub score: f32,
    /// Number of trips in the aggregation window, including trips that
    /// contributed no weight
    pub trips_considered: u32,
    /// When the index was computed
    pub calculated_at: DateTime<Utc>,
}

impl RiskIndex {
    pub fn new(user_id: Uuid, score: f32, trips_considered: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            score,
            trips_considered,
            calculated_at: Utc::now(),
        }
    }
}

/// A named risk band with an associated premium multiplier.
///
/// Bands must jointly cover the full score range with no gaps. The lower
/// bound is inclusive; the upper bound of each band is shared with the
/// next band's lower bound, and the topmost band includes its upper bound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskCategory {
    /// Band name, e.g. "LOW", "MEDIUM", "HIGH"
    pub name: String,
    /// Inclusive lower bound of the band
    pub min_score: f32,
    /// Upper bound of the band
    pub max_score: f32,
    /// Factor applied to a policy's base premium
    pub premium_multiplier: Decimal,
}

impl RiskCategory {
    pub fn new(name: &str, min_score: f32, max_score: f32, premium_multiplier: Decimal) -> Self {
        Self {
            name: name.to_string(),
            min_score,
            max_score,
            premium_multiplier,
        }
    }
}
