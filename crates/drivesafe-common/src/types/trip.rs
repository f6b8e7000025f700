//! Trip summaries - the durable record of one completed trip

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Durable summary of a finalized trip. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSummary {
    /// Unique summary ID
    pub id: Uuid,
    /// Owning vehicle
    pub vehicle_id: Uuid,
    /// Vehicle-scoped trip number, monotonically increasing
    pub trip_no: u32,
    /// Drive score in [0, 100] from the scoring service
    pub drive_score: f32,
    /// Maximum speed observed (km/h)
    pub max_speed: f32,
    /// Mean speed over all samples (km/h)
    pub avg_speed: f32,
    /// Maximum acceleration observed (m/s^2)
    pub max_acceleration: f32,
    /// Sum of per-sample incremental distance (km)
    pub total_distance: f32,
    /// Weather flag. Fixed placeholder pending sensor-based derivation.
    pub rainy: bool,
    /// Daylight flag. Fixed placeholder pending time-based derivation.
    pub daytime: bool,
    /// When the trip was finalized
    pub recorded_at: DateTime<Utc>,
}

impl TripSummary {
    /// Build a summary for a scored trip
    pub fn new(vehicle_id: Uuid, trip_no: u32, drive_score: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            trip_no,
            drive_score,
            max_speed: 0.0,
            avg_speed: 0.0,
            max_acceleration: 0.0,
            total_distance: 0.0,
            rainy: false,
            daytime: true,
            recorded_at: Utc::now(),
        }
    }

    /// Set the summary statistics
    pub fn with_stats(
        mut self,
        max_speed: f32,
        avg_speed: f32,
        max_acceleration: f32,
        total_distance: f32,
    ) -> Self {
        self.max_speed = max_speed;
        self.avg_speed = avg_speed;
        self.max_acceleration = max_acceleration;
        self.total_distance = total_distance;
        self
    }
}
