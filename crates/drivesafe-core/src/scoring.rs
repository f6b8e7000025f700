//! Scoring service boundary, trip statistics, and reward tiering
//!
//! The ML model that turns a sample sequence into a drive score is an
//! external collaborator behind [`ScoringClient`]. Calls are bounded by a
//! timeout and never retried in-core: a retry could double-number trips
//! or double-charge reward points, so the failure propagates as
//! `ScoringUnavailable` and retry policy stays with the caller.

use async_trait::async_trait;
use drivesafe_common::{DriveSafeError, Result, TelemetrySample, MAX_SCORE, MIN_SCORE};
use std::time::Duration;
use tracing::debug;

/// External scoring service: ordered sample batch in, drive score out.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    /// Score a full trip. Must return a value in [0, 100].
    async fn drive_score(&self, samples: &[TelemetrySample]) -> Result<f32>;
}

/// Call the scoring service with a deadline.
///
/// A timeout, a client error, or an out-of-range score all surface as
/// `ScoringUnavailable`; a misbehaving upstream fails loudly rather than
/// minting a trip with a bogus score.
pub async fn score_with_timeout(
    client: &dyn ScoringClient,
    samples: &[TelemetrySample],
    timeout: Duration,
) -> Result<f32> {
    let score = tokio::time::timeout(timeout, client.drive_score(samples))
        .await
        .map_err(|_| {
            DriveSafeError::ScoringUnavailable(format!(
                "no response within {}ms",
                timeout.as_millis()
            ))
        })??;

    if !(MIN_SCORE..=MAX_SCORE).contains(&score) || !score.is_finite() {
        return Err(DriveSafeError::ScoringUnavailable(format!(
            "drive score out of range: {score}"
        )));
    }

    debug!(score, samples = samples.len(), "scoring service responded");
    Ok(score)
}

/// Summary statistics over a finalized sample sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripStats {
    pub max_speed: f32,
    pub avg_speed: f32,
    pub max_acceleration: f32,
    pub total_distance: f32,
}

impl TripStats {
    /// Compute statistics over a non-empty sample sequence.
    pub fn from_samples(samples: &[TelemetrySample]) -> Self {
        let mut max_speed = 0.0f32;
        let mut speed_sum = 0.0f32;
        let mut max_acceleration = 0.0f32;
        let mut total_distance = 0.0f32;

        for sample in samples {
            max_speed = max_speed.max(sample.speed);
            speed_sum += sample.speed;
            max_acceleration = max_acceleration.max(sample.acceleration);
            total_distance += sample.distance_travelled;
        }

        let avg_speed = if samples.is_empty() {
            0.0
        } else {
            speed_sum / samples.len() as f32
        };

        Self {
            max_speed,
            avg_speed,
            max_acceleration,
            total_distance,
        }
    }
}

/// Map a drive score to reward points.
///
/// Pure and total: tier lower bounds are inclusive, ties resolve to the
/// higher tier (a score of exactly 90 earns 50 points).
pub fn reward_points(drive_score: f32) -> u32 {
    match drive_score {
        s if s >= 90.0 => 50,
        s if s >= 80.0 => 30,
        s if s >= 70.0 => 20,
        s if s >= 60.0 => 10,
        s if s >= 50.0 => 5,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScore(f32);

    #[async_trait]
    impl ScoringClient for FixedScore {
        async fn drive_score(&self, _samples: &[TelemetrySample]) -> Result<f32> {
            Ok(self.0)
        }
    }

    struct NeverResponds;

    #[async_trait]
    impl ScoringClient for NeverResponds {
        async fn drive_score(&self, _samples: &[TelemetrySample]) -> Result<f32> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(0.0)
        }
    }

    #[test]
    fn test_reward_tier_boundaries() {
        assert_eq!(reward_points(100.0), 50);
        assert_eq!(reward_points(90.0), 50);
        assert_eq!(reward_points(89.999), 30);
        assert_eq!(reward_points(80.0), 30);
        assert_eq!(reward_points(70.0), 20);
        assert_eq!(reward_points(60.0), 10);
        assert_eq!(reward_points(50.0), 5);
        assert_eq!(reward_points(49.999), 0);
        assert_eq!(reward_points(0.0), 0);
    }

    #[test]
    fn test_trip_stats() {
        let samples = vec![
            TelemetrySample {
                speed: 40.0,
                acceleration: 1.0,
                distance_travelled: 0.5,
                ..TelemetrySample::idle()
            },
            TelemetrySample {
                speed: 80.0,
                acceleration: 3.5,
                distance_travelled: 1.5,
                ..TelemetrySample::idle()
            },
            TelemetrySample {
                speed: 60.0,
                acceleration: -2.0,
                distance_travelled: 1.0,
                ..TelemetrySample::idle()
            },
        ];

        let stats = TripStats::from_samples(&samples);
        assert_eq!(stats.max_speed, 80.0);
        assert_eq!(stats.avg_speed, 60.0);
        assert_eq!(stats.max_acceleration, 3.5);
        assert_eq!(stats.total_distance, 3.0);
    }

    #[tokio::test]
    async fn test_score_within_timeout() {
        let client = FixedScore(87.5);
        let score = score_with_timeout(&client, &[], Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(score, 87.5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scoring_timeout_is_hard_failure() {
        let client = NeverResponds;
        let result = score_with_timeout(&client, &[], Duration::from_millis(50)).await;
        assert!(matches!(
            result,
            Err(DriveSafeError::ScoringUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_out_of_range_score_rejected() {
        let client = FixedScore(120.0);
        let result = score_with_timeout(&client, &[], Duration::from_millis(100)).await;
        assert!(matches!(
            result,
            Err(DriveSafeError::ScoringUnavailable(_))
        ));
    }
}
