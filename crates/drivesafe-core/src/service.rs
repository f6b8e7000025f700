//! Pipeline service facade
//!
//! Wires the session buffer, scoring client, storage, and notifier into
//! the three pipeline operations: trip completion, risk index
//! recomputation, and premium recalculation.
//!
//! Trip completion orders its effects so the operation is atomic with
//! respect to scoring failures and caller cancellation: the drive score is
//! obtained first, the trip number is claimed only once a score exists,
//! and nothing is persisted before both are in hand. No TripSummary is
//! ever written without a score, and trip numbers are only spent on trips
//! that will be persisted.

use std::sync::Arc;

use chrono::Utc;
use drivesafe_common::{
    DriveSafeError, PolicyStatus, Result, RiskIndex, TelemetrySample, TripSummary,
};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::DriveSafeConfig;
use crate::notify::Notifier;
use crate::premium;
use crate::risk;
use crate::scoring::{self, reward_points, ScoringClient, TripStats};
use crate::session::SessionBuffer;
use crate::storage::TelemetryStore;

/// Outcome of completing a live trip session.
#[derive(Debug, Clone)]
pub struct TripReport {
    pub vehicle_id: Uuid,
    pub trip_no: u32,
    pub drive_score: f32,
    pub reward_points: u32,
    pub feedback: &'static str,
}

/// Outcome of a premium recalculation.
#[derive(Debug, Clone)]
pub struct PremiumStatement {
    pub policy_id: Uuid,
    pub risk_score: f32,
    pub category: String,
    pub base_premium: Decimal,
    pub multiplier: Decimal,
    pub calculated_premium: Decimal,
    pub status: PolicyStatus,
}

/// The telemetry-to-premium pipeline.
pub struct DriveSafeService {
    config: DriveSafeConfig,
    sessions: SessionBuffer,
    store: Arc<dyn TelemetryStore>,
    scoring: Arc<dyn ScoringClient>,
    notifier: Arc<dyn Notifier>,
}

impl DriveSafeService {
    /// Wire the pipeline. Fails fast if the configured risk bands leave a
    /// gap or overlap in the score range.
    pub async fn new(
        config: DriveSafeConfig,
        store: Arc<dyn TelemetryStore>,
        scoring: Arc<dyn ScoringClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let bands = store.risk_categories().await?;
        risk::validate_bands(&bands)?;

        Ok(Self {
            config,
            sessions: SessionBuffer::new(),
            store,
            scoring,
            notifier,
        })
    }

    /// Buffer one live telemetry sample for a session.
    pub fn record_sample(&self, session_key: &str, vehicle_id: Uuid, sample: TelemetrySample) {
        self.sessions.append(session_key, vehicle_id, sample);
    }

    /// Samples currently buffered for a session, if it exists
    pub fn session_samples(&self, session_key: &str) -> Option<usize> {
        self.sessions.len(session_key)
    }

    /// Finalize a session into a scored, persisted trip.
    #[instrument(skip(self))]
    pub async fn complete_trip(&self, session_key: &str) -> Result<TripReport> {
        let session = self.sessions.finalize(session_key)?;
        let vehicle = self.store.vehicle(session.vehicle_id).await?;

        // Score before claiming a trip number: a scoring failure must
        // leave no trace, and numbers are only spent on persisted trips.
        let drive_score = scoring::score_with_timeout(
            self.scoring.as_ref(),
            &session.samples,
            self.config.scoring.timeout(),
        )
        .await?;

        let trip_no = self.store.next_trip_no(vehicle.id).await?;
        let stats = TripStats::from_samples(&session.samples);
        let summary = TripSummary::new(vehicle.id, trip_no, drive_score).with_stats(
            stats.max_speed,
            stats.avg_speed,
            stats.max_acceleration,
            stats.total_distance,
        );
        self.store.insert_trip_summary(summary).await?;

        let points = reward_points(drive_score);
        let feedback = if drive_score > 80.0 {
            "Excellent driving!"
        } else {
            "Improve your braking or acceleration."
        };

        info!(
            vehicle_id = %vehicle.id,
            trip_no,
            drive_score,
            reward_points = points,
            "trip finalized"
        );

        let message = format!(
            "Trip {trip_no} complete. Drive score: {drive_score:.1}. You earned {points} reward points!"
        );
        self.notify_best_effort(vehicle.user_id, &message).await;

        Ok(TripReport {
            vehicle_id: vehicle.id,
            trip_no,
            drive_score,
            reward_points: points,
            feedback,
        })
    }

    /// Recompute the rolling risk index for a user's vehicle.
    #[instrument(skip(self))]
    pub async fn compute_risk_index(&self, user_id: Uuid) -> Result<RiskIndex> {
        let vehicle = self.store.vehicle_for_user(user_id).await?;
        let window = self
            .store
            .recent_trip_summaries(vehicle.id, self.config.risk.window)
            .await?;
        if window.is_empty() {
            return Err(DriveSafeError::InsufficientHistory {
                vehicle_id: vehicle.id,
            });
        }

        let (score, trips_considered) = risk::weighted_risk_index(&window);
        let index = RiskIndex::new(user_id, score, trips_considered);
        self.store.insert_risk_index(index.clone()).await?;

        info!(%user_id, score, trips_considered, "risk index updated");
        let message = format!("DRISC score updated: {score:.1}");
        self.notify_best_effort(user_id, &message).await;

        Ok(index)
    }

    /// Recalculate the premium for a user's policy from the latest risk
    /// index, persist the audit record, and activate the policy.
    #[instrument(skip(self))]
    pub async fn calculate_premium(&self, user_id: Uuid) -> Result<PremiumStatement> {
        let policy = self.store.policy_for_user(user_id).await?;
        let index = self
            .store
            .latest_risk_index(user_id)
            .await?
            .ok_or(DriveSafeError::NoRiskIndex { user_id })?;

        let bands = self.store.risk_categories().await?;
        let category = risk::resolve_category(&bands, index.score)?.clone();

        let quote = premium::quote(policy.base_premium, &category, Utc::now().date_naive())?;
        let calculated_premium = quote.calculated_premium;
        let record = quote.into_record(policy.id, &index, &category);
        self.store.insert_premium_record(record).await?;

        let updated = self.store.apply_premium(policy.id, calculated_premium).await?;

        info!(
            policy_id = %policy.id,
            risk_score = index.score,
            category = %category.name,
            premium = %calculated_premium,
            "premium recalculated"
        );

        Ok(PremiumStatement {
            policy_id: policy.id,
            risk_score: index.score,
            category: category.name,
            base_premium: policy.base_premium,
            multiplier: category.premium_multiplier,
            calculated_premium,
            status: updated.status,
        })
    }

    /// Sum of reward points over the user's most recent trips.
    ///
    /// Rewards are derived from stored drive scores rather than persisted
    /// separately, so the total is always consistent with trip history.
    pub async fn total_reward_points(&self, user_id: Uuid) -> Result<u32> {
        let vehicle = self.store.vehicle_for_user(user_id).await?;
        let recent = self
            .store
            .recent_trip_summaries(vehicle.id, self.config.risk.reward_window)
            .await?;
        Ok(recent.iter().map(|t| reward_points(t.drive_score)).sum())
    }

    async fn notify_best_effort(&self, user_id: Uuid, message: &str) {
        if let Err(err) = self.notifier.notify(user_id, message).await {
            warn!(%user_id, %err, "notification delivery failed");
        }
    }
}
