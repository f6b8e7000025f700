//! Storage collaborator seam
//!
//! The core reads and writes durable entities through this narrow
//! contract and treats the backend as transactional per aggregate. The
//! bundled [`InMemoryStore`] is both the test double and the reference
//! semantics for a durable implementation.

pub mod memory;

use async_trait::async_trait;
use drivesafe_common::{
    Policy, PremiumRecord, Result, RiskCategory, RiskIndex, TripSummary, Vehicle,
};
use rust_decimal::Decimal;
use uuid::Uuid;

pub use memory::InMemoryStore;

/// CRUD access to the pipeline's durable entities.
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    /// Look up a vehicle by id
    async fn vehicle(&self, vehicle_id: Uuid) -> Result<Vehicle>;

    /// Look up the vehicle registered to a user
    async fn vehicle_for_user(&self, user_id: Uuid) -> Result<Vehicle>;

    /// Claim the next trip number for a vehicle.
    ///
    /// Serialized per vehicle: concurrent trip completions must each
    /// receive a distinct, consecutive number.
    async fn next_trip_no(&self, vehicle_id: Uuid) -> Result<u32>;

    /// Persist a trip summary
    async fn insert_trip_summary(&self, summary: TripSummary) -> Result<()>;

    /// The `limit` most recent trip summaries for a vehicle, most recent
    /// first
    async fn recent_trip_summaries(&self, vehicle_id: Uuid, limit: usize)
        -> Result<Vec<TripSummary>>;

    /// Append a risk index computation. History is retained.
    async fn insert_risk_index(&self, index: RiskIndex) -> Result<()>;

    /// The most recent risk index for a user, if any
    async fn latest_risk_index(&self, user_id: Uuid) -> Result<Option<RiskIndex>>;

    /// The configured risk category bands
    async fn risk_categories(&self) -> Result<Vec<RiskCategory>>;

    /// Look up the policy covering a user
    async fn policy_for_user(&self, user_id: Uuid) -> Result<Policy>;

    /// Set a policy's current premium and mark it active.
    ///
    /// The read-modify-write is atomic per policy; racing recalculations
    /// resolve last-committed-wins without interleaving.
    async fn apply_premium(&self, policy_id: Uuid, premium: Decimal) -> Result<Policy>;

    /// Persist a premium audit record
    async fn insert_premium_record(&self, record: PremiumRecord) -> Result<()>;
}
