//! In-memory storage backend
//!
//! DashMap-backed implementation of [`TelemetryStore`]. Trip numbering
//! holds the counter's shard entry for the whole read-increment step, and
//! premium application mutates the policy in place under its entry lock,
//! so both read-modify-writes are serialized per key.

use async_trait::async_trait;
use dashmap::DashMap;
use drivesafe_common::{
    DriveSafeError, Policy, PolicyStatus, PremiumRecord, Result, RiskCategory, RiskIndex,
    TripSummary, Vehicle,
};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::TelemetryStore;
use crate::risk;

/// In-memory entity store keyed by aggregate id.
pub struct InMemoryStore {
    vehicles: DashMap<Uuid, Vehicle>,
    vehicle_by_user: DashMap<Uuid, Uuid>,
    trip_counters: DashMap<Uuid, u32>,
    trips: DashMap<Uuid, Vec<TripSummary>>,
    risk_indices: DashMap<Uuid, Vec<RiskIndex>>,
    categories: RwLock<Vec<RiskCategory>>,
    policies: DashMap<Uuid, Policy>,
    policy_by_user: DashMap<Uuid, Uuid>,
    premium_records: DashMap<Uuid, Vec<PremiumRecord>>,
}

impl InMemoryStore {
    /// Create a store with the given risk band configuration
    pub fn with_categories(categories: Vec<RiskCategory>) -> Self {
        Self {
            vehicles: DashMap::new(),
            vehicle_by_user: DashMap::new(),
            trip_counters: DashMap::new(),
            trips: DashMap::new(),
            risk_indices: DashMap::new(),
            categories: RwLock::new(categories),
            policies: DashMap::new(),
            policy_by_user: DashMap::new(),
            premium_records: DashMap::new(),
        }
    }

    /// Create a store with the default insurer bands
    pub fn new() -> Self {
        Self::with_categories(risk::default_bands())
    }

    /// Register a vehicle (performed by the excluded registration layer)
    pub fn register_vehicle(&self, vehicle: Vehicle) {
        self.vehicle_by_user.insert(vehicle.user_id, vehicle.id);
        self.vehicles.insert(vehicle.id, vehicle);
    }

    /// Create a policy (performed by the excluded policy CRUD layer)
    pub fn create_policy(&self, policy: Policy) {
        self.policy_by_user.insert(policy.user_id, policy.id);
        self.policies.insert(policy.id, policy);
    }

    /// All premium records written for a policy, oldest first
    pub fn premium_history(&self, policy_id: Uuid) -> Vec<PremiumRecord> {
        self.premium_records
            .get(&policy_id)
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// All risk index computations for a user, oldest first
    pub fn risk_index_history(&self, user_id: Uuid) -> Vec<RiskIndex> {
        self.risk_indices
            .get(&user_id)
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TelemetryStore for InMemoryStore {
    async fn vehicle(&self, vehicle_id: Uuid) -> Result<Vehicle> {
        self.vehicles
            .get(&vehicle_id)
            .map(|v| v.clone())
            .ok_or(DriveSafeError::VehicleNotFound(vehicle_id))
    }

    async fn vehicle_for_user(&self, user_id: Uuid) -> Result<Vehicle> {
        let vehicle_id = self
            .vehicle_by_user
            .get(&user_id)
            .map(|id| *id)
            .ok_or(DriveSafeError::VehicleNotFoundForUser(user_id))?;
        self.vehicle(vehicle_id).await
    }

    async fn next_trip_no(&self, vehicle_id: Uuid) -> Result<u32> {
        // Entry guard holds the shard lock across read-increment-write
        let mut counter = self.trip_counters.entry(vehicle_id).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn insert_trip_summary(&self, summary: TripSummary) -> Result<()> {
        self.trips
            .entry(summary.vehicle_id)
            .or_default()
            .push(summary);
        Ok(())
    }

    async fn recent_trip_summaries(
        &self,
        vehicle_id: Uuid,
        limit: usize,
    ) -> Result<Vec<TripSummary>> {
        Ok(self
            .trips
            .get(&vehicle_id)
            .map(|trips| trips.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert_risk_index(&self, index: RiskIndex) -> Result<()> {
        self.risk_indices.entry(index.user_id).or_default().push(index);
        Ok(())
    }

    async fn latest_risk_index(&self, user_id: Uuid) -> Result<Option<RiskIndex>> {
        Ok(self
            .risk_indices
            .get(&user_id)
            .and_then(|history| history.last().cloned()))
    }

    async fn risk_categories(&self) -> Result<Vec<RiskCategory>> {
        Ok(self.categories.read().clone())
    }

    async fn policy_for_user(&self, user_id: Uuid) -> Result<Policy> {
        let policy_id = self
            .policy_by_user
            .get(&user_id)
            .map(|id| *id)
            .ok_or(DriveSafeError::PolicyNotFoundForUser(user_id))?;
        self.policies
            .get(&policy_id)
            .map(|p| p.clone())
            .ok_or(DriveSafeError::PolicyNotFound(policy_id))
    }

    async fn apply_premium(&self, policy_id: Uuid, premium: Decimal) -> Result<Policy> {
        let mut policy = self
            .policies
            .get_mut(&policy_id)
            .ok_or(DriveSafeError::PolicyNotFound(policy_id))?;
        policy.current_premium = premium;
        policy.status = PolicyStatus::Active;
        Ok(policy.clone())
    }

    async fn insert_premium_record(&self, record: PremiumRecord) -> Result<()> {
        self.premium_records
            .entry(record.policy_id)
            .or_default()
            .push(record);
        Ok(())
    }
}
