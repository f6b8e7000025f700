//! Insurance policy, premium audit records, and vehicle identity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered vehicle. Registration itself lives outside the core; the
/// pipeline only needs the vehicle's identity and its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique vehicle ID
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Registration plate number
    pub vehicle_no: String,
}

impl Vehicle {
    pub fn new(user_id: Uuid, vehicle_no: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            vehicle_no: vehicle_no.to_string(),
        }
    }
}

/// Policy lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    /// Created but not yet priced
    Pending,
    /// Priced at least once; current premium is in force
    Active,
}

/// An insurance policy. Current premium and status are mutated only by the
/// premium calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Unique policy ID
    pub id: Uuid,
    /// Insured user
    pub user_id: Uuid,
    /// Insured vehicle
    pub vehicle_id: Uuid,
    /// Premium before risk adjustment
    pub base_premium: Decimal,
    /// Premium currently in force
    pub current_premium: Decimal,
    /// Lifecycle status
    pub status: PolicyStatus,
}

impl Policy {
    /// Create a new pending policy. The current premium starts at the base
    /// premium until the first calculation runs.
    pub fn new(user_id: Uuid, vehicle_id: Uuid, base_premium: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            vehicle_id,
            base_premium,
            current_premium: base_premium,
            status: PolicyStatus::Pending,
        }
    }
}

/// Immutable audit entry for one premium computation.
///
/// Superseded records are not deactivated; the record stream is an audit
/// log and the latest entry wins for reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumRecord {
    /// Unique record ID
    pub id: Uuid,
    /// Policy the premium applies to
    pub policy_id: Uuid,
    /// Risk index the computation used
    pub risk_index_id: Uuid,
    /// Name of the resolved risk category
    pub category: String,
    /// Base premium at computation time
    pub base_premium: Decimal,
    /// Multiplier from the resolved category
    pub multiplier: Decimal,
    /// base_premium * multiplier, exact decimal arithmetic
    pub calculated_premium: Decimal,
    /// First day the premium is valid
    pub period_start: NaiveDate,
    /// Day the validity period ends (12 months after start)
    pub period_end: NaiveDate,
    /// Whether this record is in force
    pub active: bool,
    /// When the computation ran
    pub calculated_at: DateTime<Utc>,
}
