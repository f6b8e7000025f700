//! Premium quoting with exact decimal arithmetic
//!
//! Monetary values stay in `Decimal` end to end: the computed premium is
//! exactly `base_premium * multiplier` with no floating-point drift.

use chrono::{Months, NaiveDate};
use drivesafe_common::{DriveSafeError, PremiumRecord, Result, RiskCategory, RiskIndex};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Number of months a computed premium stays valid
pub const PREMIUM_VALIDITY_MONTHS: u32 = 12;

/// A priced premium with its validity period, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PremiumQuote {
    pub base_premium: Decimal,
    pub multiplier: Decimal,
    pub calculated_premium: Decimal,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Price a policy's base premium against a resolved risk category.
///
/// The validity period spans exactly twelve months from the given date.
pub fn quote(base_premium: Decimal, category: &RiskCategory, today: NaiveDate) -> Result<PremiumQuote> {
    let period_end = today
        .checked_add_months(Months::new(PREMIUM_VALIDITY_MONTHS))
        .ok_or_else(|| DriveSafeError::Internal("premium period overflows calendar".to_string()))?;

    Ok(PremiumQuote {
        base_premium,
        multiplier: category.premium_multiplier,
        calculated_premium: base_premium * category.premium_multiplier,
        period_start: today,
        period_end,
    })
}

impl PremiumQuote {
    /// Materialize the quote as an immutable audit record for a policy.
    pub fn into_record(
        self,
        policy_id: Uuid,
        risk_index: &RiskIndex,
        category: &RiskCategory,
    ) -> PremiumRecord {
        PremiumRecord {
            id: Uuid::new_v4(),
            policy_id,
            risk_index_id: risk_index.id,
            category: category.name.clone(),
            base_premium: self.base_premium,
            multiplier: self.multiplier,
            calculated_premium: self.calculated_premium,
            period_start: self.period_start,
            period_end: self.period_end,
            active: true,
            calculated_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exact_decimal_premium() {
        let category = RiskCategory::new("MEDIUM", 50.0, 80.0, dec!(1.1));
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

        let quote = quote(dec!(1000.00), &category, today).unwrap();
        assert_eq!(quote.calculated_premium, dec!(1100.00));
    }

    #[test]
    fn test_period_spans_twelve_months() {
        let category = RiskCategory::new("LOW", 80.0, 100.0, dec!(0.9));
        let today = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();

        let quote = quote(dec!(500.00), &category, today).unwrap();
        assert_eq!(quote.period_start, today);
        assert_eq!(quote.period_end, NaiveDate::from_ymd_opt(2027, 2, 28).unwrap());
    }

    #[test]
    fn test_record_carries_quote_and_lineage() {
        let category = RiskCategory::new("HIGH", 0.0, 50.0, dec!(1.5));
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let index = RiskIndex::new(Uuid::new_v4(), 42.0, 3);
        let policy_id = Uuid::new_v4();

        let record = quote(dec!(1000.00), &category, today)
            .unwrap()
            .into_record(policy_id, &index, &category);

        assert_eq!(record.policy_id, policy_id);
        assert_eq!(record.risk_index_id, index.id);
        assert_eq!(record.category, "HIGH");
        assert_eq!(record.calculated_premium, dec!(1500.00));
        assert!(record.active);
    }
}
