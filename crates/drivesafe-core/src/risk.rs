//! Risk index aggregation and category band resolution
//!
//! Pure computation only; persistence and notification stay in the
//! service layer so the weighted averaging and band lookup are testable
//! without a storage collaborator.

use drivesafe_common::{DriveSafeError, Result, RiskCategory, TripSummary, MAX_SCORE, MIN_SCORE};
use rust_decimal_macros::dec;

/// Distance-weighted mean of drive scores over a trip window.
///
/// Only trips with strictly positive distance carry weight; zero-distance
/// trips still count toward the returned window size. An all-zero-distance
/// window yields an index of zero rather than a division by zero.
///
/// Returns `(risk_index, trips_considered)`.
pub fn weighted_risk_index(window: &[TripSummary]) -> (f32, u32) {
    let mut weighted_sum = 0.0f64;
    let mut total_distance = 0.0f64;

    for trip in window {
        if trip.total_distance > 0.0 {
            weighted_sum += f64::from(trip.drive_score) * f64::from(trip.total_distance);
            total_distance += f64::from(trip.total_distance);
        }
    }

    let index = if total_distance == 0.0 {
        0.0
    } else {
        (weighted_sum / total_distance) as f32
    };

    (index, window.len() as u32)
}

/// Resolve the risk category covering a score.
///
/// The matching band is the one with the greatest lower bound not
/// exceeding the score, provided the score does not exceed its upper
/// bound. Shared band edges therefore resolve upward (a score sitting on
/// the MEDIUM/LOW boundary is LOW), and overlapping bands resolve
/// deterministically. A gap in the configured bands surfaces as
/// `NoCategoryForScore`.
pub fn resolve_category(bands: &[RiskCategory], score: f32) -> Result<&RiskCategory> {
    let category = bands
        .iter()
        .filter(|band| band.min_score <= score)
        .max_by(|a, b| a.min_score.total_cmp(&b.min_score))
        .ok_or(DriveSafeError::NoCategoryForScore { score })?;

    if score > category.max_score {
        return Err(DriveSafeError::NoCategoryForScore { score });
    }

    Ok(category)
}

/// Validate that bands jointly cover [`MIN_SCORE`, `MAX_SCORE`] with no
/// gaps and no overlaps. Static reference data is checked once at wiring
/// time so lookups never hit a configuration hole mid-request.
pub fn validate_bands(bands: &[RiskCategory]) -> Result<()> {
    if bands.is_empty() {
        return Err(DriveSafeError::BandConfiguration(
            "no risk categories configured".to_string(),
        ));
    }

    let mut sorted: Vec<&RiskCategory> = bands.iter().collect();
    sorted.sort_by(|a, b| a.min_score.total_cmp(&b.min_score));

    for band in &sorted {
        if band.max_score <= band.min_score {
            return Err(DriveSafeError::BandConfiguration(format!(
                "band {} is empty or inverted: [{}, {}]",
                band.name, band.min_score, band.max_score
            )));
        }
    }

    if sorted[0].min_score > MIN_SCORE {
        return Err(DriveSafeError::BandConfiguration(format!(
            "scores below {} are uncovered",
            sorted[0].min_score
        )));
    }

    for pair in sorted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next.min_score > prev.max_score {
            return Err(DriveSafeError::BandConfiguration(format!(
                "gap between {} and {}: ({}, {})",
                prev.name, next.name, prev.max_score, next.min_score
            )));
        }
        if next.min_score < prev.max_score {
            return Err(DriveSafeError::BandConfiguration(format!(
                "overlap between {} and {}: ({}, {})",
                prev.name, next.name, next.min_score, prev.max_score
            )));
        }
    }

    let top = sorted[sorted.len() - 1];
    if top.max_score < MAX_SCORE {
        return Err(DriveSafeError::BandConfiguration(format!(
            "scores above {} are uncovered",
            top.max_score
        )));
    }

    Ok(())
}

/// Default insurer band configuration: higher risk index means better
/// driving, so the low end of the range carries the premium surcharge.
pub fn default_bands() -> Vec<RiskCategory> {
    vec![
        RiskCategory::new("HIGH", 0.0, 50.0, dec!(1.5)),
        RiskCategory::new("MEDIUM", 50.0, 80.0, dec!(1.1)),
        RiskCategory::new("LOW", 80.0, 100.0, dec!(0.9)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn trip(drive_score: f32, distance: f32) -> TripSummary {
        TripSummary::new(Uuid::new_v4(), 1, drive_score).with_stats(0.0, 0.0, 0.0, distance)
    }

    #[test]
    fn test_weighted_mean_skips_zero_distance_trips() {
        let window = vec![trip(80.0, 10.0), trip(90.0, 0.0), trip(70.0, 10.0)];
        let (index, considered) = weighted_risk_index(&window);
        assert_eq!(index, 75.0);
        assert_eq!(considered, 3);
    }

    #[test]
    fn test_all_zero_distance_window_is_zero() {
        let window = vec![trip(80.0, 0.0), trip(90.0, 0.0)];
        let (index, considered) = weighted_risk_index(&window);
        assert_eq!(index, 0.0);
        assert_eq!(considered, 2);
    }

    #[test]
    fn test_band_boundaries_resolve_upward() {
        let bands = default_bands();
        assert_eq!(resolve_category(&bands, 0.0).unwrap().name, "HIGH");
        assert_eq!(resolve_category(&bands, 49.999).unwrap().name, "HIGH");
        assert_eq!(resolve_category(&bands, 50.0).unwrap().name, "MEDIUM");
        assert_eq!(resolve_category(&bands, 80.0).unwrap().name, "LOW");
        assert_eq!(resolve_category(&bands, 100.0).unwrap().name, "LOW");
    }

    #[test]
    fn test_gap_in_bands_is_a_lookup_miss() {
        let bands = vec![
            RiskCategory::new("HIGH", 0.0, 40.0, dec!(1.5)),
            RiskCategory::new("LOW", 60.0, 100.0, dec!(0.9)),
        ];
        assert!(matches!(
            resolve_category(&bands, 50.0),
            Err(DriveSafeError::NoCategoryForScore { .. })
        ));
    }

    #[test]
    fn test_validate_default_bands() {
        assert!(validate_bands(&default_bands()).is_ok());
    }

    #[test]
    fn test_validate_rejects_gap_and_overlap() {
        let gap = vec![
            RiskCategory::new("HIGH", 0.0, 40.0, dec!(1.5)),
            RiskCategory::new("LOW", 60.0, 100.0, dec!(0.9)),
        ];
        assert!(matches!(
            validate_bands(&gap),
            Err(DriveSafeError::BandConfiguration(_))
        ));

        let overlap = vec![
            RiskCategory::new("HIGH", 0.0, 60.0, dec!(1.5)),
            RiskCategory::new("LOW", 50.0, 100.0, dec!(0.9)),
        ];
        assert!(matches!(
            validate_bands(&overlap),
            Err(DriveSafeError::BandConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_uncovered_range_ends() {
        let short = vec![RiskCategory::new("ONLY", 10.0, 90.0, dec!(1.0))];
        assert!(matches!(
            validate_bands(&short),
            Err(DriveSafeError::BandConfiguration(_))
        ));
    }
}
