//! Live trip session buffering with DashMap
//!
//! Process-wide keyed accumulator for in-flight telemetry. Sessions are
//! created on first append and removed exactly once on finalization: the
//! finalize-and-remove step is a single concurrent-map removal, so of any
//! number of racing finalizers exactly one receives the accumulated
//! samples and the rest observe `NoDataForSession`.
//!
//! The buffer is in-process state with the lifetime of the service; it is
//! never persisted across restarts. Construct one at startup and hand it
//! to the components that need it.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use drivesafe_common::{DriveSafeError, Result, TelemetrySample};
use tracing::debug;
use uuid::Uuid;

/// An in-flight, unfinalized trip.
#[derive(Debug)]
struct Session {
    vehicle_id: Uuid,
    samples: Vec<TelemetrySample>,
    started_at: DateTime<Utc>,
}

impl Session {
    fn new(vehicle_id: Uuid, first: TelemetrySample) -> Self {
        Self {
            vehicle_id,
            samples: vec![first],
            started_at: Utc::now(),
        }
    }
}

/// The sample sequence handed to the trip scorer when a session ends.
/// Ownership of the samples transfers out of the buffer with this value.
#[derive(Debug)]
pub struct FinalizedSession {
    /// The session key the samples were accumulated under
    pub session_key: String,
    /// Vehicle the trip belongs to
    pub vehicle_id: Uuid,
    /// All samples, in append order
    pub samples: Vec<TelemetrySample>,
    /// When the first sample arrived
    pub started_at: DateTime<Utc>,
}

/// Concurrent session key -> sample sequence mapping.
pub struct SessionBuffer {
    sessions: DashMap<String, Session>,
}

impl SessionBuffer {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Append a sample to a session, creating the session if absent.
    ///
    /// The vehicle id recorded for the session is the one supplied with
    /// the first sample; later appends only extend the sample sequence.
    /// Appends after a finalize on the same key start a brand-new session.
    pub fn append(&self, session_key: &str, vehicle_id: Uuid, sample: TelemetrySample) {
        self.sessions
            .entry(session_key.to_string())
            .and_modify(|session| session.samples.push(sample))
            .or_insert_with(|| {
                debug!(session_key, %vehicle_id, "opened telemetry session");
                Session::new(vehicle_id, sample)
            });
    }

    /// Finalize a session, removing it and returning its samples.
    ///
    /// At-most-once: the removal is atomic per key, so a second finalize
    /// (concurrent or later) fails with `NoDataForSession`. An append that
    /// loses the race with finalize lands in a fresh session for the key.
    pub fn finalize(&self, session_key: &str) -> Result<FinalizedSession> {
        let (key, session) = self
            .sessions
            .remove(session_key)
            .ok_or_else(|| DriveSafeError::NoDataForSession(session_key.to_string()))?;

        if session.samples.is_empty() {
            return Err(DriveSafeError::NoDataForSession(key));
        }

        debug!(
            session_key = %key,
            vehicle_id = %session.vehicle_id,
            samples = session.samples.len(),
            "finalized telemetry session"
        );

        Ok(FinalizedSession {
            session_key: key,
            vehicle_id: session.vehicle_id,
            samples: session.samples,
            started_at: session.started_at,
        })
    }

    /// Number of samples buffered for a session, if it exists
    pub fn len(&self, session_key: &str) -> Option<usize> {
        self.sessions.get(session_key).map(|s| s.samples.len())
    }

    /// Number of in-flight sessions
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample_with_speed(speed: f32) -> TelemetrySample {
        TelemetrySample {
            speed,
            ..TelemetrySample::idle()
        }
    }

    #[test]
    fn test_finalize_returns_samples_in_append_order() {
        let buffer = SessionBuffer::new();
        let vehicle_id = Uuid::new_v4();

        for speed in [10.0, 20.0, 30.0] {
            buffer.append("s1", vehicle_id, sample_with_speed(speed));
        }

        let finalized = buffer.finalize("s1").unwrap();
        assert_eq!(finalized.vehicle_id, vehicle_id);
        let speeds: Vec<f32> = finalized.samples.iter().map(|s| s.speed).collect();
        assert_eq!(speeds, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_second_finalize_observes_not_found() {
        let buffer = SessionBuffer::new();
        buffer.append("s1", Uuid::new_v4(), TelemetrySample::idle());

        assert!(buffer.finalize("s1").is_ok());
        assert!(matches!(
            buffer.finalize("s1"),
            Err(DriveSafeError::NoDataForSession(_))
        ));
    }

    #[test]
    fn test_finalize_unknown_key() {
        let buffer = SessionBuffer::new();
        assert!(matches!(
            buffer.finalize("missing"),
            Err(DriveSafeError::NoDataForSession(_))
        ));
    }

    #[test]
    fn test_key_reuse_starts_fresh_session() {
        let buffer = SessionBuffer::new();
        let vehicle_id = Uuid::new_v4();

        buffer.append("s1", vehicle_id, sample_with_speed(10.0));
        buffer.finalize("s1").unwrap();

        buffer.append("s1", vehicle_id, sample_with_speed(99.0));
        let second = buffer.finalize("s1").unwrap();
        assert_eq!(second.samples.len(), 1);
        assert_eq!(second.samples[0].speed, 99.0);
    }

    #[test]
    fn test_concurrent_finalize_exactly_one_winner() {
        let buffer = Arc::new(SessionBuffer::new());
        let vehicle_id = Uuid::new_v4();
        for _ in 0..100 {
            buffer.append("race", vehicle_id, TelemetrySample::idle());
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let buffer = buffer.clone();
                std::thread::spawn(move || buffer.finalize("race").map(|f| f.samples.len()))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(*winners[0].as_ref().unwrap(), 100);
    }

    #[test]
    fn test_concurrent_appends_all_retained() {
        let buffer = Arc::new(SessionBuffer::new());
        let vehicle_id = Uuid::new_v4();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let buffer = buffer.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        buffer.append("busy", vehicle_id, TelemetrySample::idle());
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(buffer.len("busy"), Some(1000));
        let finalized = buffer.finalize("busy").unwrap();
        assert_eq!(finalized.samples.len(), 1000);
    }
}
