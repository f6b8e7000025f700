//! Telemetry samples - one moment of vehicle state
//!
//! This is the fixed-field record shape consumed by the scoring service
//! boundary. Every field is required; samples are immutable once captured
//! and identified by arrival order within a session.

use serde::{Deserialize, Serialize};

/// A single telemetry reading from a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Vehicle speed (km/h)
    pub speed: f32,
    /// Engine revolutions per minute
    pub rpm: f32,
    /// Longitudinal acceleration (m/s^2)
    pub acceleration: f32,
    /// Throttle position (0-100%)
    pub throttle_position: f32,
    /// Engine coolant temperature (Celsius)
    pub engine_temperature: f32,
    /// Electrical system voltage
    pub system_voltage: f32,
    /// Calculated engine load (0-100%)
    pub engine_load: f32,
    /// Distance travelled since the previous sample (km)
    pub distance_travelled: f32,
    /// Brake pedal signal (0 = released, 1 = fully applied)
    pub brake: f32,
}

impl TelemetrySample {
    /// Create a stationary sample with nominal engine readings
    pub fn idle() -> Self {
        Self {
            speed: 0.0,
            rpm: 800.0,
            acceleration: 0.0,
            throttle_position: 0.0,
            engine_temperature: 90.0,
            system_voltage: 13.8,
            engine_load: 20.0,
            distance_travelled: 0.0,
            brake: 0.0,
        }
    }
}
