use std::time::Duration;

/// Tuning knobs for a tracking session.
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    /// Origin drift beyond this invalidates the cached route. Looser than
    /// the destination threshold to absorb GPS jitter.
    pub origin_threshold_km: f64,
    /// Destination drift beyond this invalidates the cached route.
    pub destination_threshold_km: f64,
    /// Routes older than this are recomputed regardless of movement.
    pub max_route_age: chrono::Duration,
    /// Quiet period collapsing bursts of location updates into a single
    /// provider call.
    pub debounce: Duration,
    /// Delay between a route being installed and `RouteReady` being
    /// emitted.
    pub transition_delay: Duration,
    /// Average speed assumed by the ETA estimate.
    pub average_speed_kmh: f64,
    /// Radius for pickup/arrival suggestions.
    pub proximity_threshold_km: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            origin_threshold_km: 0.05,
            destination_threshold_km: 0.01,
            max_route_age: chrono::Duration::seconds(120),
            debounce: Duration::from_millis(2000),
            transition_delay: Duration::from_millis(300),
            average_speed_kmh: 30.0,
            proximity_threshold_km: 0.05,
        }
    }
}
