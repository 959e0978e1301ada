use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, Route};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityKind {
    BranchPickup,
    CustomerArrival,
}

impl ProximityKind {
    pub fn name(&self) -> String {
        match self {
            Self::BranchPickup => "branch_pickup".into(),
            Self::CustomerArrival => "customer_arrival".into(),
        }
    }

    /// Order transition the consumer should offer when the partner arrives
    /// at this target.
    pub fn suggested_action(&self) -> String {
        match self {
            Self::BranchPickup => "mark_picked_up".into(),
            Self::CustomerArrival => "mark_delivered".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ProximityEvent {
    pub kind: ProximityKind,
    pub distance_km: f64,
    pub at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum TrackingEvent {
    RouteReady(Route),
    RouteCleared,
    Proximity(ProximityEvent),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecalculationDecision {
    Cleared,
    Reused,
    Scheduled,
}

/// Pull-style view of the tracked session: the current path (possibly
/// empty), straight-line distance and ETA.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    pub path: Vec<Coordinates>,
    pub distance_km: Option<f64>,
    pub eta_minutes: Option<i64>,
}
