use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    PartnerToBranch,
    PartnerToCustomer,
}

impl RouteKind {
    pub fn name(&self) -> String {
        match self {
            Self::PartnerToBranch => "partner_to_branch".into(),
            Self::PartnerToCustomer => "partner_to_customer".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub kind: RouteKind,
}

/// A computed path between a partner and a target, replaced wholesale on
/// recomputation and never mutated in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub kind: RouteKind,
    pub path: Vec<Coordinates>,
    pub computed_at: DateTime<Utc>,
}

impl Route {
    pub fn new(request: &RouteRequest, path: Vec<Coordinates>) -> Self {
        Route {
            id: Uuid::new_v4(),
            origin: request.origin,
            destination: request.destination,
            kind: request.kind,
            path,
            computed_at: Utc::now(),
        }
    }

    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.computed_at)
    }
}
