mod event;
mod location;
mod route;

pub use event::{
    ProximityEvent, ProximityKind, RecalculationDecision, TrackingEvent, TrackingSnapshot,
};
pub use location::Coordinates;
pub use route::{Route, RouteKind, RouteRequest};
