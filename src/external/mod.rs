mod osrm;

pub use osrm::OsrmDirections;

use async_trait::async_trait;

use crate::entities::{Coordinates, RouteRequest};
use crate::error::Error;

/// External directions service. Implementations return the drivable path
/// for a request; any transport or schema failure is reported uniformly as
/// an error and recovered by the engine.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn fetch_directions(&self, request: &RouteRequest) -> Result<Vec<Coordinates>, Error>;
}
