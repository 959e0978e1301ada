use async_trait::async_trait;
use geo_types::Point;
use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    entities::{Coordinates, RouteRequest},
    error::{invalid_input_error, upstream_error, Error},
    external::DirectionsProvider,
};

pub const DEFAULT_API_BASE: &str = "router.project-osrm.org";

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    code: String,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct OsrmRoute {
    geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    // GeoJSON order: longitude first
    coordinates: Vec<[f64; 2]>,
}

#[derive(Clone, Debug)]
pub struct OsrmDirections {
    client: reqwest::Client,
    api_base: String,
}

impl OsrmDirections {
    pub fn new(api_base: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        let api_base = env::var("OSRM_API_BASE")?;

        Ok(Self::new(api_base))
    }
}

impl Default for OsrmDirections {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE.into())
    }
}

#[async_trait]
impl DirectionsProvider for OsrmDirections {
    #[tracing::instrument(skip(self))]
    async fn fetch_directions(&self, request: &RouteRequest) -> Result<Vec<Coordinates>, Error> {
        let url = format!(
            "https://{}/route/v1/driving/{},{};{},{}",
            self.api_base,
            request.origin.longitude,
            request.origin.latitude,
            request.destination.longitude,
            request.destination.latitude,
        );

        let res = self
            .client
            .get(url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code >= 400 && status_code < 500 {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let text = res.text().await?;

        let data: Response = serde_json::from_str(&text).map_err(|err| {
            tracing::error!("failed to parse directions response: {}", err);
            upstream_error()
        })?;

        if data.code != "Ok" {
            return Err(upstream_error());
        }

        let route = data
            .routes
            .and_then(|routes| routes.into_iter().next())
            .ok_or_else(|| upstream_error())?;

        Ok(route
            .geometry
            .coordinates
            .into_iter()
            .map(|[longitude, latitude]| Point::new(longitude, latitude).into())
            .collect())
    }
}
