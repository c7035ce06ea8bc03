//! Outlet Service - Map-side use cases
//!
//! Fetches outlets from the directory and answers the queries behind the
//! map view: list, lookup, search, type-ahead and the nearby catchment.

use crate::domain::entities::Outlet;
use crate::domain::errors::LocatorError;
use crate::domain::ports::OutletDirectory;
use crate::domain::services::{around_point, nearby_with_distance, OutletCatalog};
use crate::domain::value_objects::Coordinate;
use serde::Serialize;
use std::sync::Arc;

/// An outlet in a catchment, with its distance from the selected one.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyOutlet {
    #[serde(flatten)]
    pub outlet: Outlet,
    pub distance_km: f64,
}

/// Result of a nearby lookup.
#[derive(Debug, Clone, Serialize)]
pub struct Catchment {
    pub origin: Outlet,
    pub radius_km: f64,
    pub outlets: Vec<NearbyOutlet>,
}

/// Result of a lookup around a map point.
#[derive(Debug, Clone, Serialize)]
pub struct PointCatchment {
    #[serde(flatten)]
    pub point: Coordinate,
    pub radius_km: f64,
    pub outlets: Vec<NearbyOutlet>,
}

pub struct OutletService {
    directory: Arc<dyn OutletDirectory>,
    default_radius_km: f64,
    suggestion_limit: usize,
}

impl OutletService {
    pub fn new(
        directory: Arc<dyn OutletDirectory>,
        default_radius_km: f64,
        suggestion_limit: usize,
    ) -> Self {
        Self {
            directory,
            default_radius_km,
            suggestion_limit,
        }
    }

    pub async fn list(&self) -> Result<Vec<Outlet>, LocatorError> {
        self.directory.list_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Outlet, LocatorError> {
        let outlets = self.directory.list_all().await?;
        OutletCatalog::find(&outlets, id)
            .cloned()
            .ok_or(LocatorError::OutletNotFound(id))
    }

    /// Outlets matching every given filter: name substring and city in the
    /// address. With no filters this is the full list.
    pub async fn search(
        &self,
        name: Option<&str>,
        city: Option<&str>,
    ) -> Result<Vec<Outlet>, LocatorError> {
        let mut outlets = self.directory.list_all().await?;
        if let Some(name) = name {
            outlets = OutletCatalog::by_name(&outlets, name);
        }
        if let Some(city) = city {
            outlets = OutletCatalog::by_city(&outlets, city);
        }
        Ok(outlets)
    }

    pub async fn suggest(&self, query: &str) -> Result<Vec<Outlet>, LocatorError> {
        let outlets = self.directory.list_all().await?;
        Ok(OutletCatalog::suggest(&outlets, query, self.suggestion_limit))
    }

    fn radius(&self, radius_km: Option<f64>) -> Result<f64, LocatorError> {
        let radius_km = radius_km.unwrap_or(self.default_radius_km);
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(LocatorError::Parse(format!(
                "radius {} must be a non-negative number of kilometres",
                radius_km
            )));
        }
        Ok(radius_km)
    }

    /// Outlets around outlet `id`, within `radius_km` or the configured default.
    pub async fn nearby(&self, id: i64, radius_km: Option<f64>) -> Result<Catchment, LocatorError> {
        let radius_km = self.radius(radius_km)?;

        let outlets = self.directory.list_all().await?;
        let origin = OutletCatalog::find(&outlets, id)
            .cloned()
            .ok_or(LocatorError::OutletNotFound(id))?;

        let nearby = nearby_with_distance(&origin, &outlets, radius_km)
            .into_iter()
            .map(|(outlet, distance_km)| NearbyOutlet {
                outlet,
                distance_km,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "outlet {} has {} neighbours within {} km",
            id,
            nearby.len(),
            radius_km
        );

        Ok(Catchment {
            origin,
            radius_km,
            outlets: nearby,
        })
    }

    /// Outlets within `radius_km` (or the configured default) of a map point.
    pub async fn near_point(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<f64>,
    ) -> Result<PointCatchment, LocatorError> {
        let point = Coordinate::new(latitude, longitude)?;
        let radius_km = self.radius(radius_km)?;

        let outlets = self.directory.list_all().await?;
        let found = around_point(&point, &outlets, radius_km)
            .into_iter()
            .map(|(outlet, distance_km)| NearbyOutlet {
                outlet,
                distance_km,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "{} outlets within {} km of ({}, {})",
            found.len(),
            radius_km,
            latitude,
            longitude
        );

        Ok(PointCatchment {
            point,
            radius_km,
            outlets: found,
        })
    }
}
