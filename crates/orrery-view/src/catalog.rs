//! Read-only catalog snapshot of host systems and their planets

use crate::error::{CatalogError, CatalogResult};
use orrery_core::{
    ElementsError, ElementsResult, EquatorialPosition, OrbitalElements, StarPhysicalProfile,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One host star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemRecord {
    pub host_name: String,
    /// Right ascension (degrees)
    pub ra: f64,
    /// Declination (degrees)
    pub dec: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_pc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_temperature_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_radius_solar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_mass_solar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_luminosity_solar: Option<f64>,
}

impl SystemRecord {
    pub fn position(&self) -> EquatorialPosition {
        EquatorialPosition::new(self.ra, self.dec, self.distance_pc)
    }

    pub fn profile(&self) -> StarPhysicalProfile {
        StarPhysicalProfile {
            temperature_k: self.star_temperature_k,
            radius_solar: self.star_radius_solar,
            mass_solar: self.star_mass_solar,
            luminosity_solar: self.star_luminosity_solar,
        }
    }
}

/// One planet, keyed to its host by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub host_name: String,
    pub planet_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semi_major_axis_au: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eccentricity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclination_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_of_periastron_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_earth: Option<f64>,
}

impl PlanetRecord {
    /// Validated orbit; optional angles and eccentricity default to zero
    pub fn elements(&self) -> ElementsResult<OrbitalElements> {
        let a = self
            .semi_major_axis_au
            .ok_or(ElementsError::Missing { field: "semi-major axis" })?;
        OrbitalElements::from_catalog(
            a,
            self.eccentricity,
            self.inclination_deg,
            self.arg_of_periastron_deg,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub systems: Vec<SystemRecord>,
    #[serde(default)]
    pub planets: Vec<PlanetRecord>,
}

impl Catalog {
    pub fn new(systems: Vec<SystemRecord>, planets: Vec<PlanetRecord>) -> Self {
        Self { systems, planets }
    }

    /// Parse a catalog; a catalog without systems is an error
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }

    pub fn load_json(path: &Path) -> CatalogResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(
            "Loaded {} systems and {} planets from {}",
            catalog.systems.len(),
            catalog.planets.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn system(&self, host_name: &str) -> Option<&SystemRecord> {
        self.systems.iter().find(|s| s.host_name == host_name)
    }
}

/// Host name to planet records, built when a view is constructed and dropped
/// with it
#[derive(Debug, Clone, Default)]
pub struct HostIndex {
    planets: HashMap<String, Vec<PlanetRecord>>,
}

impl HostIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut planets: HashMap<String, Vec<PlanetRecord>> = HashMap::new();
        for planet in &catalog.planets {
            planets
                .entry(planet.host_name.clone())
                .or_default()
                .push(planet.clone());
        }
        Self { planets }
    }

    /// Index restricted to one host
    pub fn for_host(catalog: &Catalog, host_name: &str) -> Self {
        let records: Vec<PlanetRecord> = catalog
            .planets
            .iter()
            .filter(|p| p.host_name == host_name)
            .cloned()
            .collect();
        let mut planets = HashMap::new();
        if !records.is_empty() {
            planets.insert(host_name.to_string(), records);
        }
        Self { planets }
    }

    pub fn planets_of(&self, host_name: &str) -> &[PlanetRecord] {
        self.planets.get(host_name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn host_count(&self) -> usize {
        self.planets.len()
    }
}
