//! View tuning: scales, pick tolerances, camera framing, playback

use crate::error::{ConfigError, ConfigResult};
use orrery_core::constants::DEFAULT_ORBIT_SAMPLES;
use orrery_core::{CoordinateScaler, OrbitalScale, StellarScale};
use orrery_scene::{PickOptions, ProgressMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Host-star placement in the overview
    pub stellar: StellarScale,
    /// Solar-system orbits in the overview
    pub solar_orbit: OrbitalScale,
    /// Exoplanet orbits in the star detail view
    pub detail_orbit: OrbitalScale,
    /// Exaggeration of satellite offsets so moons clear their planet
    pub satellite_exaggeration: f64,

    pub orbit_samples: usize,
    /// Screen distance within which an orbit curve is hit (pixels)
    pub curve_tolerance_px: f64,
    /// Smallest on-screen radius of a pick volume (pixels)
    pub min_pick_px: f64,
    /// Enlarged pick radius as a multiple of the visible radius
    pub pick_inflation: f64,
    /// Pick radius of overview system markers (scene units)
    pub marker_radius: f64,

    pub transition: ProgressMode,
    /// Overview camera distance from the Sun
    pub overview_distance: f64,
    /// Detail camera distance as a multiple of the outermost apoapsis
    pub detail_framing: f64,
    /// Focus distance as a multiple of the focused body's radius
    pub focus_framing: f64,
    pub min_camera_distance: f64,
    pub max_camera_distance: f64,
    /// Radians of orbit per dragged pixel
    pub drag_sensitivity: f64,

    /// Scene units per Earth radius
    pub planet_scale: f64,
    /// Scene units per solar radius
    pub star_scale: f64,
    /// Planet radius when the catalog has none (Earth radii)
    pub default_planet_radius_earth: f64,

    /// Simulated days per real second in the overview
    pub sim_days_per_second: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            stellar: StellarScale {
                scene_per_parsec: 40.0,
                distance_exponent: 0.5,
                ..Default::default()
            },
            solar_orbit: OrbitalScale { scene_per_au: 4.0, compression: 1.0 },
            detail_orbit: OrbitalScale::default(),
            satellite_exaggeration: 40.0,
            orbit_samples: DEFAULT_ORBIT_SAMPLES,
            curve_tolerance_px: 6.0,
            min_pick_px: 10.0,
            pick_inflation: 4.0,
            marker_radius: 1.5,
            transition: ProgressMode::default(),
            overview_distance: 220.0,
            detail_framing: 2.5,
            focus_framing: 12.0,
            min_camera_distance: 0.05,
            max_camera_distance: 5_000.0,
            drag_sensitivity: 0.005,
            planet_scale: 0.03,
            star_scale: 0.25,
            default_planet_radius_earth: 1.0,
            sim_days_per_second: 1.0,
        }
    }
}

impl ViewConfig {
    pub fn load_json(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn overview_scaler(&self) -> CoordinateScaler {
        CoordinateScaler::new(self.stellar, self.solar_orbit)
    }

    pub fn detail_scaler(&self) -> CoordinateScaler {
        CoordinateScaler::new(self.stellar, self.detail_orbit)
    }

    pub fn pick_options(&self, markers_enabled: bool) -> PickOptions {
        PickOptions { markers_enabled, min_pick_px: self.min_pick_px }
    }
}
