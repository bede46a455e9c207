//! Stellar appearance and habitability
//!
//! Star color from effective temperature, glow from luminosity, and the
//! conservative habitable zone from the runaway / maximum greenhouse limits.

use crate::constants::{
    HZ_REFERENCE_TEMPERATURE_K, MAX_GLOW_INTENSITY, MIN_GLOW_INTENSITY, SOLAR_TEMPERATURE_K,
};
use serde::{Deserialize, Serialize};

/// Physical properties of a host star.
///
/// Fields keep whether the catalog supplied them; accessors apply the
/// documented defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StarPhysicalProfile {
    /// Effective temperature (K)
    pub temperature_k: Option<f64>,
    /// Radius (solar radii)
    pub radius_solar: Option<f64>,
    /// Mass (solar masses)
    pub mass_solar: Option<f64>,
    /// Luminosity (solar luminosities)
    pub luminosity_solar: Option<f64>,
}

impl StarPhysicalProfile {
    /// The Sun, with every field supplied
    pub fn sun() -> Self {
        Self {
            temperature_k: Some(SOLAR_TEMPERATURE_K),
            radius_solar: Some(1.0),
            mass_solar: Some(1.0),
            luminosity_solar: Some(1.0),
        }
    }

    pub fn temperature(&self) -> f64 {
        usable(self.temperature_k).unwrap_or(SOLAR_TEMPERATURE_K)
    }

    pub fn radius(&self) -> f64 {
        usable(self.radius_solar).unwrap_or(1.0)
    }

    pub fn mass(&self) -> f64 {
        usable(self.mass_solar).unwrap_or(1.0)
    }

    /// Luminosity, 0 when unknown
    pub fn luminosity(&self) -> f64 {
        usable(self.luminosity_solar).unwrap_or(0.0)
    }

    pub fn color(&self) -> [f32; 3] {
        blackbody_to_color(self.temperature())
    }

    pub fn glow(&self) -> f64 {
        glow_intensity(self.luminosity())
    }
}

/// Strictly positive finite value, or None
fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Blackbody temperature to RGB (Tanner Helland fit).
///
/// The fit is piecewise around 6600 K; both branches are blended over
/// 6500–6700 K so the output has no step at the seam.
pub fn blackbody_to_color(temperature_k: f64) -> [f32; 3] {
    let t = if temperature_k.is_finite() { temperature_k } else { SOLAR_TEMPERATURE_K };
    let t = t.clamp(1000.0, 40000.0) / 100.0;

    const SEAM: f64 = 66.0;
    const HALF_WIDTH: f64 = 1.0;

    let rgb = if t <= SEAM - HALF_WIDTH {
        helland_cool(t)
    } else if t >= SEAM + HALF_WIDTH {
        helland_hot(t)
    } else {
        let w = (t - (SEAM - HALF_WIDTH)) / (2.0 * HALF_WIDTH);
        let cool = helland_cool(t);
        let hot = helland_hot(t);
        [
            cool[0] + (hot[0] - cool[0]) * w,
            cool[1] + (hot[1] - cool[1]) * w,
            cool[2] + (hot[2] - cool[2]) * w,
        ]
    };

    [
        (rgb[0] / 255.0) as f32,
        (rgb[1] / 255.0) as f32,
        (rgb[2] / 255.0) as f32,
    ]
}

/// Branch for t <= 66 (t in hundreds of kelvin)
fn helland_cool(t: f64) -> [f64; 3] {
    let r = 255.0;
    let g = (99.4708025861 * t.ln() - 161.1195681661).clamp(0.0, 255.0);
    let b = if t <= 19.0 {
        0.0
    } else {
        (138.5177312231 * (t - 10.0).ln() - 305.0447927307).clamp(0.0, 255.0)
    };
    [r, g, b]
}

/// Branch for t >= 66 (t in hundreds of kelvin)
fn helland_hot(t: f64) -> [f64; 3] {
    let r = (329.698727446 * (t - 60.0).powf(-0.1332047592)).clamp(0.0, 255.0);
    let g = (288.1221695283 * (t - 60.0).powf(-0.0755148492)).clamp(0.0, 255.0);
    [r, g, 255.0]
}

/// Glow intensity from luminosity (solar units).
///
/// Unknown (zero, negative or non-finite) luminosity maps to
/// `MIN_GLOW_INTENSITY` so the star stays visible.
pub fn glow_intensity(luminosity: f64) -> f64 {
    if !luminosity.is_finite() || luminosity <= 0.0 {
        return MIN_GLOW_INTENSITY;
    }
    (MIN_GLOW_INTENSITY + 0.65 * (1.0 + luminosity).log10() / 2.0_f64.log10())
        .clamp(MIN_GLOW_INTENSITY, MAX_GLOW_INTENSITY)
}

/// Habitable-zone annulus (AU)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HabitableZone {
    pub inner_au: f64,
    pub outer_au: f64,
}

impl HabitableZone {
    pub fn width(&self) -> f64 {
        self.outer_au - self.inner_au
    }

    pub fn contains(&self, distance_au: f64) -> bool {
        distance_au >= self.inner_au && distance_au <= self.outer_au
    }
}

/// Effective stellar flux polynomial `S = S☉ + aT + bT² + cT³ + dT⁴`
struct FluxLimit {
    s_sun: f64,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl FluxLimit {
    fn at(&self, temperature_k: f64) -> f64 {
        let t = temperature_k.clamp(2600.0, 7200.0) - HZ_REFERENCE_TEMPERATURE_K;
        self.s_sun + self.a * t + self.b * t.powi(2) + self.c * t.powi(3) + self.d * t.powi(4)
    }
}

const RUNAWAY_GREENHOUSE: FluxLimit = FluxLimit {
    s_sun: 1.107,
    a: 1.332e-4,
    b: 1.580e-8,
    c: -8.308e-12,
    d: -1.931e-15,
};

const MAXIMUM_GREENHOUSE: FluxLimit = FluxLimit {
    s_sun: 0.356,
    a: 6.171e-5,
    b: 1.698e-9,
    c: -3.198e-12,
    d: -5.575e-16,
};

/// Conservative habitable zone for a star.
///
/// Luminosity comes from the catalog when supplied, otherwise from the
/// Stefan-Boltzmann relation `L = R² (T / T☉)⁴` when a temperature is
/// supplied. Returns None when neither is available.
pub fn habitable_zone_annulus(profile: &StarPhysicalProfile) -> Option<HabitableZone> {
    let temperature = usable(profile.temperature_k);

    let luminosity = match usable(profile.luminosity_solar) {
        Some(l) => l,
        None => {
            let t = temperature?;
            profile.radius().powi(2) * (t / SOLAR_TEMPERATURE_K).powi(4)
        }
    };

    let t_eff = temperature.unwrap_or(HZ_REFERENCE_TEMPERATURE_K);
    let inner_au = (luminosity / RUNAWAY_GREENHOUSE.at(t_eff)).sqrt();
    let outer_au = (luminosity / MAXIMUM_GREENHOUSE.at(t_eff)).sqrt();

    if !(inner_au.is_finite() && outer_au.is_finite()) || inner_au >= outer_au {
        return None;
    }

    Some(HabitableZone { inner_au, outer_au })
}
