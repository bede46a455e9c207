/// Astronomical unit in kilometers
pub const AU_KM: f64 = 1.495978707e8;

/// Parsec in astronomical units
pub const PARSEC_AU: f64 = 206_264.806_247;

/// Solar radius in kilometers
pub const SOLAR_RADIUS_KM: f64 = 695_700.0;

/// Earth mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Effective temperature of the Sun (K)
pub const SOLAR_TEMPERATURE_K: f64 = 5778.0;

/// Reference temperature of the habitable-zone flux polynomials (K)
pub const HZ_REFERENCE_TEMPERATURE_K: f64 = 5780.0;

/// Default number of samples along a generated orbit curve
pub const DEFAULT_ORBIT_SAMPLES: usize = 240;

/// Lower bound on orbit curve samples
pub const MIN_ORBIT_SAMPLES: usize = 16;

/// Upper bound on orbit curve samples
pub const MAX_ORBIT_SAMPLES: usize = 4096;

/// Distance used when a catalog system has no usable distance (parsecs)
pub const FALLBACK_DISTANCE_PC: f64 = 10.0;

/// Glow intensity reported for stars of unknown luminosity
pub const MIN_GLOW_INTENSITY: f64 = 0.35;

/// Upper clamp on glow intensity
pub const MAX_GLOW_INTENSITY: f64 = 3.0;
