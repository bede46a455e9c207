//! Orbital geometry, stellar appearance and coordinate scaling.
//!
//! Everything in this crate is pure: no state, no I/O. Scene-building crates
//! turn its outputs into entities.

pub mod constants;
pub mod coordinates;
pub mod elements;
pub mod error;
pub mod scaler;
pub mod stellar;


pub use coordinates::{cartesian_to_spherical, spherical_to_cartesian, EquatorialPosition};
pub use elements::{
    apply_orbital_rotation, default_orbit_curve, ellipse_point, generate_orbit_curve,
    periapsis_position, solve_kepler, true_anomaly, OrbitalElements,
};
pub use error::{ElementsError, ElementsResult};
pub use scaler::{CoordinateScaler, OrbitalScale, StellarScale};
pub use stellar::{
    blackbody_to_color, glow_intensity, habitable_zone_annulus, HabitableZone,
    StarPhysicalProfile,
};
