//! Solar-system orbital elements and physical properties
//!
//! Data from JPL approximate elements and NASA fact sheets
//! Reference epoch: J2000.0 (2000-01-01T12:00:00 TDB)

use orrery_core::OrbitalElements;

/// Body identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Element row: a (AU), e, i, Ω, ω, M₀ (degrees)
struct ElementRow(f64, f64, f64, f64, f64, f64);

impl Body {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }

    /// Mean radius in kilometers
    pub fn radius_km(&self) -> f64 {
        match self {
            Self::Sun => 696_340.0,
            Self::Mercury => 2_439.7,
            Self::Venus => 6_051.8,
            Self::Earth => 6_371.0,
            Self::Moon => 1_737.4,
            Self::Mars => 3_389.5,
            Self::Jupiter => 69_911.0,
            Self::Saturn => 58_232.0,
            Self::Uranus => 25_362.0,
            Self::Neptune => 24_622.0,
            Self::Pluto => 1_188.0,
        }
    }

    /// Sidereal orbital period in days. None for the Sun.
    pub fn orbital_period_days(&self) -> Option<f64> {
        match self {
            Self::Sun => None,
            Self::Mercury => Some(87.969),
            Self::Venus => Some(224.701),
            Self::Earth => Some(365.256),
            Self::Moon => Some(27.3217),
            Self::Mars => Some(686.980),
            Self::Jupiter => Some(4_332.589),
            Self::Saturn => Some(10_759.22),
            Self::Uranus => Some(30_685.4),
            Self::Neptune => Some(60_189.0),
            Self::Pluto => Some(90_560.0),
        }
    }

    /// Sidereal rotation period in hours (negative = retrograde)
    pub fn rotation_period_hours(&self) -> f64 {
        match self {
            Self::Sun => 609.12,
            Self::Mercury => 1_407.6,
            Self::Venus => -5_832.5,
            Self::Earth => 23.9345,
            Self::Moon => 655.7,
            Self::Mars => 24.6229,
            Self::Jupiter => 9.925,
            Self::Saturn => 10.656,
            Self::Uranus => -17.24,
            Self::Neptune => 16.11,
            Self::Pluto => -153.3,
        }
    }

    /// Body this one orbits. None for the Sun.
    pub fn parent(&self) -> Option<Body> {
        match self {
            Self::Sun => None,
            Self::Moon => Some(Self::Earth),
            _ => Some(Self::Sun),
        }
    }

    /// Flat fallback color used when no texture is available
    pub fn base_color(&self) -> [f32; 3] {
        match self {
            Self::Sun => [1.0, 0.92, 0.75],
            Self::Mercury => [0.62, 0.60, 0.58],
            Self::Venus => [0.91, 0.82, 0.62],
            Self::Earth => [0.30, 0.50, 0.85],
            Self::Moon => [0.70, 0.70, 0.70],
            Self::Mars => [0.80, 0.42, 0.25],
            Self::Jupiter => [0.85, 0.74, 0.60],
            Self::Saturn => [0.90, 0.82, 0.62],
            Self::Uranus => [0.62, 0.85, 0.90],
            Self::Neptune => [0.35, 0.50, 0.90],
            Self::Pluto => [0.78, 0.70, 0.62],
        }
    }

    /// Texture key handed to the renderer
    pub fn texture_key(&self) -> String {
        let lower = self.name().to_lowercase();
        format!("textures/{lower}/{lower}_2k.jpg")
    }

    fn element_row(&self) -> Option<ElementRow> {
        match self {
            Self::Sun => None,
            Self::Mercury => Some(ElementRow(0.387_098, 0.20563, 7.005, 48.331, 29.124, 174.796)),
            Self::Venus => Some(ElementRow(0.723_332, 0.00677, 3.3946, 76.680, 54.884, 50.115)),
            Self::Earth => {
                Some(ElementRow(1.000_001, 0.01671, 0.00005, -11.26064, 114.20783, 357.51716))
            }
            Self::Moon => Some(ElementRow(0.002_570, 0.0549, 5.145, 125.08, 318.15, 135.27)),
            Self::Mars => Some(ElementRow(1.523_679, 0.0934, 1.850, 49.558, 286.502, 19.373)),
            Self::Jupiter => Some(ElementRow(5.204_4, 0.0489, 1.303, 100.464, 273.867, 20.020)),
            Self::Saturn => Some(ElementRow(9.582_6, 0.0565, 2.485, 113.665, 339.392, 317.020)),
            Self::Uranus => Some(ElementRow(19.218_4, 0.0457, 0.773, 74.006, 96.998857, 142.2386)),
            Self::Neptune => Some(ElementRow(30.110, 0.0113, 1.770, 131.784, 273.187, 256.228)),
            Self::Pluto => Some(ElementRow(39.482, 0.2488, 17.16, 110.299, 113.834, 14.53)),
        }
    }

    /// Orbital elements at J2000, relative to the parent body.
    /// Returns None for the Sun (it's the center)
    pub fn j2000_elements(&self) -> Option<OrbitalElements> {
        let ElementRow(a, e, i, node, w, _) = self.element_row()?;
        OrbitalElements::new(a, e, i, w)
            .ok()
            .map(|el| el.with_ascending_node(node))
    }

    /// Mean anomaly at J2000 (degrees)
    pub fn mean_anomaly_j2000_deg(&self) -> Option<f64> {
        self.element_row().map(|row| row.5)
    }

    /// All bodies including Sun
    pub fn all() -> &'static [Body] {
        &[
            Self::Sun, Self::Mercury, Self::Venus, Self::Earth, Self::Moon,
            Self::Mars, Self::Jupiter, Self::Saturn, Self::Uranus,
            Self::Neptune, Self::Pluto,
        ]
    }

    /// Planets only (heliocentric, no Sun/Moon)
    pub fn planets() -> &'static [Body] {
        &[
            Self::Mercury, Self::Venus, Self::Earth, Self::Mars,
            Self::Jupiter, Self::Saturn, Self::Uranus, Self::Neptune, Self::Pluto,
        ]
    }
}
