pub mod clock;
pub mod planets;
pub mod system;

pub use planets::Body;
pub use system::{days_since_j2000, j2000, BodyState, SolarSystem};
pub use clock::{SimClock, MAX_DAYS_PER_SECOND};
