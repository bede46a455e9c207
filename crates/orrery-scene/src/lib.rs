//! Scene graph bookkeeping for the orrery views
//!
//! Holds the live entity registry, the camera, screen-space picking and
//! camera transitions. Nothing here knows about catalogs or view modes.

pub mod camera;
pub mod entity;
pub mod picker;
pub mod registry;
pub mod transition;

// Re-export core types
pub use camera::*;
pub use entity::*;
pub use picker::{PickHit, PickOptions, PickTier, Picker};
pub use registry::SceneBodyRegistry;
pub use transition::*;
