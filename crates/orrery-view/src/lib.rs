//! Solar overview and star detail views over a read-only exoplanet catalog

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
pub mod orchestrator;
pub mod state;

pub use catalog::{Catalog, HostIndex, PlanetRecord, SystemRecord};
pub use config::ViewConfig;
pub use error::{CatalogError, CatalogResult, ConfigError, ConfigResult};
pub use input::{apply_input, parse_input, InputEvent};
pub use orchestrator::{ViewAction, ViewOrchestrator};
pub use state::{FrameSnapshot, RenderItem, UiSnapshot, ViewState};
