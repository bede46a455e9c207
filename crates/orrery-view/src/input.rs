//! Host input protocol

use crate::orchestrator::ViewOrchestrator;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Input event from the host window or a script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    /// Pointer position in pixels, top-left origin
    PointerMove { x: f64, y: f64 },

    PointerLeave,

    /// Primary-button click
    Click { x: f64, y: f64 },

    /// Drag delta in pixels
    Drag { dx: f64, dy: f64 },

    /// Wheel delta; positive zooms out
    Zoom { delta: f64 },

    Back,

    Resize { width: f64, height: f64 },

    /// Pick a system by host name
    SelectSystem { host: String },

    /// Overview clock rate (simulated days per second)
    SetTimeRate { days_per_second: f64 },

    TogglePause,
}

/// Parse input event from JSON
pub fn parse_input(json: &str) -> Result<InputEvent, serde_json::Error> {
    serde_json::from_str(json)
}

/// Apply input event to the orchestrator
pub fn apply_input(event: InputEvent, view: &mut ViewOrchestrator) {
    match event {
        InputEvent::PointerMove { x, y } => view.pointer_moved(DVec2::new(x, y)),
        InputEvent::PointerLeave => view.pointer_left(),
        InputEvent::Click { x, y } => {
            view.select_at(DVec2::new(x, y));
        }
        InputEvent::Drag { dx, dy } => {
            view.drag(dx, dy);
        }
        InputEvent::Zoom { delta } => {
            view.zoom(delta);
        }
        InputEvent::Back => view.back(),
        InputEvent::Resize { width, height } => view.set_viewport(width, height),
        InputEvent::SelectSystem { host } => {
            view.select_system(&host);
        }
        InputEvent::SetTimeRate { days_per_second } => {
            view.clock_mut().set_days_per_second(days_per_second);
        }
        InputEvent::TogglePause => view.clock_mut().toggle_pause(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_events() {
        assert_eq!(
            parse_input(r#"{"type": "Click", "x": 10.0, "y": 20.5}"#).unwrap(),
            InputEvent::Click { x: 10.0, y: 20.5 }
        );
        assert_eq!(parse_input(r#"{"type": "Back"}"#).unwrap(), InputEvent::Back);
        assert!(parse_input(r#"{"type": "Teleport"}"#).is_err());
    }
}
