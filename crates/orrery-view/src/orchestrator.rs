//! View orchestration: selection, back navigation and the frame tick
//!
//! The orchestrator is the single writer of the camera, the registry and the
//! transition controller. A frame runs in a fixed order: advance the camera
//! transition (and apply its completion), re-pick for hover, update
//! time-varying appearance, then emit a snapshot.

use crate::builder::{
    build_detail, build_overview, marker_id, sync_solar_bodies, DetailLayout, OverviewLayout,
};
use crate::catalog::{Catalog, HostIndex, PlanetRecord};
use crate::config::ViewConfig;
use crate::error::CatalogResult;
use crate::state::{FrameSnapshot, RenderItem, UiSnapshot, ViewState};
use glam::{DVec2, DVec3};
use orrery_scene::{
    Camera, CameraPose, CameraTransitionController, CameraUniform, EntityId, EntityKind, PickHit,
    Picker, SceneBodyRegistry, TickOutcome,
};
use orrery_sim::{SimClock, SolarSystem};

/// Zoom factor per unit of wheel delta
const ZOOM_STEP: f64 = 1.1;

/// What to do once a camera transition lands
#[derive(Clone, Debug, PartialEq)]
pub enum ViewAction {
    /// Replace the overview with the detail view of a system
    EnterSystem(String),
    /// Framing only, no view change
    Settle,
}

enum ActiveView {
    Overview(OverviewLayout),
    Detail { layout: DetailLayout, index: HostIndex },
}

impl ActiveView {
    fn base_pose(&self) -> CameraPose {
        match self {
            Self::Overview(layout) => layout.base_pose,
            Self::Detail { layout, .. } => layout.base_pose,
        }
    }
}

pub struct ViewOrchestrator {
    config: ViewConfig,
    catalog: Catalog,
    no_data: bool,
    camera: Camera,
    registry: SceneBodyRegistry,
    transitions: CameraTransitionController<ViewAction>,
    state: ViewState,
    view: ActiveView,
    clock: SimClock,
    solar: SolarSystem,
    pointer: Option<DVec2>,
    hovered: Option<EntityId>,
    /// Solar body framed in the overview
    overview_focus: Option<EntityId>,
    shader_time: f64,
}

impl ViewOrchestrator {
    /// Start in the solar overview
    pub fn new(config: ViewConfig, catalog: Catalog) -> Self {
        let no_data = catalog.is_empty();
        if no_data {
            tracing::warn!("Catalog is empty; showing the solar system only");
        }
        let clock = SimClock::new(config.sim_days_per_second);
        let solar = SolarSystem::at_epoch(clock.epoch());
        let mut registry = SceneBodyRegistry::new();
        let layout = build_overview(&mut registry, &catalog, &config, &solar);
        let camera = Camera::new(layout.base_pose);

        Self {
            transitions: CameraTransitionController::new(config.transition),
            config,
            catalog,
            no_data,
            camera,
            registry,
            state: ViewState::SolarOverview,
            view: ActiveView::Overview(layout),
            clock,
            solar,
            pointer: None,
            hovered: None,
            overview_focus: None,
            shader_time: 0.0,
        }
    }

    /// Start from a catalog load; failures surface as the no-data state
    pub fn from_load(config: ViewConfig, catalog: CatalogResult<Catalog>) -> Self {
        match catalog {
            Ok(catalog) => Self::new(config, catalog),
            Err(err) => {
                tracing::warn!("Catalog unavailable: {}", err);
                Self::new(config, Catalog::default())
            }
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn registry(&self) -> &SceneBodyRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Catalog records of the planets in the open detail view
    pub fn detail_planets(&self) -> &[PlanetRecord] {
        match (&self.view, self.state.system()) {
            (ActiveView::Detail { index, .. }, Some(host)) => index.planets_of(host),
            _ => &[],
        }
    }

    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }

    pub fn is_animating(&self) -> bool {
        !self.transitions.is_idle()
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.camera.set_viewport(width, height);
    }

    pub fn pointer_moved(&mut self, pointer: DVec2) {
        self.pointer = Some(pointer);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    fn picker(&self) -> Picker {
        Picker::new(self.config.pick_options(self.state.is_overview()))
    }

    /// Pick under the pointer without acting on it
    pub fn pick_at(&self, pointer: DVec2) -> Option<PickHit> {
        self.picker().pick(&self.registry, &self.camera, pointer)
    }

    /// Click: pick and act on the hit
    pub fn select_at(&mut self, pointer: DVec2) -> Option<PickHit> {
        let hit = self.pick_at(pointer)?;
        tracing::debug!("Selected {} ({:?}, {:?})", hit.id, hit.kind, hit.tier);

        match hit.kind {
            EntityKind::SystemMarker => {
                let host = match &self.view {
                    ActiveView::Overview(layout) => layout.markers.get(&hit.id).cloned(),
                    ActiveView::Detail { .. } => None,
                };
                if let Some(host) = host {
                    self.fly_to_system(host);
                }
            }
            EntityKind::Planet | EntityKind::OrbitCurve => {
                let target = hit.target().clone();
                self.focus_body(target);
            }
            EntityKind::Star => self.clear_focus(),
            EntityKind::HabitableZoneBand => {}
        }
        Some(hit)
    }

    /// Select a system by host name, as from a list in the UI chrome
    pub fn select_system(&mut self, host: &str) -> bool {
        if self.catalog.system(host).is_none() {
            tracing::warn!("Unknown system {}", host);
            return false;
        }
        if !self.state.is_overview() {
            self.enter_overview();
        }
        self.fly_to_system(host.to_string())
    }

    fn fly_to_system(&mut self, host: String) -> bool {
        let Some(center) = self.registry.world_position(&marker_id(&host)) else {
            return false;
        };
        let pose = self.focus_pose(center, self.config.marker_radius);
        self.overview_focus = None;
        self.state = ViewState::SystemOverview { system: host.clone() };
        self.begin(pose, ViewAction::EnterSystem(host));
        true
    }

    fn focus_body(&mut self, target: EntityId) {
        let Some(entity) = self.registry.find(&target) else {
            return;
        };
        let radius = entity.surface_radius().unwrap_or(self.config.marker_radius);
        let Some(center) = self.registry.world_position(&target) else {
            return;
        };
        let pose = self.focus_pose(center, radius);

        match &mut self.state {
            ViewState::StarDetail { focus, .. } => *focus = Some(target),
            state => {
                *state = ViewState::SolarOverview;
                self.overview_focus = Some(target);
            }
        }
        self.begin(pose, ViewAction::Settle);
    }

    /// Reference star picked: drop the focus and reframe the view
    fn clear_focus(&mut self) {
        match &mut self.state {
            ViewState::StarDetail { focus, .. } => *focus = None,
            state => {
                *state = ViewState::SolarOverview;
                self.overview_focus = None;
            }
        }
        self.begin(self.view.base_pose(), ViewAction::Settle);
    }

    fn begin(&mut self, pose: CameraPose, action: ViewAction) {
        if let Some(dropped) = self.transitions.begin(&self.camera, pose, action) {
            tracing::debug!("Dropped pending {:?}", dropped);
        }
    }

    /// Keep the current viewing direction, at a distance framing `radius`
    fn focus_pose(&self, center: DVec3, radius: f64) -> CameraPose {
        let direction = (self.camera.position - self.camera.target)
            .try_normalize()
            .unwrap_or(DVec3::new(0.0, -1.0, 0.5).normalize());
        let distance = (radius * self.config.focus_framing)
            .clamp(self.config.min_camera_distance, self.config.max_camera_distance);
        CameraPose::new(center + direction * distance, center)
    }

    /// Return to the current view's base state
    pub fn back(&mut self) {
        match self.state.clone() {
            ViewState::StarDetail { system, focus: Some(_) } => {
                self.transitions.cancel();
                self.state = ViewState::StarDetail { system, focus: None };
                self.camera.set_pose(self.view.base_pose());
            }
            ViewState::StarDetail { focus: None, .. } => self.enter_overview(),
            ViewState::SystemOverview { .. } | ViewState::SolarOverview => {
                self.transitions.cancel();
                self.state = ViewState::SolarOverview;
                self.overview_focus = None;
                self.camera.set_pose(self.view.base_pose());
            }
        }
    }

    /// Rotate the camera; ignored while a transition owns the camera
    pub fn drag(&mut self, dx: f64, dy: f64) -> bool {
        if !self.transitions.is_idle() {
            return false;
        }
        let s = self.config.drag_sensitivity;
        self.camera.orbit(-dx * s, dy * s);
        true
    }

    /// Dolly toward (negative delta) or away from the target
    pub fn zoom(&mut self, delta: f64) -> bool {
        if !self.transitions.is_idle() {
            return false;
        }
        self.camera.zoom(
            ZOOM_STEP.powf(delta),
            self.config.min_camera_distance,
            self.config.max_camera_distance,
        );
        true
    }

    fn teardown(&mut self) {
        tracing::info!("Tearing down {:?} ({} entities)", self.state, self.registry.len());
        self.transitions.cancel();
        self.registry.clear();
        self.hovered = None;
        self.overview_focus = None;
    }

    fn enter_overview(&mut self) {
        self.teardown();
        let layout = build_overview(&mut self.registry, &self.catalog, &self.config, &self.solar);
        self.camera.set_pose(layout.base_pose);
        self.view = ActiveView::Overview(layout);
        self.state = ViewState::SolarOverview;
    }

    fn enter_detail(&mut self, host: &str) {
        let Some(system) = self.catalog.system(host).cloned() else {
            tracing::warn!("System {} vanished from the catalog", host);
            self.back();
            return;
        };
        self.teardown();
        let index = HostIndex::for_host(&self.catalog, host);
        let planets = index.planets_of(host);
        let layout = build_detail(&mut self.registry, &system, planets, &self.config);
        self.camera.set_pose(layout.base_pose);
        self.view = ActiveView::Detail { layout, index };
        self.state = ViewState::StarDetail { system: host.to_string(), focus: None };
    }

    fn complete(&mut self, action: ViewAction) {
        match action {
            ViewAction::EnterSystem(host) => self.enter_detail(&host),
            ViewAction::Settle => {}
        }
    }

    /// Run one frame
    pub fn tick(&mut self, dt: f64) -> FrameSnapshot {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if let TickOutcome::Completed(action) = self.transitions.tick(&mut self.camera, dt) {
            self.complete(action);
        }

        self.hovered = self
            .pointer
            .and_then(|p| self.pick_at(p))
            .map(|hit| hit.target().clone());

        self.update_appearance(dt);
        self.snapshot()
    }

    fn update_appearance(&mut self, dt: f64) {
        self.shader_time += dt;

        if let ActiveView::Overview(layout) = &self.view {
            let epoch = self.clock.tick(dt);
            self.solar.set_epoch(epoch);
            let focus = self.overview_focus.as_ref();
            let before = focus.and_then(|id| self.registry.world_position(id));
            sync_solar_bodies(&mut self.registry, &layout.bodies, &self.solar, &self.config);
            let after = focus.and_then(|id| self.registry.world_position(id));

            // Carry the camera, or its destination while in flight, along
            // with a focused body
            if let (Some(before), Some(after)) = (before, after) {
                let delta = after - before;
                if !self.transitions.shift_end(delta) {
                    self.camera.set_pose(CameraPose::new(
                        self.camera.position + delta,
                        self.camera.target + delta,
                    ));
                }
            }
        }

        let time = self.shader_time as f32;
        let hovered = self.hovered.as_ref();
        for entity in self.registry.iter_mut() {
            let lit = hovered.is_some_and(|h| &entity.id == h || entity.owner.as_ref() == Some(h));
            entity.appearance.uniforms.time = time;
            entity.appearance.uniforms.highlight = if lit { 1.0 } else { 0.0 };
        }
    }

    pub fn ui(&self) -> UiSnapshot {
        let focused = match &self.state {
            ViewState::StarDetail { focus, .. } => focus.clone(),
            _ => self.overview_focus.clone(),
        };
        UiSnapshot {
            view: self.state.clone(),
            hovered: self.hovered.clone(),
            focused,
            no_data: self.no_data,
            animating: self.is_animating(),
            sim_days: self.clock.elapsed_days(),
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let items = self
            .registry
            .iter()
            .map(|entity| RenderItem {
                id: entity.id.clone(),
                kind: entity.kind,
                position: self.registry.resolve(entity),
                rotation: entity.transform.rotation,
                geometry: entity.geometry.clone(),
                texture: entity.appearance.texture.clone(),
                uniforms: entity.appearance.uniforms,
            })
            .collect();

        FrameSnapshot {
            camera: CameraUniform::from_camera(&self.camera),
            items,
            ui: self.ui(),
        }
    }
}
