use approx::assert_abs_diff_eq;
use glam::{DVec2, DVec3};
use orrery_scene::{EntityId, EntityKind, PickTier};
use orrery_view::builder::{marker_id, orbit_id};
use orrery_view::{
    apply_input, Catalog, CatalogError, InputEvent, PlanetRecord, SystemRecord, ViewConfig,
    ViewOrchestrator, ViewState,
};

const DT: f64 = 1.0 / 60.0;

fn system(host: &str, ra: f64, dec: f64, distance_pc: Option<f64>) -> SystemRecord {
    SystemRecord {
        host_name: host.to_string(),
        ra,
        dec,
        distance_pc,
        star_temperature_k: Some(5200.0),
        star_radius_solar: Some(0.9),
        star_mass_solar: Some(0.95),
        star_luminosity_solar: None,
    }
}

fn planet(host: &str, name: &str, a: f64, e: f64) -> PlanetRecord {
    PlanetRecord {
        host_name: host.to_string(),
        planet_name: name.to_string(),
        semi_major_axis_au: Some(a),
        eccentricity: Some(e),
        inclination_deg: None,
        arg_of_periastron_deg: None,
        radius_earth: Some(1.5),
    }
}

/// Markers well above the ecliptic so no orbit curve shares their pixels
fn catalog() -> Catalog {
    Catalog::new(
        vec![
            system("Alpha", 90.0, 60.0, Some(10.0)),
            system("Beta", 200.0, 55.0, Some(12.0)),
            system("Broken", 300.0, 65.0, Some(8.0)),
            system("Undated", 45.0, 50.0, Some(0.0)),
        ],
        vec![
            planet("Alpha", "Alpha b", 1.0, 0.0),
            planet("Alpha", "Alpha c", 2.5, 0.2),
            planet("Beta", "Beta b", 0.3, 0.05),
            planet("Broken", "Broken b", 1.0, 1.2),
        ],
    )
}

fn config() -> ViewConfig {
    ViewConfig { overview_distance: 600.0, ..Default::default() }
}

fn orchestrator() -> ViewOrchestrator {
    ViewOrchestrator::new(config(), catalog())
}

fn settle(view: &mut ViewOrchestrator) {
    for _ in 0..1000 {
        if !view.is_animating() {
            return;
        }
        view.tick(DT);
    }
    panic!("transition never finished");
}

fn pixel_of(view: &ViewOrchestrator, id: &EntityId) -> DVec2 {
    let world = view.registry().world_position(id).unwrap();
    let pixel = view.camera().project(world).unwrap();
    let viewport = view.camera().viewport;
    assert!(
        pixel.x >= 0.0 && pixel.y >= 0.0 && pixel.x <= viewport.x && pixel.y <= viewport.y,
        "{id} off screen at {pixel:?}"
    );
    pixel
}

fn enter(view: &mut ViewOrchestrator, host: &str) {
    let pixel = pixel_of(view, &marker_id(host));
    let hit = view.select_at(pixel).unwrap();
    assert_eq!(hit.tier, PickTier::Marker);
    settle(view);
}

#[test]
fn test_marker_pick_enters_detail_after_transition() {
    let mut view = orchestrator();
    let pixel = pixel_of(&view, &marker_id("Alpha"));
    view.select_at(pixel).unwrap();

    assert_eq!(view.state(), &ViewState::SystemOverview { system: "Alpha".into() });
    assert!(view.is_animating());
    // Overview entities stay until the camera arrives
    view.tick(DT);
    assert!(view.registry().contains(&"Earth".into()));

    settle(&mut view);
    assert_eq!(
        view.state(),
        &ViewState::StarDetail { system: "Alpha".into(), focus: None }
    );
    assert!(!view.registry().contains(&"Earth".into()));
    assert!(!view.registry().contains(&marker_id("Alpha")));
    assert!(view.registry().contains(&"Alpha".into()));
    assert_eq!(view.camera().target, DVec3::ZERO);
    assert_eq!(view.detail_planets().len(), 2);
}

#[test]
fn test_circular_unit_orbit_on_x_axis() {
    let mut view = orchestrator();
    enter(&mut view, "Alpha");
    let p = view.registry().world_position(&"Alpha b".into()).unwrap();
    let factor = view.config().detail_orbit.factor();
    assert_abs_diff_eq!(p.x, factor, epsilon = 1e-9);
    assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-9);
}

#[test]
fn test_planet_focus_and_back() {
    let mut view = orchestrator();
    enter(&mut view, "Alpha");
    let base = view.camera().pose();

    let pixel = pixel_of(&view, &"Alpha b".into());
    let hit = view.select_at(pixel).unwrap();
    assert_eq!(hit.id.as_str(), "Alpha b");
    assert_eq!(hit.kind, EntityKind::Planet);
    settle(&mut view);

    let planet = view.registry().world_position(&"Alpha b".into()).unwrap();
    assert_abs_diff_eq!(view.camera().target.distance(planet), 0.0, epsilon = 1e-9);
    assert_eq!(view.ui().focused, Some("Alpha b".into()));
    // Same view, nothing rebuilt
    assert!(view.registry().contains(&"Alpha c".into()));

    view.back();
    assert_eq!(view.ui().focused, None);
    assert_eq!(view.camera().pose(), base);
    assert!(matches!(view.state(), ViewState::StarDetail { focus: None, .. }));

    view.back();
    assert_eq!(view.state(), &ViewState::SolarOverview);
    assert!(view.registry().contains(&"Earth".into()));
    assert!(!view.registry().contains(&"Alpha b".into()));
}

#[test]
fn test_orbit_curve_pick_focuses_its_planet() {
    let mut view = orchestrator();
    enter(&mut view, "Alpha");

    // Apoapsis side of the circular orbit, far from the planet itself
    let factor = view.config().detail_orbit.factor();
    let far_side = view.camera().project(DVec3::new(-factor, 0.0, 0.0)).unwrap();
    let hit = view.select_at(far_side + DVec2::new(0.0, 2.0)).unwrap();
    assert_eq!(hit.id, orbit_id(&"Alpha b".into()));
    assert_eq!(hit.target().as_str(), "Alpha b");
    settle(&mut view);
    assert_eq!(view.ui().focused, Some("Alpha b".into()));
}

#[test]
fn test_star_pick_clears_focus() {
    let mut view = orchestrator();
    enter(&mut view, "Alpha");
    let base = view.camera().pose();

    let pixel = pixel_of(&view, &"Alpha b".into());
    view.select_at(pixel);
    settle(&mut view);
    assert_eq!(view.ui().focused, Some("Alpha b".into()));

    // Pull back until the star is in view again
    assert!(view.zoom(55.0));
    let star = pixel_of(&view, &"Alpha".into());
    let hit = view.select_at(star).unwrap();
    assert_eq!(hit.kind, EntityKind::Star);
    assert_eq!(hit.tier, PickTier::Surface);
    settle(&mut view);
    assert_eq!(view.ui().focused, None);
    assert_abs_diff_eq!(view.camera().position.distance(base.position), 0.0, epsilon = 1e-9);
}

#[test]
fn test_malformed_elements_yield_no_bodies() {
    let mut view = orchestrator();
    enter(&mut view, "Broken");

    assert!(matches!(view.state(), ViewState::StarDetail { .. }));
    assert!(!view.registry().contains(&"Broken b".into()));
    assert!(!view.registry().contains(&orbit_id(&"Broken b".into())));
    assert!(view.registry().contains(&"Broken".into()));
    assert!(view
        .registry()
        .iter()
        .all(|e| e.kind != EntityKind::Planet && e.kind != EntityKind::OrbitCurve));
}

#[test]
fn test_zero_distance_system_uses_fallback() {
    let view = orchestrator();
    let config = view.config();
    let p = view.registry().world_position(&marker_id("Undated")).unwrap();
    let expected = config
        .overview_scaler()
        .stellar_distance(config.stellar.fallback_distance_pc);
    assert!(p.length() > 0.0);
    assert_abs_diff_eq!(p.length(), expected, epsilon = 1e-9);
}

#[test]
fn test_superseded_flight_completes_once() {
    let mut view = orchestrator();
    let pixel = pixel_of(&view, &marker_id("Alpha"));
    view.select_at(pixel);
    for _ in 0..10 {
        view.tick(DT);
    }
    assert!(view.select_system("Beta"));
    assert_eq!(view.state(), &ViewState::SystemOverview { system: "Beta".into() });

    settle(&mut view);
    assert_eq!(
        view.state(),
        &ViewState::StarDetail { system: "Beta".into(), focus: None }
    );
    assert!(!view.registry().contains(&"Alpha".into()));
    assert!(view.registry().contains(&"Beta b".into()));
}

#[test]
fn test_back_mid_flight_cancels() {
    let mut view = orchestrator();
    let base = view.camera().pose();
    let pixel = pixel_of(&view, &marker_id("Alpha"));
    view.select_at(pixel);
    view.tick(DT);
    view.tick(DT);

    view.back();
    assert_eq!(view.state(), &ViewState::SolarOverview);
    assert!(!view.is_animating());
    assert_eq!(view.camera().pose(), base);

    for _ in 0..200 {
        view.tick(DT);
    }
    assert_eq!(view.state(), &ViewState::SolarOverview);
}

#[test]
fn test_drag_and_zoom_only_when_idle() {
    let mut view = orchestrator();
    assert!(view.drag(10.0, 5.0));
    assert!(view.zoom(-1.0));

    assert!(view.select_system("Alpha"));
    let before = view.camera().pose();
    assert!(!view.drag(10.0, 5.0));
    assert!(!view.zoom(3.0));
    assert_eq!(view.camera().pose(), before);
}

#[test]
fn test_solar_planet_focus_in_overview() {
    let mut view = orchestrator();
    view.clock_mut().pause();
    let pixel = pixel_of(&view, &"Jupiter".into());
    let hit = view.select_at(pixel).unwrap();
    assert_eq!(hit.id.as_str(), "Jupiter");
    settle(&mut view);

    assert_eq!(view.state(), &ViewState::SolarOverview);
    assert_eq!(view.ui().focused, Some("Jupiter".into()));

    // Camera follows the body as the clock runs
    view.clock_mut().resume();
    view.clock_mut().set_days_per_second(30.0);
    for _ in 0..30 {
        view.tick(DT);
    }
    let jupiter = view.registry().world_position(&"Jupiter".into()).unwrap();
    assert_abs_diff_eq!(view.camera().target.distance(jupiter), 0.0, epsilon = 1e-6);

    view.back();
    assert_eq!(view.ui().focused, None);
}

#[test]
fn test_flight_to_fast_moving_planet_lands_on_it() {
    let mut view = orchestrator();
    view.clock_mut().set_days_per_second(orrery_sim::MAX_DAYS_PER_SECOND);
    let pixel = pixel_of(&view, &"Jupiter".into());
    assert_eq!(view.select_at(pixel).unwrap().id.as_str(), "Jupiter");
    settle(&mut view);

    let jupiter = view.registry().world_position(&"Jupiter".into()).unwrap();
    assert_abs_diff_eq!(view.camera().target.distance(jupiter), 0.0, epsilon = 1e-6);
}

#[test]
fn test_zero_transition_step_does_not_lock_input() {
    let json = r#"{"overview_distance": 600.0, "transition": {"mode": "per-tick", "step": 0.0}}"#;
    let config: ViewConfig = serde_json::from_str(json).unwrap();
    let mut view = ViewOrchestrator::new(config, catalog());
    assert!(view.select_system("Alpha"));
    view.tick(DT);

    assert!(!view.is_animating());
    assert!(matches!(view.state(), ViewState::StarDetail { .. }));
    assert!(view.drag(10.0, 5.0));
}

#[test]
fn test_hover_highlights_entity() {
    let mut view = orchestrator();
    let pixel = pixel_of(&view, &"Jupiter".into());
    apply_input(InputEvent::PointerMove { x: pixel.x, y: pixel.y }, &mut view);
    let frame = view.tick(0.0);

    assert_eq!(frame.ui.hovered, Some("Jupiter".into()));
    let jupiter = frame.item(&"Jupiter".into()).unwrap();
    assert_eq!(jupiter.uniforms.highlight, 1.0);
    assert_eq!(frame.item(&"Saturn".into()).unwrap().uniforms.highlight, 0.0);

    apply_input(InputEvent::PointerLeave, &mut view);
    assert_eq!(view.tick(0.0).ui.hovered, None);
}

#[test]
fn test_snapshot_mirrors_registry() {
    let mut view = orchestrator();
    let frame = view.tick(DT);
    assert_eq!(frame.items.len(), view.registry().len());
    assert!(frame.ui.sim_days > 0.0);

    let moon = frame.item(&"Moon".into()).unwrap();
    let earth = frame.item(&"Earth".into()).unwrap();
    let offset = view.registry().find(&"Moon".into()).unwrap().anchor.clone().unwrap().offset;
    assert_abs_diff_eq!(moon.position.distance(earth.position + offset), 0.0, epsilon = 1e-9);
}

#[test]
fn test_empty_or_unreadable_catalog_is_no_data() {
    let mut empty = ViewOrchestrator::new(config(), Catalog::default());
    assert!(empty.tick(DT).ui.no_data);
    assert!(empty.registry().contains(&"Sun".into()));

    let failed = ViewOrchestrator::from_load(config(), Err(CatalogError::Empty));
    assert!(failed.ui().no_data);
    assert!(!orchestrator().ui().no_data);
}

#[test]
fn test_scripted_session_from_json() {
    let mut view = orchestrator();
    let script = [
        r#"{"type": "Resize", "width": 1920.0, "height": 1080.0}"#,
        r#"{"type": "SelectSystem", "host": "Beta"}"#,
    ];
    for line in script {
        apply_input(orrery_view::parse_input(line).unwrap(), &mut view);
    }
    assert_eq!(view.camera().viewport, DVec2::new(1920.0, 1080.0));
    settle(&mut view);
    assert_eq!(view.state().system(), Some("Beta"));

    apply_input(InputEvent::Back, &mut view);
    assert_eq!(view.state(), &ViewState::SolarOverview);
}
