use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hifitime::Epoch;
use orrery_core::{
    generate_orbit_curve, habitable_zone_annulus, periapsis_position, EquatorialPosition,
    OrbitalElements, StarPhysicalProfile,
};
use orrery_sim::{Body, SolarSystem};
use orrery_view::{apply_input, Catalog, InputEvent, ViewConfig, ViewOrchestrator};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Exoplanet orrery: orbit geometry, star appearance and headless view sessions")]
struct Cli {
    /// View configuration (JSON); defaults apply to missing fields
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample an orbit curve and print its periapsis
    Orbit {
        /// Semi-major axis (AU)
        #[arg(short)]
        a: f64,
        /// Eccentricity
        #[arg(short, default_value = "0")]
        e: f64,
        /// Inclination (degrees)
        #[arg(short, default_value = "0")]
        i: f64,
        /// Argument of periastron (degrees)
        #[arg(long, default_value = "0")]
        omega: f64,
        /// Longitude of ascending node (degrees)
        #[arg(long, default_value = "0")]
        node: f64,
        #[arg(long, default_value = "240")]
        samples: usize,
        /// Print every n-th point
        #[arg(long, default_value = "30")]
        every: usize,
    },

    /// Star color, glow and habitable zone
    Star {
        /// Effective temperature (K)
        #[arg(short, long)]
        temperature: Option<f64>,
        /// Radius (solar radii)
        #[arg(short, long)]
        radius: Option<f64>,
        /// Luminosity (solar luminosities)
        #[arg(short, long)]
        luminosity: Option<f64>,
    },

    /// Scene position of a catalog coordinate in the overview
    Place {
        /// Right ascension (degrees)
        #[arg(long)]
        ra: f64,
        /// Declination (degrees)
        #[arg(long, allow_hyphen_values = true)]
        dec: f64,
        /// Distance (parsecs)
        #[arg(long)]
        distance: Option<f64>,
    },

    /// Solar-system body positions at an epoch
    Solar {
        #[arg(short, long, default_value = "2000-01-01T12:00:00 UTC")]
        epoch: String,
    },

    /// Run a scripted headless session and print UI snapshots as JSON lines
    Session {
        /// Catalog JSON ({"systems": [...], "planets": [...]})
        #[arg(long)]
        catalog: PathBuf,
        /// Script JSON: array of input events and {"wait": frames} steps
        #[arg(long)]
        script: PathBuf,
        /// Frame time (seconds)
        #[arg(long, default_value = "0.016666667")]
        dt: f64,
    },
}

/// One scripted step
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptStep {
    Wait { wait: u32 },
    Input(InputEvent),
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Orbit { a, e, i, omega, node, samples, every } => {
            let elements = OrbitalElements::new(a, e, i, omega)
                .context("Invalid orbital elements")?
                .with_ascending_node(node);
            let curve = generate_orbit_curve(&elements, samples);
            let peri = periapsis_position(&elements);

            println!(
                "Periapsis {:.6} AU at ({:.6}, {:.6}, {:.6})",
                elements.periapsis_distance(),
                peri.x,
                peri.y,
                peri.z
            );
            println!("Apoapsis  {:.6} AU", elements.apoapsis_distance());
            println!("{} points (closed loop)", curve.len());
            println!("{:>6} {:>12} {:>12} {:>12}", "k", "X (AU)", "Y (AU)", "Z (AU)");
            for (k, p) in curve.iter().enumerate().step_by(every.max(1)) {
                println!("{:>6} {:>12.6} {:>12.6} {:>12.6}", k, p.x, p.y, p.z);
            }
        }

        Commands::Star { temperature, radius, luminosity } => {
            let profile = StarPhysicalProfile {
                temperature_k: temperature,
                radius_solar: radius,
                mass_solar: None,
                luminosity_solar: luminosity,
            };
            let [r, g, b] = profile.color();
            println!("Temperature {:.0} K", profile.temperature());
            println!("Color       ({:.3}, {:.3}, {:.3})", r, g, b);
            println!("Glow        {:.3}", profile.glow());
            match habitable_zone_annulus(&profile) {
                Some(zone) => println!(
                    "Habitable zone {:.3} - {:.3} AU (width {:.3} AU)",
                    zone.inner_au,
                    zone.outer_au,
                    zone.width()
                ),
                None => println!("Habitable zone unresolvable (no luminosity or temperature)"),
            }
        }

        Commands::Place { ra, dec, distance } => {
            let scaler = config.overview_scaler();
            let position = EquatorialPosition::new(ra, dec, distance);
            let p = scaler.place_system(&position);
            if position.usable_distance().is_none() {
                println!(
                    "No usable distance; placed at fallback {} pc",
                    scaler.stellar.fallback_distance_pc
                );
            }
            println!(
                "Scene position ({:.4}, {:.4}, {:.4}), |p| = {:.4}",
                p.x,
                p.y,
                p.z,
                p.length()
            );
        }

        Commands::Solar { epoch } => {
            let epoch = Epoch::from_str(&epoch)
                .with_context(|| format!("Unparseable epoch {epoch:?}"))?;
            let system = SolarSystem::at_epoch(epoch);
            println!(
                "{:<10} {:>12} {:>12} {:>12} {:>10} {:>9}",
                "Body", "X (AU)", "Y (AU)", "Z (AU)", "Dist (AU)", "Spin (°)"
            );
            for body in Body::all() {
                let state = system.body_state(*body);
                let p = state.position_au;
                println!(
                    "{:<10} {:>12.6} {:>12.6} {:>12.6} {:>10.4} {:>9.1}",
                    body.name(),
                    p.x,
                    p.y,
                    p.z,
                    p.length(),
                    state.spin_angle.to_degrees()
                );
            }
        }

        Commands::Session { catalog, script, dt } => {
            run_session(config, &catalog, &script, dt)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ViewConfig> {
    match path {
        Some(path) => ViewConfig::load_json(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ViewConfig::default()),
    }
}

fn run_session(config: ViewConfig, catalog: &Path, script: &Path, dt: f64) -> Result<()> {
    if !(dt.is_finite() && dt >= 0.0) {
        bail!("Frame time must be a non-negative number, got {dt}");
    }
    let content = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let steps: Vec<ScriptStep> = serde_json::from_str(&content)
        .with_context(|| format!("Malformed script {}", script.display()))?;

    // An unreadable catalog is reported through the no-data flag
    let mut view = ViewOrchestrator::from_load(config, Catalog::load_json(catalog));
    tracing::info!("Running {} script steps", steps.len());

    for step in steps {
        let frames = match step {
            ScriptStep::Wait { wait } => wait,
            ScriptStep::Input(event) => {
                apply_input(event, &mut view);
                1
            }
        };
        let mut ui = view.ui();
        for _ in 0..frames {
            ui = view.tick(dt).ui;
        }
        println!("{}", serde_json::to_string(&ui)?);
    }

    Ok(())
}
