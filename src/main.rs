use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Instant;

use firesim::api::{fetch_land_cover, geocode_address};
use firesim::config::FileConfig;
use firesim::domain::FuelModel;
use firesim::export::{SessionSummary, session_to_geojson, write_json};
use firesim::osm::parse_land_cover;
use firesim::sim::{FireSimulation, FuelMap};
use firesim::{Coordinate, Session};

/// Run a toy wildfire spread scenario and export it as GeoJSON
///
/// Examples:
///   # Ignite at an address, scoped to the default region
///   firesim -a "Twin Peaks"
///
///   # Ignite at coordinates inside a drawn boundary with cameras
///   firesim --lat 37.5 --lon -121.5 \
///     --boundary "-121.55,37.45;-121.45,37.45;-121.45,37.55;-121.55,37.55" --cameras
///
///   # Reproducible run using downloaded land cover
///   firesim -a "Mount Tamalpais" --land-cover --seed 7 -o tam.geojson
///
///   # Print the fuel model legend
///   firesim --legend
#[derive(Parser, Debug)]
#[command(name = "firesim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches firesim.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to search for; also the ignition point unless --lat/--lon are given
    #[arg(short = 'a', long)]
    address: Option<String>,

    /// Region appended to addresses that do not mention it
    #[arg(long)]
    region: Option<String>,

    /// Ignition latitude (use with --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Ignition longitude (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Boundary polygon as "lon,lat;lon,lat;..." (at least 3 points)
    #[arg(short = 'b', long, allow_hyphen_values = true)]
    boundary: Option<String>,

    /// Boundary simplification tolerance in degrees (0 = off)
    #[arg(long)]
    simplify: Option<f64>,

    /// Scatter camera markers inside the boundary
    #[arg(long, requires = "boundary")]
    cameras: bool,

    /// Download OpenStreetMap land cover around the ignition point
    #[arg(long)]
    land_cover: bool,

    /// Land cover download radius in meters
    #[arg(short = 'r', long, default_value = "3000")]
    radius: u32,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated minutes per tick
    #[arg(long)]
    tick_minutes: Option<f64>,

    /// Stop after this many simulated minutes
    #[arg(long)]
    max_minutes: Option<f64>,

    /// Stop once this many hectares have burned
    #[arg(long)]
    max_hectares: Option<f64>,

    /// Disable burned-cell spread
    #[arg(long)]
    no_cells: bool,

    /// Output GeoJSON file path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Also write a JSON summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Print the fuel model legend and exit
    #[arg(long)]
    legend: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    if args.legend {
        print_legend();
        return Ok(());
    }

    let file_config = match args.config {
        Some(ref config_path) => {
            if !config_path.exists() {
                bail!("Config file not found: {:?}", config_path);
            }
            FileConfig::from_path(config_path)?
        }
        None => FileConfig::load().unwrap_or_default(),
    };

    let region = args.region.clone().or_else(|| file_config.region.clone());
    let verbose = args.verbose || file_config.verbose;
    let seed = args.seed.or(file_config.seed);
    let simplify_epsilon = args.simplify.unwrap_or(file_config.simplify_epsilon);
    let output = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| PathBuf::from("scenario.geojson"));

    let mut sim_settings = file_config.simulation.clone();
    if let Some(tick) = args.tick_minutes {
        sim_settings.tick_minutes = tick;
    }
    if let Some(max) = args.max_minutes {
        sim_settings.max_minutes = max;
    }
    if let Some(max) = args.max_hectares {
        sim_settings.max_hectares = max;
    }
    if args.no_cells {
        sim_settings.cell_spread = false;
    }
    sim_settings
        .validate()
        .context("Invalid simulation settings")?;

    let overpass_config = file_config.overpass.clone().unwrap_or_default();

    if args.address.is_none() && args.lat.is_none() {
        bail!("Must provide either --address/-a, or --lat and --lon");
    }

    println!("firesim - Wildfire Spread Scenario");
    println!("==================================");
    println!();

    if verbose {
        println!("Configuration:");
        if let Some(ref a) = args.address {
            println!("  Address: {}", a);
            println!("  Region: {}", region.as_deref().unwrap_or("(none)"));
        }
        if let (Some(lt), Some(ln)) = (args.lat, args.lon) {
            println!("  Ignition: ({:.4}, {:.4})", lt, ln);
        }
        println!("  Tick: {} min", sim_settings.tick_minutes);
        println!(
            "  Limits: {} min / {} ha",
            sim_settings.max_minutes, sim_settings.max_hectares
        );
        println!(
            "  Cell spread: {}",
            if sim_settings.cell_spread { "enabled" } else { "disabled" }
        );
        match seed {
            Some(s) => println!("  Seed: {}", s),
            None => println!("  Seed: random"),
        }
        println!("  Output: {}", output.display());
        println!("  Overpass mirrors: {}", overpass_config.urls.len());
        println!();
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let mut session = Session::new(FuelMap::new())
        .with_simulation_settings(sim_settings.clone())
        .with_camera_settings(file_config.cameras.clone())
        .with_simplify_epsilon(simplify_epsilon);

    if let Some(ref address) = args.address {
        let spinner = create_spinner("Searching address...");
        let start = Instant::now();
        let found = geocode_address(address, region.as_deref())
            .context("Failed to geocode address")?;
        spinner.finish_with_message(format!(
            "Found: {} -> ({:.4}, {:.4}) [{:.1}s]",
            found.label,
            found.location.lat(),
            found.location.lon(),
            start.elapsed().as_secs_f32()
        ));
        session.set_location(found.location, found.label);
    }

    let ignition = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Coordinate::new(lon, lat),
        _ => session
            .location()
            .map(|l| l.position)
            .context("No ignition point: provide --lat/--lon or an address")?,
    };

    if args.land_cover {
        let spinner = create_spinner("Fetching land cover from OpenStreetMap...");
        let start = Instant::now();
        let response = fetch_land_cover(ignition, args.radius, &overpass_config)
            .context("Failed to fetch land cover from Overpass API")?;
        let polygons = parse_land_cover(&response);
        let count = polygons.len();
        session.fuel_map_mut().add_land_cover(polygons);
        spinner.finish_with_message(format!(
            "Loaded {} land cover areas from {} elements [{:.1}s]",
            count,
            response.elements.len(),
            start.elapsed().as_secs_f32()
        ));
    }

    if let Some(ref spec) = args.boundary {
        for part in spec.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let point: Coordinate = part
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid boundary point: {}", e))?;
            session.add_boundary_point(point)?;
        }
        let drawn = session.draft().len();
        let boundary = session.complete_boundary()?;
        println!(
            "Boundary area completed: {:.2} sq km ({} points)",
            boundary.area_sq_km(),
            boundary.polygon().len()
        );
        if verbose && boundary.polygon().len() != drawn {
            println!("  Simplified from {} points", drawn);
        }
        if !boundary.contains(ignition) {
            eprintln!("Warning: ignition point lies outside the boundary");
        }
    }

    if args.cameras {
        let cameras = session.add_cameras(&mut rng)?;
        println!(
            "Added {} cameras with coverage radius of {}km",
            cameras.len(),
            file_config.cameras.radius_km
        );
        if verbose {
            for camera in cameras {
                println!(
                    "  Camera {} at ({:.5}, {:.5})",
                    camera.id,
                    camera.position.lat(),
                    camera.position.lon()
                );
            }
        }
    }

    session.place_ignition(ignition)?;
    let fuel = session.start_simulation(&mut rng)?.fuel();
    println!(
        "Ignition at ({:.4}, {:.4}) in {} ({}, {} m/min)",
        ignition.lat(),
        ignition.lon(),
        fuel,
        fuel.description(),
        fuel.growth_rate()
    );

    let expected_ticks = (sim_settings.max_minutes / sim_settings.tick_minutes).ceil() as u64;
    let progress = create_progress_bar(expected_ticks);
    let start = Instant::now();
    while session.simulation().is_some_and(FireSimulation::is_running) {
        let tick = session.tick(&mut rng)?;
        progress.inc(1);
        progress.set_message(format!(
            "{:>4.0} min  {:>7.2} ha  {}",
            tick.elapsed_minutes,
            tick.burned_hectares,
            tick.intensity.label()
        ));
        if verbose {
            progress.println(format!(
                "  t={:.0}min spread={:.0}m +{} spots +{} cells",
                tick.elapsed_minutes, tick.spread_m, tick.new_spots, tick.new_cells
            ));
        }
    }
    progress.finish_with_message(format!(
        "Simulation complete [{:.1}s]",
        start.elapsed().as_secs_f32()
    ));

    let summary = SessionSummary::from_session(&session);
    if let Some(ref sim) = summary.simulation {
        println!();
        println!("Time elapsed:  {:.0} minutes", sim.elapsed_minutes);
        println!("Area burned:   {:.2} hectares", sim.burned_hectares);
        println!("Fire intensity: {}", sim.intensity.label());
        println!("Spots: {}, burned cells: {}", sim.spots, sim.cells);
        if !summary.cameras.is_empty() {
            if sim.detecting_cameras.is_empty() {
                println!("No camera covers the ignition point");
            } else {
                println!("Detected by camera(s): {}", sim.detecting_cameras.join(", "));
            }
        }
    }

    write_json(&output, &session_to_geojson(&session)).context("Failed to write GeoJSON")?;
    if let Some(ref path) = args.summary {
        write_json(path, &summary).context("Failed to write summary")?;
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output.display());
    if let Some(ref path) = args.summary {
        println!("Summary: {}", path.display());
    }

    Ok(())
}

fn print_legend() {
    println!("Land Cover Types and Fire Risk");
    println!("==============================");
    println!();
    println!(
        "{:>4}  {:<10} {:<8} {:>6} {:>10}  Description",
        "Code", "Name", "Color", "Burn", "Growth"
    );
    for model in FuelModel::legend() {
        println!(
            "{:>4}  {:<10} {:<8} {:>6.2} {:>6.1} m/m  {}",
            model.code(),
            model.name(),
            model.color(),
            model.burn_rate(),
            model.growth_rate(),
            model.description()
        );
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.red} [{bar:30.red/yellow}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=> "),
    );
    pb
}
