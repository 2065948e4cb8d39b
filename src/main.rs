mod app;
mod config;
mod event;
mod material;

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use galaxy_camera::CameraMode;
use galaxy_gen::GalaxyGenParams;
use galaxy_geom::{Ray, Vec3};
use galaxy_io::{
    DiscoveryConfig, GalaxyPayload, GalaxySource, probe_free_port, write_discovery, write_payload,
};
use galaxy_sim::{GalaxyScene, pick_star};

use crate::app::App;
use crate::config::SimParams;
use crate::material::{HeadlessBackend, MaterialTier};

#[derive(Parser, Debug)]
#[command(name = "galaxy", version, about = "Procedural spiral galaxy engine")]
struct Cli {
    /// Also write debug-level logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Simulation config (gravity, time scale, camera, picker).
    #[arg(long, global = true, default_value = "assets/sim.toml")]
    config: PathBuf,
    /// Generation config (particle counts, populations, black holes).
    #[arg(long, global = true, default_value = "assets/galaxy.toml")]
    gen_config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct SourceArgs {
    /// Seed string to generate from.
    #[arg(long, default_value = "galaxy-42")]
    seed: String,
    /// Load an exported galaxy payload instead of generating.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Override the particle count.
    #[arg(long)]
    particles: Option<u32>,
}

impl SourceArgs {
    fn source(&self) -> GalaxySource {
        match &self.file {
            Some(path) => GalaxySource::file(path),
            None => GalaxySource::seed(self.seed.clone()),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the galaxy API payload as JSON.
    Generate {
        #[command(flatten)]
        source: SourceArgs,
        /// Output file; stdout when omitted.
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Run the frame loop headless.
    Simulate {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, default_value_t = 600)]
        frames: u32,
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Fly to a well-placed random star and follow it.
        #[arg(long)]
        track_random: bool,
        /// Force black-hole gravity on.
        #[arg(long)]
        gravity: bool,
        /// Start the camera in manual mode.
        #[arg(long)]
        manual: bool,
        /// Run in real time and reload the sim config when it changes.
        #[arg(long)]
        watch: bool,
        /// Star material tiers the headless backend supports.
        #[arg(long, default_value = "full,compat,flat")]
        tiers: String,
    },
    /// Cast a ray at time `t` and report the star it selects.
    Pick {
        #[command(flatten)]
        source: SourceArgs,
        /// Simulated seconds.
        #[arg(long, default_value_t = 0.0)]
        t: f64,
        /// Ray origin as x,y,z.
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        origin: Vec3,
        /// A point the ray passes through, as x,y,z.
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true, default_value = "0,0,0")]
        toward: Vec3,
        #[arg(long)]
        gravity: bool,
    },
    /// Find a free port and write the client discovery file.
    Discover {
        #[arg(long, default_value_t = 3000)]
        base_port: u16,
        #[arg(long, default_value_t = 50)]
        attempts: u16,
        #[arg(long, default_value = "config.json")]
        out: PathBuf,
    },
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got {:?}", s));
    }
    let mut v = [0.0f64; 3];
    for (slot, part) in v.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|e| format!("bad component {:?}: {}", part, e))?;
    }
    Ok(Vec3::new(v[0], v[1], v[2]))
}

fn parse_tiers(s: &str) -> Result<Vec<MaterialTier>, String> {
    s.split(',')
        .filter(|t| !t.trim().is_empty())
        .map(|t| MaterialTier::parse(t).ok_or_else(|| format!("unknown material tier {:?}", t)))
        .collect()
}

fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match log_file {
        Some(path) => {
            use simplelog::{
                ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode,
                WriteLogger,
            };
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Info,
                    Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Debug, Config::default(), File::create(path)?),
            ])?;
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
        }
    }
    Ok(())
}

fn load_sim_params(path: &Path) -> Result<SimParams, Box<dyn Error>> {
    if path.exists() {
        let params = config::load_params_from_path(path)?;
        log::info!("sim config loaded from {}", path.display());
        Ok(params)
    } else {
        log::info!("{} not found; using default sim config", path.display());
        Ok(SimParams::default())
    }
}

fn load_gen_params(path: &Path, particles: Option<u32>) -> Result<GalaxyGenParams, Box<dyn Error>> {
    let params = if path.exists() {
        let params = galaxy_gen::load_params_from_path(path)?;
        log::info!("generation config loaded from {}", path.display());
        params
    } else {
        log::debug!("{} not found; using default generation config", path.display());
        GalaxyGenParams::default()
    };
    Ok(match particles {
        Some(n) => params.with_particle_count(n),
        None => params,
    })
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Generate { source, out } => {
            let gen_params = load_gen_params(&cli.gen_config, source.particles)?;
            let galaxy = source.source().load(&gen_params)?;
            let payload = GalaxyPayload::from_galaxy(&galaxy);
            match out {
                Some(path) => {
                    write_payload(&path, &payload)?;
                    log::info!(
                        "wrote {} particles, {} black holes to {}",
                        payload.particles.len(),
                        payload.black_holes.len(),
                        path.display()
                    );
                }
                None => println!("{}", payload.to_json()?),
            }
        }
        Command::Simulate {
            source,
            frames,
            fps,
            track_random,
            gravity,
            manual,
            watch,
            tiers,
        } => {
            if !(fps.is_finite() && fps > 0.0) {
                return Err(format!("fps must be positive, got {}", fps).into());
            }
            let mut params = load_sim_params(&cli.config)?;
            if gravity {
                params.gravity.enabled = true;
            }
            let gen_params = load_gen_params(&cli.gen_config, source.particles)?;
            let mut backend = HeadlessBackend::new(parse_tiers(&tiers)?);
            let mut app = App::new(params, gen_params, &mut backend);
            if watch {
                app.watch_config(cli.config.clone());
            }
            let source = source.source();
            if !app.load(&source) {
                return Err(format!("could not load galaxy from {}", source.describe()).into());
            }
            if manual {
                app.set_camera_mode(CameraMode::Manual);
            }
            if track_random && app.track_random_star().is_none() {
                log::warn!("no star to track");
            }

            let dt = 1.0 / fps;
            let started = Instant::now();
            for frame in 0..frames {
                app.step(dt);
                if frame % (fps.round().max(1.0) as u32) == 0 {
                    if let Some(pose) = app.camera.pose() {
                        log::debug!(
                            "frame {} t={:.2}s camera=({:.1}, {:.1}, {:.1}) {:?}",
                            frame,
                            app.sim.elapsed(),
                            pose.position.x,
                            pose.position.y,
                            pose.position.z,
                            app.camera.state()
                        );
                    }
                }
                if watch {
                    std::thread::sleep(Duration::from_secs_f64(dt));
                }
            }

            let stats = &app.debug_stats;
            println!(
                "{} frames in {:.2?}; simulated {:.2}s",
                stats.frames,
                started.elapsed(),
                app.sim.elapsed()
            );
            println!("material: {} ({})", app.material.tier.as_str(), app.material.label);
            if let Some(pose) = app.camera.pose() {
                println!(
                    "camera: ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2}), pattern {}",
                    pose.position.x,
                    pose.position.y,
                    pose.position.z,
                    pose.target.x,
                    pose.target.y,
                    pose.target.z,
                    app.camera.pattern().name()
                );
            }
            if let Some(index) = app.sim.tracked() {
                println!("tracking star {}", index);
            }
            println!(
                "events: {} processed, {} still queued",
                stats.events_processed, stats.queued_events
            );
            for (label, n) in &stats.events_by {
                println!("  {:<28} {}", label, n);
            }
            if let Some(status) = app.status() {
                println!("status: {}", status);
            }
        }
        Command::Pick {
            source,
            t,
            origin,
            toward,
            gravity,
        } => {
            let params = load_sim_params(&cli.config)?;
            let gen_params = load_gen_params(&cli.gen_config, source.particles)?;
            let scene = GalaxyScene::new(source.source().load(&gen_params)?);
            let mut settings = params.gravity;
            settings.enabled |= gravity;
            let ctx = scene.context(settings);
            let ray = Ray::towards(origin, toward).ok_or("origin and toward must differ")?;
            match pick_star(&scene, &ctx, t, &ray, &params.pick) {
                Some(hit) => println!(
                    "star {} ({:?}) at ({:.3}, {:.3}, {:.3}); {:.2} from camera, {:.2} off ray",
                    hit.index,
                    hit.kind,
                    hit.position.x,
                    hit.position.y,
                    hit.position.z,
                    hit.camera_distance,
                    hit.ray_distance
                ),
                None => println!("no star along that ray"),
            }
        }
        Command::Discover {
            base_port,
            attempts,
            out,
        } => {
            let port = probe_free_port(base_port, attempts)?;
            let cfg = DiscoveryConfig::for_port(port);
            write_discovery(&out, &cfg)?;
            println!("{} -> {}", out.display(), cfg.api_base_url);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("logging setup failed: {}", e);
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
