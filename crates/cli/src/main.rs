mod provenance;
mod track;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use geofence::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "AFC geofence: build authorized areas and classify device fixes")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Classify points against an area built around a true location
    Check {
        #[command(flatten)]
        area: AreaArgs,
        /// Observed fix as LAT,LON (repeatable)
        #[arg(
            long = "point",
            value_parser = parse_point,
            required = true,
            allow_hyphen_values = true
        )]
        points: Vec<(f64, f64)>,
    },
    /// Print the AFC request `location` object for an area
    Request {
        #[command(flatten)]
        area: AreaArgs,
    },
    /// Replay a CSV track (latitude,longitude columns) against an area
    Track {
        #[command(flatten)]
        area: AreaArgs,
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

/// True location plus shape overrides shared by all subcommands.
#[derive(Args, Clone, Debug)]
struct AreaArgs {
    /// True latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    /// True longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
    /// Altitude above mean sea level, meters
    #[arg(long, allow_negative_numbers = true)]
    altitude: Option<f64>,
    /// Vertical accuracy, meters
    #[arg(long)]
    vertical_accuracy: Option<f64>,
    /// JSON file with ellipse defaults (EllipseCfg fields)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    semi_minor: Option<f64>,
    #[arg(long)]
    semi_major: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    orientation: Option<f64>,
    #[arg(long)]
    leeway: Option<f64>,
    /// Seed for the center jitter RNG (random if omitted)
    #[arg(long, conflicts_with = "draw")]
    seed: Option<u64>,
    /// Fixed jitter draw in [0,1) used for both axes
    #[arg(long)]
    draw: Option<f64>,
}

impl AreaArgs {
    fn cfg(&self) -> Result<EllipseCfg> {
        let mut cfg = match &self.config {
            Some(path) => load_cfg(path)?,
            None => EllipseCfg::default(),
        };
        if let Some(v) = self.semi_minor {
            cfg.semi_minor_axis_meters = v;
        }
        if let Some(v) = self.semi_major {
            cfg.semi_major_axis_meters = v;
        }
        if let Some(v) = self.orientation {
            cfg.orientation_degrees = v;
        }
        if let Some(v) = self.leeway {
            cfg.center_leeway_degrees = v;
        }
        Ok(cfg)
    }

    fn location(&self) -> Result<DeviceLocation> {
        let point = GeoPoint::new(self.lat, self.lon).context("true location")?;
        Ok(DeviceLocation {
            point,
            altitude_meters: self.altitude,
            vertical_accuracy_meters: self.vertical_accuracy,
        })
    }

    /// Build the area and describe how its center was jittered.
    fn build(&self) -> Result<(AuthorizedArea, Value)> {
        let cfg = self.cfg()?;
        let location = self.location()?;
        let (area, jitter) = match (self.draw, self.seed) {
            (Some(draw), _) => {
                let mut draws = FixedDraws::constant(draw)
                    .ok_or_else(|| anyhow!("--draw must lie in [0, 1), got {draw}"))?;
                (
                    create_area_with(&cfg, &location, &mut draws)?,
                    json!({ "draws": [draw, draw] }),
                )
            }
            (None, seed) => {
                let seed = seed.unwrap_or_else(rand::random);
                let mut rng = StdRng::seed_from_u64(seed);
                (
                    create_area_with(&cfg, &location, &mut rng)?,
                    json!({ "seed": seed }),
                )
            }
        };
        tracing::info!(lat = self.lat, lon = self.lon, cfg = ?cfg, jitter = %jitter, "area");
        Ok((area, jitter))
    }
}

fn load_cfg(path: &Path) -> Result<EllipseCfg> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn parse_point(s: &str) -> std::result::Result<(f64, f64), String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got `{s}`"))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("latitude: {e}"))?;
    let lon = lon.trim().parse::<f64>().map_err(|e| format!("longitude: {e}"))?;
    Ok((lat, lon))
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let doc = run(cmd.action)?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

/// Execute one subcommand and return the JSON document it reports.
fn run(action: Action) -> Result<Value> {
    match action {
        Action::Check { area, points } => check(area, points),
        Action::Request { area } => request(area),
        Action::Track { area, input, out } => track_cmd(area, input, out),
    }
}

fn check(args: AreaArgs, points: Vec<(f64, f64)>) -> Result<Value> {
    let (area, jitter) = args.build()?;
    let mut results = Vec::with_capacity(points.len());
    for (lat, lon) in points {
        let point = GeoPoint::new(lat, lon).with_context(|| format!("point {lat},{lon}"))?;
        let result = check_location(&area, point);
        tracing::info!(lat, lon, result = result.as_str(), "check");
        results.push(json!({ "latitude": lat, "longitude": lon, "result": result }));
    }
    Ok(json!({
        "location": area.to_request_json()?,
        "jitter": jitter,
        "results": results,
    }))
}

fn request(args: AreaArgs) -> Result<Value> {
    let (area, _) = args.build()?;
    Ok(area.to_request_json()?)
}

fn track_cmd(args: AreaArgs, input: PathBuf, out: PathBuf) -> Result<Value> {
    tracing::info!(input = %input.display(), out = %out.display(), "track");
    let (area, jitter) = args.build()?;
    let (mut df, summary) = track::classify_track(&area, &input)?;
    track::write_csv(&mut df, &out)?;
    let sidecar = provenance::Sidecar::new(area.to_request_json()?, jitter).with_params(json!({
        "input": input.to_string_lossy(),
        "summary": summary,
    }));
    provenance::write_sidecar(&out, sidecar)?;
    Ok(serde_json::to_value(&summary)?)
}
