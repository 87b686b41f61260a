use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use rocket_winds::drift::{descent_bands, project_descent, DescentProfile, LaunchSimulation};
use rocket_winds::io::{self, DriftSummary, ExportConfig};
use rocket_winds::launch::LaunchTimeWindow;
use rocket_winds::profile::{fuse_hours, Forecast};
use rocket_winds::{GeoLocation, Result};

#[derive(Parser)]
#[command(name = "rocket-winds")]
#[command(about = "Fuse forecast winds into a launch-site profile and predict descent drift")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write fused wind profiles as delimited text
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Export settings as JSON (missing keys use defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for one file per hour; stdout when omitted
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Predict the landing point of a descent from apogee
    Drift {
        #[command(flatten)]
        source: SourceArgs,

        /// Launch site latitude, deg
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Launch site longitude, deg
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Apogee, ft above ground
        #[arg(long)]
        apogee: f64,

        /// Descent rate under drogue (or the only chute), ft/s
        #[arg(long)]
        drogue_rate: f64,

        /// Descent rate under main, ft/s (defaults to the drogue rate)
        #[arg(long)]
        main_rate: Option<f64>,

        /// Main deployment altitude, ft above ground
        #[arg(long, default_value_t = 0.0)]
        main_deploy: f64,

        /// Print JSON instead of the text report
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Forecast JSON already downloaded from the provider
    #[arg(long)]
    forecast: PathBuf,

    /// Model name recorded on the profile
    #[arg(long, default_value = "open-meteo")]
    model: String,

    /// Forecast hour offset (ignored when --date is given)
    #[arg(long, default_value_t = 0)]
    hour: usize,

    /// Launch date, YYYY-MM-DD
    #[arg(long, requires = "start")]
    date: Option<String>,

    /// Window start hour (HH or HH:MM)
    #[arg(long)]
    start: Option<String>,

    /// Window end hour (defaults to the start hour)
    #[arg(long)]
    end: Option<String>,
}

impl SourceArgs {
    fn load(&self) -> Result<(Forecast, Vec<usize>)> {
        let text = std::fs::read_to_string(&self.forecast)?;
        let forecast = Forecast::from_json(&text, self.model.clone())?;

        let (Some(date), Some(start)) = (&self.date, &self.start) else {
            return Ok((forecast, vec![self.hour]));
        };
        let end = self.end.as_deref().unwrap_or(start.as_str());
        let window = LaunchTimeWindow::parse(date, start, end)?;
        if !window.within_forecast_range(chrono::Local::now().naive_local()) {
            warn!("launch window {date} {start}-{end} is outside the provider's forecast range");
        }

        let day = window.start().date();
        let hours = window
            .hours()
            .filter_map(|h| day.and_hms_opt(h, 0, 0))
            .filter_map(|t| {
                let index = forecast.hour_index(t);
                if index.is_none() {
                    warn!("{t} is not covered by the forecast");
                }
                index
            })
            .collect();
        Ok((forecast, hours))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Export { source, config, output_dir } => {
            run_export(&source, config, output_dir)
        }
        Commands::Drift {
            source,
            lat,
            lon,
            apogee,
            drogue_rate,
            main_rate,
            main_deploy,
            json,
        } => {
            let main_rate = main_rate.unwrap_or(drogue_rate);
            let descent = DescentProfile::dual(drogue_rate, main_rate, main_deploy);
            run_drift(&source, lat, lon, apogee, &descent, json)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

fn run_export(
    source: &SourceArgs,
    config: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let (forecast, hours) = source.load()?;
    let config = match config {
        Some(path) => ExportConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ExportConfig::default(),
    };

    for (hour, profile) in fuse_hours(&forecast, hours) {
        if profile.is_empty() {
            warn!("hour {hour}: no usable wind data");
            continue;
        }
        match &output_dir {
            Some(dir) => {
                let path = dir.join(format!("winds_{}_h{hour:03}.csv", forecast.model()));
                io::write_profile_file(&path.to_string_lossy(), &profile, &config)?;
                info!("hour {hour}: {} rows -> {}", profile.len(), path.display());
            }
            None => {
                let stdout = std::io::stdout();
                io::write_profile(&mut stdout.lock(), &profile, &config)?;
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// drift
// ---------------------------------------------------------------------------

fn run_drift(
    source: &SourceArgs,
    lat: f64,
    lon: f64,
    apogee: f64,
    descent: &DescentProfile,
    json: bool,
) -> Result<()> {
    let site = GeoLocation::new(lat, lon)?;
    let (forecast, hours) = source.load()?;

    let mut summaries = Vec::new();
    for (hour, profile) in fuse_hours(&forecast, hours) {
        if profile.is_empty() {
            warn!("hour {hour}: no usable wind data");
            continue;
        }
        let bands = descent_bands(&profile, apogee, descent);
        let outcome = project_descent(site, &bands);
        let sim = LaunchSimulation::from_descent(hour, &profile, site, &outcome);
        if let Some(summary) = DriftSummary::new(&sim, &outcome) {
            summaries.push((summary, forecast.time_label(hour).map(str::to_string)));
        }
    }

    if json {
        let plain: Vec<DriftSummary> = summaries.into_iter().map(|(s, _)| s).collect();
        return io::write_summaries(&mut std::io::stdout().lock(), &plain);
    }

    println!();
    println!("====================================================================");
    println!("  DESCENT DRIFT — {}", forecast.model());
    println!("====================================================================");
    println!(
        "  Site: {:.5}, {:.5}   elevation {:.0} ft   apogee {:.0} ft AGL",
        site.latitude(),
        site.longitude(),
        forecast.elevation_ft(),
        apogee
    );
    println!(
        "  Descent: {:.1} ft/s, {:.1} ft/s below {:.0} ft",
        descent.drogue_rate, descent.main_rate, descent.main_deploy_altitude
    );
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>16}  {:>7}  {:>9}  {:>10}  {:>10}  {:>6}",
        "time", "gnd kt", "drift m", "bearing", "landing lat", "lon"
    );
    for (s, label) in &summaries {
        println!(
            "  {:>16}  {:>7.1}  {:>9.0}  {:>9.0}°  {:>10.5}  {:>10.5}",
            label.clone().unwrap_or_else(|| format!("h+{}", s.hour)),
            s.ground_wind_speed_kt,
            s.drift_distance_m,
            s.drift_bearing_deg,
            s.landing.latitude(),
            s.landing.longitude(),
        );
    }
    println!("====================================================================");
    println!();
    Ok(())
}
