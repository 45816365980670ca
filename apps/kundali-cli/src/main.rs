use anyhow::Context;
use chrono::{TimeZone, Utc};
use clap::{Parser, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;

use kundali::vedic::dms::degrees_to_dms;
use kundali::vedic::{active_periods_at, AyanamsaModel, BodyPosition, DashaLevel, HarmonicChart};
use kundali::{parse_utc_offset, BirthDetails, ChartService, KundaliEngine, KundaliResult, WindowedRateLimiter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Full chart as pretty-printed JSON.
    Json,
    /// Human-readable tables.
    Table,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a sidereal birth chart")]
struct Args {
    /// Local birth date, YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// Local birth time, HH:mm or HH:mm:ss.
    #[arg(long)]
    time: String,

    /// Birthplace latitude, degrees north.
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Birthplace longitude, degrees east.
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Local time minus UTC, in hours (e.g. 5.5).
    #[arg(long, allow_hyphen_values = true, conflicts_with = "utc_offset")]
    tz: Option<f64>,

    /// UTC offset label such as +05:30, GMT-5 or UTC+5:45.
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<String>,

    /// Config file (default: configs/kundali.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured ayanamsa model.
    #[arg(long)]
    ayanamsa: Option<String>,

    /// Override the configured dasha depth.
    #[arg(long, value_enum)]
    depth: Option<DepthArg>,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Also print the dasha periods running on this date (YYYY-MM-DD).
    #[arg(long)]
    era_at: Option<String>,

    /// Debug logging (RUST_LOG still takes precedence).
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DepthArg {
    Mahadasha,
    Antardasha,
    Pratyantardasha,
}

impl From<DepthArg> for DashaLevel {
    fn from(arg: DepthArg) -> Self {
        match arg {
            DepthArg::Mahadasha => DashaLevel::Mahadasha,
            DepthArg::Antardasha => DashaLevel::Antardasha,
            DepthArg::Pratyantardasha => DashaLevel::Pratyantardasha,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut config = kundali_config::load_config(args.config.as_deref())?;
    match &config.source {
        Some(path) => log::info!("Loaded config from {}", path.display()),
        None => log::info!("No config file found; using defaults"),
    }
    if let Some(name) = &args.ayanamsa {
        config.engine.ayanamsa = name.parse::<AyanamsaModel>()?;
    }
    if let Some(depth) = args.depth {
        config.engine.dasha_depth = depth.into();
    }

    let tz = match (&args.tz, &args.utc_offset) {
        (Some(hours), _) => *hours,
        (None, Some(label)) => parse_utc_offset(label)?,
        (None, None) => anyhow::bail!("one of --tz or --utc-offset is required"),
    };
    let details = BirthDetails::new(&args.date, &args.time, args.lat, args.lon, tz);

    let engine = KundaliEngine::from_config(&config.ephemeris, config.engine.clone())?;
    let service = ChartService::new(engine, WindowedRateLimiter::from_config(&config.rate_limit));
    let result = service
        .request_chart("cli", &details)
        .with_context(|| format!("Failed to compute chart for {} {}", args.date, args.time))?;

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Table => print!("{}", render_table(&result)),
    }

    if let Some(date) = &args.era_at {
        let day = kundali::input::parse_date(date)?;
        let midnight = day.and_hms_opt(0, 0, 0).context("invalid --era-at date")?;
        let instant = Utc.from_utc_datetime(&midnight);
        print!("{}", render_active_periods(&result, instant));
    }

    Ok(())
}

fn format_position(lon: f64) -> String {
    degrees_to_dms(lon.rem_euclid(30.0)).to_string()
}

fn render_bodies(out: &mut String, ascendant: &BodyPosition, bodies: &[BodyPosition]) {
    let _ = writeln!(
        out,
        "{:<10} {:<12} {:>10} {:<16} {:>4} {:>5} {:>9}",
        "Body", "Sign", "Position", "Nakshatra", "Pada", "House", "Speed"
    );
    for body in std::iter::once(ascendant).chain(bodies.iter()) {
        let _ = writeln!(
            out,
            "{:<10} {:<12} {:>10} {:<16} {:>4} {:>5} {:>8.4}{}",
            body.name.display_name(),
            body.sign.name(),
            format_position(body.sidereal_longitude),
            body.nakshatra_name,
            body.pada_index,
            body.house_number,
            body.daily_speed,
            if body.is_retrograde { "R" } else { " " }
        );
    }
}

fn render_harmonic(out: &mut String, chart: &HarmonicChart) {
    let _ = writeln!(out, "\n{} ({}, D{})", chart.label, chart.varga_id, chart.division);
    render_bodies(out, &chart.ascendant, &chart.bodies);
}

fn render_table(result: &KundaliResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Birth {} {} (UTC {}), lat {:.4}, lon {:.4}",
        result.birth_details.date_string,
        result.birth_details.time_string,
        result.utc_instant.format("%Y-%m-%d %H:%M:%S"),
        result.birth_details.latitude,
        result.birth_details.longitude
    );
    let _ = writeln!(
        out,
        "Ayanamsa {} {} | ephemeris {}\n",
        result.ayanamsa_model_name,
        degrees_to_dms(result.ayanamsa_value),
        result.ephemeris
    );

    render_bodies(&mut out, &result.ascendant, &result.bodies);

    if !result.missing_bodies.is_empty() {
        let _ = writeln!(out, "\nMissing:");
        for missing in &result.missing_bodies {
            let _ = writeln!(out, "  {:<10} {}", missing.body.display_name(), missing.reason);
        }
    }

    let _ = writeln!(out, "\nHouses:");
    for (number, house) in &result.houses {
        let occupants: Vec<&str> = house.occupying_bodies.iter().map(|b| b.display_name()).collect();
        let _ = writeln!(
            out,
            "  {:>2} {:<12} ({:<8}) {}",
            number,
            house.sign_occupying.name(),
            house.sign_ruling_body.display_name(),
            occupants.join(", ")
        );
    }

    render_harmonic(&mut out, &result.harmonic_charts.ninth_harmonic);

    let _ = writeln!(out, "\nVimshottari dasha:");
    if result.dasha_timeline.eras.is_empty() {
        let _ = writeln!(out, "  (unavailable: Moon position missing)");
    }
    for era in &result.dasha_timeline.eras {
        let _ = writeln!(
            out,
            "  {:<8} {} -> {} ({:.2} y)",
            era.ruling_body.display_name(),
            era.start.format("%Y-%m-%d"),
            era.end.format("%Y-%m-%d"),
            era.duration_years
        );
    }
    out
}

fn render_active_periods(result: &KundaliResult, instant: chrono::DateTime<Utc>) -> String {
    let mut out = String::new();
    let chain = active_periods_at(&result.dasha_timeline, instant);
    let _ = writeln!(out, "\nRunning on {}:", instant.format("%Y-%m-%d"));
    if chain.is_empty() {
        let _ = writeln!(out, "  (outside the computed timeline)");
    }
    for period in chain {
        let _ = writeln!(
            out,
            "  {:<16} {:<8} {} -> {}",
            format!("{:?}", period.level).to_lowercase(),
            period.ruling_body.display_name(),
            period.start.format("%Y-%m-%d"),
            period.end.format("%Y-%m-%d")
        );
    }
    out
}
