// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hazard-Scan CLI
//!
//! Runs one hazard scan around an airport or a coordinate, prints the
//! dashboard and the highest-risk features, and saves the backend's KML and
//! CSV exports.

use clap::Parser;
use hazard_scan::{
    config::Config,
    models::{Category, RequestMode, ScanForm},
    services::{views::format_thousands, HazardClient, ViewSet},
    ReportSession, ScanOutcome,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Scan for wildlife hazards (water, vegetation, waste) around an airport
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// ICAO airport code (e.g. EGLL)
    #[arg(long, required_unless_present = "lat", conflicts_with = "lat")]
    icao: Option<String>,

    /// Center latitude (coordinate mode)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<String>,

    /// Center longitude (coordinate mode)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<String>,

    /// Scan radius in km (default: HAZARD_DEFAULT_RADIUS_KM)
    #[arg(long)]
    radius: Option<String>,

    /// Minimum feature area in m² (default: HAZARD_DEFAULT_MIN_AREA_SQ_M)
    #[arg(long)]
    min_area: Option<String>,

    /// Hide a category: water, veg, waste or other (repeatable)
    #[arg(long = "hide", value_name = "CATEGORY")]
    hide: Vec<Category>,

    /// Number of ranked hazards to print
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Directory for KML/CSV exports (default: HAZARD_EXPORT_DIR)
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Skip writing exports
    #[arg(long)]
    no_export: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Args::parse();
    let config = Config::from_env()?;

    let form = ScanForm {
        mode: if args.icao.is_some() {
            RequestMode::Icao
        } else {
            RequestMode::Coords
        },
        icao: args.icao.unwrap_or_default(),
        lat: args.lat.unwrap_or_default(),
        lon: args.lon.unwrap_or_default(),
        radius_km: args.radius.unwrap_or_default(),
        min_area_sq_m: args.min_area.unwrap_or_default(),
    };
    let request = form.into_request(&config)?;

    let client = HazardClient::from_config(&config)?;
    let mut session = ReportSession::new();

    println!(
        "Scanning {} (radius {} km)... (This takes ~45s)",
        request.location_token(),
        request.radius_km
    );

    let outcome = session
        .start_scan(&client, request)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let mut views = match outcome {
        ScanOutcome::Applied {
            feature_count,
            skipped,
            views,
        } => {
            println!("Success! Found {} features.", feature_count);
            if skipped > 0 {
                println!(
                    "({} features had unusable geometry and were placed at the center)",
                    skipped
                );
            }
            views
        }
        ScanOutcome::Stale => anyhow::bail!("Scan response was superseded"),
    };

    for category in args.hide {
        if session.filter().is_active(category) {
            views = session.toggle_category(category)?;
        }
    }

    print_dashboard(&views);
    print_ranked(&views, args.top);

    if !args.no_export {
        let dir = args.export_dir.unwrap_or(config.export_dir);
        for export in [session.export_kml()?, session.export_csv()?] {
            let path = export.write_to(&dir)?;
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}

fn print_dashboard(views: &ViewSet) {
    let stats = &views.stats;

    println!();
    println!(
        "Active features: {}   Total area: {} m²",
        stats.total_count,
        format_thousands(stats.total_area_sq_m)
    );
    for (category, count) in stats.by_category.iter() {
        println!(
            "  {:<12} {:>5}   {:>14} m²",
            category.label(),
            count,
            format_thousands(*stats.area_by_category.get(category))
        );
    }
    println!(
        "Risk: High {} | Medium {} | Low {}",
        stats.by_risk_bucket.high, stats.by_risk_bucket.medium, stats.by_risk_bucket.low
    );
}

fn print_ranked(views: &ViewSet, top: usize) {
    if views.ranked.is_empty() || top == 0 {
        return;
    }

    println!();
    println!("Top hazards:");
    for entry in views.ranked.iter().take(top) {
        println!(
            "  {:>3}. [{:?} {:>2}] {:<12} {:>8.2} km  {:>12} m²  {}",
            entry.rank,
            entry.risk_bucket,
            entry.risk_score,
            entry.category.label(),
            entry.distance_km,
            format_thousands(entry.area_sq_m),
            entry.name.as_deref().unwrap_or("")
        );
    }
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hazard_scan=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .with(format)
        .init();
}
