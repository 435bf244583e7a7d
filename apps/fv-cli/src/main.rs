use clap::{Parser, Subcommand};
use fv_app::{AppError, AppResult, ViewerSession, catalog_report, compile_session, list_runs};
use fv_config::ViewerConfig;
use fv_core::RunId;
use fv_map::{BaseMapStyle, Bbox};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fv-cli")]
#[command(about = "FloodView CLI - select flood simulation runs for the WMS overlay", long_about = None)]
struct Cli {
    /// Viewer config YAML (defaults to the built-in configuration)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the runs in the catalog
    Runs,
    /// Report catalog shape and any amount/duration pairs without a run
    Check,
    /// Select a run directly and show the resulting selection
    Select {
        /// Run ID (e.g. 655)
        run_id: u32,
    },
    /// Move the amount/duration controls and look up the matching run
    Find {
        /// Index into the amount axis
        amount_index: usize,
        /// Index into the duration axis
        duration_index: usize,
    },
    /// Print the overlay GetMap URL for a bounding box
    Url {
        /// Bounding box in the layer CRS: minx,miny,maxx,maxy
        #[arg(long)]
        bbox: Bbox,
        /// Run to show (defaults to the catalog's first run)
        #[arg(long)]
        run_id: Option<u32>,
        /// Image width in pixels
        #[arg(long, default_value_t = 256)]
        width: u32,
        /// Image height in pixels
        #[arg(long, default_value_t = 256)]
        height: u32,
    },
    /// Print a base map tile URL
    Tile {
        z: u8,
        x: u32,
        y: u32,
        /// Base map style (defaults to the configured one)
        #[arg(long)]
        base_map: Option<BaseMapStyle>,
    },
    /// List the available base map styles
    BaseMaps,
    /// Write the default viewer config to a file
    InitConfig {
        /// Output YAML path
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> AppResult<()> {
    // Logs go to stderr so --json output stays parseable.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let json = cli.json;

    match cli.command {
        Commands::Runs => cmd_runs(&open_session(cli.config.as_deref())?, json),
        Commands::Check => cmd_check(&open_session(cli.config.as_deref())?, json),
        Commands::Select { run_id } => {
            cmd_select(&mut open_session(cli.config.as_deref())?, run_id, json)
        }
        Commands::Find {
            amount_index,
            duration_index,
        } => cmd_find(
            &mut open_session(cli.config.as_deref())?,
            amount_index,
            duration_index,
            json,
        ),
        Commands::Url {
            bbox,
            run_id,
            width,
            height,
        } => cmd_url(
            &mut open_session(cli.config.as_deref())?,
            &bbox,
            run_id,
            width,
            height,
        ),
        Commands::Tile { z, x, y, base_map } => {
            cmd_tile(&open_session(cli.config.as_deref())?, z, x, y, base_map)
        }
        Commands::BaseMaps => cmd_base_maps(json),
        Commands::InitConfig { path, force } => cmd_init_config(&path, force),
    }
}

fn open_session(config_path: Option<&Path>) -> AppResult<ViewerSession> {
    match config_path {
        Some(path) => fv_app::load_session(path),
        None => compile_session(&ViewerConfig::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::InvalidInput(format!("Cannot encode output: {}", e)))?;
    println!("{}", text);
    Ok(())
}

fn cmd_runs(session: &ViewerSession, json: bool) -> AppResult<()> {
    let selector = session.selector();
    let runs = list_runs(selector.catalog(), selector.layer_prefix());
    if json {
        return print_json(&runs);
    }

    println!("Runs in catalog ({}):", runs.len());
    for run in runs {
        println!(
            "  {:>5}  amount={:>4} mm  duration={:>4} min  layer={}",
            run.id, run.amount, run.duration, run.layer
        );
    }
    Ok(())
}

fn cmd_check(session: &ViewerSession, json: bool) -> AppResult<()> {
    let report = catalog_report(session.selector().catalog());
    if json {
        return print_json(&report);
    }

    println!(
        "{} runs over {} amounts x {} durations (ids {}..={})",
        report.run_count,
        report.amount_count,
        report.duration_count,
        report.id_range.0,
        report.id_range.1
    );
    if report.is_total() {
        println!("✓ Every amount/duration pair has a run");
    } else {
        println!("✗ {} pair(s) have no run:", report.missing.len());
        for (amount, duration) in &report.missing {
            println!("  amount={} mm  duration={} min", amount, duration);
        }
    }
    Ok(())
}

fn cmd_select(session: &mut ViewerSession, run_id: u32, json: bool) -> AppResult<()> {
    session.selector_mut().select_run(RunId::new(run_id))?;
    print_selection(session, json)
}

fn cmd_find(
    session: &mut ViewerSession,
    amount_index: usize,
    duration_index: usize,
    json: bool,
) -> AppResult<()> {
    let matched = find_at(session, amount_index, duration_index)?;
    if !json && !matched {
        println!("No run for the selected amount/duration; selection unchanged");
    }
    print_selection(session, json)
}

/// Move both controls and run the lookup. Returns `false` when no run
/// matched; a match always redraws the overlay, so the revision tells.
fn find_at(
    session: &mut ViewerSession,
    amount_index: usize,
    duration_index: usize,
) -> AppResult<bool> {
    let selector = session.selector_mut();
    let revision = selector.overlay().borrow().revision();
    selector.set_indices(amount_index, duration_index)?;
    selector.find_run();

    let matched = selector.overlay().borrow().revision() != revision;
    if !matched {
        tracing::debug!(
            amount_index,
            duration_index,
            "lookup left the selection unchanged"
        );
    }
    Ok(matched)
}

fn print_selection(session: &ViewerSession, json: bool) -> AppResult<()> {
    let state = session.selector().snapshot();
    if json {
        return print_json(&state);
    }

    println!("Selected run: {}", state.run.id);
    println!("  amount   = {} mm (index {})", state.amount, state.amount_index);
    println!(
        "  duration = {} min (index {})",
        state.duration, state.duration_index
    );
    println!("  overlay layers = {}", session.map().wms_layer().borrow().layers());
    Ok(())
}

fn cmd_url(
    session: &mut ViewerSession,
    bbox: &Bbox,
    run_id: Option<u32>,
    width: u32,
    height: u32,
) -> AppResult<()> {
    if let Some(id) = run_id {
        session.selector_mut().select_run(RunId::new(id))?;
    }
    println!("{}", session.overlay_url(bbox, width, height)?);
    Ok(())
}

fn cmd_tile(
    session: &ViewerSession,
    z: u8,
    x: u32,
    y: u32,
    base_map: Option<BaseMapStyle>,
) -> AppResult<()> {
    if let Some(style) = base_map {
        session.map().set_base_map(style);
    }
    let map = session.map().map();
    let view = map.borrow();
    let base = view
        .base_layer()
        .ok_or_else(|| AppError::InvalidInput("Map has no base layer".to_string()))?;
    if z > base.max_zoom {
        return Err(AppError::InvalidInput(format!(
            "Zoom {} exceeds the base map's max zoom {}",
            z, base.max_zoom
        )));
    }
    println!("{}", base.tile_url(z, x, y));
    Ok(())
}

fn cmd_base_maps(json: bool) -> AppResult<()> {
    if json {
        return print_json(&BaseMapStyle::ALL);
    }
    for style in BaseMapStyle::ALL {
        println!(
            "  {:<18} {} (max zoom {})",
            style.name(),
            style.label(),
            style.tile_layer().max_zoom
        );
    }
    Ok(())
}

fn cmd_init_config(path: &Path, force: bool) -> AppResult<()> {
    if path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    fv_config::save_yaml(path, &ViewerConfig::default())?;
    tracing::info!(path = %path.display(), "wrote default config");
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}
