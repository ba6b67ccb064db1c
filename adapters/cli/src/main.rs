#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plans, checks and annotates garden beds.

mod layout_transfer;

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use garden_planner_catalog::Catalog;
use garden_planner_core::{
    Arrangement, CatalogOracle, CellCoord, GenerationRequest, Grid, LockedMask, PlantId,
    PlantSelection,
};
use garden_planner_system_analytics::{arrangement_stats, plant_counts};
use garden_planner_system_bridges::find_bridge_plants;
use garden_planner_system_placement::Planner;
use garden_planner_system_validation::validate_arrangement;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "garden_planner=info";
const VERBOSE_FILTER: &str = "garden_planner=debug";

#[derive(Debug, Parser)]
#[command(name = "garden-planner", version, about = "Companion-aware garden bed planner")]
struct Cli {
    /// TOML plant catalog to use instead of the built-in table.
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Emit per-unit placement decisions unless RUST_LOG overrides the filter.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Arrange plants in a bed and print the result.
    Generate(GenerateArgs),
    /// Report enemy adjacencies in a layout string.
    Validate {
        /// Layout string produced by `generate`.
        layout: String,
    },
    /// List plants that can separate two enemies.
    Bridges {
        /// First member of the incompatible pair.
        first: String,
        /// Second member of the incompatible pair.
        second: String,
        /// Candidate plant; repeat to build a pool. Defaults to the whole catalog.
        #[arg(long = "pool", value_name = "ID")]
        pool: Vec<String>,
    },
}

#[derive(Debug, clap::Args)]
struct GenerateArgs {
    /// JSON request document; replaces the bed options below.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["width", "height", "plants", "locks"])]
    request: Option<PathBuf>,

    /// Number of columns in the bed.
    #[arg(long, required_unless_present = "request")]
    width: Option<u32>,

    /// Number of rows in the bed.
    #[arg(long, required_unless_present = "request")]
    height: Option<u32>,

    /// Plant and area in squares, e.g. `tomato=2`. Repeatable.
    #[arg(
        long = "plant",
        value_name = "ID=QTY",
        value_parser = parse_selection,
        required_unless_present = "request"
    )]
    plants: Vec<PlantSelection>,

    /// Square that must stay untouched, e.g. `0,1`. Repeatable.
    #[arg(long = "lock", value_name = "COL,ROW", value_parser = parse_cell)]
    locks: Vec<CellCoord>,

    /// Treat quantities as minimums and fill the remaining squares.
    #[arg(long)]
    fill: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => Catalog::builtin(),
    };
    debug!(plants = catalog.len(), "catalog ready");

    match cli.command {
        Command::Generate(args) => generate(&catalog, args),
        Command::Validate { layout } => validate(&catalog, &layout),
        Command::Bridges {
            first,
            second,
            pool,
        } => bridges(&catalog, &first, &second, &pool),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate(catalog: &Catalog, args: GenerateArgs) -> Result<()> {
    let request = build_request(args)?;
    let arrangement = Planner::new()
        .generate_with_fill(catalog, &request)
        .context("could not arrange the requested plants")?;

    print_arrangement(catalog, &arrangement);
    let layout = layout_transfer::encode(&arrangement.grid).context("failed to encode layout")?;
    println!("layout: {layout}");
    Ok(())
}

fn build_request(args: GenerateArgs) -> Result<GenerationRequest> {
    if let Some(path) = &args.request {
        let document = fs::read_to_string(path)
            .with_context(|| format!("failed to read request {}", path.display()))?;
        let request = GenerationRequest::from_json(&document)
            .with_context(|| format!("invalid request {}", path.display()))?;
        return Ok(if args.fill {
            request.with_fill_mode(true)
        } else {
            request
        });
    }

    let (Some(width), Some(height)) = (args.width, args.height) else {
        bail!("--width and --height are required without --request");
    };

    let mut request = GenerationRequest::new(width, height, args.plants).with_fill_mode(args.fill);
    if !args.locks.is_empty() {
        let mut mask = LockedMask::new(width, height);
        for cell in args.locks {
            if cell.column() >= width || cell.row() >= height {
                bail!("locked square {cell} lies outside the {width}x{height} bed");
            }
            let _ = mask.lock(cell);
        }
        request = request.with_locked_squares(mask);
    }
    Ok(request)
}

fn validate(catalog: &Catalog, layout: &str) -> Result<()> {
    let grid = layout_transfer::decode(layout).context("failed to decode layout")?;
    print_grid(&grid);

    let result = validate_arrangement(catalog, &grid);
    if result.valid {
        println!("no enemy adjacencies");
        return Ok(());
    }

    for violation in &result.violations {
        println!(
            "{} at {} is next to {} at {}",
            catalog.display_name(violation.plant.as_str()),
            violation.cell,
            catalog.display_name(violation.enemy.as_str()),
            violation.enemy_cell,
        );
    }
    bail!("{} enemy adjacencies found", result.violations.len())
}

fn bridges(catalog: &Catalog, first: &str, second: &str, pool: &[String]) -> Result<()> {
    let suggestions = if pool.is_empty() {
        find_bridge_plants(catalog, first, second, catalog.ids())
    } else {
        let pool: Vec<PlantId> = pool.iter().map(|id| PlantId::new(id.as_str())).collect();
        find_bridge_plants(catalog, first, second, &pool)
    };

    info!(
        first,
        second,
        found = suggestions.len(),
        "bridge search finished"
    );
    if suggestions.is_empty() {
        println!(
            "no bridge plants for {} and {}",
            catalog.display_name(first),
            catalog.display_name(second)
        );
        return Ok(());
    }
    for plant in &suggestions {
        println!("{plant}\t{}", catalog.display_name(plant.as_str()));
    }
    Ok(())
}

fn print_arrangement(catalog: &Catalog, arrangement: &Arrangement) {
    print_grid(&arrangement.grid);

    let stats = arrangement_stats(catalog, &arrangement.grid);
    println!(
        "squares: {} filled, {} empty, {} total",
        stats.filled_squares(),
        stats.empty_squares(),
        stats.total_squares()
    );
    println!("companion adjacencies: {}", stats.companion_adjacencies());
    for (plant, count) in plant_counts(&arrangement.grid) {
        println!("  {:<12} {count}", catalog.display_name(plant.as_str()));
    }
}

fn print_grid(grid: &Grid) {
    let width = grid
        .occupied()
        .map(|(_, plant)| plant.as_str().len())
        .max()
        .unwrap_or(1);

    for row in 0..grid.height() {
        let line: Vec<String> = (0..grid.width())
            .map(|column| {
                let label = grid
                    .get(CellCoord::new(column, row))
                    .map_or(".", PlantId::as_str);
                format!("{label:<width$}")
            })
            .collect();
        println!("{}", line.join(" ").trim_end());
    }
}

fn parse_selection(value: &str) -> Result<PlantSelection, String> {
    let (plant, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ID=QTY, got '{value}'"))?;
    let plant = plant.trim();
    if plant.is_empty() {
        return Err(format!("missing plant id in '{value}'"));
    }
    let quantity = quantity
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("invalid quantity in '{value}': {error}"))?;
    Ok(PlantSelection::new(plant, quantity))
}

fn parse_cell(value: &str) -> Result<CellCoord, String> {
    let (column, row) = value
        .split_once(',')
        .ok_or_else(|| format!("expected COL,ROW, got '{value}'"))?;
    let column = column
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid column in '{value}': {error}"))?;
    let row = row
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid row in '{value}': {error}"))?;
    Ok(CellCoord::new(column, row))
}
