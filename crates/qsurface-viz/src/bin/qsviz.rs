//! qsviz: lattice diagrams and correction reports from simulation dumps
//!
//! The simulation driver dumps lattice state as JSON (see `Lattice`), e.g.
//! once after error injection and once after decoding. This binary turns
//! those dumps into artifacts:
//! ```
//! qsviz render --lattice error_state.json --out error_state.svg --png
//! qsviz diff --before error_state.json --after final_state.json --out corrections.txt
//! qsviz syndrome --lattice error_state.json --out syndrome.txt
//! qsviz pack --before error_state.json --after final_state.json --out-dir results/
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use qsurface_viz::{
    find_rasterizer, CorrectionDiff, CorrectionPack, DiffReport, Lattice, LatticeRenderer,
    OutputDir, RasterOutcome, RenderConfig, RenderOutcome, SyndromeReport, Topology, VizConfig,
};

#[derive(Parser, Debug)]
#[command(name = "qsviz")]
#[command(version)]
#[command(about = "Surface-code lattice diagrams and correction diagnostics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render lattice diagrams (SVG, optional PNG)
    Render(RenderArgs),

    /// Report which data qubits changed between two snapshots
    Diff(DiffArgs),

    /// List triggered ancillas
    Syndrome(SyndromeArgs),

    /// Diagrams and reports for one decoding pass, in one directory
    Pack(PackArgs),

    /// Check optional external tools
    Check,

    /// Show version
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TopologyArg {
    Rotated,
    Planar,
    Toric,
}

impl From<TopologyArg> for Topology {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::Rotated => Topology::Rotated,
            TopologyArg::Planar => Topology::Planar,
            TopologyArg::Toric => Topology::Toric,
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Lattice dump (JSON)
    #[arg(long, required = true)]
    lattice: PathBuf,

    /// Output SVG base name; rounds > 0 get `_<round>` before the extension
    #[arg(long, short = 'o', default_value = "lattice.svg")]
    out: PathBuf,

    /// Round to render
    #[arg(long, default_value_t = 0)]
    round: usize,

    /// Render every round instead of --round
    #[arg(long, conflicts_with = "round")]
    all_rounds: bool,

    /// Also write a PNG next to each SVG
    #[arg(long)]
    png: bool,

    /// TOML config with [render] / [render.style] tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pixels per lattice unit (overrides config)
    #[arg(long)]
    unit_scale: Option<f64>,

    /// Canvas margin in pixels (overrides config)
    #[arg(long)]
    padding: Option<f64>,

    /// Lattice topology (overrides config)
    #[arg(long, value_enum)]
    topology: Option<TopologyArg>,
}

#[derive(Parser, Debug)]
struct DiffArgs {
    /// Lattice dump taken before correction
    #[arg(long, required = true)]
    before: PathBuf,

    /// Lattice dump taken after correction
    #[arg(long, required = true)]
    after: PathBuf,

    /// Round to compare
    #[arg(long, default_value_t = 0)]
    round: usize,

    /// Report file (stdout if omitted)
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SyndromeArgs {
    /// Lattice dump (JSON)
    #[arg(long, required = true)]
    lattice: PathBuf,

    /// Single round (all rounds if omitted)
    #[arg(long)]
    round: Option<usize>,

    /// Report file (stdout if omitted)
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PackArgs {
    /// Lattice dump taken before correction
    #[arg(long, required = true)]
    before: PathBuf,

    /// Lattice dump taken after correction
    #[arg(long, required = true)]
    after: PathBuf,

    /// Output directory (created if missing)
    #[arg(long, required = true)]
    out_dir: PathBuf,

    /// Round to render and compare
    #[arg(long, default_value_t = 0)]
    round: usize,

    /// Also write a PNG next to each SVG
    #[arg(long)]
    png: bool,

    /// TOML config with [render] / [render.style] tables
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => run_render(args),
        Commands::Diff(args) => run_diff(args),
        Commands::Syndrome(args) => run_syndrome(args),
        Commands::Pack(args) => run_pack(args),
        Commands::Check => check_dependencies(),
        Commands::Version => show_version(),
    }
}

fn load_render_config(path: Option<&PathBuf>) -> Result<RenderConfig> {
    let config = match path {
        Some(path) => VizConfig::from_file(path)?,
        None => VizConfig::default(),
    };
    Ok(config.render)
}

fn run_render(args: RenderArgs) -> Result<()> {
    let mut config = load_render_config(args.config.as_ref())?;
    if let Some(scale) = args.unit_scale {
        config.unit_scale = scale;
    }
    if let Some(padding) = args.padding {
        config.padding = padding;
    }
    if let Some(topology) = args.topology {
        config.topology = topology.into();
    }
    if args.png {
        config.emit_raster = true;
    }

    let renderer = LatticeRenderer::new(config).context("Invalid render configuration")?;
    let lattice = Lattice::load(&args.lattice)?;

    let outcomes = if args.all_rounds {
        renderer.render_all(&lattice, &args.out)?
    } else {
        vec![renderer.render_round(&lattice, args.round, &args.out)?]
    };

    let written = outcomes
        .iter()
        .filter(|o| matches!(o, RenderOutcome::Rendered { .. }))
        .count();
    let rasters = outcomes
        .iter()
        .filter(|o| {
            matches!(
                o,
                RenderOutcome::Rendered {
                    raster: RasterOutcome::Written(_),
                    ..
                }
            )
        })
        .count();
    log::info!(
        "Rendered {} of {} round(s), {} PNG(s)",
        written,
        outcomes.len(),
        rasters
    );
    Ok(())
}

fn run_diff(args: DiffArgs) -> Result<()> {
    let before = Lattice::load(&args.before)?;
    let after = Lattice::load(&args.after)?;

    let diff = CorrectionDiff::classify(
        &before.round(args.round)?.snapshot(),
        &after.round(args.round)?.snapshot(),
    );
    let report = DiffReport::new(&diff, args.round).with_logical_error(after.logical_error());

    match &args.out {
        Some(path) => report.write(path)?,
        None => print!("{}", report.render()),
    }
    Ok(())
}

fn run_syndrome(args: SyndromeArgs) -> Result<()> {
    let lattice = Lattice::load(&args.lattice)?;

    let report = match args.round {
        Some(round) => SyndromeReport::for_round(round, lattice.round(round)?.syndrome()),
        None => SyndromeReport::for_lattice(&lattice),
    };

    match &args.out {
        Some(path) => report.write(path)?,
        None => print!("{}", report.render()),
    }
    Ok(())
}

fn run_pack(args: PackArgs) -> Result<()> {
    let mut config = load_render_config(args.config.as_ref())?;
    if args.png {
        config.emit_raster = true;
    }
    let renderer = LatticeRenderer::new(config).context("Invalid render configuration")?;

    let before = Lattice::load(&args.before)?;
    let after = Lattice::load(&args.after)?;
    let output = OutputDir::new(&args.out_dir)?;

    let result = CorrectionPack::new(&renderer, output).run(&before, &after, args.round)?;

    println!("Output:     {}", result.output_dir.display());
    println!("Corrected:  {} qubit(s)", result.diff.total());
    println!("Syndrome:   {} triggered ancilla(s)", result.n_triggered);
    match result.logical_error {
        Some(logical_error) => println!("Logical error occurred: {}", logical_error),
        None => println!("Logical error occurred: unknown"),
    }
    println!();
    println!("Files generated:");
    for file in &result.files_generated {
        println!("  {}", file.display());
    }
    Ok(())
}

fn check_dependencies() -> Result<()> {
    println!("qsviz Dependency Check");
    println!("======================");
    println!();

    print!("Rasterizer: ");
    match find_rasterizer() {
        Some((rasterizer, path)) => println!("OK ({}: {})", rasterizer.binary(), path.display()),
        None => {
            println!("NOT FOUND (optional, PNG export disabled)");
            println!("{}", qsurface_viz::dependency_install_instructions("raster"));
        }
    }

    Ok(())
}

fn show_version() -> Result<()> {
    println!("qsviz {}", qsurface_viz::VERSION);
    Ok(())
}
