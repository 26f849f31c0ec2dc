//! sonobe CLI — generate Sonobe edge-unit assembly geometry as JSON.
//!
//! Units are emitted as a JSON array of 4-triangle records, ready for any
//! renderer to consume.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use sonobe::{Assembly, ReferenceSolid};
use sonobe_unit::{fit_to_radius, EdgeUnit};

mod obj;

#[derive(Parser)]
#[command(name = "sonobe")]
#[command(about = "Generate Sonobe edge-unit assembly geometry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate units for a built-in reference solid
    Generate {
        /// Reference solid to assemble
        #[arg(value_enum)]
        solid: SolidArg,
        /// Model scale
        #[arg(short, long, default_value_t = 0.7)]
        scale: f64,
        /// Ridge offset fraction; defaults to the solid's preset
        #[arg(short, long)]
        ridge: Option<f64>,
        /// Output JSON file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build units for a mesh given as a minimal OBJ vertex/face list
    Import {
        /// Input OBJ file (only `v` and `f` lines are read)
        input: PathBuf,
        /// Scale the mesh so its farthest vertex sits at this radius
        #[arg(long, default_value_t = 2.0)]
        fit_radius: f64,
        /// Ridge offset fraction
        #[arg(short, long, default_value_t = 0.02)]
        ridge: f64,
        /// Output JSON file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the built-in solids and their unit counts
    Info,
}

/// CLI spelling of [`ReferenceSolid`].
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolidArg {
    Cube,
    Octahedron,
    Icosahedron,
    Icosidodecahedron,
    TruncatedIcosahedron,
    Rhombicosidodecahedron,
    GeodesicIcosahedron,
}

impl From<SolidArg> for ReferenceSolid {
    fn from(arg: SolidArg) -> Self {
        match arg {
            SolidArg::Cube => Self::Cube,
            SolidArg::Octahedron => Self::Octahedron,
            SolidArg::Icosahedron => Self::Icosahedron,
            SolidArg::Icosidodecahedron => Self::Icosidodecahedron,
            SolidArg::TruncatedIcosahedron => Self::TruncatedIcosahedron,
            SolidArg::Rhombicosidodecahedron => Self::Rhombicosidodecahedron,
            SolidArg::GeodesicIcosahedron => Self::GeodesicIcosahedron,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            solid,
            scale,
            ridge,
            output,
        } => {
            let solid = ReferenceSolid::from(solid);
            let ridge = ridge.unwrap_or_else(|| solid.default_ridge_frac());
            let assembly = solid.assemble(scale, ridge)?;
            report_warnings(&assembly);
            write_units(&assembly.units, output.as_deref())?;
        }
        Commands::Import {
            input,
            fit_radius,
            ridge,
            output,
        } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let (vertices, faces) = obj::parse(&text)?;
            let vertices = fit_to_radius(&vertices, fit_radius);
            let assembly = Assembly::from_mesh(&vertices, &faces, 1.0, ridge)?;
            report_warnings(&assembly);
            write_units(&assembly.units, output.as_deref())?;
        }
        Commands::Info => {
            for solid in [
                ReferenceSolid::Cube,
                ReferenceSolid::Octahedron,
                ReferenceSolid::Icosahedron,
                ReferenceSolid::Icosidodecahedron,
                ReferenceSolid::TruncatedIcosahedron,
                ReferenceSolid::Rhombicosidodecahedron,
                ReferenceSolid::GeodesicIcosahedron,
            ] {
                println!(
                    "{:24} {:>3} units  (default ridge {:.3})",
                    format!("{solid:?}"),
                    solid.unit_count(),
                    solid.default_ridge_frac()
                );
            }
        }
    }

    Ok(())
}

fn report_warnings(assembly: &Assembly) {
    for w in &assembly.warnings {
        eprintln!("warning: {w}");
    }
}

fn write_units(units: &[EdgeUnit], output: Option<&std::path::Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(units)?;
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
