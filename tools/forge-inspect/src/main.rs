//! forge-inspect - Forge mesh inspection tool
//!
//! Decodes .forgemesh files and prints a header/geometry summary or exports
//! the geometry to Wavefront OBJ. All diagnostics live here; the decoder
//! crate itself is silent.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use forge_mesh::{parse_forge_mesh, ForgeMesh};

#[derive(Parser)]
#[command(name = "forge-inspect")]
#[command(about = "Forge mesh inspection tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a mesh file and print its header and geometry summary
    Info {
        /// Input .forgemesh file
        input: PathBuf,
    },

    /// Decode a mesh file and export it as Wavefront OBJ
    Obj {
        /// Input .forgemesh file
        input: PathBuf,

        /// Output .obj file (defaults to the input with an .obj extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => {
            let mesh = load_mesh(&input)?;
            print_info(&mesh);
        }

        Commands::Obj { input, output } => {
            let output = output.unwrap_or_else(|| input.with_extension("obj"));
            let mesh = load_mesh(&input)?;
            tracing::info!("Writing {:?}", output);
            write_obj(&mesh, &output)?;
            tracing::info!("Done!");
        }
    }

    Ok(())
}

fn load_mesh(input: &Path) -> Result<ForgeMesh> {
    let data =
        std::fs::read(input).with_context(|| format!("Failed to read mesh: {:?}", input))?;
    let mesh = parse_forge_mesh(&data)
        .with_context(|| format!("Failed to decode mesh: {:?}", input))?;
    Ok(mesh)
}

fn print_info(mesh: &ForgeMesh) {
    let header = &mesh.header;
    tracing::info!("Magic: {}", header.magic_str());
    tracing::info!("Endianness: {:?}", header.byte_order);
    tracing::info!("Version: {}", header.version);
    tracing::info!("Vertex type: {}", header.vertex_type);
    tracing::info!("Vertices: {}", mesh.vertex_count());
    tracing::info!("Faces: {}", mesh.face_count());
    tracing::info!("Flags: {:?}", header.flags);
    tracing::info!("Keep mesh data: {}", header.keep_mesh_data);
    tracing::info!("Vertex usage: {:#010x}", header.vertex_usage_flags);
    tracing::info!("Face usage: {:#010x}", header.face_usage_flags);
    tracing::info!("Bounds: {}", header.bounds);
    match &mesh.skin {
        Some(skin) => tracing::info!("Skin data: {} weighted vertices", skin.weights.len()),
        None => tracing::info!("Skin data: none"),
    }
}

/// Write positions, the primary UV channel, and faces as OBJ.
///
/// OBJ indices are 1-based; face winding is kept as decoded.
fn write_obj(mesh: &ForgeMesh, output: &Path) -> Result<()> {
    let file =
        File::create(output).with_context(|| format!("Failed to create {:?}", output))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# forge-inspect OBJ export")?;
    writeln!(out, "o forge_mesh")?;

    for pos in &mesh.positions {
        writeln!(out, "v {} {} {}", pos.x, pos.y, pos.z)?;
    }
    for uv in &mesh.uv1 {
        writeln!(out, "vt {} {}", uv.x, uv.y)?;
    }
    for [a, b, c] in &mesh.faces {
        writeln!(
            out,
            "f {}/{} {}/{} {}/{}",
            a + 1,
            a + 1,
            b + 1,
            b + 1,
            c + 1,
            c + 1
        )?;
    }

    out.flush()?;
    Ok(())
}
