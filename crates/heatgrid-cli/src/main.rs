//! `heatgrid` — command-line interface for heat-grid data specification
//! generation.
//!
//! ```text
//! USAGE:
//!   heatgrid generate --width W --height H --out DIR   Generate core images
//!   heatgrid inspect <FILE>                             Decode one image
//!   heatgrid plan                                       Print the region table
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use heatgrid_gen::{generate_all, GenConfig, GridBuilder};
use heatgrid_image::{image_file_name, MemoryImage};
use heatgrid_layout::RegionPlan;

#[derive(Parser)]
#[command(name = "heatgrid", about = "Heat-grid data specification generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Build a lattice and generate one memory image per heat element.
    Generate {
        /// Lattice width in elements.
        #[arg(long)]
        width: usize,
        /// Lattice height in elements.
        #[arg(long)]
        height: usize,
        /// Wrap the lattice into a torus.
        #[arg(long)]
        wrap: bool,
        /// Feed open boundaries from live injectors.
        #[arg(long)]
        inject: bool,
        /// Initial temperature for every element.
        #[arg(long, default_value_t = 0)]
        temperature: i32,
        /// Simulation timestep in microseconds.
        #[arg(long, default_value_t = 1000)]
        timestep_us: u32,
        /// Wall-clock stretch factor for the timestep.
        #[arg(long, default_value_t = 1)]
        time_scale: u32,
        /// Directory to write image files into.
        #[arg(long)]
        out: PathBuf,
        /// Hostname prefix for image file names.
        #[arg(long, default_value = "heatgrid")]
        hostname: String,
    },
    /// Decode an image file region by region.
    Inspect {
        /// Path to a generated image file.
        file: PathBuf,
    },
    /// Print the fixed region table.
    Plan,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Cmd::Generate {
            width,
            height,
            wrap,
            inject,
            temperature,
            timestep_us,
            time_scale,
            out,
            hostname,
        } => cmd_generate(
            width,
            height,
            wrap,
            inject,
            temperature,
            timestep_us,
            time_scale,
            &out,
            &hostname,
        )?,
        Cmd::Inspect { file } => cmd_inspect(&file)?,
        Cmd::Plan => cmd_plan(),
    }

    Ok(())
}

#[allow(clippy::too_many_arguments, clippy::cast_possible_truncation)]
fn cmd_generate(
    width: usize,
    height: usize,
    wrap: bool,
    inject: bool,
    temperature: i32,
    timestep_us: u32,
    time_scale: u32,
    out: &std::path::Path,
    hostname: &str,
) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("Lattice must be at least 1x1");
    }

    let demo = GridBuilder::new(width, height)
        .wrap(wrap)
        .inject_boundaries(inject)
        .initial_temperature(temperature)
        .build();
    let config = GenConfig {
        timestep_us,
        time_scale,
        ..GenConfig::default()
    };

    std::fs::create_dir_all(out)
        .with_context(|| format!("creating output directory {}", out.display()))?;

    let results = generate_all(&demo.graph, &demo.table, &config);
    let mut written = 0usize;
    let mut failed = 0usize;

    for (x, y, cell) in demo.cells() {
        let (_, result) = results
            .iter()
            .find(|(id, _)| *id == cell)
            .expect("every cell has a result");
        match result {
            Ok(image) => {
                // One element per core: processor 1 of the chip at (x, y).
                let name = image_file_name(hostname, x as u32, y as u32, 1);
                let path = out.join(&name);
                image
                    .to_file(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("{name}  {} bytes", image.total_len());
                written += 1;
            }
            Err(error) => {
                eprintln!("heat({x},{y}): {error}");
                failed += 1;
            }
        }
    }

    println!();
    println!(
        "{written} image(s) written to {} ({failed} failed)",
        out.display()
    );
    if failed > 0 {
        bail!("{failed} element(s) failed to generate");
    }
    Ok(())
}

fn cmd_inspect(file: &std::path::Path) -> Result<()> {
    let image = MemoryImage::from_file(file)
        .with_context(|| format!("loading {}", file.display()))?;

    println!("{}  ({} bytes)", file.display(), image.total_len());
    println!();
    println!("{:>4}  {:>6}  {:>5}  {:<14}  words", "ord", "offset", "size", "label");

    for entry in image.entries() {
        let words = image
            .region_words(entry.region)
            .unwrap_or_default()
            .iter()
            .map(|&w| {
                #[allow(clippy::cast_possible_wrap)]
                let signed = w as i32;
                if signed < 0 {
                    format!("{signed}")
                } else {
                    format!("0x{w:08x}({w})")
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:>4}  {:>6}  {:>5}  {:<14}  {}",
            entry.region.ordinal(),
            entry.offset,
            entry.size,
            entry.label,
            words
        );
    }
    Ok(())
}

fn cmd_plan() {
    println!("Region plan ({} bytes total)", RegionPlan::total_bytes());
    println!();
    println!("{:>4}  {:>6}  {:>5}  {:<14}  region", "ord", "offset", "size", "label");
    let plan = RegionPlan::standard();
    for entry in plan.entries() {
        println!(
            "{:>4}  {:>6}  {:>5}  {:<14}  {:?}",
            entry.region.ordinal(),
            entry.offset,
            entry.size,
            entry.label,
            entry.region
        );
    }
}
