//! Plateau CLI library
//!
//! This module contains the core CLI logic for the Plateau PGM diagram
//! tool: it reads a TOML model manifest, builds the corresponding [`Pgm`],
//! and writes the rendered SVG.
//!
//! [`Pgm`]: plateau::Pgm

pub mod error_adapter;

mod args;
mod config;
mod manifest;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::fs;

use log::info;

use plateau::{
    PlateauError,
    export::{Exporter, svg::SvgFile},
};

/// Run the Plateau CLI application
///
/// Reads the model manifest, applies configuration, and writes the
/// resulting SVG to the output file.
///
/// # Errors
///
/// Returns `PlateauError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Manifest parsing errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), PlateauError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing model"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read and parse the model manifest
    let source = fs::read_to_string(&args.input)?;
    let manifest: manifest::Manifest = toml::from_str(&source)
        .map_err(|err| PlateauError::Config(format!("failed to parse manifest: {err}")))?;

    // Build, render, and write the output file
    let pgm = manifest.into_pgm(app_config)?;
    let diagram = pgm.build()?;
    let mut exporter = SvgFile::new(&args.output, pgm.config().style.clone());
    exporter.export_diagram(&diagram)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
