//! CLI logic for the Prism circuit renderer.
//!
//! This module reads a TOML circuit description, builds the device it
//! describes, and writes the rendered diagram as SVG.

pub mod circuit_file;
pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use prism::{DiagramBuilder, PrismError};

use circuit_file::CircuitFile;

/// Run the Prism CLI application
///
/// # Errors
///
/// Returns `PrismError` for:
/// - File I/O errors
/// - Configuration or circuit file errors
/// - Out-of-range channels
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), PrismError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing circuit"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let circuit = CircuitFile::parse(&source)?;
    if let Some(layout) = circuit.layout() {
        info!("Using layout from circuit file");
        app_config = app_config.with_layout(layout.clone());
    }

    let device = circuit.build()?;
    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.write_svg(device.recorder(), &args.output)?;

    info!(
        output_file = args.output,
        rows_used = diagram.rows_used();
        "SVG exported successfully"
    );

    Ok(())
}
