//! CLI logic for the Landskape diagram tool.
//!
//! The CLI loads a landscape dataset into an in-memory store and runs one
//! diagram request against it, writing the result to a file.

pub mod dataset;
pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};
use tokio::runtime;

use landskape::{DiagramBuilder, DiagramRequest, LandskapeError};

/// Run the Landskape CLI application
///
/// This function loads the dataset, builds the requested diagram, and writes
/// it to the output file. An interrupt (Ctrl-C) while rendering stops the
/// renderer and removes its scratch artifacts.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `LandskapeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid datasets or request parameters
/// - Serialization and rendering errors
pub fn run(args: &Args) -> Result<(), LandskapeError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing landscape"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let store = dataset::load_dataset(&args.input)?;

    let request = DiagramRequest::from_params(
        &args.from,
        &args.to,
        &args.types,
        &args.center,
        &args.cluster,
        &args.format,
        app_config.renderer().default_format(),
    )?;

    let builder = DiagramBuilder::new(app_config);
    let runtime = runtime::Builder::new_multi_thread().enable_all().build()?;

    let diagram = runtime.block_on(async {
        tokio::select! {
            result = builder.render(&store, &store, &request) => result,
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, abandoning render");
                Err(LandskapeError::Cancelled)
            }
        }
    })?;

    fs::write(&args.output, diagram.as_bytes())?;

    info!(
        output_file = args.output,
        media_type = diagram.media_type();
        "Diagram exported successfully"
    );

    Ok(())
}
