//! CLI logic for the Patchboard sketch compiler.
//!
//! This module contains the core CLI logic for the Patchboard sketch
//! compiler.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io};

use log::{info, warn};

use patchboard::{JsonSink, PatchBuilder, PatchboardError};

/// Run the Patchboard CLI application
///
/// This function processes the snapshot export through the Patchboard
/// pipeline and writes the resulting program to the output file. In watch
/// mode it recompiles every time a line arrives on stdin, until EOF.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `PatchboardError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Snapshot and label parsing errors
/// - Compile and assembly errors
pub fn run(args: &Args) -> Result<(), PatchboardError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing sketch"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    let builder = PatchBuilder::new(app_config);

    if args.watch {
        watch(&builder, args);
        Ok(())
    } else {
        process(&builder, args)
    }
}

/// Process the sketch once using the PatchBuilder API.
fn process(builder: &PatchBuilder, args: &Args) -> Result<(), PatchboardError> {
    // Read input file
    let source = fs::read_to_string(&args.input)?;

    let snapshot = builder.parse_snapshot(&source)?;

    // An empty canvas is a user alert, not a failure
    let patch = match builder.compile(&snapshot) {
        Err(err) if err.is_empty_canvas() => {
            warn!("The canvas has no shapes; nothing to compile");
            return Ok(());
        }
        result => result?,
    };

    let program = builder.assemble(&patch)?;

    // Write output file
    let file = fs::File::create(&args.output)?;
    let mut runtime = JsonSink::new(io::BufWriter::new(file));
    builder.play(&program, &mut runtime)?;

    info!(output_file = args.output; "Program exported successfully");

    Ok(())
}

/// Recompile on every stdin line until EOF.
///
/// Errors are reported and the loop keeps going, so a broken label on the
/// canvas does not end the session.
fn watch(builder: &PatchBuilder, args: &Args) {
    loop {
        if let Err(err) = process(builder, args) {
            error_adapter::report(&err);
        }

        eprintln!(
            "Watching {}; press Enter to recompile, Ctrl-D to stop.",
            args.input
        );

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
    }
}
