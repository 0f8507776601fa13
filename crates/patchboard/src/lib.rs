//! Patchboard - Compile whiteboard sketches into audio patch programs.
//!
//! A sketch is a set of boxes and arrows exported from a canvas editor:
//! each box's label declares a signal node (`sine 440`, `lpf cutoff 2`,
//! `out`), each arrow wires one node into an inlet of another. Patchboard
//! compiles that sketch into a flattened program an external audio engine
//! can execute.

pub mod config;

mod compile;
mod error;
mod program;
mod runtime;

pub use patchboard_core::{identifier, patch, snapshot};

pub use compile::{Connection, Patch};
pub use error::{CompileError, PatchboardError};
pub use program::{Port, Program, ProgramNode};
pub use runtime::{JsonSink, Runtime, RuntimeError};

use log::{debug, info, trace};

use patchboard_core::snapshot::{BindingSource, Snapshot};

use config::AppConfig;

/// Builder for compiling and playing Patchboard sketches.
///
/// This provides an API for processing a canvas snapshot through the
/// compile, assemble, and play stages.
///
/// # Examples
///
/// ```rust
/// use patchboard::{JsonSink, PatchBuilder, config::AppConfig};
///
/// let export = r#"{
///     "shapes": [
///         { "id": "shape:a", "type": "geo", "props": { "text": "sine 440" } },
///         { "id": "shape:b", "type": "geo", "props": { "text": "out" } },
///         { "id": "shape:c", "type": "arrow", "props": {
///             "start": { "toId": "shape:a" },
///             "end": { "toId": "shape:b" }
///         } }
///     ]
/// }"#;
///
/// let builder = PatchBuilder::new(AppConfig::default());
///
/// let snapshot = builder.parse_snapshot(export).expect("valid export");
/// let patch = builder.compile(&snapshot).expect("sketch compiles");
/// let program = builder.assemble(&patch).expect("patch assembles");
///
/// let mut runtime = JsonSink::new(Vec::new());
/// builder.play(&program, &mut runtime).expect("handoff succeeds");
/// ```
#[derive(Default)]
pub struct PatchBuilder {
    config: AppConfig,
}

impl PatchBuilder {
    /// Create a new patch builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including compile and runtime settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a canvas export into a snapshot.
    ///
    /// # Arguments
    ///
    /// * `json` - The canvas editor's JSON export of the current page
    ///
    /// # Errors
    ///
    /// Returns `PatchboardError::Snapshot` when the export is not valid
    /// snapshot JSON.
    pub fn parse_snapshot(&self, json: &str) -> Result<Snapshot, PatchboardError> {
        trace!(bytes = json.len(); "Parsing snapshot export");
        let snapshot: Snapshot = serde_json::from_str(json)?;
        debug!(shapes = snapshot.shapes.len(); "Snapshot parsed");
        Ok(snapshot)
    }

    /// Compile a snapshot into a patch.
    ///
    /// Arrow bindings are resolved from the terminals inlined in the
    /// snapshot itself; use [`PatchBuilder::compile_with`] to resolve
    /// them through a live editor seam instead.
    ///
    /// # Errors
    ///
    /// Returns `PatchboardError` for an empty canvas (recoverable; see
    /// [`PatchboardError::is_empty_canvas`]), label grammar errors, and
    /// the structural [`CompileError`] variants.
    pub fn compile(&self, snapshot: &Snapshot) -> Result<Patch, PatchboardError> {
        self.compile_with(snapshot, snapshot)
    }

    /// Compile a snapshot, resolving arrow bindings through `bindings`.
    pub fn compile_with(
        &self,
        snapshot: &Snapshot,
        bindings: &impl BindingSource,
    ) -> Result<Patch, PatchboardError> {
        info!("Compiling sketch");

        let patch = compile::compile(snapshot, bindings, self.config.compile())?;

        debug!("Sketch compiled successfully");
        trace!(patch:? = patch; "Compiled patch");

        Ok(patch)
    }

    /// Flatten a patch into an executable program.
    ///
    /// # Errors
    ///
    /// Returns `PatchboardError` for wire cycles and unbound reachable
    /// inputs.
    pub fn assemble(&self, patch: &Patch) -> Result<Program, PatchboardError> {
        let program = program::assemble(patch, self.config.runtime())?;
        Ok(program)
    }

    /// Hand a program to a runtime for playback.
    ///
    /// # Errors
    ///
    /// Returns `PatchboardError::Runtime` when the handoff fails.
    pub fn play(
        &self,
        program: &Program,
        runtime: &mut impl Runtime,
    ) -> Result<(), PatchboardError> {
        runtime.play(program)?;
        Ok(())
    }
}
