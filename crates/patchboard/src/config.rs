//! Configuration types for patch compilation and playback.
//!
//! This module provides configuration structures that control how
//! sketches are compiled and how the emitted program is stamped. All
//! types implement [`serde::Deserialize`] for flexible loading from
//! external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining compile and runtime settings.
//! - [`CompileConfig`] - Controls sink selection during compilation.
//! - [`RuntimeConfig`] - Controls the parameters stamped into emitted programs.
//!
//! # Example
//!
//! ```
//! # use patchboard::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.compile().sink(), "out");
//! assert_eq!(config.runtime().sample_rate(), 44_100);
//! ```

use serde::Deserialize;

use patchboard_core::identifier::Id;

/// Top-level application configuration combining compile and runtime
/// settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Compile configuration section.
    #[serde(default)]
    compile: CompileConfig,

    /// Runtime configuration section.
    #[serde(default)]
    runtime: RuntimeConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(compile: CompileConfig, runtime: RuntimeConfig) -> Self {
        Self { compile, runtime }
    }

    /// Returns the compile configuration.
    pub fn compile(&self) -> &CompileConfig {
        &self.compile
    }

    /// Returns the runtime configuration.
    pub fn runtime(&self) -> &RuntimeConfig {
        &self.runtime
    }
}

/// Compilation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileConfig {
    /// The node type treated as the patch sink.
    #[serde(default = "default_sink")]
    sink: String,
}

impl CompileConfig {
    /// Creates a compile configuration with the given sink type.
    pub fn new(sink: impl Into<String>) -> Self {
        Self { sink: sink.into() }
    }

    /// The sink node type name.
    pub fn sink(&self) -> &str {
        &self.sink
    }

    /// The sink node type as an interned identifier.
    pub fn sink_id(&self) -> Id {
        Id::new(&self.sink)
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            sink: default_sink(),
        }
    }
}

fn default_sink() -> String {
    "out".to_string()
}

/// Settings stamped into emitted programs for the audio runtime.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RuntimeConfig {
    /// Sample rate the runtime should render at, in Hz.
    #[serde(default = "default_sample_rate")]
    sample_rate: u32,
}

impl RuntimeConfig {
    /// Creates a runtime configuration with the given sample rate.
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// The configured sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
        }
    }
}

fn default_sample_rate() -> u32 {
    44_100
}
