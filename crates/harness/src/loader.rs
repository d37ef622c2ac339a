// SPDX-License-Identifier: MIT

//! Module-loading seam.
//!
//! Spec and helper files only matter for their side effect: evaluating
//! them registers declarations with the engine. How that evaluation
//! happens is engine-specific, so the runner goes through this trait and
//! the embedding application supplies the implementation.

use std::path::Path;

use thiserror::Error;

/// Failure to load a file or module for side effects.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load file {}: {message}", path.display())]
    File { path: std::path::PathBuf, message: String },

    #[error("failed to load module {id}: {message}")]
    Module { id: String, message: String },
}

/// Loads files and modules so their declarations register with the engine.
pub trait ModuleLoader {
    /// Load a helper or spec file.
    fn load_file(&mut self, path: &Path) -> Result<(), LoadError>;

    /// Load a require-hook by identifier, e.g. transpilation support that
    /// must be active before any spec file is evaluated.
    fn load_module(&mut self, id: &str) -> Result<(), LoadError>;
}
