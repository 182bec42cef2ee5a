//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::NotesService;
use crate::config::Settings;
use crate::domain::{ParseOptions, TreeBuilder};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Note parsing and export
    pub notes: NotesService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let options = ParseOptions {
            placeholder: settings.parser.definition_placeholder.clone(),
            trailing_gloss: settings.parser.trailing_gloss,
        };
        let notes = NotesService::new(
            fs.clone(),
            TreeBuilder::with_options(options),
            settings.extensions.clone(),
        );
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            notes,
        }
    }
}
