pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod emitter;
pub mod manifest;
pub mod reference;
pub mod scanner;
pub mod stdlib;

pub use analyzer::{DependencyAnalyzer, Discovery};
pub use classifier::{Classifier, ImportKind};
pub use config::{EmitOptions, ScanConfig, Verbosity};
pub use emitter::{Emission, ManifestEmitter};
pub use manifest::{Manifest, Operator, VersionConstraint};
pub use reference::ReferenceManifest;
pub use scanner::{FileScanner, LocalModuleSet, SourceFiles};
pub use stdlib::StandardLibrary;
