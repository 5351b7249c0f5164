//! hs-project: project file format, validation and synthesis runs.

use std::fs;
use std::path::Path;

pub mod hash;
pub mod migrate;
pub mod run;
pub mod schema;
pub mod validate;

pub use hash::project_hash;
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use run::{RequestKind, RequestOutcome, SynthesisReport, build_model, synthesize_project};
pub use schema::*;
pub use validate::{ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Model error: {0}")]
    Model(#[from] hs_core::HsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding of a project description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` is JSON; `.yaml`, `.yml` and anything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Decode, migrate to [`LATEST_VERSION`] and validate.
pub fn parse(content: &str, format: Format) -> ProjectResult<Project> {
    let project: Project = match format {
        Format::Yaml => serde_yaml::from_str(content)?,
        Format::Json => serde_json::from_str(content)?,
    };
    let project = migrate_to_latest(project)?;
    validate_project(&project)?;
    Ok(project)
}

/// Validate, then encode. Invalid projects are never written out.
pub fn render(project: &Project, format: Format) -> ProjectResult<String> {
    validate_project(project)?;
    Ok(match format {
        Format::Yaml => serde_yaml::to_string(project)?,
        Format::Json => serde_json::to_string_pretty(project)?,
    })
}

pub fn load(path: &Path) -> ProjectResult<Project> {
    parse(&fs::read_to_string(path)?, Format::from_path(path))
}

pub fn save(path: &Path, project: &Project) -> ProjectResult<()> {
    fs::write(path, render(project, Format::from_path(path))?)?;
    Ok(())
}
