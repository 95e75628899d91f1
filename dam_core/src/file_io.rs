//! # File I/O Module
//!
//! Loads and saves [`DamProject`] files:
//! - **Two formats**: `.toml` files are TOML, everything else (`.json`,
//!   `.dam`) is JSON
//! - **Atomic saves**: Write to a temp file, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility on load
//!
//! ## Example
//!
//! ```rust,no_run
//! use dam_core::file_io::{save_project, load_project};
//! use dam_core::project::DamProject;
//! use std::path::Path;
//!
//! let project = DamProject::new("Engineer", "26-001", "Main Dam");
//! save_project(&project, Path::new("main_dam.toml")).unwrap();
//!
//! let loaded = load_project(Path::new("main_dam.toml")).unwrap();
//! let analysis = loaded.analyze().unwrap();
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::{CalcError, CalcResult};
use crate::project::{DamProject, SCHEMA_VERSION};

/// On-disk encoding of a project file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    /// Pick the format from the file extension (`.toml` → TOML, else JSON)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => FileFormat::Toml,
            _ => FileFormat::Json,
        }
    }

    fn serialize(self, project: &DamProject) -> CalcResult<String> {
        match self {
            FileFormat::Json => {
                serde_json::to_string_pretty(project).map_err(|e| CalcError::SerializationError {
                    reason: e.to_string(),
                })
            }
            FileFormat::Toml => {
                toml::to_string_pretty(project).map_err(|e| CalcError::SerializationError {
                    reason: e.to_string(),
                })
            }
        }
    }

    fn deserialize(self, contents: &str, path: &Path) -> CalcResult<DamProject> {
        match self {
            FileFormat::Json => {
                serde_json::from_str(contents).map_err(|e| CalcError::SerializationError {
                    reason: format!("Invalid JSON in {}: {}", path.display(), e),
                })
            }
            FileFormat::Toml => toml::from_str(contents).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid TOML in {}: {}", path.display(), e),
            }),
        }
    }
}

/// Temp path used during an atomic save (`name.ext` → `name.ext.tmp`)
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp_path = path.to_path_buf();
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp_path.set_extension(extension);
    tmp_path
}

/// Save a project to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize project to JSON or TOML (by extension)
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to the final path
pub fn save_project(project: &DamProject, path: &Path) -> CalcResult<()> {
    let contents = FileFormat::from_path(path).serialize(project)?;
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!("saved project to {}", path.display());
    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(DamProject)` - Successfully loaded project
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON/TOML
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<DamProject> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let project = FileFormat::from_path(path).deserialize(&contents, path)?;
    validate_version(&project.meta.version)?;

    debug!("loaded project '{}' from {}", project.meta.label, path.display());
    Ok(project)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor is not readable
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DesignInput;
    use crate::units::Kpa;
    use std::env::temp_dir;

    fn temp_project_path(name: &str, ext: &str) -> PathBuf {
        temp_dir().join(format!("dam_core_test_{}.{}", name, ext))
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path(Path::new("a.toml")), FileFormat::Toml);
        assert_eq!(FileFormat::from_path(Path::new("a.TOML")), FileFormat::Toml);
        assert_eq!(FileFormat::from_path(Path::new("a.json")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("a.dam")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("noext")), FileFormat::Json);
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/path/to/dam.toml")),
            Path::new("/path/to/dam.toml.tmp")
        );
    }

    #[test]
    fn test_save_and_load_json() {
        let path = temp_project_path("roundtrip", "json");

        let mut project = DamProject::new("Test Engineer", "TEST-001", "Test Dam");
        project.settings.safety_limit_kpa = Kpa(3500.0);
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded, project);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_and_load_toml() {
        let path = temp_project_path("roundtrip", "toml");

        let project =
            DamProject::new("Test Engineer", "TEST-002", "Test Dam").with_design(DesignInput {
                h_max_m: 80.0,
                ..DesignInput::default()
            });
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST-002");
        assert_eq!(loaded.design, project.design);
        assert_eq!(loaded.settings, project.settings);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_hand_written_toml() {
        let path = temp_project_path("hand_written", "toml");
        let contents = r#"
[design]
h_max_m = 45.0
he_m = 3.0
top_width_m = 7.5
gamma_c_knm3 = 22.0
gamma_w_knm3 = 10.0
friction_coefficient = 0.75
fetch_length_km = 5.0
uplift_factor = 0.5
wind_velocity_kmh = 128.0
hw_amplification_factor = 1.33
freeboard_allowance_m = 0.14
"#;
        fs::write(&path, contents).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.design, DesignInput::default());
        assert_eq!(loaded.meta.version, SCHEMA_VERSION);
        assert!(loaded.analyze().is_ok());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_project_path("atomic", "json");
        let tmp_path = tmp_path_for(&path);

        save_project(&DamProject::new("Test", "TEST", "Dam"), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_project(&temp_project_path("does_not_exist", "json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_project_path("invalid", "json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
