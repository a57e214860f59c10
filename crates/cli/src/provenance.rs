use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

const SIDECAR_SUFFIX: &str = ".provenance.json";

/// What a classified artifact was computed against.
pub struct Sidecar {
    /// AFC request `location` object of the area used.
    pub area: Value,
    /// How the center was jittered (`{"seed": n}` or `{"draws": [...]}`).
    pub jitter: Value,
    pub params: Value,
}

impl Sidecar {
    pub fn new(area: Value, jitter: Value) -> Self {
        Self {
            area,
            jitter,
            params: Value::Null,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }
}

/// Write `<artifact>.provenance.json` next to `artifact`; returns its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, sidecar: Sidecar) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = sidecar_path(artifact)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": code_rev(),
        "geofence_version": geofence::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "area": sidecar.area,
        "jitter": sidecar.jitter,
        "params": sidecar.params,
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "provenance_written");
    Ok(path)
}

/// `<dir>/<stem>.provenance.json` for a classified output file.
fn sidecar_path(artifact: &Path) -> Result<PathBuf> {
    let stem = artifact
        .file_stem()
        .ok_or_else(|| anyhow!("output {} has no file name", artifact.display()))?;
    let mut name = stem.to_os_string();
    name.push(SIDECAR_SUFFIX);
    Ok(artifact.with_file_name(name))
}

/// Revision the area was built with: `GEOFENCE_CODE_REV` (build time, then
/// runtime), else the short git hash of the working tree. `None` if neither.
pub fn code_rev() -> Option<String> {
    let non_empty = |s: String| (!s.trim().is_empty()).then(|| s.trim().to_string());
    option_env!("GEOFENCE_CODE_REV")
        .map(str::to_string)
        .and_then(non_empty)
        .or_else(|| std::env::var("GEOFENCE_CODE_REV").ok().and_then(non_empty))
        .or_else(|| {
            let output = Command::new("git")
                .args(["rev-parse", "--short", "HEAD"])
                .output()
                .ok()?;
            if !output.status.success() {
                return None;
            }
            String::from_utf8(output.stdout).ok().and_then(non_empty)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_track_output() {
        let base = Path::new("/tmp/tracks/drive.csv");
        assert_eq!(
            sidecar_path(base).unwrap(),
            Path::new("/tmp/tracks/drive.provenance.json")
        );
        assert!(sidecar_path(Path::new("/")).is_err());
    }

    #[test]
    fn sidecar_records_area_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("classified.csv");
        fs::write(&artifact, "latitude,longitude,containment\n").unwrap();
        let sidecar = Sidecar::new(json!({"ellipse": {"majorAxis": 500.0}}), json!({"seed": 4}))
            .with_params(json!({"points": 0}));
        let prov_path = write_sidecar(&artifact, sidecar).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["area"]["ellipse"]["majorAxis"], 500.0);
        assert_eq!(parsed["jitter"]["seed"], 4);
        assert_eq!(parsed["params"]["points"], 0);
    }
}
