use realty_engine_core::EnginePolicy;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let (canonical, contents) = read_file(path)?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Load an engine policy from YAML (`.yaml` / `.yml`) or JSON.
///
/// Fields absent from the document keep their built-in defaults. The
/// policy is validated before it is returned.
pub fn read_policy(path: &str) -> Result<EnginePolicy, Box<dyn std::error::Error>> {
    let (canonical, contents) = read_file(path)?;
    let is_yaml = canonical
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let policy: EnginePolicy = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    policy.validate()?;
    tracing::info!(path = %canonical.display(), "loaded engine policy");
    Ok(policy)
}

fn read_file(path: &str) -> Result<(PathBuf, String), Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    Ok((canonical, contents))
}

/// Resolve the path relative to the working directory and check it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
