use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use personal_finance_core::TaxYearConfig;

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let (canonical, contents) = read_file(path)?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Load a tax year override. `.yaml`/`.yml` files are read as YAML, anything
/// else as JSON. The result is validated before use.
pub fn read_config(path: &str) -> Result<TaxYearConfig, Box<dyn std::error::Error>> {
    let (canonical, contents) = read_file(path)?;

    let config = if is_yaml(&canonical) {
        let config: TaxYearConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
        config.validate()?;
        config
    } else {
        TaxYearConfig::from_json(&contents)
            .map_err(|e| format!("Invalid config '{}': {}", canonical.display(), e))?
    };

    Ok(config)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn read_file(path: &str) -> Result<(PathBuf, String), Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    Ok((canonical, contents))
}

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_extension_detection() {
        assert!(is_yaml(Path::new("rates/2025.yaml")));
        assert!(is_yaml(Path::new("rates.yml")));
        assert!(!is_yaml(Path::new("rates.json")));
        assert!(!is_yaml(Path::new("rates")));
    }

    #[test]
    fn test_missing_file_reported() {
        let err = read_config("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_yaml_override_keeps_defaults() {
        let dir = std::env::temp_dir().join(format!("pfa-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rates.yaml");
        fs::write(&path, "name: \"Test year\"\n").unwrap();

        let config = read_config(path.to_str().unwrap()).unwrap();
        assert_eq!(config.name, "Test year");
        assert_eq!(config.mortgage, TaxYearConfig::default().mortgage);

        fs::remove_dir_all(&dir).unwrap();
    }
}
