use std::fs;
use std::path::{Path, PathBuf};

use super::core::CogniConfig;
use crate::errors::CogniError;

pub const CONFIG_FILE_NAME: &str = ".cognibank.toml";

/// Environment variables consulted for the backend URL, highest priority first.
pub const BASE_URL_ENV_VARS: [&str; 2] = ["COGNIBANK_API_URL", "NEXT_PUBLIC_API_URL"];

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str, path: &Path) -> Result<CogniConfig, CogniError> {
    let config = toml::from_str::<CogniConfig>(contents)
        .map_err(|e| CogniError::config_parse(format!("failed to parse {}: {}", path.display(), e), path))?;
    config.validate()?;
    Ok(config)
}

/// Try loading config from a specific path; `None` when absent or broken.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CogniConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // a missing file is the normal case while walking up
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to read config file {}: {}", config_path.display(), e);
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents, config_path) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// `start` followed by its ancestors, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        parent.pop().then_some(parent)
    })
    .take(max_depth)
}

/// Per-user config location, e.g. `~/.config/cognibank/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cognibank").join("config.toml"))
}

/// Load config by walking up from `start`, then the per-user file, then defaults.
pub fn load_config_from(start: &Path) -> CogniConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .chain(user_config_path())
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!("No config file found. Using default config.");
            CogniConfig::default()
        })
}

/// Load config starting from the current directory.
pub fn load_config() -> CogniConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(&dir),
        Err(e) => {
            tracing::warn!("Failed to get current directory: {}. Using default config.", e);
            CogniConfig::default()
        }
    }
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: CogniConfig, lookup: F) -> CogniConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some((name, url)) = BASE_URL_ENV_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()).map(|v| (name, v)))
    {
        tracing::debug!("Using backend URL from {}", name);
        config.api.base_url = url;
    }
    config
}

/// Resolve the final config: file discovery, environment, then CLI overrides.
pub fn resolve_config(api_url: Option<&str>, demo: bool) -> Result<CogniConfig, CogniError> {
    let mut config = apply_env_overrides(load_config(), |name| std::env::var(name).ok());
    if let Some(url) = api_url {
        config.api.base_url = url.to_string();
    }
    if demo {
        config.api.demo_fallback = true;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_directory_ancestors_respects_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b"),
            ]
        );
    }

    #[test]
    fn test_load_config_walks_up() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[api]\nbase_url = \"http://walked.up:1234\"\n",
        )
        .unwrap();
        let nested = temp.path().join("one").join("two");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config_from(&nested);
        assert_eq!(config.base_url(), "http://walked.up:1234");
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[api]\ntimeout_seconds = 0\n").unwrap();
        assert!(try_load_config_from_path(&path).is_none());
    }

    #[test]
    fn test_parse_error_carries_path() {
        let err = parse_and_validate_config("[api", Path::new("broken.toml")).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
        assert!(err.is_user_fixable());
    }

    #[test]
    fn test_env_priority() {
        let env: HashMap<&str, &str> = [
            ("COGNIBANK_API_URL", "http://primary:1"),
            ("NEXT_PUBLIC_API_URL", "http://secondary:2"),
        ]
        .into_iter()
        .collect();
        let lookup = |name: &str| env.get(name).map(|v| v.to_string());

        let config = apply_env_overrides(CogniConfig::default(), lookup);
        assert_eq!(config.api.base_url, "http://primary:1");
    }

    #[test]
    fn test_env_fallback_and_blank_values() {
        let lookup = |name: &str| match name {
            "COGNIBANK_API_URL" => Some("  ".to_string()),
            "NEXT_PUBLIC_API_URL" => Some("http://secondary:2".to_string()),
            _ => None,
        };
        let config = apply_env_overrides(CogniConfig::default(), lookup);
        assert_eq!(config.api.base_url, "http://secondary:2");

        let untouched = apply_env_overrides(CogniConfig::default(), |_| None);
        assert_eq!(untouched.api.base_url, "http://localhost:8001");
    }
}
