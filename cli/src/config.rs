// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use nimbus_dav::DavConfig;
use tokio::fs;

use crate::APP_NAME;

const NIMBUS_CONFIG_ENV: &str = "NIMBUS_CONFIG";

/// Loads the server configuration.
///
/// The file is taken from `path`, then from the `NIMBUS_CONFIG` environment
/// variable, then from the user's config directory.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<DavConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(NIMBUS_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| a.dav)
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    dav: DavConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_dav::AuthMethod;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[dav]
base_url = "https://cloud.example.com"
files_home = "/remote.php/dav/files/alice/"
uploads_home = "/remote.php/dav/uploads/alice/"
chunk_size = 5242880

[dav.auth]
type = "basic"
username = "alice"
password = "app-password"
"#;

    #[test]
    fn parses_dav_table() {
        let raw: ConfigRaw = CONFIG.parse().unwrap();
        assert_eq!(raw.dav.base_url, "https://cloud.example.com");
        assert_eq!(raw.dav.chunk_size, 5 * 1024 * 1024);
        assert_eq!(raw.dav.timeout_secs, 30);
        assert!(matches!(raw.dav.auth, AuthMethod::Basic { .. }));
    }

    #[test]
    fn rejects_missing_dav_table() {
        assert!("[other]\nkey = 1\n".parse::<ConfigRaw>().is_err());
    }

    #[tokio::test]
    async fn cli_flag_path_is_used() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, CONFIG).unwrap();

        let config = parse_config(Some(config_path)).await.unwrap();
        assert_eq!(config.uploads_home, "/remote.php/dav/uploads/alice/");
    }

    #[tokio::test]
    async fn missing_config_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let err = parse_config(Some(temp_dir.path().join("nope.toml")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
