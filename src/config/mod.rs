// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load a listener configuration from a file (YAML or JSON).
///
/// Missing fields fall back to [`ListenerConfig::default`].
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<ListenerConfig> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config = parse_config(&contents, path)?;

    config.validate()?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<ListenerConfig> {
    let ext = path.extension().and_then(|s| s.to_str());
    let config = if ext == Some("yaml") || ext == Some("yml") {
        serde_yaml::from_str(contents).context("Failed to parse YAML config")?
    } else {
        serde_json::from_str(contents).context("Failed to parse JSON config")?
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_yaml_partial_uses_defaults() {
        let file = write_temp(".yaml", "port: 9090\n");

        let config = load_config(file.path()).await.unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.backlog, DEFAULT_BACKLOG);
        assert_eq!(config.family, AddressFamily::Ipv4);
    }

    #[tokio::test]
    async fn test_load_json() {
        let file = write_temp(
            ".json",
            r#"{"family":"ipv4","bind_address":"127.0.0.1","port":0,"backlog":32}"#,
        );

        let config = load_config(file.path()).await.unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:0");
        assert_eq!(config.backlog, 32);
    }

    #[tokio::test]
    async fn test_load_rejects_invalid() {
        let file = write_temp(".yml", "backlog: 0\n");

        let err = load_config(file.path()).await.unwrap_err();

        assert!(err.to_string().contains("backlog must be at least 1"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_config("/definitely/not/here.yaml").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
