//! Gateway credentials
//!
//! The bearer key for the language-model gateway never lives in
//! `config.toml`. It comes from `CODELENS_GATEWAY_API_KEY` or, failing that,
//! from `~/.config/codelens/secrets.toml`, which must be readable by its owner
//! only (mode 0600 on Unix).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Environment variable holding the gateway bearer credential
pub const GATEWAY_API_KEY_ENV: &str = "CODELENS_GATEWAY_API_KEY";

const SECRETS_TEMPLATE: &str = r#"# Codelens credentials
# Keep this file private (chmod 600); codelens refuses to read it otherwise.

[gateway]
# Bearer token for the OpenAI-compatible language-model gateway
api_key = ""
"#;

/// Contents of `secrets.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    pub gateway: GatewaySecrets,
}

/// `[gateway]` table
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewaySecrets {
    /// Bearer token for the language-model gateway
    pub api_key: Option<String>,
}

impl Secrets {
    /// Read the secrets file at its default path; absent file means no secrets
    pub fn load() -> Result<Self> {
        match Self::default_secrets_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Read a secrets file, refusing one that others can read
    pub fn load_from_file(path: &Path) -> Result<Self> {
        ensure_private(path)?;

        let raw = std::fs::read_to_string(path)?;
        let mut secrets: Secrets = toml::from_str(&raw).map_err(|e| {
            Error::Config(format!("{} is not valid TOML: {}", path.display(), e))
        })?;

        secrets.gateway.api_key = secrets
            .gateway
            .api_key
            .map(|key| key.trim().to_string());

        Ok(secrets)
    }

    /// `~/.config/codelens/secrets.toml`
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("codelens").join("secrets.toml"))
    }

    /// Resolve the gateway key; a non-blank env var beats the file
    pub fn gateway_api_key(&self) -> Option<String> {
        self.gateway_api_key_with(|key| std::env::var(key).ok())
    }

    fn gateway_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        if let Some(key) = lookup(GATEWAY_API_KEY_ENV) {
            let key = key.trim().to_string();
            if !key.is_empty() {
                debug!("Using gateway API key from {}", GATEWAY_API_KEY_ENV);
                return Some(key);
            }
        }

        match self.gateway.api_key {
            Some(ref key) if !key.is_empty() => {
                debug!("Using gateway API key from secrets file");
                Some(key.clone())
            }
            _ => None,
        }
    }

    /// Write an empty template at the default path and return that path
    pub fn create_template() -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("No config directory for secrets.toml".to_string()))?;
        Self::create_template_at(&path)?;
        Ok(path)
    }

    fn create_template_at(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(Error::Config(format!(
                "Refusing to overwrite {}",
                path.display()
            )));
        }

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, SECRETS_TEMPLATE)?;
        restrict_to_owner(path)?;

        warn!(path = %path.display(), "Wrote secrets template; add the gateway api_key");

        Ok(())
    }
}

#[cfg(unix)]
fn ensure_private(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path)?.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        return Err(Error::Config(format!(
            "{} has insecure permissions {:o}; run chmod 600 on it",
            path.display(),
            mode
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn ensure_private(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_secrets() {
        let secrets = Secrets::default();
        assert!(secrets.gateway.api_key.is_none());
        assert!(secrets.gateway_api_key_with(|_| None).is_none());
    }

    #[test]
    fn test_parse_secrets() {
        let toml = r#"
[gateway]
api_key = "sk-test"
"#;
        let secrets: Secrets = toml::from_str(toml).unwrap();
        assert_eq!(secrets.gateway.api_key, Some("sk-test".to_string()));
    }

    #[test]
    fn test_env_var_takes_priority() {
        let secrets = Secrets {
            gateway: GatewaySecrets {
                api_key: Some("from_file".to_string()),
            },
        };

        let key = secrets.gateway_api_key_with(|name| {
            (name == GATEWAY_API_KEY_ENV).then(|| " from_env ".to_string())
        });
        assert_eq!(key, Some("from_env".to_string()));

        let key = secrets.gateway_api_key_with(|_| Some("   ".to_string()));
        assert_eq!(key, Some("from_file".to_string()));
    }

    #[test]
    fn test_empty_file_key_is_missing() {
        let secrets = Secrets {
            gateway: GatewaySecrets {
                api_key: Some(String::new()),
            },
        };
        assert!(secrets.gateway_api_key_with(|_| None).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_insecure_permissions_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[gateway]\napi_key = \"test\"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o644);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let result = Secrets::load_from_file(file.path());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("insecure permissions"));
    }

    #[cfg(unix)]
    #[test]
    fn test_secure_permissions_accepted_and_trimmed() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[gateway]\napi_key = \"  sk-live  \"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let secrets = Secrets::load_from_file(file.path()).unwrap();
        assert_eq!(secrets.gateway.api_key, Some("sk-live".to_string()));
    }

    #[test]
    fn test_template_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("codelens").join("secrets.toml");

        Secrets::create_template_at(&path).unwrap();
        assert!(path.exists());

        let loaded = Secrets::load_from_file(&path).unwrap();
        assert!(loaded.gateway_api_key_with(|_| None).is_none());

        assert!(Secrets::create_template_at(&path).is_err());
    }
}
