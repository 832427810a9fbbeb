//! Unified path management for disco configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/disco/             # Config directory ($DISCO_CONFIG_DIR overrides)
//! ├── config.toml              # Questions, prompt template, model, workbook
//! ├── secret.json              # OpenAI key and GCP service account
//! └── logs/                    # Application logs
//!     └── disco.log.YYYY-MM-DD
//! ```

use disco_core::config::{OpenAIConfig, SecretConfig};
use std::path::{Path, PathBuf};

/// Environment variable that replaces the platform config directory.
pub const CONFIG_DIR_ENV: &str = "DISCO_CONFIG_DIR";

const APP_DIR_NAME: &str = "disco";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves every file disco reads or writes.
///
/// A `base` directory, when given, replaces the platform config directory
/// entirely (used by tests and by `$DISCO_CONFIG_DIR`).
#[derive(Debug, Clone, Default)]
pub struct DiscoPaths {
    base: Option<PathBuf>,
}

impl DiscoPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Uses `$DISCO_CONFIG_DIR` when set, the platform default otherwise.
    pub fn from_env() -> Self {
        let base = std::env::var_os(CONFIG_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self { base }
    }

    /// Returns the disco configuration directory (e.g., `~/.config/disco/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Ensures the secret file exists, creating a template if it doesn't.
    ///
    /// The template only carries an empty OpenAI entry; the service account
    /// key is pasted in by the user. On Unix the file is created with mode 600.
    pub fn ensure_secret_file(&self) -> Result<PathBuf, std::io::Error> {
        let secret_path = self
            .secret_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template_config = SecretConfig {
            openai: Some(OpenAIConfig {
                api_key: String::new(),
                model_name: Some(disco_core::config::DEFAULT_OPENAI_MODEL.to_string()),
            }),
            gcp_service_account: None,
        };

        let template_json = serde_json::to_string_pretty(&template_config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok(secret_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_under_base() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DiscoPaths::new(Some(temp_dir.path()));

        assert_eq!(paths.config_dir().unwrap(), temp_dir.path());
        assert_eq!(
            paths.config_file().unwrap(),
            temp_dir.path().join("config.toml")
        );
        assert_eq!(
            paths.secret_file().unwrap(),
            temp_dir.path().join("secret.json")
        );
        assert_eq!(paths.logs_dir().unwrap(), temp_dir.path().join("logs"));
    }

    #[test]
    fn test_ensure_secret_file_creates_template_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DiscoPaths::new(Some(&temp_dir.path().join("nested")));

        let created = paths.ensure_secret_file().unwrap();
        assert!(created.exists());

        let content = std::fs::read_to_string(&created).unwrap();
        let parsed: SecretConfig = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.openai.unwrap().api_key, "");
        assert!(parsed.gcp_service_account.is_none());

        std::fs::write(&created, "{}").unwrap();
        paths.ensure_secret_file().unwrap();
        assert_eq!(std::fs::read_to_string(&created).unwrap(), "{}");
    }

    #[cfg(unix)]
    #[test]
    fn test_secret_template_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let paths = DiscoPaths::new(Some(temp_dir.path()));
        let created = paths.ensure_secret_file().unwrap();

        let mode = std::fs::metadata(created).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
