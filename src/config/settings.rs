use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SESSION_FILE: &str = "cookie.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Reported as the source of a rejected command-line timeout
const TIMEOUT_FLAG: &str = "--timeout";

/// Tool behaviour that is not part of the controller or node documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Verify the controller's TLS certificate
    pub verify_tls: bool,
    /// Upper bound for every outbound request, in seconds
    pub timeout_secs: u64,
    /// Where the session attributes are written after login
    pub session_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verify_tls: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }
}

/// Command-line values that take precedence over the settings file
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub insecure: bool,
    pub timeout_secs: Option<u64>,
    pub session_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a TOML file, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        check_timeout(settings.timeout_secs, path)?;
        Ok(settings)
    }

    pub fn apply(mut self, overrides: &SettingsOverrides) -> Result<Self, ConfigError> {
        if overrides.insecure {
            self.verify_tls = false;
        }
        if let Some(secs) = overrides.timeout_secs {
            check_timeout(secs, Path::new(TIMEOUT_FLAG))?;
            self.timeout_secs = secs;
        }
        if let Some(ref file) = overrides.session_file {
            self.session_file = file.clone();
        }
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Timeouts must be at least one second
fn check_timeout(secs: u64, path: &Path) -> Result<(), ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            path: path.to_path_buf(),
            key: "timeout_secs",
            expected: "a positive number of seconds",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_verify_tls() {
        let settings = Settings::load(None).unwrap();
        assert!(settings.verify_tls);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.session_file, PathBuf::from("cookie.json"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 5").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.timeout_secs, 5);
        assert!(settings.verify_tls);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "verify = false").unwrap();

        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::default()
            .apply(&SettingsOverrides {
                insecure: true,
                timeout_secs: Some(10),
                session_file: Some(PathBuf::from("/tmp/session.json")),
            })
            .unwrap();
        assert!(!settings.verify_tls);
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.session_file, PathBuf::from("/tmp/session.json"));
    }

    #[test]
    fn test_no_overrides_is_identity() {
        let settings = Settings::default().apply(&SettingsOverrides::default()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_zero_timeout_in_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 0").unwrap();

        let err = Settings::load(Some(file.path())).unwrap_err();
        match err {
            ConfigError::InvalidValue { path, key, .. } => {
                assert_eq!(path, file.path());
                assert_eq!(key, "timeout_secs");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_zero_timeout_override_rejected() {
        let err = Settings::default()
            .apply(&SettingsOverrides {
                timeout_secs: Some(0),
                ..SettingsOverrides::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "timeout_secs",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "invalid value for 'timeout_secs' in --timeout: expected a positive number of seconds"
        );
    }
}
