//! Configuration module
//!
//! Settings for the attachment hook and its upload client, loaded from the
//! environment (and an optional `.env` file).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AttachError, AttachResult};

/// Title of the feature-flag entry that enables external attachments.
pub const DEFAULT_ENABLE_TITLE: &str = "$:/config/HTTPAttachments/Enable";

/// How a file name is turned into the upload path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMode {
    /// Percent-encode the file name as a single path segment.
    #[default]
    Encoded,
    /// Append the file name to `/` untouched.
    Verbatim,
}

impl FromStr for PathMode {
    type Err = AttachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "encoded" => Ok(PathMode::Encoded),
            "verbatim" => Ok(PathMode::Verbatim),
            other => Err(AttachError::Config(format!(
                "Unknown path mode '{}', expected 'encoded' or 'verbatim'",
                other
            ))),
        }
    }
}

/// Attachment hook configuration
#[derive(Clone, Debug)]
pub struct AttachConfig {
    /// Title of the config entry whose text must be exactly `yes`
    pub enable_title: String,
    pub user_agent: String,
    /// `None` means the upload waits for the server indefinitely
    pub upload_timeout: Option<Duration>,
    pub path_mode: PathMode,
}

impl Default for AttachConfig {
    fn default() -> Self {
        Self {
            enable_title: DEFAULT_ENABLE_TITLE.to_string(),
            user_agent: default_user_agent(),
            upload_timeout: None,
            path_mode: PathMode::default(),
        }
    }
}

fn default_user_agent() -> String {
    format!("httpattach/{}", env!("CARGO_PKG_VERSION"))
}

impl AttachConfig {
    pub fn from_env() -> AttachResult<Self> {
        dotenvy::dotenv().ok();

        let enable_title = env::var("HTTP_ATTACHMENTS_ENABLE_TITLE")
            .unwrap_or_else(|_| DEFAULT_ENABLE_TITLE.to_string());

        let user_agent =
            env::var("HTTP_ATTACHMENTS_USER_AGENT").unwrap_or_else(|_| default_user_agent());

        let upload_timeout = match env::var("HTTP_ATTACHMENTS_UPLOAD_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|_| {
                AttachError::Config(
                    "HTTP_ATTACHMENTS_UPLOAD_TIMEOUT_SECS must be a valid number".to_string(),
                )
            })?)),
            Err(_) => None,
        };

        let path_mode = match env::var("HTTP_ATTACHMENTS_PATH_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => PathMode::default(),
        };

        let config = Self {
            enable_title,
            user_agent,
            upload_timeout,
            path_mode,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AttachResult<()> {
        if self.enable_title.is_empty() {
            return Err(AttachError::Config(
                "HTTP_ATTACHMENTS_ENABLE_TITLE cannot be empty".to_string(),
            ));
        }
        if self.upload_timeout == Some(Duration::ZERO) {
            return Err(AttachError::Config(
                "HTTP_ATTACHMENTS_UPLOAD_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "HTTP_ATTACHMENTS_ENABLE_TITLE",
        "HTTP_ATTACHMENTS_USER_AGENT",
        "HTTP_ATTACHMENTS_UPLOAD_TIMEOUT_SECS",
        "HTTP_ATTACHMENTS_PATH_MODE",
    ];

    fn with_env(vars: &[(&str, &str)]) -> AttachResult<AttachConfig> {
        for key in VARS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let config = AttachConfig::from_env();
        for key in VARS {
            env::remove_var(key);
        }
        config
    }

    #[test]
    fn default_config_is_valid() {
        let config = AttachConfig::default();
        assert_eq!(config.enable_title, "$:/config/HTTPAttachments/Enable");
        assert!(config.upload_timeout.is_none());
        assert_eq!(config.path_mode, PathMode::Encoded);
        assert!(config.user_agent.starts_with("httpattach/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_enable_title_is_rejected() {
        let config = AttachConfig {
            enable_title: String::new(),
            ..AttachConfig::default()
        };
        assert!(matches!(config.validate(), Err(AttachError::Config(_))));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = AttachConfig {
            upload_timeout: Some(Duration::ZERO),
            ..AttachConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn path_mode_parses_case_insensitively() {
        assert_eq!("Verbatim".parse::<PathMode>().unwrap(), PathMode::Verbatim);
        assert_eq!(" encoded ".parse::<PathMode>().unwrap(), PathMode::Encoded);
        assert!("raw".parse::<PathMode>().is_err());
    }

    #[test]
    #[serial]
    fn from_env_uses_defaults_when_unset() {
        let config = with_env(&[]).unwrap();
        assert_eq!(config.enable_title, DEFAULT_ENABLE_TITLE);
        assert_eq!(config.upload_timeout, None);
        assert_eq!(config.path_mode, PathMode::Encoded);
    }

    #[test]
    #[serial]
    fn from_env_reads_overrides() {
        let config = with_env(&[
            ("HTTP_ATTACHMENTS_ENABLE_TITLE", "$:/config/Uploads"),
            ("HTTP_ATTACHMENTS_USER_AGENT", "wiki-host/2.0"),
            ("HTTP_ATTACHMENTS_UPLOAD_TIMEOUT_SECS", "30"),
            ("HTTP_ATTACHMENTS_PATH_MODE", "verbatim"),
        ])
        .unwrap();

        assert_eq!(config.enable_title, "$:/config/Uploads");
        assert_eq!(config.user_agent, "wiki-host/2.0");
        assert_eq!(config.upload_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.path_mode, PathMode::Verbatim);
    }

    #[test]
    #[serial]
    fn from_env_rejects_bad_timeouts() {
        for raw in ["soon", "-5", "0"] {
            let result = with_env(&[("HTTP_ATTACHMENTS_UPLOAD_TIMEOUT_SECS", raw)]);
            assert!(
                matches!(result, Err(AttachError::Config(_))),
                "timeout {raw:?}"
            );
        }
    }

    #[test]
    #[serial]
    fn from_env_rejects_unknown_path_mode_and_empty_title() {
        assert!(with_env(&[("HTTP_ATTACHMENTS_PATH_MODE", "raw")]).is_err());
        assert!(with_env(&[("HTTP_ATTACHMENTS_ENABLE_TITLE", "")]).is_err());
    }
}
