//! Server settings resolved from the environment and command-line flags.
//!
//! Environment access goes through [`mockable::Env`] so parsing can be tested
//! without mutating the process environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use mockable::Env;

/// Listen port.
pub const PORT_ENV: &str = "PORT";
/// Listen address.
pub const HOST_ENV: &str = "LMIS_BIND_HOST";
/// Learner snapshot file; persistence is disabled when unset.
pub const LEARNERS_FILE_ENV: &str = "LMIS_LEARNERS_FILE";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Errors raised while resolving [`ServerSettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A variable was set to a value that could not be parsed.
    #[error("{name} must be {expected}, got {value:?}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// A path variable or flag was present but blank.
    #[error("{name} must not be blank")]
    BlankPath { name: &'static str },
}

/// Values supplied on the command line; each one beats its environment
/// counterpart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub learners_file: Option<PathBuf>,
}

/// Resolved listener and persistence settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    pub learners_file: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            learners_file: None,
        }
    }
}

impl ServerSettings {
    /// Read settings from `env`, applying defaults for unset variables.
    ///
    /// # Examples
    /// ```
    /// use lmis_backend::settings::ServerSettings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "PORT" => Some("8080".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = ServerSettings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.port, 8080);
    /// assert!(settings.learners_file.is_none());
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, SettingsError> {
        let port = match env.string(PORT_ENV) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| SettingsError::InvalidEnv {
                    name: PORT_ENV,
                    value,
                    expected: "a port number between 0 and 65535",
                })?,
            None => DEFAULT_PORT,
        };
        let host = match env.string(HOST_ENV) {
            Some(value) => value
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| SettingsError::InvalidEnv {
                    name: HOST_ENV,
                    value,
                    expected: "an IPv4 or IPv6 address",
                })?,
            None => DEFAULT_HOST,
        };
        let learners_file = env
            .string(LEARNERS_FILE_ENV)
            .map(|value| non_blank_path(LEARNERS_FILE_ENV, value))
            .transpose()?;

        Ok(Self {
            host,
            port,
            learners_file,
        })
    }

    /// Replace any setting that has a command-line value.
    pub fn with_overrides(self, overrides: SettingsOverrides) -> Result<Self, SettingsError> {
        let learners_file = match overrides.learners_file {
            Some(path) if path.as_os_str().is_empty() => {
                return Err(SettingsError::BlankPath {
                    name: "--learners-file",
                });
            }
            Some(path) => Some(path),
            None => self.learners_file,
        };
        Ok(Self {
            host: overrides.host.unwrap_or(self.host),
            port: overrides.port.unwrap_or(self.port),
            learners_file,
        })
    }

    /// Socket address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_blank_path(name: &'static str, value: String) -> Result<PathBuf, SettingsError> {
    if value.trim().is_empty() {
        Err(SettingsError::BlankPath { name })
    } else {
        Ok(PathBuf::from(value))
    }
}
