use std::path::PathBuf;

use crate::domain::{ConstructionError, Host, Password, Username};

pub const HOST_ENV: &str = "EEL_HOST";
pub const USERNAME_ENV: &str = "EEL_USERNAME";
pub const PASSWORD_ENV: &str = "EEL_PASSWORD";
pub const CA_FILE_ENV: &str = "EEL_CA_FILE";

#[derive(Debug, Clone)]
/// Basic-auth credentials for the aggregator.
pub struct Credentials {
    pub username: Username,
    pub password: Password,
}

impl Credentials {
    /// Validate both parts; the user name is trimmed, the password kept as is.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConstructionError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }
}

#[derive(Debug, Clone)]
/// Where and as whom messages are submitted.
///
/// Built once by the embedding application and handed to the transport; nothing reads
/// it from global state.
pub struct Config {
    pub host: Host,
    pub credentials: Credentials,
    /// PEM-encoded certificates trusted when verifying the aggregator.
    pub trust_anchors: Vec<Vec<u8>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {name}")]
    Missing { name: &'static str },

    #[error("invalid setting: {0}")]
    Invalid(#[from] ConstructionError),

    #[error("cannot read trust anchors from {}: {source}", .path.display())]
    TrustAnchor {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Config {
    pub fn new(host: Host, credentials: Credentials) -> Self {
        Self {
            host,
            credentials,
            trust_anchors: Vec::new(),
        }
    }

    /// Add a PEM certificate (or bundle) to the trusted set.
    pub fn trust_anchor_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.trust_anchors.push(pem.into());
        self
    }

    /// Read `EEL_HOST`, `EEL_USERNAME`, `EEL_PASSWORD` and, if set, the PEM file named by
    /// `EEL_CA_FILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing { name });

        let host = Host::new(required(HOST_ENV)?)?;
        let credentials = Credentials::new(required(USERNAME_ENV)?, required(PASSWORD_ENV)?)?;
        let mut config = Self::new(host, credentials);

        if let Some(path) = lookup(CA_FILE_ENV).map(PathBuf::from) {
            let pem = std::fs::read(&path)
                .map_err(|source| ConfigError::TrustAnchor { path, source })?;
            config = config.trust_anchor_pem(pem);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(
        pairs: &[(&'static str, &'static str)],
    ) -> impl Fn(&'static str) -> Option<String> {
        let map = pairs.iter().copied().collect::<HashMap<_, _>>();
        move |name| map.get(name).map(|value| (*value).to_owned())
    }

    #[test]
    fn from_lookup_reads_required_settings() {
        let config = Config::from_lookup(lookup_from(&[
            (HOST_ENV, "mcagg-staging.net"),
            (USERNAME_ENV, "jack"),
            (PASSWORD_ENV, "password"),
        ]))
        .unwrap();
        assert_eq!(config.host.as_str(), "mcagg-staging.net");
        assert_eq!(config.credentials.username.as_str(), "jack");
        assert_eq!(config.credentials.password.as_str(), "password");
        assert!(config.trust_anchors.is_empty());
    }

    #[test]
    fn from_lookup_reports_missing_settings() {
        let err = Config::from_lookup(lookup_from(&[(HOST_ENV, "example.com")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { name: USERNAME_ENV }));
    }

    #[test]
    fn from_lookup_reports_unreadable_trust_anchors() {
        let err = Config::from_lookup(lookup_from(&[
            (HOST_ENV, "example.com"),
            (USERNAME_ENV, "jack"),
            (PASSWORD_ENV, "password"),
            (CA_FILE_ENV, "/nonexistent/eel-client/ca.pem"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::TrustAnchor { .. }));
    }

    #[test]
    fn credentials_validate_inputs() {
        assert!(Credentials::new("", "pass").is_err());
        assert!(Credentials::new("user", "").is_err());
        assert!(Credentials::new("tom", "ground control").is_ok());
    }
}
