use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rand::Rng;

use crate::domain::validation::ConstructionError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Aggregator host name (for example `mcagg-staging.net`).
///
/// Invariant: non-empty after trimming, no scheme. Requests always go to `https://{host}`.
pub struct Host(String);

impl Host {
    /// Setting name used in configuration (`host`).
    pub const FIELD: &'static str = "host";

    /// Create a validated [`Host`].
    pub fn new(value: impl Into<String>) -> Result<Self, ConstructionError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConstructionError::Empty { field: Self::FIELD });
        }
        if trimmed.contains("://") {
            return Err(ConstructionError::InvalidHost {
                value: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated host.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Basic-auth user name for the aggregator.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Setting name used in configuration (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ConstructionError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConstructionError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated user name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Basic-auth password for the aggregator.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Setting name used in configuration (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ConstructionError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ConstructionError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Network carrier of the destination handset, as named by the aggregator.
pub enum CarrierId {
    Att,
    Tmobile,
    Verizon,
    Sprint,
    Nextel,
    Alltel,
    Metropcs,
    Rural,
    Uscellular,
    Westcentral,
    Ntelos,
    Bluegrass,
    Centennial,
    Cincinnatibell,
    Cellularsouth,
    Boost,
    Cricket,
    Immix,
    Cellcom,
    Virgin,
    Cellularoneillinois,
    Gcialaska,
    Unknown,
}

impl CarrierId {
    /// Every carrier the aggregator accepts, in its documented order.
    pub const ALL: [CarrierId; 23] = [
        Self::Att,
        Self::Tmobile,
        Self::Verizon,
        Self::Sprint,
        Self::Nextel,
        Self::Alltel,
        Self::Metropcs,
        Self::Rural,
        Self::Uscellular,
        Self::Westcentral,
        Self::Ntelos,
        Self::Bluegrass,
        Self::Centennial,
        Self::Cincinnatibell,
        Self::Cellularsouth,
        Self::Boost,
        Self::Cricket,
        Self::Immix,
        Self::Cellcom,
        Self::Virgin,
        Self::Cellularoneillinois,
        Self::Gcialaska,
        Self::Unknown,
    ];

    /// Wire name of the carrier (`Att`, `Tmobile`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Att => "Att",
            Self::Tmobile => "Tmobile",
            Self::Verizon => "Verizon",
            Self::Sprint => "Sprint",
            Self::Nextel => "Nextel",
            Self::Alltel => "Alltel",
            Self::Metropcs => "Metropcs",
            Self::Rural => "Rural",
            Self::Uscellular => "Uscellular",
            Self::Westcentral => "Westcentral",
            Self::Ntelos => "Ntelos",
            Self::Bluegrass => "Bluegrass",
            Self::Centennial => "Centennial",
            Self::Cincinnatibell => "Cincinnatibell",
            Self::Cellularsouth => "Cellularsouth",
            Self::Boost => "Boost",
            Self::Cricket => "Cricket",
            Self::Immix => "Immix",
            Self::Cellcom => "Cellcom",
            Self::Virgin => "Virgin",
            Self::Cellularoneillinois => "Cellularoneillinois",
            Self::Gcialaska => "Gcialaska",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CarrierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarrierId {
    type Err = ConstructionError;

    /// Wire names are matched exactly; `att` is not `Att`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|carrier| carrier.as_str() == s)
            .ok_or_else(|| ConstructionError::UnknownCarrier {
                value: s.to_owned(),
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// How the `client_message_id` of a new message is chosen.
///
/// Leaving it unspecified is not the same as clearing it: [`ClientMessageId::Generate`]
/// produces a time-based id, while [`ClientMessageId::Nil`] keeps the field empty
/// (and the message will fail validation).
pub enum ClientMessageId {
    #[default]
    Generate,
    Nil,
    Value(String),
}

impl ClientMessageId {
    pub(crate) fn resolve(self) -> Option<String> {
        match self {
            Self::Generate => Some(generate_client_message_id()),
            Self::Nil => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl From<String> for ClientMessageId {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for ClientMessageId {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

impl From<u64> for ClientMessageId {
    fn from(value: u64) -> Self {
        Self::Value(value.to_string())
    }
}

/// Unix seconds plus a random fraction, e.g. `1700000000.123456789`.
fn generate_client_message_id() -> String {
    let seconds = Utc::now().timestamp();
    let fraction = rand::thread_rng().gen_range(0..1_000_000_000u32);
    format!("{seconds}.{fraction:09}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_carrier_round_trips_through_its_wire_name() {
        for carrier in CarrierId::ALL {
            assert_eq!(carrier.as_str().parse::<CarrierId>().unwrap(), carrier);
        }
    }

    #[test]
    fn carrier_lookup_is_case_sensitive() {
        assert!(matches!(
            "att".parse::<CarrierId>(),
            Err(ConstructionError::UnknownCarrier { .. })
        ));
    }

    #[test]
    fn host_rejects_empty_and_schemes() {
        assert!(matches!(
            Host::new("  "),
            Err(ConstructionError::Empty { field: Host::FIELD })
        ));
        assert!(matches!(
            Host::new("https://example.com"),
            Err(ConstructionError::InvalidHost { .. })
        ));
        assert_eq!(Host::new(" example.com ").unwrap().as_str(), "example.com");
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("ground control").unwrap();
        assert_eq!(format!("{password:?}"), "Password(..)");
    }

    #[test]
    fn generated_client_message_ids_differ() {
        let first = ClientMessageId::Generate.resolve().unwrap();
        let second = ClientMessageId::Generate.resolve().unwrap();
        assert_ne!(first, second);
        assert!(first.contains('.'));
    }

    #[test]
    fn explicit_nil_client_message_id_stays_empty() {
        assert_eq!(ClientMessageId::Nil.resolve(), None);
        assert_eq!(
            ClientMessageId::from(12345u64).resolve().as_deref(),
            Some("12345")
        );
    }
}
