//! Credential handling for sink connection settings
//!
//! Connection strings embed passwords, so they are held in a
//! [`secrecy::Secret`] that zeroes memory on drop and redacts `Debug` output.
//!
//! # Example
//!
//! ```rust
//! use lead_router::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let dsn = secret_string("postgresql://router:pw@db:5432/leads".to_string());
//! assert!(dsn.expose_secret().starts_with("postgresql://"));
//! assert!(!format!("{dsn:?}").contains("pw@"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String payload stored inside a [`SecretString`]
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the secret value starts with a prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Returns a connection string with its credentials removed
    ///
    /// Everything up to the last `@` is replaced by `scheme://***@`.
    pub fn redacted_dsn(&self) -> String {
        let scheme = self.0.split("://").next().unwrap_or("postgresql");
        match self.0.rsplit_once('@') {
            Some((_, host)) => format!("{scheme}://***@{host}"),
            None => format!("{scheme}://***"),
        }
    }

    /// Parse the secret value into another type
    pub fn parse<F: std::str::FromStr>(&self) -> Result<F, F::Err> {
        self.0.parse()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string: zeroed on drop, redacted in `Debug`, explicit to read
pub type SecretString = Secret<SecretValue>;

/// Wraps a plain string into a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("postgresql://a:b@host/db".to_string());
        assert_eq!(secret.expose_secret(), "postgresql://a:b@host/db");
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("postgresql://router:hunter2@db/leads".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_redacted_dsn() {
        let secret = secret_string("postgresql://router:hunter2@db:5432/leads".to_string());
        assert_eq!(
            secret.expose_secret().redacted_dsn(),
            "postgresql://***@db:5432/leads"
        );

        let no_credentials = secret_string("postgres://db:5432/leads".to_string());
        assert_eq!(
            no_credentials.expose_secret().redacted_dsn(),
            "postgres://***"
        );
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Section {
            connection_string: SecretString,
        }

        let section: Section =
            toml::from_str("connection_string = \"postgresql://x:y@h/d\"").unwrap();
        assert!(section
            .connection_string
            .expose_secret()
            .starts_with("postgresql://"));
    }
}
