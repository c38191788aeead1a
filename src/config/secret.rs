//! Credential wrapper for configuration values
//!
//! Connection strings carry passwords, so they are kept in a
//! [`SecretString`]: zeroed on drop, redacted in `Debug`, and only readable
//! through `expose_secret()`.
//!
//! ```rust
//! use polyclinic::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let url = secret_string("postgresql://clinic:pw@localhost/clinic".to_string());
//! assert!(url.expose_secret().starts_with("postgresql://"));
//! assert!(!format!("{url:?}").contains("pw@"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String newtype satisfying the `secrecy` marker traits
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

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
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

/// Secret string used for credentials in configuration
pub type SecretString = Secret<SecretValue>;

/// Wraps `value` in a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
