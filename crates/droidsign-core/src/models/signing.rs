//! Release-signing credential models.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Signing Credentials
// ============================================================================

/// Release signing credentials for an Android build.
///
/// Every field is optional: a record resolved from an incomplete
/// key.properties file carries `None` fields and only fails when the
/// credentials are actually consumed, not at resolution time. All populated
/// fields of one record come from the same source.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SigningCredentials {
    /// Path to the keystore file.
    #[zeroize(skip)]
    pub store_file: Option<PathBuf>,
    /// Keystore password.
    pub store_password: Option<String>,
    /// Alias of the signing key inside the keystore.
    #[zeroize(skip)]
    pub key_alias: Option<String>,
    /// Password of the signing key.
    pub key_password: Option<String>,
}

impl SigningCredentials {
    /// Returns all four values when the record is complete.
    pub fn as_complete(&self) -> Option<(&Path, &str, &str, &str)> {
        Some((
            self.store_file.as_deref()?,
            self.store_password.as_deref()?,
            self.key_alias.as_deref()?,
            self.key_password.as_deref()?,
        ))
    }

    /// Returns true if all four fields are set.
    pub fn is_complete(&self) -> bool {
        self.as_complete().is_some()
    }

    /// Names of the unset fields, in key.properties vocabulary.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.store_file.is_none() {
            missing.push("storeFile");
        }
        if self.store_password.is_none() {
            missing.push("storePassword");
        }
        if self.key_alias.is_none() {
            missing.push("keyAlias");
        }
        if self.key_password.is_none() {
            missing.push("keyPassword");
        }
        missing
    }
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredentials")
            .field("store_file", &self.store_file)
            .field("store_password", &self.store_password.as_ref().map(|_| "********"))
            .field("key_alias", &self.key_alias)
            .field("key_password", &self.key_password.as_ref().map(|_| "********"))
            .finish()
    }
}

// ============================================================================
// Credential Source
// ============================================================================

/// Source a signing credential record was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    /// All four values supplied as external build properties.
    External,
    /// Values read from the key.properties file.
    PropertiesFile,
}

impl CredentialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialSource::External => "external",
            CredentialSource::PropertiesFile => "properties_file",
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CredentialSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "external" => Ok(CredentialSource::External),
            "properties_file" => Ok(CredentialSource::PropertiesFile),
            _ => Err(format!("Unknown credential source: {}", s)),
        }
    }
}

/// Result of signing credential resolution.
#[derive(Debug, Clone)]
pub struct ResolvedSigning {
    /// The resolved credential record.
    pub credentials: SigningCredentials,
    /// Where the credentials were loaded from.
    pub source: CredentialSource,
}

// ============================================================================
// Signing Report
// ============================================================================

/// Signing configuration view with secrets stripped (safe to serialize).
#[derive(Debug, Clone, Serialize)]
pub struct SigningReport {
    pub source: CredentialSource,
    pub store_file: Option<String>,
    pub key_alias: Option<String>,
    pub has_store_password: bool,
    pub has_key_password: bool,
    pub complete: bool,
}

impl From<&ResolvedSigning> for SigningReport {
    fn from(resolved: &ResolvedSigning) -> Self {
        let credentials = &resolved.credentials;
        Self {
            source: resolved.source,
            store_file: credentials
                .store_file
                .as_ref()
                .map(|p| p.display().to_string()),
            key_alias: credentials.key_alias.clone(),
            has_store_password: credentials.store_password.is_some(),
            has_key_password: credentials.key_password.is_some(),
            complete: credentials.is_complete(),
        }
    }
}

// ============================================================================
// Keystore Type
// ============================================================================

/// Android keystore container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeystoreType {
    Jks,
    Pkcs12,
}

impl KeystoreType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeystoreType::Jks => "jks",
            KeystoreType::Pkcs12 => "pkcs12",
        }
    }
}

impl fmt::Display for KeystoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for KeystoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jks" => Ok(KeystoreType::Jks),
            "pkcs12" => Ok(KeystoreType::Pkcs12),
            _ => Err(format!("Unknown keystore type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_empty_record() {
        let credentials = SigningCredentials::default();
        assert_eq!(
            credentials.missing_fields(),
            vec!["storeFile", "storePassword", "keyAlias", "keyPassword"]
        );
        assert!(!credentials.is_complete());
    }

    #[test]
    fn test_complete_record() {
        let credentials = SigningCredentials {
            store_file: Some(PathBuf::from("release.jks")),
            store_password: Some("abc".to_string()),
            key_alias: Some("key0".to_string()),
            key_password: Some("xyz".to_string()),
        };
        assert!(credentials.is_complete());
        let (store_file, store_password, key_alias, key_password) =
            credentials.as_complete().unwrap();
        assert_eq!(store_file, Path::new("release.jks"));
        assert_eq!(store_password, "abc");
        assert_eq!(key_alias, "key0");
        assert_eq!(key_password, "xyz");
    }

    #[test]
    fn test_debug_masks_passwords() {
        let credentials = SigningCredentials {
            store_file: Some(PathBuf::from("release.jks")),
            store_password: Some("hunter2".to_string()),
            key_alias: Some("key0".to_string()),
            key_password: Some("hunter3".to_string()),
        };
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("hunter3"));
        assert!(rendered.contains("release.jks"));
        assert!(rendered.contains("key0"));
    }

    #[test]
    fn test_credential_source_round_trip() {
        for source in [CredentialSource::External, CredentialSource::PropertiesFile] {
            assert_eq!(source.as_str().parse::<CredentialSource>(), Ok(source));
        }
    }

    #[test]
    fn test_report_has_no_secrets() {
        let resolved = ResolvedSigning {
            credentials: SigningCredentials {
                store_file: Some(PathBuf::from("release.jks")),
                store_password: Some("hunter2".to_string()),
                key_alias: Some("key0".to_string()),
                key_password: None,
            },
            source: CredentialSource::PropertiesFile,
        };
        let report = SigningReport::from(&resolved);
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("\"source\":\"properties_file\""));
        assert!(json.contains("\"has_store_password\":true"));
        assert!(json.contains("\"has_key_password\":false"));
        assert!(json.contains("\"complete\":false"));
    }

    #[test]
    fn test_keystore_type_round_trip() {
        for keystore_type in [KeystoreType::Jks, KeystoreType::Pkcs12] {
            assert_eq!(keystore_type.as_str().parse::<KeystoreType>(), Ok(keystore_type));
        }
    }
}
