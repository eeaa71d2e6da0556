//! Keystore inspection for resolved signing credentials.
//!
//! This is where deferred credential gaps become fatal: a record that
//! resolved with unset fields fails here, when the keystore is opened.

use std::fs;

use crate::error::{DroidsignError, Result};
use crate::models::{KeystoreType, SigningCredentials};

/// Information extracted from a keystore file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystoreInfo {
    /// Container format of the keystore.
    pub keystore_type: KeystoreType,
    /// Size of the keystore file in bytes.
    pub size_bytes: u64,
}

/// Detects the keystore type from its magic bytes.
pub fn detect_keystore_type(data: &[u8]) -> KeystoreType {
    // JKS files start with magic bytes 0xFEEDFEED; PKCS12 is ASN.1 (0x30)
    if data.len() >= 4 && data[..4] == [0xFE, 0xED, 0xFE, 0xED] {
        return KeystoreType::Jks;
    }
    KeystoreType::Pkcs12
}

/// Opens the keystore a credential record points at.
///
/// Fails if the record is incomplete or the keystore file cannot be read.
pub fn inspect(credentials: &SigningCredentials) -> Result<KeystoreInfo> {
    let Some((store_file, _, _, _)) = credentials.as_complete() else {
        return Err(DroidsignError::Signing(format!(
            "Release signing config is incomplete: missing {}",
            credentials.missing_fields().join(", ")
        )));
    };

    if !store_file.exists() {
        return Err(DroidsignError::Signing(format!(
            "Keystore file not found: {}",
            store_file.display()
        )));
    }

    let data = fs::read(store_file).map_err(|e| {
        DroidsignError::Signing(format!(
            "Failed to read keystore {}: {}",
            store_file.display(),
            e
        ))
    })?;

    Ok(KeystoreInfo {
        keystore_type: detect_keystore_type(&data),
        size_bytes: data.len() as u64,
    })
}
