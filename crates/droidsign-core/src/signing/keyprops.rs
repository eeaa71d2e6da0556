//! key.properties generation for Flutter/Gradle release builds.
//!
//! The key.properties file is read by the Gradle build script to configure
//! signing for release builds.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DroidsignError, Result};
use crate::models::SigningCredentials;
use crate::properties::escape;

use super::resolver::KEY_PROPERTIES_FILE;

/// Renders the key.properties body for a complete credential record.
///
/// Values are escaped so the output parses back to the same properties.
pub fn generate_key_properties(credentials: &SigningCredentials) -> Result<String> {
    let Some((store_file, store_password, key_alias, key_password)) = credentials.as_complete()
    else {
        return Err(DroidsignError::Signing(format!(
            "Cannot generate key.properties from incomplete credentials: missing {}",
            credentials.missing_fields().join(", ")
        )));
    };

    Ok(format!(
        "storePassword={}\n\
         keyPassword={}\n\
         keyAlias={}\n\
         storeFile={}\n",
        escape(store_password),
        escape(key_password),
        escape(key_alias),
        escape(&store_file.display().to_string())
    ))
}

/// Writes the key.properties file into the android directory.
pub fn write_key_properties(
    android_dir: &Path,
    credentials: &SigningCredentials,
) -> Result<PathBuf> {
    if !android_dir.is_dir() {
        return Err(DroidsignError::Configuration(format!(
            "Android directory not found: {}",
            android_dir.display()
        )));
    }

    let path = android_dir.join(KEY_PROPERTIES_FILE);
    let content = generate_key_properties(credentials)?;

    fs::write(&path, content)
        .map_err(|e| DroidsignError::Signing(format!("Failed to write key.properties: {}", e)))?;

    tracing::debug!("Wrote key.properties to {}", path.display());

    Ok(path)
}

/// Removes the key.properties file from the android directory.
pub fn cleanup_key_properties(android_dir: &Path) -> Result<()> {
    let path = android_dir.join(KEY_PROPERTIES_FILE);

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            DroidsignError::Signing(format!("Failed to remove key.properties: {}", e))
        })?;
        tracing::debug!("Removed key.properties from {}", path.display());
    }

    Ok(())
}
