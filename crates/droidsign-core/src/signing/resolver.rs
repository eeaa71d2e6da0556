//! Release-signing credential resolution.
//!
//! Resolves signing credentials from either:
//! 1. External build properties (takes precedence)
//! 2. The key.properties file in the android directory (fallback)

use std::path::{Path, PathBuf};

use crate::error::{DroidsignError, Result};
use crate::models::{CredentialSource, ResolvedSigning, SigningCredentials};
use crate::properties::Properties;

/// External build property that selects the external credential source.
pub const EXTERNAL_STORE_FILE: &str = "MYAPP_RELEASE_STORE_FILE";
/// External build property holding the keystore password.
pub const EXTERNAL_STORE_PASSWORD: &str = "MYAPP_RELEASE_STORE_PASSWORD";
/// External build property holding the key alias.
pub const EXTERNAL_KEY_ALIAS: &str = "MYAPP_RELEASE_KEY_ALIAS";
/// External build property holding the key password.
pub const EXTERNAL_KEY_PASSWORD: &str = "MYAPP_RELEASE_KEY_PASSWORD";

/// key.properties key for the keystore path.
pub const PROP_STORE_FILE: &str = "storeFile";
/// key.properties key for the keystore password.
pub const PROP_STORE_PASSWORD: &str = "storePassword";
/// key.properties key for the key alias.
pub const PROP_KEY_ALIAS: &str = "keyAlias";
/// key.properties key for the key password.
pub const PROP_KEY_PASSWORD: &str = "keyPassword";

/// File name of the signing properties file inside the android directory.
pub const KEY_PROPERTIES_FILE: &str = "key.properties";

/// Returns the key.properties path for an android directory.
pub fn key_properties_path(android_dir: &Path) -> PathBuf {
    android_dir.join(KEY_PROPERTIES_FILE)
}

/// Resolves release signing credentials for a build.
///
/// If the external properties contain MYAPP_RELEASE_STORE_FILE, all four
/// values come from there; any of the other three missing is a fatal
/// configuration error, and the properties file is never consulted.
/// Otherwise the credentials come from `props_file`, where missing or
/// unreadable data yields unset fields rather than an error. Those gaps
/// surface later, when the credentials are consumed.
///
/// Credentials are recomputed from source on every call; nothing is cached.
pub fn resolve(external_props: &Properties, props_file: &Path) -> Result<ResolvedSigning> {
    if external_props.contains_key(EXTERNAL_STORE_FILE) {
        let credentials = resolve_external(external_props)?;
        tracing::debug!("Resolved signing credentials from external build properties");
        return Ok(ResolvedSigning {
            credentials,
            source: CredentialSource::External,
        });
    }

    let file_props = Properties::load(props_file);
    let credentials = SigningCredentials {
        store_file: file_props.get(PROP_STORE_FILE).map(PathBuf::from),
        store_password: file_props.get(PROP_STORE_PASSWORD).map(str::to_string),
        key_alias: file_props.get(PROP_KEY_ALIAS).map(str::to_string),
        key_password: file_props.get(PROP_KEY_PASSWORD).map(str::to_string),
    };
    tracing::debug!(
        "Resolved signing credentials from {}",
        props_file.display()
    );
    Ok(ResolvedSigning {
        credentials,
        source: CredentialSource::PropertiesFile,
    })
}

/// Resolves signing credentials using the default key.properties location
/// inside the android directory.
pub fn resolve_for_project(
    external_props: &Properties,
    android_dir: &Path,
) -> Result<ResolvedSigning> {
    resolve(external_props, &key_properties_path(android_dir))
}

/// Reads all four external properties; the trigger key is known to exist.
fn resolve_external(props: &Properties) -> Result<SigningCredentials> {
    Ok(SigningCredentials {
        store_file: Some(PathBuf::from(require(props, EXTERNAL_STORE_FILE)?)),
        store_password: Some(require(props, EXTERNAL_STORE_PASSWORD)?.to_string()),
        key_alias: Some(require(props, EXTERNAL_KEY_ALIAS)?.to_string()),
        key_password: Some(require(props, EXTERNAL_KEY_PASSWORD)?.to_string()),
    })
}

fn require<'a>(props: &'a Properties, key: &'static str) -> Result<&'a str> {
    props
        .get(key)
        .ok_or(DroidsignError::MissingProperty { key })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_external() -> Properties {
        [
            (EXTERNAL_STORE_FILE, "a.jks"),
            (EXTERNAL_STORE_PASSWORD, "p"),
            (EXTERNAL_KEY_ALIAS, "k"),
            (EXTERNAL_KEY_PASSWORD, "q"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_external_properties_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let props_file = dir.path().join(KEY_PROPERTIES_FILE);
        std::fs::write(&props_file, "storeFile=file.jks\nstorePassword=other\n").unwrap();

        let resolved = resolve(&full_external(), &props_file).unwrap();
        assert_eq!(resolved.source, CredentialSource::External);
        assert_eq!(resolved.credentials.store_file.as_deref(), Some(Path::new("a.jks")));
        assert_eq!(resolved.credentials.store_password.as_deref(), Some("p"));
        assert_eq!(resolved.credentials.key_alias.as_deref(), Some("k"));
        assert_eq!(resolved.credentials.key_password.as_deref(), Some("q"));
    }

    #[test]
    fn test_external_properties_with_absent_file() {
        // The file is never consulted, so a nonexistent path is fine
        let resolved = resolve(&full_external(), Path::new("/nonexistent/key.properties")).unwrap();
        assert_eq!(resolved.source, CredentialSource::External);
        assert!(resolved.credentials.is_complete());
    }

    #[test]
    fn test_missing_external_field_is_fatal() {
        for dropped in [
            EXTERNAL_STORE_PASSWORD,
            EXTERNAL_KEY_ALIAS,
            EXTERNAL_KEY_PASSWORD,
        ] {
            let props: Properties = full_external()
                .iter()
                .filter(|(k, _)| *k != dropped)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();

            let err = resolve(&props, Path::new("unused")).unwrap_err();
            match err {
                DroidsignError::MissingProperty { key } => assert_eq!(key, dropped),
                other => panic!("Expected MissingProperty, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_file_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let props_file = dir.path().join(KEY_PROPERTIES_FILE);
        std::fs::write(
            &props_file,
            "storeFile=release.jks\nstorePassword=abc\nkeyAlias=key0\nkeyPassword=xyz\n",
        )
        .unwrap();

        let resolved = resolve(&Properties::new(), &props_file).unwrap();
        assert_eq!(resolved.source, CredentialSource::PropertiesFile);
        assert_eq!(
            resolved.credentials.store_file.as_deref(),
            Some(Path::new("release.jks"))
        );
        assert_eq!(resolved.credentials.store_password.as_deref(), Some("abc"));
        assert_eq!(resolved.credentials.key_alias.as_deref(), Some("key0"));
        assert_eq!(resolved.credentials.key_password.as_deref(), Some("xyz"));
    }

    #[test]
    fn test_incomplete_file_leaves_fields_unset() {
        let dir = tempfile::tempdir().unwrap();
        let props_file = dir.path().join(KEY_PROPERTIES_FILE);
        std::fs::write(&props_file, "storeFile=release.jks\nkeyAlias=key0\n").unwrap();

        let resolved = resolve(&Properties::new(), &props_file).unwrap();
        assert_eq!(resolved.source, CredentialSource::PropertiesFile);
        assert!(!resolved.credentials.is_complete());
        assert_eq!(
            resolved.credentials.missing_fields(),
            vec!["storePassword", "keyPassword"]
        );
    }

    #[test]
    fn test_missing_file_resolves_to_empty_record() {
        let dir = tempfile::tempdir().unwrap();
        let resolved =
            resolve(&Properties::new(), &dir.path().join(KEY_PROPERTIES_FILE)).unwrap();
        assert_eq!(resolved.source, CredentialSource::PropertiesFile);
        assert_eq!(resolved.credentials, SigningCredentials::default());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let props_file = dir.path().join(KEY_PROPERTIES_FILE);
        std::fs::write(&props_file, "storeFile=release.jks\nstorePassword=abc\n").unwrap();

        let first = resolve(&Properties::new(), &props_file).unwrap();
        let second = resolve(&Properties::new(), &props_file).unwrap();
        assert_eq!(first.credentials, second.credentials);
        assert_eq!(first.source, second.source);
    }

    #[test]
    fn test_resolve_for_project_uses_default_location() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(KEY_PROPERTIES_FILE),
            "keyAlias=upload\n",
        )
        .unwrap();

        let resolved = resolve_for_project(&Properties::new(), dir.path()).unwrap();
        assert_eq!(resolved.credentials.key_alias.as_deref(), Some("upload"));
    }
}
