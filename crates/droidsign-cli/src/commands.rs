//! droidsign command handlers.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use droidsign_core::models::{SigningCredentials, SigningReport};
use droidsign_core::properties::Properties;
use droidsign_core::signing::{self, key_properties_path, resolve_for_project};

/// Parses repeated `-P KEY=VALUE` flags into external build properties.
pub fn parse_property_flags(flags: &[String]) -> Result<Properties> {
    let mut props = Properties::new();
    for flag in flags {
        let Some((key, value)) = flag.split_once('=') else {
            bail!("Invalid property '{}': expected KEY=VALUE", flag);
        };
        props.insert(key.trim(), value);
    }
    Ok(props)
}

/// Resolve and print the signing configuration, secrets masked.
pub fn handle_resolve(external: &Properties, android_dir: &Path, json: bool) -> Result<()> {
    let resolved = resolve_for_project(external, android_dir)
        .context("Failed to resolve signing configuration")?;
    let report = SigningReport::from(&resolved);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &SigningReport) {
    println!("Source:         {}", report.source);
    println!(
        "Store file:     {}",
        report.store_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "Key alias:      {}",
        report.key_alias.as_deref().unwrap_or("(not set)")
    );
    println!(
        "Store password: {}",
        if report.has_store_password { "set" } else { "(not set)" }
    );
    println!(
        "Key password:   {}",
        if report.has_key_password { "set" } else { "(not set)" }
    );

    if !report.complete {
        println!();
        println!("Warning: configuration is incomplete; release signing will fail.");
    }
}

/// Resolve the configuration and open the keystore it points at.
pub fn handle_check(external: &Properties, android_dir: &Path) -> Result<()> {
    let resolved = resolve_for_project(external, android_dir)
        .context("Failed to resolve signing configuration")?;

    if let Some(store_file) = &resolved.credentials.store_file {
        tracing::debug!("Checking keystore {}", store_file.display());
    }

    let info = signing::inspect(&resolved.credentials)
        .context("Signing configuration check failed")?;

    println!("Signing configuration OK ({})", resolved.source);
    println!("Keystore type: {}", info.keystore_type);
    println!("Keystore size: {} bytes", info.size_bytes);
    Ok(())
}

/// Write a key.properties file from explicit credentials.
pub fn handle_write(
    android_dir: &Path,
    store_file: PathBuf,
    store_password: String,
    key_alias: String,
    key_password: String,
    force: bool,
) -> Result<()> {
    let path = key_properties_path(android_dir);
    if path.exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite",
            path.display()
        );
    }

    let credentials = SigningCredentials {
        store_file: Some(store_file),
        store_password: Some(store_password),
        key_alias: Some(key_alias),
        key_password: Some(key_password),
    };

    let written = signing::write_key_properties(android_dir, &credentials)
        .context("Failed to write key.properties")?;
    println!("Wrote {}", written.display());
    Ok(())
}
