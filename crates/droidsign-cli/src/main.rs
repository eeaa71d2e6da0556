use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{handle_check, handle_resolve, handle_write, parse_property_flags};

#[derive(Parser)]
#[command(name = "droidsign")]
#[command(about = "Release signing configuration for Flutter/Android projects", long_about = None)]
struct Cli {
    /// External build property (repeatable), e.g. -P MYAPP_RELEASE_KEY_ALIAS=upload
    #[arg(short = 'P', long = "property", value_name = "KEY=VALUE", global = true)]
    properties: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the release signing configuration and print it (secrets masked)
    Resolve {
        /// Android directory containing key.properties
        #[arg(long, default_value = "android")]
        android_dir: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the configuration and verify the keystore it points at
    Check {
        /// Android directory containing key.properties
        #[arg(long, default_value = "android")]
        android_dir: PathBuf,
    },

    /// Write a key.properties file from the given credentials
    Write {
        /// Android directory to write key.properties into
        #[arg(long, default_value = "android")]
        android_dir: PathBuf,

        /// Path to the keystore file
        #[arg(long)]
        store_file: PathBuf,

        /// Keystore password
        #[arg(long)]
        store_password: String,

        /// Key alias inside the keystore
        #[arg(long)]
        key_alias: String,

        /// Key password
        #[arg(long)]
        key_password: String,

        /// Overwrite an existing key.properties
        #[arg(long)]
        force: bool,
    },

    /// Show CLI version
    Version,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "droidsign_cli=info,droidsign_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let external = parse_property_flags(&cli.properties)?;

    match cli.command {
        Commands::Resolve { android_dir, json } => handle_resolve(&external, &android_dir, json),
        Commands::Check { android_dir } => handle_check(&external, &android_dir),
        Commands::Write {
            android_dir,
            store_file,
            store_password,
            key_alias,
            key_password,
            force,
        } => handle_write(
            &android_dir,
            store_file,
            store_password,
            key_alias,
            key_password,
            force,
        ),
        Commands::Version => {
            println!("droidsign {}", droidsign_core::VERSION);
            Ok(())
        }
    }
}
