//! CLI command implementations.

pub mod cart;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    #[arg(long)]
    pub id: String,

    /// Product title.
    #[arg(long)]
    pub title: String,

    /// Product image URL.
    #[arg(long, default_value = "")]
    pub image_url: String,

    /// Unit price.
    #[arg(long, value_parser = parse_price, allow_hyphen_values = true)]
    pub price: f64,
}

fn parse_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if price.is_finite() {
        Ok(price)
    } else {
        Err(format!("price must be a finite number, got {raw}"))
    }
}

/// Arguments for commands that target one cart item.
#[derive(Args)]
pub struct ItemArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
