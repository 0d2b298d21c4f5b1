//! CLI interface for Storefront

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(version)]
#[command(about = "Sign in, browse and manage products in the storefront", long_about = None)]
pub struct Cli {
    /// Path to storefront.toml (searched upward from the current directory by default)
    #[arg(long, global = true, env = "STOREFRONT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true, env = "STOREFRONT_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default storefront.toml in the current directory
    Init,

    /// Sign in and open your landing page
    Signin {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Password (prompted for when omitted)
        #[arg(short, long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Register a new customer account
    Signup {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        /// Password (prompted for, with confirmation, when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Signout,

    /// Show the current session
    Whoami,

    /// Navigate to a page (/signin, /signup, /home, /admin)
    Open {
        /// Path to open
        path: String,

        /// Output format for product listings
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Browse and manage products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
}

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List products (home page)
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Add a product (admin)
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: String,

        #[arg(short, long, allow_negative_numbers = true)]
        qty: i64,

        #[arg(short, long, allow_negative_numbers = true)]
        price: f64,
    },

    /// Edit a product (admin); omitted fields keep their current value
    Edit {
        /// Product id
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long, allow_negative_numbers = true)]
        qty: Option<i64>,

        #[arg(short, long, allow_negative_numbers = true)]
        price: Option<f64>,
    },

    /// Delete a product (admin)
    Delete {
        /// Product id
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
