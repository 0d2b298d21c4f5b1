use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront::cli::commands::{self, Globals, ProductChanges};
use storefront::cli::{Cli, Commands, ProductsAction};
use storefront::products::ProductDraft;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for views
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let globals = Globals {
        config: cli.config,
        api_url: cli.api_url,
    };

    match cli.command {
        Commands::Init => commands::init().await,
        Commands::Signin { username, password } => {
            commands::signin(&globals, &username, password).await
        }
        Commands::Signup {
            first_name,
            last_name,
            username,
            email,
            password,
        } => commands::signup(&globals, first_name, last_name, username, email, password).await,
        Commands::Signout => commands::signout(&globals).await,
        Commands::Whoami => commands::whoami(&globals).await,
        Commands::Open { path, format } => commands::open(&globals, &path, format).await,
        Commands::Products { action } => match action {
            ProductsAction::List { format } => commands::list_products(&globals, format).await,
            ProductsAction::Add {
                name,
                description,
                qty,
                price,
            } => {
                let draft = ProductDraft::new(name, description, qty, price);
                commands::add_product(&globals, draft).await
            }
            ProductsAction::Edit {
                id,
                name,
                description,
                qty,
                price,
            } => {
                let changes = ProductChanges {
                    name,
                    description,
                    qty,
                    price,
                };
                commands::edit_product(&globals, &id, changes).await
            }
            ProductsAction::Delete { id, force } => {
                commands::delete_product(&globals, &id, force).await
            }
        },
    }
}
