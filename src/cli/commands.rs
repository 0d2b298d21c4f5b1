//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::app::AppContext;
use crate::auth::{self, SignUpForm};
use crate::cli::{
    confirm, error, info, print_admin_table, print_nav_bar, print_product_detail,
    print_product_table, print_redirects, print_session, print_signin_page, print_signup_page,
    spinner, success, warn, OutputFormat,
};
use crate::config::{self, loader::CONFIG_FILENAME};
use crate::error::Error;
use crate::products::ProductDraft;
use crate::routes::Destination;

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct Globals {
    pub config: Option<PathBuf>,
    pub api_url: Option<String>,
}

/// Initialize a new storefront.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Point [api].base_url at your backend and run 'storefront signin --username <name>'");

    Ok(())
}

/// Sign in and show the landing page for the account's role
pub async fn signin(globals: &Globals, username: &str, password: Option<String>) -> Result<()> {
    let ctx = load_context(globals)?;

    let password = match password {
        Some(password) => password,
        None => dialoguer::Password::new().with_prompt("Password").interact()?,
    };

    let pb = spinner("Logging in...");
    let result = auth::sign_in(&ctx.api, &ctx.session, username, &password).await;
    pb.finish_and_clear();

    match result {
        Ok(landing) => {
            success(&format!("Signed in as {}", username));
            let navigation = ctx.navigator.navigate(landing.path());
            render(&ctx, navigation.rendered, OutputFormat::Table).await
        }
        Err(e) => {
            error(&auth::signin::describe_error(&e));
            Err(e.into())
        }
    }
}

/// Register a new customer account
pub async fn signup(
    globals: &Globals,
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    password: Option<String>,
) -> Result<()> {
    let ctx = load_context(globals)?;

    let (password, confirm_password) = match password {
        Some(password) => (password.clone(), password),
        None => {
            let password = dialoguer::Password::new().with_prompt("Password").interact()?;
            let confirm_password = dialoguer::Password::new()
                .with_prompt("Confirm password")
                .interact()?;
            (password, confirm_password)
        }
    };

    let form = SignUpForm {
        first_name,
        last_name,
        user_name: username,
        email,
        password,
        confirm_password,
    };

    let pb = spinner("Signing up...");
    let result = auth::sign_up(&ctx.api, &form).await;
    pb.finish_and_clear();

    match result {
        Ok(next) => {
            success("Account created. Sign in to continue.");
            let navigation = ctx.navigator.navigate(next.path());
            render(&ctx, navigation.rendered, OutputFormat::Table).await
        }
        Err(e) => {
            error(&auth::signup::describe_error(&e));
            Err(e.into())
        }
    }
}

/// Sign out and clear the stored session
pub async fn signout(globals: &Globals) -> Result<()> {
    let ctx = load_context(globals)?;

    if ctx.session.logout()? {
        success("Signed out");
    } else {
        info("Not signed in");
    }
    Ok(())
}

/// Show the current session
pub async fn whoami(globals: &Globals) -> Result<()> {
    let ctx = load_context(globals)?;
    print_session(&ctx.session.current_session());
    Ok(())
}

/// Navigate to a path and render whatever the guard allows
pub async fn open(globals: &Globals, path: &str, format: OutputFormat) -> Result<()> {
    let ctx = load_context(globals)?;
    let navigation = ctx.navigator.navigate(path);
    print_redirects(&navigation);
    render(&ctx, navigation.rendered, format).await
}

/// List products on the home page
pub async fn list_products(globals: &Globals, format: OutputFormat) -> Result<()> {
    open(globals, Destination::Home.path(), format).await
}

/// Add a product from the admin page
pub async fn add_product(globals: &Globals, draft: ProductDraft) -> Result<()> {
    let ctx = load_context(globals)?;
    if !enter_admin(&ctx).await? {
        return Ok(());
    }

    let pb = spinner("Adding product...");
    let result = ctx.products.create(draft).await;
    pb.finish_and_clear();

    match result {
        Ok(product) => {
            success(&format!("Added product: {}", product.name));
            print_product_detail(&product, &ctx.config.display);
            Ok(())
        }
        Err(e) => fail(&ctx, e),
    }
}

/// Fields to change on an existing product
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub qty: Option<i64>,
    pub price: Option<f64>,
}

/// Edit a product from the admin page
pub async fn edit_product(globals: &Globals, id: &str, changes: ProductChanges) -> Result<()> {
    let ctx = load_context(globals)?;
    if !enter_admin(&ctx).await? {
        return Ok(());
    }

    let pb = spinner("Loading products...");
    let loaded = ctx.products.fetch_all().await;
    pb.finish_and_clear();
    if let Err(e) = loaded {
        return fail(&ctx, e);
    }

    let Some(current) = ctx.products.snapshot().find(id).cloned() else {
        let e = Error::ProductNotFound(id.to_string());
        error(&e.to_string());
        return Err(e.into());
    };

    let mut draft = ProductDraft::from(&current);
    if let Some(name) = changes.name {
        draft.name = name;
    }
    if let Some(description) = changes.description {
        draft.description = description;
    }
    if let Some(qty) = changes.qty {
        draft.qty = qty;
    }
    if let Some(price) = changes.price {
        draft.price = price;
    }

    let pb = spinner("Updating product...");
    let result = ctx.products.update(id, draft, &current.version).await;
    pb.finish_and_clear();

    match result {
        Ok(product) => {
            success(&format!("Updated product: {}", product.name));
            print_product_detail(&product, &ctx.config.display);
            Ok(())
        }
        Err(e) => fail(&ctx, e),
    }
}

/// Delete a product from the admin page
pub async fn delete_product(globals: &Globals, id: &str, force: bool) -> Result<()> {
    let ctx = load_context(globals)?;
    if !enter_admin(&ctx).await? {
        return Ok(());
    }

    if !force && !confirm(&format!("Are you sure you want to delete product '{}'?", id)) {
        info("Cancelled");
        return Ok(());
    }

    let pb = spinner("Deleting product...");
    let result = ctx.products.delete(id).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            success(&format!("Deleted product: {}", id));
            Ok(())
        }
        Err(e) => fail(&ctx, e),
    }
}

fn load_context(globals: &Globals) -> Result<AppContext> {
    let mut config = config::load_config(globals.config.as_deref())?;
    if let Some(url) = &globals.api_url {
        config.api.base_url = url.clone();
    }
    Ok(AppContext::from_config(config)?)
}

/// Navigate to the admin page. When the guard redirects, render where it
/// landed instead and return false.
async fn enter_admin(ctx: &AppContext) -> Result<bool> {
    let navigation = ctx.navigator.navigate(Destination::Admin.path());
    if navigation.rendered == Destination::Admin {
        return Ok(true);
    }

    print_redirects(&navigation);
    render(ctx, navigation.rendered, OutputFormat::Table).await?;
    Ok(false)
}

/// Render a page
async fn render(ctx: &AppContext, page: Destination, format: OutputFormat) -> Result<()> {
    match page {
        Destination::SignIn => {
            print_signin_page();
            Ok(())
        }
        Destination::SignUp => {
            print_signup_page();
            Ok(())
        }
        Destination::Home | Destination::Admin => {
            let pb = spinner("Loading products...");
            let loaded = ctx.products.fetch_all().await;
            pb.finish_and_clear();

            let products = match loaded {
                Ok(products) => products,
                Err(e) => return fail(ctx, e),
            };

            match format {
                OutputFormat::Table => {
                    print_nav_bar(&ctx.session.current_session(), page);
                    if page == Destination::Admin {
                        print_admin_table(&products, &ctx.config.display);
                    } else {
                        print_product_table(&products, &ctx.config.display);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&products)?),
                OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&products)?),
            }
            Ok(())
        }
    }
}

/// Report a failed product operation. A rejected session sends the user to sign-in.
fn fail(ctx: &AppContext, e: Error) -> Result<()> {
    if e.is_authentication() {
        error("Your session has expired. Please sign in again.");
        // the navigator picks this up from the session event; render it now
        print_signin_page();
    } else {
        let message = ctx.products.error().unwrap_or_else(|| e.to_string());
        error(&message);
    }
    Err(e.into())
}
