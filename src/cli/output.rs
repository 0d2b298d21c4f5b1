//! CLI output formatting utilities and page views

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::auth::Session;
use crate::config::DisplayConfig;
use crate::products::Product;
use crate::routes::{Destination, Navigation, RedirectReason};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Spinner shown while a request is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// One-line navigation bar with the signed-in role
pub fn print_nav_bar(session: &Session, page: Destination) {
    let who = match session.role() {
        Some(role) => format!("signed in as {}", role.as_str().bold()),
        None => "not signed in".dimmed().to_string(),
    };
    println!("{} {} {}", "Storefront".bold().cyan(), page.path().dimmed(), who);
    println!();
}

/// Report the redirects a navigation went through
pub fn print_redirects(navigation: &Navigation) {
    for redirect in &navigation.redirects {
        let why = match redirect.reason {
            RedirectReason::Unmatched => "no such page",
            RedirectReason::Unauthenticated => "sign in required",
            RedirectReason::Unauthorized => "not permitted for your role",
        };
        warn(&format!("{} → {} ({})", redirect.from, redirect.to, why));
    }
}

/// Home page: the customer product listing
pub fn print_product_table(products: &[Product], display: &DisplayConfig) {
    if products.is_empty() {
        info("No products available at this time.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Product Name").fg(Color::Cyan),
            Cell::new("Description").fg(Color::Cyan),
            Cell::new("Avl Qty").fg(Color::Cyan),
            Cell::new("Price").fg(Color::Cyan),
            Cell::new("Availability").fg(Color::Cyan),
        ]);

    for product in products {
        let availability = if product.in_stock() {
            Cell::new("in stock").fg(Color::Green)
        } else {
            Cell::new("sold out").fg(Color::Red)
        };

        table.add_row(vec![
            Cell::new(&product.name),
            Cell::new(&product.description),
            Cell::new(product.qty).set_alignment(CellAlignment::Right),
            Cell::new(display.format_price(product.price)).set_alignment(CellAlignment::Right),
            availability,
        ]);
    }

    println!("{table}");
}

/// Admin page: the listing with ids and versions for editing
pub fn print_admin_table(products: &[Product], display: &DisplayConfig) {
    if products.is_empty() {
        info("No products yet. Add one with 'storefront products add'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Product Name").fg(Color::Cyan),
            Cell::new("Description").fg(Color::Cyan),
            Cell::new("Avl Qty").fg(Color::Cyan),
            Cell::new("Price").fg(Color::Cyan),
            Cell::new("Version").fg(Color::Cyan),
        ]);

    for product in products {
        table.add_row(vec![
            Cell::new(&product.id).fg(Color::DarkGrey),
            Cell::new(&product.name),
            Cell::new(&product.description),
            Cell::new(product.qty).set_alignment(CellAlignment::Right),
            Cell::new(display.format_price(product.price)).set_alignment(CellAlignment::Right),
            Cell::new(product.version.to_string()),
        ]);
    }

    println!("{table}");
}

/// Detail block for a single product
pub fn print_product_detail(product: &Product, display: &DisplayConfig) {
    println!("  {} {}", "ID:".bold(), product.id);
    println!("  {} {}", "Name:".bold(), product.name);
    println!("  {} {}", "Description:".bold(), product.description);
    println!("  {} {}", "Quantity:".bold(), product.qty);
    println!("  {} {}", "Price:".bold(), display.format_price(product.price));
    println!("  {} {}", "Version:".bold(), product.version);
}

/// Sign-in page
pub fn print_signin_page() {
    println!("{}", "Sign In".bold().underline());
    println!();
    println!("  storefront signin --username <name>");
    println!();
    println!(
        "  If you don't have an account, register with {}",
        "storefront signup".cyan()
    );
}

/// Sign-up page
pub fn print_signup_page() {
    println!("{}", "Sign Up".bold().underline());
    println!();
    println!("  storefront signup --first-name <first> --last-name <last> \\");
    println!("                    --username <name> --email <email>");
    println!();
    println!("  Already registered? {}", "storefront signin".cyan());
}

/// Current session details
pub fn print_session(session: &Session) {
    println!("{}", "Session".bold().underline());
    println!();
    if session.is_authenticated() {
        println!("  {} {}", "Status:".bold(), "signed in".green());
        if let Some(role) = session.role() {
            println!("  {} {}", "Role:".bold(), role);
        }
    } else {
        println!("  {} {}", "Status:".bold(), "signed out".red());
    }
}

/// Confirm an action with the user
pub fn confirm(message: &str) -> bool {
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or(false)
}
