//! Caja point-of-sale command line

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process,
};

use clap::{Args, Parser, Subcommand};
use rusty_money::iso::Currency;
use tracing::info;

use caja::prelude::*;
use caja_app::{
    config::{LoggingConfig, TerminalConfig},
    context::AppContext,
    domain::{
        catalog::{Catalog, CatalogService},
        tickets::{TicketKind, TicketService},
    },
    engine::{AddOutcome, CartEngine, CheckoutError, CheckoutReceipt},
    observability,
    session::Session,
};

#[derive(Debug, Parser)]
#[command(name = "caja", about = "Caja point-of-sale terminal", long_about = None)]
struct Cli {
    #[command(flatten)]
    terminal: TerminalConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show or change the stored session
    Session(SessionCommand),

    /// List sellable products or recipes
    Catalog(CatalogCommand),

    /// Price an order file offline, without stock checks
    Quote(OrderArgs),

    /// Add an order file's items to the cart and record the sale
    Sell(SellArgs),

    /// Print a sale's kitchen or cashier ticket
    Ticket(TicketArgs),
}

#[derive(Debug, Args)]
struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    /// Print the stored session
    Show,

    /// Update stored session fields
    Set(SetSessionArgs),

    /// Forget the token and user
    Logout,
}

#[derive(Debug, Args)]
struct SetSessionArgs {
    /// Backend API base URL
    #[arg(long = "url")]
    api_url: Option<String>,

    /// Bearer token from a login
    #[arg(long)]
    token: Option<String>,

    /// Logged-in user name
    #[arg(long)]
    user: Option<String>,

    /// Business name printed on summaries
    #[arg(long)]
    business_name: Option<String>,

    /// Logo URL for graphical front ends
    #[arg(long)]
    logo_url: Option<String>,
}

#[derive(Debug, Args)]
struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// List products
    Products,

    /// List recipes
    Recipes,
}

#[derive(Debug, Args)]
struct OrderArgs {
    /// YAML order file
    order: PathBuf,
}

#[derive(Debug, Args)]
struct SellArgs {
    /// YAML order file
    order: PathBuf,

    /// Add items with stock advisories without asking
    #[arg(short, long)]
    yes: bool,
}

#[derive(Debug, Args)]
struct TicketArgs {
    /// Sale id
    sale: u64,

    /// Ticket copy
    #[arg(long, value_enum, default_value_t = TicketKind::Kitchen)]
    kind: TicketKind,

    /// Flag the ticket as printed after showing it
    #[arg(long)]
    mark_printed: bool,
}

#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init(&cli.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let terminal = cli.terminal;

    match cli.command {
        Commands::Session(SessionCommand { command }) => {
            let session = Session::load_or_default(&terminal.session_file);

            run_session(&terminal, session, command)
        }
        Commands::Catalog(CatalogCommand { command }) => {
            run_catalog(&terminal, &load_session(&terminal)?, command).await
        }
        Commands::Quote(args) => {
            let session = Session::load_or_default(&terminal.session_file);

            quote(&terminal, &session, &args)
        }
        Commands::Sell(args) => sell(&terminal, load_session(&terminal)?, &args).await,
        Commands::Ticket(args) => ticket(&terminal, &load_session(&terminal)?, &args).await,
    }
}

/// The stored session, for commands that talk to the backend.
fn load_session(terminal: &TerminalConfig) -> Result<Session, String> {
    Session::load(&terminal.session_file).map_err(|error| error.to_string())
}

fn context(terminal: &TerminalConfig, session: &Session) -> Result<AppContext, String> {
    AppContext::from_backend(terminal.backend(session))
        .map_err(|error| format!("failed to build backend client: {error}"))
}

fn save(terminal: &TerminalConfig, session: &Session) -> Result<(), String> {
    session
        .save(&terminal.session_file)
        .map_err(|error| format!("failed to save session: {error}"))
}

fn run_session(
    terminal: &TerminalConfig,
    mut session: Session,
    command: SessionSubcommand,
) -> Result<(), String> {
    match command {
        SessionSubcommand::Show => {
            println!("session_file:  {}", terminal.session_file.display());
            println!("api_url:       {}", session.api_url);
            println!("business_name: {}", session.business_name);
            println!("user:          {}", session.user.as_deref().unwrap_or("-"));
            println!("logged_in:     {}", session.is_logged_in());
            println!("logo_url:      {}", session.logo_url.as_deref().unwrap_or("-"));

            Ok(())
        }
        SessionSubcommand::Set(args) => {
            if let Some(api_url) = args.api_url {
                session.api_url = api_url;
            }

            if let Some(token) = args.token {
                session.token = Some(token);
            }

            if let Some(user) = args.user {
                session.user = Some(user);
            }

            if let Some(business_name) = args.business_name {
                session.business_name = business_name;
            }

            if let Some(logo_url) = args.logo_url {
                session.logo_url = Some(logo_url);
            }

            save(terminal, &session)
        }
        SessionSubcommand::Logout => {
            session.clear_credentials();

            save(terminal, &session)
        }
    }
}

async fn run_catalog(
    terminal: &TerminalConfig,
    session: &Session,
    command: CatalogSubcommand,
) -> Result<(), String> {
    let context = context(terminal, session)?;
    let currency = terminal.currency.currency();

    match command {
        CatalogSubcommand::Products => {
            let products = context
                .catalog
                .list_products()
                .await
                .map_err(|error| format!("failed to list products: {error}"))?;

            for product in products {
                println!(
                    "{:>5}  {:<32} {:>12}  stock: {}",
                    product.id.get(),
                    product.name,
                    price_label(product.price, currency),
                    product
                        .stock
                        .map_or_else(|| "-".to_string(), |stock| stock.normalize().to_string())
                );
            }
        }
        CatalogSubcommand::Recipes => {
            let recipes = context
                .catalog
                .list_recipes()
                .await
                .map_err(|error| format!("failed to list recipes: {error}"))?;

            for recipe in recipes {
                println!(
                    "{:>5}  {:<32} {:>12}",
                    recipe.id.get(),
                    recipe.name,
                    price_label(recipe.sale_price, currency)
                );
            }
        }
    }

    Ok(())
}

fn price_label(price: Option<rust_decimal::Decimal>, currency: &Currency) -> String {
    price.map_or_else(|| "no price".to_string(), |price| Totals::money(price, currency).to_string())
}

fn quote(terminal: &TerminalConfig, session: &Session, args: &OrderArgs) -> Result<(), String> {
    let order = OrderFile::load(&args.order).map_err(|error| error.to_string())?;
    let cart = order.quote().map_err(|error| error.to_string())?;

    print_summary(&session.business_name, &cart, terminal.currency.currency())
}

fn print_summary(business_name: &str, cart: &Cart, currency: &Currency) -> Result<(), String> {
    println!("{business_name}");

    CartSummary::new(cart)
        .write_to(io::stdout().lock(), currency)
        .map_err(|error| error.to_string())
}

async fn sell(terminal: &TerminalConfig, mut session: Session, args: &SellArgs) -> Result<(), String> {
    let order = OrderFile::load(&args.order).map_err(|error| error.to_string())?;
    let context = context(terminal, &session)?;

    let catalog = Catalog::fetch(context.catalog.as_ref())
        .await
        .map_err(|error| format!("failed to load catalog: {error}"))?;

    let mut engine = CartEngine::from_context(&context);

    for entry in &order.items {
        let item = catalog
            .item(entry.kind, entry.id)
            .map_err(|error| error.to_string())?
            .ok_or_else(|| {
                OrderError::UnknownItem {
                    kind: entry.kind,
                    id: entry.id,
                }
                .to_string()
            })?;

        let outcome = engine
            .add_item(&item, |advisory| args.yes || confirm(item.name(), advisory))
            .await;

        let AddOutcome::Added(line) = outcome else {
            println!("skipped {}", item.name());

            continue;
        };

        entry
            .apply_to_line(&mut engine, line)
            .map_err(|error| error.to_string())?;
    }

    order.apply_context(&mut engine);

    let currency = terminal.currency.currency();

    print_summary(&session.business_name, engine.cart(), currency)?;

    match engine.submit_checkout().await {
        Ok(receipt) => {
            print_receipt(&receipt, currency);

            Ok(())
        }
        Err(CheckoutError::Unauthorized) => {
            info!("clearing rejected session credentials");

            session.clear_credentials();
            save(terminal, &session)?;

            Err(CheckoutError::Unauthorized.to_string())
        }
        Err(error) => Err(format!("sale not recorded: {error}")),
    }
}

fn confirm(name: &str, advisory: &StockAdvisory) -> bool {
    eprintln!("{name}: {advisory}");
    eprint!("Add anyway? [y/N] ");

    _ = io::stderr().flush();

    let mut answer = String::new();

    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }

    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí")
}

fn print_receipt(receipt: &CheckoutReceipt, currency: &Currency) {
    let sale = receipt
        .sale_id()
        .map_or_else(|| "-".to_string(), |sale| sale.to_string());

    println!("sale_id:        {sale}");
    println!("lines:          {}", receipt.line_count);
    println!("total:          {}", Totals::money(receipt.total(), currency));

    if let Some(ticket) = receipt.kitchen_ticket() {
        println!("kitchen_ticket: {ticket}");
    }

    if let Some(ticket) = receipt.cashier_ticket() {
        println!("cashier_ticket: {ticket}");
    }

    for (ingredient, used) in &receipt.confirmation.ingredient_usage {
        println!("  ingredient {ingredient}: {}", used.normalize());
    }

    println!("confirmed_at:   {}", receipt.confirmed_at);
}

async fn ticket(terminal: &TerminalConfig, session: &Session, args: &TicketArgs) -> Result<(), String> {
    let context = context(terminal, session)?;

    let ticket = context
        .tickets
        .get_ticket(SaleId::new(args.sale), args.kind)
        .await
        .map_err(|error| format!("failed to fetch ticket: {error}"))?;

    println!("{}", ticket.text);

    if args.mark_printed && !ticket.printed {
        context
            .tickets
            .mark_printed(ticket.id)
            .await
            .map_err(|error| format!("failed to mark ticket {} printed: {error}", ticket.id))?;
    }

    Ok(())
}
