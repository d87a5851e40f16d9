//! BikeStore storefront CLI
//!
//! Drives the storefront flows from the terminal: shop, cart, checkout,
//! invoices, DTE records and artifact downloads, persisting state under the
//! configured data directory.

use std::{io, process::ExitCode, time::Duration};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::error;
use tracing_subscriber::EnvFilter;

use bikestore::{
    artifacts::ArtifactKind,
    catalog::ProductUpdate,
    invoice::InvoiceStatus,
};
use bikestore_app::{
    checkout::{PaymentData, PaymentMethod},
    downloads::{DownloadError, Downloads},
    mailer::Mailer,
    records::DteRecordStatus,
    session::{NewProduct, Session, SessionError, View},
    store::{FileStore, StoreError},
};

use crate::config::StoreConfig;

mod config;
mod render;

/// BikeStore Pro storefront
#[derive(Debug, Parser)]
#[command(name = "bikestore", about = "BikeStore Pro storefront", long_about = None)]
struct Cli {
    /// Runtime settings.
    #[command(flatten)]
    config: StoreConfig,

    /// Operation to run.
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Load configuration and command from .env, environment and arguments.
    fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the products in the shop
    Shop,

    /// Log in with one of the demo accounts
    Login {
        /// Login email
        email: String,
        /// Password
        password: String,
    },

    /// Register a new account (role detected from the email)
    Register {
        /// Display name
        name: String,

        /// Login email
        email: String,

        /// Tax id, kept for customer accounts
        #[arg(long)]
        nit: Option<String>,
    },

    /// Log out, clearing user-scoped state
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Cart operations
    #[command(subcommand)]
    Cart(CartCommand),

    /// Pay for the cart and generate the invoice
    Checkout(CheckoutArgs),

    /// Invoice operations
    #[command(subcommand)]
    Invoices(InvoiceCommand),

    /// Render and save a DTE artifact for an invoice
    Download {
        /// Invoice id
        invoice_id: String,

        /// Artifact format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
    },

    /// DTE record administration (admin)
    #[command(subcommand)]
    Dte(DteCommand),

    /// Product administration (admin)
    #[command(subcommand)]
    Products(ProductCommand),
}

#[derive(Debug, Subcommand)]
enum CartCommand {
    /// Add a product to the cart
    Add {
        /// Product code
        code: String,

        /// Units to add
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },

    /// Set a cart line's quantity (0 removes it)
    Set {
        /// Product code
        code: String,

        /// New quantity
        qty: u32,
    },

    /// Show the cart
    Show,
}

#[derive(Debug, Subcommand)]
enum InvoiceCommand {
    /// List invoices, most recent first
    List,

    /// Show one invoice
    Show {
        /// Invoice id
        id: String,
    },

    /// Email an invoice (simulated) and mark it sent
    Send {
        /// Invoice id
        id: String,

        /// Destination email
        email: String,
    },

    /// Mark an invoice paid
    Pay {
        /// Invoice id
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum DteCommand {
    /// List DTE records
    List,

    /// Approve a pending record
    Approve {
        /// Record id
        id: String,
    },

    /// Reject a pending record
    Reject {
        /// Record id
        id: String,
    },
}

#[derive(Debug, Subcommand)]
enum ProductCommand {
    /// Add a product to the catalog
    Add(ProductAddArgs),

    /// Update fields of an existing product
    Update(ProductUpdateArgs),

    /// Remove a product from the catalog
    Delete {
        /// Product code
        code: String,
    },
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Customer name or razón social
    #[arg(long)]
    name: String,

    /// Customer tax id (NIT, or DUI with a dash)
    #[arg(long)]
    nit: String,

    /// Customer email
    #[arg(long)]
    email: String,

    /// Payment method
    #[arg(long, value_enum, default_value = "card")]
    method: Method,

    /// Card number, for card payments
    #[arg(long)]
    card_number: Option<String>,

    /// Card expiry, for card payments
    #[arg(long)]
    expiry_date: Option<String>,

    /// Card verification value, for card payments
    #[arg(long)]
    cvv: Option<String>,

    /// Account number, for transfers
    #[arg(long)]
    account_number: Option<String>,
}

impl CheckoutArgs {
    fn into_payment_data(self) -> PaymentData {
        PaymentData {
            customer_name: self.name,
            customer_nit: self.nit,
            customer_email: self.email,
            payment_method: self.method.into(),
            card_number: self.card_number,
            expiry_date: self.expiry_date,
            cvv: self.cvv,
            account_number: self.account_number,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    /// Card payment
    Card,

    /// Bank transfer
    Transfer,
}

impl From<Method> for PaymentMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Card => Self::Card,
            Method::Transfer => Self::Transfer,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Mock PDF text stream
    Pdf,

    /// XML representation
    Xml,

    /// Official JSON
    Json,
}

impl From<Format> for ArtifactKind {
    fn from(format: Format) -> Self {
        match format {
            Format::Pdf => Self::Pdf,
            Format::Xml => Self::Xml,
            Format::Json => Self::Json,
        }
    }
}

#[derive(Debug, Args)]
struct ProductAddArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Unit price in USD
    #[arg(long)]
    price: Decimal,

    /// Units on hand
    #[arg(long)]
    stock: u32,

    /// Display category
    #[arg(long)]
    category: String,

    /// Product image URL
    #[arg(long, default_value = "")]
    image: String,
}

impl ProductAddArgs {
    fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            price: self.price,
            stock: self.stock,
            category: self.category,
            image: self.image,
        }
    }
}

#[derive(Debug, Args)]
struct ProductUpdateArgs {
    /// Product code
    code: String,

    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New unit price in USD
    #[arg(long)]
    price: Option<Decimal>,

    /// New stock level
    #[arg(long)]
    stock: Option<u32>,

    /// New category
    #[arg(long)]
    category: Option<String>,

    /// New image URL
    #[arg(long)]
    image: Option<String>,
}

impl ProductUpdateArgs {
    fn update(&self) -> ProductUpdate {
        ProductUpdate {
            name: self.name.clone(),
            price: self.price,
            stock: self.stock,
            category: self.category.clone(),
            image: self.image.clone(),
        }
    }
}

/// Errors surfaced to the terminal.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Session operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Artifact could not be written.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Terminal output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// BikeStore CLI entry point.
fn main() -> ExitCode {
    let cli = Cli::load().unwrap_or_else(|parse_error| parse_error.exit());

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.config.log_level)),
        )
        .init();

    let mut stdout = io::stdout().lock();

    match run(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            error!("{run_error}");

            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, out: &mut impl io::Write) -> Result<(), CliError> {
    let store = FileStore::open(&cli.config.data_dir)?;
    let mut session = Session::load(store)?;
    let now = jiff::Zoned::now();

    match cli.command {
        Command::Shop => render::write_products(out, session.catalog())?,
        Command::Login { email, password } => {
            let user = session.login(&email, &password)?;

            writeln!(out, "Bienvenido, {} ({})", user.name, user.role)?;
        }
        Command::Register { name, email, nit } => {
            let user = session.register(&name, &email, nit.as_deref(), &now)?;

            writeln!(out, "Cuenta creada: {} ({})", user.name, user.role)?;
        }
        Command::Logout => {
            session.logout()?;

            writeln!(out, "Sesión cerrada.")?;
        }
        Command::Whoami => match session.user() {
            Some(user) => writeln!(out, "{} <{}> · {}", user.name, user.email, user.role)?,
            None => writeln!(out, "Not logged in.")?,
        },
        Command::Cart(command) => match command {
            CartCommand::Add { code, qty } => {
                session.add_to_cart(&code, qty)?;
                render::write_cart(out, session.cart())?;
            }
            CartCommand::Set { code, qty } => {
                session.update_cart_quantity(&code, qty)?;
                render::write_cart(out, session.cart())?;
            }
            CartCommand::Show => render::write_cart(out, session.cart())?,
        },
        Command::Checkout(args) => {
            session.navigate(View::Payment)?;

            let invoice = session.checkout(&args.into_payment_data(), &now)?;

            render::write_invoice(out, &invoice)?;
        }
        Command::Invoices(command) => match command {
            InvoiceCommand::List => render::write_invoices(out, session.invoices())?,
            InvoiceCommand::Show { id } => {
                let invoice = session.invoice(&id)?.clone();

                session.view_invoice(&id)?;
                render::write_invoice(out, &invoice)?;
            }
            InvoiceCommand::Send { id, email } => {
                let mailer = Mailer::with_delay(Duration::from_millis(cli.config.mail_delay_ms));

                session.send_invoice_by_email(&id, &email, &mailer)?;

                writeln!(out, "Factura {id} enviada a {email}.")?;
            }
            InvoiceCommand::Pay { id } => {
                session.update_invoice_status(&id, InvoiceStatus::Paid)?;

                writeln!(out, "Factura {id} marcada como pagada.")?;
            }
        },
        Command::Download { invoice_id, format } => {
            let mut rng = rand::thread_rng();
            let artifact = session.download(&invoice_id, format.into(), &now, &mut rng)?;
            let downloads = Downloads::new(&cli.config.downloads_dir);
            let path = downloads.write(&artifact)?;

            writeln!(out, "{}", path.display())?;
        }
        Command::Dte(command) => match command {
            DteCommand::List => render::write_records(out, session.dte_records())?,
            DteCommand::Approve { id } => {
                session.decide_dte_record(&id, DteRecordStatus::Approved)?;

                writeln!(out, "Registro {id} aprobado.")?;
            }
            DteCommand::Reject { id } => {
                session.decide_dte_record(&id, DteRecordStatus::Rejected)?;

                writeln!(out, "Registro {id} rechazado.")?;
            }
        },
        Command::Products(command) => match command {
            ProductCommand::Add(args) => {
                let code = session.add_product(args.into_new_product(), &now)?;

                writeln!(out, "Producto {code} agregado.")?;
            }
            ProductCommand::Update(args) => {
                session.update_product(&args.code, args.update())?;

                writeln!(out, "Producto {} actualizado.", args.code)?;
            }
            ProductCommand::Delete { code } => {
                session.delete_product(&code)?;

                writeln!(out, "Producto {code} eliminado.")?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_maps_to_artifact_kind() {
        assert_eq!(ArtifactKind::from(Format::Pdf), ArtifactKind::Pdf);
        assert_eq!(ArtifactKind::from(Format::Xml), ArtifactKind::Xml);
        assert_eq!(ArtifactKind::from(Format::Json), ArtifactKind::Json);
    }

    #[test]
    fn shop_command_runs_against_a_fresh_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cli = Cli::try_parse_from([
            "bikestore",
            "--data-dir",
            &dir.path().join("data").to_string_lossy(),
            "shop",
        ])
        .expect("valid arguments");

        let mut out = Vec::new();

        run(cli, &mut out).expect("shop must render");

        let output = String::from_utf8(out).expect("utf8 output");

        assert!(output.contains("Mountain Bike Adventure Pro"));
    }
}
