//! Session
//!
//! The root state holder of the storefront: user, current view, catalog,
//! cart, invoices and DTE records. Every mutation is mirrored into the
//! key-value store, so a new session picks up where the last one stopped.

use std::fmt;

use bikestore::{
    artifacts::{self, Artifact, ArtifactError, ArtifactKind},
    cart::{Cart, CartError},
    catalog::{Catalog, CatalogError, Product, ProductUpdate},
    dte::Dte,
    fixtures::{self, FixtureError},
    invoice::{CashierRef, Customer, Invoice, InvoiceError, InvoiceStatus},
};
use jiff::Zoned;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{self, AuthError, Role, User},
    checkout::{PaymentData, PaymentError},
    mailer::Mailer,
    records::{DteRecord, DteRecordStatus, RecordError, seed_records},
    store::{KeyValueStore, StoreError, keys},
};

/// The demo catalog shipped with the storefront.
const DEMO_CATALOG_YAML: &str = include_str!("../../../fixtures/products/demo.yml");

/// The navigable views of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Admin product dashboard.
    Dashboard,

    /// Public product listing.
    Shop,

    /// Shopping cart.
    Cart,

    /// Payment form.
    Payment,

    /// Invoice on screen after checkout.
    Invoice,

    /// Admin DTE record management.
    Dte,

    /// Invoice management list.
    Invoices,

    /// Cashier point of sale.
    Cashier,
}

impl View {
    /// View name as stored and displayed.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Shop => "shop",
            Self::Cart => "cart",
            Self::Payment => "payment",
            Self::Invoice => "invoice",
            Self::Dte => "dte",
            Self::Invoices => "invoices",
            Self::Cashier => "cashier",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product submitted through the admin dashboard; the code is assigned by
/// the session from the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Display name.
    pub name: String,

    /// Unit price in USD.
    pub price: Decimal,

    /// Units on hand.
    pub stock: u32,

    /// Display category.
    pub category: String,

    /// Product image URL.
    pub image: String,
}

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A persisted value could not be serialized or parsed.
    #[error("corrupt stored state: {0}")]
    Serde(#[from] serde_json::Error),

    /// Demo credential check failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Catalog operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Invoice lifecycle violation.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// DTE record operation failed.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Payment data incomplete.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Demo catalog fixture failed to load.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Artifact rendering failed.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// No invoice with the given id.
    #[error("invoice {0} not found")]
    InvoiceNotFound(String),

    /// The view needs a logged-in user.
    #[error("view {0} requires a logged-in user")]
    LoginRequired(View),

    /// The view needs a specific role.
    #[error("view {view} requires the {role} role")]
    RequiresRole {
        /// Gated view.
        view: View,
        /// Required role.
        role: Role,
    },

    /// Checkout attempted with nothing in the cart.
    #[error("the cart is empty")]
    EmptyCart,
}

/// Mutable storefront state bound to a key-value store.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    user: Option<User>,
    view: View,
    invoice_source_view: View,
    catalog: Catalog,
    cart: Cart,
    current_invoice: Option<Invoice>,
    invoices: Vec<Invoice>,
    dte_records: Vec<DteRecord>,
}

fn read_json<S: KeyValueStore, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, SessionError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Hydrates a session from the store, seeding demo data where the store
    /// has none: the fixture catalog, the demo DTE records, and an initial
    /// view chosen by the logged-in user's role.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the store fails or holds corrupt state.
    pub fn load(store: S) -> Result<Self, SessionError> {
        let user: Option<User> = read_json(&store, keys::USER)?;

        let catalog = match read_json::<S, Vec<Product>>(&store, keys::PRODUCTS)? {
            Some(products) => Catalog::from_products(products)?,
            None => fixtures::catalog_from_str(DEMO_CATALOG_YAML)?,
        };

        let cart: Cart = read_json(&store, keys::CART_ITEMS)?.unwrap_or_default();
        let current_invoice: Option<Invoice> = read_json(&store, keys::CURRENT_INVOICE)?;
        let invoices: Vec<Invoice> = read_json(&store, keys::INVOICES)?.unwrap_or_default();
        let dte_records: Vec<DteRecord> =
            read_json(&store, keys::DTE_RECORDS)?.unwrap_or_else(seed_records);

        let saved_view: Option<View> = read_json(&store, keys::CURRENT_VIEW)?;
        let view = match user.as_ref().map(|user| user.role) {
            Some(Role::Admin) => View::Dashboard,
            Some(Role::Cashier) => View::Cashier,
            _ => saved_view.unwrap_or(View::Shop),
        };

        let invoice_source_view: View =
            read_json(&store, keys::INVOICE_SOURCE_VIEW)?.unwrap_or(View::Shop);

        Ok(Self {
            store,
            user,
            view,
            invoice_source_view,
            catalog,
            cart,
            current_invoice,
            invoices,
            dte_records,
        })
    }

    /// Logged-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Current view.
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// View to return to from the invoice view.
    #[must_use]
    pub fn invoice_source_view(&self) -> View {
        self.invoice_source_view
    }

    /// Product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shopping cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Invoice currently on screen.
    #[must_use]
    pub fn current_invoice(&self) -> Option<&Invoice> {
        self.current_invoice.as_ref()
    }

    /// Issued invoices, most recent first.
    #[must_use]
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Tracked DTE records, most recent first.
    #[must_use]
    pub fn dte_records(&self) -> &[DteRecord] {
        &self.dte_records
    }

    /// Finds an invoice by id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvoiceNotFound`] for unknown ids.
    pub fn invoice(&self, invoice_id: &str) -> Result<&Invoice, SessionError> {
        self.invoices
            .iter()
            .find(|invoice| invoice.id == invoice_id)
            .ok_or_else(|| SessionError::InvoiceNotFound(invoice_id.to_string()))
    }

    /// Logs in against the demo accounts and lands on the role's home view.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] on bad credentials or storage failure.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, SessionError> {
        let user = auth::login(email, password)?;

        self.apply_login(user)
    }

    /// Registers a user (role detected from the email) and logs them in.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] on storage failure.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        nit: Option<&str>,
        now: &Zoned,
    ) -> Result<User, SessionError> {
        let user = auth::register(name, email, nit, now.timestamp().as_millisecond());

        self.apply_login(user)
    }

    fn apply_login(&mut self, user: User) -> Result<User, SessionError> {
        self.view = match user.role {
            Role::Admin => View::Dashboard,
            Role::Cashier => View::Cashier,
            Role::Customer => View::Shop,
        };

        info!(user = %user.email, role = %user.role, "logged in");

        self.user = Some(user.clone());
        self.persist_user()?;
        self.persist_view()?;

        Ok(user)
    }

    /// Logs out, dropping the user-specific state and returning to the shop.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] on storage failure.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.user = None;
        self.cart.clear();
        self.current_invoice = None;
        self.view = View::Shop;
        self.invoice_source_view = View::Shop;

        self.store.remove(keys::USER)?;
        self.store.remove(keys::CART_ITEMS)?;
        self.store.remove(keys::CURRENT_INVOICE)?;
        self.store.remove(keys::INVOICE_SOURCE_VIEW)?;
        self.persist_view()?;

        Ok(())
    }

    /// Switches to a view, enforcing its role gate. Navigating to the
    /// invoice view remembers the current view for back-navigation.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the gate rejects or storage fails.
    pub fn navigate(&mut self, view: View) -> Result<(), SessionError> {
        match view {
            View::Dashboard | View::Dte => {
                self.require_role(view, Role::Admin)?;
            }
            View::Cashier => {
                self.require_role(view, Role::Cashier)?;
            }
            View::Payment | View::Invoices => {
                self.require_user(view)?;
            }
            View::Shop | View::Cart | View::Invoice => {}
        }

        if view == View::Invoice {
            self.invoice_source_view = self.view;
            self.persist_source_view()?;
        }

        self.view = view;
        self.persist_view()?;

        Ok(())
    }

    /// Returns from the invoice view to wherever it was opened from.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] on storage failure.
    pub fn back_from_invoice(&mut self) -> Result<(), SessionError> {
        self.view = self.invoice_source_view;
        self.persist_view()?;

        Ok(())
    }

    /// Puts an existing invoice on screen and switches to the invoice view.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvoiceNotFound`] for unknown ids.
    pub fn view_invoice(&mut self, invoice_id: &str) -> Result<(), SessionError> {
        let invoice = self.invoice(invoice_id)?.clone();

        self.current_invoice = Some(invoice);
        self.invoice_source_view = self.view;
        self.view = View::Invoice;

        self.persist_current_invoice()?;
        self.persist_source_view()?;
        self.persist_view()?;

        Ok(())
    }

    /// Adds a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] for unknown codes, zero stock or storage
    /// failure.
    pub fn add_to_cart(&mut self, code: &str, quantity: u32) -> Result<(), SessionError> {
        let product = self
            .catalog
            .get_by_code(code)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(code.to_string()))?;

        self.cart.add(product, quantity)?;
        self.persist_cart()
    }

    /// Sets a cart line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] for unknown lines or storage failure.
    pub fn update_cart_quantity(&mut self, code: &str, quantity: u32) -> Result<(), SessionError> {
        self.cart.set_quantity(code, quantity)?;
        self.persist_cart()
    }

    /// Adds a product to the catalog (admin only); the code comes from the
    /// clock millis, as the original dashboard did.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the caller is not an admin or storage
    /// fails.
    pub fn add_product(&mut self, new: NewProduct, now: &Zoned) -> Result<String, SessionError> {
        self.require_role(View::Dashboard, Role::Admin)?;

        let code = now.timestamp().as_millisecond().to_string();

        self.catalog.insert(Product {
            code: code.clone(),
            name: new.name,
            price: new.price,
            stock: new.stock,
            category: new.category,
            image: new.image,
        })?;

        self.persist_products()?;

        Ok(code)
    }

    /// Applies a partial update to a product (admin only).
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the caller is not an admin, the code is
    /// unknown, or storage fails.
    pub fn update_product(
        &mut self,
        code: &str,
        update: ProductUpdate,
    ) -> Result<(), SessionError> {
        self.require_role(View::Dashboard, Role::Admin)?;
        self.catalog.update(code, update)?;
        self.persist_products()
    }

    /// Removes a product from the catalog (admin only).
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the caller is not an admin, the code is
    /// unknown, or storage fails.
    pub fn delete_product(&mut self, code: &str) -> Result<(), SessionError> {
        self.require_role(View::Dashboard, Role::Admin)?;
        self.catalog.remove(code)?;
        self.persist_products()
    }

    /// Processes a payment: validates the data, issues the invoice, opens a
    /// pending DTE record, clears the cart and lands on the invoice view.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if no user is logged in, the data is
    /// incomplete, the cart is empty, or storage fails.
    pub fn checkout(&mut self, payment: &PaymentData, now: &Zoned) -> Result<Invoice, SessionError> {
        self.require_user(View::Payment)?;
        payment.validate()?;

        if self.cart.is_empty() {
            return Err(SessionError::EmptyCart);
        }

        let cashier = match &self.user {
            Some(user) if user.role == Role::Cashier => Some(CashierRef {
                name: user.name.clone(),
                id: user.id.clone(),
            }),
            _ => None,
        };

        let millis = now.timestamp().as_millisecond();
        let invoice = Invoice::issue(
            format!("INV-{millis}"),
            Customer {
                name: payment.customer_name.clone(),
                nit: payment.customer_nit.clone(),
                email: payment.customer_email.clone(),
            },
            self.cart.items().to_vec(),
            now.date(),
            cashier,
        );

        let record = DteRecord {
            id: format!("DTE-{millis}"),
            customer_name: payment.customer_name.clone(),
            amount: invoice.total,
            status: DteRecordStatus::Pending,
            date: now.date(),
            xml_url: "#".to_string(),
            pdf_url: "#".to_string(),
        };

        info!(
            invoice = %invoice.id,
            total = %invoice.total,
            items = invoice.items.len(),
            "checkout completed"
        );

        self.invoices.insert(0, invoice.clone());
        self.current_invoice = Some(invoice.clone());
        self.dte_records.insert(0, record);
        self.cart.clear();
        self.invoice_source_view = self.view;
        self.view = View::Invoice;

        self.persist_invoices()?;
        self.persist_current_invoice()?;
        self.persist_records()?;
        self.persist_cart()?;
        self.persist_source_view()?;
        self.persist_view()?;

        Ok(invoice)
    }

    /// Moves an invoice to a later lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] for unknown ids, backward transitions or
    /// storage failure.
    pub fn update_invoice_status(
        &mut self,
        invoice_id: &str,
        status: InvoiceStatus,
    ) -> Result<(), SessionError> {
        let invoice = self
            .invoices
            .iter_mut()
            .find(|invoice| invoice.id == invoice_id)
            .ok_or_else(|| SessionError::InvoiceNotFound(invoice_id.to_string()))?;

        invoice.advance_status(status)?;

        if let Some(current) = &mut self.current_invoice
            && current.id == invoice_id
        {
            current.status = status;
        }

        self.persist_invoices()?;
        self.persist_current_invoice()?;

        Ok(())
    }

    /// Sends an invoice through the (simulated) mail transport, then marks
    /// it sent.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] for unknown ids or storage failure.
    pub fn send_invoice_by_email(
        &mut self,
        invoice_id: &str,
        email: &str,
        mailer: &Mailer,
    ) -> Result<(), SessionError> {
        let invoice = self.invoice(invoice_id)?.clone();

        mailer.send_invoice(&invoice, email);

        self.update_invoice_status(invoice_id, InvoiceStatus::Sent)
    }

    /// Settles a pending DTE record (admin only).
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the caller is not an admin, the record
    /// is unknown or already decided, or storage fails.
    pub fn decide_dte_record(
        &mut self,
        record_id: &str,
        status: DteRecordStatus,
    ) -> Result<(), SessionError> {
        self.require_role(View::Dte, Role::Admin)?;

        let record = self
            .dte_records
            .iter_mut()
            .find(|record| record.id == record_id)
            .ok_or_else(|| RecordError::NotFound(record_id.to_string()))?;

        record.decide(status)?;
        self.persist_records()
    }

    /// Renders a downloadable artifact for an invoice: the document is
    /// assembled on the spot from the invoice, the given clock and RNG.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] for unknown ids or rendering failure.
    pub fn download(
        &self,
        invoice_id: &str,
        kind: ArtifactKind,
        now: &Zoned,
        rng: &mut impl Rng,
    ) -> Result<Artifact, SessionError> {
        let invoice = self.invoice(invoice_id)?;
        let dte = Dte::from_invoice(invoice, now, rng);

        Ok(artifacts::generate(invoice, &dte, kind)?)
    }

    fn require_user(&self, view: View) -> Result<&User, SessionError> {
        self.user
            .as_ref()
            .ok_or(SessionError::LoginRequired(view))
    }

    fn require_role(&self, view: View, role: Role) -> Result<&User, SessionError> {
        match &self.user {
            Some(user) if user.role == role => Ok(user),
            Some(_) | None => Err(SessionError::RequiresRole { view, role }),
        }
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), SessionError> {
        let raw = serde_json::to_string(value)?;

        self.store.set(key, &raw)?;

        Ok(())
    }

    fn persist_user(&mut self) -> Result<(), SessionError> {
        match self.user.clone() {
            Some(user) => self.write_json(keys::USER, &user),
            None => Ok(self.store.remove(keys::USER)?),
        }
    }

    fn persist_products(&mut self) -> Result<(), SessionError> {
        let products = self.catalog.to_products();

        self.write_json(keys::PRODUCTS, &products)
    }

    fn persist_cart(&mut self) -> Result<(), SessionError> {
        let cart = self.cart.clone();

        self.write_json(keys::CART_ITEMS, &cart)
    }

    fn persist_current_invoice(&mut self) -> Result<(), SessionError> {
        match self.current_invoice.clone() {
            Some(invoice) => self.write_json(keys::CURRENT_INVOICE, &invoice),
            None => Ok(self.store.remove(keys::CURRENT_INVOICE)?),
        }
    }

    fn persist_invoices(&mut self) -> Result<(), SessionError> {
        let invoices = self.invoices.clone();

        self.write_json(keys::INVOICES, &invoices)
    }

    fn persist_records(&mut self) -> Result<(), SessionError> {
        let records = self.dte_records.clone();

        self.write_json(keys::DTE_RECORDS, &records)
    }

    fn persist_view(&mut self) -> Result<(), SessionError> {
        let view = self.view;

        self.write_json(keys::CURRENT_VIEW, &view)
    }

    fn persist_source_view(&mut self) -> Result<(), SessionError> {
        let view = self.invoice_source_view;

        self.write_json(keys::INVOICE_SOURCE_VIEW, &view)
    }
}
