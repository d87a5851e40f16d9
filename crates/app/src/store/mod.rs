//! Store
//!
//! Key-value persistence for the session state: serialized JSON values under
//! fixed keys, mirroring the original browser-local storage. There is no
//! schema versioning; a structural change to a stored shape invalidates old
//! data.

use mockall::automock;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// The fixed key set.
pub mod keys {
    /// Logged-in user.
    pub const USER: &str = "user";

    /// Product catalog.
    pub const PRODUCTS: &str = "products";

    /// Cart lines.
    pub const CART_ITEMS: &str = "cartItems";

    /// Invoice currently on screen.
    pub const CURRENT_INVOICE: &str = "currentInvoice";

    /// All issued invoices.
    pub const INVOICES: &str = "invoices";

    /// DTE records.
    pub const DTE_RECORDS: &str = "dteRecords";

    /// Last-visited view.
    pub const CURRENT_VIEW: &str = "currentView";

    /// View to return to from the invoice view.
    pub const INVOICE_SOURCE_VIEW: &str = "invoiceSourceView";
}

/// Errors from the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying IO failure.
    #[error("storage error")]
    Io(#[from] std::io::Error),
}

/// A key-value store of serialized JSON strings.
#[automock]
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage fails.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage fails.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage fails.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
