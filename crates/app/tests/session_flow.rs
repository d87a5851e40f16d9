//! Full storefront flows over a file-backed store: checkout, persistence
//! across sessions, invoice lifecycle, DTE decisions and downloads.

use std::time::Duration;

use bikestore::{artifacts::ArtifactKind, invoice::InvoiceStatus};
use bikestore_app::{
    checkout::{PaymentData, PaymentMethod},
    mailer::Mailer,
    records::DteRecordStatus,
    session::{Session, SessionError, View},
    store::FileStore,
};
use jiff::Zoned;
use rand::{SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use testresult::TestResult;

fn now() -> Zoned {
    "2024-01-15T10:30:00-06:00[-06:00]"
        .parse()
        .expect("valid timestamp literal")
}

fn card_payment() -> PaymentData {
    PaymentData {
        customer_name: "Juan Pérez".to_string(),
        customer_nit: "1234567-8".to_string(),
        customer_email: "cliente@ejemplo.com".to_string(),
        payment_method: PaymentMethod::Card,
        card_number: Some("4111111111111111".to_string()),
        expiry_date: Some("12/26".to_string()),
        cvv: Some("123".to_string()),
        account_number: None,
    }
}

#[test]
fn checkout_flow_creates_invoice_and_pending_record() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut session = Session::load(FileStore::open(dir.path())?)?;

    session.login("cliente@ejemplo.com", "cliente123")?;

    // Helmet (85.00) twice plus pump (25.00) once.
    session.add_to_cart("2", 2)?;
    session.add_to_cart("8", 1)?;

    let invoice = session.checkout(&card_payment(), &now())?;

    // 195.00 subtotal, 25.35 IVA, 220.35 total.
    assert_eq!(invoice.subtotal, Decimal::new(19_500, 2));
    assert_eq!(invoice.tax, Decimal::new(2535, 2));
    assert_eq!(invoice.total, Decimal::new(22_035, 2));
    assert_eq!(invoice.status, InvoiceStatus::Generated);
    assert!(invoice.id.starts_with("INV-"));

    assert!(session.cart().is_empty(), "checkout must clear the cart");
    assert_eq!(session.view(), View::Invoice);
    assert_eq!(session.invoices().len(), 1);

    // A pending DTE record was prepended to the three seeded ones.
    assert_eq!(session.dte_records().len(), 4);

    let record = session.dte_records().first().ok_or("missing record")?;

    assert_eq!(record.status, DteRecordStatus::Pending);
    assert_eq!(record.amount, invoice.total);
    assert!(record.id.starts_with("DTE-"));

    Ok(())
}

#[test]
fn state_survives_a_session_restart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let invoice_id;

    {
        let mut session = Session::load(FileStore::open(dir.path())?)?;

        session.login("cliente@ejemplo.com", "cliente123")?;
        session.add_to_cart("1", 1)?;

        invoice_id = session.checkout(&card_payment(), &now())?.id;
    }

    let session = Session::load(FileStore::open(dir.path())?)?;

    assert_eq!(session.invoices().len(), 1);
    assert_eq!(
        session.invoice(&invoice_id)?.total,
        Decimal::new(141_250, 2),
        "1250.00 + 13% must persist across restarts"
    );
    assert_eq!(session.dte_records().len(), 4);
    assert!(
        session.user().is_some(),
        "the logged-in user must be rehydrated"
    );

    Ok(())
}

#[test]
fn cashier_checkout_is_attributed() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut session = Session::load(FileStore::open(dir.path())?)?;

    session.login("cajera@adventureworks.com", "cajera123")?;

    assert_eq!(session.view(), View::Cashier);

    session.add_to_cart("3", 1)?;

    let invoice = session.checkout(&card_payment(), &now())?;

    assert_eq!(invoice.cashier_name.as_deref(), Some("María González"));
    assert_eq!(invoice.cashier_id.as_deref(), Some("cashier-1"));

    Ok(())
}

#[test]
fn send_by_email_marks_invoice_sent() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut session = Session::load(FileStore::open(dir.path())?)?;

    session.login("cliente@ejemplo.com", "cliente123")?;
    session.add_to_cart("2", 1)?;

    let invoice = session.checkout(&card_payment(), &now())?;
    let mailer = Mailer::with_delay(Duration::ZERO);

    session.send_invoice_by_email(&invoice.id, "cliente@ejemplo.com", &mailer)?;

    assert_eq!(session.invoice(&invoice.id)?.status, InvoiceStatus::Sent);

    session.update_invoice_status(&invoice.id, InvoiceStatus::Paid)?;

    let result = session.update_invoice_status(&invoice.id, InvoiceStatus::Generated);

    assert!(
        matches!(result, Err(SessionError::Invoice(_))),
        "status must not move backwards"
    );

    Ok(())
}

#[test]
fn admin_decides_pending_records_once() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut session = Session::load(FileStore::open(dir.path())?)?;

    session.login("admin@adventureworks.com", "admin123")?;

    // DTE-2024-002 is the seeded pending record.
    session.decide_dte_record("DTE-2024-002", DteRecordStatus::Approved)?;

    let record = session
        .dte_records()
        .iter()
        .find(|record| record.id == "DTE-2024-002")
        .ok_or("missing seeded record")?;

    assert_eq!(record.status, DteRecordStatus::Approved);

    let again = session.decide_dte_record("DTE-2024-002", DteRecordStatus::Rejected);

    assert!(matches!(again, Err(SessionError::Record(_))));

    Ok(())
}

#[test]
fn non_admin_cannot_decide_records() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut session = Session::load(FileStore::open(dir.path())?)?;

    session.login("cliente@ejemplo.com", "cliente123")?;

    let result = session.decide_dte_record("DTE-2024-002", DteRecordStatus::Approved);

    assert!(matches!(result, Err(SessionError::RequiresRole { .. })));

    Ok(())
}

#[test]
fn download_renders_all_artifact_kinds() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut session = Session::load(FileStore::open(dir.path())?)?;

    session.login("cliente@ejemplo.com", "cliente123")?;
    session.add_to_cart("8", 4)?;

    let invoice = session.checkout(&card_payment(), &now())?;
    let mut rng = StdRng::seed_from_u64(11);

    let json = session.download(&invoice.id, ArtifactKind::Json, &now(), &mut rng)?;
    let xml = session.download(&invoice.id, ArtifactKind::Xml, &now(), &mut rng)?;
    let pdf = session.download(&invoice.id, ArtifactKind::Pdf, &now(), &mut rng)?;

    assert_eq!(json.file_name, format!("dte-{}.json", invoice.id));
    assert!(json.contents.contains("\"cuerpoDocumento\""));
    assert_eq!(xml.mime, "application/xml");
    assert!(pdf.file_name.starts_with("DTE-"));

    let missing = session.download("INV-0", ArtifactKind::Json, &now(), &mut rng);

    assert!(matches!(missing, Err(SessionError::InvoiceNotFound(_))));

    Ok(())
}

#[test]
fn logout_clears_user_state_but_keeps_invoices() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut session = Session::load(FileStore::open(dir.path())?)?;

    session.login("cliente@ejemplo.com", "cliente123")?;
    session.add_to_cart("2", 1)?;
    session.checkout(&card_payment(), &now())?;
    session.logout()?;

    assert!(session.user().is_none());
    assert!(session.cart().is_empty());
    assert!(session.current_invoice().is_none());
    assert_eq!(session.view(), View::Shop);

    // Invoices and records are business data, not user-scoped state.
    let reloaded = Session::load(FileStore::open(dir.path())?)?;

    assert_eq!(reloaded.invoices().len(), 1);
    assert!(reloaded.user().is_none());

    Ok(())
}

#[test]
fn out_of_stock_product_cannot_be_added() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut session = Session::load(FileStore::open(dir.path())?)?;

    session.login("admin@adventureworks.com", "admin123")?;

    session.update_product(
        "21",
        bikestore::catalog::ProductUpdate {
            stock: Some(0),
            ..bikestore::catalog::ProductUpdate::default()
        },
    )?;

    let result = session.add_to_cart("21", 1);

    assert!(matches!(result, Err(SessionError::Cart(_))));

    Ok(())
}
