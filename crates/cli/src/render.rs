//! Render
//!
//! Terminal tables for the storefront views.

use std::io;

use bikestore::{cart::Cart, catalog::Catalog, invoice::Invoice, money};
use bikestore_app::records::DteRecord;
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::Columns, object::Rows},
};

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    money_columns: std::ops::Range<usize>,
) -> io::Result<()> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(money_columns), Alignment::right());

    writeln!(out, "{table}")
}

/// Prints the product listing.
///
/// # Errors
///
/// Returns an [`io::Error`] if the output cannot be written.
pub fn write_products(out: &mut impl io::Write, catalog: &Catalog) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Code", "Product", "Category", "Price", "Stock"]);

    for product in catalog.iter() {
        builder.push_record([
            product.code.clone(),
            product.name.clone(),
            product.category.clone(),
            format!("{}", money::usd(product.price)),
            product.stock.to_string(),
        ]);
    }

    write_table(out, builder, 3..5)
}

/// Prints the cart lines and totals.
///
/// # Errors
///
/// Returns an [`io::Error`] if the output cannot be written.
pub fn write_cart(out: &mut impl io::Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "The cart is empty.");
    }

    let mut builder = Builder::default();

    builder.push_record(["Code", "Product", "Qty", "Unit Price", "Line Total"]);

    for line in cart.iter() {
        builder.push_record([
            line.product.code.clone(),
            line.product.name.clone(),
            line.quantity.to_string(),
            format!("{}", money::usd(line.product.price)),
            format!("{}", money::usd(line.line_total())),
        ]);
    }

    write_table(out, builder, 3..5)?;

    let subtotal = cart.subtotal();
    let tax = money::iva(subtotal);

    writeln!(out, "  Subtotal: {}", money::usd(subtotal))?;
    writeln!(out, "  IVA (13%): {}", money::usd(tax))?;
    writeln!(out, "  Total: {}", money::usd(subtotal + tax))
}

/// Prints one invoice with its lines.
///
/// # Errors
///
/// Returns an [`io::Error`] if the output cannot be written.
pub fn write_invoice(out: &mut impl io::Write, invoice: &Invoice) -> io::Result<()> {
    writeln!(out, "Factura {} ({})", invoice.id, invoice.status)?;
    writeln!(
        out,
        "Cliente: {} · NIT: {} · {}",
        invoice.customer_name, invoice.customer_nit, invoice.customer_email
    )?;

    if let Some(cashier) = &invoice.cashier_name {
        writeln!(out, "Cajera: {cashier}")?;
    }

    writeln!(out, "Fecha: {}", invoice.date)?;

    let mut builder = Builder::default();

    builder.push_record(["#", "Product", "Qty", "Unit Price", "Line Total"]);

    for (index, line) in invoice.items.iter().enumerate() {
        builder.push_record([
            (index + 1).to_string(),
            line.product.name.clone(),
            line.quantity.to_string(),
            format!("{}", money::usd(line.product.price)),
            format!("{}", money::usd(line.line_total())),
        ]);
    }

    write_table(out, builder, 3..5)?;

    writeln!(out, "  Subtotal: {}", money::usd(invoice.subtotal))?;
    writeln!(out, "  IVA (13%): {}", money::usd(invoice.tax))?;
    writeln!(out, "  Total: {}", money::usd(invoice.total))
}

/// Prints the invoice list, most recent first.
///
/// # Errors
///
/// Returns an [`io::Error`] if the output cannot be written.
pub fn write_invoices(out: &mut impl io::Write, invoices: &[Invoice]) -> io::Result<()> {
    if invoices.is_empty() {
        return writeln!(out, "No invoices yet.");
    }

    let mut builder = Builder::default();

    builder.push_record(["Invoice", "Date", "Customer", "Total", "Status"]);

    for invoice in invoices {
        builder.push_record([
            invoice.id.clone(),
            invoice.date.to_string(),
            invoice.customer_name.clone(),
            format!("{}", money::usd(invoice.total)),
            invoice.status.to_string(),
        ]);
    }

    write_table(out, builder, 3..4)
}

/// Prints the DTE record list.
///
/// # Errors
///
/// Returns an [`io::Error`] if the output cannot be written.
pub fn write_records(out: &mut impl io::Write, records: &[DteRecord]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No DTE records.");
    }

    let mut builder = Builder::default();

    builder.push_record(["Record", "Date", "Customer", "Amount", "Status"]);

    for record in records {
        builder.push_record([
            record.id.clone(),
            record.date.to_string(),
            record.customer_name.clone(),
            format!("{}", money::usd(record.amount)),
            record.status.to_string(),
        ]);
    }

    write_table(out, builder, 3..4)
}

#[cfg(test)]
mod tests {
    use bikestore::fixtures;
    use testresult::TestResult;

    use super::*;

    const FIXTURE: &str = "\
products:
  - code: \"1\"
    name: Mountain Bike Adventure Pro
    price: 1250.00
    stock: 15
    category: Bicicletas
    image: \"\"
";

    #[test]
    fn products_table_lists_names_and_prices() -> TestResult {
        let catalog = fixtures::catalog_from_str(FIXTURE)?;
        let mut out = Vec::new();

        write_products(&mut out, &catalog)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Mountain Bike Adventure Pro"));
        assert!(output.contains("$1,250.00"));
        assert!(output.contains("Stock"));

        Ok(())
    }

    #[test]
    fn cart_table_shows_totals() -> TestResult {
        let catalog = fixtures::catalog_from_str(FIXTURE)?;
        let mut cart = Cart::new();

        cart.add(
            catalog.get_by_code("1").ok_or("missing product")?.clone(),
            2,
        )?;

        let mut out = Vec::new();

        write_cart(&mut out, &cart)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Subtotal: $2,500.00"));
        assert!(output.contains("IVA (13%): $325.00"));
        assert!(output.contains("Total: $2,825.00"));

        Ok(())
    }

    #[test]
    fn empty_cart_prints_a_message() -> TestResult {
        let mut out = Vec::new();

        write_cart(&mut out, &Cart::new())?;

        assert_eq!(String::from_utf8(out)?, "The cart is empty.\n");

        Ok(())
    }
}
