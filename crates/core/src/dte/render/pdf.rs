//! PDF
//!
//! Plain-text mock PDF (a hand-built PDF 1.4 stream) for an assembled
//! document. Every figure comes from the [`Dte`] itself, so the printed
//! representation always matches the JSON and XML.

use std::fmt::Write;

use crate::{dte::Dte, invoice::Invoice};

/// Renders the mock PDF document for an invoice and its assembled DTE.
#[must_use]
pub fn render(invoice: &Invoice, dte: &Dte) -> String {
    let mut out = String::with_capacity(6144);

    let fecha = &dte.identificacion.fec_emi;
    let hora = &dte.identificacion.hor_emi;

    _ = writeln!(out, "%PDF-1.4");
    _ = writeln!(out, "1 0 obj");
    _ = writeln!(out, "<<");
    _ = writeln!(out, "/Type /Catalog");
    _ = writeln!(out, "/Pages 2 0 R");
    _ = writeln!(out, ">>");
    _ = writeln!(out, "endobj");
    _ = writeln!(out);
    _ = writeln!(out, "2 0 obj");
    _ = writeln!(out, "<<");
    _ = writeln!(out, "/Type /Pages");
    _ = writeln!(out, "/Kids [3 0 R]");
    _ = writeln!(out, "/Count 1");
    _ = writeln!(out, ">>");
    _ = writeln!(out, "endobj");
    _ = writeln!(out);
    _ = writeln!(out, "3 0 obj");
    _ = writeln!(out, "<<");
    _ = writeln!(out, "/Type /Page");
    _ = writeln!(out, "/Parent 2 0 R");
    _ = writeln!(out, "/MediaBox [0 0 612 792]");
    _ = writeln!(out, "/Contents 4 0 R");
    _ = writeln!(out, "/Resources <<");
    _ = writeln!(out, "/Font <<");
    _ = writeln!(out, "/F1 5 0 R");
    _ = writeln!(out, "/F2 6 0 R");
    _ = writeln!(out, ">>");
    _ = writeln!(out, ">>");
    _ = writeln!(out, ">>");
    _ = writeln!(out, "endobj");
    _ = writeln!(out);
    _ = writeln!(out, "4 0 obj");
    _ = writeln!(out, "<<");
    _ = writeln!(out, "/Length 4500");
    _ = writeln!(out, ">>");
    _ = writeln!(out, "stream");
    _ = writeln!(out, "BT");
    _ = writeln!(out, "/F2 14 Tf");
    _ = writeln!(out, "50 750 Td");
    _ = writeln!(out, "(DOCUMENTO TRIBUTARIO ELECTRONICO) Tj");
    _ = writeln!(out, "0 -20 Td");
    _ = writeln!(out, "(FACTURA) Tj");
    _ = writeln!(out, "0 -40 Td");
    _ = writeln!(out, "/F1 10 Tf");
    _ = writeln!(
        out,
        "(Ministerio de Hacienda - Republica de El Salvador) Tj"
    );
    _ = writeln!(out, "0 -15 Td");
    _ = writeln!(out, "(Fecha y Hora de Generacion: {fecha} {hora}) Tj");
    _ = writeln!(out);

    write_header_box(&mut out, dte);
    write_document_info(&mut out, invoice, dte, fecha, hora);
    write_receiver_box(&mut out, dte);
    write_items_table(&mut out, dte);
    write_totals(&mut out, dte);
    write_payment(&mut out, dte);
    write_footer(&mut out, dte);
    write_signature(&mut out, invoice, dte, fecha);

    _ = writeln!(out, "ET");
    _ = writeln!(out, "endstream");
    _ = writeln!(out, "endobj");
    _ = writeln!(out);
    _ = writeln!(out, "5 0 obj");
    _ = writeln!(out, "<<");
    _ = writeln!(out, "/Type /Font");
    _ = writeln!(out, "/Subtype /Type1");
    _ = writeln!(out, "/BaseFont /Helvetica");
    _ = writeln!(out, ">>");
    _ = writeln!(out, "endobj");
    _ = writeln!(out);
    _ = writeln!(out, "6 0 obj");
    _ = writeln!(out, "<<");
    _ = writeln!(out, "/Type /Font");
    _ = writeln!(out, "/Subtype /Type1");
    _ = writeln!(out, "/BaseFont /Helvetica-Bold");
    _ = writeln!(out, ">>");
    _ = writeln!(out, "endobj");
    _ = writeln!(out);
    _ = writeln!(out, "xref");
    _ = writeln!(out, "0 7");
    _ = writeln!(out, "0000000000 65535 f ");
    _ = writeln!(out, "0000000009 00000 n ");
    _ = writeln!(out, "0000000058 00000 n ");
    _ = writeln!(out, "0000000115 00000 n ");
    _ = writeln!(out, "0000000274 00000 n ");
    _ = writeln!(out, "0000004826 00000 n ");
    _ = writeln!(out, "0000004904 00000 n ");
    _ = writeln!(out, "trailer");
    _ = writeln!(out, "<<");
    _ = writeln!(out, "/Size 7");
    _ = writeln!(out, "/Root 1 0 R");
    _ = writeln!(out, ">>");
    _ = writeln!(out, "startxref");
    _ = writeln!(out, "4987");
    _ = write!(out, "%%EOF");

    out
}

fn write_header_box(out: &mut String, dte: &Dte) {
    let emisor = &dte.emisor;
    let comercial = emisor.nombre_comercial.as_deref().unwrap_or_default();

    _ = writeln!(out, "% Header Box");
    _ = writeln!(out, "50 680 512 60 re");
    _ = writeln!(out, "S");
    _ = writeln!(out);
    _ = writeln!(out, "% Company Info");
    _ = writeln!(out, "/F2 12 Tf");
    _ = writeln!(out, "60 720 Td");
    _ = writeln!(out, "({comercial}) Tj");
    _ = writeln!(out, "0 -15 Td");
    _ = writeln!(out, "/F1 10 Tf");
    _ = writeln!(out, "({}) Tj", emisor.nombre);
    _ = writeln!(out, "0 -15 Td");
    _ = writeln!(out, "(NIT: {}) Tj", emisor.nit);
    _ = writeln!(out, "0 -15 Td");
    _ = writeln!(out, "(NRC: {}) Tj", emisor.nrc);
    _ = writeln!(out);
    _ = writeln!(out, "% QR Code placeholder");
    _ = writeln!(out, "480 690 50 50 re");
    _ = writeln!(out, "S");
    _ = writeln!(out, "485 715 Td");
    _ = writeln!(out, "/F1 8 Tf");
    _ = writeln!(out, "(QR CODE) Tj");
    _ = writeln!(out);
}

fn write_document_info(out: &mut String, invoice: &Invoice, dte: &Dte, fecha: &str, hora: &str) {
    let identificacion = &dte.identificacion;

    _ = writeln!(out, "% Document Info");
    _ = writeln!(out, "350 720 Td");
    _ = writeln!(out, "/F1 10 Tf");
    _ = writeln!(out, "(No. de Control: {}) Tj", identificacion.numero_control);
    _ = writeln!(out, "0 -12 Td");
    _ = writeln!(
        out,
        "(Codigo de Generacion: {}) Tj",
        identificacion.codigo_generacion
    );
    _ = writeln!(out, "0 -12 Td");
    _ = writeln!(out, "(Sello de Recepcion: MH) Tj");
    _ = writeln!(out, "0 -12 Td");
    _ = writeln!(out, "(Fecha y Hora de Procesamiento:) Tj");
    _ = writeln!(out, "0 -10 Td");
    _ = writeln!(out, "({fecha} {hora}) Tj");
    _ = writeln!(out);

    // Keeps the invoice id visible even though the control number differs.
    _ = writeln!(out, "0 -12 Td");
    _ = writeln!(out, "(Factura: {}) Tj", invoice.id);
    _ = writeln!(out);
}

fn write_receiver_box(out: &mut String, dte: &Dte) {
    let receptor = &dte.receptor;

    _ = writeln!(out, "% Customer Info Section");
    _ = writeln!(out, "50 620 512 40 re");
    _ = writeln!(out, "S");
    _ = writeln!(out, "60 650 Td");
    _ = writeln!(out, "/F2 10 Tf");
    _ = writeln!(out, "(DATOS DEL RECEPTOR) Tj");
    _ = writeln!(out, "0 -15 Td");
    _ = writeln!(out, "/F1 9 Tf");
    _ = writeln!(
        out,
        "(Nombre: {}) Tj",
        receptor.nombre.as_deref().unwrap_or_default()
    );
    _ = writeln!(out, "200 0 Td");
    _ = writeln!(
        out,
        "(Documento: {}) Tj",
        receptor.num_documento.as_deref().unwrap_or_default()
    );
    _ = writeln!(out, "-200 -12 Td");
    _ = writeln!(out, "(Actividad Economica: CONSUMIDOR FINAL) Tj");
    _ = writeln!(out, "200 0 Td");
    _ = writeln!(out, "(Direccion: SAN SALVADOR) Tj");
    _ = writeln!(out);
}

fn write_items_table(out: &mut String, dte: &Dte) {
    _ = writeln!(out, "% Items Table Header");
    _ = writeln!(out, "50 560 512 25 re");
    _ = writeln!(out, "S");
    _ = writeln!(out, "60 575 Td");
    _ = writeln!(out, "/F2 9 Tf");
    _ = writeln!(out, "(No.) Tj");
    _ = writeln!(out, "80 0 Td");
    _ = writeln!(out, "(Cantidad) Tj");
    _ = writeln!(out, "80 0 Td");
    _ = writeln!(out, "(Descripcion) Tj");
    _ = writeln!(out, "150 0 Td");
    _ = writeln!(out, "(Precio Unit.) Tj");
    _ = writeln!(out, "80 0 Td");
    _ = writeln!(out, "(Ventas No Suj.) Tj");
    _ = writeln!(out, "80 0 Td");
    _ = writeln!(out, "(Ventas Exentas) Tj");
    _ = writeln!(out, "80 0 Td");
    _ = writeln!(out, "(Ventas Gravadas) Tj");
    _ = writeln!(out);
    _ = writeln!(out, "% Items");

    for (index, line) in dte.cuerpo_documento.iter().enumerate() {
        let y_pos = 550_i64 - i64::try_from(index).unwrap_or_default() * 15;
        let descripcion: String = line.descripcion.chars().take(20).collect();

        _ = writeln!(out, "60 {y_pos} Td");
        _ = writeln!(out, "/F1 8 Tf");
        _ = writeln!(out, "({}) Tj", line.num_item);
        _ = writeln!(out, "80 0 Td");
        _ = writeln!(out, "({}) Tj", line.cantidad);
        _ = writeln!(out, "80 0 Td");
        _ = writeln!(out, "({descripcion}) Tj");
        _ = writeln!(out, "150 0 Td");
        _ = writeln!(out, "(${:.2}) Tj", line.precio_uni);
        _ = writeln!(out, "80 0 Td");
        _ = writeln!(out, "($0.00) Tj");
        _ = writeln!(out, "80 0 Td");
        _ = writeln!(out, "($0.00) Tj");
        _ = writeln!(out, "80 0 Td");
        _ = writeln!(out, "(${:.2}) Tj", line.venta_gravada);
        _ = writeln!(out, "-480 0 Td");
    }

    _ = writeln!(out);
}

fn write_totals(out: &mut String, dte: &Dte) {
    let resumen = &dte.resumen;

    _ = writeln!(out, "% Totals Section");
    _ = writeln!(out, "50 400 512 80 re");
    _ = writeln!(out, "S");
    _ = writeln!(out, "60 470 Td");
    _ = writeln!(out, "/F2 10 Tf");
    _ = writeln!(out, "(RESUMEN) Tj");
    _ = writeln!(out, "0 -15 Td");
    _ = writeln!(out, "/F1 9 Tf");
    _ = writeln!(
        out,
        "(Suma de Operaciones: ${:.2}) Tj",
        resumen.sub_total_ventas
    );
    _ = writeln!(out, "0 -12 Td");
    _ = writeln!(
        out,
        "(Total de Operaciones Exentas: ${:.2}) Tj",
        resumen.total_exenta
    );
    _ = writeln!(out, "0 -12 Td");
    _ = writeln!(
        out,
        "(Total de Operaciones Gravadas: ${:.2}) Tj",
        resumen.total_gravada
    );
    _ = writeln!(out, "0 -12 Td");
    _ = writeln!(out, "(Sub-Total: ${:.2}) Tj", resumen.sub_total);
    _ = writeln!(out, "0 -12 Td");
    _ = writeln!(out, "(IVA Percibido (13%): ${:.2}) Tj", resumen.total_iva);
    _ = writeln!(out, "0 -12 Td");
    _ = writeln!(out, "/F2 10 Tf");
    _ = writeln!(out, "(TOTAL A PAGAR: ${:.2}) Tj", resumen.total_pagar);
    _ = writeln!(out);
}

fn write_payment(out: &mut String, dte: &Dte) {
    _ = writeln!(out, "% Payment Info");
    _ = writeln!(out, "50 300 512 40 re");
    _ = writeln!(out, "S");
    _ = writeln!(out, "60 330 Td");
    _ = writeln!(out, "/F2 10 Tf");
    _ = writeln!(out, "(CONDICION DE LA OPERACION) Tj");
    _ = writeln!(out, "0 -15 Td");
    _ = writeln!(out, "/F1 9 Tf");
    _ = writeln!(out, "(Contado) Tj");
    _ = writeln!(out, "200 0 Td");
    _ = writeln!(out, "(Forma de Pago: Efectivo) Tj");
    _ = writeln!(out, "-200 -12 Td");
    _ = writeln!(out, "(Monto: ${:.2}) Tj", dte.resumen.total_pagar);
    _ = writeln!(out);
}

fn write_footer(out: &mut String, dte: &Dte) {
    _ = writeln!(out, "% Footer");
    _ = writeln!(out, "50 200 512 60 re");
    _ = writeln!(out, "S");
    _ = writeln!(out, "60 250 Td");
    _ = writeln!(out, "/F1 8 Tf");
    _ = writeln!(out, "(Valor en Letras: {}) Tj", dte.resumen.total_letras);
    _ = writeln!(out, "0 -15 Td");
    _ = writeln!(
        out,
        "(Observaciones: Factura generada electronicamente por BikeStore Pro) Tj"
    );
    _ = writeln!(out, "0 -15 Td");
    _ = writeln!(
        out,
        "(Este documento es una representacion impresa de un DTE) Tj"
    );
    _ = writeln!(out, "0 -15 Td");
    _ = writeln!(
        out,
        "(Para verificar este documento ingrese a: \
https://admin.factura.gob.sv/consultaPublica) Tj"
    );
    _ = writeln!(out);
}

fn write_signature(out: &mut String, invoice: &Invoice, dte: &Dte, fecha: &str) {
    _ = writeln!(out, "% Digital Signature");
    _ = writeln!(out, "50 100 512 40 re");
    _ = writeln!(out, "S");
    _ = writeln!(out, "60 130 Td");
    _ = writeln!(out, "/F2 9 Tf");
    _ = writeln!(out, "(FIRMA ELECTRONICA) Tj");
    _ = writeln!(out, "0 -12 Td");
    _ = writeln!(out, "/F1 7 Tf");
    _ = writeln!(
        out,
        "(Sello Digital: MH-DTE-{}-{}) Tj",
        invoice.id, dte.identificacion.codigo_generacion
    );
    _ = writeln!(out, "0 -10 Td");
    _ = writeln!(
        out,
        "(Cadena Original: ||1.0|DTE-01|{}|{fecha}|{:.2}||) Tj",
        invoice.id, dte.resumen.total_pagar
    );
    _ = writeln!(out);
}
