//! XML
//!
//! XML representation of an assembled document, filled from the same [`Dte`]
//! value the JSON serializer reads.

use std::fmt::Write;

use crate::{dte::Dte, invoice::Invoice};

/// Fixed mock certificate blob carried in the signature complement.
const CERTIFICADO: &str = "MIIEXjCCA0agAwIBAgIJAKZK4jqvKvKKMA0GCSqGSIb3DQEBCwUAMIGBMQswCQYD\
VQQGEwJTVjEQMA4GA1UECAwHU2FuU2FsMRAwDgYDVQQHDAdTYW5TYWwxEjAQBgNVBAoMCUJpa2VTdG9yZTEMMAoGA1UECwwDRF\
RFMQwwCgYDVQQDDANEVEUxHjAcBgkqhkiG9w0BCQEWD2R0ZUBiaWtlc3RvcmUuY29t";

/// Renders the XML document for an invoice and its assembled DTE.
#[must_use]
pub fn render(invoice: &Invoice, dte: &Dte) -> String {
    let mut out = String::with_capacity(4096);

    let emision = format!(
        "{}T{}.000-06:00",
        dte.identificacion.fec_emi, dte.identificacion.hor_emi
    );

    _ = writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    _ = writeln!(
        out,
        "<dte:GTDocumento xmlns:dte=\"http://www.mh.gob.sv/dte/fel/0.2.0\" Version=\"0.1\">"
    );
    _ = writeln!(out, "  <dte:SAT ClaseDocumento=\"dte\">");
    _ = writeln!(out, "    <dte:DTE ID=\"DatosCertificados\">");
    _ = writeln!(out, "      <dte:DatosEmision ID=\"DatosEmision\">");
    _ = writeln!(out, "        <dte:DatosGenerales ");
    _ = writeln!(out, "          Tipo=\"FACT\" ");
    _ = writeln!(out, "          FechaHoraEmision=\"{emision}\" ");
    _ = writeln!(out, "          MonedaOperacion=\"USD\" ");
    _ = writeln!(out, "          TipoOperacion=\"VENTA\"");
    _ = writeln!(
        out,
        "          NumeroDocumento=\"{}\"",
        escape(&invoice.id)
    );
    _ = writeln!(out, "        />");

    write_emisor(&mut out, dte);
    write_receptor(&mut out, dte);
    write_items(&mut out, dte);
    write_totales(&mut out, dte);
    write_complementos(&mut out, &emision);

    _ = writeln!(out, "      </dte:DatosEmision>");
    write_certificacion(&mut out, dte);
    _ = writeln!(out, "    </dte:DTE>");
    _ = writeln!(out, "  </dte:SAT>");
    _ = write!(out, "</dte:GTDocumento>");

    out
}

fn write_emisor(out: &mut String, dte: &Dte) {
    let emisor = &dte.emisor;
    let nombre_comercial = emisor.nombre_comercial.as_deref().unwrap_or_default();

    _ = writeln!(out, "        <dte:Emisor ");
    _ = writeln!(out, "          NITEmisor=\"{}\" ", escape(&emisor.nit));
    _ = writeln!(
        out,
        "          NombreEmisor=\"{}\" ",
        escape(&emisor.nombre)
    );
    _ = writeln!(out, "          CodigoEstablecimiento=\"1\" ");
    _ = writeln!(
        out,
        "          NombreComercial=\"{}\" ",
        escape(nombre_comercial)
    );
    _ = writeln!(out, "          AfiliacionIVA=\"GEN\"");
    _ = writeln!(out, "          Telefono=\"{}\"", escape(&emisor.telefono));
    _ = writeln!(
        out,
        "          CorreoEmisor=\"{}\"",
        escape(&emisor.correo)
    );
    _ = writeln!(out, "        />");
}

fn write_receptor(out: &mut String, dte: &Dte) {
    let receptor = &dte.receptor;

    _ = writeln!(out, "        <dte:Receptor ");
    _ = writeln!(
        out,
        "          IDReceptor=\"{}\" ",
        escape(receptor.num_documento.as_deref().unwrap_or_default())
    );
    _ = writeln!(
        out,
        "          NombreReceptor=\"{}\" ",
        escape(receptor.nombre.as_deref().unwrap_or_default())
    );
    _ = writeln!(
        out,
        "          CorreoReceptor=\"{}\"",
        escape(receptor.correo.as_deref().unwrap_or_default())
    );
    _ = writeln!(out, "        />");
}

fn write_items(out: &mut String, dte: &Dte) {
    _ = writeln!(out, "        <dte:Items>");

    for line in &dte.cuerpo_documento {
        let total = line.venta_gravada + line.iva_item;

        _ = writeln!(
            out,
            "          <dte:Item NumeroLinea=\"{}\" BienOServicio=\"B\">",
            line.num_item
        );
        _ = writeln!(
            out,
            "            <dte:Cantidad>{}</dte:Cantidad>",
            line.cantidad
        );
        _ = writeln!(out, "            <dte:UnidadMedida>UNI</dte:UnidadMedida>");
        _ = writeln!(
            out,
            "            <dte:Descripcion>{}</dte:Descripcion>",
            escape(&line.descripcion)
        );
        _ = writeln!(
            out,
            "            <dte:PrecioUnitario>{:.2}</dte:PrecioUnitario>",
            line.precio_uni
        );
        _ = writeln!(
            out,
            "            <dte:Precio>{:.2}</dte:Precio>",
            line.venta_gravada
        );
        _ = writeln!(out, "            <dte:Descuento>0.00</dte:Descuento>");
        _ = writeln!(out, "            <dte:Impuestos>");
        _ = writeln!(out, "              <dte:Impuesto>");
        _ = writeln!(
            out,
            "                <dte:NombreCorto>IVA</dte:NombreCorto>"
        );
        _ = writeln!(
            out,
            "                <dte:CodigoUnidadGravable>1</dte:CodigoUnidadGravable>"
        );
        _ = writeln!(
            out,
            "                <dte:MontoGravable>{:.2}</dte:MontoGravable>",
            line.venta_gravada
        );
        _ = writeln!(
            out,
            "                <dte:MontoImpuesto>{:.2}</dte:MontoImpuesto>",
            line.iva_item
        );
        _ = writeln!(out, "              </dte:Impuesto>");
        _ = writeln!(out, "            </dte:Impuestos>");
        _ = writeln!(out, "            <dte:Total>{total:.2}</dte:Total>");
        _ = writeln!(out, "          </dte:Item>");
    }

    _ = writeln!(out, "        </dte:Items>");
}

fn write_totales(out: &mut String, dte: &Dte) {
    let resumen = &dte.resumen;

    _ = writeln!(out, "        <dte:Totales>");
    _ = writeln!(out, "          <dte:TotalImpuestos>");
    _ = writeln!(
        out,
        "            <dte:TotalImpuesto NombreCorto=\"IVA\" TotalMontoImpuesto=\"{:.2}\"/>",
        resumen.total_iva
    );
    _ = writeln!(out, "          </dte:TotalImpuestos>");
    _ = writeln!(
        out,
        "          <dte:GranTotal>{:.2}</dte:GranTotal>",
        resumen.total_pagar
    );
    _ = writeln!(out, "        </dte:Totales>");
}

fn write_complementos(out: &mut String, emision: &str) {
    _ = writeln!(out, "        <dte:Complementos>");
    _ = writeln!(
        out,
        "          <dte:Complemento IDComplemento=\"1\" NombreComplemento=\"FirmaDigital\" \
URIComplemento=\"#FirmaDigital\">"
    );
    _ = writeln!(out, "            <dte:FirmaDigital>");
    _ = writeln!(
        out,
        "              <dte:Certificado>{CERTIFICADO}</dte:Certificado>"
    );
    _ = writeln!(
        out,
        "              <dte:FechaHoraFirma>{emision}</dte:FechaHoraFirma>"
    );
    _ = writeln!(out, "            </dte:FirmaDigital>");
    _ = writeln!(out, "          </dte:Complemento>");
    _ = writeln!(out, "        </dte:Complementos>");
}

fn write_certificacion(out: &mut String, dte: &Dte) {
    let emisor = &dte.emisor;
    let certificador = emisor.nombre_comercial.as_deref().unwrap_or(&emisor.nombre);

    _ = writeln!(out, "      <dte:Certificacion>");
    _ = writeln!(
        out,
        "        <dte:NITCertificador>{}</dte:NITCertificador>",
        escape(&emisor.nit)
    );
    _ = writeln!(
        out,
        "        <dte:NombreCertificador>{}</dte:NombreCertificador>",
        escape(certificador)
    );
    _ = writeln!(
        out,
        "        <dte:NumeroResolucion>RES-001-2024</dte:NumeroResolucion>"
    );
    _ = writeln!(
        out,
        "        <dte:FechaResolucion>2024-01-01</dte:FechaResolucion>"
    );
    _ = writeln!(out, "      </dte:Certificacion>");
}

/// Escapes XML text and attribute content.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::super::tests::{sample_dte, sample_invoice};
    use super::*;

    #[test]
    fn xml_carries_receiver_and_totals_from_the_dte() {
        let invoice = sample_invoice();
        let dte = sample_dte(&invoice);
        let xml = render(&invoice, &dte);

        assert!(xml.starts_with("<?xml version=\"1.0\""), "xml was: {xml}");
        assert!(xml.contains("NumeroDocumento=\"INV-1705314600000\""));
        assert!(xml.contains("NombreReceptor=\"Juan Pérez\""));
        // 240.00 subtotal, 31.20 IVA, 271.20 total
        assert!(xml.contains("TotalMontoImpuesto=\"31.20\""), "{xml}");
        assert!(xml.contains("<dte:GranTotal>271.20</dte:GranTotal>"));
        assert!(xml.ends_with("</dte:GTDocumento>"));
    }

    #[test]
    fn xml_emits_one_item_per_body_line() {
        let invoice = sample_invoice();
        let dte = sample_dte(&invoice);
        let xml = render(&invoice, &dte);

        assert_eq!(
            xml.matches("<dte:Item NumeroLinea=").count(),
            dte.cuerpo_documento.len()
        );
        assert!(xml.contains("<dte:PrecioUnitario>120.00</dte:PrecioUnitario>"));
        assert!(xml.contains("<dte:MontoImpuesto>31.20</dte:MontoImpuesto>"));
    }

    #[test]
    fn xml_escapes_markup_in_names() {
        let mut invoice = sample_invoice();

        invoice.customer_name = "Pérez & Hijos <S.A.>".to_string();

        let dte = sample_dte(&invoice);
        let xml = render(&invoice, &dte);

        assert!(
            xml.contains("NombreReceptor=\"Pérez &amp; Hijos &lt;S.A.&gt;\""),
            "xml was: {xml}"
        );
    }

    #[test]
    fn escape_handles_all_entities() {
        assert_eq!(escape("a&b<c>d\"e'f"), "a&amp;b&lt;c&gt;d&quot;e&apos;f");
    }
}
