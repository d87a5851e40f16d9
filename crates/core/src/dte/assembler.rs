//! Assembler
//!
//! Maps a sales [`Invoice`] into the fixed DTE schema. Pure: the emission
//! moment and the RNG are inputs, so the same invoice, clock and seed always
//! produce the same document.

use jiff::Zoned;
use rand::Rng;
use rust_decimal::Decimal;

use crate::{
    invoice::Invoice,
    money,
};

use super::{
    CuerpoItem, Direccion, Dte, Emisor, Extension, Identificacion, Pago, Receptor, Resumen,
    Tributo, control, letras,
};

/// Schema version emitted.
const VERSION: u32 = 1;

/// `"00"` = ambiente de pruebas.
const AMBIENTE_PRUEBAS: &str = "00";

/// `"01"` = factura.
const TIPO_DTE_FACTURA: &str = "01";

/// Summary tax code for IVA.
const TRIBUTO_IVA: &str = "20";

/// Unit of measure code for "unidad".
const UNI_MEDIDA_UNIDAD: u32 = 59;

/// Payment form code for cash.
const PAGO_EFECTIVO: &str = "01";

impl Dte {
    /// Assembles the electronic tax document for an invoice.
    ///
    /// `issued_at` stamps the identification block; `rng` feeds the control
    /// number and generation code.
    #[must_use]
    pub fn from_invoice(invoice: &Invoice, issued_at: &Zoned, rng: &mut impl Rng) -> Self {
        Self {
            identificacion: identificacion(issued_at, rng),
            documento_relacionado: None,
            emisor: emisor(),
            receptor: receptor(invoice),
            otros_documentos: None,
            venta_tercero: None,
            cuerpo_documento: cuerpo_documento(invoice),
            resumen: resumen(invoice),
            extension: Some(extension(invoice)),
            apendice: None,
        }
    }
}

fn identificacion(issued_at: &Zoned, rng: &mut impl Rng) -> Identificacion {
    Identificacion {
        version: VERSION,
        ambiente: AMBIENTE_PRUEBAS.to_string(),
        tipo_dte: TIPO_DTE_FACTURA.to_string(),
        numero_control: control::numero_control(rng, issued_at.timestamp()),
        codigo_generacion: control::codigo_generacion(rng),
        tipo_modelo: 1,
        tipo_operacion: 1,
        tipo_contingencia: None,
        motivo_contin: None,
        fec_emi: issued_at.strftime("%Y-%m-%d").to_string(),
        hor_emi: issued_at.strftime("%H:%M:%S").to_string(),
        tipo_moneda: "USD".to_string(),
    }
}

/// The fixed BikeStore Pro business identity.
fn emisor() -> Emisor {
    Emisor {
        nit: "12345678901234".to_string(),
        nrc: "123456".to_string(),
        nombre: "BIKESTORE PRO SOCIEDAD ANONIMA DE CAPITAL VARIABLE".to_string(),
        cod_actividad: "47730".to_string(),
        desc_actividad: "VENTA AL POR MENOR DE BICICLETAS Y ACCESORIOS".to_string(),
        nombre_comercial: Some("BikeStore Pro".to_string()),
        tipo_establecimiento: "01".to_string(),
        direccion: Direccion {
            departamento: "06".to_string(),
            municipio: "01".to_string(),
            complemento:
                "COLONIA ESCALÓN, AVENIDA MASFERRER NORTE, EDIFICIO COMERCIAL BIKESTORE, LOCAL 101"
                    .to_string(),
        },
        telefono: "+503 2222-3333".to_string(),
        correo: "ventas@bikestorepro.com".to_string(),
        cod_estable_mh: Some("0001".to_string()),
        cod_estable: Some("0001".to_string()),
        cod_punto_venta_mh: Some("0001".to_string()),
        cod_punto_venta: Some("TIENDA-01".to_string()),
    }
}

fn receptor(invoice: &Invoice) -> Receptor {
    // A dash marks a DUI ("13"); anything else is treated as a NIT ("36").
    // Heuristic carried over from the original; the value is not validated.
    let tipo_documento = if invoice.customer_nit.contains('-') {
        "13"
    } else {
        "36"
    };

    Receptor {
        tipo_documento: Some(tipo_documento.to_string()),
        num_documento: Some(invoice.customer_nit.clone()),
        nrc: None,
        nombre: Some(invoice.customer_name.clone()),
        cod_actividad: None,
        desc_actividad: None,
        direccion: Some(Direccion {
            departamento: "06".to_string(),
            municipio: "01".to_string(),
            complemento: "SAN SALVADOR, EL SALVADOR".to_string(),
        }),
        telefono: None,
        correo: Some(invoice.customer_email.clone()),
    }
}

fn cuerpo_documento(invoice: &Invoice) -> Vec<CuerpoItem> {
    invoice
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let venta_gravada = item.line_total();
            let num_item = u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1);

            CuerpoItem {
                num_item,
                tipo_item: 1,
                numero_documento: None,
                cantidad: item.quantity,
                codigo: Some(item.product.code.clone()),
                cod_tributo: None,
                uni_medida: UNI_MEDIDA_UNIDAD,
                descripcion: item.product.name.clone(),
                precio_uni: item.product.price,
                monto_descu: Decimal::ZERO,
                venta_no_suj: Decimal::ZERO,
                venta_exenta: Decimal::ZERO,
                venta_gravada,
                tributos: Some(vec![TRIBUTO_IVA.to_string()]),
                psv: Decimal::ZERO,
                no_gravado: Decimal::ZERO,
                iva_item: money::iva_rate() * venta_gravada,
            }
        })
        .collect()
}

fn resumen(invoice: &Invoice) -> Resumen {
    Resumen {
        total_no_suj: Decimal::ZERO,
        total_exenta: Decimal::ZERO,
        total_gravada: invoice.subtotal,
        sub_total_ventas: invoice.subtotal,
        descu_no_suj: Decimal::ZERO,
        descu_exenta: Decimal::ZERO,
        descu_gravada: Decimal::ZERO,
        porcentaje_descuento: Decimal::ZERO,
        total_descu: Decimal::ZERO,
        tributos: Some(vec![Tributo {
            codigo: TRIBUTO_IVA.to_string(),
            descripcion: "Impuesto al Valor Agregado 13%".to_string(),
            valor: invoice.tax,
        }]),
        sub_total: invoice.subtotal,
        iva_rete1: Decimal::ZERO,
        rete_renta: Decimal::ZERO,
        monto_total_operacion: invoice.total,
        total_no_gravado: Decimal::ZERO,
        total_pagar: invoice.total,
        total_letras: letras::numero_a_letras(invoice.total),
        total_iva: invoice.tax,
        saldo_favor: Decimal::ZERO,
        condicion_operacion: 1,
        pagos: Some(vec![Pago {
            codigo: PAGO_EFECTIVO.to_string(),
            monto_pago: invoice.total,
            referencia: None,
            plazo: None,
            periodo: None,
        }]),
        num_pago_electronico: None,
    }
}

fn extension(invoice: &Invoice) -> Extension {
    Extension {
        nomb_entrega: Some("SISTEMA AUTOMATIZADO BIKESTORE PRO".to_string()),
        docu_entrega: Some("12345678-9".to_string()),
        nomb_recibe: Some(invoice.customer_name.clone()),
        docu_recibe: Some(invoice.customer_nit.clone()),
        observaciones: Some(format!(
            "Factura generada automáticamente por el sistema de BikeStore Pro. \
             Total de artículos: {}",
            invoice.items.len()
        )),
        placa_vehiculo: None,
    }
}
