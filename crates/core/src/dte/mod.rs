//! DTE
//!
//! Documento Tributario Electrónico: the fixed, deeply nested document schema
//! published by the Ministerio de Hacienda for electronic invoices (tipo 01),
//! and its assembly from a sales [`Invoice`](crate::invoice::Invoice).
//!
//! Serde field names match the official JSON exactly (camelCase Spanish).
//! This is a mocked rendition for the storefront prototype: control numbers
//! and generation codes come from an ordinary RNG and carry no fiscal
//! validity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod assembler;
pub mod control;
pub mod letras;
pub mod render;

/// Identification block: document type, numbering and emission moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identificacion {
    /// Schema version.
    pub version: u32,

    /// `"00"` pruebas, `"01"` producción.
    pub ambiente: String,

    /// Document type; `"01"` is a factura.
    pub tipo_dte: String,

    /// Formatted control number (see [`control::numero_control`]).
    pub numero_control: String,

    /// Generation code (see [`control::codigo_generacion`]).
    pub codigo_generacion: String,

    /// 1 = facturación normal.
    pub tipo_modelo: u8,

    /// 1 = transmisión normal.
    pub tipo_operacion: u8,

    /// Contingency type; null outside contingency operation.
    pub tipo_contingencia: Option<u8>,

    /// Contingency reason; null outside contingency operation.
    pub motivo_contin: Option<String>,

    /// Emission date, `YYYY-MM-DD`.
    pub fec_emi: String,

    /// Emission time, `HH:MM:SS`.
    pub hor_emi: String,

    /// Operation currency.
    pub tipo_moneda: String,
}

/// Address block used by both issuer and receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Direccion {
    /// Department code (`"06"` = San Salvador).
    pub departamento: String,

    /// Municipality code.
    pub municipio: String,

    /// Free-form address line.
    pub complemento: String,
}

/// Issuer block: the fixed business identity of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emisor {
    /// Issuer NIT.
    pub nit: String,

    /// Issuer NRC.
    pub nrc: String,

    /// Registered business name.
    pub nombre: String,

    /// Economic activity code.
    pub cod_actividad: String,

    /// Economic activity description.
    pub desc_actividad: String,

    /// Trade name.
    pub nombre_comercial: Option<String>,

    /// Establishment type; `"01"` = casa matriz.
    pub tipo_establecimiento: String,

    /// Establishment address.
    pub direccion: Direccion,

    /// Contact phone.
    pub telefono: String,

    /// Contact email.
    pub correo: String,

    /// Establishment code assigned by Hacienda.
    #[serde(rename = "codEstableMH")]
    pub cod_estable_mh: Option<String>,

    /// Establishment code assigned by the issuer.
    pub cod_estable: Option<String>,

    /// Point-of-sale code assigned by Hacienda.
    #[serde(rename = "codPuntoVentaMH")]
    pub cod_punto_venta_mh: Option<String>,

    /// Point-of-sale code assigned by the issuer.
    pub cod_punto_venta: Option<String>,
}

/// Receiver block, derived from the invoiced customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receptor {
    /// Identity document type: `"36"` NIT, `"13"` DUI.
    pub tipo_documento: Option<String>,

    /// Identity document number.
    pub num_documento: Option<String>,

    /// Receiver NRC, when registered.
    pub nrc: Option<String>,

    /// Receiver name.
    pub nombre: Option<String>,

    /// Economic activity code.
    pub cod_actividad: Option<String>,

    /// Economic activity description.
    pub desc_actividad: Option<String>,

    /// Receiver address.
    pub direccion: Option<Direccion>,

    /// Contact phone.
    pub telefono: Option<String>,

    /// Contact email.
    pub correo: Option<String>,
}

/// One line of the document body, mapped from a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuerpoItem {
    /// 1-based line number.
    pub num_item: u32,

    /// 1 = bien, 2 = servicio.
    pub tipo_item: u8,

    /// Related document number, unused for facturas.
    pub numero_documento: Option<String>,

    /// Units sold.
    pub cantidad: u32,

    /// Product code.
    pub codigo: Option<String>,

    /// Tax code override, unused here.
    pub cod_tributo: Option<String>,

    /// Unit of measure; 59 = unidad.
    pub uni_medida: u32,

    /// Line description (product name).
    pub descripcion: String,

    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub precio_uni: Decimal,

    /// Line discount amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub monto_descu: Decimal,

    /// Non-subject sales amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub venta_no_suj: Decimal,

    /// Exempt sales amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub venta_exenta: Decimal,

    /// Taxed sales amount (price × quantity).
    #[serde(with = "rust_decimal::serde::float")]
    pub venta_gravada: Decimal,

    /// Applicable tax codes; `"20"` = IVA.
    pub tributos: Option<Vec<String>>,

    /// Suggested retail price.
    #[serde(with = "rust_decimal::serde::float")]
    pub psv: Decimal,

    /// Untaxed amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub no_gravado: Decimal,

    /// IVA attributable to this line.
    #[serde(with = "rust_decimal::serde::float")]
    pub iva_item: Decimal,
}

/// A tax entry in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tributo {
    /// Tax code.
    pub codigo: String,

    /// Tax description.
    pub descripcion: String,

    /// Tax amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub valor: Decimal,
}

/// A payment entry in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pago {
    /// Payment form code; `"01"` = efectivo.
    pub codigo: String,

    /// Amount paid by this form.
    #[serde(with = "rust_decimal::serde::float")]
    pub monto_pago: Decimal,

    /// Payment reference.
    pub referencia: Option<String>,

    /// Credit term.
    pub plazo: Option<String>,

    /// Credit period.
    pub periodo: Option<u32>,
}

/// Summary block: totals, taxes, amount in words and payment condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resumen {
    /// Total non-subject sales.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_no_suj: Decimal,

    /// Total exempt sales.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_exenta: Decimal,

    /// Total taxed sales.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_gravada: Decimal,

    /// Sum of all sales classes.
    #[serde(with = "rust_decimal::serde::float")]
    pub sub_total_ventas: Decimal,

    /// Discount on non-subject sales.
    #[serde(with = "rust_decimal::serde::float")]
    pub descu_no_suj: Decimal,

    /// Discount on exempt sales.
    #[serde(with = "rust_decimal::serde::float")]
    pub descu_exenta: Decimal,

    /// Discount on taxed sales.
    #[serde(with = "rust_decimal::serde::float")]
    pub descu_gravada: Decimal,

    /// Global discount percentage.
    #[serde(with = "rust_decimal::serde::float")]
    pub porcentaje_descuento: Decimal,

    /// Total discount amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_descu: Decimal,

    /// Summary tax entries.
    pub tributos: Option<Vec<Tributo>>,

    /// Subtotal after discounts.
    #[serde(with = "rust_decimal::serde::float")]
    pub sub_total: Decimal,

    /// Retained IVA (1%).
    #[serde(rename = "ivaRete1", with = "rust_decimal::serde::float")]
    pub iva_rete1: Decimal,

    /// Retained income tax.
    #[serde(with = "rust_decimal::serde::float")]
    pub rete_renta: Decimal,

    /// Total operation amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub monto_total_operacion: Decimal,

    /// Total untaxed amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_no_gravado: Decimal,

    /// Amount payable.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_pagar: Decimal,

    /// Amount payable, written out in Spanish.
    pub total_letras: String,

    /// Total IVA.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_iva: Decimal,

    /// Balance in the customer's favor.
    #[serde(with = "rust_decimal::serde::float")]
    pub saldo_favor: Decimal,

    /// 1 = contado, 2 = crédito.
    pub condicion_operacion: u8,

    /// Payment entries.
    pub pagos: Option<Vec<Pago>>,

    /// Electronic payment number.
    pub num_pago_electronico: Option<String>,
}

/// Extension block: delivery and reception annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    /// Name of whoever delivers the goods.
    pub nomb_entrega: Option<String>,

    /// Identity document of whoever delivers.
    pub docu_entrega: Option<String>,

    /// Name of whoever receives the goods.
    pub nomb_recibe: Option<String>,

    /// Identity document of whoever receives.
    pub docu_recibe: Option<String>,

    /// Free-form observations.
    pub observaciones: Option<String>,

    /// Vehicle plate, for transport documents.
    pub placa_vehiculo: Option<String>,
}

/// A complete electronic tax document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dte {
    /// Identification block.
    pub identificacion: Identificacion,

    /// Related documents; always null for facturas.
    pub documento_relacionado: Option<Vec<Value>>,

    /// Issuer block.
    pub emisor: Emisor,

    /// Receiver block.
    pub receptor: Receptor,

    /// Other attached documents; unused.
    pub otros_documentos: Option<Vec<Value>>,

    /// Third-party sale block; unused.
    pub venta_tercero: Option<Value>,

    /// Document body, one entry per invoice line.
    pub cuerpo_documento: Vec<CuerpoItem>,

    /// Summary block.
    pub resumen: Resumen,

    /// Extension block.
    pub extension: Option<Extension>,

    /// Appendix entries; unused.
    pub apendice: Option<Vec<Value>>,
}
