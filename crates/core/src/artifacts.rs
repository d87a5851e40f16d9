//! Artifacts
//!
//! Downloadable renderings of an assembled document, with the storefront's
//! fixed file-naming convention.

use thiserror::Error;

use crate::{
    dte::{Dte, render},
    invoice::Invoice,
};

/// The downloadable representations of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Mock PDF text stream.
    Pdf,

    /// XML representation.
    Xml,

    /// Official JSON.
    Json,
}

impl ArtifactKind {
    /// File name for an invoice's artifact, per the fixed convention.
    #[must_use]
    pub fn file_name(self, invoice_id: &str) -> String {
        match self {
            Self::Pdf => format!("DTE-{invoice_id}.pdf"),
            Self::Xml => format!("dte-{invoice_id}.xml"),
            Self::Json => format!("dte-{invoice_id}.json"),
        }
    }

    /// MIME type of the artifact.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Xml => "application/xml",
            Self::Json => "application/json",
        }
    }
}

/// Errors from artifact generation.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// JSON serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A rendered artifact ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name per the naming convention.
    pub file_name: String,

    /// MIME type.
    pub mime: &'static str,

    /// Rendered contents.
    pub contents: String,
}

/// Renders the artifact of the given kind for an invoice and its document.
///
/// # Errors
///
/// Returns an [`ArtifactError`] if JSON serialization fails.
pub fn generate(invoice: &Invoice, dte: &Dte, kind: ArtifactKind) -> Result<Artifact, ArtifactError> {
    let contents = match kind {
        ArtifactKind::Pdf => render::pdf::render(invoice, dte),
        ArtifactKind::Xml => render::xml::render(invoice, dte),
        ArtifactKind::Json => render::to_json(dte)?,
    };

    Ok(Artifact {
        file_name: kind.file_name(&invoice.id),
        mime: kind.mime(),
        contents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_the_convention() {
        assert_eq!(
            ArtifactKind::Pdf.file_name("INV-123"),
            "DTE-INV-123.pdf",
            "pdf keeps the uppercase prefix"
        );
        assert_eq!(ArtifactKind::Xml.file_name("INV-123"), "dte-INV-123.xml");
        assert_eq!(ArtifactKind::Json.file_name("INV-123"), "dte-INV-123.json");
    }

    #[test]
    fn mime_types_match_kinds() {
        assert_eq!(ArtifactKind::Pdf.mime(), "application/pdf");
        assert_eq!(ArtifactKind::Xml.mime(), "application/xml");
        assert_eq!(ArtifactKind::Json.mime(), "application/json");
    }
}
