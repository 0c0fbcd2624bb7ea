//! # Print Views
//!
//! Two printable projections of the same document.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       OrderDocument + TaxMode                           │
//! │                                  │                                      │
//! │             ┌────────────────────┴────────────────────┐                 │
//! │             ▼                                         ▼                 │
//! │   ┌───────────────────┐                     ┌───────────────────┐       │
//! │   │  COPIA INTERNA    │                     │  COPIA PLANTA     │       │
//! │   │  units, code,     │                     │  units, code,     │       │
//! │   │  description,     │                     │  description      │       │
//! │   │  unit price,      │                     │                   │       │
//! │   │  subtotal         │                     │  (no prices)      │       │
//! │   └───────────────────┘                     └───────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both views are built from the live document on demand. Nothing is copied
//! or stored.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::document::OrderDocument;
use crate::format::{
    format_amount, format_currency, format_date, format_units, mode_label, mode_short_label,
    or_placeholder,
};
use crate::pricing::PriceConverter;
use crate::types::{PreparerId, TaxMode};

/// Signature boxes at the bottom of every copy.
pub const SIGNATURE_LABELS: [&str; 3] = ["Preparó", "Aprobó", "Recibió (Planta)"];

/// Which copy to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum PrintCopy {
    /// Office copy, with prices.
    Internal,
    /// Shop-floor copy, without prices.
    Plant,
}

impl PrintCopy {
    pub const BOTH: [PrintCopy; 2] = [PrintCopy::Internal, PrintCopy::Plant];

    /// Badge text under the title.
    pub const fn badge(&self) -> &'static str {
        match self {
            PrintCopy::Internal => "COPIA INTERNA",
            PrintCopy::Plant => "COPIA PLANTA",
        }
    }

    pub const fn shows_prices(&self) -> bool {
        matches!(self, PrintCopy::Internal)
    }
}

/// One printed row, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PrintRow {
    pub units: String,
    pub internal_code: String,
    pub description: String,
    /// Displayed unit price; `None` on the plant copy.
    pub unit_price: Option<String>,
}

/// A fully formatted copy ready for the print markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PrintView {
    pub copy: PrintCopy,
    pub badge: String,
    pub mode_label: String,
    pub number: String,
    pub client: String,
    pub preparer: String,
    pub order_date: String,
    pub delivery_date: String,
    /// Header of the price column; `None` when the column is hidden.
    pub price_header: Option<String>,
    pub rows: Vec<PrintRow>,
    /// `Subtotal (c/IVA 21%)`; `None` on the plant copy.
    pub subtotal_label: Option<String>,
    /// `$ 1.234,50`; `None` on the plant copy.
    pub subtotal: Option<String>,
    pub notes: String,
    pub signatures: Vec<String>,
}

impl PrintView {
    /// Projects `doc` into the requested copy.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use orden_core::document::OrderDocument;
    /// use orden_core::print::{PrintCopy, PrintView};
    /// use orden_core::types::{PreparerId, TaxMode};
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    /// let doc = OrderDocument::fresh("V-20250131-00", today);
    /// let nacho = PreparerId::new("Nacho");
    ///
    /// let plant = PrintView::project(&doc, TaxMode::Full, &nacho, PrintCopy::Plant);
    /// assert_eq!(plant.badge, "COPIA PLANTA");
    /// assert!(plant.subtotal.is_none());
    /// ```
    pub fn project(
        doc: &OrderDocument,
        mode: TaxMode,
        preparer: &PreparerId,
        copy: PrintCopy,
    ) -> Self {
        let converter = PriceConverter::new(mode);
        let priced = copy.shows_prices();

        let rows = doc
            .items
            .iter()
            .map(|item| PrintRow {
                units: format_units(item.units),
                internal_code: item.internal_code.clone(),
                description: item.description.clone(),
                unit_price: priced.then(|| {
                    converter
                        .to_display(item.net_price)
                        .map(format_amount)
                        .unwrap_or_default()
                }),
            })
            .collect();

        let short = mode_short_label(mode);
        let subtotal = priced.then(|| format_currency(converter.subtotal(&doc.items).display));

        PrintView {
            copy,
            badge: copy.badge().to_string(),
            mode_label: mode_label(mode).to_string(),
            number: or_placeholder(&doc.number),
            client: or_placeholder(&doc.client),
            preparer: preparer.to_string(),
            order_date: format_date(&doc.order_date),
            delivery_date: format_date(&doc.delivery_date),
            price_header: priced.then(|| format!("Precio (u) {short}")),
            rows,
            subtotal_label: priced.then(|| format!("Subtotal {short}")),
            subtotal,
            notes: doc.notes.clone(),
            signatures: SIGNATURE_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Both copies, internal first.
    pub fn project_both(doc: &OrderDocument, mode: TaxMode, preparer: &PreparerId) -> Vec<Self> {
        PrintCopy::BOTH
            .iter()
            .map(|copy| PrintView::project(doc, mode, preparer, *copy))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ItemPatch;
    use chrono::NaiveDate;

    fn sample() -> OrderDocument {
        let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let mut doc = OrderDocument::fresh("V-20250131-02", today);
        let none = PriceConverter::new(TaxMode::None);
        let first = doc.items[0].id.clone();
        doc.update_item(
            &first,
            ItemPatch {
                units: Some("2".to_string()),
                internal_code: Some("BR-12".to_string()),
                description: Some("Brida".to_string()),
                price: Some("1000".to_string()),
            },
            &none,
        )
        .unwrap();
        doc.add_item();
        doc
    }

    #[test]
    fn test_internal_copy_has_prices() {
        let view = PrintView::project(
            &sample(),
            TaxMode::Full,
            &PreparerId::new("Pepo"),
            PrintCopy::Internal,
        );

        assert_eq!(view.badge, "COPIA INTERNA");
        assert_eq!(view.mode_label, "Con IVA 21%");
        assert_eq!(view.price_header.as_deref(), Some("Precio (u) (c/IVA 21%)"));
        assert_eq!(view.rows[0].unit_price.as_deref(), Some("1.210,00"));
        assert_eq!(view.rows[1].unit_price.as_deref(), Some(""));
        assert_eq!(view.subtotal.as_deref(), Some("$ 2.420,00"));
        assert_eq!(view.order_date, "31/01/2025");
        assert_eq!(view.preparer, "Pepo");
    }

    #[test]
    fn test_plant_copy_has_no_prices() {
        let view = PrintView::project(
            &sample(),
            TaxMode::Full,
            &PreparerId::new("Pepo"),
            PrintCopy::Plant,
        );

        assert_eq!(view.badge, "COPIA PLANTA");
        assert!(view.price_header.is_none());
        assert!(view.subtotal.is_none());
        assert!(view.subtotal_label.is_none());
        assert!(view.rows.iter().all(|r| r.unit_price.is_none()));
        assert_eq!(view.rows[0].units, "2");
        assert_eq!(view.rows[1].units, "");
    }

    #[test]
    fn test_empty_header_fields_use_placeholder() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let mut doc = OrderDocument::fresh("", today);
        doc.delivery_date.clear();

        let view = PrintView::project(
            &doc,
            TaxMode::None,
            &PreparerId::new("Nacho"),
            PrintCopy::Internal,
        );
        assert_eq!(view.number, "—");
        assert_eq!(view.client, "—");
        assert_eq!(view.delivery_date, "—");
        assert_eq!(view.signatures, vec!["Preparó", "Aprobó", "Recibió (Planta)"]);
    }

    #[test]
    fn test_project_both() {
        let views = PrintView::project_both(&sample(), TaxMode::Half, &PreparerId::new("Nacho"));
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].copy, PrintCopy::Internal);
        assert_eq!(views[1].copy, PrintCopy::Plant);
        assert_eq!(views[0].number, views[1].number);
    }
}
