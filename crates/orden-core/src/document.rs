//! # Order Document
//!
//! The work order being edited: header fields plus an ordered list of line
//! items. It is ambient editing state, not a record with a lifecycle:
//!
//! ```text
//! session start ──► fresh() or restore(draft) ──► edits ──► clear ──► fresh()
//! ```
//!
//! Prices are stored net. Typed prices arrive in display terms and go
//! through a [`PriceConverter`] before they touch a [`LineItem`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{ensure_in_range, PriceConverter};
use crate::validation::{parse_units, validate_notes, validate_price, validate_text};

// =============================================================================
// Line Item
// =============================================================================

/// One row of the work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Session-stable identity for list operations.
    #[serde(default = "new_item_id")]
    pub id: String,

    /// Units ordered; `None` when the field is empty.
    #[ts(type = "string | null")]
    #[serde(default)]
    pub units: Option<Decimal>,

    /// Internal part code ("Código interno").
    #[serde(default)]
    pub internal_code: String,

    #[serde(default)]
    pub description: String,

    /// Unit price without IVA, regardless of the current mode.
    #[serde(default)]
    pub net_price: Option<Money>,
}

fn new_item_id() -> String {
    Uuid::new_v4().to_string()
}

impl LineItem {
    /// An empty row with a new id.
    pub fn empty() -> Self {
        LineItem {
            id: new_item_id(),
            units: None,
            internal_code: String::new(),
            description: String::new(),
            net_price: None,
        }
    }

    /// True when nothing has been typed into the row.
    pub fn is_blank(&self) -> bool {
        self.units.is_none()
            && self.internal_code.is_empty()
            && self.description.is_empty()
            && self.net_price.is_none()
    }
}

/// Partial update for a row, as typed in the form.
///
/// `units` and `price` carry raw field text. `price` is in display terms for
/// the converter's mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub units: Option<String>,
    pub internal_code: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
}

// =============================================================================
// Order Document
// =============================================================================

/// The work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    /// Visible document number. Usually `V-YYYYMMDD-NN`, but free text: the
    /// user may override it and it is not checked against the counters.
    pub number: String,

    pub client: String,

    /// ISO `YYYY-MM-DD`, may be empty.
    pub order_date: String,

    /// ISO `YYYY-MM-DD`, may be empty.
    pub delivery_date: String,

    pub items: Vec<LineItem>,

    pub notes: String,
}

/// Persisted draft as read back from storage.
///
/// Every field is optional so a partial or older draft still restores; the
/// missing fields keep the fresh defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub number: Option<String>,
    pub client: Option<String>,
    pub order_date: Option<String>,
    pub delivery_date: Option<String>,
    pub items: Option<Vec<LineItem>>,
    pub notes: Option<String>,
}

impl OrderDocument {
    /// A fresh document: given number, both dates today, one empty row.
    pub fn fresh(number: impl Into<String>, today: NaiveDate) -> Self {
        let iso = today.format("%Y-%m-%d").to_string();
        OrderDocument {
            number: number.into(),
            client: String::new(),
            order_date: iso.clone(),
            delivery_date: iso,
            items: vec![LineItem::empty()],
            notes: String::new(),
        }
    }

    /// Overlays a stored draft on `self`.
    pub fn merge_draft(mut self, draft: DraftRecord) -> Self {
        if let Some(number) = draft.number {
            self.number = number;
        }
        if let Some(client) = draft.client {
            self.client = client;
        }
        if let Some(order_date) = draft.order_date {
            self.order_date = order_date;
        }
        if let Some(delivery_date) = draft.delivery_date {
            self.delivery_date = delivery_date;
        }
        if let Some(items) = draft.items {
            self.items = items;
        }
        if let Some(notes) = draft.notes {
            self.notes = notes;
        }
        self
    }

    /// Appends an empty row and returns its id.
    pub fn add_item(&mut self) -> String {
        let item = LineItem::empty();
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Removes the row with `id`.
    ///
    /// Removing the last row is allowed; the list may become empty.
    pub fn remove_item(&mut self, id: &str) -> CoreResult<()> {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        if self.items.len() == before {
            return Err(CoreError::ItemNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Applies a typed patch to the row with `id`.
    ///
    /// ## Behavior
    /// - Units / price text that is empty or non-numeric becomes unset
    /// - Negative units or prices are rejected and nothing changes
    /// - The price is converted to net with `converter`
    /// - A row whose line total or the document subtotal would overflow is
    ///   rejected and nothing changes
    pub fn update_item(
        &mut self,
        id: &str,
        patch: ItemPatch,
        converter: &PriceConverter,
    ) -> CoreResult<&LineItem> {
        // Validate everything before touching the row
        let units = patch.units.as_deref().map(parse_units).transpose()?;
        let net_price = patch
            .price
            .as_deref()
            .map(|text| converter.to_net_from_input(text));
        if let Some(price) = net_price {
            validate_price(price)?;
        }
        if let Some(code) = &patch.internal_code {
            validate_text("internal code", code)?;
        }
        if let Some(description) = &patch.description {
            validate_text("description", description)?;
        }

        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

        let mut item = self.items[index].clone();
        if let Some(units) = units {
            item.units = units;
        }
        if let Some(code) = patch.internal_code {
            item.internal_code = code;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(price) = net_price {
            item.net_price = price;
        }

        // The totals must stay computable in every mode
        let mut items = self.items.clone();
        items[index] = item;
        ensure_in_range(&items)?;

        self.items = items;
        Ok(&self.items[index])
    }

    /// Looks up a row.
    pub fn item(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }
}

// =============================================================================
// Header Edits
// =============================================================================

/// Header fields the user can edit directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum HeaderField {
    Number(String),
    Client(String),
    OrderDate(String),
    DeliveryDate(String),
    Notes(String),
}

impl OrderDocument {
    /// Sets one header field.
    pub fn set_header(&mut self, field: HeaderField) -> CoreResult<()> {
        match field {
            HeaderField::Number(value) => {
                validate_text("number", &value)?;
                self.number = value;
            }
            HeaderField::Client(value) => {
                validate_text("client", &value)?;
                self.client = value;
            }
            HeaderField::OrderDate(value) => {
                validate_text("order date", &value)?;
                self.order_date = value;
            }
            HeaderField::DeliveryDate(value) => {
                validate_text("delivery date", &value)?;
                self.delivery_date = value;
            }
            HeaderField::Notes(value) => {
                validate_notes(&value)?;
                self.notes = value;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
