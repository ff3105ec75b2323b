use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemCategory {
    SoftSkill,
    Other,
    Additional,
    Button,
    HardSkill,
}

/// One catalog entry. `price: None` marks a priceless item that cannot be
/// purchased but still appears in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: ItemCategory,
    pub price: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payment {
    Card,
    Cash,
}

impl Payment {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "card" => Some(Self::Card),
            "cash" => Some(Self::Cash),
            _ => None,
        }
    }
}

/// The checkout form in progress. `items` and `total` are derived from the
/// cart and resynced by the model on every cart change; the user-entry
/// fields are written one at a time via field-change events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub payment: Option<Payment>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<String>,
    pub total: u64,
}

impl OrderDraft {
    /// Resets the user-entry fields to their defaults, keeping the
    /// cart-derived `items`/`total` untouched.
    pub fn clear_user_fields(&mut self) {
        self.payment = None;
        self.email.clear();
        self.phone.clear();
        self.address.clear();
    }
}

/// The validatable user-entry fields of an [`OrderDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Payment,
    Email,
    Phone,
    Address,
}

/// A single user-entry field write, as carried by `payment:select` and the
/// `order.*:change` / `contacts.*:change` form events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderFieldWrite {
    Payment(Payment),
    Email(String),
    Phone(String),
    Address(String),
}

impl OrderFieldWrite {
    /// Maps a form field name and raw value onto a typed write. Returns
    /// `None` for unknown field names or an unparseable payment value.
    pub fn from_form_field(field: &str, value: &str) -> Option<Self> {
        match field {
            "payment" => Payment::parse(value).map(Self::Payment),
            "email" => Some(Self::Email(value.to_string())),
            "phone" => Some(Self::Phone(value.to_string())),
            "address" => Some(Self::Address(value.to_string())),
            _ => None,
        }
    }

    pub fn field(&self) -> DraftField {
        match self {
            Self::Payment(_) => DraftField::Payment,
            Self::Email(_) => DraftField::Email,
            Self::Phone(_) => DraftField::Phone,
            Self::Address(_) => DraftField::Address,
        }
    }
}

/// Validation failures keyed by field; an empty map means the draft is
/// submittable. Always produced wholesale by the validation engine, never
/// patched incrementally.
pub type OrderErrors = BTreeMap<DraftField, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationState {
    Browsing,
    Preview,
    Cart,
    OrderForm,
    ContactForm,
    OrderSuccess,
}

impl NavigationState {
    pub const INITIAL: Self = Self::Browsing;
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Browsing => "browsing",
            Self::Preview => "preview",
            Self::Cart => "cart",
            Self::OrderForm => "order_form",
            Self::ContactForm => "contact_form",
            Self::OrderSuccess => "order_success",
        };
        f.write_str(name)
    }
}

/// Server response to a successfully placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: String,
    pub total: u64,
}
