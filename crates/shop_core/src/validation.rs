//! Order draft validation. Pure over the draft; all failing fields are
//! reported together and the result is rebuilt from scratch on every run.

use shared::domain::{DraftField, OrderDraft, OrderErrors};

pub const MSG_PAYMENT_REQUIRED: &str = "Payment method is required";
pub const MSG_ADDRESS_REQUIRED: &str = "Shipping address is required";
pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_EMAIL_INVALID: &str = "Email has an invalid format";
pub const MSG_PHONE_REQUIRED: &str = "Phone number is required";
pub const MSG_PHONE_INVALID: &str = "Phone number has an invalid format";

pub fn validate(draft: &OrderDraft) -> OrderErrors {
    let mut errors = OrderErrors::new();

    if draft.payment.is_none() {
        errors.insert(DraftField::Payment, MSG_PAYMENT_REQUIRED.to_string());
    }

    if draft.address.is_empty() {
        errors.insert(DraftField::Address, MSG_ADDRESS_REQUIRED.to_string());
    }

    if draft.email.is_empty() {
        errors.insert(DraftField::Email, MSG_EMAIL_REQUIRED.to_string());
    } else if !is_valid_email(&draft.email) {
        errors.insert(DraftField::Email, MSG_EMAIL_INVALID.to_string());
    }

    if draft.phone.is_empty() {
        errors.insert(DraftField::Phone, MSG_PHONE_REQUIRED.to_string());
    } else if !is_valid_phone(&draft.phone) {
        errors.insert(DraftField::Phone, MSG_PHONE_INVALID.to_string());
    }

    errors
}

/// A single `@` with a non-empty local part and a dotted domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Optional leading `+`, then digits/spaces/hyphens/parentheses, 7-20 chars
/// overall with at least one digit.
fn is_valid_phone(phone: &str) -> bool {
    let length = phone.chars().count();
    if !(7..=20).contains(&length) {
        return false;
    }
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    digits.chars().any(|c| c.is_ascii_digit())
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
}
