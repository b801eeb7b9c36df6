//! Conversion of raw booking-form input into typed edits.
//!
//! The surrounding UI submits strings; this module validates and
//! sanitizes them into [`BookingEdit`] values the engine can apply.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::STOP_SLOTS_PER_LEG;
use crate::domain::booking::{ExtraService, StopLeg};
use crate::domain::edit::BookingEdit;

/// Maximum allowed length for a stop location.
const LOCATION_MAX_LEN: usize = 256;
const LOCATION_MAX_LEN_VALIDATOR: u64 = LOCATION_MAX_LEN as u64;

/// Maximum allowed length for an extra-service name.
const SERVICE_NAME_MAX_LEN: usize = 128;
const SERVICE_NAME_MAX_LEN_VALIDATOR: u64 = SERVICE_NAME_MAX_LEN as u64;

/// Maximum allowed length for the raw pickup time text.
const TIME_MAX_LEN: usize = 16;
const TIME_MAX_LEN_VALIDATOR: u64 = TIME_MAX_LEN as u64;

/// Result type returned by the booking form helpers.
pub type BookingFormResult<T> = Result<T, BookingFormError>;

/// Errors that can occur while converting booking form input.
#[derive(Debug, Error)]
pub enum BookingFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided amount is not a usable decimal money value.
    #[error("invalid amount `{value}`")]
    InvalidAmount { value: String },
    /// Monetary inputs cannot be negative.
    #[error("amount `{value}` cannot be negative")]
    NegativeAmount { value: String },
    /// The provided pickup date is not a calendar date.
    #[error("invalid date `{value}`")]
    InvalidDate { value: String },
    /// The extra-service name is empty after sanitization.
    #[error("extra service name cannot be empty")]
    EmptyServiceName,
    /// The addressed stop slot does not exist.
    #[error("stop slot {slot} is out of range")]
    SlotOutOfRange { slot: usize },
}

/// Parses a decimal money string (`"12"`, `"12.5"`, `"12.50"`) into
/// integer cents. At most two fractional digits are accepted; negative
/// amounts are rejected.
pub fn parse_money(input: &str) -> BookingFormResult<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BookingFormError::InvalidAmount {
            value: input.to_string(),
        });
    }
    if trimmed.starts_with('-') {
        return Err(BookingFormError::NegativeAmount {
            value: trimmed.to_string(),
        });
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    let invalid = || BookingFormError::InvalidAmount {
        value: trimmed.to_string(),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > 2 {
        return Err(invalid());
    }
    if !whole.chars().all(|ch| ch.is_ascii_digit())
        || !fraction.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole_cents = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().map_err(|_| invalid())? * 100
    };

    let fraction_cents = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse::<i64>().map_err(|_| invalid())?,
    };

    Ok(whole_cents + fraction_cents)
}

/// Formats integer cents back into the two-decimal text shown in inputs.
pub fn format_money(cents: i64) -> String {
    format!("{:.2}", cents as f64 / 100.0)
}

/// Form payload carrying the booking's defining attributes and timing.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct BookingDetailsForm {
    /// Selected customer, if any.
    pub customer_id: Option<i32>,
    /// Selected core service, if any.
    pub service_id: Option<i32>,
    /// Selected vehicle type, if any.
    pub vehicle_type_id: Option<i32>,
    /// Selected contractor, if any.
    pub contractor_id: Option<i32>,
    /// Pickup date in `%Y-%m-%d` form; blank clears the field.
    pub pickup_date: Option<String>,
    /// Raw pickup time text; passed through so the engine owns the
    /// unparseable-time policy.
    #[validate(length(max = TIME_MAX_LEN_VALIDATOR))]
    pub pickup_time: Option<String>,
}

impl BookingDetailsForm {
    /// Validates the payload and expands it into individual edits.
    pub fn into_edits(self) -> BookingFormResult<Vec<BookingEdit>> {
        self.validate()?;

        let pickup_date = match self
            .pickup_date
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            Some(value) => Some(NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                BookingFormError::InvalidDate {
                    value: value.to_string(),
                }
            })?),
            None => None,
        };

        let pickup_time = self
            .pickup_time
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(vec![
            BookingEdit::SetCustomer(self.customer_id),
            BookingEdit::SetService(self.service_id),
            BookingEdit::SetVehicleType(self.vehicle_type_id),
            BookingEdit::SetContractor(self.contractor_id),
            BookingEdit::SetPickupDate(pickup_date),
            BookingEdit::SetPickupTime(pickup_time),
        ])
    }
}

/// One stop row as submitted by the booking form.
#[derive(Debug, Deserialize, Validate)]
pub struct StopRowForm {
    /// Which leg the row belongs to.
    pub leg: StopLeg,
    /// Zero-based slot position within the leg.
    pub slot: usize,
    /// Location text; a blank location vacates the slot.
    #[validate(length(max = LOCATION_MAX_LEN_VALIDATOR))]
    pub location: String,
    /// Optional manual price entry; absence keeps the slot auto-priced.
    pub price: Option<String>,
}

impl StopRowForm {
    /// Validates and converts the row into the edits it implies.
    pub fn into_edits(self) -> BookingFormResult<Vec<BookingEdit>> {
        self.validate()?;

        if self.slot >= STOP_SLOTS_PER_LEG {
            return Err(BookingFormError::SlotOutOfRange { slot: self.slot });
        }

        let location = sanitize_inline_text(&self.location);
        if location.is_empty() {
            return Ok(vec![BookingEdit::RemoveStop {
                leg: self.leg,
                slot: self.slot,
            }]);
        }

        let mut edits = vec![BookingEdit::SetStopLocation {
            leg: self.leg,
            slot: self.slot,
            location,
        }];

        if let Some(price) = self
            .price
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            edits.push(BookingEdit::SetStopPrice {
                leg: self.leg,
                slot: self.slot,
                price_cents: parse_money(price)?,
            });
        }

        Ok(edits)
    }
}

/// One extra-service row as submitted by the booking form.
#[derive(Debug, Deserialize, Validate)]
pub struct ExtraServiceRowForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = SERVICE_NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Price entered by the user.
    pub price: String,
}

impl ExtraServiceRowForm {
    /// Validates and converts the row into an add edit.
    pub fn into_edit(self) -> BookingFormResult<BookingEdit> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(BookingFormError::EmptyServiceName);
        }

        Ok(BookingEdit::AddExtraService(ExtraService::new(
            name,
            parse_money(&self.price)?,
        )))
    }
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}
