//! Checks on raw client form input.
//!
//! Two tiers: [`validate`] decides whether a complete form may be saved,
//! while the `accepts_partial_*` checks only gate what may be typed into a
//! field and accept intermediate states that final validation rejects.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::db::schema::STORAGE_DATE_FORMAT;
use crate::models::{Client, ClientFields, HairColor};

pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

pub const POSTAL_CODE_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("client name is required")]
    MissingName,
    #[error("phone number is required")]
    MissingPhone,
    #[error("address is required")]
    MissingAddress,
    #[error("postal code must contain exactly 5 digits")]
    InvalidPostalCode,
    #[error("city is required")]
    MissingCity,
    #[error("birth date is invalid (expected DD/MM/YYYY)")]
    InvalidBirthDate,
    #[error("available credit must be a valid decimal number")]
    CreditNotNumeric,
    #[error("available credit must be greater than or equal to 0")]
    NegativeCredit,
    #[error("hair color must be one of: {}", HairColor::allowed_codes())]
    InvalidHairColor,
}

/// Every rule a form broke, in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn contains(&self, error: &FieldError) -> bool {
        self.0.contains(error)
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a valid DD/MM/YYYY date")]
pub struct InvalidDate(pub String);

/// Checks every rule against `fields` and collects all violations.
pub fn validate(fields: &ClientFields) -> Result<(), ValidationErrors> {
    check(fields).map(|_| ())
}

/// Validates `fields` and builds the client to persist. Text fields are
/// trimmed, the date is parsed from display form and a `,` decimal
/// separator is accepted for the credit.
pub fn validate_client(fields: &ClientFields, id: Option<i64>) -> Result<Client, ValidationErrors> {
    let typed = check(fields)?;

    Ok(Client {
        id,
        name: fields.name.trim().to_string(),
        phone: fields.phone.trim().to_string(),
        address: fields.address.trim().to_string(),
        postal_code: fields.postal_code.trim().to_string(),
        city: fields.city.trim().to_string(),
        birth_date: typed.birth_date,
        available_credit: typed.available_credit,
        is_good_client: fields.is_good_client,
        hair_color: typed.hair_color,
    })
}

struct TypedFields {
    birth_date: NaiveDate,
    available_credit: f64,
    hair_color: HairColor,
}

fn check(fields: &ClientFields) -> Result<TypedFields, ValidationErrors> {
    let mut errors = Vec::new();

    if is_blank(&fields.name) {
        errors.push(FieldError::MissingName);
    }
    if is_blank(&fields.phone) {
        errors.push(FieldError::MissingPhone);
    }
    if is_blank(&fields.address) {
        errors.push(FieldError::MissingAddress);
    }
    if !is_postal_code(&fields.postal_code) {
        errors.push(FieldError::InvalidPostalCode);
    }
    if is_blank(&fields.city) {
        errors.push(FieldError::MissingCity);
    }

    let birth_date = parse_display_date(&fields.birth_date).ok();
    if birth_date.is_none() {
        errors.push(FieldError::InvalidBirthDate);
    }

    let available_credit = match parse_decimal(&fields.available_credit) {
        Some(credit) if credit < 0.0 => {
            errors.push(FieldError::NegativeCredit);
            None
        }
        Some(credit) => Some(credit),
        None => {
            errors.push(FieldError::CreditNotNumeric);
            None
        }
    };

    let hair_color = fields.hair_color.trim().parse::<HairColor>().ok();
    if hair_color.is_none() {
        errors.push(FieldError::InvalidHairColor);
    }

    match (birth_date, available_credit, hair_color) {
        (Some(birth_date), Some(available_credit), Some(hair_color)) if errors.is_empty() => {
            Ok(TypedFields {
                birth_date,
                available_credit,
                hair_color,
            })
        }
        _ => Err(ValidationErrors(errors)),
    }
}

/// Whether a postal code being typed could still become valid: empty or
/// up to five digits.
pub fn accepts_partial_postal_code(value: &str) -> bool {
    value.len() <= POSTAL_CODE_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// Whether a credit amount being typed is acceptable so far: empty, a lone
/// sign, or already a decimal number.
pub fn accepts_partial_credit(value: &str) -> bool {
    matches!(value, "" | "-" | "+") || parse_decimal(value).is_some()
}

/// `DD/MM/YYYY` to `YYYY-MM-DD`. Day and month may be written without a
/// leading zero (`1/3/1985`); the result is always zero-padded, so such
/// input does not survive a round trip verbatim.
pub fn to_storage_date(display: &str) -> Result<String, InvalidDate> {
    parse_display_date(display).map(|date| date.format(STORAGE_DATE_FORMAT).to_string())
}

/// `YYYY-MM-DD` to `DD/MM/YYYY`. Input that does not parse is returned
/// unchanged.
pub fn to_display_date(storage: &str) -> String {
    match NaiveDate::parse_from_str(storage.trim(), STORAGE_DATE_FORMAT) {
        Ok(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => storage.to_string(),
    }
}

/// Parses `DD/MM/YYYY`. The year must be exactly four digits, without a
/// sign.
pub fn parse_display_date(display: &str) -> Result<NaiveDate, InvalidDate> {
    let trimmed = display.trim();
    if !has_display_date_shape(trimmed) {
        return Err(InvalidDate(display.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DISPLAY_DATE_FORMAT)
        .map_err(|_| InvalidDate(display.to_string()))
}

fn has_display_date_shape(value: &str) -> bool {
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let parts: Vec<&str> = value.split('/').collect();
    match parts.as_slice() {
        [day, month, year] => {
            (1..=2).contains(&day.len())
                && (1..=2).contains(&month.len())
                && year.len() == 4
                && all_digits(day)
                && all_digits(month)
                && all_digits(year)
        }
        _ => false,
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_postal_code(value: &str) -> bool {
    value.len() == POSTAL_CODE_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// Finite decimal with either `.` or `,` as separator.
fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
