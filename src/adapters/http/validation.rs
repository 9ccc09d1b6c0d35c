//! Registration request schema.
//!
//! A declarative rule table evaluated in order, accumulating every violation
//! before failing, so the client sees all offending fields at once. On
//! success the raw payload is coerced into [`RegistrationData`] (trimmed
//! name, normalized email, parsed password) which replaces the request body
//! for the rest of the pipeline.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::domain::auth::services::RegistrationData;
use crate::domain::auth::value_objects::{Email, Password};

use super::dtos::RegisterRequest;

lazy_static! {
  static ref UPPERCASE: Regex = Regex::new(r"[A-Z]").expect("invalid uppercase pattern");
  static ref LOWERCASE: Regex = Regex::new(r"[a-z]").expect("invalid lowercase pattern");
  static ref DIGIT: Regex = Regex::new(r"[0-9]").expect("invalid digit pattern");
  static ref SPECIAL: Regex = Regex::new(r"[!@#$%^&*()]").expect("invalid special pattern");
}

const NAME_MAX_LEN: usize = 100;
const EMAIL_MAX_LEN: usize = 100;
const PASSWORD_MIN_LEN: usize = 8;

/// A single violated rule, reported against the offending field
#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
  pub field: &'static str,
  pub message: &'static str,
}

/// Schema validation failure listing every violated rule, in rule order
#[derive(Debug, Clone, Error)]
#[error("Validation failed")]
pub struct SchemaError {
  pub violations: Vec<FieldViolation>,
}

/// One entry of the rule table; `check` returns true when the rule holds
struct FieldRule {
  field: &'static str,
  message: &'static str,
  check: fn(&RegisterRequest) -> bool,
}

fn name_present(r: &RegisterRequest) -> bool {
  !r.name.trim().is_empty()
}

fn name_within_limit(r: &RegisterRequest) -> bool {
  r.name.trim().chars().count() <= NAME_MAX_LEN
}

fn email_present(r: &RegisterRequest) -> bool {
  !r.email.trim().is_empty()
}

fn email_within_limit(r: &RegisterRequest) -> bool {
  r.email.trim().chars().count() <= EMAIL_MAX_LEN
}

fn email_well_formed(r: &RegisterRequest) -> bool {
  Email::new(r.email.trim()).is_ok()
}

fn password_long_enough(r: &RegisterRequest) -> bool {
  r.password.len() >= PASSWORD_MIN_LEN
}

fn password_has_uppercase(r: &RegisterRequest) -> bool {
  UPPERCASE.is_match(&r.password)
}

fn password_has_lowercase(r: &RegisterRequest) -> bool {
  LOWERCASE.is_match(&r.password)
}

fn password_has_digit(r: &RegisterRequest) -> bool {
  DIGIT.is_match(&r.password)
}

fn password_has_special(r: &RegisterRequest) -> bool {
  SPECIAL.is_match(&r.password)
}

fn passwords_match(r: &RegisterRequest) -> bool {
  r.confirm_password == r.password
}

/// Per-field rules, evaluated in declaration order
static FIELD_RULES: &[FieldRule] = &[
  FieldRule {
    field: "name",
    message: "Name cannot be empty",
    check: name_present,
  },
  FieldRule {
    field: "name",
    message: "Name must be less than 100 characters",
    check: name_within_limit,
  },
  FieldRule {
    field: "email",
    message: "Email cannot be empty",
    check: email_present,
  },
  FieldRule {
    field: "email",
    message: "Email must be less than 100 characters",
    check: email_within_limit,
  },
  FieldRule {
    field: "email",
    message: "Invalid email address format",
    check: email_well_formed,
  },
  FieldRule {
    field: "password",
    message: "Password must be at least 8 characters long",
    check: password_long_enough,
  },
  FieldRule {
    field: "password",
    message: "Password must contain at least one uppercase letter",
    check: password_has_uppercase,
  },
  FieldRule {
    field: "password",
    message: "Password must contain at least one lowercase letter",
    check: password_has_lowercase,
  },
  FieldRule {
    field: "password",
    message: "Password must contain at least one number",
    check: password_has_digit,
  },
  FieldRule {
    field: "password",
    message: "Password must contain at least one special character",
    check: password_has_special,
  },
];

/// Cross-field refinements, evaluated after the field rules regardless of
/// their outcome
static REFINEMENTS: &[FieldRule] = &[FieldRule {
  field: "confirmPassword",
  message: "Passwords do not match",
  check: passwords_match,
}];

/// Validates and coerces a raw registration payload.
///
/// # Errors
///
/// Returns a [`SchemaError`] listing one [`FieldViolation`] per violated
/// rule; the list is never empty.
pub fn validate_registration(request: &RegisterRequest) -> Result<RegistrationData, SchemaError> {
  let mut violations = Vec::new();

  for rule in FIELD_RULES.iter().chain(REFINEMENTS) {
    if !(rule.check)(request) {
      violations.push(FieldViolation {
        field: rule.field,
        message: rule.message,
      });
    }
  }

  if !violations.is_empty() {
    return Err(SchemaError { violations });
  }

  // All rules passed, so the value object constructors cannot fail; the
  // fallbacks keep this total anyway.
  let email = Email::new(request.email.trim()).map_err(|_| SchemaError {
    violations: vec![FieldViolation {
      field: "email",
      message: "Invalid email address format",
    }],
  })?;

  let password = Password::new(request.password.clone()).map_err(|_| SchemaError {
    violations: vec![FieldViolation {
      field: "password",
      message: "Password must be at least 8 characters long",
    }],
  })?;

  Ok(RegistrationData {
    name: request.name.trim().to_string(),
    email,
    password,
  })
}
