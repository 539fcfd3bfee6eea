//! Shade records, request payloads and their validation.
//!
//! Payload DTOs are deliberately loose at the serde level (missing strings
//! default to empty, `recommended_brands` is optional) so that every schema
//! problem is reported as a [`FieldViolation`] rather than a parse failure.
//! Unknown JSON fields are dropped on deserialization, which is what projects
//! a payload down to the six stored fields.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl, ValidationError, ValidationErrors};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Stored record
// ---------------------------------------------------------------------------

/// One catalog entry. `shade_id` doubles as the store's document key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadeRecord {
    pub shade_id: String,
    pub description: String,
    pub image_url: String,
    pub skintone: String,
    pub source: String,
    pub recommended_brands: Vec<String>,
}

/// The mutable part of a record: everything except `shade_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadeFields {
    pub description: String,
    pub image_url: String,
    pub skintone: String,
    pub source: String,
    pub recommended_brands: Vec<String>,
}

impl ShadeRecord {
    /// Attach an identity to a set of fields.
    pub fn from_fields(shade_id: impl Into<String>, fields: ShadeFields) -> Self {
        Self {
            shade_id: shade_id.into(),
            description: fields.description,
            image_url: fields.image_url,
            skintone: fields.skintone,
            source: fields.source,
            recommended_brands: fields.recommended_brands,
        }
    }

    /// Split a record into its id and its mutable fields.
    pub fn into_parts(self) -> (String, ShadeFields) {
        (
            self.shade_id,
            ShadeFields {
                description: self.description,
                image_url: self.image_url,
                skintone: self.skintone,
                source: self.source,
                recommended_brands: self.recommended_brands,
            },
        )
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Payload for creating (or overwriting) a shade.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateShade {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "shade_id is required"),
        custom(function = "validate_shade_id")
    )]
    pub shade_id: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "description is required"),
        custom(function = "validate_text")
    )]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "skintone is required"),
        custom(function = "validate_text")
    )]
    pub skintone: String,

    #[serde(default)]
    #[validate(custom(function = "validate_text"))]
    pub source: String,

    #[validate(
        required(message = "recommended_brands is required"),
        custom(function = "validate_brands")
    )]
    pub recommended_brands: Option<Vec<String>>,
}

/// Payload for replacing the mutable fields of an existing shade.
///
/// Identity comes from the request path; a `shade_id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateShade {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "description is required"),
        custom(function = "validate_text")
    )]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "validate_image_url"))]
    pub image_url: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "skintone is required"),
        custom(function = "validate_text")
    )]
    pub skintone: String,

    #[serde(default)]
    #[validate(custom(function = "validate_text"))]
    pub source: String,

    #[validate(
        required(message = "recommended_brands is required"),
        custom(function = "validate_brands")
    )]
    pub recommended_brands: Option<Vec<String>>,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Field path, e.g. `skintone` or `[3].image_url` inside a batch.
    pub field: String,
    /// Rule that failed (`length`, `required`, `url`, ...).
    pub code: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Validation entry points
// ---------------------------------------------------------------------------

/// Validate a single create payload and project it to a storable record.
pub fn validate_create(payload: CreateShade) -> Result<ShadeRecord, CoreError> {
    if let Err(errors) = payload.validate() {
        return Err(CoreError::InvalidFields(collect_violations(&errors, None)));
    }
    Ok(create_into_record(payload))
}

/// Validate an update payload. The caller re-attaches the path id.
pub fn validate_update(payload: UpdateShade) -> Result<ShadeFields, CoreError> {
    if let Err(errors) = payload.validate() {
        return Err(CoreError::InvalidFields(collect_violations(&errors, None)));
    }
    Ok(ShadeFields {
        description: payload.description,
        image_url: payload.image_url,
        skintone: payload.skintone,
        source: payload.source,
        recommended_brands: payload.recommended_brands.unwrap_or_default(),
    })
}

/// Validate a bulk payload. All-or-nothing: one bad element rejects the batch,
/// and every violation of every element is reported.
pub fn validate_batch(payload: Vec<CreateShade>) -> Result<Vec<ShadeRecord>, CoreError> {
    if payload.is_empty() {
        return Err(CoreError::InvalidFields(vec![FieldViolation {
            field: "[]".to_string(),
            code: "length".to_string(),
            message: "at least one shade is required".to_string(),
        }]));
    }

    let violations: Vec<FieldViolation> = payload
        .iter()
        .enumerate()
        .filter_map(|(index, item)| item.validate().err().map(|errors| (index, errors)))
        .flat_map(|(index, errors)| collect_violations(&errors, Some(index)))
        .collect();

    if !violations.is_empty() {
        return Err(CoreError::InvalidFields(violations));
    }

    Ok(payload.into_iter().map(create_into_record).collect())
}

fn create_into_record(payload: CreateShade) -> ShadeRecord {
    ShadeRecord {
        shade_id: payload.shade_id,
        description: payload.description,
        image_url: payload.image_url,
        skintone: payload.skintone,
        source: payload.source,
        recommended_brands: payload.recommended_brands.unwrap_or_default(),
    }
}

/// Flatten `validator` output into a stable, sorted list of violations for
/// one payload. `index` prefixes each field with the payload's batch position.
pub(crate) fn collect_violations(
    errors: &ValidationErrors,
    index: Option<usize>,
) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let path = match index {
                Some(i) => format!("[{i}].{field}"),
                None => field.to_string(),
            };
            field_errors.iter().map(move |err| FieldViolation {
                field: path.clone(),
                code: err.code.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{path} is invalid")),
            })
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    violations
}

// ---------------------------------------------------------------------------
// Custom rules
// ---------------------------------------------------------------------------

/// Text columns cannot hold NUL.
fn validate_text(value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::new("characters")
            .with_message(Cow::Borrowed("text must not contain NUL characters")));
    }
    Ok(())
}

fn validate_shade_id(shade_id: &str) -> Result<(), ValidationError> {
    validate_text(shade_id)?;
    // The id is used verbatim as a path segment and a document key.
    if shade_id.contains('/') {
        return Err(ValidationError::new("shade_id")
            .with_message(Cow::Borrowed("shade_id must not contain '/'")));
    }
    Ok(())
}

fn validate_image_url(image_url: &str) -> Result<(), ValidationError> {
    validate_text(image_url)?;
    if image_url.is_empty() || image_url.validate_url() {
        return Ok(());
    }
    Err(ValidationError::new("url")
        .with_message(Cow::Borrowed("image_url must be empty or a valid URL")))
}

fn validate_brands(brands: &[String]) -> Result<(), ValidationError> {
    brands.iter().try_for_each(|brand| validate_text(brand))?;
    if brands.iter().any(String::is_empty) {
        return Err(ValidationError::new("length")
            .with_message(Cow::Borrowed("recommended_brands must not contain empty names")));
    }
    Ok(())
}
