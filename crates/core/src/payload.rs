//! Decoding request bodies into shade payloads.
//!
//! Bodies arrive as untyped JSON and are decoded one field at a time, so a
//! field of the wrong type becomes a [`FieldViolation`] at its own path
//! (`description`, `[3].recommended_brands`) instead of failing the body as a
//! whole. `null` is treated as an absent field. Unknown fields are dropped.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::CoreError;
use crate::shade::{collect_violations, CreateShade, FieldViolation, UpdateShade};

/// A decoded `POST /api/shades` body.
#[derive(Debug)]
pub enum ShadeSubmission {
    /// A single object: one-off create.
    One(CreateShade),
    /// An array: bulk ingest.
    Many(Vec<CreateShade>),
}

impl ShadeSubmission {
    /// Dispatch on the body's shape and decode it.
    ///
    /// A batch with any undecodable element is rejected as a whole, and the
    /// elements that did decode are checked too so every problem is reported
    /// in one response.
    pub fn from_json(body: Value) -> Result<Self, CoreError> {
        match body {
            Value::Array(items) => decode_batch(items).map(Self::Many),
            Value::Object(object) => decode_create(object, None)
                .map(Self::One)
                .map_err(CoreError::InvalidFields),
            _ => Err(CoreError::Validation(
                "Expected a shade object or an array of shades".to_string(),
            )),
        }
    }
}

/// Decode a `PUT /api/shades/{shade_id}` body.
pub fn decode_update(body: Value) -> Result<UpdateShade, CoreError> {
    let Value::Object(mut object) = body else {
        return Err(CoreError::Validation("Expected a shade object".to_string()));
    };

    let mut reader = FieldReader::new(None);
    let payload = UpdateShade {
        description: reader.string(&mut object, "description"),
        image_url: reader.string(&mut object, "image_url"),
        skintone: reader.string(&mut object, "skintone"),
        source: reader.string(&mut object, "source"),
        recommended_brands: reader.take(&mut object, "recommended_brands"),
    };
    reader.finish(payload).map_err(CoreError::InvalidFields)
}

fn decode_create(
    mut object: Map<String, Value>,
    index: Option<usize>,
) -> Result<CreateShade, Vec<FieldViolation>> {
    let mut reader = FieldReader::new(index);
    let payload = CreateShade {
        shade_id: reader.string(&mut object, "shade_id"),
        description: reader.string(&mut object, "description"),
        image_url: reader.string(&mut object, "image_url"),
        skintone: reader.string(&mut object, "skintone"),
        source: reader.string(&mut object, "source"),
        recommended_brands: reader.take(&mut object, "recommended_brands"),
    };
    reader.finish(payload)
}

fn decode_batch(items: Vec<Value>) -> Result<Vec<CreateShade>, CoreError> {
    let mut decoded = Vec::with_capacity(items.len());
    let mut violations = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        let result = match item {
            Value::Object(object) => decode_create(object, Some(index)),
            _ => Err(vec![FieldViolation {
                field: format!("[{index}]"),
                code: "type".to_string(),
                message: "expected a shade object".to_string(),
            }]),
        };

        match result {
            Ok(payload) => {
                if let Err(errors) = payload.validate() {
                    violations.extend(collect_violations(&errors, Some(index)));
                }
                decoded.push(payload);
            }
            Err(found) => violations.extend(found),
        }
    }

    if violations.is_empty() {
        Ok(decoded)
    } else {
        Err(CoreError::InvalidFields(violations))
    }
}

/// Pulls typed fields out of one JSON object, recording type mismatches.
struct FieldReader {
    prefix: String,
    violations: Vec<FieldViolation>,
}

impl FieldReader {
    fn new(index: Option<usize>) -> Self {
        Self {
            prefix: index.map(|i| format!("[{i}].")).unwrap_or_default(),
            violations: Vec::new(),
        }
    }

    fn take<T: DeserializeOwned>(
        &mut self,
        object: &mut Map<String, Value>,
        name: &str,
    ) -> Option<T> {
        match object.remove(name) {
            None | Some(Value::Null) => None,
            Some(value) => match serde_json::from_value(value) {
                Ok(decoded) => Some(decoded),
                Err(err) => {
                    self.violations.push(FieldViolation {
                        field: format!("{}{name}", self.prefix),
                        code: "type".to_string(),
                        message: format!("{name}: {err}"),
                    });
                    None
                }
            },
        }
    }

    fn string(&mut self, object: &mut Map<String, Value>, name: &str) -> String {
        self.take(object, name).unwrap_or_default()
    }

    fn finish<T>(self, payload: T) -> Result<T, Vec<FieldViolation>> {
        if self.violations.is_empty() {
            Ok(payload)
        } else {
            Err(self.violations)
        }
    }
}
