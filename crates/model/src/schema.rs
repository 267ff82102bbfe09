//! A small declarative schema language over `serde_json::Value` and the
//! walker that checks values against it.
//!
//! The element union refers back to itself through [`Schema::Lazy`], which
//! is what lets `section.children` and `columns[].children` nest to any
//! depth without building an infinite schema up front.

use crate::error::ValidationError;
use crate::path::JsonPath;
use serde_json::{Map, Value};

/// A cross-field check run after an object's fields have passed. Returns the
/// failing location relative to the object.
pub type Refinement = fn(&Value) -> Result<(), (JsonPath, String)>;

pub enum Schema {
    String,
    Bool,
    Number(NumberRange),
    Enum(&'static [&'static str]),
    Array(Box<Schema>),
    Object(ObjectSchema),
    Union(UnionSchema),
    Lazy(fn() -> Schema),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub integer: bool,
    /// The typed field is an `f32`, so magnitudes past `f32::MAX` are rejected.
    pub single: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// May be absent or `null`.
    Optional,
    /// May be absent; the typed model fills in a default. `null` is rejected.
    Defaulted,
}

pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
    pub presence: Presence,
}

pub struct ObjectSchema {
    /// Used in messages, e.g. "unknown field 'x' for border".
    pub name: &'static str,
    pub fields: Vec<Field>,
}

pub struct Variant {
    pub tag: &'static str,
    pub fields: Vec<Field>,
    pub refine: Option<Refinement>,
}

pub struct UnionSchema {
    pub tag_field: &'static str,
    /// Fields every variant accepts in addition to its own.
    pub common: Vec<Field>,
    pub variants: Vec<Variant>,
}

// --- Constructors ---

pub fn required(name: &'static str, schema: Schema) -> Field {
    Field { name, schema, presence: Presence::Required }
}

pub fn optional(name: &'static str, schema: Schema) -> Field {
    Field { name, schema, presence: Presence::Optional }
}

pub fn defaulted(name: &'static str, schema: Schema) -> Field {
    Field { name, schema, presence: Presence::Defaulted }
}

pub fn object(name: &'static str, fields: Vec<Field>) -> Schema {
    Schema::Object(ObjectSchema { name, fields })
}

pub fn array_of(item: Schema) -> Schema {
    Schema::Array(Box::new(item))
}

pub fn number() -> Schema {
    Schema::Number(NumberRange::default())
}

pub fn non_negative() -> Schema {
    Schema::Number(NumberRange { min: Some(0.0), single: true, ..Default::default() })
}

pub fn integer_between(min: i64, max: i64) -> Schema {
    Schema::Number(NumberRange {
        min: Some(min as f64),
        max: Some(max as f64),
        integer: true,
        single: false,
    })
}

pub fn variant(tag: &'static str, fields: Vec<Field>) -> Variant {
    Variant { tag, fields, refine: None }
}

// --- Walker ---

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(path: &JsonPath, expected: &str, found: &Value) -> ValidationError {
    ValidationError::new(
        path.to_string(),
        format!("expected {}, found {}", expected, describe(found)),
    )
}

fn describe(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string \"{}\"", s),
        other => type_name(other).to_string(),
    }
}

impl NumberRange {
    fn expectation(&self) -> String {
        let noun = if self.integer { "integer" } else { "number" };
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("{} between {} and {}", noun, min, max),
            (Some(min), None) if min == 0.0 => format!("non-negative {}", noun),
            (Some(min), None) => format!("{} >= {}", noun, min),
            (None, Some(max)) => format!("{} <= {}", noun, max),
            (None, None) => noun.to_string(),
        }
    }

    /// Integers must be written as JSON integers: `2.0` is not a heading level.
    fn accepts(&self, value: &Value) -> bool {
        let Some(n) = value.as_f64() else {
            return false;
        };
        n.is_finite()
            && (!self.integer || value.is_i64() || value.is_u64())
            && self.min.is_none_or(|min| n >= min)
            && self.max.is_none_or(|max| n <= max)
    }

    fn overflows_single(&self, value: &Value) -> bool {
        self.single && value.as_f64().is_some_and(|n| n.abs() > f32::MAX as f64)
    }
}

impl Schema {
    /// Checks `value`, reporting the first violation depth-first in field
    /// declaration order.
    pub fn check(&self, value: &Value, path: &JsonPath) -> Result<(), ValidationError> {
        match self {
            Schema::String => match value {
                Value::String(_) => Ok(()),
                other => Err(mismatch(path, "string", other)),
            },
            Schema::Bool => match value {
                Value::Bool(_) => Ok(()),
                other => Err(mismatch(path, "boolean", other)),
            },
            Schema::Number(range) => {
                if range.overflows_single(value) {
                    Err(ValidationError::new(
                        path.to_string(),
                        format!("number {} is too large", value),
                    ))
                } else if range.accepts(value) {
                    Ok(())
                } else {
                    Err(mismatch(path, &range.expectation(), value))
                }
            }
            Schema::Enum(allowed) => match value.as_str() {
                Some(s) if allowed.contains(&s) => Ok(()),
                _ => Err(mismatch(path, &format!("one of {}", allowed.join("|")), value)),
            },
            Schema::Array(item) => {
                let items = value.as_array().ok_or_else(|| mismatch(path, "array", value))?;
                for (i, entry) in items.iter().enumerate() {
                    item.check(entry, &path.index(i))?;
                }
                Ok(())
            }
            Schema::Object(object) => {
                let map = value.as_object().ok_or_else(|| mismatch(path, "object", value))?;
                check_fields(&object.fields, &[], &[], map, path, object.name)
            }
            Schema::Union(union) => union.check(value, path),
            Schema::Lazy(build) => build().check(value, path),
        }
    }
}

impl UnionSchema {
    fn check(&self, value: &Value, path: &JsonPath) -> Result<(), ValidationError> {
        let map = value
            .as_object()
            .ok_or_else(|| mismatch(path, "element object", value))?;
        let tag_path = path.key(self.tag_field);
        let tag = match map.get(self.tag_field) {
            None => {
                return Err(ValidationError::new(
                    tag_path.to_string(),
                    format!("missing required field '{}'", self.tag_field),
                ));
            }
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => return Err(mismatch(&tag_path, "string", other)),
        };
        let variant = self
            .variants
            .iter()
            .find(|v| v.tag == tag)
            .ok_or_else(|| {
                let known: Vec<&str> = self.variants.iter().map(|v| v.tag).collect();
                ValidationError::new(
                    tag_path.to_string(),
                    format!("unknown element type '{}', expected one of {}", tag, known.join("|")),
                )
            })?;

        check_fields(&self.common, &variant.fields, &[self.tag_field], map, path, variant.tag)?;

        if let Some(refine) = variant.refine {
            refine(value).map_err(|(relative, message)| {
                ValidationError::new(path.join(&relative).to_string(), message)
            })?;
        }
        Ok(())
    }
}

fn check_fields(
    fields: &[Field],
    more_fields: &[Field],
    extra_keys: &[&str],
    map: &Map<String, Value>,
    path: &JsonPath,
    context: &str,
) -> Result<(), ValidationError> {
    for field in fields.iter().chain(more_fields) {
        let field_path = path.key(field.name);
        match (map.get(field.name), field.presence) {
            (None, Presence::Required) => {
                return Err(ValidationError::new(
                    field_path.to_string(),
                    format!("missing required field '{}' for {}", field.name, context),
                ));
            }
            (None, _) | (Some(Value::Null), Presence::Optional) => {}
            (Some(value), _) => field.schema.check(value, &field_path)?,
        }
    }

    let declared = |key: &str| {
        fields.iter().chain(more_fields).any(|f| f.name == key) || extra_keys.contains(&key)
    };
    if let Some(unknown) = map.keys().find(|key| !declared(key)) {
        return Err(ValidationError::new(
            path.key(unknown).to_string(),
            format!("unknown field '{}' for {}", unknown, context),
        ));
    }
    Ok(())
}
