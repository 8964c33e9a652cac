//! Field-level shape checks
//!
//! A [`Checker`] walks an untyped JSON value and records a [`FieldViolation`]
//! for every field that does not conform. Each check returns the field's value
//! when it conforms so nested checks can continue from it. Nothing here
//! mutates the input.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{FieldViolation, ValidationError};

type Object = Map<String, Value>;

/// Join an object path and a key (`enterprise` + `name` -> `enterprise.name`)
pub fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

/// Index into an array path (`apis` + 0 -> `apis[0]`)
pub fn index(path: &str, i: usize) -> String {
    format!("{}[{}]", path, i)
}

/// Short description of what was found at a field
pub fn describe(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => format!("boolean {}", b),
        Some(Value::Number(n)) => format!("number {}", n),
        Some(Value::String(s)) => {
            if s.chars().count() > 40 {
                let head: String = s.chars().take(40).collect();
                format!("string \"{}...\"", head)
            } else {
                format!("string \"{}\"", s)
            }
        }
        Some(Value::Array(items)) if items.is_empty() => "empty array".to_string(),
        Some(Value::Array(items)) => format!("array of {}", items.len()),
        Some(Value::Object(_)) => "object".to_string(),
    }
}

fn one_of(allowed: &[&str]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|a| format!("'{}'", a)).collect();
    format!("one of {}", quoted.join(", "))
}

/// Violation collector
#[derive(Debug, Default)]
pub struct Checker {
    violations: Vec<FieldViolation>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn violate(&mut self, path: impl Into<String>, expected: impl Into<String>, found: impl Into<String>) {
        self.violations.push(FieldViolation::new(path, expected, found));
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    /// Finish checking and convert the (now known-conformant) value into its
    /// typed form. Serde defaults are applied here, never during checking.
    pub fn conform<T: DeserializeOwned>(self, value: &Value) -> Result<T, ValidationError> {
        self.into_result()?;
        serde_json::from_value(value.clone())
            .map_err(|e| ValidationError::single("", "conformant document", e.to_string()))
    }

    /// The value must be an object
    pub fn object<'v>(&mut self, value: &'v Value, path: &str) -> Option<&'v Object> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.violate(path, "object", describe(Some(other)));
                None
            }
        }
    }

    /// Required nested object
    pub fn object_field<'v>(&mut self, obj: &'v Object, key: &str, path: &str) -> Option<&'v Object> {
        let path = join(path, key);
        match obj.get(key) {
            Some(Value::Object(map)) => Some(map),
            other => {
                self.violate(path, "object", describe(other));
                None
            }
        }
    }

    /// Optional nested object; absent is fine, `null` is not
    pub fn optional_object_field<'v>(
        &mut self,
        obj: &'v Object,
        key: &str,
        path: &str,
    ) -> Option<&'v Object> {
        match obj.get(key) {
            None => None,
            Some(Value::Object(map)) => Some(map),
            other => {
                self.violate(join(path, key), "object", describe(other));
                None
            }
        }
    }

    /// Required string
    pub fn string<'v>(&mut self, obj: &'v Object, key: &str, path: &str) -> Option<&'v str> {
        match obj.get(key) {
            Some(Value::String(s)) => Some(s.as_str()),
            other => {
                self.violate(join(path, key), "string", describe(other));
                None
            }
        }
    }

    /// Required string with at least one non-whitespace character
    pub fn non_empty_string<'v>(&mut self, obj: &'v Object, key: &str, path: &str) -> Option<&'v str> {
        match obj.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            other => {
                self.violate(join(path, key), "non-empty string", describe(other));
                None
            }
        }
    }

    /// Optional string; absent is fine, `null` is not
    pub fn optional_string<'v>(&mut self, obj: &'v Object, key: &str, path: &str) -> Option<&'v str> {
        match obj.get(key) {
            None => None,
            Some(Value::String(s)) => Some(s.as_str()),
            other => {
                self.violate(join(path, key), "string", describe(other));
                None
            }
        }
    }

    pub fn boolean(&mut self, obj: &Object, key: &str, path: &str) -> Option<bool> {
        match obj.get(key) {
            Some(Value::Bool(b)) => Some(*b),
            other => {
                self.violate(join(path, key), "boolean", describe(other));
                None
            }
        }
    }

    pub fn number(&mut self, obj: &Object, key: &str, path: &str) -> Option<f64> {
        match obj.get(key).and_then(Value::as_f64) {
            Some(n) => Some(n),
            None => {
                self.violate(join(path, key), "number", describe(obj.get(key)));
                None
            }
        }
    }

    /// Number within an inclusive range
    pub fn number_in(&mut self, obj: &Object, key: &str, path: &str, min: f64, max: f64) -> Option<f64> {
        let n = self.number(obj, key, path)?;
        if (min..=max).contains(&n) {
            Some(n)
        } else {
            self.violate(
                join(path, key),
                format!("number between {} and {}", min, max),
                describe(obj.get(key)),
            );
            None
        }
    }

    /// Non-negative integer that fits in `u32`
    pub fn unsigned(&mut self, obj: &Object, key: &str, path: &str) -> Option<u32> {
        match obj.get(key).and_then(Value::as_u64).and_then(|n| u32::try_from(n).ok()) {
            Some(n) => Some(n),
            None => {
                self.violate(join(path, key), "non-negative integer", describe(obj.get(key)));
                None
            }
        }
    }

    /// Required string that must exactly match one of `allowed`
    pub fn literal<'v>(
        &mut self,
        obj: &'v Object,
        key: &str,
        path: &str,
        allowed: &[&str],
    ) -> Option<&'v str> {
        match obj.get(key) {
            Some(Value::String(s)) if allowed.contains(&s.as_str()) => Some(s.as_str()),
            other => {
                self.violate(join(path, key), one_of(allowed), describe(other));
                None
            }
        }
    }

    /// Optional enum literal
    pub fn optional_literal<'v>(
        &mut self,
        obj: &'v Object,
        key: &str,
        path: &str,
        allowed: &[&str],
    ) -> Option<&'v str> {
        if obj.contains_key(key) {
            self.literal(obj, key, path, allowed)
        } else {
            None
        }
    }

    /// Required array, optionally with a minimum length
    pub fn array<'v>(
        &mut self,
        obj: &'v Object,
        key: &str,
        path: &str,
        min_len: usize,
    ) -> Option<&'v Vec<Value>> {
        match obj.get(key) {
            Some(Value::Array(items)) if items.len() >= min_len => Some(items),
            other => {
                let expected = if min_len == 0 {
                    "array".to_string()
                } else if min_len == 1 {
                    "non-empty array".to_string()
                } else {
                    format!("array with at least {} items", min_len)
                };
                self.violate(join(path, key), expected, describe(other));
                None
            }
        }
    }

    /// Required array of strings
    pub fn string_array(&mut self, obj: &Object, key: &str, path: &str, min_len: usize) -> Option<Vec<String>> {
        let items = self.array(obj, key, path, min_len)?;
        let base = join(path, key);
        let mut out = Vec::with_capacity(items.len());
        let mut clean = true;
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                other => {
                    clean = false;
                    self.violate(index(&base, i), "string", describe(Some(other)));
                }
            }
        }
        clean.then_some(out)
    }

    /// Optional array of strings
    pub fn optional_string_array(
        &mut self,
        obj: &Object,
        key: &str,
        path: &str,
        min_len: usize,
    ) -> Option<Vec<String>> {
        if obj.contains_key(key) {
            self.string_array(obj, key, path, min_len)
        } else {
            None
        }
    }
}
