//! Structural comparison of flat params tables.
//!
//! Only key sets and value kinds are compared. Values themselves are free, so
//! authors may tune any number but cannot add, drop or retype a field.

use std::fmt;

use toml::{Table, Value};

/// Kind of a TOML value. Integers and floats share `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Datetime,
    Array,
    Table,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) | Value::Float(_) => ValueKind::Number,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Datetime(_) => ValueKind::Datetime,
            Value::Array(_) => ValueKind::Array,
            Value::Table(_) => ValueKind::Table,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Datetime => "datetime",
            ValueKind::Array => "array",
            ValueKind::Table => "table",
        };
        f.write_str(name)
    }
}

/// Check that `candidate` has the same keys and value kinds as `reference`.
///
/// Returns a description of the first mismatch found.
pub fn same_shape(candidate: &Table, reference: &Table) -> Result<(), String> {
    for (key, expected) in reference {
        let Some(found) = candidate.get(key) else {
            return Err(format!("missing field `{}`", key));
        };
        let (expected, found) = (ValueKind::of(expected), ValueKind::of(found));
        if expected != found {
            return Err(format!(
                "field `{}` should be a {}, found {}",
                key, expected, found
            ));
        }
    }

    if let Some(extra) = candidate.keys().find(|k| !reference.contains_key(*k)) {
        return Err(format!("unexpected field `{}`", extra));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> Table {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn test_same_shape_different_values() {
        let reference = table("check_attacker = false\nskeleton = \"\"");
        let candidate = table("check_attacker = true\nskeleton = \"draugr\"");
        assert!(same_shape(&candidate, &reference).is_ok());
    }

    #[test]
    fn test_integer_matches_float() {
        let reference = table("range = 1024.0");
        assert!(same_shape(&table("range = 2048"), &reference).is_ok());
    }

    #[test]
    fn test_missing_field() {
        let reference = table("angle_min = -45.0\nangle_max = 45.0");
        let err = same_shape(&table("angle_min = 0.0"), &reference).unwrap_err();
        assert!(err.contains("angle_max"), "{}", err);
    }

    #[test]
    fn test_extra_field() {
        let reference = table("check_attacker = false");
        let err = same_shape(&table("check_attacker = false\nfoo = 1"), &reference).unwrap_err();
        assert!(err.contains("unexpected field `foo`"), "{}", err);
    }

    #[test]
    fn test_kind_mismatch() {
        let reference = table("value = true");
        let err = same_shape(&table("value = \"yes\""), &reference).unwrap_err();
        assert_eq!(err, "field `value` should be a boolean, found string");
    }

    #[test]
    fn test_empty_tables() {
        assert!(same_shape(&Table::new(), &Table::new()).is_ok());
    }
}
