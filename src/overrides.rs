//! Dotted-key overrides (`output.config=dist/site.json`).
//!
//! Overrides are the highest-priority settings layer. Each `(dotted_key,
//! value)` pair is expanded into the nested `toml::Table` shape the other
//! layers use, so they deep-merge like any settings file.

use toml::{Table, Value};

use crate::error::SitefigError;

/// Convert dotted-key overrides into a nested `toml::Table`.
///
/// `("output.config", "dist/site.json")` becomes `{output = {config = "dist/site.json"}}`.
/// If several entries target the same key, the last one wins. An entry that
/// would nest under an existing non-table value is an error.
pub fn overrides_to_table(entries: &[(String, Value)]) -> Result<Table, SitefigError> {
    let mut table = Table::new();
    for (dotted_key, value) in entries {
        set_nested(&mut table, dotted_key, value.clone())?;
    }
    Ok(table)
}

fn set_nested(table: &mut Table, dotted_key: &str, value: Value) -> Result<(), SitefigError> {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return Err(SitefigError::KeyNotFound(dotted_key.into()));
    };
    if segments.iter().any(|s| s.is_empty()) {
        return Err(SitefigError::InvalidValue {
            key: dotted_key.into(),
            reason: "empty key segment".into(),
        });
    }

    let mut current = table;
    for segment in parents {
        current = current
            .entry(*segment)
            .or_insert_with(|| Value::Table(Table::new()))
            .as_table_mut()
            .ok_or_else(|| SitefigError::InvalidValue {
                key: dotted_key.into(),
                reason: format!("'{segment}' is already set to a non-table value"),
            })?;
    }

    current.insert(leaf.to_string(), value);
    Ok(())
}

/// Parse a raw string into a typed TOML value.
/// Tries: bool → integer → float → string.
pub fn parse_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    // Require a dot so "inf" and "NaN" stay strings.
    if s.contains('.')
        && let Ok(f) = s.parse::<f64>()
    {
        return Value::Float(f);
    }
    Value::String(s.to_string())
}

/// Split a `key=value` argument into a dotted key and a typed value.
pub fn parse_assignment(arg: &str) -> Result<(String, Value), SitefigError> {
    let (key, raw) = arg.split_once('=').ok_or_else(|| SitefigError::InvalidValue {
        key: arg.into(),
        reason: "expected KEY=VALUE".into(),
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(SitefigError::InvalidValue {
            key: arg.into(),
            reason: "missing key before '='".into(),
        });
    }
    Ok((key.to_string(), parse_value(raw.trim())))
}
