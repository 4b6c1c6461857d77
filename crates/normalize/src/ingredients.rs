//! Lenient parsing of the remote store's string-encoded ingredient column.
//!
//! The remote CRUD service persists ingredients as a JSON-encoded TEXT column,
//! and historical rows hold several shapes: arrays of plain strings, arrays of
//! `{name, quantity}` objects, mixes of both, or junk. Parsing is total;
//! anything unusable degrades to the empty sequence rather than failing the
//! record.
use serde_json::Value;

use crate::types::{Ingredient, RawIngredient};

/// Parse a string-encoded ingredient list into normalized entries.
///
/// Accepted shapes, per array element:
/// - JSON string: becomes a name-only ingredient;
/// - object with a string `name`: quantity taken from a string or numeric
///   `quantity` field when present;
/// - anything else: skipped.
///
/// A bare JSON string (not wrapped in an array) is treated as a one-element
/// list. Blank names are dropped. Non-JSON input yields an empty list.
pub(crate) fn parse_ingredient_text(raw: &str) -> Vec<Ingredient> {
    let value: Value = match serde_json::from_str(raw.trim()) {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };

    match value {
        Value::Array(items) => items.iter().filter_map(ingredient_from_value).collect(),
        Value::String(_) => ingredient_from_value(&value).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Normalize ingredients already carried as a structured sequence.
///
/// Plain name strings are wrapped; detailed entries pass through. Blank names
/// are dropped so downstream text search never matches on empty strings.
pub(crate) fn from_raw_sequence(raw: &[RawIngredient]) -> Vec<Ingredient> {
    raw.iter()
        .filter_map(|entry| {
            let trimmed = entry.name().trim();
            if trimmed.is_empty() {
                return None;
            }
            let quantity = match entry {
                RawIngredient::Name(_) => None,
                RawIngredient::Detailed { quantity, .. } => {
                    quantity.as_deref().map(str::trim).filter(|q| !q.is_empty()).map(String::from)
                }
            };
            Some(Ingredient {
                name: trimmed.to_string(),
                quantity,
            })
        })
        .collect()
}

fn ingredient_from_value(value: &Value) -> Option<Ingredient> {
    match value {
        Value::String(name) => {
            let trimmed = name.trim();
            (!trimmed.is_empty()).then(|| Ingredient::named(trimmed))
        }
        Value::Object(map) => {
            let name = map.get("name")?.as_str()?.trim();
            if name.is_empty() {
                return None;
            }
            let quantity = map.get("quantity").and_then(quantity_from_value);
            Some(Ingredient {
                name: name.to_string(),
                quantity,
            })
        }
        _ => None,
    }
}

fn quantity_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(q) => {
            let trimmed = q.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
