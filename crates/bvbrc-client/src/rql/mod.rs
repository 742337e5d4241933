//! RQL clause builders
//!
//! The BV-BRC Data API filters collections with RQL, a query language made
//! of nested call-like clauses:
//!
//! ```text
//! and(eq(genome_id,83332.12),gt(genome_length,4000000))&select(genome_id,genome_name)&limit(25)
//! ```
//!
//! Every function here is pure string formatting. Values are percent-encoded;
//! field names are emitted verbatim. A bare `+` or `-` value (a DNA strand)
//! is quoted before encoding so the service does not read it as the sort
//! direction operator.
//!
//! Builders that have nothing to emit return an empty string, which
//! [`and`], [`or`] and the request body assembly skip.
//!
//! # Example
//!
//! ```
//! use bvbrc_client::rql;
//!
//! let filter = rql::and([
//!     rql::eq("genome_id", "83332.12"),
//!     rql::eq("strand", "+"),
//!     String::new(),
//! ]);
//! assert_eq!(filter, "and(eq(genome_id,83332.12),eq(strand,%22%2B%22))");
//! ```

mod filter;

pub use filter::{filters_to_rql, Comparison, FieldFilter};

use serde_json::Value;
use std::fmt::Display;

/// Percent-encode one RQL value.
pub fn encode_value(value: impl Display) -> String {
    let raw = value.to_string();
    if raw == "+" || raw == "-" {
        urlencoding::encode(&format!("\"{}\"", raw)).into_owned()
    } else {
        urlencoding::encode(&raw).into_owned()
    }
}

fn compare(op: &str, field: &str, value: impl Display) -> String {
    format!("{}({},{})", op, field, encode_value(value))
}

/// `eq(field,value)`
pub fn eq(field: &str, value: impl Display) -> String {
    compare("eq", field, value)
}

/// `ne(field,value)`
pub fn ne(field: &str, value: impl Display) -> String {
    compare("ne", field, value)
}

/// `gt(field,value)`
pub fn gt(field: &str, value: impl Display) -> String {
    compare("gt", field, value)
}

/// `lt(field,value)`
pub fn lt(field: &str, value: impl Display) -> String {
    compare("lt", field, value)
}

/// `ge(field,value)`
pub fn ge(field: &str, value: impl Display) -> String {
    compare("ge", field, value)
}

/// `le(field,value)`
pub fn le(field: &str, value: impl Display) -> String {
    compare("le", field, value)
}

fn combine<I, S>(op: &str, parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let kept: Vec<String> = parts
        .into_iter()
        .map(|part| part.as_ref().to_string())
        .filter(|part| !part.is_empty())
        .collect();

    if kept.is_empty() {
        return String::new();
    }

    format!("{}({})", op, kept.join(","))
}

/// `and(p1,p2,...)` over the non-empty parts, in order. Empty when no part remains.
pub fn and<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    combine("and", parts)
}

/// `or(p1,p2,...)` over the non-empty parts, in order. Empty when no part remains.
pub fn or<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    combine("or", parts)
}

/// `in(field,(v1,v2,...))`. Empty when there are no values.
pub fn in_<I, V>(field: &str, values: I) -> String
where
    I: IntoIterator<Item = V>,
    V: Display,
{
    let encoded: Vec<String> = values.into_iter().map(encode_value).collect();
    if encoded.is_empty() {
        return String::new();
    }
    format!("in({},({}))", field, encoded.join(","))
}

/// `keyword(term)` full-text match across the indexed fields of a collection.
pub fn keyword(term: impl Display) -> String {
    format!("keyword({})", encode_value(term))
}

/// `select(f1,f2,...)`. Empty for an empty field list.
pub fn select<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let fields: Vec<String> = fields
        .into_iter()
        .map(|f| f.as_ref().trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();

    if fields.is_empty() {
        String::new()
    } else {
        format!("select({})", fields.join(","))
    }
}

/// `sort(expr)`, where `expr` is e.g. `+genome_name` or `-collection_year`.
pub fn sort(expr: &str) -> String {
    let expr = expr.trim();
    if expr.is_empty() {
        String::new()
    } else {
        format!("sort({})", expr)
    }
}

/// `limit(n)` when `n` is an integer, otherwise an empty string.
///
/// Floats count as integers only without a fractional part; strings,
/// booleans and `None` never do.
///
/// ```
/// use bvbrc_client::rql::limit;
///
/// assert_eq!(limit(25), "limit(25)");
/// assert_eq!(limit(2.5), "");
/// assert_eq!(limit("25"), "");
/// assert_eq!(limit(None::<u32>), "");
/// ```
pub fn limit(n: impl Into<Value>) -> String {
    match integer_literal(&n.into()) {
        Some(n) => format!("limit({})", n),
        None => String::new(),
    }
}

fn integer_literal(value: &Value) -> Option<String> {
    let Value::Number(number) = value else {
        return None;
    };

    if let Some(i) = number.as_i64() {
        return Some(i.to_string());
    }
    if let Some(u) = number.as_u64() {
        return Some(u.to_string());
    }
    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Some((f as i64).to_string())
        },
        _ => None,
    }
}

/// One `eq` clause per key/value pair, in iteration order.
pub fn obj_to_eq<I, K, V>(pairs: I) -> Vec<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    pairs
        .into_iter()
        .map(|(field, value)| eq(field.as_ref(), value))
        .collect()
}

/// `and` of [`obj_to_eq`].
pub fn build_and_from<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    and(obj_to_eq(pairs))
}
