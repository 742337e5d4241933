//! Operator-parameterized field filters

use std::fmt;
use std::str::FromStr;

/// Comparison operator of a single field filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl Comparison {
    /// RQL operator name
    pub fn operator(self) -> &'static str {
        match self {
            Comparison::Eq => "eq",
            Comparison::Ne => "ne",
            Comparison::Gt => "gt",
            Comparison::Lt => "lt",
            Comparison::Ge => "ge",
            Comparison::Le => "le",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator())
    }
}

impl FromStr for Comparison {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eq" | "=" | "==" => Ok(Comparison::Eq),
            "ne" | "!=" => Ok(Comparison::Ne),
            "gt" | ">" => Ok(Comparison::Gt),
            "lt" | "<" => Ok(Comparison::Lt),
            "ge" | "gte" | ">=" => Ok(Comparison::Ge),
            "le" | "lte" | "<=" => Ok(Comparison::Le),
            other => Err(format!(
                "Unknown comparison '{}'. Use eq, ne, gt, lt, ge or le",
                other
            )),
        }
    }
}

/// `field <op> value`, rendered as one RQL clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub op: Comparison,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, op: Comparison, value: impl fmt::Display) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.to_string(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(field, Comparison::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(field, Comparison::Ne, value)
    }

    pub fn gt(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(field, Comparison::Gt, value)
    }

    pub fn lt(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(field, Comparison::Lt, value)
    }

    pub fn ge(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(field, Comparison::Ge, value)
    }

    pub fn le(field: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(field, Comparison::Le, value)
    }

    pub fn to_rql(&self) -> String {
        format!(
            "{}({},{})",
            self.op.operator(),
            self.field,
            super::encode_value(&self.value)
        )
    }
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rql())
    }
}

/// `and(...)` over every filter; empty for an empty slice.
pub fn filters_to_rql(filters: &[FieldFilter]) -> String {
    super::and(filters.iter().map(FieldFilter::to_rql))
}
