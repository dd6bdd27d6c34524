use std::collections::BTreeMap;

use crate::{
    foundation::core::Matrix,
    render::surface::{LineCap, LineJoin},
};

/// Attribute key holding the node's local transform.
pub const MATRIX: &str = "matrix";
/// Attribute key holding the packed fill colour.
pub const FILL_COLOR: &str = "fillColor";
/// Attribute key holding the packed stroke colour.
pub const STROKE_COLOR: &str = "strokeColor";
/// Attribute key holding the stroke width.
pub const STROKE_WIDTH: &str = "strokeWidth";
/// Attribute key holding the line cap name.
pub const CAP: &str = "cap";
/// Attribute key holding the line join name.
pub const JOIN: &str = "join";
/// Attribute key holding the opacity multiplier.
pub const OPACITY: &str = "opacity";

/// One attribute value.
///
/// The set of variants is closed; anything the producer sends must fit one of them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Explicit `null`.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Any JSON number (packed colours included).
    Number(f64),
    /// String value (cap/join names, ids, ...).
    Text(String),
    /// Affine transform `{a,b,c,d,tx,ty}`.
    Matrix(Matrix),
    /// Ordered list.
    List(Vec<AttrValue>),
    /// Nested object that is not a matrix.
    Map(BTreeMap<String, AttrValue>),
}

impl AttrValue {
    /// Loose truthiness as the producer understands it: `null`, `false`, `0`, `NaN` and `""` are
    /// falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Null => false,
            AttrValue::Bool(b) => *b,
            AttrValue::Number(n) => *n != 0.0 && !n.is_nan(),
            AttrValue::Text(s) => !s.is_empty(),
            AttrValue::Matrix(_) | AttrValue::List(_) | AttrValue::Map(_) => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Number(v)
    }
}

impl From<u32> for AttrValue {
    fn from(v: u32) -> Self {
        AttrValue::Number(f64::from(v))
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<Matrix> for AttrValue {
    fn from(v: Matrix) -> Self {
        AttrValue::Matrix(v)
    }
}

/// Open-ended attribute bag of a node.
///
/// Updates are applied with [`Attributes::merge`]: incoming keys overwrite existing ones, keys the
/// update does not mention are left alone. A bag is never replaced wholesale after creation.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `update` into this bag key by key, overwriting on conflict.
    pub fn merge(&mut self, update: Attributes) {
        self.0.extend(update.0);
    }

    /// Whether `key` is present and truthy.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(AttrValue::is_truthy)
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.get(key)
            .and_then(AttrValue::as_number)
            .filter(|n| !n.is_nan())
    }

    pub fn matrix(&self) -> Option<Matrix> {
        match self.get(MATRIX) {
            Some(AttrValue::Matrix(m)) => Some(*m),
            _ => None,
        }
    }

    pub fn fill_color(&self) -> Option<u32> {
        self.number(FILL_COLOR).map(to_packed)
    }

    pub fn stroke_color(&self) -> Option<u32> {
        self.number(STROKE_COLOR).map(to_packed)
    }

    pub fn stroke_width(&self) -> Option<f64> {
        self.number(STROKE_WIDTH)
    }

    pub fn opacity(&self) -> Option<f64> {
        self.number(OPACITY)
    }

    pub fn line_cap(&self) -> Option<LineCap> {
        self.get(CAP)
            .and_then(AttrValue::as_str)
            .and_then(LineCap::parse)
    }

    pub fn line_join(&self) -> Option<LineJoin> {
        self.get(JOIN)
            .and_then(AttrValue::as_str)
            .and_then(LineJoin::parse)
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// Unsigned 32-bit wrap, so `-1` reads as `0xFFFFFFFF`.
fn to_packed(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    (n.trunc() as i64) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/scene/attributes.rs"]
mod tests;
