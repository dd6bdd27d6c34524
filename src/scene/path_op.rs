use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::foundation::core::Point;

/// Elliptical arc parameters, SVG style: radii, x-axis rotation in degrees, the two flags and an
/// absolute endpoint. The start point is the pen position at the time the arc is reached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcTo {
    pub rx: f64,
    pub ry: f64,
    pub rotation_deg: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub x: f64,
    pub y: f64,
}

impl ArcTo {
    pub fn end(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One primitive drawing instruction stored on a drawable node.
///
/// On the wire each op is a tagged tuple such as `["lineTo", 10, 20]`. Anything that does not
/// match a known shape decodes to [`PathOp::Unknown`] instead of failing, so a single bad entry
/// never poisons the node's whole operation list.
#[derive(Clone, Debug, PartialEq)]
pub enum PathOp {
    /// `["moveTo", x, y]`
    MoveTo { x: f64, y: f64 },
    /// `["lineTo", x, y]`
    LineTo { x: f64, y: f64 },
    /// `["lineBy", dx, dy]`, relative to the current point.
    LineBy { dx: f64, dy: f64 },
    /// `["curveTo", c1x, c1y, c2x, c2y, x, y]`
    CurveTo {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
    /// `["closePath"]`
    ClosePath,
    /// `["arcTo", rx, ry, rotation, largeArc, sweep, x, y]`; never drawn directly.
    ArcTo(ArcTo),
    /// Unrecognised or malformed entry, kept verbatim.
    Unknown(Value),
}

impl PathOp {
    pub fn move_to(x: f64, y: f64) -> Self {
        PathOp::MoveTo { x, y }
    }

    pub fn line_to(x: f64, y: f64) -> Self {
        PathOp::LineTo { x, y }
    }

    pub fn line_by(dx: f64, dy: f64) -> Self {
        PathOp::LineBy { dx, dy }
    }

    pub fn curve_to(c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        PathOp::CurveTo {
            c1x,
            c1y,
            c2x,
            c2y,
            x,
            y,
        }
    }

    /// Wire tag of this op; `"?"` for entries without a string tag.
    pub fn kind(&self) -> &str {
        match self {
            PathOp::MoveTo { .. } => "moveTo",
            PathOp::LineTo { .. } => "lineTo",
            PathOp::LineBy { .. } => "lineBy",
            PathOp::CurveTo { .. } => "curveTo",
            PathOp::ClosePath => "closePath",
            PathOp::ArcTo(_) => "arcTo",
            PathOp::Unknown(raw) => raw
                .as_array()
                .and_then(|items| items.first())
                .and_then(Value::as_str)
                .unwrap_or("?"),
        }
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, PathOp::ArcTo(_))
    }

    /// Decode one op from its JSON form. Never fails.
    pub fn from_value(value: Value) -> Self {
        decode(&value).unwrap_or(PathOp::Unknown(value))
    }

    pub fn to_value(&self) -> Value {
        let tagged = |kind: &str, args: &[f64]| {
            let mut items = Vec::with_capacity(args.len() + 1);
            items.push(Value::from(kind));
            items.extend(args.iter().map(|&a| Value::from(a)));
            Value::Array(items)
        };
        match *self {
            PathOp::MoveTo { x, y } => tagged("moveTo", &[x, y]),
            PathOp::LineTo { x, y } => tagged("lineTo", &[x, y]),
            PathOp::LineBy { dx, dy } => tagged("lineBy", &[dx, dy]),
            PathOp::CurveTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => tagged("curveTo", &[c1x, c1y, c2x, c2y, x, y]),
            PathOp::ClosePath => tagged("closePath", &[]),
            PathOp::ArcTo(arc) => Value::Array(vec![
                Value::from("arcTo"),
                Value::from(arc.rx),
                Value::from(arc.ry),
                Value::from(arc.rotation_deg),
                Value::from(arc.large_arc),
                Value::from(arc.sweep),
                Value::from(arc.x),
                Value::from(arc.y),
            ]),
            PathOp::Unknown(ref raw) => raw.clone(),
        }
    }
}

fn decode(value: &Value) -> Option<PathOp> {
    let items = value.as_array()?;
    let (kind, args) = items.split_first()?;
    let num = |i: usize| args.get(i).and_then(Value::as_f64);
    let flag = |i: usize| match args.get(i)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    };
    let arity = |n: usize| (args.len() == n).then_some(());

    let op = match kind.as_str()? {
        "moveTo" => {
            arity(2)?;
            PathOp::move_to(num(0)?, num(1)?)
        }
        "lineTo" => {
            arity(2)?;
            PathOp::line_to(num(0)?, num(1)?)
        }
        "lineBy" => {
            arity(2)?;
            PathOp::line_by(num(0)?, num(1)?)
        }
        "curveTo" => {
            arity(6)?;
            PathOp::curve_to(num(0)?, num(1)?, num(2)?, num(3)?, num(4)?, num(5)?)
        }
        "closePath" => {
            arity(0)?;
            PathOp::ClosePath
        }
        "arcTo" => {
            arity(7)?;
            PathOp::ArcTo(ArcTo {
                rx: num(0)?,
                ry: num(1)?,
                rotation_deg: num(2)?,
                large_arc: flag(3)?,
                sweep: flag(4)?,
                x: num(5)?,
                y: num(6)?,
            })
        }
        _ => return None,
    };
    Some(op)
}

impl Serialize for PathOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PathOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(PathOp::from_value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/path_op.rs"]
mod tests;
