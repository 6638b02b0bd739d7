//! Operators that map a fixed number of operands to exactly one result.
//! Control operators (`apply`, `if`, `render`) live in the interpreter
//! because they need the stack or the environment.

use std::rc::Rc;

use log::warn;

use crate::error::Error;
use crate::runtime::value::{Closure, Value};
use crate::scene::light;
use crate::scene::{Node, Shape};
use crate::syntax::operator::Operator;
use crate::types::vecmat::Vec3;

/// Results of `sin`/`cos` closer to zero than this are reported as zero.
const TRIG_SNAP: f64 = 1e-7;

// ─── Operand helpers ──────────────────────────────────────────────────────────

pub(crate) fn type_error(op: Operator, expected: &'static str, found: &Value) -> Error {
    Error::Type { op: op.name(), expected, found: found.type_name() }
}

/// Operands in push order. The interpreter already checked the depth.
fn take<const N: usize>(op: Operator, args: Vec<Value>) -> Result<[Value; N], Error> {
    args.try_into().map_err(|_| Error::StackUnderflow(op.name()))
}

pub(crate) fn as_int(op: Operator, v: &Value) -> Result<i64, Error> {
    match v {
        Value::Integer(i) => Ok(*i),
        other => Err(type_error(op, "integer", other)),
    }
}

pub(crate) fn as_real(op: Operator, v: &Value) -> Result<f64, Error> {
    match v {
        Value::Real(r) => Ok(*r),
        other => Err(type_error(op, "real", other)),
    }
}

/// Transform parameters take either numeric type.
fn as_number(op: Operator, v: &Value) -> Result<f64, Error> {
    match v {
        Value::Real(r) => Ok(*r),
        Value::Integer(i) => Ok(*i as f64),
        other => Err(type_error(op, "number", other)),
    }
}

pub(crate) fn as_point(op: Operator, v: &Value) -> Result<Vec3, Error> {
    match v {
        Value::Point(p) => Ok(*p),
        other => Err(type_error(op, "point", other)),
    }
}

pub(crate) fn as_closure(op: Operator, v: Value) -> Result<Rc<Closure>, Error> {
    match v {
        Value::Closure(c) => Ok(c),
        other => Err(type_error(op, "closure", &other)),
    }
}

fn as_geometry(op: Operator, v: Value) -> Result<Box<Node>, Error> {
    match v {
        Value::Geometry(g) => Ok(g),
        other => Err(type_error(op, "object", &other)),
    }
}

fn as_array(op: Operator, v: &Value) -> Result<&Rc<[Value]>, Error> {
    match v {
        Value::Array(a) => Ok(a),
        other => Err(type_error(op, "array", other)),
    }
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

pub(crate) fn call(op: Operator, args: Vec<Value>) -> Result<Value, Error> {
    use Operator::*;

    let v = match op {
        // ── integer arithmetic ───────────────────────────────────────────
        AddI | SubI | MulI | DivI | ModI => {
            let [a, b] = take(op, args)?;
            let (a, b) = (as_int(op, &a)?, as_int(op, &b)?);
            Value::Integer(match op {
                AddI => a.wrapping_add(b),
                SubI => a.wrapping_sub(b),
                MulI => a.wrapping_mul(b),
                DivI => a.checked_div(b).ok_or_else(|| int_division(op, b))?,
                _    => a.checked_rem(b).ok_or_else(|| int_division(op, b))?,
            })
        }
        NegI => {
            let [a] = take(op, args)?;
            Value::Integer(as_int(op, &a)?.wrapping_neg())
        }
        EqI | LessI => {
            let [a, b] = take(op, args)?;
            let (a, b) = (as_int(op, &a)?, as_int(op, &b)?);
            Value::Boolean(if op == EqI { a == b } else { a < b })
        }

        // ── real arithmetic ──────────────────────────────────────────────
        AddF | SubF | MulF | DivF => {
            let [a, b] = take(op, args)?;
            let (a, b) = (as_real(op, &a)?, as_real(op, &b)?);
            Value::Real(match op {
                AddF => a + b,
                SubF => a - b,
                MulF => a * b,
                _    => a / b,
            })
        }
        EqF | LessF => {
            let [a, b] = take(op, args)?;
            let (a, b) = (as_real(op, &a)?, as_real(op, &b)?);
            Value::Boolean(if op == EqF { a == b } else { a < b })
        }
        NegF | Sqrt | Frac | ClampF | Sin | Cos | Asin | Acos => {
            let [a] = take(op, args)?;
            let x = as_real(op, &a)?;
            Value::Real(match op {
                NegF   => -x,
                Sqrt if x < 0.0 => return Err(Error::domain("sqrt", format!("negative operand {x}"))),
                Sqrt   => x.sqrt(),
                Frac   => x - x.trunc(),
                ClampF => x.clamp(0.0, 1.0),
                Sin    => snap(x.to_radians().sin()),
                Cos    => snap(x.to_radians().cos()),
                Asin   => x.asin().to_degrees(),
                _      => x.acos().to_degrees(),
            })
        }
        Floor => {
            let [a] = take(op, args)?;
            Value::Integer(as_real(op, &a)?.floor() as i64)
        }
        Real => {
            let [a] = take(op, args)?;
            Value::Real(as_int(op, &a)? as f64)
        }

        // ── points ───────────────────────────────────────────────────────
        Point => {
            let [x, y, z] = take(op, args)?;
            Value::Point(Vec3::new(as_real(op, &x)?, as_real(op, &y)?, as_real(op, &z)?))
        }
        GetX | GetY | GetZ => {
            let [p] = take(op, args)?;
            let p = as_point(op, &p)?;
            Value::Real(match op {
                GetX => p.x,
                GetY => p.y,
                _    => p.z,
            })
        }

        // ── arrays ───────────────────────────────────────────────────────
        Get => {
            let [arr, i] = take(op, args)?;
            let arr = as_array(op, &arr)?;
            let i = as_int(op, &i)?;
            usize::try_from(i)
                .ok()
                .and_then(|idx| arr.get(idx))
                .cloned()
                .ok_or(Error::Subscript { index: i, len: arr.len() })?
        }
        Length => {
            let [arr] = take(op, args)?;
            Value::Integer(as_array(op, &arr)?.len() as i64)
        }

        // ── geometry ─────────────────────────────────────────────────────
        Sphere | Cube | Cylinder | Cone | Plane => {
            let [surface] = take(op, args)?;
            let shape = match op {
                Sphere   => Shape::Sphere,
                Cube     => Shape::Cube,
                Cylinder => Shape::Cylinder,
                Cone     => Shape::Cone,
                _        => Shape::Plane,
            };
            if shape == Shape::Cone {
                warn!("cone intersection is not supported; the object will not be visible");
            }
            Value::Geometry(Box::new(Node::primitive(shape, as_closure(op, surface)?)))
        }
        Union | Intersect | Difference => {
            let [a, b] = take(op, args)?;
            let (a, b) = (as_geometry(op, a)?, as_geometry(op, b)?);
            Value::Geometry(Box::new(match op {
                Union     => Node::Union(a, b),
                Intersect => Node::Intersect(a, b),
                _         => Node::Difference(a, b),
            }))
        }
        Translate | Scale => {
            let [obj, x, y, z] = take(op, args)?;
            let mut node = as_geometry(op, obj)?;
            let (x, y, z) = (as_number(op, &x)?, as_number(op, &y)?, as_number(op, &z)?);
            if op == Translate {
                node.translate(x, y, z);
            } else {
                node.scale(x, y, z)?;
            }
            Value::Geometry(node)
        }
        UScale | RotateX | RotateY | RotateZ => {
            let [obj, s] = take(op, args)?;
            let mut node = as_geometry(op, obj)?;
            let s = as_number(op, &s)?;
            match op {
                UScale  => node.uscale(s)?,
                RotateX => node.rotate_x(s),
                RotateY => node.rotate_y(s),
                _       => node.rotate_z(s),
            }
            Value::Geometry(node)
        }

        // ── lights ───────────────────────────────────────────────────────
        Light => {
            let [dir, color] = take(op, args)?;
            Value::Light(light::Light::Directional {
                direction: as_point(op, &dir)?,
                color: as_point(op, &color)?,
            })
        }
        PointLight => {
            let [pos, color] = take(op, args)?;
            Value::Light(light::Light::Point {
                position: as_point(op, &pos)?,
                color: as_point(op, &color)?,
            })
        }
        SpotLight => {
            let [pos, at, color, cutoff, exp] = take(op, args)?;
            Value::Light(light::Light::Spot {
                position: as_point(op, &pos)?,
                at: as_point(op, &at)?,
                color: as_point(op, &color)?,
                cutoff: as_real(op, &cutoff)?,
                exponent: as_real(op, &exp)?,
            })
        }

        Apply | If | Render => {
            return Err(Error::Unsupported(format!("`{op}` is not a value operator")));
        }
    };
    Ok(v)
}

fn int_division(op: Operator, divisor: i64) -> Error {
    if divisor == 0 {
        Error::domain(op.name(), "division by zero")
    } else {
        // i64::MIN / -1
        Error::domain(op.name(), "quotient overflows")
    }
}

fn snap(x: f64) -> f64 {
    if x.abs() < TRIG_SNAP { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: Value) -> i64 {
        match v {
            Value::Integer(i) => i,
            other => panic!("expected integer, got {other:?}"),
        }
    }

    fn real(v: Value) -> f64 {
        match v {
            Value::Real(r) => r,
            other => panic!("expected real, got {other:?}"),
        }
    }

    #[test]
    fn integer_division_truncates() {
        let r = |op, a, b| int(call(op, vec![Value::Integer(a), Value::Integer(b)]).unwrap());
        assert_eq!(r(Operator::DivI, -7, 2), -3);
        assert_eq!(r(Operator::ModI, -7, 2), -1);
        assert_eq!(r(Operator::DivI, 7, -2), -3);
        assert_eq!(r(Operator::AddI, i64::MAX, 1), i64::MIN);
    }

    #[test]
    fn division_by_zero_is_a_domain_error() {
        let err = call(Operator::DivI, vec![Value::Integer(1), Value::Integer(0)]).unwrap_err();
        assert!(matches!(err, Error::Domain { op: "divi", .. }));
    }

    #[test]
    fn trig_in_degrees() {
        assert_eq!(real(call(Operator::Cos, vec![Value::Real(90.0)]).unwrap()), 0.0);
        assert_eq!(real(call(Operator::Sin, vec![Value::Real(180.0)]).unwrap()), 0.0);
        assert!((real(call(Operator::Sin, vec![Value::Real(30.0)]).unwrap()) - 0.5).abs() < 1e-12);
        assert!((real(call(Operator::Acos, vec![Value::Real(0.0)]).unwrap()) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn floor_and_frac() {
        assert_eq!(int(call(Operator::Floor, vec![Value::Real(-1.5)]).unwrap()), -2);
        assert_eq!(real(call(Operator::Frac, vec![Value::Real(-1.25)]).unwrap()), -0.25);
        assert_eq!(real(call(Operator::ClampF, vec![Value::Real(3.0)]).unwrap()), 1.0);
    }

    #[test]
    fn wrong_operand_type() {
        let err = call(Operator::AddI, vec![Value::Integer(1), Value::Real(2.0)]).unwrap_err();
        assert_eq!(err, Error::Type { op: "addi", expected: "integer", found: "real" });
    }

    #[test]
    fn transform_accepts_integers() {
        let surface = Rc::new(Closure::new(Default::default(), Rc::from(Vec::new())));
        let sphere = call(Operator::Sphere, vec![Value::Closure(surface)]).unwrap();
        let moved = call(
            Operator::Translate,
            vec![sphere, Value::Integer(1), Value::Real(2.0), Value::Integer(3)],
        );
        assert!(matches!(moved, Ok(Value::Geometry(_))));
    }

    #[test]
    fn get_checks_bounds() {
        let arr = Value::Array(Rc::from(vec![Value::Integer(10), Value::Integer(20)]));
        assert_eq!(int(call(Operator::Get, vec![arr.clone(), Value::Integer(1)]).unwrap()), 20);
        let err = call(Operator::Get, vec![arr.clone(), Value::Integer(2)]).unwrap_err();
        assert_eq!(err, Error::Subscript { index: 2, len: 2 });
        assert!(call(Operator::Get, vec![arr, Value::Integer(-1)]).is_err());
    }
}
