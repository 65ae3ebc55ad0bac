// Copyright (c) 2026, gfxscript contributors
//
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
//     * Redistributions of source code must retain the above copyright notice,
//       this list of conditions and the following disclaimer.
//     * Redistributions in binary form must reproduce the above copyright notice,
//       this list of conditions and the following disclaimer in the documentation
//       and/or other materials provided with the distribution.
//     * Neither the name of the copyright holder nor the names of its contributors
//       may be used to endorse or promote products derived from this software
//       without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
// A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR
// CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
// EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
// PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
// PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF
// LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING
// NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
// SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! The dynamic runtime value: spec.md §3 "Value variants". Every expression
//! evaluates to one of these; scopes store them by name.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use gfxscript_lang::ast::{BinOp, UnOp};

/// Component count of a vector/matrix-row type, used throughout arity checks.
pub type Arity = usize;

#[derive(Clone, Debug, PartialEq)]
pub enum Value
{
    Null,
    Bool(bool),
    Int(i32),
    Float(f32),
    Str(String),
    Vec2(Box<[Value; 2]>),
    Vec3(Box<[Value; 3]>),
    Vec4(Box<[Value; 4]>),
    Mat2(Box<Mat2>),
    Mat3(Box<Mat3>),
    Mat4(Box<Mat4>),
    List(Box<ListValue>),
    Buffer(Box<Buffer>),
    Texture(Box<Texture>),
    Program(Box<Program>)
}

/// A `List`'s `literal` flag marks "contents are unevaluated AST expressions"
/// (spec.md §3); this crate only ever stores already-evaluated `Value`s in a
/// `ListValue` (literal lists are evaluated once, at construction, by the
/// interpreter — "lazy at most once"), so the flag degrades to a provenance
/// marker consumers can ignore.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ListValue
{
    pub items: Vec<Value>,
    pub literal: bool
}

/// Ordered attribute names plus their component count, set on first `upload`
/// to an attribute and enforced afterwards (spec.md §4.F Upload).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct BufferLayout
{
    pub attrs: Vec<(String, u32)>
}

impl BufferLayout
{
    pub fn component_count(&self, name: &str) -> Option<u32>
    {
        self.attrs.iter().find(|(n, _)| n == name).map(|(_, c)| *c)
    }

    pub fn set_component_count(&mut self, name: &str, count: u32)
    {
        if let Some(entry) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            entry.1 = count;
        } else {
            self.attrs.push((name.to_string(), count));
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Buffer
{
    pub vbo: u32,
    pub ebo: u32,
    pub layout: BufferLayout,
    pub data: HashMap<String, Vec<f32>>,
    pub sizes: HashMap<String, u32>,
    pub indices: Vec<u32>
}

impl Buffer
{
    pub fn vertex_count(&self) -> usize
    {
        self.layout
            .attrs
            .first()
            .and_then(|(name, count)| self.data.get(name).map(|d| d.len() / (*count).max(1) as usize))
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Texture
{
    pub handle: u32,
    pub framebuffer: Option<u32>,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub pixels: Vec<u8>
}

impl Texture
{
    /// A `texture2D` declared without an initializer (spec.md §4.F Decl):
    /// dangling placeholder, handle 0, nothing decoded yet.
    pub fn dangling() -> Self
    {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program
{
    pub handle: u32,
    pub name: String,
    /// Names of the fragment shader's `texture2D` uniforms in declaration
    /// order; the index of a name here is its GL texture slot (spec.md §4.F
    /// Assign, scenario S6).
    pub texture_slots: Vec<String>,
    pub current_texture_unit: HashMap<String, u32>
}

macro_rules! mat_type {
    ($name:ident, $n:expr, $vec_variant:ident) => {
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name
        {
            pub rows: [Value; $n],
            pub cols: [Value; $n]
        }

        impl $name
        {
            pub fn from_rows(rows: [Value; $n]) -> Self
            {
                let cols = Self::transpose(&rows);
                Self { rows, cols }
            }

            pub fn identity() -> Self
            {
                let mut rows: Vec<Value> = Vec::with_capacity($n);
                for i in 0..$n {
                    let mut comps = Vec::with_capacity($n);
                    for j in 0..$n {
                        comps.push(Value::Float(if i == j { 1.0 } else { 0.0 }));
                    }
                    rows.push(Value::$vec_variant(Box::new(comps.try_into().unwrap())));
                }
                Self::from_rows(rows.try_into().unwrap())
            }

            pub fn set_row(&mut self, i: usize, row: Value) -> Result<(), String>
            {
                if i >= $n {
                    return Err(format!("row index {} out of range for {}x{} matrix", i, $n, $n));
                }
                self.rows[i] = row;
                self.cols = Self::transpose(&self.rows);
                Ok(())
            }

            fn transpose(rows: &[Value; $n]) -> [Value; $n]
            {
                let mut cols: Vec<Value> = Vec::with_capacity($n);
                for j in 0..$n {
                    let mut comps: Vec<Value> = Vec::with_capacity($n);
                    for row in rows.iter() {
                        comps.push(component(row, j).cloned().unwrap_or(Value::Float(0.0)));
                    }
                    cols.push(Value::$vec_variant(Box::new(comps.try_into().unwrap())));
                }
                cols.try_into().unwrap()
            }
        }
    };
}

mat_type!(Mat2, 2, Vec2);
mat_type!(Mat3, 3, Vec3);
mat_type!(Mat4, 4, Vec4);

/// Reads the `i`-th component of a Vec2/3/4 `Value`. Per spec.md §9 open
/// question (a): index `4` is never valid on a Vec4 (no aliasing of `w`);
/// `[0, arity-1]` is the only legal range.
pub fn component(v: &Value, i: usize) -> Option<&Value>
{
    match v {
        Value::Vec2(c) => c.get(i),
        Value::Vec3(c) => c.get(i),
        Value::Vec4(c) => c.get(i),
        _ => None
    }
}

pub fn component_mut(v: &mut Value, i: usize) -> Option<&mut Value>
{
    match v {
        Value::Vec2(c) => c.get_mut(i),
        Value::Vec3(c) => c.get_mut(i),
        Value::Vec4(c) => c.get_mut(i),
        _ => None
    }
}

pub fn arity(v: &Value) -> Option<Arity>
{
    match v {
        Value::Vec2(_) => Some(2),
        Value::Vec3(_) => Some(3),
        Value::Vec4(_) => Some(4),
        _ => None
    }
}

fn make_vec(components: Vec<Value>) -> Result<Value, String>
{
    match components.len() {
        2 => Ok(Value::Vec2(Box::new([components[0].clone(), components[1].clone()]))),
        3 => Ok(Value::Vec3(Box::new([components[0].clone(), components[1].clone(), components[2].clone()]))),
        4 => Ok(Value::Vec4(Box::new([
            components[0].clone(),
            components[1].clone(),
            components[2].clone(),
            components[3].clone()
        ]))),
        n => Err(format!("cannot build a vector with {} components", n))
    }
}

impl Value
{
    pub fn type_name(&self) -> &'static str
    {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Vec2(_) => "vec2",
            Value::Vec3(_) => "vec3",
            Value::Vec4(_) => "vec4",
            Value::Mat2(_) => "mat2",
            Value::Mat3(_) => "mat3",
            Value::Mat4(_) => "mat4",
            Value::List(_) => "list",
            Value::Buffer(_) => "buffer",
            Value::Texture(_) => "texture2D",
            Value::Program(_) => "program"
        }
    }

    pub fn as_f32(&self) -> Result<f32, String>
    {
        match self {
            Value::Int(i) => Ok(*i as f32),
            Value::Float(f) => Ok(*f),
            other => Err(format!("expected a number, got {}", other.type_name()))
        }
    }

    pub fn as_bool(&self) -> Result<bool, String>
    {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(format!("expected a bool, got {}", other.type_name()))
        }
    }

    pub fn truthy(&self) -> Result<bool, String>
    {
        self.as_bool()
    }

    fn components(&self) -> Option<Vec<Value>>
    {
        match self {
            Value::Vec2(c) => Some(c.to_vec()),
            Value::Vec3(c) => Some(c.to_vec()),
            Value::Vec4(c) => Some(c.to_vec()),
            _ => None
        }
    }

    /// The "constructor" rule of spec.md E.9: evaluated bracket-literal
    /// components decide whether the literal is a vector, a matrix, or a
    /// flattened vector. `components` must already be evaluated `Value`s.
    pub fn construct(components: Vec<Value>) -> Result<Value, String>
    {
        if components.iter().all(|c| matches!(c, Value::Int(_) | Value::Float(_))) {
            return make_vec(components);
        }
        if let Some(first_arity) = components.first().and_then(arity) {
            if components.len() == first_arity && components.iter().all(|c| arity(c) == Some(first_arity)) {
                let rows: Vec<Value> = components;
                return match first_arity {
                    2 => Ok(Value::Mat2(Box::new(Mat2::from_rows([rows[0].clone(), rows[1].clone()])))),
                    3 => Ok(Value::Mat3(Box::new(Mat3::from_rows([rows[0].clone(), rows[1].clone(), rows[2].clone()])))),
                    4 => Ok(Value::Mat4(Box::new(Mat4::from_rows([
                        rows[0].clone(),
                        rows[1].clone(),
                        rows[2].clone(),
                        rows[3].clone()
                    ])))),
                    n => Err(format!("no {}x{} matrix type exists", n, n))
                };
            }
        }
        let mut flat = Vec::new();
        for c in &components {
            match c {
                Value::Int(_) | Value::Float(_) => flat.push(c.clone()),
                other => match other.components() {
                    Some(comps) => flat.extend(comps),
                    None => return Err(format!("cannot flatten a {} into a vector literal", other.type_name()))
                }
            }
        }
        if matches!(flat.len(), 2 | 3 | 4) {
            make_vec(flat)
        } else {
            Err(format!("a {}-component vector literal has no vector/matrix type", flat.len()))
        }
    }

    pub fn unary(op: UnOp, v: &Value) -> Result<Value, String>
    {
        match (op, v) {
            (UnOp::Neg, Value::Int(i)) => Ok(Value::Int(-i)),
            (UnOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
            (UnOp::Neg, v @ (Value::Vec2(_) | Value::Vec3(_) | Value::Vec4(_))) => {
                let comps = v.components().unwrap();
                let negated: Vec<Value> = comps
                    .iter()
                    .map(|c| Value::unary(UnOp::Neg, c))
                    .collect::<Result<_, _>>()?;
                make_vec(negated)
            },
            (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnOp::Abs, Value::Int(i)) => Ok(Value::Int(i.abs())),
            (UnOp::Abs, Value::Float(f)) => Ok(Value::Float(f.abs())),
            (UnOp::Abs, v @ (Value::Vec2(_) | Value::Vec3(_) | Value::Vec4(_))) => Ok(Value::Float(v.length()?)),
            (UnOp::Abs, Value::Mat2(m)) => Ok(Value::Float(m.determinant()?)),
            (UnOp::Abs, Value::Mat3(m)) => Ok(Value::Float(m.determinant()?)),
            (UnOp::Abs, Value::Mat4(m)) => Ok(Value::Float(m.determinant()?)),
            (UnOp::Abs, Value::List(l)) => Ok(Value::Int(l.items.len() as i32)),
            (op, v) => Err(format!("unary operator cannot be applied to a {} value (operator {:?})", v.type_name(), op))
        }
    }

    pub fn length(&self) -> Result<f32, String>
    {
        let comps = self.components().ok_or_else(|| format!("{} has no length", self.type_name()))?;
        let mut sum = 0.0f32;
        for c in &comps {
            let f = c.as_f32()?;
            sum += f * f;
        }
        Ok(sum.sqrt())
    }

    pub fn binary(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, String>
    {
        use BinOp::*;
        match op {
            And => Ok(Value::Bool(lhs.as_bool()? && rhs.as_bool()?)),
            Or => Ok(Value::Bool(lhs.as_bool()? || rhs.as_bool()?)),
            Eq => Ok(Value::Bool(values_eq(lhs, rhs)?)),
            Neq => Ok(Value::Bool(!values_eq(lhs, rhs)?)),
            Lt | Gt | Le | Ge => compare(op, lhs, rhs),
            Add | Sub if matches!(lhs, Value::Str(_)) || matches!(rhs, Value::Str(_)) => {
                if op == Sub {
                    return Err("strings only support '+' (concatenation), not '-'".into());
                }
                Ok(Value::Str(format!("{}{}", pretty(lhs), pretty(rhs))))
            },
            Add | Sub | Mul | Div => arithmetic(op, lhs, rhs),
            Mod => modulo_or_cross(lhs, rhs),
            Exp => dot(lhs, rhs)
        }
    }
}

fn values_eq(lhs: &Value, rhs: &Value) -> Result<bool, String>
{
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::Float(a), Value::Float(b)) => Ok(a == b),
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => Ok(*a as f32 == *b),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Null, Value::Null) => Ok(true),
        (a, b) => Ok(a == b)
    }
}

fn compare(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, String>
{
    use std::cmp::Ordering;
    let ord = match (lhs, rhs) {
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        (a, b) => {
            let (x, y) = (a.as_f32()?, b.as_f32()?);
            x.partial_cmp(&y).ok_or_else(|| "NaN is not ordered".to_string())?
        }
    };
    let b = match op {
        BinOp::Lt => ord == Ordering::Less,
        BinOp::Gt => ord == Ordering::Greater,
        BinOp::Le => ord != Ordering::Greater,
        BinOp::Ge => ord != Ordering::Less,
        _ => unreachable!()
    };
    Ok(Value::Bool(b))
}

fn arithmetic(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, String>
{
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => {
            if op == BinOp::Div {
                return Ok(Value::Float(*a as f32 / *b as f32));
            }
            Ok(Value::Int(match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                BinOp::Mul => a * b,
                _ => unreachable!()
            }))
        },
        (Value::Int(_), Value::Float(_)) | (Value::Float(_), Value::Int(_)) | (Value::Float(_), Value::Float(_)) => {
            let (a, b) = (lhs.as_f32()?, rhs.as_f32()?);
            Ok(Value::Float(match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                BinOp::Mul => a * b,
                BinOp::Div => a / b,
                _ => unreachable!()
            }))
        },
        (a @ (Value::Vec2(_) | Value::Vec3(_) | Value::Vec4(_)), b) if matches!(b, Value::Int(_) | Value::Float(_)) => {
            componentwise_scalar(op, a, b.as_f32()?, false)
        },
        (a, b @ (Value::Vec2(_) | Value::Vec3(_) | Value::Vec4(_))) if matches!(a, Value::Int(_) | Value::Float(_)) => {
            if op == BinOp::Div {
                return Err("scalar / vector is not defined".into());
            }
            componentwise_scalar(op, b, a.as_f32()?, true)
        },
        (a @ (Value::Vec2(_) | Value::Vec3(_) | Value::Vec4(_)), b @ (Value::Vec2(_) | Value::Vec3(_) | Value::Vec4(_))) => {
            componentwise_vector(op, a, b)
        },
        (Value::Mat2(_), _) | (Value::Mat3(_), _) | (Value::Mat4(_), _) | (_, Value::Mat2(_)) | (_, Value::Mat3(_)) | (_, Value::Mat4(_)) => {
            matrix_arithmetic(op, lhs, rhs)
        },
        (a, b) => Err(format!("cannot apply {:?} between {} and {}", op, a.type_name(), b.type_name()))
    }
}

fn componentwise_scalar(op: BinOp, v: &Value, scalar: f32, scalar_on_left: bool) -> Result<Value, String>
{
    let comps = v.components().unwrap();
    let result: Vec<Value> = comps
        .iter()
        .map(|c| {
            let x = c.as_f32()?;
            let v = match op {
                BinOp::Add => x + scalar,
                BinOp::Sub => {
                    if scalar_on_left {
                        scalar - x
                    } else {
                        x - scalar
                    }
                },
                BinOp::Mul => x * scalar,
                BinOp::Div => x / scalar,
                _ => unreachable!()
            };
            Ok(Value::Float(v))
        })
        .collect::<Result<_, String>>()?;
    make_vec(result)
}

fn componentwise_vector(op: BinOp, a: &Value, b: &Value) -> Result<Value, String>
{
    let (ca, cb) = (a.components().unwrap(), b.components().unwrap());
    if ca.len() != cb.len() {
        return Err(format!("vector arity mismatch ({} vs {})", ca.len(), cb.len()));
    }
    let result: Vec<Value> = ca
        .iter()
        .zip(cb.iter())
        .map(|(x, y)| {
            let (x, y) = (x.as_f32()?, y.as_f32()?);
            Ok(Value::Float(match op {
                BinOp::Add => x + y,
                BinOp::Sub => x - y,
                BinOp::Mul => x * y,
                BinOp::Div => x / y,
                _ => unreachable!()
            }))
        })
        .collect::<Result<_, String>>()?;
    make_vec(result)
}

fn dot(lhs: &Value, rhs: &Value) -> Result<Value, String>
{
    let (ca, cb) = (
        lhs.components().ok_or_else(|| format!("'^' (dot) requires vectors, got {}", lhs.type_name()))?,
        rhs.components().ok_or_else(|| format!("'^' (dot) requires vectors, got {}", rhs.type_name()))?
    );
    if ca.len() != cb.len() {
        return Err(format!("dot product arity mismatch ({} vs {})", ca.len(), cb.len()));
    }
    let mut sum = 0.0f32;
    for (x, y) in ca.iter().zip(cb.iter()) {
        sum += x.as_f32()? * y.as_f32()?;
    }
    Ok(Value::Float(sum))
}

fn modulo_or_cross(lhs: &Value, rhs: &Value) -> Result<Value, String>
{
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a % b)),
        (Value::Vec2(a), Value::Vec2(b)) => {
            let (ax, ay) = (a[0].as_f32()?, a[1].as_f32()?);
            let (bx, by) = (b[0].as_f32()?, b[1].as_f32()?);
            Ok(Value::Float(ax * by - ay * bx))
        },
        (Value::Vec3(a), Value::Vec3(b)) => {
            let (ax, ay, az) = (a[0].as_f32()?, a[1].as_f32()?, a[2].as_f32()?);
            let (bx, by, bz) = (b[0].as_f32()?, b[1].as_f32()?, b[2].as_f32()?);
            make_vec(vec![
                Value::Float(ay * bz - az * by),
                Value::Float(az * bx - ax * bz),
                Value::Float(ax * by - ay * bx)
            ])
        },
        (a, b) => Err(format!("'%' is only defined on int pairs or 2D/3D vector pairs, got {} and {}", a.type_name(), b.type_name()))
    }
}

fn matrix_arithmetic(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, String>
{
    match (lhs, rhs, op) {
        (Value::Mat2(m), b, _) if matches!(b, Value::Int(_) | Value::Float(_)) => mat2_scalar(op, m, b.as_f32()?),
        (Value::Mat3(m), b, _) if matches!(b, Value::Int(_) | Value::Float(_)) => mat3_scalar(op, m, b.as_f32()?),
        (Value::Mat4(m), b, _) if matches!(b, Value::Int(_) | Value::Float(_)) => mat4_scalar(op, m, b.as_f32()?),
        (a, Value::Mat2(m), BinOp::Mul) if matches!(a, Value::Int(_) | Value::Float(_)) => mat2_scalar(BinOp::Mul, m, a.as_f32()?),
        (a, Value::Mat3(m), BinOp::Mul) if matches!(a, Value::Int(_) | Value::Float(_)) => mat3_scalar(BinOp::Mul, m, a.as_f32()?),
        (a, Value::Mat4(m), BinOp::Mul) if matches!(a, Value::Int(_) | Value::Float(_)) => mat4_scalar(BinOp::Mul, m, a.as_f32()?),
        (Value::Mat2(m), Value::Vec2(v), BinOp::Mul) => mat2_vec(m, v),
        (Value::Mat3(m), Value::Vec3(v), BinOp::Mul) => mat3_vec(m, v),
        (Value::Mat4(m), Value::Vec4(v), BinOp::Mul) => mat4_vec(m, v),
        (Value::Mat2(a), Value::Mat2(b), BinOp::Mul) => mat2_mat2(a, b),
        (Value::Mat3(a), Value::Mat3(b), BinOp::Mul) => mat3_mat3(a, b),
        (Value::Mat4(a), Value::Mat4(b), BinOp::Mul) => mat4_mat4(a, b),
        (Value::Mat2(a), Value::Mat2(b), BinOp::Add | BinOp::Sub) => mat2_mat2_addsub(op, a, b),
        (Value::Mat3(a), Value::Mat3(b), BinOp::Add | BinOp::Sub) => mat3_mat3_addsub(op, a, b),
        (Value::Mat4(a), Value::Mat4(b), BinOp::Add | BinOp::Sub) => mat4_mat4_addsub(op, a, b),
        (a, b, _) => Err(format!("no matrix operator for {} {:?} {}", a.type_name(), op, b.type_name()))
    }
}

macro_rules! mat_scalar_fn {
    ($fn_name:ident, $mat:ty, $n:expr) => {
        fn $fn_name(op: BinOp, m: &$mat, scalar: f32) -> Result<Value, String>
        {
            let mut rows = Vec::with_capacity($n);
            for r in 0..$n {
                rows.push(componentwise_scalar(op, &m.rows[r], scalar, false)?);
            }
            build_mat(rows)
        }
    };
}

mat_scalar_fn!(mat2_scalar, Mat2, 2);
mat_scalar_fn!(mat3_scalar, Mat3, 3);
mat_scalar_fn!(mat4_scalar, Mat4, 4);

fn build_mat(rows: Vec<Value>) -> Result<Value, String>
{
    match rows.len() {
        2 => Ok(Value::Mat2(Box::new(Mat2::from_rows([rows[0].clone(), rows[1].clone()])))),
        3 => Ok(Value::Mat3(Box::new(Mat3::from_rows([rows[0].clone(), rows[1].clone(), rows[2].clone()])))),
        4 => Ok(Value::Mat4(Box::new(Mat4::from_rows([
            rows[0].clone(),
            rows[1].clone(),
            rows[2].clone(),
            rows[3].clone()
        ])))),
        n => Err(format!("no {}x{} matrix type", n, n))
    }
}

fn mat2_vec(m: &Mat2, v: &[Value; 2]) -> Result<Value, String>
{
    let vv = Value::Vec2(Box::new(v.clone()));
    let mut out = Vec::with_capacity(2);
    for r in 0..2 {
        out.push(dot(&m.rows[r], &vv)?);
    }
    make_vec(out)
}

fn mat3_vec(m: &Mat3, v: &[Value; 3]) -> Result<Value, String>
{
    let vv = Value::Vec3(Box::new(v.clone()));
    let mut out = Vec::with_capacity(3);
    for r in 0..3 {
        out.push(dot(&m.rows[r], &vv)?);
    }
    make_vec(out)
}

fn mat4_vec(m: &Mat4, v: &[Value; 4]) -> Result<Value, String>
{
    let vv = Value::Vec4(Box::new(v.clone()));
    let mut out = Vec::with_capacity(4);
    for r in 0..4 {
        out.push(dot(&m.rows[r], &vv)?);
    }
    make_vec(out)
}

fn mat2_mat2(a: &Mat2, b: &Mat2) -> Result<Value, String>
{
    let mut rows = Vec::with_capacity(2);
    for r in 0..2 {
        let mut comps = Vec::with_capacity(2);
        for c in 0..2 {
            comps.push(dot(&a.rows[r], &b.cols[c])?);
        }
        rows.push(make_vec(comps)?);
    }
    build_mat(rows)
}

fn mat3_mat3(a: &Mat3, b: &Mat3) -> Result<Value, String>
{
    let mut rows = Vec::with_capacity(3);
    for r in 0..3 {
        let mut comps = Vec::with_capacity(3);
        for c in 0..3 {
            comps.push(dot(&a.rows[r], &b.cols[c])?);
        }
        rows.push(make_vec(comps)?);
    }
    build_mat(rows)
}

fn mat4_mat4(a: &Mat4, b: &Mat4) -> Result<Value, String>
{
    let mut rows = Vec::with_capacity(4);
    for r in 0..4 {
        let mut comps = Vec::with_capacity(4);
        for c in 0..4 {
            comps.push(dot(&a.rows[r], &b.cols[c])?);
        }
        rows.push(make_vec(comps)?);
    }
    build_mat(rows)
}

fn mat2_mat2_addsub(op: BinOp, a: &Mat2, b: &Mat2) -> Result<Value, String>
{
    let rows: Vec<Value> = (0..2).map(|r| componentwise_vector(op, &a.rows[r], &b.rows[r])).collect::<Result<_, _>>()?;
    build_mat(rows)
}

fn mat3_mat3_addsub(op: BinOp, a: &Mat3, b: &Mat3) -> Result<Value, String>
{
    let rows: Vec<Value> = (0..3).map(|r| componentwise_vector(op, &a.rows[r], &b.rows[r])).collect::<Result<_, _>>()?;
    build_mat(rows)
}

fn mat4_mat4_addsub(op: BinOp, a: &Mat4, b: &Mat4) -> Result<Value, String>
{
    let rows: Vec<Value> = (0..4).map(|r| componentwise_vector(op, &a.rows[r], &b.rows[r])).collect::<Result<_, _>>()?;
    build_mat(rows)
}

impl Mat2
{
    pub fn determinant(&self) -> Result<f32, String>
    {
        let a = component(&self.rows[0], 0).unwrap().as_f32()?;
        let b = component(&self.rows[0], 1).unwrap().as_f32()?;
        let c = component(&self.rows[1], 0).unwrap().as_f32()?;
        let d = component(&self.rows[1], 1).unwrap().as_f32()?;
        Ok(a * d - b * c)
    }
}

impl Mat3
{
    pub fn determinant(&self) -> Result<f32, String>
    {
        let m = |r: usize, c: usize| component(&self.rows[r], c).unwrap().as_f32();
        let (a, b, c) = (m(0, 0)?, m(0, 1)?, m(0, 2)?);
        let (d, e, f) = (m(1, 0)?, m(1, 1)?, m(1, 2)?);
        let (g, h, i) = (m(2, 0)?, m(2, 1)?, m(2, 2)?);
        Ok(a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g))
    }
}

impl Mat4
{
    pub fn determinant(&self) -> Result<f32, String>
    {
        let m = |r: usize, c: usize| component(&self.rows[r], c).unwrap().as_f32();
        let mut v = [[0f32; 4]; 4];
        for r in 0..4 {
            for c in 0..4 {
                v[r][c] = m(r, c)?;
            }
        }
        // Cofactor expansion along the first row (closed formula, spec.md §4.E.4).
        let minor3 = |skip_r: usize, skip_c: usize| -> f32 {
            let mut rows = Vec::with_capacity(3);
            for r in 0..4 {
                if r == skip_r {
                    continue;
                }
                let mut row = Vec::with_capacity(3);
                for c in 0..4 {
                    if c == skip_c {
                        continue;
                    }
                    row.push(v[r][c]);
                }
                rows.push(row);
            }
            rows[0][0] * (rows[1][1] * rows[2][2] - rows[1][2] * rows[2][1])
                - rows[0][1] * (rows[1][0] * rows[2][2] - rows[1][2] * rows[2][0])
                + rows[0][2] * (rows[1][0] * rows[2][1] - rows[1][1] * rows[2][0])
        };
        let mut det = 0.0;
        for c in 0..4 {
            let sign = if c % 2 == 0 { 1.0 } else { -1.0 };
            det += sign * v[0][c] * minor3(0, c);
        }
        Ok(det)
    }
}

/// The canonical pretty-printer used by `print`, string coercion (E.5) and
/// texture/program display. Floats always print with six decimal digits to
/// match scenario S2 (`3/2` prints as `1.500000`).
pub fn pretty(v: &Value) -> String
{
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format!("{:.6}", f),
        Value::Str(s) => s.clone(),
        Value::Vec2(c) => format!("[{}, {}]", pretty(&c[0]), pretty(&c[1])),
        Value::Vec3(c) => format!("[{}, {}, {}]", pretty(&c[0]), pretty(&c[1]), pretty(&c[2])),
        Value::Vec4(c) => format!("[{}, {}, {}, {}]", pretty(&c[0]), pretty(&c[1]), pretty(&c[2]), pretty(&c[3])),
        Value::Mat2(m) => format!("[{}, {}]", pretty(&m.rows[0]), pretty(&m.rows[1])),
        Value::Mat3(m) => format!("[{}, {}, {}]", pretty(&m.rows[0]), pretty(&m.rows[1]), pretty(&m.rows[2])),
        Value::Mat4(m) => format!("[{}, {}, {}, {}]", pretty(&m.rows[0]), pretty(&m.rows[1]), pretty(&m.rows[2]), pretty(&m.rows[3])),
        Value::List(l) => format!("[{}]", l.items.iter().map(pretty).collect::<Vec<_>>().join(", ")),
        Value::Buffer(b) => format!("<buffer vbo={}>", b.vbo),
        Value::Texture(t) => format!("<texture2D {}x{}>", t.width, t.height),
        Value::Program(p) => format!("<program {:?}>", p.name)
    }
}

impl Display for Value
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result
    {
        f.write_str(&pretty(self))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn v2(x: f32, y: f32) -> Value
    {
        Value::Vec2(Box::new([Value::Float(x), Value::Float(y)]))
    }

    fn v3(x: f32, y: f32, z: f32) -> Value
    {
        Value::Vec3(Box::new([Value::Float(x), Value::Float(y), Value::Float(z)]))
    }

    #[test]
    fn int_div_int_yields_float()
    {
        let r = Value::binary(BinOp::Div, &Value::Int(3), &Value::Int(2)).unwrap();
        assert_eq!(r, Value::Float(1.5));
    }

    #[test]
    fn vector_length_matches_dot_product_law()
    {
        // P4: |v| == sqrt(v . v)
        let v = v3(1.0, 2.0, 2.0);
        let len = v.length().unwrap();
        assert!((len - 3.0).abs() < 1e-5);
        let dotted = Value::binary(BinOp::Exp, &v, &v).unwrap();
        assert!((dotted.as_f32().unwrap().sqrt() - len).abs() < 1e-5);
    }

    #[test]
    fn cross_product_is_orthogonal_to_both_operands()
    {
        let a = v3(1.0, 0.0, 0.0);
        let b = v3(0.0, 1.0, 0.0);
        let cross = Value::binary(BinOp::Mod, &a, &b).unwrap();
        let da = Value::binary(BinOp::Exp, &a, &cross).unwrap().as_f32().unwrap();
        let db = Value::binary(BinOp::Exp, &b, &cross).unwrap().as_f32().unwrap();
        assert!(da.abs() < 1e-5);
        assert!(db.abs() < 1e-5);
    }

    #[test]
    fn matrix_times_identity_is_identity_law()
    {
        let m = Mat3::from_rows([v3(1.0, 2.0, 3.0), v3(4.0, 5.0, 6.0), v3(7.0, 8.0, 10.0)]);
        let id = Mat3::identity();
        let r = Value::binary(BinOp::Mul, &Value::Mat3(Box::new(m.clone())), &Value::Mat3(Box::new(id))).unwrap();
        assert_eq!(r, Value::Mat3(Box::new(m)));
    }

    #[test]
    fn row_mutation_regenerates_columns()
    {
        let mut m = Mat2::identity();
        m.set_row(0, v2(5.0, 6.0)).unwrap();
        assert_eq!(m.rows[0], v2(5.0, 6.0));
        assert_eq!(component(&m.cols[0], 0).unwrap(), &Value::Float(5.0));
        assert_eq!(component(&m.cols[1], 0).unwrap(), &Value::Float(6.0));
    }

    #[test]
    fn determinant_2x2()
    {
        let m = Mat2::from_rows([v2(1.0, 2.0), v2(3.0, 4.0)]);
        assert_eq!(m.determinant().unwrap(), -2.0);
    }

    #[test]
    fn string_concat_coerces_other_side()
    {
        let r = Value::binary(BinOp::Add, &Value::Str("x=".into()), &Value::Int(3)).unwrap();
        assert_eq!(r, Value::Str("x=3".into()));
    }

    #[test]
    fn vec4_index_4_is_out_of_range()
    {
        let v = Value::Vec4(Box::new([Value::Float(1.0), Value::Float(2.0), Value::Float(3.0), Value::Float(4.0)]));
        assert!(component(&v, 4).is_none());
        assert!(component(&v, 3).is_some());
    }

    #[test]
    fn construct_flattens_mixed_scalars_and_vectors_into_vec4()
    {
        let v = Value::construct(vec![v3(1.0, 2.0, 3.0), Value::Float(4.0)]).unwrap();
        assert_eq!(v, Value::Vec4(Box::new([Value::Float(1.0), Value::Float(2.0), Value::Float(3.0), Value::Float(4.0)])));
    }
}
