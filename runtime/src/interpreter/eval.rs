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

//! Expression evaluation (spec.md §4.F "Interpreter — expression evaluation").
//! Pure with respect to ordinary values; side-effecting only through `Dot`
//! reads that touch a `Program`'s uniforms (E.7).

use gfxscript_lang::{
    ast::{Expr, ExprKind},
    lexer::token::TypeName
};

use super::{Error, Interpreter};
use crate::value::{self, ListValue, Value};

impl Interpreter
{
    pub(crate) fn eval(&mut self, expr: &Expr) -> Result<Value, Error>
    {
        match &expr.kind {
            ExprKind::Null => Ok(Value::Null),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Int(i) => Ok(Value::Int(*i)),
            ExprKind::Float(f) => Ok(Value::Float(*f)),
            ExprKind::Str(s) => Ok(Value::Str(s.clone())),
            ExprKind::Ident(name) => self
                .lookup(name)
                .map(|b| b.value.clone())
                .ok_or_else(|| Error::resolution(expr.span, format!("'{}' is not declared", name))),
            ExprKind::Bracket(items) => {
                let values = items.iter().map(|e| self.eval(e)).collect::<Result<Vec<_>, _>>()?;
                Value::construct(values).map_err(|e| Error::type_operation(expr.span, e))
            },
            ExprKind::Brace(items) => {
                let values = items.iter().map(|e| self.eval(e)).collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(Box::new(ListValue { items: values, literal: true })))
            },
            ExprKind::Unary { op, expr: inner } => {
                let v = self.eval(inner)?;
                Value::unary(*op, &v).map_err(|e| Error::type_operation(expr.span, e))
            },
            ExprKind::Binary { op, lhs, rhs } => {
                let l = self.eval(lhs)?;
                let r = self.eval(rhs)?;
                Value::binary(*op, &l, &r).map_err(|e| Error::type_operation(expr.span, e))
            },
            ExprKind::Dot { owner, name } => self.eval_dot(owner, name, expr.span),
            ExprKind::Index { owner, index } => self.eval_index(owner, index, expr.span),
            ExprKind::Call { name, args } => {
                let values = args.iter().map(|a| self.eval(a)).collect::<Result<Vec<_>, _>>()?;
                self.call_function(name, values, expr.span)
            }
        }
    }

    /// `owner.name` read access (E.7): dispatches on the runtime type of
    /// `owner`, not its syntactic shape.
    fn eval_dot(&mut self, owner: &Expr, name: &str, span: gfxscript_lang::Span) -> Result<Value, Error>
    {
        let owner_value = self.eval(owner)?;
        match owner_value {
            Value::Program(p) => self.read_uniform(&p.name, name, span),
            Value::Texture(t) => match name {
                "width" => Ok(Value::Int(t.width as i32)),
                "height" => Ok(Value::Int(t.height as i32)),
                "channels" => Ok(Value::Int(t.channels as i32)),
                other => Err(Error::resolution(span, format!("texture2D has no field '{}'", other)))
            },
            Value::Buffer(b) => {
                let count = b
                    .layout
                    .component_count(name)
                    .ok_or_else(|| Error::resolution(span, format!("buffer has no attribute '{}'", name)))?;
                let floats = b.data.get(name).cloned().unwrap_or_default();
                let items = floats
                    .chunks(count.max(1) as usize)
                    .map(|chunk| match chunk.len() {
                        1 => Ok(Value::Float(chunk[0])),
                        2 => Ok(Value::Vec2(Box::new([Value::Float(chunk[0]), Value::Float(chunk[1])]))),
                        3 => Ok(Value::Vec3(Box::new([Value::Float(chunk[0]), Value::Float(chunk[1]), Value::Float(chunk[2])]))),
                        4 => Ok(Value::Vec4(Box::new([
                            Value::Float(chunk[0]),
                            Value::Float(chunk[1]),
                            Value::Float(chunk[2]),
                            Value::Float(chunk[3])
                        ]))),
                        n => Err(Error::runtime_bound(span, format!("attribute '{}' has an unsupported component count {}", name, n)))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::List(Box::new(ListValue { items, literal: false })))
            },
            other => Err(Error::resolution(span, format!("'.{}' is not defined on a {}", name, other.type_name())))
        }
    }

    /// Reads a uniform back from the host-side cache (§4.H has no GPU
    /// read-back operation), selecting `program` as current if it isn't
    /// already, per E.7.
    fn read_uniform(&mut self, program: &str, uniform: &str, span: gfxscript_lang::Span) -> Result<Value, Error>
    {
        let ty = self.uniform_type(program, uniform, span)?;
        self.select_program(program)?;
        Ok(self.uniform_cache.get(&(program.to_string(), uniform.to_string())).cloned().unwrap_or_else(|| zero_value(ty)))
    }

    pub(crate) fn uniform_type(&self, program: &str, uniform: &str, span: gfxscript_lang::Span) -> Result<TypeName, Error>
    {
        let pair = self
            .ast
            .shaders
            .get(program)
            .ok_or_else(|| Error::resolution(span, format!("no shader pair named '{}'", program)))?;
        [&pair.vertex, &pair.fragment]
            .into_iter()
            .flatten()
            .find_map(|shader| shader.uniforms.iter().find(|u| u.name == uniform).map(|u| u.ty))
            .ok_or_else(|| Error::resolution(span, format!("program '{}' has no uniform named '{}'", program, uniform)))
    }

    /// Calls `use_program` only when the backend's current program actually
    /// changes (spec.md §4.F Assign / Draw: "switch if the current program's
    /// name differs").
    pub(crate) fn select_program(&mut self, name: &str) -> Result<(), Error>
    {
        if self.current_program.as_deref() != Some(name) {
            let handle = self.program_handle(name, gfxscript_lang::Span::default())?;
            self.backend.use_program(handle);
            self.current_program = Some(name.to_string());
        }
        Ok(())
    }

    pub(crate) fn program_handle(&self, name: &str, span: gfxscript_lang::Span) -> Result<crate::backend::ProgramHandle, Error>
    {
        match self.lookup(name).map(|b| &b.value) {
            Some(Value::Program(p)) => Ok(crate::backend::ProgramHandle(p.handle)),
            Some(other) => Err(Error::type_operation(span, format!("'{}' is a {}, not a program", name, other.type_name()))),
            None => Err(Error::resolution(span, format!("no program named '{}'", name)))
        }
    }

    /// `owner[index]` read access (E.8). Out-of-range is a runtime-bound
    /// error; §9 open question (a) fixes `[0, arity-1]` as the only legal
    /// Vec4 range (no `4 -> w` aliasing).
    fn eval_index(&mut self, owner: &Expr, index: &Expr, span: gfxscript_lang::Span) -> Result<Value, Error>
    {
        let owner_value = self.eval(owner)?;
        let index_value = self.eval(index)?;
        let i = match index_value {
            Value::Int(i) if i >= 0 => i as usize,
            Value::Int(i) => return Err(Error::runtime_bound(span, format!("negative index {}", i))),
            other => return Err(Error::type_operation(span, format!("index must be an int, got {}", other.type_name())))
        };
        match &owner_value {
            Value::Vec2(_) | Value::Vec3(_) | Value::Vec4(_) => value::component(&owner_value, i)
                .cloned()
                .ok_or_else(|| Error::runtime_bound(span, format!("index {} out of range for a {}", i, owner_value.type_name()))),
            Value::Mat2(m) => m.rows.get(i).cloned().ok_or_else(|| Error::runtime_bound(span, format!("row {} out of range for mat2", i))),
            Value::Mat3(m) => m.rows.get(i).cloned().ok_or_else(|| Error::runtime_bound(span, format!("row {} out of range for mat3", i))),
            Value::Mat4(m) => m.rows.get(i).cloned().ok_or_else(|| Error::runtime_bound(span, format!("row {} out of range for mat4", i))),
            Value::List(l) => l.items.get(i).cloned().ok_or_else(|| Error::runtime_bound(span, format!("index {} out of range for a list of {}", i, l.items.len()))),
            other => Err(Error::type_operation(span, format!("cannot index a {}", other.type_name())))
        }
    }
}

fn zero_value(ty: TypeName) -> Value
{
    use TypeName::*;
    match ty {
        Int => Value::Int(0),
        Vec2 => Value::Vec2(Box::new([Value::Float(0.0), Value::Float(0.0)])),
        Vec3 => Value::Vec3(Box::new([Value::Float(0.0), Value::Float(0.0), Value::Float(0.0)])),
        Vec4 => Value::Vec4(Box::new([Value::Float(0.0), Value::Float(0.0), Value::Float(0.0), Value::Float(0.0)])),
        Mat2 => Value::Mat2(Box::new(value::Mat2::identity())),
        Mat3 => Value::Mat3(Box::new(value::Mat3::identity())),
        Mat4 => Value::Mat4(Box::new(value::Mat4::identity())),
        _ => Value::Float(0.0)
    }
}
