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

//! Statement execution (spec.md §4.F "Interpreter — statements" and
//! "control-flow return channel").

use std::time::{Duration, Instant};

use gfxscript_lang::{
    ast::{BinOp, Expr, ExprKind, Stmt, StmtKind},
    lexer::token::TypeName,
    Span
};

use super::{Error, Flow, Interpreter};
use crate::{
    backend::{BufferHandle, FramebufferHandle, ProgramHandle, TextureHandle, UniformValue},
    scope::Binding,
    value::{self, Program, Texture, Value}
};

/// spec.md §7 kind 6: "5-second loop watchdog fires. Loop abandoned silently."
const WATCHDOG: Duration = Duration::from_secs(5);

impl Interpreter
{
    pub(crate) fn exec_block(&mut self, stmts: &[Stmt]) -> Result<Flow, Error>
    {
        for stmt in stmts {
            match self.exec_stmt(stmt)? {
                Flow::Next => continue,
                other => return Ok(other)
            }
        }
        Ok(Flow::Next)
    }

    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, Error>
    {
        match &stmt.kind {
            StmtKind::Decl { ty, name, constant, init } => self.exec_decl(*ty, name, *constant, init.as_ref(), stmt.span),
            StmtKind::Assign { lhs, rhs } => {
                let v = self.eval(rhs)?;
                self.assign_value(lhs, v, stmt.span)?;
                Ok(Flow::Next)
            },
            StmtKind::CompoundAssign { op, lhs, rhs } => {
                self.exec_compound_assign(*op, lhs, rhs, stmt.span)?;
                Ok(Flow::Next)
            },
            StmtKind::Alloc { name } => {
                let value = self.fresh_buffer();
                self.declare_local(name.clone(), Binding::new(value, TypeName::Buffer.name(), false));
                Ok(Flow::Next)
            },
            StmtKind::Upload { buffer, attrib, list } => {
                self.exec_upload(buffer, attrib, list, stmt.span)?;
                Ok(Flow::Next)
            },
            StmtKind::Draw { buffer, target, program } => {
                self.exec_draw(buffer, target.as_deref(), program.as_deref(), stmt.span)?;
                Ok(Flow::Next)
            },
            StmtKind::Use { program } => {
                self.select_program(program)?;
                Ok(Flow::Next)
            },
            StmtKind::Clear { color } => {
                let v = self.eval(color)?;
                let rgb = vec_n_f32(&v, 3, stmt.span)?;
                self.backend.clear([rgb[0], rgb[1], rgb[2]]);
                Ok(Flow::Next)
            },
            StmtKind::Viewport { rect } => {
                let v = self.eval(rect)?;
                let r = vec_n_f32(&v, 4, stmt.span)?;
                self.backend.viewport(r[0] as i32, r[1] as i32, r[2] as u32, r[3] as u32);
                Ok(Flow::Next)
            },
            StmtKind::If { cond, then_branch, else_branch } => {
                let c = self.eval(cond)?.truthy().map_err(|e| Error::type_operation(stmt.span, e))?;
                self.push_scope();
                let flow = self.exec_block(if c { then_branch } else { else_branch });
                self.pop_scope();
                flow
            },
            StmtKind::While { cond, body } => self.exec_while(cond, body),
            StmtKind::ForRange { var, from, to, step, body } => self.exec_for_range(var, from, to, step.as_ref(), body, stmt.span),
            StmtKind::ForIn { var, list, body } => self.exec_for_in(var, list, body, stmt.span),
            StmtKind::Return(expr) => {
                let v = match expr {
                    Some(e) => self.eval(e)?,
                    None => Value::Null
                };
                Ok(Flow::Return(v))
            },
            StmtKind::Break => Ok(Flow::Break),
            StmtKind::Print(expr) => {
                let v = self.eval(expr)?;
                self.log(crate::logger::LogLevel::Info, Some(stmt.span), &value::pretty(&v));
                Ok(Flow::Next)
            },
            StmtKind::Expr(expr) => {
                self.eval(expr)?;
                Ok(Flow::Next)
            }
        }
    }

    /// A block nested inside an active function call gets its own lexical
    /// block (spec.md §4.F "each branch attaches a nested Scope"); at global
    /// scope (no call frame active) there is nothing to push, so declarations
    /// made inside fall through to the global [`Scope`] unscoped.
    fn push_scope(&mut self)
    {
        if let Some(frame) = self.call_stack.last_mut() {
            frame.push_block();
        }
    }

    fn pop_scope(&mut self)
    {
        if let Some(frame) = self.call_stack.last_mut() {
            frame.pop_block();
        }
    }

    fn exec_decl(&mut self, ty: TypeName, name: &str, constant: bool, init: Option<&Expr>, span: Span) -> Result<Flow, Error>
    {
        let value = match (ty, init) {
            (TypeName::Buffer, _) => self.fresh_buffer(),
            (TypeName::Texture2D, None) => Value::Texture(Box::new(Texture::dangling())),
            (ty, Some(init)) => {
                let v = self.eval(init)?;
                self.coerce(ty, v, span)?
            },
            (ty, None) => return Err(Error::resolution(span, format!("'{}' needs an initializer", ty)))
        };
        self.declare_local(name.to_string(), Binding::new(value, ty.name(), constant));
        Ok(Flow::Next)
    }

    fn fresh_buffer(&mut self) -> Value
    {
        let vbo = self.backend.create_buffer().0;
        let ebo = self.backend.create_index_buffer().0;
        Value::Buffer(Box::new(value::Buffer { vbo, ebo, ..Default::default() }))
    }

    fn exec_while(&mut self, cond: &Expr, body: &[Stmt]) -> Result<Flow, Error>
    {
        let start = Instant::now();
        loop {
            if start.elapsed() > WATCHDOG {
                return Ok(Flow::Next);
            }
            if !self.eval(cond)?.truthy().map_err(|e| Error::type_operation(cond.span, e))? {
                return Ok(Flow::Next);
            }
            self.push_scope();
            let flow = self.exec_block(body);
            self.pop_scope();
            match flow? {
                Flow::Next => {},
                Flow::Break => return Ok(Flow::Next),
                ret @ Flow::Return(_) => return Ok(ret)
            }
        }
    }

    fn exec_for_range(&mut self, var: &str, from: &Expr, to: &Expr, step: Option<&Expr>, body: &[Stmt], span: Span) -> Result<Flow, Error>
    {
        let from_v = as_int(self.eval(from)?, span)?;
        let to_v = as_int(self.eval(to)?, span)?;
        let step_v = match step {
            Some(e) => as_int(self.eval(e)?, span)?,
            None => 1
        };
        if step_v == 0 {
            return Err(Error::runtime_bound(span, "'for' step cannot be 0"));
        }
        let start = Instant::now();
        let mut i = from_v;
        loop {
            if start.elapsed() > WATCHDOG {
                return Ok(Flow::Next);
            }
            let keep_going = if step_v > 0 { i < to_v } else { i > to_v };
            if !keep_going {
                return Ok(Flow::Next);
            }
            self.push_scope();
            self.declare_local(var.to_string(), Binding::new(Value::Int(i), TypeName::Int.name(), false));
            let flow = self.exec_block(body);
            self.pop_scope();
            match flow? {
                Flow::Next => {},
                Flow::Break => return Ok(Flow::Next),
                ret @ Flow::Return(_) => return Ok(ret)
            }
            i += step_v;
        }
    }

    fn exec_for_in(&mut self, var: &str, list: &Expr, body: &[Stmt], span: Span) -> Result<Flow, Error>
    {
        let items = match self.eval(list)? {
            Value::List(l) => l.items,
            other => return Err(Error::type_operation(span, format!("'for .. in' requires a list, got {}", other.type_name())))
        };
        let start = Instant::now();
        for item in items {
            if start.elapsed() > WATCHDOG {
                return Ok(Flow::Next);
            }
            self.push_scope();
            self.declare_local(var.to_string(), Binding::new(item, "var", false));
            let flow = self.exec_block(body);
            self.pop_scope();
            match flow? {
                Flow::Next => {},
                Flow::Break => return Ok(Flow::Next),
                ret @ Flow::Return(_) => return Ok(ret)
            }
        }
        Ok(Flow::Next)
    }

    fn exec_upload(&mut self, buffer: &str, attrib: &str, list: &[Expr], span: Span) -> Result<(), Error>
    {
        if attrib == "indices" {
            let mut indices = Vec::with_capacity(list.len());
            for e in list {
                match self.eval(e)? {
                    Value::Int(i) if i >= 0 => indices.push(i as u32),
                    Value::Int(i) => return Err(Error::runtime_bound(e.span, format!("index {} cannot be negative", i))),
                    other => return Err(Error::type_operation(e.span, format!("'indices' elements must be int, got {}", other.type_name())))
                }
            }
            let binding = self.lookup_mut(buffer).ok_or_else(|| Error::resolution(span, format!("'{}' is not declared", buffer)))?;
            match &mut binding.value {
                Value::Buffer(b) => b.indices = indices,
                other => return Err(Error::type_operation(span, format!("'{}' is a {}, not a buffer", buffer, other.type_name())))
            }
            return Ok(());
        }

        let mut flat = Vec::new();
        let mut count = None;
        for e in list {
            let v = self.eval(e)?;
            let comps = value_to_floats(&v).map_err(|err| Error::type_operation(e.span, err))?;
            let c = comps.len() as u32;
            match count {
                None => count = Some(c),
                Some(prev) if prev != c => {
                    return Err(Error::runtime_bound(e.span, format!("inconsistent component count in upload list ({} vs {})", prev, c)));
                },
                _ => {}
            }
            flat.extend(comps);
        }
        let count = count.unwrap_or(0);

        let binding = self.lookup_mut(buffer).ok_or_else(|| Error::resolution(span, format!("'{}' is not declared", buffer)))?;
        let buf = match &mut binding.value {
            Value::Buffer(b) => b,
            other => return Err(Error::type_operation(span, format!("'{}' is a {}, not a buffer", buffer, other.type_name())))
        };
        if let Some(existing) = buf.layout.component_count(attrib) {
            if existing != count {
                return Err(Error::runtime_bound(
                    span,
                    format!("attribute '{}' was uploaded with {} components before, now {}", attrib, existing, count)
                ));
            }
        } else {
            buf.layout.set_component_count(attrib, count);
        }
        buf.data.insert(attrib.to_string(), flat);
        buf.sizes.insert(attrib.to_string(), count);
        Ok(())
    }

    fn exec_draw(&mut self, buffer: &str, target: Option<&str>, program: Option<&str>, span: Span) -> Result<(), Error>
    {
        let prog_name = program
            .map(str::to_string)
            .or_else(|| self.current_program.clone())
            .ok_or_else(|| Error::resource(Some(span), "'draw' has no program selected"))?;
        self.select_program(&prog_name)?;
        let prog_handle = self.program_handle(&prog_name, span)?;

        match target {
            Some(tex_name) => {
                let fb = self.ensure_target_framebuffer(tex_name, span)?;
                self.backend.bind_framebuffer(Some(fb));
            },
            None => self.backend.bind_framebuffer(None)
        }

        let (attrs, data, indices, vbo, ebo) = {
            let binding = self.lookup(buffer).ok_or_else(|| Error::resolution(span, format!("'{}' is not declared", buffer)))?;
            match &binding.value {
                Value::Buffer(b) => (b.layout.attrs.clone(), b.data.clone(), b.indices.clone(), b.vbo, b.ebo),
                other => return Err(Error::type_operation(span, format!("'{}' is a {}, not a buffer", buffer, other.type_name())))
            }
        };

        let vertex_count = attrs
            .first()
            .and_then(|(name, count)| data.get(name).map(|d| d.len() / (*count).max(1) as usize))
            .unwrap_or(0);
        let stride: u32 = attrs.iter().map(|(_, c)| c * 4).sum();

        let mut interleaved = Vec::with_capacity(vertex_count * (stride / 4).max(1) as usize);
        for v in 0..vertex_count {
            for (name, count) in &attrs {
                let empty = Vec::new();
                let values = data.get(name).unwrap_or(&empty);
                let start = v * (*count as usize);
                for c in 0..*count as usize {
                    interleaved.push(values.get(start + c).copied().unwrap_or(0.0));
                }
            }
        }

        self.backend.bind_array(BufferHandle(vbo));
        self.backend.upload_array(&interleaved);

        let mut offset = 0u32;
        for (name, count) in &attrs {
            if let Some(loc) = self.backend.attrib_location(prog_handle, name) {
                self.backend.set_attrib_pointer(loc, *count, stride, offset);
                self.backend.enable_attrib(loc);
            }
            offset += count * 4;
        }

        if !indices.is_empty() {
            self.backend.bind_elements(BufferHandle(ebo));
            self.backend.upload_elements(&indices);
            self.backend.draw_elements(indices.len() as u32);
        } else {
            self.backend.draw_arrays(vertex_count as u32);
        }
        Ok(())
    }

    /// Lazily creates a colour-attached framebuffer sized `WIDTH x WIDTH` the
    /// first time a texture is used as a `draw ... to` target (spec.md §4.F
    /// Draw step 2 — the square-target wording is literal, not `WIDTH x HEIGHT`).
    fn ensure_target_framebuffer(&mut self, tex_name: &str, span: Span) -> Result<FramebufferHandle, Error>
    {
        let existing = match self.lookup(tex_name) {
            Some(b) => match &b.value {
                Value::Texture(t) => t.framebuffer,
                other => return Err(Error::type_operation(span, format!("'{}' is a {}, not a texture2D", tex_name, other.type_name())))
            },
            None => return Err(Error::resolution(span, format!("'{}' is not declared", tex_name)))
        };
        if let Some(fb) = existing {
            return Ok(FramebufferHandle(fb));
        }
        let size = self.width;
        let color = self.backend.create_texture(size, size, &vec![0u8; (size as usize) * (size as usize) * 4]);
        let fb = self.backend.create_framebuffer();
        self.backend.attach_color(fb, color);
        let binding = self.lookup_mut(tex_name).expect("existence already checked above");
        if let Value::Texture(t) = &mut binding.value {
            t.framebuffer = Some(fb.0);
            t.handle = color.0;
            t.width = size;
            t.height = size;
        }
        Ok(fb)
    }

    fn exec_compound_assign(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr, span: Span) -> Result<(), Error>
    {
        let current = self.eval(lhs)?;
        if op == BinOp::Add {
            if let Value::List(_) = &current {
                return self.append_to_list(lhs, rhs, span);
            }
        }
        let rhs_val = self.eval(rhs)?;
        let combined = Value::binary(op, &current, &rhs_val).map_err(|e| Error::type_operation(span, e))?;
        self.assign_value(lhs, combined, span)
    }

    /// `List += x` / `List += {a, b, c}` (spec.md §4.F CompoundBinary): append
    /// a single value, or every element of a brace-list, in one statement.
    fn append_to_list(&mut self, lhs: &Expr, rhs: &Expr, span: Span) -> Result<(), Error>
    {
        let name = match &lhs.kind {
            ExprKind::Ident(n) => n.clone(),
            _ => return Err(Error::type_operation(span, "only a variable can be extended with '+='"))
        };
        let additions: Vec<Value> = match &rhs.kind {
            ExprKind::Brace(items) => items.iter().map(|e| self.eval(e)).collect::<Result<_, _>>()?,
            _ => vec![self.eval(rhs)?]
        };
        let binding = self.lookup_mut(&name).ok_or_else(|| Error::resolution(span, format!("'{}' is not declared", name)))?;
        if binding.is_const {
            return Err(Error::resolution(span, format!("cannot assign into constant '{}'", name)));
        }
        match &mut binding.value {
            Value::List(l) => {
                l.items.extend(additions);
                Ok(())
            },
            other => Err(Error::type_operation(span, format!("'{}' is a {}, not a list", name, other.type_name())))
        }
    }

    fn assign_value(&mut self, lhs: &Expr, value: Value, span: Span) -> Result<(), Error>
    {
        match &lhs.kind {
            ExprKind::Ident(name) => self.assign_ident(name, value, span),
            ExprKind::Dot { owner, name } => self.assign_dot(owner, name, value, span),
            ExprKind::Index { .. } => self.assign_index(lhs, value, span),
            _ => Err(Error::type_operation(span, "invalid assignment target"))
        }
    }

    fn assign_ident(&mut self, name: &str, value: Value, span: Span) -> Result<(), Error>
    {
        let (declared_type, is_const) = {
            let binding = self.lookup(name).ok_or_else(|| Error::resolution(span, format!("'{}' is not declared", name)))?;
            (binding.declared_type.clone(), binding.is_const)
        };
        if is_const {
            return Err(Error::resolution(span, format!("cannot assign to constant '{}'", name)));
        }
        let declared = TypeName::from_str(&declared_type).unwrap_or(TypeName::Var);
        let coerced = self.coerce(declared, value, span)?;
        self.lookup_mut(name).expect("presence confirmed above").value = coerced;
        Ok(())
    }

    fn assign_dot(&mut self, owner: &Expr, name: &str, value: Value, span: Span) -> Result<(), Error>
    {
        match self.eval(owner)? {
            Value::Program(p) => self.assign_uniform(&p, name, value, span),
            other => Err(Error::type_operation(span, format!("cannot assign to '.{}' on a {}", name, other.type_name())))
        }
    }

    /// Uploads `value` to the uniform `name` on `program` (spec.md §4.F Assign).
    /// Texture uniforms bind to the slot fixed by the uniform's declaration
    /// order in the fragment shader (scenario S6); everything else goes
    /// through the matching `set_uniform_*` shape.
    fn assign_uniform(&mut self, program: &Program, name: &str, value: Value, span: Span) -> Result<(), Error>
    {
        let ty = self.uniform_type(&program.name, name, span)?;
        self.select_program(&program.name)?;
        let handle = ProgramHandle(program.handle);
        match (ty, value) {
            (TypeName::Texture2D, Value::Str(path)) => {
                let texture = self.load_texture(&path, span)?;
                self.bind_texture_uniform(program, handle, name, &texture, span)?;
                self.uniform_cache.insert((program.name.clone(), name.to_string()), Value::Texture(Box::new(texture)));
            },
            (TypeName::Texture2D, Value::Texture(t)) => {
                self.bind_texture_uniform(program, handle, name, &t, span)?;
                self.uniform_cache.insert((program.name.clone(), name.to_string()), Value::Texture(t));
            },
            (ty, v) => {
                let uniform_value = to_uniform_value(ty, &v, span)?;
                let loc = self
                    .backend
                    .uniform_location(handle, name)
                    .ok_or_else(|| Error::resource(Some(span), format!("no uniform location for '{}'", name)))?;
                self.backend.set_uniform(loc, uniform_value);
                self.uniform_cache.insert((program.name.clone(), name.to_string()), v);
            }
        }
        Ok(())
    }

    fn bind_texture_uniform(&mut self, program: &Program, handle: ProgramHandle, name: &str, texture: &Texture, span: Span) -> Result<(), Error>
    {
        let slot = program
            .texture_slots
            .iter()
            .position(|s| s == name)
            .ok_or_else(|| Error::resolution(span, format!("'{}' is not a texture2D uniform on '{}'", name, program.name)))? as u32;
        self.backend.active_texture(slot);
        self.backend.bind_texture(slot, TextureHandle(texture.handle));
        let loc = self
            .backend
            .uniform_location(handle, name)
            .ok_or_else(|| Error::resource(Some(span), format!("no uniform location for '{}'", name)))?;
        self.backend.set_uniform(loc, UniformValue::Int(slot as i32));
        Ok(())
    }

    fn assign_index(&mut self, lhs: &Expr, value: Value, span: Span) -> Result<(), Error>
    {
        let (root, path) = self.collect_index_path(lhs)?;
        let binding = self.lookup_mut(&root).ok_or_else(|| Error::resolution(span, format!("'{}' is not declared", root)))?;
        if binding.is_const {
            return Err(Error::resolution(span, format!("cannot assign into constant '{}'", root)));
        }
        set_path(&mut binding.value, &path, value, span)
    }

    /// Walks an `Index { Index { ... Ident(root) } }` chain outer-to-inner,
    /// returning the root variable name and the indices from outermost to
    /// innermost assignment target.
    fn collect_index_path(&mut self, expr: &Expr) -> Result<(String, Vec<usize>), Error>
    {
        match &expr.kind {
            ExprKind::Index { owner, index } => {
                let i = as_usize(self.eval(index)?, index.span)?;
                match &owner.kind {
                    ExprKind::Ident(name) => Ok((name.clone(), vec![i])),
                    ExprKind::Index { .. } => {
                        let (root, mut path) = self.collect_index_path(owner)?;
                        path.push(i);
                        Ok((root, path))
                    },
                    _ => Err(Error::type_operation(expr.span, "only a variable (optionally nested-indexed) can be assigned into"))
                }
            },
            _ => Err(Error::type_operation(expr.span, "not an index expression"))
        }
    }
}

fn as_int(v: Value, span: Span) -> Result<i32, Error>
{
    match v {
        Value::Int(i) => Ok(i),
        other => Err(Error::type_operation(span, format!("expected an int, got {}", other.type_name())))
    }
}

fn as_usize(v: Value, span: Span) -> Result<usize, Error>
{
    match v {
        Value::Int(i) if i >= 0 => Ok(i as usize),
        Value::Int(i) => Err(Error::runtime_bound(span, format!("negative index {}", i))),
        other => Err(Error::type_operation(span, format!("index must be an int, got {}", other.type_name())))
    }
}

fn vec_n_f32(v: &Value, n: usize, span: Span) -> Result<Vec<f32>, Error>
{
    let floats = value_to_floats(v).map_err(|e| Error::type_operation(span, e))?;
    if floats.len() != n {
        return Err(Error::type_operation(span, format!("expected {} components, got {}", n, floats.len())));
    }
    Ok(floats)
}

/// Flattens any upload-eligible value (spec.md §4.F Upload: "Float | Vec2 |
/// Vec3 | Vec4 | List<...>") into its raw floats, recursing through nested lists.
fn value_to_floats(v: &Value) -> Result<Vec<f32>, String>
{
    match v {
        Value::Int(i) => Ok(vec![*i as f32]),
        Value::Float(f) => Ok(vec![*f]),
        Value::Vec2(c) => c.iter().map(Value::as_f32).collect(),
        Value::Vec3(c) => c.iter().map(Value::as_f32).collect(),
        Value::Vec4(c) => c.iter().map(Value::as_f32).collect(),
        Value::List(l) => l.items.iter().map(value_to_floats).collect::<Result<Vec<_>, _>>().map(|nested| nested.concat()),
        other => Err(format!("cannot flatten a {} into upload data", other.type_name()))
    }
}

fn to_uniform_value(ty: TypeName, v: &Value, span: Span) -> Result<UniformValue, Error>
{
    use TypeName::*;
    let mismatch = || Error::type_operation(span, format!("cannot upload a {} as a '{}' uniform", v.type_name(), ty));
    match ty {
        Float => Ok(UniformValue::Float(v.as_f32().map_err(|_| mismatch())?)),
        Int => match v {
            Value::Int(i) => Ok(UniformValue::Int(*i)),
            _ => Err(mismatch())
        },
        Vec2 => {
            let c = vec_n(v, 2).map_err(|_| mismatch())?;
            Ok(UniformValue::Vec2([c[0], c[1]]))
        },
        Vec3 => {
            let c = vec_n(v, 3).map_err(|_| mismatch())?;
            Ok(UniformValue::Vec3([c[0], c[1], c[2]]))
        },
        Vec4 => {
            let c = vec_n(v, 4).map_err(|_| mismatch())?;
            Ok(UniformValue::Vec4([c[0], c[1], c[2], c[3]]))
        },
        Mat2 => {
            let f = mat_floats(v, 2).map_err(|_| mismatch())?;
            Ok(UniformValue::Mat2([f[0], f[1], f[2], f[3]]))
        },
        Mat3 => {
            let f = mat_floats(v, 3).map_err(|_| mismatch())?;
            let mut a = [0f32; 9];
            a.copy_from_slice(&f);
            Ok(UniformValue::Mat3(a))
        },
        Mat4 => {
            let f = mat_floats(v, 4).map_err(|_| mismatch())?;
            let mut a = [0f32; 16];
            a.copy_from_slice(&f);
            Ok(UniformValue::Mat4(a))
        },
        _ => Err(mismatch())
    }
}

fn vec_n(v: &Value, n: usize) -> Result<Vec<f32>, String>
{
    let f = value_to_floats(v)?;
    if f.len() != n {
        return Err(format!("expected {} components, got {}", n, f.len()));
    }
    Ok(f)
}

fn mat_floats(v: &Value, n: usize) -> Result<Vec<f32>, String>
{
    let rows: &[Value] = match v {
        Value::Mat2(m) if n == 2 => &m.rows[..],
        Value::Mat3(m) if n == 3 => &m.rows[..],
        Value::Mat4(m) if n == 4 => &m.rows[..],
        other => return Err(format!("expected a {}x{} matrix, got {}", n, n, other.type_name()))
    };
    let mut out = Vec::with_capacity(n * n);
    for row in rows {
        out.extend(value_to_floats(row)?);
    }
    Ok(out)
}

/// Writes `value` at `path` inside `root`, regenerating matrix column caches
/// through `Mat*::set_row` rather than mutating `rows`/`cols` directly
/// (spec.md invariant: "Matrix column caches are regenerated whenever any row
/// is replaced").
fn set_path(root: &mut Value, path: &[usize], value: Value, span: Span) -> Result<(), Error>
{
    let Some((&i, rest)) = path.split_first() else {
        *root = value;
        return Ok(());
    };
    match root {
        Value::Mat2(m) => {
            if rest.is_empty() {
                m.set_row(i, value).map_err(|e| Error::runtime_bound(span, e))
            } else {
                let mut row = m.rows.get(i).cloned().ok_or_else(|| Error::runtime_bound(span, format!("row {} out of range for mat2", i)))?;
                set_path(&mut row, rest, value, span)?;
                m.set_row(i, row).map_err(|e| Error::runtime_bound(span, e))
            }
        },
        Value::Mat3(m) => {
            if rest.is_empty() {
                m.set_row(i, value).map_err(|e| Error::runtime_bound(span, e))
            } else {
                let mut row = m.rows.get(i).cloned().ok_or_else(|| Error::runtime_bound(span, format!("row {} out of range for mat3", i)))?;
                set_path(&mut row, rest, value, span)?;
                m.set_row(i, row).map_err(|e| Error::runtime_bound(span, e))
            }
        },
        Value::Mat4(m) => {
            if rest.is_empty() {
                m.set_row(i, value).map_err(|e| Error::runtime_bound(span, e))
            } else {
                let mut row = m.rows.get(i).cloned().ok_or_else(|| Error::runtime_bound(span, format!("row {} out of range for mat4", i)))?;
                set_path(&mut row, rest, value, span)?;
                m.set_row(i, row).map_err(|e| Error::runtime_bound(span, e))
            }
        },
        Value::Vec2(_) | Value::Vec3(_) | Value::Vec4(_) => {
            if !rest.is_empty() {
                return Err(Error::type_operation(span, "cannot index further into a vector component"));
            }
            let slot = value::component_mut(root, i).ok_or_else(|| Error::runtime_bound(span, format!("index {} out of range", i)))?;
            *slot = value;
            Ok(())
        },
        Value::List(l) => {
            if rest.is_empty() {
                let slot = l.items.get_mut(i).ok_or_else(|| Error::runtime_bound(span, format!("index {} out of range for a list of {}", i, l.items.len())))?;
                *slot = value;
                Ok(())
            } else {
                let mut inner = l.items.get(i).cloned().ok_or_else(|| Error::runtime_bound(span, format!("index {} out of range", i)))?;
                set_path(&mut inner, rest, value, span)?;
                l.items[i] = inner;
                Ok(())
            }
        },
        other => Err(Error::type_operation(span, format!("cannot index-assign into a {}", other.type_name())))
    }
}
