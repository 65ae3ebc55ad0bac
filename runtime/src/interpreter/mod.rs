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

//! The tree-walking interpreter (spec.md §4.F). Owns the global [`Scope`],
//! the per-call [`ScopeList`] stack, the parsed [`gfxscript_lang::ast::Program`]
//! tables, and the host capabilities (`GpuBackend`, `Logger`, `ImageLoader`)
//! the evaluator and statement executor drive.

pub mod error;
mod eval;
mod exec;
pub mod intrinsics;

use std::collections::HashMap;

use gfxscript_lang::{ast::Program as AstProgram, lexer::token::TypeName, Span};

pub use error::{Error, Kind};

use crate::{
    backend::GpuBackend,
    image::ImageLoader,
    logger::{self, LogLevel, Logger},
    scope::{Binding, Scope, ScopeList},
    value::Value
};

/// What a statement (or statement list) did, propagated up through nested
/// blocks until something consumes it (spec.md §4.F "control-flow return
/// channel"): `Return` stops the enclosing function call, `Break` stops the
/// nearest enclosing `while`/`for`, `Next` means "kept going".
#[derive(Debug)]
pub enum Flow
{
    Next,
    Return(Value),
    Break
}

/// The three process-global constants seeded at the start of every
/// `execute_init` (spec.md §3 invariant, confirmed by
/// `original_source/interpreter.cpp`): `PI`, `WIDTH`, `HEIGHT`, all `const`.
pub struct Interpreter
{
    backend: Box<dyn GpuBackend>,
    logger: Box<dyn Logger>,
    images: Box<dyn ImageLoader>,
    width: u32,
    height: u32,
    pub(crate) global: Scope,
    pub(crate) ast: AstProgram,
    call_stack: Vec<ScopeList>,
    current_program: Option<String>,
    /// Host-side cache of the last value written to `(program, uniform)`, used
    /// to answer the readback half of E.7 `Dot` access since the `GpuBackend`
    /// contract of spec.md §4.H has no "get uniform" operation.
    uniform_cache: HashMap<(String, String), Value>
}

impl Interpreter
{
    pub fn new(width: u32, height: u32, backend: Box<dyn GpuBackend>, logger: Box<dyn Logger>, images: Box<dyn ImageLoader>) -> Self
    {
        Self {
            backend,
            logger,
            images,
            width,
            height,
            global: Scope::new(),
            ast: AstProgram::default(),
            call_stack: Vec::new(),
            current_program: None,
            uniform_cache: HashMap::new()
        }
    }

    pub fn backend_mut(&mut self) -> &mut dyn GpuBackend
    {
        &mut *self.backend
    }

    /// Drops every GPU resource re-acquired from the last parse (invariant 7:
    /// "the interpreter never holds a GPU resource across a `reset()`").
    /// Clears globals, the AST tables, and the current-program pointer; a
    /// fresh `load_program` + `compile_program` + `execute_init` must follow.
    pub fn reset(&mut self)
    {
        self.ast.clear();
        self.global = Scope::new();
        self.call_stack.clear();
        self.current_program = None;
        self.uniform_cache.clear();
    }

    pub fn load_program(&mut self, ast: AstProgram)
    {
        self.ast = ast;
    }

    pub fn log(&self, level: LogLevel, span: Option<Span>, message: &str)
    {
        logger::emit(&*self.logger, level, span, message);
    }

    fn report(&self, err: &Error)
    {
        self.log(LogLevel::Error, err.span, &err.message);
    }

    /// Links every complete vertex/fragment pair in `ast.shaders` into a GPU
    /// program bound to that name in the global scope (spec.md invariant 6).
    /// A pair missing one half, or one whose compile/link fails, only stops
    /// *that* program: "other programs may still be created" (spec §7 kind 4).
    pub fn compile_program(&mut self)
    {
        let names: Vec<String> = self.ast.shaders.keys().cloned().collect();
        for name in names {
            if let Err(e) = self.compile_one_program(&name) {
                self.report(&e);
            }
        }
    }

    fn compile_one_program(&mut self, name: &str) -> Result<(), Error>
    {
        let pair = self.ast.shaders.get(name).expect("name drawn from ast.shaders.keys()").clone();
        let (vertex, fragment) = match (pair.vertex, pair.fragment) {
            (Some(v), Some(f)) => (v, f),
            _ => return Err(Error::resource(None, format!("program '{}' is missing its vertex or fragment half", name)))
        };
        let vs_src = crate::glsl::transpile(&vertex, &self.ast.layouts, crate::glsl::ShaderKind::Vertex)
            .map_err(|e| Error::resource(e.span, format!("vertex shader '{}': {}", name, e)))?;
        let fs_src = crate::glsl::transpile(&fragment, &self.ast.layouts, crate::glsl::ShaderKind::Fragment)
            .map_err(|e| Error::resource(e.span, format!("fragment shader '{}': {}", name, e)))?;
        let handle = self.backend.create_program();
        let compile_log = self.backend.compile_shader(handle, &vs_src, &fs_src);
        if !compile_log.success {
            return Err(Error::resource(None, format!("program '{}' failed to compile: {}", name, compile_log.message)));
        }
        let link_log = self.backend.link_program(handle);
        if !link_log.success {
            return Err(Error::resource(None, format!("program '{}' failed to link: {}", name, link_log.message)));
        }
        let program = Value::Program(Box::new(crate::value::Program {
            handle: handle.0,
            name: name.to_string(),
            texture_slots: fragment.texture_slots().into_iter().map(str::to_string).collect(),
            current_texture_unit: HashMap::new()
        }));
        self.global.declare(name, Binding::new(program, "program", false));
        Ok(())
    }

    /// Seeds `PI`/`WIDTH`/`HEIGHT`, evaluates top-level globals in source
    /// order, then runs the user `init` body (spec.md §3 Lifecycle).
    pub fn execute_init(&mut self) -> Result<(), Error>
    {
        self.global.declare("PI", Binding::new(Value::Float(intrinsics::PI), "float", true));
        self.global.declare("WIDTH", Binding::new(Value::Int(self.width as i32), "int", true));
        self.global.declare("HEIGHT", Binding::new(Value::Int(self.height as i32), "int", true));
        let globals = self.ast.globals.clone();
        for stmt in &globals {
            self.exec_global_stmt(stmt)?;
        }
        if self.ast.functions.contains_key("init") {
            self.call_function("init", Vec::new(), Span::default())?;
        }
        Ok(())
    }

    pub fn execute_loop(&mut self) -> Result<(), Error>
    {
        if self.ast.functions.contains_key("loop") {
            self.call_function("loop", Vec::new(), Span::default())?;
        }
        Ok(())
    }

    /// Runs a single global `Decl`; any statement kind other than `Decl` at
    /// top level is a parser invariant violation, not something this runs
    /// into in practice since `parse_program` only ever pushes `Decl`s here.
    fn exec_global_stmt(&mut self, stmt: &gfxscript_lang::ast::Stmt) -> Result<(), Error>
    {
        match self.exec_stmt(stmt)? {
            Flow::Next => Ok(()),
            Flow::Return(_) | Flow::Break => Err(Error::resolution(stmt.span, "'return'/'break' are not allowed at global scope"))
        }
    }

    // ---- scope plumbing, shared by eval.rs and exec.rs -----------------------

    fn current_frame(&mut self) -> &mut ScopeList
    {
        self.call_stack.last_mut().expect("a ScopeList is always active while executing statements")
    }

    fn lookup(&self, name: &str) -> Option<&Binding>
    {
        self.call_stack.last().and_then(|f| f.get(name)).or_else(|| self.global.get(name))
    }

    fn lookup_mut(&mut self, name: &str) -> Option<&mut Binding>
    {
        if let Some(frame) = self.call_stack.last_mut() {
            if frame.contains(name) {
                return frame.get_mut(name);
            }
        }
        self.global.get_mut(name)
    }

    fn declare_local(&mut self, name: impl Into<String>, binding: Binding)
    {
        match self.call_stack.last_mut() {
            Some(frame) => frame.declare(name, binding),
            None => self.global.declare(name, binding)
        }
    }

    /// Arity-checks, evaluates arguments left-to-right, binds them by name
    /// with coercion in a fresh `ScopeList`, runs the body, and returns the
    /// call value (`Null` if no `return` was reached) — spec.md §4.F E.11.
    pub(crate) fn call_function(&mut self, name: &str, args: Vec<Value>, span: Span) -> Result<Value, Error>
    {
        if intrinsics::is_intrinsic(name) {
            return intrinsics::call(name, &args, span);
        }
        let def = self
            .ast
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| Error::resolution(span, format!("no function named '{}'", name)))?;
        if def.params.len() != args.len() {
            return Err(Error::runtime_bound(
                span,
                format!("'{}' takes {} argument(s), got {}", name, def.params.len(), args.len())
            ));
        }
        let mut frame = ScopeList::new();
        for (param, arg) in def.params.iter().zip(args.into_iter()) {
            let coerced = self.coerce(param.ty, arg, param.span)?;
            frame.declare(&param.name, Binding::new(coerced, param.ty.name(), false));
        }
        self.call_stack.push(frame);
        let result = self.exec_block(&def.body);
        self.call_stack.pop();
        match result? {
            Flow::Return(v) => Ok(v),
            Flow::Next => Ok(Value::Null),
            Flow::Break => Err(Error::resolution(span, "'break' outside of a loop"))
        }
    }

    /// Assignment coercion table (spec.md §4.F E.12). `declared` is the
    /// left-hand side's declared type; `var` accepts anything unchanged.
    pub(crate) fn coerce(&mut self, declared: TypeName, value: Value, span: Span) -> Result<Value, Error>
    {
        use TypeName::*;
        match (declared, value) {
            (Var, v) => Ok(v),
            (Float, Value::Int(i)) => Ok(Value::Float(i as f32)),
            (Float, v @ Value::Float(_)) => Ok(v),
            (Int, Value::Float(f)) => Ok(Value::Int(f as i32)),
            (Int, v @ Value::Int(_)) => Ok(v),
            (Texture2D, Value::Str(path)) => self.load_texture(&path, span).map(|t| Value::Texture(Box::new(t))),
            (Texture2D, v @ Value::Texture(_)) => Ok(v),
            (ty, v) if ty.name() == v.type_name() => Ok(v),
            (ty, v) => Err(Error::type_operation(span, format!("cannot assign a {} to a '{}' binding", v.type_name(), ty)))
        }
    }

    fn load_texture(&mut self, path: &str, span: Span) -> Result<crate::value::Texture, Error>
    {
        let image = self.images.load(path).map_err(|e| Error::resource(Some(span), format!("loading '{}': {}", path, e)))?;
        let handle = self.backend.create_texture(image.width, image.height, &image.pixels);
        Ok(crate::value::Texture {
            handle: handle.0,
            framebuffer: None,
            width: image.width,
            height: image.height,
            channels: image.channels,
            pixels: image.pixels
        })
    }
}
