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

//! The GLSL 130 transpiler (spec.md §4.G). Lowers one half (vertex or
//! fragment) of a [`gfxscript_lang::ast::ShaderPair`] into GLSL source text.
//! Grounded on `examples/original_source/glsltranspiler.cpp`, restructured
//! from its single monolithic `string` builder into `types` (resolution)
//! and `emit` (code generation) the way `shaderc`'s `targets::sal_to_glsl`
//! separates type resolution from text emission.

mod emit;
mod types;

use std::fmt::{self, Display, Formatter};

use gfxscript_lang::Span;

pub use types::GlslType;

/// Which half of a [`gfxscript_lang::ast::ShaderPair`] is being transpiled.
/// Only used to decide whether `#version 130` is followed directly by
/// `in`/`out` (both halves look identical otherwise — the grammar doesn't
/// distinguish vertex- from fragment-only syntax).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderKind
{
    Vertex,
    Fragment
}

#[derive(Clone, Debug, PartialEq)]
pub struct Error
{
    pub span: Option<Span>,
    pub message: String
}

impl Error
{
    pub fn new(span: Option<Span>, message: impl Into<String>) -> Self
    {
        Self { span, message: message.into() }
    }
}

impl Display for Error
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result
    {
        match self.span {
            Some(span) => write!(f, "{}: {}", span, self.message),
            None => f.write_str(&self.message)
        }
    }
}

impl std::error::Error for Error {}

/// Lowers `shader` (already resolved to one half of a [`ShaderPair`]) into
/// a complete `#version 130` GLSL source string (spec.md §4.G steps 1-7).
pub fn transpile(
    shader: &gfxscript_lang::ast::Shader,
    layouts: &std::collections::HashMap<String, gfxscript_lang::ast::Layout>,
    kind: ShaderKind
) -> Result<String, Error>
{
    emit::transpile(shader, layouts, kind)
}
