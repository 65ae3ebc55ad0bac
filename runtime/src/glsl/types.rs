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

//! GLSL-side type resolution (spec.md §4.G step 6). `original_source`'s
//! `resolve_ident`/`resolve_binary`/`resolve_vector` return bare `string`
//! type names (`"vec3"`, `""` for unknown); we keep the same resolution
//! order (`localtypes` -> uniforms -> inputs) but as a closed enum so an
//! unresolvable case is a compile-time match failure instead of an empty
//! string silently propagating.

use gfxscript_lang::lexer::token::TypeName;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlslType
{
    Void,
    Bool,
    Int,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
    Sampler2D
}

impl GlslType
{
    pub fn glsl_name(&self) -> &'static str
    {
        match self {
            GlslType::Void => "void",
            GlslType::Bool => "bool",
            GlslType::Int => "int",
            GlslType::Float => "float",
            GlslType::Vec2 => "vec2",
            GlslType::Vec3 => "vec3",
            GlslType::Vec4 => "vec4",
            GlslType::Mat2 => "mat2",
            GlslType::Mat3 => "mat3",
            GlslType::Mat4 => "mat4",
            GlslType::Sampler2D => "sampler2D"
        }
    }

    /// Declared-type keyword -> GLSL type, rewriting `texture2D` to
    /// `sampler2D` (spec.md §4.G step 2). `var`/`buffer`/`program`/`list`
    /// have no GLSL representation.
    pub fn from_type_name(ty: TypeName) -> Option<Self>
    {
        Some(match ty {
            TypeName::Bool => GlslType::Bool,
            TypeName::Int => GlslType::Int,
            TypeName::Float => GlslType::Float,
            TypeName::Vec2 => GlslType::Vec2,
            TypeName::Vec3 => GlslType::Vec3,
            TypeName::Vec4 => GlslType::Vec4,
            TypeName::Mat2 => GlslType::Mat2,
            TypeName::Mat3 => GlslType::Mat3,
            TypeName::Mat4 => GlslType::Mat4,
            TypeName::Texture2D => GlslType::Sampler2D,
            TypeName::Var | TypeName::String | TypeName::Buffer | TypeName::Program | TypeName::List => return None
        })
    }

    /// Component count for the vector/scalar types `resolve_vector` sums
    /// over; 0 for anything that can't appear inside a vector literal.
    pub fn component_count(&self) -> usize
    {
        match self {
            GlslType::Int | GlslType::Float | GlslType::Bool => 1,
            GlslType::Vec2 => 2,
            GlslType::Vec3 => 3,
            GlslType::Vec4 => 4,
            GlslType::Mat2 | GlslType::Mat3 | GlslType::Mat4 | GlslType::Sampler2D | GlslType::Void => 0
        }
    }

    /// The vector type of arity `n`, as produced by summing bracket-literal
    /// component counts (E.9 / `resolve_vector`); `1` degrades to `Float`
    /// since GLSL has no `vec1`.
    pub fn vec_of_arity(n: usize) -> Option<Self>
    {
        match n {
            1 => Some(GlslType::Float),
            2 => Some(GlslType::Vec2),
            3 => Some(GlslType::Vec3),
            4 => Some(GlslType::Vec4),
            _ => None
        }
    }

    pub fn is_vector(&self) -> bool
    {
        matches!(self, GlslType::Vec2 | GlslType::Vec3 | GlslType::Vec4)
    }

    /// Swizzle-style `.xyz`/`.rgba` member access arity, used to approximate
    /// the type of a `Dot` expression inside a shader body (the original
    /// transpiler only ever handles `owner.name` by string concatenation,
    /// never resolving its type — we still need *some* type for return-type
    /// inference, so fall back to the swizzle's length when the name looks
    /// like one).
    pub fn swizzle_arity(name: &str) -> Option<usize>
    {
        const XYZW: &str = "xyzw";
        const RGBA: &str = "rgba";
        if !name.is_empty()
            && name.len() <= 4
            && (name.chars().all(|c| XYZW.contains(c)) || name.chars().all(|c| RGBA.contains(c)))
        {
            Some(name.len())
        } else {
            None
        }
    }
}
