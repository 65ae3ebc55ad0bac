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

use crate::span::Span;

/// Binary operators. `Exp` is the dedicated dot-product operator (`^`,
/// `OP_EXP` in the original interpreter); `Mul`/`Mod` stay componentwise-
/// multiply and cross-product respectively (spec.md §9 open question (b)).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp
{
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp
{
    Neg,
    Not,
    Abs
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind
{
    Null,
    Bool(bool),
    Int(i32),
    Float(f32),
    Str(String),
    Ident(String),
    /// `[a, b, c, ...]` — a vector, matrix, or flattened-vector constructor
    /// depending on what its evaluated components turn out to be (E.9).
    Bracket(Vec<Expr>),
    /// `{a, b, c, ...}` — an upload list / argument list; contents may stay
    /// unevaluated AST expressions until consumed by `upload` (List's
    /// `literal` flag in the data model).
    Brace(Vec<Expr>),
    Unary
    {
        op: UnOp,
        expr: Box<Expr>
    },
    Binary
    {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>
    },
    /// `owner.name` — uniform readback, texture dimension query, or buffer
    /// attribute readback depending on the runtime type of `owner` (E.7).
    Dot
    {
        owner: Box<Expr>,
        name: String
    },
    /// `owner[index]`
    Index
    {
        owner: Box<Expr>,
        index: Box<Expr>
    },
    /// `name(args...)` — user function call or one of the builtin intrinsics
    /// (`sin`, `cos`, `tan`, `pi`, `type`).
    Call
    {
        name: String,
        args: Vec<Expr>
    }
}

/// One expression node. `parenthesized` survives parsing only to let the
/// GLSL transpiler preserve the author's explicit grouping (spec.md §3:
/// "a `parenthesized` flag on expressions (transpiler uses it to preserve
/// associativity in emitted GLSL)"); the interpreter ignores it entirely.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr
{
    pub kind: ExprKind,
    pub span: Span,
    pub parenthesized: bool
}

impl Expr
{
    pub fn new(kind: ExprKind, span: Span) -> Self
    {
        Self { kind, span, parenthesized: false }
    }

    pub fn parenthesize(mut self) -> Self
    {
        self.parenthesized = true;
        self
    }
}
