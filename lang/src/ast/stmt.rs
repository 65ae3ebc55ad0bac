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

use std::collections::HashMap;

use crate::{
    ast::expr::{BinOp, Expr},
    lexer::token::TypeName,
    span::Span
};

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind
{
    /// `type name [= expr];`
    Decl
    {
        ty: TypeName,
        name: String,
        constant: bool,
        init: Option<Expr>
    },
    Assign
    {
        lhs: Expr,
        rhs: Expr
    },
    /// `lhs op= rhs;` — desugared at execution time except for `List += x`
    /// (append), per spec.md §4.F CompoundBinary.
    CompoundAssign
    {
        op: BinOp,
        lhs: Expr,
        rhs: Expr
    },
    /// `allocate name;` — sugar for `buffer name;`.
    Alloc
    {
        name: String
    },
    /// `upload name.attrib <- list;`
    Upload
    {
        buffer: String,
        attrib: String,
        list: Vec<Expr>
    },
    Draw
    {
        buffer: String,
        target: Option<String>,
        program: Option<String>
    },
    /// `use name;` — selects `name` as the current program without drawing
    /// (original_source/interpreter.cpp's `NODE_USE`, kept as a supplement:
    /// spec.md lists `use` as a keyword but its EBNF sketch omits the rule).
    Use
    {
        program: String
    },
    Clear
    {
        color: Expr
    },
    Viewport
    {
        rect: Expr
    },
    If
    {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>
    },
    While
    {
        cond: Expr,
        body: Vec<Stmt>
    },
    /// `for i = a to b [by s] { ... }` — inclusive-exclusive integer range.
    ForRange
    {
        var: String,
        from: Expr,
        to: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>
    },
    /// `for x in list { ... }`
    ForIn
    {
        var: String,
        list: Expr,
        body: Vec<Stmt>
    },
    Return(Option<Expr>),
    Break,
    Print(Expr),
    /// A bare function-call used as a statement (`funcCallStmt`).
    Expr(Expr)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt
{
    pub kind: StmtKind,
    pub span: Span
}

impl Stmt
{
    pub fn new(kind: StmtKind, span: Span) -> Self
    {
        Self { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param
{
    pub ty: TypeName,
    pub name: String,
    pub span: Span
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncDef
{
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub span: Span
}

/// `uniform T name;` inside a shader body.
#[derive(Clone, Debug, PartialEq)]
pub struct Uniform
{
    pub ty: TypeName,
    pub name: String,
    pub span: Span
}

/// The declared type-position of an `input`/`output` shader decl: either a
/// concrete GLSL-representable type, or the special keyword that asks the
/// transpiler to inline a named [`Layout`] (spec.md §4.G step 1).
#[derive(Clone, Debug, PartialEq)]
pub enum IoKind
{
    Concrete(TypeName),
    InlineLayout
}

#[derive(Clone, Debug, PartialEq)]
pub struct IoDecl
{
    pub kind: IoKind,
    pub name: String,
    pub span: Span
}

/// One half (vertex or fragment) of a [`ShaderPair`].
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Shader
{
    pub uniforms: Vec<Uniform>,
    pub inputs: Vec<IoDecl>,
    pub outputs: Vec<IoDecl>,
    pub functions: HashMap<String, FuncDef>
}

impl Shader
{
    /// Names of this shader's `texture2D` uniforms in declaration order.
    /// The position of a name in this list is its GL texture slot
    /// (spec.md §4.F Assign, scenario S6).
    pub fn texture_slots(&self) -> Vec<&str>
    {
        self.uniforms
            .iter()
            .filter(|u| u.ty == TypeName::Texture2D)
            .map(|u| u.name.as_str())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ShaderPair
{
    pub vertex: Option<Shader>,
    pub fragment: Option<Shader>
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutAttr
{
    pub ty: TypeName,
    pub name: String,
    pub span: Span
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout
{
    pub name: String,
    pub attrs: Vec<LayoutAttr>,
    pub span: Span
}

/// The full parse result: the table set spec.md §3 says parsing populates
/// (`imports, globals, functions, shaders, layouts`).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program
{
    pub imports: Vec<String>,
    pub globals: Vec<Stmt>,
    pub functions: HashMap<String, FuncDef>,
    pub shaders: HashMap<String, ShaderPair>,
    pub layouts: HashMap<String, Layout>
}

impl Program
{
    pub fn clear(&mut self)
    {
        self.imports.clear();
        self.globals.clear();
        self.functions.clear();
        self.shaders.clear();
        self.layouts.clear();
    }

    /// Merge another parsed module (the result of resolving one `import`)
    /// into this one. Matches the original interpreter's flat, recursive
    /// import model: imported declarations simply join the importer's
    /// tables, last-definition-wins on name clashes.
    pub fn merge(&mut self, mut other: Program)
    {
        self.globals.append(&mut other.globals);
        self.functions.extend(other.functions);
        self.shaders.extend(other.shaders);
        self.layouts.extend(other.layouts);
    }
}
