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

use std::fmt::{Display, Formatter};

/// One of the concrete type names the language recognizes on a declaration.
/// `Var` is the dynamic/untyped marker (spec.md invariant 4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeName
{
    Var,
    Int,
    Float,
    Bool,
    String,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
    Buffer,
    Texture2D,
    Program,
    List
}

impl TypeName
{
    pub fn from_str(s: &str) -> Option<Self>
    {
        Some(match s {
            "var" => TypeName::Var,
            "int" => TypeName::Int,
            "float" => TypeName::Float,
            "bool" => TypeName::Bool,
            "string" => TypeName::String,
            "vec2" => TypeName::Vec2,
            "vec3" => TypeName::Vec3,
            "vec4" => TypeName::Vec4,
            "mat2" => TypeName::Mat2,
            "mat3" => TypeName::Mat3,
            "mat4" => TypeName::Mat4,
            "buffer" => TypeName::Buffer,
            "texture2D" => TypeName::Texture2D,
            "program" => TypeName::Program,
            "list" => TypeName::List,
            _ => return None
        })
    }

    pub fn name(&self) -> &'static str
    {
        match self {
            TypeName::Var => "var",
            TypeName::Int => "int",
            TypeName::Float => "float",
            TypeName::Bool => "bool",
            TypeName::String => "string",
            TypeName::Vec2 => "vec2",
            TypeName::Vec3 => "vec3",
            TypeName::Vec4 => "vec4",
            TypeName::Mat2 => "mat2",
            TypeName::Mat3 => "mat3",
            TypeName::Mat4 => "mat4",
            TypeName::Buffer => "buffer",
            TypeName::Texture2D => "texture2D",
            TypeName::Program => "program",
            TypeName::List => "list"
        }
    }
}

impl Display for TypeName
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        f.write_str(self.name())
    }
}

/// Coarse classification of a [`Token`], used by the parser to report
/// "expected X, got Y" diagnostics without caring about literal payloads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type
{
    Func,
    Return,
    If,
    Else,
    While,
    For,
    In,
    Break,
    Use,
    Allocate,
    Upload,
    To,
    Draw,
    Clear,
    Viewport,
    Import,
    Print,
    And,
    Or,
    Type,
    Bool,
    Int,
    Float,
    String,
    Identifier,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Assign,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Pipe,
    LArrow,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Semicolon,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
    CaretAssign,
    Eof,
    Combined(Vec<Type>)
}

impl Type
{
    pub fn name(&self) -> String
    {
        match self {
            Type::Func => "'func'".into(),
            Type::Return => "'return'".into(),
            Type::If => "'if'".into(),
            Type::Else => "'else'".into(),
            Type::While => "'while'".into(),
            Type::For => "'for'".into(),
            Type::In => "'in'".into(),
            Type::Break => "'break'".into(),
            Type::Use => "'use'".into(),
            Type::Allocate => "'allocate'".into(),
            Type::Upload => "'upload'".into(),
            Type::To => "'to'".into(),
            Type::Draw => "'draw'".into(),
            Type::Clear => "'clear'".into(),
            Type::Viewport => "'viewport'".into(),
            Type::Import => "'import'".into(),
            Type::Print => "'print'".into(),
            Type::And => "'and'".into(),
            Type::Or => "'or'".into(),
            Type::Type => "type name".into(),
            Type::Bool => "bool literal".into(),
            Type::Int => "int literal".into(),
            Type::Float => "float literal".into(),
            Type::String => "string literal".into(),
            Type::Identifier => "identifier".into(),
            Type::Plus => "'+'".into(),
            Type::Minus => "'-'".into(),
            Type::Star => "'*'".into(),
            Type::Slash => "'/'".into(),
            Type::Percent => "'%'".into(),
            Type::Caret => "'^'".into(),
            Type::Assign => "'='".into(),
            Type::Eq => "'=='".into(),
            Type::Neq => "'!='".into(),
            Type::Lt => "'<'".into(),
            Type::Gt => "'>'".into(),
            Type::Le => "'<='".into(),
            Type::Ge => "'>='".into(),
            Type::AndAnd => "'&&'".into(),
            Type::OrOr => "'||'".into(),
            Type::Bang => "'!'".into(),
            Type::Pipe => "'|'".into(),
            Type::LArrow => "'<-'".into(),
            Type::LParen => "'('".into(),
            Type::RParen => "')'".into(),
            Type::LBracket => "'['".into(),
            Type::RBracket => "']'".into(),
            Type::LBrace => "'{'".into(),
            Type::RBrace => "'}'".into(),
            Type::Comma => "','".into(),
            Type::Dot => "'.'".into(),
            Type::Semicolon => "';'".into(),
            Type::PlusAssign => "'+='".into(),
            Type::MinusAssign => "'-='".into(),
            Type::StarAssign => "'*='".into(),
            Type::SlashAssign => "'/='".into(),
            Type::PercentAssign => "'%='".into(),
            Type::CaretAssign => "'^='".into(),
            Type::Eof => "end of file".into(),
            Type::Combined(v) => v.iter().map(Type::name).collect::<Vec<_>>().join(" or ")
        }
    }

    pub fn combined<T: AsRef<[Type]>>(t: T) -> Self
    {
        Type::Combined(t.as_ref().into())
    }
}

impl Display for Type
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        f.write_str(&self.name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token
{
    Func,
    Return,
    If,
    Else,
    While,
    For,
    In,
    Break,
    Use,
    Allocate,
    Upload,
    To,
    Draw,
    Clear,
    Viewport,
    Import,
    Print,
    And,
    Or,
    Type(TypeName),
    Bool(bool),
    Int(i32),
    Float(f32),
    Str(String),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Assign,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Pipe,
    LArrow,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Semicolon,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
    CaretAssign
}

impl Token
{
    pub fn get_type(&self) -> Type
    {
        match self {
            Token::Func => Type::Func,
            Token::Return => Type::Return,
            Token::If => Type::If,
            Token::Else => Type::Else,
            Token::While => Type::While,
            Token::For => Type::For,
            Token::In => Type::In,
            Token::Break => Type::Break,
            Token::Use => Type::Use,
            Token::Allocate => Type::Allocate,
            Token::Upload => Type::Upload,
            Token::To => Type::To,
            Token::Draw => Type::Draw,
            Token::Clear => Type::Clear,
            Token::Viewport => Type::Viewport,
            Token::Import => Type::Import,
            Token::Print => Type::Print,
            Token::And => Type::And,
            Token::Or => Type::Or,
            Token::Type(_) => Type::Type,
            Token::Bool(_) => Type::Bool,
            Token::Int(_) => Type::Int,
            Token::Float(_) => Type::Float,
            Token::Str(_) => Type::String,
            Token::Identifier(_) => Type::Identifier,
            Token::Plus => Type::Plus,
            Token::Minus => Type::Minus,
            Token::Star => Type::Star,
            Token::Slash => Type::Slash,
            Token::Percent => Type::Percent,
            Token::Caret => Type::Caret,
            Token::Assign => Type::Assign,
            Token::Eq => Type::Eq,
            Token::Neq => Type::Neq,
            Token::Lt => Type::Lt,
            Token::Gt => Type::Gt,
            Token::Le => Type::Le,
            Token::Ge => Type::Ge,
            Token::AndAnd => Type::AndAnd,
            Token::OrOr => Type::OrOr,
            Token::Bang => Type::Bang,
            Token::Pipe => Type::Pipe,
            Token::LArrow => Type::LArrow,
            Token::LParen => Type::LParen,
            Token::RParen => Type::RParen,
            Token::LBracket => Type::LBracket,
            Token::RBracket => Type::RBracket,
            Token::LBrace => Type::LBrace,
            Token::RBrace => Type::RBrace,
            Token::Comma => Type::Comma,
            Token::Dot => Type::Dot,
            Token::Semicolon => Type::Semicolon,
            Token::PlusAssign => Type::PlusAssign,
            Token::MinusAssign => Type::MinusAssign,
            Token::StarAssign => Type::StarAssign,
            Token::SlashAssign => Type::SlashAssign,
            Token::PercentAssign => Type::PercentAssign,
            Token::CaretAssign => Type::CaretAssign
        }
    }

    pub fn identifier(self) -> Option<String>
    {
        match self {
            Token::Identifier(s) => Some(s),
            _ => None
        }
    }

    pub fn as_identifier_str(&self) -> Option<&str>
    {
        match self {
            Token::Identifier(s) => Some(s.as_str()),
            _ => None
        }
    }
}

impl Display for Token
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self {
            Token::Identifier(s) => write!(f, "identifier '{}'", s),
            Token::Str(s) => write!(f, "string {:?}", s),
            Token::Int(i) => write!(f, "int {}", i),
            Token::Float(v) => write!(f, "float {}", v),
            Token::Bool(b) => write!(f, "bool {}", b),
            Token::Type(t) => write!(f, "type {}", t),
            other => f.write_str(&other.get_type().name())
        }
    }
}
