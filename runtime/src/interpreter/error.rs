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

//! The runtime error taxonomy (spec.md §7): every `Err` the interpreter
//! returns carries one of these `Kind`s plus the span of the statement that
//! failed, so the driver can format it as `LABEL at line L[-L2]: message`.

use std::fmt::{self, Display, Formatter};

use gfxscript_lang::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind
{
    /// Undeclared or mistyped identifier, unknown uniform, missing function.
    Resolution,
    /// Illegal operand combination, illegal coercion on assign.
    TypeOperation,
    /// Missing shader pair, link failure, image load failure.
    Resource,
    /// Index out of range, arity mismatch, inconsistent attribute component count.
    RuntimeBound
}

#[derive(Clone, Debug, PartialEq)]
pub struct Error
{
    pub span: Option<Span>,
    pub kind: Kind,
    pub message: String
}

impl Error
{
    pub fn new(span: Option<Span>, kind: Kind, message: impl Into<String>) -> Self
    {
        Self { span, kind, message: message.into() }
    }

    pub fn resolution(span: Span, message: impl Into<String>) -> Self
    {
        Self::new(Some(span), Kind::Resolution, message)
    }

    pub fn type_operation(span: Span, message: impl Into<String>) -> Self
    {
        Self::new(Some(span), Kind::TypeOperation, message)
    }

    pub fn resource(span: Option<Span>, message: impl Into<String>) -> Self
    {
        Self::new(span, Kind::Resource, message)
    }

    pub fn runtime_bound(span: Span, message: impl Into<String>) -> Self
    {
        Self::new(Some(span), Kind::RuntimeBound, message)
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
