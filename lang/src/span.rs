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

/// Carried by every AST node so diagnostics can always point back at source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span
{
    pub first_line: usize,
    pub last_line: usize,
    pub first_column: usize,
    pub last_column: usize
}

impl Span
{
    pub fn new(first_line: usize, first_column: usize, last_line: usize, last_column: usize) -> Self
    {
        Self { first_line, last_line, first_column, last_column }
    }

    /// A zero-width span at a single line/column, used for single-token nodes.
    pub fn point(line: usize, column: usize) -> Self
    {
        Self { first_line: line, last_line: line, first_column: column, last_column: column }
    }

    /// Smallest span enclosing both `self` and `other`; used when a grammar rule
    /// combines two already-spanned sub-expressions into a larger node.
    pub fn join(&self, other: &Span) -> Self
    {
        Self {
            first_line: self.first_line.min(other.first_line),
            first_column: if self.first_line <= other.first_line { self.first_column } else { other.first_column },
            last_line: self.last_line.max(other.last_line),
            last_column: if self.last_line >= other.last_line { self.last_column } else { other.last_column }
        }
    }
}

impl Display for Span
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        if self.first_line == self.last_line {
            write!(f, "line {}", self.first_line)
        } else {
            write!(f, "line {}-{}", self.first_line, self.last_line)
        }
    }
}
