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

//! Lexical scoping: one global [`Scope`] plus a per-call [`ScopeList`] stack
//! (spec.md §3 "Scope / ScopeList"). Bindings carry a declared type name and
//! a const flag so assignment can enforce P7 and E.12's coercion rules.

use std::collections::HashMap;

use crate::value::Value;

#[derive(Clone, Debug)]
pub struct Binding
{
    pub value: Value,
    pub declared_type: String,
    pub is_const: bool
}

impl Binding
{
    pub fn new(value: Value, declared_type: impl Into<String>, is_const: bool) -> Self
    {
        Self { value, declared_type: declared_type.into(), is_const }
    }
}

/// A single block of name -> binding. `Scope` is the global scope; a
/// `ScopeList` layers one of these per nested block within a call frame.
#[derive(Clone, Debug, Default)]
pub struct Scope
{
    bindings: HashMap<String, Binding>
}

impl Scope
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn declare(&mut self, name: impl Into<String>, binding: Binding)
    {
        self.bindings.insert(name.into(), binding);
    }

    pub fn get(&self, name: &str) -> Option<&Binding>
    {
        self.bindings.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding>
    {
        self.bindings.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool
    {
        self.bindings.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Binding>
    {
        self.bindings.remove(name)
    }
}

/// The stack of block scopes active within one function call. Lookups walk
/// from the innermost block outward, then fall back to the interpreter's
/// global [`Scope`] (the caller supplies that fallback explicitly, since a
/// `ScopeList` on its own has no notion of globals).
#[derive(Debug, Default)]
pub struct ScopeList
{
    blocks: Vec<Scope>
}

impl ScopeList
{
    pub fn new() -> Self
    {
        Self { blocks: vec![Scope::new()] }
    }

    pub fn push_block(&mut self)
    {
        self.blocks.push(Scope::new());
    }

    pub fn pop_block(&mut self)
    {
        self.blocks.pop();
        debug_assert!(!self.blocks.is_empty(), "ScopeList must always keep its outermost block");
    }

    pub fn declare(&mut self, name: impl Into<String>, binding: Binding)
    {
        self.blocks.last_mut().expect("ScopeList is never empty").declare(name, binding);
    }

    pub fn get(&self, name: &str) -> Option<&Binding>
    {
        self.blocks.iter().rev().find_map(|b| b.get(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding>
    {
        self.blocks.iter_mut().rev().find_map(|b| b.get_mut(name))
    }

    pub fn contains(&self, name: &str) -> bool
    {
        self.blocks.iter().any(|b| b.contains(name))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn inner_block_shadows_outer()
    {
        let mut list = ScopeList::new();
        list.declare("x", Binding::new(Value::Int(1), "int", false));
        list.push_block();
        list.declare("x", Binding::new(Value::Int(2), "int", false));
        assert_eq!(list.get("x").unwrap().value, Value::Int(2));
        list.pop_block();
        assert_eq!(list.get("x").unwrap().value, Value::Int(1));
    }

    #[test]
    fn const_flag_survives_lookup()
    {
        let mut list = ScopeList::new();
        list.declare("pi", Binding::new(Value::Float(3.14), "float", true));
        assert!(list.get("pi").unwrap().is_const);
    }
}
