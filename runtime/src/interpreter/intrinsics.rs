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

//! Built-in functions reserved by the host language (spec.md §4.F E.11):
//! `sin`, `cos`, `tan`, `pi()`, `type(x)`. These names cannot be shadowed by
//! a user `func` definition.

use gfxscript_lang::Span;

use super::error::Error;
use crate::value::Value;

pub const PI: f32 = std::f32::consts::PI;

pub fn is_intrinsic(name: &str) -> bool
{
    matches!(name, "sin" | "cos" | "tan" | "pi" | "type")
}

pub fn call(name: &str, args: &[Value], span: Span) -> Result<Value, Error>
{
    match name {
        "sin" | "cos" | "tan" => {
            let [x] = one_arg(name, args, span)?;
            let x = x.as_f32().map_err(|e| Error::type_operation(span, e))?;
            Ok(Value::Float(match name {
                "sin" => x.sin(),
                "cos" => x.cos(),
                _ => x.tan()
            }))
        },
        "pi" => {
            if !args.is_empty() {
                return Err(Error::runtime_bound(span, format!("'pi' takes no arguments, got {}", args.len())));
            }
            Ok(Value::Float(PI))
        },
        "type" => {
            let [x] = one_arg(name, args, span)?;
            Ok(Value::Str(x.type_name().to_string()))
        },
        other => Err(Error::resolution(span, format!("'{}' is not a known function", other)))
    }
}

fn one_arg<'a>(name: &str, args: &'a [Value], span: Span) -> Result<[&'a Value; 1], Error>
{
    if args.len() != 1 {
        return Err(Error::runtime_bound(span, format!("'{}' takes exactly one argument, got {}", name, args.len())));
    }
    Ok([&args[0]])
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn pi_matches_spec_constant()
    {
        let v = call("pi", &[], Span::default()).unwrap();
        assert!((v.as_f32().unwrap() - 3.14159).abs() < 1e-4);
    }

    #[test]
    fn type_reports_the_runtime_type_name()
    {
        let v = call("type", &[Value::Int(3)], Span::default()).unwrap();
        assert_eq!(v, Value::Str("int".to_string()));
    }
}
