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

use std::collections::VecDeque;

use regex::Regex;

use crate::lexer::{
    error::{Error, Type as ErrType},
    token::{Token, TypeName}
};

#[derive(Clone, Debug, PartialEq)]
pub struct TokenEntry
{
    pub line: usize,
    pub col: usize,
    pub token: Token
}

fn is_ident_start(c: u8) -> bool
{
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_continue(c: u8) -> bool
{
    c.is_ascii_alphanumeric() || c == b'_'
}

fn check_keyword(word: &str) -> Option<Token>
{
    if let Some(t) = TypeName::from_str(word) {
        return Some(Token::Type(t));
    }
    Some(match word {
        "func" => Token::Func,
        "return" => Token::Return,
        "if" => Token::If,
        "else" => Token::Else,
        "while" => Token::While,
        "for" => Token::For,
        "in" => Token::In,
        "break" => Token::Break,
        "true" => Token::Bool(true),
        "false" => Token::Bool(false),
        "use" => Token::Use,
        "allocate" => Token::Allocate,
        "upload" => Token::Upload,
        "to" => Token::To,
        "draw" => Token::Draw,
        "clear" => Token::Clear,
        "viewport" => Token::Viewport,
        "import" => Token::Import,
        "print" => Token::Print,
        "and" => Token::And,
        "or" => Token::Or,
        _ => return None
    })
}

/// Tokenises a complete gfxscript source buffer, tracking 1-based line/column
/// on every token the way every downstream `Error` needs them (spec.md §3
/// invariant 1: "Every AST node has a source span").
pub struct Lexer
{
    tokens: VecDeque<TokenEntry>
}

impl Lexer
{
    pub fn new() -> Self
    {
        Self { tokens: VecDeque::new() }
    }

    pub fn into_tokens(self) -> VecDeque<TokenEntry>
    {
        self.tokens
    }

    pub fn process(&mut self, src: &str) -> Result<(), Error>
    {
        let bytes = src.as_bytes();
        let mut i = 0usize;
        let mut line = 1usize;
        let mut col = 1usize;
        let int_re = Regex::new(r"^\d+$").unwrap();
        let float_re = Regex::new(r"^\d+\.\d+$").unwrap();

        while i < bytes.len() {
            let c = bytes[i];
            // newline
            if c == b'\n' {
                i += 1;
                line += 1;
                col = 1;
                continue;
            }
            // other whitespace
            if c == b' ' || c == b'\t' || c == b'\r' {
                i += 1;
                col += 1;
                continue;
            }
            // line comment
            if c == b'/' && i + 1 < bytes.len() && bytes[i + 1] == b'/' {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            // block comment
            if c == b'/' && i + 1 < bytes.len() && bytes[i + 1] == b'*' {
                let start_line = line;
                let start_col = col;
                i += 2;
                col += 2;
                let mut closed = false;
                while i + 1 < bytes.len() {
                    if bytes[i] == b'\n' {
                        line += 1;
                        col = 1;
                        i += 1;
                        continue;
                    }
                    if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                        i += 2;
                        col += 2;
                        closed = true;
                        break;
                    }
                    i += 1;
                    col += 1;
                }
                if !closed {
                    return Err(Error::new(start_line, start_col, ErrType::UnexpectedChar(b'/')));
                }
                continue;
            }

            let (start_line, start_col) = (line, col);

            // string literal
            if c == b'"' {
                i += 1;
                col += 1;
                let mut s = String::new();
                loop {
                    if i >= bytes.len() {
                        return Err(Error::new(start_line, start_col, ErrType::UnterminatedString));
                    }
                    let ch = bytes[i];
                    if ch == b'"' {
                        i += 1;
                        col += 1;
                        break;
                    }
                    if ch == b'\n' {
                        return Err(Error::new(start_line, start_col, ErrType::UnterminatedString));
                    }
                    if ch == b'\\' {
                        i += 1;
                        col += 1;
                        if i >= bytes.len() {
                            return Err(Error::new(start_line, start_col, ErrType::UnterminatedString));
                        }
                        let esc = bytes[i];
                        let translated = match esc {
                            b'n' => '\n',
                            b't' => '\t',
                            b'r' => '\r',
                            b'"' => '"',
                            b'\\' => '\\',
                            _ => return Err(Error::new(line, col, ErrType::BadEscape(esc)))
                        };
                        s.push(translated);
                        i += 1;
                        col += 1;
                        continue;
                    }
                    s.push(ch as char);
                    i += 1;
                    col += 1;
                }
                self.push(start_line, start_col, Token::Str(s));
                continue;
            }

            // identifiers / keywords / type names
            if is_ident_start(c) {
                let begin = i;
                while i < bytes.len() && is_ident_continue(bytes[i]) {
                    i += 1;
                    col += 1;
                }
                let word = std::str::from_utf8(&bytes[begin..i]).unwrap();
                if word == "null" {
                    // `null` is not its own token kind; the parser recognizes it
                    // by identifier text the same way it recognizes `vertex`,
                    // `fragment`, `layout`, `uniform`, `input`, `output` and `main`.
                    self.push(start_line, start_col, Token::Identifier("null".into()));
                } else if let Some(tok) = check_keyword(word) {
                    self.push(start_line, start_col, tok);
                } else {
                    self.push(start_line, start_col, Token::Identifier(word.to_string()));
                }
                continue;
            }

            // numbers
            if c.is_ascii_digit() {
                let begin = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                    col += 1;
                }
                if i < bytes.len() && bytes[i] == b'.' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit() {
                    i += 1;
                    col += 1;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                        col += 1;
                    }
                }
                let word = std::str::from_utf8(&bytes[begin..i]).unwrap();
                if float_re.is_match(word) {
                    let v: f32 = word.parse().map_err(|_| Error::new(start_line, start_col, ErrType::BadNumber(word.into())))?;
                    self.push(start_line, start_col, Token::Float(v));
                } else if int_re.is_match(word) {
                    let v: i32 = word.parse().map_err(|_| Error::new(start_line, start_col, ErrType::BadNumber(word.into())))?;
                    self.push(start_line, start_col, Token::Int(v));
                } else {
                    return Err(Error::new(start_line, start_col, ErrType::BadNumber(word.into())));
                }
                continue;
            }

            // two-character operators
            let two = if i + 1 < bytes.len() { Some((c, bytes[i + 1])) } else { None };
            let tok2 = match two {
                Some((b'=', b'=')) => Some(Token::Eq),
                Some((b'!', b'=')) => Some(Token::Neq),
                Some((b'<', b'=')) => Some(Token::Le),
                Some((b'>', b'=')) => Some(Token::Ge),
                Some((b'&', b'&')) => Some(Token::AndAnd),
                Some((b'|', b'|')) => Some(Token::OrOr),
                Some((b'<', b'-')) => Some(Token::LArrow),
                Some((b'+', b'=')) => Some(Token::PlusAssign),
                Some((b'-', b'=')) => Some(Token::MinusAssign),
                Some((b'*', b'=')) => Some(Token::StarAssign),
                Some((b'/', b'=')) => Some(Token::SlashAssign),
                Some((b'%', b'=')) => Some(Token::PercentAssign),
                Some((b'^', b'=')) => Some(Token::CaretAssign),
                _ => None
            };
            if let Some(tok) = tok2 {
                self.push(start_line, start_col, tok);
                i += 2;
                col += 2;
                continue;
            }

            let tok1 = match c {
                b'+' => Some(Token::Plus),
                b'-' => Some(Token::Minus),
                b'*' => Some(Token::Star),
                b'/' => Some(Token::Slash),
                b'%' => Some(Token::Percent),
                b'^' => Some(Token::Caret),
                b'=' => Some(Token::Assign),
                b'<' => Some(Token::Lt),
                b'>' => Some(Token::Gt),
                b'!' => Some(Token::Bang),
                b'|' => Some(Token::Pipe),
                b'(' => Some(Token::LParen),
                b')' => Some(Token::RParen),
                b'[' => Some(Token::LBracket),
                b']' => Some(Token::RBracket),
                b'{' => Some(Token::LBrace),
                b'}' => Some(Token::RBrace),
                b',' => Some(Token::Comma),
                b'.' => Some(Token::Dot),
                b';' => Some(Token::Semicolon),
                _ => None
            };
            if let Some(tok) = tok1 {
                self.push(start_line, start_col, tok);
                i += 1;
                col += 1;
                continue;
            }

            return Err(Error::new(start_line, start_col, ErrType::UnexpectedChar(c)));
        }
        Ok(())
    }

    fn push(&mut self, line: usize, col: usize, token: Token)
    {
        self.tokens.push_back(TokenEntry { line, col, token });
    }
}

impl Default for Lexer
{
    fn default() -> Self
    {
        Self::new()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn toks(src: &str) -> Vec<Token>
    {
        let mut lexer = Lexer::new();
        lexer.process(src).unwrap();
        lexer.into_tokens().into_iter().map(|e| e.token).collect()
    }

    #[test]
    fn lexes_hello_program()
    {
        let t = toks(r#"func init(){ print("hi"); } func loop(){}"#);
        assert_eq!(t[0], Token::Func);
        assert_eq!(t[1], Token::Identifier("init".into()));
        assert!(t.contains(&Token::Str("hi".into())));
    }

    #[test]
    fn lexes_numbers()
    {
        let t = toks("1 2.5 0.5");
        assert_eq!(t[0], Token::Int(1));
        assert_eq!(t[1], Token::Float(2.5));
        assert_eq!(t[2], Token::Float(0.5));
    }

    #[test]
    fn tracks_line_column()
    {
        let mut lexer = Lexer::new();
        lexer.process("a\nbc").unwrap();
        let entries: Vec<_> = lexer.into_tokens().into_iter().collect();
        assert_eq!(entries[0].line, 1);
        assert_eq!(entries[0].col, 1);
        assert_eq!(entries[1].line, 2);
        assert_eq!(entries[1].col, 1);
    }

    #[test]
    fn skips_comments()
    {
        let t = toks("// hi\nint x = 1; /* block \n comment */ int y = 2;");
        assert_eq!(t[0], Token::Type(TypeName::Int));
    }

    #[test]
    fn rejects_unterminated_string()
    {
        let mut lexer = Lexer::new();
        assert!(lexer.process("\"oops").is_err());
    }
}
