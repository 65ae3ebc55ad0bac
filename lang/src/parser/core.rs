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

use crate::{
    ast::{
        expr::{BinOp, Expr, ExprKind, UnOp},
        stmt::{FuncDef, IoDecl, IoKind, Layout, LayoutAttr, Param, Program, Shader, ShaderPair, Stmt, StmtKind, Uniform}
    },
    lexer::token::{Token, Type as TokenType, TypeName},
    lexer::TokenEntry,
    parser::error::{Error, Type},
    span::Span
};

/// Recursive-descent parser over the token stream produced by [`crate::lexer::Lexer`].
///
/// `vertex`, `fragment`, `layout`, `uniform`, `input`, `output` and `main` are
/// not lexer keywords (spec.md §4.A) — this parser recognizes them by
/// identifier text at the points in the grammar where they're expected.
pub struct Parser
{
    tokens: VecDeque<TokenEntry>,
    cur_line: usize,
    cur_col: usize
}

impl Parser
{
    pub fn new(tokens: VecDeque<TokenEntry>) -> Self
    {
        Self { tokens, cur_line: 1, cur_col: 1 }
    }

    // ---- token-stream primitives ----------------------------------------

    fn peek(&self) -> Option<&Token>
    {
        self.tokens.front().map(|e| &e.token)
    }

    fn peek_at(&self, n: usize) -> Option<&Token>
    {
        self.tokens.get(n).map(|e| &e.token)
    }

    fn pop(&mut self) -> Result<Token, Error>
    {
        match self.tokens.pop_front() {
            Some(entry) => {
                self.cur_line = entry.line;
                self.cur_col = entry.col;
                Ok(entry.token)
            },
            None => Err(Error::new(self.cur_line, self.cur_col, Type::Eof))
        }
    }

    fn pop_expect(&mut self, ttype: TokenType) -> Result<Token, Error>
    {
        let (line, col) = self.next_pos();
        let token = self.pop()?;
        if token.get_type() != ttype {
            Err(Error::new(line, col, Type::UnexpectedToken { actual: token, expected: ttype }))
        } else {
            Ok(token)
        }
    }

    fn next_pos(&self) -> (usize, usize)
    {
        self.tokens.front().map(|e| (e.line, e.col)).unwrap_or((self.cur_line, self.cur_col))
    }

    fn check(&self, ttype: &TokenType) -> bool
    {
        self.peek().map(|t| &t.get_type() == ttype).unwrap_or(false)
    }

    /// True if the next token is the identifier `word` (used for the
    /// contextual keywords `vertex`, `fragment`, `layout`, `uniform`,
    /// `input`, `output`, `main`).
    fn is_word(&self, word: &str) -> bool
    {
        matches!(self.peek(), Some(Token::Identifier(s)) if s == word)
    }

    fn is_word_at(&self, n: usize, word: &str) -> bool
    {
        matches!(self.peek_at(n), Some(Token::Identifier(s)) if s == word)
    }

    fn pop_word(&mut self, word: &str) -> Result<(), Error>
    {
        let (line, col) = self.next_pos();
        let token = self.pop()?;
        match &token {
            Token::Identifier(s) if s == word => Ok(()),
            _ => Err(Error::new(
                line,
                col,
                Type::UnexpectedToken { actual: token, expected: TokenType::Identifier }
            ))
        }
    }

    fn pop_identifier(&mut self) -> Result<String, Error>
    {
        let (line, col) = self.next_pos();
        match self.pop()? {
            Token::Identifier(s) => Ok(s),
            other => Err(Error::new(line, col, Type::UnexpectedToken { actual: other, expected: TokenType::Identifier }))
        }
    }

    fn pop_type_name(&mut self) -> Result<TypeName, Error>
    {
        let (line, col) = self.next_pos();
        match self.pop()? {
            Token::Type(t) => Ok(t),
            other => Err(Error::new(line, col, Type::UnexpectedToken { actual: other, expected: TokenType::Type }))
        }
    }

    fn span_from(&self, start_line: usize, start_col: usize) -> Span
    {
        Span::new(start_line, start_col, self.cur_line, self.cur_col)
    }

    // ---- top level --------------------------------------------------------

    pub fn parse_program(&mut self) -> Result<Program, Error>
    {
        let mut program = Program::default();
        while self.peek().is_some() {
            if self.check(&TokenType::Import) {
                self.pop()?;
                let path = self.pop_string()?;
                self.pop_expect(TokenType::Semicolon)?;
                program.imports.push(path);
            } else if self.check(&TokenType::Func) {
                let def = self.parse_func_def()?;
                program.functions.insert(def.name.clone(), def);
            } else if self.is_word("vertex") || self.is_word("fragment") {
                self.parse_shader_def(&mut program)?;
            } else if self.is_word("layout") {
                let layout = self.parse_layout_def()?;
                program.layouts.insert(layout.name.clone(), layout);
            } else if self.check(&TokenType::Type) {
                program.globals.push(self.parse_decl()?);
            } else {
                let (line, col) = self.next_pos();
                let tok = self.pop()?;
                return Err(Error::new(
                    line,
                    col,
                    Type::UnexpectedToken {
                        actual: tok,
                        expected: TokenType::combined([TokenType::Import, TokenType::Func, TokenType::Type])
                    }
                ));
            }
        }
        Ok(program)
    }

    fn pop_string(&mut self) -> Result<String, Error>
    {
        let (line, col) = self.next_pos();
        match self.pop()? {
            Token::Str(s) => Ok(s),
            other => Err(Error::new(line, col, Type::UnexpectedToken { actual: other, expected: TokenType::String }))
        }
    }

    fn parse_func_def(&mut self) -> Result<FuncDef, Error>
    {
        let (start_line, start_col) = self.next_pos();
        self.pop_expect(TokenType::Func)?;
        let name = self.pop_identifier()?;
        self.pop_expect(TokenType::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenType::RParen) {
            loop {
                let (pline, pcol) = self.next_pos();
                let ty = self.pop_type_name()?;
                let pname = self.pop_identifier()?;
                params.push(Param { ty, name: pname, span: self.span_from(pline, pcol) });
                if self.check(&TokenType::Comma) {
                    self.pop()?;
                } else {
                    break;
                }
            }
        }
        self.pop_expect(TokenType::RParen)?;
        let body = self.parse_block()?;
        Ok(FuncDef { name, params, body, span: self.span_from(start_line, start_col) })
    }

    fn parse_layout_def(&mut self) -> Result<Layout, Error>
    {
        let (start_line, start_col) = self.next_pos();
        self.pop_word("layout")?;
        let name = self.pop_identifier()?;
        self.pop_expect(TokenType::LBrace)?;
        let mut attrs = Vec::new();
        while !self.check(&TokenType::RBrace) {
            let (line, col) = self.next_pos();
            let ty = self.pop_type_name()?;
            let aname = self.pop_identifier()?;
            self.pop_expect(TokenType::Semicolon)?;
            attrs.push(LayoutAttr { ty, name: aname, span: self.span_from(line, col) });
        }
        self.pop_expect(TokenType::RBrace)?;
        Ok(Layout { name, attrs, span: self.span_from(start_line, start_col) })
    }

    fn parse_shader_def(&mut self, program: &mut Program) -> Result<(), Error>
    {
        let is_vertex = self.is_word("vertex");
        self.pop()?; // consume 'vertex' / 'fragment'
        let name = self.pop_identifier()?;
        self.pop_expect(TokenType::LBrace)?;
        let mut shader = Shader::default();
        while !self.check(&TokenType::RBrace) {
            if self.is_word("uniform") {
                self.pop()?;
                let (line, col) = self.next_pos();
                let ty = self.pop_type_name()?;
                let uname = self.pop_identifier()?;
                self.pop_expect(TokenType::Semicolon)?;
                shader.uniforms.push(Uniform { ty, name: uname, span: self.span_from(line, col) });
            } else if self.is_word("input") || self.is_word("output") {
                let is_input = self.is_word("input");
                self.pop()?;
                let (line, col) = self.next_pos();
                let kind = if self.is_word(if is_input { "input" } else { "output" }) {
                    self.pop()?;
                    IoKind::InlineLayout
                } else {
                    IoKind::Concrete(self.pop_type_name()?)
                };
                let dname = self.pop_identifier()?;
                self.pop_expect(TokenType::Semicolon)?;
                let decl = IoDecl { kind, name: dname, span: self.span_from(line, col) };
                if is_input {
                    shader.inputs.push(decl);
                } else {
                    shader.outputs.push(decl);
                }
            } else if self.check(&TokenType::Func) {
                let def = self.parse_func_def()?;
                shader.functions.insert(def.name.clone(), def);
            } else {
                let (line, col) = self.next_pos();
                let tok = self.pop()?;
                return Err(Error::new(line, col, Type::UnexpectedToken { actual: tok, expected: TokenType::Func }));
            }
        }
        self.pop_expect(TokenType::RBrace)?;
        let pair = program.shaders.entry(name).or_default();
        if is_vertex {
            if pair.vertex.is_some() {
                return Err(Error::new(self.cur_line, self.cur_col, Type::DuplicateShaderHalf("vertex".into())));
            }
            pair.vertex = Some(shader);
        } else {
            if pair.fragment.is_some() {
                return Err(Error::new(self.cur_line, self.cur_col, Type::DuplicateShaderHalf("fragment".into())));
            }
            pair.fragment = Some(shader);
        }
        Ok(())
    }

    // ---- statements ---------------------------------------------------------

    fn parse_block(&mut self) -> Result<Vec<Stmt>, Error>
    {
        self.pop_expect(TokenType::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check(&TokenType::RBrace) {
            stmts.push(self.parse_stmt()?);
        }
        self.pop_expect(TokenType::RBrace)?;
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, Error>
    {
        let (start_line, start_col) = self.next_pos();
        let kind = match self.peek() {
            Some(Token::Type(_)) => self.parse_decl_kind()?,
            Some(Token::Allocate) => {
                self.pop()?;
                let name = self.pop_identifier()?;
                self.pop_expect(TokenType::Semicolon)?;
                StmtKind::Alloc { name }
            },
            Some(Token::Upload) => {
                self.pop()?;
                let buffer = self.pop_identifier()?;
                self.pop_expect(TokenType::Dot)?;
                let attrib = self.pop_identifier()?;
                self.pop_expect(TokenType::LArrow)?;
                let list = self.parse_upload_list()?;
                self.pop_expect(TokenType::Semicolon)?;
                StmtKind::Upload { buffer, attrib, list }
            },
            Some(Token::Draw) => {
                self.pop()?;
                let buffer = self.pop_identifier()?;
                let mut target = None;
                let mut program = None;
                if self.check(&TokenType::To) {
                    self.pop()?;
                    target = Some(self.pop_identifier()?);
                }
                if matches!(self.peek(), Some(Token::Identifier(s)) if s == "using") {
                    self.pop()?;
                    program = Some(self.pop_identifier()?);
                }
                self.pop_expect(TokenType::Semicolon)?;
                StmtKind::Draw { buffer, target, program }
            },
            Some(Token::Clear) => {
                self.pop()?;
                let color = self.parse_expr()?;
                self.pop_expect(TokenType::Semicolon)?;
                StmtKind::Clear { color }
            },
            Some(Token::Viewport) => {
                self.pop()?;
                let rect = self.parse_expr()?;
                self.pop_expect(TokenType::Semicolon)?;
                StmtKind::Viewport { rect }
            },
            Some(Token::Use) => {
                self.pop()?;
                let program = self.pop_identifier()?;
                self.pop_expect(TokenType::Semicolon)?;
                StmtKind::Use { program }
            },
            Some(Token::If) => return self.parse_if(),
            Some(Token::While) => return self.parse_while(),
            Some(Token::For) => return self.parse_for(),
            Some(Token::Return) => {
                self.pop()?;
                let value = if self.check(&TokenType::Semicolon) { None } else { Some(self.parse_expr()?) };
                self.pop_expect(TokenType::Semicolon)?;
                StmtKind::Return(value)
            },
            Some(Token::Break) => {
                self.pop()?;
                self.pop_expect(TokenType::Semicolon)?;
                StmtKind::Break
            },
            Some(Token::Print) => {
                self.pop()?;
                self.pop_expect(TokenType::LParen)?;
                let value = self.parse_expr()?;
                self.pop_expect(TokenType::RParen)?;
                self.pop_expect(TokenType::Semicolon)?;
                StmtKind::Print(value)
            },
            _ => return self.parse_assign_or_call(),
        };
        Ok(Stmt::new(kind, self.span_from(start_line, start_col)))
    }

    fn parse_decl_kind(&mut self) -> Result<StmtKind, Error>
    {
        let ty = self.pop_type_name()?;
        let name = self.pop_identifier()?;
        let init = if self.check(&TokenType::Assign) {
            self.pop()?;
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.pop_expect(TokenType::Semicolon)?;
        Ok(StmtKind::Decl { ty, name, constant: false, init })
    }

    /// Top-level global declarations use the exact same grammar as a
    /// block-level `Decl` statement (spec.md §4.A: "top-level global
    /// declarations" are "evaluated at init").
    fn parse_decl(&mut self) -> Result<Stmt, Error>
    {
        let (start_line, start_col) = self.next_pos();
        let kind = self.parse_decl_kind()?;
        Ok(Stmt::new(kind, self.span_from(start_line, start_col)))
    }

    fn parse_assign_or_call(&mut self) -> Result<Stmt, Error>
    {
        let (start_line, start_col) = self.next_pos();
        let lhs = self.parse_expr()?;
        let kind = match self.peek() {
            Some(Token::Assign) => {
                self.pop()?;
                let rhs = self.parse_expr()?;
                StmtKind::Assign { lhs, rhs }
            },
            Some(Token::PlusAssign) => self.parse_compound(lhs, BinOp::Add)?,
            Some(Token::MinusAssign) => self.parse_compound(lhs, BinOp::Sub)?,
            Some(Token::StarAssign) => self.parse_compound(lhs, BinOp::Mul)?,
            Some(Token::SlashAssign) => self.parse_compound(lhs, BinOp::Div)?,
            Some(Token::PercentAssign) => self.parse_compound(lhs, BinOp::Mod)?,
            Some(Token::CaretAssign) => self.parse_compound(lhs, BinOp::Exp)?,
            _ => StmtKind::Expr(lhs)
        };
        self.pop_expect(TokenType::Semicolon)?;
        Ok(Stmt::new(kind, self.span_from(start_line, start_col)))
    }

    fn parse_compound(&mut self, lhs: Expr, op: BinOp) -> Result<StmtKind, Error>
    {
        self.pop()?;
        let rhs = self.parse_expr()?;
        Ok(StmtKind::CompoundAssign { op, lhs, rhs })
    }

    fn parse_if(&mut self) -> Result<Stmt, Error>
    {
        let (start_line, start_col) = self.next_pos();
        self.pop_expect(TokenType::If)?;
        self.pop_expect(TokenType::LParen)?;
        let cond = self.parse_expr()?;
        self.pop_expect(TokenType::RParen)?;
        let then_branch = self.parse_block()?;
        let else_branch = if self.check(&TokenType::Else) {
            self.pop()?;
            if self.check(&TokenType::If) {
                vec![self.parse_if()?]
            } else {
                self.parse_block()?
            }
        } else {
            Vec::new()
        };
        Ok(Stmt::new(StmtKind::If { cond, then_branch, else_branch }, self.span_from(start_line, start_col)))
    }

    fn parse_while(&mut self) -> Result<Stmt, Error>
    {
        let (start_line, start_col) = self.next_pos();
        self.pop_expect(TokenType::While)?;
        self.pop_expect(TokenType::LParen)?;
        let cond = self.parse_expr()?;
        self.pop_expect(TokenType::RParen)?;
        let body = self.parse_block()?;
        Ok(Stmt::new(StmtKind::While { cond, body }, self.span_from(start_line, start_col)))
    }

    fn parse_for(&mut self) -> Result<Stmt, Error>
    {
        let (start_line, start_col) = self.next_pos();
        self.pop_expect(TokenType::For)?;
        let var = self.pop_identifier()?;
        let kind = if self.check(&TokenType::Assign) {
            self.pop()?;
            let from = self.parse_expr()?;
            self.pop_expect(TokenType::To)?;
            let to = self.parse_expr()?;
            let step = if matches!(self.peek(), Some(Token::Identifier(s)) if s == "by") {
                self.pop()?;
                Some(self.parse_expr()?)
            } else {
                None
            };
            let body = self.parse_block()?;
            StmtKind::ForRange { var, from, to, step, body }
        } else {
            self.pop_expect(TokenType::In)?;
            let list = self.parse_expr()?;
            let body = self.parse_block()?;
            StmtKind::ForIn { var, list, body }
        };
        Ok(Stmt::new(kind, self.span_from(start_line, start_col)))
    }

    /// `{expr, expr, ...}` on the right-hand side of `upload`. Left as raw
    /// expressions: `upload` decides at execution time how to interpret them
    /// (floats/vectors, or a flat list of integer indices).
    fn parse_upload_list(&mut self) -> Result<Vec<Expr>, Error>
    {
        self.pop_expect(TokenType::LBrace)?;
        let mut items = Vec::new();
        if !self.check(&TokenType::RBrace) {
            loop {
                items.push(self.parse_expr()?);
                if self.check(&TokenType::Comma) {
                    self.pop()?;
                } else {
                    break;
                }
            }
        }
        self.pop_expect(TokenType::RBrace)?;
        Ok(items)
    }

    // ---- expressions --------------------------------------------------------

    pub fn parse_expr(&mut self) -> Result<Expr, Error>
    {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, Error>
    {
        let (start_line, start_col) = self.next_pos();
        let mut lhs = self.parse_and()?;
        while self.check(&TokenType::OrOr) {
            self.pop()?;
            let rhs = self.parse_and()?;
            lhs = Expr::new(
                ExprKind::Binary { op: BinOp::Or, lhs: Box::new(lhs), rhs: Box::new(rhs) },
                self.span_from(start_line, start_col)
            );
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, Error>
    {
        let (start_line, start_col) = self.next_pos();
        let mut lhs = self.parse_equality()?;
        while self.check(&TokenType::AndAnd) {
            self.pop()?;
            let rhs = self.parse_equality()?;
            lhs = Expr::new(
                ExprKind::Binary { op: BinOp::And, lhs: Box::new(lhs), rhs: Box::new(rhs) },
                self.span_from(start_line, start_col)
            );
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<Expr, Error>
    {
        let (start_line, start_col) = self.next_pos();
        let mut lhs = self.parse_relational()?;
        loop {
            let op = match self.peek() {
                Some(Token::Eq) => BinOp::Eq,
                Some(Token::Neq) => BinOp::Neq,
                _ => break
            };
            self.pop()?;
            let rhs = self.parse_relational()?;
            lhs = Expr::new(ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }, self.span_from(start_line, start_col));
        }
        Ok(lhs)
    }

    fn parse_relational(&mut self) -> Result<Expr, Error>
    {
        let (start_line, start_col) = self.next_pos();
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => BinOp::Lt,
                Some(Token::Gt) => BinOp::Gt,
                Some(Token::Le) => BinOp::Le,
                Some(Token::Ge) => BinOp::Ge,
                _ => break
            };
            self.pop()?;
            let rhs = self.parse_additive()?;
            lhs = Expr::new(ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }, self.span_from(start_line, start_col));
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> Result<Expr, Error>
    {
        let (start_line, start_col) = self.next_pos();
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break
            };
            self.pop()?;
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::new(ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }, self.span_from(start_line, start_col));
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, Error>
    {
        let (start_line, start_col) = self.next_pos();
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::Percent) => BinOp::Mod,
                Some(Token::Caret) => BinOp::Exp,
                _ => break
            };
            self.pop()?;
            let rhs = self.parse_unary()?;
            lhs = Expr::new(ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }, self.span_from(start_line, start_col));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, Error>
    {
        let (start_line, start_col) = self.next_pos();
        match self.peek() {
            Some(Token::Minus) => {
                self.pop()?;
                let expr = self.parse_unary()?;
                Ok(Expr::new(ExprKind::Unary { op: UnOp::Neg, expr: Box::new(expr) }, self.span_from(start_line, start_col)))
            },
            Some(Token::Bang) => {
                self.pop()?;
                let expr = self.parse_unary()?;
                Ok(Expr::new(ExprKind::Unary { op: UnOp::Not, expr: Box::new(expr) }, self.span_from(start_line, start_col)))
            },
            Some(Token::Pipe) => {
                self.pop()?;
                let expr = self.parse_expr()?;
                self.pop_expect(TokenType::Pipe)?;
                Ok(Expr::new(ExprKind::Unary { op: UnOp::Abs, expr: Box::new(expr) }, self.span_from(start_line, start_col)))
            },
            _ => self.parse_postfix()
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr, Error>
    {
        let (start_line, start_col) = self.next_pos();
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek() {
                Some(Token::Dot) => {
                    self.pop()?;
                    let name = self.pop_identifier()?;
                    expr = Expr::new(ExprKind::Dot { owner: Box::new(expr), name }, self.span_from(start_line, start_col));
                },
                Some(Token::LBracket) => {
                    self.pop()?;
                    let index = self.parse_expr()?;
                    self.pop_expect(TokenType::RBracket)?;
                    expr = Expr::new(ExprKind::Index { owner: Box::new(expr), index: Box::new(index) }, self.span_from(start_line, start_col));
                },
                _ => break
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, Error>
    {
        let (line, col) = self.next_pos();
        let token = self.pop()?;
        let expr = match token {
            Token::Bool(b) => Expr::new(ExprKind::Bool(b), self.span_from(line, col)),
            Token::Int(i) => Expr::new(ExprKind::Int(i), self.span_from(line, col)),
            Token::Float(f) => Expr::new(ExprKind::Float(f), self.span_from(line, col)),
            Token::Str(s) => Expr::new(ExprKind::Str(s), self.span_from(line, col)),
            Token::Identifier(name) if name == "null" => Expr::new(ExprKind::Null, self.span_from(line, col)),
            Token::Identifier(name) => {
                if self.check(&TokenType::LParen) {
                    self.pop()?;
                    let mut args = Vec::new();
                    if !self.check(&TokenType::RParen) {
                        loop {
                            args.push(self.parse_expr()?);
                            if self.check(&TokenType::Comma) {
                                self.pop()?;
                            } else {
                                break;
                            }
                        }
                    }
                    self.pop_expect(TokenType::RParen)?;
                    Expr::new(ExprKind::Call { name, args }, self.span_from(line, col))
                } else {
                    Expr::new(ExprKind::Ident(name), self.span_from(line, col))
                }
            },
            Token::LParen => {
                let inner = self.parse_expr()?;
                self.pop_expect(TokenType::RParen)?;
                Expr::new(inner.kind, self.span_from(line, col)).parenthesize()
            },
            Token::LBracket => {
                let mut items = Vec::new();
                if !self.check(&TokenType::RBracket) {
                    loop {
                        items.push(self.parse_expr()?);
                        if self.check(&TokenType::Comma) {
                            self.pop()?;
                        } else {
                            break;
                        }
                    }
                }
                self.pop_expect(TokenType::RBracket)?;
                Expr::new(ExprKind::Bracket(items), self.span_from(line, col))
            },
            Token::LBrace => {
                let mut items = Vec::new();
                if !self.check(&TokenType::RBrace) {
                    loop {
                        items.push(self.parse_expr()?);
                        if self.check(&TokenType::Comma) {
                            self.pop()?;
                        } else {
                            break;
                        }
                    }
                }
                self.pop_expect(TokenType::RBrace)?;
                Expr::new(ExprKind::Brace(items), self.span_from(line, col))
            },
            other => return Err(Error::new(line, col, Type::UnexpectedToken { actual: other, expected: TokenType::Identifier }))
        };
        Ok(expr)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::lexer::Lexer;

    fn parse(src: &str) -> Program
    {
        let mut lexer = Lexer::new();
        lexer.process(src).unwrap();
        let mut parser = Parser::new(lexer.into_tokens());
        parser.parse_program().unwrap()
    }

    #[test]
    fn parses_hello_program()
    {
        let p = parse(r#"func init(){ print("hi"); } func loop(){}"#);
        assert!(p.functions.contains_key("init"));
        assert!(p.functions.contains_key("loop"));
    }

    #[test]
    fn parses_globals_and_decl_coercion_shape()
    {
        let p = parse("float x = 3; int y = 3; func init(){} func loop(){}");
        assert_eq!(p.globals.len(), 2);
    }

    #[test]
    fn parses_buffer_upload_and_draw()
    {
        let p = parse(
            r#"
            buffer b;
            func init(){
                upload b.pos <- {[-1.0,-1.0,0.0], [1.0,-1.0,0.0], [0.0,1.0,0.0]};
            }
            func loop(){
                clear [0,0,0];
                draw b;
            }
            "#
        );
        assert!(p.functions.contains_key("loop"));
    }

    #[test]
    fn parses_shader_pair_with_inline_layout_and_uniform()
    {
        let p = parse(
            r#"
            layout Vertex {
                vec3 pos;
            }
            vertex myVertex {
                input input Vertex;
                func main() { FinalPosition = vec4(pos, 1.0); }
            }
            fragment myVertex {
                uniform vec3 color;
                output vec3 fragColor;
                func main() { fragColor = color; }
            }
            func init(){}
            func loop(){}
            "#
        );
        let pair = p.shaders.get("myVertex").unwrap();
        assert!(pair.vertex.is_some());
        assert!(pair.fragment.is_some());
        assert_eq!(pair.fragment.as_ref().unwrap().uniforms.len(), 1);
    }

    #[test]
    fn parses_for_range_and_for_in()
    {
        let p = parse(
            r#"
            func init(){
                for i = 0 to 10 by 2 { print(i); }
                list l = [1, 2, 3];
                for x in l { print(x); }
            }
            func loop(){}
            "#
        );
        assert!(p.functions.contains_key("init"));
    }

    #[test]
    fn parses_compound_assign_and_use()
    {
        let p = parse(
            r#"
            func init(){
                list l = [1];
                l += 2;
                use myProgram;
            }
            func loop(){}
            "#
        );
        assert!(p.functions.contains_key("init"));
    }

    #[test]
    fn rejects_garbage_top_level()
    {
        let mut lexer = Lexer::new();
        lexer.process("} garbage").unwrap();
        let mut parser = Parser::new(lexer.into_tokens());
        assert!(parser.parse_program().is_err());
    }
}
