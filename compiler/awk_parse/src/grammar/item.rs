//! Program items: pattern-actions and function definitions.

use awk_ir::{
    Action, ActionList, FunctionDef, ListKind, Name, Pattern, PatternAction, Program, TokenKind,
};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse the whole token stream.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();
        loop {
            self.cursor.skip_terminators();
            if self.cursor.is_at_end() {
                break;
            }
            if self.check(&TokenKind::Function) {
                let function = self.parse_function()?;
                if program.functions.contains_key(&function.name) {
                    return Err(ParseError::new(
                        format!("function `{}` redefined", function.name),
                        function.span,
                    ));
                }
                program.functions.insert(function.name.clone(), function);
            } else {
                program.items.push(self.parse_item()?);
            }
        }
        program.ranges = self.ranges;
        Ok(program)
    }

    fn parse_function(&mut self) -> Result<FunctionDef, ParseError> {
        let start = self.current_span();
        self.advance();
        let name = match self.current_kind() {
            TokenKind::Ident(name) | TokenKind::FuncName(name) => name.clone(),
            _ => return Err(self.error_expected("function name")),
        };
        self.advance();
        self.expect(&TokenKind::LParen)?;
        let mut params: Vec<Name> = Vec::new();
        self.cursor.skip_newlines();
        while let TokenKind::Ident(param) = self.current_kind() {
            if params.contains(param) {
                return Err(ParseError::new(
                    format!("duplicate parameter `{param}`"),
                    self.current_span(),
                ));
            }
            params.push(param.clone());
            self.advance();
            self.cursor.skip_newlines();
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
            self.cursor.skip_newlines();
        }
        self.expect(&TokenKind::RParen)?;
        self.cursor.skip_newlines();
        let body = self.parse_block(ListKind::Routine)?;
        Ok(FunctionDef {
            name,
            params,
            body,
            span: start.merge(self.current_span()),
        })
    }

    fn parse_item(&mut self) -> Result<PatternAction, ParseError> {
        let pattern = match self.current_kind() {
            TokenKind::Begin => {
                self.advance();
                Pattern::Begin
            }
            TokenKind::End => {
                self.advance();
                Pattern::End
            }
            TokenKind::LBrace => Pattern::All,
            _ => {
                let start = self.parse_pattern()?;
                if self.cursor.eat(&TokenKind::Comma) {
                    self.cursor.skip_newlines();
                    let end = self.parse_pattern()?;
                    let id = self.ranges;
                    self.ranges += 1;
                    Pattern::Range {
                        id,
                        start: Box::new(start),
                        end: Box::new(end),
                    }
                } else {
                    start
                }
            }
        };

        let actions = if self.check(&TokenKind::LBrace) {
            self.parse_block(ListKind::Program)?
        } else if matches!(pattern, Pattern::Begin | Pattern::End) {
            return Err(self.error_expected("`{`"));
        } else {
            // A bare pattern prints matching records.
            ActionList::with_actions(
                ListKind::Program,
                vec![Action::Print {
                    args: Vec::new(),
                    output: None,
                }],
            )
        };
        Ok(PatternAction { pattern, actions })
    }

    /// A pattern: `&&`/`||`/`!` over regex literals and expressions.
    ///
    /// Anything that does not fit that shape (a ternary or assignment at
    /// the top) is reparsed as one expression.
    fn parse_pattern(&mut self) -> Result<Pattern, ParseError> {
        if let Some(pattern) = self.attempt(|p| {
            let pattern = p.parse_pattern_or()?;
            if p.at_pattern_end() {
                Ok(pattern)
            } else {
                Err(p.error_unexpected())
            }
        }) {
            return Ok(pattern);
        }
        let expr = self.parse_expr()?;
        Ok(Pattern::Expr(expr))
    }

    fn at_pattern_end(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::LBrace
                | TokenKind::Comma
                | TokenKind::Newline
                | TokenKind::Semicolon
                | TokenKind::Eof
        )
    }

    fn parse_pattern_or(&mut self) -> Result<Pattern, ParseError> {
        let mut left = self.parse_pattern_and()?;
        while self.cursor.eat(&TokenKind::OrOr) {
            self.cursor.skip_newlines();
            let right = self.parse_pattern_and()?;
            left = Pattern::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_pattern_and(&mut self) -> Result<Pattern, ParseError> {
        let mut left = self.parse_pattern_leaf()?;
        while self.cursor.eat(&TokenKind::AndAnd) {
            self.cursor.skip_newlines();
            let right = self.parse_pattern_leaf()?;
            left = Pattern::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_pattern_leaf(&mut self) -> Result<Pattern, ParseError> {
        // `!/re/` on its own negates the match; `!x == y` stays an expression.
        if self.check(&TokenKind::Bang)
            && matches!(self.cursor.peek_kind(1), TokenKind::Regex(_))
            && matches!(
                self.cursor.peek_kind(2),
                TokenKind::AndAnd
                    | TokenKind::OrOr
                    | TokenKind::LBrace
                    | TokenKind::Comma
                    | TokenKind::Newline
                    | TokenKind::Semicolon
                    | TokenKind::Eof
            )
        {
            self.advance();
            let inner = self.parse_pattern_leaf()?;
            return Ok(Pattern::Not(Box::new(inner)));
        }
        let expr = self.parse_operand_expr()?;
        Ok(match expr.as_regex() {
            Some(pattern) => Pattern::Regex(pattern.to_string()),
            None => Pattern::Expr(expr),
        })
    }
}
