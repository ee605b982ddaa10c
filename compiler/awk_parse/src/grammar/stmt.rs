//! Statements.

use awk_ir::{Action, ActionList, Expr, ListKind, Redirect, RedirectKind, TokenKind};
use awk_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `{ statements }`
    pub(crate) fn parse_block(&mut self, kind: ListKind) -> Result<ActionList, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut list = ActionList::new(kind);
        loop {
            self.cursor.skip_terminators();
            if self.cursor.eat(&TokenKind::RBrace) {
                return Ok(list);
            }
            if self.cursor.is_at_end() {
                return Err(self.error_expected("`}`"));
            }
            list.push(self.parse_statement()?);
        }
    }

    /// Body of `if`, `else` or a loop: a block, a single statement, or `;`.
    fn parse_body(&mut self, kind: ListKind) -> Result<ActionList, ParseError> {
        self.cursor.skip_newlines();
        if self.check(&TokenKind::LBrace) {
            return self.parse_block(kind);
        }
        if self.cursor.eat(&TokenKind::Semicolon) {
            return Ok(ActionList::new(kind));
        }
        let action = self.parse_statement()?;
        Ok(ActionList::with_actions(kind, vec![action]))
    }

    fn parse_statement(&mut self) -> Result<Action, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Action, ParseError> {
        let action = match self.current_kind() {
            TokenKind::LBrace => return Ok(Action::Block(self.parse_block(ListKind::Simple)?)),
            TokenKind::If => return self.parse_if(),
            TokenKind::While => return self.parse_while(),
            TokenKind::For => return self.parse_for(),
            TokenKind::Do => self.parse_do()?,
            TokenKind::Break => {
                self.advance();
                Action::Break
            }
            TokenKind::Continue => {
                self.advance();
                Action::Continue
            }
            TokenKind::Next => {
                self.advance();
                Action::Next
            }
            TokenKind::Exit => {
                self.advance();
                Action::Exit(self.parse_optional_expr()?)
            }
            TokenKind::Return => {
                self.advance();
                Action::Return(self.parse_optional_expr()?)
            }
            TokenKind::Delete => self.parse_delete()?,
            TokenKind::Print => self.parse_print(false)?,
            TokenKind::Printf => self.parse_print(true)?,
            _ => Action::Expr(self.parse_expr()?),
        };
        if self.at_statement_end() {
            Ok(action)
        } else {
            Err(self.error_unexpected())
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Semicolon | TokenKind::Newline | TokenKind::RBrace | TokenKind::Eof
        )
    }

    fn parse_optional_expr(&mut self) -> Result<Option<Expr>, ParseError> {
        if self.at_statement_end() {
            Ok(None)
        } else {
            self.parse_expr().map(Some)
        }
    }

    /// `( expr )` as used by `if`, `while` and `do`.
    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let cond = self.with_gt_allowed(|p| {
            p.cursor.skip_newlines();
            let cond = p.parse_expr()?;
            p.cursor.skip_newlines();
            Ok::<_, ParseError>(cond)
        })?;
        self.expect(&TokenKind::RParen)?;
        Ok(cond)
    }

    fn parse_if(&mut self) -> Result<Action, ParseError> {
        self.advance();
        let cond = self.parse_condition()?;
        let then = self.parse_body(ListKind::Simple)?;

        let snapshot = self.cursor.position();
        self.cursor.skip_terminators();
        let otherwise = if self.cursor.eat(&TokenKind::Else) {
            Some(self.parse_body(ListKind::Simple)?)
        } else {
            self.cursor.set_position(snapshot);
            None
        };
        Ok(Action::If {
            cond,
            then,
            otherwise,
        })
    }

    fn parse_while(&mut self) -> Result<Action, ParseError> {
        self.advance();
        let cond = self.parse_condition()?;
        let body = self.parse_body(ListKind::Iteration)?;
        Ok(Action::While { cond, body })
    }

    fn parse_do(&mut self) -> Result<Action, ParseError> {
        self.advance();
        let body = self.parse_body(ListKind::Iteration)?;
        self.cursor.skip_terminators();
        self.expect(&TokenKind::While)?;
        let cond = self.parse_condition()?;
        Ok(Action::DoWhile { body, cond })
    }

    fn parse_for(&mut self) -> Result<Action, ParseError> {
        self.advance();
        self.expect(&TokenKind::LParen)?;

        if let (TokenKind::Ident(var), TokenKind::In, TokenKind::Ident(array), TokenKind::RParen) = (
            self.current_kind(),
            self.cursor.peek_kind(1),
            self.cursor.peek_kind(2),
            self.cursor.peek_kind(3),
        ) {
            for _ in 0..4 {
                self.advance();
            }
            let body = self.parse_body(ListKind::Iteration)?;
            return Ok(Action::ForIn {
                var: var.clone(),
                array: array.clone(),
                body,
            });
        }

        let (init, cond, step) = self.with_gt_allowed(|p| {
            let init = p.parse_for_clause(&TokenKind::Semicolon)?;
            p.expect(&TokenKind::Semicolon)?;
            p.cursor.skip_newlines();
            let cond = p.parse_for_clause(&TokenKind::Semicolon)?;
            p.expect(&TokenKind::Semicolon)?;
            p.cursor.skip_newlines();
            let step = p.parse_for_clause(&TokenKind::RParen)?;
            Ok::<_, ParseError>((init, cond, step))
        })?;
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_body(ListKind::Iteration)?;
        Ok(Action::For {
            init,
            cond,
            step,
            body,
        })
    }

    fn parse_for_clause(&mut self, terminator: &TokenKind) -> Result<Option<Expr>, ParseError> {
        if self.check(terminator) {
            Ok(None)
        } else {
            self.parse_expr().map(Some)
        }
    }

    fn parse_delete(&mut self) -> Result<Action, ParseError> {
        self.advance();
        let TokenKind::Ident(array) = self.current_kind() else {
            return Err(self.error_expected("array name"));
        };
        self.advance();
        let subscript = if self.cursor.eat(&TokenKind::LBracket) {
            let subscript = self.parse_expr_list(&TokenKind::RBracket)?;
            self.expect(&TokenKind::RBracket)?;
            Some(subscript)
        } else {
            None
        };
        Ok(Action::Delete {
            array: array.clone(),
            subscript,
        })
    }

    fn parse_print(&mut self, formatted: bool) -> Result<Action, ParseError> {
        let keyword_span = self.current_span();
        self.advance();
        let saved = std::mem::replace(&mut self.no_gt, true);
        let result = self.parse_print_rest();
        self.no_gt = saved;
        let (args, output) = result?;

        if formatted {
            if args.is_empty() {
                return Err(ParseError::new("printf: no format", keyword_span));
            }
            Ok(Action::Printf { args, output })
        } else {
            Ok(Action::Print { args, output })
        }
    }

    fn parse_print_rest(&mut self) -> Result<(Vec<Expr>, Option<Redirect>), ParseError> {
        let args = if self.at_print_end() {
            Vec::new()
        } else if self.check(&TokenKind::LParen) {
            // `print (a, b) > f` groups the list; `print (a) b` does not.
            match self.attempt(|p| {
                p.advance();
                let list = p.with_gt_allowed(|p| p.parse_expr_list(&TokenKind::RParen))?;
                p.expect(&TokenKind::RParen)?;
                if p.at_print_end() {
                    Ok(list)
                } else {
                    Err(p.error_unexpected())
                }
            }) {
                Some(list) => list,
                None => self.parse_expr_list(&TokenKind::Semicolon)?,
            }
        } else {
            self.parse_expr_list(&TokenKind::Semicolon)?
        };

        let kind = match self.current_kind() {
            TokenKind::Greater => RedirectKind::Write,
            TokenKind::Append => RedirectKind::Append,
            TokenKind::Pipe => RedirectKind::Pipe,
            _ => return Ok((args, None)),
        };
        self.advance();
        let target = self.parse_concat_expr()?;
        Ok((args, Some(Redirect { kind, target })))
    }

    fn at_print_end(&self) -> bool {
        self.at_statement_end()
            || matches!(
                self.current_kind(),
                TokenKind::Greater | TokenKind::Append | TokenKind::Pipe
            )
    }
}
