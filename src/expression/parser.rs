use crate::expression::expression::{
    BinaryOperator,
    Expr,
    Function,
    ParseExpressionError
};
use crate::expression::token::{
    Token,
    TokenKind
};

// Grammar, lowest precedence first:
//
//   expr    := term (('+' | '-') term)*
//   term    := unary (('*' | '/') unary)*
//   unary   := ('+' | '-') unary | power
//   power   := primary ('^' unary)?
//   primary := number | 'x' | constant | function '(' expr ')' | '(' expr ')'
//
// `power` takes a `unary` on its right so `x^-1` parses, while a leading
// minus binds looser than `^`: `-x^2` is `-(x^2)`.

pub struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    source_len: usize
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], source_len: usize) -> Parser<'a> {
        Parser { tokens, cursor: 0, source_len }
    }

    pub fn parse(mut self) -> Result<Expr, ParseExpressionError> {
        if self.tokens.is_empty() {
            return Err(ParseExpressionError::Empty);
        }
        let expr = self.expr()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) if *token.kind() == TokenKind::RightParen => {
                Err(ParseExpressionError::UnbalancedParenthesis { position: token.position() })
            },
            Some(token) => Err(ParseExpressionError::UnexpectedToken { position: token.position() })
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.cursor);
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        match self.peek() {
            Some(token) if token.kind() == kind => {
                self.cursor += 1;
                true
            },
            _ => false
        }
    }

    fn expr(&mut self) -> Result<Expr, ParseExpressionError> {
        let mut lhs = self.term()?;
        loop {
            let op = if self.eat(&TokenKind::Plus) {
                BinaryOperator::Add
            } else if self.eat(&TokenKind::Minus) {
                BinaryOperator::Sub
            } else {
                return Ok(lhs);
            };
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, ParseExpressionError> {
        let mut lhs = self.unary()?;
        loop {
            let op = if self.eat(&TokenKind::Star) {
                BinaryOperator::Mul
            } else if self.eat(&TokenKind::Slash) {
                BinaryOperator::Div
            } else {
                return Ok(lhs);
            };
            let rhs = self.unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, ParseExpressionError> {
        if self.eat(&TokenKind::Minus) {
            let operand = self.unary()?;
            return Ok(Expr::Negate(Box::new(operand)));
        }
        if self.eat(&TokenKind::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, ParseExpressionError> {
        let base = self.primary()?;
        if self.eat(&TokenKind::Caret) {
            let exponent = self.unary()?;
            return Ok(Expr::binary(BinaryOperator::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, ParseExpressionError> {
        let token = self.next().ok_or(ParseExpressionError::UnexpectedEnd)?;
        match token.kind() {
            TokenKind::Number(value) => Ok(Expr::Constant(*value)),
            TokenKind::LeftParen => {
                let inner = self.expr()?;
                self.close_paren(token.position())?;
                Ok(inner)
            },
            TokenKind::Identifier(name) => self.identifier(name, token.position()),
            TokenKind::RightParen => {
                Err(ParseExpressionError::UnbalancedParenthesis { position: token.position() })
            },
            _ => Err(ParseExpressionError::UnexpectedToken { position: token.position() })
        }
    }

    fn identifier(&mut self, name: &str, position: usize) -> Result<Expr, ParseExpressionError> {
        match name {
            "x" => return Ok(Expr::Variable),
            "pi" => return Ok(Expr::Constant(std::f64::consts::PI)),
            "e" => return Ok(Expr::Constant(std::f64::consts::E)),
            _ => {}
        }

        let function = Function::from_name(name).ok_or_else(|| ParseExpressionError::UnknownIdentifier {
            name: name.to_owned(),
            position
        })?;

        let open = self.peek().map(|t| t.position()).unwrap_or(self.source_len);
        if !self.eat(&TokenKind::LeftParen) {
            return Err(ParseExpressionError::ExpectedArgument { function: name.to_owned(), position: open });
        }
        let argument = self.expr()?;
        self.close_paren(open)?;
        Ok(Expr::Call(function, Box::new(argument)))
    }

    fn close_paren(&mut self, open_position: usize) -> Result<(), ParseExpressionError> {
        if self.eat(&TokenKind::RightParen) {
            Ok(())
        } else {
            Err(ParseExpressionError::UnbalancedParenthesis { position: open_position })
        }
    }
}
