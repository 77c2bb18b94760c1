use crate::expression::expression::ParseExpressionError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    position: usize
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Token {
        Token { kind, position }
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Byte offset of the token in the source text.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Splits `text` into tokens. `**` is read as `^`.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseExpressionError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let start = pos;
        let kind = match c {
            b'+' => { pos += 1; TokenKind::Plus },
            b'-' => { pos += 1; TokenKind::Minus },
            b'/' => { pos += 1; TokenKind::Slash },
            b'^' => { pos += 1; TokenKind::Caret },
            b'(' => { pos += 1; TokenKind::LeftParen },
            b')' => { pos += 1; TokenKind::RightParen },
            b'*' => {
                if bytes.get(pos + 1) == Some(&b'*') {
                    pos += 2;
                    TokenKind::Caret
                } else {
                    pos += 1;
                    TokenKind::Star
                }
            },
            b'0'..=b'9' | b'.' => {
                pos = scan_number(bytes, pos);
                let literal = &text[start..pos];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ParseExpressionError::InvalidNumber {
                        literal: literal.to_owned(),
                        position: start
                    })?;
                TokenKind::Number(value)
            },
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                    pos += 1;
                }
                TokenKind::Identifier(text[start..pos].to_owned())
            },
            _ => {
                let character = text[start..].chars().next().unwrap_or('?');
                return Err(ParseExpressionError::UnexpectedCharacter { character, position: start });
            }
        };
        tokens.push(Token::new(kind, start));
    }

    Ok(tokens)
}

fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
        pos += 1;
    }
    // exponent part only if digits follow, so `2e` stays `2` times the constant e
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut look = pos + 1;
        if look < bytes.len() && (bytes[look] == b'+' || bytes[look] == b'-') {
            look += 1;
        }
        if look < bytes.len() && bytes[look].is_ascii_digit() {
            pos = look;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn double_star_is_power() {
        assert_eq!(
            kinds("x**2"),
            vec![TokenKind::Identifier("x".into()), TokenKind::Caret, TokenKind::Number(2.0)]
        );
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(kinds("1.5e-3"), vec![TokenKind::Number(1.5e-3)]);
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Number(2.0), TokenKind::Identifier("e".into())]
        );
    }

    #[test]
    fn rejects_unknown_character() {
        let err = tokenize("x $ 2").unwrap_err();
        assert_eq!(err, ParseExpressionError::UnexpectedCharacter { character: '$', position: 2 });
    }

    #[test]
    fn rejects_malformed_number() {
        assert!(matches!(
            tokenize("1.2.3"),
            Err(ParseExpressionError::InvalidNumber { position: 0, .. })
        ));
    }
}
