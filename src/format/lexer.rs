//! Tokenizer for dbspicfg export text.
//!
//! This is the only place that knows about whitespace and comments. Every
//! token it hands out is either the body of a double-quoted string or a
//! maximal run of non-whitespace characters.

/// How a token was written in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A bare run of non-whitespace characters.
    Word,
    /// The contents of a `"..."` string, quotes stripped.
    Quoted,
}

/// A single token borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the token's first character (the opening quote for
    /// quoted strings).
    pub offset: usize,
}

/// Pull-based lexer over a configuration blob.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self { input, pos: 0 };
        lexer.skip_trivia();
        lexer
    }

    /// True once only whitespace and comments remain.
    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Return the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.skip_trivia();
        if self.at_end() {
            return None;
        }

        let start = self.pos;
        let rest = &self.input[start..];

        let token = match quoted_body(rest) {
            Some(body) => {
                // Opening quote, body, closing quote.
                self.pos += body.len() + 2;
                Token {
                    kind: TokenKind::Quoted,
                    text: body,
                    offset: start,
                }
            }
            None => {
                let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
                self.pos += len;
                Token {
                    kind: TokenKind::Word,
                    text: &rest[..len],
                    offset: start,
                }
            }
        };

        self.skip_trivia();
        Some(token)
    }

    /// Skip whitespace, blank lines and `#` comments.
    fn skip_trivia(&mut self) {
        loop {
            let rest = &self.input[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if !trimmed.starts_with('#') {
                break;
            }
            match trimmed.find('\n') {
                Some(newline) => self.pos += newline + 1,
                None => self.pos = self.input.len(),
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Body of a quoted string at the start of `rest`, if it closes on the same line.
fn quoted_body(rest: &str) -> Option<&str> {
    let body = rest.strip_prefix('"')?;
    let line_end = body.find('\n').unwrap_or(body.len());
    let close = body[..line_end].find('"')?;
    Some(&body[..close])
}

/// Collect all tokens of `input`.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}
