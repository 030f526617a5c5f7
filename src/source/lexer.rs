/// Structural token of raw JSON text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Colon,
    Comma,
    /// Complete string literal. `start` is the opening quote, `end` is one past the
    /// closing quote.
    Str { start: usize, end: usize },
}

impl Token {
    /// Raw (still escaped) content of a string token.
    pub(crate) fn str_content(self, text: &str) -> Option<&str> {
        match self {
            Self::Str { start, end } => text.get(start + 1..end - 1),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LexState {
    Normal,
    InString { start: usize },
    Escaped { start: usize },
}

/// Tokenizer that only cares about JSON structure.
///
/// Numbers, literals, and whitespace are skipped. Braces and brackets inside strings never
/// surface as tokens, escaped quotes included. An unterminated string ends the stream, so
/// iteration always terminates on truncated input. Works on bytes: every structural
/// character is ASCII and never appears inside a multi-byte UTF-8 sequence.
#[derive(Clone, Debug)]
pub(crate) struct Lexer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Lex `text` starting at byte `pos`, which must not be inside a string.
    pub(crate) fn new(text: &'a str, pos: usize) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = (usize, Token);

    fn next(&mut self) -> Option<Self::Item> {
        let mut state = LexState::Normal;

        while self.pos < self.bytes.len() {
            let at = self.pos;
            let b = self.bytes[at];
            self.pos += 1;

            state = match state {
                LexState::Normal => match b {
                    b'{' => return Some((at, Token::OpenBrace)),
                    b'}' => return Some((at, Token::CloseBrace)),
                    b'[' => return Some((at, Token::OpenBracket)),
                    b']' => return Some((at, Token::CloseBracket)),
                    b':' => return Some((at, Token::Colon)),
                    b',' => return Some((at, Token::Comma)),
                    b'"' => LexState::InString { start: at },
                    _ => LexState::Normal,
                },
                LexState::InString { start } => match b {
                    b'\\' => LexState::Escaped { start },
                    b'"' => return Some((start, Token::Str { start, end: at + 1 })),
                    _ => state,
                },
                LexState::Escaped { start } => LexState::InString { start },
            };
        }

        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/lexer.rs"]
mod tests;
