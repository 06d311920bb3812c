//! Whitespace-delimited field reader shared by the record grammars.

use std::iter::Peekable;

use crate::error::{LexError, Result};
use crate::types::RecordKind;

type Tokens<'a> = Box<dyn Iterator<Item = &'a str> + 'a>;

/// Left-to-right tokenizer over one record line.
///
/// Empty tokens produced by runs of the delimiter are skipped. Numeric accessors
/// reject signs; every value in these grammars is non-negative.
pub struct FieldReader<'a> {
    line: &'a str,
    record: RecordKind,
    tokens: Peekable<Tokens<'a>>,
    position: usize,
}

impl<'a> FieldReader<'a> {
    /// Splits on plain spaces (synset and index lines).
    pub fn spaced(line: &'a str, record: RecordKind) -> Self {
        let tokens: Tokens<'a> = Box::new(line.split(' ').filter(|t| !t.is_empty()));
        Self::with_tokens(line, record, tokens)
    }

    /// Splits on any whitespace (exception lines).
    pub fn whitespace(line: &'a str, record: RecordKind) -> Self {
        let tokens: Tokens<'a> = Box::new(line.split_whitespace());
        Self::with_tokens(line, record, tokens)
    }

    fn with_tokens(line: &'a str, record: RecordKind, tokens: Tokens<'a>) -> Self {
        Self {
            line,
            record,
            tokens: tokens.peekable(),
            position: 0,
        }
    }

    /// Whether another token is available.
    pub fn has_more(&mut self) -> bool {
        self.tokens.peek().is_some()
    }

    /// Next raw token.
    pub fn next_token(&mut self, field: &'static str) -> Result<&'a str> {
        match self.tokens.next() {
            Some(token) => {
                self.position += 1;
                Ok(token)
            }
            None => Err(self.malformed_at(self.position, field, "unexpected end of line")),
        }
    }

    /// Next token as a decimal `u32`.
    pub fn next_int(&mut self, field: &'static str) -> Result<u32> {
        let value = self.next_radix(field, 10)?;
        u32::try_from(value)
            .map_err(|_| self.malformed_at(self.position - 1, field, "value exceeds 32 bits"))
    }

    /// Next token as a decimal `u64`.
    pub fn next_long(&mut self, field: &'static str) -> Result<u64> {
        self.next_radix(field, 10)
    }

    /// Next token as a hexadecimal `u32`.
    pub fn next_hex(&mut self, field: &'static str) -> Result<u32> {
        let value = self.next_radix(field, 16)?;
        u32::try_from(value)
            .map_err(|_| self.malformed_at(self.position - 1, field, "value exceeds 32 bits"))
    }

    fn next_radix(&mut self, field: &'static str, radix: u32) -> Result<u64> {
        let token = self.next_token(field)?;
        if token.starts_with('+') {
            return Err(self.malformed_at(self.position - 1, field, "signed value"));
        }
        u64::from_str_radix(token, radix).map_err(|err| {
            self.malformed_at(
                self.position - 1,
                field,
                format!("{token:?} is not a base-{radix} integer: {err}"),
            )
        })
    }

    /// Builds a `MalformedRecord` pointing at the last consumed token.
    pub fn malformed(&self, field: &'static str, reason: impl Into<String>) -> LexError {
        self.malformed_at(self.position.saturating_sub(1), field, reason)
    }

    fn malformed_at(&self, position: usize, field: &'static str, reason: impl Into<String>) -> LexError {
        LexError::malformed(self.record, field, position, reason, self.line)
    }

    /// `UnknownPartOfSpeech` for the last consumed token.
    pub fn unknown_pos(&self, token: &str) -> LexError {
        LexError::UnknownPartOfSpeech {
            token: token.to_string(),
            position: self.position.saturating_sub(1),
            line: self.line.to_string(),
        }
    }

    /// `UnknownRelationKind` for the last consumed token.
    pub fn unknown_relation(&self, token: &str) -> LexError {
        LexError::UnknownRelationKind {
            token: token.to_string(),
            position: self.position.saturating_sub(1),
            line: self.line.to_string(),
        }
    }
}
