use std::{iter::Peekable, str::Chars};

/// Abstraction over a peekable char iterator with position information.
///
/// The scanner also keeps the source string around so that the unconsumed
/// remainder can be quoted in error messages.
#[derive(Clone)]
pub struct CharScanner<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    byte_position: usize,
}

impl<'a> CharScanner<'a> {
    /// Constructs a new [`CharScanner`] for the given source string,
    /// starting at position `0`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            byte_position: 0,
        }
    }

    /// Tries to advance the scanner by one character.
    /// Returns the character wrapped in an [`Option`] if it was successful,
    /// or [`None`] if the scanner cannot advance any further.
    pub fn try_next(&mut self) -> Option<char> {
        let next = self.chars.next();
        if let Some(ch) = next {
            self.byte_position += ch.len_utf8();
        }
        next
    }

    /// Returns the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Retrieves the byte position of the scanner.
    pub fn position(&self) -> usize {
        self.byte_position
    }

    /// The part of the source that has not been consumed yet.
    pub fn remainder(&self) -> &'a str {
        &self.source[self.byte_position..]
    }

    /// Peeks at the next character, and consumes it if it matches the provided character.
    /// Returns true if the character was consumed, false otherwise.
    pub fn recognise(&mut self, character: char) -> bool {
        match self.chars.peek() {
            Some(ch) if ch == &character => {
                self.try_next();
                true
            }
            _ => false,
        }
    }

    /// Consumes `token` if the remainder starts with it. The scanner is not
    /// advanced otherwise.
    pub fn recognise_str(&mut self, token: &str) -> bool {
        if !self.remainder().starts_with(token) {
            return false;
        }
        for _ in token.chars() {
            self.try_next();
        }
        true
    }

    /// Consumes characters while `P(char)` evaluates to `true`.
    /// Returns a [`String`] containing the consumed characters.
    pub fn consume_while<P>(&mut self, mut predicate: P) -> String
    where
        P: FnMut(&char) -> bool,
    {
        let mut matches = String::new();
        while let Some(ch) = self.chars.peek() {
            if predicate(ch) {
                matches.push(*ch);
                self.try_next();
            } else {
                break;
            }
        }
        matches
    }

    /// Checks if the scanner is finished.
    pub fn is_finished(&mut self) -> bool {
        self.peek().is_none()
    }
}
