use crate::constants::{SQL_DOWN_DIRECTIVE, SQL_UP_DIRECTIVE};
use crate::error::{MigrationError, Result};
use std::path::Path;

/// Raw directive values read from a migration file.
///
/// `None` means the directive was never bound; `Some("")` means it was bound
/// to an empty string. Emptiness is judged by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    pub sql_up: Option<String>,
    pub sql_down: Option<String>,
}

/// Parse the `NAME = "..."` bindings of a migration file.
///
/// Only string literals are accepted as values (`"..."`, `'...'` and their
/// triple-quoted multi-line forms, optionally prefixed with `u` or `r`), plus
/// a bare `None` for a declared but empty body. Escapes `\n`, `\t`, `\r`,
/// `\0`, `\xHH`, `\uXXXX`, `\UXXXXXXXX`, quotes and backslash are decoded;
/// any other escape is kept as written.
/// Comment lines start with `#`. Bindings other than `SQL_UP` and `SQL_DOWN`
/// are parsed and then dropped.
pub fn parse_directives(path: &Path, content: &str) -> Result<Directives> {
    let normalized = content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .replace("\r\n", "\n");

    let mut parser = Parser::new(path, &normalized);
    let mut directives = Directives::default();

    while let Some((name, value, line)) = parser.next_binding()? {
        let slot = match name.as_str() {
            SQL_UP_DIRECTIVE => &mut directives.sql_up,
            SQL_DOWN_DIRECTIVE => &mut directives.sql_down,
            _ => continue,
        };

        if slot.is_some() {
            return Err(parser.error_at(line, format!("'{}' is defined more than once", name)));
        }
        *slot = Some(value);
    }

    Ok(directives)
}

struct Parser<'a> {
    path: &'a Path,
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(path: &'a Path, content: &str) -> Self {
        Self {
            path,
            chars: content.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn error_at(&self, line: usize, reason: impl Into<String>) -> MigrationError {
        MigrationError::MalformedFile {
            path: self.path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
            self.bump();
        }
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    /// Skip blank lines and comments between bindings
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => self.skip_comment(),
                _ => break,
            }
        }
    }

    fn next_binding(&mut self) -> Result<Option<(String, String, usize)>> {
        self.skip_trivia();
        if self.peek().is_none() {
            return Ok(None);
        }

        let line = self.line;
        let name = self.identifier()?;

        self.skip_inline_whitespace();
        if self.peek() != Some('=') {
            return Err(self.error_at(line, format!("expected '=' after '{}'", name)));
        }
        self.bump();
        self.skip_inline_whitespace();

        let value = self.value()?;

        self.skip_inline_whitespace();
        match self.peek() {
            None | Some('\n') => {}
            Some('#') => self.skip_comment(),
            Some(c) => {
                return Err(self.error_at(
                    self.line,
                    format!("unexpected '{}' after the value of '{}'", c, name),
                ));
            }
        }

        Ok(Some((name, value, line)))
    }

    fn identifier(&mut self) -> Result<String> {
        let mut name = String::new();
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            Some(c) => {
                return Err(self.error_at(
                    self.line,
                    format!("expected a binding such as 'SQL_UP = \"...\"', found '{}'", c),
                ));
            }
            None => return Err(self.error_at(self.line, "unexpected end of file")),
        }

        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }

        Ok(name)
    }

    /// A string literal, or a bare `None` which reads as an empty body
    fn value(&mut self) -> Result<String> {
        let is_none = self.chars[self.pos..].starts_with(&['N', 'o', 'n', 'e'])
            && !matches!(self.peek_at(4), Some(c) if c.is_ascii_alphanumeric() || c == '_');
        if is_none {
            self.pos += 4;
            return Ok(String::new());
        }
        self.string_literal()
    }

    fn string_literal(&mut self) -> Result<String> {
        let start_line = self.line;

        let mut raw = false;
        let mut prefix_len = 0;
        while let Some(c) = self.peek() {
            match c {
                'u' | 'U' if prefix_len < 2 => {}
                'r' | 'R' if prefix_len < 2 => raw = true,
                _ => break,
            }
            prefix_len += 1;
            self.bump();
        }

        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.error_at(start_line, "expected a string value")),
        };
        self.bump();

        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.bump();
            self.bump();
        }

        let mut value = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(self.error_at(start_line, "unterminated string"));
            };

            if c == quote {
                if !triple {
                    return Ok(value);
                }
                if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
                    self.bump();
                    self.bump();
                    return Ok(value);
                }
                value.push(c);
                continue;
            }

            if c == '\n' && !triple {
                return Err(self.error_at(start_line, "unterminated string"));
            }

            if c == '\\' {
                let Some(next) = self.bump() else {
                    return Err(self.error_at(start_line, "unterminated string"));
                };
                if raw {
                    value.push('\\');
                    value.push(next);
                    continue;
                }
                match next {
                    '\n' => {}
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '0' => value.push('\0'),
                    '\\' | '\'' | '"' => value.push(next),
                    'x' => value.push(self.hex_escape(2, start_line)?),
                    'u' => value.push(self.hex_escape(4, start_line)?),
                    'U' => value.push(self.hex_escape(8, start_line)?),
                    other => {
                        value.push('\\');
                        value.push(other);
                    }
                }
                continue;
            }

            value.push(c);
        }
    }

    fn hex_escape(&mut self, digits: usize, start_line: usize) -> Result<char> {
        let mut code = 0u32;
        for _ in 0..digits {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error_at(self.line, "truncated hex escape"))?;
            code = code * 16 + digit;
            self.bump();
        }
        char::from_u32(code)
            .ok_or_else(|| self.error_at(start_line, format!("invalid character code {:#x}", code)))
    }
}
