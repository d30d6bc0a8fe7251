use crate::error::PathError;

/// A path step as it appears in the source, before its contents are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment {
    /// Dot key text, or the text between the brackets
    pub text: String,
    pub bracketed: bool,
    /// Preceded by `..`
    pub recursive: bool,
}

/// Splits a path string into raw segments, tracking bracket and quote state.
pub struct Lexer<'a> {
    source: &'a str,
    input: Vec<char>,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            input: source.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn error(&self, message: &str) -> PathError {
        PathError::invalid(message, self.source)
    }

    fn remaining(&self) -> usize {
        self.input.len().saturating_sub(self.position)
    }

    /// Scans the whole path. `$`, `$.` and `.` yield no segments.
    pub fn tokenize(mut self) -> Result<Vec<RawSegment>, PathError> {
        if self.input.is_empty() {
            return Err(self.error("empty path"));
        }
        if self.current_char() == Some('$') {
            self.advance();
        }
        if self.remaining() == 0 || (self.remaining() == 1 && self.current_char() == Some('.')) {
            return Ok(Vec::new());
        }

        let mut segments = Vec::new();
        let mut recursive = false;

        while let Some(ch) = self.current_char() {
            match ch {
                '.' => {
                    if self.peek_char(1) == Some('.') {
                        if matches!(self.peek_char(2), None | Some('.')) {
                            return Err(self.error("invalid recursive path"));
                        }
                        self.advance();
                        self.advance();
                        recursive = true;
                    } else {
                        self.advance();
                        if self.current_char().is_none() {
                            return Err(self.error("path cannot end with '.' separator"));
                        }
                    }
                }
                '[' => {
                    let text = self.read_bracket()?;
                    segments.push(RawSegment {
                        text,
                        bracketed: true,
                        recursive,
                    });
                    recursive = false;
                    self.check_after_bracket()?;
                }
                _ => {
                    let text = self.read_key()?;
                    segments.push(RawSegment {
                        text,
                        bracketed: false,
                        recursive,
                    });
                    recursive = false;
                }
            }
        }

        Ok(segments)
    }

    /// Reads a dot-notation key up to the next `.` or `[`.
    fn read_key(&mut self) -> Result<String, PathError> {
        let mut key = String::new();
        while let Some(ch) = self.current_char() {
            match ch {
                '.' | '[' => break,
                ']' => return Err(self.error("missing opening bracket")),
                '\'' | '"' => return Err(self.error("cannot use quotes outside of brackets")),
                c if c.is_whitespace() => {
                    return Err(self.error(
                        "cannot use whitespace characters outside quotes and brackets",
                    ));
                }
                c => {
                    key.push(c);
                    self.advance();
                }
            }
        }
        Ok(key)
    }

    /// Reads `[...]` and returns the text between the brackets.
    ///
    /// Commas, dots and closing brackets inside quotes are part of the
    /// segment; `\'` / `\"` escape the active quote character.
    fn read_bracket(&mut self) -> Result<String, PathError> {
        self.advance(); // Consume '['
        let start = self.position;
        let mut quote: Option<char> = None;

        loop {
            let Some(ch) = self.current_char() else {
                return Err(match quote {
                    Some(_) => self.error("missing closing quote"),
                    None => self.error("missing closing bracket"),
                });
            };

            match quote {
                Some(q) => {
                    if ch == '\\' && self.peek_char(1) == Some(q) {
                        self.advance();
                    } else if ch == q {
                        quote = None;
                    }
                    self.advance();
                }
                None => match ch {
                    '\'' | '"' => {
                        quote = Some(ch);
                        self.advance();
                    }
                    '[' => return Err(self.error("unexpected opening bracket")),
                    ']' => break,
                    _ => self.advance(),
                },
            }
        }

        let text: String = self.input[start..self.position].iter().collect();
        self.advance(); // Consume ']'

        if text.trim().is_empty() {
            return Err(self.error("empty path segment"));
        }
        Ok(text)
    }

    fn check_after_bracket(&self) -> Result<(), PathError> {
        match self.current_char() {
            None | Some('.') | Some('[') => Ok(()),
            Some(']') => Err(self.error("missing opening bracket")),
            Some('\'') | Some('"') => Err(self.error("cannot use quotes outside of brackets")),
            Some(c) if c.is_whitespace() => Err(self.error(
                "cannot use whitespace characters outside quotes and brackets",
            )),
            Some(_) => Err(self.error("unexpected character after closing bracket")),
        }
    }
}
