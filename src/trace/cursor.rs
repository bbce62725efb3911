//! Character cursor used by the trace reader.

/// Line/column of the cursor, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPos {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for TextPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Forward-only cursor over the characters of a trace document.
#[derive(Debug, Clone)]
pub struct Cursor {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    #[must_use]
    pub const fn pos(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn text_pos(&self) -> TextPos {
        TextPos {
            line: self.line,
            column: self.column,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Skip whitespace, then consume `expected` if it is next.
    pub fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Read a double-quoted string. Escapes are not part of the format.
    pub fn read_string(&mut self) -> Option<String> {
        self.skip_whitespace();
        if self.peek() != Some('"') {
            return None;
        }
        self.advance();
        let mut text = String::new();
        loop {
            match self.advance()? {
                '"' => return Some(text),
                ch => text.push(ch),
            }
        }
    }

    /// Read an optionally negative decimal integer.
    pub fn read_int(&mut self) -> Option<i64> {
        self.skip_whitespace();
        let start = self.position;
        let mut digits = String::new();
        if self.peek() == Some('-') {
            digits.push('-');
            self.advance();
        }
        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            digits.push(ch);
            self.advance();
        }
        match digits.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.rewind_to(start);
                None
            }
        }
    }

    /// Skip one value of any shape (string, number, array or object) so the
    /// reader can ignore keys it does not know.
    pub fn skip_value(&mut self) {
        self.skip_whitespace();
        match self.peek() {
            Some('"') => {
                self.read_string();
            }
            Some(open @ ('[' | '{')) => {
                let close = if open == '[' { ']' } else { '}' };
                let mut depth = 0usize;
                while let Some(ch) = self.advance() {
                    if ch == open {
                        depth += 1;
                    } else if ch == close {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            break;
                        }
                    } else if ch == '"' {
                        while let Some(inner) = self.advance() {
                            if inner == '"' {
                                break;
                            }
                        }
                    }
                }
            }
            _ => {
                while self
                    .peek()
                    .is_some_and(|c| !matches!(c, ',' | '}' | ']') && !c.is_whitespace())
                {
                    self.advance();
                }
            }
        }
    }

    /// Skip forward past the next occurrence of `target`.
    pub fn skip_past(&mut self, target: char) -> bool {
        while let Some(ch) = self.advance() {
            if ch == target {
                return true;
            }
        }
        false
    }

    fn rewind_to(&mut self, position: usize) {
        // Only used inside a single token, which never spans lines.
        let back = self.position - position;
        self.position = position;
        self.column = self.column.saturating_sub(back);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_string_and_int() {
        let mut cursor = Cursor::new("  \"swap\" , -12]");
        assert_eq!(cursor.read_string().as_deref(), Some("swap"));
        assert!(cursor.eat(','));
        assert_eq!(cursor.read_int(), Some(-12));
        assert!(cursor.eat(']'));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_read_int_rejects_bare_minus() {
        let mut cursor = Cursor::new("-x");
        assert_eq!(cursor.read_int(), None);
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.text_pos().column, 1);
    }

    #[test]
    fn test_text_pos_tracks_lines() {
        let mut cursor = Cursor::new("{\n  \"a\"");
        cursor.eat('{');
        cursor.skip_whitespace();
        assert_eq!(cursor.text_pos(), TextPos { line: 2, column: 3 });
    }

    #[test]
    fn test_skip_value_nested() {
        let mut cursor = Cursor::new("{\"a\": [1, {\"b\": \"]\"}]}, 7");
        cursor.skip_value();
        assert!(cursor.eat(','));
        assert_eq!(cursor.read_int(), Some(7));
    }
}
