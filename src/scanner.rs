use std::io::{self, Read};

use crate::token::Location;

const EOF_SYMBOL: u8 = b'\0';

/// Owns the full source text. Created once per input and kept alive for the
/// whole run of lexing; tokens borrow their text payloads from it.
pub struct SourceBuffer {
    text: String,
}

impl SourceBuffer {
    pub fn new(text: String) -> SourceBuffer {
        SourceBuffer { text }
    }

    pub fn from_reader(mut source: impl Read) -> io::Result<SourceBuffer> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;
        Ok(SourceBuffer { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Character-level cursor over a source buffer. Reads past the end of the
/// buffer return a NUL sentinel instead of faulting, and the cursor never
/// moves beyond the buffer length.
pub struct Scanner<'a> {
    text: &'a str,
    offset: usize,
    location: Location,
}

impl<'a> Scanner<'a> {
    pub fn new(buffer: &'a SourceBuffer) -> Scanner<'a> {
        Scanner {
            text: buffer.as_str(),
            offset: 0,
            location: Location::default(),
        }
    }

    pub fn current_symbol(&self) -> u8 {
        self.symbol_at(self.offset)
    }

    pub fn next_symbol(&self) -> u8 {
        self.symbol_at(self.offset + 1)
    }

    /// Advances the cursor by one symbol within the current line.
    pub fn move_right(&mut self) {
        if self.is_at_end() {
            return;
        }
        self.offset += 1;
        self.location.column += 1;
    }

    /// Advances the cursor past the next newline. End of buffer acts as an
    /// implicit line terminator.
    pub fn move_next_line(&mut self) {
        while !self.is_at_end() {
            let symbol = self.current_symbol();
            self.offset += 1;
            if symbol == b'\n' {
                break;
            }
        }
        self.location.line += 1;
        self.location.column = 0;
    }

    pub fn current_offset(&self) -> usize {
        self.offset
    }

    /// Borrows `length` bytes of the buffer starting at `start`. The caller
    /// guarantees `start + length` does not exceed the buffer length.
    pub fn substring(&self, start: usize, length: usize) -> &'a str {
        &self.text[start..start + length]
    }

    pub fn current_location(&self) -> Location {
        self.location
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.text.len()
    }

    fn symbol_at(&self, offset: usize) -> u8 {
        self.text.as_bytes().get(offset).copied().unwrap_or(EOF_SYMBOL)
    }
}
