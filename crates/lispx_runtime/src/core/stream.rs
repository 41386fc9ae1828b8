//! In-memory string streams.
//!
//! Input streams read UTF-8 bytes from a fixed string; output streams
//! accumulate bytes. End-of-file handling and conditions live in the `Vm`
//! wrappers, these types only report `None` at end of input.

use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct StringInputStream {
    text: Rc<str>,
    pos: usize,
}

impl StringInputStream {
    pub fn new(text: impl Into<Rc<str>>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub fn peek_byte(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.pos += 1;
        Some(b)
    }

    /// Next character. `None` at end of input and also when the position is
    /// not on a character boundary; `is_at_end` tells the two apart.
    pub fn peek_char(&self) -> Option<char> {
        self.text.get(self.pos..)?.chars().next()
    }

    pub fn read_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Step back over `c`. Returns false if `c` is not the character just read.
    pub fn unread_char(&mut self, c: char) -> bool {
        let len = c.len_utf8();
        if self.pos < len {
            return false;
        }
        let start = self.pos - len;
        match self.text.get(start..self.pos) {
            Some(s) if s.chars().next() == Some(c) => {
                self.pos = start;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StringOutputStream {
    buf: Vec<u8>,
}

impl StringOutputStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_byte(&mut self, b: u8) {
        self.buf.push(b);
    }

    pub fn write_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
    }

    pub fn write_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Accumulated output; invalid UTF-8 from raw byte writes is replaced.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }
}
