//! String streams as runtime values.
//!
//! The `eof_error_p` / `eof_value` pair follows the usual Lisp convention:
//! at end of input either signal `end-of-file` or return `eof_value`.

use std::cell::RefCell;
use std::rc::Rc;

use super::Vm;
use crate::conditions::Result;
use crate::core::class::BuiltinClass;
use crate::core::stream::{StringInputStream, StringOutputStream};
use crate::core::value::Value;
use crate::errors::messages;
use crate::types::TypeSpec;

impl Vm {
    pub fn make_string_input_stream(&self, text: &str) -> Value {
        Value::InputStream(Rc::new(RefCell::new(StringInputStream::new(text))))
    }

    pub fn make_string_output_stream(&self) -> Value {
        Value::OutputStream(Rc::new(RefCell::new(StringOutputStream::new())))
    }

    fn input_stream<'a>(&self, stream: &'a Value) -> Result<&'a RefCell<StringInputStream>> {
        match stream {
            Value::InputStream(s) => Ok(s),
            other => Err(self.type_error(other.clone(), &TypeSpec::class(BuiltinClass::InputStream))),
        }
    }

    fn output_stream<'a>(&self, stream: &'a Value) -> Result<&'a RefCell<StringOutputStream>> {
        match stream {
            Value::OutputStream(s) => Ok(s),
            other => Err(self.type_error(other.clone(), &TypeSpec::class(BuiltinClass::OutputStream))),
        }
    }

    /// A one-character string.
    fn expect_char(&self, ch: &Value) -> Result<char> {
        let mut chars = self.expect_string(ch)?.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(self.type_error(ch.clone(), &TypeSpec::class(BuiltinClass::String))),
        }
    }

    fn eof(&self, stream: &Value, eof_error_p: bool, eof_value: Value) -> Result<Value> {
        if eof_error_p {
            Err(self.end_of_file(stream.clone()))
        } else {
            Ok(eof_value)
        }
    }

    /// No character available: either real end of input, or the position
    /// sits inside a multi-byte character after raw byte reads.
    fn char_eof(
        &self,
        stream: &Value,
        input: &RefCell<StringInputStream>,
        eof_error_p: bool,
        eof_value: Value,
    ) -> Result<Value> {
        if input.borrow().is_at_end() {
            self.eof(stream, eof_error_p, eof_value)
        } else {
            Err(self.stream_error(stream.clone(), messages::NOT_ON_CHAR_BOUNDARY))
        }
    }

    /// Next byte as a number.
    pub fn read_byte(&self, stream: &Value, eof_error_p: bool, eof_value: Value) -> Result<Value> {
        match self.input_stream(stream)?.borrow_mut().read_byte() {
            Some(b) => Ok(Value::num(b as i64)),
            None => self.eof(stream, eof_error_p, eof_value),
        }
    }

    pub fn peek_byte(&self, stream: &Value, eof_error_p: bool, eof_value: Value) -> Result<Value> {
        match self.input_stream(stream)?.borrow().peek_byte() {
            Some(b) => Ok(Value::num(b as i64)),
            None => self.eof(stream, eof_error_p, eof_value),
        }
    }

    /// Next character as a one-character string.
    pub fn read_char(&self, stream: &Value, eof_error_p: bool, eof_value: Value) -> Result<Value> {
        let input = self.input_stream(stream)?;
        let next = input.borrow_mut().read_char();
        match next {
            Some(c) => Ok(Value::str(c.encode_utf8(&mut [0u8; 4]))),
            None => self.char_eof(stream, input, eof_error_p, eof_value),
        }
    }

    pub fn peek_char(&self, stream: &Value, eof_error_p: bool, eof_value: Value) -> Result<Value> {
        let input = self.input_stream(stream)?;
        let next = input.borrow().peek_char();
        match next {
            Some(c) => Ok(Value::str(c.encode_utf8(&mut [0u8; 4]))),
            None => self.char_eof(stream, input, eof_error_p, eof_value),
        }
    }

    /// Push back the character just read; anything else is a `stream-error`.
    pub fn unread_char(&self, stream: &Value, ch: &Value) -> Result<()> {
        let c = self.expect_char(ch)?;
        if self.input_stream(stream)?.borrow_mut().unread_char(c) {
            Ok(())
        } else {
            Err(self.stream_error(stream.clone(), messages::STREAM_ERROR))
        }
    }

    pub fn write_byte(&self, stream: &Value, byte: &Value) -> Result<()> {
        let n = self.expect_number(byte)?.to_i64_truncated();
        let b = u8::try_from(n)
            .map_err(|_| self.type_error(byte.clone(), &TypeSpec::class(BuiltinClass::Number)))?;
        self.output_stream(stream)?.borrow_mut().write_byte(b);
        Ok(())
    }

    pub fn write_char(&self, stream: &Value, ch: &Value) -> Result<()> {
        let c = self.expect_char(ch)?;
        self.output_stream(stream)?.borrow_mut().write_char(c);
        Ok(())
    }

    pub fn write_string(&self, stream: &Value, text: &Value) -> Result<()> {
        let s = self.expect_string(text)?;
        self.output_stream(stream)?.borrow_mut().write_str(s);
        Ok(())
    }

    /// Everything written so far, as a runtime string.
    pub fn output_string(&self, stream: &Value) -> Result<Value> {
        let out = self.output_stream(stream)?.borrow().output();
        Ok(Value::str(&out))
    }
}
