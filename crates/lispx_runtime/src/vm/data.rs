//! Numbers, strings and ordering.

use std::cmp::Ordering;

use lispx_core::Decimal;

use super::Vm;
use crate::conditions::Result;
use crate::core::class::BuiltinClass;
use crate::core::value::Value;
use crate::errors::messages;
use crate::types::{TypeSpec, type_or};

impl Vm {
    /// Parse a decimal literal; malformed text is a `reader-error`.
    pub fn num_from_str(&self, text: &str) -> Result<Value> {
        text.parse::<Decimal>()
            .map(Value::from)
            .map_err(|e| self.reader_error(format!("{}: {e}", messages::MALFORMED_NUMBER)))
    }

    /// Number from a host float. NaN and infinities are type errors.
    pub fn num_from_f64(&self, n: f64) -> Result<Value> {
        Decimal::from_f64(n)
            .map(Value::from)
            .ok_or_else(|| self.type_error(Value::host_num(n), &TypeSpec::class(BuiltinClass::Number)))
    }

    pub(crate) fn expect_number<'a>(&self, value: &'a Value) -> Result<&'a Decimal> {
        value
            .as_number()
            .ok_or_else(|| self.type_error(value.clone(), &TypeSpec::class(BuiltinClass::Number)))
    }

    pub(crate) fn expect_string<'a>(&self, value: &'a Value) -> Result<&'a str> {
        value
            .as_str()
            .ok_or_else(|| self.type_error(value.clone(), &TypeSpec::class(BuiltinClass::String)))
    }

    /// Three-way comparison of two numbers or two strings.
    ///
    /// Returns -1, 0 or 1. The second operand must have the class of the
    /// first; anything else is a `type-error`.
    pub fn compare(&self, a: &Value, b: &Value) -> Result<i32> {
        let ordering = match a {
            Value::Number(x) => x.as_ref().cmp(self.expect_number(b)?),
            Value::String(x) => x.as_bytes().cmp(self.expect_string(b)?.as_bytes()),
            _ => {
                let comparable = type_or([
                    TypeSpec::class(BuiltinClass::Number),
                    TypeSpec::class(BuiltinClass::String),
                ]);
                return Err(self.type_error(a.clone(), &comparable));
            }
        };
        Ok(match ordering {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        })
    }

    pub fn add(&self, a: &Value, b: &Value) -> Result<Value> {
        Ok(Value::from(self.expect_number(a)?.add(self.expect_number(b)?)))
    }

    pub fn subtract(&self, a: &Value, b: &Value) -> Result<Value> {
        Ok(Value::from(self.expect_number(a)?.sub(self.expect_number(b)?)))
    }

    pub fn multiply(&self, a: &Value, b: &Value) -> Result<Value> {
        Ok(Value::from(self.expect_number(a)?.mul(self.expect_number(b)?)))
    }

    /// Quotient with `VmConfig::division_scale` fractional digits.
    pub fn divide(&self, a: &Value, b: &Value) -> Result<Value> {
        let (x, y) = (self.expect_number(a)?, self.expect_number(b)?);
        x.div(y, self.config.division_scale)
            .map(Value::from)
            .ok_or_else(|| self.assertion_error(messages::DIVISION_BY_ZERO))
    }
}
