use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::BundleError;

/// Compact JSON whose numbers read the way JavaScript prints them:
/// `1.0` becomes `1`, `1e3` becomes `1000`, and `-0` becomes `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsNumberFormatter;

impl Formatter for JsNumberFormatter {
    fn write_f32<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f32) -> io::Result<()> {
        self.write_f64(writer, f64::from(value))
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(format_number(value).as_bytes())
    }
}

/// ECMAScript `Number.prototype.toString` for finite values.
pub fn format_number(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let mut buffer = ryu_js::Buffer::new();
    buffer.format(value).to_string()
}

pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, BundleError> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, JsNumberFormatter);
    value
        .serialize(&mut ser)
        .map_err(|e| BundleError::Serialization(e.to_string()))?;
    String::from_utf8(out).map_err(|e| BundleError::Serialization(e.to_string()))
}
