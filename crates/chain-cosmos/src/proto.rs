//! Minimal protobuf writer for the handful of Cosmos messages we emit.
//!
//! We encode by hand instead of pulling in generated types. Only two wire
//! types are needed:
//!
//! ```text
//! key      = (field_number << 3) | wire_type      varint
//! varint   wire type 0: uint64 / enum / bool
//! len      wire type 2: string / bytes / embedded message / repeated element
//! ```
//!
//! Scalar fields holding their proto3 default (0, "", empty bytes) are
//! omitted, as every canonical encoder does. Embedded messages are always
//! written once set, even when empty.

const WIRE_VARINT: u64 = 0;
const WIRE_LEN: u64 = 2;

/// Appends `value` as a base-128 varint.
pub fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

/// Builder over a growing protobuf buffer.
#[derive(Debug, Default)]
pub struct ProtoWriter {
    buf: Vec<u8>,
}

impl ProtoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(&mut self, field: u32, wire_type: u64) {
        encode_varint((u64::from(field) << 3) | wire_type, &mut self.buf);
    }

    fn len_delimited(&mut self, field: u32, data: &[u8]) {
        self.key(field, WIRE_LEN);
        encode_varint(data.len() as u64, &mut self.buf);
        self.buf.extend_from_slice(data);
    }

    /// `uint64`/enum field; skipped when zero.
    pub fn uint64(mut self, field: u32, value: u64) -> Self {
        if value != 0 {
            self.key(field, WIRE_VARINT);
            encode_varint(value, &mut self.buf);
        }
        self
    }

    /// `string` field; skipped when empty.
    pub fn string(mut self, field: u32, value: &str) -> Self {
        if !value.is_empty() {
            self.len_delimited(field, value.as_bytes());
        }
        self
    }

    /// `bytes` field; skipped when empty.
    pub fn bytes(mut self, field: u32, value: &[u8]) -> Self {
        if !value.is_empty() {
            self.len_delimited(field, value);
        }
        self
    }

    /// Embedded message, or one element of a repeated message/bytes field.
    /// Always written.
    pub fn message(mut self, field: u32, encoded: &[u8]) -> Self {
        self.len_delimited(field, encoded);
        self
    }

    /// Every element of a repeated message/bytes field, in order.
    pub fn repeated<T: AsRef<[u8]>>(self, field: u32, items: &[T]) -> Self {
        items
            .iter()
            .fold(self, |w, item| w.message(field, item.as_ref()))
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// `google.protobuf.Any`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Any {
    pub type_url: String,
    pub value: Vec<u8>,
}

impl Any {
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        ProtoWriter::new()
            .string(1, &self.type_url)
            .bytes(2, &self.value)
            .finish()
    }
}
