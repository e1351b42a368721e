//! record/codec — Record<K>: decode/encode по статическому layout + stored/computed CRC.
//!
//! Семантика:
//! - decode: длина буфера обязана быть payload_len + 4, иначе FormatError::WrongLength;
//!   поля режутся по константным offset'ам layout, последние 4 байта — stored checksum.
//! - encode: поля сериализуются в порядке layout в буфер ровно payload_len байт.
//! - set_field меняет только payload; stored checksum обновляется лишь refresh_checksum().

use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder};

use crate::consts::CHECKSUM_LEN;
use crate::error::{FormatError, ValidationError};

use super::checksum::{crc32, crc32_be, split_trailer};
use super::kinds::{AutoSave, RecordKind};
use super::layout::{FieldKind, FieldSpec, GOLDEN_HAMMERS};

/// Decoded value of one layout field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bytes(Vec<u8>),
    U8(u8),
    U16(u16),
    U32(u32),
}

impl FieldValue {
    fn read(spec: &FieldSpec, src: &[u8]) -> Self {
        match spec.kind {
            FieldKind::Opaque => FieldValue::Bytes(src.to_vec()),
            FieldKind::U8 => FieldValue::U8(src[0]),
            FieldKind::U16 => FieldValue::U16(BigEndian::read_u16(src)),
            FieldKind::U32 => FieldValue::U32(BigEndian::read_u32(src)),
        }
    }

    fn write(&self, dst: &mut [u8]) {
        match self {
            FieldValue::Bytes(b) => dst.copy_from_slice(b),
            FieldValue::U8(v) => dst[0] = *v,
            FieldValue::U16(v) => BigEndian::write_u16(dst, *v),
            FieldValue::U32(v) => BigEndian::write_u32(dst, *v),
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Bytes(_) => None,
            FieldValue::U8(v) => Some(*v as u64),
            FieldValue::U16(v) => Some(*v as u64),
            FieldValue::U32(v) => Some(*v as u64),
        }
    }
}

/// One decoded copy of a fixed-size record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<K: RecordKind> {
    values: Vec<FieldValue>,
    stored: u32,
    _kind: PhantomData<K>,
}

impl<K: RecordKind> Record<K> {
    /// Decode a whole-file buffer (payload || CRC32 BE).
    pub fn decode(buf: &[u8]) -> Result<Self, FormatError> {
        let expected = K::file_len();
        let (payload, stored) = match split_trailer(buf) {
            Some(v) if v.0.len() == K::payload_len() => v,
            _ => {
                return Err(FormatError::WrongLength {
                    path: None,
                    expected,
                    actual: buf.len(),
                })
            }
        };
        Ok(Self::from_parts(payload, stored))
    }

    /// Build a record from a bare payload; the stored checksum is set to the computed one.
    pub fn from_payload(payload: &[u8]) -> Result<Self, FormatError> {
        if payload.len() != K::payload_len() {
            return Err(FormatError::WrongLength {
                path: None,
                expected: K::file_len(),
                actual: payload.len() + CHECKSUM_LEN,
            });
        }
        Ok(Self::from_parts(payload, crc32(payload)))
    }

    fn from_parts(payload: &[u8], stored: u32) -> Self {
        let values = K::LAYOUT
            .fields
            .iter()
            .map(|f| FieldValue::read(f, &payload[f.offset..f.end()]))
            .collect();
        Self {
            values,
            stored,
            _kind: PhantomData,
        }
    }

    /// Payload bytes in layout order (exactly `K::payload_len()` bytes).
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![0u8; K::payload_len()];
        for (spec, val) in K::LAYOUT.fields.iter().zip(&self.values) {
            val.write(&mut out[spec.offset..spec.end()]);
        }
        out
    }

    /// On-disk form: payload || CRC32(payload) big-endian.
    pub fn encode_with_checksum(&self) -> Vec<u8> {
        let mut out = self.encode();
        let trailer = crc32_be(&out);
        out.extend_from_slice(&trailer);
        out
    }

    pub fn stored_checksum(&self) -> u32 {
        self.stored
    }

    pub fn computed_checksum(&self) -> u32 {
        crc32(&self.encode())
    }

    pub fn checksum_ok(&self) -> bool {
        self.computed_checksum() == self.stored
    }

    /// Overwrite the stored checksum with the computed one. Returns the new value.
    pub fn refresh_checksum(&mut self) -> u32 {
        self.stored = self.computed_checksum();
        self.stored
    }

    /// Set the stored checksum to the value that was actually written to disk.
    pub(crate) fn set_stored_checksum(&mut self, value: u32) {
        self.stored = value;
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        K::LAYOUT.field(name).map(|(i, _)| &self.values[i])
    }

    /// Scalar field value; None for unknown names and opaque ranges.
    pub fn scalar(&self, name: &str) -> Option<u64> {
        self.field(name).and_then(FieldValue::as_u64)
    }

    /// Write a scalar field after checking the value against the field's domain.
    pub fn set_field(&mut self, name: &str, value: i64) -> Result<(), ValidationError> {
        let (idx, spec) = K::LAYOUT
            .field(name)
            .ok_or_else(|| ValidationError::UnknownField(name.to_string()))?;
        let (min, max) = spec
            .kind
            .domain()
            .ok_or(ValidationError::NotWritable(spec.name))?;
        if value < min || value > max {
            return Err(ValidationError::OutOfRange {
                field: spec.name,
                value,
                min,
                max,
            });
        }
        // диапазон проверен выше — усечения нет
        self.values[idx] = match spec.kind {
            FieldKind::U8 => FieldValue::U8(value as u8),
            FieldKind::U16 => FieldValue::U16(value as u16),
            FieldKind::U32 => FieldValue::U32(value as u32),
            FieldKind::Opaque => return Err(ValidationError::NotWritable(spec.name)),
        };
        Ok(())
    }

    pub fn opaque(&self, name: &str) -> Option<&[u8]> {
        match self.field(name) {
            Some(FieldValue::Bytes(b)) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Raw access to an opaque region. Changes it like any other field write
    /// (the stored checksum is left alone).
    pub fn opaque_mut(&mut self, name: &str) -> Option<&mut [u8]> {
        let (idx, _) = K::LAYOUT.field(name)?;
        match &mut self.values[idx] {
            FieldValue::Bytes(b) => Some(b.as_mut_slice()),
            _ => None,
        }
    }

    /// First payload offset where the two copies differ; None when byte-identical.
    pub fn payload_diff_offset(&self, other: &Self) -> Option<usize> {
        let a = self.encode();
        let b = other.encode();
        a.iter().zip(&b).position(|(x, y)| x != y)
    }
}

impl Record<AutoSave> {
    pub fn golden_hammers(&self) -> u8 {
        self.scalar(GOLDEN_HAMMERS).unwrap_or(0) as u8
    }
}
