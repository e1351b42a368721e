//! record/layout — статическое описание полей payload.
//!
//! Layout = упорядоченный список `FieldSpec { name, offset, len, kind }`.
//! Поля идут подряд с offset 0, без дыр и перекрытий; сумма длин = длина payload.
//! Все многобайтовые скаляры — big-endian.

use std::fmt;

use crate::consts::{
    AUTOSAVE_HAMMERS_OFF, AUTOSAVE_UNKNOWN1_LEN, AUTOSAVE_UNKNOWN2_LEN, NET_PAYLOAD_LEN,
};

/// What a field's bytes mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Preserved verbatim, never interpreted.
    Opaque,
    U8,
    U16,
    U32,
}

impl FieldKind {
    /// Fixed width for scalar kinds; None for opaque ranges.
    pub const fn width(self) -> Option<usize> {
        match self {
            FieldKind::Opaque => None,
            FieldKind::U8 => Some(1),
            FieldKind::U16 => Some(2),
            FieldKind::U32 => Some(4),
        }
    }

    /// Inclusive value domain for scalar kinds.
    pub const fn domain(self) -> Option<(i64, i64)> {
        match self {
            FieldKind::Opaque => None,
            FieldKind::U8 => Some((0, u8::MAX as i64)),
            FieldKind::U16 => Some((0, u16::MAX as i64)),
            FieldKind::U32 => Some((0, u32::MAX as i64)),
        }
    }

    pub fn is_scalar(self) -> bool {
        !matches!(self, FieldKind::Opaque)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::Opaque => "opaque",
            FieldKind::U8 => "u8",
            FieldKind::U16 => "u16be",
            FieldKind::U32 => "u32be",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub len: usize,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn opaque(name: &'static str, offset: usize, len: usize) -> Self {
        Self { name, offset, len, kind: FieldKind::Opaque }
    }

    pub const fn u8(name: &'static str, offset: usize) -> Self {
        Self { name, offset, len: 1, kind: FieldKind::U8 }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Ordered, fixed field list of one record kind.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Layout {
    /// Payload length = end of the last field.
    pub fn payload_len(&self) -> usize {
        self.fields.last().map(|f| f.end()).unwrap_or(0)
    }

    pub fn field(&self, name: &str) -> Option<(usize, &FieldSpec)> {
        self.fields.iter().enumerate().find(|(_, f)| f.name == name)
    }

    /// Structural check: contiguous from 0, non-overlapping, scalar widths consistent.
    pub fn check(&self) -> Result<(), String> {
        let mut expect_off = 0usize;
        for f in self.fields {
            if f.offset != expect_off {
                return Err(format!(
                    "{}: field '{}' at 0x{:X}, expected 0x{:X}",
                    self.name, f.name, f.offset, expect_off
                ));
            }
            if let Some(w) = f.kind.width() {
                if w != f.len {
                    return Err(format!(
                        "{}: field '{}' is {} but {} B long",
                        self.name, f.name, f.kind, f.len
                    ));
                }
            }
            if f.len == 0 {
                return Err(format!("{}: field '{}' is empty", self.name, f.name));
            }
            if self.fields.iter().filter(|o| o.name == f.name).count() > 1 {
                return Err(format!("{}: duplicate field '{}'", self.name, f.name));
            }
            expect_off = f.end();
        }
        Ok(())
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (payload {} B)", self.name, self.payload_len())?;
        for fs in self.fields {
            writeln!(
                f,
                "  0x{:04X}..0x{:04X}  {:<8} {}",
                fs.offset,
                fs.end(),
                fs.kind.to_string(),
                fs.name
            )?;
        }
        Ok(())
    }
}

// ---------- Shipped layouts ----------

pub const GOLDEN_HAMMERS: &str = "goldenHammers";

const AUTOSAVE_FIELDS: [FieldSpec; 3] = [
    FieldSpec::opaque("unknown1", 0, AUTOSAVE_UNKNOWN1_LEN),
    FieldSpec::u8(GOLDEN_HAMMERS, AUTOSAVE_HAMMERS_OFF),
    FieldSpec::opaque("unknown2", AUTOSAVE_HAMMERS_OFF + 1, AUTOSAVE_UNKNOWN2_LEN),
];

pub const AUTOSAVE_LAYOUT: Layout = Layout {
    name: "AutoSave",
    fields: &AUTOSAVE_FIELDS,
};

const NET_FIELDS: [FieldSpec; 1] = [FieldSpec::opaque("unknown", 0, NET_PAYLOAD_LEN)];

pub const NET_LAYOUT: Layout = Layout {
    name: "Net",
    fields: &NET_FIELDS,
};
