//! savefile/report — агрегированные предупреждения и отчёт (текст + serde).
//!
//! Текстовый отчёт:
//!   Super Smash Bros. Brawl Savefile
//!     WARNING: <каждое текущее предупреждение>
//!   <пустая строка>
//!   AutoSave
//!     Golden Hammers: N
//!     Checksum: xxxxxxxx        (computed CRC первой копии)

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::pair::{PairState, RedundantPair, Warning};
use crate::record::{checksum_hex, RecordKind};

use super::core::SaveFile;

const REPORT_TITLE: &str = "Super Smash Bros. Brawl Savefile";

/// Machine-readable snapshot of one pair.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSummary {
    pub record: &'static str,
    pub state: PairState,
    pub copies: Vec<PathBuf>,
    /// Scalar fields of the primary copy.
    pub fields: BTreeMap<&'static str, u64>,
    pub stored_checksum: String,
    pub computed_checksum: String,
}

impl RecordSummary {
    fn of<K: RecordKind>(pair: &RedundantPair<K>) -> Self {
        let primary = pair.primary();
        let fields = K::LAYOUT
            .fields
            .iter()
            .filter(|f| f.kind.is_scalar())
            .filter_map(|f| primary.scalar(f.name).map(|v| (f.name, v)))
            .collect();
        Self {
            record: K::label(),
            state: pair.state(),
            copies: pair.paths().map(|p| p.to_path_buf()).collect(),
            fields,
            stored_checksum: checksum_hex(primary.stored_checksum()),
            computed_checksum: checksum_hex(primary.computed_checksum()),
        }
    }
}

/// Machine-readable snapshot of the whole session (`--json`).
#[derive(Debug, Clone, Serialize)]
pub struct SaveReport {
    pub directory: PathBuf,
    pub warnings: Vec<Warning>,
    pub autosave: RecordSummary,
    pub net: Option<RecordSummary>,
}

impl SaveFile {
    /// Current warnings across all pairs (AutoSave first).
    pub fn warnings(&self) -> Vec<Warning> {
        let mut out = self.autosave.validate();
        if let Some(net) = &self.net {
            out.extend(net.validate());
        }
        out
    }

    /// Warnings found right after loading.
    pub fn load_warnings(&self) -> &[Warning] {
        &self.load_warnings
    }

    pub fn summary(&self) -> SaveReport {
        SaveReport {
            directory: self.directory.clone(),
            warnings: self.warnings(),
            autosave: RecordSummary::of(&self.autosave),
            net: self.net.as_ref().map(RecordSummary::of),
        }
    }

    /// Human-readable report: warnings, then the primary AutoSave copy.
    pub fn report(&self) -> String {
        let mut out = String::new();
        out.push_str(REPORT_TITLE);
        out.push('\n');
        for w in self.warnings() {
            out.push_str(&format!("  WARNING: {}\n", w));
        }
        out.push('\n');
        render_primary(&mut out, &self.autosave);
        if let Some(net) = &self.net {
            out.push('\n');
            render_primary(&mut out, net);
        }
        out
    }
}

impl fmt::Display for SaveFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}

fn render_primary<K: RecordKind>(out: &mut String, pair: &RedundantPair<K>) {
    let primary = pair.primary();
    out.push_str(K::label());
    out.push('\n');
    for f in K::LAYOUT.fields.iter().filter(|f| f.kind.is_scalar()) {
        if let Some(v) = primary.scalar(f.name) {
            out.push_str(&format!("  {}: {}\n", field_title(f.name), v));
        }
    }
    out.push_str(&format!(
        "  Checksum: {}\n",
        checksum_hex(primary.computed_checksum())
    ));
}

/// "goldenHammers" -> "Golden Hammers".
fn field_title(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}
