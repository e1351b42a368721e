use anyhow::Result;

use brawlsave::record::{AutoSave, NetSave, RecordKind};

pub fn exec() -> Result<()> {
    for (layout, file_len, files) in [
        (AutoSave::LAYOUT, AutoSave::file_len(), [AutoSave::file_name(0), AutoSave::file_name(1)]),
        (NetSave::LAYOUT, NetSave::file_len(), [NetSave::file_name(0), NetSave::file_name(1)]),
    ] {
        print!("{}", layout);
        println!("  + CRC32 trailer (BE), file {} B: {}", file_len, files.join(", "));
        println!();
    }
    Ok(())
}
