use clap::{Parser, Subcommand};
use std::path::PathBuf;

use brawlsave::NetMode;

/// CLI для сохранений Super Smash Bros. Brawl (autosv*.bin / net*.bin)
#[derive(Parser, Debug)]
#[command(
    name = "brawlsave",
    version,
    about = "Inspect and patch Super Smash Bros. Brawl save files",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Net pair policy: auto | required | off
    #[arg(long, global = true, default_value = "auto", value_parser = parse_net_mode)]
    pub net: NetMode,

    /// Skip fsync after writes (faster, less durable)
    #[arg(long, global = true, default_value_t = false)]
    pub no_sync: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print warnings and the primary AutoSave record
    ///
    /// Пример:
    ///   brawlsave show --path ./decrypted
    ///   brawlsave show --path ./decrypted --json
    Show {
        /// Decrypted save folder (contains autosv0.bin, autosv1.bin)
        #[arg(long)]
        path: PathBuf,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Validate checksums and mirrored copies; exit code 2 when anything is off
    Check {
        #[arg(long)]
        path: PathBuf,
        /// JSON output (array of warnings)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Set golden hammers (0..=255) on both AutoSave copies and write them back
    ///
    /// Больше 5 — ломает стену достижений в игре (значение всё равно будет записано).
    SetHammers {
        #[arg(long)]
        path: PathBuf,
        #[arg(
            long,
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i64).range(0..=255)
        )]
        value: i64,
    },
    /// Print the field layout of the AutoSave and Net records
    Layout,
}

fn parse_net_mode(s: &str) -> Result<NetMode, String> {
    s.parse::<NetMode>()
}

impl Cli {
    pub fn parse() -> Self {
        <Cli as Parser>::parse()
    }
}
