use anyhow::Result;
use env_logger::{Builder, Env};

use brawlsave::SaveConfig;

mod cli;
mod util;
mod cmd_show;
mod cmd_check;
mod cmd_set;
mod cmd_layout;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug brawlsave show --path ./save
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    let cfg = SaveConfig::default()
        .with_net(cli.net)
        .with_sync(!cli.no_sync);

    match cli.cmd {
        cli::Cmd::Show { path, json } => cmd_show::exec(path, json, cfg).map(|_| 0),

        // 2 = есть предупреждения (CRC/копии расходятся)
        cli::Cmd::Check { path, json } => {
            cmd_check::exec(path, json, cfg).map(|clean| if clean { 0 } else { 2 })
        }

        cli::Cmd::SetHammers { path, value } => cmd_set::exec(path, value, cfg).map(|_| 0),

        cli::Cmd::Layout => cmd_layout::exec().map(|_| 0),
    }
}
