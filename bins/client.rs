use std::time::Instant;

use client::{command::HELP, view, AccountSync, Command, HttpAccountApi};
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_stderr();

    let cfg = configs::AppConfig::load_or_env()?;
    info!(service = "client", event = "start", api_url = %cfg.client.api_url, "client starting");

    let api = HttpAccountApi::new(cfg.client.api_url.clone());
    let mut sync = AccountSync::with_flash_duration(api, cfg.client.flash_duration());

    // 启动时拉取一次全量列表，失败只提示不退出
    if let Err(e) = sync.refresh().await {
        warn!(error = %e, "initial refresh failed");
    }
    println!("{}", view::render(&sync));
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match cmd {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            cmd => {
                if let Err(e) = cmd.apply(&mut sync).await {
                    // 已体现在状态行中的错误不重复打印
                    let text = e.to_string();
                    if sync.flash().map_or(true, |f| !f.text.ends_with(&text)) {
                        println!("{text}");
                    }
                }
            }
        }
        sync.expire_flash(Instant::now());
        println!("{}", view::render(&sync));
    }

    info!(service = "client", event = "stop", "client exiting");
    Ok(())
}
