use std::path::PathBuf;

use anyhow::Context;
use drawbot::{init_logging, parse_line, Config, Shell, ShellCommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    // Optional first argument: path to a .toml or .json config file.
    let config_path = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => Config::default_path()?,
    };
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    info!("drawbot {} starting", drawbot::VERSION);
    let mut shell = Shell::from_config(config)?;
    println!("{}", drawbot::shell::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{:#}", e);
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }

        match shell.execute(command).await {
            Ok(message) if message.is_empty() => {}
            Ok(message) => println!("{}", message),
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    Ok(())
}
