//! sqlpad - line-driven SQL scratchpad
//!
//! Reads lines from stdin: plain lines are appended to the buffer, `:`
//! commands open, save, reload and close files (see `runtime::input`).
//! Highlighted renders and status lines are written to stdout.

use std::io::{self, BufRead, IsTerminal};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;

use sqlpad::cli::CliArgs;
use sqlpad::config::EditorConfig;
use sqlpad::messages::{AppMsg, Msg};
use sqlpad::runtime::{parse_line, Runtime};
use sqlpad::surface::ConsoleSurface;
use sqlpad::syntax::SqlLexer;

/// Forward stdin lines to the runtime until EOF, then request quit
fn spawn_input_thread(tx: Sender<Msg>) -> Result<()> {
    thread::Builder::new()
        .name("sqlpad-input".into())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::warn!("stdin read failed: {}", e);
                        break;
                    }
                };
                match parse_line(&line) {
                    Ok(msg) => {
                        let quit = matches!(msg, Msg::App(AppMsg::Quit));
                        if tx.send(msg).is_err() || quit {
                            return;
                        }
                    }
                    Err(usage) => eprintln!("{}", usage),
                }
            }
            let _ = tx.send(Msg::App(AppMsg::Quit));
        })
        .context("Failed to spawn input thread")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    sqlpad::logging::init();

    let mut config = EditorConfig::load();
    args.apply_overrides(&mut config);
    tracing::debug!("Effective config: {:?}", config);

    let stdout = io::stdout();
    let color = !args.no_color && stdout.is_terminal();
    let surface = ConsoleSurface::new(stdout).with_color(color);

    let mut runtime = Runtime::new(config, surface, Arc::new(SqlLexer::new()));
    let tx = runtime.sender();

    if let Some(dir) = args.data_dir {
        tx.send(Msg::App(AppMsg::SetDataDirectory(dir)))
            .context("Runtime queue closed")?;
    }
    if let Some(file) = args.file {
        tx.send(Msg::App(AppMsg::OpenFile(file)))
            .context("Runtime queue closed")?;
    }

    spawn_input_thread(tx)?;
    runtime.run()
}
