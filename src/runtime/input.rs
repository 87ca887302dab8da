//! Line input handling for the shell binary
//!
//! Lines starting with `:` are commands; anything else is appended to the
//! buffer as a new line.
//!
//! | command        | message                       |
//! |----------------|-------------------------------|
//! | `:open PATH`   | `AppMsg::OpenFile`            |
//! | `:save`        | `AppMsg::SaveFile`            |
//! | `:saveas PATH` | `AppMsg::SaveFileAs`          |
//! | `:reload`      | `AppMsg::ReloadFromDisk`      |
//! | `:close`       | `AppMsg::CloseFile`           |
//! | `:db DIR`      | `AppMsg::SetDataDirectory`    |
//! | `:refresh`     | `AppMsg::RefreshListing`      |
//! | `:clear`       | `DocumentMsg::SetText("")`    |
//! | `:quit`, `:q`  | `AppMsg::Quit`                |

use std::path::PathBuf;

use crate::messages::{AppMsg, DocumentMsg, Msg};

/// Map one input line to a message
///
/// Returns a usage message for malformed or unknown commands.
pub fn parse_line(line: &str) -> Result<Msg, String> {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(command) = line.strip_prefix(':') else {
        return Ok(Msg::Document(DocumentMsg::Append(format!("{}\n", line))));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let path_arg = |usage: &str| {
        if arg.is_empty() {
            Err(format!("Usage: {}", usage))
        } else {
            Ok(PathBuf::from(arg))
        }
    };

    let msg = match name {
        "open" | "o" => AppMsg::OpenFile(path_arg(":open PATH")?),
        "save" | "w" => AppMsg::SaveFile,
        "saveas" => AppMsg::SaveFileAs(path_arg(":saveas PATH")?),
        "reload" => AppMsg::ReloadFromDisk,
        "close" => AppMsg::CloseFile,
        "db" => AppMsg::SetDataDirectory(path_arg(":db DIR")?),
        "refresh" => AppMsg::RefreshListing,
        "clear" => return Ok(Msg::Document(DocumentMsg::SetText(String::new()))),
        "quit" | "q" => AppMsg::Quit,
        other => return Err(format!("Unknown command: :{}", other)),
    };
    Ok(Msg::App(msg))
}
