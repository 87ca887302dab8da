//! File watcher notification handlers

use crate::commands::Cmd;
use crate::messages::WatchMsg;
use crate::model::{display_name, AppModel};

/// Handle notifications from the bound file's watcher
///
/// Notifications carry the watch generation they were armed with; anything
/// from a watcher that has since been replaced or disarmed is dropped.
pub fn update_watch(model: &mut AppModel, msg: WatchMsg) -> Option<Cmd> {
    match msg {
        WatchMsg::ExternalChange {
            generation,
            path,
            modified,
        } => {
            if generation != model.watch_generation {
                tracing::debug!("Ignoring change from disarmed watcher {}", generation);
                return None;
            }
            tracing::info!(
                "{} changed on disk (mtime {:?})",
                path.display(),
                modified
            );

            let status = format!("File changed on disk: {}", display_name(&path));
            model.ui.reload_available = true;
            model.ui.set_status(status.as_str());
            // The watcher stopped itself after sending; release its handle
            Some(Cmd::batch(vec![Cmd::status(status), Cmd::DisarmWatcher]))
        }

        WatchMsg::FileInaccessible {
            generation,
            path,
            reason,
        } => {
            if generation != model.watch_generation {
                return None;
            }
            tracing::warn!("{} is no longer accessible: {}", path.display(), reason);

            let status = format!("File no longer accessible: {}", display_name(&path));
            model.ui.reload_available = false;
            model.ui.set_status(status.as_str());
            Some(Cmd::batch(vec![Cmd::status(status), Cmd::DisarmWatcher]))
        }
    }
}
