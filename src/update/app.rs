//! App message handlers (file operations, data directory, lifecycle)

use std::path::PathBuf;

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::{display_name, AppModel, FileBinding};

/// Handle app messages (file operations, data directory, lifecycle)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::OpenFile(path) => Some(begin_load(model, path)),

        AppMsg::LoadProgress {
            generation,
            fraction,
        } => {
            if generation != model.load_generation || !model.ui.is_loading {
                return None;
            }
            let value = model.ui.advance_progress(fraction);
            Some(Cmd::SetProgress(value))
        }

        AppMsg::FileLoaded { generation, result } => {
            if generation != model.load_generation {
                tracing::debug!(
                    "Discarding superseded load: generation {} != current {}",
                    generation,
                    model.load_generation
                );
                return None;
            }
            model.ui.is_loading = false;

            match result {
                Ok(file) => {
                    let name = display_name(&file.path);
                    let binding = FileBinding::new(file.path, file.modified);
                    tracing::info!("Loaded {} ({} bytes)", name, file.text.len());

                    model.editor.replace_text(file.text.as_str());
                    model.editor.set_binding(Some(binding.clone()));
                    model.ui.reload_available = false;
                    model.ui.progress = Some(1.0);

                    Some(Cmd::batch(vec![
                        Cmd::ReplaceText(file.text),
                        Cmd::SetProgress(1.0),
                        set_status(model, format!("File loaded: {}", name)),
                        arm_watcher(model, binding),
                    ]))
                }
                Err(e) => {
                    tracing::warn!("Load failed: {}", e.user_message());

                    model.editor.clear();
                    model.editor.set_binding(None);
                    model.ui.reload_available = false;

                    Some(Cmd::batch(vec![
                        Cmd::ReplaceText(String::new()),
                        set_status(model, "Failed to load file"),
                        disarm_watcher(model),
                        Cmd::ShowError {
                            title: "Error".to_string(),
                            message: format!("Could not load file from:\n {}", e.path.display()),
                        },
                    ]))
                }
            }
        }

        AppMsg::SaveFile => match model.editor.binding() {
            Some(binding) => {
                let path = binding.path.clone();
                Some(begin_save(model, path))
            }
            None => Some(set_status(model, "No file path - use save-as")),
        },

        AppMsg::SaveFileAs(path) => Some(begin_save(model, path)),

        AppMsg::SaveCompleted {
            generation,
            path,
            result,
        } => {
            if generation != model.save_generation {
                // The buffer was closed, reopened or saved again meanwhile
                tracing::debug!(
                    "Ignoring superseded save of {}: generation {} != current {}",
                    path.display(),
                    generation,
                    model.save_generation
                );
                let status = match result {
                    Ok(_) => format!("File saved: {}", display_name(&path)),
                    Err(e) => format!("Failed to save file: {}", e.message),
                };
                return Some(set_status(model, status));
            }
            model.ui.is_saving = false;
            match result {
                Ok(baseline) => {
                    let binding = FileBinding::new(path, baseline);
                    let name = binding.display_name();
                    tracing::info!("Saved {}", binding.path.display());

                    model.editor.set_binding(Some(binding.clone()));
                    model.ui.reload_available = false;

                    Some(Cmd::batch(vec![
                        set_status(model, format!("File saved: {}", name)),
                        arm_watcher(model, binding),
                    ]))
                }
                Err(e) => {
                    tracing::warn!("Save failed: {}", e);
                    let status = set_status(model, format!("Failed to save file: {}", e.message));

                    // The previous binding keeps its old baseline
                    let rearm = match model.editor.binding().cloned() {
                        Some(binding) => arm_watcher(model, binding),
                        None => Cmd::None,
                    };
                    Some(Cmd::batch(vec![status, rearm]))
                }
            }
        }

        AppMsg::ReloadFromDisk => match model.editor.binding() {
            Some(binding) => {
                let path = binding.path.clone();
                model.ui.reload_available = false;
                Some(begin_load(model, path))
            }
            None => Some(set_status(model, "No file to reload")),
        },

        AppMsg::CloseFile => {
            // Results of an in-flight load or save no longer apply
            model.next_load_generation();
            model.next_save_generation();
            model.ui.is_loading = false;
            model.ui.is_saving = false;

            model.editor.clear();
            model.editor.set_binding(None);
            model.ui.reload_available = false;
            model.ui.progress = None;
            model.ui.set_feedback("Everything is cleared.");

            Some(Cmd::batch(vec![
                disarm_watcher(model),
                Cmd::ReplaceText(String::new()),
                Cmd::SetProgress(0.0),
                set_status(model, ""),
                Cmd::feedback("Everything is cleared."),
            ]))
        }

        AppMsg::SetDataDirectory(dir) => {
            tracing::info!("Data directory set to {}", dir.display());
            model.ui.data_dir = Some(dir.clone());
            model.ui.listing.clear();
            model.ui.set_feedback("Database connection successful.");

            Some(Cmd::batch(vec![
                Cmd::feedback("Database connection successful."),
                Cmd::ListDirectory { dir: dir.clone() },
                Cmd::WatchDirectory { dir },
            ]))
        }

        AppMsg::RefreshListing => model
            .ui
            .data_dir
            .clone()
            .map(|dir| Cmd::ListDirectory { dir }),

        AppMsg::ListingLoaded { dir, result } => {
            if model.ui.data_dir.as_ref() != Some(&dir) {
                tracing::debug!("Discarding listing for old directory {}", dir.display());
                return None;
            }
            match result {
                Ok(entries) => {
                    model.ui.listing = entries.clone();
                    Some(Cmd::RefreshListing(entries))
                }
                Err(e) => {
                    tracing::warn!("Could not list {}: {}", dir.display(), e);
                    let message = format!("Could not read data directory: {}", e);
                    model.ui.listing.clear();
                    model.ui.set_feedback(message.as_str());
                    Some(Cmd::batch(vec![
                        Cmd::feedback(message),
                        Cmd::RefreshListing(Vec::new()),
                    ]))
                }
            }
        }

        AppMsg::Quit => Some(Cmd::Quit),
    }
}

/// Start loading `path`, superseding any load already in flight
fn begin_load(model: &mut AppModel, path: PathBuf) -> Cmd {
    let generation = model.next_load_generation();
    model.next_save_generation();
    model.ui.is_loading = true;
    model.ui.is_saving = false;
    model.ui.progress = Some(0.0);

    Cmd::batch(vec![
        // The old binding's watcher must not fire while the new file streams in
        disarm_watcher(model),
        set_status(model, "Loading..."),
        Cmd::SetProgress(0.0),
        Cmd::LoadFile { path, generation },
    ])
}

/// Start writing the buffer to `path`
///
/// The watcher is disarmed first so our own write is never reported as an
/// external change.
fn begin_save(model: &mut AppModel, path: PathBuf) -> Cmd {
    let generation = model.next_save_generation();
    model.ui.is_saving = true;
    let content = model.editor.text().to_string();

    Cmd::batch(vec![
        disarm_watcher(model),
        set_status(model, "Saving..."),
        Cmd::SaveFile {
            path,
            content,
            generation,
        },
    ])
}

fn set_status(model: &mut AppModel, text: impl Into<String>) -> Cmd {
    let text = text.into();
    model.ui.set_status(text.as_str());
    Cmd::status(text)
}

pub(super) fn arm_watcher(model: &mut AppModel, binding: FileBinding) -> Cmd {
    let generation = model.next_watch_generation();
    Cmd::ArmWatcher {
        binding,
        generation,
    }
}

pub(super) fn disarm_watcher(model: &mut AppModel) -> Cmd {
    model.next_watch_generation();
    Cmd::DisarmWatcher
}
