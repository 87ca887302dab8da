//! External modification watcher for the bound file
//!
//! Polls the bound file's modification time and compares it to the baseline
//! recorded at the last load or save. The first change found is reported
//! once, after which the watcher disarms itself; it only fires again once
//! the runtime arms a new watcher for a new baseline.

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::{Duration, SystemTime};

use crate::messages::{Msg, WatchMsg};
use crate::model::FileBinding;
use crate::periodic::PeriodicTask;

/// Result of comparing a file on disk against its binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchStatus {
    Unchanged,
    /// Modified after the baseline; carries the live modification time
    Changed(SystemTime),
    /// The file could not be inspected (deleted, renamed, permissions)
    Inaccessible(String),
}

/// Compare the live modification time of the bound file to its baseline
pub fn check_binding(binding: &FileBinding) -> WatchStatus {
    match std::fs::metadata(&binding.path).and_then(|m| m.modified()) {
        Ok(modified) if modified > binding.baseline => WatchStatus::Changed(modified),
        Ok(_) => WatchStatus::Unchanged,
        Err(e) => WatchStatus::Inaccessible(e.to_string()),
    }
}

/// Poll state for one armed binding
///
/// Kept apart from the thread so the decision logic is testable without
/// timing.
#[derive(Debug)]
struct PollState {
    binding: FileBinding,
    generation: u64,
    grace_polls: u32,
    failed_polls: u32,
}

impl PollState {
    /// Decide what one poll means: keep going, or the message to send before
    /// disarming
    fn on_status(&mut self, status: WatchStatus) -> Option<WatchMsg> {
        match status {
            WatchStatus::Unchanged => {
                self.failed_polls = 0;
                None
            }
            WatchStatus::Changed(modified) => Some(WatchMsg::ExternalChange {
                generation: self.generation,
                path: self.binding.path.clone(),
                modified,
            }),
            WatchStatus::Inaccessible(reason) => {
                self.failed_polls += 1;
                if self.failed_polls <= self.grace_polls {
                    tracing::debug!(
                        "{} inaccessible ({}/{}): {}",
                        self.binding.path.display(),
                        self.failed_polls,
                        self.grace_polls,
                        reason
                    );
                    None
                } else {
                    Some(WatchMsg::FileInaccessible {
                        generation: self.generation,
                        path: self.binding.path.clone(),
                        reason,
                    })
                }
            }
        }
    }
}

/// One armed watcher, bound to one baseline
#[derive(Debug)]
pub struct FileWatcher {
    path: PathBuf,
    generation: u64,
    task: PeriodicTask,
}

impl FileWatcher {
    /// Start polling `binding` every `interval`
    ///
    /// After `grace_polls` consecutive failed polls the file counts as gone
    /// and `WatchMsg::FileInaccessible` is sent.
    pub fn spawn(
        binding: FileBinding,
        generation: u64,
        interval: Duration,
        grace_polls: u32,
        sender: Sender<Msg>,
    ) -> std::io::Result<Self> {
        let path = binding.path.clone();
        let mut state = PollState {
            binding,
            generation,
            grace_polls,
            failed_polls: 0,
        };

        tracing::debug!(
            "Arming watcher for {} (generation {})",
            path.display(),
            generation
        );

        let task = PeriodicTask::spawn(
            format!("sqlpad-watch-{}", generation),
            interval,
            move || {
                let status = check_binding(&state.binding);
                match state.on_status(status) {
                    None => ControlFlow::Continue(()),
                    Some(msg) => {
                        tracing::info!("Watcher firing: {:?}", msg);
                        let _ = sender.send(Msg::Watch(msg));
                        ControlFlow::Break(())
                    }
                }
            },
        )?;

        Ok(Self {
            path,
            generation,
            task,
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the watcher has fired (or been cancelled) and stopped polling
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop polling and wait for the thread to exit
    pub fn cancel(self) {
        tracing::debug!(
            "Disarming watcher for {} (generation {})",
            self.path.display(),
            self.generation
        );
        self.task.stop();
    }
}
