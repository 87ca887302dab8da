//! Periodic background highlighting
//!
//! The scheduler thread wakes every period, loads the latest published
//! buffer snapshot and, if the revision moved since the last pass, runs the
//! tokenizer and posts the resulting spans to the runtime queue. It never
//! touches render state; the runtime decides whether a result is still
//! current when it arrives.

use std::ops::ControlFlow;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use crate::messages::{Msg, SyntaxMsg};
use crate::model::{BufferSnapshot, SnapshotCell};
use crate::periodic::PeriodicTask;
use crate::syntax::{compute_highlighting, Tokenizer};

/// Run one highlighting pass over `snapshot`
pub fn highlight_pass(snapshot: &BufferSnapshot, tokenizer: &dyn Tokenizer) -> SyntaxMsg {
    match compute_highlighting(snapshot, tokenizer) {
        Ok(spans) => SyntaxMsg::HighlightsComputed(spans),
        Err(e) => SyntaxMsg::ClassificationFailed {
            revision: snapshot.revision,
            message: e.message,
        },
    }
}

#[derive(Debug)]
pub struct HighlightScheduler {
    task: PeriodicTask,
}

impl HighlightScheduler {
    /// Start the highlighting loop
    ///
    /// The first pass runs one `period` after starting.
    pub fn start(
        period: Duration,
        snapshots: Arc<SnapshotCell>,
        tokenizer: Arc<dyn Tokenizer>,
        sender: Sender<Msg>,
    ) -> std::io::Result<Self> {
        let mut last_revision: Option<u64> = None;

        let task = PeriodicTask::spawn("sqlpad-highlight", period, move || {
            let snapshot = snapshots.load();
            if last_revision == Some(snapshot.revision) {
                return ControlFlow::Continue(());
            }

            let msg = highlight_pass(&snapshot, tokenizer.as_ref());
            last_revision = Some(snapshot.revision);

            if let SyntaxMsg::ClassificationFailed { revision, message } = &msg {
                tracing::debug!("Classification failed at revision {}: {}", revision, message);
            }

            if sender.send(Msg::Syntax(msg)).is_err() {
                tracing::debug!("Runtime queue closed, stopping highlighter");
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        })?;

        Ok(Self { task })
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the loop and wait for the thread to exit
    pub fn stop(self) {
        self.task.stop();
    }
}
