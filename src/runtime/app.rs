//! The render-surface loop
//!
//! `Runtime` is the only owner of `AppModel`. Everything else (the highlight
//! scheduler, loaders, savers, watchers) runs on its own thread and reports
//! back through the message queue, which the runtime drains on its thread.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::commands::Cmd;
use crate::config::EditorConfig;
use crate::listing::{list_tables, DirectoryWatcher};
use crate::loader::{load_file, LoadError, LoadErrorKind};
use crate::messages::{AppMsg, Msg};
use crate::model::{AppModel, FileBinding};
use crate::save::{save_file, SaveError};
use crate::scheduler::HighlightScheduler;
use crate::surface::RenderSurface;
use crate::syntax::Tokenizer;
use crate::update::update;
use crate::watcher::FileWatcher;

/// Smallest progress step forwarded from a loader thread
const PROGRESS_STEP: f64 = 0.01;

pub struct Runtime<S: RenderSurface> {
    model: AppModel,
    surface: S,
    tokenizer: Arc<dyn Tokenizer>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    scheduler: Option<HighlightScheduler>,
    watcher: Option<FileWatcher>,
    dir_watcher: Option<DirectoryWatcher>,
    running: bool,
}

impl<S: RenderSurface> Runtime<S> {
    pub fn new(config: EditorConfig, surface: S, tokenizer: Arc<dyn Tokenizer>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model: AppModel::new(config),
            surface,
            tokenizer,
            msg_tx,
            msg_rx,
            scheduler: None,
            watcher: None,
            dir_watcher: None,
            running: true,
        }
    }

    /// Start the highlight scheduler (once per session)
    pub fn start(&mut self) -> Result<()> {
        if self.scheduler.is_some() {
            return Ok(());
        }
        let scheduler = HighlightScheduler::start(
            self.model.config.highlight_interval(),
            self.model.editor.snapshots(),
            Arc::clone(&self.tokenizer),
            self.msg_tx.clone(),
        )
        .context("Failed to start highlight scheduler")?;
        self.scheduler = Some(scheduler);
        Ok(())
    }

    /// Sender for feeding messages from other threads (input, tests)
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a file watcher is armed and still polling
    pub fn watcher_armed(&self) -> bool {
        self.watcher.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Run one message through `update` and execute the resulting command
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }

            // =====================================================================
            // File I/O (worker threads)
            // =====================================================================
            Cmd::LoadFile { path, generation } => self.spawn_load(path, generation),
            Cmd::SaveFile {
                path,
                content,
                generation,
            } => self.spawn_save(path, content, generation),

            // =====================================================================
            // Watchers
            // =====================================================================
            Cmd::ArmWatcher {
                binding,
                generation,
            } => self.arm_watcher(binding, generation),
            Cmd::DisarmWatcher => {
                if let Some(watcher) = self.watcher.take() {
                    watcher.cancel();
                }
            }
            Cmd::ListDirectory { dir } => self.spawn_listing(dir),
            Cmd::WatchDirectory { dir } => {
                // Drop the old watcher before watching the new directory
                self.dir_watcher = None;
                match DirectoryWatcher::new(
                    dir.clone(),
                    self.model.config.listing_extension(),
                    self.model.config.listing_debounce(),
                    self.msg_tx.clone(),
                ) {
                    Ok(watcher) => self.dir_watcher = Some(watcher),
                    Err(e) => {
                        tracing::warn!("Could not watch data directory {}: {}", dir.display(), e)
                    }
                }
            }

            // =====================================================================
            // Surface
            // =====================================================================
            Cmd::ApplyStyles { offset, spans } => self.surface.apply_styles(offset, &spans),
            Cmd::ReplaceText(text) => self.surface.replace_text(&text),
            Cmd::SetLabel { label, text } => self.surface.set_label(label, &text),
            Cmd::SetProgress(fraction) => self.surface.set_progress(fraction),
            Cmd::ShowError { title, message } => self.surface.show_error(&title, &message),
            Cmd::RefreshListing(entries) => self.surface.refresh_listing(&entries),

            Cmd::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
            }
        }
    }

    fn spawn_load(&mut self, path: PathBuf, generation: u64) {
        let tx = self.msg_tx.clone();
        let thread_path = path.clone();
        let spawned = thread::Builder::new()
            .name("sqlpad-load".into())
            .spawn(move || {
                let progress_tx = tx.clone();
                let mut last_sent = f64::NEG_INFINITY;
                let result = load_file(&thread_path, |fraction| {
                    if fraction >= 1.0 || fraction - last_sent >= PROGRESS_STEP {
                        last_sent = fraction;
                        let _ = progress_tx.send(Msg::App(AppMsg::LoadProgress {
                            generation,
                            fraction,
                        }));
                    }
                });
                let _ = tx.send(Msg::App(AppMsg::FileLoaded { generation, result }));
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn loader thread: {}", e);
            let result = Err(LoadError {
                path,
                kind: LoadErrorKind::Io(e.to_string()),
            });
            let _ = self
                .msg_tx
                .send(Msg::App(AppMsg::FileLoaded { generation, result }));
        }
    }

    fn spawn_save(&mut self, path: PathBuf, content: String, generation: u64) {
        let tx = self.msg_tx.clone();
        let slack = self.model.config.save_baseline_slack();
        let thread_path = path.clone();
        let spawned = thread::Builder::new()
            .name("sqlpad-save".into())
            .spawn(move || {
                let result = save_file(&thread_path, &content, slack);
                let _ = tx.send(Msg::App(AppMsg::SaveCompleted {
                    generation,
                    path: thread_path,
                    result,
                }));
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn save thread: {}", e);
            let result = Err(SaveError {
                path: path.clone(),
                message: e.to_string(),
            });
            let _ = self.msg_tx.send(Msg::App(AppMsg::SaveCompleted {
                generation,
                path,
                result,
            }));
        }
    }

    fn spawn_listing(&mut self, dir: PathBuf) {
        let tx = self.msg_tx.clone();
        let extension = self.model.config.listing_extension().to_string();
        let spawned = thread::Builder::new()
            .name("sqlpad-list".into())
            .spawn(move || {
                let result = list_tables(&dir, &extension).map_err(|e| e.to_string());
                let _ = tx.send(Msg::App(AppMsg::ListingLoaded { dir, result }));
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn listing thread: {}", e);
        }
    }

    fn arm_watcher(&mut self, binding: FileBinding, generation: u64) {
        if let Some(old) = self.watcher.take() {
            old.cancel();
        }
        match FileWatcher::spawn(
            binding,
            generation,
            self.model.config.watch_interval(),
            self.model.config.missing_file_grace_polls,
            self.msg_tx.clone(),
        ) {
            Ok(watcher) => self.watcher = Some(watcher),
            Err(e) => tracing::error!("Failed to start file watcher: {}", e),
        }
    }

    /// Process all pending messages without blocking
    ///
    /// Returns the number of messages handled.
    pub fn process_async_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            handled += 1;
        }
        handled
    }

    /// Wait up to `timeout` for a message, then drain the queue
    ///
    /// Returns the number of messages handled.
    pub fn pump(&mut self, timeout: Duration) -> usize {
        match self.msg_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.dispatch(msg);
                1 + self.process_async_messages()
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    /// Pump messages until `done` holds or `timeout` elapses
    ///
    /// Returns whether `done` became true.
    pub fn pump_until(&mut self, timeout: Duration, mut done: impl FnMut(&Self) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if done(self) {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            self.pump((deadline - now).min(Duration::from_millis(20)));
        }
    }

    /// Run until `Quit`
    pub fn run(&mut self) -> Result<()> {
        self.start()?;
        tracing::info!("Runtime started");

        while self.running {
            match self.msg_rx.recv() {
                Ok(msg) => self.dispatch(msg),
                // Unreachable while we hold a sender ourselves
                Err(_) => break,
            }
        }

        self.shutdown();
        tracing::info!("Runtime stopped");
        Ok(())
    }

    /// Stop the scheduler and all watchers and wait for their threads
    pub fn shutdown(&mut self) {
        self.running = false;
        if let Some(scheduler) = self.scheduler.take() {
            scheduler.stop();
        }
        if let Some(watcher) = self.watcher.take() {
            watcher.cancel();
        }
        self.dir_watcher = None;
    }
}

impl<S: RenderSurface> Drop for Runtime<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
