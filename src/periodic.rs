//! Cancellable periodic background tasks
//!
//! A `PeriodicTask` owns one named thread that calls a tick closure at a
//! fixed interval. The thread sleeps on a shutdown channel rather than a
//! plain sleep, so `stop` wakes it immediately. The closure can end the task
//! itself by returning `ControlFlow::Break`. Dropping the handle stops and
//! joins the thread.

use std::io;
use std::ops::ControlFlow;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct PeriodicTask {
    name: String,
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    /// Spawn a thread that calls `tick` every `period` until stopped
    ///
    /// The first tick happens one `period` after spawning.
    pub fn spawn<F>(name: impl Into<String>, period: Duration, mut tick: F) -> io::Result<Self>
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let name = name.into();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let thread_name = name.clone();
        let handle = thread::Builder::new().name(name.clone()).spawn(move || {
            tracing::debug!("{}: started (period {:?})", thread_name, period);
            loop {
                match shutdown_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        if tick().is_break() {
                            tracing::debug!("{}: finished", thread_name);
                            break;
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        tracing::debug!("{}: cancelled", thread_name);
                        break;
                    }
                }
            }
        })?;

        Ok(Self {
            name,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the thread has exited (cancelled or finished on its own)
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Signal shutdown and wait for the thread to exit
    pub fn stop(mut self) {
        self.shutdown_and_join();
    }

    fn shutdown_and_join(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // Err means the thread already exited
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("{}: thread panicked", self.name);
            }
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.shutdown_and_join();
    }
}

impl std::fmt::Debug for PeriodicTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicTask")
            .field("name", &self.name)
            .field("finished", &self.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_ticks_repeatedly() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let task = PeriodicTask::spawn("test-ticks", Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        })
        .expect("spawn failed");

        assert!(wait_for(|| count.load(Ordering::SeqCst) >= 3));
        task.stop();
    }

    #[test]
    fn test_stop_prevents_further_ticks() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let task = PeriodicTask::spawn("test-stop", Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        })
        .expect("spawn failed");

        assert!(wait_for(|| count.load(Ordering::SeqCst) >= 1));
        task.stop();

        let after_stop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_stop_does_not_wait_for_period() {
        let task = PeriodicTask::spawn("test-long", Duration::from_secs(3600), || {
            ControlFlow::Continue(())
        })
        .expect("spawn failed");

        let started = Instant::now();
        task.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_break_finishes_task() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let task = PeriodicTask::spawn("test-break", Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Break(())
        })
        .expect("spawn failed");

        assert!(wait_for(|| task.is_finished()));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_joins_thread() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        {
            let _task = PeriodicTask::spawn("test-drop", Duration::from_millis(5), move || {
                counter.fetch_add(1, Ordering::SeqCst);
                ControlFlow::Continue(())
            })
            .expect("spawn failed");
        }
        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn test_thread_is_named() {
        let task = PeriodicTask::spawn("sqlpad-test-name", Duration::from_secs(60), || {
            ControlFlow::Continue(())
        })
        .expect("spawn failed");
        assert_eq!(task.name(), "sqlpad-test-name");
        assert!(!task.is_finished());
    }
}
