//! Single-line progress indicator
//!
//! Purely cosmetic: a background task redraws `Testing... <glyph>` every
//! tick until stopped. Nothing is drawn when stdout is not a terminal.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Time between glyph changes
pub const TICK_INTERVAL: Duration = Duration::from_millis(350);

/// Glyph cycle; the trailing empty string is shown once finished
const TICK_STRINGS: [&str; 5] = ["|", "/", "-", "\\", ""];

/// Running progress indicator
pub struct Spinner {
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start drawing on stdout
    pub fn start(message: &str) -> Self {
        Self::start_with_target(message, ProgressDrawTarget::stdout())
    }

    /// Start drawing on `target`
    pub fn start_with_target(message: &str, target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(None, target);
        pb.set_style(
            ProgressStyle::with_template("{msg} {spinner}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&TICK_STRINGS),
        );
        pb.set_message(message.to_string());

        let (cancel, mut cancelled) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK_INTERVAL);
            loop {
                tokio::select! {
                    _ = &mut cancelled => break,
                    _ = ticker.tick() => pb.tick(),
                }
            }
            pb.finish_and_clear();
        });

        Self {
            cancel: Some(cancel),
            task: Some(task),
        }
    }

    /// Stop the indicator; nothing is drawn once this returns
    pub async fn stop(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::TermLike;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Terminal stand-in that records every draw operation
    #[derive(Debug, Clone, Default)]
    struct RecordingTerm {
        writes: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingTerm {
        fn record(&self, entry: String) -> io::Result<()> {
            self.writes.lock().unwrap().push(entry);
            Ok(())
        }

        fn len(&self) -> usize {
            self.writes.lock().unwrap().len()
        }

        fn lines(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl TermLike for RecordingTerm {
        fn width(&self) -> u16 {
            80
        }

        fn move_cursor_up(&self, _n: usize) -> io::Result<()> {
            Ok(())
        }

        fn move_cursor_down(&self, _n: usize) -> io::Result<()> {
            Ok(())
        }

        fn move_cursor_right(&self, _n: usize) -> io::Result<()> {
            Ok(())
        }

        fn move_cursor_left(&self, _n: usize) -> io::Result<()> {
            Ok(())
        }

        fn write_line(&self, s: &str) -> io::Result<()> {
            self.record(s.to_string())
        }

        fn write_str(&self, s: &str) -> io::Result<()> {
            self.record(s.to_string())
        }

        fn clear_line(&self) -> io::Result<()> {
            self.record("<clear>".to_string())
        }

        fn flush(&self) -> io::Result<()> {
            Ok(())
        }
    }

    fn recording_target() -> (RecordingTerm, ProgressDrawTarget) {
        let term = RecordingTerm::default();
        let target = ProgressDrawTarget::term_like(Box::new(term.clone()));
        (term, target)
    }

    #[tokio::test]
    async fn test_start_then_stop_immediately() {
        let spinner = Spinner::start_with_target("Testing...", ProgressDrawTarget::hidden());
        tokio::time::timeout(Duration::from_secs(2), spinner.stop())
            .await
            .expect("spinner did not stop");
    }

    #[tokio::test]
    async fn test_stop_after_several_ticks() {
        let spinner = Spinner::start_with_target("Testing...", ProgressDrawTarget::hidden());
        tokio::time::sleep(TICK_INTERVAL * 3).await;
        tokio::time::timeout(TICK_INTERVAL * 2, spinner.stop())
            .await
            .expect("spinner did not stop within a tick");
    }

    #[tokio::test]
    async fn test_nothing_drawn_after_stop() {
        let (term, target) = recording_target();
        let spinner = Spinner::start_with_target("Testing...", target);
        tokio::time::sleep(TICK_INTERVAL * 4).await;
        spinner.stop().await;

        let drawn = term.len();
        let lines = term.lines();
        assert!(
            lines.iter().any(|line| line.starts_with("Testing...")),
            "no spinner frames drawn: {:?}",
            lines
        );

        tokio::time::sleep(TICK_INTERVAL * 3).await;
        assert_eq!(term.len(), drawn, "drawn after stop: {:?}", term.lines());
    }

    #[tokio::test]
    async fn test_drop_stops_drawing() {
        let (term, target) = recording_target();
        let spinner = Spinner::start_with_target("Testing...", target);
        tokio::time::sleep(TICK_INTERVAL * 2).await;
        drop(spinner);

        // One in-flight tick may still land before the task sees the cancel.
        tokio::time::sleep(TICK_INTERVAL * 2).await;
        let drawn = term.len();
        tokio::time::sleep(TICK_INTERVAL * 3).await;
        assert_eq!(term.len(), drawn, "still drawing after drop: {:?}", term.lines());
    }
}
