//! Hourglass progress indicator.
//!
//! The indicator repaints a single status line while a blocking child
//! process runs. It only affects display: install results never depend on
//! it. The animation thread is stopped and joined before the line is
//! finished, so no repaint can land after the final status message.
//!
//! Both the animation and the final line go to the terminal the rest of
//! the UI writes to.

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::theme::PrepareTheme;
use super::SpinnerHandle;

/// Delay between repaints.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(300);

/// Animation frames, selected by wall-clock second.
pub const HOURGLASS_FRAMES: [&str; 4] = ["⌛", "⌛⌛", "⌛⌛⌛", "⌛⌛⌛⌛"];

/// Frame to show at `now`.
pub fn hourglass_frame(now: SystemTime) -> &'static str {
    let secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    HOURGLASS_FRAMES[(secs % HOURGLASS_FRAMES.len() as u64) as usize]
}

fn line_style(template: &str) -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// An animated status line for a long-running install.
pub struct HourglassSpinner {
    bar: ProgressBar,
    term: Term,
    stop: Arc<AtomicBool>,
    animator: Option<JoinHandle<()>>,
    theme: PrepareTheme,
}

impl HourglassSpinner {
    /// Start animating `message` ("⌛ Installing Go ⌛⌛") on `term`.
    pub fn new(message: &str, term: Term) -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::term(term.clone(), 20));
        bar.set_style(line_style("⌛ {msg} {prefix}"));
        bar.set_message(message.to_string());
        bar.set_prefix(hourglass_frame(SystemTime::now()));

        let stop = Arc::new(AtomicBool::new(false));
        let animator = {
            let bar = bar.clone();
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    bar.set_prefix(hourglass_frame(SystemTime::now()));
                    bar.tick();
                    thread::sleep(FRAME_INTERVAL);
                }
            })
        };

        Self {
            bar,
            term,
            stop,
            animator: Some(animator),
            theme: PrepareTheme::detect(),
        }
    }

    /// Whether the animation thread is still owned by this spinner.
    pub fn is_animating(&self) -> bool {
        self.animator.is_some()
    }

    fn stop_animation(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.animator.take() {
            if handle.join().is_err() {
                tracing::debug!("Spinner animation thread panicked");
            }
        }
    }

    fn finish_with(&mut self, line: String) {
        self.stop_animation();
        self.bar.finish_and_clear();
        writeln!(self.term, "{}", line).ok();
    }
}

impl SpinnerHandle for HourglassSpinner {
    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }
}

impl Drop for HourglassSpinner {
    fn drop(&mut self) {
        self.stop_animation();
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
