//! Upload progress feedback.

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

use crate::page::{FileSelection, ProgressIndicator, ProgressState};
use crate::utils::percent_label;

/// What happens to a form submission after the controller saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Proceed,
}

pub struct UploadProgressController {
    indicator: Arc<dyn ProgressIndicator>,
    selection: FileSelection,
}

impl UploadProgressController {
    pub fn new(indicator: Arc<dyn ProgressIndicator>, selection: FileSelection) -> Self {
        Self {
            indicator,
            selection,
        }
    }

    /// Reacts to a submission of the upload form. With at least one file
    /// selected the indicator is shown and reset to 0%; otherwise nothing
    /// changes. The submission is never held back.
    pub fn handle_submit(&self) -> SubmitAction {
        if !self.selection.is_empty() {
            debug!(files = self.selection.files().len(), "upload submitted");
            self.indicator.reveal();
            self.indicator.set_bar(0, &percent_label(0));
        }
        SubmitAction::Proceed
    }
}

/// Progress indicator drawn on the terminal with `indicatif`. The bar
/// stays hidden until revealed.
pub struct TerminalProgress {
    bar: ProgressBar,
    state: Mutex<ProgressState>,
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::hidden());
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏ "),
        );
        Self {
            bar,
            state: Mutex::new(ProgressState::Hidden),
        }
    }

    /// Ends the bar, leaving it on screen. Called once the submission
    /// has been answered.
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl ProgressIndicator for TerminalProgress {
    fn reveal(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state == ProgressState::Hidden {
            self.bar.set_draw_target(ProgressDrawTarget::stderr());
            *state = ProgressState::Active {
                percent: 0,
                label: String::new(),
            };
        }
    }

    fn set_bar(&self, percent: u8, label: &str) {
        self.bar.set_position(u64::from(percent.min(100)));
        self.bar.set_message(label.to_string());
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if let ProgressState::Active { .. } = *state {
            *state = ProgressState::Active {
                percent,
                label: label.to_string(),
            };
        }
    }

    fn state(&self) -> ProgressState {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ProgressHandle;
    use std::path::PathBuf;

    #[derive(Default)]
    struct CountingIndicator {
        inner: ProgressHandle,
        reveals: Mutex<u32>,
        resets: Mutex<Vec<(u8, String)>>,
    }

    impl ProgressIndicator for CountingIndicator {
        fn reveal(&self) {
            *self.reveals.lock().unwrap() += 1;
            self.inner.reveal();
        }

        fn set_bar(&self, percent: u8, label: &str) {
            self.resets.lock().unwrap().push((percent, label.to_string()));
            self.inner.set_bar(percent, label);
        }

        fn state(&self) -> ProgressState {
            self.inner.state()
        }
    }

    fn selection() -> FileSelection {
        FileSelection::new(vec![PathBuf::from("report.pdf")])
    }

    #[test]
    fn submission_with_file_shows_indicator_at_zero() {
        let indicator = Arc::new(CountingIndicator::default());
        let controller = UploadProgressController::new(indicator.clone(), selection());

        assert_eq!(controller.handle_submit(), SubmitAction::Proceed);

        assert_eq!(
            indicator.state(),
            ProgressState::Active {
                percent: 0,
                label: "0%".to_string()
            }
        );
        assert_eq!(*indicator.reveals.lock().unwrap(), 1);
        assert_eq!(
            *indicator.resets.lock().unwrap(),
            vec![(0, "0%".to_string())]
        );
    }

    #[test]
    fn each_submission_resets_once() {
        let indicator = Arc::new(CountingIndicator::default());
        let controller = UploadProgressController::new(indicator.clone(), selection());

        controller.handle_submit();
        indicator.set_bar(55, "55%");
        controller.handle_submit();

        let resets = indicator.resets.lock().unwrap();
        assert_eq!(resets.iter().filter(|(p, _)| *p == 0).count(), 2);
        drop(resets);
        assert_eq!(
            indicator.state(),
            ProgressState::Active {
                percent: 0,
                label: "0%".to_string()
            }
        );
    }

    #[test]
    fn empty_selection_leaves_indicator_hidden() {
        let indicator = Arc::new(CountingIndicator::default());
        let controller =
            UploadProgressController::new(indicator.clone(), FileSelection::empty());

        assert_eq!(controller.handle_submit(), SubmitAction::Proceed);

        assert_eq!(indicator.state(), ProgressState::Hidden);
        assert_eq!(*indicator.reveals.lock().unwrap(), 0);
        assert!(indicator.resets.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_selection_keeps_active_indicator_as_is() {
        let indicator = Arc::new(CountingIndicator::default());
        indicator.inner.reveal();
        indicator.inner.set_bar(55, "55%");
        let controller =
            UploadProgressController::new(indicator.clone(), FileSelection::empty());

        assert_eq!(controller.handle_submit(), SubmitAction::Proceed);

        assert_eq!(
            indicator.state(),
            ProgressState::Active {
                percent: 55,
                label: "55%".to_string()
            }
        );
        assert_eq!(*indicator.reveals.lock().unwrap(), 0);
        assert!(indicator.resets.lock().unwrap().is_empty());
    }

    #[test]
    fn terminal_progress_tracks_state() {
        let progress = TerminalProgress::new();
        assert_eq!(progress.state(), ProgressState::Hidden);
        progress.reveal();
        progress.set_bar(0, "0%");
        assert_eq!(
            progress.state(),
            ProgressState::Active {
                percent: 0,
                label: "0%".to_string()
            }
        );
    }
}
