//! Progress display while candidate images are decoded

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static LOADING_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar tracking candidate files as they load
///
/// A hidden reporter accepts the same calls and draws nothing, so callers
/// never branch on quiet mode.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a visible reporter labelled with `prefix`
    pub fn new(prefix: &str) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(LOADING_STYLE.clone());
        bar.set_prefix(prefix.to_string());
        Self { bar }
    }

    /// Create a reporter that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Set the number of files expected
    pub fn set_total(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    /// Record one processed file
    pub fn advance(&self, path: &Path) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.bar.set_message(display_name);
        self.bar.inc(1);
    }

    /// Number of files recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Number of files expected
    pub fn total(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Close the bar, leaving a summary line
    pub fn finish(&self, loaded: usize) {
        self.bar
            .finish_with_message(format!("{loaded} usable candidates"));
    }
}
