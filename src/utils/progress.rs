//! Progress reporting for doubling rounds; a no-op when the `progress`
//! feature is disabled

#[cfg(feature = "progress")]
pub use indicatif::{ProgressBar, ProgressStyle};

#[cfg(not(feature = "progress"))]
pub use self::noop::*;

/// Bar with one tick per doubling round
pub fn round_progress(rounds: u64, silent: bool) -> ProgressBar {
    if silent {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(rounds);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.cyan} [{bar:30.cyan/blue}] round {pos}/{len} {msg}")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message("sorting");
    bar
}

#[cfg(not(feature = "progress"))]
mod noop {
    /// No-op progress bar when `progress` feature is disabled
    #[derive(Clone)]
    pub struct ProgressBar;

    impl ProgressBar {
        pub fn new(_len: u64) -> Self {
            ProgressBar
        }

        pub fn hidden() -> Self {
            ProgressBar
        }

        pub fn set_style(&self, _style: ProgressStyle) {}
        pub fn set_message(&self, _msg: impl Into<std::borrow::Cow<'static, str>>) {}
        pub fn inc(&self, _delta: u64) {}
        pub fn finish_and_clear(&self) {}
    }

    /// No-op progress style
    pub struct ProgressStyle;

    impl ProgressStyle {
        pub fn default_bar() -> Self {
            ProgressStyle
        }

        pub fn template(self, _template: &str) -> Result<Self, std::convert::Infallible> {
            Ok(self)
        }

        pub fn progress_chars(self, _chars: &str) -> Self {
            self
        }
    }
}
