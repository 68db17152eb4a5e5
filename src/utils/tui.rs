use indicatif::{ProgressBar, ProgressStyle};

/// A 0-100 bar for the export.
pub fn create_progress_bar(message: &str) -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("{msg} [{bar:30}] {pos}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar.set_message(message.to_string());
    bar
}
