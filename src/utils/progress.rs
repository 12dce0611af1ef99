//! Progress bars for per-page loops, sharing stderr with the log output.
//!
//! Every bar is registered with one process-wide [`MultiProgress`]; the log
//! writer suspends it while a line is written so records never land in the
//! middle of a bar.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

fn bars() -> &'static MultiProgress {
    static BARS: OnceLock<MultiProgress> = OnceLock::new();
    BARS.get_or_init(MultiProgress::new)
}

/// Progress bar for a per-page loop. Hidden automatically when stderr is
/// not a terminal.
pub fn page_progress(len: usize, label: &str) -> ProgressBar {
    let bar = bars().add(ProgressBar::new(len as u64));
    let style = ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar.set_message(label.to_string());
    bar
}

/// stderr writer for the log subscriber that clears active bars before
/// writing and redraws them afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        bars().suspend(|| io::stderr().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        bars().suspend(|| io::stderr().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressWriter {
    type Writer = ProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        *self
    }
}
