use crate::domain::model::{OutputMode, ParserMode, Report};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScrapeError};
use chrono::{DateTime, Local};
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Cells of each row separated by a single space.
pub fn render_plain(report: &Report) -> String {
    let mut out = String::new();
    for row in report.all_rows() {
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Multi-line cells are drawn on one line; widths are measured on the same text.
fn flatten(cell: &str) -> String {
    cell.replace('\n', " ")
}

/// Left-aligned table with borders and a separated header.
pub fn render_pretty(report: &Report) -> String {
    let columns = report
        .all_rows()
        .map(Vec::len)
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in report.all_rows() {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(flatten(cell).chars().count());
        }
    }

    let border = {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let render_row = |row: &Vec<String>| {
        let mut line = String::from("|");
        for (i, width) in widths.iter().enumerate() {
            let cell = row.get(i).map(|c| flatten(c)).unwrap_or_default();
            let pad = width.saturating_sub(cell.chars().count());
            line.push(' ');
            line.push_str(&cell);
            line.push_str(&" ".repeat(pad + 1));
            line.push('|');
        }
        line
    };

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    out.push_str(&render_row(&report.header));
    out.push('\n');
    out.push_str(&border);
    out.push('\n');
    for row in &report.rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    if !report.rows.is_empty() {
        out.push_str(&border);
        out.push('\n');
    }
    out
}

/// CSV with every field quoted and `\n` line endings.
pub fn render_csv(report: &Report) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());
    for row in report.all_rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| ScrapeError::IoError(e.into_error()))
}

pub fn results_file_name(mode: ParserMode, now: DateTime<Local>, datetime_format: &str) -> String {
    format!("{}_{}.csv", mode, now.format(datetime_format))
}

/// Sends reports to stdout or to a CSV file in the results storage.
pub struct ReportEmitter<S: Storage> {
    output: OutputMode,
    storage: S,
    datetime_format: String,
}

impl<S: Storage> ReportEmitter<S> {
    pub fn new(output: OutputMode, storage: S, datetime_format: impl Into<String>) -> Self {
        Self {
            output,
            storage,
            datetime_format: datetime_format.into(),
        }
    }

    pub fn output(&self) -> OutputMode {
        self.output
    }

    /// Returns the saved file path in `file` mode.
    pub async fn emit(&self, mode: ParserMode, report: &Report) -> Result<Option<String>> {
        match self.output {
            OutputMode::Plain => {
                print!("{}", render_plain(report));
                Ok(None)
            }
            OutputMode::Pretty => {
                print!("{}", render_pretty(report));
                Ok(None)
            }
            OutputMode::File => {
                let file_name = results_file_name(mode, Local::now(), &self.datetime_format);
                let data = render_csv(report)?;
                let path = self.storage.write_file(&file_name, &data).await?;
                tracing::info!("💾 Results saved to {}", path);
                Ok(Some(path))
            }
        }
    }
}
