use std::fmt;

/// Parser mode selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ParserMode {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl ParserMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParserMode::WhatsNew => "whats-new",
            ParserMode::LatestVersions => "latest-versions",
            ParserMode::Download => "download",
            ParserMode::Pep => "pep",
        }
    }
}

impl fmt::Display for ParserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a finished report is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputMode {
    #[default]
    Plain,
    Pretty,
    File,
}

/// One entry of the PEP index listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRecord {
    pub number: u32,
    pub relative_url: String,
    /// Second character of the type/status cell; empty for drafts.
    pub status_code: String,
}

/// Tabular result of a parser mode. The header is emitted as the first row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header followed by the data rows.
    pub fn all_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }
}

pub const TOTAL_KEY: &str = "Total";

/// Count of proposals per authoritative status, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusFrequency {
    counts: Vec<(String, usize)>,
    total: Option<usize>,
}

impl StatusFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(s, _)| s == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    /// Fixes the `Total` entry to the sum of the counts seen so far.
    pub fn finish(&mut self) {
        self.total = Some(self.counts.iter().map(|(_, c)| c).sum());
    }

    /// Count for `status`, or the synthetic total for [`TOTAL_KEY`].
    ///
    /// A page status that reads literally `Total` is shadowed here; use
    /// [`StatusFrequency::count`] to reach it.
    pub fn get(&self, status: &str) -> Option<usize> {
        if status == TOTAL_KEY {
            return self.total;
        }
        self.count(status)
    }

    /// Count of pages showing `status`, never the synthetic total.
    pub fn count(&self, status: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(s, _)| s == status)
            .map(|(_, c)| *c)
    }

    pub fn total(&self) -> Option<usize> {
        self.total
    }

    /// Statuses in first-seen order, without `Total`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(s, c)| (s.as_str(), *c))
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Status rows in first-seen order, then the synthetic total as the last
    /// row. A status named `Total` keeps its own row ahead of it.
    pub fn to_report(&self) -> Report {
        let mut report = Report::new(["Status", "Count"]);
        for (status, count) in self.iter() {
            report.push([status.to_string(), count.to_string()]);
        }
        if let Some(total) = self.total {
            report.push([TOTAL_KEY.to_string(), total.to_string()]);
        }
        report
    }
}
