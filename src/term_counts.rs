use indexmap::IndexMap;
use std::io::Write;

/// Per-term annotation counts in first-seen order, plus the running total.
///
/// The only mutator is [`TermCounts::record`], so `total()` always equals the
/// sum of all per-term counts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TermCounts {
    entries: IndexMap<String, u64>,
    total: u64,
}

impl TermCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one annotation of `go_id`.
    pub fn record(&mut self, go_id: &str) {
        *self.entries.entry(go_id.to_string()).or_insert(0) += 1;
        self.total += 1;
    }

    /// Number of distinct terms seen so far.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Number of annotations recorded across all terms.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Terms and counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(id, n)| (id.as_str(), *n))
    }

    /// Write the table as `{go_id}\t{count}\n` lines, no header.
    pub fn write_tsv<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for (go_id, count) in self.iter() {
            writeln!(out, "{go_id}\t{count}")?;
        }
        out.flush()
    }
}
