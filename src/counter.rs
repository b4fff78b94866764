//! Annotation counting pipeline.
//!
//! Scans every configured input file in order, tallies GO identifiers from
//! qualifying lines, prints the one-line summary and writes the term table.
//! Any I/O failure aborts the run; malformed lines are skipped silently.

use crate::annotation;
use crate::config::CounterConfig;
use crate::term_counts::TermCounts;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Line statistics for one input file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileTally {
    pub lines: u64,
    pub annotations: u64,
    pub skipped: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum CountError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read {} at line {line}: {source}", .path.display())]
    Read {
        path: PathBuf,
        line: usize,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to rename {} -> {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Text lines ending in `\n`, `\r\n` or a lone `\r`, decoded as UTF-8.
struct UniversalLines<R> {
    reader: R,
    buf: Vec<u8>,
    pending: VecDeque<Vec<u8>>,
}

impl<R: BufRead> UniversalLines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> Iterator for UniversalLines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(raw) = self.pending.pop_front() {
                return Some(
                    String::from_utf8(raw)
                        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
                );
            }

            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }

            // "a\rb\r\n" is two lines; the piece after a trailing \r is not a line
            let body = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf[..]);
            let mut pieces: Vec<&[u8]> = body.split(|&b| b == b'\r').collect();
            if body.ends_with(b"\r") {
                pieces.pop();
            }
            self.pending.extend(pieces.into_iter().map(<[u8]>::to_vec));
        }
    }
}

/// Count the annotations in one file into `counts`.
pub fn count_file(path: &Path, counts: &mut TermCounts) -> Result<FileTally, CountError> {
    let file = File::open(path).map_err(|e| CountError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut tally = FileTally::default();

    for (i, line) in UniversalLines::new(BufReader::new(file)).enumerate() {
        let line = line.map_err(|e| CountError::Read {
            path: path.to_path_buf(),
            line: i + 1,
            source: e,
        })?;
        tally.lines += 1;

        match annotation::parse_line(&line) {
            Some(a) => {
                tracing::trace!(label = a.label, go_id = a.go_id, "annotation");
                counts.record(a.go_id);
                tally.annotations += 1;
            }
            None => {
                tracing::debug!(
                    file = %path.display(),
                    line = i + 1,
                    "skipping non-annotation line"
                );
                tally.skipped += 1;
            }
        }
    }

    tracing::info!(
        file = %path.display(),
        lines = tally.lines,
        annotations = tally.annotations,
        skipped = tally.skipped,
        "counted annotations"
    );
    Ok(tally)
}

/// Count every file in order. Stops at the first file that cannot be read.
pub fn count_files(paths: &[PathBuf]) -> Result<TermCounts, CountError> {
    let mut counts = TermCounts::new();
    for path in paths {
        count_file(path, &mut counts)?;
    }
    if counts.is_empty() {
        tracing::warn!(files = paths.len(), "no GO annotations found in any input file");
    }
    Ok(counts)
}

/// The summary printed to stdout after the scan.
pub fn summary_line(counts: &TermCounts) -> String {
    format!(
        "We parsed a total of {} distinct terms from {} annotations",
        counts.distinct(),
        counts.total()
    )
}

/// Write the term table to `path`, replacing any existing file.
///
/// The table goes to a temporary sibling first and is renamed into place,
/// so an existing table is only replaced once the new one is complete.
/// A symlinked `path` is written through, and an existing file keeps its mode.
pub fn write_counts(path: &Path, counts: &TermCounts) -> Result<(), CountError> {
    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "term_counts".to_string());
    let tmp_path = dir.join(format!(".{file_name}.tmp.{}", std::process::id()));

    let written = File::create(&tmp_path).and_then(|f| counts.write_tsv(BufWriter::new(f)));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(CountError::Write {
            path: tmp_path,
            source: e,
        });
    }

    if let Ok(meta) = std::fs::metadata(&target) {
        if let Err(e) = std::fs::set_permissions(&tmp_path, meta.permissions()) {
            tracing::warn!(error = %e, file = %target.display(), "failed to keep output file mode");
        }
    }

    if let Err(e) = std::fs::rename(&tmp_path, &target) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(CountError::Rename {
            from: tmp_path,
            to: target,
            source: e,
        });
    }

    tracing::info!(file = %path.display(), terms = counts.distinct(), "wrote term counts");
    Ok(())
}

/// Scan the configured inputs, print the summary and write the table.
pub fn run(config: &CounterConfig) -> Result<TermCounts, CountError> {
    let counts = count_files(&config.input_paths())?;
    println!("{}", summary_line(&counts));
    write_counts(&config.output.file, &counts)?;
    Ok(counts)
}
