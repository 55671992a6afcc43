//! Benchmark sets under the data directory and file selection within them

use clap::ValueEnum;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::IngestError;
use crate::ingest::BenchmarkFormat;

/// Sub-directories of the data directory holding benchmark instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BenchmarkSet {
    TestSet1,
    TestSet2,
    Alue,
    Alut,
    Dmxa,
}

impl BenchmarkSet {
    pub const ALL: [BenchmarkSet; 5] = [
        BenchmarkSet::TestSet1,
        BenchmarkSet::TestSet2,
        BenchmarkSet::Alue,
        BenchmarkSet::Alut,
        BenchmarkSet::Dmxa,
    ];

    pub fn dir_name(&self) -> &'static str {
        match self {
            BenchmarkSet::TestSet1 => "test_set1",
            BenchmarkSet::TestSet2 => "test_set2",
            BenchmarkSet::Alue => "ALUE",
            BenchmarkSet::Alut => "ALUT",
            BenchmarkSet::Dmxa => "DMXA",
        }
    }

    pub fn path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.dir_name())
    }

    /// 1-based menu entry, as shown by the interactive loop
    pub fn from_menu(option: usize) -> Option<Self> {
        option.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }
}

impl fmt::Display for BenchmarkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BenchmarkSet::TestSet1 => "TEST_SET1",
            BenchmarkSet::TestSet2 => "TEST_SET2",
            BenchmarkSet::Alue => "ALUE",
            BenchmarkSet::Alut => "ALUT",
            BenchmarkSet::Dmxa => "DMXA",
        };
        write!(f, "{}", label)
    }
}

/// `.dat` and `.stp` files directly inside `dir`, sorted by file name
pub fn list_benchmarks(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && BenchmarkFormat::is_benchmark(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::debug!("{} benchmark file(s) in {}", files.len(), dir.display());
    Ok(files)
}

/// The `choice`-th (1-based) benchmark file of `dir`
pub fn select(dir: &Path, choice: usize) -> Result<PathBuf, IngestError> {
    let files = list_benchmarks(dir)?;
    let available = files.len();
    choice
        .checked_sub(1)
        .and_then(|i| files.into_iter().nth(i))
        .ok_or(IngestError::InvalidChoice { choice, available })
}
