use digitnet_core::{DigitNetError, PredictionSink};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Header written once at the top of every prediction log.
pub const LOG_HEADER: &str = "Current batch: 0";

/// Writes one line per evaluated sample to a text file:
///
/// ```text
/// Current batch: 0
///  - image 0: Prediction=7. Label=7
///  - image 1: Prediction=2. Label=3
/// ```
#[derive(Debug)]
pub struct PredictionLog {
    path: PathBuf,
    writer: BufWriter<File>,
    records: usize,
}

impl PredictionLog {
    /// Creates (or truncates) the log file and writes the header.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, DigitNetError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| io_error(&path, e))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", LOG_HEADER).map_err(|e| io_error(&path, e))?;
        Ok(PredictionLog {
            path,
            writer,
            records: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records written so far.
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Flushes buffered records and closes the file.
    pub fn finish(mut self) -> Result<(), DigitNetError> {
        self.writer.flush().map_err(|e| io_error(&self.path, e))?;
        debug!("Wrote {} predictions to {}", self.records, self.path.display());
        Ok(())
    }
}

impl PredictionSink for PredictionLog {
    fn record(&mut self, predicted: usize, actual: usize, index: usize) -> Result<(), DigitNetError> {
        writeln!(
            self.writer,
            " - image {}: Prediction={}. Label={}",
            index, predicted, actual
        )
        .map_err(|e| io_error(&self.path, e))?;
        self.records += 1;
        Ok(())
    }
}

fn io_error(path: &Path, err: std::io::Error) -> DigitNetError {
    DigitNetError::Io(format!("{}: {}", path.display(), err))
}
