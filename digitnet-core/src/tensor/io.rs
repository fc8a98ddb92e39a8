// src/tensor/io.rs
//
// Line-oriented text format:
//   line 1            rank
//   next `rank` lines one dimension size each
//   remaining lines   every element, row-major (last index fastest)
// A rank-0 tensor is written as "0" followed by its single element.

use crate::error::DigitNetError;
use crate::tensor::{checked_num_elements, Tensor};
use crate::types::Scalar;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const MAX_PREALLOCATED_ELEMENTS: usize = 4096;

impl<T: Scalar> Tensor<T> {
    /// Serializes the tensor in the text format to `writer`.
    ///
    /// Values are written with `Display`, which for floats is the shortest
    /// representation that parses back to the same value.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), DigitNetError> {
        writeln!(writer, "{}", self.rank())?;
        for dim in self.shape() {
            writeln!(writer, "{}", dim)?;
        }
        for value in self.data() {
            writeln!(writer, "{}", value)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Serializes the tensor into a `String`.
    pub fn to_text(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Parses a tensor from the text format.
    ///
    /// # Errors
    /// `TensorParse` if the input ends early or a line is not a valid number.
    /// The error carries the 1-based line number.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, DigitNetError> {
        let mut lines = LineReader::new(reader);

        let rank: usize = lines.parse("rank")?;
        let mut shape = Vec::with_capacity(rank);
        for d in 0..rank {
            shape.push(lines.parse::<usize>(&format!("dimension {}", d))?);
        }

        let numel = checked_num_elements(&shape).ok_or_else(|| DigitNetError::TensorParse {
            line: lines.line_no,
            message: format!("element count of shape {:?} overflows", shape),
        })?;
        // The declared shape is unverified until its elements have been read.
        let mut data = Vec::with_capacity(numel.min(MAX_PREALLOCATED_ELEMENTS));
        for i in 0..numel {
            data.push(lines.parse::<T>(&format!("element {}", i))?);
        }

        let trailing = lines.count_remaining_non_empty()?;
        if trailing > 0 {
            warn!(
                "Ignoring {} trailing line(s) after tensor of shape {:?}",
                trailing, shape
            );
        }

        Tensor::from_vec(data, shape)
    }

    /// Parses a tensor from a string in the text format.
    pub fn from_text(text: &str) -> Result<Self, DigitNetError> {
        Self::read_from(text.as_bytes())
    }

    /// Writes the tensor to a file, replacing any existing content.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DigitNetError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| io_error(path, e))?;
        self.write_to(BufWriter::new(file))?;
        debug!("Wrote tensor of shape {:?} to {}", self.shape(), path.display());
        Ok(())
    }

    /// Reads a tensor from a file written by [`Tensor::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DigitNetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| io_error(path, e))?;
        let tensor = Self::read_from(BufReader::new(file))?;
        debug!("Read tensor of shape {:?} from {}", tensor.shape(), path.display());
        Ok(tensor)
    }
}

fn io_error(path: &Path, err: std::io::Error) -> DigitNetError {
    DigitNetError::Io(format!("{}: {}", path.display(), err))
}

/// Hands out trimmed lines and tracks the current line number for errors.
struct LineReader<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        LineReader {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    fn parse<V: std::str::FromStr>(&mut self, what: &str) -> Result<V, DigitNetError> {
        self.line_no += 1;
        let line = match self.lines.next() {
            Some(line) => line?,
            None => {
                return Err(DigitNetError::TensorParse {
                    line: self.line_no,
                    message: format!("unexpected end of input, expected {}", what),
                })
            }
        };
        let trimmed = line.trim();
        trimmed.parse::<V>().map_err(|_| DigitNetError::TensorParse {
            line: self.line_no,
            message: format!("invalid {}: {:?}", what, trimmed),
        })
    }

    fn count_remaining_non_empty(&mut self) -> Result<usize, DigitNetError> {
        let mut count = 0;
        for line in self.lines.by_ref() {
            if !line?.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
#[path = "io_test.rs"]
mod tests;
