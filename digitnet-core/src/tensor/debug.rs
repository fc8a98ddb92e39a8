// src/tensor/debug.rs
use crate::tensor::{next_index, Tensor};
use std::fmt;

const DEBUG_PREVIEW_LEN: usize = 8;

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = &self.data()[..self.numel().min(DEBUG_PREVIEW_LEN)];
        write!(f, "Tensor(shape={:?}, data={:?}", self.shape(), preview)?;
        if self.numel() > DEBUG_PREVIEW_LEN {
            write!(f, " ... {} more", self.numel() - DEBUG_PREVIEW_LEN)?;
        }
        write!(f, ")")
    }
}

/// Pretty-prints one line per innermost row, prefixed by the leading indices:
///
/// ```text
/// (0, :) [1 2 3]
/// (1, :) [4 5 6]
/// ```
impl<T: fmt::Display> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = self.rank();
        if rank == 0 {
            return writeln!(f, "() [{}]", self.data()[0]);
        }

        let row_len = self.shape()[rank - 1];
        let outer_shape = &self.shape()[..rank - 1];
        if row_len == 0 || outer_shape.contains(&0) {
            return Ok(());
        }

        let mut outer_index = vec![0; rank - 1];
        for row in self.data().chunks(row_len) {
            write!(f, "(")?;
            for i in &outer_index {
                write!(f, "{}, ", i)?;
            }
            write!(f, ":) [")?;
            for (i, value) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", value)?;
            }
            writeln!(f, "]")?;
            next_index(&mut outer_index, outer_shape);
        }
        Ok(())
    }
}
