//! Decoding of IDX image/label files (the MNIST distribution format).
//!
//! Image file: big-endian `u32` magic `0x00000803`, image count, rows, cols,
//! then `count * rows * cols` unsigned pixel bytes.
//! Label file: big-endian `u32` magic `0x00000801`, item count, then one byte
//! per label.

use crate::dataset::Dataset;
use digitnet_core::{DigitNetError, Real, Sample, Tensor, Vector, OUTPUT_SIZE};
use log::{debug, info};
use std::fs;
use std::marker::PhantomData;
use std::path::Path;

pub const IMAGE_MAGIC: u32 = 0x0000_0803;
pub const LABEL_MAGIC: u32 = 0x0000_0801;

const IMAGE_HEADER_LEN: usize = 16;
const LABEL_HEADER_LEN: usize = 8;

/// Maps every pixel byte `b` to `b / 255`, giving intensities in `[0, 1]`.
pub fn normalize<T: Real>(bytes: &[u8]) -> Vec<T> {
    let scale = T::cast(255.0);
    bytes.iter().map(|&b| T::cast(b as f64) / scale).collect()
}

/// One-hot vector of length `classes` with a one at `label`.
///
/// # Errors
/// `InvalidArgument` if `label >= classes`.
pub fn one_hot<T: Real>(label: usize, classes: usize) -> Result<Vector<T>, DigitNetError> {
    if label >= classes {
        return Err(DigitNetError::InvalidArgument(format!(
            "label {} out of range for {} classes",
            label, classes
        )));
    }
    let mut target = Vector::new(classes);
    target[label] = T::one();
    Ok(target)
}

/// Decoded contents of an IDX image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdxImages {
    pub rows: usize,
    pub cols: usize,
    /// One `rows * cols` row-major buffer per image.
    pub images: Vec<Vec<u8>>,
}

/// Parses an IDX image file held in memory.
pub fn parse_idx_images(bytes: &[u8]) -> Result<IdxImages, DigitNetError> {
    if bytes.len() < IMAGE_HEADER_LEN {
        return Err(DigitNetError::DatasetFormat(format!(
            "image file too short for header: {} bytes",
            bytes.len()
        )));
    }
    check_magic(bytes, IMAGE_MAGIC)?;
    let count = read_u32_be(bytes, 4) as usize;
    let rows = read_u32_be(bytes, 8) as usize;
    let cols = read_u32_be(bytes, 12) as usize;

    let too_large = || {
        DigitNetError::DatasetFormat(format!(
            "image file header declares {} images of {}x{}, too large to address",
            count, rows, cols
        ))
    };
    let image_len = rows.checked_mul(cols).ok_or_else(too_large)?;
    if image_len == 0 && count > 0 {
        return Err(DigitNetError::DatasetFormat(format!(
            "image file declares {} images of empty size {}x{}",
            count, rows, cols
        )));
    }
    let expected = count.checked_mul(image_len).ok_or_else(too_large)?;
    let payload = &bytes[IMAGE_HEADER_LEN..];
    if payload.len() < expected {
        return Err(DigitNetError::DatasetFormat(format!(
            "image file declares {} images of {}x{} but holds only {} pixel bytes",
            count,
            rows,
            cols,
            payload.len()
        )));
    }

    let images = if expected == 0 {
        Vec::new()
    } else {
        payload[..expected]
            .chunks(image_len)
            .map(|chunk| chunk.to_vec())
            .collect()
    };
    Ok(IdxImages { rows, cols, images })
}

/// Parses an IDX label file held in memory.
pub fn parse_idx_labels(bytes: &[u8]) -> Result<Vec<u8>, DigitNetError> {
    if bytes.len() < LABEL_HEADER_LEN {
        return Err(DigitNetError::DatasetFormat(format!(
            "label file too short for header: {} bytes",
            bytes.len()
        )));
    }
    check_magic(bytes, LABEL_MAGIC)?;
    let count = read_u32_be(bytes, 4) as usize;
    let payload = &bytes[LABEL_HEADER_LEN..];
    if payload.len() < count {
        return Err(DigitNetError::DatasetFormat(format!(
            "label file declares {} labels but holds only {}",
            count,
            payload.len()
        )));
    }
    Ok(payload[..count].to_vec())
}

fn read_u32_be(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_be_bytes(buf)
}

fn check_magic(bytes: &[u8], expected: u32) -> Result<(), DigitNetError> {
    let actual = read_u32_be(bytes, 0);
    if actual != expected {
        return Err(DigitNetError::InvalidMagicNumber { expected, actual });
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>, DigitNetError> {
    fs::read(path).map_err(|e| DigitNetError::Io(format!("{}: {}", path.display(), e)))
}

/// Images and labels from a pair of IDX files, decoded into samples of
/// element type `T` on access.
#[derive(Debug, Clone)]
pub struct MnistDataset<T> {
    rows: usize,
    cols: usize,
    images: Vec<Vec<u8>>,
    labels: Vec<u8>,
    classes: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Real> MnistDataset<T> {
    /// Reads and validates an image file and its label file.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(images_path: P, labels_path: Q) -> Result<Self, DigitNetError> {
        let images_path = images_path.as_ref();
        let labels_path = labels_path.as_ref();
        let dataset = Self::from_bytes(&read_file(images_path)?, &read_file(labels_path)?)?;
        info!(
            "Loaded {} samples of {}x{} from {} and {}",
            dataset.len(),
            dataset.rows,
            dataset.cols,
            images_path.display(),
            labels_path.display()
        );
        Ok(dataset)
    }

    /// Decodes in-memory IDX image and label files.
    ///
    /// # Errors
    /// `InvalidMagicNumber` or `DatasetFormat` for malformed headers or
    /// payloads, `DatasetFormat` if the counts differ or a label is not a
    /// valid class.
    pub fn from_bytes(image_bytes: &[u8], label_bytes: &[u8]) -> Result<Self, DigitNetError> {
        let IdxImages { rows, cols, images } = parse_idx_images(image_bytes)?;
        let labels = parse_idx_labels(label_bytes)?;
        if images.len() != labels.len() {
            return Err(DigitNetError::DatasetFormat(format!(
                "{} images but {} labels",
                images.len(),
                labels.len()
            )));
        }
        if let Some(i) = labels.iter().position(|&label| label as usize >= OUTPUT_SIZE) {
            return Err(DigitNetError::DatasetFormat(format!(
                "label {} at index {} is not a digit class",
                labels[i], i
            )));
        }
        debug!("Decoded {} images of {}x{}", images.len(), rows, cols);
        Ok(MnistDataset {
            rows,
            cols,
            images,
            labels,
            classes: OUTPUT_SIZE,
            _marker: PhantomData,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw class label of sample `index`.
    pub fn label(&self, index: usize) -> Result<usize, DigitNetError> {
        self.check_index(index)?;
        Ok(self.labels[index] as usize)
    }

    /// The normalized image as a `rows × cols` tensor.
    pub fn image_tensor(&self, index: usize) -> Result<Tensor<T>, DigitNetError> {
        self.check_index(index)?;
        Tensor::from_vec(normalize(&self.images[index]), vec![self.rows, self.cols])
    }

    /// The one-hot label as a rank-1 tensor.
    pub fn label_tensor(&self, index: usize) -> Result<Tensor<T>, DigitNetError> {
        Ok(one_hot(self.label(index)?, self.classes)?.into_tensor())
    }

    /// Writes the image and label of sample `index` in the tensor text format.
    pub fn export_sample<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        index: usize,
        image_path: P,
        label_path: Q,
    ) -> Result<(), DigitNetError> {
        self.image_tensor(index)?.save(image_path)?;
        self.label_tensor(index)?.save(label_path)?;
        Ok(())
    }

    /// Every sample, in file order.
    pub fn into_samples(self) -> Result<Vec<Sample<T>>, DigitNetError> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    fn check_index(&self, index: usize) -> Result<(), DigitNetError> {
        if index >= self.len() {
            return Err(DigitNetError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.len()],
            });
        }
        Ok(())
    }
}

impl<T: Real> Dataset for MnistDataset<T> {
    type Item = Sample<T>;

    fn get(&self, index: usize) -> Result<Sample<T>, DigitNetError> {
        self.check_index(index)?;
        let input = Vector::from_vec(normalize(&self.images[index]));
        let target = one_hot(self.labels[index] as usize, self.classes)?;
        Ok(Sample::new(input, target))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
#[path = "mnist_test.rs"]
mod tests;
