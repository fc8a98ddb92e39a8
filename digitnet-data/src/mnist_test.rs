use super::*;
use approx::assert_relative_eq;

fn image_file(rows: u32, cols: u32, images: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&IMAGE_MAGIC.to_be_bytes());
    bytes.extend_from_slice(&(images.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&rows.to_be_bytes());
    bytes.extend_from_slice(&cols.to_be_bytes());
    for image in images {
        bytes.extend_from_slice(image);
    }
    bytes
}

fn label_file(labels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&LABEL_MAGIC.to_be_bytes());
    bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    bytes.extend_from_slice(labels);
    bytes
}

fn small_dataset() -> Result<MnistDataset<f64>, DigitNetError> {
    let images = image_file(2, 2, &[vec![0, 255, 51, 102], vec![255, 255, 0, 0]]);
    let labels = label_file(&[3, 9]);
    MnistDataset::from_bytes(&images, &labels)
}

#[test]
fn test_normalize() {
    let values: Vec<f64> = normalize(&[0, 51, 255]);
    assert_eq!(values[0], 0.0);
    assert_relative_eq!(values[1], 0.2, epsilon = 1e-12);
    assert_eq!(values[2], 1.0);
}

#[test]
fn test_one_hot() -> Result<(), DigitNetError> {
    let target: Vector<f32> = one_hot(3, 5)?;
    assert_eq!(target.as_slice(), &[0.0, 0.0, 0.0, 1.0, 0.0]);
    assert!(matches!(one_hot::<f32>(5, 5), Err(DigitNetError::InvalidArgument(_))));
    Ok(())
}

#[test]
fn test_parse_headers() -> Result<(), DigitNetError> {
    let parsed = parse_idx_images(&image_file(1, 3, &[vec![1, 2, 3], vec![4, 5, 6]]))?;
    assert_eq!((parsed.rows, parsed.cols), (1, 3));
    assert_eq!(parsed.images, vec![vec![1, 2, 3], vec![4, 5, 6]]);
    assert_eq!(parse_idx_labels(&label_file(&[7, 0, 1]))?, vec![7, 0, 1]);
    Ok(())
}

#[test]
fn test_wrong_magic() {
    let mut bytes = label_file(&[1]);
    bytes[3] = 0x03;
    assert_eq!(
        parse_idx_labels(&bytes),
        Err(DigitNetError::InvalidMagicNumber { expected: LABEL_MAGIC, actual: 0x0803 })
    );
    // An image file is not a label file.
    assert!(matches!(
        parse_idx_images(&label_file(&[1, 2, 3, 4, 5, 6, 7, 8])),
        Err(DigitNetError::InvalidMagicNumber { .. })
    ));
}

#[test]
fn test_truncated_files() {
    assert!(matches!(parse_idx_images(&[0, 0, 8]), Err(DigitNetError::DatasetFormat(_))));
    let mut images = image_file(2, 2, &[vec![1, 2, 3, 4]]);
    images.pop();
    assert!(matches!(parse_idx_images(&images), Err(DigitNetError::DatasetFormat(_))));
    let mut labels = label_file(&[1, 2]);
    labels.pop();
    assert!(matches!(parse_idx_labels(&labels), Err(DigitNetError::DatasetFormat(_))));
}

#[test]
fn test_count_mismatch_and_bad_label() {
    let images = image_file(1, 1, &[vec![0], vec![1]]);
    assert!(matches!(
        MnistDataset::<f64>::from_bytes(&images, &label_file(&[1])),
        Err(DigitNetError::DatasetFormat(_))
    ));
    assert!(matches!(
        MnistDataset::<f64>::from_bytes(&images, &label_file(&[1, 10])),
        Err(DigitNetError::DatasetFormat(_))
    ));
}

#[test]
fn test_dataset_samples() -> Result<(), DigitNetError> {
    let dataset = small_dataset()?;
    assert_eq!(dataset.len(), 2);
    assert_eq!((dataset.rows(), dataset.cols()), (2, 2));

    let first = dataset.get(0)?;
    assert_eq!(first.input.len(), 4);
    assert_relative_eq!(first.input[3], 0.4, epsilon = 1e-12);
    assert_eq!(first.target.len(), OUTPUT_SIZE);
    assert_eq!(first.target.argmax(), Some(3));

    assert!(matches!(dataset.get(2), Err(DigitNetError::IndexOutOfBounds { .. })));

    let samples = dataset.into_samples()?;
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[1].target.argmax(), Some(9));
    Ok(())
}

#[test]
fn test_image_and_label_tensors() -> Result<(), DigitNetError> {
    let dataset = small_dataset()?;
    let image = dataset.image_tensor(1)?;
    assert_eq!(image.shape(), &[2, 2]);
    assert_eq!(image[[0, 1]], 1.0);
    assert_eq!(image[[1, 0]], 0.0);

    let label = dataset.label_tensor(1)?;
    assert_eq!(label.shape(), &[OUTPUT_SIZE]);
    assert_eq!(label[[9]], 1.0);
    assert_eq!(dataset.label(0)?, 3);
    Ok(())
}

#[test]
fn test_load_and_export() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let images_path = dir.path().join("images.idx");
    let labels_path = dir.path().join("labels.idx");
    std::fs::write(&images_path, image_file(2, 2, &[vec![0, 255, 51, 102]]))?;
    std::fs::write(&labels_path, label_file(&[4]))?;

    let dataset = MnistDataset::<f64>::load(&images_path, &labels_path)?;
    assert_eq!(dataset.len(), 1);

    let image_out = dir.path().join("image.txt");
    let label_out = dir.path().join("label.txt");
    dataset.export_sample(0, &image_out, &label_out)?;
    assert_eq!(Tensor::<f64>::load(&image_out)?, dataset.image_tensor(0)?);
    assert_eq!(std::fs::read_to_string(&label_out)?, "1\n10\n0\n0\n0\n0\n1\n0\n0\n0\n0\n0\n");

    assert!(matches!(
        MnistDataset::<f64>::load(dir.path().join("missing.idx"), &labels_path),
        Err(DigitNetError::Io(_))
    ));
    Ok(())
}

fn image_header(count: u32, rows: u32, cols: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    for field in [IMAGE_MAGIC, count, rows, cols] {
        bytes.extend_from_slice(&field.to_be_bytes());
    }
    bytes
}

#[test]
fn test_oversized_image_header() {
    // rows * cols alone overflows on 32-bit targets; count * rows * cols everywhere.
    let bytes = image_header(u32::MAX, u32::MAX, u32::MAX);
    assert!(matches!(parse_idx_images(&bytes), Err(DigitNetError::DatasetFormat(_))));

    let mut bytes = image_header(u32::MAX, 2, 2);
    bytes.extend_from_slice(&[0; 8]);
    assert!(matches!(parse_idx_images(&bytes), Err(DigitNetError::DatasetFormat(_))));
}

#[test]
fn test_empty_image_size_rejected() -> Result<(), DigitNetError> {
    assert!(matches!(
        parse_idx_images(&image_header(u32::MAX, 0, 28)),
        Err(DigitNetError::DatasetFormat(_))
    ));
    let empty = parse_idx_images(&image_header(0, 28, 28))?;
    assert!(empty.images.is_empty());
    Ok(())
}
