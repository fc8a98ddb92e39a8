use std::path::{Path, PathBuf};

// Each integration test binary pulls in this module; not every binary uses every helper.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Writes an IDX image file with `rows × cols` images and returns its path.
#[allow(dead_code)]
pub fn write_images(dir: &Path, name: &str, rows: u32, cols: u32, images: &[Vec<u8>]) -> PathBuf {
    let mut bytes = Vec::new();
    for header in [0x0803, images.len() as u32, rows, cols] {
        bytes.extend_from_slice(&header.to_be_bytes());
    }
    for image in images {
        bytes.extend_from_slice(image);
    }
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write image file");
    path
}

/// Writes an IDX label file and returns its path.
#[allow(dead_code)]
pub fn write_labels(dir: &Path, name: &str, labels: &[u8]) -> PathBuf {
    let mut bytes = Vec::new();
    for header in [0x0801, labels.len() as u32] {
        bytes.extend_from_slice(&header.to_be_bytes());
    }
    bytes.extend_from_slice(labels);
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write label file");
    path
}
