use clap::Parser;
use digitnet_core::{DigitNetError, Network, Sample, INPUT_SIZE, OUTPUT_SIZE};
use digitnet_data::{MnistDataset, PredictionLog};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

mod config;

use config::TrainingConfig;

#[derive(Parser, Debug)]
#[command(name = "train_nn")]
#[command(about = "Train and evaluate a feed-forward digit classifier on IDX data")]
#[command(version)]
struct Cli {
    /// Path to the `key = value` configuration file
    config: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli.config) {
        error!("{}", e);
        process::exit(1);
    }
}

/// Loads the config and both datasets, trains, then evaluates into the
/// prediction log.
fn run(config_path: &Path) -> Result<(), DigitNetError> {
    let config = TrainingConfig::load(config_path)?;
    // Created up front so an unwritable log path fails before training.
    let mut log = PredictionLog::create(&config.log_file)?;
    info!("Config loaded from {}", config_path.display());
    info!(
        "learning_rate={} hidden_size={} num_epochs={} batch_size={} (samples are applied one at a time)",
        config.learning_rate, config.hidden_size, config.num_epochs, config.batch_size
    );

    let training = load_dataset(&config.train_images, &config.train_labels)?;
    let testing = load_dataset(&config.test_images, &config.test_labels)?;
    info!("Data loaded: {} training, {} testing samples", training.len(), testing.len());

    let mut network = Network::new(config.learning_rate, training, testing);
    network.setup_layers(INPUT_SIZE, config.hidden_size, OUTPUT_SIZE)?;
    network.train(config.num_epochs)?;

    let report = network.test(&mut log)?;
    log.finish()?;
    info!(
        "Accuracy {:.2}%, predictions written to {}",
        report.accuracy(),
        config.log_file.display()
    );
    Ok(())
}

fn load_dataset(images: &Path, labels: &Path) -> Result<Vec<Sample<f64>>, DigitNetError> {
    let dataset = MnistDataset::<f64>::load(images, labels)?;
    let pixels = dataset.rows() * dataset.cols();
    if pixels != INPUT_SIZE {
        return Err(DigitNetError::DatasetFormat(format!(
            "{} holds {}x{} images, expected {} pixels",
            images.display(),
            dataset.rows(),
            dataset.cols(),
            INPUT_SIZE
        )));
    }
    dataset.into_samples()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn write_idx(dir: &Path, images: &[Vec<u8>], labels: &[u8]) -> (PathBuf, PathBuf) {
        let mut image_bytes = Vec::new();
        for header in [0x0803, images.len() as u32, 28, 28] {
            image_bytes.extend_from_slice(&header.to_be_bytes());
        }
        for image in images {
            image_bytes.extend_from_slice(image);
        }
        let mut label_bytes = Vec::new();
        for header in [0x0801, labels.len() as u32] {
            label_bytes.extend_from_slice(&header.to_be_bytes());
        }
        label_bytes.extend_from_slice(labels);

        let image_path = dir.join(format!("images-{}", labels.len()));
        let label_path = dir.join(format!("labels-{}", labels.len()));
        std::fs::write(&image_path, image_bytes).expect("write images");
        std::fs::write(&label_path, label_bytes).expect("write labels");
        (image_path, label_path)
    }

    fn write_config(dir: &Path, epochs: usize, paths: [&Path; 5]) -> PathBuf {
        let text = format!(
            "learning_rate = 0.01\nhidden_size = 8\nnum_epochs = {}\nbatch_size = 4\n\
             rel_path_train_images = {}\nrel_path_train_labels = {}\n\
             rel_path_test_images = {}\nrel_path_test_labels = {}\nrel_path_log_file = {}\n",
            epochs,
            paths[0].display(),
            paths[1].display(),
            paths[2].display(),
            paths[3].display(),
            paths[4].display()
        );
        let path = dir.join("config.txt");
        std::fs::write(&path, text).expect("write config");
        path
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
        let cli = Cli::try_parse_from(["train_nn", "config.txt"]).expect("parse");
        assert_eq!(cli.config, PathBuf::from("config.txt"));
        assert!(Cli::try_parse_from(["train_nn"]).is_err());
        assert!(Cli::try_parse_from(["train_nn", "a", "b"]).is_err());
    }

    #[test]
    fn test_run_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let images = vec![vec![0u8; INPUT_SIZE], vec![255u8; INPUT_SIZE], vec![128u8; INPUT_SIZE]];
        let (train_images, train_labels) = write_idx(dir.path(), &images[..2], &[0, 1]);
        let (test_images, test_labels) = write_idx(dir.path(), &images, &[0, 1, 5]);
        let log_path = dir.path().join("predictions.log");
        let config = write_config(
            dir.path(),
            2,
            [&train_images, &train_labels, &test_images, &test_labels, &log_path],
        );

        run(&config)?;

        let contents = std::fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Current batch: 0");
        assert!(lines[3].starts_with(" - image 2: Prediction="));
        assert!(lines[3].ends_with(". Label=5"));
        Ok(())
    }

    #[test]
    fn test_run_rejects_swapped_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let (images, labels) = write_idx(dir.path(), &[vec![0u8; INPUT_SIZE]], &[3]);
        // The training images path points at a label file.
        let log_path = dir.path().join("log.txt");
        let config = write_config(dir.path(), 1, [&labels, &labels, &images, &labels, &log_path]);
        assert!(matches!(run(&config), Err(DigitNetError::InvalidMagicNumber { .. })));
        Ok(())
    }

    #[test]
    fn test_run_reports_missing_config() {
        assert!(matches!(
            run(Path::new("/nonexistent/config.txt")),
            Err(DigitNetError::Io(_))
        ));
    }
}
