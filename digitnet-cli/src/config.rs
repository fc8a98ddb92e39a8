use digitnet_core::DigitNetError;
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const TRIM_CHARS: &[char] = &[' ', '\t', '\r', '\n'];

/// Parses `key = value` lines into a map.
///
/// Empty lines and lines starting with `\` are skipped, as are lines without
/// `=`. Keys and values are trimmed; a repeated key keeps its last value.
pub fn parse_config_str(text: &str) -> BTreeMap<String, String> {
    let mut config = BTreeMap::new();
    for line in text.lines() {
        if line.is_empty() || line.starts_with('\\') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        config.insert(
            key.trim_matches(TRIM_CHARS).to_string(),
            value.trim_matches(TRIM_CHARS).to_string(),
        );
    }
    config
}

/// Hyperparameters and file locations for one training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub hidden_size: usize,
    pub num_epochs: usize,
    /// Read and reported, but samples are always applied one at a time.
    pub batch_size: usize,
    pub train_images: PathBuf,
    pub train_labels: PathBuf,
    pub test_images: PathBuf,
    pub test_labels: PathBuf,
    pub log_file: PathBuf,
}

impl TrainingConfig {
    /// Validates a parsed key map.
    ///
    /// # Errors
    /// `MissingConfigKey` for an absent key, `InvalidConfigValue` for a
    /// number that does not parse.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, DigitNetError> {
        Ok(TrainingConfig {
            learning_rate: parse_value(map, "learning_rate")?,
            hidden_size: parse_value(map, "hidden_size")?,
            num_epochs: parse_value(map, "num_epochs")?,
            batch_size: parse_value(map, "batch_size")?,
            train_images: PathBuf::from(required(map, "rel_path_train_images")?),
            train_labels: PathBuf::from(required(map, "rel_path_train_labels")?),
            test_images: PathBuf::from(required(map, "rel_path_test_images")?),
            test_labels: PathBuf::from(required(map, "rel_path_test_labels")?),
            log_file: PathBuf::from(required(map, "rel_path_log_file")?),
        })
    }

    /// Reads and validates a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DigitNetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| DigitNetError::Io(format!("could not open config {}: {}", path.display(), e)))?;
        let config = Self::from_map(&parse_config_str(&text))?;
        debug!("Parsed config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

fn required<'a>(map: &'a BTreeMap<String, String>, key: &str) -> Result<&'a str, DigitNetError> {
    map.get(key)
        .map(String::as_str)
        .ok_or_else(|| DigitNetError::MissingConfigKey(key.to_string()))
}

fn parse_value<V>(map: &BTreeMap<String, String>, key: &str) -> Result<V, DigitNetError>
where
    V: std::str::FromStr,
    V::Err: std::fmt::Display,
{
    let raw = required(map, key)?;
    raw.parse::<V>().map_err(|e| DigitNetError::InvalidConfigValue {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
\\ hyperparameters
learning_rate = 0.001
hidden_size=500
num_epochs = 10\t
batch_size = 1\r

this line is ignored
rel_path_train_images = data/train-images.idx3-ubyte
rel_path_train_labels = data/train-labels.idx1-ubyte
rel_path_test_images = data/t10k-images.idx3-ubyte
rel_path_test_labels = data/t10k-labels.idx1-ubyte
rel_path_log_file = log.txt
";

    #[test]
    fn test_parse_config_str_rules() {
        let map = parse_config_str("a = 1\n\\b = 2\n\nnoequals\n c=  x = y \na = 3\n");
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "3");
        assert_eq!(map["c"], "x = y");
        assert!(!map.contains_key("\\b"));
    }

    #[test]
    fn test_from_map() -> Result<(), DigitNetError> {
        let config = TrainingConfig::from_map(&parse_config_str(SAMPLE))?;
        assert_eq!(config.learning_rate, 0.001);
        assert_eq!(config.hidden_size, 500);
        assert_eq!(config.num_epochs, 10);
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.train_images, PathBuf::from("data/train-images.idx3-ubyte"));
        assert_eq!(config.log_file, PathBuf::from("log.txt"));
        Ok(())
    }

    #[test]
    fn test_missing_key() {
        let text = SAMPLE.replace("hidden_size=500", "");
        assert_eq!(
            TrainingConfig::from_map(&parse_config_str(&text)),
            Err(DigitNetError::MissingConfigKey("hidden_size".to_string()))
        );
    }

    #[test]
    fn test_invalid_number() {
        let text = SAMPLE.replace("num_epochs = 10", "num_epochs = ten");
        match TrainingConfig::from_map(&parse_config_str(&text)) {
            Err(DigitNetError::InvalidConfigValue { key, value, .. }) => {
                assert_eq!(key, "num_epochs");
                assert_eq!(value, "ten");
            }
            other => panic!("Expected InvalidConfigValue, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.txt");
        std::fs::write(&path, SAMPLE)?;
        assert_eq!(TrainingConfig::load(&path)?.hidden_size, 500);
        assert!(matches!(
            TrainingConfig::load(dir.path().join("missing.txt")),
            Err(DigitNetError::Io(_))
        ));
        Ok(())
    }
}
