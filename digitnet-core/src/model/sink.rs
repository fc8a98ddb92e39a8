use crate::error::DigitNetError;

/// Receives one record per evaluated test sample.
pub trait PredictionSink {
    fn record(&mut self, predicted: usize, actual: usize, index: usize) -> Result<(), DigitNetError>;
}

/// A single evaluation outcome, as collected by the in-memory sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionRecord {
    pub predicted: usize,
    pub actual: usize,
    pub index: usize,
}

impl PredictionRecord {
    pub fn is_correct(&self) -> bool {
        self.predicted == self.actual
    }
}

impl PredictionSink for Vec<PredictionRecord> {
    fn record(&mut self, predicted: usize, actual: usize, index: usize) -> Result<(), DigitNetError> {
        self.push(PredictionRecord {
            predicted,
            actual,
            index,
        });
        Ok(())
    }
}

impl<S: PredictionSink + ?Sized> PredictionSink for &mut S {
    fn record(&mut self, predicted: usize, actual: usize, index: usize) -> Result<(), DigitNetError> {
        (**self).record(predicted, actual, index)
    }
}
