use crate::error::DigitNetError;
use crate::linalg::Vector;
use crate::model::sample::Sample;
use crate::model::sink::PredictionSink;
use crate::nn::{CrossEntropyLoss, FullyConnected, Layer, ReLU, SoftMax};
use crate::types::Real;
use log::{debug, info};
use rand::Rng;
use std::time::Instant;

/// Number of input features (28 × 28 pixels).
pub const INPUT_SIZE: usize = 784;
/// Number of output classes (digits 0 to 9).
pub const OUTPUT_SIZE: usize = 10;
/// Training stops once the tracked epoch loss falls below this value.
pub const EARLY_STOPPING_THRESHOLD: f64 = 1e-4;

/// Lifecycle of a [`Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkState {
    /// Built, no layers yet.
    Constructed,
    /// Layers appended, ready to train or test.
    LayersConfigured,
    /// Inside `train`. Only observable if an epoch failed; `train` and
    /// `test` may still be called from here.
    Training,
    /// Ran every requested epoch.
    TestReady,
    /// Training ended early on the loss threshold.
    Stopped,
}

/// Outcome of [`Network::train`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub epochs_run: usize,
    /// The tracked loss of every completed epoch, in order.
    pub epoch_losses: Vec<f64>,
    pub stopped_early: bool,
}

impl TrainingReport {
    pub fn final_loss(&self) -> Option<f64> {
        self.epoch_losses.last().copied()
    }
}

/// Outcome of [`Network::test`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TestReport {
    pub correct: usize,
    pub incorrect: usize,
}

impl TestReport {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Accuracy in percent, `0.0` when nothing was evaluated.
    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total() as f64 * 100.0
    }
}

/// A sequential classifier trained one sample at a time.
///
/// The network owns its layers, the loss, and both sample collections.
/// Every training sample goes through forward, loss, and backward; each
/// `FullyConnected` layer applies its SGD update during backward.
#[derive(Debug, Clone)]
pub struct Network<T> {
    learning_rate: T,
    layers: Vec<Layer<T>>,
    loss: CrossEntropyLoss,
    training: Vec<Sample<T>>,
    testing: Vec<Sample<T>>,
    loss_history: Vec<T>,
    epoch_losses: Vec<f64>,
    state: NetworkState,
}

impl<T: Real> Network<T> {
    pub fn new(learning_rate: T, training: Vec<Sample<T>>, testing: Vec<Sample<T>>) -> Self {
        Network {
            learning_rate,
            layers: Vec::new(),
            loss: CrossEntropyLoss::new(),
            training,
            testing,
            loss_history: Vec::new(),
            epoch_losses: Vec::new(),
            state: NetworkState::Constructed,
        }
    }

    /// Builds an already configured network from explicit layers.
    ///
    /// # Errors
    /// `InvalidArgument` if `layers` is empty.
    pub fn from_layers(
        learning_rate: T,
        layers: Vec<Layer<T>>,
        training: Vec<Sample<T>>,
        testing: Vec<Sample<T>>,
    ) -> Result<Self, DigitNetError> {
        if layers.is_empty() {
            return Err(DigitNetError::InvalidArgument(
                "a network needs at least one layer".to_string(),
            ));
        }
        let mut network = Self::new(learning_rate, training, testing);
        network.layers = layers;
        network.state = NetworkState::LayersConfigured;
        Ok(network)
    }

    /// Appends `FullyConnected(input→hidden)`, `ReLU`, `FullyConnected(hidden→output)`
    /// and `SoftMax`, with weights drawn from the thread RNG.
    pub fn setup_layers(&mut self, input_size: usize, hidden_size: usize, output_size: usize) -> Result<(), DigitNetError> {
        self.setup_layers_with_rng(input_size, hidden_size, output_size, &mut rand::thread_rng())
    }

    pub fn setup_layers_with_rng<R: Rng + ?Sized>(
        &mut self,
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Result<(), DigitNetError> {
        if self.state != NetworkState::Constructed {
            return Err(DigitNetError::AlreadyConfigured);
        }
        let layers: Vec<Layer<T>> = vec![
            FullyConnected::with_rng(input_size, hidden_size, self.learning_rate, rng)?.into(),
            Layer::ReLU(ReLU::new()),
            FullyConnected::with_rng(hidden_size, output_size, self.learning_rate, rng)?.into(),
            Layer::SoftMax(SoftMax::new()),
        ];
        self.layers = layers;
        self.state = NetworkState::LayersConfigured;
        info!(
            "Configured network {} -> {} -> {} ({} parameters)",
            input_size,
            hidden_size,
            output_size,
            self.num_parameters()
        );
        Ok(())
    }

    /// Runs `input` through every layer in order.
    pub fn forward_pass(&mut self, input: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
        self.ensure_configured("forward_pass")?;
        forward_through(&mut self.layers, input)
    }

    /// Runs `grad` through every layer in reverse order, updating parameters.
    /// The gradient with respect to the network input is discarded.
    pub fn backward_pass(&mut self, grad: &Vector<T>) -> Result<(), DigitNetError> {
        self.ensure_configured("backward_pass")?;
        backward_through(&mut self.layers, grad)
    }

    /// Trains for up to `epochs` passes over the training samples.
    ///
    /// The loss tracked for an epoch is the loss of its last sample. Training
    /// stops early the first time that value drops below
    /// [`EARLY_STOPPING_THRESHOLD`].
    ///
    /// # Errors
    /// `NotConfigured` before layers are set up, `EmptyDataset` without
    /// training samples, and any layer error raised along the way.
    pub fn train(&mut self, epochs: usize) -> Result<TrainingReport, DigitNetError> {
        self.ensure_configured("train")?;
        if self.training.is_empty() {
            return Err(DigitNetError::EmptyDataset("training".to_string()));
        }

        self.state = NetworkState::Training;
        self.epoch_losses.clear();
        let threshold = T::cast(EARLY_STOPPING_THRESHOLD);
        let start = Instant::now();
        let mut stopped_early = false;

        for epoch in 0..epochs {
            self.loss_history.clear();
            let mut last_loss = T::zero();
            for (index, sample) in self.training.iter().enumerate() {
                let prediction = forward_through(&mut self.layers, &sample.input)?;
                last_loss = self.loss.forward(&prediction, &sample.target)?;
                let grad = self.loss.backward(&prediction, &sample.target)?;
                backward_through(&mut self.layers, &grad)?;
                debug!("epoch {} sample {}: loss {}", epoch + 1, index, last_loss);
            }
            self.loss_history.push(last_loss);

            let sum: T = self.loss_history.iter().copied().sum();
            let avg_loss = sum / T::cast(self.loss_history.len() as f64);
            self.epoch_losses.push(avg_loss.widen());
            info!("Epoch {}/{}: loss = {}", epoch + 1, epochs, avg_loss);

            if avg_loss < threshold {
                info!(
                    "Early stopping after epoch {}: loss {} below {}",
                    epoch + 1,
                    avg_loss,
                    EARLY_STOPPING_THRESHOLD
                );
                stopped_early = true;
                break;
            }
        }

        info!("Training finished in {:.2?}", start.elapsed());
        self.state = if stopped_early {
            NetworkState::Stopped
        } else {
            NetworkState::TestReady
        };
        Ok(TrainingReport {
            epochs_run: self.epoch_losses.len(),
            epoch_losses: self.epoch_losses.clone(),
            stopped_early,
        })
    }

    /// Classifies every testing sample, reporting each `(predicted, actual, index)`
    /// to `sink`.
    ///
    /// Predicted and actual labels are the first maximal index of the network
    /// output and of the one-hot target.
    pub fn test<S: PredictionSink + ?Sized>(&mut self, sink: &mut S) -> Result<TestReport, DigitNetError> {
        self.ensure_configured("test")?;
        if self.testing.is_empty() {
            return Err(DigitNetError::EmptyDataset("testing".to_string()));
        }

        let mut report = TestReport::default();
        for (index, sample) in self.testing.iter().enumerate() {
            let output = forward_through(&mut self.layers, &sample.input)?;
            let predicted = argmax_label(&output, "network output")?;
            let actual = argmax_label(&sample.target, "target")?;
            sink.record(predicted, actual, index)?;
            if predicted == actual {
                report.correct += 1;
            } else {
                report.incorrect += 1;
            }
        }

        info!(
            "Test accuracy: {:.2}% ({} correct, {} incorrect)",
            report.accuracy(),
            report.correct,
            report.incorrect
        );
        Ok(report)
    }

    pub fn state(&self) -> NetworkState {
        self.state
    }

    pub fn learning_rate(&self) -> T {
        self.learning_rate
    }

    pub fn layers(&self) -> &[Layer<T>] {
        &self.layers
    }

    pub fn training_samples(&self) -> &[Sample<T>] {
        &self.training
    }

    pub fn testing_samples(&self) -> &[Sample<T>] {
        &self.testing
    }

    /// Tracked loss of each epoch of the most recent `train` call.
    pub fn epoch_losses(&self) -> &[f64] {
        &self.epoch_losses
    }

    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(Layer::num_parameters).sum()
    }

    fn ensure_configured(&self, operation: &str) -> Result<(), DigitNetError> {
        if self.state == NetworkState::Constructed {
            return Err(DigitNetError::NotConfigured(operation.to_string()));
        }
        Ok(())
    }
}

fn forward_through<T: Real>(layers: &mut [Layer<T>], input: &Vector<T>) -> Result<Vector<T>, DigitNetError> {
    let mut current = input.clone();
    for layer in layers.iter_mut() {
        current = layer.forward(&current)?;
    }
    Ok(current)
}

fn backward_through<T: Real>(layers: &mut [Layer<T>], grad: &Vector<T>) -> Result<(), DigitNetError> {
    let mut current = grad.clone();
    for layer in layers.iter_mut().rev() {
        current = layer.backward(&current)?;
    }
    Ok(())
}

fn argmax_label<T: Real>(values: &Vector<T>, what: &str) -> Result<usize, DigitNetError> {
    values
        .argmax()
        .ok_or_else(|| DigitNetError::InvalidArgument(format!("empty {} has no label", what)))
}

#[cfg(test)]
#[path = "network_test.rs"]
mod tests;
