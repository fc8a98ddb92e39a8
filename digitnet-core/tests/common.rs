use digitnet_core::{FullyConnected, Layer, Matrix, Network, ReLU, Sample, SoftMax, Vector};

// Each integration test binary pulls in this module; not every binary uses every helper.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn sample(input: &[f64], target: &[f64]) -> Sample<f64> {
    Sample::new(Vector::from_vec(input.to_vec()), Vector::from_vec(target.to_vec()))
}

/// Two orthogonal inputs, one per class.
#[allow(dead_code)]
pub fn two_class_samples() -> Vec<Sample<f64>> {
    vec![sample(&[1.0, 0.0], &[1.0, 0.0]), sample(&[0.0, 1.0], &[0.0, 1.0])]
}

/// `2 → 4 → 2` network with fixed, hand-picked initial weights.
#[allow(dead_code)]
pub fn fixed_network(
    learning_rate: f64,
    training: Vec<Sample<f64>>,
    testing: Vec<Sample<f64>>,
) -> Network<f64> {
    let hidden = FullyConnected::from_parameters(
        Matrix::from_vec(4, 2, vec![1.0, 0.5, 0.5, 1.0, 0.3, -0.2, -0.1, 0.4]).expect("hidden weights"),
        Vector::new(4),
        learning_rate,
    )
    .expect("hidden layer");
    let output = FullyConnected::from_parameters(
        Matrix::from_vec(2, 4, vec![0.1, -0.1, 0.05, 0.0, 0.0, 0.1, -0.05, 0.1]).expect("output weights"),
        Vector::new(2),
        learning_rate,
    )
    .expect("output layer");
    let layers: Vec<Layer<f64>> = vec![
        hidden.into(),
        Layer::ReLU(ReLU::new()),
        output.into(),
        Layer::SoftMax(SoftMax::new()),
    ];
    Network::from_layers(learning_rate, layers, training, testing).expect("network")
}
