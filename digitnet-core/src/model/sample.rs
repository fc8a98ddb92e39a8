use crate::linalg::Vector;

/// One labelled example: an input feature vector and its one-hot target.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<T> {
    pub input: Vector<T>,
    pub target: Vector<T>,
}

impl<T> Sample<T> {
    pub fn new(input: Vector<T>, target: Vector<T>) -> Self {
        Sample { input, target }
    }
}
