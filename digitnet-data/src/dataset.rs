use digitnet_core::DigitNetError;

/// Represents a dataset that can be accessed by index.
///
/// A dataset is a fixed, ordered collection of items. Index order is the
/// order in which samples are presented to training and testing.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item: Send + 'static;

    /// Returns the item at the given index.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index >= self.len()`, or any error
    /// raised while building the item.
    fn get(&self, index: usize) -> Result<Self::Item, DigitNetError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
