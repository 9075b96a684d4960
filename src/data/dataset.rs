use burn::data::dataset::Dataset;

use crate::domain::sample::DigitSample;

pub struct DigitDataset {
    samples: Vec<DigitSample>,
}

impl DigitDataset {
    pub fn new(samples: Vec<DigitSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<DigitSample> for DigitDataset {
    fn get(&self, index: usize) -> Option<DigitSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
