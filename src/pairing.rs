use rand::seq::SliceRandom;
use rand::Rng;

/// An unordered pair of image indices, `first < second`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImagePair {
    pub first: usize,
    pub second: usize,
}

/// Every unordered pair of the discovered images, shuffled once at build
/// time and consumed front-to-back by the batch driver.
#[derive(Clone, Debug)]
pub struct PairQueue {
    pairs: Vec<ImagePair>,
}

impl PairQueue {
    /// Enumerate the full combination set of `image_count` indices, then
    /// shuffle it with the caller's generator.
    pub fn build<R: Rng>(image_count: usize, rng: &mut R) -> Self {
        let mut pairs = Vec::with_capacity(image_count * image_count.saturating_sub(1) / 2);
        for first in 0..image_count {
            for second in (first + 1)..image_count {
                pairs.push(ImagePair { first, second });
            }
        }

        pairs.shuffle(rng);
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Half of all pairs, at least one page per run.
    pub fn planned_output_count(&self) -> usize {
        (self.pairs.len() / 2).max(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImagePair> {
        self.pairs.iter()
    }
}
