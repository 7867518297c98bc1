//! Rolling sample window
//!
//! Keeps the most recent samples up to a runtime limit (at most the
//! const capacity `N`) and computes per-axis statistics over them.

use heapless::Deque;
use sensorlab_protocol::AccelSample;

/// Summary of the samples currently held in a window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowStats {
    /// Number of samples the statistics cover
    pub count: usize,
    /// Most recent sample
    pub latest: AccelSample,
    /// Per-axis mean
    pub mean: AccelSample,
    /// Per-axis population standard deviation
    pub std_dev: AccelSample,
}

/// Fixed-capacity window of the most recent samples
pub struct SampleWindow<const N: usize> {
    samples: Deque<AccelSample, N>,
    limit: usize,
}

impl<const N: usize> Default for SampleWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SampleWindow<N> {
    /// Create a window that holds up to `N` samples
    pub const fn new() -> Self {
        Self {
            samples: Deque::new(),
            limit: N,
        }
    }

    /// Create a window that holds up to `limit` samples
    ///
    /// The limit is clamped to `1..=N`.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            samples: Deque::new(),
            limit: limit.max(1).min(N),
        }
    }

    /// Maximum number of samples kept
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of samples held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Add a sample, evicting the oldest if the window is full
    pub fn push(&mut self, sample: AccelSample) {
        if self.samples.len() >= self.limit {
            self.samples.pop_front();
        }
        let _ = self.samples.push_back(sample);
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<AccelSample> {
        self.samples.back().copied()
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &AccelSample> {
        self.samples.iter()
    }

    /// Per-axis mean
    pub fn mean(&self) -> Option<AccelSample> {
        if self.samples.is_empty() {
            return None;
        }

        let n = self.samples.len() as f32;
        let mut sum = [0.0f32; 3];
        for sample in self.samples.iter() {
            for (acc, v) in sum.iter_mut().zip(sample.axes()) {
                *acc += v;
            }
        }

        Some(AccelSample::from_axes(sum.map(|s| s / n)))
    }

    /// Per-axis population standard deviation
    pub fn std_dev(&self) -> Option<AccelSample> {
        let mean = self.mean()?.axes();
        let n = self.samples.len() as f32;

        let mut sq = [0.0f32; 3];
        for sample in self.samples.iter() {
            for ((acc, v), m) in sq.iter_mut().zip(sample.axes()).zip(mean) {
                let d = v - m;
                *acc += d * d;
            }
        }

        Some(AccelSample::from_axes(sq.map(|s| libm::sqrtf(s / n))))
    }

    /// Latest sample, mean and standard deviation together
    pub fn stats(&self) -> Option<WindowStats> {
        Some(WindowStats {
            count: self.samples.len(),
            latest: self.latest()?,
            mean: self.mean()?,
            std_dev: self.std_dev()?,
        })
    }
}
