//! Bounded moving-average smoothing of gaze samples.
//!
//! Unlike a centered moving average over a finished signal, this buffer only
//! sees the past: each frame's smoothed value is the mean of the most recent
//! `window` samples. A partially filled window averages what it has, so the
//! first few frames are noisier than later ones.

use std::collections::VecDeque;

use gazecue_model::event::GazeSample;

use crate::error::FrameFault;

/// Per-axis FIFO history with a fixed capacity.
#[derive(Debug, Clone)]
pub struct SmoothingBuffer {
    xs: VecDeque<f64>,
    ys: VecDeque<f64>,
    capacity: usize,
}

impl SmoothingBuffer {
    /// Create a buffer holding at most `capacity` samples (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            xs: VecDeque::with_capacity(capacity),
            ys: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one when full.
    pub fn push(&mut self, sample: GazeSample) {
        if self.xs.len() == self.capacity {
            self.xs.pop_front();
            self.ys.pop_front();
        }
        self.xs.push_back(sample.x);
        self.ys.push_back(sample.y);
    }

    /// Arithmetic mean of each axis over the current contents.
    pub fn mean(&self) -> Result<GazeSample, FrameFault> {
        if self.xs.is_empty() {
            return Err(FrameFault::InsufficientSmoothingData);
        }
        let count = self.xs.len() as f64;
        let sum_x: f64 = self.xs.iter().sum();
        let sum_y: f64 = self.ys.iter().sum();
        Ok(GazeSample::new(sum_x / count, sum_y / count))
    }

    /// Push a sample and return the updated mean.
    pub fn smooth(&mut self, sample: GazeSample) -> Result<GazeSample, FrameFault> {
        self.push(sample);
        self.mean()
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.xs.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.xs.clear();
        self.ys.clear();
    }
}
