//! Progress indicators for batch generation
//!
//! Uses `linya` for allocation-free, concurrency-optimized progress bars

use linya::{Bar, Progress};
use std::sync::{Arc, Mutex};

/// Thread-safe progress bar shared by rayon workers
#[derive(Clone)]
pub struct BatchProgress {
  progress: Arc<Mutex<Progress>>,
  bar: Arc<Bar>,
}

impl BatchProgress {
  /// Create a new progress bar for `total` releases
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self {
      progress: Arc::new(Mutex::new(progress)),
      bar: Arc::new(bar),
    }
  }

  /// Increment progress by 1 (thread-safe)
  pub fn inc(&self) {
    // A poisoned lock only means another worker panicked mid-draw
    if let Ok(mut progress) = self.progress.lock() {
      progress.inc_and_draw(&self.bar, 1);
    }
  }
}
