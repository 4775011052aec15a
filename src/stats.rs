use super::*;

/// Running tallies shown in the side panel. Owned by the interface and reset
/// whenever the process restarts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionStats {
  pub(crate) predictions: u64,
  pub(crate) cats: u64,
  pub(crate) dogs: u64,
}

impl SessionStats {
  pub(crate) fn record(&mut self, prediction: &Prediction) {
    self.predictions += 1;

    match prediction.label {
      Label::Cat => self.cats += 1,
      Label::Dog => self.dogs += 1,
    }
  }

  pub(crate) fn count(&self, label: Label) -> u64 {
    match label {
      Label::Cat => self.cats,
      Label::Dog => self.dogs,
    }
  }
}
