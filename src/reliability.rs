use super::*;

pub(crate) const MIN_THRESHOLD: f32 = 0.5;
pub(crate) const MAX_THRESHOLD: f32 = 1.0;
pub(crate) const DEFAULT_THRESHOLD: f32 = 0.8;

pub(crate) fn clamp_threshold(threshold: f32) -> f32 {
  if threshold.is_nan() {
    DEFAULT_THRESHOLD
  } else {
    threshold.clamp(MIN_THRESHOLD, MAX_THRESHOLD)
  }
}

/// Whether a prediction clears the user's confidence threshold. This only
/// affects how a result is presented, never which label is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub(crate) enum Reliability {
  Reliable,
  Uncertain,
}

impl Reliability {
  pub(crate) fn assess(confidence: f32, threshold: f32) -> Self {
    if confidence >= clamp_threshold(threshold) {
      Self::Reliable
    } else {
      Self::Uncertain
    }
  }
}

impl Display for Reliability {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Reliable => write!(f, "reliable"),
      Self::Uncertain => write!(f, "uncertain"),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ThresholdMode {
  HighPrecision,
  Balanced,
  HighRecall,
}

impl ThresholdMode {
  pub(crate) fn from_threshold(threshold: f32) -> Self {
    let threshold = clamp_threshold(threshold);

    if threshold >= 0.8 {
      Self::HighPrecision
    } else if threshold >= 0.7 {
      Self::Balanced
    } else {
      Self::HighRecall
    }
  }

  pub(crate) fn color(self) -> Color32 {
    match self {
      Self::HighPrecision => Color32::from_rgb(0x4c, 0xaf, 0x50),
      Self::Balanced => Color32::from_rgb(0xff, 0x98, 0x00),
      Self::HighRecall => Color32::from_rgb(0xf4, 0x43, 0x36),
    }
  }
}

impl Display for ThresholdMode {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::HighPrecision => write!(f, "High Precision"),
      Self::Balanced => write!(f, "Balanced"),
      Self::HighRecall => write!(f, "High Recall"),
    }
  }
}

/// How strongly the model backs its own answer, independent of the user's
/// threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub(crate) enum ConfidenceLevel {
  ExtremelyHigh,
  High,
  Moderate,
  Low,
  VeryLow,
}

impl ConfidenceLevel {
  pub(crate) fn from_confidence(confidence: f32) -> Self {
    if confidence >= 0.9 {
      Self::ExtremelyHigh
    } else if confidence >= 0.8 {
      Self::High
    } else if confidence >= 0.7 {
      Self::Moderate
    } else if confidence >= 0.6 {
      Self::Low
    } else {
      Self::VeryLow
    }
  }

  pub(crate) fn icon(self) -> &'static str {
    match self {
      Self::ExtremelyHigh => "🎯",
      Self::High => "✅",
      Self::Moderate => "⚠",
      Self::Low => "🤔",
      Self::VeryLow => "❓",
    }
  }

  pub(crate) fn color(self) -> Color32 {
    match self {
      Self::ExtremelyHigh => Color32::from_rgb(0x4c, 0xaf, 0x50),
      Self::High => Color32::from_rgb(0x8b, 0xc3, 0x4a),
      Self::Moderate => Color32::from_rgb(0xff, 0xc1, 0x07),
      Self::Low => Color32::from_rgb(0xff, 0x98, 0x00),
      Self::VeryLow => Color32::from_rgb(0xf4, 0x43, 0x36),
    }
  }

  pub(crate) fn description(self) -> &'static str {
    match self {
      Self::ExtremelyHigh => "The model is very certain about this prediction.",
      Self::High => "Strong confidence in the prediction result.",
      Self::Moderate => "Reasonable confidence, but some uncertainty remains.",
      Self::Low => "Limited confidence, consider image quality.",
      Self::VeryLow => "High uncertainty, image may be unclear or ambiguous.",
    }
  }
}

impl Display for ConfidenceLevel {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::ExtremelyHigh => write!(f, "Extremely High"),
      Self::High => write!(f, "High"),
      Self::Moderate => write!(f, "Moderate"),
      Self::Low => write!(f, "Low"),
      Self::VeryLow => write!(f, "Very Low"),
    }
  }
}
