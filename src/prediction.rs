use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub(crate) enum Label {
  Cat,
  Dog,
}

impl Label {
  pub(crate) const ALL: [Label; 2] = [Label::Cat, Label::Dog];

  pub(crate) fn emoji(self) -> &'static str {
    match self {
      Self::Cat => "🐱",
      Self::Dog => "🐶",
    }
  }

  pub(crate) fn fun_fact(self) -> &'static str {
    match self {
      Self::Cat => {
        "Cats have excellent night vision and can rotate their ears 180 degrees!"
      }
      Self::Dog => {
        "Dogs have an incredible sense of smell, around 40x better than humans!"
      }
    }
  }
}

impl Display for Label {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Cat => write!(f, "Cat"),
      Self::Dog => write!(f, "Dog"),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct Probabilities {
  pub(crate) cat: f32,
  pub(crate) dog: f32,
}

impl Probabilities {
  pub(crate) fn get(&self, label: Label) -> f32 {
    match label {
      Label::Cat => self.cat,
      Label::Dog => self.dog,
    }
  }

  pub(crate) fn iter(&self) -> impl Iterator<Item = (Label, f32)> + '_ {
    Label::ALL.into_iter().map(|label| (label, self.get(label)))
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct Prediction {
  pub(crate) label: Label,
  pub(crate) confidence: f32,
  pub(crate) probabilities: Probabilities,
}

impl Prediction {
  /// Interprets raw model output, either a single sigmoid score for `Dog` or
  /// a `[cat, dog]` distribution.
  pub(crate) fn from_output(output: &[f32]) -> Result<Self, Error> {
    for &value in output {
      if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidProbability { value });
      }
    }

    let probabilities = match *output {
      [dog] => Probabilities {
        cat: 1.0 - dog,
        dog,
      },
      [cat, dog] => {
        let total = cat + dog;

        if total <= 0.0 {
          return Err(Error::InvalidProbability { value: total });
        }

        Probabilities {
          cat: cat / total,
          dog: dog / total,
        }
      }
      _ => return Err(Error::UnexpectedOutput { len: output.len() }),
    };

    let (label, confidence) = if probabilities.dog > probabilities.cat {
      (Label::Dog, probabilities.dog)
    } else {
      (Label::Cat, probabilities.cat)
    };

    Ok(Self {
      label,
      confidence,
      probabilities,
    })
  }
}

#[cfg(test)]
mod tests {
  use {super::*, approx::assert_relative_eq};

  #[test]
  fn sigmoid_output_maps_to_complementary_probabilities() {
    for step in 0..=100 {
      let p = step as f32 / 100.0;

      let prediction = Prediction::from_output(&[p]).unwrap();

      let expected = if p > 0.5 { Label::Dog } else { Label::Cat };

      assert_eq!(prediction.label, expected, "p = {p}");
      assert_relative_eq!(prediction.confidence, p.max(1.0 - p));
      assert_relative_eq!(
        prediction.probabilities.cat + prediction.probabilities.dog,
        1.0,
        epsilon = 1e-6
      );
      assert!((0.5..=1.0).contains(&prediction.confidence));
    }
  }

  #[test]
  fn two_element_output_is_read_as_cat_then_dog() {
    let prediction = Prediction::from_output(&[0.25, 0.75]).unwrap();

    assert_eq!(prediction.label, Label::Dog);
    assert_relative_eq!(prediction.confidence, 0.75);
    assert_relative_eq!(prediction.probabilities.get(Label::Cat), 0.25);

    let prediction = Prediction::from_output(&[0.9, 0.1]).unwrap();

    assert_eq!(prediction.label, Label::Cat);
    assert_relative_eq!(prediction.confidence, 0.9);
  }

  #[test]
  fn complementary_pairs_follow_the_larger_probability() {
    for step in 0..=20 {
      let p = step as f32 / 20.0;

      let prediction = Prediction::from_output(&[1.0 - p, p]).unwrap();

      if p > 0.5 {
        assert_eq!(prediction.label, Label::Dog);
      } else if p < 0.5 {
        assert_eq!(prediction.label, Label::Cat);
      }

      assert_relative_eq!(prediction.confidence, p.max(1.0 - p), epsilon = 1e-6);

      let total: f32 = prediction.probabilities.iter().map(|(_, p)| p).sum();

      assert_relative_eq!(total, 1.0, epsilon = 1e-6);
    }
  }

  #[test]
  fn unnormalized_pairs_are_rescaled() {
    let prediction = Prediction::from_output(&[0.2, 0.2]).unwrap();

    assert_eq!(prediction.label, Label::Cat);
    assert_relative_eq!(prediction.probabilities.cat, 0.5);
    assert_relative_eq!(prediction.probabilities.dog, 0.5);
  }

  #[test]
  fn exact_tie_reads_as_cat() {
    assert_eq!(Prediction::from_output(&[0.5]).unwrap().label, Label::Cat);
  }

  #[test]
  fn rejects_unexpected_shapes() {
    assert!(matches!(
      Prediction::from_output(&[]),
      Err(Error::UnexpectedOutput { len: 0 })
    ));

    assert!(matches!(
      Prediction::from_output(&[0.1, 0.2, 0.7]),
      Err(Error::UnexpectedOutput { len: 3 })
    ));
  }

  #[test]
  fn rejects_values_that_are_not_probabilities() {
    for output in [[f32::NAN], [1.5], [-0.1], [f32::INFINITY]] {
      assert!(matches!(
        Prediction::from_output(&output),
        Err(Error::InvalidProbability { .. })
      ));
    }

    assert!(matches!(
      Prediction::from_output(&[0.0, 0.0]),
      Err(Error::InvalidProbability { .. })
    ));
  }

  #[test]
  fn probabilities_iterate_in_label_order() {
    let probabilities = Probabilities { cat: 0.3, dog: 0.7 };

    assert_eq!(
      probabilities.iter().collect::<Vec<_>>(),
      vec![(Label::Cat, 0.3), (Label::Dog, 0.7)]
    );
  }

  #[test]
  fn serializes_with_label_names() {
    let prediction = Prediction::from_output(&[0.8]).unwrap();

    let json = serde_json::to_value(prediction).unwrap();

    assert_eq!(json["label"], "Dog");
    assert_eq!(json["probabilities"].as_object().unwrap().len(), 2);
  }
}
