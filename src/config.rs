use super::*;

pub(crate) const DEFAULT_MODEL_PATH: &str = "vgg16_cat_dog_classifier.onnx";

pub(crate) const DEFAULT_MODEL_URL: &str =
  "https://drive.google.com/uc?export=download&id=1YucE0YxT0iDXPGXK83NoL7c5ht4g9q1Q";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
  pub(crate) model_path: PathBuf,
  pub(crate) model_url: String,
  pub(crate) confidence_threshold: f32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      model_path: DEFAULT_MODEL_PATH.into(),
      model_url: DEFAULT_MODEL_URL.into(),
      confidence_threshold: reliability::DEFAULT_THRESHOLD,
    }
  }
}

impl Config {
  pub(crate) fn load(path: &Path) -> Result<Self> {
    let file = File::open(path).with_context(|| {
      format!("failed to open config file {}", path.display())
    })?;

    let config: Config = serde_json::from_reader(file).with_context(|| {
      format!("failed to deserialize config file {}", path.display())
    })?;

    Ok(Self {
      confidence_threshold: reliability::clamp_threshold(
        config.confidence_threshold,
      ),
      ..config
    })
  }

  pub(crate) fn model_source(&self) -> ModelSource {
    ModelSource {
      path: self.model_path.clone(),
      url: self.model_url.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::*, tempdir::TempDir};

  #[test]
  fn missing_fields_fall_back_to_defaults() {
    let dir = TempDir::new("config").unwrap();

    let path = dir.path().join("config.json");

    fs::write(&path, r#"{ "model_path": "models/pets.onnx" }"#).unwrap();

    assert_eq!(
      Config::load(&path).unwrap(),
      Config {
        model_path: "models/pets.onnx".into(),
        ..Config::default()
      }
    );
  }

  #[test]
  fn threshold_is_clamped_on_load() {
    let dir = TempDir::new("config").unwrap();

    let path = dir.path().join("config.json");

    fs::write(&path, r#"{ "confidence_threshold": 0.2 }"#).unwrap();

    assert_eq!(Config::load(&path).unwrap().confidence_threshold, 0.5);
  }

  #[test]
  fn unknown_fields_are_rejected() {
    let dir = TempDir::new("config").unwrap();

    let path = dir.path().join("config.json");

    fs::write(&path, r#"{ "learning_rate": 0.1 }"#).unwrap();

    assert!(Config::load(&path).is_err());
  }

  #[test]
  fn missing_file_is_an_error() {
    let dir = TempDir::new("config").unwrap();

    assert!(Config::load(&dir.path().join("absent.json")).is_err());
  }
}
