use super::*;

#[derive(Debug, Parser)]
#[clap(about = "Classify photos of cats and dogs with a pretrained model")]
pub(crate) struct Arguments {
  #[clap(long, global = true, help = "Read settings from a JSON config file")]
  config: Option<PathBuf>,
  #[clap(long, global = true, help = "Path of the ONNX model artifact")]
  model: Option<PathBuf>,
  #[clap(long, global = true, help = "URL to fetch the model from if missing")]
  model_url: Option<String>,
  #[clap(subcommand)]
  subcommand: Subcommand,
}

impl Arguments {
  pub(crate) fn run(self) -> Result {
    let config = self.config()?;
    self.subcommand.run(config)
  }

  fn config(&self) -> Result<Config> {
    let mut config = match &self.config {
      Some(path) => Config::load(path)?,
      None => Config::default(),
    };

    if let Some(model) = &self.model {
      config.model_path = model.clone();
    }

    if let Some(model_url) = &self.model_url {
      config.model_url = model_url.clone();
    }

    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_override_defaults() {
    let arguments = Arguments::try_parse_from([
      "pet-classifier",
      "info",
      "--model",
      "pets.onnx",
      "--model-url",
      "http://localhost/pets.onnx",
    ])
    .unwrap();

    assert_eq!(
      arguments.config().unwrap(),
      Config {
        model_path: "pets.onnx".into(),
        model_url: "http://localhost/pets.onnx".into(),
        ..Config::default()
      }
    );
  }

  #[test]
  fn defaults_without_flags() {
    let arguments =
      Arguments::try_parse_from(["pet-classifier", "app"]).unwrap();

    assert_eq!(arguments.config().unwrap(), Config::default());
  }
}
