use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Info {
  #[clap(long, help = "Print the model details as JSON")]
  json: bool,
}

impl Info {
  pub(crate) fn run(self, config: Config) -> Result {
    let model = Model::load(&config.model_source())
      .context("failed to load model")?;

    if self.json {
      println!("{}", serde_json::to_string_pretty(model.info())?);
    } else {
      println!("{}", model.info());
    }

    Ok(())
  }
}
