use {super::*, app::App, info::Info, predict::Predict};

mod app;
mod info;
mod predict;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  #[clap(name = "app", about = "Run the interactive classifier window")]
  App(App),
  #[clap(name = "info", about = "Print details about the model artifact")]
  Info(Info),
  #[clap(name = "predict", about = "Classify a single image file")]
  Predict(Predict),
}

impl Subcommand {
  pub(crate) fn run(self, config: Config) -> Result {
    match self {
      Self::App(app) => app.run(config),
      Self::Info(info) => info.run(config),
      Self::Predict(predict) => predict.run(config),
    }
  }
}
