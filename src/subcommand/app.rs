use super::*;

#[derive(Debug, Parser)]
pub(crate) struct App {
  #[clap(short, long, help = "Initial confidence threshold")]
  threshold: Option<f32>,
}

impl App {
  pub(crate) fn run(self, config: Config) -> Result {
    let model = Model::load(&config.model_source()).map_err(|error| {
      let error = anyhow::Error::from(error);
      warn!("model failed to load: {error:#}");
      format!("{error:#}")
    });

    let app = Interface::new(
      model,
      self.threshold.unwrap_or(config.confidence_threshold),
    );

    let native_options = NativeOptions {
      centered: true,
      hardware_acceleration: HardwareAcceleration::Preferred,
      viewport: ViewportBuilder {
        title: Some("Cat vs Dog Classifier".into()),
        inner_size: Some(egui::vec2(1100.0, 760.0)),
        min_inner_size: Some(egui::vec2(720.0, 480.0)),
        drag_and_drop: Some(true),
        ..Default::default()
      },
      ..Default::default()
    };

    eframe::run_native(
      env!("CARGO_PKG_NAME"),
      native_options,
      Box::new(|_| Ok(Box::new(app))),
    )
    .map_err(|error| anyhow::anyhow!("failed to run interface: {error}"))
  }
}
