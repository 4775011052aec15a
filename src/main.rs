use {
  crate::{
    app::Interface,
    arguments::Arguments,
    config::Config,
    error::Error,
    model::{Classifier, Model, ModelInfo, ModelSource},
    normalize::{decode, normalize, DecodedImage, ImageInfo, NormalizedTensor},
    prediction::{Label, Prediction},
    reliability::{ConfidenceLevel, Reliability, ThresholdMode},
    stats::SessionStats,
    subcommand::Subcommand,
    upload::UploadedImage,
  },
  anyhow::Context,
  clap::Parser,
  eframe::{
    egui::{self, Color32, RichText, ViewportBuilder},
    HardwareAcceleration, NativeOptions,
  },
  image::{imageops::FilterType, DynamicImage},
  indicatif::{ProgressBar, ProgressStyle},
  ndarray::Array4,
  serde::{Deserialize, Serialize},
  std::{
    fmt::{self, Display, Formatter},
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    process,
  },
  tracing::{debug, info, warn},
};

mod app;
mod arguments;
mod config;
mod error;
mod model;
mod normalize;
mod prediction;
mod reliability;
mod stats;
mod subcommand;
mod upload;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn init_tracing() {
  use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
  };

  tracing_subscriber::registry()
    .with(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .init();
}

fn main() {
  init_tracing();

  if let Err(error) = Arguments::parse().run() {
    eprintln!("error: {error:#}");
    process::exit(1);
  }
}
