use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Predict {
  #[clap(short, long)]
  image: PathBuf,
  #[clap(short, long, help = "Confidence needed to call a result reliable")]
  threshold: Option<f32>,
  #[clap(long, help = "Print the prediction as JSON")]
  json: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
  image: &'a str,
  #[serde(flatten)]
  prediction: Prediction,
  threshold: f32,
  reliability: Reliability,
  confidence_level: ConfidenceLevel,
}

impl Predict {
  pub(crate) fn run(self, config: Config) -> Result {
    let threshold = reliability::clamp_threshold(
      self.threshold.unwrap_or(config.confidence_threshold),
    );

    let upload = UploadedImage::read(&self.image)?;

    let tensor = normalize(&upload)
      .with_context(|| format!("failed to process {}", self.image.display()))?;

    let model = Model::load(&config.model_source())
      .context("failed to load model")?;

    let prediction = model.classify(&tensor).context("prediction failed")?;

    let report = Report {
      image: &upload.name,
      prediction,
      threshold,
      reliability: Reliability::assess(prediction.confidence, threshold),
      confidence_level: ConfidenceLevel::from_confidence(prediction.confidence),
    };

    if self.json {
      println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
      report.print();
    }

    Ok(())
  }
}

impl Report<'_> {
  fn print(&self) {
    let prediction = &self.prediction;

    println!(
      "{} It's a {}! ({:.1}% confident, {})",
      prediction.label.emoji(),
      prediction.label,
      prediction.confidence * 100.0,
      self.reliability,
    );

    for (label, probability) in prediction.probabilities.iter() {
      println!("  {label}: {:.1}%", probability * 100.0);
    }

    println!(
      "{} {} confidence: {}",
      self.confidence_level.icon(),
      self.confidence_level,
      self.confidence_level.description()
    );

    if self.reliability == Reliability::Uncertain {
      println!(
        "Confidence is below {:.0}%, consider reviewing the image.",
        self.threshold * 100.0
      );
    }
  }
}
