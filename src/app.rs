use super::*;

const CAT_COLOR: Color32 = Color32::from_rgb(0xff, 0x6b, 0x6b);
const DOG_COLOR: Color32 = Color32::from_rgb(0x4e, 0xcd, 0xc4);
const UNCERTAIN_COLOR: Color32 = Color32::from_rgb(0xff, 0x8c, 0x00);
const ERROR_COLOR: Color32 = Color32::from_rgb(0xf4, 0x43, 0x36);

const PIPELINE: [(&str, &str, &str); 5] = [
  ("🔍", "Validation", "Checking file format and size"),
  ("📁", "Loading", "Decoding image data"),
  ("📐", "Resizing", "Scaling to 224x224"),
  ("⚡", "Normalization", "BGR mean subtraction"),
  ("✅", "Ready", "Prepared for inference"),
];

fn label_color(label: Label) -> Color32 {
  match label {
    Label::Cat => CAT_COLOR,
    Label::Dog => DOG_COLOR,
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Theme {
  Dark,
  Light,
}

impl Theme {
  const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

  fn visuals(self) -> egui::Visuals {
    match self {
      Self::Dark => egui::Visuals::dark(),
      Self::Light => egui::Visuals::light(),
    }
  }
}

impl Display for Theme {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Dark => write!(f, "🌙 Dark"),
      Self::Light => write!(f, "☀ Light"),
    }
  }
}

#[derive(Clone, Debug)]
struct Settings {
  threshold: f32,
  show_probabilities: bool,
  show_image_info: bool,
  show_processing_steps: bool,
  theme: Theme,
}

struct Upload {
  name: String,
  info: ImageInfo,
  tensor: NormalizedTensor,
  texture: egui::TextureHandle,
}

pub(crate) struct Interface<C> {
  classifier: Result<C, String>,
  model_info: Option<ModelInfo>,
  settings: Settings,
  stats: SessionStats,
  path_input: String,
  upload: Option<Upload>,
  prediction: Option<Prediction>,
  error: Option<String>,
}

impl Interface<Model> {
  pub(crate) fn new(model: Result<Model, String>, threshold: f32) -> Self {
    let model_info = model.as_ref().ok().map(|model| model.info().clone());
    Self::with_classifier(model, model_info, threshold)
  }
}

impl<C: Classifier> eframe::App for Interface<C> {
  fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
    ctx.set_visuals(self.settings.theme.visuals());

    if let Err(error) = &self.classifier {
      egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
          ui.add_space(80.0);
          ui.heading("❌ Failed to load model");
          ui.add_space(12.0);
          ui.colored_label(ERROR_COLOR, error);
          ui.add_space(12.0);
          ui.label("Restart the application once the model is available.");
        });
      });
      return;
    }

    let dropped = ctx.input(|input| input.raw.dropped_files.clone());

    if let Some(file) = dropped.into_iter().next() {
      let upload = match (file.bytes, file.path) {
        (Some(bytes), _) => Ok(UploadedImage::new(file.name, bytes.to_vec())),
        (None, Some(path)) => UploadedImage::read(&path),
        (None, None) => Ok(UploadedImage::new(file.name, Vec::new())),
      };

      self.open(ctx, upload);
    }

    egui::SidePanel::left("sidebar")
      .resizable(false)
      .default_width(260.0)
      .show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| self.sidebar(ui));
      });

    egui::CentralPanel::default().show(ctx, |ui| {
      egui::ScrollArea::vertical().show(ui, |ui| self.main_panel(ui));
    });
  }
}

impl<C: Classifier> Interface<C> {
  fn with_classifier(
    classifier: Result<C, String>,
    model_info: Option<ModelInfo>,
    threshold: f32,
  ) -> Self {
    Self {
      classifier,
      model_info,
      settings: Settings {
        threshold: reliability::clamp_threshold(threshold),
        show_probabilities: true,
        show_image_info: false,
        show_processing_steps: true,
        theme: Theme::Dark,
      },
      stats: SessionStats::default(),
      path_input: String::new(),
      upload: None,
      prediction: None,
      error: None,
    }
  }

  fn open(
    &mut self,
    ctx: &egui::Context,
    upload: Result<UploadedImage, Error>,
  ) {
    if self.classifier.is_err() {
      return;
    }

    self.upload = None;
    self.prediction = None;
    self.error = None;

    let result = upload.and_then(|upload| {
      let decoded = decode(&upload)?;
      Ok((upload.name, decoded))
    });

    match result {
      Ok((name, DecodedImage { image, info })) => {
        let preview = image.thumbnail(640, 640).to_rgba8();

        let texture = ctx.load_texture(
          "upload",
          egui::ColorImage::from_rgba_unmultiplied(
            [preview.width() as usize, preview.height() as usize],
            preview.as_raw(),
          ),
          egui::TextureOptions::LINEAR,
        );

        self.upload = Some(Upload {
          name,
          info,
          tensor: NormalizedTensor::from_image(&image),
          texture,
        });
      }
      Err(error) => {
        let error = anyhow::Error::from(error);
        warn!("rejected upload: {error:#}");
        self.error = Some(format!("{error:#}"));
      }
    }
  }

  fn analyze(&mut self) {
    let (Ok(classifier), Some(upload)) = (&self.classifier, &self.upload)
    else {
      return;
    };

    match classifier.classify(&upload.tensor) {
      Ok(prediction) => {
        self.stats.record(&prediction);
        self.prediction = Some(prediction);
        self.error = None;
      }
      Err(error) => {
        let error = anyhow::Error::from(error);
        warn!("prediction failed: {error:#}");
        self.prediction = None;
        self.error = Some(format!("{error:#}"));
      }
    }
  }

  fn sidebar(&mut self, ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
      ui.heading("🐱🐶 AI Classifier");
      ui.label("Powered by Deep Learning");
    });

    ui.separator();

    ui.strong("🎨 Appearance");

    egui::ComboBox::from_label("Theme")
      .selected_text(self.settings.theme.to_string())
      .show_ui(ui, |ui| {
        for theme in Theme::ALL {
          ui.selectable_value(&mut self.settings.theme, theme, theme.to_string());
        }
      });

    ui.separator();

    ui.strong("⚙ Prediction Settings");

    ui.add(
      egui::Slider::new(&mut self.settings.threshold, 0.5..=1.0)
        .step_by(0.05)
        .text("🎯 Threshold"),
    );

    let mode = ThresholdMode::from_threshold(self.settings.threshold);

    ui.colored_label(mode.color(), format!("{mode} Mode"));

    ui.checkbox(
      &mut self.settings.show_probabilities,
      "📈 Show probability chart",
    );
    ui.checkbox(&mut self.settings.show_image_info, "📷 Show image details");
    ui.checkbox(
      &mut self.settings.show_processing_steps,
      "🔄 Show processing steps",
    );

    ui.separator();

    ui.strong("🤖 Model Dashboard");

    if let Some(info) = &self.model_info {
      egui::Grid::new("model_info").num_columns(2).show(ui, |ui| {
        ui.label("Parameters");
        ui.label(format!("{:.1}M", info.parameters as f64 / 1e6));
        ui.end_row();

        ui.label("Nodes");
        ui.label(info.nodes.to_string());
        ui.end_row();

        ui.label("Input");
        ui.label(format!("[{}]", info.input_shape.join(", ")));
        ui.end_row();

        ui.label("Output");
        ui.label(format!("[{}]", info.output_shape.join(", ")));
        ui.end_row();
      });

      ui.collapsing("🔧 Technical Specs", |ui| {
        ui.label("Architecture: VGG16 + custom head");
        ui.label("Classification: binary");
        ui.label("Preprocessing: ImageNet mean subtraction (BGR)");
      });
    } else {
      ui.label("No model details available");
    }

    ui.separator();

    ui.strong("📊 Understanding Results");

    ui.label(format!(
      "Confidence ≥ {:.0}%: reliable prediction",
      self.settings.threshold * 100.0
    ));
    ui.label(format!(
      "50-{:.0}%: uncertain, review the image",
      self.settings.threshold * 100.0
    ));

    ui.separator();

    ui.strong("📈 Session Stats");

    egui::Grid::new("session_stats").num_columns(2).show(ui, |ui| {
      ui.label("🔮 Predictions");
      ui.label(self.stats.predictions.to_string());
      ui.end_row();

      for label in Label::ALL {
        ui.label(format!("{} {label}s found", label.emoji()));
        ui.label(self.stats.count(label).to_string());
        ui.end_row();
      }
    });
  }

  fn main_panel(&mut self, ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
      ui.add_space(12.0);
      ui.heading(RichText::new("🐱 AI Pet Classifier 🐶").size(32.0).strong());
      ui.label("Upload an image and let the VGG16 model tell cats from dogs");
      ui.add_space(12.0);
    });

    ui.separator();

    let hovering = ui.ctx().input(|input| !input.raw.hovered_files.is_empty());

    ui.strong(if hovering {
      "📥 Release to upload"
    } else {
      "📁 Drop a JPG, PNG or BMP image here, or open one by path"
    });

    let mut open = false;

    ui.horizontal(|ui| {
      let response = ui.text_edit_singleline(&mut self.path_input);

      open = ui.button("Open").clicked()
        || (response.lost_focus()
          && ui.input(|input| input.key_pressed(egui::Key::Enter)));
    });

    if open && !self.path_input.trim().is_empty() {
      let upload = UploadedImage::read(Path::new(self.path_input.trim()));
      self.open(ui.ctx(), upload);
    }

    if let Some(error) = &self.error {
      ui.colored_label(ERROR_COLOR, format!("❌ {error}"));
    }

    let mut analyze = false;

    if let Some(upload) = &self.upload {
      if self.settings.show_processing_steps {
        ui.add_space(8.0);
        ui.strong("🔄 Processing Pipeline");

        ui.horizontal_wrapped(|ui| {
          for (icon, name, description) in PIPELINE {
            egui::Frame::group(ui.style()).show(ui, |ui| {
              ui.vertical(|ui| {
                ui.label(format!("{icon} {name}"));
                ui.small(description);
              });
            });
          }
        });
      }

      ui.add_space(8.0);

      ui.vertical_centered(|ui| {
        ui.add(
          egui::Image::from_texture(egui::load::SizedTexture::from_handle(
            &upload.texture,
          ))
          .max_width(480.0)
          .max_height(360.0),
        );
        ui.label(format!("📷 {}", upload.name));
      });

      if self.settings.show_image_info {
        let info = &upload.info;

        egui::Grid::new("image_info").num_columns(2).show(ui, |ui| {
          ui.label("🖼 Format");
          ui.label(&info.format);
          ui.end_row();

          ui.label("📏 Dimensions");
          ui.label(format!("{}×{}", info.width, info.height));
          ui.end_row();

          ui.label("🔍 Megapixels");
          ui.label(format!("{} MP", info.megapixels));
          ui.end_row();

          ui.label("🎨 Color Mode");
          ui.label(&info.color);
          ui.end_row();
        });
      }

      ui.add_space(12.0);

      ui.vertical_centered(|ui| {
        analyze = ui
          .add_sized(
            [220.0, 40.0],
            egui::Button::new(RichText::new("🎯 Analyze Image").size(18.0)),
          )
          .clicked();
      });
    } else {
      ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading("👆 Upload an image to get started!");
        ui.label("Select a clear photo of a cat or dog.");
        ui.label("Supported formats: JPG, JPEG, PNG, BMP (up to 10 MB)");
      });
    }

    if analyze {
      self.analyze();
    }

    if let Some(prediction) = self.prediction {
      self.results(ui, prediction);
    }
  }

  fn results(&self, ui: &mut egui::Ui, prediction: Prediction) {
    let reliability =
      Reliability::assess(prediction.confidence, self.settings.threshold);

    let (fill, headline) = match reliability {
      Reliability::Reliable => (
        label_color(prediction.label),
        format!("It's a {}!", prediction.label),
      ),
      Reliability::Uncertain => {
        (UNCERTAIN_COLOR, format!("Probably a {}?", prediction.label))
      }
    };

    ui.add_space(12.0);
    ui.strong("🎯 AI Prediction Results");

    egui::Frame::none()
      .fill(fill)
      .rounding(16.0)
      .inner_margin(24.0)
      .show(ui, |ui| {
        ui.vertical_centered(|ui| {
          ui.label(RichText::new(prediction.label.emoji()).size(48.0));
          ui.label(
            RichText::new(headline)
              .size(28.0)
              .strong()
              .color(Color32::WHITE),
          );
          ui.label(
            RichText::new(format!(
              "Confidence: {:.1}%",
              prediction.confidence * 100.0
            ))
            .size(20.0)
            .color(Color32::WHITE),
          );
          ui.label(
            RichText::new(format!("💡 {}", prediction.label.fun_fact()))
              .italics()
              .color(Color32::WHITE),
          );
        });
      });

    match reliability {
      Reliability::Reliable => ui.colored_label(
        ThresholdMode::HighPrecision.color(),
        format!(
          "High confidence prediction, the model is {:.1}% certain.",
          prediction.confidence * 100.0
        ),
      ),
      Reliability::Uncertain => ui.colored_label(
        UNCERTAIN_COLOR,
        format!(
          "Confidence is below {:.0}%, consider reviewing the image.",
          self.settings.threshold * 100.0
        ),
      ),
    };

    let level = ConfidenceLevel::from_confidence(prediction.confidence);

    ui.add_space(8.0);
    ui.strong("🧠 AI Confidence Analysis");

    egui::Frame::none()
      .fill(level.color().gamma_multiply(0.15))
      .stroke(egui::Stroke::new(2.0, level.color()))
      .rounding(12.0)
      .inner_margin(16.0)
      .show(ui, |ui| {
        ui.label(
          RichText::new(format!(
            "{} {level} Confidence ({:.1}%)",
            level.icon(),
            prediction.confidence * 100.0
          ))
          .strong()
          .color(level.color()),
        );
        ui.label(level.description());
      });

    if self.settings.show_probabilities {
      ui.add_space(8.0);
      ui.strong("📊 Class Probabilities");

      for (label, probability) in prediction.probabilities.iter() {
        ui.add(
          egui::ProgressBar::new(probability)
            .text(format!(
              "{} {label}: {:.1}%",
              label.emoji(),
              probability * 100.0
            ))
            .fill(label_color(label)),
        );
      }
    }
  }
}
