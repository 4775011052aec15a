use {super::*, tract_onnx::prelude::*};

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// Where the serialized model lives on disk, and where to fetch it from when
/// it is not there yet.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ModelSource {
  pub(crate) path: PathBuf,
  pub(crate) url: String,
}

impl ModelSource {
  fn partial_path(&self) -> PathBuf {
    let mut name = self.path.as_os_str().to_owned();
    name.push(".part");
    name.into()
  }

  /// Downloads the artifact unless a local copy already exists, returning
  /// whether a download happened. The body is streamed into a `.part` file
  /// which is only renamed into place once the transfer completes.
  pub(crate) fn fetch(&self) -> Result<bool, Error> {
    if self.path.exists() {
      debug!(path = %self.path.display(), "using cached model artifact");
      return Ok(false);
    }

    info!(
      url = %self.url,
      path = %self.path.display(),
      "model artifact missing, downloading"
    );

    let download_error = |source| Error::Download {
      url: self.url.clone(),
      source,
    };

    let response = reqwest::blocking::get(&self.url)
      .and_then(|response| response.error_for_status())
      .map_err(download_error)?;

    if let Some(parent) = self
      .path
      .parent()
      .filter(|parent| !parent.as_os_str().is_empty())
    {
      fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }

    let partial = self.partial_path();

    let progress_bar = match response.content_length() {
      Some(length) => ProgressBar::new(length).with_style(
        ProgressStyle::default_bar()
          .template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}",
          )
          .unwrap_or_else(|_| ProgressStyle::default_bar())
          .progress_chars("=>-"),
      ),
      None => ProgressBar::new_spinner(),
    };

    progress_bar.set_message("Downloading model");

    let copied = File::create(&partial).and_then(|mut file| {
      let bytes = io::copy(&mut progress_bar.wrap_read(response), &mut file)?;
      file.flush()?;
      Ok(bytes)
    });

    let bytes = match copied {
      Ok(bytes) => bytes,
      Err(source) => {
        progress_bar.abandon_with_message("Download failed");
        discard(&partial);
        return Err(Error::Io {
          path: partial,
          source,
        });
      }
    };

    if let Err(source) = fs::rename(&partial, &self.path) {
      progress_bar.abandon_with_message("Download failed");
      discard(&partial);
      return Err(Error::Io {
        path: self.path.clone(),
        source,
      });
    }

    progress_bar.finish_with_message("Model downloaded");

    info!(bytes, path = %self.path.display(), "model artifact downloaded");

    Ok(true)
  }
}

fn discard(path: &Path) {
  if let Err(error) = fs::remove_file(path) {
    if error.kind() != io::ErrorKind::NotFound {
      warn!(path = %path.display(), %error, "failed to remove file");
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct ModelInfo {
  pub(crate) path: PathBuf,
  pub(crate) file_size: u64,
  pub(crate) input_shape: Vec<String>,
  pub(crate) output_shape: Vec<String>,
  pub(crate) nodes: usize,
  pub(crate) parameters: usize,
}

impl ModelInfo {
  fn new(path: &Path, model: &TypedModel) -> TractResult<Self> {
    let shape = |fact: &TypedFact| -> Vec<String> {
      fact.shape.iter().map(|dim| dim.to_string()).collect()
    };

    // Weights are the constant tensors feeding the graph.
    let parameters = model
      .nodes()
      .iter()
      .filter(|node| node.inputs.is_empty())
      .filter_map(|node| node.outputs.first()?.fact.konst.as_ref())
      .map(|tensor| tensor.len())
      .sum();

    Ok(Self {
      path: path.to_owned(),
      file_size: fs::metadata(path)?.len(),
      input_shape: shape(model.input_fact(0)?),
      output_shape: shape(model.output_fact(0)?),
      nodes: model.nodes().len(),
      parameters,
    })
  }
}

impl Display for ModelInfo {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    writeln!(f, "Model: {}", self.path.display())?;
    writeln!(f, "  File size: {:.1} MiB", self.file_size as f64 / 1_048_576.0)?;
    writeln!(f, "  Parameters: {:.1}M", self.parameters as f64 / 1e6)?;
    writeln!(f, "  Nodes: {}", self.nodes)?;
    writeln!(f, "  Input shape: [{}]", self.input_shape.join(", "))?;
    write!(f, "  Output shape: [{}]", self.output_shape.join(", "))
  }
}

/// One forward pass over a normalized image.
pub(crate) trait Classifier {
  fn infer(&self, input: &NormalizedTensor) -> Result<Vec<f32>, Error>;

  fn classify(&self, input: &NormalizedTensor) -> Result<Prediction, Error> {
    let prediction = Prediction::from_output(&self.infer(input)?)?;

    info!(
      label = %prediction.label,
      confidence = prediction.confidence,
      "classified image"
    );

    Ok(prediction)
  }
}

/// A loaded, optimized model. Constructing one is the only way to obtain a
/// classifier, so a failed load leaves nothing to run inference with.
pub(crate) struct Model {
  plan: Plan,
  info: ModelInfo,
}

impl Model {
  /// Fetches the artifact if needed and loads it. An artifact downloaded by
  /// this call is removed again when it fails to load.
  pub(crate) fn load(source: &ModelSource) -> Result<Self, Error> {
    let downloaded = source.fetch()?;

    Self::open(&source.path).map_err(|error| {
      if downloaded {
        warn!(
          path = %source.path.display(),
          "discarding downloaded artifact that failed to load"
        );
        discard(&source.path);
      }
      error
    })
  }

  fn open(path: &Path) -> Result<Self, Error> {
    let failed = |error: TractError| Error::ModelLoad {
      path: path.to_owned(),
      message: format!("{error:#}"),
    };

    let size = normalize::INPUT_SIZE as usize;

    let model = tract_onnx::onnx()
      .model_for_path(path)
      .and_then(|model| {
        model.with_input_fact(
          0,
          InferenceFact::dt_shape(f32::datum_type(), tvec!(1, size, size, 3)),
        )
      })
      .and_then(|model| model.into_typed())
      .and_then(|model| model.into_decluttered())
      .map_err(failed)?;

    let info = ModelInfo::new(path, &model).map_err(failed)?;

    let plan = model
      .into_optimized()
      .and_then(|model| model.into_runnable())
      .map_err(failed)?;

    info!(
      path = %path.display(),
      parameters = info.parameters,
      nodes = info.nodes,
      "model loaded"
    );

    Ok(Self { plan, info })
  }

  pub(crate) fn info(&self) -> &ModelInfo {
    &self.info
  }
}

impl Classifier for Model {
  fn infer(&self, input: &NormalizedTensor) -> Result<Vec<f32>, Error> {
    let inference = |error: TractError| Error::Inference(format!("{error:#}"));

    let tensor =
      Tensor::from_shape(input.shape(), &input.to_vec()).map_err(inference)?;

    let outputs = self
      .plan
      .run(tvec!(tensor.into_tvalue()))
      .map_err(inference)?;

    let output = outputs
      .first()
      .ok_or_else(|| Error::Inference("model produced no outputs".into()))?;

    Ok(output.as_slice::<f32>().map_err(inference)?.to_vec())
  }
}
