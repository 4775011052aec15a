use super::*;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
  #[error(
    "unsupported file format `{extension}`, please upload one of: {}",
    upload::ALLOWED_EXTENSIONS.join(", ")
  )]
  UnsupportedExtension { extension: String },
  #[error("file too large ({size} bytes), please upload an image smaller than {limit} bytes")]
  TooLarge { size: usize, limit: usize },
  #[error("failed to decode image")]
  Decode(#[from] image::ImageError),
  #[error("failed to download model from {url}")]
  Download {
    url: String,
    #[source]
    source: reqwest::Error,
  },
  #[error("I/O error at {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("failed to load model from {}: {message}", path.display())]
  ModelLoad { path: PathBuf, message: String },
  #[error("inference failed: {0}")]
  Inference(String),
  #[error("unexpected model output with {len} values, expected 1 or 2")]
  UnexpectedOutput { len: usize },
  #[error("model produced invalid probability {value}")]
  InvalidProbability { value: f32 },
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
    let path = path.into();
    move |source| Self::Io { path, source }
  }
}
