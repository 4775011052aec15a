use super::*;

pub(crate) const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

pub(crate) const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Raw bytes of a user supplied image along with the name it was given.
#[derive(Clone, Debug)]
pub(crate) struct UploadedImage {
  pub(crate) name: String,
  pub(crate) bytes: Vec<u8>,
}

impl UploadedImage {
  pub(crate) fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
    Self {
      name: name.into(),
      bytes,
    }
  }

  pub(crate) fn read(path: &Path) -> Result<Self, Error> {
    let name = path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_default();

    let upload = Self::new(name, Vec::new());

    upload.check_extension()?;

    let size = fs::metadata(path).map_err(Error::io(path))?.len();

    check_size(usize::try_from(size).unwrap_or(usize::MAX))?;

    let bytes = fs::read(path).map_err(Error::io(path))?;

    Ok(Self { bytes, ..upload })
  }

  pub(crate) fn extension(&self) -> String {
    self
      .name
      .rsplit('.')
      .next()
      .unwrap_or_default()
      .to_lowercase()
  }

  pub(crate) fn size(&self) -> usize {
    self.bytes.len()
  }

  /// Checks the declared extension and the payload size without looking at
  /// the bytes themselves.
  pub(crate) fn validate(&self) -> Result<(), Error> {
    self.check_extension()?;
    check_size(self.size())
  }

  fn check_extension(&self) -> Result<(), Error> {
    let extension = self.extension();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
      return Err(Error::UnsupportedExtension { extension });
    }

    Ok(())
  }
}

fn check_size(size: usize) -> Result<(), Error> {
  if size > MAX_UPLOAD_BYTES {
    return Err(Error::TooLarge {
      size,
      limit: MAX_UPLOAD_BYTES,
    });
  }

  Ok(())
}
