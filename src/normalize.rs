use super::*;

pub(crate) const INPUT_SIZE: u32 = 224;

/// Per-channel means subtracted after reordering to BGR, matching the
/// preprocessing the VGG16 backbone was trained with.
pub(crate) const CHANNEL_MEANS: [f32; 3] = [103.939, 116.779, 123.68];

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ImageInfo {
  pub(crate) format: String,
  pub(crate) color: String,
  pub(crate) width: u32,
  pub(crate) height: u32,
  pub(crate) megapixels: f64,
}

impl ImageInfo {
  fn new(bytes: &[u8], image: &DynamicImage) -> Self {
    let (width, height) = (image.width(), image.height());

    Self {
      format: image::guess_format(bytes)
        .map(|format| format!("{format:?}").to_uppercase())
        .unwrap_or_else(|_| "UNKNOWN".into()),
      color: format!("{:?}", image.color()),
      width,
      height,
      megapixels: ((f64::from(width) * f64::from(height)) / 1e4).round()
        / 100.0,
    }
  }
}

#[derive(Debug)]
pub(crate) struct DecodedImage {
  pub(crate) image: DynamicImage,
  pub(crate) info: ImageInfo,
}

/// Validates and decodes an upload. Validation failures are returned before
/// any byte is decoded.
pub(crate) fn decode(upload: &UploadedImage) -> Result<DecodedImage, Error> {
  upload.validate()?;

  let image = image::load_from_memory(&upload.bytes)?;

  let info = ImageInfo::new(&upload.bytes, &image);

  debug!(
    name = %upload.name,
    width = info.width,
    height = info.height,
    color = %info.color,
    "decoded upload"
  );

  Ok(DecodedImage { image, info })
}

pub(crate) fn normalize(
  upload: &UploadedImage,
) -> Result<NormalizedTensor, Error> {
  Ok(NormalizedTensor::from_image(&decode(upload)?.image))
}

/// A single image batch of shape `[1, 224, 224, 3]` in BGR channel order
/// with the channel means removed.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NormalizedTensor(Array4<f32>);

impl NormalizedTensor {
  /// Resizes directly to the square input size. Aspect ratio is not
  /// preserved, non-square photos are stretched.
  pub(crate) fn from_image(image: &DynamicImage) -> Self {
    let rgb = image.to_rgb8();

    let rgb = if rgb.dimensions() == (INPUT_SIZE, INPUT_SIZE) {
      rgb
    } else {
      image::imageops::resize(
        &rgb,
        INPUT_SIZE,
        INPUT_SIZE,
        FilterType::CatmullRom,
      )
    };

    let size = INPUT_SIZE as usize;

    Self(Array4::from_shape_fn((1, size, size, 3), |(_, y, x, c)| {
      f32::from(rgb.get_pixel(x as u32, y as u32)[2 - c]) - CHANNEL_MEANS[c]
    }))
  }

  pub(crate) fn shape(&self) -> &[usize] {
    self.0.shape()
  }

  pub(crate) fn values(&self) -> impl Iterator<Item = f32> + '_ {
    self.0.iter().copied()
  }

  pub(crate) fn to_vec(&self) -> Vec<f32> {
    self.values().collect()
  }

  #[cfg(test)]
  pub(crate) fn pixel(&self, y: usize, x: usize) -> [f32; 3] {
    [self.0[[0, y, x, 0]], self.0[[0, y, x, 1]], self.0[[0, y, x, 2]]]
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use {
    super::*,
    approx::assert_relative_eq,
    image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage},
    std::io::Cursor,
  };

  pub(crate) fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
  }

  pub(crate) fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
      Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
  }

  #[test]
  fn rectangular_png_normalizes_to_input_shape() {
    let upload = UploadedImage::new(
      "wide.png",
      encode(&gradient(500, 300), ImageFormat::Png),
    );

    assert_eq!(normalize(&upload).unwrap().shape(), &[1, 224, 224, 3]);
  }

  #[test]
  fn every_supported_format_normalizes_to_input_shape() {
    let cases = [
      ("tall.jpg", ImageFormat::Jpeg, gradient(120, 640)),
      ("tiny.jpeg", ImageFormat::Jpeg, gradient(7, 3)),
      ("square.bmp", ImageFormat::Bmp, gradient(224, 224)),
      ("big.png", ImageFormat::Png, gradient(1024, 768)),
    ];

    for (name, format, image) in cases {
      let upload = UploadedImage::new(name, encode(&image, format));

      assert_eq!(
        normalize(&upload).unwrap().shape(),
        &[1, 224, 224, 3],
        "{name}"
      );
    }
  }

  #[test]
  fn channels_are_reordered_and_centered() {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(
      224,
      224,
      Rgb([255, 10, 0]),
    ));

    let [b, g, r] = NormalizedTensor::from_image(&image).pixel(17, 203);

    assert_eq!(b, 0.0 - 103.939);
    assert_eq!(g, 10.0 - 116.779);
    assert_eq!(r, 255.0 - 123.68);
  }

  #[test]
  fn uniform_image_stays_uniform_after_resize() {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(
      640,
      480,
      Rgb([200, 100, 50]),
    ));

    let tensor = NormalizedTensor::from_image(&image);

    for y in [0, 111, 223] {
      for x in [0, 57, 223] {
        let [b, g, r] = tensor.pixel(y, x);
        assert_relative_eq!(b, 50.0 - 103.939, epsilon = 1e-3);
        assert_relative_eq!(g, 100.0 - 116.779, epsilon = 1e-3);
        assert_relative_eq!(r, 200.0 - 123.68, epsilon = 1e-3);
      }
    }
  }

  #[test]
  fn grayscale_and_alpha_images_become_three_channel() {
    let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(
      224,
      224,
      Luma([90]),
    ));

    assert_eq!(
      NormalizedTensor::from_image(&gray).pixel(0, 0),
      [90.0 - 103.939, 90.0 - 116.779, 90.0 - 123.68]
    );

    let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
      224,
      224,
      Rgba([1, 2, 3, 0]),
    ));

    assert_eq!(
      NormalizedTensor::from_image(&rgba).pixel(5, 5),
      [3.0 - 103.939, 2.0 - 116.779, 1.0 - 123.68]
    );
  }

  #[test]
  fn normalization_is_deterministic() {
    let image = gradient(333, 211);

    assert_eq!(
      NormalizedTensor::from_image(&image),
      NormalizedTensor::from_image(&image)
    );
  }

  #[test]
  fn corrupt_bytes_fail_to_decode() {
    let upload = UploadedImage::new("broken.jpg", b"not an image".to_vec());

    assert!(matches!(normalize(&upload), Err(Error::Decode(_))));
  }

  #[test]
  fn oversized_upload_is_rejected_before_decoding() {
    // Garbage bytes would fail to decode, so a size error shows decoding
    // was never attempted.
    let upload = UploadedImage::new(
      "huge.png",
      vec![0xff; upload::MAX_UPLOAD_BYTES + upload::MAX_UPLOAD_BYTES / 20],
    );

    assert!(matches!(normalize(&upload), Err(Error::TooLarge { .. })));
  }

  #[test]
  fn unsupported_extension_is_rejected_before_decoding() {
    let upload = UploadedImage::new(
      "cat.gif",
      encode(&gradient(10, 10), ImageFormat::Png),
    );

    assert!(matches!(
      normalize(&upload),
      Err(Error::UnsupportedExtension { .. })
    ));
  }

  #[test]
  fn decode_reports_image_details() {
    let upload = UploadedImage::new(
      "wide.png",
      encode(&gradient(2000, 1500), ImageFormat::Png),
    );

    let decoded = decode(&upload).unwrap();

    assert_eq!(
      decoded.info,
      ImageInfo {
        format: "PNG".into(),
        color: "Rgb8".into(),
        width: 2000,
        height: 1500,
        megapixels: 3.0,
      }
    );
  }
}
