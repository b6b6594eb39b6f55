//! Image previews rendered as ASCII art.

use std::io::Cursor;

use async_trait::async_trait;
use gostr_core::error::{CoreError, CoreResult};
use gostr_core::image::ImagePreviewer;
use image::{DynamicImage, ImageReader};

/// Dark to light.
const RAMP: &[u8] = b"@%#*+=-:. ";

fn image_err(e: impl std::fmt::Display) -> CoreError {
    CoreError::Image(e.to_string())
}

pub(crate) struct HttpPreviewer {
    client: reqwest::Client,
}

impl HttpPreviewer {
    pub(crate) fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ImagePreviewer for HttpPreviewer {
    async fn preview(&self, url: &str, width: u32) -> CoreResult<String> {
        let response = self.client.get(url).send().await.map_err(image_err)?;
        if !response.status().is_success() {
            return Err(image_err(format!("HTTP {}", response.status())));
        }
        let bytes = response.bytes().await.map_err(image_err)?;
        let image = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(image_err)?
            .decode()
            .map_err(image_err)?;
        Ok(to_ascii(&image, width))
    }
}

/// Convert to text at most `max_width` columns wide. Rows are halved since
/// terminal cells are about twice as tall as they are wide.
pub(crate) fn to_ascii(image: &DynamicImage, max_width: u32) -> String {
    let width = image.width().min(max_width).max(1);
    let height = ((image.height() as u64 * width as u64) / (image.width().max(1) as u64 * 2)).max(1);
    let gray = image
        .resize_exact(width, height as u32, image::imageops::FilterType::Triangle)
        .to_luma8();

    let mut out = String::with_capacity(((width + 1) * gray.height()) as usize);
    for row in gray.rows() {
        for pixel in row {
            let idx = pixel.0[0] as usize * (RAMP.len() - 1) / 255;
            out.push(RAMP[idx] as char);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_to_ascii_dimensions_and_ramp() {
        let mut img = GrayImage::new(120, 80);
        for (x, _, pixel) in img.enumerate_pixels_mut() {
            *pixel = Luma([if x < 60 { 0 } else { 255 }]);
        }
        let art = to_ascii(&DynamicImage::ImageLuma8(img), 60);
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|line| line.chars().count() == 60));
        assert!(lines[10].starts_with('@'));
        assert!(lines[10].ends_with(' '));
    }

    #[test]
    fn test_small_images_are_not_upscaled() {
        let img = GrayImage::from_pixel(10, 4, Luma([128]));
        let art = to_ascii(&DynamicImage::ImageLuma8(img), 60);
        assert_eq!(art.lines().count(), 2);
        assert_eq!(art.lines().next().map(|l| l.len()), Some(10));
    }
}
