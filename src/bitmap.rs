use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::error::{PaintError, PaintResult};
use crate::geometry::PixelRect;
use crate::raster;

/// Opaque white, the default canvas background.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// The raster that holds every committed edit.
///
/// Pixels are stored as straight (non-premultiplied) RGBA8. The background
/// color is what cleared regions (for example the source of a moved
/// selection) are filled with.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pixels: RgbaImage,
    background: Rgba<u8>,
}

impl Bitmap {
    /// Creates a bitmap filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> PaintResult<Self> {
        if width == 0 || height == 0 {
            return Err(PaintError::InvalidDimensions { width, height });
        }
        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, background),
            background,
        })
    }

    /// Wraps an existing image.
    pub fn from_image(pixels: RgbaImage, background: Rgba<u8>) -> Self {
        Self { pixels, background }
    }

    /// Decodes an image file into a bitmap.
    pub fn open(path: &Path, background: Rgba<u8>) -> PaintResult<Self> {
        let pixels = image::open(path)?.to_rgba8();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(PaintError::InvalidDimensions {
                width: pixels.width(),
                height: pixels.height(),
            });
        }
        log::debug!("Decoded {} ({}x{})", path.display(), pixels.width(), pixels.height());
        Ok(Self::from_image(pixels, background))
    }

    /// Encodes the bitmap, picking the format from the file extension.
    ///
    /// Formats without an alpha channel (JPEG) get the alpha dropped; every
    /// other supported format stores the pixels exactly.
    pub fn save(&self, path: &Path) -> PaintResult<()> {
        let format = ImageFormat::from_path(path)?;
        match format {
            ImageFormat::Jpeg => DynamicImage::ImageRgba8(self.pixels.clone())
                .to_rgb8()
                .save_with_format(path, format)?,
            _ => self.pixels.save_with_format(path, format)?,
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn background(&self) -> Rgba<u8> {
        self.background
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width(), self.height())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    /// Overwrites a pixel. Out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if let Some(px) = self.pixels.get_pixel_mut_checked(x, y) {
            *px = color;
        }
    }

    /// Source-over blends `color` scaled by `coverage` onto a pixel.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: [u8; 4], coverage: f32) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(px) = self.pixels.get_pixel_mut_checked(x as u32, y as u32) {
            *px = raster::blend(*px, color, coverage);
        }
    }

    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba<u8>) {
        let rect = self.clip(rect);
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.pixels.put_pixel(x, y, color);
            }
        }
    }

    /// Fills a rectangle with the background color.
    pub fn clear_rect(&mut self, rect: PixelRect) {
        self.fill_rect(rect, self.background);
    }

    /// Copies the pixels under `rect` into a detached block.
    pub fn copy_rect(&self, rect: PixelRect) -> RgbaImage {
        let rect = self.clip(rect);
        image::imageops::crop_imm(&self.pixels, rect.x, rect.y, rect.width, rect.height).to_image()
    }

    /// Pastes a block with its top-left corner at `(x, y)`, overwriting the
    /// destination. Parts falling outside the bitmap are dropped.
    pub fn paste(&mut self, block: &RgbaImage, x: i64, y: i64) {
        image::imageops::replace(&mut self.pixels, block, x, y);
    }

    /// Number of pixels inside `rect` that differ from `color`.
    pub fn count_differing(&self, rect: PixelRect, color: Rgba<u8>) -> usize {
        let rect = self.clip(rect);
        (rect.y..rect.bottom())
            .flat_map(|y| (rect.x..rect.right()).map(move |x| (x, y)))
            .filter(|&(x, y)| *self.pixels.get_pixel(x, y) != color)
            .count()
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        egui::ColorImage::from_rgba_unmultiplied(size, self.pixels.as_raw())
    }

    fn clip(&self, rect: PixelRect) -> PixelRect {
        let x = rect.x.min(self.width());
        let y = rect.y.min(self.height());
        let right = rect.right().min(self.width());
        let bottom = rect.bottom().min(self.height());
        PixelRect::new(x, y, right - x, bottom - y)
    }
}
