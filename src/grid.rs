use alloc::vec;
use alloc::vec::Vec;

use crate::error::QoiError;
use crate::pixel::Pixel;

/// Dense, row-major RGBA raster.
///
/// Out-of-range reads return [`Pixel::default`] and out-of-range writes are
/// ignored. Once populated the grid is shared read-only by every stripe
/// encoder, so all encoding entry points take `&PixelGrid`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Allocate a `width` x `height` grid filled with opaque black.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Self {
        let mut grid = Self::default();
        grid.initialize(width, height);
        grid
    }

    /// Build a grid from row-major pixels.
    ///
    /// Returns [`QoiError::DimensionsTooLarge`] if `width * height` overflows
    /// and [`QoiError::UnexpectedEof`] if `pixels` holds fewer than that.
    pub fn from_pixels(
        width: usize,
        height: usize,
        mut pixels: Vec<Pixel>,
    ) -> Result<Self, QoiError> {
        let count = width
            .checked_mul(height)
            .ok_or(QoiError::DimensionsTooLarge { width, height })?;
        if pixels.len() < count {
            return Err(QoiError::UnexpectedEof);
        }
        pixels.truncate(count);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Replace any prior content with a `width` x `height` grid of default pixels.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn initialize(&mut self, width: usize, height: usize) {
        let Some(count) = width.checked_mul(height) else {
            panic!("pixel grid capacity overflow: {width}x{height}");
        };
        self.width = width;
        self.height = height;
        self.pixels = vec![Pixel::default(); count];
        self.pixels.shrink_to_fit();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True iff either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Pixel {
        if x < self.width && y < self.height {
            self.pixels[self.width * y + x]
        } else {
            Pixel::default()
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: Pixel) {
        if x < self.width && y < self.height {
            self.pixels[self.width * y + x] = value;
        }
    }

    /// Row `y`, or an empty slice past the bottom edge.
    #[inline]
    pub fn row(&self, y: usize) -> &[Pixel] {
        if y < self.height {
            &self.pixels[self.width * y..self.width * (y + 1)]
        } else {
            &[]
        }
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        if y < self.height {
            &mut self.pixels[self.width * y..self.width * (y + 1)]
        } else {
            &mut []
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Interleaved RGBA bytes, four per pixel.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Copy an [`imgref::ImgRef`] (stride-aware) into a new grid.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGBA8>) -> Self {
        let mut grid = Self::new(img.width(), img.height());
        for (y, row) in img.rows().enumerate() {
            for (dst, src) in grid.row_mut(y).iter_mut().zip(row) {
                *dst = Pixel::from(*src);
            }
        }
        grid
    }

    /// Copy the grid into an [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        let buf = self.pixels.iter().map(|&p| rgb::RGBA8::from(p)).collect();
        imgref::ImgVec::new(buf, self.width, self.height)
    }
}
