/// One 8-bit-per-channel RGBA pixel.
///
/// The default value is opaque black, which is also the QOI decoder's
/// initial "previous pixel".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Pixel {
    fn default() -> Self {
        Self::OPAQUE_BLACK
    }
}

impl Pixel {
    /// `(0, 0, 0, 255)`.
    pub const OPAQUE_BLACK: Pixel = Pixel::new(0, 0, 0, 255);
    /// `(0, 0, 0, 0)`, the initial content of every color cache slot in a decoder.
    pub const TRANSPARENT_BLACK: Pixel = Pixel::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque pixel from three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Color cache slot for this pixel, always in `0..64`.
    #[inline]
    pub const fn hash_index(self) -> usize {
        (self.r as usize * 3 + self.g as usize * 5 + self.b as usize * 7 + self.a as usize * 11)
            % 64
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Pixel {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGBA8> for Pixel {
    fn from(p: rgb::RGBA8) -> Self {
        Self::new(p.r, p.g, p.b, p.a)
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGBA8 {
    fn from(p: Pixel) -> Self {
        rgb::RGBA8::new(p.r, p.g, p.b, p.a)
    }
}
