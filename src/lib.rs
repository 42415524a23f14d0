//! # zenqoi
//!
//! Multi-threaded QOI encoder with a PAM (P7) front end.
//!
//! ## Striped Encoding
//!
//! The image is cut into horizontal stripes that are encoded on separate
//! threads and concatenated in row order into one QOI stream. Each stripe
//! owns its predictor state: the run counter, the previous pixel and the
//! 64-slot color cache all start fresh. Only the first stripe assumes the
//! decoder's initial cache, so later stripes never reference a cache slot
//! they did not fill themselves. The cost is a few extra literals at each
//! stripe start.
//!
//! See [`PredictorSeed`] for how the previous-pixel predictor of later
//! stripes is initialized.
//!
//! ## Supported Input
//!
//! - **P7** (PAM): `RGB` and `RGB_ALPHA`, `MAXVAL 255`
//!
//! ## Non-Goals
//!
//! - QOI decoding
//! - 16-bit or grayscale input
//! - Lossy modes
//!
//! ## Usage
//!
//! ```no_run
//! use zenqoi::{DecodeRequest, EncodeRequest, Unstoppable};
//!
//! let data: &[u8] = &[]; // your PAM bytes
//!
//! let grid = DecodeRequest::new(data).decode(Unstoppable)?;
//! let qoi = EncodeRequest::new(&grid)
//!     .with_workers(4)
//!     .encode(Unstoppable)?;
//! # Ok::<(), zenqoi::QoiError>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod grid;
mod limits;
mod pixel;

pub mod pam;
pub mod qoi;
pub mod stripe;

mod decode;
mod encode;
mod parallel;

// Re-exports
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{ErrorKind, QoiError};
pub use grid::PixelGrid;
pub use limits::Limits;
pub use pixel::Pixel;
pub use qoi::{PredictorSeed, encode_stripe, encode_stripe_with};
pub use stripe::{Stripe, partition};
