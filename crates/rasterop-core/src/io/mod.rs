//! The external codec boundary.
//!
//! The core never touches file paths or container formats itself; it only
//! marshals pixel data in and out of JPEG byte buffers here, delegating the
//! container work to the `image` crate. Everything past this module works
//! on a [`crate::grid::PixelGrid`].

mod jpeg;

pub use jpeg::{decode_jpeg, encode_jpeg, get_orientation, Orientation};
