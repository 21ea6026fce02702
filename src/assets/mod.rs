/// Source image decoding.
pub mod decode;

pub use decode::{decode_source, load_source, placeholder};
