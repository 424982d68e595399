//! Pure bitmap processing: turning one pre-rendered glyph sheet into an
//! ordered list of addressable segments. No presentation concerns live here.

pub mod binarize;
pub mod extract;
pub mod labeling;
