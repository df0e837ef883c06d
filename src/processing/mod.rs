//! Text sanitization, normalization and fallback supply

pub mod fallback;
pub mod normalizer;
pub mod record;
pub mod sanitizer;
