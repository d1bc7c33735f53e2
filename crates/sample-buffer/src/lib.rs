//! Analog Sample Ring Buffer
//!
//! Fixed-capacity circular storage for raw ADC counts. The acquisition loop
//! is the single writer; the reporting path takes snapshot copies.

mod buffer;

pub use buffer::{SampleBuffer, DEFAULT_CAPACITY};
