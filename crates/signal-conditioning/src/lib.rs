//! Signal Conditioning
//!
//! Turns raw ADC counts from the water probes into physical values:
//! median filtering for spike rejection, temperature-compensated
//! conductivity-to-TDS conversion, and the linear pH calibration.

mod calibration;
mod conversion;
mod median;

pub use calibration::{PhCalibration, TdsCalibration, ADC_FULL_SCALE};
pub use conversion::TdsReading;
pub use median::median;
