//! Probe Calibration Parameters
//!
//! Every constant in the conversion chain lives here so a probe can be
//! recalibrated from configuration without touching the math.

use serde::{Deserialize, Serialize};

/// Full-scale count of the 12-bit ADC channels
pub const ADC_FULL_SCALE: f32 = 4095.0;

/// Calibration for the TDS conductivity probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdsCalibration {
    /// ADC reference voltage (V)
    pub vref: f32,
    /// Number of samples in the median window
    pub sample_count: usize,
    /// Temperature compensation slope per °C away from 25 °C
    pub compensation_slope: f32,
    /// EC polynomial coefficients [cubic, quadratic, linear] (µS/cm per V)
    pub ec_poly: [f32; 3],
    /// Device-specific EC correction scalar
    pub calibration_factor: f32,
    /// EC (µS/cm) to TDS (ppm) scalar
    pub tds_factor: f32,
}

impl Default for TdsCalibration {
    fn default() -> Self {
        Self {
            vref: 3.3,
            sample_count: 30,
            compensation_slope: 0.02,
            ec_poly: [133.42, -255.86, 857.39],
            calibration_factor: 5.82,
            tds_factor: 0.5,
        }
    }
}

/// Calibration for the pH probe (linear fit over probe voltage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhCalibration {
    /// ADC reference voltage of the pH channel (V)
    pub vref: f32,
    /// Slope of the voltage-to-pH fit
    pub slope: f32,
    /// Intercept of the voltage-to-pH fit
    pub intercept: f32,
}

impl Default for PhCalibration {
    fn default() -> Self {
        Self {
            vref: 5.0,
            slope: -8.33333,
            intercept: 34.08237,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tds_calibration() {
        let cal = TdsCalibration::default();
        assert_eq!(cal.sample_count, 30);
        assert!((cal.vref - 3.3).abs() < f32::EPSILON);
        assert!((cal.ec_poly[2] - 857.39).abs() < f32::EPSILON);
    }

    #[test]
    fn test_calibration_roundtrips_through_serde() {
        let cal = TdsCalibration::default();
        let text = serde_json::to_string(&cal).unwrap();
        let back: TdsCalibration = serde_json::from_str(&text).unwrap();
        assert_eq!(back.ec_poly, cal.ec_poly);
        assert_eq!(back.calibration_factor, cal.calibration_factor);
    }
}
