//! BMI computation and banding.

use rust_decimal::{Decimal, RoundingStrategy};

use super::assessment_model::{BmiCategory, BmiResult, SubjectType};
use crate::constants::BMI_DECIMAL_PRECISION;
use crate::errors::{Error, Result, ValidationError};

/// Lower bounds of the overweight-side bands, plus the underweight cut-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmiThresholds {
    /// Below this is underweight.
    pub normal_from: Decimal,
    pub overweight_from: Decimal,
    pub obese_from: Decimal,
}

impl BmiThresholds {
    /// Adult bands: 18.5 / 25 / 30.
    pub fn mother() -> Self {
        Self {
            normal_from: Decimal::new(185, 1),
            overweight_from: Decimal::from(25),
            obese_from: Decimal::from(30),
        }
    }

    /// Simplified child bands: 16 / 22 / 28. Not a growth-chart percentile.
    pub fn child() -> Self {
        Self {
            normal_from: Decimal::from(16),
            overweight_from: Decimal::from(22),
            obese_from: Decimal::from(28),
        }
    }

    pub fn for_subject(subject: SubjectType) -> Self {
        match subject {
            SubjectType::Mother => Self::mother(),
            SubjectType::Child => Self::child(),
        }
    }

    /// Lower bounds are inclusive.
    pub fn classify(&self, bmi: Decimal) -> BmiCategory {
        if bmi < self.normal_from {
            BmiCategory::Underweight
        } else if bmi < self.overweight_from {
            BmiCategory::Normal
        } else if bmi < self.obese_from {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

/// Bands a BMI value for the given subject type.
pub fn classify_bmi(bmi: Decimal, subject: SubjectType) -> BmiCategory {
    BmiThresholds::for_subject(subject).classify(bmi)
}

/// Computes `weight_kg / (height_cm / 100)^2`.
///
/// The returned value is rounded half away from zero to two places. The
/// category is taken from the unrounded value, so a BMI of 24.996 reports
/// as `25.00` but stays in the normal band.
pub fn calculate_bmi(
    weight_kg: Decimal,
    height_cm: Decimal,
    subject: SubjectType,
) -> Result<BmiResult> {
    if height_cm <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Height must be positive, got {}",
            height_cm
        ))));
    }
    if weight_kg <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Weight must be positive, got {}",
            weight_kg
        ))));
    }

    let height_m = height_cm / Decimal::ONE_HUNDRED;
    let raw = height_m
        .checked_mul(height_m)
        .and_then(|squared| weight_kg.checked_div(squared))
        .ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "BMI out of range for weight {} and height {}",
                weight_kg, height_cm
            )))
        })?;

    Ok(BmiResult {
        bmi: raw.round_dp_with_strategy(
            BMI_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        ),
        category: classify_bmi(raw, subject),
    })
}
