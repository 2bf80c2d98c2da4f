/// Height assumed for every mother when computing BMI, in centimetres.
///
/// Mother records carry no measured height; this is an acknowledged
/// approximation and makes the mother BMI category approximate too.
pub const MOTHER_HEIGHT_ESTIMATE_CM: u32 = 160;

/// Decimal places kept on a computed BMI
pub const BMI_DECIMAL_PRECISION: u32 = 2;

/// Number of vaccines on the tracked checklist
pub const DEFAULT_TOTAL_VACCINES: i32 = 6;

/// Screenings newer than this many days count as recent
pub const RECENT_SCREENING_DAYS: i64 = 7;
