//! Fixture access shared by the integration tests.

use chrono::NaiveDate;
use mindnote_babel::calendar::Period;
use std::path::PathBuf;

/// The sample package under `tests/fixtures`.
pub fn sample_package() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("Sample.mindnode")
}

/// A Wednesday in ISO week 13 of 2024 (retains W12 and W13, quarter Q1).
pub fn week_13() -> Period {
    Period::from_date(NaiveDate::from_ymd_opt(2024, 3, 27).expect("valid date"))
}
