//! Helpers for decoding stored text columns into domain values.

use std::str::FromStr;

use babyassist_core::{Error, Result};
use rust_decimal::Decimal;

use crate::errors::StorageError;

fn invalid_column(column: &'static str, value: &str) -> Error {
    Error::from(StorageError::InvalidColumn {
        column,
        value: value.to_string(),
    })
}

/// Parses an enum-like text column through the domain type's `FromStr`.
pub fn parse_column<T: FromStr>(column: &'static str, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| invalid_column(column, value))
}

pub fn parse_optional_column<T: FromStr>(
    column: &'static str,
    value: Option<&str>,
) -> Result<Option<T>> {
    value.map(|v| parse_column(column, v)).transpose()
}

/// Decimals are stored as their canonical string to keep exact precision.
pub fn parse_decimal_column(column: &'static str, value: Option<&str>) -> Result<Option<Decimal>> {
    value
        .map(|v| {
            Decimal::from_str(v).map_err(|_| invalid_column(column, v))
        })
        .transpose()
}
