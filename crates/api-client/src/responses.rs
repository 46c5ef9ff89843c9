use crate::error::ApiError;
use core_types::Rate;
use serde_json::Value;
use std::collections::HashMap;

/// Pulls the quote stored under `pair_key` out of an upstream body shaped
/// like `{"USDBRL": {"code": "USD", "bid": "5.43", ...}}`.
///
/// Sibling keys are never decoded, so an unrelated entry with an odd shape
/// does not fail the lookup.
pub fn extract_rate(body: &str, pair_key: &str) -> Result<Rate, ApiError> {
    let mut quotes: HashMap<String, Value> =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;

    let quote = quotes
        .remove(pair_key)
        .ok_or_else(|| ApiError::MissingQuote(pair_key.to_string()))?;

    serde_json::from_value::<Rate>(quote).map_err(|e| ApiError::Deserialization(e.to_string()))
}
