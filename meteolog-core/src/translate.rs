//! Translators for the coded fields of the Yandex Weather payload.
//!
//! Each function is a pure total mapping from a small fixed domain of codes
//! to a human-readable Russian label. A code outside the domain is reported
//! as [`UnknownCode`] so the caller can reject or flag the record instead of
//! silently storing a gap.

use thiserror::Error;

/// A coded field value outside the translator's fixed domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {field} code: {code}")]
pub struct UnknownCode {
    pub field: &'static str,
    pub code: String,
}

impl UnknownCode {
    fn new(field: &'static str, code: impl ToString) -> Self {
        Self { field, code: code.to_string() }
    }
}

/// Compass label for a `wind_dir` code; `c` means calm.
pub fn wind_direction(code: &str) -> Result<&'static str, UnknownCode> {
    let label = match code {
        "nw" => "Северо-западное",
        "n" => "Северное",
        "ne" => "Северно-восточное",
        "e" => "Восточное",
        "se" => "Юго-восточное",
        "s" => "Южное",
        "sw" => "Юго-западное",
        "w" => "Западное",
        "c" => "Штиль",
        other => return Err(UnknownCode::new("wind_dir", other)),
    };
    Ok(label)
}

/// Label for a `prec_type` code (0..=4).
pub fn precipitation_type(code: u8) -> Result<&'static str, UnknownCode> {
    let label = match code {
        0 => "Без осадков",
        1 => "Дождь",
        2 => "Дождь со снегом",
        3 => "Снег",
        4 => "Град",
        other => return Err(UnknownCode::new("prec_type", other)),
    };
    Ok(label)
}

/// Label for a `prec_strength` code, one of {0, 0.25, 0.5, 0.75, 1}.
pub fn precipitation_strength(code: f64) -> Result<&'static str, UnknownCode> {
    // Quarter steps; matched on hundredths since float patterns are not a thing.
    let label = match (code * 100.0).round() as i64 {
        0 => "Без осадков",
        25 => "Слабые осадки",
        50 => "Рядовые осадки",
        75 => "Сильные осадки",
        100 => "Очень сильные осадки",
        _ => return Err(UnknownCode::new("prec_strength", code)),
    };
    Ok(label)
}
