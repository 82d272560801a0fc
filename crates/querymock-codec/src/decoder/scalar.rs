//! Scalar coercion from wire text.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::DecodeError;
use crate::schema::ScalarKind;
use crate::value::{Scalar, TIMESTAMP_FORMAT};

/// Coerces `raw`, read from `path`, into a scalar of `kind`.
///
/// # Errors
///
/// Returns a [`DecodeError`] naming `path` when `raw` is malformed for
/// `kind` or when `kind` has no coercion rule.
pub fn coerce(kind: ScalarKind, path: &str, raw: &str) -> Result<Scalar, DecodeError> {
    match kind {
        ScalarKind::String => Ok(Scalar::String(raw.to_owned())),
        ScalarKind::Bool => match raw {
            "true" => Ok(Scalar::Bool(true)),
            "false" => Ok(Scalar::Bool(false)),
            _ => Err(DecodeError::InvalidBool {
                path: path.to_owned(),
                value: raw.to_owned(),
            }),
        },
        ScalarKind::Int32 => raw
            .parse::<i32>()
            .map(Scalar::Int32)
            .map_err(|source| invalid_integer(kind, path, raw, source)),
        ScalarKind::Int64 => raw
            .parse::<i64>()
            .map(Scalar::Int64)
            .map_err(|source| invalid_integer(kind, path, raw, source)),
        ScalarKind::Float32 => match raw.parse::<f32>() {
            Ok(number) if number.is_infinite() && !is_infinity_literal(raw) => {
                Err(float_out_of_range(kind, path, raw))
            }
            Ok(number) => Ok(Scalar::Float32(number)),
            Err(source) => Err(invalid_float(kind, path, raw, source)),
        },
        ScalarKind::Float64 => match raw.parse::<f64>() {
            Ok(number) if number.is_infinite() && !is_infinity_literal(raw) => {
                Err(float_out_of_range(kind, path, raw))
            }
            Ok(number) => Ok(Scalar::Float64(number)),
            Err(source) => Err(invalid_float(kind, path, raw, source)),
        },
        ScalarKind::Bytes => decode_base64(path, raw).map(Scalar::Bytes),
        ScalarKind::FixedBytes(expected) => {
            let bytes = decode_base64(path, raw)?;
            if bytes.len() == expected {
                Ok(Scalar::Bytes(bytes))
            } else {
                Err(DecodeError::FixedLengthMismatch {
                    path: path.to_owned(),
                    expected,
                    actual: bytes.len(),
                })
            }
        }
        ScalarKind::Timestamp => decode_timestamp(path, raw).map(Scalar::Timestamp),
        ScalarKind::Other(_) => Err(DecodeError::UnsupportedKind {
            path: path.to_owned(),
            kind: kind.to_string(),
        }),
    }
}

/// Length of `YYYY-MM-DDThh:mm:ssZ`.
const TIMESTAMP_LEN: usize = 20;

fn decode_timestamp(path: &str, raw: &str) -> Result<OffsetDateTime, DecodeError> {
    let invalid = |message: String| DecodeError::InvalidTimestamp {
        path: path.to_owned(),
        value: raw.to_owned(),
        message,
    };
    // The year component also accepts a sign and extra digits.
    if raw.len() != TIMESTAMP_LEN || !raw.as_bytes().first().is_some_and(u8::is_ascii_digit) {
        return Err(invalid("expected YYYY-MM-DDThh:mm:ssZ".to_owned()));
    }
    PrimitiveDateTime::parse(raw, TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|error| invalid(error.to_string()))
}

/// Whether `raw` spells infinity rather than overflowing to it.
fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn decode_base64(path: &str, raw: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD
        .decode(raw)
        .map_err(|error| DecodeError::InvalidBase64 {
            path: path.to_owned(),
            message: error.to_string(),
        })
}

fn invalid_integer(
    kind: ScalarKind,
    path: &str,
    raw: &str,
    source: std::num::ParseIntError,
) -> DecodeError {
    DecodeError::InvalidInteger {
        path: path.to_owned(),
        kind,
        value: raw.to_owned(),
        source,
    }
}

fn invalid_float(
    kind: ScalarKind,
    path: &str,
    raw: &str,
    source: std::num::ParseFloatError,
) -> DecodeError {
    DecodeError::InvalidFloat {
        path: path.to_owned(),
        kind,
        value: raw.to_owned(),
        source,
    }
}

fn float_out_of_range(kind: ScalarKind, path: &str, raw: &str) -> DecodeError {
    DecodeError::FloatOutOfRange {
        path: path.to_owned(),
        kind,
        value: raw.to_owned(),
    }
}
