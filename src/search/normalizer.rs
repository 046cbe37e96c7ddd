use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::error::{ValidationError, ValidationKind};
use crate::models::search::{
    DEFAULT_LIMIT, DEFAULT_OFFSET, DEFAULT_RADIUS_KM, MAX_LIMIT, MAX_RADIUS_KM, MIN_RADIUS_KM,
};
use crate::models::{GeoPoint, RawSearchQuery, RawValue, SearchFilter};

/// Turns raw search input into a canonical [`SearchFilter`].
///
/// Geo fields are strict: anything present must be a finite, in-range number.
/// Paging fields are lenient: a value that is not a number falls back to its
/// default, while a number outside the allowed range is still rejected.
pub struct Normalizer;

impl Normalizer {
    pub fn normalize(raw: &RawSearchQuery) -> Result<SearchFilter, ValidationError> {
        let lat = parse_coordinate("lat", raw.lat.as_ref(), -90.0, 90.0)?;
        let lng = parse_coordinate("lng", raw.lng.as_ref(), -180.0, 180.0)?;

        let origin = match (lat, lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            (None, None) => None,
            _ => {
                return Err(ValidationError::new(
                    ValidationKind::LatLngMustBePaired,
                    "lat",
                    "lat and lng must be provided together",
                ))
            }
        };

        Ok(SearchFilter {
            text: trimmed(raw.q.as_deref()),
            city: trimmed(raw.city.as_deref()),
            from: parse_timestamp("from", raw.from.as_deref())?,
            to: parse_timestamp("to", raw.to.as_deref())?,
            origin,
            radius_km: parse_radius(raw.radius_km.as_ref())?,
            genre: normalize_tags(&raw.genre),
            vibe: normalize_tags(&raw.vibe),
            limit: parse_limit(raw.limit.as_ref())?,
            offset: parse_offset(raw.offset.as_ref())?,
        })
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn normalize_tags(tags: &[String]) -> BTreeSet<String> {
    tags.iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn parse_timestamp(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, ValidationError> {
    let Some(value) = trimmed(raw) else {
        return Ok(None);
    };

    DateTime::parse_from_rfc3339(&value)
        .map(|ts| Some(ts.with_timezone(&Utc)))
        .map_err(|_| {
            ValidationError::new(
                ValidationKind::InvalidTimestamp,
                field,
                format!("{} must be an ISO-8601 timestamp, got '{}'", field, value),
            )
        })
}

/// `None` when the value is missing or blank, `Some(Err(()))` when present but
/// not a finite number.
fn to_number(raw: Option<&RawValue>) -> Option<Result<f64, ()>> {
    let number = match raw? {
        RawValue::Number(n) => Ok(*n),
        RawValue::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            text.parse::<f64>().map_err(|_| ())
        }
    };

    Some(number.and_then(|n| if n.is_finite() { Ok(n) } else { Err(()) }))
}

fn strict_number(field: &'static str, raw: Option<&RawValue>) -> Result<Option<f64>, ValidationError> {
    match to_number(raw) {
        None => Ok(None),
        Some(Ok(n)) => Ok(Some(n)),
        Some(Err(())) => Err(ValidationError::new(
            ValidationKind::InvalidNumber,
            field,
            format!("{} must be a finite number", field),
        )),
    }
}

fn parse_coordinate(
    field: &'static str,
    raw: Option<&RawValue>,
    min: f64,
    max: f64,
) -> Result<Option<f64>, ValidationError> {
    let Some(value) = strict_number(field, raw)? else {
        return Ok(None);
    };

    if !(min..=max).contains(&value) {
        return Err(ValidationError::out_of_range(
            field,
            format!("{} must be between {} and {}", field, min, max),
        ));
    }

    Ok(Some(value))
}

fn parse_radius(raw: Option<&RawValue>) -> Result<f64, ValidationError> {
    let Some(radius) = strict_number("radius_km", raw)? else {
        return Ok(DEFAULT_RADIUS_KM);
    };

    if radius <= MIN_RADIUS_KM || radius > MAX_RADIUS_KM {
        return Err(ValidationError::out_of_range(
            "radius_km",
            format!(
                "radius_km must be greater than {} and at most {}",
                MIN_RADIUS_KM, MAX_RADIUS_KM
            ),
        ));
    }

    Ok(radius)
}

fn parse_limit(raw: Option<&RawValue>) -> Result<u32, ValidationError> {
    let Some(Ok(limit)) = to_number(raw) else {
        return Ok(DEFAULT_LIMIT);
    };

    if limit.fract() != 0.0 || limit < 1.0 || limit > f64::from(MAX_LIMIT) {
        return Err(ValidationError::out_of_range(
            "limit",
            format!("limit must be an integer between 1 and {}", MAX_LIMIT),
        ));
    }

    Ok(limit as u32)
}

fn parse_offset(raw: Option<&RawValue>) -> Result<u64, ValidationError> {
    let Some(Ok(offset)) = to_number(raw) else {
        return Ok(DEFAULT_OFFSET);
    };

    if offset.fract() != 0.0 || offset < 0.0 || offset > i64::MAX as f64 {
        return Err(ValidationError::out_of_range(
            "offset",
            "offset must be a non-negative integer",
        ));
    }

    Ok(offset as u64)
}
