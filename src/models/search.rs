use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Event;

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;
pub const DEFAULT_OFFSET: u64 = 0;
pub const DEFAULT_RADIUS_KM: f64 = 25.0;
pub const MIN_RADIUS_KM: f64 = 0.1;
pub const MAX_RADIUS_KM: f64 = 500.0;

/// A numeric search parameter as it arrived: from a query string or a JSON body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Unvalidated search input. Any field may be missing, blank or malformed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchQuery {
    pub q: Option<String>,
    pub city: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub lat: Option<RawValue>,
    pub lng: Option<RawValue>,
    pub radius_km: Option<RawValue>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub vibe: Vec<String>,
    pub limit: Option<RawValue>,
    pub offset: Option<RawValue>,
}

impl RawSearchQuery {
    /// Builds a query from decoded query-string pairs. Single-valued keys keep
    /// their first occurrence; `genre` and `vibe` may repeat and each value may
    /// hold a comma-separated list.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();

        for (key, value) in pairs {
            let value: String = value.into();
            match key.as_ref() {
                "q" => set_once(&mut query.q, value),
                "city" => set_once(&mut query.city, value),
                "from" => set_once(&mut query.from, value),
                "to" => set_once(&mut query.to, value),
                "lat" => set_once(&mut query.lat, RawValue::Text(value)),
                "lng" => set_once(&mut query.lng, RawValue::Text(value)),
                "radius_km" => set_once(&mut query.radius_km, RawValue::Text(value)),
                "limit" => set_once(&mut query.limit, RawValue::Text(value)),
                "offset" => set_once(&mut query.offset, RawValue::Text(value)),
                "genre" => query.genre.extend(split_multi(&value)),
                "vibe" => query.vibe.extend(split_multi(&value)),
                _ => {}
            }
        }

        query
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn split_multi(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Canonical, validated search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchFilter {
    pub text: Option<String>,
    pub city: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub origin: Option<GeoPoint>,
    pub radius_km: f64,
    pub genre: BTreeSet<String>,
    pub vibe: BTreeSet<String>,
    pub limit: u32,
    pub offset: u64,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            text: None,
            city: None,
            from: None,
            to: None,
            origin: None,
            radius_km: DEFAULT_RADIUS_KM,
            genre: BTreeSet::new(),
            vibe: BTreeSet::new(),
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

/// One page of results. `limit` and `offset` echo the normalized request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub items: Vec<Event>,
    pub total: i64,
    pub limit: u32,
    pub offset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_splits_tags_and_keeps_first_scalar() {
        let query = RawSearchQuery::from_pairs(vec![
            ("genre", "rock, indie"),
            ("genre", "pop"),
            ("vibe", " , "),
            ("city", "Boston"),
            ("city", "Chicago"),
            ("unknown", "ignored"),
        ]);

        assert_eq!(query.genre, vec!["rock", "indie", "pop"]);
        assert!(query.vibe.is_empty());
        assert_eq!(query.city.as_deref(), Some("Boston"));
    }

    #[test]
    fn test_raw_value_accepts_numbers_and_strings() {
        let query: RawSearchQuery =
            serde_json::from_str(r#"{"lat": 40.75, "lng": "-73.99", "limit": 5}"#).unwrap();

        assert_eq!(query.lat, Some(RawValue::Number(40.75)));
        assert_eq!(query.lng, Some(RawValue::Text("-73.99".to_string())));
        assert_eq!(query.limit, Some(RawValue::Number(5.0)));
    }
}
