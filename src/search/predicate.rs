use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::models::{Event, GeoPoint, SearchFilter, Venue};

use super::{geo, text};

/// One conjunctive condition of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Searchable text contains at least one of the terms. An empty term set
    /// matches nothing.
    Text(BTreeSet<String>),
    City(String),
    StartsAtOrAfter(DateTime<Utc>),
    StartsAtOrBefore(DateTime<Utc>),
    GenreAny(BTreeSet<String>),
    VibeAny(BTreeSet<String>),
    /// The linked venue exists and lies within `radius_km` of `origin`.
    WithinRadius { origin: GeoPoint, radius_km: f64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn from_filter(filter: &SearchFilter) -> Self {
        let mut clauses = Vec::new();

        if let Some(query) = &filter.text {
            clauses.push(Clause::Text(text::tokenize(query)));
        }

        if let Some(city) = &filter.city {
            clauses.push(Clause::City(city.clone()));
        }

        if let Some(from) = filter.from {
            clauses.push(Clause::StartsAtOrAfter(from));
        }

        if let Some(to) = filter.to {
            clauses.push(Clause::StartsAtOrBefore(to));
        }

        if !filter.genre.is_empty() {
            clauses.push(Clause::GenreAny(filter.genre.clone()));
        }

        if !filter.vibe.is_empty() {
            clauses.push(Clause::VibeAny(filter.vibe.clone()));
        }

        if let Some(origin) = filter.origin {
            clauses.push(Clause::WithinRadius {
                origin,
                radius_km: filter.radius_km,
            });
        }

        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluates the predicate in process. `venue` is the event's linked venue, if any.
    pub fn matches(&self, event: &Event, venue: Option<&Venue>) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause_matches(clause, event, venue))
    }
}

fn clause_matches(clause: &Clause, event: &Event, venue: Option<&Venue>) -> bool {
    match clause {
        Clause::Text(terms) => text::matches_any_term(event, terms),
        Clause::City(city) => event.city.as_deref() == Some(city.as_str()),
        Clause::StartsAtOrAfter(from) => event.start_at >= *from,
        Clause::StartsAtOrBefore(to) => event.start_at <= *to,
        Clause::GenreAny(tags) => intersects(&event.genre_tags, tags),
        Clause::VibeAny(tags) => intersects(&event.vibe_tags, tags),
        Clause::WithinRadius { origin, radius_km } => venue.is_some_and(|venue| {
            let point = GeoPoint {
                lat: venue.latitude,
                lng: venue.longitude,
            };
            geo::within_radius(*origin, point, *radius_km)
        }),
    }
}

fn intersects(event_tags: &[String], wanted: &BTreeSet<String>) -> bool {
    event_tags.iter().any(|tag| wanted.contains(tag))
}

/// Result order: `start_at`, then `title`, then `id` so equal rows still page stably.
pub fn compare_events(a: &Event, b: &Event) -> Ordering {
    a.start_at
        .cmp(&b.start_at)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.id.cmp(&b.id))
}
