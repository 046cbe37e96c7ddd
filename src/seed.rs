//! Reference data used for local development and end-to-end tests: venues,
//! events, and the catalog (users, artists, genres, vibes) linked to them.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{Artist, Event, EventLinks, EventStatus, Label, User, Venue};

const MSG: Uuid = Uuid::from_u128(0x30000000_0000_0000_0000_000000000001);
const BEACON: Uuid = Uuid::from_u128(0x30000000_0000_0000_0000_000000000002);
const RED_ROCKS: Uuid = Uuid::from_u128(0x30000000_0000_0000_0000_000000000003);
const COMEDY_STORE: Uuid = Uuid::from_u128(0x30000000_0000_0000_0000_000000000004);
const CHICAGO_THEATRE: Uuid = Uuid::from_u128(0x30000000_0000_0000_0000_000000000005);

const TAYLOR_SWIFT: Uuid = Uuid::from_u128(0x40000000_0000_0000_0000_000000000001);
const FOO_FIGHTERS: Uuid = Uuid::from_u128(0x40000000_0000_0000_0000_000000000002);
const DAVE_CHAPPELLE: Uuid = Uuid::from_u128(0x40000000_0000_0000_0000_000000000003);
const ALI_WONG: Uuid = Uuid::from_u128(0x40000000_0000_0000_0000_000000000004);
const JOHN_MULANEY: Uuid = Uuid::from_u128(0x40000000_0000_0000_0000_000000000005);
const THE_KILLERS: Uuid = Uuid::from_u128(0x40000000_0000_0000_0000_000000000006);

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("seed timestamps are valid UTC instants")
}

fn venue(id: Uuid, name: &str, city: &str, address: &str, lat: f64, lng: f64, website: &str) -> Venue {
    let now = Utc::now();
    Venue {
        id,
        name: name.to_string(),
        city: city.to_string(),
        address_text: address.to_string(),
        latitude: lat,
        longitude: lng,
        website_url: Some(website.to_string()),
        created_at: now,
        updated_at: now,
    }
}

pub fn venues() -> Vec<Venue> {
    vec![
        venue(MSG, "Madison Square Garden", "New York", "4 Pennsylvania Plaza, New York, NY 10001", 40.7505, -73.9934, "https://www.msg.com/madison-square-garden"),
        venue(BEACON, "Beacon Theatre", "New York", "2124 Broadway, New York, NY 10023", 40.7804, -73.9818, "https://www.msg.com/beacon-theatre"),
        venue(RED_ROCKS, "Red Rocks Amphitheatre", "Morrison", "18300 W Alameda Pkwy, Morrison, CO 80465", 39.6654, -105.2057, "https://www.redrocksonline.com"),
        venue(COMEDY_STORE, "The Comedy Store", "Los Angeles", "8433 Sunset Blvd, Los Angeles, CA 90069", 34.0973, -118.3613, "https://thecomedystore.com"),
        venue(CHICAGO_THEATRE, "The Chicago Theatre", "Chicago", "175 N State St, Chicago, IL 60601", 41.8855, -87.6272, "https://www.msg.com/the-chicago-theatre"),
    ]
}

struct SeedEvent {
    id: u128,
    title: &'static str,
    description: &'static str,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    timezone: &'static str,
    city: &'static str,
    venue_name: &'static str,
    venue_id: Uuid,
    performer: &'static str,
    genre_tags: &'static [&'static str],
    vibe_tags: &'static [&'static str],
}

impl From<SeedEvent> for Event {
    fn from(seed: SeedEvent) -> Self {
        let now = Utc::now();
        Event {
            id: Uuid::from_u128(seed.id),
            title: seed.title.to_string(),
            description: Some(seed.description.to_string()),
            start_at: seed.start_at,
            end_at: Some(seed.end_at),
            timezone: seed.timezone.to_string(),
            city: Some(seed.city.to_string()),
            location_text: Some(seed.venue_name.to_string()),
            genre_tags: seed.genre_tags.iter().map(|t| t.to_string()).collect(),
            vibe_tags: seed.vibe_tags.iter().map(|t| t.to_string()).collect(),
            venue_id: Some(seed.venue_id),
            performer_text: Some(seed.performer.to_string()),
            venue_text: Some(seed.venue_name.to_string()),
            status: EventStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn events() -> Vec<Event> {
    vec![
        SeedEvent {
            id: 0x10000000_0000_0000_0000_000000000001,
            title: "Taylor Swift Arena Night",
            description: "Example data event featuring a real artist and venue.",
            start_at: utc(2026, 6, 12, 0, 0),
            end_at: utc(2026, 6, 12, 3, 0),
            timezone: "America/New_York",
            city: "New York",
            venue_name: "Madison Square Garden",
            venue_id: MSG,
            performer: "Taylor Swift",
            genre_tags: &["pop"],
            vibe_tags: &["energetic"],
        },
        SeedEvent {
            id: 0x10000000_0000_0000_0000_000000000002,
            title: "Foo Fighters Live at Red Rocks",
            description: "Example data event featuring a real artist and venue.",
            start_at: utc(2026, 7, 3, 1, 0),
            end_at: utc(2026, 7, 3, 4, 0),
            timezone: "America/Denver",
            city: "Morrison",
            venue_name: "Red Rocks Amphitheatre",
            venue_id: RED_ROCKS,
            performer: "Foo Fighters",
            genre_tags: &["alternative", "rock"],
            vibe_tags: &["aggressive", "energetic"],
        },
        SeedEvent {
            id: 0x10000000_0000_0000_0000_000000000003,
            title: "Ali Wong and Friends",
            description: "Example data comedy lineup with real performers.",
            start_at: utc(2026, 5, 10, 3, 0),
            end_at: utc(2026, 5, 10, 5, 0),
            timezone: "America/Los_Angeles",
            city: "Los Angeles",
            venue_name: "The Comedy Store",
            venue_id: COMEDY_STORE,
            performer: "Ali Wong",
            genre_tags: &["stand-up"],
            vibe_tags: &["funny", "intimate"],
        },
        SeedEvent {
            id: 0x10000000_0000_0000_0000_000000000004,
            title: "John Mulaney at Beacon Theatre",
            description: "Example data comedy show with a real artist and venue.",
            start_at: utc(2026, 5, 22, 23, 30),
            end_at: utc(2026, 5, 23, 1, 0),
            timezone: "America/New_York",
            city: "New York",
            venue_name: "Beacon Theatre",
            venue_id: BEACON,
            performer: "John Mulaney",
            genre_tags: &["stand-up"],
            vibe_tags: &["funny", "thoughtful"],
        },
        SeedEvent {
            id: 0x10000000_0000_0000_0000_000000000005,
            title: "The Killers in Chicago",
            description: "Example data event featuring a real band and venue.",
            start_at: utc(2026, 8, 15, 1, 0),
            end_at: utc(2026, 8, 15, 3, 30),
            timezone: "America/Chicago",
            city: "Chicago",
            venue_name: "The Chicago Theatre",
            venue_id: CHICAGO_THEATRE,
            performer: "The Killers",
            genre_tags: &["indie", "rock"],
            vibe_tags: &["chill", "energetic"],
        },
    ]
    .into_iter()
    .map(Event::from)
    .collect()
}

fn user(id: u128, name: &str, city: &str, lat: f64, lng: f64, relevant: &[&str]) -> User {
    let now = Utc::now();
    User {
        id: Uuid::from_u128(id),
        display_name: name.to_string(),
        home_city: Some(city.to_string()),
        home_latitude: Some(lat),
        home_longitude: Some(lng),
        relevant_cities: relevant.iter().map(|c| c.to_string()).collect(),
        created_at: now,
        updated_at: now,
    }
}

pub fn users() -> Vec<User> {
    vec![
        user(0x20000000_0000_0000_0000_000000000001, "Alex Carter", "Boston", 42.3601, -71.0589, &["Boston", "Cambridge", "New York"]),
        user(0x20000000_0000_0000_0000_000000000002, "Jordan Kim", "Los Angeles", 34.0522, -118.2437, &["Los Angeles", "Pasadena", "Long Beach"]),
        user(0x20000000_0000_0000_0000_000000000003, "Sam Rivera", "Chicago", 41.8781, -87.6298, &["Chicago", "Milwaukee"]),
    ]
}

pub fn artists() -> Vec<Artist> {
    let now = Utc::now();
    [
        (TAYLOR_SWIFT, "Taylor Swift", &["pop"][..]),
        (FOO_FIGHTERS, "Foo Fighters", &["rock", "alternative"][..]),
        (DAVE_CHAPPELLE, "Dave Chappelle", &["stand-up"][..]),
        (ALI_WONG, "Ali Wong", &["stand-up"][..]),
        (JOHN_MULANEY, "John Mulaney", &["stand-up"][..]),
        (THE_KILLERS, "The Killers", &["rock", "indie"][..]),
    ]
    .into_iter()
    .map(|(id, name, genres)| Artist {
        id,
        name: name.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        created_at: now,
        updated_at: now,
    })
    .collect()
}

fn labels(pairs: &[(&str, &str)]) -> Vec<Label> {
    pairs
        .iter()
        .map(|(code, label)| Label {
            code: code.to_string(),
            label: label.to_string(),
        })
        .collect()
}

pub fn genres() -> Vec<Label> {
    labels(&[
        ("rock", "Rock"),
        ("pop", "Pop"),
        ("indie", "Indie"),
        ("stand-up", "Stand-up Comedy"),
        ("improv", "Improv"),
        ("alternative", "Alternative"),
    ])
}

pub fn vibes() -> Vec<Label> {
    labels(&[
        ("aggressive", "Aggressive"),
        ("energetic", "Energetic"),
        ("chill", "Chill"),
        ("funny", "Funny"),
        ("intimate", "Intimate"),
        ("thoughtful", "Thoughtful"),
    ])
}

/// Join rows for the seed events. Genre and vibe links mirror each event's tag arrays.
pub fn event_links() -> Vec<EventLinks> {
    let performers = [
        (0x10000000_0000_0000_0000_000000000001, &[TAYLOR_SWIFT][..]),
        (0x10000000_0000_0000_0000_000000000002, &[FOO_FIGHTERS][..]),
        (0x10000000_0000_0000_0000_000000000003, &[ALI_WONG, DAVE_CHAPPELLE][..]),
        (0x10000000_0000_0000_0000_000000000004, &[JOHN_MULANEY][..]),
        (0x10000000_0000_0000_0000_000000000005, &[THE_KILLERS][..]),
    ];

    events()
        .into_iter()
        .map(|event| {
            let artist_ids = performers
                .iter()
                .find(|(id, _)| Uuid::from_u128(*id) == event.id)
                .map(|(_, artists)| artists.to_vec())
                .unwrap_or_default();

            EventLinks {
                event_id: event.id,
                artist_ids,
                genre_codes: event.genre_tags,
                vibe_codes: event.vibe_tags,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_links_reference_seeded_rows() {
        let artist_ids: HashSet<_> = artists().into_iter().map(|a| a.id).collect();
        let genre_codes: HashSet<_> = genres().into_iter().map(|g| g.code).collect();
        let vibe_codes: HashSet<_> = vibes().into_iter().map(|v| v.code).collect();
        let event_ids: HashSet<_> = events().into_iter().map(|e| e.id).collect();

        let links = event_links();
        assert_eq!(links.len(), 5);
        for link in &links {
            assert!(event_ids.contains(&link.event_id));
            assert!(!link.artist_ids.is_empty());
            assert!(link.artist_ids.iter().all(|id| artist_ids.contains(id)));
            assert!(link.genre_codes.iter().all(|code| genre_codes.contains(code)));
            assert!(link.vibe_codes.iter().all(|code| vibe_codes.contains(code)));
        }
    }

    #[test]
    fn test_events_link_to_seeded_venues() {
        let venue_ids: HashSet<_> = venues().into_iter().map(|v| v.id).collect();
        assert!(events()
            .iter()
            .all(|e| e.venue_id.is_some_and(|id| venue_ids.contains(&id))));
    }
}
