use std::collections::BTreeSet;

use crate::models::Event;

/// Lower-cases and splits on anything that is not a letter or digit.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// The projection of an event the text query runs against. Missing fields are empty.
pub fn searchable_text(event: &Event) -> String {
    [
        Some(event.title.as_str()),
        event.description.as_deref(),
        event.performer_text.as_deref(),
        event.venue_text.as_deref(),
    ]
    .into_iter()
    .map(|field| field.unwrap_or(""))
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn matches_any_term(event: &Event, terms: &BTreeSet<String>) -> bool {
    if terms.is_empty() {
        return false;
    }
    let tokens = tokenize(&searchable_text(event));
    terms.iter().any(|term| tokens.contains(term))
}

/// Postgres regex that splits a document the way [`tokenize`] does.
pub const TOKEN_SEPARATOR_PATTERN: &str = "[^[:alnum:]]+";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Foo-Fighters: LIVE @ Red Rocks!!");
        let expected: BTreeSet<String> = ["foo", "fighters", "live", "red", "rocks"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(tokens, expected);
        assert!(tokenize(" ?! ").is_empty());
    }

    #[test]
    fn test_matches_any_term_across_fields() {
        let events = seed::events();
        let mulaney = events
            .iter()
            .find(|e| e.title.starts_with("John Mulaney"))
            .unwrap();

        assert!(matches_any_term(mulaney, &tokenize("beacon")));
        assert!(matches_any_term(mulaney, &tokenize("jazz comedy")));
        assert!(!matches_any_term(mulaney, &tokenize("swift")));
        assert!(!matches_any_term(mulaney, &BTreeSet::new()));
    }

    #[test]
    fn test_punctuation_joined_words_are_separate_tokens() {
        let tokens = tokenize("AC/DC Live: tix.example.com, 3.5 hours");
        let expected: BTreeSet<String> =
            ["3", "5", "ac", "com", "dc", "example", "hours", "live", "tix"]
                .into_iter()
                .map(String::from)
                .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_punctuated_title_matches_its_parts() {
        let mut event = seed::events().remove(0);
        event.title = "AC/DC Live".to_string();
        event.description = Some("Doors at tix.example.com, 3.5 hours".to_string());

        for query in ["AC/DC", "ac", "tix.example.com", "3.5"] {
            assert!(matches_any_term(&event, &tokenize(query)), "{}", query);
        }
        assert!(!matches_any_term(&event, &tokenize("acdc")));
    }
}
