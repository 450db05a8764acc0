//! Finder and criteria tests
//!
//! Search resolution over the secondary indexes: equality lookups per
//! qualifier, intersection across qualifiers, rehydration of matches.

use redmap::{Entity, FieldBinding, Finder, Mapper, MemoryStore, Pool, Value};
use std::sync::Arc;

// ============================================================================
// Fixture
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
struct Track {
    artist: Option<String>,
    genre: Option<String>,
    plays: Option<i64>,
    tags: Option<Vec<String>>,
}

const TRACK_BINDINGS: &[FieldBinding] = &[
    FieldBinding::str("artist"),
    FieldBinding::str("genre"),
    FieldBinding::int("plays"),
    FieldBinding::str_list("tags"),
];

impl Track {
    fn new(artist: &str, genre: &str, plays: i64) -> Self {
        Track {
            artist: Some(artist.to_string()),
            genre: Some(genre.to_string()),
            plays: Some(plays),
            tags: None,
        }
    }

    fn tagged(mut self, tags: &[&str]) -> Self {
        self.tags = Some(tags.iter().map(|t| t.to_string()).collect());
        self
    }
}

impl Entity for Track {
    fn type_name(&self) -> &'static str {
        "Track"
    }

    fn bindings(&self) -> &'static [FieldBinding] {
        TRACK_BINDINGS
    }

    fn get(&self, attr: &str) -> Option<Value> {
        match attr {
            "artist" => self.artist.clone().map(Value::Str),
            "genre" => self.genre.clone().map(Value::Str),
            "plays" => self.plays.map(Value::Int),
            _ => None,
        }
    }

    fn set(&mut self, attr: &str, value: Value) {
        match (attr, value) {
            ("artist", Value::Str(text)) => self.artist = Some(text),
            ("genre", Value::Str(text)) => self.genre = Some(text),
            ("plays", Value::Int(n)) => self.plays = Some(n),
            _ => {}
        }
    }

    fn get_list(&self, attr: &str) -> Option<Vec<Value>> {
        if attr != "tags" {
            return None;
        }
        self.tags
            .as_ref()
            .map(|tags| tags.iter().cloned().map(Value::Str).collect())
    }

    fn set_list(&mut self, attr: &str, values: Vec<Value>) {
        if attr != "tags" {
            return;
        }
        self.tags = Some(
            values
                .into_iter()
                .filter_map(|value| match value {
                    Value::Str(text) => Some(text),
                    _ => None,
                })
                .collect(),
        );
    }
}

fn pool() -> Pool {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Pool::with_defaults(Arc::new(MemoryStore::new()))
}

fn save(pool: &Pool, mut track: Track) -> Track {
    Mapper::new(&track, pool).unwrap().save(&mut track).unwrap();
    track
}

/// Criteria built from a probe instance carrying only the fields to
/// match on.
fn criteria_for(pool: &Pool, probe: &Track) -> redmap::SearchCriteria {
    Mapper::new(probe, pool).unwrap().criteria(probe)
}

#[test]
fn intersection_returns_only_the_full_match() {
    let pool = pool();
    save(&pool, Track::new("ada", "jazz", 10));
    save(&pool, Track::new("ada", "rock", 10));
    save(&pool, Track::new("bee", "jazz", 10));

    let probe = Track {
        artist: Some("ada".to_string()),
        genre: Some("jazz".to_string()),
        ..Track::default()
    };
    let criteria = criteria_for(&pool, &probe);
    assert_eq!(criteria.len(), 2);

    let found = Finder::new(criteria, Track::default, pool.clone())
        .find()
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].artist.as_deref(), Some("ada"));
    assert_eq!(found[0].genre.as_deref(), Some("jazz"));
}

#[test]
fn empty_criteria_match_nothing() {
    let pool = pool();
    save(&pool, Track::new("ada", "jazz", 10));

    let found = Finder::new(redmap::SearchCriteria::new(), Track::default, pool.clone())
        .find()
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn unmatched_criteria_return_empty() {
    let pool = pool();
    save(&pool, Track::new("ada", "jazz", 10));

    let probe = Track {
        artist: Some("nobody".to_string()),
        ..Track::default()
    };
    let found = Finder::new(criteria_for(&pool, &probe), Track::default, pool.clone())
        .find()
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn integer_equality_matches_exactly() {
    let pool = pool();
    save(&pool, Track::new("ada", "jazz", 7));
    save(&pool, Track::new("bee", "rock", 8));

    let probe = Track {
        plays: Some(7),
        ..Track::default()
    };
    let found = Finder::new(criteria_for(&pool, &probe), Track::default, pool.clone())
        .find()
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].artist.as_deref(), Some("ada"));
}

#[test]
fn criteria_from_a_loaded_record_find_it_again() {
    let pool = pool();
    let mut original = Track::new("ada", "jazz", 10);
    let mut mapper = Mapper::new(&original, &pool).unwrap();
    let id = mapper.save(&mut original).unwrap();

    let mut loaded = Track::default();
    let mut mapper = Mapper::with_id(&loaded, &pool, id).unwrap();
    mapper.load(&mut loaded).unwrap();

    let criteria = mapper.criteria(&loaded);
    let found = Finder::new(criteria, Track::default, pool.clone())
        .find()
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0], loaded);
}

#[test]
fn list_elements_qualify_their_record() {
    let pool = pool();
    save(&pool, Track::new("ada", "jazz", 10).tagged(&["live", "mono"]));
    save(&pool, Track::new("bee", "rock", 10).tagged(&["live"]));
    save(&pool, Track::new("cat", "folk", 10).tagged(&["studio"]));

    // one qualifier per element: matching on "live" finds both tagged
    // records, regardless of their other tags
    let probe = Track {
        tags: Some(vec!["live".to_string()]),
        ..Track::default()
    };
    let mut found = Finder::new(criteria_for(&pool, &probe), Track::default, pool.clone())
        .find()
        .unwrap();
    found.sort_by(|a, b| a.artist.cmp(&b.artist));
    let artists: Vec<&str> = found.iter().filter_map(|t| t.artist.as_deref()).collect();
    assert_eq!(artists, ["ada", "bee"]);
}

#[test]
fn list_and_scalar_qualifiers_intersect() {
    let pool = pool();
    save(&pool, Track::new("ada", "jazz", 10).tagged(&["live"]));
    save(&pool, Track::new("bee", "jazz", 10).tagged(&["studio"]));

    let probe = Track {
        genre: Some("jazz".to_string()),
        tags: Some(vec!["live".to_string()]),
        ..Track::default()
    };
    let found = Finder::new(criteria_for(&pool, &probe), Track::default, pool.clone())
        .find()
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].artist.as_deref(), Some("ada"));
}

#[test]
fn finder_results_are_fully_rehydrated() {
    let pool = pool();
    save(&pool, Track::new("ada", "jazz", 10).tagged(&["live", "mono"]));

    let probe = Track {
        artist: Some("ada".to_string()),
        ..Track::default()
    };
    let found = Finder::new(criteria_for(&pool, &probe), Track::default, pool.clone())
        .find()
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].plays, Some(10));
    assert_eq!(
        found[0].tags,
        Some(vec!["live".to_string(), "mono".to_string()])
    );
}
