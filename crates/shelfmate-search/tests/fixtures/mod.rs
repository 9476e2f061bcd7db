//! Test fixtures for recommendation integration tests.
//!
//! A small library whose similarity falls off with distance in the title
//! ordering, so the expected neighbors of every title are easy to derive.

#![allow(dead_code)]

use shelfmate_search::{BookRecord, EngineConfig, EngineContext, PopularityEntry};

/// Title ordering shared by the index and the matrix.
pub const TITLES: [&str; 7] = [
    "Dune",
    "Emma",
    "Ulysses",
    "The Hobbit",
    "Neuromancer",
    "Persuasion",
    "Beloved",
];

pub fn titles() -> Vec<String> {
    TITLES.iter().map(|t| t.to_string()).collect()
}

/// `1 / (1 + |i - j|)`; equal distances on both sides produce ties.
pub fn similarity() -> Vec<Vec<f64>> {
    let n = TITLES.len();
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| 1.0 / (1.0 + (i as f64 - j as f64).abs()))
                .collect()
        })
        .collect()
}

fn book(title: &str, author: &str, medium: Option<&str>, large: Option<&str>) -> BookRecord {
    BookRecord {
        title: title.to_string(),
        author: Some(author.to_string()),
        image_url_medium: medium.map(str::to_string),
        image_url_large: large.map(str::to_string),
    }
}

/// Metadata rows; "Dune" appears twice and "Beloved" not at all.
pub fn books() -> Vec<BookRecord> {
    vec![
        book(
            "Dune",
            "Frank Herbert",
            Some("http://covers/dune-M.jpg"),
            Some("http://covers/dune-L.jpg"),
        ),
        book("Dune", "Brian Herbert", Some("http://covers/other.jpg"), None),
        book("Emma", "Jane Austen", Some("https://covers/emma-M.jpg"), None),
        book("Ulysses", "James Joyce", None, None),
        book("The Hobbit", "J.R.R. Tolkien", Some("http://covers/hobbit-M.jpg"), None),
        book("Neuromancer", "William Gibson", None, Some("http://covers/neuro-L.jpg")),
        book("Persuasion", "Jane Austen", Some(""), None),
    ]
}

/// Popularity list longer than the default landing limit.
pub fn popular(len: usize) -> Vec<PopularityEntry> {
    (0..len)
        .map(|i| {
            let title = TITLES
                .get(i)
                .map(|t| t.to_string())
                .unwrap_or_else(|| format!("Filler {i}"));
            PopularityEntry::new(title, "Ranked Author", 5.0 - i as f64 * 0.01)
        })
        .collect()
}

pub fn engine() -> EngineContext {
    engine_with(&EngineConfig::default())
}

pub fn engine_with(config: &EngineConfig) -> EngineContext {
    EngineContext::build(books(), &popular(80), titles(), similarity(), config)
        .expect("fixture engine should build")
}
