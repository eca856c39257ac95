//! Demo driver for the ReadSphere recommendation engine.
//!
//! Builds an in-memory catalog, runs the full pipeline, and prints
//! personalized recommendations plus a similar-book query.

use anyhow::Result;
use chrono::Utc;
use readsphere_core::{Book, Rating};
use readsphere_recs::{CatalogSnapshot, InMemoryStore, Recommender, RecsConfig};
use uuid::Uuid;

fn book(
    title: &str,
    author: &str,
    genre: &str,
    tags: &[&str],
    description: &str,
    pages: u32,
    average_rating: f32,
    review_count: u32,
    popularity_score: f32,
) -> Book {
    Book {
        id: Uuid::new_v4(),
        title: title.to_string(),
        author: Some(author.to_string()),
        genre: Some(genre.to_string()),
        subgenres: Vec::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        description: Some(description.to_string()),
        pages: Some(pages),
        average_rating: Some(average_rating),
        review_count: Some(review_count),
        popularity_score: Some(popularity_score),
        published_date: None,
        language: Some("en".to_string()),
    }
}

fn fixture_books() -> Vec<Book> {
    vec![
        book(
            "Emberfall",
            "Mara Voss",
            "Fantasy",
            &["dragons", "magic"],
            "A dragonrider courier crosses a burning empire to deliver the last ember of forbidden magic.",
            512, 4.6, 210, 88.0,
        ),
        book(
            "The Last Rune",
            "Mara Voss",
            "Fantasy",
            &["magic", "runes"],
            "An apprentice wizard deciphers forbidden runes while her order burns around her.",
            388, 4.2, 95, 61.0,
        ),
        book(
            "Crown of Cinders",
            "R. Aldane",
            "Fantasy",
            &["dragons", "war"],
            "Dragonrider legions clash over a shattered crown as old magic wakes beneath the ash.",
            450, 4.5, 180, 74.0,
        ),
        book(
            "Hollow Orbit",
            "N. Okafor",
            "Sci-Fi",
            &["space", "salvage"],
            "A salvage crew drifts between dead stations, hunting a signal nobody should be sending.",
            340, 4.8, 320, 91.0,
        ),
        book(
            "Signal Decay",
            "N. Okafor",
            "Sci-Fi",
            &["space", "ai"],
            "A lone relay operator decodes a dying signal from a station that went dark years ago.",
            298, 4.1, 64, 55.0,
        ),
        book(
            "The Quiet Harbor",
            "Ilse Brandt",
            "Literary",
            &["family", "grief"],
            "Three siblings return to a harbor town to close their mother's bookshop and reopen old wounds.",
            272, 3.9, 41, 33.0,
        ),
    ]
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let books = fixture_books();
    let reader = Uuid::new_v4();
    let emberfall = books[0].id;
    let last_rune = books[1].id;

    let ratings = vec![
        Rating::new(reader, emberfall, 5.0, Utc::now())?,
        Rating::new(reader, last_rune, 4.0, Utc::now())?,
    ];

    let store = InMemoryStore::new(books, ratings);
    let config = RecsConfig::default();
    let snapshot = CatalogSnapshot::load(&store, &config)?;
    let recommender = Recommender::new(&snapshot, &store, config);

    println!("Recommendations for reader {reader}:");
    for rec in recommender.refresh_for_user(reader, 10, &store)? {
        println!(
            "- {} by {} (score: {:.3})",
            rec.title,
            rec.author.as_deref().unwrap_or("unknown"),
            rec.score
        );
        println!("  Reason: {}", rec.explanation);
    }

    println!();
    println!("Books similar to Emberfall:");
    for similar in recommender.find_similar_books(emberfall, 3) {
        println!(
            "- {} by {} (similarity: {:.3})",
            similar.title,
            similar.author.as_deref().unwrap_or("unknown"),
            similar.similarity_score
        );
    }

    println!();
    println!("A brand-new reader sees the popularity ranking:");
    for rec in recommender.recommend_for_user(Uuid::new_v4(), 3)? {
        println!(
            "- {} (score: {:.3}): {}",
            rec.title, rec.score, rec.explanation
        );
    }

    Ok(())
}
