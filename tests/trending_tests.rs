//! Store-level tests for the counter accessor, trending aggregation, the
//! favorites feed and the session lifecycle.

use std::sync::Arc;

use trendarr::db::Store;
use trendarr::models::{ContentItem, MediaType, NewFavorite};
use trendarr::services::{FavoritesService, SessionService, SignIn, TrendingService};

async fn temp_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("trendarr-store-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open temp store")
}

fn item(id: i32, title: &str, media_type: MediaType) -> ContentItem {
    ContentItem {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/{id}.jpg")),
        vote_average: Some(7.0),
        release_date: Some("2024-06-01".to_string()),
        overview: None,
        genres: vec!["18".to_string()],
        media_type,
    }
}

#[tokio::test]
async fn repeat_search_increments_single_counter() {
    let store = temp_store().await;
    let movie = item(603, "The Matrix", MediaType::Movie);

    store.record_search("matrix", &movie).await.unwrap();
    store.record_search("matrix", &movie).await.unwrap();

    let counters = store.list_counters(MediaType::Movie).await.unwrap();
    assert_eq!(counters.len(), 1);
    assert_eq!(counters[0].count, 2);
    assert_eq!(counters[0].content_id, Some(603));
    assert_eq!(
        counters[0].poster_url,
        "https://image.tmdb.org/t/p/w500/603.jpg"
    );
}

#[tokio::test]
async fn different_terms_create_separate_counters() {
    let store = temp_store().await;
    let movie = item(603, "The Matrix", MediaType::Movie);

    store.record_search("matrix", &movie).await.unwrap();
    store.record_search("neo", &movie).await.unwrap();

    let counters = store.list_counters(MediaType::Movie).await.unwrap();
    assert_eq!(counters.len(), 2);
    assert!(counters.iter().all(|c| c.count == 1));
}

#[tokio::test]
async fn variants_use_separate_collections() {
    let store = temp_store().await;

    store
        .record_search("office", &item(2316, "The Office", MediaType::Tv))
        .await
        .unwrap();

    assert!(store.list_counters(MediaType::Movie).await.unwrap().is_empty());
    assert_eq!(store.list_counters(MediaType::Tv).await.unwrap().len(), 1);
}

#[tokio::test]
async fn trending_merges_terms_by_identity() {
    let store = temp_store().await;
    let five = item(5, "Five", MediaType::Movie);
    let seven = item(7, "Seven", MediaType::Movie);

    for _ in 0..3 {
        store.record_search("a", &five).await.unwrap();
    }
    for _ in 0..2 {
        store.record_search("b", &five).await.unwrap();
    }
    for _ in 0..10 {
        store.record_search("c", &seven).await.unwrap();
    }

    let service = TrendingService::new(store);
    let entries = service.top(MediaType::Movie, 6).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, 7);
    assert_eq!(entries[0].count, 10);
    assert_eq!(entries[1].id, 5);
    assert_eq!(entries[1].count, 5);
}

#[tokio::test]
async fn trending_respects_carousel_limit() {
    let store = temp_store().await;

    for id in 0..10 {
        let movie = item(id, "Movie", MediaType::Movie);
        store
            .record_search(&format!("term-{id}"), &movie)
            .await
            .unwrap();
    }

    let service = TrendingService::new(store);
    let entries = service.carousel(MediaType::Movie).await.unwrap();
    assert_eq!(entries.len(), 6);
}

#[tokio::test]
async fn duplicate_favorite_is_a_noop() {
    let store = temp_store().await;
    let favorites = FavoritesService::new(store.clone());

    let fav = NewFavorite {
        item_id: 603,
        media_type: MediaType::Movie,
        title: "The Matrix".to_string(),
        poster: None,
    };

    let first = favorites.add("user-1", &fav).await.unwrap();
    let second = favorites.add("user-1", &fav).await.unwrap();

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(store.favorites_for_user("user-1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn same_item_different_variant_is_not_a_duplicate() {
    let store = temp_store().await;
    let favorites = FavoritesService::new(store.clone());

    let movie = NewFavorite {
        item_id: 42,
        media_type: MediaType::Movie,
        title: "Answer".to_string(),
        poster: None,
    };
    let tv = NewFavorite {
        item_id: 42,
        media_type: MediaType::Tv,
        title: "Answer".to_string(),
        poster: None,
    };

    favorites.add("user-1", &movie).await.unwrap();
    favorites.add("user-1", &tv).await.unwrap();

    assert_eq!(store.favorites_for_user("user-1").await.unwrap().len(), 2);
}

#[tokio::test]
async fn feed_delivers_full_snapshots_per_mutation() {
    let store = temp_store().await;
    let favorites = FavoritesService::new(store);

    let mut feed = favorites.subscribe("user-1").await.unwrap();
    assert!(feed.snapshot().is_empty());
    assert!(!feed.is_favorite(603, MediaType::Movie));

    let fav = NewFavorite {
        item_id: 603,
        media_type: MediaType::Movie,
        title: "The Matrix".to_string(),
        poster: None,
    };
    favorites.add("user-1", &fav).await.unwrap();

    assert!(feed.changed().await);
    assert!(feed.is_favorite(603, MediaType::Movie));

    let saved = feed.snapshot();
    assert_eq!(saved.len(), 1);

    favorites.remove("user-1", saved[0].id).await.unwrap();
    assert!(feed.changed().await);
    assert!(feed.snapshot().is_empty());
}

#[tokio::test]
async fn sign_out_clears_and_closes_feed() {
    let store = temp_store().await;
    let favorites = FavoritesService::new(store);

    let fav = NewFavorite {
        item_id: 1,
        media_type: MediaType::Movie,
        title: "One".to_string(),
        poster: None,
    };
    favorites.add("user-1", &fav).await.unwrap();

    let mut feed = favorites.subscribe("user-1").await.unwrap();
    assert_eq!(feed.snapshot().len(), 1);

    favorites.unsubscribe("user-1").await;

    // Cleared snapshot arrives first, then the feed reports closed.
    assert!(feed.changed().await);
    assert!(feed.snapshot().is_empty());
    assert!(!feed.changed().await);
}

#[tokio::test]
async fn sign_in_creates_user_document_once() {
    let store = temp_store().await;
    let favorites = Arc::new(FavoritesService::new(store.clone()));
    let sessions = SessionService::new(store.clone(), favorites);

    let identity = SignIn {
        uid: "uid-1".to_string(),
        email: "user@example.com".to_string(),
        username: "user".to_string(),
    };

    let context = sessions.sign_in(&identity).await.unwrap();
    assert_eq!(context.user.uid, "uid-1");

    let stored = store.get_user("uid-1").await.unwrap().expect("user missing");
    let first_created_at = stored.created_at.clone();

    // Second sign-in reuses the existing document.
    let context = sessions.sign_in(&identity).await.unwrap();
    assert_eq!(context.user.created_at, first_created_at);

    sessions.sign_out("uid-1").await;
}
