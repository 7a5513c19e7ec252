use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use weatherboard::constants::SEED_CITIES;
use weatherboard::db::{CityStat, Store};
use weatherboard::entities::searches;

async fn test_store() -> Store {
    let db_path = std::env::temp_dir().join(format!(
        "weatherboard-store-test-{}.db",
        uuid::Uuid::new_v4()
    ));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("Failed to create store")
}

#[tokio::test]
async fn test_initialize_seeds_reference_cities() {
    let store = test_store().await;

    let all = store.autocomplete_cities("").await;
    assert_eq!(
        all,
        vec![
            "Екатеринбург",
            "Казань",
            "Москва",
            "Новосибирск",
            "Санкт-Петербург"
        ]
    );

    // Second run must not duplicate or fail.
    store.initialize().await.unwrap();
    assert_eq!(store.autocomplete_cities("").await.len(), SEED_CITIES.len());

    let moscow = store.get_city("Москва").await.unwrap().unwrap();
    assert_eq!(moscow.latitude, Some(55.7558));
    assert_eq!(moscow.longitude, Some(37.6173));
}

#[tokio::test]
async fn test_autocomplete_substring_match() {
    let store = test_store().await;

    assert_eq!(store.autocomplete_cities("М").await, vec!["Москва"]);
    assert_eq!(
        store.autocomplete_cities("бург").await,
        vec!["Екатеринбург", "Санкт-Петербург"]
    );
    assert!(store.autocomplete_cities("Лондон").await.is_empty());
}

#[tokio::test]
async fn test_autocomplete_ascii_case_insensitive() {
    let store = test_store().await;
    store.record_search("Paris", 48.85, 2.35, "u1").await.unwrap();

    assert_eq!(store.autocomplete_cities("par").await, vec!["Paris"]);
    assert_eq!(store.autocomplete_cities("PAR").await, vec!["Paris"]);
}

#[tokio::test]
async fn test_autocomplete_limited_and_sorted() {
    let store = test_store().await;
    for i in 0..15 {
        store
            .record_search(&format!("Town {i:02}"), 0.0, 0.0, "u1")
            .await
            .unwrap();
    }

    let names = store.autocomplete_cities("Town").await;
    assert_eq!(names.len(), 10);
    assert_eq!(names.first().map(String::as_str), Some("Town 00"));
    assert_eq!(names.last().map(String::as_str), Some("Town 09"));
}

#[tokio::test]
async fn test_record_search_keeps_first_city_coordinates() {
    let store = test_store().await;

    store.record_search("Москва", 1.0, 2.0, "u1").await.unwrap();
    let moscow = store.get_city("Москва").await.unwrap().unwrap();
    assert_eq!(moscow.latitude, Some(55.7558));

    store.record_search("Тверь", 56.86, 35.9, "u1").await.unwrap();
    store.record_search("Тверь", 0.0, 0.0, "u2").await.unwrap();
    let tver = store.get_city("Тверь").await.unwrap().unwrap();
    assert_eq!(tver.latitude, Some(56.86));
    assert_eq!(tver.longitude, Some(35.9));

    assert_eq!(store.search_count().await.unwrap(), 3);
    assert_eq!(store.autocomplete_cities("Тверь").await, vec!["Тверь"]);
}

#[tokio::test]
async fn test_history_newest_first_and_truncated() {
    let store = test_store().await;
    for i in 0..25 {
        store
            .record_search(&format!("City {i}"), 0.0, 0.0, "alice")
            .await
            .unwrap();
    }
    store.record_search("Elsewhere", 0.0, 0.0, "bob").await.unwrap();

    let history = store.get_user_history("alice").await;
    assert_eq!(history.len(), 20);
    assert_eq!(history[0].city, "City 24");
    assert_eq!(history[19].city, "City 5");
    assert!(history.windows(2).all(|w| w[0].time >= w[1].time));
    assert!(history.iter().all(|e| e.city != "Elsewhere"));

    assert!(store.get_user_history("nobody").await.is_empty());
}

#[tokio::test]
async fn test_stats_ordered_by_count() {
    let store = test_store().await;
    for user in ["u1", "u2", "u3"] {
        store.record_search("A", 0.0, 0.0, user).await.unwrap();
    }
    store.record_search("B", 0.0, 0.0, "u1").await.unwrap();

    assert_eq!(
        store.get_city_stats().await,
        vec![
            CityStat {
                city: "A".to_string(),
                count: 3
            },
            CityStat {
                city: "B".to_string(),
                count: 1
            },
        ]
    );
}

#[tokio::test]
async fn test_stats_ties_break_by_name_and_truncate() {
    let store = test_store().await;
    for i in (0..25).rev() {
        store
            .record_search(&format!("C{i:02}"), 0.0, 0.0, "u1")
            .await
            .unwrap();
    }

    let stats = store.get_city_stats().await;
    assert_eq!(stats.len(), 20);
    assert_eq!(stats[0].city, "C00");
    assert!(stats.iter().all(|s| s.count == 1));
    assert!(stats.windows(2).all(|w| w[0].city < w[1].city));
}

#[tokio::test]
async fn test_reads_are_empty_when_tables_are_missing() {
    let store = test_store().await;
    store.record_search("A", 0.0, 0.0, "u1").await.unwrap();

    store
        .conn
        .execute_unprepared("DROP TABLE searches")
        .await
        .unwrap();
    store
        .conn
        .execute_unprepared("DROP TABLE cities")
        .await
        .unwrap();

    assert!(store.get_user_history("u1").await.is_empty());
    assert!(store.get_city_stats().await.is_empty());
    assert!(store.autocomplete_cities("").await.is_empty());
    assert!(store.record_search("A", 0.0, 0.0, "u1").await.is_err());
}

#[tokio::test]
async fn test_record_search_is_atomic() {
    let store = test_store().await;
    store
        .conn
        .execute_unprepared("DROP TABLE cities")
        .await
        .unwrap();

    assert!(store.record_search("A", 0.0, 0.0, "u1").await.is_err());
    assert_eq!(store.search_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_prune_removes_only_old_searches() {
    let store = test_store().await;

    searches::ActiveModel {
        city: Set("Old".to_string()),
        latitude: Set(Some(0.0)),
        longitude: Set(Some(0.0)),
        user_id: Set(Some("u1".to_string())),
        timestamp: Set("2000-01-01 00:00:00.000000".to_string()),
        ..Default::default()
    }
    .insert(&store.conn)
    .await
    .unwrap();
    store.record_search("New", 0.0, 0.0, "u1").await.unwrap();

    let removed = store.prune_searches(30).await.unwrap();
    assert_eq!(removed, 1);

    let history = store.get_user_history("u1").await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].city, "New");
    assert_eq!(store.autocomplete_cities("").await.len(), SEED_CITIES.len() + 1);
}

#[tokio::test]
async fn test_ping_and_close() {
    let store = test_store().await;
    store.ping().await.unwrap();
    store.close().await.unwrap();
}
