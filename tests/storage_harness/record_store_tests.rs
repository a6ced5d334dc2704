//! Macro-generated test suite for the `RecordStore` contract.
//!
//! The `record_store_tests!` macro generates a test module that validates a
//! backend's `RecordStore<User>` and `RecordStore<Word>` implementations:
//! id assignment, lookups, filters and sorting, replace and delete signals,
//! and unique-field enforcement (including under concurrent inserts).
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use polyglotte::storage::InMemoryRecordStore;
//!
//! record_store_tests!(
//!     InMemoryRecordStore::<User>::new(),
//!     InMemoryRecordStore::<Word>::new()
//! );
//! ```

/// Generate a full `RecordStore` conformance test suite.
///
/// `$users` and `$words` must evaluate to fresh, empty stores implementing
/// `RecordStore<User>` and `RecordStore<Word>` (`'static`, for the
/// concurrency test). They are re-evaluated for each test. The users store
/// must already enforce the unique fields.
#[macro_export]
macro_rules! record_store_tests {
    ($users:expr, $words:expr) => {
        mod record_store_contract_tests {
            use super::*;
            use polyglotte::core::entity::{Entity, RecordId};
            use polyglotte::core::filter::{Filter, SortDirection};
            use polyglotte::core::store::{RecordStore, StoreError};
            use polyglotte::entities::{User, Word};
            use std::sync::Arc;

            // ==================================================================
            // Insert & find
            // ==================================================================

            #[tokio::test]
            async fn test_insert_assigns_id_and_round_trips() {
                let store = $users;
                let created = store.insert_one(sample_user("alice")).await.unwrap();
                assert!(created.id().is_assigned());

                let found = store.find_by_id(created.id()).await.unwrap();
                assert_eq!(found, Some(created));
            }

            #[tokio::test]
            async fn test_created_at_survives_storage_within_call_window() {
                use chrono::Utc;

                let store = $words;
                for i in 0..20 {
                    let before = Utc::now();
                    let word = Word::new(RecordId::new("u1"), format!("w{}", i), format!("m{}", i));
                    let created = store.insert_one(word).await.unwrap();

                    assert!(created.created_at >= before, "createdAt earlier than the call");
                    let found = store.find_by_id(created.id()).await.unwrap().unwrap();
                    assert_eq!(found.created_at, created.created_at);
                }
            }

            #[tokio::test]
            async fn test_find_by_id_unknown_is_none() {
                let store = $users;
                store.insert_one(sample_user("alice")).await.unwrap();

                let found = store.find_by_id(&RecordId::new(UNKNOWN_ID)).await.unwrap();
                assert!(found.is_none());
            }

            #[tokio::test]
            async fn test_find_by_id_malformed_is_none() {
                let store = $words;
                let found = store.find_by_id(&RecordId::new("not an id")).await.unwrap();
                assert!(found.is_none(), "malformed ids must read as absent, not fail");
            }

            #[tokio::test]
            async fn test_find_one_matches_exact_value() {
                let store = $users;
                store.insert_one(sample_user("alice")).await.unwrap();
                store.insert_one(sample_user("bob")).await.unwrap();

                let bob = store
                    .find_one(&Filter::eq("email", "bob@example.com"))
                    .await
                    .unwrap()
                    .expect("bob should be found by email");
                assert_eq!(bob.username, "bob");

                let none = store
                    .find_one(&Filter::eq("username", "BOB"))
                    .await
                    .unwrap();
                assert!(none.is_none(), "field equality is case-sensitive");
            }

            #[tokio::test]
            async fn test_find_many_empty_store() {
                let store = $words;
                assert!(store.find_many(&Filter::all()).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_find_many_filters_by_owner_and_sorts() {
                let store = $words;
                store.insert_one(sample_word("u1", "cat", "chat", 0)).await.unwrap();
                store.insert_one(sample_word("u2", "dog", "chien", 1)).await.unwrap();
                store.insert_one(sample_word("u1", "house", "maison", 2)).await.unwrap();
                store.insert_one(sample_word("u1", "tree", "arbre", 1)).await.unwrap();

                let filter = Filter::eq("userId", "u1").sort_by("createdAt", SortDirection::Descending);
                let english: Vec<String> = store
                    .find_many(&filter)
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|w| w.english_word)
                    .collect();
                assert_eq!(english, vec!["house", "tree", "cat"]);

                let filter = Filter::eq("userId", "u1").sort_by("createdAt", SortDirection::Ascending);
                let first = store.find_many(&filter).await.unwrap();
                assert_eq!(first[0].english_word, "cat");
            }

            #[tokio::test]
            async fn test_find_many_conjunction() {
                let store = $words;
                store.insert_one(sample_word("u1", "cat", "chat", 0)).await.unwrap();
                store.insert_one(sample_word("u2", "cat", "chat", 0)).await.unwrap();

                let filter = Filter::eq("userId", "u2").and_eq("englishWord", "cat");
                let found = store.find_many(&filter).await.unwrap();
                assert_eq!(found.len(), 1);
                assert_eq!(found[0].user_id.as_str(), "u2");
            }

            #[tokio::test]
            async fn test_count() {
                let store = $words;
                for (i, english) in ["one", "two", "three"].iter().enumerate() {
                    store
                        .insert_one(sample_word("u1", english, english, i as i64))
                        .await
                        .unwrap();
                }
                store.insert_one(sample_word("u2", "four", "quatre", 0)).await.unwrap();

                assert_eq!(store.count(&Filter::all()).await.unwrap(), 4);
                assert_eq!(store.count(&Filter::eq("userId", "u1")).await.unwrap(), 3);
                assert_eq!(store.count(&Filter::eq("userId", "nobody")).await.unwrap(), 0);
            }

            // ==================================================================
            // Replace
            // ==================================================================

            #[tokio::test]
            async fn test_replace_existing() {
                let store = $words;
                let mut word = store.insert_one(sample_word("u1", "cat", "chat", 0)).await.unwrap();

                word.french_word = "chatte".to_string();
                assert!(store.replace_one(&word).await.unwrap());

                let found = store.find_by_id(word.id()).await.unwrap().unwrap();
                assert_eq!(found.french_word, "chatte");
                assert_eq!(found.english_word, "cat");
                assert_eq!(found.created_at, word.created_at);
            }

            #[tokio::test]
            async fn test_replace_unknown_returns_false() {
                let store = $words;
                let mut ghost = sample_word("u1", "ghost", "fantôme", 0);
                ghost.assign_id(RecordId::new(UNKNOWN_ID));

                assert!(!store.replace_one(&ghost).await.unwrap());
                assert_eq!(store.count(&Filter::all()).await.unwrap(), 0);
            }

            // ==================================================================
            // Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $words;
                let word = store.insert_one(sample_word("u1", "cat", "chat", 0)).await.unwrap();

                assert!(store.delete_one(word.id()).await.unwrap());
                assert!(store.find_by_id(word.id()).await.unwrap().is_none());
                assert!(!store.delete_one(word.id()).await.unwrap(), "second delete removes nothing");
            }

            #[tokio::test]
            async fn test_delete_unknown_returns_false() {
                let store = $words;
                assert!(!store.delete_one(&RecordId::new(UNKNOWN_ID)).await.unwrap());
                assert!(!store.delete_one(&RecordId::new("garbage")).await.unwrap());
            }

            // ==================================================================
            // Unique fields
            // ==================================================================

            #[tokio::test]
            async fn test_duplicate_username_rejected() {
                let store = $users;
                store.insert_one(sample_user("alice")).await.unwrap();

                let mut clash = sample_user("alice");
                clash.email = "other@example.com".to_string();
                let err = store.insert_one(clash).await.unwrap_err();

                assert!(
                    matches!(err, StoreError::DuplicateKey { ref field, .. } if field == "username"),
                    "unexpected error: {err}"
                );
                assert_eq!(store.count(&Filter::all()).await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_duplicate_email_rejected_on_replace() {
                let store = $users;
                store.insert_one(sample_user("alice")).await.unwrap();
                let mut bob = store.insert_one(sample_user("bob")).await.unwrap();

                bob.email = "alice@example.com".to_string();
                let err = store.replace_one(&bob).await.unwrap_err();
                assert!(
                    matches!(err, StoreError::DuplicateKey { ref field, .. } if field == "email"),
                    "unexpected error: {err}"
                );

                let stored = store.find_by_id(bob.id()).await.unwrap().unwrap();
                assert_eq!(stored.email, "bob@example.com");
            }

            #[tokio::test]
            async fn test_concurrent_inserts_of_same_username() {
                let store: Arc<dyn RecordStore<User>> = Arc::new($users);

                let mut handles = Vec::new();
                for i in 0..8 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        let mut user = sample_user("racer");
                        user.email = format!("racer{}@example.com", i);
                        store.insert_one(user).await
                    }));
                }

                let mut successes = 0;
                for handle in handles {
                    match handle.await.unwrap() {
                        Ok(_) => successes += 1,
                        Err(StoreError::DuplicateKey { .. }) => {}
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }

                assert_eq!(successes, 1, "exactly one racer may win");
                assert_eq!(store.count(&Filter::eq("username", "racer")).await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_words_have_no_unique_fields() {
                let store = $words;
                store.insert_one(sample_word("u1", "cat", "chat", 0)).await.unwrap();
                store.insert_one(sample_word("u1", "cat", "chat", 0)).await.unwrap();
                assert_eq!(store.count(&Filter::all()).await.unwrap(), 2);
            }
        }
    };
}
