//! Unit tests for the mock credential store

use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, FixedClock};
use crate::domain::entities::token::IssuedRefreshRecord;
use crate::errors::{DomainError, TokenError};
use crate::repositories::token::{MockTokenRepository, TokenRepository};

fn record(clock: &FixedClock, subject_id: Uuid, token: &str, ttl: Duration) -> IssuedRefreshRecord {
    IssuedRefreshRecord {
        subject_id,
        token: token.to_string(),
        issued_at: clock.now(),
        expires_at: clock.now() + ttl,
    }
}

#[tokio::test]
async fn test_insert_and_find_exact() {
    let clock = FixedClock::starting_now();
    let repo = MockTokenRepository::with_clock(Arc::new(clock.clone()));
    let subject = Uuid::new_v4();

    repo.insert(record(&clock, subject, "tok-1", Duration::days(1)))
        .await
        .unwrap();

    let found = repo.find_exact("tok-1").await.unwrap().expect("record");
    assert_eq!(found.subject_id, subject);

    // Exact match only
    assert!(repo.find_exact("tok-").await.unwrap().is_none());
    assert!(repo.find_exact("tok-1 ").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_insert_rejected() {
    let clock = FixedClock::starting_now();
    let repo = MockTokenRepository::with_clock(Arc::new(clock.clone()));
    let subject = Uuid::new_v4();

    repo.insert(record(&clock, subject, "dup", Duration::days(1)))
        .await
        .unwrap();
    let err = repo
        .insert(record(&clock, subject, "dup", Duration::days(1)))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Token(TokenError::DuplicateToken)));
}

#[tokio::test]
async fn test_delete_exact_counts() {
    let clock = FixedClock::starting_now();
    let repo = MockTokenRepository::with_clock(Arc::new(clock.clone()));

    repo.insert(record(&clock, Uuid::new_v4(), "gone", Duration::days(1)))
        .await
        .unwrap();

    assert_eq!(repo.delete_exact("gone").await.unwrap(), 1);
    assert_eq!(repo.delete_exact("gone").await.unwrap(), 0);
    assert!(!repo.exists("gone").await.unwrap());
}

#[tokio::test]
async fn test_expired_records_are_never_returned() {
    let clock = FixedClock::starting_now();
    let repo = MockTokenRepository::with_clock(Arc::new(clock.clone()));
    let subject = Uuid::new_v4();

    repo.insert(record(&clock, subject, "short", Duration::minutes(5)))
        .await
        .unwrap();
    repo.insert(record(&clock, subject, "long", Duration::days(5)))
        .await
        .unwrap();
    assert_eq!(repo.count_for_subject(subject).await.unwrap(), 2);

    clock.advance(Duration::minutes(5));
    assert!(repo.find_exact("short").await.unwrap().is_none());
    assert_eq!(repo.count_for_subject(subject).await.unwrap(), 1);

    // Still physically present until collected
    assert_eq!(repo.raw_len().await, 2);
    assert_eq!(repo.delete_expired(clock.now()).await.unwrap(), 1);
    assert_eq!(repo.raw_len().await, 1);
}
