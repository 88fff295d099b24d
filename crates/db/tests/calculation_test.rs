//! Integration tests for the calculation repository.

mod common;

use std::sync::Arc;

use chrono::Utc;
use fairshare_core::currency::FallbackRates;
use fairshare_core::history::{HistoryError, HistoryService};
use fairshare_core::split::{Party, SplitInput};
use fairshare_db::CalculationRepository;
use fairshare_shared::types::{PageRequest, UserId};
use fairshare_shared::{Currency, Money};
use rust_decimal_macros::dec;

fn split_input(bill: Money) -> SplitInput {
    SplitInput {
        person_a: Party::new("Ana", Money::new(dec!(2000), Currency::Usd)),
        person_b: Party::new("Ben", Money::new(dec!(1300000), Currency::Ars)),
        bill,
    }
}

async fn save(
    service: &HistoryService<CalculationRepository>,
    owner: UserId,
    bill: Money,
) -> fairshare_core::history::CalculationRecord {
    let table = FallbackRates::default().table("test", Utc::now());
    let input = split_input(bill);
    let result = input.compute(&table).unwrap();
    service.save(owner, &input, &result).await.expect("Failed to save")
}

#[tokio::test]
async fn test_save_and_list_newest_first() {
    let Some(db) = common::connect().await else {
        return;
    };
    let owner = UserId::from_uuid(common::create_test_user(&db).await);
    let service = HistoryService::new(Arc::new(CalculationRepository::new(db)));

    let first = save(&service, owner, Money::new(dec!(100), Currency::Usd)).await;
    let second = save(&service, owner, Money::new(dec!(90000), Currency::Ars)).await;

    assert_eq!(first.person_a_payment + first.person_b_payment, dec!(100));

    let page = service.list(owner, PageRequest::default()).await.unwrap();
    assert_eq!(page.meta.total, 2);
    assert_eq!(page.data[0].id, second.id);
    assert_eq!(page.data[1].id, first.id);
    assert_eq!(page.data[1].bill, Money::new(dec!(100), Currency::Usd));
}

#[tokio::test]
async fn test_delete_requires_owner() {
    let Some(db) = common::connect().await else {
        return;
    };
    let owner = UserId::from_uuid(common::create_test_user(&db).await);
    let other = UserId::from_uuid(common::create_test_user(&db).await);
    let service = HistoryService::new(Arc::new(CalculationRepository::new(db)));

    let saved = save(&service, owner, Money::new(dec!(10), Currency::Eur)).await;

    assert!(matches!(
        service.delete(other, saved.id).await,
        Err(HistoryError::NotFound(_))
    ));
    service.delete(owner, saved.id).await.unwrap();
    assert_eq!(service.stats(owner).await.unwrap().total_calculations, 0);
}

#[tokio::test]
async fn test_stats() {
    let Some(db) = common::connect().await else {
        return;
    };
    let owner = UserId::from_uuid(common::create_test_user(&db).await);
    let service = HistoryService::new(Arc::new(CalculationRepository::new(db)));

    save(&service, owner, Money::new(dec!(100), Currency::Brl)).await;
    save(&service, owner, Money::new(dec!(200), Currency::Brl)).await;
    let last = save(&service, owner, Money::new(dec!(301), Currency::Usd)).await;

    let stats = service.stats(owner).await.unwrap();

    assert_eq!(stats.total_calculations, 3);
    assert_eq!(stats.most_used_currency, Some(Currency::Brl));
    assert_eq!(stats.average_bill_amount, dec!(200.33));
    assert_eq!(
        stats.last_calculation_date.map(|d| d.timestamp_micros()),
        Some(last.created_at.timestamp_micros())
    );
}
