//! Process-wide holder of the current rate table.
//!
//! The table is published through a `tokio::sync::watch` channel. Readers take
//! an `Arc` snapshot without waiting; every completed fetch replaces the table
//! wholesale, so when fetches overlap the one that resolves last wins. A
//! refresh future dropped before it resolves publishes nothing.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{info, warn};

use super::fallback::FallbackRates;
use super::rates::RateTable;
use super::source::RateSource;

/// Fetches from `source`, substituting the fallback table on failure.
///
/// Never fails: every fetch error degrades to a `Fallback` table stamped
/// with the failure time.
pub async fn fetch_or_fallback<S: RateSource>(source: &S, fallback: &FallbackRates) -> RateTable {
    match source.fetch_rates().await {
        Ok(table) => {
            info!(updated_at = %table.updated_at(), "Fetched live exchange rates");
            table
        }
        Err(e) => {
            warn!(error = %e, recoverable = e.is_recoverable(), "Rate fetch failed, using fallback rates");
            fallback.table(e.to_string(), Utc::now())
        }
    }
}

/// Holds the current rate table and refreshes it from a source.
pub struct RateProvider<S: RateSource> {
    source: S,
    fallback: FallbackRates,
    tx: watch::Sender<Arc<RateTable>>,
}

impl<S: RateSource> RateProvider<S> {
    /// Performs the initial fetch-or-fallback and returns a ready provider.
    pub async fn init(source: S, fallback: FallbackRates) -> Self {
        let table = fetch_or_fallback(&source, &fallback).await;
        Self::with_table(source, fallback, table)
    }

    /// Creates a provider around an already resolved table.
    #[must_use]
    pub fn with_table(source: S, fallback: FallbackRates, table: RateTable) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(table));
        Self {
            source,
            fallback,
            tx,
        }
    }

    /// Snapshot of the current table.
    #[must_use]
    pub fn current(&self) -> Arc<RateTable> {
        self.tx.borrow().clone()
    }

    /// Receiver notified every time the table is replaced.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<RateTable>> {
        self.tx.subscribe()
    }

    /// Re-fetches and publishes the outcome, live or fallback.
    pub async fn refresh(&self) -> Arc<RateTable> {
        let table = Arc::new(fetch_or_fallback(&self.source, &self.fallback).await);
        self.tx.send_replace(Arc::clone(&table));
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::error::RateError;
    use crate::currency::rates::RateStatus;
    use fairshare_shared::Currency;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Returns scripted outcomes in order, each after an optional delay.
    struct ScriptedSource {
        script: Mutex<VecDeque<(Duration, Result<Decimal, RateError>)>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<(Duration, Result<Decimal, RateError>)>) -> Self {
            Self {
                script: Mutex::new(script.into()),
            }
        }
    }

    fn table_with_usd(usd: Decimal) -> RateTable {
        let quotes = Currency::foreign().map(|c| {
            if c == Currency::Usd {
                (c, usd)
            } else {
                (c, dec!(10))
            }
        });
        RateTable::live(quotes, Utc::now()).unwrap()
    }

    impl RateSource for ScriptedSource {
        async fn fetch_rates(&self) -> Result<RateTable, RateError> {
            let (delay, outcome) = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted");
            tokio::time::sleep(delay).await;
            outcome.map(table_with_usd)
        }
    }

    fn unavailable() -> Result<Decimal, RateError> {
        Err(RateError::SourceUnavailable("connection refused".to_string()))
    }

    #[tokio::test]
    async fn test_init_live() {
        let source = ScriptedSource::new(vec![(Duration::ZERO, Ok(dec!(1400)))]);
        let provider = RateProvider::init(source, FallbackRates::default()).await;

        let table = provider.current();
        assert_eq!(table.status(), &RateStatus::Live);
        assert_eq!(table.rate(Currency::Usd).unwrap(), dec!(1400));
    }

    #[tokio::test]
    async fn test_init_falls_back_on_failure() {
        let source = ScriptedSource::new(vec![(Duration::ZERO, unavailable())]);
        let provider = RateProvider::init(source, FallbackRates::default()).await;

        let table = provider.current();
        assert!(table.is_degraded());
        assert_eq!(table.rate(Currency::Usd).unwrap(), dec!(1300));
        match table.status() {
            RateStatus::Fallback { reason } => assert!(reason.contains("connection refused")),
            RateStatus::Live => panic!("expected fallback"),
        }
    }

    #[tokio::test]
    async fn test_missing_rate_falls_back() {
        let source = ScriptedSource::new(vec![(
            Duration::ZERO,
            Err(RateError::MissingRate(Currency::Clp)),
        )]);
        let provider = RateProvider::init(source, FallbackRates::default()).await;
        assert!(provider.current().is_degraded());
    }

    #[tokio::test]
    async fn test_transitions_between_live_and_fallback() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, unavailable()),
            (Duration::ZERO, Ok(dec!(1350))),
            (Duration::ZERO, unavailable()),
        ]);
        let provider = RateProvider::init(source, FallbackRates::default()).await;
        assert!(provider.current().is_degraded());

        let refreshed = provider.refresh().await;
        assert!(!refreshed.is_degraded());
        assert_eq!(provider.current().rate(Currency::Usd).unwrap(), dec!(1350));

        provider.refresh().await;
        assert!(provider.current().is_degraded());
    }

    #[tokio::test]
    async fn test_overlapping_refreshes_last_to_resolve_wins() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, Ok(dec!(1000))),
            (Duration::from_millis(60), Ok(dec!(1111))),
            (Duration::from_millis(5), Ok(dec!(2222))),
        ]);
        let provider = RateProvider::init(source, FallbackRates::default()).await;

        // Slow fetch starts first, fast one resolves first.
        tokio::join!(provider.refresh(), provider.refresh());

        assert_eq!(provider.current().rate(Currency::Usd).unwrap(), dec!(1111));
    }

    #[tokio::test]
    async fn test_dropped_refresh_keeps_previous_table() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, Ok(dec!(1000))),
            (Duration::from_secs(5), Ok(dec!(9999))),
        ]);
        let provider = RateProvider::init(source, FallbackRates::default()).await;

        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), provider.refresh()).await;
        assert!(abandoned.is_err());
        assert_eq!(provider.current().rate(Currency::Usd).unwrap(), dec!(1000));
    }

    #[tokio::test]
    async fn test_subscribers_see_replacement() {
        let source = ScriptedSource::new(vec![
            (Duration::ZERO, unavailable()),
            (Duration::ZERO, Ok(dec!(1500))),
        ]);
        let provider = RateProvider::init(source, FallbackRates::default()).await;
        let mut rx = provider.subscribe();

        provider.refresh().await;

        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().is_degraded());
    }
}
