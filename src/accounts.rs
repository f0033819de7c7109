//! Client-side account cache
//!
//! Holds the last successfully fetched account list so forms can offer
//! account-number suggestions and look up balances without a round trip.
//! The cache is owned by its caller and refreshed explicitly, or
//! periodically through [`AccountCache::run`].

use crate::api::Account;
use crate::traits::AccountSource;
use crate::utils::formatting::account_option_label;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

/// Cached account list with an injected refresh interval
pub struct AccountCache {
    /// Where fresh account lists come from
    source: Arc<dyn AccountSource>,
    /// Minimum time between refreshes
    refresh_interval: Duration,
    /// Last successfully fetched list
    accounts: Vec<Account>,
    /// When `accounts` was last replaced
    last_refresh: Option<Instant>,
}

impl AccountCache {
    /// Creates an empty cache
    ///
    /// # Arguments
    /// - `source` - Provider of account lists, usually an `ApiClient`
    /// - `refresh_interval` - How often [`AccountCache::run`] refreshes
    pub fn new(source: Arc<dyn AccountSource>, refresh_interval: Duration) -> Self {
        Self {
            source,
            refresh_interval,
            accounts: Vec::new(),
            last_refresh: None,
        }
    }

    /// Fetches the account list and replaces the cached copy
    ///
    /// A failed fetch is logged and reported as an empty list; the previous
    /// cache contents are left untouched so suggestions keep working while
    /// the backend is down.
    pub async fn refresh(&mut self) -> Vec<Account> {
        match self.source.fetch_accounts().await {
            Ok(accounts) => {
                tracing::debug!(count = accounts.len(), "account cache refreshed");
                self.accounts = accounts.clone();
                self.last_refresh = Some(Instant::now());
                accounts
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load accounts");
                Vec::new()
            }
        }
    }

    /// True if the cache was never filled or the interval has elapsed
    pub fn needs_refresh(&self, now: Instant) -> bool {
        match self.last_refresh {
            None => true,
            Some(at) => now.saturating_duration_since(at) >= self.refresh_interval,
        }
    }

    /// Refreshes only when [`AccountCache::needs_refresh`] says so
    pub async fn refresh_if_stale(&mut self) -> bool {
        if self.needs_refresh(Instant::now()) {
            self.refresh().await;
            true
        } else {
            false
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Looks up an account by its number as typed by the user
    pub fn get(&self, account_no: &str) -> Option<&Account> {
        let wanted = account_no.trim();
        self.accounts
            .iter()
            .find(|acc| acc.account_no.to_string() == wanted)
    }

    /// `(value, label)` pairs for an account-number suggestion list
    pub fn options(&self) -> Vec<(String, String)> {
        self.accounts
            .iter()
            .map(|acc| (acc.account_no.to_string(), account_option_label(acc)))
            .collect()
    }

    /// Refreshes on every interval tick until `shutdown` flips to `true`
    ///
    /// The first refresh happens immediately.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("account refresh loop stopped");
                        break;
                    }
                }
            }
        }
    }
}
