use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::{next_event, release};
use crate::errors::{Error, Result};
use crate::subscriptions::{SnapshotEvent, Subscription};
use crate::transactions::{
    CategorySlice, Transaction, TransactionFilter, TransactionServiceTrait, TransactionSummary,
};
use crate::users::{Session, UserProfile, UserServiceTrait};

/// Derived state of the home screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeState {
    /// Balance over every transaction, read once per attach and independent
    /// of the active filter.
    pub total_balance: Decimal,
    /// Visible (filtered) transactions, most recent first.
    pub transactions: Vec<Transaction>,
    /// Reduction of the visible transactions.
    pub summary: TransactionSummary,
    pub chart: Vec<CategorySlice>,
    /// Categories offered by the filter picker.
    pub known_categories: BTreeSet<String>,
    pub profile: Option<UserProfile>,
    /// Message of the last subscription failure, until the next attach.
    pub error: Option<String>,
}

impl HomeState {
    fn apply_transactions(&mut self, transactions: Vec<Transaction>) {
        let summary = TransactionSummary::from_transactions(&transactions);
        self.known_categories
            .extend(summary.categories.iter().cloned());
        self.chart = summary.chart_slices();
        self.summary = summary;
        self.transactions = transactions;
    }

    fn clear_transactions(&mut self) {
        self.transactions.clear();
        self.summary = TransactionSummary::default();
        self.chart.clear();
    }
}

/// What changed after [`HomeFeed::next_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeUpdate {
    Transactions,
    Profile,
}

/// Owns the home screen's derived state and its live subscriptions.
pub struct HomeFeed {
    session: Session,
    transaction_service: Arc<dyn TransactionServiceTrait>,
    user_service: Arc<dyn UserServiceTrait>,
    filter: TransactionFilter,
    state: HomeState,
    transactions: Option<Subscription<Transaction>>,
    profile: Option<Subscription<UserProfile>>,
}

impl HomeFeed {
    pub fn new(
        session: Session,
        transaction_service: Arc<dyn TransactionServiceTrait>,
        user_service: Arc<dyn UserServiceTrait>,
    ) -> Self {
        Self {
            session,
            transaction_service,
            user_service,
            filter: TransactionFilter::all(),
            state: HomeState::default(),
            transactions: None,
            profile: None,
        }
    }

    pub fn state(&self) -> &HomeState {
        &self.state
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    pub fn is_attached(&self) -> bool {
        self.transactions.is_some() || self.profile.is_some()
    }

    /// Reads the unfiltered balance once and subscribes to the filtered
    /// transaction list and the profile. Attaching again first releases the
    /// previous subscriptions and starts from a clean state. A failed attach
    /// holds no subscription.
    pub fn attach(&mut self) -> Result<()> {
        self.detach();
        self.state = HomeState::default();

        let overall = self
            .transaction_service
            .summarize(&self.session, &TransactionFilter::all())?;
        self.state.total_balance = overall.balance;
        self.state.known_categories = overall.categories;

        self.transactions = Some(
            self.transaction_service
                .subscribe_transactions(&self.session, self.filter.clone())?,
        );
        match self.user_service.subscribe_profile(&self.session) {
            Ok(profile) => self.profile = Some(profile),
            Err(e) => {
                warn!("Profile subscription for {} failed: {}", self.session.user_id(), e);
                self.detach();
                return Err(e);
            }
        }
        debug!("Home feed attached for {}", self.session.user_id());
        Ok(())
    }

    /// Releases both subscriptions. The derived state is kept for display.
    pub fn detach(&mut self) {
        if self.is_attached() {
            debug!("Home feed detached for {}", self.session.user_id());
        }
        release(&mut self.transactions);
        release(&mut self.profile);
    }

    /// Replaces the filter, re-attaching when currently attached.
    pub fn set_filter(&mut self, filter: TransactionFilter) -> Result<()> {
        self.filter = filter;
        if self.is_attached() {
            self.attach()?;
        }
        Ok(())
    }

    /// Waits for the next emission and folds it into the state.
    ///
    /// Returns `None` when nothing is attached. A failed transaction stream
    /// empties the list and is released; it stays empty until the next
    /// [`attach`](Self::attach).
    pub async fn next_update(&mut self) -> Option<Result<HomeUpdate>> {
        loop {
            if !self.is_attached() {
                return None;
            }
            tokio::select! {
                event = next_event(&mut self.transactions) => match event {
                    Some(SnapshotEvent::Snapshot(items)) => {
                        self.state.apply_transactions(items);
                        return Some(Ok(HomeUpdate::Transactions));
                    }
                    Some(SnapshotEvent::Failed(message)) => {
                        warn!("Transaction subscription failed: {}", message);
                        release(&mut self.transactions);
                        self.state.clear_transactions();
                        self.state.error = Some(message.clone());
                        return Some(Err(Error::Subscription(message)));
                    }
                    None => self.transactions = None,
                },
                event = next_event(&mut self.profile) => match event {
                    Some(SnapshotEvent::Snapshot(profiles)) => {
                        self.state.profile = profiles.into_iter().next();
                        return Some(Ok(HomeUpdate::Profile));
                    }
                    Some(SnapshotEvent::Failed(message)) => {
                        warn!("Profile subscription failed: {}", message);
                        release(&mut self.profile);
                        self.state.error = Some(message.clone());
                        return Some(Err(Error::Subscription(message)));
                    }
                    None => self.profile = None,
                },
            }
        }
    }
}

impl Drop for HomeFeed {
    fn drop(&mut self) {
        self.detach();
    }
}
