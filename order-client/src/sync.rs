//! Order synchronization - polling loop and status mutations
//!
//! Keeps a local copy of the server's order list for the dashboard:
//!
//! ```text
//! start() ──► fetch now ──► every poll_interval: fetch ──► replace orders
//! refresh() ─────────────────────────────────────────────► replace orders
//! change_status(id) ──► PATCH ──► patch the one entry
//! ```
//!
//! Polling and mutations are independent tasks. A poll that lands after a
//! mutation wins; the next tick reconciles. Every state change bumps a
//! revision on a `watch` channel so renderers redraw on change.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared::models::{Order, OrderStatus};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::client::OrdersApi;
use crate::config::{ClientConfig, DEFAULT_POLL_INTERVAL};
use crate::ClientResult;

/// Local view of the server's orders
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    /// Last fetched list, patched by successful mutations
    pub orders: Vec<Order>,
    /// Message of the last failed call, cleared by the next success
    pub error: Option<String>,
    /// Time of the last successful list fetch
    pub last_refresh: Option<DateTime<Utc>>,
    /// List fetches outstanding (timer and manual refreshes may overlap)
    pub(crate) loading: usize,
    /// Status changes outstanding, per order id
    pub(crate) in_flight: HashMap<u64, usize>,
}

impl SyncState {
    /// At least one list fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.loading > 0
    }

    /// At least one status change for `id` is outstanding
    pub fn is_updating(&self, id: u64) -> bool {
        self.in_flight.contains_key(&id)
    }

    /// Nothing is outstanding
    pub fn is_idle(&self) -> bool {
        self.loading == 0 && self.in_flight.is_empty()
    }
}

struct Inner<A> {
    api: A,
    state: RwLock<SyncState>,
    revision: watch::Sender<u64>,
    poll_interval: Duration,
}

impl<A> Inner<A> {
    /// Mutate state and publish a new revision; the lock is released before
    /// notifying
    fn update(&self, f: impl FnOnce(&mut SyncState)) {
        f(&mut self.state.write());
        self.revision.send_modify(|rev| *rev += 1);
    }
}

/// Counts one outstanding fetch; released even if the fetch future is
/// dropped mid-flight
struct LoadingGuard<'a, A>(&'a Inner<A>);

impl<'a, A> LoadingGuard<'a, A> {
    fn acquire(inner: &'a Inner<A>) -> Self {
        inner.update(|s| s.loading += 1);
        Self(inner)
    }
}

impl<A> Drop for LoadingGuard<'_, A> {
    fn drop(&mut self) {
        self.0.update(|s| s.loading = s.loading.saturating_sub(1));
    }
}

/// Counts one outstanding change for an order id
struct InFlightGuard<'a, A> {
    inner: &'a Inner<A>,
    id: u64,
}

impl<'a, A> InFlightGuard<'a, A> {
    fn acquire(inner: &'a Inner<A>, id: u64) -> Self {
        inner.update(|s| *s.in_flight.entry(id).or_default() += 1);
        Self { inner, id }
    }
}

impl<A> Drop for InFlightGuard<'_, A> {
    fn drop(&mut self) {
        let id = self.id;
        self.inner.update(|s| {
            if let Some(count) = s.in_flight.get_mut(&id) {
                *count -= 1;
                if *count == 0 {
                    s.in_flight.remove(&id);
                }
            }
        });
    }
}

/// Polling order synchronizer
pub struct OrderSync<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for OrderSync<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: OrdersApi + 'static> OrderSync<A> {
    /// Synchronizer polling every 7 seconds
    pub fn new(api: A) -> Self {
        Self::with_interval(api, DEFAULT_POLL_INTERVAL)
    }

    pub fn from_config(api: A, config: &ClientConfig) -> Self {
        Self::with_interval(api, config.poll_interval)
    }

    pub fn with_interval(api: A, poll_interval: Duration) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                api,
                state: RwLock::new(SyncState::default()),
                revision,
                poll_interval,
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SyncState {
        self.inner.state.read().clone()
    }

    /// Receiver that changes on every state update
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Fetch the full list and replace local state
    ///
    /// Failures are recorded in [`SyncState::error`] and also returned.
    pub async fn refresh(&self) -> ClientResult<()> {
        let inner = &*self.inner;
        let _loading = LoadingGuard::acquire(inner);

        match inner.api.list_orders().await {
            Ok(orders) => {
                tracing::debug!(count = orders.len(), "Orders refreshed");
                inner.update(|s| {
                    s.orders = orders;
                    s.last_refresh = Some(Utc::now());
                    s.error = None;
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Order refresh failed");
                inner.update(|s| s.error = Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Send one status change and patch the affected entry with the
    /// server's answer
    ///
    /// On failure the entry is left untouched and the error recorded.
    pub async fn change_status(&self, id: u64, status: OrderStatus) -> ClientResult<Order> {
        let inner = &*self.inner;
        let _in_flight = InFlightGuard::acquire(inner, id);

        match inner.api.update_status(id, status).await {
            Ok(order) => {
                tracing::info!(order_id = id, %status, "Order status changed");
                inner.update(|s| {
                    if let Some(entry) = s.orders.iter_mut().find(|o| o.id == id) {
                        *entry = order.clone();
                    }
                    s.error = None;
                });
                Ok(order)
            }
            Err(e) => {
                tracing::warn!(order_id = id, %status, error = %e, "Order status change failed");
                inner.update(|s| s.error = Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Fetch now, then every poll interval until the handle is stopped or
    /// dropped
    pub fn start(&self) -> SyncHandle {
        let token = CancellationToken::new();
        let sync = self.clone();
        let cancel = token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sync.poll_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::debug!(interval_ms = sync.poll_interval().as_millis() as u64, "Order polling started");

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    // errors are already recorded in state
                    _ = sync.refresh() => {}
                }
            }

            tracing::debug!("Order polling stopped");
        });

        SyncHandle {
            token,
            task: Some(task),
        }
    }
}

/// Running polling loop; stops when dropped
pub struct SyncHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SyncHandle {
    /// Cancel the timer and any fetch it has outstanding
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Stop and wait for the polling task to exit
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use async_trait::async_trait;
    use shared::models::CreateOrderRequest;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn order(id: u64, status: OrderStatus) -> Order {
        Order {
            id,
            customer_name: format!("Customer {id}"),
            contact_number: "5550001".into(),
            description: "burger".into(),
            total: 10.0,
            status,
            created_at: Utc::now(),
        }
    }

    /// Scripted server: list answers come from `lists`, the last one repeats
    #[derive(Default)]
    struct FakeApi {
        lists: parking_lot::Mutex<Vec<Vec<Order>>>,
        list_calls: AtomicUsize,
        fail: AtomicBool,
        gate: Option<Arc<tokio::sync::Notify>>,
        list_delay: Option<Duration>,
        update_delay: Option<Duration>,
    }

    impl FakeApi {
        fn with_lists(lists: Vec<Vec<Order>>) -> Self {
            Self {
                lists: parking_lot::Mutex::new(lists),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl OrdersApi for FakeApi {
        async fn list_orders(&self) -> ClientResult<Vec<Order>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.list_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(ClientError::Internal("server down".into()));
            }
            let mut lists = self.lists.lock();
            if lists.len() > 1 {
                Ok(lists.remove(0))
            } else {
                Ok(lists.first().cloned().unwrap_or_default())
            }
        }

        async fn create_order(&self, _req: &CreateOrderRequest) -> ClientResult<Order> {
            unimplemented!()
        }

        async fn update_status(&self, id: u64, status: OrderStatus) -> ClientResult<Order> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if let Some(delay) = self.update_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(ClientError::Api {
                    code: 4001,
                    message: format!("Order {id} not found"),
                    details: None,
                });
            }
            Ok(order(id, status))
        }

        async fn delete_order(&self, _id: u64) -> ClientResult<Order> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_orders() {
        let sync = OrderSync::new(FakeApi::with_lists(vec![
            vec![order(1, OrderStatus::Pending)],
            vec![order(2, OrderStatus::EnRoute), order(3, OrderStatus::Pending)],
        ]));

        sync.refresh().await.unwrap();
        assert_eq!(sync.snapshot().orders.len(), 1);

        sync.refresh().await.unwrap();
        let state = sync.snapshot();
        assert_eq!(
            state.orders.iter().map(|o| o.id).collect::<Vec<_>>(),
            vec![2, 3]
        );
        assert!(state.last_refresh.is_some());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_failed_refresh_sets_error_then_success_clears_it() {
        let sync = OrderSync::new(FakeApi::with_lists(vec![vec![order(1, OrderStatus::Pending)]]));
        sync.refresh().await.unwrap();

        sync.api().fail.store(true, Ordering::SeqCst);
        assert!(sync.refresh().await.is_err());
        let state = sync.snapshot();
        assert!(state.error.as_deref().unwrap().contains("server down"));
        // previous data kept
        assert_eq!(state.orders.len(), 1);
        assert!(!state.is_loading());

        sync.api().fail.store(false, Ordering::SeqCst);
        sync.refresh().await.unwrap();
        assert!(sync.snapshot().error.is_none());
    }

    #[tokio::test]
    async fn test_change_status_patches_only_that_entry() {
        let sync = OrderSync::new(FakeApi::with_lists(vec![vec![
            order(1, OrderStatus::Pending),
            order(2, OrderStatus::Pending),
        ]]));
        sync.refresh().await.unwrap();

        let updated = sync.change_status(1, OrderStatus::EnRoute).await.unwrap();
        assert_eq!(updated.status, OrderStatus::EnRoute);

        let state = sync.snapshot();
        assert_eq!(state.orders[0].status, OrderStatus::EnRoute);
        assert_eq!(state.orders[1].status, OrderStatus::Pending);
        assert!(!state.is_updating(1));
    }

    #[tokio::test]
    async fn test_failed_change_leaves_entry_and_reports() {
        let sync = OrderSync::new(FakeApi::with_lists(vec![vec![order(1, OrderStatus::Pending)]]));
        sync.refresh().await.unwrap();
        sync.api().fail.store(true, Ordering::SeqCst);

        let err = sync.change_status(1, OrderStatus::Delivered).await.unwrap_err();
        assert_eq!(err.code(), Some(4001));

        let state = sync.snapshot();
        assert_eq!(state.orders[0].status, OrderStatus::Pending);
        assert_eq!(state.error.as_deref(), Some("Order 1 not found (code 4001)"));
        assert!(!state.is_updating(1));
    }

    #[tokio::test]
    async fn test_in_flight_while_mutation_outstanding() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let api = FakeApi {
            lists: parking_lot::Mutex::new(vec![vec![order(1, OrderStatus::Pending)]]),
            gate: Some(gate.clone()),
            ..Default::default()
        };
        let sync = OrderSync::new(api);
        sync.refresh().await.unwrap();

        let pending = tokio::spawn({
            let sync = sync.clone();
            async move { sync.change_status(1, OrderStatus::EnRoute).await }
        });

        let mut rx = sync.subscribe();
        while !sync.snapshot().is_updating(1) {
            rx.changed().await.unwrap();
        }

        gate.notify_one();
        pending.await.unwrap().unwrap();
        assert!(sync.snapshot().is_idle());
    }

    #[tokio::test]
    async fn test_revision_bumps_on_change() {
        let sync = OrderSync::new(FakeApi::default());
        let rx = sync.subscribe();
        let before = *rx.borrow();
        sync.refresh().await.unwrap();
        assert!(*rx.borrow() > before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_fetches_on_start_and_every_interval() {
        let sync = OrderSync::new(FakeApi::with_lists(vec![
            vec![order(1, OrderStatus::Pending)],
            vec![order(1, OrderStatus::EnRoute), order(2, OrderStatus::Pending)],
            vec![
                order(1, OrderStatus::Delivered),
                order(2, OrderStatus::EnRoute),
                order(3, OrderStatus::Pending),
            ],
        ]));
        let handle = sync.start();

        // mount fetch
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(sync.api().list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(sync.snapshot().orders.len(), 1);

        tokio::time::sleep(Duration::from_millis(7_000)).await;
        assert_eq!(sync.api().list_calls.load(Ordering::SeqCst), 2);
        assert_eq!(sync.snapshot().orders.len(), 2);

        tokio::time::sleep(Duration::from_millis(7_000)).await;
        assert_eq!(sync.api().list_calls.load(Ordering::SeqCst), 3);
        let state = sync.snapshot();
        assert_eq!(state.orders.len(), 3);
        assert_eq!(state.orders[0].status, OrderStatus::Delivered);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_polling() {
        let sync = OrderSync::new(FakeApi::default());
        let handle = sync.start();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(sync.api().list_calls.load(Ordering::SeqCst), 1);

        drop(handle);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(sync.api().list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_refresh_is_independent_of_timer() {
        let sync = OrderSync::new(FakeApi::default());
        let handle = sync.start();
        tokio::time::sleep(Duration::from_millis(10)).await;

        sync.refresh().await.unwrap();
        sync.refresh().await.unwrap();
        assert_eq!(sync.api().list_calls.load(Ordering::SeqCst), 3);

        // next tick still lands 7s after start
        tokio::time::sleep(Duration::from_millis(7_000)).await;
        assert_eq!(sync.api().list_calls.load(Ordering::SeqCst), 4);

        handle.stop();
        assert!(handle.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_fetch_and_changes_stay_tracked() {
        let sync = OrderSync::new(FakeApi {
            lists: parking_lot::Mutex::new(vec![vec![order(1, OrderStatus::Pending)]]),
            list_delay: Some(Duration::from_millis(100)),
            update_delay: Some(Duration::from_millis(100)),
            ..Default::default()
        });

        // t=0: refresh A, change A
        let refresh_a = tokio::spawn({
            let sync = sync.clone();
            async move { sync.refresh().await }
        });
        let change_a = tokio::spawn({
            let sync = sync.clone();
            async move { sync.change_status(1, OrderStatus::EnRoute).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(sync.snapshot().is_loading());
        assert!(sync.snapshot().is_updating(1));

        // t=50: refresh B, change B on the same order
        let refresh_b = tokio::spawn({
            let sync = sync.clone();
            async move { sync.refresh().await }
        });
        let change_b = tokio::spawn({
            let sync = sync.clone();
            async move { sync.change_status(1, OrderStatus::Delivered).await }
        });

        // t=110: A finished, B still outstanding
        tokio::time::sleep(Duration::from_millis(60)).await;
        refresh_a.await.unwrap().unwrap();
        change_a.await.unwrap().unwrap();
        let state = sync.snapshot();
        assert!(state.is_loading());
        assert!(state.is_updating(1));
        let view = crate::DashboardView::from_state(&state);
        assert!(!view.row(1).unwrap().can_mark_delivered);

        // t=160: everything settled
        tokio::time::sleep(Duration::from_millis(50)).await;
        refresh_b.await.unwrap().unwrap();
        change_b.await.unwrap().unwrap();
        let state = sync.snapshot();
        assert!(state.is_idle());
        assert!(!state.is_loading());
        assert!(!state.is_updating(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dashboard_counts_follow_latest_fetch() {
        let latest = vec![
            order(1, OrderStatus::Delivered),
            order(2, OrderStatus::EnRoute),
            order(3, OrderStatus::EnRoute),
            order(4, OrderStatus::Pending),
        ];
        let sync = OrderSync::new(FakeApi::with_lists(vec![
            vec![order(1, OrderStatus::Pending)],
            vec![order(1, OrderStatus::EnRoute), order(2, OrderStatus::Pending)],
            latest.clone(),
        ]));
        let handle = sync.start();

        tokio::time::sleep(Duration::from_millis(10)).await;
        tokio::time::sleep(Duration::from_millis(7_000)).await;
        tokio::time::sleep(Duration::from_millis(7_000)).await;
        assert_eq!(sync.api().list_calls.load(Ordering::SeqCst), 3);

        let view = crate::DashboardView::from_state(&sync.snapshot());
        assert_eq!(view.counts, crate::StatusCounts::from_orders(&latest));
        assert_eq!(view.counts.en_route, 2);
        assert_eq!(view.total_orders(), latest.len());

        handle.shutdown().await;
    }
}
