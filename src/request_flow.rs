//! Single in-flight request state machine shared by the dashboard and chat.
//!
//! A flow is `Idle`, `Submitting`, `Succeeded(T)` or `Failed`. At most one
//! request runs at a time: `run` is a no-op while another one is in flight.
//! Entering `Submitting` clears any previous result. `cancel` aborts the
//! in-flight request and any late result is discarded.

use crate::api::ApiError;
use futures::future::{AbortHandle, AbortRegistration, Abortable};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};

/// Observable flow state.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState<T> {
    Idle,
    Submitting,
    Succeeded(T),
    Failed,
}

/// What a call to `run` did.
#[derive(Debug)]
pub enum Dispatch<T> {
    /// Another request was in flight; nothing was sent.
    Skipped,
    /// The value that was stored as the flow's result.
    Succeeded(T),
    Failed(ApiError),
    /// The flow was cancelled before the request settled.
    Cancelled,
}

impl<T> Dispatch<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Dispatch::Skipped)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Dispatch::Succeeded(_))
    }
}

#[derive(Debug)]
struct Inner<T> {
    state: FlowState<T>,
    /// Bumped on every submission and cancellation; a settling request only
    /// applies its outcome if the generation it started under is current.
    generation: u64,
    abort: Option<AbortHandle>,
}

/// Cloneable handle to one flow; clones share state.
#[derive(Debug)]
pub struct RequestFlow<T> {
    name: &'static str,
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for RequestFlow<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> RequestFlow<T> {
    /// `name` labels log lines.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(Inner {
                state: FlowState::Idle,
                generation: 0,
                abort: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.lock().state, FlowState::Submitting)
    }

    /// Abort the in-flight request, if any, and return to `Idle`.
    ///
    /// Settled states are left alone.
    pub fn cancel(&self) {
        let mut inner = self.lock();
        inner.generation += 1;

        if let Some(handle) = inner.abort.take() {
            handle.abort();
        }
        if matches!(inner.state, FlowState::Submitting) {
            info!("{}: in-flight request cancelled", self.name);
            inner.state = FlowState::Idle;
        }
    }

    /// Claim the flow for one request, moving it to `Submitting`.
    ///
    /// `None` while another request is in flight. Dropping the ticket
    /// without running it returns the flow to `Idle`.
    pub fn reserve(&self) -> Option<Ticket<'_, T>> {
        let mut inner = self.lock();
        if matches!(inner.state, FlowState::Submitting) {
            debug!("{}: request already in flight, skipping", self.name);
            return None;
        }

        let (handle, registration) = AbortHandle::new_pair();
        inner.generation += 1;
        inner.state = FlowState::Submitting;
        inner.abort = Some(handle);

        Some(Ticket {
            guard: SettleGuard {
                flow: self,
                generation: inner.generation,
                armed: true,
            },
            registration,
        })
    }
}

impl<T: Clone> RequestFlow<T> {
    /// Run `request` unless one is already in flight.
    ///
    /// `request` is not polled when the call is skipped, so no I/O happens.
    pub async fn run<Fut>(&self, request: Fut) -> Dispatch<T>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match self.reserve() {
            Some(ticket) => ticket.run(request).await,
            None => Dispatch::Skipped,
        }
    }

    pub fn state(&self) -> FlowState<T> {
        self.lock().state.clone()
    }

    /// The last successful result, if the flow is in `Succeeded`.
    pub fn result(&self) -> Option<T> {
        match &self.lock().state {
            FlowState::Succeeded(value) => Some(value.clone()),
            _ => None,
        }
    }
}

/// Exclusive right to run the next request of a flow.
pub struct Ticket<'a, T> {
    guard: SettleGuard<'a, T>,
    registration: AbortRegistration,
}

impl<T: Clone> Ticket<'_, T> {
    /// Await `request` and settle the flow with its outcome.
    ///
    /// A success is both stored as the flow's result and returned, so the
    /// caller never has to read it back.
    pub async fn run<Fut>(self, request: Fut) -> Dispatch<T>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let Ticket {
            mut guard,
            registration,
        } = self;

        let outcome = Abortable::new(request, registration).await;
        guard.armed = false;

        let flow = guard.flow;
        let mut inner = flow.lock();
        let Ok(result) = outcome else {
            return Dispatch::Cancelled;
        };
        if inner.generation != guard.generation {
            debug!("{}: discarding result of a cancelled request", flow.name);
            return Dispatch::Cancelled;
        }

        inner.abort = None;
        match result {
            Ok(value) => {
                info!("{}: request succeeded", flow.name);
                inner.state = FlowState::Succeeded(value.clone());
                Dispatch::Succeeded(value)
            }
            Err(e) => {
                error!("{}: request failed: {}", flow.name, e);
                inner.state = FlowState::Failed;
                Dispatch::Failed(e)
            }
        }
    }
}

/// Returns the flow to `Idle` if a reserved request never settles, i.e. the
/// ticket or its `run` future is dropped.
struct SettleGuard<'a, T> {
    flow: &'a RequestFlow<T>,
    generation: u64,
    armed: bool,
}

impl<T> Drop for SettleGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut inner = self.flow.lock();
        if inner.generation == self.generation && matches!(inner.state, FlowState::Submitting) {
            debug!("{}: request dropped before settling", self.flow.name);
            inner.state = FlowState::Idle;
            inner.abort = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    fn failure() -> ApiError {
        ApiError::Malformed("bad".to_string())
    }

    // ==================== Transition Tests ====================

    #[tokio::test]
    async fn test_starts_idle() {
        let flow: RequestFlow<u32> = RequestFlow::new("test");
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(!flow.is_in_flight());
        assert_eq!(flow.result(), None);
    }

    #[tokio::test]
    async fn test_success_stores_result() {
        let flow = RequestFlow::new("test");

        let dispatch = flow.run(async { Ok(42u32) }).await;
        assert!(matches!(dispatch, Dispatch::Succeeded(42)));
        assert_eq!(flow.state(), FlowState::Succeeded(42));
        assert_eq!(flow.result(), Some(42));
    }

    #[tokio::test]
    async fn test_failure_returns_error_and_clears_result() {
        let flow = RequestFlow::new("test");
        flow.run(async { Ok(1u32) }).await;

        let dispatch = flow.run(async { Err(failure()) }).await;
        assert!(matches!(dispatch, Dispatch::Failed(ApiError::Malformed(_))));
        assert_eq!(flow.state(), FlowState::Failed);
        assert_eq!(flow.result(), None);
    }

    #[tokio::test]
    async fn test_previous_result_cleared_while_submitting() {
        let flow = RequestFlow::new("test");
        flow.run(async { Ok(1u32) }).await;

        let observer = flow.clone();
        let (_, seen) = tokio::join!(
            flow.run(async {
                sleep(Duration::from_millis(50)).await;
                Ok(2u32)
            }),
            async move {
                sleep(Duration::from_millis(10)).await;
                observer.state()
            }
        );

        assert_eq!(seen, FlowState::Submitting);
        assert_eq!(flow.result(), Some(2));
    }

    // ==================== Exclusivity Tests ====================

    #[tokio::test]
    async fn test_second_run_is_skipped_while_in_flight() {
        let flow = RequestFlow::new("test");
        let polled = AtomicUsize::new(0);

        let (first, second) = tokio::join!(
            flow.run(async {
                polled.fetch_add(1, Ordering::SeqCst);
                sleep(Duration::from_millis(50)).await;
                Ok(1u32)
            }),
            async {
                sleep(Duration::from_millis(10)).await;
                flow.run(async {
                    polled.fetch_add(1, Ordering::SeqCst);
                    Ok(2u32)
                })
                .await
            }
        );

        assert!(matches!(first, Dispatch::Succeeded(1)));
        assert!(second.is_skipped());
        assert_eq!(polled.load(Ordering::SeqCst), 1);
        assert_eq!(flow.result(), Some(1));
    }

    #[tokio::test]
    async fn test_can_resubmit_after_failure() {
        let flow = RequestFlow::new("test");
        flow.run(async { Err(failure()) }).await;

        let dispatch = flow.run(async { Ok(5u32) }).await;
        assert!(dispatch.is_succeeded());
    }

    // ==================== Cancellation Tests ====================

    #[tokio::test]
    async fn test_cancel_discards_in_flight_request() {
        let flow = RequestFlow::new("test");
        let canceller = flow.clone();

        let (dispatch, _) = tokio::join!(
            flow.run(async {
                sleep(Duration::from_secs(5)).await;
                Ok(1u32)
            }),
            async move {
                sleep(Duration::from_millis(10)).await;
                canceller.cancel();
            }
        );

        assert!(matches!(dispatch, Dispatch::Cancelled));
        assert_eq!(flow.state(), FlowState::Idle);
    }

    #[tokio::test]
    async fn test_cancel_keeps_settled_result() {
        let flow = RequestFlow::new("test");
        flow.run(async { Ok(3u32) }).await;

        flow.cancel();
        assert_eq!(flow.result(), Some(3));
    }

    #[tokio::test]
    async fn test_dropped_run_returns_to_idle() {
        let flow: RequestFlow<u32> = RequestFlow::new("test");

        let timed_out = tokio::time::timeout(
            Duration::from_millis(10),
            flow.run(async {
                sleep(Duration::from_secs(5)).await;
                Ok(1u32)
            }),
        )
        .await;

        assert!(timed_out.is_err());
        assert!(!flow.is_in_flight());
        assert_eq!(flow.state(), FlowState::Idle);
    }

    // ==================== Reservation Tests ====================

    #[tokio::test]
    async fn test_reserve_is_exclusive() {
        let flow: RequestFlow<u32> = RequestFlow::new("test");

        let ticket = flow.reserve().expect("idle flow can be reserved");
        assert!(flow.is_in_flight());
        assert!(flow.reserve().is_none());
        assert!(flow.run(async { Ok(9u32) }).await.is_skipped());

        let dispatch = ticket.run(async { Ok(4u32) }).await;
        assert!(matches!(dispatch, Dispatch::Succeeded(4)));
        assert_eq!(flow.result(), Some(4));
    }

    #[tokio::test]
    async fn test_unused_ticket_returns_to_idle() {
        let flow: RequestFlow<u32> = RequestFlow::new("test");
        flow.run(async { Ok(1u32) }).await;

        drop(flow.reserve());

        assert_eq!(flow.state(), FlowState::Idle);
        assert!(flow.reserve().is_some());
    }

    #[tokio::test]
    async fn test_success_value_survives_a_later_submission() {
        let flow = RequestFlow::new("test");

        let dispatch = flow.run(async { Ok(7u32) }).await;
        let _next = flow.reserve();

        // The flow's stored result is gone, the dispatched value is not.
        assert_eq!(flow.result(), None);
        assert!(matches!(dispatch, Dispatch::Succeeded(7)));
    }
}
