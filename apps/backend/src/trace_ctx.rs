//! Per-request trace id, carried in a Tokio task-local so error mappers and
//! adapters can tag logs and problem details without threading it through.

use std::cell::RefCell;
use std::future::Future;

use tokio::task_local;

/// Value reported when no request scope is active (background tasks, tests).
pub const NO_TRACE: &str = "unknown";

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| cell.borrow().clone())
        .ok()
        .flatten()
        .unwrap_or_else(|| NO_TRACE.to_string())
}

/// Run `future` with `trace_id` visible to [`trace_id`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn falls_back_outside_a_request() {
        assert_eq!(trace_id(), NO_TRACE);
    }

    #[tokio::test]
    async fn scope_is_visible_across_awaits_and_ends_with_the_future() {
        let seen = with_trace_id("req-42".into(), async {
            tokio::task::yield_now().await;
            trace_id()
        })
        .await;

        assert_eq!(seen, "req-42");
        assert_eq!(trace_id(), NO_TRACE);
    }

    #[tokio::test]
    async fn spawned_tasks_do_not_inherit_the_scope() {
        let inner = with_trace_id("req-7".into(), async {
            tokio::spawn(async { trace_id() }).await.unwrap()
        })
        .await;

        assert_eq!(inner, NO_TRACE);
    }
}
