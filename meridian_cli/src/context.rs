use std::time::Duration;

use meridian_routing::RequestContext;
use tracing::warn;

/// Context cancelled by Ctrl-C and bounded by `timeout`.
pub fn interactive_context(timeout: Duration) -> RequestContext {
    let (context, handle) = RequestContext::background().with_cancellation();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling request");
            handle.cancel();
        }
    });

    context.with_timeout(timeout)
}
