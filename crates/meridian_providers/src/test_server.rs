use std::time::Duration;

use crate::config::ProviderConfig;

/// Nothing listens on the discard port, so connections are refused at once.
pub(crate) const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

/// Serves `router` on an ephemeral local port and returns its base url.
pub(crate) async fn serve(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

pub(crate) fn test_config(base_url: &str) -> ProviderConfig {
    ProviderConfig {
        ors_url: base_url.to_owned(),
        ors_api_key: "test-key".to_owned(),
        roads_url: base_url.to_owned(),
        roads_api_key: "test-key".to_owned(),
        nominatim_url: base_url.to_owned(),
        timeout: Duration::from_secs(2),
        ..Default::default()
    }
}
