use serde::de::DeserializeOwned;

use crate::{config::ProviderConfig, error::ProviderError};

pub(crate) fn build_client(config: &ProviderConfig) -> Result<reqwest::Client, ProviderError> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()?;

    Ok(client)
}

/// Reads the body of `response`, mapping non-2xx statuses to [`ProviderError::Api`].
pub(crate) async fn read_json<T>(response: reqwest::Response) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: text,
        });
    }

    Ok(serde_json::from_str(&text)?)
}

pub(crate) fn join_pipe<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join("|")
}
