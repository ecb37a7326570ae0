use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;

/// Modrinth asks API consumers to send an identifying user agent.
const APP_USER_AGENT: &str = concat!("mod-updater/", env!("CARGO_PKG_VERSION"));

pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(APP_USER_AGENT)
        .default_headers(default_headers)
        .build()
}

/// Fail with `UpdaterError::Api` unless the response is 2xx.
pub fn ensure_success(
    response: reqwest::Response,
) -> crate::core::error::UpdaterResult<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(crate::core::error::UpdaterError::Api {
            url: response.url().to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}
