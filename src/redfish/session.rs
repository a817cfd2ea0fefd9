//! Authenticated Redfish session transport.
//!
//! Opens a token session against the iDRAC, resolves check paths against
//! the service root, and releases the session on logout. Every request gets
//! one transparent retry before the transport is declared dead.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::LOCATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::documents::FaultDocument;
use super::RedfishError;

const SERVICE_ROOT: &str = "/redfish/v1";
const SESSIONS_PATH: &str = "/redfish/v1/SessionService/Sessions";
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const USER_AGENT: &str = concat!("check-idrac/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "UserName")]
    user_name: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
}

/// An authenticated session against one iDRAC.
pub struct Session {
    client: Client,
    base: Url,
    token: String,
    session_uri: Option<String>,
    dump_to: Option<PathBuf>,
}

impl Session {
    /// Open a token session against the target controller.
    ///
    /// `host` may be a bare hostname/IP (https is assumed) or a full URL.
    /// When `dump_to` is set, every response body is written to that file
    /// as it arrives.
    pub async fn connect(
        host: &str,
        user: &str,
        password: &str,
        timeout: Duration,
        dump_to: Option<PathBuf>,
    ) -> Result<Self, RedfishError> {
        let base = parse_base_url(host)?;
        let client = Client::builder()
            // iDRACs ship self-signed certificates
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(RedfishError::Transport)?;

        let url = join(&base, SESSIONS_PATH)?;
        tracing::debug!(url = %url, user = %user, "opening Redfish session");

        let credentials = LoginRequest {
            user_name: user,
            password,
        };
        let response = send_with_retry(|| client.post(url.clone()).json(&credentials)).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(RedfishError::Transport)?;
            return Err(api_error(SESSIONS_PATH, status, &body));
        }

        let token = response
            .headers()
            .get(AUTH_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| RedfishError::Payload {
                endpoint: SESSIONS_PATH.to_string(),
                detail: "login response carries no X-Auth-Token header".to_string(),
            })?;
        let session_uri = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(Self {
            client,
            base,
            token,
            session_uri,
            dump_to,
        })
    }

    /// GET a resource and decode it.
    ///
    /// Paths already anchored at the service root (e.g. `@odata.id` values)
    /// are used as-is; everything else is resolved against it. Any status
    /// other than 200/206 is an API error carrying the remote's
    /// extended-info message.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RedfishError> {
        let url = join(&self.base, &service_path(path))?;
        tracing::debug!(url = %url, "GET");

        let response = send_with_retry(|| {
            self.client
                .get(url.clone())
                .header(AUTH_TOKEN_HEADER, &self.token)
        })
        .await?;
        let status = response.status();
        let body = response.text().await.map_err(RedfishError::Transport)?;

        if let Some(dump) = &self.dump_to {
            if let Err(e) = fs::write(dump, &body) {
                tracing::warn!(path = %dump.display(), error = %e, "failed to dump response");
            }
        }

        if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
            return Err(api_error(path, status, &body));
        }

        serde_json::from_str(&body).map_err(|e| RedfishError::Payload {
            endpoint: path.to_string(),
            detail: e.to_string(),
        })
    }

    /// Release the remote session.
    ///
    /// Failures are logged, never propagated: logout runs on every exit
    /// path and must not mask the check outcome. iDRAC expires abandoned
    /// sessions on its own after the idle timeout.
    pub async fn logout(self) {
        let Some(uri) = self.session_uri else {
            return;
        };
        let url = match self.base.join(&uri) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(uri = %uri, error = %e, "cannot resolve session URI for logout");
                return;
            }
        };
        match self
            .client
            .delete(url)
            .header(AUTH_TOKEN_HEADER, &self.token)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Redfish session released");
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "logout rejected");
            }
            Err(e) => {
                tracing::warn!(error = %e, "logout failed");
            }
        }
    }
}

/// One transparent retry per request before the transport is declared dead.
async fn send_with_retry<F>(build: F) -> Result<Response, RedfishError>
where
    F: Fn() -> RequestBuilder,
{
    match build().send().await {
        Ok(response) => Ok(response),
        Err(first) => {
            tracing::debug!(error = %first, "request failed, retrying once");
            build().send().await.map_err(RedfishError::Transport)
        }
    }
}

fn parse_base_url(host: &str) -> Result<Url, RedfishError> {
    let candidate = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    Url::parse(&candidate).map_err(|_| RedfishError::Host(host.to_string()))
}

/// Anchor a check path at the service root unless it already is.
fn service_path(path: &str) -> String {
    if path.starts_with(SERVICE_ROOT) {
        path.to_string()
    } else {
        format!("{SERVICE_ROOT}{path}")
    }
}

fn join(base: &Url, path: &str) -> Result<Url, RedfishError> {
    base.join(path).map_err(|e| RedfishError::Payload {
        endpoint: path.to_string(),
        detail: e.to_string(),
    })
}

fn api_error(endpoint: &str, status: StatusCode, body: &str) -> RedfishError {
    let message = serde_json::from_str::<FaultDocument>(body)
        .ok()
        .and_then(|fault| fault.first_message().map(str::to_string))
        .unwrap_or_else(|| "no error detail supplied".to_string());
    RedfishError::Api {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message,
    }
}
