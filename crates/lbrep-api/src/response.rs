// Response handling shared by the Neutron and Octavia clients.
//
// Both services answer with plain JSON on success. Errors come in two
// shapes: Neutron wraps them as `{"NeutronError": {"type", "message"}}`,
// Octavia (a WSME app) as `{"faultcode", "faultstring", "debuginfo"}`.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::Error;

const PREVIEW_LEN: usize = 200;

#[derive(Deserialize)]
struct NeutronErrorBody {
    #[serde(rename = "NeutronError")]
    neutron_error: NeutronError,
}

#[derive(Deserialize)]
struct NeutronError {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct FaultBody {
    faultstring: String,
}

/// First few hundred characters of a body, cut on a char boundary.
pub(crate) fn preview(body: &str) -> &str {
    match body.char_indices().nth(PREVIEW_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Map a `send()` failure, surfacing timeouts as their own variant.
pub(crate) fn send_error(err: reqwest::Error, timeout_secs: u64) -> Error {
    if err.is_timeout() {
        Error::Timeout { timeout_secs }
    } else {
        Error::Transport(err)
    }
}

/// Decode a successful JSON body or turn a failed response into `Error::Api`.
pub(crate) async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp.text().await?;

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication {
            message: format!("token rejected (HTTP {status})"),
        });
    }

    if !status.is_success() {
        return Err(api_error(status.as_u16(), body));
    }

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

/// Build `Error::Api` from a failed response body, extracting the service's
/// own message where the body has a recognisable shape.
pub(crate) fn api_error(status: u16, body: String) -> Error {
    let message = if let Ok(err) = serde_json::from_str::<NeutronErrorBody>(&body) {
        let inner = err.neutron_error;
        match (inner.kind, inner.message) {
            (Some(kind), Some(msg)) => format!("{kind}: {msg}"),
            (None, Some(msg)) => msg,
            (Some(kind), None) => kind,
            (None, None) => format!("HTTP {status}"),
        }
    } else if let Ok(fault) = serde_json::from_str::<FaultBody>(&body) {
        fault.faultstring
    } else if body.is_empty() {
        format!("HTTP {status}")
    } else {
        preview(&body).to_owned()
    };

    Error::Api {
        status,
        message,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutron_error_message_is_extracted() {
        let body = r#"{"NeutronError": {"type": "EntityNotFound", "message": "Pool p1 could not be found", "detail": ""}}"#;
        match api_error(404, body.into()) {
            Error::Api {
                status, message, ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "EntityNotFound: Pool p1 could not be found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn octavia_fault_keeps_raw_body() {
        let body = r#"{"faultcode": "Client", "faultstring": "Invalid input for field/attribute vip_subnet_id", "debuginfo": null}"#;
        match api_error(400, body.into()) {
            Error::Api { message, body, .. } => {
                assert!(message.starts_with("Invalid input"));
                assert!(body.contains("faultcode"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "é".repeat(PREVIEW_LEN + 10);
        assert_eq!(preview(&body).chars().count(), PREVIEW_LEN);
        assert_eq!(preview("short"), "short");
    }
}
