use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::state::SharedState;
use crate::submission::metadata::{self, ClientInfo};
use crate::submission::{parser, Submission};

/// Body of every reply from the relay endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayReply {
    pub success: bool,
}

impl IntoResponse for RelayReply {
    fn into_response(self) -> Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(self)).into_response()
    }
}

pub async fn submit_form(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> RelayReply {
    let client = metadata::extract(&headers, Some(addr.ip()), &state.config.trusted_proxies);
    let span = tracing::info_span!("relay", relay_id = %Uuid::now_v7(), client_ip = %client.ip);

    async move {
        let submission = match read_submission(&headers, body).await {
            Ok(submission) => submission,
            Err(e) => {
                tracing::warn!("Discarding malformed submission: {e}");
                return RelayReply { success: false };
            }
        };

        relay(&state, &client, &submission).await
    }
    .instrument(span)
    .await
}

async fn read_submission(
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Submission, String> {
    let body = body.map_err(|e| e.body_text())?;
    parser::parse_request(headers, body).await
}

async fn relay(state: &SharedState, client: &ClientInfo, submission: &Submission) -> RelayReply {
    tracing::debug!(
        fields = submission.len(),
        user_agent = %client.user_agent,
        referer = %client.referer,
        target = state.relay.target(),
        "Forwarding submission"
    );

    match state.relay.forward(submission).await {
        Ok(outcome) if outcome.is_accepted() => {
            tracing::info!(status = outcome.status_code, "Submission relayed");
            RelayReply { success: true }
        }
        Ok(outcome) => {
            tracing::warn!(status = outcome.status_code, "Relay target rejected submission");
            RelayReply { success: false }
        }
        Err(e) => {
            tracing::warn!("Relay failed: {e}");
            RelayReply { success: false }
        }
    }
}
