//! Host CRUD request handlers

use crate::server::commands::{CommandError, CreateHost};
use crate::server::hosts_file::{render_hosts, ColumnOrder};
use crate::server::identity::Caller;
use crate::server::service::response::{ApiError, ApiResponse, INVALID_HOST_ID, INVALID_REQUEST};
use crate::server::service::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use hosts_directory_storage::{HostId, HostPatch};
use serde::Deserialize;
use url::form_urlencoded;

const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

#[derive(Debug, Default)]
pub struct ListParams {
    /// Comma-separated group names
    pub hosts_groups: Option<String>,
    /// `text` selects hosts-file output
    pub format: Option<String>,
    /// `1` puts the domain column first
    pub ip_first: Option<String>,
}

impl ListParams {
    /// Parse a raw query string, keeping the first value of a repeated key
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "hosts_groups" => &mut params.hosts_groups,
                "format" => &mut params.format,
                "ip_first" => &mut params.ip_first,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    fn wants_text(&self, headers: &HeaderMap) -> bool {
        // Accept must match exactly; quality values or lists fall back to JSON
        self.format.as_deref() == Some("text")
            || headers
                .get(header::ACCEPT)
                .is_some_and(|accept| accept.as_bytes() == b"text/plain")
    }
}

/// Create body; absent and null values read as empty strings
#[derive(Debug, Default, Deserialize)]
pub struct CreateHostRequest {
    #[serde(default)]
    pub ip_addr: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub hosts_group: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

impl From<CreateHostRequest> for CreateHost {
    fn from(req: CreateHostRequest) -> Self {
        CreateHost {
            ip_addr: req.ip_addr.unwrap_or_default(),
            domain: req.domain.unwrap_or_default(),
            hosts_group: req.hosts_group.unwrap_or_default(),
            remark: req.remark.unwrap_or_default(),
        }
    }
}

/// Partial update body; absent, null and empty values all mean "unchanged"
#[derive(Debug, Default, Deserialize)]
pub struct UpdateHostRequest {
    #[serde(default)]
    pub ip_addr: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub hosts_group: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

impl From<UpdateHostRequest> for HostPatch {
    fn from(req: UpdateHostRequest) -> Self {
        HostPatch {
            ip_addr: req.ip_addr,
            domain: req.domain,
            hosts_group: req.hosts_group,
            remark: req.remark,
            ..Default::default()
        }
    }
}

fn parse_id(raw: &str) -> Result<HostId, ApiError> {
    raw.parse::<HostId>()
        .map_err(|e| ApiError::bad_request(INVALID_HOST_ID, e.to_string()))
}

/// List hosts as JSON or hosts-file text
pub(super) async fn list_hosts(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let params = ListParams::from_query(query.as_deref());

    let groups = params.hosts_groups.as_deref();
    let records = state
        .commands
        .list_hosts(groups)
        .await
        .map_err(|e| ApiError::from_command("failed to list hosts", e))?;

    if params.wants_text(&headers) {
        let order = ColumnOrder::from_ip_first_param(params.ip_first.as_deref());
        let body = render_hosts(&records, order);
        return Ok(([(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], body).into_response());
    }

    Ok(ApiResponse::list("hosts retrieved", records).into_response())
}

/// Get a host entry by ID
pub(super) async fn get_host(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;

    let record = state
        .commands
        .get_host(id)
        .await
        .map_err(|e| ApiError::from_command("failed to get host", e))?;

    Ok(ApiResponse::ok("host retrieved", record).into_response())
}

/// Create a host entry
pub(super) async fn create_host(
    State(state): State<AppState>,
    Caller(caller): Caller,
    body: Result<Json<CreateHostRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::bad_request(INVALID_REQUEST, e.body_text()))?;

    let record = state
        .commands
        .add_host(req.into(), caller)
        .await
        .map_err(|e| ApiError::from_command("failed to create host", e))?;

    Ok(ApiResponse::created("host created", record).into_response())
}

/// Apply a partial update to a host entry
pub(super) async fn update_host(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateHostRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;

    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            // a missing host is reported ahead of a malformed body
            if let Err(e @ CommandError::NotFound(_)) = state.commands.get_host(id).await {
                return Err(ApiError::from_command("failed to update host", e));
            }
            return Err(ApiError::bad_request(INVALID_REQUEST, rejection.body_text()));
        }
    };

    let record = state
        .commands
        .update_host(id, req.into(), caller)
        .await
        .map_err(|e| ApiError::from_command("failed to update host", e))?;

    Ok(ApiResponse::ok("host updated", record).into_response())
}

/// Permanently delete a host entry
pub(super) async fn delete_host(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;

    state
        .commands
        .delete_host(id)
        .await
        .map_err(|e| ApiError::from_command("failed to delete host", e))?;

    Ok(ApiResponse::message("host deleted").into_response())
}
