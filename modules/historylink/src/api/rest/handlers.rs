//! HTTP request handlers - thin layer that delegates to domain service

use crate::domain::Service;
use super::{
    dto::*,
    error::{map_domain_error, Problem},
    mapper,
};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Paging query parameters shared by list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (default 1)
    pub page: Option<i64>,
    /// Items per page (default from configuration)
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

// ===== Health =====

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service is up", body = HealthResponse)))]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ===== Record Handlers =====

/// List records ordered by start date
#[utoipa::path(get, path = "/records", tag = "Records",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of records", body = RecordsPageResponse),
        (status = 400, description = "Invalid paging", body = Problem)))]
pub async fn list_records(
    service: Arc<Service>,
    Query(query): Query<PageQuery>,
) -> Result<Json<RecordsPageResponse>, Problem> {
    let page = service
        .get_records_paged(query.page, query.page_size)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(page.into()))
}

/// Create a record with its impacts
#[utoipa::path(post, path = "/records", tag = "Records",
    request_body = CreateRecordRequest,
    responses(
        (status = 201, description = "Record created", body = RecordDto),
        (status = 400, description = "Invalid record", body = Problem)))]
pub async fn create_record(
    service: Arc<Service>,
    Json(req): Json<CreateRecordRequest>,
) -> Result<(StatusCode, Json<RecordDto>), Problem> {
    let record = mapper::parse_new_record(req)
        .into_command(|record| service.check_new_record(record))
        .map_err(map_domain_error)?;
    let created = service
        .create_record(record)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get a record with its impacts
#[utoipa::path(get, path = "/records/{id}", tag = "Records",
    params(("id" = Uuid, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Record", body = RecordDto),
        (status = 404, description = "Record not found", body = Problem)))]
pub async fn get_record(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecordDto>, Problem> {
    let record = service.get_record(id).await.map_err(map_domain_error)?;

    Ok(Json(record.into()))
}

/// Replace a record and reconcile its impacts
#[utoipa::path(put, path = "/records/{id}", tag = "Records",
    params(("id" = Uuid, Path, description = "Record ID")),
    request_body = UpdateRecordRequest,
    responses(
        (status = 200, description = "Updated record", body = RecordDto),
        (status = 400, description = "Invalid record", body = Problem),
        (status = 404, description = "Record or impact not found", body = Problem)))]
pub async fn update_record(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRecordRequest>,
) -> Result<Json<RecordDto>, Problem> {
    let update = mapper::parse_record_update(id, req)
        .into_command(|update| service.check_record_update(update))
        .map_err(map_domain_error)?;
    let record = service
        .update_record(update)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(record.into()))
}

/// Delete a record with its impacts and links
#[utoipa::path(delete, path = "/records/{id}", tag = "Records",
    params(("id" = Uuid, Path, description = "Record ID")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found", body = Problem)))]
pub async fn delete_record(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service.delete_record(id).await.map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Impact change log of a record, newest first
#[utoipa::path(get, path = "/records/{id}/history", tag = "Records",
    params(("id" = Uuid, Path, description = "Record ID"), PageQuery),
    responses(
        (status = 200, description = "One page of history", body = ImpactHistoryPageResponse),
        (status = 400, description = "Invalid paging", body = Problem)))]
pub async fn get_record_history(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ImpactHistoryPageResponse>, Problem> {
    let page = service
        .get_impact_history(id, query.page, query.page_size)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(page.into()))
}

// ===== Link Handlers =====

/// Links touching a record, seen from that record
#[utoipa::path(get, path = "/records/{record_id}/links", tag = "Links",
    params(("record_id" = Uuid, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Links of the record", body = [LinkDto]),
        (status = 404, description = "Record not found", body = Problem)))]
pub async fn list_record_links(
    service: Arc<Service>,
    Path(record_id): Path<Uuid>,
) -> Result<Json<Vec<LinkDto>>, Problem> {
    let links = service
        .get_links_by_record(record_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(
        links
            .into_iter()
            .map(|l| mapper::to_link_dto(l, record_id))
            .collect(),
    ))
}

/// Link a record to another one
#[utoipa::path(post, path = "/records/{record_id}/links", tag = "Links",
    params(("record_id" = Uuid, Path, description = "Source record ID")),
    request_body = CreateLinkRequest,
    responses(
        (status = 201, description = "Link created", body = LinkDto),
        (status = 400, description = "Record linked to itself", body = Problem),
        (status = 404, description = "Record not found", body = Problem),
        (status = 409, description = "Records already linked", body = Problem)))]
pub async fn create_link(
    service: Arc<Service>,
    Path(record_id): Path<Uuid>,
    Json(req): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkDto>), Problem> {
    let link = service
        .create_link(record_id, req.record_id, req.strength)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(mapper::to_link_dto(link, record_id))))
}

/// Get a link by id
#[utoipa::path(get, path = "/links/{id}", tag = "Links",
    params(("id" = Uuid, Path, description = "Link ID")),
    responses(
        (status = 200, description = "Link", body = LinkDto),
        (status = 404, description = "Link not found", body = Problem)))]
pub async fn get_link(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<LinkDto>, Problem> {
    let link = service.get_link(id).await.map_err(map_domain_error)?;

    Ok(Json(link.into()))
}

/// Change the strength of a link
#[utoipa::path(put, path = "/links/{id}", tag = "Links",
    params(("id" = Uuid, Path, description = "Link ID")),
    request_body = UpdateLinkRequest,
    responses(
        (status = 200, description = "Updated link", body = LinkDto),
        (status = 404, description = "Link not found", body = Problem)))]
pub async fn update_link(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateLinkRequest>,
) -> Result<Json<LinkDto>, Problem> {
    let link = service
        .update_link(id, req.strength)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(link.into()))
}

/// Delete a link
#[utoipa::path(delete, path = "/links/{id}", tag = "Links",
    params(("id" = Uuid, Path, description = "Link ID")),
    responses(
        (status = 204, description = "Link deleted"),
        (status = 404, description = "Link not found", body = Problem)))]
pub async fn delete_link(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service.delete_link(id).await.map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}
