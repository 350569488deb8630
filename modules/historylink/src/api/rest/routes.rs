//! Route registration and OpenAPI document

use crate::domain::Service;
use super::{dto::*, error::{Problem, ProblemItem}, handlers};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Historylink API",
        description = "Historical records, their impacts, links between records and the impact change log"
    ),
    paths(
        handlers::health,
        handlers::list_records, handlers::create_record, handlers::get_record,
        handlers::update_record, handlers::delete_record, handlers::get_record_history,
        handlers::list_record_links, handlers::create_link,
        handlers::get_link, handlers::update_link, handlers::delete_link,
    ),
    components(schemas(
        RecordDto, ImpactDto, CreateRecordRequest, CreateImpactRequest,
        UpdateRecordRequest, UpdateImpactRequest, RecordsPageResponse,
        LinkDto, CreateLinkRequest, UpdateLinkRequest,
        ImpactHistoryDto, ImpactHistoryPageResponse,
        Problem, ProblemItem, handlers::HealthResponse,
    )),
    tags(
        (name = "Records", description = "Historical records and their impacts"),
        (name = "Links", description = "Links between records"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(openapi_handler))
        // Record endpoints
        .route("/records", get(list_records_handler).post(create_record_handler))
        .route(
            "/records/{id}",
            get(get_record_handler)
                .put(update_record_handler)
                .delete(delete_record_handler),
        )
        .route("/records/{id}/history", get(get_record_history_handler))
        // Link endpoints
        .route(
            "/records/{record_id}/links",
            get(list_record_links_handler).post(create_link_handler),
        )
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        // Add service as extension for handlers
        .layer(Extension(service));

    Ok(router)
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// ===== Handler wrappers that extract service from Extension =====

async fn list_records_handler(
    Extension(service): Extension<Arc<Service>>,
    query: Query<handlers::PageQuery>,
) -> Result<Json<RecordsPageResponse>, Problem> {
    handlers::list_records(service, query).await
}

async fn create_record_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<CreateRecordRequest>,
) -> Result<(StatusCode, Json<RecordDto>), Problem> {
    handlers::create_record(service, json).await
}

async fn get_record_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<RecordDto>, Problem> {
    handlers::get_record(service, path).await
}

async fn update_record_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    json: Json<UpdateRecordRequest>,
) -> Result<Json<RecordDto>, Problem> {
    handlers::update_record(service, path, json).await
}

async fn delete_record_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_record(service, path).await
}

async fn get_record_history_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    query: Query<handlers::PageQuery>,
) -> Result<Json<ImpactHistoryPageResponse>, Problem> {
    handlers::get_record_history(service, path, query).await
}

async fn list_record_links_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<Vec<LinkDto>>, Problem> {
    handlers::list_record_links(service, path).await
}

async fn create_link_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    json: Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkDto>), Problem> {
    handlers::create_link(service, path, json).await
}

async fn get_link_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<LinkDto>, Problem> {
    handlers::get_link(service, path).await
}

async fn update_link_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    json: Json<UpdateLinkRequest>,
) -> Result<Json<LinkDto>, Problem> {
    handlers::update_link(service, path, json).await
}

async fn delete_link_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_link(service, path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/health",
            "/records",
            "/records/{id}",
            "/records/{id}/history",
            "/records/{record_id}/links",
            "/links/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
