use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    AgentDraft, AgentUpdate, InquiryDraft, InquiryId, InquiryUpdate, PrincipalId, PropertyCategory,
    PropertyDraft, PropertyId, PropertyStatus, PropertyUpdate, UserProfile,
};
use super::search::{AdvancedPropertyFilter, SearchCriteria};
use super::service::{OfficeError, OfficeService};
use crate::error::AppError;

/// Header carrying the opaque caller identity resolved by the external
/// identity provider.
pub const CALLER_HEADER: &str = "x-caller-id";

/// Router builder exposing the office procedure-call surface over HTTP.
pub fn office_router(service: Arc<OfficeService>) -> Router {
    Router::new()
        .route(
            "/api/v1/agents",
            post(add_agent_handler).get(list_agents_handler),
        )
        .route(
            "/api/v1/agents/:agent_id",
            put(update_agent_handler).get(get_agent_handler),
        )
        .route(
            "/api/v1/agents/:agent_id/deactivate",
            post(deactivate_agent_handler),
        )
        .route(
            "/api/v1/properties",
            post(add_property_handler).get(list_properties_handler),
        )
        .route("/api/v1/properties/search", post(search_properties_handler))
        .route("/api/v1/properties/filter", post(advanced_filter_handler))
        .route("/api/v1/properties/import", post(import_listings_handler))
        .route(
            "/api/v1/properties/:property_id",
            put(update_property_handler).get(get_property_handler),
        )
        .route("/api/v1/locations/cities", get(cities_handler))
        .route(
            "/api/v1/locations/cities/:city/suburbs",
            get(suburbs_handler),
        )
        .route(
            "/api/v1/locations/suburbs/:suburb/areas",
            get(areas_handler),
        )
        .route(
            "/api/v1/inquiries",
            post(add_inquiry_handler).get(list_inquiries_handler),
        )
        .route(
            "/api/v1/inquiries/:inquiry_id",
            put(update_inquiry_handler).get(get_inquiry_handler),
        )
        .route(
            "/api/v1/analytics/configurations",
            get(configuration_distribution_handler),
        )
        .route(
            "/api/v1/analytics/furnishings",
            get(furnishing_distribution_handler),
        )
        .route("/api/v1/analytics/combined", get(combined_analytics_handler))
        .route(
            "/api/v1/profile",
            get(caller_profile_handler).put(save_profile_handler),
        )
        .route("/api/v1/profiles/:principal", get(profile_handler))
        .route("/api/v1/admin/reset", post(reset_handler))
        .with_state(service)
}

fn caller_from_headers(headers: &HeaderMap) -> Result<PrincipalId, Response> {
    match headers
        .get(CALLER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
    {
        Some(value) if !value.is_empty() => Ok(PrincipalId(value.to_string())),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "missing or unreadable x-caller-id header" })),
        )
            .into_response()),
    }
}

fn error_response(error: OfficeError) -> Response {
    let status = match &error {
        OfficeError::Unauthorized(_) => StatusCode::FORBIDDEN,
        OfficeError::NotFound(_) => StatusCode::NOT_FOUND,
        OfficeError::InvalidReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

fn respond<T: Serialize>(result: Result<T, OfficeError>) -> Response {
    respond_with(StatusCode::OK, result)
}

fn respond_with<T: Serialize>(status: StatusCode, result: Result<T, OfficeError>) -> Response {
    match result {
        Ok(value) => (status, Json(value)).into_response(),
        Err(error) => error_response(error),
    }
}

// ----------------------------------------------------------------------
// Agents
// ----------------------------------------------------------------------

async fn add_agent_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Json(draft): Json<AgentDraft>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond_with(StatusCode::CREATED, service.add_agent(&caller, draft))
}

async fn list_agents_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_all_agents(&caller))
}

async fn get_agent_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Path(agent_id): Path<String>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_agent(&caller, &PrincipalId(agent_id)))
}

async fn update_agent_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Path(agent_id): Path<String>,
    Json(update): Json<AgentUpdate>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.update_agent(&caller, &PrincipalId(agent_id), update))
}

async fn deactivate_agent_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Path(agent_id): Path<String>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.deactivate_agent(&caller, &PrincipalId(agent_id)))
}

// ----------------------------------------------------------------------
// Properties
// ----------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct PropertyListQuery {
    city: Option<String>,
    status: Option<PropertyStatus>,
    category: Option<PropertyCategory>,
    agent: Option<String>,
}

async fn add_property_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Json(draft): Json<PropertyDraft>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond_with(StatusCode::CREATED, service.add_property(&caller, draft))
}

async fn list_properties_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Query(query): Query<PropertyListQuery>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    let result = if let Some(city) = query.city {
        service.get_properties_by_city(&caller, &city)
    } else if let Some(status) = query.status {
        service.get_properties_by_status(&caller, status)
    } else if let Some(category) = query.category {
        service.get_properties_by_category(&caller, category)
    } else if let Some(agent) = query.agent {
        service.get_properties_by_agent(&caller, &PrincipalId(agent))
    } else {
        service.get_all_properties(&caller)
    };
    respond(result)
}

async fn get_property_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Path(property_id): Path<String>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_property(&caller, &PropertyId(property_id)))
}

async fn update_property_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Path(property_id): Path<String>,
    Json(update): Json<PropertyUpdate>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.update_property(&caller, &PropertyId(property_id), update))
}

async fn search_properties_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Json(criteria): Json<SearchCriteria>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.search_and_filter_properties(&caller, &criteria))
}

async fn advanced_filter_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Json(filter): Json<AdvancedPropertyFilter>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.advanced_filter_properties(&caller, &filter))
}

#[derive(Debug, Deserialize)]
struct ImportRequest {
    csv: String,
}

async fn import_listings_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Json(request): Json<ImportRequest>,
) -> Result<Response, AppError> {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let listings = service.import_listings(&caller, Cursor::new(request.csv.into_bytes()))?;
    Ok((StatusCode::CREATED, Json(listings)).into_response())
}

async fn cities_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_all_cities(&caller))
}

async fn suburbs_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Path(city): Path<String>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_suburbs_for_city(&caller, &city))
}

async fn areas_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Path(suburb): Path<String>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_areas_for_suburb(&caller, &suburb))
}

// ----------------------------------------------------------------------
// Inquiries
// ----------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct InquiryListQuery {
    agent: Option<String>,
    property: Option<String>,
}

async fn add_inquiry_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Json(draft): Json<InquiryDraft>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond_with(StatusCode::CREATED, service.add_inquiry(&caller, draft))
}

async fn list_inquiries_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Query(query): Query<InquiryListQuery>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    let result = if let Some(agent) = query.agent {
        service.get_inquiries_by_agent(&caller, &PrincipalId(agent))
    } else if let Some(property) = query.property {
        service.get_inquiries_by_property(&caller, &PropertyId(property))
    } else {
        service.get_all_inquiries(&caller)
    };
    respond(result)
}

async fn get_inquiry_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Path(inquiry_id): Path<String>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_inquiry(&caller, &InquiryId(inquiry_id)))
}

async fn update_inquiry_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Path(inquiry_id): Path<String>,
    Json(update): Json<InquiryUpdate>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.update_inquiry(&caller, &InquiryId(inquiry_id), update))
}

// ----------------------------------------------------------------------
// Analytics, profiles, reset
// ----------------------------------------------------------------------

async fn configuration_distribution_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_configuration_distribution(&caller))
}

async fn furnishing_distribution_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_furnishing_distribution(&caller))
}

async fn combined_analytics_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_combined_analytics(&caller))
}

async fn caller_profile_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_caller_user_profile(&caller))
}

async fn save_profile_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Json(profile): Json<UserProfile>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.save_caller_user_profile(&caller, profile))
}

async fn profile_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
    Path(principal): Path<String>,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    respond(service.get_user_profile(&caller, &PrincipalId(principal)))
}

async fn reset_handler(
    State(service): State<Arc<OfficeService>>,
    headers: HeaderMap,
) -> Response {
    let caller = match caller_from_headers(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    match service.reset_to_fresh_draft(&caller) {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "reset" }))).into_response(),
        Err(error) => error_response(error),
    }
}
