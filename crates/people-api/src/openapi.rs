//! OpenAPI document for the people API, served at `/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

use crate::{error::ErrorBody, people};

#[derive(OpenApi)]
#[openapi(
  info(
    title = "People Registry API",
    description = "Create, read, update and delete person records. Every \
                   person carries a unique IPN with a check digit."
  ),
  servers((url = "/api/v1")),
  paths(
    people::list,
    people::get_one,
    people::create,
    people::update,
    people::delete_one,
  ),
  components(schemas(
    people::PersonResponse,
    people_core::person::PersonInput,
    people_core::validation::Violation,
    people_core::validation::ViolationCode,
    ErrorBody,
  )),
  tags((name = "people", description = "Person records"))
)]
pub struct ApiDoc;

/// `GET /openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> { Json(ApiDoc::openapi()) }
