//! Handlers for `/people` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/people` | Optional `page`, `size`, `sortBy`, `sortDirection` |
//! | `POST` | `/people` | Body: [`PersonInput`]; returns 201 + stored person |
//! | `GET`  | `/people/:id` | 404 if not found |
//! | `PUT`, `PATCH` | `/people/:id` | Full replacement; 400 or 404 on failure |
//! | `DELETE` | `/people/:id` | 204, or 404 if not found |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{Local, NaiveDate};
use people_core::{
  page::{Page, PageRequest, Sort, SortDirection, SortField},
  person::{Person, PersonId, PersonInput},
  service,
  store::PersonStore,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
  ApiState, PagingConfig,
  error::{ApiError, ErrorBody},
};

// ─── Response shape ───────────────────────────────────────────────────────────

/// A person as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
  pub id:         PersonId,
  pub first_name: String,
  pub last_name:  String,
  pub birthday:   NaiveDate,
  pub ipn:        String,
}

impl From<Person> for PersonResponse {
  fn from(p: Person) -> Self {
    PersonResponse {
      id:         p.id,
      first_name: p.first_name,
      last_name:  p.last_name,
      birthday:   p.birthday,
      ipn:        p.ipn,
    }
  }
}

/// The date past-date validation compares against.
fn today() -> NaiveDate { Local::now().date_naive() }

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
  /// 0-indexed; negative values are treated as 0.
  pub page:           Option<i64>,
  /// Values below 1 fall back to the configured default; values above the
  /// configured maximum are clamped.
  pub size:           Option<i64>,
  /// Defaults to `lastName`.
  pub sort_by:        Option<String>,
  /// `asc` or `desc`, any case. Defaults to `asc`.
  pub sort_direction: Option<String>,
}

impl ListParams {
  pub fn into_page_request(self, paging: &PagingConfig) -> Result<PageRequest, ApiError> {
    let page = self.page.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32;
    let size = match self.size {
      Some(s) if s >= 1 => s.min(i64::from(paging.max_size)) as u32,
      _ => paging.default_size.min(paging.max_size),
    };

    let field = match self.sort_by.as_deref() {
      None | Some("") => SortField::default(),
      Some(s) => s.parse().map_err(|e| ApiError::BadRequest(format!("{e}")))?,
    };
    let direction = match self.sort_direction.as_deref() {
      None | Some("") => SortDirection::default(),
      Some(s) => s.parse().map_err(|e| ApiError::BadRequest(format!("{e}")))?,
    };

    Ok(PageRequest::new(page, size, Sort { field, direction }))
  }
}

/// `GET /people[?page=..][&size=..][&sortBy=..][&sortDirection=..]`
#[utoipa::path(
  get,
  path = "/people",
  params(ListParams),
  responses(
    (status = 200, description = "One page of people", body = Page<PersonResponse>),
    (status = 400, description = "Unknown sort field or direction", body = ErrorBody),
  ),
  tag = "people"
)]
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<PersonResponse>>, ApiError>
where
  S: PersonStore + 'static,
{
  let Query(params) = params?;
  let request = params.into_page_request(&state.paging)?;
  tracing::info!(
    page = request.page,
    size = request.size,
    sort_by = %request.sort.field,
    "Received request to list people"
  );

  let page = service::find_all(&*state.store, &request).await?;
  tracing::info!(
    total_elements = page.total_elements,
    returned = page.content.len(),
    "Returned page of people"
  );
  Ok(Json(page.map(PersonResponse::from)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /people/:id`
#[utoipa::path(
  get,
  path = "/people/{id}",
  params(("id" = i64, Path, description = "Person id")),
  responses(
    (status = 200, description = "Person found", body = PersonResponse),
    (status = 404, description = "No person with this id", body = ErrorBody),
  ),
  tag = "people"
)]
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  id: Result<Path<PersonId>, PathRejection>,
) -> Result<Json<PersonResponse>, ApiError>
where
  S: PersonStore + 'static,
{
  let Path(id) = id?;
  tracing::info!(id, "Received request to retrieve person");

  let person = service::find_by_id(&*state.store, id).await?;
  tracing::info!(id, "Returned person");
  Ok(Json(person.into()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /people`, answering 201 with the stored person.
#[utoipa::path(
  post,
  path = "/people",
  request_body = PersonInput,
  responses(
    (status = 201, description = "Person created", body = PersonResponse),
    (status = 400, description = "Invalid fields or IPN already taken", body = ErrorBody),
  ),
  tag = "people"
)]
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Result<Json<PersonInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore + 'static,
{
  let Json(input) = body?;
  tracing::info!("Received request to create a new person");

  let person = service::create(&*state.store, &input, today()).await?;
  tracing::info!(id = person.id, "Person was created");
  Ok((StatusCode::CREATED, Json(PersonResponse::from(person))))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /people/:id` and `PATCH /people/:id`. The body replaces the whole record.
#[utoipa::path(
  method(put, patch),
  path = "/people/{id}",
  params(("id" = i64, Path, description = "Person id")),
  request_body = PersonInput,
  responses(
    (status = 200, description = "Person updated", body = PersonResponse),
    (status = 400, description = "Invalid fields or IPN already taken", body = ErrorBody),
    (status = 404, description = "No person with this id", body = ErrorBody),
  ),
  tag = "people"
)]
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  id: Result<Path<PersonId>, PathRejection>,
  body: Result<Json<PersonInput>, JsonRejection>,
) -> Result<Json<PersonResponse>, ApiError>
where
  S: PersonStore + 'static,
{
  let Path(id) = id?;
  let Json(input) = body?;
  tracing::info!(id, "Received request to update person");

  let person = service::update(&*state.store, id, &input, today()).await?;
  tracing::info!(id, "Person was updated");
  Ok(Json(person.into()))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /people/:id`, answering 204.
#[utoipa::path(
  delete,
  path = "/people/{id}",
  params(("id" = i64, Path, description = "Person id")),
  responses(
    (status = 204, description = "Person deleted"),
    (status = 404, description = "No person with this id", body = ErrorBody),
  ),
  tag = "people"
)]
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  id: Result<Path<PersonId>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: PersonStore + 'static,
{
  let Path(id) = id?;
  tracing::info!(id, "Received request to delete person");

  service::delete(&*state.store, id).await?;
  tracing::info!(id, "Person was deleted");
  Ok(StatusCode::NO_CONTENT)
}
