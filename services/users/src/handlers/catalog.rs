use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use uco_domain::id::{CountryId, DepartmentId};

use crate::domain::types::{City, Country, Department, IdType};
use crate::error::UsersServiceError;
use crate::state::AppState;
use crate::usecase::catalog::{
    ListCitiesUseCase, ListCountriesUseCase, ListDepartmentsUseCase, ListIdTypesUseCase,
};

#[derive(Debug, Serialize)]
pub struct NamedItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: String,
    pub country_id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityResponse {
    pub id: String,
    pub department_id: String,
    pub name: String,
}

impl From<IdType> for NamedItem {
    fn from(t: IdType) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name,
        }
    }
}

impl From<Country> for NamedItem {
    fn from(c: Country) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name,
        }
    }
}

impl From<Department> for DepartmentResponse {
    fn from(d: Department) -> Self {
        Self {
            id: d.id.to_string(),
            country_id: d.country_id.to_string(),
            name: d.name,
        }
    }
}

impl From<City> for CityResponse {
    fn from(c: City) -> Self {
        Self {
            id: c.id.to_string(),
            department_id: c.department_id.to_string(),
            name: c.name,
        }
    }
}

// ── GET /idtypes ─────────────────────────────────────────────────────────────

pub async fn list_id_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<NamedItem>>, UsersServiceError> {
    let usecase = ListIdTypesUseCase {
        id_types: state.id_type_repo(),
    };
    let items = usecase.execute().await?;
    Ok(Json(items.into_iter().map(NamedItem::from).collect()))
}

// ── GET /locations/countries ─────────────────────────────────────────────────

pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<NamedItem>>, UsersServiceError> {
    let usecase = ListCountriesUseCase {
        locations: state.location_repo(),
    };
    let items = usecase.execute().await?;
    Ok(Json(items.into_iter().map(NamedItem::from).collect()))
}

// ── GET /locations/countries/{countryId}/departments ─────────────────────────

/// Unknown or malformed parents yield an empty list.
pub async fn list_departments(
    State(state): State<AppState>,
    Path(country_id): Path<String>,
) -> Result<Json<Vec<DepartmentResponse>>, UsersServiceError> {
    let Ok(country) = country_id.parse::<CountryId>() else {
        return Ok(Json(Vec::new()));
    };
    let usecase = ListDepartmentsUseCase {
        locations: state.location_repo(),
    };
    let items = usecase.execute(country).await?;
    Ok(Json(items.into_iter().map(DepartmentResponse::from).collect()))
}

// ── GET /locations/departments/{departmentId}/cities ─────────────────────────

pub async fn list_cities(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
) -> Result<Json<Vec<CityResponse>>, UsersServiceError> {
    let Ok(department) = department_id.parse::<DepartmentId>() else {
        return Ok(Json(Vec::new()));
    };
    let usecase = ListCitiesUseCase {
        locations: state.location_repo(),
    };
    let items = usecase.execute(department).await?;
    Ok(Json(items.into_iter().map(CityResponse::from).collect()))
}
