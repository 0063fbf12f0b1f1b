//! Pollers behind the registration form's selects.

use std::time::Duration;

use crate::client::ApiClient;
use crate::model::{City, Country, Department, IdType};
use crate::poll::Poller;

const ID_TYPES_FAILED: &str = "No se pudieron cargar los tipos de documento.";
const COUNTRIES_FAILED: &str = "No se pudieron cargar los países. Inténtalo de nuevo.";
const DEPARTMENTS_FAILED: &str = "No se pudieron cargar los departamentos. Inténtalo de nuevo.";
const CITIES_FAILED: &str = "No se pudieron cargar las ciudades. Inténtalo de nuevo.";

pub fn id_types(client: &ApiClient, interval: Option<Duration>) -> Poller<Vec<IdType>> {
    let client = client.clone();
    Poller::spawn(Vec::new(), interval, ID_TYPES_FAILED, move || {
        let client = client.clone();
        async move { client.id_types().await }
    })
}

pub fn countries(client: &ApiClient, interval: Option<Duration>) -> Poller<Vec<Country>> {
    let client = client.clone();
    Poller::spawn(Vec::new(), interval, COUNTRIES_FAILED, move || {
        let client = client.clone();
        async move { client.countries().await }
    })
}

/// Departments of `country_id`. A blank id yields an idle, empty poller.
pub fn departments(
    client: &ApiClient,
    country_id: &str,
    interval: Option<Duration>,
) -> Poller<Vec<Department>> {
    let country_id = country_id.trim().to_owned();
    if country_id.is_empty() {
        return Poller::idle(Vec::new());
    }
    let client = client.clone();
    Poller::spawn(Vec::new(), interval, DEPARTMENTS_FAILED, move || {
        let client = client.clone();
        let country_id = country_id.clone();
        async move { client.departments(&country_id).await }
    })
}

/// Cities of `department_id`. A blank id yields an idle, empty poller.
pub fn cities(
    client: &ApiClient,
    department_id: &str,
    interval: Option<Duration>,
) -> Poller<Vec<City>> {
    let department_id = department_id.trim().to_owned();
    if department_id.is_empty() {
        return Poller::idle(Vec::new());
    }
    let client = client.clone();
    Poller::spawn(Vec::new(), interval, CITIES_FAILED, move || {
        let client = client.clone();
        let department_id = department_id.clone();
        async move { client.cities(&department_id).await }
    })
}
