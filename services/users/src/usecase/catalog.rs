use uco_domain::id::{CountryId, DepartmentId};

use crate::domain::repository::{IdTypeRepository, LocationRepository};
use crate::domain::types::{City, Country, Department, IdType};
use crate::error::UsersServiceError;

fn trimmed(name: &str) -> String {
    name.trim().to_owned()
}

pub struct ListIdTypesUseCase<I: IdTypeRepository> {
    pub id_types: I,
}

impl<I: IdTypeRepository> ListIdTypesUseCase<I> {
    pub async fn execute(&self) -> Result<Vec<IdType>, UsersServiceError> {
        let mut items = self.id_types.list().await?;
        for item in &mut items {
            item.name = trimmed(&item.name);
        }
        Ok(items)
    }
}

pub struct ListCountriesUseCase<L: LocationRepository> {
    pub locations: L,
}

impl<L: LocationRepository> ListCountriesUseCase<L> {
    pub async fn execute(&self) -> Result<Vec<Country>, UsersServiceError> {
        let mut items = self.locations.countries().await?;
        for item in &mut items {
            item.name = trimmed(&item.name);
        }
        Ok(items)
    }
}

pub struct ListDepartmentsUseCase<L: LocationRepository> {
    pub locations: L,
}

impl<L: LocationRepository> ListDepartmentsUseCase<L> {
    pub async fn execute(&self, country: CountryId) -> Result<Vec<Department>, UsersServiceError> {
        let mut items = self.locations.departments(country).await?;
        for item in &mut items {
            item.name = trimmed(&item.name);
        }
        Ok(items)
    }
}

pub struct ListCitiesUseCase<L: LocationRepository> {
    pub locations: L,
}

impl<L: LocationRepository> ListCitiesUseCase<L> {
    pub async fn execute(&self, department: DepartmentId) -> Result<Vec<City>, UsersServiceError> {
        let mut items = self.locations.cities(department).await?;
        for item in &mut items {
            item.name = trimmed(&item.name);
        }
        Ok(items)
    }
}
