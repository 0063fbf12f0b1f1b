use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};
use uuid::Uuid;

use uco_core::sea_ext::LowerEq;
use uco_domain::id::{CityId, CountryId, DepartmentId, IdTypeId, UserId};
use uco_domain::pagination::{Page, PageRequest};
use uco_users_schema::{cities, countries, departments, id_types, users, verification_codes};

use crate::domain::repository::{
    IdTypeRepository, LocationRepository, UserRepository, VerificationCodeRepository,
};
use crate::domain::types::{City, Country, Department, IdType, User, VerificationCode};
use crate::error::UsersServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl DbUserRepository {
    async fn find_one(
        &self,
        filter: sea_orm::Condition,
        context: &'static str,
    ) -> Result<Option<User>, UsersServiceError> {
        let model = users::Entity::find()
            .filter(filter)
            .one(&self.db)
            .await
            .context(context)?;
        Ok(model.map(user_from_model))
    }

    async fn set_flag(
        &self,
        id: UserId,
        column: users::Column,
        context: &'static str,
    ) -> Result<(), UsersServiceError> {
        let result = users::Entity::update_many()
            .col_expr(column, Expr::value(true))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context(context)?;
        if result.rows_affected == 0 {
            return Err(UsersServiceError::UserNotFound);
        }
        Ok(())
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UsersServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn exists_by_id(&self, id: UserId) -> Result<bool, UsersServiceError> {
        let count = users::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .context("check user id")?;
        Ok(count > 0)
    }

    async fn find_by_identification(
        &self,
        id_type: IdTypeId,
        id_number: &str,
    ) -> Result<Option<User>, UsersServiceError> {
        self.find_one(
            sea_orm::Condition::all()
                .add(users::Column::IdType.eq(id_type.0))
                .add(users::Column::IdNumber.eq(id_number)),
            "find user by identification",
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UsersServiceError> {
        self.find_one(
            sea_orm::Condition::all().add(users::Column::Email.lower_eq(email.trim())),
            "find user by email",
        )
        .await
    }

    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<User>, UsersServiceError> {
        self.find_one(
            sea_orm::Condition::all().add(users::Column::MobileNumber.eq(mobile.trim())),
            "find user by mobile number",
        )
        .await
    }

    async fn create(&self, user: &User) -> Result<(), UsersServiceError> {
        users::ActiveModel {
            id: Set(user.id.0),
            id_type: Set(user.id_type.0),
            id_number: Set(user.id_number.clone()),
            first_name: Set(user.first_name.clone()),
            second_name: Set(user.second_name.clone()),
            first_surname: Set(user.first_surname.clone()),
            second_surname: Set(user.second_surname.clone()),
            home_city: Set(user.home_city.0),
            email: Set(user.email.clone()),
            mobile_number: Set(user.mobile_number.clone()),
            email_confirmed: Set(user.email_confirmed),
            mobile_number_confirmed: Set(user.mobile_number_confirmed),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, UsersServiceError> {
        let total_elements = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.size))
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(Page {
            items: models.into_iter().map(user_from_model).collect(),
            page: page.page,
            size: page.size,
            total_elements,
        })
    }

    async fn mark_email_confirmed(&self, id: UserId) -> Result<(), UsersServiceError> {
        self.set_flag(id, users::Column::EmailConfirmed, "confirm user email")
            .await
    }

    async fn mark_mobile_confirmed(&self, id: UserId) -> Result<(), UsersServiceError> {
        self.set_flag(
            id,
            users::Column::MobileNumberConfirmed,
            "confirm user mobile number",
        )
        .await
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: UserId(model.id),
        id_type: IdTypeId(model.id_type),
        id_number: model.id_number,
        first_name: model.first_name,
        second_name: model.second_name,
        first_surname: model.first_surname,
        second_surname: model.second_surname,
        home_city: CityId(model.home_city),
        email: model.email,
        mobile_number: model.mobile_number,
        email_confirmed: model.email_confirmed,
        mobile_number_confirmed: model.mobile_number_confirmed,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Id type repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbIdTypeRepository {
    pub db: DatabaseConnection,
}

impl IdTypeRepository for DbIdTypeRepository {
    async fn list(&self) -> Result<Vec<IdType>, UsersServiceError> {
        let models = id_types::Entity::find()
            .order_by_asc(id_types::Column::Name)
            .all(&self.db)
            .await
            .context("list id types")?;
        Ok(models
            .into_iter()
            .map(|m| IdType {
                id: IdTypeId(m.id),
                name: m.name,
            })
            .collect())
    }

    async fn exists(&self, id: IdTypeId) -> Result<bool, UsersServiceError> {
        let count = id_types::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .context("check id type")?;
        Ok(count > 0)
    }
}

// ── Location repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLocationRepository {
    pub db: DatabaseConnection,
}

impl LocationRepository for DbLocationRepository {
    async fn countries(&self) -> Result<Vec<Country>, UsersServiceError> {
        let models = countries::Entity::find()
            .order_by_asc(countries::Column::Name)
            .all(&self.db)
            .await
            .context("list countries")?;
        Ok(models
            .into_iter()
            .map(|m| Country {
                id: CountryId(m.id),
                name: m.name,
            })
            .collect())
    }

    async fn departments(&self, country: CountryId) -> Result<Vec<Department>, UsersServiceError> {
        let models = departments::Entity::find()
            .filter(departments::Column::CountryId.eq(country.0))
            .order_by_asc(departments::Column::Name)
            .all(&self.db)
            .await
            .context("list departments")?;
        Ok(models
            .into_iter()
            .map(|m| Department {
                id: DepartmentId(m.id),
                country_id: CountryId(m.country_id),
                name: m.name,
            })
            .collect())
    }

    async fn cities(&self, department: DepartmentId) -> Result<Vec<City>, UsersServiceError> {
        let models = cities::Entity::find()
            .filter(cities::Column::DepartmentId.eq(department.0))
            .order_by_asc(cities::Column::Name)
            .all(&self.db)
            .await
            .context("list cities")?;
        Ok(models
            .into_iter()
            .map(|m| City {
                id: CityId(m.id),
                department_id: DepartmentId(m.department_id),
                name: m.name,
            })
            .collect())
    }

    async fn city_exists(&self, id: CityId) -> Result<bool, UsersServiceError> {
        let count = cities::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .context("check city")?;
        Ok(count > 0)
    }
}

// ── Verification code repository ─────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVerificationCodeRepository {
    pub db: DatabaseConnection,
}

impl VerificationCodeRepository for DbVerificationCodeRepository {
    async fn find_by_contact(
        &self,
        contact: &str,
    ) -> Result<Option<VerificationCode>, UsersServiceError> {
        let model = verification_codes::Entity::find()
            .filter(verification_codes::Column::Contact.lower_eq(contact.trim()))
            .order_by_desc(verification_codes::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find verification code")?;
        Ok(model.map(|m| VerificationCode {
            contact: m.contact,
            code: m.code,
            expires_at: m.expires_at,
            created_at: m.created_at,
        }))
    }

    async fn save(&self, code: &VerificationCode) -> Result<(), UsersServiceError> {
        verification_codes::ActiveModel {
            id: Set(Uuid::now_v7()),
            contact: Set(code.contact.trim().to_owned()),
            code: Set(code.code.clone()),
            expires_at: Set(code.expires_at),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .context("save verification code")?;
        Ok(())
    }

    async fn delete_by_contact(&self, contact: &str) -> Result<u64, UsersServiceError> {
        let result = verification_codes::Entity::delete_many()
            .filter(verification_codes::Column::Contact.lower_eq(contact.trim()))
            .exec(&self.db)
            .await
            .context("delete verification codes")?;
        Ok(result.rows_affected)
    }
}
