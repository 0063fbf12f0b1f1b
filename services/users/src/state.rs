use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbIdTypeRepository, DbLocationRepository, DbUserRepository, DbVerificationCodeRepository,
};
use crate::infra::notification::HttpNotificationClient;
use crate::infra::parameters::{CachedParameters, HttpParametersClient};
use crate::usecase::verification::CodeIssuer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub notifier: HttpNotificationClient,
    pub parameters: HttpParametersClient,
    pub admin_email: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn id_type_repo(&self) -> DbIdTypeRepository {
        DbIdTypeRepository {
            db: self.db.clone(),
        }
    }

    pub fn location_repo(&self) -> DbLocationRepository {
        DbLocationRepository {
            db: self.db.clone(),
        }
    }

    pub fn code_repo(&self) -> DbVerificationCodeRepository {
        DbVerificationCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn parameter_port(&self) -> CachedParameters<HttpParametersClient> {
        CachedParameters {
            inner: self.parameters.clone(),
            pool: self.redis.clone(),
        }
    }

    pub fn code_issuer(
        &self,
    ) -> CodeIssuer<
        DbVerificationCodeRepository,
        HttpNotificationClient,
        CachedParameters<HttpParametersClient>,
    > {
        CodeIssuer {
            codes: self.code_repo(),
            notifier: self.notifier.clone(),
            parameters: self.parameter_port(),
        }
    }
}
