use sea_orm::entity::prelude::*;

/// Registered user record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub id_type: Uuid,
    pub id_number: String,
    pub first_name: String,
    pub second_name: Option<String>,
    pub first_surname: String,
    pub second_surname: Option<String>,
    pub home_city: Uuid,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub email_confirmed: bool,
    pub mobile_number_confirmed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::id_types::Entity",
        from = "Column::IdType",
        to = "super::id_types::Column::Id"
    )]
    IdTypes,
    #[sea_orm(
        belongs_to = "super::cities::Entity",
        from = "Column::HomeCity",
        to = "super::cities::Column::Id"
    )]
    Cities,
}

impl Related<super::id_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IdTypes.def()
    }
}

impl Related<super::cities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
