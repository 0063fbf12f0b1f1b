//! Wire shapes of the admin API as seen by the console.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdType {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub department_id: Option<String>,
}

/// Row of the users listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub email_confirmed: Option<bool>,
    #[serde(default)]
    pub mobile_number_confirmed: Option<bool>,
}

impl UserSummary {
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref().filter(|l| !l.is_empty()) {
            Some(last) => format!("{} {last}", self.first_name),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    #[serde(default)]
    pub users: Vec<UserSummary>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

/// Registration payload. Absent optional fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id_type: String,
    pub id_number: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_name: Option<String>,
    pub first_surname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_surname: Option<String>,
    pub home_city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
}

/// A registered user as returned by the create call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub id_type: String,
    pub id_number: String,
    pub first_name: String,
    #[serde(default)]
    pub second_name: Option<String>,
    pub first_surname: String,
    #[serde(default)]
    pub second_surname: Option<String>,
    pub home_city: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub email_confirmed: bool,
    #[serde(default)]
    pub mobile_number_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dashboard {
    pub message: String,
    pub role: String,
    pub section: String,
}
