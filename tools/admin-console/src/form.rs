//! Client-side check of the registration form, matching the server rules.

use uco_domain::contact::{VerificationChannel, is_valid_co_mobile, is_valid_email, normalize_contact};
use uco_domain::user::{MAX_NAME_LEN, is_valid_id_number, is_valid_name};

use crate::model::NewUser;

const REQUIRED: &str = "Este campo es obligatorio.";

/// Raw form input; every field as typed.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub id_type: String,
    pub id_number: String,
    pub first_name: String,
    pub second_name: String,
    pub first_surname: String,
    pub second_surname: String,
    pub country_id: String,
    pub department_id: String,
    pub home_city: String,
    pub email: String,
    pub mobile_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub field: &'static str,
    pub message: String,
}

fn error(field: &'static str, message: impl Into<String>) -> FormError {
    FormError {
        field,
        message: message.into(),
    }
}

fn optional(value: &str) -> Option<String> {
    Some(value.trim().to_owned()).filter(|v| !v.is_empty())
}

fn check_name(errors: &mut Vec<FormError>, field: &'static str, value: &str, required: bool) {
    match optional(value) {
        None if required => errors.push(error(field, REQUIRED)),
        None => {}
        Some(v) if !is_valid_name(&v) => errors.push(error(
            field,
            format!("Solo letras y espacios, máximo {MAX_NAME_LEN} caracteres."),
        )),
        Some(_) => {}
    }
}

/// Validate `form` and return the payload to send, or every problem found.
pub fn validate_user_form(form: &UserForm) -> Result<NewUser, Vec<FormError>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("idType", &form.id_type),
        ("country", &form.country_id),
        ("department", &form.department_id),
        ("homeCity", &form.home_city),
    ] {
        if value.trim().is_empty() {
            errors.push(error(field, REQUIRED));
        }
    }

    match optional(&form.id_number) {
        None => errors.push(error("idNumber", REQUIRED)),
        Some(v) if !is_valid_id_number(&v) => errors.push(error(
            "idNumber",
            "Entre 4 y 20 letras o dígitos, sin espacios.",
        )),
        Some(_) => {}
    }

    check_name(&mut errors, "firstName", &form.first_name, true);
    check_name(&mut errors, "secondName", &form.second_name, false);
    check_name(&mut errors, "firstSurname", &form.first_surname, true);
    check_name(&mut errors, "secondSurname", &form.second_surname, false);

    let email = optional(&form.email).map(|e| normalize_contact(VerificationChannel::Email, &e));
    if email.as_deref().is_some_and(|e| !is_valid_email(e)) {
        errors.push(error("email", "Ingresa un correo válido."));
    }
    let mobile = optional(&form.mobile_number);
    if mobile.as_deref().is_some_and(|m| !is_valid_co_mobile(m)) {
        errors.push(error(
            "mobileNumber",
            "El celular debe tener 10 dígitos y empezar por 3.",
        ));
    }
    if email.is_none() && mobile.is_none() {
        errors.push(error("contact", "Ingresa un correo o un número de celular."));
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(NewUser {
        id_type: form.id_type.trim().to_owned(),
        id_number: form.id_number.trim().to_owned(),
        first_name: form.first_name.trim().to_owned(),
        second_name: optional(&form.second_name),
        first_surname: form.first_surname.trim().to_owned(),
        second_surname: optional(&form.second_surname),
        home_city: form.home_city.trim().to_owned(),
        email,
        mobile_number: mobile,
    })
}
