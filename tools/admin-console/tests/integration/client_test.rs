use uco_admin_console::client::ApiClient;
use uco_admin_console::config::ConsoleConfig;
use uco_admin_console::error::ClientError;
use uco_admin_console::model::NewUser;
use uco_domain::contact::VerificationChannel;

use crate::helpers::{Gateway, country, spawn_gateway};

fn new_user(email: &str) -> NewUser {
    NewUser {
        id_type: "cc".into(),
        id_number: "1037654321".into(),
        first_name: "Valentina".into(),
        first_surname: "Restrepo".into(),
        home_city: "rionegro".into(),
        email: Some(email.into()),
        ..NewUser::default()
    }
}

#[tokio::test]
async fn should_load_dashboard_with_bearer_token() {
    let (client, _) = spawn_gateway(Gateway::default()).await;

    let dashboard = client.dashboard().await.unwrap();

    assert_eq!(dashboard.section, "dashboard");
    assert_eq!(dashboard.role, "administrador");
}

#[tokio::test]
async fn should_report_unauthorized_without_token() {
    let (mut client, _) = spawn_gateway(Gateway::default()).await;
    client.set_token(None);

    let err = client.dashboard().await.unwrap_err();

    assert!(err.requires_login());
    assert_eq!(
        err.friendly_message(),
        "Tu sesión expiró. Inicia sesión de nuevo."
    );
}

#[tokio::test]
async fn should_unwrap_wrapped_id_types() {
    let (client, _) = spawn_gateway(Gateway::default()).await;

    let id_types = client.id_types().await.unwrap();

    assert_eq!(id_types.len(), 1);
    assert_eq!(id_types[0].name, "Cédula de ciudadanía");
}

#[tokio::test]
async fn should_list_departments_of_country() {
    let mut gateway = Gateway::default();
    gateway.departments.insert(
        "co".into(),
        vec![serde_json::json!({ "id": "ant", "name": "Antioquia", "countryId": "co" })],
    );
    let (client, _) = spawn_gateway(gateway).await;

    let departments = client.departments("co").await.unwrap();
    let none = client.departments("pe").await.unwrap();

    assert_eq!(departments[0].name, "Antioquia");
    assert_eq!(departments[0].country_id.as_deref(), Some("co"));
    assert!(none.is_empty());
}

#[tokio::test]
async fn should_pass_page_and_size_to_listing() {
    let (client, _) = spawn_gateway(Gateway::default()).await;

    let page = client.list_users(2, 20).await.unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.size, 20);
    assert_eq!(page.users[0].full_name(), "Ana Gómez");
}

#[tokio::test]
async fn should_create_user() {
    let (client, _) = spawn_gateway(Gateway::default()).await;

    let user = client.create_user(&new_user("valentina@uco.edu.co")).await.unwrap();

    assert_eq!(user.first_name, "Valentina");
    assert_eq!(user.second_name, None);
    assert!(!user.email_confirmed);
}

#[tokio::test]
async fn should_describe_duplicate_on_create() {
    let (client, _) = spawn_gateway(Gateway::default()).await;

    let err = client.create_user(&new_user("dup@uco.edu.co")).await.unwrap_err();

    match &err {
        ClientError::Api {
            status,
            code,
            field,
            ..
        } => {
            assert_eq!(*status, 409);
            assert_eq!(code.as_deref(), Some("USER_ALREADY_EXISTS"));
            assert_eq!(field.as_deref(), Some("email"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
    assert_eq!(
        err.friendly_message(),
        "El usuario ya existe. (correo duplicado: dup@uco.edu.co)"
    );
}

#[tokio::test]
async fn should_send_code_on_channel() {
    let (client, gateway) = spawn_gateway(Gateway::default()).await;

    client
        .send_code("0199a0c4-0000-7000-8000-000000000001", VerificationChannel::Mobile)
        .await
        .unwrap();

    let sent = gateway.lock().unwrap().sent_codes.clone();
    assert_eq!(
        sent,
        vec![(
            "0199a0c4-0000-7000-8000-000000000001".to_owned(),
            "mobile".to_owned()
        )]
    );
}

#[tokio::test]
async fn should_surface_invalid_code_message() {
    let (client, _) = spawn_gateway(Gateway::default()).await;

    client
        .confirm_code("u1", VerificationChannel::Email, " 123456 ")
        .await
        .unwrap();
    let err = client
        .confirm_code("u1", VerificationChannel::Email, "000000")
        .await
        .unwrap_err();

    assert_eq!(err.friendly_message(), "El código no es válido.");
}

#[tokio::test]
async fn should_verify_publicly_without_token() {
    let (client, gateway) = spawn_gateway(Gateway::default()).await;

    client.verify_code("+573104567890", "482913").await.unwrap();

    assert_eq!(gateway.lock().unwrap().public_had_auth, Some(false));
}

#[tokio::test]
async fn should_map_unreachable_server_to_transport_error() {
    let config = ConsoleConfig {
        base_url: "http://127.0.0.1:1/api/admin/uco-challenge/api/v1".into(),
        access_token: None,
        poll_interval: None,
    };
    let client = ApiClient::new(&config).unwrap();

    let err = client.countries().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.friendly_message().starts_with("No fue posible contactar"));
}

#[tokio::test]
async fn should_keep_country_order() {
    let gateway = Gateway {
        countries: vec![country("co", "Colombia"), country("ec", "Ecuador")],
        ..Gateway::default()
    };
    let (client, _) = spawn_gateway(gateway).await;

    let names: Vec<String> = client
        .countries()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();

    assert_eq!(names, ["Colombia", "Ecuador"]);
}
