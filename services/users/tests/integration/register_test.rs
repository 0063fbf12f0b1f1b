use uuid::Uuid;

use uco_domain::id::{CityId, IdTypeId, UserId};
use uco_domain::pagination::PageRequest;
use uco_testing::fixture::Fixture;
use uco_users::domain::types::ADMIN_EMAIL_PARAMETER;
use uco_users::error::UsersServiceError;
use uco_users::handlers::user::RegisterUserRequest;
use uco_users::usecase::user::{
    Executor, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase,
};

use crate::helpers::{
    MockCodeRepo, MockIdTypeRepo, MockLocationRepo, MockNotifier, MockParameters, MockUserRepo,
    Sent, issuer, user,
};

const FALLBACK_ADMIN: &str = "admin@uco.edu.co";

type Register = RegisterUserUseCase<
    MockUserRepo,
    MockIdTypeRepo,
    MockLocationRepo,
    MockCodeRepo,
    MockNotifier,
    MockParameters,
>;

fn fixture_input() -> RegisterUserInput {
    let body: RegisterUserRequest =
        serde_json::from_value(Fixture::load("fixtures/users/register_request.json")).unwrap();
    body.into()
}

fn catalog_ids(input: &RegisterUserInput) -> (IdTypeId, CityId) {
    (
        input.id_type.as_deref().unwrap().parse().unwrap(),
        input.home_city.as_deref().unwrap().parse().unwrap(),
    )
}

fn usecase(
    users: MockUserRepo,
    input: &RegisterUserInput,
    notifier: MockNotifier,
    parameters: MockParameters,
) -> Register {
    let (id_type, city) = catalog_ids(input);
    RegisterUserUseCase {
        users,
        id_types: MockIdTypeRepo::with_id(id_type),
        locations: MockLocationRepo::with_city(city),
        issuer: issuer(MockCodeRepo::empty(), notifier, parameters),
        fallback_admin_email: FALLBACK_ADMIN.to_owned(),
    }
}

fn executor() -> Executor {
    Executor {
        id: "operator@uco.edu.co".to_owned(),
        email: Some("operator@uco.edu.co".to_owned()),
    }
}

#[tokio::test]
async fn should_register_user_and_send_confirmation_codes() {
    let input = fixture_input();
    let users = MockUserRepo::empty();
    let stored = users.users_handle();
    let notifier = MockNotifier::new();
    let sent = notifier.sent_handle();
    let uc = usecase(users, &input, notifier, MockParameters::default());
    let codes = uc.issuer.codes.codes_handle();

    let user = uc.execute(input, executor()).await.unwrap();

    assert!(!user.id.is_nil());
    assert_eq!(user.email.as_deref(), Some("valentina.restrepo@uco.edu.co"));
    assert_eq!(user.mobile_number.as_deref(), Some("3104567890"));
    assert_eq!(user.second_name, None);
    assert_eq!(user.second_surname.as_deref(), Some("Arango"));
    assert!(!user.email_confirmed);
    assert!(!user.mobile_number_confirmed);
    assert_eq!(stored.lock().unwrap().len(), 1);

    let codes = codes.lock().unwrap();
    assert_eq!(codes.len(), 2);
    assert!(codes.iter().any(|c| c.contact == "valentina.restrepo@uco.edu.co"));
    assert!(codes.iter().any(|c| c.contact == "3104567890"));

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert!(matches!(&sent[0], Sent::Email { to, .. } if to == "valentina.restrepo@uco.edu.co"));
    assert!(matches!(&sent[1], Sent::Sms { to, .. } if to == "+573104567890"));
}

#[tokio::test]
async fn should_register_even_when_delivery_fails() {
    let input = fixture_input();
    let users = MockUserRepo::empty();
    let stored = users.users_handle();
    let uc = usecase(users, &input, MockNotifier::failing(), MockParameters::default());

    let result = uc.execute(input, executor()).await;

    assert!(result.is_ok());
    assert_eq!(stored.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_keep_proposed_id_when_free() {
    let mut input = fixture_input();
    let proposed = Uuid::now_v7();
    input.id = Some(proposed.to_string());
    let uc = usecase(MockUserRepo::empty(), &input, MockNotifier::new(), MockParameters::default());

    let user = uc.execute(input, executor()).await.unwrap();

    assert_eq!(user.id, UserId(proposed));
}

#[tokio::test]
async fn should_draw_new_id_when_proposed_one_is_taken() {
    let existing = user("99999999", None, Some("3000000000"));
    let taken = existing.id;
    let mut input = fixture_input();
    input.id = Some(taken.to_string());
    let uc = usecase(
        MockUserRepo::new(vec![existing]),
        &input,
        MockNotifier::new(),
        MockParameters::default(),
    );

    let user = uc.execute(input, executor()).await.unwrap();

    assert_ne!(user.id, taken);
    assert!(!user.id.is_nil());
}

#[tokio::test]
async fn should_reject_unknown_id_type() {
    let input = fixture_input();
    let mut uc = usecase(MockUserRepo::empty(), &input, MockNotifier::new(), MockParameters::default());
    uc.id_types = MockIdTypeRepo::new(vec![]);

    let result = uc.execute(input, executor()).await;

    assert!(matches!(result, Err(UsersServiceError::IdTypeNotFound)));
}

#[tokio::test]
async fn should_reject_unknown_city() {
    let input = fixture_input();
    let mut uc = usecase(MockUserRepo::empty(), &input, MockNotifier::new(), MockParameters::default());
    uc.locations = MockLocationRepo::default();

    let result = uc.execute(input, executor()).await;

    assert!(matches!(result, Err(UsersServiceError::CityNotFound)));
}

#[tokio::test]
async fn should_report_every_missing_field() {
    let uc = usecase(
        MockUserRepo::empty(),
        &fixture_input(),
        MockNotifier::new(),
        MockParameters::default(),
    );

    let result = uc.execute(RegisterUserInput::default(), executor()).await;

    let problems = match result {
        Err(UsersServiceError::ValidationFailed(problems)) => problems,
        other => panic!("expected validation failure, got {other:?}"),
    };
    let fields: Vec<&str> = problems.iter().map(|p| p.field).collect();
    for field in ["idType", "idNumber", "firstName", "firstSurname", "homeCity", "contact"] {
        assert!(fields.contains(&field), "missing {field} in {fields:?}");
    }
}

#[tokio::test]
async fn should_reject_duplicate_identification_and_alert_admin_and_executor() {
    let input = fixture_input();
    let (id_type, _) = catalog_ids(&input);
    let mut existing = user("1037654321", None, None);
    existing.id_type = id_type;
    let users = MockUserRepo::new(vec![existing]);
    let stored = users.users_handle();
    let notifier = MockNotifier::new();
    let sent = notifier.sent_handle();
    let uc = usecase(users, &input, notifier, MockParameters::default());

    let result = uc.execute(input, executor()).await;

    assert!(matches!(
        result,
        Err(UsersServiceError::UserAlreadyExists { field: "idNumber", ref value }) if value == "1037654321"
    ));
    assert_eq!(stored.lock().unwrap().len(), 1);
    let recipients: Vec<String> = sent.lock().unwrap().iter().map(|s| s.to().to_owned()).collect();
    assert_eq!(recipients, vec![FALLBACK_ADMIN, "operator@uco.edu.co"]);
}

#[tokio::test]
async fn should_reject_duplicate_email_regardless_of_case_and_warn_owner() {
    let input = fixture_input();
    let owner = user("11111111", Some("Valentina.Restrepo@uco.edu.co"), None);
    let notifier = MockNotifier::new();
    let sent = notifier.sent_handle();
    let uc = usecase(MockUserRepo::new(vec![owner]), &input, notifier, MockParameters::default());

    let result = uc.execute(input, executor()).await;

    assert!(matches!(
        result,
        Err(UsersServiceError::UserAlreadyExists { field: "email", .. })
    ));
    let sent = sent.lock().unwrap();
    let recipients: Vec<&str> = sent.iter().map(Sent::to).collect();
    assert_eq!(
        recipients,
        vec![FALLBACK_ADMIN, "Valentina.Restrepo@uco.edu.co", "operator@uco.edu.co"]
    );
}

#[tokio::test]
async fn should_warn_mobile_owner_by_sms() {
    let input = fixture_input();
    let owner = user("22222222", None, Some("3104567890"));
    let notifier = MockNotifier::new();
    let sent = notifier.sent_handle();
    let uc = usecase(MockUserRepo::new(vec![owner]), &input, notifier, MockParameters::default());

    let result = uc.execute(input, executor()).await;

    assert!(matches!(
        result,
        Err(UsersServiceError::UserAlreadyExists { field: "mobileNumber", .. })
    ));
    let sent = sent.lock().unwrap();
    assert!(sent.iter().any(|s| matches!(s, Sent::Sms { to, .. } if to == "+573104567890")));
}

#[tokio::test]
async fn should_route_executor_notice_to_admin_when_executor_has_no_email() {
    let input = fixture_input();
    let owner = user("33333333", None, Some("3104567890"));
    let notifier = MockNotifier::new();
    let sent = notifier.sent_handle();
    let parameters = MockParameters::default().with(ADMIN_EMAIL_PARAMETER, "soporte@uco.edu.co");
    let uc = usecase(MockUserRepo::new(vec![owner]), &input, notifier, parameters);
    let anonymous = Executor {
        id: "service-account-7".to_owned(),
        email: None,
    };

    let result = uc.execute(input, anonymous).await;

    assert!(result.is_err());
    let sent = sent.lock().unwrap();
    let admin_mail: Vec<&Sent> = sent.iter().filter(|s| s.to() == "soporte@uco.edu.co").collect();
    assert_eq!(admin_mail.len(), 2);
    assert!(admin_mail[1].message().contains("service-account-7"));
}

#[tokio::test]
async fn should_fail_duplicate_even_when_alerts_cannot_be_delivered() {
    let input = fixture_input();
    let owner = user("44444444", Some("valentina.restrepo@uco.edu.co"), None);
    let uc = usecase(
        MockUserRepo::new(vec![owner]),
        &input,
        MockNotifier::failing(),
        MockParameters::unavailable(),
    );

    let result = uc.execute(input, executor()).await;

    assert!(matches!(
        result,
        Err(UsersServiceError::UserAlreadyExists { field: "email", .. })
    ));
}

#[tokio::test]
async fn should_list_users_newest_first_with_total() {
    let mut users = Vec::new();
    for i in 0..15 {
        let mut u = user(&format!("1000000{i:02}"), None, None);
        u.created_at += chrono::Duration::seconds(i);
        users.push(u);
    }
    let newest = users[14].id;
    let uc = ListUsersUseCase {
        users: MockUserRepo::new(users),
    };

    let first = uc.execute(PageRequest::default()).await.unwrap();
    let second = uc.execute(PageRequest { page: 1, size: 10 }).await.unwrap();

    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].id, newest);
    assert_eq!(first.total_elements, 15);
    assert_eq!(second.items.len(), 5);
    assert_eq!(second.total_pages(), 2);
}

#[tokio::test]
async fn should_clamp_oversized_pages() {
    let uc = ListUsersUseCase {
        users: MockUserRepo::empty(),
    };

    let page = uc.execute(PageRequest { page: 0, size: 5000 }).await.unwrap();

    assert_eq!(page.size, 100);
    assert!(page.items.is_empty());
}
