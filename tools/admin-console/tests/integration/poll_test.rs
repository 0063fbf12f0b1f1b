use std::time::Duration;

use uco_admin_console::{catalog, users};

use crate::helpers::{Gateway, country, spawn_gateway, wait_for};

const TICK: Duration = Duration::from_millis(20);

#[tokio::test]
async fn should_load_countries_on_start() {
    let gateway = Gateway {
        countries: vec![country("co", "Colombia")],
        ..Gateway::default()
    };
    let (client, _) = spawn_gateway(gateway).await;
    let poller = catalog::countries(&client, None);
    let mut rx = poller.subscribe();

    let state = wait_for(&mut rx, |s| !s.loading).await;

    assert_eq!(state.data.len(), 1);
    assert_eq!(state.error, None);
    assert!(state.last_updated.is_some());
}

#[tokio::test]
async fn should_not_notify_when_data_is_unchanged() {
    let gateway = Gateway {
        countries: vec![country("co", "Colombia")],
        ..Gateway::default()
    };
    let (client, shared) = spawn_gateway(gateway).await;
    let poller = catalog::countries(&client, Some(TICK));
    let mut rx = poller.subscribe();
    let first = wait_for(&mut rx, |s| !s.loading).await;
    rx.mark_unchanged();

    tokio::time::sleep(TICK * 6).await;

    assert!(shared.lock().unwrap().country_calls >= 3);
    assert!(!rx.has_changed().unwrap());
    assert_eq!(poller.state().last_updated, first.last_updated);
}

#[tokio::test]
async fn should_pick_up_changes_on_next_tick() {
    let gateway = Gateway {
        countries: vec![country("co", "Colombia")],
        ..Gateway::default()
    };
    let (client, shared) = spawn_gateway(gateway).await;
    let poller = catalog::countries(&client, Some(TICK));
    let mut rx = poller.subscribe();
    wait_for(&mut rx, |s| !s.loading).await;

    shared
        .lock()
        .unwrap()
        .countries
        .push(country("ec", "Ecuador"));
    let state = wait_for(&mut rx, |s| s.data.len() == 2).await;

    assert_eq!(state.data[1].name, "Ecuador");
}

#[tokio::test]
async fn should_keep_data_and_report_failure() {
    let gateway = Gateway {
        countries: vec![country("co", "Colombia")],
        ..Gateway::default()
    };
    let (client, shared) = spawn_gateway(gateway).await;
    let poller = catalog::countries(&client, Some(TICK));
    let mut rx = poller.subscribe();
    wait_for(&mut rx, |s| !s.loading && !s.data.is_empty()).await;

    shared.lock().unwrap().failing = true;
    let failed = wait_for(&mut rx, |s| s.error.is_some()).await;
    assert_eq!(failed.data.len(), 1);
    assert_eq!(
        failed.error.as_deref(),
        Some("No se pudieron cargar los países. Inténtalo de nuevo.")
    );

    shared.lock().unwrap().failing = false;
    let recovered = wait_for(&mut rx, |s| s.error.is_none()).await;
    assert_eq!(recovered.data.len(), 1);
}

#[tokio::test]
async fn should_refetch_on_refresh() {
    let (client, shared) = spawn_gateway(Gateway::default()).await;
    let poller = users::load_page(&client, 0, 10);
    let mut rx = poller.subscribe();
    let first = wait_for(&mut rx, |s| s.data.is_some()).await;
    assert_eq!(first.data.unwrap().users[0].id, "user-1");

    poller.refresh();
    let second = wait_for(&mut rx, |s| {
        s.data.as_ref().is_some_and(|p| p.users[0].id == "user-2")
    })
    .await;

    assert!(!second.loading);
    assert_eq!(shared.lock().unwrap().user_calls, 2);
}

#[tokio::test]
async fn should_keep_previous_page_when_reload_fails() {
    let (client, shared) = spawn_gateway(Gateway::default()).await;
    let poller = users::load_page(&client, 0, 10);
    let mut rx = poller.subscribe();
    wait_for(&mut rx, |s| s.data.is_some()).await;

    shared.lock().unwrap().failing = true;
    poller.refresh();
    let failed = wait_for(&mut rx, |s| s.error.is_some()).await;

    assert_eq!(failed.data.unwrap().users[0].id, "user-1");
    assert_eq!(
        failed.error.as_deref(),
        Some("No se pudo cargar la lista de usuarios. Intenta nuevamente en unos segundos.")
    );
}

#[tokio::test]
async fn should_report_id_types_failure() {
    let gateway = Gateway {
        failing: true,
        ..Gateway::default()
    };
    let (client, _) = spawn_gateway(gateway).await;
    let poller = catalog::id_types(&client, None);
    let mut rx = poller.subscribe();

    let state = wait_for(&mut rx, |s| !s.loading).await;

    assert!(state.data.is_empty());
    assert_eq!(
        state.error.as_deref(),
        Some("No se pudieron cargar los tipos de documento.")
    );
}

#[tokio::test]
async fn should_stop_fetching_after_cancel() {
    let (client, shared) = spawn_gateway(Gateway::default()).await;
    let poller = catalog::countries(&client, Some(TICK));
    let mut rx = poller.subscribe();
    wait_for(&mut rx, |s| !s.loading).await;

    poller.cancel();
    tokio::time::sleep(TICK * 2).await;
    let calls = shared.lock().unwrap().country_calls;
    tokio::time::sleep(TICK * 5).await;

    assert!(poller.is_cancelled());
    assert_eq!(shared.lock().unwrap().country_calls, calls);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn should_discard_result_arriving_after_cancel() {
    let gateway = Gateway {
        countries: vec![country("co", "Colombia")],
        countries_delay: Some(TICK * 5),
        ..Gateway::default()
    };
    let (client, shared) = spawn_gateway(gateway).await;
    let poller = catalog::countries(&client, None);
    while shared.lock().unwrap().country_calls == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    poller.cancel();
    tokio::time::sleep(TICK * 10).await;

    let state = poller.state();
    assert!(state.loading);
    assert!(state.data.is_empty());
    assert_eq!(state.last_updated, None);
}

#[tokio::test]
async fn should_stop_fetching_when_dropped() {
    let (client, shared) = spawn_gateway(Gateway::default()).await;
    let poller = catalog::countries(&client, Some(TICK));
    let mut rx = poller.subscribe();
    wait_for(&mut rx, |s| !s.loading).await;

    drop(poller);
    tokio::time::sleep(TICK * 2).await;
    let calls = shared.lock().unwrap().country_calls;
    tokio::time::sleep(TICK * 5).await;

    assert_eq!(shared.lock().unwrap().country_calls, calls);
}

#[tokio::test]
async fn should_stay_idle_for_blank_parent() {
    let (client, shared) = spawn_gateway(Gateway::default()).await;

    let departments = catalog::departments(&client, "  ", Some(TICK));
    let cities = catalog::cities(&client, "", Some(TICK));
    tokio::time::sleep(TICK * 3).await;

    assert!(!departments.state().loading);
    assert!(departments.state().data.is_empty());
    assert!(cities.state().data.is_empty());
    assert_eq!(shared.lock().unwrap().department_calls, 0);
}
