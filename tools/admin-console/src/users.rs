//! Users listing: page loader, paging sanitizing and the local search box.

use crate::client::ApiClient;
use crate::model::{UserSummary, UsersPage};
use crate::poll::Poller;

pub const PAGE_SIZES: [u32; 4] = [10, 20, 30, 50];
pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_SIZE: u32 = 10;

const USERS_FAILED: &str =
    "No se pudo cargar la lista de usuarios. Intenta nuevamente en unos segundos.";

/// Negative, missing or unparsable pages become the first page.
pub fn sanitize_page(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 0)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(DEFAULT_PAGE)
}

/// Only the sizes offered by the listing are accepted.
pub fn sanitize_size(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| PAGE_SIZES.contains(v))
        .unwrap_or(DEFAULT_SIZE)
}

/// Load one page of users. There is no interval; call
/// [`Poller::refresh`] to reload after a change.
pub fn load_page(client: &ApiClient, page: u32, size: u32) -> Poller<Option<UsersPage>> {
    let client = client.clone();
    Poller::spawn(None, None, USERS_FAILED, move || {
        let client = client.clone();
        async move { client.list_users(page, size).await.map(Some) }
    })
}

/// Case-insensitive match on name, email, document, mobile or id.
/// A blank query keeps every row.
pub fn filter_users<'a>(users: &'a [UserSummary], query: &str) -> Vec<&'a UserSummary> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return users.iter().collect();
    }
    let contains = |value: Option<&str>| {
        value.is_some_and(|v| v.to_lowercase().contains(&query))
    };
    users
        .iter()
        .filter(|user| {
            contains(Some(user.full_name().as_str()))
                || contains(user.email.as_deref())
                || contains(user.document_number.as_deref())
                || contains(user.mobile_number.as_deref())
                || contains(Some(user.id.as_str()))
        })
        .collect()
}
