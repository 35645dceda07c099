//! Paged users listing for the admin page, served through the query cache.

use crate::core::gateway::USERS_QUERY_TAG;
use crate::core::identity::{ApiError, UsersApi};
use crate::core::models::UsersPublic;
use crate::core::query_cache::{MemoryQueryCache, QueryCache, QueryKey};

/// Users shown per admin page
pub const PER_PAGE: usize = 5;

/// Highest page whose offset still fits in a `usize`
pub const MAX_PAGE: usize = usize::MAX / PER_PAGE;

/// Bring a requested page number into `1..=MAX_PAGE`
pub fn clamp_page(page: usize) -> usize {
    page.clamp(1, MAX_PAGE)
}

/// Cache key of one users page
pub fn users_page_key(page: usize) -> QueryKey {
    QueryKey::new(USERS_QUERY_TAG).with("page", page)
}

/// Number of pages needed for `count` users (at least one)
pub fn page_count(count: usize) -> usize {
    count.div_ceil(PER_PAGE).max(1)
}

/// Mark every cached users page stale so listings fetch again
pub fn refresh_users(cache: &impl QueryCache) {
    cache.invalidate(USERS_QUERY_TAG);
}

/// Fetch page `page` (1-based) of users, using the cache while it is fresh
pub async fn fetch_users_page<A: UsersApi>(
    api: &A,
    cache: &MemoryQueryCache,
    page: usize,
) -> Result<UsersPublic, ApiError> {
    let page = clamp_page(page);
    let key = users_page_key(page);

    if let Some(cached) = cache.get::<UsersPublic>(&key) {
        return Ok(cached);
    }

    let mut users = api.list_users((page - 1) * PER_PAGE, PER_PAGE).await?;
    users.data.truncate(PER_PAGE);
    cache.insert(key, &users);
    Ok(users)
}
