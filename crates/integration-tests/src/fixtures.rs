//! Backend payloads shared by the integration tests.
//!
//! Users:
//! - `o1` owner, `a1` admin, `m1` moderator
//! - `u1` regular user, not banned, not verified
//! - `u2` regular user on Pro with a pending verification request
//! - `u3` regular user, banned and blocked

use serde_json::{Value, json};

#[must_use]
pub fn users() -> Value {
    json!([
        { "id": "o1", "username": "label_owner", "email": "owner@mytrack.example",
          "role": "owner", "plan": "ultimate", "is_verified": true, "status": "active", "page_count": 3 },
        { "id": "a1", "username": "night_admin", "email": "admin@mytrack.example",
          "role": "admin", "plan": "pro", "status": "active", "page_count": 1 },
        { "id": "m1", "username": "mod_squad", "role": "moderator", "plan": "free",
          "status": "active", "page_count": 0 },
        { "id": "u1", "username": "bedroom_producer", "email": "u1@mytrack.example",
          "role": "user", "plan": "free", "is_banned": false, "is_verified": false,
          "status": "active", "page_count": 1 },
        { "id": "u2", "username": "indie_band", "role": "user", "plan": "pro",
          "status": "active", "page_count": 2 },
        { "id": "u3", "username": "spam_account", "role": "user", "plan": "free",
          "is_banned": true, "status": "blocked", "page_count": 0 }
    ])
}

#[must_use]
pub fn pages() -> Value {
    json!([
        page("p1", "u1", "bedroom_producer", "active"),
        page("p2", "u2", "indie_band", "disabled")
    ])
}

/// One page row with the given status.
#[must_use]
pub fn page(id: &str, user_id: &str, username: &str, status: &str) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "title": format!("{username} links"),
        "slug": username,
        "status": status,
        "views": 120,
        "total_clicks": 45,
        "cover_image": format!("/uploads/{id}.jpg"),
        "user": { "username": username }
    })
}

#[must_use]
pub fn verification_requests() -> Value {
    json!([
        verification_request("r1", "u2", "pending"),
        verification_request("r2", "u1", "pending"),
        verification_request("r3", "u3", "rejected")
    ])
}

#[must_use]
pub fn verification_request(id: &str, user_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "artist_name": format!("Artist {user_id}"),
        "username": user_id,
        "email": format!("{user_id}@mytrack.example"),
        "social_links": "https://soundcloud.example/artist",
        "status": status,
        "created_at": "2025-03-01T12:30:00"
    })
}

#[must_use]
pub fn plan_configs() -> Value {
    json!([
        { "plan_name": "free", "max_pages_limit": 1, "can_use_custom_design": false,
          "has_analytics": false, "has_advanced_analytics": false,
          "can_remove_branding": false, "priority_support": false },
        { "plan_name": "pro", "max_pages_limit": 10, "can_use_custom_design": true,
          "has_analytics": true, "has_advanced_analytics": false,
          "can_remove_branding": false, "priority_support": false },
        { "plan_name": "ultimate", "max_pages_limit": -1, "can_use_custom_design": true,
          "has_analytics": true, "has_advanced_analytics": true,
          "can_remove_branding": true, "priority_support": true }
    ])
}

#[must_use]
pub fn global_analytics() -> Value {
    json!({
        "total_users": 6,
        "total_pages": 2,
        "total_views": 240,
        "total_clicks": 90,
        "total_shares": 12,
        "total_qr_scans": 4,
        "timeline": [
            { "date": "2025-03-01", "clicks": 40 },
            { "date": "2025-03-02", "clicks": 50 }
        ],
        "by_country": [
            { "country": "Россия", "clicks": 60 },
            { "country": "Unknown", "clicks": 30 }
        ]
    })
}

#[must_use]
pub fn system_metrics() -> Value {
    json!({
        "cpu": { "percent": 35.5, "count": 4 },
        "memory": { "percent": 72.0, "used": 6_442_450_944_u64, "total": 8_589_934_592_u64 },
        "disk": { "percent": 91.0, "used": 48_318_382_080_u64, "total": 53_687_091_200_u64 }
    })
}
