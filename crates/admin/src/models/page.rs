//! Link pages owned by MyTrack users.

use mytrack_core::{PageId, PageStatus, UserId};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use super::null_as_default;

/// A public link page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub slug: String,
    /// Anything but `active` reads as disabled.
    #[serde(default, deserialize_with = "lossy_status")]
    pub status: PageStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_clicks: u64,
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Owner summary embedded by the admin listing.
    #[serde(default)]
    pub user: Option<PageOwner>,
}

/// Owner summary embedded in a page listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOwner {
    pub username: String,
}

/// Body returned by the page status toggle endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TogglePageResponse {
    pub message: String,
}

impl Page {
    /// Owner's username, or `"Unknown"` when the listing omits it.
    #[must_use]
    pub fn owner_name(&self) -> &str {
        self.user.as_ref().map_or("Unknown", |u| u.username.as_str())
    }

    /// Public path of the page (`/{slug}`).
    #[must_use]
    pub fn public_path(&self) -> String {
        format!("/{}", self.slug)
    }

    /// Absolute cover image URL.
    ///
    /// Covers stored by the backend are root-relative and resolve against the
    /// backend origin; external covers are returned unchanged.
    #[must_use]
    pub fn cover_url(&self, backend: &Url) -> Option<String> {
        let cover = self.cover_image.as_deref().filter(|c| !c.is_empty())?;
        if cover.starts_with('/') {
            let origin = backend.as_str().trim_end_matches('/');
            Some(format!("{origin}{cover}"))
        } else {
            Some(cover.to_string())
        }
    }
}

fn lossy_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PageStatus, D::Error> {
    let key = Option::<String>::deserialize(deserializer)?;
    Ok(key.map_or(PageStatus::Disabled, |k| PageStatus::parse_lossy(&k)))
}
