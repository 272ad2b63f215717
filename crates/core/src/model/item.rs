use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::ItemId;
use crate::model::image::{ImageRef, ImageRefError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ItemError {
    #[error("item id cannot be empty")]
    EmptyId,

    #[error("{locale} name cannot be empty")]
    EmptyName { locale: Locale },

    #[error(transparent)]
    InvalidImage(#[from] ImageRefError),
}

//
// ─── LOCALE ────────────────────────────────────────────────────────────────────
//

/// Language whose display name is the answer target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    Jp,
    Kr,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Jp, Locale::Kr];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Locale::Jp => "JP",
            Locale::Kr => "KR",
        }
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Locale::Jp => Locale::Kr,
            Locale::Kr => Locale::Jp,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

//
// ─── ITEM ──────────────────────────────────────────────────────────────────────
//

/// One quiz subject: an image and its two localized names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    name_jp: String,
    name_kr: String,
    image: ImageRef,
    created_at: DateTime<Utc>,
}

impl Item {
    /// # Errors
    ///
    /// Returns `ItemError::EmptyName` if either name is blank after trimming.
    pub fn new(
        id: ItemId,
        name_jp: impl Into<String>,
        name_kr: impl Into<String>,
        image: ImageRef,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ItemError> {
        let name_jp = normalize_name(name_jp.into(), Locale::Jp)?;
        let name_kr = normalize_name(name_kr.into(), Locale::Kr)?;
        Ok(Self {
            id,
            name_jp,
            name_kr,
            image,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[must_use]
    pub fn name_jp(&self) -> &str {
        &self.name_jp
    }

    #[must_use]
    pub fn name_kr(&self) -> &str {
        &self.name_kr
    }

    /// Display name in the given locale.
    #[must_use]
    pub fn name(&self, locale: Locale) -> &str {
        match locale {
            Locale::Jp => &self.name_jp,
            Locale::Kr => &self.name_kr,
        }
    }

    /// Display name in the locale that is not the target.
    #[must_use]
    pub fn other_name(&self, locale: Locale) -> &str {
        self.name(locale.other())
    }

    #[must_use]
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Same item with a different creation stamp; used when an update keeps
    /// the original one.
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

fn normalize_name(raw: String, locale: Locale) -> Result<String, ItemError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ItemError::EmptyName { locale });
    }
    Ok(trimmed.to_owned())
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated item as entered by a catalog editor or an import file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub id: String,
    pub name_jp: String,
    pub name_kr: String,
    pub image_url: String,
}

impl ItemDraft {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name_jp: impl Into<String>,
        name_kr: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name_jp: name_jp.into(),
            name_kr: name_kr.into(),
            image_url: image_url.into(),
        }
    }

    /// Validate the draft into an `Item`, normalising its image link.
    ///
    /// # Errors
    ///
    /// Returns `ItemError` for a blank id, blank names, or a blank image link.
    pub fn validate(self, created_at: DateTime<Utc>) -> Result<Item, ItemError> {
        let id = ItemId::new(self.id).map_err(|_| ItemError::EmptyId)?;
        let image = ImageRef::from_link(&self.image_url)?;
        Item::new(id, self.name_jp, self.name_kr, image, created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn draft_validates_and_trims() {
        let item = ItemDraft::new("a1", "  アヤ ", "아야", "https://x.test/a.png")
            .validate(fixed_now())
            .unwrap();
        assert_eq!(item.id().as_str(), "a1");
        assert_eq!(item.name(Locale::Jp), "アヤ");
        assert_eq!(item.name(Locale::Kr), "아야");
        assert_eq!(item.other_name(Locale::Kr), "アヤ");
    }

    #[test]
    fn draft_rejects_blank_fields() {
        let now = fixed_now();
        assert_eq!(
            ItemDraft::new("", "a", "b", "x.png").validate(now),
            Err(ItemError::EmptyId)
        );
        assert_eq!(
            ItemDraft::new("1", "a", " ", "x.png").validate(now),
            Err(ItemError::EmptyName { locale: Locale::Kr })
        );
        assert_eq!(
            ItemDraft::new("1", "a", "b", "").validate(now),
            Err(ItemError::InvalidImage(ImageRefError::Empty))
        );
    }
}
