//! Gallery Photo Model

use serde::{Deserialize, Serialize};

/// Gallery photo; listed by `display_order` ascending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct GalleryPhoto {
    pub id: String,
    pub user_id: String,
    pub photo_url: String,
    pub caption: Option<String>,
    pub display_order: Option<i32>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryPhotoCreate {
    pub photo_url: String,
    pub caption: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryPhotoUpdate {
    pub photo_url: Option<String>,
    pub caption: Option<String>,
    pub display_order: Option<i32>,
}

impl GalleryPhoto {
    pub fn apply(&mut self, update: GalleryPhotoUpdate) {
        if let Some(v) = update.photo_url {
            self.photo_url = v;
        }
        if update.caption.is_some() {
            self.caption = update.caption;
        }
        if update.display_order.is_some() {
            self.display_order = update.display_order;
        }
    }

    /// Sort key: explicit order first (ascending), unordered photos last
    pub fn sort_key(&self) -> (bool, i32, i64) {
        (
            self.display_order.is_none(),
            self.display_order.unwrap_or_default(),
            self.created_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_puts_unordered_last() {
        let mut photos = vec![
            GalleryPhoto {
                id: "c".into(),
                display_order: None,
                created_at: 1,
                ..Default::default()
            },
            GalleryPhoto {
                id: "b".into(),
                display_order: Some(2),
                ..Default::default()
            },
            GalleryPhoto {
                id: "a".into(),
                display_order: Some(1),
                ..Default::default()
            },
        ];
        photos.sort_by_key(GalleryPhoto::sort_key);
        let ids: Vec<_> = photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
