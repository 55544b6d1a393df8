//! Photo catalogue types.
//!
//! Field names follow the catalogue's JSON (`photoId`, `albumId`), so a
//! host can deserialize responses straight into these.

use serde::{Deserialize, Serialize};

use crate::cards::ImageRef;

/// One photo in the catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub photo_id: u64,
    pub album_id: u64,
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl Photo {
    /// Image reference shown on a card.
    #[must_use]
    pub fn image_ref(&self) -> ImageRef {
        ImageRef::new(&self.url)
    }
}

/// An album of photos.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub album_id: u64,
    #[serde(default)]
    pub photos: Vec<Photo>,
}
