//! Photo supplies.
//!
//! A `PhotoSupply` hands the session image references to build a deck
//! from. It may return fewer than requested, or nothing at all; the session
//! treats an empty result as `EmptyPhotoSupply` and the caller decides when
//! to try again.

use rustc_hash::FxHashSet;

use super::photo::Album;
use crate::cards::ImageRef;
use crate::core::GameResult;

/// Source of deck images.
pub trait PhotoSupply {
    /// Fetch up to `count` distinct image references.
    fn fetch(&self, count: usize) -> GameResult<Vec<ImageRef>>;
}

/// Supply backed by a fixed list.
#[derive(Clone, Debug, Default)]
pub struct StaticPhotoSupply {
    images: Vec<ImageRef>,
}

impl StaticPhotoSupply {
    pub fn new<I, T>(images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageRef>,
    {
        Self {
            images: images.into_iter().map(Into::into).collect(),
        }
    }
}

impl PhotoSupply for StaticPhotoSupply {
    fn fetch(&self, count: usize) -> GameResult<Vec<ImageRef>> {
        Ok(self.images.iter().take(count).cloned().collect())
    }
}

/// Supply built from a photo catalogue.
///
/// Albums are taken in `album_id` order, at most `photos_per_album` from
/// each, and repeated URLs are skipped.
#[derive(Clone, Debug)]
pub struct AlbumPhotoSupply {
    albums: Vec<Album>,
    photos_per_album: usize,
}

impl AlbumPhotoSupply {
    pub fn new(mut albums: Vec<Album>, photos_per_album: usize) -> Self {
        albums.sort_by_key(|album| album.album_id);
        Self {
            albums,
            photos_per_album,
        }
    }

    /// Albums in the order they are drawn from.
    #[must_use]
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }
}

impl PhotoSupply for AlbumPhotoSupply {
    fn fetch(&self, count: usize) -> GameResult<Vec<ImageRef>> {
        let mut seen = FxHashSet::default();
        let images: Vec<ImageRef> = self
            .albums
            .iter()
            .flat_map(|album| album.photos.iter().take(self.photos_per_album))
            .filter(|photo| seen.insert(photo.url.as_str()))
            .take(count)
            .map(|photo| photo.image_ref())
            .collect();

        tracing::debug!(requested = count, supplied = images.len(), "Photos fetched");
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supply::Photo;

    fn album(album_id: u64, photo_ids: &[u64]) -> Album {
        Album {
            album_id,
            photos: photo_ids
                .iter()
                .map(|&photo_id| Photo {
                    photo_id,
                    album_id,
                    url: format!("https://img/{photo_id}.jpg"),
                    title: String::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_static_supply_truncates() {
        let supply = StaticPhotoSupply::new(["a", "b", "c"]);

        assert_eq!(supply.fetch(2).unwrap(), vec![ImageRef::new("a"), ImageRef::new("b")]);
        assert_eq!(supply.fetch(10).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_static_supply() {
        let supply = StaticPhotoSupply::default();
        assert!(supply.fetch(5).unwrap().is_empty());
    }

    #[test]
    fn test_album_supply_orders_and_limits() {
        let supply = AlbumPhotoSupply::new(
            vec![album(2, &[20, 21, 22]), album(1, &[10, 11, 12])],
            2,
        );

        let urls: Vec<String> = supply
            .fetch(10)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            urls,
            vec![
                "https://img/10.jpg",
                "https://img/11.jpg",
                "https://img/20.jpg",
                "https://img/21.jpg",
            ]
        );
    }

    #[test]
    fn test_album_supply_skips_repeated_urls() {
        let supply = AlbumPhotoSupply::new(vec![album(1, &[1, 1, 2])], 5);
        assert_eq!(supply.fetch(10).unwrap().len(), 2);
    }

    #[test]
    fn test_album_supply_respects_count() {
        let supply = AlbumPhotoSupply::new(vec![album(1, &[1, 2, 3, 4])], 5);
        assert_eq!(supply.fetch(3).unwrap().len(), 3);
    }
}
