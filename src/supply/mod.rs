//! Photo supply: where deck images come from.

pub mod photo;
pub mod source;

pub use photo::{Album, Photo};
pub use source::{AlbumPhotoSupply, PhotoSupply, StaticPhotoSupply};
