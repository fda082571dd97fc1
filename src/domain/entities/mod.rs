//! Domain entity definitions.

mod favourite;
mod image;
mod photo;

pub use favourite::FavouriteRecord;
pub use image::{ImageSource, ImageStatus, PhotoImage};
pub use photo::{FULL_WIDTH, PICSUM_IMAGE_BASE, Photo, PhotoId, THUMBNAIL_WIDTH};
