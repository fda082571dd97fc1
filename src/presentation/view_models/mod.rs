//! Screen view-models consuming the catalog and favourites services.

mod detail;
mod error;
mod favourites;
mod grid;
mod view_state;

pub use detail::PhotoDetailViewModel;
pub use error::{ErrorKind, ErrorViewModel};
pub use favourites::FavouritesViewModel;
pub use grid::PhotoGridViewModel;
pub use view_state::ViewState;
