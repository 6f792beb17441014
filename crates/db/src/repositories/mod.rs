//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&DbPool` as the first argument.

pub mod album_repo;
pub mod photo_repo;
pub mod session_repo;
pub mod trip_repo;
pub mod user_repo;

pub use album_repo::AlbumRepo;
pub use photo_repo::PhotoRepo;
pub use session_repo::SessionRepo;
pub use trip_repo::TripRepo;
pub use user_repo::UserRepo;
