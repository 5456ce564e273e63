//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod film_repo;
pub mod reservation_repo;
pub mod salle_repo;
pub mod seance_repo;
pub mod user_repo;

pub use film_repo::FilmRepo;
pub use reservation_repo::ReservationRepo;
pub use salle_repo::SalleRepo;
pub use seance_repo::{SeanceDeleteOutcome, SeanceFilter, SeanceRepo};
pub use user_repo::UserRepo;
