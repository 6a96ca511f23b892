pub mod date_place;
pub mod name;
pub mod person;
pub mod source;

pub use date_place::DatePlace;
pub use name::Name;
pub use person::{Gender, Partnership, Person, PLACEHOLDER_ID};
pub use source::{Reference, Source};
