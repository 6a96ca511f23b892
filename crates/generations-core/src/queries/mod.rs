pub mod relations;

pub use relations::{split_persons, PersonRef};
