//! Filesystem primitives beyond the basic jail.

pub mod trash;

pub use trash::{move_to_trash, trash_path};
