//! Business workflows on top of the db and crypto layers.

pub mod inbox;
pub mod submit;
