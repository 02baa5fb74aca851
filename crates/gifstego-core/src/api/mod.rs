pub mod hide;
pub mod recover;
mod shared;

pub(crate) use shared::*;
