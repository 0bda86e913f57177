pub mod profile;
pub mod reaction;
pub mod shared;
pub mod social;
pub mod track;
