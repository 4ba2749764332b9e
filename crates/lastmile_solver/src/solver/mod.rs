pub mod construction;
pub mod fleet;
pub mod insertion;
pub mod ls;
pub mod params;
pub mod plan;
pub mod route;
