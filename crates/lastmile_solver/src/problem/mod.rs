pub mod dispatch_problem;
pub mod distance_method;
pub mod kmh;
pub mod location;
pub mod matrix;
pub mod meters;
pub mod snapshot;
pub mod store;
pub mod time_window;
pub mod truck;
pub mod warehouse;
