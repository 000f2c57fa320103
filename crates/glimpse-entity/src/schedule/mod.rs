//! Moment-window schedule entities.

pub mod model;
pub mod status;

pub use model::MomentWindow;
pub use status::WindowStatus;
