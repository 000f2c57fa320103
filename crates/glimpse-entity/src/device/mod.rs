//! Device registration entities.

pub mod model;
pub mod platform;

pub use model::DeviceRegistration;
pub use platform::DevicePlatform;
