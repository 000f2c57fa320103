//! Concrete repository implementations.

pub mod device;
pub mod schedule;

pub use device::DeviceRepository;
pub use schedule::ScheduleRepository;
