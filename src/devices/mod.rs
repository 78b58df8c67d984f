//! Device records and the in-memory registry that owns them.

/// Lock-guarded registry with add/delete/toggle.
pub mod registry;
pub mod types;

pub use registry::DeviceRegistry;
pub use types::{Device, NewDevice, normalize_id_base, seed_devices};
