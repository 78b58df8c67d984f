//! Process-wide, lock-guarded device registry.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use super::types::{
    DEFAULT_DEVICE_NAME, DEFAULT_DEVICE_TYPE, DEFAULT_ID_BASE, DEFAULT_LOCATION, DEFAULT_POWER_KW,
    Device, NewDevice, normalize_id_base, seed_devices,
};

/// Number of trailing Unix-second digits used as the id time token.
const TIME_TOKEN_DIGITS: u64 = 1_000_000;

/// Ordered collection of [`Device`] records.
///
/// Every operation holds one mutex for its whole read-modify-write, so a
/// `list` never observes a partially applied mutation and ids stay unique.
#[derive(Debug)]
pub struct DeviceRegistry {
    devices: Mutex<Vec<Device>>,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::with_seed_devices()
    }
}

impl DeviceRegistry {
    /// Creates a registry holding the four seed devices.
    pub fn with_seed_devices() -> Self {
        Self::from_devices(seed_devices())
    }

    /// Creates a registry from an explicit record list.
    ///
    /// Later records whose id repeats an earlier one are dropped.
    pub fn from_devices(devices: Vec<Device>) -> Self {
        let mut unique: Vec<Device> = Vec::with_capacity(devices.len());
        for device in devices {
            if unique.iter().all(|d| d.device_id != device.device_id) {
                unique.push(device);
            }
        }
        Self {
            devices: Mutex::new(unique),
        }
    }

    // A panic while holding the lock cannot leave the Vec half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<Device>> {
        self.devices.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all records in insertion order.
    pub fn list(&self) -> Vec<Device> {
        self.lock().clone()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a copy of the record with the given id.
    pub fn get(&self, device_id: &str) -> Option<Device> {
        self.lock().iter().find(|d| d.device_id == device_id).cloned()
    }

    /// Creates and appends a device, returning the stored record.
    ///
    /// The id is the normalized name plus a time token taken from the
    /// current Unix time.
    pub fn add(&self, new: NewDevice) -> Device {
        self.add_with_token(new, time_token())
    }

    /// Same as [`add`](Self::add) with an explicit time token.
    ///
    /// If `"{base}_{token}"` is already taken, `_2`, `_3`, ... is appended
    /// until the id is free.
    pub fn add_with_token(&self, new: NewDevice, token: u64) -> Device {
        let base = new
            .name
            .as_deref()
            .map_or_else(|| DEFAULT_ID_BASE.to_string(), normalize_id_base);

        let mut devices = self.lock();
        let candidate = format!("{base}_{token:06}");
        let mut device_id = candidate.clone();
        let mut n = 2;
        while devices.iter().any(|d| d.device_id == device_id) {
            device_id = format!("{candidate}_{n}");
            n += 1;
        }

        let device = Device {
            device_id,
            device_name: new.name.unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_string()),
            device_type: new
                .device_type
                .unwrap_or_else(|| DEFAULT_DEVICE_TYPE.to_string()),
            current_power: new.power_kw.unwrap_or(DEFAULT_POWER_KW),
            location: new.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            is_active: new.is_active.unwrap_or(true),
        };
        devices.push(device.clone());
        tracing::info!(
            device_id = %device.device_id,
            device_type = %device.device_type,
            "device added"
        );
        device
    }

    /// Removes the record with the given id. Returns whether one was removed.
    pub fn delete(&self, device_id: &str) -> bool {
        let mut devices = self.lock();
        match devices.iter().position(|d| d.device_id == device_id) {
            Some(idx) => {
                devices.remove(idx);
                tracing::info!(device_id, "device deleted");
                true
            }
            None => {
                tracing::debug!(device_id, "delete: no such device");
                false
            }
        }
    }

    /// Flips `is_active` on the record with the given id.
    ///
    /// Returns whether a record matched. Other fields are untouched.
    pub fn toggle(&self, device_id: &str) -> bool {
        let mut devices = self.lock();
        match devices.iter_mut().find(|d| d.device_id == device_id) {
            Some(device) => {
                device.is_active = !device.is_active;
                tracing::info!(device_id, is_active = device.is_active, "device toggled");
                true
            }
            None => {
                tracing::debug!(device_id, "toggle: no such device");
                false
            }
        }
    }
}

/// Last six digits of the current Unix time in seconds.
fn time_token() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() % TIME_TOKEN_DIGITS)
}
