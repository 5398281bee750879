//! Slot storage implementations.

pub mod json_slot_storage;
pub mod memory_slot_storage;

pub use json_slot_storage::JsonSlotStorage;
pub use memory_slot_storage::MemorySlotStorage;
