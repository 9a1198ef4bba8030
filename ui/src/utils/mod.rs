#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod task;
