pub mod loader;
pub mod lookup;
pub mod memory;
