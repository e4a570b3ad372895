pub mod gallery_handlers;
pub mod inventory_handlers;
pub mod network_handlers;
