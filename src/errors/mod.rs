pub mod error_mapper;

pub use error_mapper::map_dashboard_error;
