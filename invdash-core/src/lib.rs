// Public modules
pub mod config;
pub mod error;
pub mod filtering;
pub mod gallery;
pub mod graph;
pub mod io;
pub mod models;
pub mod schema_validation;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::{
    config_schema, load_config, DashboardConfig, GalleryConfig, InventoryConfig, NetworkColumns,
    NetworkView, NodeCategory,
};
pub use error::DashboardError;
pub use filtering::{
    cascade_options, filter, matches_all, matches_selection, options_for, parse_selection_args,
    parse_tags, resolve_cascade, ALL_SENTINEL,
};
pub use gallery::{gallery_files, parse_image_index, stray_files, GalleryImage, PageState};
pub use graph::{node_color, wrap_label, Edge, RelationshipGraph};
pub use io::{load_table, parse_table, sniff_delimiter, Delimiter, TableSource};
pub use models::{
    CascadeResult, FacetKind, FacetSpec, FacetStep, FilterOutcome, Record, Selection, Table,
};
pub use schema_validation::validate_against_schema;
pub use validation::validate_config;
