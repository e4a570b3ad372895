pub mod dialogs;
pub mod formatting;

pub use dialogs::{print_error, print_status, print_views, StatusLevel};
pub use formatting::{
    format_card, format_graph_summary, format_step, format_table, selection_heading,
};
