pub mod formatter;

pub use formatter::{
    combo_title, format_summary_table, human_readable, should_use_colors, tier_label,
};
