pub mod error;
pub mod utils;

pub use error::*;
pub use utils::collect::{
    Collected, collect, combine_sections, insert_into_changelog, order_sections, parse_version,
    write_changelog,
};
pub use utils::config::ScrivenerConfig;
pub use utils::format::{Format, FormatTools, RstTools, Section, SectionMap};
pub use utils::fragments::{
    Fragment, create_fragment, discover_fragments, fragment_file_name, read_fragments,
};
pub use utils::template::{entry_title, new_fragment_text, render_template};
