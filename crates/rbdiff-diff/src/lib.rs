mod empty;
mod header;
mod lines;
mod strip;

pub use empty::{EmptyFileChange, EmptyFileMarkers, EmptyFileRecord, INDEX_SEPARATOR};
pub use header::{FilenameHeader, parse_filename_header};
pub use lines::{
    INDEX_PREFIX, is_complete_removal_hunk, is_index_line, is_new_file_line, is_orig_file_line,
    join_lines, split_lines, split_structural_prefix, trim_line_ending,
};
pub use strip::{strip_path_components, strip_paths};
