//! Input transports for the newline-delimited path list.

pub mod fs;

pub use fs::{PathList, read_path_list, read_path_list_from};
