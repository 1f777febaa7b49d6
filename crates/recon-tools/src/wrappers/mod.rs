//! Wrapper functions, one per tool.
//!
//! Every wrapper has the [`Handler`](crate::Handler) signature: it takes the
//! resolved values in the order of the descriptor's argument tuple and
//! returns the command line, or `None` if it got the wrong number of values.
//! The first value is always the resources directory; each wrapper writes its
//! report there.

pub mod linux;
pub mod network;
pub mod web;
pub mod web_advanced;

use std::path::Path;

/// Path of `file` inside the resources directory, as a string argument.
pub(crate) fn output_path(resources_dir: &str, file: &str) -> String {
    Path::new(resources_dir)
        .join(file)
        .to_string_lossy()
        .into_owned()
}
