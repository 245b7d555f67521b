//! Point-file ingestion.
//!
//! A point file is a whitespace separated stream of integers read as consecutive `x y` pairs.
//! Pairs are inserted in file order. Loading stops at end of file or at the first token that
//! is not a 32-bit integer; a trailing lone `x` is ignored. Points read before the stop stay
//! in the tree.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::AugmentedTree;
use crate::error::Result;

/// Builds a tree from the point file at `path`.
///
/// # Errors
/// - [`Error::Io`](crate::Error::Io) if the file cannot be opened or read.
/// - [`Error::Allocation`](crate::Error::Allocation) if a node cannot be allocated; the
///   load is aborted.
pub fn load_file(path: impl AsRef<Path>) -> Result<AugmentedTree> {
    let path = path.as_ref();
    let file = File::open(path).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "cannot open point file");
    })?;
    debug!(path = %path.display(), "loading points");
    load_points(BufReader::new(file))
}

/// Builds a tree from point records read from `reader`.
///
/// # Errors
/// - [`Error::Io`](crate::Error::Io) if reading fails.
/// - [`Error::Allocation`](crate::Error::Allocation) or
///   [`Error::CapacityExceeded`](crate::Error::CapacityExceeded) if a node cannot be added.
///
/// # Example
/// ```
/// use avlbox::load_points;
/// let tree = load_points("0 0\n3 4\n10 10\n".as_bytes()).unwrap();
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.count_in_circle(0, 0, 5), 2);
/// ```
pub fn load_points<R: BufRead>(mut reader: R) -> Result<AugmentedTree> {
    let mut tree = AugmentedTree::new();
    let mut pending: Option<i32> = None;
    let mut line = String::new();
    let mut line_no = 0usize;

    'lines: loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        line_no += 1;

        for token in line.split_ascii_whitespace() {
            let Ok(value) = token.parse::<i32>() else {
                warn!(line = line_no, token, loaded = tree.len(), "stopping at invalid point record");
                break 'lines;
            };
            match pending.take() {
                None => pending = Some(value),
                Some(x) => {
                    let _ = tree.try_insert(x, value)?;
                }
            }
        }
    }

    if let Some(x) = pending {
        debug!(x, "ignoring incomplete trailing point record");
    }
    debug!(points = tree.len(), height = tree.height(), "point file loaded");
    Ok(tree)
}
