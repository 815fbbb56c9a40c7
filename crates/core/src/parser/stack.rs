//! Stack aggregation - parses every image segment into the image stack.

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::model::{ImodObject, Stack};

use super::segment::parse_segment;
use super::splitter::{ImageSegment, LogSplitter};

/// Parse a whole area log into a `Stack`.
///
/// With `threads` above one, images are parsed on a rayon pool; the
/// stack is the same as for sequential parsing.
pub fn parse_stack(text: &str, boundary: &str, threads: Option<usize>) -> Result<Stack> {
    let segments = LogSplitter::new(boundary).split(text)?;
    info!(images = segments.len(), "split log into images");

    let per_image = match threads {
        Some(n) if n > 1 && segments.len() > 1 => parse_parallel(&segments, n)?,
        _ => segments
            .iter()
            .map(parse_segment)
            .collect::<Result<Vec<_>>>()?,
    };

    Ok(Stack::from_objects(per_image))
}

fn parse_parallel(segments: &[ImageSegment<'_>], threads: usize) -> Result<Vec<Vec<ImodObject>>> {
    let pool = ThreadPoolBuilder::new().num_threads(threads).build();
    let Ok(pool) = pool else {
        // Fall back to the calling thread if no pool can be built.
        return segments.iter().map(parse_segment).collect();
    };

    let mut results: Vec<(usize, Result<Vec<ImodObject>>)> = pool.install(|| {
        segments
            .par_iter()
            .map(|segment| (segment.index(), parse_segment(segment)))
            .collect()
    });

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, objects)| objects).collect()
}
