//! Stack segment parser - splits one image's lines into object blocks.

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::ImodObject;

use super::object::{ObjectLocation, parse_object};
use super::splitter::{ImageSegment, LogLine};

/// Marker line starting each object's block.
pub const OBJECT_MARKER: &str = "OBJECT";

/// Split `lines` into object blocks.
///
/// Each block starts at an `OBJECT` line and runs up to the next one or
/// the end of input. Lines before the first marker are dropped.
pub fn object_blocks<'s, 'a>(lines: &'s [LogLine<'a>]) -> Vec<&'s [LogLine<'a>]> {
    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.text.contains(OBJECT_MARKER))
        .map(|(i, _)| i)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(lines.len());
            &lines[start..end]
        })
        .collect()
}

/// Parse every object of one image, in log order.
pub fn parse_segment(segment: &ImageSegment<'_>) -> Result<Vec<ImodObject>> {
    let blocks = object_blocks(segment.lines());
    if blocks.is_empty() {
        warn!(image = segment.index(), "image has no objects");
    }

    let objects = blocks
        .into_iter()
        .enumerate()
        .map(|(i, block)| parse_object(block, ObjectLocation::new(segment.index(), i + 1)))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        image = segment.index(),
        objects = objects.len(),
        "parsed image"
    );
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectType;
    use crate::parser::splitter::split_log;

    fn lines(text: &str) -> Vec<LogLine<'_>> {
        text.lines()
            .enumerate()
            .map(|(i, l)| LogLine::new(i + 1, l))
            .collect()
    }

    #[test]
    fn test_blocks_skip_preheader_and_keep_last() {
        let input = lines("header\nOBJECT #1\na\nOBJECT #2\nb\nc");
        let blocks = object_blocks(&input);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].len(), 2);
        assert_eq!(blocks[0][0].text, "OBJECT #1");
        assert_eq!(blocks[1].len(), 3);
        assert_eq!(blocks[1][2].text, "c");
    }

    #[test]
    fn test_blocks_without_marker() {
        let input = lines("header\nmore header");
        assert!(object_blocks(&input).is_empty());
    }

    #[test]
    fn test_parse_segment_in_order() {
        let log = "Entries to program clipmodel
OBJECT #1
NAME: flagellum_area
closed
CONTOUR #1,1,0  5 points, length = 10.0, area = 2.0
OBJECT #2
NAME: Gold
scattered
CONTOUR #1,2,0  4 points";
        let segments = split_log(log, "Entries to program clipmodel").unwrap();
        let objects = parse_segment(&segments[0]).unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].object_type(), ObjectType::Closed);
        assert_eq!(objects[1].name(), "Gold");
        assert_eq!(objects[1].point_count(), 4);
    }
}
