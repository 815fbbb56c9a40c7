//! Log file loading shared by the command line tools.

use std::fs::File;
use std::path::Path;

use goldarea_core::api::decode_log;
use goldarea_core::{GoldAreaError, Result};
use memmap2::Mmap;

/// Map the log file and decode it as text.
pub fn load_log(path: &Path) -> Result<String> {
    let read_err = |source| GoldAreaError::ReadLog {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    if file.metadata().map_err(read_err)?.len() == 0 {
        return Ok(String::new());
    }
    let mmap = unsafe { Mmap::map(&file) }.map_err(read_err)?;
    Ok(decode_log(&mmap).into_owned())
}
