use std::collections::VecDeque;
use std::path::PathBuf;

use tabmode_core::FileOpener;

/// Hands out the files named on the command line, one per request.
#[derive(Debug, Default)]
pub struct QueuedFiles {
    queue: VecDeque<PathBuf>,
}

impl QueuedFiles {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            queue: files.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl FileOpener for QueuedFiles {
    fn choose_file(&mut self) -> Option<PathBuf> {
        self.queue.pop_front()
    }
}
