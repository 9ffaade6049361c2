//! Progress reporting for copy operations

use std::sync::Arc;

/// Progress of a running copy, reported after every block
#[derive(Debug, Clone)]
pub struct CopyProgress {
    /// Total blocks to move
    pub blocks_total: u64,
    /// Blocks moved so far
    pub blocks_done: u64,
}

impl CopyProgress {
    /// Percentage complete (0-100)
    pub fn percent(&self) -> u8 {
        if self.blocks_total == 0 {
            return 100;
        }
        (self.blocks_done * 100 / self.blocks_total) as u8
    }
}

/// Callback type for progress updates
pub type ProgressCallback = Arc<dyn Fn(&CopyProgress) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        let progress = CopyProgress {
            blocks_total: 200,
            blocks_done: 50,
        };
        assert_eq!(progress.percent(), 25);
    }

    #[test]
    fn test_percent_complete() {
        let progress = CopyProgress {
            blocks_total: 219,
            blocks_done: 219,
        };
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_percent_of_empty_copy() {
        let progress = CopyProgress {
            blocks_total: 0,
            blocks_done: 0,
        };
        assert_eq!(progress.percent(), 100);
    }
}
