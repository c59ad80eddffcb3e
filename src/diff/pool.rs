//! Parallel structuring of file blocks with a fixed set of workers.
//!
//! Workers share one bounded input queue and one bounded output queue. A
//! single aggregator task drains the output queue while blocks are still
//! being submitted, so backpressure can never deadlock the submitter.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::debug;

use crate::diff::segment::structure_block;
use crate::diff::types::{FileBlock, FileRecord};
use crate::error::DiffError;

/// The pool is only worth its coordination cost above this many files.
pub const PARALLEL_THRESHOLD: usize = 5;

pub const MIN_WORKERS: usize = 2;
pub const MAX_WORKERS: usize = 8;

/// Pick a worker count for an estimated number of files.
pub fn worker_count_for(file_count: usize) -> usize {
    match file_count {
        0..=10 => MIN_WORKERS,
        11..=50 => 4,
        51..=100 => 6,
        _ => MAX_WORKERS,
    }
}

/// Function applied by each worker to one block.
pub type StructureFn = dyn Fn(&FileBlock) -> FileRecord + Send + Sync;

/// A fixed-size pool of structuring workers.
pub struct WorkerPool {
    workers: usize,
    structure: Arc<StructureFn>,
}

impl WorkerPool {
    /// Pool that classifies blocks with [`structure_block`].
    pub fn new(workers: usize) -> Self {
        Self::with_structure_fn(workers, Arc::new(structure_block))
    }

    /// Pool with a custom per-block function.
    pub fn with_structure_fn(workers: usize, structure: Arc<StructureFn>) -> Self {
        Self {
            workers: workers.max(1),
            structure,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Structure all blocks and return the records in input order.
    ///
    /// Fails if any worker terminates abnormally or if fewer records come
    /// back than blocks went in; a partial file list is never returned.
    pub async fn run(&self, blocks: Vec<FileBlock>) -> Result<Vec<FileRecord>, DiffError> {
        let expected = blocks.len();
        let capacity = self.workers * 2;

        let (input_tx, input_rx) = mpsc::channel::<FileBlock>(capacity);
        let (output_tx, mut output_rx) = mpsc::channel::<(usize, FileRecord)>(capacity);
        let input_rx = Arc::new(Mutex::new(input_rx));

        let mut workers = JoinSet::new();
        for id in 0..self.workers {
            let input_rx = Arc::clone(&input_rx);
            let output_tx = output_tx.clone();
            let structure = Arc::clone(&self.structure);

            workers.spawn(async move {
                let mut processed = 0usize;
                loop {
                    let next = input_rx.lock().await.recv().await;
                    let Some(block) = next else { break };

                    let record = structure(&block);
                    if output_tx.send((block.index, record)).await.is_err() {
                        break;
                    }
                    processed += 1;
                }
                debug!("diff worker {} exiting after {} block(s)", id, processed);
            });
        }
        // Workers hold the only remaining senders: the output queue closes
        // once every worker has exited.
        drop(output_tx);
        drop(input_rx);

        let aggregator = tokio::spawn(async move {
            let mut collected = Vec::with_capacity(expected);
            while let Some(item) = output_rx.recv().await {
                collected.push(item);
            }
            collected
        });

        for block in blocks {
            if input_tx.send(block).await.is_err() {
                // Every worker is gone; the join below reports why.
                break;
            }
        }
        drop(input_tx);

        while let Some(joined) = workers.join_next().await {
            joined.map_err(|e| DiffError::WorkerFailed(e.to_string()))?;
        }

        let mut collected = aggregator
            .await
            .map_err(|e| DiffError::AggregatorFailed(e.to_string()))?;

        if collected.len() != expected {
            return Err(DiffError::IncompleteResults {
                expected,
                received: collected.len(),
            });
        }

        collected.sort_by_key(|(index, _)| *index);
        Ok(collected.into_iter().map(|(_, record)| record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::segment::{split_file_blocks, structure_sequential};

    fn synthetic_diff(count: usize) -> String {
        (0..count)
            .map(|i| {
                format!(
                    "diff --git a/pkg/mod{i}/file{i}.go b/pkg/mod{i}/file{i}.go\nnew file mode 100644\n@@ -0,0 +1 @@\n+package mod{i}\n"
                )
            })
            .collect()
    }

    #[test]
    fn test_worker_count_policy() {
        assert_eq!(worker_count_for(0), 2);
        assert_eq!(worker_count_for(10), 2);
        assert_eq!(worker_count_for(11), 4);
        assert_eq!(worker_count_for(50), 4);
        assert_eq!(worker_count_for(51), 6);
        assert_eq!(worker_count_for(100), 6);
        assert_eq!(worker_count_for(101), 8);
        assert_eq!(worker_count_for(200), 8);
        assert_eq!(worker_count_for(100_000), MAX_WORKERS);
    }

    #[test]
    fn test_pool_has_at_least_one_worker() {
        assert_eq!(WorkerPool::new(0).workers(), 1);
    }

    #[tokio::test]
    async fn test_pool_matches_sequential() {
        let blocks = split_file_blocks(&synthetic_diff(40));
        let expected = structure_sequential(&blocks);

        let records = WorkerPool::new(4).run(blocks).await.unwrap();
        assert_eq!(records, expected);
    }

    #[tokio::test]
    async fn test_pool_with_more_blocks_than_queue_capacity() {
        // 2 workers -> queues of 4; 200 blocks must still drain
        let blocks = split_file_blocks(&synthetic_diff(200));
        let records = WorkerPool::new(2).run(blocks).await.unwrap();
        assert_eq!(records.len(), 200);
        assert_eq!(records[199].path, "pkg/mod199/file199.go");
    }

    #[tokio::test]
    async fn test_pool_with_no_blocks() {
        let records = WorkerPool::new(3).run(Vec::new()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_worker_panic_is_reported() {
        let structure: Arc<StructureFn> = Arc::new(|block: &FileBlock| {
            if block.index == 7 {
                panic!("corrupt block");
            }
            structure_block(block)
        });
        let blocks = split_file_blocks(&synthetic_diff(30));

        let result = WorkerPool::with_structure_fn(3, structure).run(blocks).await;
        assert!(
            matches!(result, Err(DiffError::WorkerFailed(_))),
            "Expected WorkerFailed, got: {:?}",
            result.map(|r| r.len())
        );
    }
}
