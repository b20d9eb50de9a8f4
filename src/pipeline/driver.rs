//! Parallel filter driver: an ordered map of [`KeywordFilter::process_chunk`]
//! over a fixed-size worker pool.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::AppError;
use crate::models::RawStatement;
use crate::pipeline::filter::KeywordFilter;
use crate::pipeline::reader::Chunk;

/// Owns the worker pool for one filtering pass.
pub struct FilterDriver {
    pool: ThreadPool,
}

impl FilterDriver {
    /// Build a pool of `workers` threads (at least one).
    pub fn new(workers: usize) -> Result<Self, AppError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("filter-worker-{}", i))
            .build()?;
        Ok(Self { pool })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Filter every chunk on the pool and concatenate the survivors.
    ///
    /// Output order follows chunk submission order. The pool is consumed and
    /// shut down before concatenation.
    pub fn run(self, filter: &KeywordFilter, chunks: Vec<Chunk>) -> Vec<RawStatement> {
        let submitted = chunks.len();
        let filtered: Vec<Chunk> = self.pool.install(|| {
            chunks
                .into_par_iter()
                .map(|chunk| filter.process_chunk(chunk))
                .collect()
        });
        drop(self.pool);

        tracing::debug!(chunks = submitted, "Worker pool finished");
        filtered.into_iter().flat_map(|chunk| chunk.rows).collect()
    }
}
