//! Statement pipeline: read, filter, and classify a corpus.
//!
//! Stages, in order:
//!
//! - [`reader`] - chunked NDJSON reading, malformed lines skipped and counted
//! - [`filter`] - space-padded keyword pre-filter
//! - [`driver`] - ordered parallel map of the filter over a worker pool
//! - [`classify`] - stance, topic, behavior, and media source enrichment
//!
//! Only filtering runs in parallel; classification is sequential.
//!
//! ```ignore
//! let pipeline = Pipeline::from_config(&config)?;
//! let output = pipeline.run_path(Path::new("statements.jsonl"))?;
//! println!("{} statements kept", output.statements.len());
//! ```

pub mod classify;
pub mod driver;
pub mod filter;
pub mod keywords;
pub mod reader;

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

pub use classify::{extract_media_source, infer_behavior, Classifier};
pub use driver::FilterDriver;
pub use filter::KeywordFilter;
pub use keywords::{KeywordMatcher, MatchMode};
pub use reader::{Chunk, ChunkReader, ReadStats};

use crate::config::Config;
use crate::error::AppError;
use crate::models::{EnrichedStatement, StatementType, Topic};

/// Counts describing one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub read: ReadStats,
    pub chunks: usize,
    pub kept: usize,
    pub by_type: HashMap<StatementType, usize>,
    pub by_topic: HashMap<Topic, usize>,
}

impl PipelineStats {
    fn tally(&mut self, statements: &[EnrichedStatement]) {
        self.kept = statements.len();
        for s in statements {
            *self.by_type.entry(s.statement_type).or_default() += 1;
            *self.by_topic.entry(s.topic).or_default() += 1;
        }
    }

    pub fn type_count(&self, ty: StatementType) -> usize {
        self.by_type.get(&ty).copied().unwrap_or(0)
    }

    pub fn topic_count(&self, topic: Topic) -> usize {
        self.by_topic.get(&topic).copied().unwrap_or(0)
    }
}

/// Enriched statements plus run statistics.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub statements: Vec<EnrichedStatement>,
    pub stats: PipelineStats,
}

/// Configured filter + classifier with chunking and pool settings.
#[derive(Debug, Clone)]
pub struct Pipeline {
    filter: KeywordFilter,
    classifier: Classifier,
    chunk_size: usize,
    workers: usize,
}

impl Pipeline {
    pub fn new(
        filter: KeywordFilter,
        classifier: Classifier,
        chunk_size: usize,
        workers: usize,
    ) -> Self {
        Self {
            filter,
            classifier,
            chunk_size,
            workers,
        }
    }

    /// Compile keyword sets and pool settings from configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self::new(
            KeywordFilter::new(&config.keywords.filter)?,
            Classifier::new(&config.keywords)?,
            config.pipeline.chunk_size,
            config.pipeline.effective_workers(),
        ))
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Run over a corpus file.
    pub fn run_path(&self, path: &Path) -> Result<PipelineOutput, AppError> {
        tracing::info!(path = %path.display(), "Reading corpus");
        self.run_reader(ChunkReader::open(path, self.chunk_size)?)
    }

    /// Run over any buffered reader of NDJSON lines.
    pub fn run<R: BufRead>(&self, input: R) -> Result<PipelineOutput, AppError> {
        self.run_reader(ChunkReader::new(input, self.chunk_size))
    }

    fn run_reader<R: BufRead>(&self, mut reader: ChunkReader<R>) -> Result<PipelineOutput, AppError> {
        let chunks = reader.by_ref().collect::<Result<Vec<Chunk>, AppError>>()?;
        let mut stats = PipelineStats {
            read: reader.stats(),
            chunks: chunks.len(),
            ..Default::default()
        };
        tracing::info!(
            chunks = stats.chunks,
            records = stats.read.records,
            malformed = stats.read.malformed,
            "Corpus read"
        );

        let driver = FilterDriver::new(self.workers)?;
        tracing::info!(workers = driver.workers(), "Filtering chunks");
        let filtered = driver.run(&self.filter, chunks);
        tracing::info!(kept = filtered.len(), "Filtering complete");

        let statements: Vec<EnrichedStatement> = filtered
            .into_iter()
            .map(|raw| self.classifier.enrich(raw))
            .collect();
        stats.tally(&statements);

        Ok(PipelineOutput { statements, stats })
    }
}
