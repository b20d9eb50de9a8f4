//! Enrich subcommand - filter and classify a corpus to NDJSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::Config;
use crate::error::AppError;
use crate::models::EnrichedStatement;
use crate::pipeline::Pipeline;

/// Filter and classify a corpus.
#[derive(Parser)]
pub struct EnrichCommand {
    /// NDJSON corpus, one statement per line.
    pub input: PathBuf,

    /// Where to write enriched NDJSON (stdout when omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl EnrichCommand {
    pub fn run(self, config: &Config) -> color_eyre::Result<()> {
        let pipeline = Pipeline::from_config(config)?;
        let output = pipeline.run_path(&self.input)?;

        match &self.output {
            Some(path) => {
                write_ndjson(BufWriter::new(File::create(path)?), &output.statements)?;
                tracing::info!(path = %path.display(), "Wrote enriched statements");
            }
            None => write_ndjson(BufWriter::new(io::stdout().lock()), &output.statements)?,
        }

        super::print_summary(&output.stats);
        Ok(())
    }
}

/// One JSON object per line.
pub fn write_ndjson<W: Write>(mut out: W, statements: &[EnrichedStatement]) -> Result<(), AppError> {
    for statement in statements {
        serde_json::to_writer(&mut out, statement)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Read enriched NDJSON written by [`write_ndjson`].
pub fn read_ndjson(path: &Path) -> Result<Vec<EnrichedStatement>, AppError> {
    let content = std::fs::read_to_string(path)?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(AppError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordConfig;
    use crate::models::RawStatement;
    use crate::pipeline::Classifier;

    #[test]
    fn test_ndjson_written_then_read_back() {
        let classifier = Classifier::new(&KeywordConfig::default()).unwrap();
        let statements = vec![
            classifier.enrich(RawStatement {
                pre: "residents".into(),
                verb: "defy".into(),
                post: "the curfew".into(),
                date: Some("2020-03-03".into()),
                urls: None,
            }),
            classifier.enrich(RawStatement {
                pre: "schools".into(),
                verb: "reopened".into(),
                ..Default::default()
            }),
        ];

        let file = tempfile::NamedTempFile::new().unwrap();
        write_ndjson(File::create(file.path()).unwrap(), &statements).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().next().unwrap().contains(r#""statement_type":"defiance""#));

        assert_eq!(read_ndjson(file.path()).unwrap(), statements);
    }
}
