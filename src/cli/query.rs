//! Query subcommand - rank statements by media coverage.

use clap::Parser;

use crate::config::Config;
use crate::models::InfluenceRecord;
use crate::repositories::InfluenceRepository;

use super::InfluenceArgs;

/// Run the media-influence query.
#[derive(Parser)]
pub struct QueryCommand {
    #[command(flatten)]
    pub influence: InfluenceArgs,

    /// Print records as JSON (input for `visualize --input`).
    #[arg(long)]
    pub json: bool,
}

impl QueryCommand {
    pub async fn run(self, config: &Config) -> color_eyre::Result<()> {
        let query = self.influence.to_query();
        let client = super::connect(config).await?;
        let records = InfluenceRepository::new(&client).find(&query).await?;
        drop(client);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else if records.is_empty() {
            println!("No records for {}", query.title());
        } else {
            println!("{}", query.title());
            for record in &records {
                println!("{}", format_record(record));
            }
        }
        Ok(())
    }
}

fn format_record(record: &InfluenceRecord) -> String {
    format!(
        "{:>4}  {:<16} {:<10}  {}",
        record.media_coverage,
        record.media_source.as_deref().unwrap_or("Unknown Source"),
        record.date.as_deref().unwrap_or("No Date"),
        record.statement.as_deref().unwrap_or("No Statement"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record_with_placeholders() {
        let line = format_record(&InfluenceRecord {
            media_coverage: 3,
            statement: Some("crowds defied the curfew".into()),
            ..Default::default()
        });
        assert!(line.starts_with("   3  Unknown Source"));
        assert!(line.contains("No Date"));
        assert!(line.ends_with("crowds defied the curfew"));
    }
}
