//! Stats subcommand - node and relationship counts.

use crate::config::Config;
use crate::repositories::SchemaRepository;

pub async fn run(config: &Config) -> color_eyre::Result<()> {
    let client = super::connect(config).await?;
    let stats = SchemaRepository::new(&client).stats().await?;
    drop(client);

    println!("Nodes ({}):", stats.total_nodes());
    for (label, count) in &stats.nodes {
        println!("  {:<16} {}", label, count);
    }
    println!("Relationships ({}):", stats.total_relationships());
    for (rel_type, count) in &stats.relationships {
        println!("  {:<16} {}", rel_type, count);
    }
    Ok(())
}
