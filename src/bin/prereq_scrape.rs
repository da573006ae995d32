use anyhow::Context;
use clap::Parser;
use unb_advisor::adapters::sigaa::{export_prerequisites, select_offering};
use unb_advisor::utils::{logger, validation::Validate};
use unb_advisor::{LocalStorage, ScrapeArgs, SigaaScraper};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ScrapeArgs::parse();
    logger::init(args.verbose, args.json_logs);

    args.validate().context("invalid arguments")?;
    let config = args.scrape_config().context("invalid scrape configuration")?;
    tracing::debug!("Scrape config: {:?}", config);

    let scraper = SigaaScraper::new(config)?;
    let results = scraper
        .search()
        .await
        .with_context(|| format!("search on {} failed", scraper.listing_url()))?;

    if args.list {
        for (i, offering) in results.offerings.iter().enumerate() {
            println!("{:>3}  {}", i, offering.title);
        }
        return Ok(());
    }

    let offering = select_offering(&results.offerings, args.title.as_deref(), args.index)?;
    let prerequisites = scraper
        .prerequisites(&results, offering)
        .await
        .with_context(|| format!("could not read details of '{}'", offering.title))?;

    println!("📚 {}", offering.title);
    if prerequisites.is_empty() {
        println!("   (sem pré-requisitos)");
    }
    for prerequisite in &prerequisites {
        println!("   {}  {}", prerequisite.codigo, prerequisite.nome);
    }

    if let Some(output) = &args.output {
        let storage = LocalStorage::new(".".to_string());
        export_prerequisites(&storage, output, &prerequisites).await?;
        tracing::info!("📁 Output saved to: {}", output);
    }

    Ok(())
}
