use anyhow::Result;
use clap::Parser;

use startup_validator::outlet::{DiskOutlet, Outlet};
use startup_validator::{ValidationService, cli, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let idea = args.idea.clone();
    let config = args.into_config()?;
    logging::init(config.verbose);

    let service = ValidationService::new(&config);

    println!("🔍 正在验证创业想法: {}", idea.trim());
    let report = service.validate(&idea, config.mode.as_str()).await?;

    let deck = if config.output.pitch_deck {
        println!("🖊️ 正在生成路演材料...");
        Some(service.pitch_deck().await)
    } else {
        None
    };

    let outlet = DiskOutlet::new(&config.output.output_path);
    outlet.save(&report, deck.as_ref())?;

    println!(
        "✅ 验证完成 (mode: {}), TAM/SAM/SOM = {}/{}/{} (十亿美元)",
        report.mode, report.summary.market.tam, report.summary.market.sam, report.summary.market.som
    );
    Ok(())
}
