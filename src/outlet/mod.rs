use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::service::{PitchDeck, ValidationReport};

pub const REPORT_JSON: &str = "validation.json";
pub const REPORT_MARKDOWN: &str = "report.md";
pub const PITCH_DECK_MARKDOWN: &str = "pitch_deck.md";

pub trait Outlet {
    fn save(&self, report: &ValidationReport, deck: Option<&PitchDeck>) -> Result<Vec<PathBuf>>;
}

/// 把验证结果写入输出目录
pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        fs::write(&path, content).context(format!("Failed to write {}", path.display()))?;
        println!("💾 已保存: {}", path.display());
        Ok(path)
    }
}

impl Outlet for DiskOutlet {
    fn save(&self, report: &ValidationReport, deck: Option<&PitchDeck>) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir).context(format!(
            "Failed to create output directory {}",
            self.output_dir.display()
        ))?;

        let mut written = Vec::new();
        written.push(self.write(REPORT_JSON, &serde_json::to_string_pretty(report)?)?);
        written.push(self.write(REPORT_MARKDOWN, &render_report_markdown(report))?);
        if let Some(deck) = deck {
            written.push(self.write(PITCH_DECK_MARKDOWN, &deck.to_markdown())?);
        }

        Ok(written)
    }
}

/// 渲染Markdown版验证报告
pub fn render_report_markdown(report: &ValidationReport) -> String {
    let summary = &report.summary;
    let mut markdown = format!(
        "# Startup Validation: {}\n\n_Mode: {} · Generated: {} · Run: {}_\n\n",
        report.idea,
        report.mode,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.run_id
    );

    markdown.push_str("## Snapshot\n\n");
    markdown.push_str(&format!("- **Problem**: {}\n", summary.problem));
    markdown.push_str(&format!("- **Solution**: {}\n", summary.solution));
    markdown.push_str(&format!(
        "- **Market (USD bn)**: TAM {} · SAM {} · SOM {}\n",
        summary.market.tam, summary.market.sam, summary.market.som
    ));
    markdown.push_str(&format!("- **Trends**: {}\n", summary.trends.join(", ")));
    markdown.push_str(&format!("- **Risks**: {}\n\n", summary.risks.join(", ")));

    markdown.push_str("| Month | MRR (k USD) |\n|---|---|\n");
    for (month, mrr) in summary.traction.monthly_mrr.iter().enumerate() {
        markdown.push_str(&format!("| {} | {} |\n", month + 1, mrr));
    }

    markdown.push_str(&format!("\n## Report\n\n{}\n", report.report_text));
    markdown.push_str(&format!("\n## Market Research\n\n{}\n", report.sections.market));
    markdown.push_str(&format!(
        "\n## Competitor Analysis\n\n{}\n",
        report.sections.competitors
    ));
    markdown.push_str(&format!(
        "\n## Financial Model\n\n{}\n",
        report.sections.financials
    ));
    markdown
}
