use serde::{Deserialize, Serialize};

use crate::llm::client::utils::truncate_chars;
use crate::service::ValidationReport;

/// 没有验证结果时使用的想法名称
pub const DEFAULT_IDEA: &str = "Your Startup";
/// 叙述部分写入prompt的最大字符数
const NARRATIVE_CHARS: usize = 800;

const SLIDES: [&str; 12] = [
    "Hook",
    "Problem",
    "Solution",
    "Market",
    "Business Model",
    "Traction",
    "Competition",
    "Trends",
    "Risks",
    "Team",
    "The Ask",
    "Vision",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub bullets: Vec<String>,
}

/// 路演材料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchDeck {
    pub title: String,
    pub slides: Vec<Slide>,
}

impl PitchDeck {
    /// 按空行切分幻灯片，每块首行为标题，其余为要点
    pub fn parse(idea: &str, content: &str) -> Self {
        let slides = content
            .trim()
            .split("\n\n")
            .filter_map(|block| {
                let mut lines = block.lines().map(str::trim).filter(|line| !line.is_empty());
                let title = lines.next()?.to_string();
                let bullets = lines.map(str::to_string).collect();
                Some(Slide { title, bullets })
            })
            .collect();

        Self {
            title: format!("Startup Pitch Deck: {}", idea),
            slides,
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut markdown = format!("# {}\n", self.title);
        for slide in &self.slides {
            markdown.push_str(&format!("\n## {}\n\n", slide.title));
            for (i, bullet) in slide.bullets.iter().enumerate() {
                let text = strip_numbering(bullet);
                markdown.push_str(&format!("{}. {}\n", i + 1, text));
            }
        }
        markdown
    }
}

/// 去掉模型自带的`1.`/`-`等序号前缀
fn strip_numbering(bullet: &str) -> &str {
    let without_digits = bullet.trim_start_matches(|c: char| c.is_ascii_digit());
    let stripped = if without_digits.len() != bullet.len() {
        without_digits.trim_start_matches(['.', ')'])
    } else {
        bullet.trim_start_matches(['-', '*', '•'])
    };
    stripped.trim_start()
}

fn join_or_na(items: &[String]) -> String {
    if items.is_empty() {
        "n/a".to_string()
    } else {
        items.join(", ")
    }
}

pub(crate) fn deck_prompt(report: Option<&ValidationReport>) -> String {
    let findings = match report {
        Some(report) => {
            let summary = &report.summary;
            let mrr = summary
                .traction
                .monthly_mrr
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Idea: {idea}\n\nCurrent Findings:\n- Problem: {problem}\n- Solution: {solution}\n- Trends: {trends}\n- Risks: {risks}\n- Market (billions): TAM={tam}, SAM={sam}, SOM={som}\n- Traction (k MRR): [{mrr}]\n- Narrative: {narrative}",
                idea = report.idea,
                problem = summary.problem,
                solution = summary.solution,
                trends = join_or_na(&summary.trends),
                risks = join_or_na(&summary.risks),
                tam = summary.market.tam,
                sam = summary.market.sam,
                som = summary.market.som,
                mrr = mrr,
                narrative = truncate_chars(&report.report_text, NARRATIVE_CHARS),
            )
        }
        None => format!(
            "Idea: {}\n\nCurrent Findings:\n- n/a (draft a generic deck)",
            DEFAULT_IDEA
        ),
    };

    let slides = SLIDES
        .iter()
        .enumerate()
        .map(|(i, slide)| format!("{}. {}", i + 1, slide))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert startup strategist and pitch deck writer.\nCreate concise, investor-ready slide content with numbered bullets for each slide below.\n\n{findings}\n\nSlides:\n{slides}\n\nOutput format:\n- Separate slides with a blank line.\n- Each slide starts with the slide title on the first line.\n- Then 3–6 short numbered bullets."
    )
}
