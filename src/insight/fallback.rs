use sha2::{Digest, Sha256};

use crate::insight::summary::{MarketSize, Traction, ValidationSummary};

const MONTHS: u32 = 12;

/// 想法文本的SHA-256摘要，按256位大端整数取位
struct IdeaDigest([u8; 32]);

impl IdeaDigest {
    fn new(idea: &str) -> Self {
        Self(Sha256::digest(idea.as_bytes()).into())
    }

    /// `(h >> shift) % modulus`，h为完整的256位整数
    fn bits(&self, shift: u32, modulus: u64) -> u64 {
        let byte_shift = (shift / 8) as usize;
        let bit_shift = shift % 8;
        let bytes = &self.0;

        let mut remainder: u64 = 0;
        for i in byte_shift..bytes.len() {
            let j = i - byte_shift;
            let mut byte = bytes[j] >> bit_shift;
            if bit_shift > 0 && j > 0 {
                byte |= bytes[j - 1] << (8 - bit_shift);
            }
            remainder = (remainder * 256 + u64::from(byte)) % modulus;
        }
        remainder
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 按想法文本确定性生成的兜底指标，不同想法得到不同曲线
pub fn fallback_metrics(idea: &str) -> ValidationSummary {
    let h = IdeaDigest::new(idea);

    // 起始MRR 5–14（千美元），月增长 12–20%
    let base = 5.0 + h.bits(0, 10) as f64;
    let growth = 0.12 + h.bits(8, 9) as f64 / 100.0;

    let mut monthly_mrr = Vec::with_capacity(MONTHS as usize);
    let mut value = base;
    for month in 0..MONTHS {
        let wobble = 1.0 + (h.bits(month + 13, 4) as f64 - 1.5) * 0.02;
        value = value * (1.0 + growth) * wobble;
        monthly_mrr.push(round1(value));
    }

    // TAM 20–99（十亿美元），SAM占TAM 30–59%，SOM占SAM 20–39%
    let tam = 20.0 + h.bits(0, 80) as f64;
    let sam = round1(tam * (0.3 + h.bits(5, 30) as f64 / 100.0));
    let som = round1(sam * (0.2 + h.bits(11, 20) as f64 / 100.0));

    ValidationSummary {
        problem: "Latency and manual workflows reduce conversion and cause revenue leakage."
            .to_string(),
        solution:
            "Automate the workflow with specialized agents; integrate with existing systems."
                .to_string(),
        trends: vec![
            "Agentic workflows".to_string(),
            "LLM ops".to_string(),
            "Vertical AI platforms".to_string(),
            "Data governance".to_string(),
        ],
        risks: vec![
            "Data quality".to_string(),
            "Security & compliance".to_string(),
            "Vendor lock-in".to_string(),
            "Unit economics".to_string(),
        ],
        market: MarketSize { tam, sam, som },
        traction: Traction { monthly_mrr },
    }
}
