//! Evaluation report: final artifact of one pipeline run.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::pipeline::stage::{StageId, StageResult};

/// Upper bound on the missing-skills list.
pub const MAX_MISSING_SKILLS: usize = 5;

// Accepts "ATS Score: 75/100", "ATS Compatibility Score: 75/100" and bolded variants
// such as "**ATS Score:** 75/100".
static ATS_SCORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)ATS(?:\s+Compatibility)?\s+Score\s*:?[\s*]*(\d{1,3})\s*/\s*100")
        .expect("valid ats score regex")
});

static MISSING_SKILLS_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)missing\s+skills").expect("valid missing-skills regex"));

static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s+(.+?)\s*$").expect("valid list item regex")
});

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// `None` when neither the final report nor the gap analysis carried a parseable score.
    pub ats_score: Option<u8>,
    pub missing_skills: Vec<String>,
    pub report: String,
    pub stages: Vec<StageResult>,
}

impl EvaluationReport {
    /// Assembles the report from the cleaned final text and every stage result.
    /// The score comes from the final text, falling back to the gap analysis.
    pub fn from_stages(report: String, stages: Vec<StageResult>) -> Self {
        let ats_score = extract_ats_score(&report).or_else(|| {
            stages
                .iter()
                .find(|r| r.stage == StageId::Gap)
                .and_then(|r| extract_ats_score(&r.output))
        });

        if ats_score.is_none() {
            warn!("Evaluation report carries no extractable ATS score");
        }

        let missing_skills = extract_missing_skills(&report, MAX_MISSING_SKILLS);

        Self {
            ats_score,
            missing_skills,
            report,
            stages,
        }
    }
}

/// First `ATS Score: N/100` with 0 ≤ N ≤ 100.
pub fn extract_ats_score(text: &str) -> Option<u8> {
    ATS_SCORE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u8>().ok())
        .find(|score| *score <= 100)
}

/// List items under the first "Missing Skills" heading, bold markers removed, at most `limit`.
pub fn extract_missing_skills(text: &str, limit: usize) -> Vec<String> {
    let mut lines = text.lines().skip_while(|l| !MISSING_SKILLS_HEADING_RE.is_match(l));
    if lines.next().is_none() {
        return Vec::new();
    }

    let mut skills = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            if skills.is_empty() {
                continue;
            }
            break;
        }
        let Some(caps) = LIST_ITEM_RE.captures(line) else {
            break;
        };
        let skill = caps[1].replace("**", "").trim().to_string();
        if !skill.is_empty() {
            skills.push(skill);
        }
        if skills.len() == limit {
            break;
        }
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    const FINAL_REPORT: &str = "### Career Recommendations

**ATS Compatibility Score: 68/100**

**Top Missing Skills:**
1. AWS
2. **Docker**
3. Kubernetes
4. Terraform
5. CI/CD
6. GraphQL

**Resume Improvements:**
- Quantify impact";

    #[test]
    fn test_extract_ats_score_plain_and_bold() {
        assert_eq!(extract_ats_score("ATS Score: 75/100"), Some(75));
        assert_eq!(extract_ats_score("**ATS Score:** 0/100"), Some(0));
        assert_eq!(extract_ats_score("ats score: 100 / 100"), Some(100));
        assert_eq!(extract_ats_score(FINAL_REPORT), Some(68));
    }

    #[test]
    fn test_extract_ats_score_rejects_out_of_range_and_missing() {
        assert_eq!(extract_ats_score("ATS Score: 150/100"), None);
        assert_eq!(extract_ats_score("ATS Score: 150/100 ... ATS Score: 40/100"), Some(40));
        assert_eq!(extract_ats_score("no score here"), None);
    }

    #[test]
    fn test_missing_skills_bounded_to_five() {
        let skills = extract_missing_skills(FINAL_REPORT, MAX_MISSING_SKILLS);
        assert_eq!(skills, vec!["AWS", "Docker", "Kubernetes", "Terraform", "CI/CD"]);
    }

    #[test]
    fn test_missing_skills_stop_at_next_heading() {
        let text = "Missing skills:\n- Go\n- Rust\n**Strengths:**\n- Python";
        assert_eq!(extract_missing_skills(text, 5), vec!["Go", "Rust"]);
    }

    #[test]
    fn test_missing_skills_absent_heading() {
        assert!(extract_missing_skills("ATS Score: 50/100", 5).is_empty());
    }

    #[test]
    fn test_report_falls_back_to_gap_stage_score() {
        let stages = vec![StageResult {
            stage: StageId::Gap,
            output: "**ATS Score: 55/100**".to_string(),
        }];
        let report = EvaluationReport::from_stages("No score restated.".to_string(), stages);
        assert_eq!(report.ats_score, Some(55));
    }

    #[test]
    fn test_report_prefers_final_text_score() {
        let stages = vec![StageResult {
            stage: StageId::Gap,
            output: "ATS Score: 55/100".to_string(),
        }];
        let report = EvaluationReport::from_stages(FINAL_REPORT.to_string(), stages);
        assert_eq!(report.ats_score, Some(68));
        assert_eq!(report.missing_skills.len(), 5);
    }
}
