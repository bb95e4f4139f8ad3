// Prompt templates for the four evaluation stages.
// Placeholders: {resume} (redacted resume), {job_description} (redacted JD).
// The gap stage's 40/30/20/10 weighting is an instruction to the model; the score is
// never recomputed locally.

// ── Stage 1: Parse ──────────────────────────────────────────────────────────

pub const PARSER_ROLE: &str = "Resume Parser";
pub const PARSER_GOAL: &str = "Extract and structure key information from resumes";
pub const PARSER_BACKSTORY: &str =
    "Expert at parsing resumes and extracting skills, experience, education";

pub const PARSE_INSTRUCTIONS: &str = r#"
Parse this resume and extract:
- Personal information
- Skills (technical and soft)
- Work experience
- Education
- Certifications

Resume: {resume}
"#;

pub const PARSE_EXPECTED_OUTPUT: &str =
    "Clear summary of candidate's skills, experience, and qualifications in readable text";

// ── Stage 2: Analyze ────────────────────────────────────────────────────────

pub const ANALYZER_ROLE: &str = "Job Description Analyzer";
pub const ANALYZER_GOAL: &str = "Analyze job descriptions and extract requirements";
pub const ANALYZER_BACKSTORY: &str =
    "Specialist in understanding job requirements and qualifications";

pub const ANALYZE_INSTRUCTIONS: &str = r#"
Analyze this job description and extract:
- Required skills
- Preferred qualifications
- Experience requirements
- Education requirements

Job Description: {job_description}
"#;

pub const ANALYZE_EXPECTED_OUTPUT: &str =
    "Clear summary of job requirements and qualifications in readable text";

// ── Stage 3: Gap ────────────────────────────────────────────────────────────

pub const DETECTOR_ROLE: &str = "Skill Gap Detector";
pub const DETECTOR_GOAL: &str = "Identify missing skills and calculate ATS compatibility";
pub const DETECTOR_BACKSTORY: &str =
    "Expert at comparing candidate profiles with job requirements";

pub const GAP_INSTRUCTIONS: &str = r#"
Compare the parsed resume with job requirements and calculate precise scores:

CRITICAL: You MUST provide an exact ATS compatibility score as a number between 0-100.

Calculate based on:
- Skills match (40% weight)
- Experience relevance (30% weight)
- Education alignment (20% weight)
- Keywords presence (10% weight)

Provide:
- **ATS Score: [EXACT NUMBER]/100** (e.g., ATS Score: 75/100)
- Missing skills list (top 5)
- Matching percentage for overall fit
- Areas of strength

IMPORTANT: Always include "ATS Score: [NUMBER]/100" in your response.
"#;

pub const GAP_EXPECTED_OUTPUT: &str =
    "Skill gap analysis with exact ATS score (0-100), missing skills, and match percentage";

// ── Stage 4: Recommend ──────────────────────────────────────────────────────

pub const RECOMMENDER_ROLE: &str = "Career Recommendation Specialist";
pub const RECOMMENDER_GOAL: &str =
    "Provide actionable recommendations and generate improved content";
pub const RECOMMENDER_BACKSTORY: &str =
    "Career coach specializing in resume optimization and salary insights";

pub const RECOMMEND_INSTRUCTIONS: &str = r#"
Write a career recommendation report in PLAIN TEXT format (NOT JSON).

CRITICAL: Include the ATS score from the skill gap analysis at the top.

Structure it like this:

### Career Recommendations

**ATS Compatibility Score: [EXTRACT FROM PREVIOUS ANALYSIS]/100**

**Top Missing Skills:**
1. Skill 1
2. Skill 2
3. Skill 3
4. Skill 4
5. Skill 5

**Resume Improvements:**
- Suggestion 1
- Suggestion 2
- Suggestion 3

**Cover Letter Tips:**
- Tip 1
- Tip 2
- Tip 3

**ATS Optimization:**
- Use keywords from job description
- Simple formatting
- Standard section headings

IMPORTANT: Extract and display the exact ATS score from the skill gap analysis. Write in readable text format, NOT JSON.
"#;

pub const RECOMMEND_EXPECTED_OUTPUT: &str =
    "Career report with ATS score, missing skills, and recommendations in markdown format";
