// All LLM prompt constants for the Generation module.

/// System prompt for resume rendering — enforces raw-LaTeX-only output.
pub const RESUME_SYSTEM: &str = "You are an expert resume writer producing \
    ATS-optimized LaTeX resumes (target ATS score 90+). \
    You MUST respond with pure LaTeX only, starting at \\documentclass. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or commentary outside the LaTeX source. \
    Do NOT invent facts not present in the applicant details.";

/// Resume prompt template. Replace: `{name}`, `{contact}`, `{education}`,
/// `{skills}`, `{achievements}`, `{projects}`, `{jd_text}`.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Create a LaTeX resume tailored to the job description below.

Applicant details:
Name: {name}
Contact: {contact}
Education: {education}
Skills: {skills}
Achievements: {achievements}
Projects:
{projects}

Job Description:
{jd_text}

Emphasize the skills and achievements most relevant to the job description.
Output pure LaTeX that compiles with pdflatex and standard packages only."#;

/// System prompt for cold-email composition.
pub const EMAIL_SYSTEM: &str = "You are a career coach writing concise, \
    personalized cold emails to recruiters. \
    Respond with the email text only — no subject-line options, \
    no commentary, no markdown formatting.";

/// Cold-email prompt template. Replace: `{recruiter_name}`, `{company}`,
/// `{job_title}`, `{resume_filename}`.
pub const EMAIL_PROMPT_TEMPLATE: &str = r#"Write a concise, personalized cold email to {recruiter_name} at {company}
about the {job_title} role.
- Mention the attached resume named {resume_filename}
- Professional, polite, 3 short paragraphs
- End with a call to action for an interview"#;
