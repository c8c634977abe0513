// Prompt constants for the hosted-model enhancer.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for keyword extraction.
pub const KEYWORDS_SYSTEM: &str = "You are an expert recruiter and applicant tracking \
    system (ATS) analyst. You read job descriptions and list the terms a screening \
    system and a hiring manager will look for.";

/// Keyword extraction prompt. Replace `{job_description}` before sending.
pub const KEYWORDS_PROMPT_TEMPLATE: &str = r#"Analyze the job description below and extract the keywords a candidate's resume should contain.

Format the answer as three labeled sections, in this order:

**Top Keywords:**
A comma-separated list of the 15 most important keywords, most important first.

**Technical Skills & Requirements:**
A comma-separated list of technologies, tools, qualifications, credentials, and years-of-experience requirements.

**Soft Skills & Responsibilities:**
A comma-separated list of interpersonal skills and core responsibilities.

JOB DESCRIPTION:
{job_description}"#;

/// System prompt for résumé enhancement.
pub const RESUME_SYSTEM: &str = "You are an expert resume writer who tailors resumes to \
    specific job postings so they pass applicant tracking systems and read well to humans.";

/// Résumé enhancement prompt. Replace `{honesty_instruction}`, `{resume_text}`,
/// `{job_description}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"{honesty_instruction}

Rewrite the resume below so it targets the job description.

RULES:
1. Keep the original section order and headings
2. Start every bullet with a strong action verb (Developed, Led, Implemented, Optimized, ...)
3. Work the job description's keywords into bullets and the skills section where the experience supports them
4. Keep bullets to one or two lines
5. Return the complete resume, nothing else

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;

/// System prompt for cover letter generation.
pub const COVER_LETTER_SYSTEM: &str = "You are an expert career coach who writes concise, \
    specific cover letters grounded in the candidate's actual resume.";

/// Cover letter prompt. Replace `{honesty_instruction}`, `{position}`, `{company}`,
/// `{resume_text}`, `{job_description}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"{honesty_instruction}

Write a cover letter for the {position} role at {company}.

RULES:
1. Open with "Dear Hiring Manager,"
2. Three to four short paragraphs: interest in the role, two or three achievements from the resume that match the job, what the candidate would bring, a closing
3. Mention the position and company by name in the first paragraph
4. Use the job description's key terms naturally
5. End with "Best regards," followed by "[Your Name]"

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;
