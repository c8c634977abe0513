// Shared prompt fragments. Each stage that calls the LLM defines its own prompts
// alongside it (see enhancer::prompts); this file holds what they have in common.

/// System prompt fragment: plain text only, ready to paste into a document.
pub const PLAIN_TEXT_SYSTEM: &str = "Respond with plain text only. \
    Do NOT wrap the answer in markdown code fences. \
    Do NOT add preambles such as 'Here is' or closing remarks. \
    Do NOT include explanations or apologies.";

/// Instruction shared by every call that touches résumé content.
pub const HONESTY_INSTRUCTION: &str = "\
    CRITICAL: Never invent employers, titles, dates, degrees, certifications, or metrics. \
    You may rephrase and reorder what the candidate wrote and surface job-description \
    keywords where the candidate's experience plausibly supports them.";
