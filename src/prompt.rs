const PREAMBLE: &str = "You are an expert senior software engineer and a world-class technical writer specializing in code review and release notes.

Your task is to analyze the provided code changes for a given file and generate detailed, clear, and concise change notes.
";

const INSTRUCTIONS: &str = "**Instructions:**

Based on the changes between \"Code Before\" and \"Code Now\", generate a detailed code change note. The note should be well-structured and include the following sections if applicable:

1.  **Summary of Changes:** A high-level overview of what was changed.
2.  **Detailed Analysis:**
    *   **Behavior Before:** Describe the functionality, logic, and potential performance characteristics of the old code.
    *   **Behavior Now:** Describe the new functionality, logic, and how it differs from the old version.
    *   **Reason for Change:** Infer the likely reason for the change (e.g., bug fix, feature addition, performance optimization, refactoring for readability).
3.  **Impact Assessment:**
    *   **Performance:** Analyze any potential performance improvements or regressions.
    *   **Readability & Maintainability:** Comment on how the changes affect the code's clarity and ease of future maintenance.
    *   **Potential Risks:** Highlight any potential new bugs or edge cases introduced by the change.

Format the output in Markdown for clear readability. Use headings, bold text, and bullet points to structure the information effectively.
";

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    filename: String,
    before_code: String,
    after_code: String,
}

impl GenerationRequest {
    pub fn new(
        filename: impl Into<String>,
        before_code: impl Into<String>,
        after_code: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            before_code: before_code.into(),
            after_code: after_code.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn before_code(&self) -> &str {
        &self.before_code
    }

    pub fn after_code(&self) -> &str {
        &self.after_code
    }

    pub fn to_prompt(&self) -> String {
        build(&self.filename, &self.before_code, &self.after_code)
    }
}

/// Inputs are embedded verbatim; callers validate them beforehand.
pub fn build(filename: &str, before_code: &str, after_code: &str) -> String {
    let inputs_len = filename.len() + before_code.len() + after_code.len();
    let mut prompt = String::with_capacity(PREAMBLE.len() + INSTRUCTIONS.len() + inputs_len + 96);
    prompt.push('\n');
    prompt.push_str(PREAMBLE);
    prompt.push_str("\n**File Name:**\n");
    prompt.push_str(filename);
    prompt.push_str("\n\n**Code Before:**\n");
    push_fenced(&mut prompt, before_code);
    prompt.push_str("\n**Code Now:**\n");
    push_fenced(&mut prompt, after_code);
    prompt.push('\n');
    prompt.push_str(INSTRUCTIONS);
    prompt
}

fn push_fenced(prompt: &mut String, code: &str) {
    prompt.push_str(FENCE);
    prompt.push('\n');
    prompt.push_str(code);
    prompt.push('\n');
    prompt.push_str(FENCE);
    prompt.push('\n');
}
