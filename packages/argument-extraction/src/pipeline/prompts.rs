//! Prompt templates for argument extraction and strategy selection.
//!
//! Extraction templates carry a single `{text}` substitution point for the
//! (already truncated) article body.

/// Substitution point for the article body.
pub const TEXT_PLACEHOLDER: &str = "{text}";

pub const BASELINE_PROMPT: &str = r#"Extract thesis, supporting claims, counterclaims, and evidence from this article.
Return ONLY a valid JSON with keys: thesis, supporting_claims, counterarguments, evidence (all lists).

Article:
{text}"#;

pub const FEW_SHOT_PROMPT: &str = r#"You are an expert argument analyst. I will show you examples of how to extract arguments, then you will do the same for a new article.

**Example 1:**
Article: "Electric vehicles are the future. They produce zero emissions and reduce oil dependency. However, critics worry about battery disposal."

Output:
{
  "thesis": ["Electric vehicles are the future of transportation"],
  "supporting_claims": ["They produce zero emissions", "Reduce oil dependency"],
  "counterarguments": ["Critics worry about battery disposal"],
  "evidence": []
}

**Example 2:**
Article: "The new policy will create jobs, according to economists. Studies show 50,000 new positions. But some fear increased costs."

Output:
{
  "thesis": ["The new policy will create jobs"],
  "supporting_claims": ["According to economists, it will create employment"],
  "counterarguments": ["Some fear increased costs"],
  "evidence": ["Studies show 50,000 new positions"]
}

**Now analyze this article:**

{text}

Return JSON only:
{"thesis": [], "supporting_claims": [], "counterarguments": [], "evidence": []}"#;

pub const CHAIN_OF_THOUGHT_PROMPT: &str = r#"You are an expert argument analyst. Analyze this article step-by-step:

**Step 1: Read and identify the main debate**
First, determine what issue or question the article addresses.

**Step 2: Find the thesis**
What is the main claim or position the article advocates? (1-2 statements)

**Step 3: Extract supporting claims**
What reasons or arguments support the thesis? (2-5 claims)

**Step 4: Look for counterarguments**
Are there opposing views, criticisms, or alternative perspectives mentioned? Look for phrases like "critics argue", "however", "on the other hand". (0-3 if present)

**Step 5: Identify evidence**
What facts, statistics, quotes, or examples back up the claims? (2-5 pieces)

**Article:**
{text}

**Now provide your analysis as JSON:**
{"thesis": [], "supporting_claims": [], "counterarguments": [], "evidence": []}"#;

pub const ROLE_BASED_PROMPT: &str = r#"You are a professional debate coach and argument analyst with 15 years of experience in identifying logical structures in persuasive texts.

Your expertise includes:
- Identifying implicit arguments and unstated assumptions
- Recognizing subtle counterarguments and opposing viewpoints
- Distinguishing between claims and evidence
- Extracting verbatim quotes and factual support

**Your task:** Extract the argument structure from this news article.

**What to extract:**

**THESIS** - The main position or claim (1-2 statements)
- Look for: Overall message, main point, primary argument

**SUPPORTING CLAIMS** - Reasons that support the thesis (2-5 claims)
- Look for: Because statements, justifications, rationales

**COUNTERARGUMENTS** - Opposing views mentioned (0-3 if present)
- Look for: "Critics say", "However", "Some argue", "Opposition claims", skeptical voices

**EVIDENCE** - Facts, data, quotes, examples (2-5 pieces)
- Look for: Statistics, study results, expert quotes, specific examples, data points

**Important:** Extract text as it appears in the article. Be thorough but precise.

**Article:**
{text}

**Return JSON only:**
{"thesis": [], "supporting_claims": [], "counterarguments": [], "evidence": []}"#;

pub const CONTRASTIVE_PROMPT: &str = r#"You are an expert argument analyst. Extract arguments following these guidelines:

**DO:**
- Extract text verbatim or nearly verbatim from the article
- Look carefully for opposing views (even if subtle)
- Include all types of evidence: numbers, quotes, studies, examples
- Be thorough and capture ALL relevant arguments

**DON'T:**
- Infer arguments not explicitly stated
- Paraphrase excessively
- Miss subtle counterarguments hidden in phrases like "critics argue", "some worry"
- Skip over evidence buried in the text

**Extract:**

1. **THESIS**: Main claim/position (1-2 statements)
2. **SUPPORTING CLAIMS**: Reasons supporting thesis (2-5 claims)
3. **COUNTERARGUMENTS**: Opposing views mentioned (0-3 if present)
4. **EVIDENCE**: Facts, stats, quotes, examples (2-5 pieces)

**Article:**
{text}

**JSON output:**
{"thesis": [], "supporting_claims": [], "counterarguments": [], "evidence": []}"#;

pub const STRUCTURED_OUTPUT_PROMPT: &str = r#"<task>
Extract argument structure from news article
</task>

<role>
Expert argument analyst
</role>

<instructions>
1. Read article to identify the debate/issue
2. Extract THESIS: main position (1-2 statements)
3. Extract SUPPORTING_CLAIMS: reasons for thesis (2-5 items)
4. Extract COUNTERARGUMENTS: opposing views mentioned (0-3 items)
   - Pay special attention to: "critics", "however", "some argue", "opponents"
5. Extract EVIDENCE: facts, stats, quotes, examples (2-5 items)
</instructions>

<extraction_rules>
- Use verbatim or near-verbatim text from article
- Be comprehensive, not selective
- If category is absent, return empty list
- Preserve original meaning and tone
</extraction_rules>

<output_format>
Valid JSON with keys: thesis, supporting_claims, counterarguments, evidence
All values must be lists of strings
</output_format>

<article>
{text}
</article>

<output>
{"thesis": [], "supporting_claims": [], "counterarguments": [], "evidence": []}
</output>"#;

pub const RECURSIVE_PROMPT: &str = r#"You are an expert argument analyst. Extract arguments from this article using a two-pass approach:

**PASS 1: Initial extraction**
First, extract all arguments you can find.

**PASS 2: Critical review**
Review your Pass 1 extraction and ask:
- Did I miss any counterarguments? Look for "critics", "however", "some say"
- Did I miss any evidence? Look for statistics, quotes, studies
- Are my thesis statements too broad or too narrow?
- Did I capture enough supporting claims?

**PASS 3: Final refined output**
Provide your improved extraction incorporating insights from your review.

**Categories to extract:**
- THESIS: Main position (1-2 statements)
- SUPPORTING CLAIMS: Reasons supporting thesis (2-5)
- COUNTERARGUMENTS: Opposing views (0-3 if present)
- EVIDENCE: Facts, stats, quotes, examples (2-5)

**Article:**
{text}

**Provide your final refined extraction as JSON:**
{"thesis": [], "supporting_claims": [], "counterarguments": [], "evidence": []}"#;

/// Prompt for the policy oracle choosing a strategy.
pub const SELECT_STRATEGY_PROMPT: &str = r#"Choose the BEST extraction strategy for this article.

Article Type: {category}
Preview: {preview}...

Options: {options}

Respond with ONLY the strategy name."#;

/// Render an extraction template with an already-truncated article body.
///
/// Only the first placeholder is substituted, and the body itself is never
/// re-scanned, so article text containing `{text}` is left alone.
pub fn render_template(template: &str, body: &str) -> String {
    template.replacen(TEXT_PLACEHOLDER, body, 1)
}

/// Format the strategy selection prompt.
pub fn format_select_prompt(category: &str, preview: &str, options: &[&str]) -> String {
    SELECT_STRATEGY_PROMPT
        .replace("{options}", &options.join(", "))
        .replace("{category}", category)
        .replacen("{preview}", preview, 1)
}

/// Keep at most `max_chars` characters (not bytes) of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TEMPLATES: [&str; 7] = [
        BASELINE_PROMPT,
        FEW_SHOT_PROMPT,
        CHAIN_OF_THOUGHT_PROMPT,
        ROLE_BASED_PROMPT,
        CONTRASTIVE_PROMPT,
        STRUCTURED_OUTPUT_PROMPT,
        RECURSIVE_PROMPT,
    ];

    #[test]
    fn test_every_template_has_one_placeholder() {
        for template in ALL_TEMPLATES {
            assert_eq!(template.matches(TEXT_PLACEHOLDER).count(), 1);
        }
    }

    #[test]
    fn test_render_template() {
        let rendered = render_template(BASELINE_PROMPT, "Taxes should rise.");
        assert!(rendered.ends_with("Article:\nTaxes should rise."));
        assert!(!rendered.contains(TEXT_PLACEHOLDER));
    }

    #[test]
    fn test_render_does_not_rescan_body() {
        let rendered = render_template(RECURSIVE_PROMPT, "literal {text} marker");
        assert!(rendered.contains("literal {text} marker"));
    }

    #[test]
    fn test_format_select_prompt() {
        let formatted = format_select_prompt("complex", "Some preview", &["baseline", "few_shot"]);
        assert!(formatted.contains("Article Type: complex"));
        assert!(formatted.contains("Preview: Some preview..."));
        assert!(formatted.contains("Options: baseline, few_shot"));
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }
}
