/// Strip markdown code fences from a completion response.
///
/// Models occasionally wrap JSON output in ```json fences even when asked
/// not to; callers parse the stripped text.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}
