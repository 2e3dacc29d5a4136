// Cross-cutting prompt fragments and template filling.
// Flow-specific templates live with the flows.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that keeps the model inside the directory it was given.
pub const DIRECTORY_ONLY_INSTRUCTION: &str = "\
    CRITICAL: Only suggest providers that appear in the data you were given. \
    Do NOT make up providers, names, or contact details.";

/// Fills `{name}` placeholders in one pass. Substituted values are never
/// rescanned, and braces that don't name a variable are kept as-is.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let var = vars
            .iter()
            .find(|(name, _)| tail.starts_with(name) && tail[name.len()..].starts_with('}'));
        match var {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_substitutes_each_placeholder() {
        let filled = fill_template("{a} and {b}, {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(filled, "x and y, x");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let filled = fill_template("{a} / {b}", &[("a", "{b}"), ("b", "y")]);
        assert_eq!(filled, "{b} / y");
    }

    #[test]
    fn test_fill_template_keeps_literal_braces() {
        let filled = fill_template(r#"{"key": ["{a}"]} {"#, &[("a", "x")]);
        assert_eq!(filled, r#"{"key": ["x"]} {"#);
    }
}
