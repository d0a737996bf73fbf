use std::sync::Arc;

use crate::traits::Inputs;
use crate::worker::Worker;

#[derive(Debug, Clone)]
pub struct Task {
    pub description: String,
    pub expected_output: String,
    pub worker: Arc<Worker>,
}

impl Task {
    pub fn new(description: &str, expected_output: &str, worker: Arc<Worker>) -> Self {
        Task {
            description: description.to_string(),
            expected_output: expected_output.to_string(),
            worker,
        }
    }

    /// User message for this task with inputs filled in and the previous
    /// task's output, if any, appended as context.
    pub fn prompt(&self, inputs: &Inputs, context: Option<&str>) -> String {
        let mut prompt = format!(
            "Current Task: {}\n\nThis is the expected criteria for your final answer: {}\nYou MUST return the actual complete content as the final answer, not a summary.",
            interpolate(&self.description, inputs),
            interpolate(&self.expected_output, inputs),
        );

        if let Some(context) = context {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            prompt.push_str(context);
        }

        prompt
    }
}

/// Replaces `{key}` with the matching input. Unknown keys stay as written.
pub fn interpolate(template: &str, inputs: &Inputs) -> String {
    fill_placeholders(template, |key| inputs.get(key).map(String::as_str))
}

/// Single left-to-right pass over `template`. Substituted text is never
/// scanned again, so a value that looks like a placeholder stays literal.
pub fn fill_placeholders<'a, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        filled.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let key = &after[..close];
                match lookup(key) {
                    Some(value) => filled.push_str(value),
                    None => {
                        filled.push('{');
                        filled.push_str(key);
                        filled.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                filled.push('{');
                rest = after;
            }
        }
    }

    filled.push_str(rest);
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker() -> Arc<Worker> {
        Arc::new(Worker::new("r", "g", "b", vec![]))
    }

    #[test]
    fn interpolate_fills_known_keys_only() {
        let inputs = Inputs::from([("topic".to_string(), "robotics".to_string())]);

        assert_eq!(
            interpolate("Trends in {topic} for {year}", &inputs),
            "Trends in robotics for {year}"
        );
        assert_eq!(interpolate("no placeholders", &Inputs::new()), "no placeholders");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let inputs = Inputs::from([
            ("a".to_string(), "{b}".to_string()),
            ("b".to_string(), "X".to_string()),
        ]);

        for _ in 0..50 {
            let fresh = inputs.clone().into_iter().collect::<Inputs>();
            assert_eq!(interpolate("{a}", &fresh), "{b}");
            assert_eq!(interpolate("{b}{a}", &fresh), "X{b}");
        }
    }

    #[test]
    fn stray_braces_are_kept() {
        let inputs = Inputs::from([("k".to_string(), "v".to_string())]);

        assert_eq!(interpolate("{{k}", &inputs), "{v");
        assert_eq!(interpolate("open { and {k} close }", &inputs), "open { and v close }");
        assert_eq!(interpolate("trailing {", &inputs), "trailing {");
        assert_eq!(interpolate("{}", &inputs), "{}");
    }

    #[test]
    fn prompt_includes_criteria_and_context() {
        let task = Task::new("Research {topic}", "Five ideas", worker());
        let inputs = Inputs::from([("topic".to_string(), "AI".to_string())]);

        let prompt = task.prompt(&inputs, Some("earlier findings"));

        assert!(prompt.starts_with("Current Task: Research AI"));
        assert!(prompt.contains("expected criteria for your final answer: Five ideas"));
        assert!(prompt.ends_with("earlier findings"));
    }

    #[test]
    fn prompt_without_context() {
        let task = Task::new("Research", "Ideas", worker());
        assert!(!task.prompt(&Inputs::new(), None).contains("context"));
    }
}
