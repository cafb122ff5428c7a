//! Keyword rules mapping user input to canned reply templates

use super::templates;

/// A single keyword rule
#[derive(Debug)]
pub struct Rule {
    /// Stable name, used in logs and tests
    pub name: &'static str,
    /// Lower-case substrings that select this rule
    pub triggers: &'static [&'static str],
    /// Canned reply returned verbatim
    pub template: &'static str,
}

/// Priority-ordered rule table. Order is part of the contract: input
/// matching several rules resolves to the earliest entry, so
/// "hello, can you show me some code?" greets instead of producing the
/// code sample.
pub const RULES: &[Rule] = &[
    Rule {
        name: "greeting",
        triggers: &["hello", "hi"],
        template: templates::GREETING,
    },
    Rule {
        name: "capabilities",
        triggers: &["help"],
        template: templates::CAPABILITIES,
    },
    Rule {
        name: "javascript_sample",
        triggers: &["code", "javascript"],
        template: templates::JAVASCRIPT_SAMPLE,
    },
    Rule {
        name: "react_sample",
        triggers: &["react", "component"],
        template: templates::REACT_SAMPLE,
    },
    Rule {
        name: "weather",
        triggers: &["weather"],
        template: templates::WEATHER,
    },
    Rule {
        name: "thanks",
        triggers: &["thank"],
        template: templates::THANKS,
    },
    Rule {
        name: "farewell",
        triggers: &["bye", "goodbye"],
        template: templates::FAREWELL,
    },
];

/// Find the first rule triggered by `input`. Matching is
/// case-insensitive substring containment in priority order.
pub fn match_rule(input: &str) -> Option<&'static Rule> {
    let lowered = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|t| lowered.contains(t)))
}

/// Select the reply template for `input`; input matching no rule gets
/// the fallback template. Pure: the same input always selects the same
/// template.
pub fn pick_template(input: &str) -> &'static str {
    match_rule(input).map_or(templates::FALLBACK, |rule| rule.template)
}
