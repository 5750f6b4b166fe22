use regex::{NoExpand, Regex};
use tracing::debug;

use crate::constants::{TRACKED_PACKAGES, VERSION_SUFFIX};
use crate::error::Result;

/// A single find/replace transformation applied to whole-file text.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
    replacement: String,
    // Replacement is inserted verbatim, `$` has no meaning
    literal: bool,
}

impl PatternRule {
    /// Compile a rule. The replacement may reference captures as `$1` or `${1}`.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
            literal: false,
        })
    }

    /// Rule stripping the version suffix from a literal package name.
    pub fn for_package(name: &str) -> Result<Self> {
        let pattern = format!("{}{}", regex::escape(name), VERSION_SUFFIX);
        let mut rule = Self::new(&pattern, name)?;
        rule.literal = true;
        Ok(rule)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Apply the rule across the whole text, returning the new text and
    /// the number of substitutions made.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let count = self.pattern.find_iter(text).count();
        if count == 0 {
            return (text.to_string(), 0);
        }
        let replaced = if self.literal {
            self.pattern.replace_all(text, NoExpand(&self.replacement))
        } else {
            self.pattern.replace_all(text, self.replacement.as_str())
        };
        (replaced.into_owned(), count)
    }
}

/// Ordered list of rules. Each rule runs over the output of the previous one.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<PatternRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in tracked package rules.
    pub fn builtin() -> Result<Self> {
        let mut rules = Self::new();
        rules.push(PatternRule::new(
            r#"@radix-ui/react-([^@"]+)@[0-9.]+"#,
            "@radix-ui/react-${1}",
        )?);
        for name in TRACKED_PACKAGES {
            rules.push(PatternRule::for_package(name)?);
        }
        Ok(rules)
    }

    pub fn push(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter()
    }

    /// Run every rule in order over `text`.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let mut current = text.to_string();
        let mut total = 0;
        for rule in &self.rules {
            let (next, count) = rule.apply(&current);
            if count > 0 {
                debug!(pattern = rule.pattern(), count, "Rule matched");
                current = next;
                total += count;
            }
        }
        (current, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> RuleSet {
        RuleSet::builtin().unwrap()
    }

    #[test]
    fn test_builtin_rule_order() {
        let rules = builtin();
        assert_eq!(rules.len(), 10);

        let replacements: Vec<&str> = rules.iter().map(|r| r.replacement()).collect();
        assert_eq!(replacements[0], "@radix-ui/react-${1}");
        assert_eq!(replacements[1], "lucide-react");
        assert_eq!(replacements[8], "@hookform/resolvers");
        assert_eq!(replacements[9], "zod");
    }

    #[test]
    fn test_strips_radix_component_version() {
        let (out, count) = builtin().apply(r#"import X from "@radix-ui/react-dialog@1.0.4""#);
        assert_eq!(out, r#"import X from "@radix-ui/react-dialog""#);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_strips_plain_package_version() {
        let (out, count) = builtin().apply(r#"import { z } from "zod@3.22.4""#);
        assert_eq!(out, r#"import { z } from "zod""#);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_strips_every_occurrence() {
        let input = concat!(
            "import { Check } from \"lucide-react@0.487.0\";\n",
            "import { X } from \"lucide-react@0.487.0\";\n",
            "import { Command } from \"cmdk@1.1.1\";\n",
            "import { zodResolver } from \"@hookform/resolvers@3.10.0\";\n",
        );
        let (out, count) = builtin().apply(input);
        assert_eq!(
            out,
            concat!(
                "import { Check } from \"lucide-react\";\n",
                "import { X } from \"lucide-react\";\n",
                "import { Command } from \"cmdk\";\n",
                "import { zodResolver } from \"@hookform/resolvers\";\n",
            )
        );
        assert_eq!(count, 4);
    }

    #[test]
    fn test_untracked_text_is_unchanged() {
        let input = "import React from \"react@18.2.0\";\nconst email = \"dev@example.com\";\n";
        let (out, count) = builtin().apply(input);
        assert_eq!(out, input);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_second_pass_is_noop() {
        let rules = builtin();
        let (once, _) = rules.apply("import * as P from \"@radix-ui/react-popover@1.1.6\";");
        let (twice, count) = rules.apply(&once);
        assert_eq!(once, twice);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_package_name_is_escaped() {
        let rule = PatternRule::for_package("date-fns.tz").unwrap();
        let (out, count) = rule.apply("date-fnsXtz@1.0 date-fns.tz@2.0.1");
        assert_eq!(out, "date-fnsXtz@1.0 date-fns.tz");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_package_name_with_dollar_is_inserted_verbatim() {
        let rule = PatternRule::for_package("$scope/pkg").unwrap();
        let (out, count) = rule.apply("import a from \"$scope/pkg@1.2.3\";");
        assert_eq!(out, "import a from \"$scope/pkg\";");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_earlier_rule_wins() {
        let mut rules = RuleSet::new();
        rules.push(PatternRule::new("react-([a-z]+)@[0-9.]+", "react-${1}").unwrap());
        rules.push(PatternRule::new("react-dom@[0-9.]+", "react-dom-pinned").unwrap());
        let (out, count) = rules.apply("react-dom@18.0.0");
        assert_eq!(out, "react-dom");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(PatternRule::new("foo@[0-9.+", "foo").is_err());
    }
}
