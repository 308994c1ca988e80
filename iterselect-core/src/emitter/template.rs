//! Code templates and placeholder substitution
//!
//! Templates use `{{name}}` placeholders. When a placeholder is the first
//! thing on its line, every line of a multi-line value is indented to the
//! placeholder's column.

use crate::error::{EngineError, Result};
use crate::types::{PlatformTag, StrategyId};
use regex::Regex;
use std::sync::OnceLock;

/// Placeholders a template may reference
pub const KNOWN_PLACEHOLDERS: &[&str] = &[
    "collection",
    "item",
    "result",
    "body",
    "chain",
    "degree",
    "chunk_size",
];

/// How a template consumes the filter/transform/action clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateForm {
    /// Statement body spliced at `{{body}}`
    Loop,
    /// Chained calls spliced at `{{chain}}`
    Pipeline,
    /// Chained calls whose terminal step runs on worker threads
    ParallelPipeline,
}

/// Source template for one (strategy, dialect) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub form: TemplateForm,
    pub text: &'static str,
    /// Whether the body may contain awaited calls
    pub allows_await: bool,
}

impl Template {
    /// Loop template whose body may await
    pub const fn looping(text: &'static str) -> Self {
        Self {
            form: TemplateForm::Loop,
            text,
            allows_await: true,
        }
    }

    /// Loop template whose body runs inside a synchronous closure
    pub const fn closure_loop(text: &'static str) -> Self {
        Self {
            form: TemplateForm::Loop,
            text,
            allows_await: false,
        }
    }

    /// Sequential pipeline template
    pub const fn pipeline(text: &'static str) -> Self {
        Self {
            form: TemplateForm::Pipeline,
            text,
            allows_await: false,
        }
    }

    /// Parallel pipeline template
    pub const fn parallel_pipeline(text: &'static str) -> Self {
        Self {
            form: TemplateForm::ParallelPipeline,
            text,
            allows_await: false,
        }
    }

    /// Placeholder names referenced by the template text
    pub fn placeholders(&self) -> Vec<String> {
        placeholder_regex()
            .captures_iter(self.text)
            .map(|c| c[1].to_string())
            .collect()
    }

    fn validate(&self, strategy: StrategyId, platform: PlatformTag) -> Result<()> {
        for name in self.placeholders() {
            if !KNOWN_PLACEHOLDERS.contains(&name.as_str()) {
                return Err(EngineError::InvalidTemplate {
                    strategy,
                    platform,
                    reason: format!("unknown placeholder '{name}'"),
                });
            }
        }
        let slot = match self.form {
            TemplateForm::Loop => "body",
            TemplateForm::Pipeline | TemplateForm::ParallelPipeline => "chain",
        };
        if !self.placeholders().iter().any(|p| p == slot) {
            return Err(EngineError::InvalidTemplate {
                strategy,
                platform,
                reason: format!("missing '{{{{{slot}}}}}' placeholder"),
            });
        }
        Ok(())
    }
}

/// Template decision for one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateSlot {
    /// No decision recorded; rejected at registry build time
    #[default]
    Unassigned,
    /// Explicitly not supported
    Unsupported,
    /// Template available
    Available(Template),
}

/// Per-platform templates of a strategy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateSet {
    slots: [TemplateSlot; PlatformTag::COUNT],
}

impl TemplateSet {
    /// Set with no decisions recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a template for `platform`
    pub fn with_template(mut self, platform: PlatformTag, template: Template) -> Self {
        self.slots[platform.index()] = TemplateSlot::Available(template);
        self
    }

    /// Mark `platform` as explicitly unsupported
    pub fn unsupported(mut self, platform: PlatformTag) -> Self {
        self.slots[platform.index()] = TemplateSlot::Unsupported;
        self
    }

    /// Mark every platform without a decision as unsupported
    pub fn rest_unsupported(mut self) -> Self {
        for slot in &mut self.slots {
            if *slot == TemplateSlot::Unassigned {
                *slot = TemplateSlot::Unsupported;
            }
        }
        self
    }

    /// Decision for `platform`
    pub fn slot(&self, platform: PlatformTag) -> &TemplateSlot {
        &self.slots[platform.index()]
    }

    /// Platforms with an available template
    pub fn available_platforms(&self) -> Vec<PlatformTag> {
        PlatformTag::ALL
            .into_iter()
            .filter(|p| matches!(self.slot(*p), TemplateSlot::Available(_)))
            .collect()
    }

    pub(crate) fn validate(
        &self,
        strategy: StrategyId,
        compatibility: crate::types::PlatformCompatibility,
    ) -> Result<()> {
        for platform in PlatformTag::ALL {
            match self.slot(platform) {
                TemplateSlot::Unassigned => {
                    return Err(EngineError::IncompleteTemplates { strategy, platform });
                }
                TemplateSlot::Unsupported => {}
                TemplateSlot::Available(template) => {
                    if !compatibility.contains(platform) {
                        return Err(EngineError::TemplateOutsideCompatibility {
                            strategy,
                            platform,
                        });
                    }
                    template.validate(strategy, platform)?;
                }
            }
        }
        Ok(())
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
            .expect("placeholder pattern is a valid regex")
    })
}

/// Substitute placeholders in `text` using `lookup`
///
/// Values are inserted verbatim and never rescanned, so fragments containing
/// `{{` are safe.
pub fn render(text: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut last = 0;

    for caps in placeholder_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let name = &caps[1];
        out.push_str(&text[last..whole.start()]);

        let value = lookup(name).unwrap_or_default();
        let line_start = text[..whole.start()].rfind('\n').map_or(0, |i| i + 1);
        let prefix = &text[line_start..whole.start()];

        if !prefix.is_empty() && prefix.chars().all(|c| c == ' ') && value.contains('\n') {
            let continuation = format!("\n{prefix}");
            out.push_str(&value.replace('\n', &continuation));
        } else {
            out.push_str(&value);
        }
        last = whole.end();
    }

    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlatformCompatibility;

    #[test]
    fn test_render_substitutes_placeholders() {
        let out = render("for {{item}} in {{ collection }} {}", |name| match name {
            "item" => Some("x".to_string()),
            "collection" => Some("xs".to_string()),
            _ => None,
        });
        assert_eq!(out, "for x in xs {}");
    }

    #[test]
    fn test_render_indents_multiline_body() {
        let out = render("loop {\n    {{body}}\n}", |_| Some("a();\nb();".to_string()));
        assert_eq!(out, "loop {\n    a();\n    b();\n}");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let out = render("{{item}}", |_| Some("{{collection}}".to_string()));
        assert_eq!(out, "{{collection}}");
    }

    #[test]
    fn test_unassigned_slot_fails_validation() {
        let set = TemplateSet::new().with_template(
            PlatformTag::Native,
            Template::looping("for {{item}} in {{collection}} {\n    {{body}}\n}"),
        );
        let result = set.validate(StrategyId::SequentialLoop, PlatformCompatibility::ALL);
        assert!(matches!(
            result,
            Err(EngineError::IncompleteTemplates {
                platform: PlatformTag::WebAssembly,
                ..
            })
        ));
    }

    #[test]
    fn test_template_outside_compatibility_fails_validation() {
        let set = TemplateSet::new()
            .with_template(
                PlatformTag::Browser,
                Template::looping("for {{item}} of {{collection}} {\n    {{body}}\n}"),
            )
            .rest_unsupported();
        let result = set.validate(
            StrategyId::SequentialLoop,
            PlatformCompatibility::of(&[PlatformTag::Native]),
        );
        assert!(matches!(
            result,
            Err(EngineError::TemplateOutsideCompatibility { .. })
        ));
    }

    #[test]
    fn test_unknown_placeholder_fails_validation() {
        let set = TemplateSet::new()
            .with_template(PlatformTag::Native, Template::looping("{{body}} {{bogus}}"))
            .rest_unsupported();
        let result = set.validate(StrategyId::SequentialLoop, PlatformCompatibility::ALL);
        match result {
            Err(EngineError::InvalidTemplate {
                strategy,
                platform,
                reason,
            }) => {
                assert_eq!(strategy, StrategyId::SequentialLoop);
                assert_eq!(platform, PlatformTag::Native);
                assert!(reason.contains("bogus"));
            }
            other => panic!("expected InvalidTemplate, got {other:?}"),
        }
    }

    #[test]
    fn test_pipeline_requires_chain_placeholder() {
        let set = TemplateSet::new()
            .with_template(PlatformTag::Native, Template::pipeline("{{collection}}.iter();"))
            .rest_unsupported();
        assert!(matches!(
            set.validate(StrategyId::LazyPipeline, PlatformCompatibility::ALL),
            Err(EngineError::InvalidTemplate {
                platform: PlatformTag::Native,
                ..
            })
        ));
    }
}
