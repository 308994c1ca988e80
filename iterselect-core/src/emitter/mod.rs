//! Source code emission for a chosen strategy
//!
//! Emission is a pure string transformation: look up the template registered
//! for the (strategy, platform) pair, build the clause text in the platform's
//! dialect and substitute it into the template.

pub mod builtin;
pub mod dialect;
pub mod template;

pub use dialect::Dialect;
pub use template::{Template, TemplateForm, TemplateSet, TemplateSlot};

use crate::error::{EngineError, Result};
use crate::registry::StrategyRegistry;
use crate::types::{PlatformTag, StrategyId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// Naming and fragments for one emission request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeGenerationContext {
    pub target_platform: PlatformTag,
    /// Collection expression; an identifier or dotted path
    pub collection_name: String,
    pub item_name: String,
    /// Name bound to the transformed value
    pub result_name: String,
    /// Filter clause, if any
    pub predicate: Option<String>,
    /// Transform clause, if any
    pub transform: Option<String>,
    pub action: String,
    pub is_async: bool,
    pub degree_of_parallelism: Option<usize>,
    pub chunk_size: usize,
}

impl CodeGenerationContext {
    /// Context with the given names and action and no optional clauses
    pub fn new(
        target_platform: PlatformTag,
        collection_name: impl Into<String>,
        item_name: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            target_platform,
            collection_name: collection_name.into(),
            item_name: item_name.into(),
            result_name: "result".to_string(),
            predicate: None,
            transform: None,
            action: action.into(),
            is_async: false,
            degree_of_parallelism: None,
            chunk_size: 1024,
        }
    }

    pub fn with_filter(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    pub fn with_result_name(mut self, name: impl Into<String>) -> Self {
        self.result_name = name.into();
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn with_degree_of_parallelism(mut self, degree: usize) -> Self {
        self.degree_of_parallelism = Some(degree);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Whether the shape includes a filter clause
    pub fn has_filter(&self) -> bool {
        self.predicate.is_some()
    }

    /// Whether the shape includes a transform clause
    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    fn validate(&self) -> Result<()> {
        if !path_regex().is_match(&self.collection_name) {
            return Err(EngineError::InvalidFragment {
                name: "collection",
                reason: format!("'{}' is not an identifier path", self.collection_name),
            });
        }
        for (name, value) in [("item", &self.item_name), ("result", &self.result_name)] {
            if !identifier_regex().is_match(value) {
                return Err(EngineError::InvalidFragment {
                    name,
                    reason: format!("'{value}' is not an identifier"),
                });
            }
        }
        for (name, value) in [
            ("predicate", self.predicate.as_deref()),
            ("transform", self.transform.as_deref()),
            ("action", Some(self.action.as_str())),
        ] {
            if value.is_some_and(|v| v.trim().is_empty()) {
                return Err(EngineError::InvalidFragment {
                    name,
                    reason: "fragment is empty".to_string(),
                });
            }
        }
        if self.chunk_size == 0 || self.degree_of_parallelism == Some(0) {
            return Err(EngineError::InvalidFragment {
                name: "parallelism",
                reason: "chunk size and degree of parallelism must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn identifier_regex() -> &'static Regex {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is a valid regex")
    })
}

fn path_regex() -> &'static Regex {
    static PATH: OnceLock<Regex> = OnceLock::new();
    PATH.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
            .expect("path pattern is a valid regex")
    })
}

/// Renders strategy templates registered in a [`StrategyRegistry`]
#[derive(Debug, Clone)]
pub struct CodeEmitter {
    registry: Arc<StrategyRegistry>,
}

impl CodeEmitter {
    /// Create an emitter over `registry`
    pub fn new(registry: Arc<StrategyRegistry>) -> Self {
        Self { registry }
    }

    /// Render source text implementing `strategy` for `context`
    pub fn emit(&self, strategy: StrategyId, context: &CodeGenerationContext) -> Result<String> {
        context.validate()?;

        let entry = self.registry.get(strategy)?;
        let platform = context.target_platform;
        let template = match entry.templates.slot(platform) {
            TemplateSlot::Available(template) => *template,
            TemplateSlot::Unsupported | TemplateSlot::Unassigned => {
                return Err(EngineError::UnsupportedPlatform { strategy, platform });
            }
        };

        if context.is_async && !template.allows_await {
            return Err(EngineError::UnsupportedShape {
                strategy,
                platform,
                reason: "the template body cannot contain awaited calls".to_string(),
            });
        }

        let dialect = Dialect::for_platform(platform);
        let clauses = match template.form {
            TemplateForm::Loop => loop_body(dialect, context),
            TemplateForm::Pipeline => chain(dialect, context, false),
            TemplateForm::ParallelPipeline => chain(dialect, context, true),
        };

        let degree = context
            .degree_of_parallelism
            .map(|d| d.to_string())
            .unwrap_or_else(|| dialect.default_degree().to_string());

        let source = template::render(template.text, |name| match name {
            "collection" => Some(context.collection_name.clone()),
            "item" => Some(context.item_name.clone()),
            "result" => Some(context.result_name.clone()),
            "body" | "chain" => Some(clauses.clone()),
            "degree" => Some(degree.clone()),
            "chunk_size" => Some(context.chunk_size.to_string()),
            _ => None,
        });

        log::debug!(
            "emitted {} lines of {} for {strategy} on {platform}",
            source.lines().count(),
            dialect.name()
        );
        Ok(source)
    }
}

/// Statement body for loop templates
fn loop_body(dialect: Dialect, context: &CodeGenerationContext) -> String {
    let mut statements = Vec::with_capacity(2);
    if let Some(transform) = &context.transform {
        statements.push(dialect.transform_statement(&context.result_name, transform));
    }
    statements.push(dialect.action_statement(&context.action, context.is_async));
    let body = statements.join("\n");

    match &context.predicate {
        Some(predicate) => {
            let indented = body.replace('\n', "\n    ");
            format!(
                "{}\n    {indented}\n{}",
                dialect.filter_open(predicate),
                dialect.filter_close()
            )
        }
        None => body,
    }
}

/// Chained calls for pipeline templates
fn chain(dialect: Dialect, context: &CodeGenerationContext, parallel: bool) -> String {
    let mut chain = String::new();
    if let Some(predicate) = &context.predicate {
        chain.push_str(&dialect.chain_filter(&context.item_name, predicate));
    }
    let param = match &context.transform {
        Some(transform) => {
            chain.push_str(&dialect.chain_map(&context.item_name, transform));
            &context.result_name
        }
        None => &context.item_name,
    };
    chain.push_str(&dialect.chain_for_each(param, &context.action, parallel));
    chain
}
