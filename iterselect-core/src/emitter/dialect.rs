//! Platform-specific syntax for the clauses spliced into templates

use crate::types::PlatformTag;

/// Source language emitted for a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Rust,
    CSharp,
    Kotlin,
    TypeScript,
}

impl Dialect {
    /// Dialect used for code targeting `platform`
    pub fn for_platform(platform: PlatformTag) -> Self {
        match platform {
            PlatformTag::Native | PlatformTag::WebAssembly => Dialect::Rust,
            PlatformTag::Server | PlatformTag::EmbeddedRuntime => Dialect::CSharp,
            PlatformTag::Mobile => Dialect::Kotlin,
            PlatformTag::Browser => Dialect::TypeScript,
        }
    }

    /// Human-readable language name
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Rust => "Rust",
            Dialect::CSharp => "C#",
            Dialect::Kotlin => "Kotlin",
            Dialect::TypeScript => "TypeScript",
        }
    }

    /// Opening line(s) of a conditional block
    pub fn filter_open(&self, predicate: &str) -> String {
        match self {
            Dialect::Rust => format!("if {predicate} {{"),
            Dialect::CSharp => format!("if ({predicate})\n{{"),
            Dialect::Kotlin | Dialect::TypeScript => format!("if ({predicate}) {{"),
        }
    }

    /// Closing line of a conditional block
    pub fn filter_close(&self) -> &'static str {
        "}"
    }

    /// Statement binding the transformed value
    pub fn transform_statement(&self, result: &str, transform: &str) -> String {
        match self {
            Dialect::Rust => format!("let {result} = {transform};"),
            Dialect::CSharp => format!("var {result} = {transform};"),
            Dialect::Kotlin => format!("val {result} = {transform}"),
            Dialect::TypeScript => format!("const {result} = {transform};"),
        }
    }

    /// Statement performing the action, optionally awaited
    pub fn action_statement(&self, action: &str, awaited: bool) -> String {
        match (self, awaited) {
            (Dialect::Rust, false) => format!("{action};"),
            (Dialect::Rust, true) => format!("{action}.await;"),
            (Dialect::CSharp | Dialect::TypeScript, false) => format!("{action};"),
            (Dialect::CSharp | Dialect::TypeScript, true) => format!("await {action};"),
            // Suspend calls need no keyword
            (Dialect::Kotlin, _) => action.to_string(),
        }
    }

    /// Chained filter step
    pub fn chain_filter(&self, item: &str, predicate: &str) -> String {
        match self {
            Dialect::Rust => format!("\n    .filter(|{item}| {predicate})"),
            Dialect::CSharp => format!("\n    .Where({item} => {predicate})"),
            Dialect::Kotlin => format!("\n    .filter {{ {item} -> {predicate} }}"),
            Dialect::TypeScript => format!("\n    .filter(({item}) => {predicate})"),
        }
    }

    /// Chained transform step
    pub fn chain_map(&self, item: &str, transform: &str) -> String {
        match self {
            Dialect::Rust => format!("\n    .map(|{item}| {transform})"),
            Dialect::CSharp => format!("\n    .Select({item} => {transform})"),
            Dialect::Kotlin => format!("\n    .map {{ {item} -> {transform} }}"),
            Dialect::TypeScript => format!("\n    .map(({item}) => {transform})"),
        }
    }

    /// Terminal chained step running the action
    pub fn chain_for_each(&self, param: &str, action: &str, parallel: bool) -> String {
        match (self, parallel) {
            (Dialect::Rust, _) => format!("\n    .for_each(|{param}| {action})"),
            (Dialect::CSharp, false) => {
                format!("\n    .ToList()\n    .ForEach({param} => {action})")
            }
            (Dialect::CSharp, true) => format!("\n    .ForAll({param} => {action})"),
            (Dialect::Kotlin, _) => format!("\n    .forEach {{ {param} -> {action} }}"),
            (Dialect::TypeScript, _) => format!("\n    .forEach(({param}) => {action})"),
        }
    }

    /// Degree-of-parallelism expression when the caller gives none
    pub fn default_degree(&self) -> &'static str {
        match self {
            Dialect::Rust => "rayon::current_num_threads()",
            Dialect::CSharp => "Environment.ProcessorCount",
            Dialect::Kotlin => "Runtime.getRuntime().availableProcessors()",
            Dialect::TypeScript => "navigator.hardwareConcurrency",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_dialects() {
        assert_eq!(Dialect::for_platform(PlatformTag::Native), Dialect::Rust);
        assert_eq!(Dialect::for_platform(PlatformTag::WebAssembly), Dialect::Rust);
        assert_eq!(Dialect::for_platform(PlatformTag::Server), Dialect::CSharp);
        assert_eq!(Dialect::for_platform(PlatformTag::Mobile), Dialect::Kotlin);
        assert_eq!(Dialect::for_platform(PlatformTag::Browser), Dialect::TypeScript);
    }

    #[test]
    fn test_lambda_syntax_differs() {
        assert_eq!(Dialect::Rust.chain_filter("x", "x > 0"), "\n    .filter(|x| x > 0)");
        assert_eq!(Dialect::CSharp.chain_filter("x", "x > 0"), "\n    .Where(x => x > 0)");
        assert_eq!(
            Dialect::Kotlin.chain_filter("x", "x > 0"),
            "\n    .filter { x -> x > 0 }"
        );
    }

    #[test]
    fn test_await_keyword_placement() {
        assert_eq!(Dialect::Rust.action_statement("send(x)", true), "send(x).await;");
        assert_eq!(Dialect::CSharp.action_statement("SendAsync(x)", true), "await SendAsync(x);");
        assert_eq!(Dialect::Kotlin.action_statement("send(x)", true), "send(x)");
    }
}
