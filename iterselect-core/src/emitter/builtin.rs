//! Built-in loop templates
//!
//! Lookup is a closed match over (strategy, dialect); a `None` means the
//! strategy has no idiomatic form in that language.

use super::dialect::Dialect;
use super::template::{Template, TemplateSet};
use crate::types::{PlatformCompatibility, PlatformTag, StrategyId};

/// Template for a strategy in a dialect, if one exists
pub fn template_for(strategy: StrategyId, dialect: Dialect) -> Option<Template> {
    use Dialect::*;
    use StrategyId::*;

    let template = match (strategy, dialect) {
        (SequentialLoop, Rust) => {
            Template::looping("for {{item}} in {{collection}}.iter() {\n    {{body}}\n}\n")
        }
        (SequentialLoop, CSharp) => Template::looping(
            "foreach (var {{item}} in {{collection}})\n{\n    {{body}}\n}\n",
        ),
        (SequentialLoop, Kotlin) => {
            Template::looping("for ({{item}} in {{collection}}) {\n    {{body}}\n}\n")
        }
        (SequentialLoop, TypeScript) => {
            Template::looping("for (const {{item}} of {{collection}}) {\n    {{body}}\n}\n")
        }

        (IndexedLoop, Rust) => Template::looping(
            "for index in 0..{{collection}}.len() {\n    let {{item}} = &{{collection}}[index];\n    {{body}}\n}\n",
        ),
        (IndexedLoop, CSharp) => Template::looping(
            "for (int index = 0; index < {{collection}}.Count; index++)\n{\n    var {{item}} = {{collection}}[index];\n    {{body}}\n}\n",
        ),
        (IndexedLoop, Kotlin) => Template::looping(
            "for (index in {{collection}}.indices) {\n    val {{item}} = {{collection}}[index]\n    {{body}}\n}\n",
        ),
        (IndexedLoop, TypeScript) => Template::looping(
            "for (let index = 0; index < {{collection}}.length; index++) {\n    const {{item}} = {{collection}}[index];\n    {{body}}\n}\n",
        ),

        (LazyPipeline, Rust) => Template::pipeline("{{collection}}\n    .iter(){{chain}};\n"),
        (LazyPipeline, CSharp) => Template::pipeline("{{collection}}{{chain}};\n"),
        (LazyPipeline, Kotlin) => {
            Template::pipeline("{{collection}}\n    .asSequence(){{chain}}\n")
        }
        (LazyPipeline, TypeScript) => Template::pipeline("{{collection}}{{chain}};\n"),

        (ParallelMap, Rust) => {
            Template::parallel_pipeline("{{collection}}\n    .par_iter(){{chain}};\n")
        }
        (ParallelMap, CSharp) => Template::parallel_pipeline(
            "{{collection}}\n    .AsParallel()\n    .WithDegreeOfParallelism({{degree}}){{chain}};\n",
        ),
        (ParallelMap, Kotlin) => Template::looping(
            "coroutineScope {\n    {{collection}}.map { {{item}} ->\n        async(Dispatchers.Default) {\n            {{body}}\n        }\n    }.awaitAll()\n}\n",
        ),

        (ChunkedParallel, Rust) => Template::closure_loop(
            "{{collection}}\n    .par_chunks({{chunk_size}})\n    .for_each(|chunk| {\n        for {{item}} in chunk {\n            {{body}}\n        }\n    });\n",
        ),
        (ChunkedParallel, CSharp) => Template::closure_loop(
            "Parallel.ForEach(Partitioner.Create(0, {{collection}}.Count, {{chunk_size}}), range =>\n{\n    for (int index = range.Item1; index < range.Item2; index++)\n    {\n        var {{item}} = {{collection}}[index];\n        {{body}}\n    }\n});\n",
        ),

        (AsyncStream, Rust) => Template::looping(
            "while let Some({{item}}) = {{collection}}.next().await {\n    {{body}}\n}\n",
        ),
        (AsyncStream, CSharp) => Template::looping(
            "await foreach (var {{item}} in {{collection}})\n{\n    {{body}}\n}\n",
        ),
        (AsyncStream, Kotlin) => {
            Template::looping("{{collection}}.collect { {{item}} ->\n    {{body}}\n}\n")
        }
        (AsyncStream, TypeScript) => Template::looping(
            "for await (const {{item}} of {{collection}}) {\n    {{body}}\n}\n",
        ),

        (PlatformOptimizedLoop, Rust) => Template::closure_loop(
            "let mut lanes = {{collection}}.chunks_exact(4);\nfor lane in lanes.by_ref() {\n    for {{item}} in lane {\n        {{body}}\n    }\n}\nfor {{item}} in lanes.remainder() {\n    {{body}}\n}\n",
        ),
        (PlatformOptimizedLoop, CSharp) => Template::closure_loop(
            "for (int index = 0, length = {{collection}}.Length; index < length; index++)\n{\n    var {{item}} = {{collection}}[index];\n    {{body}}\n}\n",
        ),
        (PlatformOptimizedLoop, Kotlin) => {
            Template::looping("{{collection}}.forEach { {{item}} ->\n    {{body}}\n}\n")
        }

        _ => return None,
    };

    Some(template)
}

/// Template set covering every compatible platform that has a template
///
/// All other platforms are explicitly marked unsupported.
pub fn builtin_templates(strategy: StrategyId, compatibility: PlatformCompatibility) -> TemplateSet {
    PlatformTag::ALL
        .into_iter()
        .filter(|platform| compatibility.contains(*platform))
        .filter_map(|platform| {
            template_for(strategy, Dialect::for_platform(platform)).map(|t| (platform, t))
        })
        .fold(TemplateSet::new(), |set, (platform, template)| {
            set.with_template(platform, template)
        })
        .rest_unsupported()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::template::TemplateSlot;

    #[test]
    fn test_sequential_loop_has_every_dialect() {
        for dialect in [Dialect::Rust, Dialect::CSharp, Dialect::Kotlin, Dialect::TypeScript] {
            assert!(template_for(StrategyId::SequentialLoop, dialect).is_some());
        }
    }

    #[test]
    fn test_no_threaded_templates_for_browser_script() {
        assert!(template_for(StrategyId::ParallelMap, Dialect::TypeScript).is_none());
        assert!(template_for(StrategyId::ChunkedParallel, Dialect::TypeScript).is_none());
    }

    #[test]
    fn test_builtin_set_respects_compatibility() {
        let compat = PlatformCompatibility::of(&[PlatformTag::Native, PlatformTag::Server]);
        let set = builtin_templates(StrategyId::ParallelMap, compat);

        assert!(matches!(set.slot(PlatformTag::Native), TemplateSlot::Available(_)));
        assert!(matches!(set.slot(PlatformTag::Server), TemplateSlot::Available(_)));
        assert_eq!(set.slot(PlatformTag::Mobile), &TemplateSlot::Unsupported);
        assert_eq!(set.slot(PlatformTag::Browser), &TemplateSlot::Unsupported);
        assert!(set.validate(StrategyId::ParallelMap, compat).is_ok());
    }
}
