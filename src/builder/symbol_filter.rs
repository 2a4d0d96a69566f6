//! Drop declarations the compiled library cannot back.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::declaration::{Declaration, Exclusion, ExclusionReason};
use crate::core::platform::SymbolNaming;
use crate::core::symbols::ExportedSymbolSet;

/// An `extern` statement starting a line, up to the first `;`.
static EXTERN_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^extern (?s:.)*?;").unwrap());

/// Comments out declarations whose symbol is not exported or whose text
/// mentions an unsupported type.
#[derive(Debug, Clone)]
pub struct SymbolFilter<'a> {
    symbols: &'a ExportedSymbolSet,
    naming: SymbolNaming,
    unsupported_types: &'a [String],
}

impl<'a> SymbolFilter<'a> {
    pub fn new(symbols: &'a ExportedSymbolSet) -> Self {
        SymbolFilter {
            symbols,
            naming: SymbolNaming::Plain,
            unsupported_types: &[],
        }
    }

    /// Set the platform's symbol naming convention.
    pub fn with_naming(mut self, naming: SymbolNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Set the type names the binding layer cannot represent.
    pub fn with_unsupported_types(mut self, types: &'a [String]) -> Self {
        self.unsupported_types = types;
        self
    }

    /// Filter scrubbed header text.
    ///
    /// Returns the rewritten text and one [`Exclusion`] per neutralized
    /// declaration, in textual order.
    pub fn apply(&self, content: &str) -> (String, Vec<Exclusion>) {
        let mut exclusions = Vec::new();

        let filtered = EXTERN_DECL.replace_all(content, |caps: &Captures| {
            let decl = Declaration::new(&caps[0]);
            let function = decl.function_name();

            if !self.symbols.defines(function, self.naming) {
                tracing::warn!("Removing undefined function: {}", function);
                let reason = ExclusionReason::Undefined;
                let replacement = decl.comment_out(&reason);
                exclusions.push(Exclusion::new(function, reason));
                return replacement;
            }

            if let Some(ty) = decl.unsupported_type(self.unsupported_types) {
                tracing::warn!(
                    "Removing function due to undefined type {}: {}",
                    ty,
                    function
                );
                let reason = ExclusionReason::UndefinedType(ty.to_string());
                let replacement = decl.comment_out(&reason);
                exclusions.push(Exclusion::new(function, reason));
                return replacement;
            }

            decl.text().to_string()
        });

        (filtered.into_owned(), exclusions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deny() -> Vec<String> {
        vec!["json_object".to_string()]
    }

    #[test]
    fn test_keeps_exported_comments_missing() {
        let symbols: ExportedSymbolSet = ["foo"].into_iter().collect();
        let (out, exclusions) =
            SymbolFilter::new(&symbols).apply("extern void foo(void);\nextern void bar(void);\n");

        assert_eq!(
            out,
            "extern void foo(void);\n/* extern void bar(void);  (undefined) */\n"
        );
        assert_eq!(
            exclusions,
            vec![Exclusion::new("bar", ExclusionReason::Undefined)]
        );
    }

    #[test]
    fn test_unsupported_type() {
        let symbols: ExportedSymbolSet = ["temporal_as_json"].into_iter().collect();
        let deny = deny();
        let (out, exclusions) = SymbolFilter::new(&symbols)
            .with_unsupported_types(&deny)
            .apply("extern json_object *temporal_as_json(const Temporal *temp);\n");

        assert_eq!(
            out,
            "/* extern json_object *temporal_as_json(const Temporal *temp);  (undefined type json_object) */\n"
        );
        assert_eq!(
            exclusions[0].reason,
            ExclusionReason::UndefinedType("json_object".into())
        );
    }

    #[test]
    fn test_undefined_wins_over_unsupported_type() {
        let symbols = ExportedSymbolSet::default();
        let deny = deny();
        let (out, _) = SymbolFilter::new(&symbols)
            .with_unsupported_types(&deny)
            .apply("extern json_object *to_json(void);");

        assert!(out.ends_with("(undefined) */"));
    }

    #[test]
    fn test_underscore_convention() {
        let symbols: ExportedSymbolSet = ["_tint_make"].into_iter().collect();
        let text = "extern Temporal *tint_make(int i, TimestampTz t);";

        let (out, _) = SymbolFilter::new(&symbols)
            .with_naming(SymbolNaming::UnderscorePrefixed)
            .apply(text);
        assert_eq!(out, text);

        let (out, _) = SymbolFilter::new(&symbols)
            .with_naming(SymbolNaming::Plain)
            .apply(text);
        assert!(out.contains("(undefined)"));
    }

    #[test]
    fn test_multiline_declaration() {
        let symbols = ExportedSymbolSet::default();
        let text = "extern Temporal *tsequence_make(const TInstant **instants,\n  int count, bool lower_inc);\nint untouched;\n";
        let (out, exclusions) = SymbolFilter::new(&symbols).apply(text);

        assert!(out.starts_with("/* extern Temporal *tsequence_make(const TInstant **instants,\n"));
        assert!(out.ends_with("(undefined) */\nint untouched;\n"));
        assert_eq!(exclusions[0].function, "tsequence_make");
    }

    #[test]
    fn test_ignores_non_extern_lines() {
        let symbols = ExportedSymbolSet::default();
        let text = "typedef struct { int x; } Point;\n  extern void indented(void);\n";
        let (out, exclusions) = SymbolFilter::new(&symbols).apply(text);

        assert_eq!(out, text);
        assert!(exclusions.is_empty());
    }
}
