//! Comment and preprocessor stripping.
//!
//! Turns a raw header into text the binding layer can swallow: no comments,
//! no conditional blocks, no macros other than numeric `#define` constants.

use std::sync::LazyLock;

use regex::Regex;

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//.*").unwrap());

static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// A neutralized `#define NAME 123` line. Only trailing blanks are eaten,
/// never the line break.
static NUMERIC_DEFINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^//(#define +\w+ +\d+)[ \t]*$").unwrap());

/// From a neutralized `#ifdef` to the next neutralized `#endif`.
static IFDEF_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)//#ifdef.*?//#endif").unwrap());

/// Any other neutralized directive plus its backslash continuations.
static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//# *\w+(?: +[\w,()]+)? *(?:\\\n|.)*?(?:\n|\z)").unwrap()
});

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n\n+").unwrap());

/// Strip comments and non-constant preprocessor directives from header text.
///
/// Line endings are normalized to `\n` first. Comments go next so
/// directive-looking text inside them is never treated as a directive.
/// Running this on its own output is a no-op.
pub fn scrub(raw: &str) -> String {
    let raw = raw.replace("\r\n", "\n").replace('\r', "\n");
    let content = LINE_COMMENT.replace_all(&raw, "");
    let content = BLOCK_COMMENT.replace_all(&content, "");

    let content = content.replace('#', "//#");
    let content = NUMERIC_DEFINE.replace_all(&content, "${1}");
    let content = IFDEF_BLOCK.replace_all(&content, "");
    let content = content.replace("//#endif", "");
    let content = DIRECTIVE.replace_all(&content, "");

    BLANK_RUN.replace_all(&content, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEOS_LIKE: &str = r#"/*****************************************************************************
 * MEOS library header
 *****************************************************************************/

#ifndef __MEOS_H__
#define __MEOS_H__

#include <stdbool.h>
#include <stdint.h>

#ifdef __cplusplus
extern "C" {
#endif

#define MEOS_EPSG_WGS84 4326
#define MEOS_FLAGS_SET_X(flags, value) \
  ((flags) = (value) ? ((flags) | 0x10) : ((flags) & ~0x10))

/* Temporal subtypes */
typedef enum
{
  ANYTEMPSUBTYPE = 0,  /**< Any temporal subtype */
  TINSTANT =       1,  /**< Temporal instant */
} tempSubtype;

// Lifecycle
extern void meos_initialize(void);
extern void meos_finalize(void);



extern Temporal *tint_make(int i, TimestampTz t);

#endif /* __MEOS_H__ */
"#;

    #[test]
    fn test_removes_comments() {
        let out = scrub("int a; // trailing\n/* block\n spanning */int b;\n");
        assert_eq!(out, "int a; \nint b;\n");
    }

    #[test]
    fn test_keeps_numeric_defines_only() {
        let out = scrub(MEOS_LIKE);

        assert!(out.contains("#define MEOS_EPSG_WGS84 4326"));
        assert!(!out.contains("MEOS_FLAGS_SET_X"));
        assert!(!out.contains("0x10"));
        assert!(!out.contains("__MEOS_H__"));
        assert!(!out.contains("#include"));
        assert!(!out.contains("//#"));
    }

    #[test]
    fn test_removes_ifdef_blocks() {
        let out = scrub(MEOS_LIKE);

        assert!(!out.contains("__cplusplus"));
        assert!(!out.contains("extern \"C\""));
        assert!(!out.contains("endif"));
    }

    #[test]
    fn test_keeps_declarations_and_types() {
        let out = scrub(MEOS_LIKE);

        assert!(out.contains("extern void meos_initialize(void);"));
        assert!(out.contains("extern Temporal *tint_make(int i, TimestampTz t);"));
        assert!(out.contains("} tempSubtype;"));
        assert!(out.contains("ANYTEMPSUBTYPE = 0,"));
    }

    #[test]
    fn test_ifdef_span_is_non_greedy() {
        let raw = "#ifdef A\nint a;\n#endif\nint keep;\n#ifdef B\nint b;\n#endif\n";
        let out = scrub(raw);

        assert!(out.contains("int keep;"));
        assert!(!out.contains("int a;"));
        assert!(!out.contains("int b;"));
    }

    #[test]
    fn test_comment_hides_directives() {
        let out = scrub("/* #ifdef NOT_REAL */\nint a;\n/* #endif */\nint b;\n");
        assert!(out.contains("int a;"));
        assert!(out.contains("int b;"));
    }

    #[test]
    fn test_directive_continuation_lines_removed() {
        let raw = "#define LONG_MACRO(x) \\\n  do { x; } \\\n  while (0)\nint after;\n";
        let out = scrub(raw);

        assert!(!out.contains("do {"));
        assert!(!out.contains("while"));
        assert!(out.contains("int after;"));
    }

    #[test]
    fn test_else_directive_removed() {
        let out = scrub("#if defined(X)\nint a;\n#else\nint b;\n#endif\n");

        assert!(!out.contains("else"));
        assert!(out.contains("int a;"));
        assert!(out.contains("int b;"));
    }

    #[test]
    fn test_collapses_blank_runs() {
        let out = scrub("int a;\n\n\n\n\nint b;\n");
        assert_eq!(out, "int a;\n\nint b;\n");

        let out = scrub("int a;\n\nint b;\n");
        assert_eq!(out, "int a;\n\nint b;\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let out = scrub("#define MEOS_EPSG_WGS84 4326\r\nint a;\r\n");
        assert_eq!(out, "#define MEOS_EPSG_WGS84 4326\nint a;\n");

        let out = scrub("#define M(x) \\\r\n  ((x) + 1)\r\nint a;\r\n");
        assert_eq!(out, "int a;\n");

        let out = scrub("int a;\r\n\r\n\r\n\r\n\r\nint b;\r\n");
        assert_eq!(out, "int a;\n\nint b;\n");
    }

    #[test]
    fn test_idempotent() {
        let once = scrub(MEOS_LIKE);
        let twice = scrub(&once);
        assert_eq!(once, twice);
    }
}
