use quadc::repl::highlighter::{colorize, complete, needs_more_input};

#[test]
fn open_braces_and_parens_hold_the_prompt_open() {
    assert!(needs_more_input("int main() {"));
    assert!(needs_more_input("while (x"));
    assert!(needs_more_input("int main() {\n    int x = 1;"));
    assert!(!needs_more_input("int main() { return 0; }"));
}

#[test]
fn trailing_operators_continue_the_expression() {
    assert!(needs_more_input("x = 1 +"));
    assert!(needs_more_input("x ="));
    assert!(needs_more_input("x = 1,"));
    assert!(!needs_more_input("x = 1 + 2;"));
}

#[test]
fn literal_text_never_opens_a_construct() {
    assert!(!needs_more_input("x = \"{\";"));
    assert!(!needs_more_input("x = '{';"));
}

#[test]
fn unterminated_literals_hold_the_prompt_open() {
    assert!(needs_more_input("x = \"abc"));
    assert!(needs_more_input("x = 'a"));
}

#[test]
fn comments_are_invisible_to_the_continuation_check() {
    assert!(!needs_more_input("/* { */ int x = 1;"));
    assert!(needs_more_input("int x = 1; /* dangling"));
    assert!(!needs_more_input("int x = 1; // sum: a +"));
}

#[test]
fn preprocessor_lines_are_complete_on_their_own() {
    assert!(!needs_more_input("#include <stdio.h>"));
    assert!(!needs_more_input("#define PAIR(a, b) {"));
    assert!(needs_more_input("#include <stdio.h>\nint main() {"));
}

#[test]
fn completion_suggests_keywords_and_symbols() {
    let symbols = vec![
        "count".to_string(),
        "counter".to_string(),
        "main".to_string(),
    ];
    let completions = complete("co", &symbols);
    assert_eq!(completions, vec!["const", "continue", "count", "counter"]);
    let keywords = complete("wh", &symbols);
    assert_eq!(keywords, vec!["while"]);
}

#[test]
fn colorize_highlights_keywords_numbers_and_strings() {
    let colored = colorize("int x = 42;");
    assert!(colored.contains("\x1b[94mint\x1b[0m"));
    assert!(colored.contains("\x1b[93m42\x1b[0m"));
    assert!(colored.contains(" x = "));

    let colored = colorize("x = \"hi\";");
    assert!(colored.contains("\x1b[92m\"hi\"\x1b[0m"));
}

#[test]
fn colorize_dims_comments_and_preprocessor_lines() {
    let comment = colorize("x = 1; // note");
    assert!(comment.contains("\x1b[90m// note\x1b[0m"));

    let directive = colorize("#include <stdio.h>");
    assert!(directive.starts_with("\x1b[90m#include"));
    assert!(directive.ends_with("\x1b[0m"));
}
