use quadc::lexer::{lex, render_token_table, TokenKind};

#[test]
fn lexes_basic_declaration() {
    let tokens = lex("int x = 42;");
    let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Keyword,
            TokenKind::Identifier,
            TokenKind::Operator,
            TokenKind::Number,
            TokenKind::Punctuation,
        ]
    );
    let texts = tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>();
    assert_eq!(texts, vec!["int", "x", "=", "42", ";"]);
}

#[test]
fn lexes_float_separately_from_integer() {
    let tokens = lex("3.14 42");
    assert_eq!(tokens[0].kind, TokenKind::Float);
    assert_eq!(tokens[0].text, "3.14");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].text, "42");
}

#[test]
fn lexes_two_character_operators_as_one_token() {
    let tokens = lex("== != <= >= && || ++ --");
    let texts = tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>();
    assert_eq!(texts, vec!["==", "!=", "<=", ">=", "&&", "||", "++", "--"]);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Operator));
}

#[test]
fn keeps_single_character_operators_apart() {
    let tokens = lex("a = b < c");
    let texts = tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>();
    assert_eq!(texts, vec!["a", "=", "b", "<", "c"]);
}

#[test]
fn distinguishes_keywords_from_identifiers() {
    let tokens = lex("int integer intx while whilst");
    let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Keyword,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Keyword,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn lexes_string_and_char_literals_with_quotes() {
    let tokens = lex("\"hello\" 'a'");
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "\"hello\"");
    assert_eq!(tokens[1].kind, TokenKind::Char);
    assert_eq!(tokens[1].text, "'a'");
}

#[test]
fn unterminated_string_and_char_run_to_end_of_input() {
    let tokens = lex("\"no closing quote");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "\"no closing quote");

    let tokens = lex("'x");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Char);
    assert_eq!(tokens[0].text, "'x");
}

#[test]
fn keeps_comments_in_the_stream() {
    let tokens = lex("int x; // trailing\n/* block */ int y;");
    let comments = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Comment)
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(comments, vec!["// trailing", "/* block */"]);
}

#[test]
fn unterminated_block_comment_runs_to_end_of_input() {
    let tokens = lex("int x; /* dangling\nnote");
    let last = tokens.last().expect("comment token");
    assert_eq!(last.kind, TokenKind::Comment);
    assert_eq!(last.text, "/* dangling\nnote");
    assert_eq!(last.line, 1);
}

#[test]
fn lexes_preprocessor_line_as_one_token() {
    let tokens = lex("#include <stdio.h>\nint main() {}");
    assert_eq!(tokens[0].kind, TokenKind::Preprocessor);
    assert_eq!(tokens[0].text, "#include <stdio.h>");
    assert_eq!(tokens[1].kind, TokenKind::Keyword);
    assert_eq!(tokens[1].text, "int");
}

#[test]
fn classifies_stray_bytes_as_unknown() {
    let tokens = lex("int x @ $");
    let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Keyword,
            TokenKind::Identifier,
            TokenKind::Unknown,
            TokenKind::Unknown,
        ]
    );
}

#[test]
fn tracks_line_numbers_across_newlines() {
    let tokens = lex("int x;\nint y;\n\nint z;");
    let lines = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Identifier)
        .map(|t| t.line)
        .collect::<Vec<_>>();
    assert_eq!(lines, vec![1, 2, 4]);
}

#[test]
fn counts_lines_inside_block_comments() {
    let tokens = lex("/* one\ntwo */ int x;");
    let identifier = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Identifier)
        .expect("identifier token");
    assert_eq!(identifier.line, 2);
}

#[test]
fn counts_escaped_newlines_inside_literals() {
    let tokens = lex("'\\\n' int x;");
    assert_eq!(tokens[0].kind, TokenKind::Char);
    let keyword = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Keyword)
        .expect("keyword token");
    assert_eq!(keyword.line, 2);

    let tokens = lex("\"a\\\nb\" int y;");
    let keyword = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Keyword)
        .expect("keyword token");
    assert_eq!(keyword.line, 2);
}

#[test]
fn never_drops_input_characters() {
    // Total scanning: with no whitespace to skip, the token texts
    // concatenate back to the exact input.
    let source = "x=1;@'c'#d";
    let tokens = lex(source);
    let rebuilt = tokens.iter().map(|t| t.text.as_str()).collect::<String>();
    assert_eq!(rebuilt, source);
    assert!(tokens.iter().all(|t| !t.text.is_empty()));
}

#[test]
fn renders_token_table_with_one_row_per_token() {
    let tokens = lex("int x = 42;");
    let table = render_token_table(&tokens);
    let lines = table.lines().collect::<Vec<_>>();
    assert!(lines[0].starts_with("TOKEN TYPE"));
    assert!(lines[1].starts_with("---"));
    assert_eq!(lines.len(), tokens.len() + 2);
    assert!(lines[2].starts_with("KEYWORD"));
    assert!(table.contains("IDENTIFIER"));
    assert!(table.contains("PUNCTUATION"));
}
