use super::*;

fn statement(text: &str) -> Token {
    Token::Statement {
        text: text.to_string(),
    }
}

fn comment(text: &str) -> Token {
    Token::Comment {
        text: text.to_string(),
    }
}

#[test]
fn test_empty_script() {
    assert_eq!(tokenize("").unwrap(), vec![]);
}

#[test]
fn test_ignores_blank_lines() {
    assert_eq!(tokenize("\n\n\n").unwrap(), vec![]);
    assert_eq!(tokenize("   \n\t\n").unwrap(), vec![]);
}

#[test]
fn test_parses_comments() {
    assert_eq!(
        tokenize("-- Hello!\n-- Bye!").unwrap(),
        vec![comment("Hello!"), comment("Bye!")]
    );
}

#[test]
fn test_comment_text_is_trimmed() {
    assert_eq!(tokenize("  --   spaced   ").unwrap(), vec![comment("spaced")]);
    assert_eq!(tokenize("--").unwrap(), vec![comment("")]);
}

#[test]
fn test_one_line_statement() {
    assert_eq!(
        tokenize("TRUNCATE test;").unwrap(),
        vec![statement("TRUNCATE test")]
    );
}

#[test]
fn test_multiple_statements_on_a_line() {
    assert_eq!(
        tokenize("TRUNCATE test; TRUNCATE users;").unwrap(),
        vec![statement("TRUNCATE test"), statement("TRUNCATE users")]
    );
}

#[test]
fn test_multi_line_statement() {
    assert_eq!(
        tokenize("SELECT *\n  FROM `users`\n WHERE `id` < 1000;").unwrap(),
        vec![statement("SELECT * FROM `users` WHERE `id` < 1000")]
    );
}

#[test]
fn test_blank_line_does_not_close_statement() {
    assert_eq!(
        tokenize("SELECT *\n\n  FROM t;").unwrap(),
        vec![statement("SELECT * FROM t")]
    );
}

#[test]
fn test_separator_inside_double_quotes() {
    assert_eq!(
        tokenize("INSERT INTO t VALUES (1, \"a;b\");").unwrap(),
        vec![statement("INSERT INTO t VALUES (1, \"a;b\")")]
    );
}

#[test]
fn test_separator_inside_single_quotes() {
    assert_eq!(
        tokenize("INSERT INTO t VALUES (1, 'a;b');").unwrap(),
        vec![statement("INSERT INTO t VALUES (1, 'a;b')")]
    );
}

#[test]
fn test_escaped_quote_keeps_literal_open() {
    // The \" does not close the literal, so the ; stays inside it.
    assert_eq!(
        tokenize("INSERT INTO `users` VALUES (1000, \"Jonny\\\" DROP TABLES;\");").unwrap(),
        vec![statement(
            "INSERT INTO `users` VALUES (1000, \"Jonny\\\" DROP TABLES;\")"
        )]
    );
}

#[test]
fn test_comment_line_inside_open_statement_is_statement_text() {
    // Mid-statement annotation lines are not standalone comment tokens;
    // they accumulate into the statement.
    assert_eq!(
        tokenize("INSERT INTO t\n-- inline note\nVALUES (1);").unwrap(),
        vec![statement("INSERT INTO t -- inline note VALUES (1)")]
    );
}

#[test]
fn test_comment_before_statement_opens() {
    assert_eq!(
        tokenize("-- setup\nTRUNCATE test;").unwrap(),
        vec![comment("setup"), statement("TRUNCATE test")]
    );
}

#[test]
fn test_empty_statement_is_emitted() {
    assert_eq!(tokenize(";").unwrap(), vec![statement("")]);
    assert_eq!(
        tokenize("A;;").unwrap(),
        vec![statement("A"), statement("")]
    );
}

#[test]
fn test_unterminated_statement() {
    let err = tokenize("TRUNCATE test").unwrap_err();
    assert!(matches!(err, SqlError::UnterminatedStatement(_)));
}

#[test]
fn test_unterminated_statement_across_lines() {
    let err = tokenize("SELECT *\n  FROM t\n").unwrap_err();
    assert!(matches!(err, SqlError::UnterminatedStatement(_)));
}

#[test]
fn test_unterminated_literal_is_syntax_error() {
    let err = tokenize("SELECT 'oops;\n").unwrap_err();
    match err {
        SqlError::Syntax { line, .. } => assert_eq!(line, 1),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_literal_spanning_lines() {
    assert_eq!(
        tokenize("INSERT INTO t VALUES ('two\nlines');").unwrap(),
        vec![statement("INSERT INTO t VALUES ('two lines')")]
    );
}

#[test]
fn test_token_wire_shape() {
    let tokens = tokenize("-- hi\nSELECT 1;").unwrap();
    assert_eq!(
        serde_json::to_value(&tokens).unwrap(),
        serde_json::json!([
            {"kind": "comment", "text": "hi"},
            {"kind": "statement", "text": "SELECT 1"}
        ])
    );
}

#[test]
fn test_token_accessors() {
    let tokens = tokenize("-- hi\nSELECT 1;").unwrap();
    assert!(!tokens[0].is_statement());
    assert!(tokens[1].is_statement());
    assert_eq!(tokens[0].text(), "hi");
    assert_eq!(tokens[1].text(), "SELECT 1");
}
