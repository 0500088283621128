use super::*;

const CREATE_DELTAS: &str = "CREATE TABLE `deltas` ( \
    `name` varchar(80) NOT NULL COMMENT 'The name of the delta', \
    `sequence` int(10) unsigned NOT NULL COMMENT 'The sequence number', \
    `state` varchar(20) NOT NULL DEFAULT 'pending' COMMENT 'The state', \
    `delta` mediumtext COMMENT 'JSON scripts', \
    `meta` mediumtext COMMENT 'JSON metadata', \
    PRIMARY KEY (`name`), \
    UNIQUE KEY `sequence` (`sequence`), \
    KEY `state` (`state`) )";

async fn engine_with_table() -> MemoryEngine {
    let engine = MemoryEngine::new();
    engine.execute(CREATE_DELTAS).await.unwrap();
    engine
}

#[tokio::test]
async fn test_create_and_describe() {
    let engine = engine_with_table().await;
    let columns = engine.describe_columns("deltas").await.unwrap();
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["name", "sequence", "state", "delta", "meta"]);
    assert!(columns[0].primary_key);
    assert!(columns.iter().skip(1).all(|c| !c.primary_key));
}

#[tokio::test]
async fn test_describe_missing_table() {
    let engine = MemoryEngine::new();
    let err = engine.describe_columns("nope").await.unwrap_err();
    match err {
        DbError::Engine { code, number, .. } => {
            assert_eq!(code, "ER_NO_SUCH_TABLE");
            assert_eq!(number, 1146);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_create_twice_fails() {
    let engine = engine_with_table().await;
    let err = engine.execute(CREATE_DELTAS).await.unwrap_err();
    assert!(matches!(err, DbError::Engine { number: 1050, .. }));
}

#[tokio::test]
async fn test_drop_if_exists() {
    let engine = engine_with_table().await;
    engine
        .execute("DROP TABLE IF EXISTS `deltas`")
        .await
        .unwrap();
    assert!(engine
        .list_tables_matching("deltas")
        .await
        .unwrap()
        .is_empty());
    // Dropping again is a no-op
    engine
        .execute("DROP TABLE IF EXISTS `deltas`")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_tables_matching() {
    let engine = engine_with_table().await;
    assert_eq!(
        engine.list_tables_matching("deltas").await.unwrap(),
        vec!["deltas".to_string()]
    );
    assert_eq!(
        engine.list_tables_matching("delta%").await.unwrap(),
        vec!["deltas".to_string()]
    );
    assert_eq!(
        engine.list_tables_matching("delta_").await.unwrap(),
        vec!["deltas".to_string()]
    );
    assert!(engine
        .list_tables_matching("other%")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_replace_and_select() {
    let engine = engine_with_table().await;
    engine
        .execute(
            "REPLACE INTO `deltas` (`name`, `sequence`, `state`, `delta`, `meta`) \
             VALUES ('first', 1, 'pending', '{}', '{\"note\": \"a;b\"}')",
        )
        .await
        .unwrap();

    let result = engine
        .execute("SELECT * FROM `deltas` WHERE `sequence` = 1")
        .await
        .unwrap();
    assert_eq!(result.rows.len(), 1);
    let row = &result.rows[0];
    assert_eq!(row.get("name"), Some(&SqlValue::Text("first".to_string())));
    assert_eq!(row.get("sequence"), Some(&SqlValue::Integer(1)));
    assert_eq!(
        row.get("meta"),
        Some(&SqlValue::Text("{\"note\": \"a;b\"}".to_string()))
    );
}

#[tokio::test]
async fn test_replace_overwrites_by_primary_key() {
    let engine = engine_with_table().await;
    for state in ["pending", "deployed"] {
        engine
            .execute(&format!(
                "REPLACE INTO `deltas` (`name`, `sequence`, `state`, `delta`, `meta`) \
                 VALUES ('first', 1, '{state}', '{{}}', '{{}}')"
            ))
            .await
            .unwrap();
    }
    let result = engine.execute("SELECT * FROM `deltas`").await.unwrap();
    assert_eq!(result.rows.len(), 1);
    assert_eq!(
        result.rows[0].get("state"),
        Some(&SqlValue::Text("deployed".to_string()))
    );
}

#[tokio::test]
async fn test_replace_collides_on_unique_column() {
    let engine = engine_with_table().await;
    for name in ["first", "second"] {
        engine
            .execute(&format!(
                "REPLACE INTO `deltas` (`name`, `sequence`, `state`, `delta`, `meta`) \
                 VALUES ('{name}', 7, 'pending', '{{}}', '{{}}')"
            ))
            .await
            .unwrap();
    }
    // Same sequence: the first row is replaced, not duplicated
    let result = engine.execute("SELECT * FROM `deltas`").await.unwrap();
    assert_eq!(result.rows.len(), 1);
    assert_eq!(
        result.rows[0].get("name"),
        Some(&SqlValue::Text("second".to_string()))
    );
}

#[tokio::test]
async fn test_select_order_by() {
    let engine = engine_with_table().await;
    for (name, sequence) in [("c", 3), ("a", 1), ("b", 2)] {
        engine
            .execute(&format!(
                "REPLACE INTO `deltas` (`name`, `sequence`, `state`, `delta`, `meta`) \
                 VALUES ('{name}', {sequence}, 'pending', '{{}}', '{{}}')"
            ))
            .await
            .unwrap();
    }
    let result = engine
        .execute("SELECT `name`, `sequence`, `state` FROM `deltas` ORDER BY `sequence`")
        .await
        .unwrap();
    assert_eq!(result.columns, vec!["name", "sequence", "state"]);
    let names: Vec<_> = result
        .rows
        .iter()
        .map(|r| r.get("name").cloned().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            SqlValue::Text("a".to_string()),
            SqlValue::Text("b".to_string()),
            SqlValue::Text("c".to_string())
        ]
    );
}

#[tokio::test]
async fn test_select_missing_row() {
    let engine = engine_with_table().await;
    let result = engine
        .execute("SELECT * FROM `deltas` WHERE `sequence` = 100")
        .await
        .unwrap();
    assert!(result.rows.is_empty());
}

#[tokio::test]
async fn test_unknown_column_rejected() {
    let engine = engine_with_table().await;
    let err = engine
        .execute("REPLACE INTO `deltas` (`bogus`) VALUES (1)")
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Engine { number: 1054, .. }));
}

#[tokio::test]
async fn test_unsupported_statement() {
    let engine = MemoryEngine::new();
    let err = engine.execute("GRANT ALL ON *.* TO root").await.unwrap_err();
    assert!(matches!(err, DbError::Engine { number: 1064, .. }));
}

#[tokio::test]
async fn test_executed_statement_log() {
    let engine = engine_with_table().await;
    engine
        .execute("SELECT * FROM `deltas`")
        .await
        .unwrap();
    assert_eq!(engine.executed_statements().len(), 2);
    assert_eq!(engine.executed_matching("create table"), 1);
    assert_eq!(engine.executed_matching("SELECT"), 1);
}

#[test]
fn test_quote_ident() {
    let engine = MemoryEngine::new();
    assert_eq!(engine.quote_ident("deltas"), "`deltas`");
    assert_eq!(engine.quote_ident("odd`name"), "`odd``name`");
}

#[test]
fn test_quote_value() {
    let engine = MemoryEngine::new();
    assert_eq!(engine.quote_value(&SqlValue::Null), "NULL");
    assert_eq!(engine.quote_value(&SqlValue::Integer(42)), "42");
    assert_eq!(
        engine.quote_value(&SqlValue::Text("it's".to_string())),
        "'it\\'s'"
    );
    assert_eq!(
        engine.quote_value(&SqlValue::Text("a\\b".to_string())),
        "'a\\\\b'"
    );
}

#[tokio::test]
async fn test_quoted_value_round_trips_through_replace() {
    let engine = engine_with_table().await;
    let tricky = SqlValue::Text("quote ' backslash \\ semi;colon".to_string());
    engine
        .execute(&format!(
            "REPLACE INTO `deltas` (`name`, `sequence`, `state`, `delta`, `meta`) \
             VALUES ({}, 1, 'pending', NULL, NULL)",
            engine.quote_value(&tricky)
        ))
        .await
        .unwrap();
    let result = engine
        .execute("SELECT * FROM `deltas` WHERE `sequence` = 1")
        .await
        .unwrap();
    assert_eq!(result.rows[0].get("name"), Some(&tricky));
    assert_eq!(result.rows[0].get("delta"), Some(&SqlValue::Null));
}
