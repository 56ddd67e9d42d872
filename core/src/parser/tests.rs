use crate::ast::*;
use crate::parser::parse_ddls;
use crate::sql::ToSql;

fn parse_one(input: &str) -> Ddl {
    let ddls = parse_ddls(input).expect("parse failed");
    assert_eq!(ddls.len(), 1, "expected one statement from: {input}");
    ddls.into_iter().next().unwrap()
}

fn roundtrip(input: &str, want: &str) {
    assert_eq!(parse_one(input).to_sql(), want);
}

#[test]
fn test_empty_input() {
    assert!(parse_ddls("").unwrap().is_empty());
    assert!(parse_ddls("  -- only a comment\n").unwrap().is_empty());
    assert!(parse_ddls(";;").unwrap().is_empty());
}

#[test]
fn test_create_table_roundtrip() {
    roundtrip(
        "CREATE TABLE T1 (
          T1_I1 INT64 NOT NULL,
          T1_S1 STRING(MAX),
          CONSTRAINT FK1 FOREIGN KEY (T1_S1) REFERENCES T2 (T2_S1),
        ) PRIMARY KEY(T1_I1)",
        "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, T1_S1 STRING(MAX), \
         CONSTRAINT FK1 FOREIGN KEY (T1_S1) REFERENCES T2 (T2_S1)) PRIMARY KEY (T1_I1)",
    );
}

#[test]
fn test_create_table_full_clauses() {
    let ddl = parse_one(
        "CREATE TABLE S1.T1 (
          Id INT64 NOT NULL,
          Ts TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp = true),
          Total INT64 AS (Id + 1) STORED,
          Name STRING(64) DEFAULT ('anon'),
          SYNONYM(T2),
          CONSTRAINT CHK1 CHECK (Id > 0),
        ) PRIMARY KEY (Id ASC, Ts DESC),
          INTERLEAVE IN PARENT P1 ON DELETE CASCADE,
          ROW DELETION POLICY (OLDER_THAN(Ts, INTERVAL 1 DAY))",
    );
    let Ddl::CreateTable(table) = ddl else {
        panic!("expected CREATE TABLE");
    };
    assert_eq!(table.name.schema(), Some("S1"));
    assert_eq!(table.columns.len(), 4);
    assert_eq!(table.synonyms, vec!["T2"]);
    assert_eq!(table.constraints.len(), 1);
    assert_eq!(table.primary_keys.len(), 2);
    assert_eq!(
        table.interleave.as_ref().unwrap().on_delete,
        Some(OnDelete::Cascade)
    );
    assert_eq!(
        table.row_deletion_policy.as_ref().unwrap().expr.0,
        "OLDER_THAN(Ts, INTERVAL 1 DAY)"
    );
    let generated = table.columns[2].generated.as_ref().unwrap();
    assert_eq!(generated.expr.0, "Id + 1");
    assert!(generated.stored);
}

#[test]
fn test_create_index_roundtrip() {
    roundtrip(
        "CREATE UNIQUE NULL_FILTERED INDEX IDX1 ON T1(T1_I1, T1_S1 DESC) STORING (T1_F1), INTERLEAVE IN P1",
        "CREATE UNIQUE NULL_FILTERED INDEX IDX1 ON T1 (T1_I1, T1_S1 DESC) STORING (T1_F1), INTERLEAVE IN P1",
    );
}

#[test]
fn test_create_search_and_vector_index() {
    roundtrip(
        "CREATE SEARCH INDEX IDX2 ON T1(T1_S1) STORING (T1_I1)",
        "CREATE SEARCH INDEX IDX2 ON T1 (T1_S1) STORING (T1_I1)",
    );
    roundtrip(
        "CREATE VECTOR INDEX IDX3 ON T1(T1_AF1) OPTIONS (distance_type = 'COSINE')",
        "CREATE VECTOR INDEX IDX3 ON T1 (T1_AF1) OPTIONS (distance_type = 'COSINE')",
    );
}

#[test]
fn test_create_view_query_capture() {
    let ddl = parse_one("CREATE OR REPLACE VIEW V1 SQL SECURITY INVOKER AS SELECT * FROM T1 WHERE T1_I1 > 0");
    let Ddl::CreateView(view) = ddl else {
        panic!("expected CREATE VIEW");
    };
    assert!(view.or_replace);
    assert_eq!(view.security, SqlSecurity::Invoker);
    assert_eq!(view.query.0, "SELECT * FROM T1 WHERE T1_I1 > 0");
}

#[test]
fn test_view_query_stops_at_semicolon() {
    let ddls = parse_ddls(
        "CREATE VIEW V1 SQL SECURITY DEFINER AS SELECT * FROM T1;\nCREATE ROLE R1;",
    )
    .unwrap();
    assert_eq!(ddls.len(), 2);
}

#[test]
fn test_change_stream_forms() {
    let ddl = parse_one("CREATE CHANGE STREAM S1 FOR T1(T1_I1), T2 OPTIONS (retention_period = '36h')");
    let Ddl::CreateChangeStream(stream) = ddl else {
        panic!("expected CREATE CHANGE STREAM");
    };
    let Some(ChangeStreamFor::Tables(tables)) = &stream.for_clause else {
        panic!("expected FOR tables");
    };
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].columns, vec!["T1_I1"]);
    assert!(tables[1].columns.is_empty());

    roundtrip("CREATE CHANGE STREAM S2 FOR ALL", "CREATE CHANGE STREAM S2 FOR ALL");
    roundtrip(
        "ALTER CHANGE STREAM S1 SET FOR T1(T1_I1)",
        "ALTER CHANGE STREAM S1 SET FOR T1(T1_I1)",
    );
    roundtrip("ALTER CHANGE STREAM S1 DROP FOR ALL", "ALTER CHANGE STREAM S1 DROP FOR ALL");
}

#[test]
fn test_proto_bundle() {
    roundtrip("CREATE PROTO BUNDLE (`test.proto`)", "CREATE PROTO BUNDLE (`test.proto`)");
    roundtrip(
        "ALTER PROTO BUNDLE INSERT (`a.B`) DELETE (`c.D`)",
        "ALTER PROTO BUNDLE INSERT (`a.B`) DELETE (`c.D`)",
    );
    roundtrip("DROP PROTO BUNDLE", "DROP PROTO BUNDLE");
}

#[test]
fn test_grant_forms() {
    roundtrip(
        "GRANT SELECT, SELECT(C1), UPDATE, INSERT(C1, C2), DELETE ON TABLE T1 TO ROLE R1",
        "GRANT SELECT, SELECT(C1), UPDATE, INSERT(C1, C2), DELETE ON TABLE T1 TO ROLE R1",
    );
    roundtrip("GRANT SELECT ON VIEW V1 TO ROLE R1", "GRANT SELECT ON VIEW V1 TO ROLE R1");
    roundtrip(
        "GRANT SELECT ON CHANGE STREAM S1 TO ROLE R1",
        "GRANT SELECT ON CHANGE STREAM S1 TO ROLE R1",
    );
    roundtrip(
        "GRANT EXECUTE ON TABLE FUNCTION READ_S1 TO ROLE R1",
        "GRANT EXECUTE ON TABLE FUNCTION READ_S1 TO ROLE R1",
    );
    roundtrip("GRANT ROLE R2 TO ROLE R1", "GRANT ROLE R2 TO ROLE R1");
    roundtrip(
        "REVOKE SELECT ON TABLE T1 FROM ROLE R1",
        "REVOKE SELECT ON TABLE T1 FROM ROLE R1",
    );
}

#[test]
fn test_alter_table_forms() {
    roundtrip(
        "ALTER TABLE T1 ADD COLUMN T1_S1 STRING(MAX)",
        "ALTER TABLE T1 ADD COLUMN T1_S1 STRING(MAX)",
    );
    roundtrip("ALTER TABLE T1 DROP COLUMN T1_S1", "ALTER TABLE T1 DROP COLUMN T1_S1");
    roundtrip(
        "ALTER TABLE T1 ALTER COLUMN T1_S1 STRING(100) NOT NULL DEFAULT ('x')",
        "ALTER TABLE T1 ALTER COLUMN T1_S1 STRING(100) NOT NULL DEFAULT ('x')",
    );
    roundtrip(
        "ALTER TABLE T1 ALTER COLUMN T1_S1 SET OPTIONS (allow_commit_timestamp = null)",
        "ALTER TABLE T1 ALTER COLUMN T1_S1 SET OPTIONS (allow_commit_timestamp = null)",
    );
    roundtrip(
        "ALTER TABLE T1 ALTER COLUMN T1_S1 SET DEFAULT ('x')",
        "ALTER TABLE T1 ALTER COLUMN T1_S1 SET DEFAULT ('x')",
    );
    roundtrip(
        "ALTER TABLE T1 ALTER COLUMN T1_S1 DROP DEFAULT",
        "ALTER TABLE T1 ALTER COLUMN T1_S1 DROP DEFAULT",
    );
    roundtrip(
        "ALTER TABLE T1 ADD CONSTRAINT FK1 FOREIGN KEY (A) REFERENCES T2 (B)",
        "ALTER TABLE T1 ADD CONSTRAINT FK1 FOREIGN KEY (A) REFERENCES T2 (B)",
    );
    roundtrip("ALTER TABLE T1 DROP CONSTRAINT FK1", "ALTER TABLE T1 DROP CONSTRAINT FK1");
    roundtrip(
        "ALTER TABLE T1 ADD ROW DELETION POLICY (OLDER_THAN(Ts, INTERVAL 1 DAY))",
        "ALTER TABLE T1 ADD ROW DELETION POLICY (OLDER_THAN(Ts, INTERVAL 1 DAY))",
    );
    roundtrip("ALTER TABLE T1 DROP ROW DELETION POLICY", "ALTER TABLE T1 DROP ROW DELETION POLICY");
    roundtrip("ALTER TABLE T1 ADD SYNONYM T2", "ALTER TABLE T1 ADD SYNONYM T2");
    roundtrip("ALTER TABLE T1 DROP SYNONYM T2", "ALTER TABLE T1 DROP SYNONYM T2");
}

#[test]
fn test_alter_index_and_database() {
    roundtrip(
        "ALTER INDEX IDX1 ADD STORED COLUMN C1",
        "ALTER INDEX IDX1 ADD STORED COLUMN C1",
    );
    roundtrip(
        "ALTER SEARCH INDEX IDX2 DROP STORED COLUMN C1",
        "ALTER SEARCH INDEX IDX2 DROP STORED COLUMN C1",
    );
    roundtrip(
        "ALTER DATABASE D1 SET OPTIONS (version_retention_period = '1d')",
        "ALTER DATABASE D1 SET OPTIONS (version_retention_period = '1d')",
    );
}

#[test]
fn test_property_graph() {
    roundtrip(
        "CREATE PROPERTY GRAPH G1 NODE TABLES (T1, T2)",
        "CREATE PROPERTY GRAPH G1 NODE TABLES (T1, T2)",
    );
    roundtrip(
        "CREATE PROPERTY GRAPH G1 NODE TABLES (T1 KEY (C1)) EDGE TABLES (E1 KEY (C1) \
         SOURCE KEY (C2) REFERENCES T1 (C1) DESTINATION KEY (C3) REFERENCES T1 (C1))",
        "CREATE PROPERTY GRAPH G1 NODE TABLES (T1 KEY (C1)) EDGE TABLES (E1 KEY (C1) \
         SOURCE KEY (C2) REFERENCES T1 (C1) DESTINATION KEY (C3) REFERENCES T1 (C1))",
    );
}

#[test]
fn test_sequence_and_model() {
    roundtrip(
        "CREATE SEQUENCE S1 OPTIONS (sequence_kind = 'bit_reversed_positive')",
        "CREATE SEQUENCE S1 OPTIONS (sequence_kind = 'bit_reversed_positive')",
    );
    roundtrip(
        "ALTER SEQUENCE S1 SET OPTIONS (start_counter_with = 10)",
        "ALTER SEQUENCE S1 SET OPTIONS (start_counter_with = 10)",
    );
    roundtrip(
        "CREATE MODEL M1 INPUT (F1 FLOAT64) OUTPUT (F2 FLOAT64) REMOTE OPTIONS (endpoint = 'model')",
        "CREATE MODEL M1 INPUT (F1 FLOAT64) OUTPUT (F2 FLOAT64) REMOTE OPTIONS (endpoint = 'model')",
    );
    roundtrip(
        "ALTER MODEL M1 SET OPTIONS (endpoint = 'model2')",
        "ALTER MODEL M1 SET OPTIONS (endpoint = 'model2')",
    );
}

#[test]
fn test_drop_statements() {
    for (input, want) in [
        ("DROP SCHEMA S1", "DROP SCHEMA S1"),
        ("DROP TABLE T1", "DROP TABLE T1"),
        ("DROP INDEX IDX1", "DROP INDEX IDX1"),
        ("DROP SEARCH INDEX IDX2", "DROP SEARCH INDEX IDX2"),
        ("DROP VECTOR INDEX IDX3", "DROP VECTOR INDEX IDX3"),
        ("DROP PROPERTY GRAPH G1", "DROP PROPERTY GRAPH G1"),
        ("DROP VIEW V1", "DROP VIEW V1"),
        ("DROP CHANGE STREAM S1", "DROP CHANGE STREAM S1"),
        ("DROP SEQUENCE S1", "DROP SEQUENCE S1"),
        ("DROP MODEL M1", "DROP MODEL M1"),
        ("DROP ROLE R1", "DROP ROLE R1"),
    ] {
        roundtrip(input, want);
    }
}

#[test]
fn test_parse_error_position() {
    let err = parse_ddls("CREATE NONSENSE X1").unwrap_err();
    assert!(err.to_string().contains("parse error"));
}
