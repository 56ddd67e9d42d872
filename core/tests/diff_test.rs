//! End-to-end diff scenarios.
//!
//! Expectations are compared after re-parsing both sides, so they are
//! insensitive to whitespace and statement formatting but strict about
//! statement content and order.

use spandiff_core::sql::ToSql;
use spandiff_core::{DiffOptions, SpandiffError, diff, parser};

fn strict() -> DiffOptions {
    DiffOptions {
        error_on_unsupported_ddl: true,
    }
}

#[track_caller]
fn check(base: &str, target: &str, want: &str) {
    let got = diff(base, target, &strict()).expect("diff failed");
    let want_ddls: Vec<String> = parser::parse_ddls(want)
        .expect("expected DDL must parse")
        .iter()
        .map(ToSql::to_sql)
        .collect();
    let got_ddls: Vec<String> = parser::parse_ddls(&got)
        .expect("emitted DDL must re-parse")
        .iter()
        .map(ToSql::to_sql)
        .collect();
    assert_eq!(want_ddls, got_ddls, "diff of\n{base}\n=>\n{target}");
}

#[test]
fn test_schema_add_drop() {
    check("", "CREATE SCHEMA S1;", "CREATE SCHEMA S1;");
    check("CREATE SCHEMA S1;", "", "DROP SCHEMA S1;");
}

#[test]
fn test_table_add_drop_recreate() {
    let table = "CREATE TABLE T1 (T1_I1 INT64 NOT NULL) PRIMARY KEY (T1_I1);";
    check("", table, table);
    check(table, "", "DROP TABLE T1;");
    check(
        table,
        "CREATE TABLE T1 (T1_I1 INT64 NOT NULL) PRIMARY KEY (T1_I1, T1_S1);",
        "DROP TABLE T1;
         CREATE TABLE T1 (T1_I1 INT64 NOT NULL) PRIMARY KEY (T1_I1, T1_S1);",
    );
}

#[test]
fn test_foreign_key_add_drop_recreate() {
    let without = "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, T1_S1 STRING(MAX)) PRIMARY KEY (T1_I1);";
    let with_fk = "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, T1_S1 STRING(MAX),
         CONSTRAINT FK1 FOREIGN KEY (T1_S1) REFERENCES T2 (T2_S1)) PRIMARY KEY (T1_I1);";
    check(
        without,
        with_fk,
        "ALTER TABLE T1 ADD CONSTRAINT FK1 FOREIGN KEY (T1_S1) REFERENCES T2 (T2_S1);",
    );
    check(with_fk, without, "ALTER TABLE T1 DROP CONSTRAINT FK1;");

    check(
        "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, T1_S1 STRING(MAX),
          CONSTRAINT FK1 FOREIGN KEY (T1_I2) REFERENCES T2 (T2_I1)) PRIMARY KEY (T1_I1);",
        with_fk,
        "ALTER TABLE T1 DROP CONSTRAINT FK1;
         ALTER TABLE T1 ADD CONSTRAINT FK1 FOREIGN KEY (T1_S1) REFERENCES T2 (T2_S1);",
    );
}

#[test]
fn test_check_constraint_add_drop_recreate() {
    let without = "CREATE TABLE T1 (T1_I1 INT64 NOT NULL) PRIMARY KEY (T1_I1);";
    let with_chk =
        "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, CONSTRAINT CHK1 CHECK (T1_I1 > 0)) PRIMARY KEY (T1_I1);";
    check(without, with_chk, "ALTER TABLE T1 ADD CONSTRAINT CHK1 CHECK (T1_I1 > 0);");
    check(with_chk, without, "ALTER TABLE T1 DROP CONSTRAINT CHK1;");
    check(
        with_chk,
        "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, CONSTRAINT CHK1 CHECK (T1_I1 > 1)) PRIMARY KEY (T1_I1);",
        "ALTER TABLE T1 DROP CONSTRAINT CHK1;
         ALTER TABLE T1 ADD CONSTRAINT CHK1 CHECK (T1_I1 > 1);",
    );
}

#[test]
fn test_row_deletion_policy() {
    let without =
        "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, T1_TS1 TIMESTAMP NOT NULL) PRIMARY KEY (T1_I1);";
    let one_day = "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, T1_TS1 TIMESTAMP NOT NULL)
         PRIMARY KEY (T1_I1), ROW DELETION POLICY (OLDER_THAN(T1_TS1, INTERVAL 1 DAY));";
    let two_days = "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, T1_TS1 TIMESTAMP NOT NULL)
         PRIMARY KEY (T1_I1), ROW DELETION POLICY (OLDER_THAN(T1_TS1, INTERVAL 2 DAY));";
    check(
        without,
        one_day,
        "ALTER TABLE T1 ADD ROW DELETION POLICY (OLDER_THAN(T1_TS1, INTERVAL 1 DAY));",
    );
    check(one_day, without, "ALTER TABLE T1 DROP ROW DELETION POLICY;");
    check(
        one_day,
        two_days,
        "ALTER TABLE T1 REPLACE ROW DELETION POLICY (OLDER_THAN(T1_TS1, INTERVAL 2 DAY));",
    );
}

#[test]
fn test_synonyms() {
    let without = "CREATE TABLE T1 (T1_I1 INT64 NOT NULL) PRIMARY KEY (T1_I1);";
    let with_t2 = "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, SYNONYM(T2)) PRIMARY KEY (T1_I1);";
    let with_t3 = "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, SYNONYM(T3)) PRIMARY KEY (T1_I1);";
    check(without, with_t2, "ALTER TABLE T1 ADD SYNONYM T2;");
    check(with_t2, without, "ALTER TABLE T1 DROP SYNONYM T2;");
    check(
        with_t2,
        with_t3,
        "ALTER TABLE T1 DROP SYNONYM T2; ALTER TABLE T1 ADD SYNONYM T3;",
    );
}

#[test]
fn test_column_add_drop_alter_recreate() {
    let one = "CREATE TABLE T1 (T1_I1 INT64 NOT NULL) PRIMARY KEY (T1_I1);";
    let two = "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, T1_S1 STRING(MAX)) PRIMARY KEY (T1_I1);";
    check(one, two, "ALTER TABLE T1 ADD COLUMN T1_S1 STRING(MAX);");
    check(two, one, "ALTER TABLE T1 DROP COLUMN T1_S1;");
    check(
        two,
        "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, T1_S1 STRING(100)) PRIMARY KEY (T1_I1);",
        "ALTER TABLE T1 ALTER COLUMN T1_S1 STRING(100);",
    );
    check(
        two,
        "CREATE TABLE T1 (T1_I1 INT64 NOT NULL, T1_S1 INT64) PRIMARY KEY (T1_I1);",
        "ALTER TABLE T1 DROP COLUMN T1_S1; ALTER TABLE T1 ADD COLUMN T1_S1 INT64;",
    );
}

#[test]
fn test_column_not_null_and_default() {
    check(
        "CREATE TABLE T1 (A INT64 NOT NULL, B STRING(MAX)) PRIMARY KEY (A);",
        "CREATE TABLE T1 (A INT64 NOT NULL, B STRING(MAX) NOT NULL) PRIMARY KEY (A);",
        "ALTER TABLE T1 ALTER COLUMN B STRING(MAX) NOT NULL;",
    );
    check(
        "CREATE TABLE T1 (A INT64 NOT NULL, B INT64) PRIMARY KEY (A);",
        "CREATE TABLE T1 (A INT64 NOT NULL, B INT64 DEFAULT (1)) PRIMARY KEY (A);",
        "ALTER TABLE T1 ALTER COLUMN B SET DEFAULT (1);",
    );
    check(
        "CREATE TABLE T1 (A INT64 NOT NULL, B INT64 DEFAULT (1)) PRIMARY KEY (A);",
        "CREATE TABLE T1 (A INT64 NOT NULL, B INT64) PRIMARY KEY (A);",
        "ALTER TABLE T1 ALTER COLUMN B DROP DEFAULT;",
    );
    // The type statement carries the default; no separate SET DEFAULT.
    check(
        "CREATE TABLE T1 (A INT64 NOT NULL, B INT64 DEFAULT (1)) PRIMARY KEY (A);",
        "CREATE TABLE T1 (A INT64 NOT NULL, B INT64 NOT NULL DEFAULT (1)) PRIMARY KEY (A);",
        "ALTER TABLE T1 ALTER COLUMN B INT64 NOT NULL DEFAULT (1);",
    );
}

#[test]
fn test_column_options() {
    check(
        "CREATE TABLE T1 (A INT64 NOT NULL, Ts TIMESTAMP) PRIMARY KEY (A);",
        "CREATE TABLE T1 (A INT64 NOT NULL, Ts TIMESTAMP OPTIONS (allow_commit_timestamp = true)) PRIMARY KEY (A);",
        "ALTER TABLE T1 ALTER COLUMN Ts SET OPTIONS (allow_commit_timestamp = true);",
    );
}

#[test]
fn test_index_add_drop_recreate_storing() {
    check("", "CREATE INDEX IDX1 ON T1 (T1_S1);", "CREATE INDEX IDX1 ON T1 (T1_S1);");
    check("CREATE INDEX IDX1 ON T1 (T1_S1);", "", "DROP INDEX IDX1;");
    check(
        "CREATE INDEX IDX1 ON T1 (T1_I1);",
        "CREATE INDEX IDX1 ON T1 (T1_I1, T1_S1);",
        "DROP INDEX IDX1; CREATE INDEX IDX1 ON T1 (T1_I1, T1_S1);",
    );
    check(
        "CREATE INDEX IDX1 ON T1 (T1_S1);",
        "CREATE INDEX IDX1 ON T1 (T1_S1) STORING (T1_I1);",
        "ALTER INDEX IDX1 ADD STORED COLUMN T1_I1;",
    );
    check(
        "CREATE INDEX IDX1 ON T1 (T1_S1) STORING (T1_I1);",
        "CREATE INDEX IDX1 ON T1 (T1_S1);",
        "ALTER INDEX IDX1 DROP STORED COLUMN T1_I1;",
    );
}

#[test]
fn test_index_direction_defaults_to_asc() {
    check(
        "CREATE INDEX IDX1 ON T1 (T1_I1);",
        "CREATE INDEX IDX1 ON T1 (T1_I1 ASC);",
        "",
    );
}

#[test]
fn test_search_index() {
    check(
        "",
        "CREATE SEARCH INDEX IDX1 ON T1 (T1_S1);",
        "CREATE SEARCH INDEX IDX1 ON T1 (T1_S1);",
    );
    check("CREATE SEARCH INDEX IDX1 ON T1 (T1_S1);", "", "DROP SEARCH INDEX IDX1;");
    check(
        "CREATE SEARCH INDEX IDX1 ON T1 (T1_I1);",
        "CREATE SEARCH INDEX IDX1 ON T1 (T1_I1, T1_S1);",
        "DROP SEARCH INDEX IDX1; CREATE SEARCH INDEX IDX1 ON T1 (T1_I1, T1_S1);",
    );
    check(
        "CREATE SEARCH INDEX IDX1 ON T1 (T1_S1);",
        "CREATE SEARCH INDEX IDX1 ON T1 (T1_S1) STORING (T1_I1);",
        "ALTER SEARCH INDEX IDX1 ADD STORED COLUMN T1_I1;",
    );
    check(
        "CREATE SEARCH INDEX IDX1 ON T1 (T1_S1) STORING (T1_I1);",
        "CREATE SEARCH INDEX IDX1 ON T1 (T1_S1);",
        "ALTER SEARCH INDEX IDX1 DROP STORED COLUMN T1_I1;",
    );
}

#[test]
fn test_vector_index() {
    let cosine = "CREATE VECTOR INDEX IDX1 ON T1 (T1_AF1) OPTIONS (distance_type = 'COSINE');";
    let euclid = "CREATE VECTOR INDEX IDX1 ON T1 (T1_AF1) OPTIONS (distance_type = 'EUCLIDEAN');";
    check("", cosine, cosine);
    check(cosine, "", "DROP VECTOR INDEX IDX1;");
    check(cosine, euclid, &format!("DROP VECTOR INDEX IDX1; {euclid}"));
}

#[test]
fn test_property_graph() {
    check(
        "",
        "CREATE PROPERTY GRAPH G1 NODE TABLES (T1, T2);",
        "CREATE PROPERTY GRAPH G1 NODE TABLES (T1, T2);",
    );
    check("CREATE PROPERTY GRAPH G1 NODE TABLES (T1, T2);", "", "DROP PROPERTY GRAPH G1;");
    check(
        "CREATE PROPERTY GRAPH G1 NODE TABLES (T1, T2);",
        "CREATE PROPERTY GRAPH G1 NODE TABLES (T1);",
        "CREATE OR REPLACE PROPERTY GRAPH G1 NODE TABLES (T1);",
    );
}

#[test]
fn test_view() {
    let v1 = "CREATE VIEW V1 SQL SECURITY DEFINER AS SELECT * FROM T1;";
    check("", v1, v1);
    check(v1, "", "DROP VIEW V1;");
    check(
        v1,
        "CREATE VIEW V1 SQL SECURITY DEFINER AS SELECT * FROM T1 WHERE T1_I1 > 0;",
        "CREATE OR REPLACE VIEW V1 SQL SECURITY DEFINER AS SELECT * FROM T1 WHERE T1_I1 > 0;",
    );
}

#[test]
fn test_view_recreated_with_its_table() {
    check(
        "CREATE TABLE T1 (T1_I1 INT64 NOT NULL) PRIMARY KEY (T1_I1);
         CREATE VIEW V1 SQL SECURITY DEFINER AS SELECT * FROM T1;",
        "CREATE TABLE T1 (T1_S1 STRING(MAX) NOT NULL) PRIMARY KEY (T1_S1);
         CREATE VIEW V1 SQL SECURITY DEFINER AS SELECT * FROM T1;",
        "DROP VIEW V1;
         DROP TABLE T1;
         CREATE TABLE T1 (T1_S1 STRING(MAX) NOT NULL) PRIMARY KEY (T1_S1);
         CREATE VIEW V1 SQL SECURITY DEFINER AS SELECT * FROM T1;",
    );
}

#[test]
fn test_view_depending_on_view_orders_creates() {
    let ddls = "CREATE OR REPLACE VIEW V2 SQL SECURITY INVOKER AS SELECT * FROM T1;
         CREATE OR REPLACE VIEW V1 SQL SECURITY INVOKER AS SELECT * FROM V2;";
    check(
        "",
        ddls,
        "CREATE OR REPLACE VIEW V2 SQL SECURITY INVOKER AS SELECT * FROM T1;
         CREATE OR REPLACE VIEW V1 SQL SECURITY INVOKER AS SELECT * FROM V2;",
    );
}

#[test]
fn test_change_stream() {
    check("", "CREATE CHANGE STREAM S1 FOR ALL;", "CREATE CHANGE STREAM S1 FOR ALL;");
    check("CREATE CHANGE STREAM S1 FOR ALL;", "", "DROP CHANGE STREAM S1;");
    check(
        "CREATE CHANGE STREAM S1 FOR ALL OPTIONS (retention_period = '36h');",
        "CREATE CHANGE STREAM S1 FOR T1(T1_I1) OPTIONS (retention_period = '72h');",
        "ALTER CHANGE STREAM S1 SET FOR T1(T1_I1);
         ALTER CHANGE STREAM S1 SET OPTIONS (retention_period = '72h');",
    );
}

#[test]
fn test_sequence() {
    check(
        "",
        "CREATE SEQUENCE S1 OPTIONS (sequence_kind = 'bit_reversed_positive');",
        "CREATE SEQUENCE S1 OPTIONS (sequence_kind = 'bit_reversed_positive');",
    );
    check(
        "CREATE SEQUENCE S1 OPTIONS (sequence_kind = 'bit_reversed_positive');",
        "",
        "DROP SEQUENCE S1;",
    );
    check(
        "CREATE SEQUENCE S1 OPTIONS (skip_range_min = 1000, skip_range_max = 2000);",
        "CREATE SEQUENCE S1 OPTIONS (start_counter_with = 10);",
        "ALTER SEQUENCE S1 SET OPTIONS (start_counter_with = 10);",
    );
}

#[test]
fn test_model() {
    let m1 = "CREATE MODEL M1 INPUT (F1 FLOAT64) OUTPUT (F2 FLOAT64) REMOTE OPTIONS (endpoint = 'model');";
    check("", m1, m1);
    check(m1, "", "DROP MODEL M1;");
    check(
        m1,
        "CREATE MODEL M1 INPUT (F1 FLOAT64) OUTPUT (F2 FLOAT64) REMOTE OPTIONS (endpoint = 'model2');",
        "ALTER MODEL M1 SET OPTIONS (endpoint = 'model2');",
    );
    check(
        m1,
        "CREATE MODEL M1 INPUT (F1 FLOAT64) OUTPUT (F3 FLOAT64) REMOTE OPTIONS (endpoint = 'model');",
        "CREATE OR REPLACE MODEL M1 INPUT (F1 FLOAT64) OUTPUT (F3 FLOAT64) REMOTE OPTIONS (endpoint = 'model');",
    );
}

#[test]
fn test_proto_bundle() {
    check("", "CREATE PROTO BUNDLE (`test.proto`);", "CREATE PROTO BUNDLE (`test.proto`);");
    check("CREATE PROTO BUNDLE (`test.proto`);", "", "DROP PROTO BUNDLE;");
    check(
        "CREATE PROTO BUNDLE (`test.proto`);",
        "CREATE PROTO BUNDLE (`test2.proto`);",
        "ALTER PROTO BUNDLE INSERT (`test2.proto`) DELETE (`test.proto`);",
    );
}

#[test]
fn test_proto_bundle_twice_is_duplicate() {
    let twice = "CREATE PROTO BUNDLE (`test.proto`); CREATE PROTO BUNDLE (`test2.proto`);";
    let err = diff(twice, twice, &strict()).unwrap_err();
    assert!(matches!(err, SpandiffError::DuplicateIdentifier(_)), "{err}");
}

#[test]
fn test_role_and_grants() {
    check("", "CREATE ROLE R1;", "CREATE ROLE R1;");
    check("CREATE ROLE R1;", "", "DROP ROLE R1;");

    check(
        "",
        "GRANT SELECT, UPDATE ON TABLE T1 TO ROLE R1;",
        "GRANT SELECT, UPDATE ON TABLE T1 TO ROLE R1;",
    );
    check(
        "GRANT SELECT, UPDATE ON TABLE T1 TO ROLE R1;",
        "",
        "REVOKE SELECT, UPDATE ON TABLE T1 FROM ROLE R1;",
    );

    check("", "GRANT SELECT ON VIEW V1 TO ROLE R1;", "GRANT SELECT ON VIEW V1 TO ROLE R1;");
    check("GRANT SELECT ON VIEW V1 TO ROLE R1;", "", "REVOKE SELECT ON VIEW V1 FROM ROLE R1;");

    check(
        "",
        "GRANT SELECT ON CHANGE STREAM S1 TO ROLE R1;",
        "GRANT SELECT ON CHANGE STREAM S1 TO ROLE R1;",
    );
    check(
        "GRANT SELECT ON CHANGE STREAM S1 TO ROLE R1;",
        "",
        "REVOKE SELECT ON CHANGE STREAM S1 FROM ROLE R1;",
    );

    check(
        "",
        "GRANT EXECUTE ON TABLE FUNCTION READ_CS1 TO ROLE R1;",
        "GRANT EXECUTE ON TABLE FUNCTION READ_CS1 TO ROLE R1;",
    );
    check(
        "GRANT EXECUTE ON TABLE FUNCTION READ_CS1 TO ROLE R1;",
        "",
        "REVOKE EXECUTE ON TABLE FUNCTION READ_CS1 FROM ROLE R1;",
    );

    check("", "GRANT ROLE R2 TO ROLE R1;", "GRANT ROLE R2 TO ROLE R1;");
    check("GRANT ROLE R2 TO ROLE R1;", "", "REVOKE ROLE R2 FROM ROLE R1;");
}

#[test]
fn test_table_grant_merge_and_diff() {
    check(
        "GRANT SELECT, SELECT(T1_C1), UPDATE, INSERT(T1_C1, T1_C2) ON TABLE T1 TO ROLE R1;
         GRANT UPDATE, DELETE ON TABLE T1 TO ROLE R2;",
        "GRANT SELECT(T1_C2), DELETE ON TABLE T1 TO ROLE R1;
         GRANT SELECT, UPDATE(T1_C1, T1_C2), UPDATE, INSERT ON TABLE T1 TO ROLE R2;",
        "REVOKE SELECT, SELECT(T1_C1), UPDATE, INSERT(T1_C1, T1_C2) ON TABLE T1 FROM ROLE R1;
         GRANT SELECT(T1_C2), DELETE ON TABLE T1 TO ROLE R1;
         REVOKE DELETE ON TABLE T1 FROM ROLE R2;
         GRANT SELECT, UPDATE(T1_C1, T1_C2), INSERT ON TABLE T1 TO ROLE R2;",
    );
}

#[test]
fn test_alter_database() {
    check(
        "",
        "ALTER DATABASE D1 SET OPTIONS (version_retention_period = '1d');",
        "ALTER DATABASE D1 SET OPTIONS (version_retention_period = '1d');",
    );
    // Databases have no drop counterpart.
    check("ALTER DATABASE D1 SET OPTIONS (version_retention_period = '1d');", "", "");
    check(
        "ALTER DATABASE D1 SET OPTIONS (version_retention_period = '1d', optimizer_version = 1);",
        "ALTER DATABASE D1 SET OPTIONS (version_retention_period = '2d');",
        "ALTER DATABASE D1 SET OPTIONS (version_retention_period = '2d');",
    );
}

#[test]
fn test_recreate_table_recreates_dependents_in_order() {
    let base = "CREATE TABLE T1 (
           T1_I1 INT64 NOT NULL,
           T1_S1 STRING(MAX),
           T1_AF1 ARRAY<FLOAT64> NOT NULL,
         ) PRIMARY KEY (T1_I1);
         CREATE INDEX IDX1 ON T1(T1_I1);
         CREATE SEARCH INDEX IDX2 ON T1(T1_S1);
         CREATE CHANGE STREAM S1 FOR ALL;
         CREATE CHANGE STREAM S2 FOR T1;
         CREATE VECTOR INDEX IDX3 ON T1(T1_AF1) OPTIONS (distance_type = 'COSINE');
         GRANT SELECT ON TABLE T1 TO ROLE R1;";
    let target = base.replace("PRIMARY KEY (T1_I1)", "PRIMARY KEY (T1_S1)");
    check(
        base,
        &target,
        "DROP VECTOR INDEX IDX3;
         DROP SEARCH INDEX IDX2;
         DROP INDEX IDX1;
         REVOKE SELECT ON TABLE T1 FROM ROLE R1;
         ALTER CHANGE STREAM S2 DROP FOR ALL;
         DROP TABLE T1;
         CREATE TABLE T1 (
           T1_I1 INT64 NOT NULL,
           T1_S1 STRING(MAX),
           T1_AF1 ARRAY<FLOAT64> NOT NULL,
         ) PRIMARY KEY (T1_S1);
         ALTER CHANGE STREAM S2 SET FOR T1;
         GRANT SELECT ON TABLE T1 TO ROLE R1;
         CREATE INDEX IDX1 ON T1(T1_I1);
         CREATE SEARCH INDEX IDX2 ON T1(T1_S1);
         CREATE VECTOR INDEX IDX3 ON T1(T1_AF1) OPTIONS (distance_type = 'COSINE');",
    );
}

#[test]
fn test_unsupported_input_ddl_is_strict_error() {
    let err = diff("", "ALTER INDEX IDX1 ADD STORED COLUMN T1_I1;", &strict()).unwrap_err();
    assert!(matches!(err, SpandiffError::UnsupportedDdl(_)), "{err}");
}

#[test]
fn test_unsupported_input_ddl_is_skipped_when_lenient() {
    let got = diff(
        "",
        "ALTER INDEX IDX1 ADD STORED COLUMN T1_I1; CREATE ROLE R1;",
        &DiffOptions::default(),
    )
    .unwrap();
    assert_eq!(got, "CREATE ROLE R1;\n");
}

#[test]
fn test_unsupported_sequence_alteration_is_an_error() {
    let err = diff(
        "CREATE SEQUENCE IF NOT EXISTS S1 OPTIONS (sequence_kind = 'bit_reversed_positive');",
        "CREATE SEQUENCE S1 OPTIONS (sequence_kind = 'bit_reversed_positive');",
        &strict(),
    )
    .unwrap_err();
    assert!(matches!(err, SpandiffError::UnsupportedAlteration(_)), "{err}");
}

#[test]
fn test_empty_inputs() {
    assert_eq!(diff("", "", &strict()).unwrap(), "");
}

#[test]
fn test_diff_is_deterministic() {
    let base = "CREATE TABLE T1 (A INT64 NOT NULL, B STRING(MAX)) PRIMARY KEY (A);
         CREATE INDEX IDX1 ON T1(B);
         CREATE ROLE R1;
         GRANT SELECT ON TABLE T1 TO ROLE R1;";
    let target = "CREATE TABLE T1 (A INT64 NOT NULL, B STRING(MAX)) PRIMARY KEY (B);
         CREATE INDEX IDX1 ON T1(B);
         CREATE ROLE R1;
         GRANT SELECT ON TABLE T1 TO ROLE R1;";
    let first = diff(base, target, &strict()).unwrap();
    for _ in 0..10 {
        assert_eq!(first, diff(base, target, &strict()).unwrap());
    }
}

#[test]
fn test_diff_of_identical_schemas_is_empty() {
    let ddl = "CREATE SCHEMA S1;
         CREATE TABLE T1 (A INT64 NOT NULL, B STRING(MAX) DEFAULT ('x')) PRIMARY KEY (A);
         CREATE INDEX IDX1 ON T1(B) STORING (A);
         CREATE CHANGE STREAM CS1 FOR T1;
         CREATE ROLE R1;
         GRANT SELECT(B), UPDATE ON TABLE T1 TO ROLE R1;";
    assert_eq!(diff(ddl, ddl, &strict()).unwrap(), "");
}

#[test]
fn test_new_table_emits_no_column_statements() {
    check(
        "",
        "CREATE TABLE T1 (A INT64 NOT NULL, B STRING(MAX)) PRIMARY KEY (A);
         CREATE INDEX IDX1 ON T1(B);",
        "CREATE TABLE T1 (A INT64 NOT NULL, B STRING(MAX)) PRIMARY KEY (A);
         CREATE INDEX IDX1 ON T1(B);",
    );
}

#[test]
fn test_added_column_precedes_index_storing_it() {
    check(
        "CREATE TABLE T1 (A INT64 NOT NULL) PRIMARY KEY (A);",
        "CREATE TABLE T1 (A INT64 NOT NULL, B STRING(MAX)) PRIMARY KEY (A);
         CREATE INDEX IDX1 ON T1(B);",
        "ALTER TABLE T1 ADD COLUMN B STRING(MAX);
         CREATE INDEX IDX1 ON T1(B);",
    );
}
