//! SQL rendering for the DDL AST.
//!
//! Every node renders to one canonical statement text, without a trailing
//! semicolon. The output stays inside the supported schema-update surface,
//! so it re-parses with [`crate::parser::parse_ddls`].

use crate::ast::*;

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string.
    fn to_sql(&self) -> String;
}

impl ToSql for Ddl {
    fn to_sql(&self) -> String {
        match self {
            Ddl::CreateSchema(n) => format!("CREATE SCHEMA {}", n.name),
            Ddl::CreateTable(n) => n.to_sql(),
            Ddl::CreateIndex(n) => n.to_sql(),
            Ddl::CreateSearchIndex(n) => n.to_sql(),
            Ddl::CreateVectorIndex(n) => n.to_sql(),
            Ddl::CreatePropertyGraph(n) => n.to_sql(),
            Ddl::CreateView(n) => n.to_sql(),
            Ddl::CreateChangeStream(n) => n.to_sql(),
            Ddl::CreateSequence(n) => n.to_sql(),
            Ddl::CreateModel(n) => n.to_sql(),
            Ddl::CreateProtoBundle(n) => {
                format!("CREATE PROTO BUNDLE ({})", proto_types(&n.types))
            }
            Ddl::CreateRole(n) => format!("CREATE ROLE {}", n.name),
            Ddl::Grant(n) => format!(
                "GRANT {} TO ROLE {}",
                n.privilege.to_sql(),
                n.roles.join(", ")
            ),
            Ddl::Revoke(n) => format!(
                "REVOKE {} FROM ROLE {}",
                n.privilege.to_sql(),
                n.roles.join(", ")
            ),
            Ddl::AlterDatabase(n) => format!(
                "ALTER DATABASE {} SET OPTIONS {}",
                n.name,
                n.options.to_sql()
            ),
            Ddl::AlterTable(n) => n.to_sql(),
            Ddl::AlterIndex(n) => {
                format!("ALTER INDEX {} {}", n.name, n.alteration.to_sql())
            }
            Ddl::AlterSearchIndex(n) => {
                format!("ALTER SEARCH INDEX {} {}", n.name, n.alteration.to_sql())
            }
            Ddl::AlterChangeStream(n) => n.to_sql(),
            Ddl::AlterSequence(n) => format!(
                "ALTER SEQUENCE {} SET OPTIONS {}",
                n.name,
                n.options.to_sql()
            ),
            Ddl::AlterModel(n) => format!(
                "ALTER MODEL {} SET OPTIONS {}",
                n.name,
                n.options.to_sql()
            ),
            Ddl::AlterProtoBundle(n) => n.to_sql(),
            Ddl::DropSchema(n) => format!("DROP SCHEMA {}", n.name),
            Ddl::DropTable(n) => format!("DROP TABLE {}", n.name),
            Ddl::DropIndex(n) => format!("DROP INDEX {}", n.name),
            Ddl::DropSearchIndex(n) => format!("DROP SEARCH INDEX {}", n.name),
            Ddl::DropVectorIndex(n) => format!("DROP VECTOR INDEX {}", n.name),
            Ddl::DropPropertyGraph(n) => format!("DROP PROPERTY GRAPH {}", n.name),
            Ddl::DropView(n) => format!("DROP VIEW {}", n.name),
            Ddl::DropChangeStream(n) => format!("DROP CHANGE STREAM {}", n.name),
            Ddl::DropSequence(n) => format!("DROP SEQUENCE {}", n.name),
            Ddl::DropModel(n) => format!("DROP MODEL {}", n.name),
            Ddl::DropProtoBundle => "DROP PROTO BUNDLE".to_string(),
            Ddl::DropRole(n) => format!("DROP ROLE {}", n.name),
        }
    }
}

fn proto_types(types: &[String]) -> String {
    types
        .iter()
        .map(|t| format!("`{}`", t))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ToSql for Options {
    fn to_sql(&self) -> String {
        let records: Vec<String> = self
            .records
            .iter()
            .map(|r| format!("{} = {}", r.name, r.value))
            .collect();
        format!("({})", records.join(", "))
    }
}

impl ToSql for IndexKey {
    fn to_sql(&self) -> String {
        match self.dir {
            None => self.name.clone(),
            Some(Direction::Asc) => format!("{} ASC", self.name),
            Some(Direction::Desc) => format!("{} DESC", self.name),
        }
    }
}

fn index_keys(keys: &[IndexKey]) -> String {
    keys.iter()
        .map(ToSql::to_sql)
        .collect::<Vec<_>>()
        .join(", ")
}

fn on_delete(action: OnDelete) -> &'static str {
    match action {
        OnDelete::Cascade => "ON DELETE CASCADE",
        OnDelete::NoAction => "ON DELETE NO ACTION",
    }
}

impl ToSql for CreateTable {
    fn to_sql(&self) -> String {
        let mut sql = String::from("CREATE TABLE ");
        if self.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.name.to_string());
        sql.push_str(" (");

        let mut items: Vec<String> = self.columns.iter().map(ToSql::to_sql).collect();
        items.extend(self.constraints.iter().map(ToSql::to_sql));
        items.extend(self.synonyms.iter().map(|s| format!("SYNONYM({})", s)));
        sql.push_str(&items.join(", "));

        sql.push_str(") PRIMARY KEY (");
        sql.push_str(&index_keys(&self.primary_keys));
        sql.push(')');

        if let Some(interleave) = &self.interleave {
            sql.push_str(&format!(", INTERLEAVE IN PARENT {}", interleave.table));
            if let Some(action) = interleave.on_delete {
                sql.push(' ');
                sql.push_str(on_delete(action));
            }
        }
        if let Some(policy) = &self.row_deletion_policy {
            sql.push_str(&format!(", ROW DELETION POLICY ({})", policy.expr));
        }
        sql
    }
}

impl ToSql for ColumnDef {
    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.ty);
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if let Some(generated) = &self.generated {
            sql.push_str(&format!(" AS ({})", generated.expr));
            if generated.stored {
                sql.push_str(" STORED");
            }
        }
        if let Some(default_expr) = &self.default_expr {
            sql.push_str(&format!(" DEFAULT ({})", default_expr));
        }
        if let Some(options) = &self.options {
            sql.push_str(&format!(" OPTIONS {}", options.to_sql()));
        }
        sql
    }
}

impl ToSql for TableConstraint {
    fn to_sql(&self) -> String {
        let body = match &self.constraint {
            Constraint::ForeignKey {
                columns,
                ref_table,
                ref_columns,
                on_delete: action,
            } => {
                let mut sql = format!(
                    "FOREIGN KEY ({}) REFERENCES {} ({})",
                    columns.join(", "),
                    ref_table,
                    ref_columns.join(", ")
                );
                if let Some(action) = action {
                    sql.push(' ');
                    sql.push_str(on_delete(*action));
                }
                sql
            }
            Constraint::Check(expr) => format!("CHECK ({})", expr),
        };
        match &self.name {
            Some(name) => format!("CONSTRAINT {} {}", name, body),
            None => body,
        }
    }
}

impl ToSql for CreateIndex {
    fn to_sql(&self) -> String {
        let mut sql = String::from("CREATE ");
        if self.unique {
            sql.push_str("UNIQUE ");
        }
        if self.null_filtered {
            sql.push_str("NULL_FILTERED ");
        }
        sql.push_str("INDEX ");
        if self.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&format!(
            "{} ON {} ({})",
            self.name,
            self.table,
            index_keys(&self.keys)
        ));
        if let Some(storing) = &self.storing {
            sql.push_str(&format!(" STORING ({})", storing.columns.join(", ")));
        }
        if let Some(parent) = &self.interleave_in {
            sql.push_str(&format!(", INTERLEAVE IN {}", parent));
        }
        sql
    }
}

impl ToSql for CreateSearchIndex {
    fn to_sql(&self) -> String {
        let mut sql = format!(
            "CREATE SEARCH INDEX {} ON {} ({})",
            self.name,
            self.table,
            self.token_columns.join(", ")
        );
        if let Some(storing) = &self.storing {
            sql.push_str(&format!(" STORING ({})", storing.columns.join(", ")));
        }
        if let Some(options) = &self.options {
            sql.push_str(&format!(" OPTIONS {}", options.to_sql()));
        }
        sql
    }
}

impl ToSql for CreateVectorIndex {
    fn to_sql(&self) -> String {
        let mut sql = String::from("CREATE VECTOR INDEX ");
        if self.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&format!(
            "{} ON {} ({}) OPTIONS {}",
            self.name,
            self.table,
            self.column,
            self.options.to_sql()
        ));
        sql
    }
}

impl ToSql for CreatePropertyGraph {
    fn to_sql(&self) -> String {
        let mut sql = String::from("CREATE ");
        if self.or_replace {
            sql.push_str("OR REPLACE ");
        }
        sql.push_str(&format!("PROPERTY GRAPH {}", self.name));
        sql.push_str(&format!(
            " NODE TABLES ({})",
            graph_elements(&self.node_tables)
        ));
        if !self.edge_tables.is_empty() {
            sql.push_str(&format!(
                " EDGE TABLES ({})",
                graph_elements(&self.edge_tables)
            ));
        }
        sql
    }
}

fn graph_elements(tables: &[GraphElementTable]) -> String {
    tables
        .iter()
        .map(ToSql::to_sql)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ToSql for GraphElementTable {
    fn to_sql(&self) -> String {
        let mut sql = self.name.clone();
        if let Some(key) = &self.key {
            sql.push_str(&format!(" KEY ({})", key.join(", ")));
        }
        if let Some(source) = &self.source {
            sql.push_str(&format!(" SOURCE {}", source.to_sql()));
        }
        if let Some(destination) = &self.destination {
            sql.push_str(&format!(" DESTINATION {}", destination.to_sql()));
        }
        sql
    }
}

impl ToSql for GraphEdgeReference {
    fn to_sql(&self) -> String {
        format!(
            "KEY ({}) REFERENCES {} ({})",
            self.keys.join(", "),
            self.table,
            self.reference_columns.join(", ")
        )
    }
}

impl ToSql for CreateView {
    fn to_sql(&self) -> String {
        let or_replace = if self.or_replace { "OR REPLACE " } else { "" };
        let security = match self.security {
            SqlSecurity::Invoker => "INVOKER",
            SqlSecurity::Definer => "DEFINER",
        };
        format!(
            "CREATE {}VIEW {} SQL SECURITY {} AS {}",
            or_replace, self.name, security, self.query
        )
    }
}

impl ToSql for ChangeStreamFor {
    fn to_sql(&self) -> String {
        match self {
            ChangeStreamFor::All => "FOR ALL".to_string(),
            ChangeStreamFor::Tables(tables) => {
                let tables: Vec<String> = tables
                    .iter()
                    .map(|t| {
                        if t.columns.is_empty() {
                            t.name.clone()
                        } else {
                            format!("{}({})", t.name, t.columns.join(", "))
                        }
                    })
                    .collect();
                format!("FOR {}", tables.join(", "))
            }
        }
    }
}

impl ToSql for CreateChangeStream {
    fn to_sql(&self) -> String {
        let mut sql = format!("CREATE CHANGE STREAM {}", self.name);
        if let Some(for_clause) = &self.for_clause {
            sql.push(' ');
            sql.push_str(&for_clause.to_sql());
        }
        if let Some(options) = &self.options {
            sql.push_str(&format!(" OPTIONS {}", options.to_sql()));
        }
        sql
    }
}

impl ToSql for AlterChangeStream {
    fn to_sql(&self) -> String {
        let alteration = match &self.alteration {
            ChangeStreamAlteration::SetFor(for_clause) => format!("SET {}", for_clause.to_sql()),
            ChangeStreamAlteration::DropForAll => "DROP FOR ALL".to_string(),
            ChangeStreamAlteration::SetOptions(options) => {
                format!("SET OPTIONS {}", options.to_sql())
            }
        };
        format!("ALTER CHANGE STREAM {} {}", self.name, alteration)
    }
}

impl ToSql for CreateSequence {
    fn to_sql(&self) -> String {
        let mut sql = String::from("CREATE SEQUENCE ");
        if self.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.name.to_string());
        if let Some(options) = &self.options {
            sql.push_str(&format!(" OPTIONS {}", options.to_sql()));
        }
        sql
    }
}

impl ToSql for CreateModel {
    fn to_sql(&self) -> String {
        let mut sql = String::from("CREATE ");
        if self.or_replace {
            sql.push_str("OR REPLACE ");
        }
        sql.push_str("MODEL ");
        if self.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.name);
        if !self.input.is_empty() {
            sql.push_str(&format!(" INPUT ({})", model_columns(&self.input)));
        }
        if !self.output.is_empty() {
            sql.push_str(&format!(" OUTPUT ({})", model_columns(&self.output)));
        }
        if self.remote {
            sql.push_str(" REMOTE");
        }
        if let Some(options) = &self.options {
            sql.push_str(&format!(" OPTIONS {}", options.to_sql()));
        }
        sql
    }
}

fn model_columns(columns: &[ModelColumn]) -> String {
    columns
        .iter()
        .map(|c| format!("{} {}", c.name, c.ty))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ToSql for AlterProtoBundle {
    fn to_sql(&self) -> String {
        let mut sql = String::from("ALTER PROTO BUNDLE");
        if !self.insert.is_empty() {
            sql.push_str(&format!(" INSERT ({})", proto_types(&self.insert)));
        }
        if !self.delete.is_empty() {
            sql.push_str(&format!(" DELETE ({})", proto_types(&self.delete)));
        }
        sql
    }
}

impl ToSql for TablePrivilege {
    fn to_sql(&self) -> String {
        let (keyword, columns) = match self {
            TablePrivilege::Select(columns) => ("SELECT", columns),
            TablePrivilege::Update(columns) => ("UPDATE", columns),
            TablePrivilege::Insert(columns) => ("INSERT", columns),
            TablePrivilege::Delete => return "DELETE".to_string(),
        };
        if columns.is_empty() {
            keyword.to_string()
        } else {
            format!("{}({})", keyword, columns.join(", "))
        }
    }
}

impl ToSql for Privilege {
    fn to_sql(&self) -> String {
        match self {
            Privilege::OnTable { privileges, names } => {
                let privileges: Vec<String> = privileges.iter().map(ToSql::to_sql).collect();
                format!("{} ON TABLE {}", privileges.join(", "), names.join(", "))
            }
            Privilege::SelectOnView { names } => {
                format!("SELECT ON VIEW {}", names.join(", "))
            }
            Privilege::SelectOnChangeStream { names } => {
                format!("SELECT ON CHANGE STREAM {}", names.join(", "))
            }
            Privilege::ExecuteOnTableFunction { names } => {
                format!("EXECUTE ON TABLE FUNCTION {}", names.join(", "))
            }
            Privilege::Role { names } => format!("ROLE {}", names.join(", ")),
        }
    }
}

impl ToSql for AlterTable {
    fn to_sql(&self) -> String {
        format!("ALTER TABLE {} {}", self.name, self.alteration.to_sql())
    }
}

impl ToSql for TableAlteration {
    fn to_sql(&self) -> String {
        match self {
            TableAlteration::AddColumn {
                if_not_exists,
                column,
            } => {
                let guard = if *if_not_exists { "IF NOT EXISTS " } else { "" };
                format!("ADD COLUMN {}{}", guard, column.to_sql())
            }
            TableAlteration::DropColumn { name } => format!("DROP COLUMN {}", name),
            TableAlteration::AlterColumn { name, alteration } => {
                format!("ALTER COLUMN {} {}", name, alteration.to_sql())
            }
            TableAlteration::AddConstraint(constraint) => {
                format!("ADD {}", constraint.to_sql())
            }
            TableAlteration::DropConstraint { name } => format!("DROP CONSTRAINT {}", name),
            TableAlteration::AddRowDeletionPolicy(policy) => {
                format!("ADD ROW DELETION POLICY ({})", policy.expr)
            }
            TableAlteration::ReplaceRowDeletionPolicy(policy) => {
                format!("REPLACE ROW DELETION POLICY ({})", policy.expr)
            }
            TableAlteration::DropRowDeletionPolicy => "DROP ROW DELETION POLICY".to_string(),
            TableAlteration::AddSynonym { name } => format!("ADD SYNONYM {}", name),
            TableAlteration::DropSynonym { name } => format!("DROP SYNONYM {}", name),
        }
    }
}

impl ToSql for ColumnAlteration {
    fn to_sql(&self) -> String {
        match self {
            ColumnAlteration::Type {
                ty,
                not_null,
                default_expr,
            } => {
                let mut sql = ty.to_string();
                if *not_null {
                    sql.push_str(" NOT NULL");
                }
                if let Some(default_expr) = default_expr {
                    sql.push_str(&format!(" DEFAULT ({})", default_expr));
                }
                sql
            }
            ColumnAlteration::SetOptions(options) => format!("SET OPTIONS {}", options.to_sql()),
            ColumnAlteration::SetDefault(expr) => format!("SET DEFAULT ({})", expr),
            ColumnAlteration::DropDefault => "DROP DEFAULT".to_string(),
        }
    }
}

impl ToSql for IndexAlteration {
    fn to_sql(&self) -> String {
        match self {
            IndexAlteration::AddStoredColumn(name) => format!("ADD STORED COLUMN {}", name),
            IndexAlteration::DropStoredColumn(name) => format!("DROP STORED COLUMN {}", name),
        }
    }
}
