use crate::ast::{self, Ddl, Privilege, TablePrivilege};
use crate::ident::{
    ChangeStreamId, ColumnId, GrantId, Identifier, RoleId, TableFunctionId, TableId, ViewId,
};
use crate::migrate::plan::{Migration, MigrationKind, MigrationState};

/// One logical grant: a single role on a single privilege target.
///
/// `GRANT` statements bundling several roles or targets are exploded at
/// ingest, and duplicates for the same (role, target) pair merge their
/// privileges instead of erroring.
#[derive(Debug, Clone)]
pub struct Grant {
    pub node: ast::Grant,
    grant_id: GrantId,
}

impl Grant {
    pub fn explode(node: &ast::Grant) -> Vec<Grant> {
        let mut grants = Vec::new();
        for role in &node.roles {
            let role_id = RoleId { name: role.clone() };
            for (privilege, target) in single_target_privileges(&node.privilege) {
                grants.push(Grant {
                    node: ast::Grant {
                        privilege,
                        roles: vec![role.clone()],
                    },
                    grant_id: GrantId {
                        role: role_id.clone(),
                        target: Box::new(target),
                    },
                });
            }
        }
        grants
    }

    /// Reunite the privileges of a duplicate (role, target) grant.
    pub fn merge(&self, other: &Grant) -> Option<Grant> {
        match (&self.node.privilege, &other.node.privilege) {
            (
                Privilege::OnTable { privileges, names },
                Privilege::OnTable {
                    privileges: other_privileges,
                    ..
                },
            ) => {
                let mut combined = privileges.clone();
                combined.extend(other_privileges.iter().cloned());
                let merged = TableBuckets::collect(&combined).into_privileges();
                let mut grant = self.clone();
                grant.node.privilege = Privilege::OnTable {
                    privileges: merged,
                    names: names.clone(),
                };
                Some(grant)
            }
            // The remaining grant forms carry no further detail to merge.
            (Privilege::SelectOnView { .. }, Privilege::SelectOnView { .. })
            | (Privilege::SelectOnChangeStream { .. }, Privilege::SelectOnChangeStream { .. })
            | (
                Privilege::ExecuteOnTableFunction { .. },
                Privilege::ExecuteOnTableFunction { .. },
            )
            | (Privilege::Role { .. }, Privilege::Role { .. }) => Some(self.clone()),
            _ => None,
        }
    }

    pub fn id(&self) -> Identifier {
        Identifier::Grant(self.grant_id.clone())
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::Grant(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::Revoke(ast::Revoke {
            privilege: self.node.privilege.clone(),
            roles: self.node.roles.clone(),
        })
    }

    pub fn depends_on(&self) -> Vec<Identifier> {
        let mut ids: Vec<Identifier> = self
            .node
            .roles
            .iter()
            .map(|role| Identifier::Role(RoleId { name: role.clone() }))
            .collect();
        match &self.node.privilege {
            Privilege::OnTable { privileges, names } => {
                for name in names {
                    ids.push(Identifier::Table(TableId::from_name(name)));
                }
                let table_id = TableId::from_name(&names[0]);
                for privilege in privileges {
                    let columns = match privilege {
                        TablePrivilege::Select(columns)
                        | TablePrivilege::Update(columns)
                        | TablePrivilege::Insert(columns) => columns,
                        TablePrivilege::Delete => continue,
                    };
                    for column in columns {
                        ids.push(Identifier::Column(ColumnId::new(table_id.clone(), column)));
                    }
                }
            }
            Privilege::SelectOnView { names } => {
                for name in names {
                    ids.push(Identifier::View(ViewId::from_name(name)));
                }
            }
            Privilege::SelectOnChangeStream { names } => {
                for name in names {
                    ids.push(Identifier::ChangeStream(ChangeStreamId { name: name.clone() }));
                }
            }
            Privilege::ExecuteOnTableFunction { .. } => {}
            Privilege::Role { names } => {
                for name in names {
                    ids.push(Identifier::Role(RoleId { name: name.clone() }));
                }
            }
        }
        ids
    }

    pub fn alter(&self, target: &Grant, m: &mut Migration) {
        let (Privilege::OnTable { privileges, names }, Privilege::OnTable {
            privileges: target_privileges,
            ..
        }) = (&self.node.privilege, &target.node.privilege)
        else {
            // Single-privilege grant forms have nothing to alter; a
            // difference can only mean a different identifier.
            m.set_if_undefined(&self.id(), MigrationKind::DropAndAdd);
            return;
        };

        let base = TableBuckets::collect(privileges);
        let tgt = TableBuckets::collect(target_privileges);

        let mut added = Vec::new();
        let mut dropped = Vec::new();
        flag_diff(base.has_select, tgt.has_select, &mut added, &mut dropped, || {
            TablePrivilege::Select(Vec::new())
        });
        column_diff(
            &base.select_columns,
            &tgt.select_columns,
            &mut added,
            &mut dropped,
            TablePrivilege::Select,
        );
        flag_diff(base.has_update, tgt.has_update, &mut added, &mut dropped, || {
            TablePrivilege::Update(Vec::new())
        });
        column_diff(
            &base.update_columns,
            &tgt.update_columns,
            &mut added,
            &mut dropped,
            TablePrivilege::Update,
        );
        flag_diff(base.has_insert, tgt.has_insert, &mut added, &mut dropped, || {
            TablePrivilege::Insert(Vec::new())
        });
        column_diff(
            &base.insert_columns,
            &tgt.insert_columns,
            &mut added,
            &mut dropped,
            TablePrivilege::Insert,
        );
        flag_diff(base.has_delete, tgt.has_delete, &mut added, &mut dropped, || {
            TablePrivilege::Delete
        });

        let mut ddls = Vec::new();
        if !dropped.is_empty() {
            ddls.push(Ddl::Revoke(ast::Revoke {
                privilege: Privilege::OnTable {
                    privileges: dropped,
                    names: names.clone(),
                },
                roles: target.node.roles.clone(),
            }));
        }
        if !added.is_empty() {
            ddls.push(Ddl::Grant(ast::Grant {
                privilege: Privilege::OnTable {
                    privileges: added,
                    names: names.clone(),
                },
                roles: target.node.roles.clone(),
            }));
        }
        m.set_alter_if_undefined(&self.id(), ddls);
    }

    pub fn on_dependency_change(
        &self,
        me: &MigrationState,
        dependency: &MigrationState,
        m: &mut Migration,
    ) {
        match dependency.id() {
            Identifier::Role(_)
            | Identifier::Table(_)
            | Identifier::Column(_)
            | Identifier::View(_)
            | Identifier::ChangeStream(_) => {
                if dependency.kind() == MigrationKind::DropAndAdd {
                    m.escalate(me.id(), MigrationKind::DropAndAdd);
                }
            }
            _ => {}
        }
    }
}

fn single_target_privileges(privilege: &Privilege) -> Vec<(Privilege, Identifier)> {
    match privilege {
        Privilege::OnTable { privileges, names } => names
            .iter()
            .map(|name| {
                (
                    Privilege::OnTable {
                        privileges: privileges.clone(),
                        names: vec![name.clone()],
                    },
                    Identifier::Table(TableId::from_name(name)),
                )
            })
            .collect(),
        Privilege::SelectOnView { names } => names
            .iter()
            .map(|name| {
                (
                    Privilege::SelectOnView {
                        names: vec![name.clone()],
                    },
                    Identifier::View(ViewId::from_name(name)),
                )
            })
            .collect(),
        Privilege::SelectOnChangeStream { names } => names
            .iter()
            .map(|name| {
                (
                    Privilege::SelectOnChangeStream {
                        names: vec![name.clone()],
                    },
                    Identifier::ChangeStream(ChangeStreamId { name: name.clone() }),
                )
            })
            .collect(),
        Privilege::ExecuteOnTableFunction { names } => names
            .iter()
            .map(|name| {
                (
                    Privilege::ExecuteOnTableFunction {
                        names: vec![name.clone()],
                    },
                    Identifier::TableFunction(TableFunctionId { name: name.clone() }),
                )
            })
            .collect(),
        Privilege::Role { names } => names
            .iter()
            .map(|name| {
                (
                    Privilege::Role {
                        names: vec![name.clone()],
                    },
                    Identifier::Role(RoleId { name: name.clone() }),
                )
            })
            .collect(),
    }
}

/// Table privileges sorted into their six buckets: bare SELECT / UPDATE /
/// INSERT / DELETE flags plus column-scoped SELECT / UPDATE / INSERT lists.
#[derive(Default)]
struct TableBuckets {
    has_select: bool,
    has_update: bool,
    has_insert: bool,
    has_delete: bool,
    select_columns: Vec<String>,
    update_columns: Vec<String>,
    insert_columns: Vec<String>,
}

impl TableBuckets {
    fn collect(privileges: &[TablePrivilege]) -> Self {
        let mut buckets = Self::default();
        for privilege in privileges {
            match privilege {
                TablePrivilege::Select(columns) if columns.is_empty() => {
                    buckets.has_select = true;
                }
                TablePrivilege::Select(columns) => {
                    extend_unique(&mut buckets.select_columns, columns);
                }
                TablePrivilege::Update(columns) if columns.is_empty() => {
                    buckets.has_update = true;
                }
                TablePrivilege::Update(columns) => {
                    extend_unique(&mut buckets.update_columns, columns);
                }
                TablePrivilege::Insert(columns) if columns.is_empty() => {
                    buckets.has_insert = true;
                }
                TablePrivilege::Insert(columns) => {
                    extend_unique(&mut buckets.insert_columns, columns);
                }
                TablePrivilege::Delete => buckets.has_delete = true,
            }
        }
        buckets
    }

    fn into_privileges(self) -> Vec<TablePrivilege> {
        let mut privileges = Vec::new();
        if self.has_select {
            privileges.push(TablePrivilege::Select(Vec::new()));
        }
        if !self.select_columns.is_empty() {
            privileges.push(TablePrivilege::Select(self.select_columns));
        }
        if self.has_update {
            privileges.push(TablePrivilege::Update(Vec::new()));
        }
        if !self.update_columns.is_empty() {
            privileges.push(TablePrivilege::Update(self.update_columns));
        }
        if self.has_insert {
            privileges.push(TablePrivilege::Insert(Vec::new()));
        }
        if !self.insert_columns.is_empty() {
            privileges.push(TablePrivilege::Insert(self.insert_columns));
        }
        if self.has_delete {
            privileges.push(TablePrivilege::Delete);
        }
        privileges
    }
}

fn extend_unique(columns: &mut Vec<String>, extra: &[String]) {
    for column in extra {
        if !columns.contains(column) {
            columns.push(column.clone());
        }
    }
}

fn flag_diff(
    base: bool,
    target: bool,
    added: &mut Vec<TablePrivilege>,
    dropped: &mut Vec<TablePrivilege>,
    make: impl Fn() -> TablePrivilege,
) {
    if base != target {
        if target {
            added.push(make());
        } else {
            dropped.push(make());
        }
    }
}

fn column_diff(
    base: &[String],
    target: &[String],
    added: &mut Vec<TablePrivilege>,
    dropped: &mut Vec<TablePrivilege>,
    make: impl Fn(Vec<String>) -> TablePrivilege,
) {
    let added_columns: Vec<String> = target
        .iter()
        .filter(|column| !base.contains(column))
        .cloned()
        .collect();
    let dropped_columns: Vec<String> = base
        .iter()
        .filter(|column| !target.contains(column))
        .cloned()
        .collect();
    if !added_columns.is_empty() {
        added.push(make(added_columns));
    }
    if !dropped_columns.is_empty() {
        dropped.push(make(dropped_columns));
    }
}
