//! Migration planning: per-identifier states and dependency cascade.
//!
//! States move only rightward through
//! `Undefined < NoOp < Alter < Add/Drop < DropAndAdd`; cascade updates are
//! unconditional but no-op when the state is unchanged, so propagation
//! reaches a fixpoint.

use std::collections::HashMap;

use crate::ast::Ddl;
use crate::definition::{Definition, Definitions};
use crate::error::SpandiffResult;
use crate::ident::Identifier;
use crate::migrate::operation::{Operation, OperationKind, sort_operations};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationKind {
    /// Initial state; never emits.
    Undefined,
    /// Deliberately emit nothing (e.g. a column covered by a table recreate).
    NoOp,
    Add,
    Alter,
    Drop,
    DropAndAdd,
}

/// The plan for one identifier. `Add`/`Alter` statements always derive from
/// the target-side definition and `Drop` statements from the base side.
#[derive(Debug, Clone)]
pub struct MigrationState {
    id: Identifier,
    base: Option<Definition>,
    target: Option<Definition>,
    kind: MigrationKind,
    alter_ops: Vec<Operation>,
}

impl MigrationState {
    fn undefined(id: Identifier) -> Self {
        Self {
            id,
            base: None,
            target: None,
            kind: MigrationKind::Undefined,
            alter_ops: Vec::new(),
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn kind(&self) -> MigrationKind {
        self.kind
    }

    fn operations(&self) -> Vec<Operation> {
        match self.kind {
            MigrationKind::Undefined | MigrationKind::NoOp => Vec::new(),
            MigrationKind::Add => self.add_operation().into_iter().collect(),
            MigrationKind::Alter => self.alter_ops.clone(),
            MigrationKind::Drop => self.drop_operation().into_iter().collect(),
            MigrationKind::DropAndAdd => self
                .drop_operation()
                .into_iter()
                .chain(self.add_operation())
                .collect(),
        }
    }

    fn add_operation(&self) -> Option<Operation> {
        let def = self.target.as_ref()?;
        Some(Operation::new(
            self.id.clone(),
            OperationKind::Add,
            def.add_ddl(),
            def.depends_on(),
        ))
    }

    fn drop_operation(&self) -> Option<Operation> {
        let def = self.base.as_ref()?;
        let ddl = def.drop_ddl()?;
        Some(Operation::new(
            self.id.clone(),
            OperationKind::Drop,
            ddl,
            def.depends_on(),
        ))
    }

    /// The definition alter DDLs derive from: target if present, else base.
    fn emitting_definition(&self) -> Option<&Definition> {
        self.target.as_ref().or(self.base.as_ref())
    }
}

pub struct Migration {
    states: HashMap<Identifier, MigrationState>,
    dependents: HashMap<Identifier, Vec<Definition>>,
}

impl Migration {
    fn new(base: &Definitions, target: &Definitions) -> Self {
        let mut migration = Self {
            states: HashMap::new(),
            dependents: HashMap::new(),
        };
        for def in base.sorted() {
            migration.register(def, Side::Base);
        }
        for def in target.sorted() {
            migration.register(def, Side::Target);
        }
        migration
    }

    fn register(&mut self, def: &Definition, side: Side) {
        let id = def.id();
        let state = self
            .states
            .entry(id.clone())
            .or_insert_with(|| MigrationState::undefined(id));
        match side {
            Side::Base => state.base = Some(def.clone()),
            Side::Target => state.target = Some(def.clone()),
        }
        for dep in def.depends_on() {
            self.dependents.entry(dep).or_default().push(def.clone());
        }
    }

    pub fn kind(&self, id: &Identifier) -> MigrationKind {
        self.states
            .get(id)
            .map_or(MigrationKind::Undefined, MigrationState::kind)
    }

    /// First rule to claim an identifier wins.
    pub fn set_if_undefined(&mut self, id: &Identifier, kind: MigrationKind) {
        if self.kind(id) == MigrationKind::Undefined {
            self.update(id, kind, Vec::new());
        }
    }

    /// Claim an identifier with a precomputed alter DDL list.
    pub fn set_alter_if_undefined(&mut self, id: &Identifier, ddls: Vec<Ddl>) {
        if self.kind(id) != MigrationKind::Undefined {
            return;
        }
        let ops = self.wrap_alter_ddls(id, ddls);
        self.update(id, MigrationKind::Alter, ops);
    }

    /// Cascade escalation; dominates any earlier classification.
    pub fn escalate(&mut self, id: &Identifier, kind: MigrationKind) {
        self.update(id, kind, Vec::new());
    }

    /// Cascade escalation to an alter with explicit operations (used where
    /// the two halves must land on opposite sides of a recreate).
    pub fn escalate_with_operations(&mut self, id: &Identifier, ops: Vec<Operation>) {
        self.update(id, MigrationKind::Alter, ops);
    }

    fn wrap_alter_ddls(&self, id: &Identifier, ddls: Vec<Ddl>) -> Vec<Operation> {
        let depends_on = self
            .states
            .get(id)
            .and_then(MigrationState::emitting_definition)
            .map(Definition::depends_on)
            .unwrap_or_default();
        ddls.into_iter()
            .map(|ddl| Operation::new(id.clone(), OperationKind::Alter, ddl, depends_on.clone()))
            .collect()
    }

    fn update(&mut self, id: &Identifier, kind: MigrationKind, alter_ops: Vec<Operation>) {
        let Some(state) = self.states.get_mut(id) else {
            return;
        };
        if state.kind == kind && state.alter_ops == alter_ops {
            return;
        }
        state.kind = kind;
        state.alter_ops = alter_ops;

        let changed = state.clone();
        let receivers = self.dependents.get(id).cloned().unwrap_or_default();
        for receiver in receivers {
            if let Some(me) = self.states.get(&receiver.id()).cloned() {
                receiver.on_dependency_change(&me, &changed, self);
            }
        }
    }

    fn drops(&mut self, base: &Definitions, target: &Definitions) {
        for def in base.sorted() {
            let id = def.id();
            if target.get(&id).is_none() {
                self.set_if_undefined(&id, MigrationKind::Drop);
            }
        }
    }

    fn alters(&mut self, base: &Definitions, target: &Definitions) -> SpandiffResult<()> {
        for target_def in target.sorted() {
            let id = target_def.id();
            let Some(base_def) = base.get(&id) else {
                continue;
            };
            if base_def.ast_eq(target_def) {
                continue;
            }
            base_def.alter(target_def, self)?;
        }
        Ok(())
    }

    fn adds(&mut self, base: &Definitions, target: &Definitions) {
        for def in target.sorted() {
            let id = def.id();
            if base.get(&id).is_none() {
                self.set_if_undefined(&id, MigrationKind::Add);
            }
        }
    }

    fn operations(&self) -> Vec<Operation> {
        let mut ids: Vec<&Identifier> = self.states.keys().collect();
        ids.sort_by_cached_key(|id| id.to_string());
        ids.into_iter()
            .flat_map(|id| self.states[id].operations())
            .collect()
    }
}

enum Side {
    Base,
    Target,
}

/// Plan the migration from `base` to `target` and return the ordered
/// operation list.
pub fn plan(base: &Definitions, target: &Definitions) -> SpandiffResult<Vec<Operation>> {
    let mut migration = Migration::new(base, target);
    // https://cloud.google.com/spanner/docs/schema-updates#supported-updates
    migration.drops(base, target);
    migration.alters(base, target)?;
    migration.adds(base, target);
    sort_operations(migration.operations())
}
