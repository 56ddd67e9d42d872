use crate::ast::{self, Ddl};
use crate::ident::{Identifier, TableId, ViewId};
use crate::migrate::plan::{Migration, MigrationKind, MigrationState};

/// `CREATE VIEW`. Altered via `CREATE OR REPLACE`; recreated when an
/// object it selects from is recreated.
#[derive(Debug)]
pub struct View {
    pub node: ast::CreateView,
}

impl View {
    pub fn new(node: ast::CreateView) -> Self {
        Self { node }
    }

    pub fn id(&self) -> Identifier {
        Identifier::View(ViewId::from_path(&self.node.name))
    }

    pub fn add_ddl(&self) -> Ddl {
        Ddl::CreateView(self.node.clone())
    }

    pub fn drop_ddl(&self) -> Ddl {
        Ddl::DropView(ast::DropView {
            name: self.node.name.clone(),
        })
    }

    pub fn depends_on(&self) -> Vec<Identifier> {
        // Tables and views share the referenced-name namespace, so each
        // name registers as both; whichever does not resolve dangles.
        let mut ids = Vec::new();
        for path in referenced_names(&self.node.query.0) {
            ids.push(Identifier::Table(TableId::from_path(&path)));
            ids.push(Identifier::View(ViewId::from_path(&path)));
        }
        ids
    }

    pub fn alter(&self, target: &View, m: &mut Migration) {
        let mut replace = target.node.clone();
        replace.or_replace = true;
        m.set_alter_if_undefined(&self.id(), vec![Ddl::CreateView(replace)]);
    }

    pub fn on_dependency_change(
        &self,
        me: &MigrationState,
        dependency: &MigrationState,
        m: &mut Migration,
    ) {
        match dependency.id() {
            Identifier::Table(_) | Identifier::Column(_) | Identifier::View(_) => {
                if dependency.kind() == MigrationKind::DropAndAdd {
                    m.escalate(me.id(), MigrationKind::DropAndAdd);
                }
            }
            _ => {}
        }
    }
}

/// Harvest the table or view names a query selects from: the name lists
/// after `FROM` and the name after each `JOIN`. Column usage is not
/// tracked.
fn referenced_names(query: &str) -> Vec<ast::Path> {
    let tokens = tokenize(query);
    let mut names = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let from = tokens[i].eq_ignore_ascii_case("FROM");
        let join = tokens[i].eq_ignore_ascii_case("JOIN");
        i += 1;
        if !from && !join {
            continue;
        }
        loop {
            let Some(path) = read_path(&tokens, &mut i) else {
                break;
            };
            names.push(path);
            // Only FROM takes a comma-separated list.
            if !from || tokens.get(i).map(String::as_str) != Some(",") {
                break;
            }
            i += 1;
        }
    }
    names
}

fn read_path(tokens: &[String], i: &mut usize) -> Option<ast::Path> {
    let mut idents = Vec::new();
    loop {
        let token = tokens.get(*i)?;
        if !is_identifier(token) {
            return None;
        }
        idents.push(token.clone());
        *i += 1;
        if tokens.get(*i).map(String::as_str) == Some(".") {
            *i += 1;
        } else {
            return Some(ast::Path { idents });
        }
    }
}

fn is_identifier(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
}

fn tokenize(query: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = query.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if c.is_alphanumeric() || c == '_' {
            let mut end = start + c.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if next.is_alphanumeric() || next == '_' {
                    chars.next();
                    end = i + next.len_utf8();
                } else {
                    break;
                }
            }
            tokens.push(query[start..end].to_string());
        } else if c == '\'' || c == '"' || c == '`' {
            // Skip quoted literals entirely.
            for (_, next) in chars.by_ref() {
                if next == c {
                    break;
                }
            }
        } else {
            tokens.push(c.to_string());
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(query: &str) -> Vec<String> {
        referenced_names(query)
            .into_iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn test_referenced_names_from_and_join() {
        assert_eq!(names("SELECT * FROM T1"), vec!["T1"]);
        assert_eq!(names("SELECT * FROM T1, S1.T2"), vec!["T1", "S1.T2"]);
        assert_eq!(
            names("SELECT * FROM T1 JOIN T2 ON T1.a = T2.b"),
            vec!["T1", "T2"]
        );
        assert_eq!(
            names("SELECT * FROM (SELECT * FROM T1) WHERE x > 0"),
            vec!["T1"]
        );
    }

    #[test]
    fn test_referenced_names_ignore_literals() {
        assert_eq!(names("SELECT 'FROM T9' FROM T1"), vec!["T1"]);
    }
}
