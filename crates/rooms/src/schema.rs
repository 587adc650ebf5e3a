//! Static description of the rooms database.
//!
//! The descriptor only names tables, columns, and relations. It does not
//! create or migrate anything.

use std::collections::HashSet;

/// Storage kind of a column, as far as value generation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Uuid,
    Text,
    Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub primary_key: bool,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
            primary_key: false,
        }
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// One-to-many association from a parent table to the rows of `table`.
///
/// `foreign_key` is the column on `table` that holds the parent's
/// `references` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub name: &'static str,
    pub table: &'static str,
    pub foreign_key: &'static str,
    pub references: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: Vec<Column>,
    pub relations: Vec<Relation>,
}

impl Table {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            columns: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Relations (with their parent table) whose rows live in `table`.
    pub fn foreign_keys(&self, table: &str) -> Vec<(&Table, &Relation)> {
        self.tables
            .iter()
            .flat_map(|parent| parent.relations.iter().map(move |r| (parent, r)))
            .filter(|(_, r)| r.table == table)
            .collect()
    }

    /// Tables ordered so that every child comes before its parent.
    ///
    /// Relations pointing at tables outside the schema are ignored, and a
    /// cycle is broken at the table where it is first revisited.
    pub fn reset_order(&self) -> Vec<&Table> {
        let mut ordered = Vec::with_capacity(self.tables.len());
        let mut visiting = HashSet::new();
        for table in &self.tables {
            self.visit(table, &mut visiting, &mut ordered);
        }
        ordered
    }

    /// Tables ordered so that every parent comes before its children.
    pub fn insert_order(&self) -> Vec<&Table> {
        let mut ordered = self.reset_order();
        ordered.reverse();
        ordered
    }

    fn visit<'a>(
        &'a self,
        table: &'a Table,
        visiting: &mut HashSet<&'static str>,
        ordered: &mut Vec<&'a Table>,
    ) {
        if ordered.iter().any(|t| t.name == table.name) || !visiting.insert(table.name) {
            return;
        }

        for relation in &table.relations {
            if let Some(child) = self.table(relation.table) {
                self.visit(child, visiting, ordered);
            }
        }

        ordered.push(table);
    }
}

/// The rooms schema: `rooms` and the `questions` asked in them.
pub fn schema() -> Schema {
    let rooms = Table::new("rooms")
        .with_column(Column::new("id", ColumnKind::Uuid).primary_key())
        .with_column(Column::new("name", ColumnKind::Text))
        .with_column(Column::new("description", ColumnKind::Text).nullable())
        .with_column(Column::new("created_at", ColumnKind::Timestamp))
        .with_relation(Relation {
            name: "questions",
            table: "questions",
            foreign_key: "room_id",
            references: "id",
        });

    let questions = Table::new("questions")
        .with_column(Column::new("id", ColumnKind::Uuid).primary_key())
        .with_column(Column::new("room_id", ColumnKind::Uuid))
        .with_column(Column::new("question", ColumnKind::Text))
        .with_column(Column::new("answer", ColumnKind::Text).nullable())
        .with_column(Column::new("created_at", ColumnKind::Timestamp));

    Schema::new(vec![rooms, questions])
}
