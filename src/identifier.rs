use std::fmt;

/// A table name with an optional database. Without a database, the name is resolved
/// against the temporary tables first and the current database second.
///
/// Equality compares the names as written. Pass both sides through
/// [`NameNormalizer::normalize_table`] to compare them the way the catalog resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableIdentifier {
    pub table: String,
    pub database: Option<String>,
}

impl TableIdentifier {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            database: None,
        }
    }

    pub fn with_database(table: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            database: Some(database.into()),
        }
    }

    pub fn quoted_string(&self) -> String {
        match &self.database {
            Some(db) => format!("`{db}`.`{}`", self.table),
            None => format!("`{}`", self.table),
        }
    }
}

impl fmt::Display for TableIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.database {
            Some(db) => write!(f, "{db}.{}", self.table),
            None => f.write_str(&self.table),
        }
    }
}

impl From<&str> for TableIdentifier {
    fn from(table: &str) -> Self {
        Self::new(table)
    }
}

/// A function name with an optional database. Built-in and temporary functions never
/// carry one.
///
/// Equality compares the names as written, while registry lookups ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionIdentifier {
    pub name: String,
    pub database: Option<String>,
}

impl FunctionIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database: None,
        }
    }

    pub fn with_database(name: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database: Some(database.into()),
        }
    }

    /// The registry key of this function: `db.name` if qualified, `name` otherwise.
    pub fn unquoted_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FunctionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.database {
            Some(db) => write!(f, "{db}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&str> for FunctionIdentifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Case-folding policy applied to table names before they touch the temporary
/// tables or the metastore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NameNormalizer {
    pub case_sensitive: bool,
}

impl NameNormalizer {
    pub fn new(case_sensitive: bool) -> Self {
        Self { case_sensitive }
    }

    pub fn format_table_name(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }

    /// The identifier with its table name case-folded. The database is left as written.
    pub fn normalize_table(&self, name: &TableIdentifier) -> TableIdentifier {
        TableIdentifier {
            table: self.format_table_name(&name.table),
            database: name.database.clone(),
        }
    }
}
