//! Create-script statements and rewriting

use crate::ObjectKind;
use dbtree_core::{QueryResult, Value};
use regex::Regex;
use std::sync::LazyLock;

/// Statement delimiter used while a script redefines the client delimiter
pub const SCRIPT_DELIMITER: &str = "$$";

static PROCEDURE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PROCEDURE `((?:[^`]|``)+)`").expect("valid regex"));

static FUNCTION_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"FUNCTION `((?:[^`]|``)+)`").expect("valid regex"));

/// How a retrieved `CREATE` statement should be rewritten
///
/// # Examples
///
/// ```
/// use dbtree_objects::CreateScriptOptions;
///
/// let options = CreateScriptOptions::new().with_delimiter().with_drop();
/// assert!(options.with_delimiter);
/// assert!(options.with_drop);
/// assert_eq!(CreateScriptOptions::default(), CreateScriptOptions::new());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateScriptOptions {
    /// Wrap the statement in `DELIMITER $$ ... $$ DELIMITER ;`
    pub with_delimiter: bool,
    /// Prepend a `DROP` line for procedures and functions
    pub with_drop: bool,
}

impl CreateScriptOptions {
    /// Plain statement, no rewriting
    pub fn new() -> Self {
        Self::default()
    }

    /// Request delimiter wrapping
    pub fn with_delimiter(mut self) -> Self {
        self.with_delimiter = true;
        self
    }

    /// Request the routine `DROP` prefix
    pub fn with_drop(mut self) -> Self {
        self.with_drop = true;
        self
    }
}

/// A routine `DROP` line found in a `CREATE` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineDrop {
    /// Either [`ObjectKind::Procedure`] or [`ObjectKind::Function`]
    pub kind: ObjectKind,
    /// Routine name as it appears between the backticks, embedded
    /// backticks still doubled
    pub name: String,
}

impl RoutineDrop {
    /// The `DROP` line, terminated with [`SCRIPT_DELIMITER`]
    pub fn statement(&self) -> String {
        format!("DROP {} `{}`{}", self.kind.db_type(), self.name, SCRIPT_DELIMITER)
    }
}

/// Build the `SHOW CREATE` statement for an object
///
/// ```
/// use dbtree_objects::{show_create_statement, ObjectKind};
///
/// assert_eq!(
///     show_create_statement(ObjectKind::Table, "`sakila`.`actor`"),
///     "SHOW CREATE TABLE `sakila`.`actor`"
/// );
/// ```
pub fn show_create_statement(kind: ObjectKind, qualified_name: &str) -> String {
    format!("SHOW CREATE {} {}", kind.db_type(), qualified_name)
}

/// Build the `DROP` statement for an object
pub fn drop_statement(kind: ObjectKind, qualified_name: &str) -> String {
    format!("DROP {} {}", kind.db_type(), qualified_name)
}

/// Pull the DDL text out of a `SHOW CREATE` result.
///
/// Reads the first row at the kind's result index. Returns `None` for kinds
/// without a `SHOW CREATE` form, when the result has no rows, the row is too
/// short, or the cell is NULL.
pub fn extract_create_script(kind: ObjectKind, result: &QueryResult) -> Option<String> {
    let index = kind.create_script_result_index()?;
    result
        .rows
        .first()
        .and_then(|row| row.get(index))
        .and_then(Value::to_text)
}

/// Find the routine a `CREATE` statement defines.
///
/// `PROCEDURE` is searched first; `FUNCTION` only when no procedure token was
/// found, so a procedure body mentioning a function still drops the procedure.
///
/// ```
/// use dbtree_objects::{find_routine_drop, ObjectKind};
///
/// let drop = find_routine_drop("CREATE DEFINER=`root`@`%` FUNCTION `tax`(x INT) RETURNS INT RETURN x")
///     .unwrap();
/// assert_eq!(drop.kind, ObjectKind::Function);
/// assert_eq!(drop.statement(), "DROP FUNCTION `tax`$$");
///
/// assert!(find_routine_drop("CREATE TABLE `t` (id INT)").is_none());
/// ```
pub fn find_routine_drop(statement: &str) -> Option<RoutineDrop> {
    let (kind, captures) = PROCEDURE_NAME_REGEX
        .captures(statement)
        .map(|c| (ObjectKind::Procedure, c))
        .or_else(|| {
            FUNCTION_NAME_REGEX
                .captures(statement)
                .map(|c| (ObjectKind::Function, c))
        })?;

    Some(RoutineDrop {
        kind,
        name: captures[1].to_string(),
    })
}

/// Rewrite a `CREATE` statement according to `options`.
///
/// With `with_delimiter` the statement becomes
/// `DELIMITER $$\n<statement>$$\nDELIMITER ;`. With `with_drop` a
/// ``DROP {PROCEDURE|FUNCTION} `name`$$`` line is put in front when the
/// statement defines a routine; other statements get no prefix.
///
/// ```
/// use dbtree_objects::{rewrite_create_script, CreateScriptOptions};
///
/// let script = rewrite_create_script(
///     "CREATE PROCEDURE `foo`() BEGIN SELECT 1; END",
///     CreateScriptOptions::new().with_delimiter().with_drop(),
/// );
/// assert_eq!(
///     script,
///     "DROP PROCEDURE `foo`$$\nDELIMITER $$\nCREATE PROCEDURE `foo`() BEGIN SELECT 1; END$$\nDELIMITER ;"
/// );
/// ```
pub fn rewrite_create_script(statement: &str, options: CreateScriptOptions) -> String {
    let mut script = if options.with_delimiter {
        format!(
            "DELIMITER {delim}\n{statement}{delim}\nDELIMITER ;",
            delim = SCRIPT_DELIMITER
        )
    } else {
        statement.to_string()
    };

    if options.with_drop {
        if let Some(drop) = find_routine_drop(statement) {
            script = format!("{}\n{}", drop.statement(), script);
        }
    }

    script
}
