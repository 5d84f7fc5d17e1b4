//! Routine template generation
//!
//! SQL routines are emitted inside a `DELIMITER %%` block so their bodies can
//! contain semicolons. JavaScript routines and libraries use a `$$` quoted
//! body and need no delimiter change.

use crate::{ObjectKind, quote_identifier};
use serde::{Deserialize, Serialize};

/// Delimiter used by the SQL routine templates
pub const TEMPLATE_DELIMITER: &str = "%%";

/// Starter script flavours offered for a schema
///
/// # Examples
///
/// ```
/// use dbtree_objects::RoutineTemplate;
///
/// let sql = RoutineTemplate::SqlFunction.script("shop", "double_it");
/// assert!(sql.starts_with("DELIMITER %%\nDROP FUNCTION IF EXISTS `shop`.`double_it`%%"));
/// assert!(sql.contains("SELECT `shop`.`double_it`(1);"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineTemplate {
    /// SQL stored procedure
    SqlProcedure,
    /// SQL stored function
    SqlFunction,
    /// JavaScript stored procedure
    JsProcedure,
    /// JavaScript stored function
    JsFunction,
    /// JavaScript library
    JsLibrary,
}

impl RoutineTemplate {
    /// Kind of the object the template creates
    pub fn kind(&self) -> ObjectKind {
        match self {
            RoutineTemplate::SqlProcedure | RoutineTemplate::JsProcedure => {
                ObjectKind::Procedure
            }
            RoutineTemplate::SqlFunction | RoutineTemplate::JsFunction => ObjectKind::Function,
            RoutineTemplate::JsLibrary => ObjectKind::Library,
        }
    }

    /// Name used when the user leaves the name empty
    pub fn placeholder_name(&self) -> &'static str {
        match self.kind() {
            ObjectKind::Procedure => "my_procedure",
            ObjectKind::Library => "my_library",
            _ => "my_function",
        }
    }

    /// Build the starter script for `name` in `schema`.
    ///
    /// A blank `name` falls back to [`placeholder_name`](Self::placeholder_name).
    pub fn script(&self, schema: &str, name: &str) -> String {
        let name = if name.trim().is_empty() {
            self.placeholder_name()
        } else {
            name
        };
        let target = self.kind().qualified_name(schema, name);
        let schema_quoted = quote_identifier(schema);

        match self {
            RoutineTemplate::SqlProcedure => [
                format!("DELIMITER {TEMPLATE_DELIMITER}"),
                format!("DROP PROCEDURE IF EXISTS {target}{TEMPLATE_DELIMITER}"),
                "/* Add or remove procedure IN/OUT/INOUT parameters as needed. */".to_string(),
                format!("CREATE PROCEDURE {target}(IN arg1 INTEGER, OUT arg2 INTEGER)"),
                "SQL SECURITY DEFINER".to_string(),
                "NOT DETERMINISTIC".to_string(),
                "BEGIN".to_string(),
                "    /* Insert the procedure code here. */".to_string(),
                "    SET arg2 = arg1 * 2;".to_string(),
                format!("END{TEMPLATE_DELIMITER}"),
                "DELIMITER ;".to_string(),
                String::new(),
                format!("CALL {target}(1, @arg2);"),
                "SELECT @arg2;".to_string(),
            ]
            .join("\n"),
            RoutineTemplate::SqlFunction => [
                format!("DELIMITER {TEMPLATE_DELIMITER}"),
                format!("DROP FUNCTION IF EXISTS {target}{TEMPLATE_DELIMITER}"),
                "/* Add or remove function parameters as needed. */".to_string(),
                format!("CREATE FUNCTION {target}(arg1 INTEGER)"),
                "RETURNS INTEGER".to_string(),
                "SQL SECURITY DEFINER".to_string(),
                "DETERMINISTIC".to_string(),
                "BEGIN".to_string(),
                "    /* Insert the function code here. */".to_string(),
                "    RETURN arg1;".to_string(),
                format!("END{TEMPLATE_DELIMITER}"),
                "DELIMITER ;".to_string(),
                String::new(),
                format!("SELECT {target}(1);"),
            ]
            .join("\n"),
            RoutineTemplate::JsProcedure => [
                format!("DROP PROCEDURE IF EXISTS {target};"),
                "/* Add or remove procedure parameters as needed. */".to_string(),
                format!("CREATE PROCEDURE {target}(IN arg1 INTEGER, OUT arg2 INTEGER)"),
                format!("/* USING ({schema_quoted}.`library1` AS lib1) */"),
                "DETERMINISTIC LANGUAGE JAVASCRIPT".to_string(),
                "AS $$".to_string(),
                "    /* Insert the procedure code here. */".to_string(),
                "    const query = session.prepare('SELECT ?');".to_string(),
                "    arg2 = query.bind(arg1).execute().fetchOne()[0];".to_string(),
                "$$;".to_string(),
                format!("CALL {target}(42, @out);"),
                "SELECT @out;".to_string(),
            ]
            .join("\n"),
            RoutineTemplate::JsFunction => [
                format!("DROP FUNCTION IF EXISTS {target};"),
                "/* Add or remove function parameters as needed. */".to_string(),
                format!("CREATE FUNCTION {target}(arg1 INTEGER)"),
                "RETURNS INTEGER".to_string(),
                format!("/* USING ({schema_quoted}.`library1` AS lib1) */"),
                "SQL SECURITY DEFINER".to_string(),
                "DETERMINISTIC LANGUAGE JAVASCRIPT".to_string(),
                "AS $$".to_string(),
                "    /* Insert the function code here. */".to_string(),
                "    return arg1;".to_string(),
                "$$;".to_string(),
                format!("SELECT {target}(1);"),
            ]
            .join("\n"),
            RoutineTemplate::JsLibrary => [
                format!("DROP LIBRARY IF EXISTS {target};"),
                format!("CREATE LIBRARY {target}"),
                "LANGUAGE JAVASCRIPT".to_string(),
                "AS $$".to_string(),
                "    /* Insert the library code here. */".to_string(),
                "    export function f(x) {".to_string(),
                "        return x + 1;".to_string(),
                "    }".to_string(),
                "$$;".to_string(),
                String::new(),
            ]
            .join("\n"),
        }
    }
}

impl std::str::FromStr for RoutineTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "procedure" | "sql-procedure" => Ok(RoutineTemplate::SqlProcedure),
            "function" | "sql-function" => Ok(RoutineTemplate::SqlFunction),
            "js-procedure" => Ok(RoutineTemplate::JsProcedure),
            "js-function" => Ok(RoutineTemplate::JsFunction),
            "js-library" | "library" => Ok(RoutineTemplate::JsLibrary),
            other => Err(format!("Unknown routine template '{}'", other)),
        }
    }
}
