//! Tests for routine templates

use super::*;
use crate::ObjectKind;
use pretty_assertions::assert_eq;

#[test]
fn test_sql_procedure_template() {
    let sql = RoutineTemplate::SqlProcedure.script("shop", "restock");

    let expected = [
        "DELIMITER %%",
        "DROP PROCEDURE IF EXISTS `shop`.`restock`%%",
        "/* Add or remove procedure IN/OUT/INOUT parameters as needed. */",
        "CREATE PROCEDURE `shop`.`restock`(IN arg1 INTEGER, OUT arg2 INTEGER)",
        "SQL SECURITY DEFINER",
        "NOT DETERMINISTIC",
        "BEGIN",
        "    /* Insert the procedure code here. */",
        "    SET arg2 = arg1 * 2;",
        "END%%",
        "DELIMITER ;",
        "",
        "CALL `shop`.`restock`(1, @arg2);",
        "SELECT @arg2;",
    ]
    .join("\n");
    assert_eq!(sql, expected);
}

#[test]
fn test_blank_name_uses_placeholder() {
    let sql = RoutineTemplate::SqlProcedure.script("shop", "  ");
    assert!(sql.contains("CREATE PROCEDURE `shop`.`my_procedure`("));

    let sql = RoutineTemplate::JsFunction.script("shop", "");
    assert!(sql.contains("CREATE FUNCTION `shop`.`my_function`("));

    let sql = RoutineTemplate::JsLibrary.script("shop", "");
    assert!(sql.contains("CREATE LIBRARY `shop`.`my_library`"));
}

#[test]
fn test_sql_function_is_delimited() {
    let sql = RoutineTemplate::SqlFunction.script("shop", "tax");
    assert!(sql.starts_with("DELIMITER %%\n"));
    assert!(sql.contains("\nEND%%\nDELIMITER ;\n"));
    assert!(sql.ends_with("SELECT `shop`.`tax`(1);"));
}

#[test]
fn test_js_templates_do_not_change_delimiter() {
    for template in [
        RoutineTemplate::JsProcedure,
        RoutineTemplate::JsFunction,
        RoutineTemplate::JsLibrary,
    ] {
        let sql = template.script("shop", "thing");
        assert!(!sql.contains("DELIMITER"), "{:?} changed the delimiter", template);
        assert!(sql.contains("LANGUAGE JAVASCRIPT"));
        assert!(sql.contains("AS $$\n"));
    }
}

#[test]
fn test_js_library_drop_line() {
    let sql = RoutineTemplate::JsLibrary.script("lib", "utils");
    assert!(sql.starts_with("DROP LIBRARY IF EXISTS `lib`.`utils`;\nCREATE LIBRARY `lib`.`utils`\n"));
}

#[test]
fn test_names_are_quoted() {
    let sql = RoutineTemplate::SqlFunction.script("my`db", "f");
    assert!(sql.contains("`my``db`.`f`"));
}

#[test]
fn test_template_kinds() {
    assert_eq!(RoutineTemplate::SqlProcedure.kind(), ObjectKind::Procedure);
    assert_eq!(RoutineTemplate::JsProcedure.kind(), ObjectKind::Procedure);
    assert_eq!(RoutineTemplate::SqlFunction.kind(), ObjectKind::Function);
    assert_eq!(RoutineTemplate::JsFunction.kind(), ObjectKind::Function);
    assert_eq!(RoutineTemplate::JsLibrary.kind(), ObjectKind::Library);
}

#[test]
fn test_parse_template_names() {
    assert_eq!("procedure".parse::<RoutineTemplate>(), Ok(RoutineTemplate::SqlProcedure));
    assert_eq!("JS-Function".parse::<RoutineTemplate>(), Ok(RoutineTemplate::JsFunction));
    assert_eq!("library".parse::<RoutineTemplate>(), Ok(RoutineTemplate::JsLibrary));
    assert!("trigger".parse::<RoutineTemplate>().is_err());
}
