use glance_render::tabular::{
    render_auto, render_objects, ChangeFields, FieldCap, TableOptions, TableStyle,
};
use glance_render::{clear_last_table, last_table, Field, TableError};
use insta::assert_snapshot;
use serde::Serialize;
use serde_json::{json, Map, Value};
use serial_test::serial;

fn wide() -> TableOptions {
    TableOptions::new().max_width(150)
}

#[test]
#[serial]
fn two_rows_ascii() {
    let output = render_auto(&json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}]), &wide());
    assert_snapshot!(output, @r"
    +---+---+
    | a | b |
    +---+---+
    | 1 | 2 |
    | 3 | 4 |
    +---+---+
    2 rows in set
    ");
}

#[test]
#[serial]
fn empty_input_is_sentinel_only() {
    assert_eq!(render_auto(&json!([]), &wide()), "0 rows in set");
    assert_eq!(render_auto(&Value::Null, &wide()), "0 rows in set");
}

#[test]
#[serial]
fn footer_wording() {
    let one = render_auto(&json!([{"a": 1}]), &wide());
    assert!(one.ends_with("\n1 row in set"));
    let three = render_auto(&json!([{"a": 1}, {"a": 2}, {"a": 3}]), &wide());
    assert!(three.ends_with("\n3 rows in set"));
    let none = render_auto(&json!([{"a": 1}]), &wide().description(false));
    assert!(none.ends_with("+---+"));
}

#[test]
#[serial]
fn all_fields_unions_keys() {
    let rows = json!([{"a": 1, "b": 2}, {"a": 3, "c": 4}]);
    let output = render_auto(&rows, &wide().all_fields(true));
    assert_snapshot!(output, @r"
    +---+---+---+
    | a | b | c |
    +---+---+---+
    | 1 | 2 |   |
    | 3 |   | 4 |
    +---+---+---+
    2 rows in set
    ");

    let first_row_only = render_auto(&rows, &wide());
    assert!(!first_row_only.contains("| c |"));
}

#[test]
#[serial]
fn unicode_borders() {
    let output = render_auto(&json!([{"a": 1, "b": 2}]), &wide().unicode(true));
    assert_snapshot!(output, @r"
    ┌───┬───┐
    │ a │ b │
    ├───┼───┤
    │ 1 │ 2 │
    └───┴───┘
    1 row in set
    ");
}

#[test]
#[serial]
fn markdown_table() {
    let output = render_auto(
        &json!([{"a": 1, "b": 2}]),
        &wide().style(TableStyle::Markdown),
    );
    assert_eq!(output, "| a | b |\n|---|---|\n| 1 | 2 |");
}

#[test]
#[serial]
fn tab_separated() {
    let output = render_auto(
        &json!([{"name": "a.txt", "size": 12}, {"name": "b", "size": null}]),
        &wide().style(TableStyle::Tab),
    );
    assert_eq!(output, "name\tsize\na.txt\t12\nb\t");
}

#[test]
#[serial]
fn numbered_rows() {
    let output = render_auto(&json!([{"a": "x"}, {"a": "y"}]), &wide().number(true));
    assert_snapshot!(output, @r"
    +--------+---+
    | number | a |
    +--------+---+
    | 1      | x |
    | 2      | y |
    +--------+---+
    2 rows in set
    ");
}

#[test]
#[serial]
fn long_cell_is_truncated() {
    let output = render_auto(
        &json!([{"name": "abcdefghijklmnop"}]),
        &TableOptions::new().max_width(12),
    );
    assert_snapshot!(output, @r"
    +----------+
    | name     |
    +----------+
    | abcde... |
    +----------+
    1 row in set
    ");
}

#[test]
#[serial]
fn every_line_fits_the_width() {
    let rows = json!([
        {"id": 1, "path": "/usr/share/doc/some/very/long/path/to/a/file.txt", "note": "short"},
        {"id": 2, "path": "/tmp/x", "note": "a somewhat longer note that keeps going and going"},
    ]);
    let output = render_auto(&rows, &TableOptions::new().max_width(50));
    for line in output.lines().filter(|l| l.starts_with('+') || l.starts_with('|')) {
        assert_eq!(glance_render::display_width(line), 50, "{}", line);
    }
}

#[test]
#[serial]
fn resize_off_keeps_natural_widths() {
    let rows = json!([{"text": "x".repeat(60)}]);
    let output = render_auto(&rows, &TableOptions::new().max_width(20).resize(false));
    assert!(output.contains(&"x".repeat(60)));
}

#[test]
#[serial]
fn field_caps_apply_without_resize() {
    let rows = json!([{"text": "abcdefghijkl"}]);
    let output = render_auto(
        &rows,
        &wide().resize(false).max_field("text", FieldCap::Width(8)),
    );
    assert!(output.contains("| abcde... |"), "{}", output);
}

#[test]
#[serial]
fn custom_headers_and_renames() {
    let output = render_auto(
        &json!([[1, "one"]]),
        &wide()
            .change_fields(ChangeFields::Names(vec!["id".into(), "label".into()]))
            .header("label", "Label"),
    );
    assert_snapshot!(output, @r"
    +----+-------+
    | id | Label |
    +----+-------+
    | 1  | one   |
    +----+-------+
    1 row in set
    ");
}

#[test]
#[serial]
fn vertical_layout() {
    let output = render_auto(&json!([{"a": 1, "bb": "x"}]), &wide().vertical(true));
    assert_eq!(output, "*** 1. row ***\n a: 1\nbb: x\n1 row in set");
}

#[test]
#[serial]
fn too_many_fields_fall_back_to_vertical() {
    let row: Map<String, Value> = (1..=25).map(|i| (format!("f{:02}", i), json!(i))).collect();
    let rows = Value::Array(vec![Value::Object(row)]);

    clear_last_table();
    let output = render_auto(&rows, &wide());
    let snapshot = last_table().expect("table recorded");
    assert_eq!(snapshot.style, TableStyle::Vertical);
    assert!(snapshot.warning.as_deref().unwrap_or("").contains("25 fields"));

    let vertical = render_auto(&rows, &wide().vertical(true));
    assert_eq!(output, vertical);
    assert!(output.starts_with("**** 1. row ****\nf01: 1\n"));
}

#[test]
#[serial]
fn last_table_records_fitted_lengths() {
    clear_last_table();
    render_auto(&json!([{"id": 10, "name": "widget"}]), &wide().number(true));
    let snapshot = last_table().expect("table recorded");
    assert_eq!(
        snapshot.fields,
        vec![Field::RowNumber, Field::name("id"), Field::name("name")]
    );
    assert_eq!(snapshot.field_lengths[&Field::name("name")], 6);
    assert_eq!(snapshot.row_count, 1);
    assert!(snapshot.warning.is_none());
}

#[derive(Serialize)]
struct Entry {
    name: String,
    size: u64,
    tags: Vec<&'static str>,
}

#[test]
#[serial]
fn objects_need_fields() {
    let entries = vec![Entry {
        name: "notes.md".into(),
        size: 2048,
        tags: vec!["doc", "draft"],
    }];
    let err = render_objects(&entries, &wide()).unwrap_err();
    assert!(matches!(err, TableError::MissingFields));

    let output = render_objects(&entries, &wide().fields(["name", "tags", "missing"])).unwrap();
    assert_snapshot!(output, @r#"
    +----------+-----------------+---------+
    | name     | tags            | missing |
    +----------+-----------------+---------+
    | notes.md | ["doc","draft"] |         |
    +----------+-----------------+---------+
    1 row in set
    "#);
}
