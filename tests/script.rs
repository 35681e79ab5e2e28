//! Edit script tests - full sessions on virtual time

use scribe::config::EditorConfig;
use scribe::richtext::FieldProps;
use scribe::script::{parse_script, ScriptRunner};

fn run(props: FieldProps, script: &str) -> (ScriptRunner, String) {
    let steps = parse_script(script).unwrap();
    let mut runner = ScriptRunner::new(props, &EditorConfig::default());
    let mut out = Vec::new();
    runner.run(&steps, &mut out).unwrap();
    (runner, String::from_utf8(out).unwrap())
}

#[test]
fn test_session_with_formatting_and_clear() {
    let (runner, out) = run(
        FieldProps::new().with_initial_value("<p>Hello</p>"),
        "
        move doc-end
        type  world
        wait 150ms
        select 0:0..0:5
        format bold
        formats
        wait 100ms
        clear
        ",
    );
    assert_eq!(runner.editor().content(), "");
    assert_eq!(
        out,
        "   100ms  onChange \"<p>Hello world</p>\"\n\
         formats: bold align_left\n\
         \x20  250ms  onChange \"<p><strong>Hello</strong> world</p>\"\n\
         \x20  250ms  onChange \"\"\n"
    );
}

#[test]
fn test_controlled_value_from_script() {
    let (runner, out) = run(
        FieldProps::new().with_value("<p>A</p>"),
        "value <p>B</p>\nwait 500\n",
    );
    assert_eq!(runner.editor().content(), "<p>B</p>");
    assert!(out.is_empty());
}

#[test]
fn test_show_renders_counter() {
    let (_, out) = run(
        FieldProps::new().with_max_length(3).with_label("Notes"),
        "type abcd\nshow\n",
    );
    assert!(out.starts_with("Notes\n"));
    assert!(out.contains("4/3 (1 over)\n"));
    // Emission fires when the script finishes
    assert!(out.ends_with("onChange \"<p>abcd</p>\"\n"));
}
