//! End-to-end tests for the `promptdeck` binary.

mod common;

use common::{OutputAssertions, TestContext};
use predicates::prelude::*;

#[test]
fn test_no_args_prints_help() {
    let ctx = TestContext::new();
    ctx.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_list_builtin_templates() {
    let ctx = TestContext::new();
    let output = ctx.command().arg("list").output().unwrap();

    output.assert_success();
    output.assert_stdout_contains("ID");
    output.assert_stdout_contains("polaroid");
    output.assert_stdout_contains("Street Portrait");
    output.assert_stdout_contains("code-review");
}

#[test]
fn test_list_json() {
    let ctx = TestContext::new();
    let output = ctx.command().args(["--format", "json", "ls"]).output().unwrap();
    output.assert_success();

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["id"], "polaroid");
    assert_eq!(rows[0]["format"], "json");
    assert_eq!(rows[0]["placeholders"], 4);
}

#[test]
fn test_list_includes_extra_file() {
    let ctx = TestContext::new().with_config("templates:\n  extra_file: templates.yaml\n");
    ctx.write("templates.yaml", promptdeck_test_utils::SAMPLE_TEMPLATES_YAML);

    let output = ctx.command().arg("list").output().unwrap();
    output.assert_success();
    output.assert_stdout_contains("haiku");
    output.assert_stdout_contains("Limerick");
}

#[test]
fn test_broken_extra_file_is_config_error() {
    let ctx = TestContext::new().with_config("templates:\n  extra_file: templates.yaml\n");
    ctx.write("templates.yaml", "templates: [unclosed\n");

    let output = ctx.command().arg("list").output().unwrap();
    output.assert_exit_code(2);
    output.assert_stderr_contains("error[E001]");
}

#[test]
fn test_show_template() {
    let ctx = TestContext::new();
    let output = ctx.command().args(["show", "polaroid"]).output().unwrap();

    output.assert_success();
    output.assert_stdout_contains("Polaroid With My Younger Self");
    output.assert_stdout_contains("(pol_face) hugging (pol_face2)");
    output.assert_stdout_contains("pol_mood = \"nostalgic\"");
}

#[test]
fn test_show_by_index() {
    let ctx = TestContext::new();
    let output = ctx.command().args(["show", "1"]).output().unwrap();
    output.assert_success();
    output.assert_stdout_contains("Street Portrait");
}

#[test]
fn test_parse_reports_segments_and_warnings() {
    let ctx = TestContext::new();
    let output = ctx.command().args(["parse", "Hi (name), bye (name"]).output().unwrap();

    output.assert_success();
    output.assert_stdout_contains("literal      \"Hi \"");
    output.assert_stdout_contains("placeholder  name");
    output.assert_stdout_contains("keys: name");
    output.assert_stdout_contains("warning: unclosed '('");
}

#[test]
fn test_render_with_values() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["render", "product-shot", "--set", "product=a (blue) teapot"])
        .output()
        .unwrap();

    output.assert_success();
    assert_eq!(
        output.stdout_text().trim_end(),
        "A photo of a blue teapot placed on a weathered wooden table, lit by morning window light, \
         with a folded newspaper in the background."
    );
}

#[test]
fn test_render_json_template() {
    let ctx = TestContext::new();
    let output = ctx.command().args(["render", "polaroid"]).output().unwrap();
    output.assert_success();

    let prompt: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let text = prompt["prompt"].as_str().unwrap();
    assert!(text.starts_with("An old polaroid photo of a woman"), "{text}");
    assert!(prompt["negative_prompt"].is_string());
}

#[test]
fn test_render_json_output_format() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["--format", "json", "render", "email-reply"])
        .output()
        .unwrap();
    output.assert_success();

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["template"], "email-reply");
    assert_eq!(value["format"], "string");
    assert!(value.get("copied").is_none());
}

#[test]
fn test_render_unknown_template() {
    let ctx = TestContext::new();
    let output = ctx.command().args(["render", "polaroyd"]).output().unwrap();

    output.assert_exit_code(6);
    output.assert_stderr_contains("template not found: polaroyd");
    output.assert_stderr_contains("- polaroid");
}

#[test]
fn test_render_unknown_field() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["render", "code-review", "--set", "colour=red"])
        .output()
        .unwrap();

    output.assert_exit_code(5);
    output.assert_stderr_contains("'colour' is not a placeholder of code-review");
}

#[test]
fn test_invalid_transition_env() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .env("PROMPTDECK_TRANSITION_MS", "soon")
        .arg("list")
        .output()
        .unwrap();

    output.assert_exit_code(2);
    output.assert_stderr_contains("PROMPTDECK_TRANSITION_MS");
}

#[test]
fn test_error_report_json() {
    let ctx = TestContext::new();
    let output = ctx
        .command()
        .args(["--format", "json", "show", "nothing-here"])
        .output()
        .unwrap();

    output.assert_exit_code(6);
    let report: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(report["error"]["code"], "E005");
}

#[cfg(unix)]
#[test]
fn test_render_copy() {
    let ctx = TestContext::new().with_file_clipboard();
    let output = ctx
        .command()
        .args(["render", "short-story", "--copy", "--set", "length=300"])
        .output()
        .unwrap();

    output.assert_success();
    output.assert_stderr_contains("copied to clipboard");
    assert_eq!(ctx.clipboard().unwrap(), output.stdout_text().trim_end());
}

#[test]
fn test_render_help_explains_copy_failure() {
    let ctx = TestContext::new();
    ctx.command()
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exits with code 7"));
}

#[cfg(unix)]
#[test]
fn test_render_copy_failure_exit_code() {
    let ctx = TestContext::new().with_config("clipboard:\n  command: [\"sh\", \"-c\", \"exit 3\"]\n");
    let output = ctx
        .command()
        .args(["render", "short-story", "--copy"])
        .output()
        .unwrap();

    output.assert_exit_code(7);
    output.assert_stderr_contains("error[E007]");
}

#[cfg(unix)]
#[test]
fn test_deck_session_from_stdin() {
    let ctx = TestContext::new().with_file_clipboard();
    let output = ctx
        .command()
        .arg("deck")
        .write_stdin("next\nopen\nset city Lisbon\ncopy\nhistory\nquit\n")
        .output()
        .unwrap();

    output.assert_success();
    output.assert_stdout_contains("-> [2/6] Street Portrait");
    output.assert_stdout_contains("city = \"Lisbon\"");
    output.assert_stdout_contains("copied (prompt_");
    output.assert_stdout_contains("  1.   prompt_");

    let copied = ctx.clipboard().unwrap();
    assert!(copied.contains("in Lisbon at golden hour"), "{copied}");
}

#[cfg(unix)]
#[test]
fn test_deck_start_option() {
    let ctx = TestContext::new().with_file_clipboard();
    ctx.command()
        .args(["deck", "--start", "code-review"])
        .write_stdin("show\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[6/6] Code Review"));
}
