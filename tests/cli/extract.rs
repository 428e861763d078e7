use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

const PAGE: &str = "<h1>{{ _('Welcome') }}</h1>
<p>{{ ngettext('%d new message', '%d new messages', count) }}</p>
<p>{{ _('Welcome') }}</p>
";

fn json_output(output: &std::process::Output) -> Result<Value> {
    Ok(serde_json::from_str(&stdout(output))?)
}

#[test]
fn test_extract_prints_catalog_per_file() -> Result<()> {
    let test = CliTest::with_file("views/index.njk", PAGE)?;
    test.write_file("views/style.css", "{{ _('Not a template') }}")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    assert_eq!(
        json_output(&output)?,
        json!({
            "views/index.njk": {
                "%d new message": {
                    "msgid": "%d new message",
                    "msgid_plural": "%d new messages",
                    "plural": "%d new messages",
                    "line": [2]
                },
                "Welcome": { "msgid": "Welcome", "line": [1, 3] }
            }
        })
    );
    Ok(())
}

#[test]
fn test_extract_writes_output_file() -> Result<()> {
    let test = CliTest::with_file("index.njk", PAGE)?;

    let output = test
        .extract_command()
        .args(["--output", "messages.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());

    let written: Value = serde_json::from_str(&test.read_file("messages.json")?)?;
    assert_eq!(written["index.njk"]["Welcome"]["line"], json!([1, 3]));
    Ok(())
}

#[test]
fn test_extract_summary_format() -> Result<()> {
    let test = CliTest::with_file("index.njk", PAGE)?;
    test.write_file("about.html", "{{ gettext('About') }}")?;

    let output = test
        .extract_command()
        .args(["--format", "summary"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    assert!(out.contains("1 message   about.html"));
    assert!(out.contains("2 messages  index.njk"));
    assert!(out.contains("Extracted 3 messages from 2 templates"));
    Ok(())
}

#[test]
fn test_extract_keyword_flag_adds_keywords() -> Result<()> {
    let test = CliTest::with_file(
        "index.njk",
        "{{ t('Custom') }}{{ tp('ctx', 'With context') }}{{ _('Default') }}",
    )?;

    let output = test
        .extract_command()
        .args(["-k", "t", "--keyword", "tp:msgctxt=0,msgid=1"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let catalog = &json_output(&output)?["index.njk"];
    assert!(catalog.get("Custom").is_some());
    assert!(catalog.get("Default").is_some());
    assert_eq!(catalog["ctx\u{4}With context"]["msgctxt"], "ctx");
    Ok(())
}

#[test]
fn test_extract_invalid_keyword_flag() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .extract_command()
        .args(["--keyword", "t:msgid=0,msgid_plural=0"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("t:msgid=0,msgid_plural=0"));
    Ok(())
}

#[test]
fn test_extract_config_keywords_replace_defaults() -> Result<()> {
    let test = CliTest::with_file(".njkxrc.json", r#"{ "keywords": { "__": [0] } }"#)?;
    test.write_file("index.njk", "{{ __('Kept') }}{{ gettext('Dropped') }}")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(0));

    let catalog = &json_output(&output)?["index.njk"];
    assert!(catalog.get("Kept").is_some());
    assert!(catalog.get("Dropped").is_none());
    Ok(())
}

#[test]
fn test_extract_source_root_flag() -> Result<()> {
    let test = CliTest::with_file("site/templates/index.njk", PAGE)?;
    test.write_file("other.njk", "{{ _('Outside') }}")?;

    let output = test
        .extract_command()
        .args(["--source-root", "site"])
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    let parsed = json_output(&output)?;
    assert!(parsed.get("templates/index.njk").is_some());
    assert!(parsed.get("other.njk").is_none());
    Ok(())
}

#[test]
fn test_extract_reports_plural_mismatch() -> Result<()> {
    let test = CliTest::with_file(
        "bad.njk",
        "{{ ngettext('apple', 'apples', n) }}\n{{ ngettext('apple', 'more apples', n) }}\n",
    )?;
    test.write_file("good.njk", "{{ _('Fine') }}")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    let parsed = json_output(&output)?;
    assert!(parsed.get("good.njk").is_some());
    assert!(parsed.get("bad.njk").is_none());

    let err = stderr(&output);
    assert!(err.contains("error: \"apple\"  plural-mismatch"));
    assert!(err.contains("--> bad.njk:2:1"));
    assert!(err.contains("2 | {{ ngettext('apple', 'more apples', n) }}"));
    assert!(err.contains("1 problem (1 error, 0 warnings)"));
    Ok(())
}

#[test]
fn test_extract_reports_syntax_error() -> Result<()> {
    let test = CliTest::with_file("broken.njk", "<p>\n{{ _('x' }}\n")?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    assert!(err.contains("syntax-error"));
    assert!(err.contains("--> broken.njk:2:"));
    Ok(())
}

#[test]
fn test_extract_invalid_config_is_internal_error() -> Result<()> {
    let test = CliTest::with_file(".njkxrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ignores"));
    Ok(())
}

#[test]
fn test_extract_empty_project_warns() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(json_output(&output)?, json!({}));
    assert!(stderr(&output).contains("no templates found"));
    Ok(())
}
