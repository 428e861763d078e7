use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .njkxrc.json"));
    assert!(test.root().join(".njkxrc.json").exists());

    let content = test.read_file(".njkxrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert!(parsed.get("includes").is_some());
    assert!(parsed.get("extensions").is_some());
    assert!(parsed.get("sourceRoot").is_some());
    assert_eq!(parsed["keywords"]["ngettext"]["msgid_plural"], 1);
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".njkxrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".njkxrc.json already exists"));
    assert_eq!(test.read_file(".njkxrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_then_extract_uses_written_config() -> Result<()> {
    let test = CliTest::with_file("index.njk", "{{ npgettext('nav', 'page', 'pages', n) }}")?;
    test.command().arg("init").output()?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(0));

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    let entry = &parsed["index.njk"]["nav\u{4}page"];
    assert_eq!(entry["msgid_plural"], "pages");
    assert_eq!(entry["msgctxt"], "nav");

    Ok(())
}
