use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, HOME_TREE};

const CONFIG_FILE: &str = ".ngxextractrc.json";

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "✓ Created .ngxextractrc.json\n"
    );

    let content = test.read_file(CONFIG_FILE)?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["input"], serde_json::json!(["src"]));
    assert_eq!(parsed["output"], serde_json::json!(["src/assets/i18n/en.json"]));
    assert_eq!(parsed["format"], "json");
    assert_eq!(parsed["markerAttributes"], serde_json::json!(["translate"]));
    assert_eq!(parsed["pipeNames"], serde_json::json!(["translate"]));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(CONFIG_FILE, "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    assert_eq!(test.read_file(CONFIG_FILE)?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("src/app/home.ast.json", HOME_TREE)?;

    let output = test.extract_command().output()?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        test.read_file("src/assets/i18n/en.json")?,
        "{\n\t\"home.intro\": \"\",\n\t\"home.title\": \"\"\n}\n"
    );

    Ok(())
}
