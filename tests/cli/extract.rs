use anyhow::Result;

use crate::{CliTest, HOME_TREE};

const ABOUT_TREE: &str = r#"[
    {
        "type": "element",
        "name": "p",
        "attributes": [{ "name": "translate", "value": "" }],
        "children": [{ "type": "text", "value": "  About   us " }]
    },
    {
        "type": "ifBlock",
        "branches": [
            {
                "expression": { "type": "implicitReceiver" },
                "children": [
                    {
                        "type": "element",
                        "name": "span",
                        "inputs": [
                            {
                                "name": "translate",
                                "value": {
                                    "type": "conditional",
                                    "condition": { "type": "implicitReceiver" },
                                    "trueExp": { "type": "literalPrimitive", "value": "about.yes" },
                                    "falseExp": { "type": "literalPrimitive", "value": "about.no" }
                                }
                            }
                        ]
                    }
                ]
            }
        ]
    }
]"#;

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_extract_writes_new_catalog() -> Result<()> {
    let test = CliTest::with_file("src/home.ast.json", HOME_TREE)?;

    let output = test.extract_command().args(["-o", "i18n/en.json"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ Extracted 2 keys from 1 file\n  i18n/en.json 2 keys (+2 added, -0 removed)\n"
    );
    assert_eq!(
        test.read_file("i18n/en.json")?,
        "{\n\t\"home.intro\": \"\",\n\t\"home.title\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_markers_text_and_blocks() -> Result<()> {
    let test = CliTest::with_file("src/about.ast.json", ABOUT_TREE)?;

    let output = test.extract_command().args(["-o", "i18n/en.json"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("i18n/en.json")?,
        "{\n\t\"About us\": \"\",\n\t\"about.yes\": \"\",\n\t\"about.no\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_keeps_existing_values() -> Result<()> {
    let test = CliTest::with_file("src/home.ast.json", HOME_TREE)?;
    test.write_file(
        "i18n/en.json",
        r#"{ "home.title": "Welcome", "legacy": "Legacy" }"#,
    )?;

    let output = test.extract_command().args(["-o", "i18n/en.json"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("i18n/en.json")?,
        "{\n\t\"home.intro\": \"\",\n\t\"home.title\": \"Welcome\",\n\t\"legacy\": \"Legacy\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_clean_sort_and_key_as_default_value() -> Result<()> {
    let test = CliTest::with_file("src/home.ast.json", HOME_TREE)?;
    test.write_file(
        "i18n/en.json",
        r#"{ "home.title": "Welcome", "legacy": "Legacy" }"#,
    )?;

    let output = test
        .extract_command()
        .args([
            "-o",
            "i18n/en.json",
            "--clean",
            "--sort",
            "--key-as-default-value",
        ])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("2 keys (+1 added, -1 removed)"));
    assert_eq!(
        test.read_file("i18n/en.json")?,
        "{\n\t\"home.intro\": \"home.intro\",\n\t\"home.title\": \"Welcome\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_namespaced_json() -> Result<()> {
    let test = CliTest::with_file("src/home.ast.json", HOME_TREE)?;
    test.write_file("i18n/en.json", r#"{ "home": { "title": "Welcome" } }"#)?;

    let output = test
        .extract_command()
        .args([
            "-o",
            "i18n/en.json",
            "--format",
            "namespaced-json",
            "--format-indentation",
            "  ",
            "--sort",
        ])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("i18n/en.json")?,
        "{\n  \"home\": {\n    \"intro\": \"\",\n    \"title\": \"Welcome\"\n  }\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_strip_prefix() -> Result<()> {
    let test = CliTest::with_file("src/home.ast.json", HOME_TREE)?;

    let output = test
        .extract_command()
        .args(["-o", "i18n/en.json", "--strip-prefix", "home."])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("i18n/en.json")?,
        "{\n\t\"intro\": \"\",\n\t\"title\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("src/home.ast.json", HOME_TREE)?;

    let output = test
        .extract_command()
        .args(["-o", "i18n/en.json", "--dry-run"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).ends_with("note: dry run, no files were written\n"));
    assert!(!test.root().join("i18n/en.json").exists());

    Ok(())
}

#[test]
fn test_extract_reports_broken_files_and_keeps_going() -> Result<()> {
    let test = CliTest::with_file("src/home.ast.json", HOME_TREE)?;
    test.write_file("src/broken.ast.json", r#"[{ "type": "element" }]"#)?;
    test.write_file("i18n/en.json", r#"{ "legacy": "Legacy" }"#)?;

    let output = test
        .extract_command()
        .args(["-o", "i18n/en.json", "--clean"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    let stderr = stderr(&output);
    assert!(stderr.contains("error: "), "stderr: {}", stderr);
    assert!(stderr.contains("broken.ast.json"), "stderr: {}", stderr);
    assert!(stderr.contains("obsolete keys are kept"), "stderr: {}", stderr);
    assert!(stdout(&output).starts_with("✘ Extracted 2 keys from 2 files (1 file failed)"));

    assert_eq!(
        test.read_file("i18n/en.json")?,
        "{\n\t\"home.intro\": \"\",\n\t\"home.title\": \"\",\n\t\"legacy\": \"Legacy\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_skips_templates_without_parser_command() -> Result<()> {
    let test = CliTest::with_file("src/home.ast.json", HOME_TREE)?;
    test.write_file("src/page.html", "<p translate>Hello</p>")?;

    let output = test.extract_command().args(["-o", "i18n/en.json"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("1 template file skipped: no parser command configured"));
    assert!(stdout(&output).starts_with("✓ Extracted 2 keys from 1 file"));

    Ok(())
}

#[test]
fn test_extract_clean_keeps_keys_of_skipped_templates() -> Result<()> {
    let test = CliTest::with_file("src/home.html", "<h1>{{ 'home.title' | translate }}</h1>")?;
    test.write_file("i18n/en.json", r#"{ "home.title": "Welcome" }"#)?;

    let output = test
        .extract_command()
        .args(["-o", "i18n/en.json", "--clean"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let stderr = stderr(&output);
    assert!(stderr.contains("1 template file skipped"), "stderr: {}", stderr);
    assert!(stderr.contains("obsolete keys are kept"), "stderr: {}", stderr);
    assert_eq!(
        test.read_file("i18n/en.json")?,
        "{\n\t\"home.title\": \"Welcome\"\n}\n"
    );

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_extract_with_parser_command() -> Result<()> {
    // `cat` echoes the template back, so the template is its own tree.
    let test = CliTest::with_file("src/home.html", HOME_TREE)?;

    let output = test
        .extract_command()
        .args(["-o", "i18n/en.json", "--parser-command", "cat"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("i18n/en.json")?,
        "{\n\t\"home.intro\": \"\",\n\t\"home.title\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_uses_config_file() -> Result<()> {
    let test = CliTest::with_file(
        "app/home.ast.json",
        r#"[
            {
                "type": "element",
                "name": "h1",
                "attributes": [{ "name": "i18n-key", "value": "home.title" }]
            },
            {
                "type": "boundText",
                "value": {
                    "type": "pipe",
                    "name": "t",
                    "exp": { "type": "literalPrimitive", "value": "home.intro" }
                }
            }
        ]"#,
    )?;
    test.write_file(
        ".ngxextractrc.json",
        r#"{
            "input": ["app"],
            "output": ["locales/en.json", "locales/de.json"],
            "markerAttributes": ["i18n-key"],
            "pipeNames": ["t"],
            "stringAsDefaultValue": "TODO",
            "newlineAtEndOfFile": false
        }"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let expected = "{\n\t\"home.intro\": \"TODO\",\n\t\"home.title\": \"TODO\"\n}";
    assert_eq!(test.read_file("locales/en.json")?, expected);
    assert_eq!(test.read_file("locales/de.json")?, expected);

    Ok(())
}

#[test]
fn test_extract_output_directory() -> Result<()> {
    let test = CliTest::with_file("src/home.ast.json", HOME_TREE)?;
    test.write_file("i18n/en.json", "{}")?;
    test.write_file("i18n/fr.json", r#"{ "home.title": "Bienvenue" }"#)?;

    let output = test.extract_command().args(["-o", "i18n"]).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("i18n/fr.json")?,
        "{\n\t\"home.intro\": \"\",\n\t\"home.title\": \"Bienvenue\"\n}\n"
    );
    assert_eq!(
        test.read_file("i18n/en.json")?,
        "{\n\t\"home.intro\": \"\",\n\t\"home.title\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".ngxextractrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: "));

    Ok(())
}

#[test]
fn test_extract_conflicting_default_value_flags() -> Result<()> {
    let test = CliTest::with_file("src/home.ast.json", HOME_TREE)?;

    let output = test
        .extract_command()
        .args(["--key-as-default-value", "--string-as-default-value", "x"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("cannot be combined"));

    Ok(())
}
