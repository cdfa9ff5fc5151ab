use anyhow::Result;
use serde_json::json;

use crate::{CliTest, run};

const MENU: &str = r#"namespace App
{
    class Menu
    {
        void Build()
        {
            Add("Open".T());
            Add("Block".T("cube" /* a brick */));
            Add("Open".T());
            Log("menu built");
        }
    }
}
"#;

fn setup() -> Result<CliTest> {
    let test = CliTest::with_file("src/Menu.cs", MENU)?;
    test.write_file("src/obj/Generated.cs", r#"var s = "Generated".T();"#)?;
    Ok(test)
}

#[test]
fn test_extract_translatable_plain() -> Result<()> {
    let test = setup()?;

    let output = run(test.extract_command().args(["src", "-t"]))?;

    assert_eq!(output.code, Some(0));
    insta::assert_snapshot!(output.stdout, @r#"
    "Open"
    "Block" ("cube") // a brick
    "Open"

    Finished: 3 strings found, 2 are unique
    "#);
    Ok(())
}

#[test]
fn test_extract_non_translatable() -> Result<()> {
    let test = setup()?;

    let output = run(test.extract_command().args(["src", "-n"]))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "\"menu built\"\n\nFinished: 1 strings found, 1 are unique\n"
    );
    Ok(())
}

#[test]
fn test_extract_both_selections() -> Result<()> {
    let test = setup()?;

    let output = run(test.extract_command().args(["src", "-t", "-n"]))?;

    assert!(output.stdout.contains("\"Block\" (\"cube\") // a brick\n"));
    assert!(output.stdout.contains("\"menu built\"\n"));
    assert!(!output.stdout.contains("\"cube\"\n"));
    assert!(output.stdout.ends_with("Finished: 4 strings found, 3 are unique\n"));
    Ok(())
}

#[test]
fn test_extract_vs_format_with_file_header() -> Result<()> {
    let test = setup()?;

    let output = run(test
        .extract_command()
        .args(["src", "-t", "--format", "vs", "--file-header", "--raw"]))?;

    assert_eq!(
        output.stdout,
        "src/Menu.cs\n\
         src/Menu.cs(7): Open\n\
         src/Menu.cs(8): Block (cube) // a brick\n\
         src/Menu.cs(9): Open\n\
         \n\
         \n\
         Finished: 3 strings found, 2 are unique\n"
    );
    Ok(())
}

#[test]
fn test_extract_json_with_locations() -> Result<()> {
    let test = setup()?;
    test.write_file("src/ui/Toolbar.cs", r#"Add("Open".T());"#)?;

    let output = run(test.extract_command().args([
        "src",
        "-t",
        "--format",
        "json",
        "--locations",
        "-o",
        "strings.json",
    ]))?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Wrote 4 strings (2 unique) from 2 files"));
    assert_eq!(
        test.read_json("strings.json")?,
        json!([
            { "phrase": "Open", "locations": ["Menu.cs", "ui/Toolbar.cs"], "translation": null },
            {
                "phrase": "Block",
                "context": "cube",
                "comment": "a brick",
                "locations": ["Menu.cs"],
                "translation": null
            }
        ])
    );
    Ok(())
}

#[test]
fn test_extract_json_without_locations() -> Result<()> {
    let test = setup()?;

    let output = run(test
        .extract_command()
        .args(["src", "-t", "--format", "json", "--file-header"]))?;

    let catalog: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(
        catalog,
        json!([
            { "phrase": "Open", "translation": null },
            { "phrase": "Block", "context": "cube", "comment": "a brick", "translation": null }
        ])
    );
    Ok(())
}

#[test]
fn test_extract_absolute_glob_keeps_locations_relative() -> Result<()> {
    let test = setup()?;
    test.write_file("src/ui/Toolbar.cs", r#"Add("Open".T());"#)?;
    let pattern = format!("{}/src/**/*.cs", test.root().display());

    let output = run(test.extract_command().args([
        pattern.as_str(),
        "-t",
        "--format",
        "json",
        "--locations",
    ]))?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    let catalog: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(
        catalog,
        json!([
            { "phrase": "Open", "locations": ["Menu.cs", "ui/Toolbar.cs"], "translation": null },
            {
                "phrase": "Block",
                "context": "cube",
                "comment": "a brick",
                "locations": ["Menu.cs"],
                "translation": null
            }
        ])
    );
    Ok(())
}

#[test]
fn test_extract_single_file() -> Result<()> {
    let test = setup()?;

    let output = run(test.extract_command().args(["src/Menu.cs", "-t", "--format", "vs"]))?;

    assert!(output.stdout.starts_with("src/Menu.cs(7): \"Open\"\n"));
    Ok(())
}

#[test]
fn test_extract_respects_config_includes() -> Result<()> {
    let test = setup()?;
    test.write_file("src/Notes.txt", r#""Note".T()"#)?;
    test.write_file(".phrasectlrc.json", r#"{ "includes": ["**/*.txt"] }"#)?;

    let output = run(test.extract_command().args(["src", "-t"]))?;

    assert_eq!(
        output.stdout,
        "\"Note\"\n\nFinished: 1 strings found, 1 are unique\n"
    );
    Ok(())
}

#[test]
fn test_extract_custom_verb() -> Result<()> {
    let test = CliTest::with_file("src/App.cs", r#"var a = "Hello".Tr(); var b = "Skip".T();"#)?;
    test.write_file(".phrasectlrc.json", r#"{ "verb": "Tr" }"#)?;

    let output = run(test.extract_command().args(["src", "-t"]))?;

    assert!(output.stdout.starts_with("\"Hello\"\n\nFinished: 1 strings"));
    Ok(())
}

#[test]
fn test_extract_scan_error_continues() -> Result<()> {
    let test = setup()?;
    test.write_file("src/Bad.cs", "var a = \"Fine\".T();\nvar b = \"C:\\q\".T();\n")?;

    let output = run(test.extract_command().args(["src", "-t"]))?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("error: src/Bad.cs:"));
    assert!(output.stderr.contains("1 file could not be scanned"));
    // Nothing from the failing file is reported, not even strings before the error.
    assert!(!output.stdout.contains("Fine"));
    assert!(output.stdout.ends_with("Finished: 3 strings found, 2 are unique\n"));
    Ok(())
}

#[test]
fn test_extract_regex_merges_with_translatable_by_line() -> Result<()> {
    let test = setup()?;

    let output = run(test
        .extract_command()
        .args(["src", "-t", "--regex", r"Log\((\C)\)", "--format", "vs"]))?;

    assert_eq!(output.code, Some(0));
    insta::assert_snapshot!(output.stdout, @r#"
    src/Menu.cs(7): "Open"
    src/Menu.cs(8): "Block" ("cube") // a brick
    src/Menu.cs(9): "Open"
    src/Menu.cs(10): "menu built"

    Finished: 4 strings found, 3 are unique
    "#);
    Ok(())
}

#[test]
fn test_extract_regex_only() -> Result<()> {
    let test = setup()?;
    test.write_file("src/Form.cs", "Title = @\"Main \"\"window\"\"\";\nName = \"x\";\n")?;

    let output = run(test
        .extract_command()
        .args(["src", "--regex", r"Title = (\C)", "--format", "json"]))?;

    assert_eq!(output.code, Some(0));
    let catalog: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(catalog, json!([{ "phrase": "Main \"window\"", "translation": null }]));
    Ok(())
}

#[test]
fn test_extract_invalid_regex() -> Result<()> {
    let test = setup()?;

    let output = run(test.extract_command().args(["src", "--regex", "Log("]))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.contains("--regex"));
    Ok(())
}

#[test]
fn test_extract_warns_about_conflicting_comments() -> Result<()> {
    let test = setup()?;
    test.write_file("src/Tools.cs", "Add(\"Block\".T(\"cube\" /* a stone */));\n")?;

    let output = run(test.extract_command().args(["src", "-t", "--format", "json"]))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stderr,
        "warning: src/Tools.cs:1: \"Block\" (\"cube\") has another comment, \
         keeping \"a brick\" and ignoring \"a stone\"\n"
    );
    let catalog: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(catalog[1]["comment"], json!("a brick"));
    Ok(())
}

#[test]
fn test_extract_requires_selection() -> Result<()> {
    let test = setup()?;

    let output = run(test.extract_command().arg("src"))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_extract_missing_path() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.extract_command().args(["nowhere", "-t"]))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Path does not exist: nowhere"));
    assert!(!test.root().join("strings.json").exists());
    Ok(())
}
