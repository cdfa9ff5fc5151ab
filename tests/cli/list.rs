use anyhow::Result;

use crate::{CliTest, run};

const CATALOG: &str = r#"[
  { "phrase": "Open", "translation": null },
  { "phrase": "Save", "translation": "Enregistrer", "machine": true },
  { "phrase": "Close", "translation": "Fermer" },
  { "phrase": "Block", "context": "cube", "translation": "Bloc" },
  { "phrase": "Block", "context": "obstruct", "translation": null, "machine": true }
]"#;

#[test]
fn test_list_todo() -> Result<()> {
    let test = CliTest::with_file("strings-fr.json", CATALOG)?;

    let output = run(test.list_command().args(["strings-fr.json", "--todo"]))?;

    assert_eq!(output.code, Some(0));
    insta::assert_snapshot!(output.stdout, @r#"
    "Open" => null
    "Save" => "Enregistrer"
    "Block" ("obstruct") => null
    "#);
    Ok(())
}

#[test]
fn test_list_done() -> Result<()> {
    let test = CliTest::with_file("strings-fr.json", CATALOG)?;

    let output = run(test.list_command().args(["strings-fr.json", "--done"]))?;

    assert_eq!(
        output.stdout,
        "\"Close\" => \"Fermer\"\n\"Block\" (\"cube\") => \"Bloc\"\n"
    );
    Ok(())
}

#[test]
fn test_list_both() -> Result<()> {
    let test = CliTest::with_file("strings-fr.json", CATALOG)?;

    let output = run(test
        .list_command()
        .args(["strings-fr.json", "--todo", "--done"]))?;

    assert_eq!(output.stdout.lines().count(), 5);
    Ok(())
}

#[test]
fn test_list_legacy_catalog() -> Result<()> {
    let test = CliTest::with_file(
        "strings-fr.json",
        r#"{
  "Block": {
    "locations": [],
    "contexts": { "cube": { "locations": [], "translation": "Bloc", "machine": false } },
    "translation": null,
    "machine": false
  }
}"#,
    )?;

    let output = run(test.list_command().args(["strings-fr.json", "--done"]))?;

    assert_eq!(output.stdout, "\"Block\" (\"cube\") => \"Bloc\"\n");
    Ok(())
}

#[test]
fn test_list_requires_status() -> Result<()> {
    let test = CliTest::with_file("strings-fr.json", CATALOG)?;

    let output = run(test.list_command().arg("strings-fr.json"))?;

    assert_eq!(output.code, Some(2));
    Ok(())
}

#[test]
fn test_list_invalid_catalog() -> Result<()> {
    let test = CliTest::with_file("strings-fr.json", "[ not json")?;

    let output = run(test.list_command().args(["strings-fr.json", "--todo"]))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to parse catalog: strings-fr.json"));
    Ok(())
}
