use anyhow::Result;
use serde_json::json;

use crate::{CliTest, run};

const EXTRACTED: &str = r#"[
  { "phrase": "Open", "locations": ["Menu.cs", "Toolbar.cs"], "translation": null },
  {
    "phrase": "Block",
    "context": "cube",
    "comment": "a brick",
    "locations": ["World.cs"],
    "translation": null
  },
  { "phrase": "New", "locations": ["Menu.cs"], "translation": null }
]"#;

const TRANSLATED: &str = r#"[
  { "phrase": "Open", "locations": ["Old.cs"], "translation": "Ouvrir" },
  { "phrase": "Block", "context": "cube", "translation": "Bloc", "machine": true },
  { "phrase": "Gone", "locations": ["Old.cs"], "translation": "Parti" }
]"#;

#[test]
fn test_update_merges_and_trims() -> Result<()> {
    let test = CliTest::with_file("strings.json", EXTRACTED)?;
    test.write_file("strings-fr.json", TRANSLATED)?;

    let output = run(test
        .update_command()
        .args(["strings.json", "strings-fr.json"]))?;

    assert_eq!(output.code, Some(0));
    insta::assert_snapshot!(
        output.stdout,
        @"✓ Updated strings-fr.json: 1 added, 2 updated, 1 removed"
    );
    assert_eq!(
        test.read_json("strings-fr.json")?,
        json!([
            { "phrase": "Open", "locations": ["Menu.cs", "Toolbar.cs"], "translation": "Ouvrir" },
            {
                "phrase": "Block",
                "context": "cube",
                "comment": "a brick",
                "locations": ["World.cs"],
                "translation": "Bloc",
                "machine": true
            },
            { "phrase": "New", "locations": ["Menu.cs"], "translation": null }
        ])
    );
    Ok(())
}

#[test]
fn test_update_no_trim_no_locations() -> Result<()> {
    let test = CliTest::with_file("strings.json", EXTRACTED)?;
    test.write_file("strings-fr.json", TRANSLATED)?;

    let output = run(test.update_command().args([
        "strings.json",
        "strings-fr.json",
        "--no-trim",
        "--no-locations",
    ]))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        test.read_json("strings-fr.json")?,
        json!([
            { "phrase": "Open", "translation": "Ouvrir" },
            {
                "phrase": "Block",
                "context": "cube",
                "comment": "a brick",
                "translation": "Bloc",
                "machine": true
            },
            { "phrase": "Gone", "translation": "Parti" },
            { "phrase": "New", "translation": null }
        ])
    );
    Ok(())
}

#[test]
fn test_update_creates_missing_target() -> Result<()> {
    let test = CliTest::with_file("strings.json", EXTRACTED)?;

    let output = run(test
        .update_command()
        .args(["strings.json", "out/strings-de.json"]))?;

    assert_eq!(output.code, Some(0));
    assert_eq!(
        test.read_json("out/strings-de.json")?,
        test.read_json("strings.json")?
    );
    Ok(())
}

#[test]
fn test_update_keeps_legacy_target_format() -> Result<()> {
    let test = CliTest::with_file("strings.json", EXTRACTED)?;
    test.write_file(
        "strings-fr.json",
        r#"{
  "Open": { "locations": [], "translation": "Ouvrir", "machine": false },
  "Block": {
    "locations": [],
    "contexts": { "cube": { "locations": [], "translation": "Bloc", "machine": false } },
    "translation": null,
    "machine": false
  }
}"#,
    )?;

    let output = run(test
        .update_command()
        .args(["strings.json", "strings-fr.json"]))?;

    assert_eq!(output.code, Some(0));
    let catalog = test.read_json("strings-fr.json")?;
    assert!(catalog.is_object());
    assert_eq!(catalog["Open"]["translation"], "Ouvrir");
    assert_eq!(catalog["Open"]["locations"], json!(["Menu.cs", "Toolbar.cs"]));
    assert_eq!(catalog["Block"]["contexts"]["cube"]["translation"], "Bloc");
    assert_eq!(
        catalog["Block"]["contexts"]["cube"]["locations"],
        json!(["World.cs"])
    );
    assert_eq!(catalog["New"]["translation"], json!(null));
    Ok(())
}

#[test]
fn test_update_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("strings.json", EXTRACTED)?;
    test.write_file("strings-fr.json", TRANSLATED)?;

    run(test.update_command().args(["strings.json", "strings-fr.json"]))?;
    let first = test.read_file("strings-fr.json")?;
    run(test.update_command().args(["strings.json", "strings-fr.json"]))?;

    assert_eq!(test.read_file("strings-fr.json")?, first);
    Ok(())
}

#[test]
fn test_update_missing_source() -> Result<()> {
    let test = CliTest::with_file("strings-fr.json", TRANSLATED)?;

    let output = run(test
        .update_command()
        .args(["strings.json", "strings-fr.json"]))?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to read catalog: strings.json"));
    assert_eq!(test.read_file("strings-fr.json")?, TRANSLATED);
    Ok(())
}
