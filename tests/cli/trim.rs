use anyhow::Result;
use serde_json::json;

use crate::{CliTest, run};

#[test]
fn test_trim_writes_release_projection() -> Result<()> {
    let test = CliTest::with_file(
        "strings-fr.json",
        r#"[
  {
    "phrase": "Open",
    "comment": "menu",
    "locations": ["Menu.cs"],
    "translation": "Ouvrir",
    "machine": true
  },
  { "phrase": "Block", "context": "cube", "locations": ["World.cs"], "translation": null }
]"#,
    )?;

    let output = run(test
        .command()
        .args(["trim", "strings-fr.json", "release/strings-fr.json"]))?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("(2 records)"));
    assert_eq!(
        test.read_json("release/strings-fr.json")?,
        json!([
            { "phrase": "Open", "translation": "Ouvrir" },
            { "phrase": "Block", "context": "cube", "translation": null }
        ])
    );
    Ok(())
}

#[test]
fn test_trim_release_file_is_a_valid_catalog() -> Result<()> {
    let test = CliTest::with_file(
        "strings-fr.json",
        r#"[{ "phrase": "Open", "locations": ["Menu.cs"], "translation": "Ouvrir" }]"#,
    )?;

    run(test
        .command()
        .args(["trim", "strings-fr.json", "release.json"]))?;
    let output = run(test.command().args(["lookup", "release.json", "Open"]))?;

    assert_eq!(output.stdout, "Ouvrir\n");
    Ok(())
}
