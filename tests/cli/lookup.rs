use anyhow::Result;

use crate::{CliTest, run};

const CATALOG: &str = r#"[
  { "phrase": "Block", "translation": "Bloc" },
  { "phrase": "Block", "context": "obstruct", "translation": "Bloquer" },
  { "phrase": "Block", "context": "cube", "translation": null }
]"#;

#[test]
fn test_lookup() -> Result<()> {
    let test = CliTest::with_file("strings-fr.json", CATALOG)?;
    let lookup = |args: &[&str]| -> Result<String> {
        let mut cmd = test.command();
        cmd.args(["lookup", "strings-fr.json"]).args(args);
        Ok(run(&mut cmd)?.stdout)
    };

    assert_eq!(lookup(&["Block", "--context", "obstruct"])?, "Bloquer\n");
    assert_eq!(lookup(&["Block", "-c", "cube"])?, "Bloc\n");
    assert_eq!(lookup(&["Block"])?, "Bloc\n");
    assert_eq!(lookup(&["Unknown"])?, "Unknown\n");
    Ok(())
}
