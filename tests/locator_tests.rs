// Integration tests for artifact discovery
// Covers parent-directory walking, the depth cap, and config.yml ordering

use anyhow::Result;
use docgo::locate::{find_config_file_in, find_manifest_from};
use std::fs;
use tempfile::TempDir;

#[test]
fn finds_manifest_in_parent_directories() -> Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path();
    fs::write(root.join("manifest.json"), "{}")?;

    let nested = root.join("b").join("c");
    fs::create_dir_all(&nested)?;

    let found = find_manifest_from(&[nested]);
    assert_eq!(found, Some(root.join("manifest.json")));
    Ok(())
}

#[test]
fn finds_manifest_in_starting_directory_itself() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("manifest.json"), "{}")?;

    let found = find_manifest_from(&[temp.path().to_path_buf()]);
    assert_eq!(found, Some(temp.path().join("manifest.json")));
    Ok(())
}

#[test]
fn search_depth_is_capped_at_five_levels() -> Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path();
    fs::write(root.join("manifest.json"), "{}")?;

    let five_down = root.join("1/2/3/4/5");
    fs::create_dir_all(&five_down)?;
    assert_eq!(
        find_manifest_from(&[five_down.clone()]),
        Some(root.join("manifest.json"))
    );

    // One level deeper and the manifest is out of reach
    let six_down = five_down.join("6");
    fs::create_dir_all(&six_down)?;
    assert_eq!(find_manifest_from(&[six_down]), None);
    Ok(())
}

#[test]
fn first_starting_directory_is_exhausted_before_the_next() -> Result<()> {
    let temp = TempDir::new()?;
    let root = temp.path();

    // First chain finds its manifest two levels up; the second chain has one
    // directly in its starting directory.
    let first_root = root.join("first");
    let first_start = first_root.join("a").join("b");
    fs::create_dir_all(&first_start)?;
    fs::write(first_root.join("manifest.json"), "{}")?;

    let second_start = root.join("second");
    fs::create_dir_all(&second_start)?;
    fs::write(second_start.join("manifest.json"), "{}")?;

    let found = find_manifest_from(&[first_start, second_start]);
    assert_eq!(found, Some(first_root.join("manifest.json")));
    Ok(())
}

#[test]
fn no_manifest_anywhere_is_not_an_error() -> Result<()> {
    let temp = TempDir::new()?;
    let empty = temp.path().join("x/y");
    fs::create_dir_all(&empty)?;
    assert_eq!(find_manifest_from(&[empty]), None);
    Ok(())
}

#[test]
fn config_file_candidates_are_checked_in_order() -> Result<()> {
    let temp = TempDir::new()?;
    let first = temp.path().join("exe");
    let second = temp.path().join("cwd");
    let third = temp.path().join("manifest");
    for dir in [&first, &second, &third] {
        fs::create_dir_all(dir)?;
    }
    fs::write(second.join("config.yml"), "apps: []")?;
    fs::write(third.join("config.yml"), "apps: []")?;

    let found = find_config_file_in(&[first.clone(), second.clone(), third.clone()]);
    assert_eq!(found, Some(second.join("config.yml")));

    // Short-circuit: once the first candidate matches, later ones never win
    fs::write(first.join("config.yml"), "apps: []")?;
    let found = find_config_file_in(&[first.clone(), second, third]);
    assert_eq!(found, Some(first.join("config.yml")));
    Ok(())
}

#[test]
fn absent_config_file_yields_none() -> Result<()> {
    let temp = TempDir::new()?;
    assert_eq!(find_config_file_in(&[temp.path().to_path_buf()]), None);
    Ok(())
}
