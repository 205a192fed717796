use anyhow::Result;
use commit_commander::config::{CONFIG_FILE_NAME, Config, DEFAULT_DETAILS_PROMPT};
use std::fs;
use tempfile::TempDir;

#[path = "test_utils.rs"]
mod test_utils;
use test_utils::MockDataBuilder;

#[test]
fn test_missing_file_points_at_init() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let error = Config::load_from(&temp_dir.path().join(CONFIG_FILE_NAME))
        .expect_err("no file written yet");
    assert!(error.to_string().contains("commit-commander init"));
    Ok(())
}

#[test]
fn test_invalid_file_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "commit_types = \"not a list\"\n")?;

    assert!(Config::load_from(&path).is_err());
    Ok(())
}

#[test]
fn test_save_then_load_keeps_settings() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join(CONFIG_FILE_NAME);

    let mut config = MockDataBuilder::config();
    MockDataBuilder::menus(&mut config, &["🐛fix", "⭐feat"], &["🎨ui"]);
    config.custom_prompt = Some("Mention the ticket number.".to_string());
    config.questions.confirm_before_commit = true;
    config.set_temp_instructions(Some("never saved".to_string()));
    config.save_to(&path)?;

    let text = fs::read_to_string(&path)?;
    assert!(text.starts_with("# commit-commander configuration"));
    assert!(!text.contains("never saved"));

    let loaded = Config::load_from(&path)?;
    assert_eq!(loaded.commit_types, vec!["🐛fix", "⭐feat"]);
    assert_eq!(loaded.scope_types, vec!["🎨ui"]);
    assert_eq!(loaded.custom_prompt.as_deref(), Some("Mention the ticket number."));
    assert!(!loaded.questions.ask_for_details);
    assert!(loaded.questions.confirm_before_commit);
    assert_eq!(loaded.temp_instructions, None);
    Ok(())
}

#[test]
fn test_load_fills_defaults_for_sparse_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        "commit_types = []\n\n[questions]\ndetails_prompt = \"none\"\n",
    )?;

    let loaded = Config::load_from(&path)?;
    assert_eq!(loaded.commit_types.len(), 15);
    assert_eq!(loaded.scope_types.len(), 3);
    assert_eq!(loaded.questions.details_prompt, DEFAULT_DETAILS_PROMPT);
    assert!(loaded.questions.ask_for_details);
    assert!(loaded.questions.confirm_before_commit);
    Ok(())
}
