use crate::support::{org, write_records};
use tempfile::TempDir;
use treetable::config::TableConfig;
use treetable::tooling::cli::{CliContext, Commands};
use treetable::tree::index::ActiveFilter;

fn context(temp_dir: &TempDir) -> CliContext {
    let mut config = TableConfig::default();
    config.data = Some(write_records(temp_dir.path(), &org()));
    config.navigation.state_file = Some(temp_dir.path().join("navigation.json"));
    CliContext::from_config(config, false).unwrap()
}

#[test]
fn one_shot_commands_share_history() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir);

    let output = cli
        .execute(&Commands::Sort {
            key: Some("balance".into()),
            asc: false,
            desc: false,
        })
        .unwrap();
    assert!(output.contains("Balance ▲"));
    assert!(output.ends_with("URL: ?sort=balance&dir=asc"));

    cli.execute(&Commands::Page { page: 2 }).unwrap();
    assert_eq!(
        cli.execute(&Commands::Url).unwrap(),
        "URL: ?page=2&sort=balance&dir=asc"
    );

    cli.execute(&Commands::Back).unwrap();
    assert_eq!(cli.execute(&Commands::Url).unwrap(), "URL: ?sort=balance&dir=asc");

    cli.execute(&Commands::Forward).unwrap();
    cli.execute(&Commands::Filter {
        value: ActiveFilter::Active,
    })
    .unwrap();
    assert_eq!(
        cli.execute(&Commands::Url).unwrap(),
        "URL: ?sort=balance&dir=asc&active=true"
    );
}

#[test]
fn repeated_sort_flips_direction() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir);
    let sort = Commands::Sort {
        key: Some("name".into()),
        asc: false,
        desc: false,
    };
    cli.execute(&sort).unwrap();
    cli.execute(&sort).unwrap();
    assert_eq!(cli.execute(&Commands::Url).unwrap(), "URL: ?sort=name&dir=desc");
}

#[test]
fn render_json_reports_view() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir);
    let output = cli
        .execute(&Commands::Render {
            query: "page=2".into(),
            expand: vec![],
            format: "json".into(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["query"], "page=2");
    assert_eq!(parsed["view"]["pagination"]["currentPage"], 2);
    let rows = parsed["view"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["id"], 6);
    assert_eq!(rows[0]["level"], 0);
    assert!(rows[0].get("hasChildren").is_some());
}

#[test]
fn render_with_expansion_shows_children() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir);
    let output = cli
        .execute(&Commands::Render {
            query: String::new(),
            expand: vec![1],
            format: "text".into(),
        })
        .unwrap();
    assert!(output.contains("▼ 1"));
    assert!(output.contains("Child A"));
    assert!(output.contains("Page 1 of 3"));
}

#[test]
fn unknown_format_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir);
    let result = cli.execute(&Commands::Render {
        query: String::new(),
        expand: vec![],
        format: "xml".into(),
    });
    assert!(result.is_err());
}

#[test]
fn missing_data_file_is_a_config_error() {
    let cli = CliContext::from_config(TableConfig::default(), false).unwrap();
    let result = cli.execute(&Commands::Render {
        query: String::new(),
        expand: vec![],
        format: "text".into(),
    });
    assert!(matches!(result, Err(treetable::ApiError::ConfigError(_))));
}

#[test]
fn shell_session_applies_commands_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let cli = context(&temp_dir);
    let input = "sort name\nsort name\ntoggle 1\nbogus\nnext\nback\nurl\nquit\npage 3\n";
    let mut output = Vec::new();
    cli.run_shell("", input.as_bytes(), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Error: Invalid command: bogus"));
    assert!(text.contains("URL: ?sort=name&dir=desc"));
    assert!(!text.contains("Page 3 of 3"));
}
