//! CLI output and the core Display implementations must agree, since the MCP
//! server renders the same types.

use std::process::Command;

use quill_core::{
    display::{Envelopes, Tools},
    params::{ListEnvelopes, ListTools, ToolId},
    StudioBuilder,
};
use tempfile::TempDir;

fn run_cli_command(db_path: &str, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_quill"));
    cmd.arg("--no-color").arg("--database-file").arg(db_path);
    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_tool_list_matches_display() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    run_cli_command(db_str, &["tool", "favorite", "rotate"]);
    let cli_output = run_cli_command(db_str, &["tool", "list"]);

    let studio = StudioBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create studio");
    let tools = studio
        .list_tools(&ListTools::default())
        .await
        .expect("Failed to list tools");
    assert!(tools[0].favorite);
    assert_eq!(tools[0].id, "rotate");

    let direct_output = format!("# Tools\n\n{}", Tools(tools));
    assert_eq!(cli_output, direct_output);
}

#[tokio::test]
async fn test_tool_show_matches_display() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    let cli_output = run_cli_command(db_str, &["tool", "show", "watermark"]);

    let studio = StudioBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create studio");
    let tool = studio
        .get_tool(&ToolId {
            tool_id: "watermark".to_string(),
        })
        .await
        .expect("Failed to load tool")
        .expect("Tool missing");

    assert_eq!(cli_output, tool.to_string());
}

#[tokio::test]
async fn test_empty_envelope_list_matches_display() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    let cli_output = run_cli_command(db_str, &["envelope", "list"]);

    let studio = StudioBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create studio");
    let envelopes = studio
        .list_envelopes(&ListEnvelopes::default())
        .await
        .expect("Failed to list envelopes");

    assert_eq!(cli_output, format!("# Envelopes\n\n{}", Envelopes(envelopes)));
    assert!(cli_output.contains("No envelopes found."));
}
