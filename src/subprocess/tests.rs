use super::*;
use std::path::Path;

fn shell(script: &str, stdin: Option<&str>) -> ProcessCommand {
    ProcessCommand {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        working_dir: None,
        stdin: stdin.map(str::to_string),
    }
}

fn mock_manager(mock: &MockProcessRunner) -> SubprocessManager {
    SubprocessManager::new(Arc::new(mock.clone()))
}

#[test]
fn test_init_command_builder() {
    let command = InitCommandBuilder::new("terraform", "-backend-config=name=acme/prod")
        .in_dir(Path::new("/srv/infra"))
        .answer(Some("yes\n"))
        .build();

    assert_eq!(command.program, "terraform");
    assert_eq!(command.args, vec!["init", "-backend-config=name=acme/prod"]);
    assert_eq!(command.working_dir.as_deref(), Some(Path::new("/srv/infra")));
    assert_eq!(command.stdin.as_deref(), Some("yes\n"));
    assert_eq!(
        command.display(),
        "terraform init -backend-config=name=acme/prod"
    );
}

#[test]
fn test_init_command_without_answer_closes_stdin() {
    let command = InitCommandBuilder::new("terraform", "-backend-config=name=a/b").build();
    assert!(command.stdin.is_none());
    assert!(command.working_dir.is_none());
}

#[cfg(unix)]
#[tokio::test]
async fn test_production_runner_captures_output() {
    let output = TokioProcessRunner
        .run(shell("echo initialized; echo warning >&2; exit 2", None))
        .await
        .unwrap();

    assert_eq!(output.status, ExitStatus::Error(2));
    assert_eq!(output.stdout.trim(), "initialized");
    assert_eq!(output.stderr.trim(), "warning");
}

#[tokio::test]
async fn test_production_runner_command_not_found() {
    let command = InitCommandBuilder::new("nonexistent-terraform-12345", "-backend-config=name=a/b")
        .build();

    let result = TokioProcessRunner.run(command).await;
    assert!(matches!(
        result.unwrap_err(),
        ProcessError::CommandNotFound(_)
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_production_runner_answers_prompt_on_stdin() {
    let command = shell(
        "read answer; if [ \"$answer\" = yes ]; then echo migrated; else exit 3; fi",
        Some("yes\n"),
    );

    let output = TokioProcessRunner.run(command).await.unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout.trim(), "migrated");
}

#[cfg(unix)]
#[tokio::test]
async fn test_production_runner_ignores_unread_stdin() {
    let output = TokioProcessRunner
        .run(shell("exit 0", Some("yes\n")))
        .await
        .unwrap();
    assert!(output.status.success());
}

#[cfg(unix)]
#[tokio::test]
async fn test_production_runner_without_answer_does_not_block() {
    let output = TokioProcessRunner.run(shell("cat", None)).await.unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_production_runner_uses_working_dir() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut command = shell("pwd", None);
    command.working_dir = Some(temp.path().to_path_buf());

    let output = TokioProcessRunner.run(command).await.unwrap();
    let reported = std::fs::canonicalize(output.stdout.trim()).unwrap();
    assert_eq!(reported, std::fs::canonicalize(temp.path()).unwrap());
}

#[tokio::test]
async fn test_terraform_runner_init_passes_backend_and_answer() {
    let mock = MockProcessRunner::new();

    let output = mock_manager(&mock)
        .terraform("terraform")
        .init(
            Path::new("/srv/infra"),
            &backend_config_arg("acme", "prod"),
            Some("yes\n"),
        )
        .await
        .unwrap();
    assert!(output.status.success());

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args, vec!["init", "-backend-config=name=acme/prod"]);
    assert_eq!(calls[0].stdin.as_deref(), Some("yes\n"));
    assert_eq!(calls[0].working_dir.as_deref(), Some(Path::new("/srv/infra")));
}

#[tokio::test]
async fn test_mock_fails_only_scripted_backend() {
    let mock = MockProcessRunner::new().fail_backend(
        "-backend-config=name=acme/legacy",
        "Error: backend unreachable",
    );
    let terraform = mock_manager(&mock).terraform("/opt/tf/terraform");

    let failed = terraform
        .init(Path::new("."), "-backend-config=name=acme/legacy", None)
        .await
        .unwrap();
    let passed = terraform
        .init(Path::new("."), "-backend-config=name=acme/new", None)
        .await
        .unwrap();

    assert_eq!(failed.status.code(), Some(1));
    assert_eq!(failed.stderr, "Error: backend unreachable");
    assert!(passed.status.success());
    assert_eq!(mock.calls()[0].program, "/opt/tf/terraform");
    assert_eq!(
        mock.backends(),
        vec![
            "-backend-config=name=acme/legacy",
            "-backend-config=name=acme/new"
        ]
    );
}

#[tokio::test]
async fn test_mock_missing_program() {
    let mock = MockProcessRunner::new().missing_program();

    let err = mock_manager(&mock)
        .terraform("terraform")
        .init(Path::new("."), "-backend-config=name=a/b", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ProcessError::CommandNotFound(ref p) if p == "terraform"));
    assert_eq!(mock.calls().len(), 1);
}

#[test]
fn test_process_error_maps_to_execution_error() {
    use crate::error::{ErrorCode, OpsError};

    let err: OpsError = ProcessError::CommandNotFound("terraform".to_string()).into();
    assert_eq!(err.code(), ErrorCode::EXEC_COMMAND_NOT_FOUND);
    assert_eq!(err.exit_code(), 5);
    assert!(err.user_message().contains("'terraform'"));

    let err: OpsError = ProcessError::Stdin {
        command: "terraform init".to_string(),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    }
    .into();
    assert_eq!(err.code(), ErrorCode::EXEC_STDIN_ERROR);
}
