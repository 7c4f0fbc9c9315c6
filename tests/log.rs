use crate::common::INITIAL_COMMIT;
use crate::common::command::{
    AUTHOR_EMAIL, AUTHOR_NAME, get_head_commit_sha, init_repository_dir, repository_dir,
    run_twig_command, twig_commit,
};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

const FIXTURE_DATE: &str = "Sun Jan 1 12:00:00 2023 +0000";

fn medium_entry(oid: &str, decoration: &str, message: &str) -> String {
    format!(
        "commit {oid}{decoration}\nAuthor: {AUTHOR_NAME} <{AUTHOR_EMAIL}>\nDate:   {FIXTURE_DATE}\n\n    {message}\n\n"
    )
}

#[rstest]
fn show_log_from_first_commit(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(medium_entry(INITIAL_COMMIT, " (HEAD -> main)", "Initial commit"));

    Ok(())
}

#[rstest]
fn show_linear_history_newest_first(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut commits = vec![INITIAL_COMMIT.to_string()];
    for message in ["Second commit", "Third commit"] {
        write_generated_files(init_repository_dir.path(), 1);
        run_twig_command(init_repository_dir.path(), &["add", "."])
            .assert()
            .success();
        twig_commit(init_repository_dir.path(), message)
            .assert()
            .success();
        commits.push(get_head_commit_sha(init_repository_dir.path())?);
    }

    let output = run_twig_command(init_repository_dir.path(), &["log"]).output()?;
    assert!(output.status.success());

    let expected = [
        medium_entry(&commits[2], " (HEAD -> main)", "Third commit"),
        medium_entry(&commits[1], "", "Second commit"),
        medium_entry(&commits[0], "", "Initial commit"),
    ]
    .concat();
    assert_eq!(String::from_utf8(output.stdout)?, expected);

    Ok(())
}

#[rstest]
fn multi_line_messages_are_indented(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_generated_files(init_repository_dir.path(), 1);
    run_twig_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();
    twig_commit(init_repository_dir.path(), "Subject\n\nBody line")
        .assert()
        .success();

    run_twig_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n    Subject\n    \n    Body line\n\n"));

    Ok(())
}

#[rstest]
fn show_log_with_no_commits(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["log"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains(
            "your current branch 'main' does not have any commits yet",
        ));

    Ok(())
}

#[rstest]
fn show_log_on_a_detached_head(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(
        init_repository_dir.path().join(".twig").join("HEAD"),
        format!("{INITIAL_COMMIT}\n"),
    )?;

    run_twig_command(init_repository_dir.path(), &["log"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("HEAD does not point at a branch"));

    Ok(())
}
