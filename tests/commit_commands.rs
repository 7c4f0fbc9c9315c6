use crate::common::command::{
    get_head_commit_sha, get_parent_commit_id, init_repository_dir, repository_dir,
    run_twig_command, twig_commit, write_nested_project,
};
use crate::common::{INITIAL_COMMIT, ROOT_TREE};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::internet::en::FreeEmail;
use fake::faker::lorem::en::Words;
use fake::faker::name::en::Name;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn write_commit_object_successfully_for_nested_project(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_nested_project(repository_dir.path());
    run_twig_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    twig_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[main \(root-commit\) [0-9a-f]{7}\] Initial commit\n$",
        )?)
        .stdout(predicate::str::contains(&INITIAL_COMMIT[..7]));

    let ref_content = std::fs::read_to_string(repository_dir.child(".twig/refs/heads/main").path())?;
    assert_eq!(ref_content, format!("{INITIAL_COMMIT}\n"));

    run_twig_command(repository_dir.path(), &["cat-file", "-p", INITIAL_COMMIT])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("tree {ROOT_TREE}\n")));

    Ok(())
}

#[rstest]
fn second_commit_points_at_the_first(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("4.txt").write_str("four")?;
    run_twig_command(init_repository_dir.path(), &["add", "4.txt"])
        .assert()
        .success();

    twig_commit(init_repository_dir.path(), "Second commit")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[main [0-9a-f]{7}\] Second commit\n$",
        )?);

    let head = get_head_commit_sha(init_repository_dir.path())?;
    assert_ne!(head, INITIAL_COMMIT);
    assert_eq!(
        get_parent_commit_id(init_repository_dir.path(), &head)?,
        INITIAL_COMMIT
    );

    Ok(())
}

#[rstest]
fn commit_uses_author_from_environment(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("notes.txt").write_str("notes")?;
    run_twig_command(repository_dir.path(), &["add", "notes.txt"])
        .assert()
        .success();

    let author_name = Name().fake::<String>().replace(' ', "_");
    let author_email = FreeEmail().fake::<String>();
    let message = Words(3..6).fake::<Vec<String>>().join(" ");

    run_twig_command(repository_dir.path(), &["commit", "-m", &message])
        .envs(vec![
            ("GIT_AUTHOR_NAME", author_name.as_str()),
            ("GIT_AUTHOR_EMAIL", author_email.as_str()),
        ])
        .assert()
        .success();

    let head = get_head_commit_sha(repository_dir.path())?;
    run_twig_command(repository_dir.path(), &["cat-file", "-p", &head])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "author {author_name} <{author_email}> "
        )))
        .stdout(predicate::str::contains(format!(
            "committer {author_name} <{author_email}> "
        )))
        .stdout(predicate::str::ends_with(format!("\n\n{message}\n")));

    Ok(())
}

#[rstest]
fn multi_line_message_is_summarized_by_its_first_line(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("4.txt").write_str("four")?;
    run_twig_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();

    twig_commit(init_repository_dir.path(), "Add four\n\nWith a longer body")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[main [0-9a-f]{7}\] Add four\n$")?);

    Ok(())
}

#[rstest]
fn commit_without_staged_files_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    twig_commit(repository_dir.path(), "Nothing here")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing staged to commit"));

    assert!(!repository_dir.child(".twig/refs/heads/main").path().exists());

    Ok(())
}

#[rstest]
fn commit_on_a_detached_head_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(
        init_repository_dir.child(".twig/HEAD").path(),
        format!("{INITIAL_COMMIT}\n"),
    )?;

    twig_commit(init_repository_dir.path(), "Detached")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HEAD does not point at a branch"));

    Ok(())
}
