// Commit synthesis integration tests
// Drives the retry, repair and precondition paths through the public API

mod helpers;

use helpers::{FakeGit, ScriptedLLM, create_test_repo, git, stage_file};
use shellmind::commit::{CommitError, CommitSynthesizer, GitContext, repair, validate};
use shellmind::error::AppError;
use shellmind::git::{GitCollaborator, Repository};
use shellmind::llm::LLMError;

fn context() -> GitContext {
    GitContext::gather(&FakeGit::staged()).unwrap()
}

#[tokio::test]
async fn test_valid_on_third_attempt() {
    let llm = ScriptedLLM::replies(&["Added login", "login: stuff", "feat(auth): add login"]);
    let outcome = CommitSynthesizer::new(&llm).synthesize(&context()).await.unwrap();

    assert_eq!(outcome.message, "feat(auth): Add login");
    assert_eq!(llm.calls(), 3);
    assert!(!outcome.repaired);

    let verdicts: Vec<bool> = outcome.attempts.iter().map(|a| a.valid).collect();
    assert_eq!(verdicts, vec![false, false, true]);
    let numbers: Vec<usize> = outcome.attempts.iter().map(|a| a.attempt).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_terminal_failure_carries_last_candidate() {
    let llm = ScriptedLLM::replies(&["feat:", "", "docs:"]);
    let result = CommitSynthesizer::new(&llm).synthesize(&context()).await;

    assert_eq!(llm.calls(), 3);
    let err = result.unwrap_err();
    assert!(matches!(err, CommitError::Invalid { attempts: 3, .. }));
    assert!(err.to_string().contains("docs:"));
}

#[tokio::test]
async fn test_repair_rescues_last_candidate() {
    let llm = ScriptedLLM::replies(&["nope", "still nope", "```\nadded login flag\n```"]);
    let outcome = CommitSynthesizer::new(&llm).synthesize(&context()).await.unwrap();

    assert!(outcome.repaired);
    assert_eq!(outcome.message, "fix: Added login flag");
    assert!(validate(&outcome.message).valid);
}

#[tokio::test]
async fn test_prompts_escalate() {
    let llm = ScriptedLLM::replies(&["bad one", "bad two", "fix: Something"]);
    CommitSynthesizer::new(&llm).synthesize(&context()).await.unwrap();

    let prompts = llm.prompts();
    assert!(prompts[0].contains("Branch: feature/login"));
    assert!(prompts[0].contains("M\tsrc/login.rs"));
    assert!(prompts[1].contains("bad one"));
    assert!(prompts[2].contains("bad two"));
    for prompt in &prompts {
        assert!(prompt.contains("+pub fn login() {}"));
    }
}

#[tokio::test]
async fn test_backend_failure_is_distinct_and_not_retried() {
    let llm = ScriptedLLM::new(vec![Err(LLMError::ApiError("API returned status 502".to_string()))]);
    let err = CommitSynthesizer::new(&llm).synthesize(&context()).await.unwrap_err();

    assert_eq!(llm.calls(), 1);
    assert!(matches!(err, CommitError::Backend(_)));
    assert!(matches!(AppError::from(err), AppError::Commit(CommitError::Backend(_))));
}

#[tokio::test]
async fn test_body_normalized_in_result() {
    let long_line = "y".repeat(90);
    let response = format!("feat: add login\n\n\nAllows   sign in\n\n{}", long_line);
    let llm = ScriptedLLM::replies(&[response.as_str()]);

    let outcome = CommitSynthesizer::new(&llm).synthesize(&context()).await.unwrap();
    let lines: Vec<&str> = outcome.message.lines().collect();

    assert_eq!(lines[0], "feat: Add login");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "Allows   sign in");
    assert_eq!(lines[3].chars().count(), 72);
    assert!(lines[3].ends_with("..."));
}

#[test]
fn test_preconditions_are_distinct() {
    assert!(matches!(
        GitContext::gather(&FakeGit::not_a_repo()),
        Err(CommitError::NotARepository)
    ));
    assert!(matches!(
        GitContext::gather(&FakeGit::nothing_staged()),
        Err(CommitError::NoStagedChanges)
    ));

    let mut whitespace_diff = FakeGit::staged();
    whitespace_diff.diff = "\n".to_string();
    assert!(matches!(
        GitContext::gather(&whitespace_diff),
        Err(CommitError::EmptyDiff)
    ));
}

#[test]
fn test_branch_failure_not_fatal() {
    let mut detached = FakeGit::staged();
    detached.branch = None;
    assert_eq!(GitContext::gather(&detached).unwrap().branch, "unknown");
}

#[test]
fn test_repair_scenarios() {
    let repaired = repair("added login flag");
    assert_eq!(repaired, "fix: Added login flag");
    assert!(validate(&repaired).valid);

    assert!(validate("feat(cli): Add login flag").valid);
    assert!(!validate("added login flag").valid);
}

#[tokio::test]
async fn test_against_real_repository() {
    let (_temp, repo_path) = create_test_repo();
    stage_file(&repo_path, "login.rs", "pub fn login() {}\n");
    let repo = Repository::new(&repo_path);

    let context = GitContext::gather(&repo).unwrap();
    assert_eq!(context.branch, "main");
    assert_eq!(context.name_status, "A\tlogin.rs\n");
    assert!(context.diff.contains("+pub fn login() {}"));

    let llm = ScriptedLLM::replies(&["feat: add login"]);
    let outcome = CommitSynthesizer::new(&llm).synthesize(&context).await.unwrap();
    repo.commit(&outcome.message).unwrap();

    assert_eq!(git(&repo_path, &["log", "-1", "--format=%s"]).trim(), "feat: Add login");
    assert!(matches!(GitContext::gather(&repo), Err(CommitError::NoStagedChanges)));
}

#[test]
fn test_real_directory_outside_repository() {
    let temp = tempfile::TempDir::new().unwrap();
    let repo = Repository::new(temp.path());
    assert!(!repo.is_repo());
    assert!(matches!(GitContext::gather(&repo), Err(CommitError::NotARepository)));
}
