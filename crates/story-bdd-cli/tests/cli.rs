//! Behaviour of the `story-bdd` binary.
#![expect(clippy::expect_used, reason = "tests require descriptive failures")]

use std::fs;
use std::path::Path;
use std::str;

use assert_cmd::Command;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const CART_STORY: &str = "Como cliente\n\
Quero adicionar produtos ao carrinho\n\
Para finalizar a compra\n\
\n\
[SUCCESS]@carrinho\n\
Dado que estou na loja\n\
Quando adiciono <quantidade> produtos\n\
Então vejo <quantidade> itens\n\
[EXEMPLOS]\n\
| quantidade |\n\
| 1 |\n\
| 3 |\n";

const RULE_STORY: &str = "# language: en\n\
As an auditor\n\
I want deletions to be restricted\n\
So that data is safe\n\
[RULE]\n\
Only admins may delete records\n";

const BROKEN_STORY: &str = "Como gerente\n[SUCCESS]\n";

#[fixture]
fn workspace() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

fn write(dir: &Path, name: &str, text: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, text).expect("write input");
    path.to_str().expect("utf8 path").to_string()
}

fn story_bdd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("story-bdd").expect("binary exists");
    cmd.current_dir(dir)
        .env_remove("STORY_BDD_LOG_LEVEL")
        .env_remove("STORY_BDD_LANG")
        .env_remove("STORY_BDD_FILE_NAME_WORDS")
        .env_remove("STORY_BDD_OUTPUT_DIR");
    cmd
}

fn stdout_of(output: &std::process::Output) -> &str {
    str::from_utf8(&output.stdout).expect("utf8 stdout")
}

#[rstest]
fn generate_writes_feature_and_steps(workspace: TempDir) {
    let dir = workspace.path();
    let story = write(dir, "cart.txt", CART_STORY);
    let output = story_bdd(dir)
        .args(["generate", &story])
        .output()
        .expect("runs");
    assert!(output.status.success());

    let feature = fs::read_to_string(dir.join("features/quero_adicionar_produtos_ao_carrinho.feature"))
        .expect("feature written");
    assert!(feature.starts_with("# language: pt\nFuncionalidade: adicionar produtos ao carrinho\n"));
    assert!(feature.contains("  @success @carrinho\n  Esquema do Cenário: Exemplo 1\n"));
    assert!(feature.contains("      | quantidade |\n      | 1 |\n      | 3 |\n"));

    let steps = fs::read_to_string(
        dir.join("features/steps/quero_adicionar_produtos_ao_carrinho_steps.rb"),
    )
    .expect("steps written");
    assert!(steps.contains("Quando(\"adiciono {int} produtos\") do |arg1|\n"));
    assert!(steps.contains("Então(\"vejo {int} itens\") do |arg1|\n"));

    assert!(stdout_of(&output).ends_with("1 stories: 1 features, 1 step files, 0 skipped\n"));
}

#[rstest]
fn invalid_stories_are_skipped_and_the_run_continues(workspace: TempDir) {
    let dir = workspace.path();
    let broken = write(dir, "broken.txt", BROKEN_STORY);
    let rule = write(dir, "rule.txt", RULE_STORY);
    let output = story_bdd(dir)
        .args(["generate", "--output", "out", &broken, &rule])
        .output()
        .expect("runs");
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("skipped "));
    assert!(stdout.contains("  - incomplete header: missing i_want, so_that\n"));
    assert!(stdout.contains("  - group 1 of type SUCCESS is empty\n"));
    assert!(stdout.contains("rule.txt: no steps produced\n"));
    assert!(stdout.ends_with("2 stories: 1 features, 0 step files, 1 skipped\n"));

    assert!(dir.join("out/i_want_deletions_to_be.feature").is_file());
    assert!(!dir.join("out/steps/i_want_deletions_to_be_steps.rb").exists());
}

#[rstest]
fn dry_run_writes_nothing(workspace: TempDir) {
    let dir = workspace.path();
    let story = write(dir, "cart.txt", CART_STORY);
    let output = story_bdd(dir)
        .args(["generate", "--dry-run", &story])
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Funcionalidade: adicionar produtos ao carrinho"));
    assert!(!dir.join("features").exists());
}

#[rstest]
#[case::by_flag(&["--file-name-words", "2"], &[])]
#[case::by_env(&[], &[("STORY_BDD_FILE_NAME_WORDS", "2")])]
fn file_name_word_count_is_configurable(
    workspace: TempDir,
    #[case] flags: &[&str],
    #[case] env: &[(&str, &str)],
) {
    let dir = workspace.path();
    let story = write(dir, "cart.txt", CART_STORY);
    let mut cmd = story_bdd(dir);
    cmd.arg("generate").args(flags).arg(&story);
    for (key, value) in env {
        cmd.env(key, value);
    }
    let output = cmd.output().expect("runs");
    assert!(output.status.success());
    assert!(dir.join("features/quero_adicionar.feature").is_file());
}

#[rstest]
fn language_flag_sets_default_language(workspace: TempDir) {
    let dir = workspace.path();
    let story = write(
        dir,
        "en.txt",
        "As a user\nI want to log in\nSo that I work\n[SUCCESS]\nGiven I am registered\n",
    );
    let output = story_bdd(dir)
        .args(["generate", "--dry-run", "--lang", "en", &story])
        .output()
        .expect("runs");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("# language: en\nFeature: log in\n"));
}

#[rstest]
fn check_reports_json_and_fails_on_invalid_story(workspace: TempDir) {
    let dir = workspace.path();
    let good = write(dir, "cart.txt", CART_STORY);
    let bad = write(dir, "broken.txt", BROKEN_STORY);
    let output = story_bdd(dir)
        .args(["check", "--json", &good, &bad])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(reports[0]["valid"], true);
    assert_eq!(reports[1]["file"], bad.as_str());
    assert_eq!(reports[1]["valid"], false);
    assert_eq!(
        reports[1]["errors"],
        serde_json::json!([
            "incomplete header: missing i_want, so_that",
            "group 1 of type SUCCESS is empty"
        ])
    );
}

#[rstest]
fn check_succeeds_for_valid_stories(workspace: TempDir) {
    let dir = workspace.path();
    let good = write(dir, "cart.txt", CART_STORY);
    let output = story_bdd(dir).args(["check", &good]).output().expect("runs");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), format!("ok {good}\n"));
}

#[rstest]
fn steps_reads_an_existing_feature(workspace: TempDir) {
    let dir = workspace.path();
    let feature = write(
        dir,
        "orders.feature",
        "# language: en\n\
         Feature: orders\n\
         \n  \
           Scenario Outline: Example 1\n    \
             Given <count> orders exist\n    \
             Then I see \"<state>\"\n    \
             Examples:\n      \
               | count | state |\n      \
               | 2 | late |\n",
    );
    let output = story_bdd(dir).args(["steps", &feature]).output().expect("runs");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("# encoding: utf-8\n# Step definitions for orders.feature\n\n"));
    assert!(stdout.contains("Given(\"{int} orders exist\") do |arg1|\n"));
    assert!(stdout.contains("Then(\"I see {string}\") do |arg1|\n"));
}

#[rstest]
fn invalid_configuration_exits_with_status_two(workspace: TempDir) {
    let dir = workspace.path();
    let story = write(dir, "cart.txt", CART_STORY);
    let output = story_bdd(dir)
        .env("STORY_BDD_LOG_LEVEL", "chatty")
        .args(["check", &story])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[rstest]
fn missing_input_is_fatal(workspace: TempDir) {
    let output = story_bdd(workspace.path())
        .args(["check", "does-not-exist.txt"])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
    assert!(str::from_utf8(&output.stderr)
        .expect("utf8 stderr")
        .contains("failed to read does-not-exist.txt"));
}

#[rstest]
fn steps_accepts_keyword_synonyms_rules_and_bullets(workspace: TempDir) {
    let dir = workspace.path();
    let feature = write(
        dir,
        "synonyms.feature",
        "Feature: synonyms\n\
         \n  Example: short form\n    Given I open the app\n\
         \n  Scenario Template: template form\n    When I add <n> items\n    \
         Examples:\n      | n |\n      | 2 |\n\
         \n  Rule: grouped\n    Scenario: in a rule\n      * I do a thing\n",
    );
    let output = story_bdd(dir).args(["steps", &feature]).output().expect("runs");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Given(\"I open the app\") do\n"));
    assert!(stdout.contains("When(\"I add {int} items\") do |arg1|\n"));
    assert!(stdout.contains("Given(\"I do a thing\") do\n"));
    assert!(!stdout.contains("no steps produced"));
}

#[rstest]
fn steps_rejects_documents_that_are_not_gherkin(workspace: TempDir) {
    let dir = workspace.path();
    let feature = write(dir, "broken.feature", "Scenario: no feature line\n  Given x\n");
    let output = story_bdd(dir).args(["steps", &feature]).output().expect("runs");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(str::from_utf8(&output.stderr)
        .expect("utf8 stderr")
        .contains("failed to parse feature file"));
}
