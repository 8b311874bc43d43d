use shellguard::undo::{format_suggestion, suggest_undo, undo_patterns, UndoSuggestion};

fn assert_undo(command: &str, expected: &str) {
    let result = suggest_undo(command);
    assert!(result.can_undo, "{command:?} should be undoable");
    assert_eq!(result.undo_command, expected, "undo for {command:?}");
    assert_eq!(result.original, command.trim());
}

// ============================================================
// Version control
// ============================================================

#[test]
fn test_git_undos() {
    assert_undo("git commit -m 'message'", "git reset HEAD~1");
    assert_undo("git add file.txt", "git reset file.txt");
    assert_undo("git add .", "git reset .");
    assert_undo("git add src/a.rs src/b.rs", "git reset src/a.rs src/b.rs");
    assert_undo("git stash", "git stash pop");
    assert_undo("git stash push", "git stash pop");
    assert_undo("git checkout -b feature", "git checkout - && git branch -d feature");
    assert_undo("git merge main", "git reset --hard HEAD~1");
}

#[test]
fn test_git_merge_undo_warns_it_is_destructive() {
    let result = suggest_undo("git merge feature/login");
    assert!(result.description.contains("discards changes"));
}

// ============================================================
// File operations
// ============================================================

#[test]
fn test_file_undos() {
    assert_undo("mv old.txt new.txt", "mv new.txt old.txt");
    assert_undo("cp src.txt dest.txt", "rm dest.txt");
    assert_undo("mkdir newdir", "rmdir newdir");
    assert_undo("mkdir -p path/to/dir", "rmdir path/to/dir");
    assert_undo("touch newfile.txt", "rm newfile.txt");
    assert_undo("ln -s target link", "rm link");
    assert_undo("ln target link", "rm link");
}

#[test]
fn test_cp_recursive_propagates_to_rm() {
    let result = suggest_undo("cp -r source/ destination/");
    assert!(result.can_undo);
    assert_eq!(result.undo_command, "rm -r destination/");

    let result = suggest_undo("cp source.txt destination.txt");
    assert!(result.can_undo);
    assert!(!result.undo_command.contains("rm -r"));
}

#[test]
fn test_mv_with_extra_arguments_is_not_undoable() {
    assert!(!suggest_undo("mv a b c/").can_undo);
}

// ============================================================
// Package managers
// ============================================================

#[test]
fn test_package_manager_undos() {
    assert_undo("apt install nginx", "apt remove nginx");
    assert_undo("apt-get install nginx", "apt-get remove nginx");
    assert_undo("brew install wget", "brew uninstall wget");
    assert_undo("npm install express", "npm uninstall express");
    assert_undo("npm install -g typescript", "npm uninstall -g typescript");
    assert_undo("npm install @angular/cli", "npm uninstall @angular/cli");
    assert_undo("pip install requests", "pip uninstall requests");
}

#[test]
fn test_npm_global_flag_has_no_double_space() {
    let result = suggest_undo("npm install -g typescript");
    assert!(result.can_undo);
    assert!(result.undo_command.contains("-g"));
    assert!(result.undo_command.contains("typescript"));
    assert!(!result.undo_command.contains("  "));
}

// ============================================================
// Services and containers
// ============================================================

#[test]
fn test_service_undos() {
    assert_undo("systemctl start nginx", "systemctl stop nginx");
    assert_undo("systemctl stop nginx", "systemctl start nginx");
    assert_undo("systemctl enable nginx", "systemctl disable nginx");
}

#[test]
fn test_container_undos() {
    assert_undo(
        "docker run --name mycontainer nginx",
        "docker stop mycontainer && docker rm mycontainer",
    );
    assert_undo(
        "docker run -d -p 80:80 --name web nginx:latest",
        "docker stop web && docker rm web",
    );
    assert_undo("docker start mycontainer", "docker stop mycontainer");
}

// ============================================================
// No undo available
// ============================================================

#[test]
fn test_read_only_commands_have_no_undo() {
    for command in ["ls -la", "cat file.txt", "echo hello", "", "docker run nginx"] {
        let result = suggest_undo(command);
        assert!(!result.can_undo, "{command:?} should not be undoable");
        assert!(result.undo_command.is_empty());
        assert_eq!(result.description, "No automatic undo available for this command");
    }
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    let result = suggest_undo("   git add file.txt \n");
    assert!(result.can_undo);
    assert_eq!(result.original, "git add file.txt");
    assert_eq!(result.undo_command, "git reset file.txt");
}

#[test]
fn test_suggest_undo_is_idempotent() {
    for command in ["git commit -m x", "ls", "cp -r a b"] {
        assert_eq!(suggest_undo(command), suggest_undo(command));
    }
}

#[test]
fn test_first_matching_rule_wins() {
    let first = undo_patterns()
        .iter()
        .position(|p| p.pattern.is_match("git commit -m x"));
    assert_eq!(first, Some(0));
    assert_eq!(suggest_undo("git commit -m x").undo_command, "git reset HEAD~1");
}

// ============================================================
// Formatting
// ============================================================

#[test]
fn test_format_suggestion_with_undo() {
    let suggestion = UndoSuggestion {
        original: "git commit -m 'test'".into(),
        undo_command: "git reset HEAD~1".into(),
        description: "Undo the last commit".into(),
        can_undo: true,
    };
    let text = format_suggestion(&suggestion);
    assert!(text.contains("To undo: "));
    assert!(text.contains("git reset HEAD~1"));
    assert!(text.contains("(Undo the last commit)"));
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn test_format_suggestion_without_undo() {
    let suggestion = suggest_undo("ls -la");
    assert_eq!(format_suggestion(&suggestion), "");
}
