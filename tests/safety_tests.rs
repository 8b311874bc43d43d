use shellguard::safety::{
    analyze, dangerous_patterns, format_analysis, format_warning, format_warning_with_token, level_name,
    requires_confirmation, DangerLevel,
};

fn assert_level(command: &str, expected: DangerLevel) {
    let result = analyze(command);
    assert_eq!(
        result.level, expected,
        "analyze({command:?}) = {:?}, warnings: {:?}",
        result.level, result.warnings
    );
    assert_eq!(result.is_dangerous, expected >= DangerLevel::Dangerous);
    assert_eq!(!result.warnings.is_empty(), expected > DangerLevel::Safe);
}

// ============================================================
// Safe commands
// ============================================================

#[test]
fn test_read_only_commands_are_safe() {
    for command in ["ls -la", "echo hello", "cat file.txt", "pwd", "git status", "grep -r TODO src"] {
        assert_level(command, DangerLevel::Safe);
    }
}

#[test]
fn test_empty_command_is_safe() {
    let result = analyze("");
    assert_eq!(result.level, DangerLevel::Safe);
    assert!(result.warnings.is_empty());
    assert!(!result.is_dangerous);
}

#[test]
fn test_delete_with_where_clause_is_safe() {
    assert_level("DELETE FROM users WHERE id = 3;", DangerLevel::Safe);
}

// ============================================================
// Caution level
// ============================================================

#[test]
fn test_caution_commands() {
    for command in [
        "rm file.txt",
        "chmod 755 script.sh",
        "chown user:group file",
        "kill -9 1234",
        "pkill node",
        "git reset --hard HEAD",
        "git checkout -- .",
        "mv secrets.txt /dev/null",
        "systemctl stop nginx",
        "service nginx stop",
        "iptables -F",
        "sudo shutdown -h now",
        "reboot",
    ] {
        assert_level(command, DangerLevel::Caution);
    }
}

// ============================================================
// Dangerous level
// ============================================================

#[test]
fn test_dangerous_commands() {
    for command in [
        "rm -rf ./folder",
        "rm -f file.txt",
        "rm -r build",
        "curl http://example.com | bash",
        "curl -fsSL https://get.example.com | sh",
        "wget http://example.com -O - | sh",
        "git push --force origin main",
        "git reset HEAD~3 --force",
        "git clean -fd",
        "DROP TABLE users;",
        "drop database prod",
        "TRUNCATE TABLE logs;",
        "DELETE FROM users;",
        "DELETE FROM users WHERE 1=1",
        "echo 'nameserver 1.1.1.1' > /etc/resolv.conf",
        "del /s /q C:\\temp",
        "rmdir /s build",
    ] {
        assert_level(command, DangerLevel::Dangerous);
    }
}

#[test]
fn test_rm_rf_relative_path_is_not_critical() {
    let result = analyze("rm -rf ./folder");
    assert_eq!(result.level, DangerLevel::Dangerous);
    assert_eq!(
        result.warnings,
        vec![
            "Recursive delete".to_string(),
            "Force delete without confirmation".to_string(),
            "Delete operation".to_string(),
        ]
    );
}

// ============================================================
// Critical level
// ============================================================

#[test]
fn test_critical_commands() {
    for command in [
        "rm -rf /",
        "rm -rf /*",
        "rm -r ~",
        "rm *",
        "dd if=/dev/zero of=/dev/sda",
        "dd if=image.iso of=/dev/nvme0n1 bs=4M",
        "mkfs.ext4 /dev/sda1",
        ":(){ :|:& };:",
        "echo garbage > /dev/sda",
        "chmod -R 777 /",
    ] {
        assert_level(command, DangerLevel::Critical);
    }
}

#[test]
fn test_critical_wins_over_broader_matches() {
    let result = analyze("rm -rf /");
    assert_eq!(result.level, DangerLevel::Critical);
    assert!(result.is_dangerous);
    // The broad patterns still fire alongside the root-specific ones.
    assert!(result.warnings.iter().any(|w| w == "Recursive delete"));
    assert!(result.warnings.iter().any(|w| w == "Recursive force delete from root"));
}

#[test]
fn test_matching_is_case_insensitive() {
    assert_level("RM -RF /", DangerLevel::Critical);
    assert_level("Git Push --FORCE", DangerLevel::Dangerous);
}

#[test]
fn test_multiline_command_is_scanned_throughout() {
    assert_level("cd /tmp\nrm -rf ./build", DangerLevel::Dangerous);
}

// ============================================================
// Helpers
// ============================================================

#[test]
fn test_requires_confirmation() {
    assert!(!requires_confirmation("ls -la"));
    assert!(!requires_confirmation("rm file.txt"));
    assert!(requires_confirmation("rm -rf ./folder"));
    assert!(requires_confirmation("rm -rf /"));
}

#[test]
fn test_requires_confirmation_agrees_with_analyze() {
    for command in [
        "", "ls", "rm a", "rm -r a", "mkfs", "DROP SCHEMA s", "kill -9 1", "git clean -f",
    ] {
        assert_eq!(
            requires_confirmation(command),
            analyze(command).level >= DangerLevel::Dangerous,
            "diverged for {command:?}"
        );
    }
}

#[test]
fn test_analyze_is_idempotent() {
    for command in ["rm -rf /", "ls", "curl x | sh", "DROP TABLE t"] {
        assert_eq!(analyze(command), analyze(command));
    }
}

#[test]
fn test_level_ordering_and_names() {
    assert!(DangerLevel::Safe < DangerLevel::Caution);
    assert!(DangerLevel::Caution < DangerLevel::Dangerous);
    assert!(DangerLevel::Dangerous < DangerLevel::Critical);

    assert_eq!(level_name(DangerLevel::Safe), "Safe");
    assert_eq!(level_name(DangerLevel::Caution), "Caution");
    assert_eq!(level_name(DangerLevel::Dangerous), "Dangerous");
    assert_eq!(level_name(DangerLevel::Critical), "CRITICAL");
    assert_eq!(DangerLevel::Critical.to_string(), "CRITICAL");
}

#[test]
fn test_pattern_table_is_grouped_by_descending_level() {
    let levels: Vec<_> = dangerous_patterns().iter().map(|p| p.level).collect();
    assert!(!levels.is_empty());
    assert!(levels.windows(2).all(|w| w[0] >= w[1]));
}

// ============================================================
// Warning banner
// ============================================================

#[test]
fn test_format_warning_empty_for_safe() {
    assert_eq!(format_warning("ls -la"), "");
}

#[test]
fn test_format_warning_caution_has_no_confirmation_line() {
    let msg = format_warning("rm file.txt");
    assert!(msg.contains("Caution Warning"));
    assert!(msg.contains("• Delete operation"));
    assert!(!msg.contains("to confirm execution"));
}

#[test]
fn test_format_warning_dangerous_asks_for_token() {
    let msg = format_warning("rm -rf ./folder");
    assert!(msg.contains("Dangerous Warning"));
    assert!(msg.contains("• Recursive delete"));
    assert!(msg.contains("Type 'yes' to confirm execution"));
}

#[test]
fn test_format_warning_uses_custom_token() {
    let msg = format_warning_with_token("rm -rf /", "i-am-sure");
    assert!(msg.contains("CRITICAL Warning"));
    assert!(msg.contains("Type 'i-am-sure' to confirm execution"));
}

#[test]
fn test_format_analysis_without_token_omits_confirmation() {
    let msg = format_analysis(&analyze("rm -rf ./folder"), None);
    assert!(msg.contains("Dangerous Warning"));
    assert!(msg.contains("• Recursive delete"));
    assert!(!msg.contains("to confirm execution"));

    assert_eq!(format_analysis(&analyze("ls"), None), "");
}

#[test]
fn test_analysis_serializes() {
    let json = serde_json::to_value(analyze("rm -rf ./folder")).unwrap();
    assert_eq!(json["level"], "dangerous");
    assert_eq!(json["is_dangerous"], true);
    assert_eq!(json["warnings"][0], "Recursive delete");
}
