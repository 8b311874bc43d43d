use regex::Captures;

/// An undo rule before compilation: pattern source, inverse builder, description.
pub(crate) type UndoRule = (&'static str, fn(&Captures) -> String, &'static str);

/// Capture group `i`, or the empty string when the group did not participate.
fn group<'h>(caps: &Captures<'h>, i: usize) -> &'h str {
    caps.get(i).map_or("", |m| m.as_str())
}

fn git_commit(_: &Captures) -> String {
    "git reset HEAD~1".to_string()
}

fn git_add(caps: &Captures) -> String {
    format!("git reset {}", group(caps, 1))
}

fn git_stash(_: &Captures) -> String {
    "git stash pop".to_string()
}

fn git_checkout_branch(caps: &Captures) -> String {
    format!("git checkout - && git branch -d {}", group(caps, 1))
}

fn git_merge(_: &Captures) -> String {
    "git reset --hard HEAD~1".to_string()
}

fn mv(caps: &Captures) -> String {
    format!("mv {} {}", group(caps, 2), group(caps, 1))
}

/// `cp -r`/`-R`/`-a` copied a tree, so the inverse must remove recursively.
fn cp(caps: &Captures) -> String {
    let flags = group(caps, 1).trim();
    let recursive = flags
        .trim_start_matches('-')
        .chars()
        .any(|c| matches!(c, 'r' | 'R' | 'a'));
    if recursive {
        format!("rm -r {}", group(caps, 3))
    } else {
        format!("rm {}", group(caps, 3))
    }
}

fn mkdir(caps: &Captures) -> String {
    format!("rmdir {}", group(caps, 2))
}

fn touch(caps: &Captures) -> String {
    format!("rm {}", group(caps, 1))
}

fn ln(caps: &Captures) -> String {
    format!("rm {}", group(caps, 3))
}

fn apt_install(caps: &Captures) -> String {
    format!("{} remove {}", group(caps, 1), group(caps, 2))
}

fn brew_install(caps: &Captures) -> String {
    format!("brew uninstall {}", group(caps, 1))
}

fn npm_install(caps: &Captures) -> String {
    match group(caps, 1).trim() {
        "" => format!("npm uninstall {}", group(caps, 2)),
        flag => format!("npm uninstall {flag} {}", group(caps, 2)),
    }
}

fn pip_install(caps: &Captures) -> String {
    format!("pip uninstall {}", group(caps, 1))
}

fn systemctl_start(caps: &Captures) -> String {
    format!("systemctl stop {}", group(caps, 1))
}

fn systemctl_stop(caps: &Captures) -> String {
    format!("systemctl start {}", group(caps, 1))
}

fn systemctl_enable(caps: &Captures) -> String {
    format!("systemctl disable {}", group(caps, 1))
}

fn docker_run(caps: &Captures) -> String {
    let name = group(caps, 1);
    format!("docker stop {name} && docker rm {name}")
}

fn docker_start(caps: &Captures) -> String {
    format!("docker stop {}", group(caps, 1))
}

/// Ordered undo rules. The first matching rule wins, so more specific
/// patterns must precede broader ones.
pub(crate) const UNDO_RULES: &[UndoRule] = &[
    // Git
    (r"^git\s+commit\s+", git_commit, "Undo the last commit (keeps changes staged)"),
    (r"^git\s+add\s+(.+)$", git_add, "Unstage the added files"),
    (r"^git\s+stash(\s+push)?$", git_stash, "Apply and remove the stash"),
    (
        r"^git\s+checkout\s+-b\s+(\S+)",
        git_checkout_branch,
        "Switch back and delete the new branch",
    ),
    (
        r"^git\s+merge\s+(\S+)",
        git_merge,
        "Undo the merge (warning: discards changes)",
    ),
    // Files
    (r"^mv\s+(\S+)\s+(\S+)$", mv, "Move the file back"),
    (r"^cp\s+(-[a-zA-Z]+\s+)?(\S+)\s+(\S+)$", cp, "Remove the copied file"),
    (r"^mkdir\s+(-p\s+)?(\S+)$", mkdir, "Remove the created directory (if empty)"),
    (r"^touch\s+(\S+)$", touch, "Remove the created file"),
    (r"^ln\s+(-[a-zA-Z]+\s+)?(\S+)\s+(\S+)$", ln, "Remove the created link"),
    // Package managers
    (r"^(apt|apt-get)\s+install\s+(.+)$", apt_install, "Uninstall the package"),
    (r"^brew\s+install\s+(.+)$", brew_install, "Uninstall the package"),
    (r"^npm\s+install\s+(-[gG]\s+)?(.+)$", npm_install, "Uninstall the package"),
    (r"^pip\s+install\s+(.+)$", pip_install, "Uninstall the package"),
    // Services
    (r"^systemctl\s+start\s+(\S+)$", systemctl_start, "Stop the service"),
    (r"^systemctl\s+stop\s+(\S+)$", systemctl_stop, "Start the service"),
    (r"^systemctl\s+enable\s+(\S+)$", systemctl_enable, "Disable the service"),
    // Containers
    (
        r"^docker\s+run\s+.*--name\s+(\S+)",
        docker_run,
        "Stop and remove the container",
    ),
    (r"^docker\s+start\s+(\S+)$", docker_start, "Stop the container"),
];
