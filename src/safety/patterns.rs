use super::DangerLevel::{self, Caution, Critical, Dangerous};

/// The dangerous-pattern table as `(pattern, description, level)` triples.
///
/// Every entry is tested against every command; order only decides the order
/// of the resulting warnings. All patterns are case-insensitive.
pub(crate) const DANGEROUS_PATTERNS: &[(&str, &str, DangerLevel)] = &[
    // Critical - potentially catastrophic
    (
        r"(?i)rm\s+(-[a-z]*f[a-z]*\s+)?(-[a-z]*r[a-z]*\s+)?(/|\*|~)",
        "Recursive delete of root, all files, or home directory",
        Critical,
    ),
    (r"(?i)rm\s+-[a-z]*rf[a-z]*\s+/", "Recursive force delete from root", Critical),
    (r"(?i)dd\s+.*of=/dev/(sd|hd|nvme)", "Direct disk write operation", Critical),
    (r"(?i)mkfs", "Format filesystem", Critical),
    (r"(?i):\(\)\s*\{\s*:\s*\|\s*:\s*&\s*\}\s*;\s*:", "Fork bomb", Critical),
    (r"(?i)>\s*/dev/(sd|hd|nvme)", "Overwrite disk device", Critical),
    (
        r"(?i)chmod\s+(-[a-z]*r[a-z]*\s+)?777\s+/",
        "Set world-writable permissions on root",
        Critical,
    ),
    // Dangerous - significant risk
    (r"(?i)rm\s+-[a-z]*r", "Recursive delete", Dangerous),
    (r"(?i)rm\s+-[a-z]*f", "Force delete without confirmation", Dangerous),
    (r"(?i)del\s+/[sq]", "Windows force/quiet delete", Dangerous),
    (r"(?i)rmdir\s+/s", "Windows recursive directory delete", Dangerous),
    (r"(?i)drop\s+(table|database|schema)", "SQL drop operation", Dangerous),
    (r"(?i)truncate\s+table", "SQL truncate operation", Dangerous),
    (
        r"(?i)delete\s+from\s+\w+\s*($|;|where\s+1\s*=\s*1)",
        "SQL delete without proper WHERE clause",
        Dangerous,
    ),
    (r"(?i)>\s*/etc/", "Overwrite system config file", Dangerous),
    (r"(?i)curl.*\|\s*(ba)?sh", "Piping remote content to shell", Dangerous),
    (r"(?i)wget.*\|\s*(ba)?sh", "Piping remote content to shell", Dangerous),
    (r"(?i)git\s+(push|reset)\s+.*--force", "Force git operation", Dangerous),
    (r"(?i)git\s+clean\s+-[a-z]*f", "Force git clean", Dangerous),
    // Caution - requires attention
    (r"(?i)rm\s+", "Delete operation", Caution),
    (r"(?i)mv\s+.*\s+/dev/null", "Move to /dev/null (delete)", Caution),
    (r"(?i)chmod\s+", "Permission change", Caution),
    (r"(?i)chown\s+", "Ownership change", Caution),
    (r"(?i)kill\s+-9", "Force kill process", Caution),
    (r"(?i)pkill\s+", "Kill processes by pattern", Caution),
    (r"(?i)shutdown|reboot|halt|poweroff", "System shutdown/reboot", Caution),
    (r"(?i)systemctl\s+(stop|disable|mask)", "Stop/disable system service", Caution),
    (r"(?i)service\s+\w+\s+stop", "Stop system service", Caution),
    (r"(?i)iptables\s+-F", "Flush firewall rules", Caution),
    (r"(?i)git\s+reset\s+--hard", "Hard git reset", Caution),
    (r"(?i)git\s+checkout\s+--\s+\.", "Discard all changes", Caution),
];
