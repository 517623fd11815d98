//! Built-in conventions for an infrastructure-as-code repository.
//!
//! These values form `RuleSet::default()`; an overlay replaces them key by key.

use indexmap::IndexMap;

use super::model::{LocationRule, ManifestEntry, NamingRule};

pub(super) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

pub(super) const fn min_file_bytes() -> u64 {
    10
}

pub(super) const fn min_critical_file_bytes() -> u64 {
    100
}

pub(super) const fn min_dir_items() -> usize {
    1
}

pub(super) const fn max_depth() -> usize {
    4
}

pub(super) fn marker_pattern() -> String {
    "README*".to_string()
}

pub(super) fn config_dir() -> String {
    "configs".to_string()
}

pub(super) fn roles_root() -> String {
    "configs/ansible/roles".to_string()
}

pub(super) fn forbidden_file_patterns() -> Vec<String> {
    strings(&[
        // Temporary files
        "*.tmp",
        "*.temp",
        "*~",
        "*.bak",
        "*.backup",
        "*.orig",
        // OS files
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        "Icon\r",
        // Editor state
        ".idea/*",
        "*.swp",
        "*.swo",
        // Compiled files
        "*.pyc",
        "*.pyo",
        "__pycache__/*",
        "*.o",
        "*.so",
        "*.exe",
        // Logs
        "*.log",
        "log.txt",
        "debug.log",
        "error.log",
        // Secrets
        "*.key",
        "*.pem",
        "*.p12",
        "id_rsa",
        "id_ed25519",
        "*.cert",
        "*.crt",
        "password*",
        "secret*",
        // Package managers
        "node_modules/*",
        "venv/*",
        ".env",
        "*.egg",
        // Build artifacts
        "build/*",
        "dist/*",
        "*.egg-info/*",
        "target/*",
        // Archives
        "*.zip",
        "*.tar.gz",
        "*.iso",
        "*.img",
        "*.deb",
        "*.rpm",
    ])
}

pub(super) fn forbidden_dir_names() -> Vec<String> {
    strings(&[
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        "node_modules",
        "venv",
        "env",
        ".env",
        "build",
        "dist",
        ".tox",
        "logs/old",
        "backup/old",
    ])
}

pub(super) fn allowed_exceptions() -> Vec<String> {
    strings(&[
        ".vscode",
        ".vscode/settings.json",
        ".vscode/extensions.json",
        ".vscode/tasks.json",
        ".vscode/launch.json",
    ])
}

pub(super) fn location_rules() -> IndexMap<String, LocationRule> {
    let rule = |allowed: &[&str], forbidden: &[&str]| LocationRule {
        allowed: strings(allowed),
        forbidden: strings(forbidden),
    };

    IndexMap::from([
        (
            "configs/ansible".to_string(),
            rule(&["*.yml", "*.yaml", "ansible.cfg"], &[]),
        ),
        ("configs/archinstall".to_string(), rule(&["*.json"], &[])),
        ("scripts".to_string(), rule(&["*.sh"], &[])),
        ("templates".to_string(), rule(&["*.j2", "*.jinja2"], &[])),
        (
            "docs".to_string(),
            rule(&["*.md", "*.rst", "*.txt"], &["*.sh", "*.py", "*.yml"]),
        ),
        ("tests".to_string(), rule(&["test_*.py", "*_test.py"], &[])),
    ])
}

pub(super) fn expected_locations() -> IndexMap<String, String> {
    [
        ("ansible.cfg", "configs/ansible"),
        ("requirements.txt", ""),
        ("Makefile", ""),
        ("README.md", ""),
        ("LICENSE", ""),
        (".gitignore", ""),
    ]
    .into_iter()
    .map(|(name, location)| (name.to_string(), location.to_string()))
    .collect()
}

pub(super) fn naming_rules() -> IndexMap<String, NamingRule> {
    let rule = |pattern: &str, description: &str| NamingRule {
        pattern: pattern.to_string(),
        description: description.to_string(),
    };

    IndexMap::from([
        (
            "scripts".to_string(),
            rule(
                r"^[a-z0-9_]+\.sh$",
                "Scripts should be lowercase with underscores, ending in .sh",
            ),
        ),
        (
            "ansible_files".to_string(),
            rule(
                r"^[a-z0-9_]+\.(yml|yaml)$",
                "Ansible files should be lowercase with underscores",
            ),
        ),
        (
            "roles".to_string(),
            rule(
                r"^[a-z0-9_]+$",
                "Role names should be lowercase with underscores",
            ),
        ),
        (
            "python_files".to_string(),
            rule(
                r"^[a-z0-9_]+\.py$",
                "Python files should be lowercase with underscores",
            ),
        ),
    ])
}

pub(super) fn manifest_directories() -> Vec<ManifestEntry> {
    let required = [
        "docs",
        "configs/archinstall",
        "configs/ansible/inventory",
        "configs/ansible/group_vars/all",
        "configs/ansible/playbooks",
        "configs/ansible/roles",
        "scripts/bootstrap",
        "scripts/deployment",
        "scripts/maintenance",
        "scripts/utilities",
        "backup",
        "logs",
    ];
    let optional = [
        "configs/ansible/host_vars/phoenix",
        "configs/profiles/work",
        "configs/profiles/personal",
        "configs/profiles/development",
        "scripts/security",
        "scripts/testing",
        "templates/systemd/services",
        "templates/systemd/timers",
        "templates/configs",
        "files/wallpapers",
        "files/fonts",
        "files/themes",
        "tests/unit",
        "tests/integration",
        "tests/validation",
    ];

    required
        .into_iter()
        .map(ManifestEntry::required)
        .chain(optional.into_iter().map(ManifestEntry::optional))
        .collect()
}

pub(super) fn manifest_files() -> Vec<ManifestEntry> {
    let required = [
        "README.md",
        ".gitignore",
        "requirements.txt",
        "Makefile",
        "configs/ansible/ansible.cfg",
        "configs/ansible/requirements.yml",
        "configs/archinstall/user_configuration.json",
        "scripts/deployment/master_deploy.sh",
        "scripts/bootstrap/bootstrap.sh",
        "scripts/bootstrap/first_boot_setup.sh",
        "scripts/maintenance/health_check.sh",
    ];
    let optional = [
        "LICENSE",
        "CHANGELOG.md",
        "configs/archinstall/user_credentials.json",
        "scripts/utilities/validate_structure.sh",
    ];

    required
        .into_iter()
        .map(ManifestEntry::required)
        .chain(optional.into_iter().map(ManifestEntry::optional))
        .collect()
}

pub(super) fn manifest_roles() -> Vec<String> {
    strings(&[
        "base_system",
        "users_security",
        "hyprland_desktop",
        "aur_packages",
        "system_hardening",
        "power_management",
        "development_tools",
        "monitoring",
        "user_environment",
    ])
}
