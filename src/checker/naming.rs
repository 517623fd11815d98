use regex::Regex;

use crate::config::RuleSet;
use crate::path_utils::NormalizedPath;
use crate::scanner::ScanEntry;

use super::patterns::compile_naming_regex;

/// Which naming rule governs an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingCategory {
    Scripts,
    AnsibleFiles,
    PythonFiles,
    Roles,
}

/// Predicate deciding whether an entry belongs to a category.
type CategoryPredicate = fn(&ScanEntry, &NormalizedPath) -> bool;

/// Tried in order; the first predicate that accepts the entry picks the rule.
const PRIORITY: [(NamingCategory, CategoryPredicate); 4] = [
    (NamingCategory::Scripts, is_script),
    (NamingCategory::AnsibleFiles, is_ansible_file),
    (NamingCategory::PythonFiles, is_python_file),
    (NamingCategory::Roles, is_role),
];

fn is_script(entry: &ScanEntry, _: &NormalizedPath) -> bool {
    !entry.is_dir && entry.path.extension() == Some("sh")
}

fn is_ansible_file(entry: &ScanEntry, _: &NormalizedPath) -> bool {
    !entry.is_dir
        && matches!(entry.path.extension(), Some("yml" | "yaml"))
        && entry.path.segments().any(|s| s == "ansible")
}

fn is_python_file(entry: &ScanEntry, _: &NormalizedPath) -> bool {
    !entry.is_dir && entry.path.extension() == Some("py")
}

fn is_role(entry: &ScanEntry, roles_root: &NormalizedPath) -> bool {
    entry.is_dir && !roles_root.is_root() && entry.path.parent() == *roles_root
}

impl NamingCategory {
    /// Config key in `naming_rules`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Scripts => "scripts",
            Self::AnsibleFiles => "ansible_files",
            Self::PythonFiles => "python_files",
            Self::Roles => "roles",
        }
    }

    #[must_use]
    pub fn of(entry: &ScanEntry, roles_root: &NormalizedPath) -> Option<Self> {
        PRIORITY
            .iter()
            .find(|(_, accepts)| accepts(entry, roles_root))
            .map(|(category, _)| *category)
    }
}

struct CompiledNamingRule {
    category: NamingCategory,
    regex: Regex,
    description: String,
}

/// Naming rules with their regexes compiled. Rules with a malformed regex are disabled.
pub struct NamingRules {
    rules: Vec<CompiledNamingRule>,
    roles_root: NormalizedPath,
}

impl NamingRules {
    #[must_use]
    pub fn new(rule_set: &RuleSet) -> Self {
        let rules = PRIORITY
            .iter()
            .filter_map(|&(category, _)| {
                let rule = rule_set.naming_rules.get(category.key())?;
                match compile_naming_regex(&rule.pattern) {
                    Ok(regex) => Some(CompiledNamingRule {
                        category,
                        regex,
                        description: rule.description.clone(),
                    }),
                    Err(e) => {
                        tracing::debug!("Disabling naming rule '{}': {e}", category.key());
                        None
                    }
                }
            })
            .collect();

        Self {
            rules,
            roles_root: NormalizedPath::location(&rule_set.manifest.roles_root),
        }
    }

    /// The description of the violated rule, if the entry's basename fails it.
    #[must_use]
    pub fn violation(&self, entry: &ScanEntry) -> Option<&str> {
        let category = NamingCategory::of(entry, &self.roles_root)?;
        let rule = self.rules.iter().find(|r| r.category == category)?;
        if rule.regex.is_match(entry.path.file_name()) {
            None
        } else {
            Some(&rule.description)
        }
    }
}
