//! Tool registry storage

use super::{ToolCategory, ToolDescriptor};
use std::collections::{BTreeMap, BTreeSet};

/// Central registry for tool descriptors.
///
/// Descriptors are kept per category in insertion order, so iterating a
/// category yields tools in the order they were declared.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    categories: BTreeMap<ToolCategory, Vec<ToolDescriptor>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with all built-in tools.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for desc in super::builtins::builtin_registrations() {
            registry.register(desc);
        }
        registry
    }

    /// Register a tool.
    ///
    /// A descriptor with the same name in the same category is replaced in
    /// place, keeping its position.
    pub fn register(&mut self, desc: ToolDescriptor) {
        let tools = self.categories.entry(desc.category).or_default();
        match tools.iter_mut().find(|t| t.name == desc.name) {
            Some(existing) => {
                tracing::warn!(
                    tool = %desc.name,
                    category = %desc.category,
                    "Replacing existing tool registration"
                );
                *existing = desc;
            }
            None => tools.push(desc),
        }
    }

    /// Get a descriptor by category and name.
    pub fn get(&self, category: ToolCategory, name: &str) -> Option<&ToolDescriptor> {
        self.categories
            .get(&category)
            .and_then(|tools| tools.iter().find(|t| t.name == name))
    }

    /// Find a descriptor by name in any category, in phase order.
    pub fn find(&self, name: &str) -> Option<&ToolDescriptor> {
        self.iter().find(|t| t.name == name)
    }

    /// Check if a tool name is registered in any category.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Descriptors of one category, in insertion order.
    pub fn by_category(&self, category: ToolCategory) -> Vec<&ToolDescriptor> {
        self.categories
            .get(&category)
            .map(|tools| tools.iter().collect())
            .unwrap_or_default()
    }

    /// Tool names of one category, in insertion order.
    pub fn names(&self, category: ToolCategory) -> Vec<&str> {
        self.by_category(category)
            .into_iter()
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Categories that have at least one tool, in phase order.
    pub fn categories(&self) -> Vec<ToolCategory> {
        self.categories
            .iter()
            .filter(|(_, tools)| !tools.is_empty())
            .map(|(cat, _)| *cat)
            .collect()
    }

    /// Iterate over all descriptors, category by category.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.categories.values().flatten()
    }

    /// Distinct binaries needed by the given categories (sorted).
    ///
    /// Includes `sudo` when any of the tools runs privileged.
    pub fn binaries(&self, categories: &[ToolCategory]) -> Vec<&str> {
        let mut set = BTreeSet::new();
        for tool in self.iter().filter(|t| categories.contains(&t.category)) {
            set.insert(tool.binary.as_str());
            if tool.is_privileged() {
                set.insert("sudo");
            }
        }
        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandLine;
    use crate::context::ArgSource;
    use pretty_assertions::assert_eq;

    fn noop(_: &[String]) -> Option<CommandLine> {
        Some(CommandLine::new("true"))
    }

    fn make_desc(name: &str, category: ToolCategory) -> ToolDescriptor {
        ToolDescriptor::new(name, name, category, noop, [ArgSource::ResourcesDir])
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.categories().is_empty());
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(make_desc("nikto", ToolCategory::Web));

        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("nikto"));
        assert!(registry.get(ToolCategory::Web, "nikto").is_some());
        assert!(registry.get(ToolCategory::WebAdvanced, "nikto").is_none());
        assert!(!registry.contains("unknown"));
    }

    #[test]
    fn test_names_keep_insertion_order() {
        let mut registry = ToolRegistry::new();
        registry.register(make_desc("whatweb", ToolCategory::Web));
        registry.register(make_desc("feroxbuster", ToolCategory::Web));
        registry.register(make_desc("nikto", ToolCategory::Web));

        assert_eq!(
            registry.names(ToolCategory::Web),
            vec!["whatweb", "feroxbuster", "nikto"]
        );
    }

    #[test]
    fn test_same_name_in_different_categories() {
        let mut registry = ToolRegistry::new();
        registry.register(make_desc("scout", ToolCategory::Web));
        registry.register(make_desc("scout", ToolCategory::OsLinux));

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.find("scout").map(|t| t.category),
            Some(ToolCategory::Web)
        );
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(make_desc("a", ToolCategory::Web));
        registry.register(make_desc("b", ToolCategory::Web));

        let mut replacement = make_desc("a", ToolCategory::Web);
        replacement.binary = "a2".into();
        registry.register(replacement);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(ToolCategory::Web), vec!["a", "b"]);
        assert_eq!(registry.get(ToolCategory::Web, "a").unwrap().binary, "a2");
    }

    #[test]
    fn test_by_category_empty() {
        let mut registry = ToolRegistry::new();
        registry.register(make_desc("rustscan", ToolCategory::NetworkPorts));
        assert!(registry.by_category(ToolCategory::OsLinux).is_empty());
    }

    #[test]
    fn test_categories_and_iter_in_phase_order() {
        let mut registry = ToolRegistry::new();
        registry.register(make_desc("nikto", ToolCategory::Web));
        registry.register(make_desc("rustscan", ToolCategory::NetworkPorts));

        assert_eq!(
            registry.categories(),
            vec![ToolCategory::NetworkPorts, ToolCategory::Web]
        );
        let order: Vec<_> = registry.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(order, vec!["rustscan", "nikto"]);
    }

    #[test]
    fn test_binaries_are_distinct() {
        let registry = ToolRegistry::with_builtins();
        let web = registry.binaries(&[ToolCategory::Web]);
        assert_eq!(web.iter().filter(|b| **b == "ffuf").count(), 1);
        assert!(web.contains(&"feroxbuster"));
        assert!(!web.contains(&"nmap"));
    }

    #[test]
    fn test_binaries_include_sudo_for_privileged_tools() {
        let registry = ToolRegistry::with_builtins();
        assert_eq!(
            registry.binaries(&[ToolCategory::NetworkPorts]),
            vec!["nmap", "rustscan", "sudo"]
        );
        assert!(!registry.binaries(&[ToolCategory::Web]).contains(&"sudo"));
    }

    #[test]
    fn test_with_builtins() {
        let registry = ToolRegistry::with_builtins();

        assert_eq!(registry.len(), crate::registry::BUILTIN_COUNT);

        assert!(registry.contains("nmap"));
        assert!(registry.contains("nikto"));
        assert!(registry.contains("feroxbuster"));
        assert_eq!(registry.names(ToolCategory::NetworkPorts), vec!["rustscan", "nmap"]);
    }
}
