use crate::basic_types::HashMap;
use crate::engine::variables::DomainId;
use crate::engine::variables::SetDomainId;

/// Names given to variables when they were created. Copies of a space share one instance until a
/// copy names a new variable.
#[derive(Clone, Debug, Default)]
pub(crate) struct VariableNames {
    integers: HashMap<DomainId, String>,
    integers_by_name: HashMap<String, DomainId>,
    sets: HashMap<SetDomainId, String>,
}

impl VariableNames {
    /// Get a domain by its name.
    pub(crate) fn get_domain_by_name(&self, name: &str) -> Option<DomainId> {
        self.integers_by_name.get(name).copied()
    }

    /// Get the name associated with a domain id.
    pub(crate) fn get_int_name(&self, domain_id: DomainId) -> Option<&str> {
        self.integers.get(&domain_id).map(|s| s.as_str())
    }

    pub(crate) fn get_set_name(&self, domain_id: SetDomainId) -> Option<&str> {
        self.sets.get(&domain_id).map(|s| s.as_str())
    }

    /// Add a name to the integer variable. This will override the existing name if it exists.
    pub(crate) fn add_integer(&mut self, integer: DomainId, name: String) {
        let _ = self.integers.insert(integer, name.clone());
        let _ = self.integers_by_name.insert(name, integer);
    }

    pub(crate) fn add_set(&mut self, set: SetDomainId, name: String) {
        let _ = self.sets.insert(set, name);
    }
}
