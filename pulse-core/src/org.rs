//! Organization tree queries.
//!
//! The tree is an in-memory snapshot of the (employee, manager) relation.
//! It answers two questions:
//! - `manager_chain`: the ordered ancestors of an employee (immediate manager
//!   first), which is the recipient list for a feedback submission.
//! - `reportees`: the strict descendants of a manager, split into direct
//!   (one level down) and indirect (two or more levels down).
//!
//! Unknown identifiers are an `UnknownEmployee` error, never an empty result;
//! a known manager with no reports genuinely returns empty sets.

use crate::error::{CoreError, Result};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Strict descendants of a manager, partitioned by depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reportees {
    /// Depth 1 below the manager.
    pub direct: BTreeSet<String>,
    /// Depth 2 or more below the manager.
    pub indirect: BTreeSet<String>,
}

/// Immutable snapshot of the manager hierarchy.
pub struct OrgTree {
    /// username -> manager reference (None for top-level employees)
    managers: HashMap<String, Option<String>>,
    /// manager -> direct reports
    reports: HashMap<String, Vec<String>>,
}

impl OrgTree {
    /// Build a tree from (username, manager) pairs. Duplicate usernames are
    /// rejected; a manager reference pointing outside the pair set is kept
    /// (the chain walk stops there).
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        let mut managers: HashMap<String, Option<String>> = HashMap::new();
        let mut reports: HashMap<String, Vec<String>> = HashMap::new();

        for (username, manager) in pairs {
            if managers.contains_key(&username) {
                return Err(CoreError::DuplicateEmployee(username));
            }
            if let Some(m) = &manager {
                reports.entry(m.clone()).or_default().push(username.clone());
            }
            managers.insert(username, manager);
        }

        Ok(Self { managers, reports })
    }

    pub fn contains(&self, username: &str) -> bool {
        self.managers.contains_key(username)
    }

    /// Ordered ancestors of `employee`, immediate manager first.
    ///
    /// The walk stops at an employee with no manager, or at a manager
    /// reference that is not itself a registered employee (that manager is
    /// still part of the chain — whether feedback reaches them depends on
    /// whether they hold a keypair). A revisited node is a malformed
    /// hierarchy and fails with `CycleDetected`.
    pub fn manager_chain(&self, employee: &str) -> Result<Vec<String>> {
        if !self.managers.contains_key(employee) {
            return Err(CoreError::UnknownEmployee(employee.to_string()));
        }

        let mut chain = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(employee);

        let mut current = employee;
        while let Some(Some(manager)) = self.managers.get(current) {
            if !seen.insert(manager.as_str()) {
                return Err(CoreError::CycleDetected(manager.clone()));
            }
            chain.push(manager.clone());
            current = manager;
        }

        Ok(chain)
    }

    /// Level-tagged breadth-first walk of the subtree rooted at `manager`.
    pub fn reportees(&self, manager: &str) -> Result<Reportees> {
        if !self.managers.contains_key(manager) {
            return Err(CoreError::UnknownEmployee(manager.to_string()));
        }

        let mut out = Reportees::default();
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(manager);

        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        queue.push_back((manager, 0));

        while let Some((name, depth)) = queue.pop_front() {
            let Some(children) = self.reports.get(name) else {
                continue;
            };
            for child in children {
                // A cycle would revisit a node; skip rather than loop.
                if !seen.insert(child.as_str()) {
                    continue;
                }
                if depth == 0 {
                    out.direct.insert(child.clone());
                } else {
                    out.indirect.insert(child.clone());
                }
                queue.push_back((child.as_str(), depth + 1));
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> OrgTree {
        // carol
        //  └── bob
        //       ├── alice
        //       └── dave
        OrgTree::from_pairs([
            ("carol".to_string(), None),
            ("bob".to_string(), Some("carol".to_string())),
            ("alice".to_string(), Some("bob".to_string())),
            ("dave".to_string(), Some("bob".to_string())),
        ])
        .unwrap()
    }

    #[test]
    fn chain_length_equals_depth() {
        let tree = sample_tree();
        assert_eq!(tree.manager_chain("carol").unwrap(), Vec::<String>::new());
        assert_eq!(tree.manager_chain("bob").unwrap(), vec!["carol"]);
        assert_eq!(tree.manager_chain("alice").unwrap(), vec!["bob", "carol"]);
    }

    #[test]
    fn unknown_employee_is_an_error_not_empty() {
        let tree = sample_tree();
        assert!(matches!(
            tree.manager_chain("mallory"),
            Err(CoreError::UnknownEmployee(_))
        ));
        assert!(matches!(
            tree.reportees("mallory"),
            Err(CoreError::UnknownEmployee(_))
        ));
    }

    #[test]
    fn reportees_partition_is_exact() {
        let tree = sample_tree();
        let r = tree.reportees("carol").unwrap();
        assert_eq!(r.direct, BTreeSet::from(["bob".to_string()]));
        assert_eq!(
            r.indirect,
            BTreeSet::from(["alice".to_string(), "dave".to_string()])
        );
        assert!(r.direct.is_disjoint(&r.indirect));
    }

    #[test]
    fn leaf_manager_has_empty_reportees() {
        let tree = sample_tree();
        let r = tree.reportees("alice").unwrap();
        assert!(r.direct.is_empty());
        assert!(r.indirect.is_empty());
    }

    #[test]
    fn cycle_is_detected() {
        let tree = OrgTree::from_pairs([
            ("a".to_string(), Some("b".to_string())),
            ("b".to_string(), Some("a".to_string())),
        ])
        .unwrap();
        assert!(matches!(
            tree.manager_chain("a"),
            Err(CoreError::CycleDetected(_))
        ));
    }

    #[test]
    fn chain_walk_stops_at_unregistered_manager() {
        let tree =
            OrgTree::from_pairs([("alice".to_string(), Some("external-boss".to_string()))]).unwrap();
        assert_eq!(tree.manager_chain("alice").unwrap(), vec!["external-boss"]);
    }

    #[test]
    fn duplicate_employee_rejected() {
        let result = OrgTree::from_pairs([
            ("alice".to_string(), None),
            ("alice".to_string(), Some("bob".to_string())),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateEmployee(_))));
    }
}
