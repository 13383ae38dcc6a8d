//! Transitive role expansion.
//!
//! A hierarchy maps a role to the roles it directly implies
//! (`ROLE_ADMIN -> [ROLE_USER, ROLE_MODERATOR]`). At construction every entry
//! is expanded into the flat, deduplicated list of all roles reachable from it,
//! so lookups at decision time are a single map access.
//!
//! Cycles (`A -> B`, `B -> A`) are not rejected: the traversal tracks visited
//! roles and simply stops, so the expanded entry of `A` contains both `B` and
//! `A`. Roles that appear nowhere as a key pass through unexpanded.

use std::collections::{HashMap, HashSet, VecDeque};

use warden_core::Role;

/// Precomputed role hierarchy. Immutable and safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct RoleHierarchy {
    map: HashMap<String, Vec<String>>,
}

impl RoleHierarchy {
    /// Build a hierarchy from `(role, implied roles)` pairs.
    #[must_use]
    pub fn new<I, K, V, R>(hierarchy: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = R>,
        R: Into<String>,
    {
        let hierarchy: HashMap<String, Vec<String>> = hierarchy
            .into_iter()
            .map(|(role, implied)| (role.into(), implied.into_iter().map(Into::into).collect()))
            .collect();

        let map = build_role_map(&hierarchy);

        tracing::debug!(
            role_count = map.len(),
            "Role hierarchy expanded"
        );

        Self { map }
    }

    /// Returns the given roles followed by every role they transitively imply.
    ///
    /// The input roles keep their relative order; each name appears exactly once.
    #[must_use]
    pub fn reachable_role_names<S: AsRef<str>>(&self, roles: &[S]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut reachable = Vec::with_capacity(roles.len());

        for role in roles {
            let role = role.as_ref();
            if seen.insert(role) {
                reachable.push(role.to_string());
            }
        }

        for role in roles {
            let Some(implied) = self.map.get(role.as_ref()) else {
                continue;
            };
            for implied_role in implied {
                if seen.insert(implied_role.as_str()) {
                    reachable.push(implied_role.clone());
                }
            }
        }

        reachable
    }

    /// Typed variant of [`Self::reachable_role_names`].
    #[must_use]
    pub fn reachable_roles(&self, roles: &[Role]) -> Vec<Role> {
        self.reachable_role_names(roles)
            .into_iter()
            .map(Role::from)
            .collect()
    }

    /// The expanded entry for one role, if the role is a hierarchy key.
    #[must_use]
    pub fn implied_roles(&self, role: &str) -> Option<&[String]> {
        self.map.get(role).map(Vec::as_slice)
    }
}

fn build_role_map(hierarchy: &HashMap<String, Vec<String>>) -> HashMap<String, Vec<String>> {
    let mut map = HashMap::with_capacity(hierarchy.len());

    for (main_role, direct) in hierarchy {
        let mut reachable: Vec<String> = Vec::with_capacity(direct.len());
        let mut in_reachable: HashSet<&str> = HashSet::new();
        for role in direct {
            if in_reachable.insert(role.as_str()) {
                reachable.push(role.clone());
            }
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut pending: VecDeque<&str> = direct.iter().map(String::as_str).collect();

        while let Some(role) = pending.pop_front() {
            if !visited.insert(role) {
                continue;
            }
            let Some(implied) = hierarchy.get(role) else {
                continue;
            };
            for implied_role in implied {
                if in_reachable.insert(implied_role.as_str()) {
                    reachable.push(implied_role.clone());
                }
                if !visited.contains(implied_role.as_str()) {
                    pending.push_back(implied_role.as_str());
                }
            }
        }

        tracing::trace!(role = %main_role, reachable = ?reachable, "Expanded role");
        map.insert(main_role.clone(), reachable);
    }

    map
}
