use std::sync::{PoisonError, RwLock, RwLockReadGuard};

/// Index of a registered type in its registry.
pub(crate) type TypeToken = u32;

/// Process-wide registry of type descriptors forming single-inheritance
/// chains.
///
/// A parent must be registered before any of its subtypes can name it, so
/// every chain is finite and acyclic by construction. The full ancestor
/// chain is computed once, when the type is defined, and cached in its
/// entry; walks at dispatch time read the cached chain instead of following
/// parent links.
pub(crate) struct TypeRegistry {
    entries: RwLock<Vec<TypeEntry>>,
}

struct TypeEntry {
    name: &'static str,
    parent: Option<TypeToken>,
    /// The token itself followed by its ancestors, most specific first.
    chain: Vec<TypeToken>,
}

impl TypeRegistry {
    pub(crate) const fn new() -> Self {
        TypeRegistry {
            entries: RwLock::new(Vec::new()),
        }
    }

    // Entries are pushed whole under the write lock, so a poisoned guard
    // still holds consistent data and can be recovered.
    fn entries(&self) -> RwLockReadGuard<'_, Vec<TypeEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn define(&self, name: &'static str, parent: Option<TypeToken>) -> TypeToken {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let token = entries.len() as TypeToken;
        let chain = match parent {
            Some(parent) => {
                let parent_chain = &entries[parent as usize].chain;
                let mut chain = Vec::with_capacity(parent_chain.len() + 1);
                chain.push(token);
                chain.extend_from_slice(parent_chain);
                chain
            }
            None => vec![token],
        };
        entries.push(TypeEntry { name, parent, chain });
        token
    }

    pub(crate) fn name(&self, token: TypeToken) -> &'static str {
        self.entries()[token as usize].name
    }

    pub(crate) fn parent(&self, token: TypeToken) -> Option<TypeToken> {
        self.entries()[token as usize].parent
    }

    /// The cached chain for `token`: itself, then each ancestor exactly
    /// once, most specific first.
    pub(crate) fn chain(&self, token: TypeToken) -> Vec<TypeToken> {
        self.entries()[token as usize].chain.clone()
    }

    /// Whether `ancestor` appears in `token`'s chain (reflexive).
    pub(crate) fn descends_from(&self, token: TypeToken, ancestor: TypeToken) -> bool {
        self.entries()[token as usize].chain.contains(&ancestor)
    }
}
