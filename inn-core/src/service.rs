use anyhow::Result;

use crate::errors::InnError;

/// Standard service methods: find, get, create, patch, remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceMethodKind {
    Find,
    Get,
    Create,
    Patch,
    Remove,
}

impl ServiceMethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMethodKind::Find => "find",
            ServiceMethodKind::Get => "get",
            ServiceMethodKind::Create => "create",
            ServiceMethodKind::Patch => "patch",
            ServiceMethodKind::Remove => "remove",
        }
    }
}

/// Capabilities describe which methods a service supports.
///
/// Front ends can use this to offer only the operations that make sense,
/// e.g. reservations cannot be patched, only created and cancelled.
#[derive(Debug, Clone)]
pub struct ServiceCapabilities {
    pub allowed_methods: Vec<ServiceMethodKind>,
}

impl ServiceCapabilities {
    /// Full CRUD: find, get, create, patch, remove.
    pub fn standard_crud() -> Self {
        use ServiceMethodKind::*;
        Self {
            allowed_methods: vec![Find, Get, Create, Patch, Remove],
        }
    }

    /// Helper for building from a list.
    pub fn from_methods(methods: Vec<ServiceMethodKind>) -> Self {
        Self {
            allowed_methods: methods,
        }
    }

    pub fn allows(&self, method: ServiceMethodKind) -> bool {
        self.allowed_methods.contains(&method)
    }
}

/// Core innkeep service trait over records of type `R`:
///
/// - `find`   → list every record in stored order
/// - `get`    → fetch one by id, `None` when absent
/// - `create` → validate a draft and persist the new record
/// - `patch`  → partial update, `None` when the id is unknown
/// - `remove` → delete one by id, `false` when nothing matched
///
/// All methods have default implementations that return
/// "Method not implemented", so a service can override only
/// what it actually supports.
pub trait InnService<R>: Send + Sync {
    /// Input accepted by `create`.
    type Draft;
    /// Input accepted by `patch`.
    type Patch;

    /// Describe which methods this service supports.
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::standard_crud()
    }

    fn find(&self) -> Result<Vec<R>> {
        Err(InnError::not_implemented("Method not implemented: find").into_anyhow())
    }

    fn get(&self, _id: &str) -> Result<Option<R>> {
        Err(InnError::not_implemented("Method not implemented: get").into_anyhow())
    }

    fn create(&self, _data: Self::Draft) -> Result<R> {
        Err(InnError::not_implemented("Method not implemented: create").into_anyhow())
    }

    fn patch(&self, _id: &str, _data: Self::Patch) -> Result<Option<R>> {
        Err(InnError::not_implemented("Method not implemented: patch").into_anyhow())
    }

    fn remove(&self, _id: &str) -> Result<bool> {
        Err(InnError::not_implemented("Method not implemented: remove").into_anyhow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    struct ReadOnly;

    impl InnService<String> for ReadOnly {
        type Draft = String;
        type Patch = ();

        fn capabilities(&self) -> ServiceCapabilities {
            ServiceCapabilities::from_methods(vec![ServiceMethodKind::Find])
        }

        fn find(&self) -> Result<Vec<String>> {
            Ok(vec!["only".to_string()])
        }
    }

    #[test]
    fn unimplemented_methods_report_not_implemented() {
        let svc = ReadOnly;

        assert_eq!(svc.find().unwrap(), vec!["only".to_string()]);
        let err = svc.create("x".to_string()).unwrap_err();
        assert_eq!(InnError::kind_of(&err), ErrorKind::NotImplemented);
        assert!(err.to_string().contains("create"));
    }

    #[test]
    fn capabilities_answer_membership() {
        let caps = ServiceCapabilities::standard_crud();
        assert!(caps.allows(ServiceMethodKind::Patch));
        assert!(!ReadOnly.capabilities().allows(ServiceMethodKind::Remove));
        assert_eq!(ServiceMethodKind::Remove.as_str(), "remove");
    }
}
