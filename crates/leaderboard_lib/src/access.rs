//! The capability check guarding the state-changing operations.
//!
//! The operations of the [`mutation`](crate::mutation) module don't know where the
//! administrator flag comes from (a session cookie, a command-line tool, ...). They only ask
//! an [`AccessGate`] whether the caller holds it.

/// Tells if the caller of an operation is the administrator.
pub trait AccessGate {
    /// Returns true if the caller holds the administrator capability.
    fn is_admin(&self) -> bool;
}

impl AccessGate for bool {
    fn is_admin(&self) -> bool {
        *self
    }
}

impl<G: AccessGate + ?Sized> AccessGate for &G {
    fn is_admin(&self) -> bool {
        (**self).is_admin()
    }
}

/// A gate that always grants the access.
///
/// This is used by trusted tools having a direct access to the database.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trusted;

impl AccessGate for Trusted {
    fn is_admin(&self) -> bool {
        true
    }
}
