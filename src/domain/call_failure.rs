/// Failure of a single remote call, tagged with whether trying again can help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFailure<E> {
    /// The call never reached the remote service or did not complete.
    Transient(E),
    /// The remote service answered and declined the request.
    Rejected(E),
}

impl<E> CallFailure<E> {
    pub fn is_transient(&self) -> bool {
        matches!(self, CallFailure::Transient(_))
    }

    pub fn into_inner(self) -> E {
        match self {
            CallFailure::Transient(e) | CallFailure::Rejected(e) => e,
        }
    }
}
