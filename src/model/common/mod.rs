mod identity;
mod rejection;

pub use identity::Identity;
pub use rejection::{ErrorKind, LedgerError, LedgerResult, Missing};
