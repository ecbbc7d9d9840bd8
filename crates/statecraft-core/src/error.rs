/// Programmer-usage errors raised while building or driving a machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MachineError {
    #[error("state \"{0}\" is already registered on this machine")]
    DuplicateName(String),
    #[error("state \"{0}\" does not exist")]
    UnknownState(String),
}
