use std::fmt;

/// A betting decision.
///
/// `Raise(amount)` names the total the actor will have committed on this
/// street after the raise, not the increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(u64),
    AllIn,
}

/// Action type without its amount; used for frequency tallies and likelihoods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Fold,
        ActionKind::Check,
        ActionKind::Call,
        ActionKind::Raise,
        ActionKind::AllIn,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_aggressive(self) -> bool {
        matches!(self, ActionKind::Raise | ActionKind::AllIn)
    }

    pub const fn is_passive(self) -> bool {
        matches!(self, ActionKind::Check | ActionKind::Call)
    }
}

impl Action {
    pub const fn kind(self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call => ActionKind::Call,
            Action::Raise(_) => ActionKind::Raise,
            Action::AllIn => ActionKind::AllIn,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "FOLD"),
            Action::Check => write!(f, "CHECK"),
            Action::Call => write!(f, "CALL"),
            Action::Raise(amount) => write!(f, "RAISE to {amount}"),
            Action::AllIn => write!(f, "ALL_IN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_displays_its_target() {
        assert_eq!(Action::Raise(120).to_string(), "RAISE to 120");
        assert_eq!(Action::AllIn.to_string(), "ALL_IN");
    }

    #[test]
    fn kinds_split_aggressive_and_passive() {
        assert!(Action::AllIn.kind().is_aggressive());
        assert!(Action::Raise(4).kind().is_aggressive());
        assert!(Action::Call.kind().is_passive());
        assert!(!Action::Fold.kind().is_passive() && !Action::Fold.kind().is_aggressive());
    }
}
