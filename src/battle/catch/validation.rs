use crate::encounter::{Encounter, EncounterStatus};
use thiserror::Error;

/// Reasons a capture cannot be attempted at all. A failed roll is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("the encounter is already over ({status})")]
    AlreadyResolved { status: EncounterStatus },
    #[error("{name} has fainted and cannot be caught")]
    TargetFainted { name: String },
}

/// Checks that `encounter` is still active and its combatant is standing.
pub fn can_attempt_capture(encounter: &Encounter) -> Result<(), CaptureError> {
    if encounter.status != EncounterStatus::Active {
        return Err(CaptureError::AlreadyResolved {
            status: encounter.status,
        });
    }
    if encounter.wild.is_fainted() {
        return Err(CaptureError::TargetFainted {
            name: encounter.wild.name.clone(),
        });
    }
    Ok(())
}
