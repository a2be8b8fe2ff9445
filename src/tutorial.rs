//! A short guided-first-steps sequence. Each stage completes the first time
//! the matching action succeeds; stages always advance in order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TutorialStage {
    Gather,
    Refine,
    UnlockModule,
    Explore,
    Victory,
    Done,
}

const STAGES: [TutorialStage; 6] = [
    TutorialStage::Gather,
    TutorialStage::Refine,
    TutorialStage::UnlockModule,
    TutorialStage::Explore,
    TutorialStage::Victory,
    TutorialStage::Done,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    step: u32,
}

impl Tutorial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_step(step: u32) -> Self {
        Self {
            step: step.min(STAGES.len() as u32 - 1),
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn stage(&self) -> TutorialStage {
        STAGES[self.step as usize]
    }

    pub fn is_done(&self) -> bool {
        self.stage() == TutorialStage::Done
    }

    /// Hint for the current stage, or None once the tutorial is over.
    pub fn hint(&self) -> Option<&'static str> {
        match self.stage() {
            TutorialStage::Gather => Some("Gather plasma to feed the citadel."),
            TutorialStage::Refine => Some("Refine plasma into clots."),
            TutorialStage::UnlockModule => Some("Integrate your first module."),
            TutorialStage::Explore => Some("Explore the Capillary Strait."),
            TutorialStage::Victory => Some("Defeat an immune hunter in battle."),
            TutorialStage::Done => None,
        }
    }

    /// Advances past `stage` if it is the current one. Returns true when the
    /// tutorial moved forward.
    pub fn advance_past(&mut self, stage: TutorialStage) -> bool {
        if self.stage() == stage && !self.is_done() {
            self.step += 1;
            return true;
        }
        false
    }
}
