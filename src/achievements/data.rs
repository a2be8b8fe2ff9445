//! Static achievement definitions.

use super::types::{AchievementDef, AchievementId};

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstHarvest,
        name: "First Harvest",
        description: "Gather plasma for the first time",
        target: None,
    },
    AchievementDef {
        id: AchievementId::FirstModule,
        name: "Integrated",
        description: "Bring a module online",
        target: None,
    },
    AchievementDef {
        id: AchievementId::DoctrineAdopted,
        name: "A Chosen Path",
        description: "Activate a doctrine",
        target: None,
    },
    AchievementDef {
        id: AchievementId::FirstVictory,
        name: "Threat Neutralized",
        description: "Win an encounter",
        target: None,
    },
    AchievementDef {
        id: AchievementId::BossSlain,
        name: "Atrium Silenced",
        description: "Defeat a boss",
        target: None,
    },
    AchievementDef {
        id: AchievementId::Purifier,
        name: "Purifier",
        description: "Clear five sectors",
        target: Some(5),
    },
    AchievementDef {
        id: AchievementId::Cartographer,
        name: "Cartographer",
        description: "Discover every sector",
        target: Some(13),
    },
    AchievementDef {
        id: AchievementId::LevelFive,
        name: "Rising Citadel",
        description: "Reach level 5",
        target: None,
    },
];

/// Looks up the static definition for an id.
pub fn achievement_def(id: AchievementId) -> &'static AchievementDef {
    ALL_ACHIEVEMENTS
        .iter()
        .find(|def| def.id == id)
        .unwrap_or(&ALL_ACHIEVEMENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_has_a_definition() {
        let ids = [
            AchievementId::FirstHarvest,
            AchievementId::FirstModule,
            AchievementId::DoctrineAdopted,
            AchievementId::FirstVictory,
            AchievementId::BossSlain,
            AchievementId::Purifier,
            AchievementId::Cartographer,
            AchievementId::LevelFive,
        ];
        for id in ids {
            assert_eq!(achievement_def(id).id, id);
        }
        assert_eq!(ALL_ACHIEVEMENTS.len(), ids.len());
    }
}
