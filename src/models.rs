//models.rs
use std::fmt;

use crate::generation::GenerationOutcome;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub const ALL: [FitnessLevel; 3] = [
        FitnessLevel::Beginner,
        FitnessLevel::Intermediate,
        FitnessLevel::Advanced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Goal {
    #[default]
    WeightLoss,
    MuscleGain,
    Endurance,
    GeneralFitness,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::WeightLoss,
        Goal::MuscleGain,
        Goal::Endurance,
        Goal::GeneralFitness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::MuscleGain => "Muscle Gain",
            Goal::Endurance => "Endurance",
            Goal::GeneralFitness => "General Fitness",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Equipment {
    #[default]
    Bodyweight,
    Dumbbells,
    GymEquipment,
    ResistanceBands,
}

impl Equipment {
    pub const ALL: [Equipment; 4] = [
        Equipment::Bodyweight,
        Equipment::Dumbbells,
        Equipment::GymEquipment,
        Equipment::ResistanceBands,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Equipment::Bodyweight => "Bodyweight",
            Equipment::Dumbbells => "Dumbbells",
            Equipment::GymEquipment => "Gym Equipment",
            Equipment::ResistanceBands => "Resistance Bands",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutDuration(u16);

impl WorkoutDuration {
    pub const MIN: u16 = 10;
    pub const MAX: u16 = 120;
    pub const STEP: u16 = 5;
    pub const DEFAULT: u16 = 30;

    /// Clamps into `MIN..=MAX` and rounds to the nearest `STEP`.
    pub fn clamped(minutes: u16) -> Self {
        let minutes = minutes.clamp(Self::MIN, Self::MAX);
        WorkoutDuration((minutes + Self::STEP / 2) / Self::STEP * Self::STEP)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl Default for WorkoutDuration {
    fn default() -> Self {
        WorkoutDuration(Self::DEFAULT)
    }
}

impl fmt::Display for WorkoutDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkoutPreferences {
    pub fitness_level: FitnessLevel,
    pub goal: Goal,
    pub duration: WorkoutDuration,
    pub equipment: Equipment,
}

impl WorkoutPreferences {
    pub fn metadata_lines(&self) -> [String; 4] {
        [
            format!("Fitness Level: {}", self.fitness_level),
            format!("Goal: {}", self.goal),
            format!("Duration: {} minutes", self.duration),
            format!("Equipment: {}", self.equipment),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutRequest {
    preferences: WorkoutPreferences,
    outcome: GenerationOutcome,
    timestamp: String,
}

impl WorkoutRequest {
    pub const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn new(
        preferences: WorkoutPreferences,
        outcome: GenerationOutcome,
        timestamp: String,
    ) -> Self {
        WorkoutRequest {
            preferences,
            outcome,
            timestamp,
        }
    }

    pub fn preferences(&self) -> &WorkoutPreferences {
        &self.preferences
    }

    pub fn outcome(&self) -> &GenerationOutcome {
        &self.outcome
    }

    pub fn generated_text(&self) -> &str {
        self.outcome.text()
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

pub type WorkoutHistory = Vec<WorkoutRequest>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labels_match_form_options() {
        let levels: Vec<&str> = FitnessLevel::ALL.iter().map(|l| l.label()).collect();
        assert_eq!(levels, vec!["Beginner", "Intermediate", "Advanced"]);

        let goals: Vec<String> = Goal::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            goals,
            vec!["Weight Loss", "Muscle Gain", "Endurance", "General Fitness"]
        );

        let equipment: Vec<&str> = Equipment::ALL.iter().map(|e| e.label()).collect();
        assert_eq!(
            equipment,
            vec!["Bodyweight", "Dumbbells", "Gym Equipment", "Resistance Bands"]
        );
    }

    #[test]
    fn test_duration_bounds() {
        assert_eq!(WorkoutDuration::clamped(9).minutes(), 10);
        assert_eq!(WorkoutDuration::clamped(10).minutes(), 10);
        assert_eq!(WorkoutDuration::clamped(120).minutes(), 120);
        assert_eq!(WorkoutDuration::clamped(121).minutes(), 120);
        assert_eq!(WorkoutDuration::clamped(0).minutes(), 10);
        assert_eq!(WorkoutDuration::clamped(500).minutes(), 120);
        assert_eq!(WorkoutDuration::clamped(45).minutes(), 45);
        assert_eq!(WorkoutDuration::default().minutes(), 30);
    }

    #[test]
    fn test_duration_snaps_to_step() {
        assert_eq!(WorkoutDuration::clamped(42).minutes(), 40);
        assert_eq!(WorkoutDuration::clamped(43).minutes(), 45);
        assert_eq!(WorkoutDuration::clamped(118).minutes(), 120);
        assert_eq!(WorkoutDuration::clamped(11).minutes(), 10);

        for minutes in 0..=200 {
            let duration = WorkoutDuration::clamped(minutes).minutes();
            assert!((WorkoutDuration::MIN..=WorkoutDuration::MAX).contains(&duration));
            assert_eq!(duration % WorkoutDuration::STEP, 0, "{minutes} -> {duration}");
        }
    }

    #[test]
    fn test_default_preferences_are_first_options() {
        let prefs = WorkoutPreferences::default();
        assert_eq!(prefs.fitness_level, FitnessLevel::Beginner);
        assert_eq!(prefs.goal, Goal::WeightLoss);
        assert_eq!(prefs.duration.minutes(), 30);
        assert_eq!(prefs.equipment, Equipment::Bodyweight);
    }

    #[test]
    fn test_metadata_lines() {
        let prefs = WorkoutPreferences {
            fitness_level: FitnessLevel::Advanced,
            goal: Goal::Endurance,
            duration: WorkoutDuration::clamped(75),
            equipment: Equipment::ResistanceBands,
        };
        assert_eq!(
            prefs.metadata_lines(),
            [
                "Fitness Level: Advanced".to_string(),
                "Goal: Endurance".to_string(),
                "Duration: 75 minutes".to_string(),
                "Equipment: Resistance Bands".to_string(),
            ]
        );
    }
}
