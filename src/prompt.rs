use crate::models::WorkoutPreferences;

pub fn build_prompt(preferences: &WorkoutPreferences) -> String {
    format!(
        "Create a personalized workout plan for a {level} individual \
         whose goal is {goal}. The workout should last {duration} minutes \
         and use {equipment} equipment. Provide step-by-step exercises with \
         sets, reps, and rest intervals.",
        level = preferences.fitness_level,
        goal = preferences.goal,
        duration = preferences.duration,
        equipment = preferences.equipment,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Equipment, FitnessLevel, Goal, WorkoutDuration};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prompt_for_defaults() {
        let prompt = build_prompt(&WorkoutPreferences::default());
        assert_eq!(
            prompt,
            "Create a personalized workout plan for a Beginner individual whose goal is \
             Weight Loss. The workout should last 30 minutes and use Bodyweight equipment. \
             Provide step-by-step exercises with sets, reps, and rest intervals."
        );
    }

    #[test]
    fn test_every_combination_places_values() {
        for level in FitnessLevel::ALL {
            for goal in Goal::ALL {
                for equipment in Equipment::ALL {
                    for minutes in (WorkoutDuration::MIN..=WorkoutDuration::MAX)
                        .step_by(usize::from(WorkoutDuration::STEP))
                    {
                        let prefs = WorkoutPreferences {
                            fitness_level: level,
                            goal,
                            duration: WorkoutDuration::clamped(minutes),
                            equipment,
                        };
                        let prompt = build_prompt(&prefs);
                        assert!(prompt.contains(&format!("for a {level} individual")));
                        assert!(prompt.contains(&format!("whose goal is {goal}.")));
                        assert!(prompt.contains(&format!("should last {minutes} minutes")));
                        assert!(prompt.contains(&format!("use {equipment} equipment")));
                    }
                }
            }
        }
    }
}
