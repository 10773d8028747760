use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::generation::{generate_outcome, TextGenerator};
use crate::models::{WorkoutHistory, WorkoutPreferences, WorkoutRequest};
use crate::pdf::{DocumentRenderer, PdfArtifact, RenderError};
use crate::prompt::build_prompt;

#[derive(Debug)]
pub struct Submission {
    pub request: WorkoutRequest,
    pub artifact: Result<PdfArtifact, RenderError>,
}

/// Runs prompt, generation and rendering for one form submission and appends
/// the result to `history`, which is handed back to the caller.
pub fn handle_submission(
    mut history: WorkoutHistory,
    preferences: WorkoutPreferences,
    generator: &dyn TextGenerator,
    renderer: &DocumentRenderer,
    now: DateTime<Local>,
) -> (WorkoutHistory, Submission) {
    info!(
        fitness_level = %preferences.fitness_level,
        goal = %preferences.goal,
        duration = preferences.duration.minutes(),
        equipment = %preferences.equipment,
        "Generating workout plan"
    );

    let prompt = build_prompt(&preferences);
    let outcome = generate_outcome(generator, &prompt);

    let artifact = renderer.render(&outcome, &preferences, &now);
    if let Err(e) = &artifact {
        error!("Error writing workout PDF: {}", e);
    }

    let request = WorkoutRequest::new(
        preferences,
        outcome,
        now.format(WorkoutRequest::TIMESTAMP_FORMAT).to_string(),
    );
    history.push(request.clone());

    (history, Submission { request, artifact })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::tests::StubGenerator;
    use crate::generation::GenerationOutcome;
    use crate::models::{Equipment, FitnessLevel, Goal, WorkoutDuration};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(sec: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 2, 18, 30, sec).unwrap()
    }

    #[test]
    fn test_single_submission() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = DocumentRenderer::new(dir.path());
        let stub = StubGenerator::ok("Do 10 squats.");

        let (history, submission) = handle_submission(
            Vec::new(),
            WorkoutPreferences::default(),
            &stub,
            &renderer,
            at(0),
        );

        assert_eq!(history.len(), 1);
        assert_eq!(history[0], submission.request);
        assert_eq!(submission.request.generated_text(), "Do 10 squats.");
        assert_eq!(submission.request.timestamp(), "2024-05-02 18:30:00");

        let prompts = stub.prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("for a Beginner individual"));

        let artifact = submission.artifact.unwrap();
        assert_eq!(artifact.file_name, "Workout_Plan_20240502_183000.pdf");
        assert!(artifact.path.exists());
    }

    #[test]
    fn test_two_submissions_keep_their_own_entries() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = DocumentRenderer::new(dir.path());

        let first = WorkoutPreferences::default();
        let second = WorkoutPreferences {
            fitness_level: FitnessLevel::Advanced,
            goal: Goal::MuscleGain,
            duration: WorkoutDuration::clamped(90),
            equipment: Equipment::GymEquipment,
        };

        let (history, _) = handle_submission(
            Vec::new(),
            first,
            &StubGenerator::ok("Plan one"),
            &renderer,
            at(1),
        );
        let (history, _) = handle_submission(
            history,
            second,
            &StubGenerator::ok("Plan two"),
            &renderer,
            at(2),
        );

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].preferences(), &first);
        assert_eq!(history[0].generated_text(), "Plan one");
        assert_eq!(history[0].timestamp(), "2024-05-02 18:30:01");
        assert_eq!(history[1].preferences(), &second);
        assert_eq!(history[1].generated_text(), "Plan two");
        assert_eq!(history[1].timestamp(), "2024-05-02 18:30:02");
    }

    #[test]
    fn test_generation_failure_still_recorded_and_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = DocumentRenderer::new(dir.path());

        let (history, submission) = handle_submission(
            Vec::new(),
            WorkoutPreferences::default(),
            &StubGenerator::failing(503),
            &renderer,
            at(3),
        );

        assert_eq!(history.len(), 1);
        match submission.request.outcome() {
            GenerationOutcome::Failure(message) => {
                assert!(message.starts_with("An error occurred:"));
                assert!(message.contains("503"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(submission.artifact.is_ok());
    }

    #[test]
    fn test_render_failure_does_not_lose_history() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();
        let renderer = DocumentRenderer::new(&blocker);

        let (history, submission) = handle_submission(
            Vec::new(),
            WorkoutPreferences::default(),
            &StubGenerator::ok("Plan"),
            &renderer,
            at(4),
        );

        assert_eq!(history.len(), 1);
        assert!(matches!(submission.artifact, Err(RenderError::Io(_))));
    }
}
