use serde_json::{json, Value};
use trial_schedule::generator::{TrialGenerator, TrialGeneratorConfig};
use trial_schedule::models::{ScheduleOutput, SpecialtyLabel};
use trial_schedule::scheduler::{audit_schedule, ScheduleRequest, TrialScheduler};
use trial_schedule::ScheduleError;

fn solve(input: Value) -> ScheduleOutput {
    TrialScheduler::new()
        .schedule_json(&input.to_string())
        .expect("request should be valid")
}

fn no_specialty_competitors(n: usize) -> Value {
    Value::Array(
        (1..=n)
            .map(|i| json!({"id": format!("C{i}"), "specialties": []}))
            .collect(),
    )
}

fn single_any_arena(competitors: Value) -> Value {
    json!({
        "competitors": competitors,
        "arenas": [{"id": "A1", "specialtyType": "Any"}],
        "eventDays": ["2025-05-01"],
        "timeSlots": ["09:00", "09:15", "09:30", "09:45"]
    })
}

#[test]
fn two_unlabelled_competitors_share_one_any_arena() {
    let output = solve(single_any_arena(no_specialty_competitors(2)));

    assert_eq!(output.schedule.len(), 2);
    assert_eq!(output.diagnostics.required_runs, 2);
    assert_eq!(output.diagnostics.placed_runs, 2);
    assert!(output.diagnostics.unplaced_runs.is_empty());
}

#[test]
fn one_arena_capacity_equals_time_slot_count() {
    for n in 3..=4 {
        let output = solve(single_any_arena(no_specialty_competitors(n)));
        assert_eq!(output.schedule.len(), n);
    }

    let output = solve(single_any_arena(no_specialty_competitors(5)));
    assert!(output.schedule.is_empty());
    assert_eq!(output.diagnostics.placed_runs, 0);
    assert_eq!(output.diagnostics.unplaced_runs.len(), 1);

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(
        json["diagnostics"]["unplacedRuns"][0]["reason"],
        "All compatible slots conflict with other runs"
    );
}

#[test]
fn mismatched_detection_kind_fails_fast() {
    let output = solve(json!({
        "competitors": [{
            "id": "C1",
            "specialties": [{"type": "Detection", "detectionType": "Narcotics"}]
        }],
        "arenas": [{"id": "A1", "specialtyType": "Detection(Explosives)"}],
        "eventDays": ["2025-05-01"],
        "timeSlots": ["09:00"]
    }));

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["schedule"], json!([]));
    assert_eq!(
        json["diagnostics"]["unplacedRuns"][0],
        json!({
            "competitorId": "C1",
            "specialtyType": "Detection(Narcotics)",
            "reason": "No compatible arenas or no time capacity"
        })
    );
}

#[test]
fn any_arenas_take_specialty_runs_but_not_the_reverse() {
    // Bite work run fits an Any arena
    let output = solve(json!({
        "competitors": [{"id": "C1", "specialties": [{"type": "BiteWork"}]}],
        "arenas": [{"id": "A1", "specialtyType": "Any"}],
        "eventDays": ["2025-05-01"],
        "timeSlots": ["09:00"]
    }));
    assert_eq!(output.schedule.len(), 1);

    // Unlabelled run never fits a specialty arena, even with idle slots
    let output = solve(json!({
        "competitors": [{"id": "C1", "specialties": []}],
        "arenas": [{"id": "B1", "specialtyType": "BiteWork"}],
        "eventDays": ["2025-05-01"],
        "timeSlots": ["09:00", "09:30"]
    }));
    assert!(output.schedule.is_empty());
    assert_eq!(output.diagnostics.unplaced_runs[0].specialty_type, SpecialtyLabel::Any);
}

#[test]
fn mixed_specialties_over_two_days() {
    let both = json!([
        {"type": "BiteWork"},
        {"type": "Detection", "detectionType": "Narcotics"}
    ]);
    let request = json!({
        "competitors": [
            {"id": "C1", "specialties": both},
            {"id": "C2", "specialties": both}
        ],
        "arenas": [
            {"id": "BW", "specialtyType": "BiteWork"},
            {"id": "NA", "specialtyType": "Detection(Narcotics)"}
        ],
        "eventDays": ["2025-05-01", "2025-05-02"],
        "timeSlots": ["09:00", "09:30"]
    });
    let output = solve(request.clone());

    assert_eq!(output.schedule.len(), 4);
    assert_eq!(output.diagnostics.placed_runs, 4);
    let parsed: ScheduleRequest = serde_json::from_value(request).unwrap();
    assert!(audit_schedule(&output, &parsed).is_empty());
}

#[test]
fn malformed_input_is_rejected_before_solving() {
    let err = TrialScheduler::new()
        .schedule_json(
            &json!({
                "competitors": [],
                "arenas": [{"id": "A1", "specialtyType": "Any"}],
                "eventDays": ["2025-5-01"],
                "timeSlots": ["25:00"]
            })
            .to_string(),
        )
        .unwrap_err();

    match err {
        ScheduleError::Validation(errors) => assert_eq!(errors.len(), 3),
        other => panic!("expected validation error, got {other}"),
    }

    let err = TrialScheduler::new()
        .schedule_json(r#"{"competitors": [{"id": "C1", "specialties": [{"type": "Detection"}]}]}"#)
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Parse(_)));
}

#[test]
fn output_json_shape() {
    let output = solve(single_any_arena(no_specialty_competitors(1)));
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(
        json,
        json!({
            "schedule": [{
                "competitorId": "C1",
                "arenaId": "A1",
                "date": "2025-05-01",
                "startTime": "09:00",
                "endTime": "09:30"
            }],
            "diagnostics": {"requiredRuns": 1, "placedRuns": 1, "unplacedRuns": []}
        })
    );
}

#[test]
fn generated_instances_respect_hard_constraints() {
    let scheduler = TrialScheduler::new();
    for seed in 0..40 {
        let config = if seed % 2 == 0 {
            TrialGeneratorConfig::easy()
        } else {
            TrialGeneratorConfig::medium()
        };
        let request = TrialGenerator::new(config, seed).generate();
        let output = scheduler.schedule(&request).unwrap();

        // All-or-nothing
        assert_eq!(
            output.schedule.is_empty(),
            output.diagnostics.placed_runs == 0,
            "seed {seed}"
        );
        if output.is_complete() {
            assert_eq!(output.schedule.len(), output.diagnostics.required_runs);
            assert!(
                audit_schedule(&output, &request).is_empty(),
                "seed {seed}: {:?}",
                audit_schedule(&output, &request)
            );
        } else {
            assert!(!output.diagnostics.unplaced_runs.is_empty(), "seed {seed}");
        }
    }
}

#[test]
fn identical_input_gives_identical_output() {
    for seed in [3, 11, 27] {
        let request = TrialGenerator::new(TrialGeneratorConfig::medium(), seed).generate();
        let first = serde_json::to_string(&TrialScheduler::new().schedule(&request).unwrap()).unwrap();
        let second = serde_json::to_string(&TrialScheduler::new().schedule(&request).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn ample_capacity_places_everyone() {
    let config = TrialGeneratorConfig {
        num_competitors: 15,
        num_arenas: 4,
        num_days: 2,
        slots_per_day: 12,
        no_specialty_fraction: 0.0,
        any_arena_fraction: 1.0,
        max_specialties: 3,
        ..TrialGeneratorConfig::default()
    };
    let request = TrialGenerator::new(config, 5).generate();
    let output = TrialScheduler::new().schedule(&request).unwrap();

    assert!(output.is_complete());
    assert!(audit_schedule(&output, &request).is_empty());
}
