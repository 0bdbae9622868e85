//! Trial instance generator.
//!
//! Generates random, reproducible schedule requests for load testing and
//! property checks. Instances are always valid requests; whether they are
//! feasible depends on the configured capacity.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::models::{Arena, Competitor, DetectionType, Specialty, SpecialtyLabel, DATE_FORMAT};
use crate::scheduler::ScheduleRequest;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Configuration for generating trial requests.
#[derive(Debug, Clone)]
pub struct TrialGeneratorConfig {
    /// Number of competitors.
    pub num_competitors: usize,
    /// Number of arenas.
    pub num_arenas: usize,
    /// Number of consecutive event days.
    pub num_days: u64,
    /// Start times offered per day.
    pub slots_per_day: u32,
    /// First event day.
    pub first_day: NaiveDate,
    /// First start time of each day (minutes after midnight).
    pub day_start_minutes: u32,
    /// Minutes between consecutive start times.
    pub slot_spacing_minutes: u32,
    /// Fraction of competitors with no declared specialty (0.0 to 1.0).
    pub no_specialty_fraction: f64,
    /// Fraction of arenas tagged `Any` (0.0 to 1.0).
    pub any_arena_fraction: f64,
    /// Upper bound on specialties per competitor (1 to 3).
    pub max_specialties: usize,
}

impl Default for TrialGeneratorConfig {
    fn default() -> Self {
        Self {
            num_competitors: 12,
            num_arenas: 3,
            num_days: 2,
            slots_per_day: 8,
            first_day: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or(NaiveDate::MIN),
            day_start_minutes: 8 * 60,
            slot_spacing_minutes: 30,
            no_specialty_fraction: 0.25,
            any_arena_fraction: 0.34,
            max_specialties: 2,
        }
    }
}

impl TrialGeneratorConfig {
    /// Easy difficulty: plenty of slots, mostly general-purpose arenas.
    pub fn easy() -> Self {
        Self {
            num_competitors: 8,
            num_arenas: 4,
            slots_per_day: 10,
            any_arena_fraction: 0.5,
            max_specialties: 1,
            ..Self::default()
        }
    }

    /// Medium difficulty: moderate demand against specialised arenas.
    pub fn medium() -> Self {
        Self::default()
    }

    /// Hard difficulty: demand close to capacity, few `Any` arenas.
    pub fn hard() -> Self {
        Self {
            num_competitors: 24,
            num_arenas: 3,
            num_days: 2,
            slots_per_day: 8,
            no_specialty_fraction: 0.1,
            any_arena_fraction: 0.2,
            max_specialties: 3,
            ..Self::default()
        }
    }
}

/// Generator for trial schedule requests.
pub struct TrialGenerator {
    config: TrialGeneratorConfig,
    rng: StdRng,
}

impl TrialGenerator {
    /// Creates a new generator with the given config and seed.
    pub fn new(config: TrialGeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a request.
    pub fn generate(&mut self) -> ScheduleRequest {
        let arenas = self.generate_arenas();
        let competitors = self.generate_competitors();
        ScheduleRequest::new(competitors, arenas)
            .with_event_days(self.event_days())
            .with_time_slots(self.time_slots())
    }

    fn generate_arenas(&mut self) -> Vec<Arena> {
        let specialised = [
            SpecialtyLabel::BiteWork,
            SpecialtyLabel::Detection(DetectionType::Narcotics),
            SpecialtyLabel::Detection(DetectionType::Explosives),
        ];

        (0..self.config.num_arenas)
            .map(|i| {
                let label = if self.rng.random_bool(self.config.any_arena_fraction.clamp(0.0, 1.0)) {
                    SpecialtyLabel::Any
                } else {
                    specialised[self.rng.random_range(0..specialised.len())]
                };
                Arena::new(format!("A{}", i + 1), label).with_name(format!("Arena {}", i + 1))
            })
            .collect()
    }

    fn generate_competitors(&mut self) -> Vec<Competitor> {
        let max = self.config.max_specialties.clamp(1, 3);

        (0..self.config.num_competitors)
            .map(|i| {
                let mut competitor = Competitor::new(format!("C{}", i + 1))
                    .with_name(format!("K9 {}", i + 1))
                    .with_handler(format!("Handler {}", i + 1));

                if !self
                    .rng
                    .random_bool(self.config.no_specialty_fraction.clamp(0.0, 1.0))
                {
                    let mut pool = [
                        Specialty::BiteWork,
                        Specialty::detection(DetectionType::Narcotics),
                        Specialty::detection(DetectionType::Explosives),
                    ];
                    pool.shuffle(&mut self.rng);
                    let count = self.rng.random_range(1..=max);
                    competitor.specialties = pool[..count].to_vec();
                }
                competitor
            })
            .collect()
    }

    fn event_days(&self) -> Vec<String> {
        (0..self.config.num_days)
            .filter_map(|i| self.config.first_day.checked_add_days(Days::new(i)))
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect()
    }

    fn time_slots(&self) -> Vec<String> {
        let spacing = self.config.slot_spacing_minutes.max(1);
        (0..self.config.slots_per_day)
            .map(|i| self.config.day_start_minutes + i * spacing)
            .take_while(|&m| m < MINUTES_PER_DAY)
            .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
            .collect()
    }
}
