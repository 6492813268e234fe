use crate::club::{ClubId, DivisionId};
use crate::config::ScheduleConfig;
use crate::error::{LeagueError, Result};
use crate::league::{Schedule, ScheduleDay, ScheduledMatchup};
use itertools::Itertools;
use log::info;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{BTreeMap, HashSet};

type MatchDay = Vec<ScheduledMatchup>;

/// Builds the regular season calendar with the circle method.
///
/// Inside a division one club stays fixed while the others rotate, so every
/// rotation pairs each club exactly once. Clubs of two different divisions
/// meet every-versus-every through a cyclic shift of the larger division.
/// Each rotation is repeated once per leg, flipping home and away between
/// legs. The resulting days are shuffled and rest days are spliced in at
/// every index divisible by the recovery period, plus a final sentinel rest day.
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    pub fn generate<R: Rng + ?Sized>(
        divisions: &BTreeMap<DivisionId, Vec<ClubId>>,
        config: &ScheduleConfig,
        rng: &mut R,
    ) -> Result<Schedule> {
        config.validate()?;
        Self::validate_clubs(divisions)?;

        let shuffled: Vec<Vec<ClubId>> = divisions
            .values()
            .map(|ids| {
                let mut ids = ids.clone();
                ids.shuffle(rng);
                ids
            })
            .collect();

        let intra_division = shuffled
            .iter()
            .map(|ids| Self::legs(Self::circle_rotations(ids), config.rounds))
            .collect();

        let mut days = Self::merge_parallel(intra_division);

        for (first, second) in shuffled.iter().tuple_combinations() {
            days.extend(Self::legs(
                Self::cross_rotations(first, second),
                config.extra_division_rounds,
            ));
        }

        days.retain(|day| !day.is_empty());
        days.shuffle(rng);

        let match_days = days.len();
        let schedule = Schedule::new(Self::insert_recovery_days(days, config.recovery_day_period));

        info!(
            "schedule generated: {} days, {} match days, {} divisions",
            schedule.len(),
            match_days,
            divisions.len()
        );

        Ok(schedule)
    }

    fn validate_clubs(divisions: &BTreeMap<DivisionId, Vec<ClubId>>) -> Result<()> {
        let mut seen = HashSet::new();

        for id in divisions.values().flatten() {
            if !seen.insert(*id) {
                return Err(LeagueError::configuration(format!(
                    "club {id} appears more than once"
                )));
            }
        }

        if seen.len() < 2 {
            return Err(LeagueError::configuration(format!(
                "a schedule needs at least 2 clubs, got {}",
                seen.len()
            )));
        }

        Ok(())
    }

    /// One day per rotation, each club of `ids` playing at most once.
    /// An odd club count gets a bye slot; the club drawn against it rests.
    pub fn circle_rotations(ids: &[ClubId]) -> Vec<MatchDay> {
        let mut slots: Vec<Option<ClubId>> = ids.iter().copied().map(Some).collect();
        if slots.len() % 2 == 1 {
            slots.push(None);
        }

        let n = slots.len();
        if n < 2 {
            return Vec::new();
        }

        (0..n - 1)
            .map(|shift| {
                let rotated = Self::rotate(&slots, shift);

                (0..n / 2)
                    .filter_map(|i| match (rotated[i], rotated[n - 1 - i]) {
                        (Some(home), Some(away)) => Some(ScheduledMatchup::new(home, away)),
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    /// Every club of `first` against every club of `second`, once each.
    /// `first` hosts in the base orientation.
    pub fn cross_rotations(first: &[ClubId], second: &[ClubId]) -> Vec<MatchDay> {
        let first_is_smaller = first.len() <= second.len();
        let (small, large) = if first_is_smaller {
            (first, second)
        } else {
            (second, first)
        };

        if small.is_empty() {
            return Vec::new();
        }

        (0..large.len())
            .map(|shift| {
                small
                    .iter()
                    .enumerate()
                    .map(|(i, &s)| {
                        let l = large[(i + shift) % large.len()];
                        if first_is_smaller {
                            ScheduledMatchup::new(s, l)
                        } else {
                            ScheduledMatchup::new(l, s)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Repeats the rotations `legs` times. A rotation is mirrored when its
    /// index plus the leg index is odd, so consecutive legs swap venues and the
    /// fixed club alternates venues within a leg.
    fn legs(rotations: Vec<MatchDay>, legs: u32) -> Vec<MatchDay> {
        let mut days = Vec::with_capacity(rotations.len() * legs as usize);

        for leg in 0..legs as usize {
            for (index, rotation) in rotations.iter().enumerate() {
                if (index + leg) % 2 == 1 {
                    days.push(rotation.iter().map(ScheduledMatchup::mirrored).collect());
                } else {
                    days.push(rotation.clone());
                }
            }
        }

        days
    }

    /// Divisions share no clubs, so their n-th days can be played together.
    fn merge_parallel(per_division: Vec<Vec<MatchDay>>) -> Vec<MatchDay> {
        let longest = per_division.iter().map(Vec::len).max().unwrap_or(0);
        let mut merged = vec![MatchDay::new(); longest];

        for division_days in per_division {
            for (index, day) in division_days.into_iter().enumerate() {
                merged[index].extend(day);
            }
        }

        merged
    }

    fn insert_recovery_days(days: Vec<MatchDay>, period: u32) -> Vec<ScheduleDay> {
        let period = period as usize;
        let mut schedule: Vec<ScheduleDay> = Vec::with_capacity(days.len() + days.len() / period + 2);

        for day in days {
            if schedule.len() % period == 0 {
                schedule.push(None);
            }
            schedule.push(Some(day));
        }

        // season-over sentinel
        schedule.push(None);

        schedule
    }

    fn rotate<T: Copy>(slots: &[T], shift: usize) -> Vec<T> {
        let mut rest = slots[1..].to_vec();
        let len = rest.len().max(1);
        rest.rotate_right(shift % len);

        std::iter::once(slots[0]).chain(rest).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn one_division(n: u32) -> BTreeMap<DivisionId, Vec<ClubId>> {
        BTreeMap::from([(1, (0..n).collect())])
    }

    fn two_divisions(a: u32, b: u32) -> BTreeMap<DivisionId, Vec<ClubId>> {
        BTreeMap::from([(1, (0..a).collect()), (2, (100..100 + b).collect())])
    }

    /// (home, away) -> meetings
    fn meetings(schedule: &Schedule) -> HashMap<(ClubId, ClubId), u32> {
        let mut counts = HashMap::new();
        for m in schedule.all_matchups() {
            *counts.entry((m.home_id, m.away_id)).or_insert(0) += 1;
        }
        counts
    }

    fn assert_no_club_twice_per_day(schedule: &Schedule) {
        for day in schedule.days().iter().flatten() {
            let mut seen = HashSet::new();
            for m in day {
                assert!(seen.insert(m.home_id), "club {} twice in a day", m.home_id);
                assert!(seen.insert(m.away_id), "club {} twice in a day", m.away_id);
            }
        }
    }

    fn assert_recovery_days(schedule: &Schedule, period: usize) {
        for index in (0..schedule.len()).step_by(period) {
            assert!(schedule.is_rest_day(index), "day {index} should be a rest day");
        }
        assert!(schedule.is_rest_day(schedule.len() - 1));
    }

    #[test]
    fn test_four_clubs_single_leg() {
        let mut rng = StdRng::seed_from_u64(1);
        let schedule =
            ScheduleGenerator::generate(&one_division(4), &ScheduleConfig::new(1, 3), &mut rng)
                .unwrap();

        assert_eq!(schedule.match_days(), 3);
        assert_no_club_twice_per_day(&schedule);
        assert_recovery_days(&schedule, 3);

        for club in 0..4 {
            assert_eq!(schedule.club_matchups(club).len(), 3);
        }

        let mut pairs = HashSet::new();
        for m in schedule.all_matchups() {
            assert!(pairs.insert((m.home_id.min(m.away_id), m.home_id.max(m.away_id))));
        }
        assert_eq!(pairs.len(), 6);

        // rest, match, match, rest, match, sentinel
        assert_eq!(schedule.len(), 6);
    }

    #[test]
    fn test_double_round_robin_balances_venues() {
        let mut rng = StdRng::seed_from_u64(5);
        let schedule =
            ScheduleGenerator::generate(&one_division(6), &ScheduleConfig::new(4, 5), &mut rng)
                .unwrap();
        let counts = meetings(&schedule);

        for home in 0..6 {
            for away in 0..6 {
                if home != away {
                    assert_eq!(counts.get(&(home, away)), Some(&2));
                }
            }
        }
    }

    #[test]
    fn test_odd_division_gets_byes() {
        let mut rng = StdRng::seed_from_u64(9);
        let schedule =
            ScheduleGenerator::generate(&one_division(5), &ScheduleConfig::new(2, 4), &mut rng)
                .unwrap();

        assert_no_club_twice_per_day(&schedule);
        assert_eq!(schedule.match_days(), 10);
        for club in 0..5 {
            assert_eq!(schedule.club_matchups(club).len(), 8);
        }
        for day in schedule.days().iter().flatten() {
            assert_eq!(day.len(), 2);
        }

        let counts = meetings(&schedule);
        for home in 0..5 {
            for away in 0..5 {
                if home != away {
                    assert_eq!(counts.get(&(home, away)), Some(&1), "{home} hosting {away}");
                }
            }
        }
    }

    #[test]
    fn test_two_divisions_play_intra_and_cross() {
        let mut rng = StdRng::seed_from_u64(11);
        let schedule =
            ScheduleGenerator::generate(&two_divisions(4, 3), &ScheduleConfig::new(2, 4), &mut rng)
                .unwrap();
        let counts = meetings(&schedule);

        assert_no_club_twice_per_day(&schedule);

        // intra: both venues once; cross: once each way as well
        for (a, b) in [(0, 1), (2, 3), (100, 101), (101, 102), (0, 100), (3, 102)] {
            assert_eq!(counts.get(&(a, b)), Some(&1), "{a} hosting {b}");
            assert_eq!(counts.get(&(b, a)), Some(&1), "{b} hosting {a}");
        }
        assert_eq!(counts.values().sum::<u32>(), 2 * (6 + 3 + 12));
    }

    #[test]
    fn test_cross_rotations_cover_every_pair_once() {
        let days = ScheduleGenerator::cross_rotations(&[1, 2, 3, 4], &[10, 11]);

        assert_eq!(days.len(), 4);
        let pairs: HashSet<_> = days.iter().flatten().copied().collect();
        assert_eq!(pairs.len(), 8);
        assert!(pairs.iter().all(|m| m.home_id < 10 && m.away_id >= 10));
    }

    #[test]
    fn test_degenerate_inputs_fail() {
        let mut rng = StdRng::seed_from_u64(0);

        let single = one_division(1);
        assert!(matches!(
            ScheduleGenerator::generate(&single, &ScheduleConfig::new(2, 4), &mut rng),
            Err(LeagueError::Configuration(_))
        ));

        let duplicated = BTreeMap::from([(1, vec![1, 2]), (2, vec![2, 3])]);
        assert!(ScheduleGenerator::generate(&duplicated, &ScheduleConfig::new(2, 4), &mut rng).is_err());

        assert!(ScheduleGenerator::generate(&one_division(4), &ScheduleConfig::new(0, 4), &mut rng).is_err());
        assert!(ScheduleGenerator::generate(&one_division(4), &ScheduleConfig::new(2, 1), &mut rng).is_err());
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let config = ScheduleConfig::new(2, 3);
        let first = ScheduleGenerator::generate(&two_divisions(4, 4), &config, &mut StdRng::seed_from_u64(3)).unwrap();
        let second = ScheduleGenerator::generate(&two_divisions(4, 4), &config, &mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_even_division_double_round_robin(half in 1u32..7, r in 1u32..3, period in 2u32..6, seed in any::<u64>()) {
            let n = half * 2;
            let mut rng = StdRng::seed_from_u64(seed);
            let schedule = ScheduleGenerator::generate(
                &one_division(n),
                &ScheduleConfig::new(2 * r, period),
                &mut rng,
            ).unwrap();
            let counts = meetings(&schedule);

            for home in 0..n {
                for away in 0..n {
                    if home != away {
                        prop_assert_eq!(counts.get(&(home, away)).copied(), Some(r));
                    }
                }
            }

            assert_no_club_twice_per_day(&schedule);
            assert_recovery_days(&schedule, period as usize);
        }

        #[test]
        fn prop_any_split_is_conflict_free(a in 1u32..8, b in 0u32..8, rounds in 1u32..4, period in 2u32..6, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let divisions = if b == 0 { one_division(a.max(2)) } else { two_divisions(a, b) };
            let schedule = ScheduleGenerator::generate(
                &divisions,
                &ScheduleConfig::new(rounds, period),
                &mut rng,
            ).unwrap();

            assert_no_club_twice_per_day(&schedule);
            assert_recovery_days(&schedule, period as usize);

            // every pair of distinct clubs meets `rounds` times in total
            let clubs: Vec<ClubId> = divisions.values().flatten().copied().collect();
            let counts = meetings(&schedule);
            for (x, y) in clubs.iter().tuple_combinations() {
                let total = counts.get(&(*x, *y)).copied().unwrap_or(0)
                    + counts.get(&(*y, *x)).copied().unwrap_or(0);
                prop_assert_eq!(total, rounds);
            }
        }
    }
}
