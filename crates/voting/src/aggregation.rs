//! Result computation. Everything here is read-only and may run in any
//! contest state.

use std::collections::HashMap;

use storage::dto::results::{AggregatedResults, RankedEntry};
use storage::models::{Ballot, ContestType, JudgeScore};
use uuid::Uuid;

use crate::engine::VotingEngine;
use crate::error::{Result, VoteError};

/// Number of places frozen per class when judge results are published.
pub const PODIUM_SIZE: usize = 3;

/// Sum values per car, keeping cars in order of first appearance, then sort
/// by descending total. The sort is stable, so equal totals keep that order.
fn tally(rows: impl IntoIterator<Item = (Uuid, i64)>) -> Vec<(Uuid, i64)> {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut totals: Vec<(Uuid, i64)> = Vec::new();

    for (car_id, value) in rows {
        let slot = *index.entry(car_id).or_insert_with(|| {
            totals.push((car_id, 0));
            totals.len() - 1
        });
        totals[slot].1 += value;
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Rank cars of one class by the sum of all their scores.
///
/// Places are sequential. Cars with equal totals are not co-ranked; the one
/// whose first score row came earlier takes the better place.
pub fn judge_ranking(scores: &[JudgeScore]) -> Vec<RankedEntry> {
    tally(scores.iter().map(|s| (s.car_id, i64::from(s.score))))
        .into_iter()
        .enumerate()
        .map(|(i, (car_id, total))| RankedEntry {
            car_id,
            place: i as i32 + 1,
            total,
        })
        .collect()
}

/// Rank cars of one specialty contest by ballot count.
///
/// Equal counts share a place and the next place is skipped, so every car
/// tied for the most votes is in first place.
pub fn specialty_ranking(ballots: &[Ballot]) -> Vec<RankedEntry> {
    let counts = tally(ballots.iter().map(|b| (b.car_id, 1)));

    let mut ranking: Vec<RankedEntry> = Vec::with_capacity(counts.len());
    for (i, (car_id, total)) in counts.into_iter().enumerate() {
        let place = match ranking.last() {
            Some(prev) if prev.total == total => prev.place,
            _ => i as i32 + 1,
        };
        ranking.push(RankedEntry {
            car_id,
            place,
            total,
        });
    }
    ranking
}

pub fn podium(ranking: &[RankedEntry]) -> Vec<RankedEntry> {
    ranking.iter().take(PODIUM_SIZE).copied().collect()
}

/// Every car sharing the highest count.
pub fn specialty_winners(ranking: &[RankedEntry]) -> Vec<RankedEntry> {
    ranking.iter().take_while(|e| e.place == 1).copied().collect()
}

impl VotingEngine {
    /// Live results for one scope: a vehicle class for judge results, a
    /// specialty contest for specialty results.
    pub async fn aggregated_results(
        &self,
        contest_type: ContestType,
        scope_id: Uuid,
    ) -> Result<AggregatedResults> {
        match contest_type {
            ContestType::Judge => {
                self.stores
                    .directory
                    .class(scope_id)
                    .await?
                    .ok_or(VoteError::NotFound("Vehicle class"))?;
                self.judge_results(scope_id).await
            }
            ContestType::Specialty => {
                self.stores
                    .directory
                    .specialty_contest(scope_id)
                    .await?
                    .ok_or(VoteError::NotFound("Specialty contest"))?;
                self.specialty_results(scope_id).await
            }
        }
    }

    /// Results for every scope a lock of `contest_type` publishes: all
    /// classes, or all active specialty contests.
    pub(crate) async fn results_for_all_scopes(
        &self,
        contest_type: ContestType,
    ) -> Result<Vec<AggregatedResults>> {
        let mut results = Vec::new();

        match contest_type {
            ContestType::Judge => {
                for class in self.stores.directory.classes().await? {
                    results.push(self.judge_results(class.class_id).await?);
                }
            }
            ContestType::Specialty => {
                for contest in self.stores.directory.specialty_contests().await? {
                    if contest.is_active {
                        results.push(self.specialty_results(contest.contest_id).await?);
                    }
                }
            }
        }

        Ok(results)
    }

    async fn judge_results(&self, class_id: Uuid) -> Result<AggregatedResults> {
        let scores = self.stores.scores.scores_in_class(class_id).await?;
        let ranking = judge_ranking(&scores);

        Ok(AggregatedResults {
            result_type: ContestType::Judge,
            scope_id: class_id,
            winners: podium(&ranking),
            ranking,
        })
    }

    async fn specialty_results(&self, contest_id: Uuid) -> Result<AggregatedResults> {
        let ballots = self.stores.ballots.ballots_for_contest(contest_id).await?;
        let ranking = specialty_ranking(&ballots);

        Ok(AggregatedResults {
            result_type: ContestType::Specialty,
            scope_id: contest_id,
            winners: specialty_winners(&ranking),
            ranking,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use storage::dto::voting::ScoreEntry;
    use storage::models::VoteState;

    use super::*;
    use crate::testing::Fixture;

    fn score(car_id: Uuid, value: i32) -> JudgeScore {
        JudgeScore {
            judge_id: Uuid::new_v4(),
            car_id,
            question_id: Uuid::new_v4(),
            score: value,
            scored_at: Utc::now(),
        }
    }

    fn ballot(car_id: Uuid) -> Ballot {
        Ballot {
            ballot_id: Uuid::new_v4(),
            contest_id: Uuid::nil(),
            user_id: Uuid::new_v4(),
            car_id,
            cast_at: Utc::now(),
        }
    }

    #[test]
    fn test_judge_total_is_sum_of_all_rows() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let scores = vec![score(a, 7), score(b, 9), score(a, 4), score(a, 1), score(b, 2)];

        let ranking = judge_ranking(&scores);

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0], RankedEntry { car_id: a, place: 1, total: 12 });
        assert_eq!(ranking[1], RankedEntry { car_id: b, place: 2, total: 11 });
    }

    #[test]
    fn test_judge_podium_cuts_at_three_with_stable_ties() {
        let (car1, car2, car3, car4) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let scores = vec![score(car2, 47), score(car4, 10), score(car3, 47), score(car1, 50)];

        let ranking = judge_ranking(&scores);
        let top = podium(&ranking);

        let ids: Vec<Uuid> = top.iter().map(|e| e.car_id).collect();
        assert_eq!(ids, vec![car1, car2, car3]);
        assert_eq!(top.iter().map(|e| e.place).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(!ids.contains(&car4));
    }

    #[test]
    fn test_specialty_tied_winners() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let ballots: Vec<Ballot> = [a, b, c, a, b, a, b].into_iter().map(ballot).collect();

        let ranking = specialty_ranking(&ballots);
        let winners = specialty_winners(&ranking);

        assert_eq!(winners.len(), 2);
        assert!(winners.iter().all(|w| w.total == 3 && w.place == 1));
        assert!(winners.iter().any(|w| w.car_id == a));
        assert!(winners.iter().any(|w| w.car_id == b));
        assert_eq!(ranking[2], RankedEntry { car_id: c, place: 3, total: 1 });
    }

    #[test]
    fn test_empty_inputs_rank_nothing() {
        assert!(judge_ranking(&[]).is_empty());
        assert!(specialty_winners(&specialty_ranking(&[])).is_empty());
    }

    #[tokio::test]
    async fn test_preview_matches_ledger_in_any_state() {
        let show = Fixture::new();
        let car = show.add_car();
        show.open(ContestType::Judge).await;

        show.engine
            .submit_scores(car, show.judge, None, &show.sheet(&[5, 6, 3]))
            .await
            .unwrap();
        show.engine
            .submit_scores(car, show.second_judge, None, &show.sheet(&[8, 2, 1]))
            .await
            .unwrap();

        show.engine
            .set_contest_state(ContestType::Judge, VoteState::Closed)
            .await
            .unwrap();

        let results = show
            .engine
            .aggregated_results(ContestType::Judge, show.class_id)
            .await
            .unwrap();
        assert_eq!(results.ranking, vec![RankedEntry { car_id: car, place: 1, total: 25 }]);

        let stored: i64 = show
            .engine
            .scores_for_car(car)
            .await
            .unwrap()
            .iter()
            .map(|s| i64::from(s.score))
            .sum();
        assert_eq!(stored, results.ranking[0].total);
    }

    #[tokio::test]
    async fn test_preview_unknown_scope_is_not_found() {
        let show = Fixture::new();

        let err = show
            .engine
            .aggregated_results(ContestType::Specialty, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, VoteError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_preview_only_counts_class_cars() {
        let show = Fixture::new();
        let inside = show.add_car();
        let outside = show.add_car_in(Uuid::new_v4());
        show.open(ContestType::Judge).await;

        show.engine
            .submit_scores(inside, show.judge, None, &[ScoreEntry { question_id: show.questions[0], value: 4 }])
            .await
            .unwrap();
        // Questions are configured per class, so the foreign car cannot be
        // scored against this sheet.
        let err = show
            .engine
            .submit_scores(outside, show.judge, None, &show.sheet(&[1, 1, 1]))
            .await
            .unwrap_err();
        assert!(matches!(err, VoteError::NotFound(_)));

        let results = show
            .engine
            .aggregated_results(ContestType::Judge, show.class_id)
            .await
            .unwrap();
        assert_eq!(results.ranking.len(), 1);
        assert_eq!(results.ranking[0].car_id, inside);
    }
}
