//! Historical statistics and achievements over closed sessions.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{Achievement, Session, Stats};

const TEN_SESSIONS: u32 = 10;
const HUNDRED_VERSES: u32 = 100;
const WEEK_STREAK_DAYS: u32 = 7;
const HIGH_ACCURACY_PERCENT: f64 = 90.0;

/// Aggregate sessions started within `window_days` of `now`, or all of them.
///
/// The streak is computed over every supplied session, not only the window.
/// A window reaching past the earliest representable date covers all history.
pub fn compute_stats(sessions: &[Session], window_days: Option<u32>, now: DateTime<Utc>) -> Stats {
    let cutoff = window_days.and_then(|days| {
        Duration::try_days(i64::from(days)).and_then(|window| now.checked_sub_signed(window))
    });
    let in_window: Vec<&Session> = sessions
        .iter()
        .filter(|s| cutoff.map_or(true, |cutoff| s.start_time >= cutoff))
        .collect();

    let mut stats = Stats {
        total_sessions: in_window.len() as u32,
        streak_days: streak_days(sessions, now.date_naive()),
        ..Stats::default()
    };

    for session in &in_window {
        stats.total_duration_ms = stats
            .total_duration_ms
            .saturating_add(session.total_duration_ms);
        stats.total_verses_recited = stats
            .total_verses_recited
            .saturating_add(session.verses_recited);
        stats.total_mistakes = stats.total_mistakes.saturating_add(session.mistakes_detected);
        stats.total_pauses = stats.total_pauses.saturating_add(session.pauses_detected);
    }

    if !in_window.is_empty() {
        let accuracy_sum: f64 = in_window.iter().map(|s| s.average_accuracy).sum();
        stats.average_accuracy = accuracy_sum / in_window.len() as f64;
    }

    stats
}

/// Consecutive UTC calendar days, ending at `today`, with at least one session.
pub fn streak_days(sessions: &[Session], today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;

    while sessions.iter().any(|s| s.start_time.date_naive() == day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }

    streak
}

/// Achievements currently earned, in [`Achievement::ALL`] order.
pub fn compute_achievements(stats: &Stats) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|achievement| match achievement {
            Achievement::FirstSession => stats.total_sessions >= 1,
            Achievement::TenSessions => stats.total_sessions >= TEN_SESSIONS,
            Achievement::HundredVerses => stats.total_verses_recited >= HUNDRED_VERSES,
            Achievement::WeekStreak => stats.streak_days >= WEEK_STREAK_DAYS,
            Achievement::HighAccuracy => stats.average_accuracy >= HIGH_ACCURACY_PERCENT,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 18, 30, 0).unwrap()
    }

    fn session_days_ago(days: i64, verses: u32, accuracy: f64) -> Session {
        let mut session = Session::open(now() - Duration::days(days));
        session.end_time = Some(session.start_time + Duration::minutes(10));
        session.total_duration_ms = 600_000;
        session.verses_recited = verses;
        session.mistakes_detected = 1;
        session.pauses_detected = 2;
        session.average_accuracy = accuracy;
        session
    }

    #[test]
    fn empty_history_is_all_zero() {
        let stats = compute_stats(&[], None, now());
        assert_eq!(stats, Stats::default());
        assert_eq!(stats.streak_days, 0);
        assert!(compute_achievements(&stats).is_empty());
    }

    #[test]
    fn totals_and_unweighted_accuracy() {
        let sessions = vec![
            session_days_ago(0, 10, 100.0),
            session_days_ago(1, 2, 50.0),
        ];
        let stats = compute_stats(&sessions, None, now());
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_duration_ms, 1_200_000);
        assert_eq!(stats.total_verses_recited, 12);
        assert_eq!(stats.total_mistakes, 2);
        assert_eq!(stats.total_pauses, 4);
        // mean of session averages, not weighted by verse count
        assert_eq!(stats.average_accuracy, 75.0);
    }

    #[test]
    fn window_filters_old_sessions() {
        let sessions = vec![
            session_days_ago(0, 1, 80.0),
            session_days_ago(3, 1, 90.0),
            session_days_ago(30, 1, 10.0),
        ];
        let stats = compute_stats(&sessions, Some(7), now());
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.average_accuracy, 85.0);
    }

    #[test]
    fn huge_window_covers_all_history() {
        let sessions = vec![
            session_days_ago(0, 1, 80.0),
            session_days_ago(4000, 1, 60.0),
        ];
        let stats = compute_stats(&sessions, Some(u32::MAX), now());
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.average_accuracy, 70.0);
        assert_eq!(compute_stats(&[], Some(u32::MAX), now()), Stats::default());
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let mut big = session_days_ago(0, u32::MAX, 90.0);
        big.total_duration_ms = u64::MAX;
        let sessions = vec![big, session_days_ago(1, 5, 90.0)];
        let stats = compute_stats(&sessions, None, now());
        assert_eq!(stats.total_verses_recited, u32::MAX);
        assert_eq!(stats.total_duration_ms, u64::MAX);
        assert_eq!(stats.total_mistakes, 2);
    }

    #[test]
    fn three_consecutive_days_ending_today() {
        let sessions = vec![
            session_days_ago(0, 1, 90.0),
            session_days_ago(1, 1, 90.0),
            session_days_ago(2, 1, 90.0),
        ];
        assert_eq!(compute_stats(&sessions, None, now()).streak_days, 3);
    }

    #[test]
    fn gap_caps_the_streak() {
        let sessions = vec![
            session_days_ago(0, 1, 90.0),
            session_days_ago(2, 1, 90.0),
            session_days_ago(3, 1, 90.0),
        ];
        assert_eq!(streak_days(&sessions, now().date_naive()), 1);

        let sessions = vec![
            session_days_ago(0, 1, 90.0),
            session_days_ago(1, 1, 90.0),
            session_days_ago(3, 1, 90.0),
        ];
        assert_eq!(streak_days(&sessions, now().date_naive()), 2);
    }

    #[test]
    fn no_session_today_means_no_streak() {
        let sessions = vec![session_days_ago(1, 1, 90.0), session_days_ago(2, 1, 90.0)];
        assert_eq!(streak_days(&sessions, now().date_naive()), 0);
    }

    #[test]
    fn several_sessions_on_one_day_count_once() {
        let sessions = vec![
            session_days_ago(0, 1, 90.0),
            session_days_ago(0, 1, 90.0),
            session_days_ago(1, 1, 90.0),
        ];
        assert_eq!(streak_days(&sessions, now().date_naive()), 2);
    }

    #[test]
    fn achievements_come_in_declared_order() {
        let stats = Stats {
            total_sessions: 12,
            total_verses_recited: 150,
            streak_days: 7,
            average_accuracy: 92.5,
            ..Stats::default()
        };
        assert_eq!(compute_achievements(&stats), Achievement::ALL.to_vec());

        let stats = Stats {
            total_sessions: 1,
            average_accuracy: 95.0,
            ..Stats::default()
        };
        assert_eq!(
            compute_achievements(&stats),
            vec![Achievement::FirstSession, Achievement::HighAccuracy]
        );
    }
}
