use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{format_datetime, parse_datetime, to_i64, to_u32, to_u64},
};
use crate::models::Session;
use crate::session::{SessionHistory, MAX_HISTORY};

const SESSION_COLUMNS: &str = "id, start_time, end_time, verses_recited, pauses_detected, \
     mistakes_detected, total_duration_ms, average_accuracy, chapters_completed";

fn row_to_session(row: &Row) -> Result<Session> {
    let start_time: String = row.get("start_time")?;
    let end_time: String = row.get("end_time")?;
    let chapters: String = row.get("chapters_completed")?;

    Ok(Session {
        id: row.get("id")?,
        start_time: parse_datetime(&start_time, "start_time")?,
        end_time: Some(parse_datetime(&end_time, "end_time")?),
        verses_recited: to_u32(row.get("verses_recited")?, "verses_recited")?,
        pauses_detected: to_u32(row.get("pauses_detected")?, "pauses_detected")?,
        mistakes_detected: to_u32(row.get("mistakes_detected")?, "mistakes_detected")?,
        total_duration_ms: to_u64(row.get("total_duration_ms")?, "total_duration_ms")?,
        average_accuracy: row.get("average_accuracy")?,
        chapters_completed: serde_json::from_str::<BTreeSet<u16>>(&chapters)
            .context("failed to parse chapters_completed")?,
    })
}

impl Database {
    /// Store a closed session and drop the oldest rows beyond the history cap.
    pub async fn insert_closed_session(&self, session: &Session) -> Result<()> {
        let Some(end_time) = session.end_time else {
            bail!("session {} is still open", session.id);
        };
        let record = session.clone();
        let chapters = serde_json::to_string(&record.chapters_completed)?;

        self.execute(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO sessions (id, start_time, end_time, verses_recited, pauses_detected,
                                       mistakes_detected, total_duration_ms, average_accuracy,
                                       chapters_completed, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    record.id,
                    format_datetime(&record.start_time),
                    format_datetime(&end_time),
                    record.verses_recited,
                    record.pauses_detected,
                    record.mistakes_detected,
                    to_i64(record.total_duration_ms)?,
                    record.average_accuracy,
                    chapters,
                    format_datetime(&Utc::now()),
                ],
            )
            .with_context(|| format!("failed to insert session {}", record.id))?;
            prune_to(&tx, MAX_HISTORY)?;
            tx.commit()?;
            Ok(())
        })
        .await
    }

    /// Most recent sessions first.
    pub async fn list_sessions(&self, limit: usize) -> Result<Vec<Session>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SESSION_COLUMNS}
                 FROM sessions
                 ORDER BY start_time DESC
                 LIMIT ?1"
            ))?;

            let mut rows = stmt.query(params![limit])?;
            let mut sessions = Vec::new();
            while let Some(row) = rows.next()? {
                sessions.push(row_to_session(row)?);
            }
            Ok(sessions)
        })
        .await
    }

    pub async fn load_history(&self) -> Result<SessionHistory> {
        let sessions = self.list_sessions(MAX_HISTORY).await?;
        Ok(SessionHistory::from_sessions(sessions))
    }

    pub async fn count_sessions(&self) -> Result<usize> {
        self.execute(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
            Ok(usize::try_from(count).unwrap_or(0))
        })
        .await
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<bool> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let removed = conn.execute("DELETE FROM sessions WHERE id = ?1", params![session_id])?;
            Ok(removed > 0)
        })
        .await
    }
}

fn prune_to(conn: &rusqlite::Connection, keep: usize) -> Result<usize> {
    let keep = i64::try_from(keep).unwrap_or(i64::MAX);
    let removed = conn
        .execute(
            "DELETE FROM sessions
             WHERE id NOT IN (
                 SELECT id FROM sessions ORDER BY start_time DESC LIMIT ?1
             )",
            params![keep],
        )
        .context("failed to prune session history")?;
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn closed_session(start_ms: i64) -> Session {
        let mut session = Session::open(Utc.timestamp_millis_opt(start_ms).unwrap());
        session.end_time = Some(session.start_time + Duration::milliseconds(61_789));
        session.total_duration_ms = 61_789;
        session.verses_recited = 4;
        session.pauses_detected = 1;
        session.mistakes_detected = 3;
        session.average_accuracy = 87.5;
        session.chapters_completed.insert(112);
        session
    }

    fn open_db(dir: &tempfile::TempDir) -> Database {
        Database::new(dir.path().join("tilawa.sqlite3")).unwrap()
    }

    #[tokio::test]
    async fn closed_session_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);
        let session = closed_session(1_760_712_345_678);

        db.insert_closed_session(&session).await.unwrap();
        let loaded = db.list_sessions(10).await.unwrap();

        assert_eq!(loaded, vec![session]);
    }

    #[tokio::test]
    async fn open_session_is_not_stored() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);
        let open = Session::open(Utc::now());
        assert!(db.insert_closed_session(&open).await.is_err());
        assert_eq!(db.count_sessions().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn history_is_capped_and_keeps_newest() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);
        for i in 0..(MAX_HISTORY as i64 + 5) {
            db.insert_closed_session(&closed_session(1_700_000_000_000 + i * 60_000))
                .await
                .unwrap();
        }

        assert_eq!(db.count_sessions().await.unwrap(), MAX_HISTORY);
        let history = db.load_history().await.unwrap();
        assert_eq!(history.len(), MAX_HISTORY);
        let newest = history.latest().unwrap().start_time.timestamp_millis();
        assert_eq!(newest, 1_700_000_000_000 + (MAX_HISTORY as i64 + 4) * 60_000);
        let oldest = history.sessions().last().unwrap().start_time.timestamp_millis();
        assert_eq!(oldest, 1_700_000_000_000 + 5 * 60_000);
    }

    #[tokio::test]
    async fn reopening_keeps_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let session = closed_session(1_760_000_000_000);
        {
            let db = open_db(&dir);
            db.insert_closed_session(&session).await.unwrap();
        }
        let db = open_db(&dir);
        assert_eq!(db.load_history().await.unwrap().latest(), Some(&session));
        assert!(db.delete_session(&session.id).await.unwrap());
        assert!(!db.delete_session(&session.id).await.unwrap());
    }
}
