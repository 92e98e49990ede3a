use sqlx::{migrate::MigrateDatabase, sqlite::{SqlitePool, SqlitePoolOptions}, Sqlite, Row};
use chrono::{DateTime, Utc};
use std::env;
use crate::models::{Candidate, Vote};

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // Get database URL from environment or use a default
        let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:ballot_box.db".to_string());
        Self::with_url(&db_url).await
    }

    pub async fn with_url(db_url: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let in_memory = db_url.ends_with(":memory:");

        // Create database if it doesn't exist
        if !in_memory && !Sqlite::database_exists(db_url).await.unwrap_or(false) {
            Sqlite::create_database(db_url).await?;
        }

        // An in-memory database exists per connection, so the pool must not
        // hand out more than one
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .connect(db_url)
            .await?;

        // Initialize schema
        Self::init_schema(&pool).await?;

        Ok(Self { pool })
    }

    // Initialize the database schema
    async fn init_schema(pool: &SqlitePool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS candidates (
                id TEXT PRIMARY KEY,
                full_name TEXT NOT NULL,
                ballot_name TEXT,
                party_name TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS votes (
                id TEXT PRIMARY KEY,
                preferences TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    // Insert a candidate (administrative seeding and tests)
    pub async fn insert_candidate(
        &self,
        candidate: &Candidate,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO candidates (id, full_name, ballot_name, party_name, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&candidate.id)
        .bind(&candidate.full_name)
        .bind(&candidate.ballot_name)
        .bind(&candidate.party_name)
        .bind(candidate.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // Get all candidates in ballot order
    pub async fn list_candidates(
        &self,
    ) -> Result<Vec<Candidate>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, ballot_name, party_name, created_at
            FROM candidates
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut candidates = Vec::with_capacity(rows.len());
        for row in rows {
            let created_at_str = row.get::<String, _>("created_at");
            let created_at = DateTime::parse_from_rfc3339(&created_at_str)
                .map_err(|e| format!("Failed to parse created_at: {}", e))?
                .with_timezone(&Utc);

            candidates.push(Candidate {
                id: row.get::<String, _>("id"),
                full_name: row.get::<String, _>("full_name"),
                ballot_name: row.get::<Option<String>, _>("ballot_name"),
                party_name: row.get::<Option<String>, _>("party_name"),
                created_at,
            });
        }

        Ok(candidates)
    }

    // Insert a new vote record; votes are append-only
    pub async fn insert_vote(
        &self,
        vote: &Vote,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO votes (id, preferences, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&vote.id)
        .bind(&vote.preferences)
        .bind(vote.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // Get all stored votes
    pub async fn list_votes(
        &self,
    ) -> Result<Vec<Vote>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT id, preferences, created_at
            FROM votes
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut votes = Vec::with_capacity(rows.len());
        for row in rows {
            let created_at_str = row.get::<String, _>("created_at");
            let created_at = DateTime::parse_from_rfc3339(&created_at_str)
                .map_err(|e| format!("Failed to parse created_at: {}", e))?
                .with_timezone(&Utc);

            votes.push(Vote {
                id: row.get::<String, _>("id"),
                preferences: row.get::<String, _>("preferences"),
                created_at,
            });
        }

        Ok(votes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_db() -> Database {
        Database::with_url("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn candidates_round_trip_in_id_order() {
        let db = memory_db().await;

        let b = Candidate::new("2".to_string(), "B Person".to_string(), None, None);
        let a = Candidate::new(
            "1".to_string(),
            "A Person".to_string(),
            Some("A".to_string()),
            Some("SJB".to_string()),
        );
        db.insert_candidate(&b).await.unwrap();
        db.insert_candidate(&a).await.unwrap();

        let candidates = db.list_candidates().await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "1");
        assert_eq!(candidates[0].ballot_name.as_deref(), Some("A"));
        assert_eq!(candidates[0].party_name.as_deref(), Some("SJB"));
        assert_eq!(candidates[1].id, "2");
        assert_eq!(candidates[1].ballot_name, None);
    }

    #[tokio::test]
    async fn votes_round_trip() {
        let db = memory_db().await;

        let vote = Vote::new("opaque-token".to_string());
        db.insert_vote(&vote).await.unwrap();

        let votes = db.list_votes().await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].id, vote.id);
        assert_eq!(votes[0].preferences, "opaque-token");
    }
}
