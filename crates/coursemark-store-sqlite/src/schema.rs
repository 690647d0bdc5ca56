//! SQL schema for the Coursemark SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per (learner, course) that has ever recorded a completion.
CREATE TABLE IF NOT EXISTS progress (
    learner_id  TEXT NOT NULL,
    course_id   TEXT NOT NULL,
    cursor      TEXT NOT NULL,   -- JSON-encoded ResumeCursor
    updated_at  TEXT NOT NULL,   -- ISO 8601 UTC
    PRIMARY KEY (learner_id, course_id)
);

-- Completed video indices. Insertion order (rowid) is completion order.
CREATE TABLE IF NOT EXISTS completions (
    learner_id   TEXT    NOT NULL,
    course_id    TEXT    NOT NULL,
    video_index  INTEGER NOT NULL CHECK (video_index >= 0),
    recorded_at  TEXT    NOT NULL,
    UNIQUE (learner_id, course_id, video_index)
);

CREATE INDEX IF NOT EXISTS completions_pair_idx ON completions(learner_id, course_id);

PRAGMA user_version = 1;
";
