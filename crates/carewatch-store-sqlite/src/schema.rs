//! SQL schema for the carewatch SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per facility. A jurisdiction's collection is replaced wholesale
-- on every save; `position` preserves the saved order.
CREATE TABLE IF NOT EXISTS facilities (
    state                   TEXT    NOT NULL,
    county                  TEXT    NOT NULL,   -- jurisdiction name or 'Unknown'
    position                INTEGER NOT NULL,
    license_number          TEXT,
    name                    TEXT    NOT NULL,
    address                 TEXT,
    city                    TEXT,
    zip_code                TEXT,
    facility_type           TEXT    NOT NULL,   -- canonical snake_case tag
    facility_type_raw       TEXT,
    capacity                INTEGER,
    capacity_estimated      INTEGER NOT NULL,
    status                  TEXT    NOT NULL,   -- canonical SCREAMING_SNAKE tag
    license_first_date      TEXT,               -- YYYY-MM-DD
    license_expiration_date TEXT,
    last_inspection_date    TEXT,
    total_visits            INTEGER,
    total_citations         INTEGER,
    total_complaints        INTEGER,
    phone                   TEXT,
    source_url              TEXT,
    scraped_at              TEXT    NOT NULL,   -- RFC 3339 UTC
    PRIMARY KEY (state, county, position)
);

-- Written in the same transaction as the jurisdiction's facilities.
CREATE TABLE IF NOT EXISTS jurisdiction_summaries (
    state        TEXT NOT NULL,
    county       TEXT NOT NULL,
    summary_json TEXT NOT NULL,
    PRIMARY KEY (state, county)
);

CREATE TABLE IF NOT EXISTS state_summaries (
    state        TEXT PRIMARY KEY,
    summary_json TEXT NOT NULL
);

-- Replaced per (state, source) on every run.
CREATE TABLE IF NOT EXISTS unresolved_localities (
    state       TEXT    NOT NULL,
    source      TEXT    NOT NULL,
    locality    TEXT    NOT NULL,
    occurrences INTEGER NOT NULL,
    PRIMARY KEY (state, source, locality)
);

CREATE INDEX IF NOT EXISTS facilities_license_idx ON facilities(state, license_number);

PRAGMA user_version = 1;
";
