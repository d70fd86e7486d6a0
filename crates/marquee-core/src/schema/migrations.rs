/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

const MIGRATION_001: &str = r#"
-- Venues
CREATE TABLE IF NOT EXISTS venues (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    address TEXT NOT NULL,
    phone TEXT NOT NULL DEFAULT '',
    website TEXT NOT NULL DEFAULT '',
    facebook_link TEXT NOT NULL DEFAULT '',
    image_link TEXT NOT NULL DEFAULT '',
    genres TEXT NOT NULL DEFAULT '[]',
    seeking_talent INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT NOT NULL DEFAULT '',
    CHECK (seeking_talent = 1 OR seeking_description = '')
);

CREATE INDEX IF NOT EXISTS idx_venues_location ON venues(city, state);

-- Artists
CREATE TABLE IF NOT EXISTS artists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    phone TEXT NOT NULL DEFAULT '',
    website TEXT NOT NULL DEFAULT '',
    facebook_link TEXT NOT NULL DEFAULT '',
    image_link TEXT NOT NULL DEFAULT '',
    genres TEXT NOT NULL DEFAULT '[]',
    seeking_venue INTEGER NOT NULL DEFAULT 0,
    seeking_description TEXT NOT NULL DEFAULT '',
    CHECK (seeking_venue = 1 OR seeking_description = '')
);

-- Shows: one artist at one venue at a start time
CREATE TABLE IF NOT EXISTS shows (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
    venue_id INTEGER NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
    start_time TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_shows_artist_id ON shows(artist_id);
CREATE INDEX IF NOT EXISTS idx_shows_venue_id ON shows(venue_id);
CREATE INDEX IF NOT EXISTS idx_shows_start_time ON shows(start_time);
"#;

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: MIGRATION_001,
}];
