//! Shared constants for end-to-end tests
//!
//! When the seeded test data changes, update only this file.

// ============================================================================
// Test User Credentials
// ============================================================================

/// Seeded test user handle
pub const TEST_USER: &str = "testuser";

/// Seeded test user password
pub const TEST_PASS: &str = "testpass123";

// ============================================================================
// Test Catalog
// ============================================================================

pub struct TestSong {
    pub artist: &'static str,
    pub title: &'static str,
    pub year: i64,
    pub genre: &'static str,
    pub duration: i64,
}

/// Catalog id 1
pub const SONG_1: TestSong = TestSong {
    artist: "The Beach Boys",
    title: "God Only Knows",
    year: 1966,
    genre: "Pop",
    duration: 175,
};

/// Catalog id 2
pub const SONG_2: TestSong = TestSong {
    artist: "Queen",
    title: "Bohemian Rhapsody",
    year: 1975,
    genre: "Rock",
    duration: 354,
};

/// Catalog id 3
pub const SONG_3: TestSong = TestSong {
    artist: "Marvin Gaye",
    title: "What's Going On",
    year: 1971,
    genre: "Soul",
    duration: 233,
};

/// Not seeded, free to be created by tests
pub const UNKNOWN_SONG: TestSong = TestSong {
    artist: "Nobody",
    title: "Never Recorded",
    year: 2001,
    genre: "Silence",
    duration: 0,
};

pub const SEEDED_SONGS: [TestSong; 3] = [SONG_1, SONG_2, SONG_3];

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
