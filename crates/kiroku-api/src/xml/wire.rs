use serde::Deserialize;

// ── verify_credentials.xml ──────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserXml {
    pub id: String,
    pub username: String,
}

// ── search.xml ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SearchXml {
    #[serde(rename = "entry", default)]
    pub entries: Vec<SearchEntryXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchEntryXml {
    pub id: String,
    pub title: String,
    pub english: String,
    pub synonyms: String,
    pub episodes: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub synopsis: String,
    pub image: String,
}

// ── malappinfo.php ──────────────────────────────────────────────

/// `<anime>` elements may appear on either side of `<myinfo>`; the
/// `overlapped-lists` feature of quick-xml collects them all.
#[derive(Debug, Deserialize)]
pub struct MyAnimeListXml {
    pub error: Option<String>,
    pub myinfo: Option<MyInfoXml>,
    #[serde(default)]
    pub anime: Vec<ListAnimeXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MyInfoXml {
    pub user_id: String,
    pub user_name: String,
    pub user_watching: String,
    pub user_completed: String,
    pub user_onhold: String,
    pub user_dropped: String,
    pub user_plantowatch: String,
    pub user_days_spent_watching: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListAnimeXml {
    pub series_animedb_id: String,
    pub series_title: String,
    pub series_synonyms: String,
    pub series_type: String,
    pub series_episodes: String,
    pub series_status: String,
    pub series_start: String,
    pub series_end: String,
    pub series_image: String,
    pub my_id: String,
    pub my_watched_episodes: String,
    pub my_start_date: String,
    pub my_finish_date: String,
    pub my_score: String,
    pub my_status: String,
    pub my_rewatching: String,
    pub my_rewatching_ep: String,
    pub my_last_updated: String,
    pub my_tags: String,
}
