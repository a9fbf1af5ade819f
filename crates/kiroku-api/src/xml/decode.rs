use super::fields::{parse_code, parse_date, parse_number, parse_timestamp};
use super::wire::{ListAnimeXml, MyAnimeListXml, SearchEntryXml, SearchXml, UserXml};
use crate::error::MalError;
use crate::types::{AnimeSearchResult, ListEntry, ListStatus, ListSummary, RewatchValue, User};

/// Decode the body of `verify_credentials.xml`.
pub fn decode_user(body: &str) -> Result<User, MalError> {
    let wire: UserXml = quick_xml::de::from_str(body)?;
    let id: u64 = parse_number(&wire.id, "id")?;
    if id == 0 {
        return Err(MalError::malformed("user id must be positive"));
    }
    Ok(User {
        id,
        username: wire.username,
    })
}

/// Decode the body of `search.xml`. An empty body means no matches.
pub fn decode_search_results(body: &str) -> Result<Vec<AnimeSearchResult>, MalError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let wire: SearchXml = quick_xml::de::from_str(body)?;
    wire.entries
        .into_iter()
        .map(SearchEntryXml::into_search_result)
        .collect()
}

/// Decode the body of `malappinfo.php`.
pub fn decode_list_summary(body: &str) -> Result<ListSummary, MalError> {
    let wire: MyAnimeListXml = quick_xml::de::from_str(body)?;
    if let Some(message) = wire.error {
        return Err(MalError::malformed(format!("service error: {message}")));
    }
    let info = wire
        .myinfo
        .ok_or_else(|| MalError::malformed("missing <myinfo> element"))?;

    let entries = wire
        .anime
        .into_iter()
        .map(ListAnimeXml::into_list_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ListSummary {
        user_id: parse_number(&info.user_id, "user_id")?,
        username: info.user_name,
        watching: parse_number(&info.user_watching, "user_watching")?,
        completed: parse_number(&info.user_completed, "user_completed")?,
        on_hold: parse_number(&info.user_onhold, "user_onhold")?,
        dropped: parse_number(&info.user_dropped, "user_dropped")?,
        plan_to_watch: parse_number(&info.user_plantowatch, "user_plantowatch")?,
        days_watched: parse_number(
            &info.user_days_spent_watching,
            "user_days_spent_watching",
        )?,
        entries,
    })
}

impl SearchEntryXml {
    fn into_search_result(self) -> Result<AnimeSearchResult, MalError> {
        Ok(AnimeSearchResult {
            id: parse_number(&self.id, "id")?,
            episodes: parse_number(&self.episodes, "episodes")?,
            start_date: parse_date(&self.start_date),
            end_date: parse_date(&self.end_date),
            title: self.title,
            english: self.english,
            synonyms: self.synonyms,
            media_type: self.media_type,
            status: self.status,
            synopsis: self.synopsis,
            image_url: self.image,
        })
    }
}

impl ListAnimeXml {
    fn into_list_entry(self) -> Result<ListEntry, MalError> {
        Ok(ListEntry {
            series_id: parse_number(&self.series_animedb_id, "series_animedb_id")?,
            series_type: parse_number(&self.series_type, "series_type")?,
            series_episodes: parse_number(&self.series_episodes, "series_episodes")?,
            series_status: parse_number(&self.series_status, "series_status")?,
            series_start: parse_date(&self.series_start),
            series_end: parse_date(&self.series_end),
            my_id: parse_number(&self.my_id, "my_id")?,
            watched_episodes: parse_number(&self.my_watched_episodes, "my_watched_episodes")?,
            start_date: parse_date(&self.my_start_date),
            finish_date: parse_date(&self.my_finish_date),
            score: parse_number(&self.my_score, "my_score")?,
            status: ListStatus(parse_code(&self.my_status, "my_status")?),
            rewatch: RewatchValue(parse_code(&self.my_rewatching, "my_rewatching")?),
            rewatching_episode: parse_number(&self.my_rewatching_ep, "my_rewatching_ep")?,
            last_updated: parse_timestamp(&self.my_last_updated, "my_last_updated")?,
            series_title: self.series_title,
            series_synonyms: self.series_synonyms,
            series_image: self.series_image,
            tags: self.my_tags,
        })
    }
}
