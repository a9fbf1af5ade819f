use quick_xml::escape::escape;

use super::fields::{format_date, format_flag, format_tags};
use crate::types::EntryUpdate;

type FieldFormatter = fn(&EntryUpdate) -> String;

/// Payload elements in the order the service reads them.
const PAYLOAD_FIELDS: &[(&str, FieldFormatter)] = &[
    ("episode", |u: &EntryUpdate| u.episode.to_string()),
    ("status", |u: &EntryUpdate| u.status.to_string()),
    ("score", |u: &EntryUpdate| u.score.to_string()),
    ("storage_type", |u: &EntryUpdate| u.storage_type.to_string()),
    ("storage_value", |u: &EntryUpdate| u.storage_value.to_string()),
    ("times_rewatched", |u: &EntryUpdate| u.times_rewatched.to_string()),
    ("rewatch_value", |u: &EntryUpdate| u.rewatch_value.to_string()),
    ("date_start", |u: &EntryUpdate| format_date(u.start_date)),
    ("date_finish", |u: &EntryUpdate| format_date(u.finish_date)),
    ("priority", |u: &EntryUpdate| u.priority.to_string()),
    ("enable_discussion", |u: &EntryUpdate| format_flag(u.enable_discussion)),
    ("enable_rewatching", |u: &EntryUpdate| format_flag(u.enable_rewatching)),
    ("comments", |u: &EntryUpdate| u.comments.clone()),
    ("fansub_group", |u: &EntryUpdate| u.fansub_group.clone()),
    ("tags", |u: &EntryUpdate| format_tags(&u.tags)),
];

/// Encode an update as the `<entry>` document sent in the `data` form field.
pub fn encode_update(update: &EntryUpdate) -> String {
    let mut xml = String::from("<entry>");
    for (name, format) in PAYLOAD_FIELDS {
        let value = format(update);
        xml.push_str(&format!("<{name}>{}</{name}>", escape(value.as_str())));
    }
    xml.push_str("</entry>");
    xml
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::types::{ListStatus, UpdateStatus};

    fn element<'a>(xml: &'a str, name: &str) -> &'a str {
        let open = format!("<{name}>");
        let close = format!("</{name}>");
        let start = xml.find(&open).unwrap() + open.len();
        let end = xml[start..].find(&close).unwrap() + start;
        &xml[start..end]
    }

    #[test]
    fn test_encode_default_update() {
        let xml = encode_update(&EntryUpdate::default());
        assert_eq!(
            xml,
            "<entry><episode>0</episode><status></status><score>0</score>\
             <storage_type>0</storage_type><storage_value>0</storage_value>\
             <times_rewatched>0</times_rewatched><rewatch_value>0</rewatch_value>\
             <date_start>00000000</date_start><date_finish>00000000</date_finish>\
             <priority>0</priority><enable_discussion>0</enable_discussion>\
             <enable_rewatching>0</enable_rewatching><comments></comments>\
             <fansub_group></fansub_group><tags></tags></entry>"
        );
    }

    #[test]
    fn test_encode_tags_joined() {
        let update = EntryUpdate {
            tags: vec!["a".into(), "b".into(), "c".into()],
            ..Default::default()
        };
        assert_eq!(element(&encode_update(&update), "tags"), "a,b,c");
    }

    #[test]
    fn test_encode_dates_and_flags() {
        let update = EntryUpdate {
            start_date: NaiveDate::from_ymd_opt(2011, 10, 4),
            finish_date: NaiveDate::from_ymd_opt(2012, 1, 15),
            enable_discussion: true,
            enable_rewatching: false,
            ..Default::default()
        };
        let xml = encode_update(&update);
        assert_eq!(element(&xml, "date_start"), "10042011");
        assert_eq!(element(&xml, "date_finish"), "01152012");
        assert_eq!(element(&xml, "enable_discussion"), "1");
        assert_eq!(element(&xml, "enable_rewatching"), "0");
    }

    #[test]
    fn test_encode_status_variants() {
        let by_code = EntryUpdate {
            status: ListStatus::PLAN_TO_WATCH.into(),
            ..Default::default()
        };
        assert_eq!(element(&encode_update(&by_code), "status"), "6");

        let by_name = EntryUpdate {
            status: UpdateStatus::from("watching"),
            episode: 1,
            ..Default::default()
        };
        let xml = encode_update(&by_name);
        assert_eq!(element(&xml, "status"), "watching");
        assert_eq!(element(&xml, "episode"), "1");
    }

    #[test]
    fn test_encode_escapes_text() {
        let update = EntryUpdate {
            comments: "subs <by> Tom & Jerry".into(),
            storage_value: 1.5,
            ..Default::default()
        };
        let xml = encode_update(&update);
        assert_eq!(
            element(&xml, "comments"),
            "subs &lt;by&gt; Tom &amp; Jerry"
        );
        assert_eq!(element(&xml, "storage_value"), "1.5");
    }

    #[test]
    fn test_encode_field_order() {
        let xml = encode_update(&EntryUpdate::default());
        let positions: Vec<usize> = PAYLOAD_FIELDS
            .iter()
            .map(|(name, _)| xml.find(&format!("<{name}>")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
