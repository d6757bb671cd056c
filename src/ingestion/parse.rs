use rss::Channel;

use super::fetch::FetchError;
use super::types::FeedEntry;

/// RSS 2.0 first, Atom as a fallback. The RSS error is reported when neither parses.
pub fn parse_entries(xml: &[u8]) -> Result<Vec<FeedEntry>, FetchError> {
    match Channel::read_from(xml) {
        Ok(ch) => Ok(ch.items().iter().map(FeedEntry::from_rss_item).collect()),
        Err(rss_err) => match atom_syndication::Feed::read_from(xml) {
            Ok(feed) => Ok(feed.entries().iter().map(FeedEntry::from_atom_entry).collect()),
            Err(_) => Err(FetchError::Parse(rss_err.to_string())),
        },
    }
}
