/// Channel-level data of one RSS document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub description: String,
    // Kept verbatim; feeds disagree on date formats.
    pub last_build_date: String,
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub link: String,
    pub description: String,
    /// `<guid>`; attributes such as `isPermaLink` are dropped.
    pub id: String,
    /// `<pubDate>`, unparsed.
    pub publish_date: String,
    /// `<dc:creator>`.
    pub creator: String,
}
