use crate::feed::Item;

/// What the list needs to show and filter a row.
pub(crate) trait ListRow {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn filter_value(&self) -> &str;
}

/// Display projection of a feed [`Item`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListEntry {
    pub title: String,
    pub description: String,
    pub link: String,
}

impl ListRow for ListEntry {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn filter_value(&self) -> &str {
        &self.title
    }
}

impl From<&Item> for ListEntry {
    fn from(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            link: item.link.clone(),
        }
    }
}

pub fn to_list_entries(items: &[Item]) -> Vec<ListEntry> {
    items.iter().map(ListEntry::from).collect()
}
