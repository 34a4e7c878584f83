// section data structures

use serde::{Deserialize, Serialize};

/// a titled group of paragraphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl Section {
    pub fn new(title: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Self {
            title: title.into(),
            paragraphs,
        }
    }
}

/// sections keyed by title, kept in insertion order
///
/// titles are unique. iteration yields sections in the order their title was
/// first inserted, which is also the order the formatter emits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.title == title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn get(&self, title: &str) -> Option<&[String]> {
        self.position(title)
            .map(|index| self.sections[index].paragraphs.as_slice())
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.title.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.sections
            .iter()
            .map(|s| (s.title.as_str(), s.paragraphs.as_slice()))
    }

    /// get or insert the section for `title`, returning its position
    pub fn open(&mut self, title: &str) -> usize {
        match self.position(title) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(title, Vec::new()));
                self.sections.len() - 1
            }
        }
    }

    /// paragraphs of the section at `index`, as returned by [`SectionMap::open`]
    pub fn paragraphs_mut(&mut self, index: usize) -> &mut Vec<String> {
        &mut self.sections[index].paragraphs
    }

    /// replace the paragraphs for `title`, appending a new section if needed
    pub fn insert(
        &mut self,
        title: impl Into<String>,
        paragraphs: Vec<String>,
    ) -> Option<Vec<String>> {
        let title = title.into();
        match self.position(&title) {
            Some(index) => Some(std::mem::replace(
                &mut self.sections[index].paragraphs,
                paragraphs,
            )),
            None => {
                self.sections.push(Section::new(title, paragraphs));
                None
            }
        }
    }

    pub fn remove(&mut self, title: &str) -> Option<Vec<String>> {
        self.position(title)
            .map(|index| self.sections.remove(index).paragraphs)
    }

    /// append another mapping's paragraphs title by title
    pub fn merge(&mut self, other: SectionMap) {
        for section in other.sections {
            let index = self.open(&section.title);
            self.sections[index].paragraphs.extend(section.paragraphs);
        }
    }

    /// keep only the paragraphs for which `keep` returns true
    pub fn retain_paragraphs<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        for section in &mut self.sections {
            section.paragraphs.retain(|p| keep(p));
        }
    }

    pub(crate) fn sections_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.sections.iter_mut()
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}

impl<T, P> FromIterator<(T, Vec<P>)> for SectionMap
where
    T: Into<String>,
    P: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, Vec<P>)>>(iter: I) -> Self {
        let mut map = SectionMap::new();
        for (title, paragraphs) in iter {
            map.insert(title, paragraphs.into_iter().map(Into::into).collect());
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_preserves_insertion_order() {
        let mut map = SectionMap::new();
        map.open("Fixed");
        map.open("Added");
        map.open("Fixed");

        let titles: Vec<_> = map.titles().collect();
        assert_eq!(titles, vec!["Fixed", "Added"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map: SectionMap = vec![("A", vec!["one"]), ("B", vec!["two"])]
            .into_iter()
            .collect();

        let old = map.insert("A", vec!["three".to_string()]);
        assert_eq!(old, Some(vec!["one".to_string()]));
        assert_eq!(map.titles().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(map.get("A"), Some(&["three".to_string()][..]));
    }

    #[test]
    fn test_merge_concatenates_per_title() {
        let mut first: SectionMap = vec![("Added", vec!["a1"]), ("Fixed", vec!["f1"])]
            .into_iter()
            .collect();
        let second: SectionMap = vec![("Removed", vec!["r1"]), ("Added", vec!["a2"])]
            .into_iter()
            .collect();

        first.merge(second);

        assert_eq!(
            first.titles().collect::<Vec<_>>(),
            vec!["Added", "Fixed", "Removed"]
        );
        assert_eq!(
            first.get("Added"),
            Some(&["a1".to_string(), "a2".to_string()][..])
        );
    }

    #[test]
    fn test_serializes_as_ordered_list() {
        let map: SectionMap = vec![("Zeta", vec!["z"]), ("Alpha", vec!["a"])]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json[0]["title"], "Zeta");
        assert_eq!(json[1]["paragraphs"][0], "a");
    }
}
