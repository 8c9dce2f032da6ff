use std::collections::BTreeMap;

use crate::calendar::date::CalendarDate;

/// Activities grouped by day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityIndex {
    days: BTreeMap<CalendarDate, Vec<String>>,
}

impl ActivityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, date: CalendarDate, activity: impl Into<String>) {
        self.days.entry(date).or_default().push(activity.into());
    }

    pub fn activities(&self, date: CalendarDate) -> &[String] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn activities_for_key(&self, key: &str) -> Option<&[String]> {
        let date = CalendarDate::parse_key(key).ok()?;
        self.days.get(&date).map(Vec::as_slice)
    }

    pub fn has_activities(&self, date: CalendarDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CalendarDate, &[String])> {
        self.days.iter().map(|(date, activities)| (*date, activities.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.days.keys().map(CalendarDate::key)
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn activity_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(CalendarDate, S)> for ActivityIndex {
    fn from_iter<I: IntoIterator<Item = (CalendarDate, S)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (date, activity) in iter {
            index.push(date, activity);
        }
        index
    }
}
