//! Advent calendar grid for the puzzle-log index.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::pipeline::PageBatch;

/// Last day shown on the calendar.
pub const LAST_DAY: u32 = 25;

/// One cell of the calendar grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    /// Day of month, `None` for padding cells.
    pub day: Option<u32>,

    /// Route of that day's entry, if one exists.
    pub route: Option<String>,
}

/// December grid with weeks starting on Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    /// Calendar year.
    pub year: i32,

    /// Cells in row-major order; the length is a multiple of seven.
    pub cells: Vec<CalendarCell>,
}

impl Calendar {
    /// Build the December calendar of `year` from the pages of `category`.
    ///
    /// An entry is placed on day `d` when the last segment of its route ends
    /// in the number `d` (`/advent-2020/3`, `/advent-2020/day-03`).
    #[must_use]
    pub fn december(year: i32, batch: &PageBatch, category: &str) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, 12, 1)?;
        let leading = first.weekday().num_days_from_sunday() as usize;

        let mut routes: Vec<Option<String>> = vec![None; LAST_DAY as usize];
        for page in batch.sequence(category) {
            if let Some(day) = day_of(&page.route)
                && (1..=LAST_DAY).contains(&day)
            {
                let slot = &mut routes[(day - 1) as usize];
                // Category order is newest first; keep the first entry seen.
                if slot.is_none() {
                    *slot = Some(page.route.clone());
                }
            }
        }

        let mut cells = vec![
            CalendarCell {
                day: None,
                route: None,
            };
            leading
        ];
        cells.extend(routes.into_iter().zip(1..).map(|(route, day)| CalendarCell {
            day: Some(day),
            route,
        }));
        while cells.len() % 7 != 0 {
            cells.push(CalendarCell {
                day: None,
                route: None,
            });
        }

        Some(Self { year, cells })
    }

    /// Iterate over the grid one week at a time.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }
}

/// Day number encoded at the end of a route's last segment.
fn day_of(route: &str) -> Option<u32> {
    let segment = route.rsplit('/').next()?;
    let digits_at = segment
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    segment[digits_at..].parse().ok()
}

#[cfg(test)]
mod tests {
    use folio_core::{Metadata, RawItem};
    use serde_json::json;

    use super::*;
    use crate::{
        category::CategoryDefinition, matcher::Matcher, pipeline::ContentPipeline,
        renderer::RendererRegistry, store::MemoryStore,
    };

    fn batch(paths: &[&str]) -> PageBatch {
        let items = paths
            .iter()
            .map(|p| {
                let mut metadata = Metadata::new();
                metadata.insert("date".to_string(), json!("2020-12-01"));
                RawItem::new(*p, metadata)
            })
            .collect();
        let category = CategoryDefinition::new(
            "advent-entry",
            Matcher::segment("advent-2020", &["md", "mdx"]),
            "advent-entry",
        );
        ContentPipeline::new(vec![category], &RendererRegistry::new())
            .expect("pipeline")
            .build_all(&MemoryStore::new(items))
            .expect("build")
    }

    #[test]
    fn test_day_of() {
        assert_eq!(day_of("/advent-2020/3"), Some(3));
        assert_eq!(day_of("/advent-2020/day-03"), Some(3));
        assert_eq!(day_of("/advent-2020/day12"), Some(12));
        assert_eq!(day_of("/advent-2020/preface"), None);
        assert_eq!(day_of("/"), None);
    }

    #[test]
    fn test_december_2020_layout() {
        let batch = batch(&["advent-2020/1/index.md", "advent-2020/3.mdx"]);
        let calendar = Calendar::december(2020, &batch, "advent-entry").expect("calendar");

        // December 1st 2020 was a Tuesday.
        assert_eq!(calendar.cells[0].day, None);
        assert_eq!(calendar.cells[1].day, None);
        assert_eq!(calendar.cells[2].day, Some(1));
        assert_eq!(calendar.cells[2].route.as_deref(), Some("/advent-2020/1"));
        assert_eq!(calendar.cells[3].route, None);
        assert_eq!(calendar.cells[4].route.as_deref(), Some("/advent-2020/3"));
        assert_eq!(calendar.cells[26].day, Some(25));

        assert_eq!(calendar.cells.len(), 28);
        assert_eq!(calendar.weeks().count(), 4);
        assert!(calendar.weeks().all(|w| w.len() == 7));
    }

    #[test]
    fn test_out_of_range_days_ignored() {
        let batch = batch(&["advent-2020/26.md", "advent-2020/0.md", "advent-2020/notes.md"]);
        let calendar = Calendar::december(2021, &batch, "advent-entry").expect("calendar");

        assert!(calendar.cells.iter().all(|c| c.route.is_none()));
        assert_eq!(calendar.cells.iter().filter(|c| c.day.is_some()).count(), 25);
    }

    #[test]
    fn test_empty_category() {
        let batch = batch(&[]);
        let calendar = Calendar::december(2020, &batch, "advent-entry").expect("calendar");
        assert_eq!(calendar.cells.len() % 7, 0);
    }
}
