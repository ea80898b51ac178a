//! Course catalogue.

use std::cmp::Ordering;

use halaqa_list::{FilterSet, Flagged, ListRecord, Selection, SortKey, order, toggle_counted};
use halaqa_types::enums::CourseLevel;
use halaqa_types::tables::Course;
use uuid::Uuid;

use super::counter;

#[derive(Debug, Clone, PartialEq)]
pub struct CourseCard {
    pub id: Uuid,
    pub title: String,
    pub instructor: String,
    pub level: CourseLevel,
    pub description: Option<String>,
    pub lessons: u32,
    pub enrolled_count: u32,
    /// Unrated courses carry no score rather than zero.
    pub rating: Option<f64>,
    pub enrolled: bool,
}

impl From<Course> for CourseCard {
    fn from(row: Course) -> Self {
        Self {
            id: row.id,
            title: row.title,
            instructor: row.instructor,
            level: row.level,
            description: row.description,
            lessons: counter(row.lessons),
            enrolled_count: counter(row.enrolled_count),
            rating: row.rating,
            enrolled: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CourseFilters {
    pub level: Selection<CourseLevel>,
}

impl FilterSet<CourseCard> for CourseFilters {
    fn admits(&self, item: &CourseCard) -> bool {
        self.level.admits(&item.level)
    }
}

sort_keys! {
    CourseSort {
        Rating => "rating",
        Popular => "popular",
        Title => "title",
    }
}

impl SortKey<CourseCard> for CourseSort {
    fn compare(self, a: &CourseCard, b: &CourseCard) -> Ordering {
        match self {
            Self::Rating => order::descending_opt_f64(a.rating, b.rating),
            Self::Popular => order::descending(a.enrolled_count, b.enrolled_count),
            Self::Title => order::alphabetical(&a.title, &b.title),
        }
    }
}

impl ListRecord for CourseCard {
    type Id = Uuid;
    type Filters = CourseFilters;
    type Sort = CourseSort;

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.instructor.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseFlag {
    Enrolled,
}

impl Flagged for CourseCard {
    type Flag = CourseFlag;

    fn toggle(&mut self, flag: CourseFlag) {
        match flag {
            CourseFlag::Enrolled => toggle_counted(&mut self.enrolled, &mut self.enrolled_count),
        }
    }
}
