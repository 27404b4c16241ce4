//! Food courses and customer service requirements.

use std::fmt;

use crate::SimRng;

/// A food course a customer may require, visited in the fixed order
/// appetizer → main course → dessert regardless of which demands remain.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Course {
    Appetizer,
    MainCourse,
    Dessert,
}

impl Course {
    /// The canonical visit order.
    pub const ORDER: [Course; 3] = [Course::Appetizer, Course::MainCourse, Course::Dessert];

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Course::Appetizer => 0b001,
            Course::MainCourse => 0b010,
            Course::Dessert => 0b100,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Course::Appetizer => "appetizer",
            Course::MainCourse => "main_course",
            Course::Dessert => "dessert",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of required courses, stored as a 3-bit mask.
///
/// A customer's service requirement is always non-empty; use
/// [`CourseSet::sample_nonempty`] to draw one.  The *remaining* demands of a
/// pass may become empty as courses are cleared.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct CourseSet(u8);

impl CourseSet {
    pub const EMPTY: CourseSet = CourseSet(0);

    #[inline]
    pub fn contains(self, course: Course) -> bool {
        self.0 & course.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, course: Course) {
        self.0 |= course.bit();
    }

    #[inline]
    pub fn remove(&mut self, course: Course) {
        self.0 &= !course.bit();
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of required courses (0–3).
    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate the contained courses in canonical visit order.
    pub fn iter(self) -> impl Iterator<Item = Course> {
        Course::ORDER.into_iter().filter(move |c| self.contains(*c))
    }

    /// Draw a uniformly distributed *non-empty* subset of the three courses.
    ///
    /// Rejection sampling: each course is an independent coin flip and the
    /// empty outcome is resampled, matching the uniform-over-seven-subsets
    /// requirement distribution.
    pub fn sample_nonempty(rng: &mut SimRng) -> CourseSet {
        loop {
            let mut set = CourseSet::EMPTY;
            for course in Course::ORDER {
                if rng.gen_bool(0.5) {
                    set.insert(course);
                }
            }
            if !set.is_empty() {
                return set;
            }
        }
    }
}

impl FromIterator<Course> for CourseSet {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut set = CourseSet::EMPTY;
        for course in iter {
            set.insert(course);
        }
        set
    }
}

impl fmt::Display for CourseSet {
    /// `n/n/n` requirement notation, e.g. `1/0/1` for appetizer + dessert.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for course in Course::ORDER {
            if !first {
                f.write_str("/")?;
            }
            first = false;
            f.write_str(if self.contains(course) { "1" } else { "0" })?;
        }
        Ok(())
    }
}
