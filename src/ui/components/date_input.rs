use chrono::{Datelike, NaiveDate};
use crossterm::event::KeyCode;

/// Which part of the date the cursor sits on while editing.
#[derive(Clone, Copy, PartialEq)]
enum Segment {
    Year,
    Month,
    Day,
}

impl Segment {
    fn width(&self) -> usize {
        match self {
            Segment::Year => 4,
            Segment::Month | Segment::Day => 2,
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            Segment::Year => "[YYYY]",
            Segment::Month => "[MM]",
            Segment::Day => "[DD]",
        }
    }
}

/// Segmented YYYY-MM-DD editor shared by the form screens. Digits accumulate
/// into the active segment and commit once the segment is full; out-of-range
/// input is discarded and the date keeps its previous value.
pub struct DateInputState {
    pub date: NaiveDate,
    pub editing: bool,
    segment: Segment,
    buffer: String,
}

impl DateInputState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            editing: false,
            segment: Segment::Year,
            buffer: String::new(),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        self.segment = Segment::Year;
        self.buffer.clear();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.buffer.push(c);
                if self.buffer.len() >= self.segment.width() {
                    self.commit_buffer();
                }
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Right => self.step_segment(true),
            KeyCode::Left => self.step_segment(false),
            _ => {}
        }
    }

    fn step_segment(&mut self, forward: bool) {
        self.segment = match (self.segment, forward) {
            (Segment::Year, true) | (Segment::Day, false) => Segment::Month,
            (Segment::Month, true) | (Segment::Year, false) => Segment::Day,
            (Segment::Day, true) | (Segment::Month, false) => Segment::Year,
        };
        self.buffer.clear();
    }

    /// Apply the typed segment if it yields a real calendar date.
    fn commit_buffer(&mut self) {
        let value: u32 = match self.buffer.parse() {
            Ok(v) => v,
            Err(_) => {
                self.buffer.clear();
                return;
            }
        };

        let candidate = match self.segment {
            Segment::Year if (1900..=2100).contains(&value) => {
                NaiveDate::from_ymd_opt(value as i32, self.date.month(), self.date.day())
            }
            Segment::Month if (1..=12).contains(&value) => {
                NaiveDate::from_ymd_opt(self.date.year(), value, self.date.day())
            }
            Segment::Day if value >= 1 && value <= days_in_month(self.date.year(), self.date.month()) => {
                NaiveDate::from_ymd_opt(self.date.year(), self.date.month(), value)
            }
            _ => None,
        };

        if let Some(date) = candidate {
            self.date = date;
        }
        self.buffer.clear();
    }

    /// The field text shown in the form, with the active segment marked while
    /// editing, e.g. "2024-[MM]-15".
    pub fn display_string(&self) -> String {
        if !self.editing {
            return self.date.format("%Y-%m-%d").to_string();
        }

        let marker = if self.buffer.is_empty() {
            self.segment.placeholder().to_string()
        } else {
            format!("[{}]", self.buffer)
        };

        let (year, month, day) = (
            self.date.format("%Y").to_string(),
            self.date.format("%m").to_string(),
            self.date.format("%d").to_string(),
        );

        match self.segment {
            Segment::Year => format!("{marker}-{month}-{day}"),
            Segment::Month => format!("{year}-{marker}-{day}"),
            Segment::Day => format!("{year}-{month}-{marker}"),
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(y: i32, m: u32, d: u32) -> DateInputState {
        let mut s = DateInputState::new(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        s.toggle_editing();
        s
    }

    fn type_digits(s: &mut DateInputState, digits: &str) {
        for c in digits.chars() {
            s.handle_input(KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_a_full_year_commits_it() {
        let mut s = state(2024, 1, 15);
        type_digits(&mut s, "2023");
        assert_eq!(s.date, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
    }

    #[test]
    fn out_of_range_month_is_discarded() {
        let mut s = state(2024, 1, 15);
        s.handle_input(KeyCode::Right);
        type_digits(&mut s, "13");
        assert_eq!(s.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn day_is_bounded_by_month_length() {
        let mut s = state(2024, 2, 10);
        s.handle_input(KeyCode::Right);
        s.handle_input(KeyCode::Right);
        type_digits(&mut s, "30");
        // February 2024 tops out at 29
        assert_eq!(s.date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());

        type_digits(&mut s, "29");
        assert_eq!(s.date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn display_marks_the_active_segment() {
        let mut s = state(2024, 1, 15);
        assert_eq!(s.display_string(), "[YYYY]-01-15");
        s.handle_input(KeyCode::Right);
        assert_eq!(s.display_string(), "2024-[MM]-15");
    }
}
