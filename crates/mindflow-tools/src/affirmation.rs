use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

pub const AFFIRMATIONS: [&str; 15] = [
    "You are worthy of love and kindness, especially from yourself.",
    "Every small step forward is still progress. Be proud of how far you've come.",
    "It's okay to take things one moment at a time. You don't have to have it all figured out.",
    "Your feelings are valid, and it's brave to acknowledge them.",
    "You are stronger than you think, and this difficult moment will pass.",
    "Taking care of your mental health is not selfish. It's essential.",
    "You deserve rest and peace. It's okay to slow down.",
    "Every day is a new opportunity to be gentle with yourself.",
    "You are not alone in this. Reaching out for support is a sign of strength.",
    "Your best is enough. You don't need to be perfect to be valuable.",
    "The world is better because you are in it.",
    "It's okay to set boundaries. Protecting your energy is self-care.",
    "You have survived 100% of your worst days. You're doing better than you think.",
    "Healing isn't linear, and every small act of self-kindness matters.",
    "You are allowed to outgrow the version of yourself that was struggling.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAffirmation {
    pub affirmation: String,
    /// e.g. "Monday, January 5, 2026"
    pub date: String,
}

/// The affirmation for a given day; stable for the whole day
pub fn affirmation_for(date: NaiveDate) -> DailyAffirmation {
    let index = date.ordinal() as usize % AFFIRMATIONS.len();
    DailyAffirmation {
        affirmation: AFFIRMATIONS[index].to_string(),
        date: date.format("%A, %B %-d, %Y").to_string(),
    }
}

pub fn today() -> DailyAffirmation {
    affirmation_for(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_formatting() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(affirmation_for(date).date, "Monday, January 5, 2026");
    }

    #[test]
    fn test_index_is_day_of_year_mod_fifteen() {
        // Jan 1 is day 1
        let jan_1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(affirmation_for(jan_1).affirmation, AFFIRMATIONS[1]);

        // Jan 15 is day 15, wrapping to the first
        let jan_15 = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(affirmation_for(jan_15).affirmation, AFFIRMATIONS[0]);
    }

    #[test]
    fn test_same_day_same_affirmation() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(affirmation_for(date), affirmation_for(date));
    }
}
