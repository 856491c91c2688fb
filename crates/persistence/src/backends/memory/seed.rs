//! Fixed demo data for a runnable server.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use uuid::Uuid;

use crate::types::{Author, Course};

pub(crate) const BERRY_ID: Uuid = Uuid::from_u128(0xd28888e9_2ba9_473a_a40f_e38cb54f9b35);
pub(crate) const NANCY_ID: Uuid = Uuid::from_u128(0xda2fd609_d754_4feb_8acd_c4f9ff13ba96);
pub(crate) const ELI_ID: Uuid = Uuid::from_u128(0x2902b665_1190_4c70_9915_b9c2d7680450);
pub(crate) const ARNOLD_ID: Uuid = Uuid::from_u128(0x102b566b_ba1f_404c_b2df_e2cde39ade09);
pub(crate) const SEABURY_ID: Uuid = Uuid::from_u128(0x5b3621c0_7b12_4e80_9c8b_3398cba7ee05);
pub(crate) const RUTHERFORD_ID: Uuid = Uuid::from_u128(0x2aadd2df_7caf_45ab_9355_7f6332985a87);

fn date(year: i32, month: u32, day: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
        .fixed_offset()
}

fn author(id: Uuid, first: &str, last: &str, born: DateTime<FixedOffset>, category: &str) -> Author {
    Author {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        date_of_birth: born,
        date_of_death: None,
        main_category: category.to_string(),
    }
}

fn course(id: u128, author_id: Uuid, title: &str, description: &str) -> Course {
    Course {
        id: Uuid::from_u128(id),
        title: title.to_string(),
        description: Some(description.to_string()),
        author_id,
    }
}

pub(crate) fn seed_data() -> (Vec<Author>, Vec<Course>) {
    let authors = vec![
        author(BERRY_ID, "Berry", "Griffin Beak Eldritch", date(1650, 7, 23), "Ships"),
        author(NANCY_ID, "Nancy", "Swashbuckler Rye", date(1668, 5, 21), "Rum"),
        author(ELI_ID, "Eli", "Ivory Bones Sweet", date(1701, 12, 16), "Singing"),
        author(ARNOLD_ID, "Arnold", "The Unseen Stafford", date(1702, 3, 6), "Singing"),
        author(SEABURY_ID, "Seabury", "Toxic Reyson", date(1690, 11, 23), "Maps"),
        author(RUTHERFORD_ID, "Rutherford", "Fearless Cloven", date(1723, 4, 5), "General debauchery"),
    ];

    let courses = vec![
        course(
            0x5b1c2b4d_48c7_402a_80c3_cc796ad49c6b,
            BERRY_ID,
            "Commandeering a Ship Without Getting Caught",
            "Commandeering a ship in rough waters isn't easy. Learn the basics here.",
        ),
        course(
            0xd8663e5e_7494_4f81_8739_6e0de1bea7ee,
            BERRY_ID,
            "Overthrowing Mutiny",
            "In this course, the author provides tips to avoid, or, if needed, overthrow pirate mutiny.",
        ),
        course(
            0xd173e20d_6b3f_4c1a_8e8c_7c5e8b1b2e4f,
            NANCY_ID,
            "Avoiding Brawls While Drinking as Much Rum as You Desire",
            "Every good pirate loves rum, but it also has a tendency to get you into trouble.",
        ),
        course(
            0x40ff5488_fdab_45b5_bc3a_14302d59869a,
            ELI_ID,
            "Singalong Pirate Hits",
            "In this course you'll learn how to sing all-time favourite pirate songs without sounding like you actually know the words or how to hold a note.",
        ),
        course(
            0x0f6c4f3e_2a1d_4e8b_9a3c_5d2e1f0a9b8c,
            SEABURY_ID,
            "Reading Maps Upside Down",
            "A practical guide to charts drawn by pirates who could not read.",
        ),
    ];

    (authors, courses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_courses_belong_to_seed_authors() {
        let (authors, courses) = seed_data();
        for course in &courses {
            assert!(authors.iter().any(|a| a.id == course.author_id));
        }
    }

    #[test]
    fn test_seed_dates_parsed() {
        let (authors, _) = seed_data();
        let berry = authors.iter().find(|a| a.id == BERRY_ID).unwrap();
        assert_eq!(berry.date_of_birth.to_rfc3339(), "1650-07-23T00:00:00+00:00");
    }
}
