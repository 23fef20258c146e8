//! Display lookups for the dashboard: country flags, badges, gauges.
//!
//! Everything here is pure and total. Unknown input maps to a neutral
//! fallback rather than an error.

use mytrack_core::{Plan, Role};

use crate::models::CountryClicks;

const UNKNOWN_COUNTRY: &str = "Неизвестно";
const GLOBE: &str = "🌍";

/// Country names as reported by the analytics backend, with their flags.
const COUNTRY_FLAGS: &[(&str, &str)] = &[
    ("Россия", "🇷🇺"),
    ("США", "🇺🇸"),
    ("Украина", "🇺🇦"),
    ("Беларусь", "🇧🇾"),
    ("Казахстан", "🇰🇿"),
    ("Германия", "🇩🇪"),
    ("ФРГ", "🇩🇪"),
    ("Великобритания", "🇬🇧"),
    ("Франция", "🇫🇷"),
    ("Италия", "🇮🇹"),
    ("Испания", "🇪🇸"),
    ("Польша", "🇵🇱"),
    ("Нидерланды", "🇳🇱"),
    ("Канада", "🇨🇦"),
    ("Австралия", "🇦🇺"),
    ("Китай", "🇨🇳"),
    ("Япония", "🇯🇵"),
    ("Индия", "🇮🇳"),
    ("Бразилия", "🇧🇷"),
    ("Турция", "🇹🇷"),
    ("Гонконг", "🇭🇰"),
    ("Сингапур", "🇸🇬"),
    ("Латвия", "🇱🇻"),
    ("Литва", "🇱🇹"),
    ("Эстония", "🇪🇪"),
    ("Грузия", "🇬🇪"),
    ("Армения", "🇦🇲"),
    ("Азербайджан", "🇦🇿"),
    ("Узбекистан", "🇺🇿"),
    ("Молдова", "🇲🇩"),
    ("Сербия", "🇷🇸"),
];

/// Flag emoji for a country name, a globe when unknown.
#[must_use]
pub fn country_flag(country: Option<&str>) -> &'static str {
    country
        .and_then(|name| COUNTRY_FLAGS.iter().find(|(n, _)| *n == name))
        .map_or(GLOBE, |&(_, flag)| flag)
}

/// Display name for a country, `"Неизвестно"` when missing or unknown.
#[must_use]
pub fn country_name(country: Option<&str>) -> &str {
    match country {
        Some(name) if !name.trim().is_empty() && name != "Unknown" && name != UNKNOWN_COUNTRY => {
            name
        }
        _ => UNKNOWN_COUNTRY,
    }
}

/// Colour band of a usage gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressColor {
    Green,
    Yellow,
    Red,
}

impl ProgressColor {
    /// `>= 90` is red, `>= 70` yellow, anything else green.
    #[must_use]
    pub fn for_percent(percent: f64) -> Self {
        if percent >= 90.0 {
            Self::Red
        } else if percent >= 70.0 {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

/// Colour family of a role or plan badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Zinc,
    Blue,
    Purple,
    Yellow,
    PurplePink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

#[must_use]
pub const fn role_badge(role: Role) -> Badge {
    match role {
        Role::Owner => Badge {
            label: "Владелец",
            tone: BadgeTone::Yellow,
        },
        Role::Admin => Badge {
            label: "Админ",
            tone: BadgeTone::Purple,
        },
        Role::Moderator => Badge {
            label: "Модератор",
            tone: BadgeTone::Blue,
        },
        Role::User => Badge {
            label: "Пользователь",
            tone: BadgeTone::Zinc,
        },
    }
}

#[must_use]
pub const fn plan_badge(plan: Plan) -> Badge {
    match plan {
        Plan::Free => Badge {
            label: "Free",
            tone: BadgeTone::Zinc,
        },
        Plan::Pro => Badge {
            label: "Pro",
            tone: BadgeTone::Blue,
        },
        Plan::Ultimate => Badge {
            label: "Ultimate",
            tone: BadgeTone::PurplePink,
        },
    }
}

/// One row of the "top countries" list.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryShare<'a> {
    pub flag: &'static str,
    pub name: &'a str,
    pub clicks: u64,
    /// Clicks relative to the busiest country, 0..=100.
    pub percent_of_leader: f64,
}

/// The first `limit` countries, scaled against the first entry.
///
/// The backend already sorts by clicks, busiest first.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn top_countries(by_country: &[CountryClicks], limit: usize) -> Vec<CountryShare<'_>> {
    let leader = by_country.first().map_or(0, |c| c.clicks).max(1) as f64;
    by_country
        .iter()
        .take(limit)
        .map(|entry| CountryShare {
            flag: country_flag(entry.country.as_deref()),
            name: country_name(entry.country.as_deref()),
            clicks: entry.clicks,
            percent_of_leader: entry.clicks as f64 / leader * 100.0,
        })
        .collect()
}

/// Gigabytes with one decimal, e.g. `"3.5 GB"`.
#[must_use]
pub fn format_gb(gb: f64) -> String {
    format!("{gb:.1} GB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_flag_lookup() {
        assert_eq!(country_flag(Some("Россия")), "🇷🇺");
        assert_eq!(country_flag(Some("ФРГ")), "🇩🇪");
        assert_eq!(country_flag(Some("Атлантида")), "🌍");
        assert_eq!(country_flag(None), "🌍");
    }

    #[test]
    fn test_country_name_fallbacks() {
        assert_eq!(country_name(Some("Грузия")), "Грузия");
        assert_eq!(country_name(Some("Unknown")), "Неизвестно");
        assert_eq!(country_name(Some("")), "Неизвестно");
        assert_eq!(country_name(None), "Неизвестно");
    }

    #[test]
    fn test_progress_color_thresholds() {
        assert_eq!(ProgressColor::for_percent(95.0), ProgressColor::Red);
        assert_eq!(ProgressColor::for_percent(90.0), ProgressColor::Red);
        assert_eq!(ProgressColor::for_percent(89.9), ProgressColor::Yellow);
        assert_eq!(ProgressColor::for_percent(70.0), ProgressColor::Yellow);
        assert_eq!(ProgressColor::for_percent(69.9), ProgressColor::Green);
        assert_eq!(ProgressColor::for_percent(0.0), ProgressColor::Green);
    }

    #[test]
    fn test_badges_fall_back_to_lowest_tier() {
        assert_eq!(role_badge(Role::parse_lossy("owner")).label, "Владелец");
        assert_eq!(role_badge(Role::parse_lossy("overlord")), role_badge(Role::User));
        assert_eq!(plan_badge(Plan::parse_lossy("diamond")), plan_badge(Plan::Free));
        assert_eq!(plan_badge(Plan::Ultimate).tone, BadgeTone::PurplePink);
    }

    #[test]
    fn test_top_countries_scale_against_leader() {
        let data = vec![
            CountryClicks {
                country: Some("Россия".into()),
                clicks: 200,
            },
            CountryClicks {
                country: None,
                clicks: 50,
            },
            CountryClicks {
                country: Some("США".into()),
                clicks: 10,
            },
        ];

        let top = top_countries(&data, 2);
        assert_eq!(top.len(), 2);
        assert!((top[0].percent_of_leader - 100.0).abs() < f64::EPSILON);
        assert!((top[1].percent_of_leader - 25.0).abs() < f64::EPSILON);
        assert_eq!(top[1].name, "Неизвестно");
        assert_eq!(top[1].flag, "🌍");
    }

    #[test]
    fn test_top_countries_empty() {
        assert!(top_countries(&[], 5).is_empty());
    }

    #[test]
    fn test_format_gb() {
        assert_eq!(format_gb(3.456), "3.5 GB");
    }
}
