use crate::schedule::{RecurringSubject, StudyPlan};
use log::info;
use ratatui::style::Color;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use time::Weekday;

const CONFIG_PATH_ENV_VAR: &str = "STUDYCAL_CONFIG_FILE";

const DEFAULT_COLOR: Color = Color::Cyan;

/// Loads the study plan from `explicit` if given, otherwise from the first
/// existing conventional location, otherwise falls back to the built-in
/// plan.
pub(crate) fn load(explicit: Option<&Path>) -> Result<StudyPlan, ConfigError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => locations().into_iter().find(|path| path.exists()),
    };
    let Some(path) = path else {
        info!("no config file found; using the built-in study plan");
        return Ok(default_plan());
    };
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let file: ConfigFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source: Box::new(source),
    })?;
    let plan = plan_from_entries(file.subjects)?;
    info!(
        "loaded {} subjects from {}",
        plan.subjects().len(),
        path.display()
    );
    Ok(plan)
}

// Search order: the environment override, the XDG config directory, then a
// dotfile in the home directory.
fn locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }
    if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        locations.push([dir.as_str(), "studycal", "config.toml"].iter().collect());
    } else if let Ok(home) = env::var("HOME") {
        locations.push(
            [home.as_str(), ".config", "studycal", "config.toml"]
                .iter()
                .collect(),
        );
    }
    if let Ok(home) = env::var("HOME") {
        locations.push([home.as_str(), ".studycal.toml"].iter().collect());
    }
    locations
}

/// The weekly plan of the reviewed deployment, used when no config file is
/// present.
pub(crate) fn default_plan() -> StudyPlan {
    StudyPlan::new(vec![
        subject("Math", Weekday::Monday, Color::Blue),
        subject("Physics", Weekday::Tuesday, Color::Green),
        subject("Chemistry", Weekday::Wednesday, Color::Magenta),
        subject("Literature", Weekday::Thursday, Color::Yellow),
        subject("History", Weekday::Friday, Color::Red),
        subject("Computer Science", Weekday::Monday, Color::LightBlue),
    ])
}

fn subject(name: &str, day: Weekday, color: Color) -> RecurringSubject {
    RecurringSubject {
        name: name.to_owned(),
        day,
        color,
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default, rename = "subject")]
    subjects: Vec<SubjectEntry>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
struct SubjectEntry {
    name: String,
    day: String,
    color: Option<String>,
}

// Weekday names and terminal colors arrive as strings; they are converted
// to their canonical types here, at the boundary.
fn plan_from_entries(entries: Vec<SubjectEntry>) -> Result<StudyPlan, ConfigError> {
    let mut subjects = Vec::with_capacity(entries.len());
    for entry in entries {
        let day = parse_weekday(&entry.day).ok_or_else(|| ConfigError::UnknownDay {
            name: entry.name.clone(),
            day: entry.day.clone(),
        })?;
        let color = match entry.color {
            Some(ref s) => Color::from_str(s).map_err(|_| ConfigError::UnknownColor {
                name: entry.name.clone(),
                color: s.clone(),
            })?,
            None => DEFAULT_COLOR,
        };
        subjects.push(RecurringSubject {
            name: entry.name,
            day,
            color,
        });
    }
    Ok(StudyPlan::new(subjects))
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_ascii_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Monday),
        "tuesday" | "tue" => Some(Weekday::Tuesday),
        "wednesday" | "wed" => Some(Weekday::Wednesday),
        "thursday" | "thu" => Some(Weekday::Thursday),
        "friday" | "fri" => Some(Weekday::Friday),
        "saturday" | "sat" => Some(Weekday::Saturday),
        "sunday" | "sun" => Some(Weekday::Sunday),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        source: Box<toml::de::Error>,
    },
    #[error("subject {name:?} has unknown study day {day:?}")]
    UnknownDay { name: String, day: String },
    #[error("subject {name:?} has unrecognized color {color:?}")]
    UnknownColor { name: String, color: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_plan(content: &str) -> Result<StudyPlan, ConfigError> {
        let file: ConfigFile = toml::from_str(content).unwrap();
        plan_from_entries(file.subjects)
    }

    #[test]
    fn parses_a_subject_table() {
        let plan = parse_plan(
            r#"
            [[subject]]
            name = "Math"
            day = "Monday"
            color = "blue"

            [[subject]]
            name = "Biology"
            day = "wed"
            "#,
        )
        .unwrap();
        assert_eq!(
            plan.subjects()[0],
            RecurringSubject {
                name: "Math".into(),
                day: Weekday::Monday,
                color: Color::Blue,
            }
        );
        assert_eq!(plan.subjects()[1].day, Weekday::Wednesday);
        assert_eq!(plan.subjects()[1].color, DEFAULT_COLOR);
    }

    #[test]
    fn empty_file_yields_an_empty_plan() {
        let plan = parse_plan("").unwrap();
        assert!(plan.subjects().is_empty());
    }

    #[test]
    fn rejects_an_unknown_weekday() {
        let err = parse_plan(
            r#"
            [[subject]]
            name = "Math"
            day = "Funday"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDay { day, .. } if day == "Funday"));
    }

    #[test]
    fn rejects_an_unknown_color() {
        let err = parse_plan(
            r#"
            [[subject]]
            name = "Math"
            day = "mon"
            color = "sparkly"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownColor { color, .. } if color == "sparkly"));
    }

    #[test]
    fn default_plan_matches_the_weekly_schedule() {
        let plan = default_plan();
        assert_eq!(plan.subjects().len(), 6);
        assert_eq!(plan.on(Weekday::Monday).count(), 2);
        assert_eq!(plan.on(Weekday::Saturday).count(), 0);
        assert_eq!(plan.on(Weekday::Sunday).count(), 0);
    }
}
