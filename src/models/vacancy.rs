use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Middle,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Middle => "middle",
            ExperienceLevel::Senior => "senior",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "junior" => Ok(ExperienceLevel::Junior),
            "middle" => Ok(ExperienceLevel::Middle),
            "senior" => Ok(ExperienceLevel::Senior),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub salary_from: Decimal,
    pub salary_to: Decimal,
    pub specialization_id: Uuid,
    pub experience_level: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience_level_parses_known_values() {
        assert_eq!("junior".parse::<ExperienceLevel>(), Ok(ExperienceLevel::Junior));
        assert_eq!("middle".parse::<ExperienceLevel>(), Ok(ExperienceLevel::Middle));
        assert_eq!("senior".parse::<ExperienceLevel>(), Ok(ExperienceLevel::Senior));
        assert!("lead".parse::<ExperienceLevel>().is_err());
    }
}
