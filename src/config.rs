use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MealPlanConfig {
    /// How many days before the target date count as "recently used".
    pub lookback_days: i64,
}

impl MealPlanConfig {
    pub const MAX_LOOKBACK_DAYS: i64 = 366;

    /// Parses `MEAL_PLAN_LOOKBACK_DAYS`. Unparsable or out-of-range values
    /// keep the default.
    fn lookback_days_from(raw: Option<&str>) -> i64 {
        raw.and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|d| (0..=Self::MAX_LOOKBACK_DAYS).contains(d))
            .unwrap_or(Self::default().lookback_days)
    }
}

impl Default for MealPlanConfig {
    fn default() -> Self {
        Self { lookback_days: 7 }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub meal_plan: MealPlanConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "nutriplan".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "nutriplan-users".into()),
        };
        let meal_plan = MealPlanConfig {
            lookback_days: MealPlanConfig::lookback_days_from(
                std::env::var("MEAL_PLAN_LOOKBACK_DAYS").ok().as_deref(),
            ),
        };
        Ok(Self {
            database_url,
            jwt,
            meal_plan,
        })
    }
}
